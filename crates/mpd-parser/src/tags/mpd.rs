use super::{BaseUrl, Period, ProgramInfo, TextTag, UtcTiming};
use crate::{
    duration::{duration_or, epoch_seconds, parse_duration},
    error::MpdResult,
};

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Prefix the default namespace is listed under by [`Mpd::namespace`].
pub const DEFAULT_NAMESPACE_PREFIX: &str = "ns";

/// Fallback for `minimumUpdatePeriod`, in seconds.
const DEFAULT_MINIMUM_UPDATE_PERIOD: f64 = 2.0;

tag! {
    /// The `MPD` root element.
    Mpd
}

impl Mpd {
    /// Encoding named by the XML declaration the document was read with. Every wrapper over the
    /// same document reports the same value.
    pub fn encoding(&self) -> String {
        self.node
            .document()
            .borrow()
            .encoding()
            .unwrap_or(DEFAULT_ENCODING)
            .to_string()
    }

    pub fn set_encoding(&self, encoding: Option<&str>) {
        self.node
            .document()
            .borrow_mut()
            .set_encoding(encoding.map(str::to_string));
    }

    /// Namespace prefixes mapped to URIs. The default namespace is listed as
    /// [`DEFAULT_NAMESPACE_PREFIX`].
    pub fn namespace(&self) -> Vec<(String, String)> {
        self.node.memoize("namespace", || {
            self.node
                .namespaces()
                .into_iter()
                .map(|(prefix, uri)| {
                    let prefix = prefix.unwrap_or_else(|| DEFAULT_NAMESPACE_PREFIX.to_string());
                    (prefix, uri)
                })
                .collect()
        })
    }

    /// The default namespace URI.
    pub fn xmlns(&self) -> Option<String> {
        self.node.text_property("xmlns", "xmlns")
    }

    pub fn cenc(&self) -> Option<String> {
        self.node.text_property("cenc", "xmlns:cenc")
    }

    attributes! { pub;
        id, set_id: text = "id";
        /// `static` or `dynamic`.
        r#type, set_type: text = "type";
        profiles, set_profiles: text = "profiles";
        availability_start_time, set_availability_start_time: text = "availabilityStartTime";
        availability_end_time, set_availability_end_time: text = "availabilityEndTime";
        publish_time, set_publish_time: text = "publishTime";
        media_presentation_duration, set_media_presentation_duration: text = "mediaPresentationDuration";
        minimum_update_period, set_minimum_update_period: text = "minimumUpdatePeriod";
        min_buffer_time, set_min_buffer_time: text = "minBufferTime";
        time_shift_buffer_depth, set_time_shift_buffer_depth: text = "timeShiftBufferDepth";
        suggested_presentation_delay, set_suggested_presentation_delay: text = "suggestedPresentationDelay";
        max_segment_duration, set_max_segment_duration: text = "maxSegmentDuration";
        max_subsegment_duration, set_max_subsegment_duration: text = "maxSubsegmentDuration";
    }

    /// A missing `type` means `static`.
    pub fn is_static(&self) -> bool {
        self.r#type().as_deref() != Some("dynamic")
    }

    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    pub fn availability_start_time_in_seconds(&self) -> MpdResult<Option<f64>> {
        self.node.try_memoize("availability_start_time_in_seconds", || {
            epoch_seconds(self.availability_start_time().as_deref())
        })
    }

    pub fn availability_end_time_in_seconds(&self) -> MpdResult<Option<f64>> {
        self.node.try_memoize("availability_end_time_in_seconds", || {
            epoch_seconds(self.availability_end_time().as_deref())
        })
    }

    /// Defaults to 2 seconds.
    pub fn minimum_update_period_in_seconds(&self) -> MpdResult<f64> {
        self.node.try_memoize("minimum_update_period_in_seconds", || {
            duration_or(
                self.minimum_update_period().as_deref(),
                DEFAULT_MINIMUM_UPDATE_PERIOD,
            )
        })
    }

    pub fn time_shift_buffer_depth_in_seconds(&self) -> MpdResult<f64> {
        self.node.try_memoize("time_shift_buffer_depth_in_seconds", || {
            duration_or(self.time_shift_buffer_depth().as_deref(), 0.0)
        })
    }

    pub fn media_presentation_duration_in_seconds(&self) -> MpdResult<Option<f64>> {
        self.node.try_memoize("media_presentation_duration_in_seconds", || {
            self.media_presentation_duration()
                .map(|value| parse_duration(&value))
                .transpose()
        })
    }

    pub fn min_buffer_time_in_seconds(&self) -> MpdResult<Option<f64>> {
        self.node.try_memoize("min_buffer_time_in_seconds", || {
            self.min_buffer_time()
                .map(|value| parse_duration(&value))
                .transpose()
        })
    }

    children! { pub;
        program_informations: ProgramInfo = "ProgramInformation";
        base_urls: BaseUrl = "BaseURL";
        locations: TextTag = "Location";
        utc_timings: UtcTiming = "UTCTiming";
        periods: Period = "Period";
    }
}
