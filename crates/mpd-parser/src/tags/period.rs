use super::{
    AdaptationSet, AssetIdentifier, BaseUrl, EventStream, Mpd, SegmentBase, SegmentList,
    SegmentTemplate, Subset,
};
use crate::{duration::duration_or, error::MpdResult, node::Tag};

tag! {
    /// A presentation interval with its own set of adaptation sets.
    Period
}

impl Period {
    attributes! { pub;
        id, set_id: text = "id";
        /// Offset from the start of the presentation, as `xs:duration`.
        start, set_start: text = "start";
        duration, set_duration: text = "duration";
        bitstream_switching, set_bitstream_switching: flag = "bitstreamSwitching";
    }

    /// `start` in seconds, 0.0 when absent.
    pub fn start_in_seconds(&self) -> MpdResult<f64> {
        self.node.try_memoize("start_in_seconds", || {
            duration_or(self.start().as_deref(), 0.0)
        })
    }

    /// `duration` in seconds, 0.0 when absent.
    pub fn duration_in_seconds(&self) -> MpdResult<f64> {
        self.node.try_memoize("duration_in_seconds", || {
            duration_or(self.duration().as_deref(), 0.0)
        })
    }

    /// The manifest this period belongs to.
    pub fn manifest(&self) -> MpdResult<Mpd> {
        self.node.require_ancestor("MPD").map(Mpd::from_node)
    }

    children! { pub;
        base_urls: BaseUrl = "BaseURL";
        segment_bases: SegmentBase = "SegmentBase";
        segment_lists: SegmentList = "SegmentList";
        segment_templates: SegmentTemplate = "SegmentTemplate";
        asset_identifiers: AssetIdentifier = "AssetIdentifier";
        event_streams: EventStream = "EventStream";
        adaptation_sets: AdaptationSet = "AdaptationSet";
        subsets: Subset = "Subset";
    }
}
