use super::Url;
use crate::node::Tag;

tag! {
    /// `S`, one entry of a [`SegmentTimeline`].
    Segment
}

impl Segment {
    attributes! { pub;
        /// Start time in timescale units.
        t, set_t: number(u64) = "t";
        /// Duration in timescale units.
        d, set_d: number(u64) = "d";
        /// Number of additional segments with the same duration. Negative repeats until the
        /// next `S@t` or the end of the period.
        r, set_r: number(i64) = "r";
    }
}

tag! {
    SegmentTimeline
}

impl SegmentTimeline {
    children! { pub;
        segments: Segment = "S";
    }
}

/// Attributes and children common to `SegmentBase`, `SegmentList` and `SegmentTemplate`.
pub trait SegmentBaseAttributes: Tag {
    attributes! { trait;
        timescale, set_timescale: number(u64) = "timescale";
        index_range, set_index_range: text = "indexRange";
        index_range_exact, set_index_range_exact: flag = "indexRangeExact";
        presentation_time_offset, set_presentation_time_offset: number(u64) = "presentationTimeOffset";
        availability_time_offset, set_availability_time_offset: number(f64) = "availabilityTimeOffset";
        availability_time_complete, set_availability_time_complete: flag = "availabilityTimeComplete";
    }

    children! { trait;
        initializations: Url = "Initialization";
        representation_indexes: Url = "RepresentationIndex";
    }
}

/// Attributes and children common to `SegmentList` and `SegmentTemplate`.
pub trait MultipleSegmentBaseAttributes: SegmentBaseAttributes {
    attributes! { trait;
        /// Segment duration in timescale units.
        duration, set_duration: number(u64) = "duration";
        start_number, set_start_number: number(u64) = "startNumber";
    }

    children! { trait;
        segment_timelines: SegmentTimeline = "SegmentTimeline";
        bitstream_switchings: Url = "BitstreamSwitching";
    }
}

tag! {
    SegmentBase
}

impl SegmentBaseAttributes for SegmentBase {}

tag! {
    /// `SegmentURL`
    SegmentUrl
}

impl SegmentUrl {
    attributes! { pub;
        media, set_media: text = "media";
        media_range, set_media_range: text = "mediaRange";
        index, set_index: text = "index";
        index_range, set_index_range: text = "indexRange";
    }
}

tag! {
    SegmentList
}

impl SegmentBaseAttributes for SegmentList {}
impl MultipleSegmentBaseAttributes for SegmentList {}

impl SegmentList {
    children! { pub;
        segment_urls: SegmentUrl = "SegmentURL";
    }
}

tag! {
    /// Segment addresses and timing derived from URL templates.
    SegmentTemplate
}

impl SegmentBaseAttributes for SegmentTemplate {}
impl MultipleSegmentBaseAttributes for SegmentTemplate {}

impl SegmentTemplate {
    attributes! { pub;
        media, set_media: text = "media";
        index, set_index: text = "index";
        initialization, set_initialization: text = "initialization";
        bitstream_switching, set_bitstream_switching: text = "bitstreamSwitching";
    }
}
