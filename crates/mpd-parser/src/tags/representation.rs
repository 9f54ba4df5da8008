use super::{
    BaseUrl, ContentComponent, ContentProtection, Descriptor, SegmentBase, SegmentList,
    SegmentTemplate,
};
use crate::node::Tag;

/// Attributes and descriptors common to `AdaptationSet`, `Representation` and
/// `SubRepresentation`.
pub trait RepresentationAttributes: Tag {
    attributes! { trait;
        profile, set_profile: text = "profile";
        profiles, set_profiles: text = "profiles";
        width, set_width: number(u64) = "width";
        height, set_height: number(u64) = "height";
        sar, set_sar: text = "sar";
        frame_rate, set_frame_rate: text = "frameRate";
        audio_sampling_rate, set_audio_sampling_rate: text = "audioSamplingRate";
        mime_type, set_mime_type: text = "mimeType";
        segment_profiles, set_segment_profiles: text = "segmentProfiles";
        codecs, set_codecs: text = "codecs";
        maximum_sap_period, set_maximum_sap_period: number(f64) = "maximumSAPPeriod";
        start_with_sap, set_start_with_sap: number(u64) = "startWithSAP";
        max_playout_rate, set_max_playout_rate: number(f64) = "maxPlayoutRate";
        coding_dependency, set_coding_dependency: flag = "codingDependency";
        scan_type, set_scan_type: text = "scanType";
    }

    children! { trait;
        frame_packings: Descriptor = "FramePacking";
        audio_channel_configurations: Descriptor = "AudioChannelConfiguration";
        content_protections: ContentProtection = "ContentProtection";
        essential_properties: Descriptor = "EssentialProperty";
        supplemental_properties: Descriptor = "SupplementalProperty";
        inband_event_streams: Descriptor = "InbandEventStream";
    }
}

tag! {
    AdaptationSet,
    overrides = [
        ("maximum_sap_period", "maximumSAPPeriod"),
        ("start_with_sap", "startWithSAP"),
        ("subsegment_starts_with_sap", "subsegmentStartsWithSAP"),
    ]
}

impl RepresentationAttributes for AdaptationSet {}

impl AdaptationSet {
    attributes! { pub;
        id, set_id: number(u64) = "id";
        group, set_group: number(u64) = "group";
        lang, set_lang: text = "lang";
        label, set_label: text = "label";
        content_type, set_content_type: text = "contentType";
        par, set_par: text = "par";
        min_bandwidth, set_min_bandwidth: number(u64) = "minBandwidth";
        max_bandwidth, set_max_bandwidth: number(u64) = "maxBandwidth";
        min_width, set_min_width: number(u64) = "minWidth";
        max_width, set_max_width: number(u64) = "maxWidth";
        min_height, set_min_height: number(u64) = "minHeight";
        max_height, set_max_height: number(u64) = "maxHeight";
        min_frame_rate, set_min_frame_rate: text = "minFrameRate";
        max_frame_rate, set_max_frame_rate: text = "maxFrameRate";
        segment_alignment, set_segment_alignment: flag = "segmentAlignment";
        selection_priority, set_selection_priority: number(u64) = "selectionPriority";
        subsegment_starts_with_sap, set_subsegment_starts_with_sap: number(u64) = "subsegmentStartsWithSAP";
        subsegment_alignment, set_subsegment_alignment: flag = "subsegmentAlignment";
        bitstream_switching, set_bitstream_switching: flag = "bitstreamSwitching";
    }

    children! { pub;
        accessibilities: Descriptor = "Accessibility";
        roles: Descriptor = "Role";
        ratings: Descriptor = "Rating";
        viewpoints: Descriptor = "Viewpoint";
        content_components: ContentComponent = "ContentComponent";
        base_urls: BaseUrl = "BaseURL";
        segment_bases: SegmentBase = "SegmentBase";
        segment_lists: SegmentList = "SegmentList";
        segment_templates: SegmentTemplate = "SegmentTemplate";
        representations: Representation = "Representation";
    }
}

tag! {
    /// One encoded rendition of an [`AdaptationSet`].
    Representation,
    overrides = [
        ("maximum_sap_period", "maximumSAPPeriod"),
        ("start_with_sap", "startWithSAP"),
    ]
}

impl RepresentationAttributes for Representation {}

impl Representation {
    attributes! { pub;
        id, set_id: text = "id";
        bandwidth, set_bandwidth: number(u64) = "bandwidth";
        quality_ranking, set_quality_ranking: number(u64) = "qualityRanking";
        dependency_id, set_dependency_id: list(String) = "dependencyId";
        num_channels, set_num_channels: number(u64) = "numChannels";
        sample_rate, set_sample_rate: number(u64) = "sampleRate";
    }

    children! { pub;
        base_urls: BaseUrl = "BaseURL";
        segment_bases: SegmentBase = "SegmentBase";
        segment_lists: SegmentList = "SegmentList";
        segment_templates: SegmentTemplate = "SegmentTemplate";
        sub_representations: SubRepresentation = "SubRepresentation";
    }
}

tag! {
    SubRepresentation,
    overrides = [
        ("maximum_sap_period", "maximumSAPPeriod"),
        ("start_with_sap", "startWithSAP"),
    ]
}

impl RepresentationAttributes for SubRepresentation {}

impl SubRepresentation {
    attributes! { pub;
        level, set_level: number(u64) = "level";
        bandwidth, set_bandwidth: number(u64) = "bandwidth";
        dependency_level, set_dependency_level: list(u64) = "dependencyLevel";
        content_component, set_content_component: list(String) = "contentComponent";
    }
}
