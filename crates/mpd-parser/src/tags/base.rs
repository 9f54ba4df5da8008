use crate::node::Tag;

tag! {
    /// `ProgramInformation`
    ProgramInfo,
    overrides = [("more_info_url", "moreInformationURL")]
}

impl ProgramInfo {
    attributes! { pub;
        lang, set_lang: text = "lang";
        more_info_url, set_more_info_url: text = "moreInformationURL";
    }

    children! { pub;
        titles: TextTag = "Title";
        sources: TextTag = "Source";
        copyrights: TextTag = "Copyright";
    }
}

tag! {
    /// An element whose only content is text, e.g. `Title` or `Location`.
    TextTag
}

impl TextTag {
    pub fn text(&self) -> Option<String> {
        self.node.memoize("text", || self.node.text())
    }

    pub fn set_text(&self, value: Option<&str>) {
        self.node.set_text(value)
    }
}

tag! {
    /// `BaseURL`
    BaseUrl
}

impl BaseUrl {
    attributes! { pub;
        service_location, set_service_location: text = "serviceLocation";
        byte_range, set_byte_range: text = "byteRange";
        availability_time_offset, set_availability_time_offset: number(f64) = "availabilityTimeOffset";
        availability_time_complete, set_availability_time_complete: flag = "availabilityTimeComplete";
    }

    /// The URL itself.
    pub fn url(&self) -> Option<String> {
        self.node.memoize("url", || self.node.text())
    }

    pub fn set_url(&self, value: Option<&str>) {
        self.node.set_text(value)
    }
}

/// `schemeIdUri`, `id` and `value`, shared by all descriptor-like elements.
pub trait DescriptorAttributes: Tag {
    attributes! { trait;
        scheme_id_uri, set_scheme_id_uri: text = "schemeIdUri";
        id, set_id: text = "id";
        value, set_value: text = "value";
    }
}

tag! {
    /// Generic descriptor: `Role`, `Rating`, `Accessibility`, `Viewpoint`,
    /// `EssentialProperty`, `SupplementalProperty`, `FramePacking`,
    /// `AudioChannelConfiguration` and `InbandEventStream`.
    Descriptor
}

impl DescriptorAttributes for Descriptor {}

tag! {
    /// `UTCTiming`
    UtcTiming
}

impl DescriptorAttributes for UtcTiming {}

tag! {
    /// `AssetIdentifier`
    AssetIdentifier
}

impl DescriptorAttributes for AssetIdentifier {}

tag! {
    ContentComponent
}

impl ContentComponent {
    attributes! { pub;
        id, set_id: number(u64) = "id";
        lang, set_lang: text = "lang";
        content_type, set_content_type: text = "contentType";
        par, set_par: text = "par";
    }

    children! { pub;
        accessibilities: Descriptor = "Accessibility";
        roles: Descriptor = "Role";
        ratings: Descriptor = "Rating";
        viewpoints: Descriptor = "Viewpoint";
    }
}

tag! {
    ContentProtection,
    overrides = [("default_kid", "cenc:default_KID")]
}

impl DescriptorAttributes for ContentProtection {}

impl ContentProtection {
    attributes! { pub;
        default_kid, set_default_kid: text = "cenc:default_KID";
    }

    children! { pub;
        /// `cenc:pssh` boxes, base64 encoded.
        psshs: TextTag = "pssh";
    }
}

tag! {
    EventStream
}

impl DescriptorAttributes for EventStream {}

impl EventStream {
    attributes! { pub;
        timescale, set_timescale: number(u64) = "timescale";
    }

    children! { pub;
        events: Event = "Event";
    }
}

tag! {
    /// A single `Event` of an [`EventStream`].
    Event
}

impl Event {
    attributes! { pub;
        presentation_time, set_presentation_time: number(u64) = "presentationTime";
        duration, set_duration: number(u64) = "duration";
        id, set_id: number(u64) = "id";
        message_data, set_message_data: text = "messageData";
    }

    pub fn text(&self) -> Option<String> {
        self.node.memoize("text", || self.node.text())
    }

    pub fn set_text(&self, value: Option<&str>) {
        self.node.set_text(value)
    }
}

tag! {
    Subset
}

impl Subset {
    attributes! { pub;
        id, set_id: text = "id";
        contains, set_contains: list(u64) = "contains";
    }
}

tag! {
    /// `Initialization`, `RepresentationIndex` and `BitstreamSwitching`.
    Url,
    overrides = [("source_url", "sourceURL")]
}

impl Url {
    attributes! { pub;
        source_url, set_source_url: text = "sourceURL";
        range, set_range: text = "range";
    }
}
