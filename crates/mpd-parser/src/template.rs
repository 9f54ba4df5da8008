// References:
// 1. https://dashif.org/docs/DASH-IF-IOP-v4.3.pdf, 3.2.9.5.3 (template identifiers)
// 2. ISO/IEC 23009-1, Table 16

use regex::{Captures, Regex, Replacer};
use std::{collections::HashMap, sync::LazyLock};

use crate::{tags::SegmentTemplate, timeline::SegmentTiming};

// Only `%0[width]d` is permitted as a format tag, so the padding is done by hand.
//
// Example template: "$RepresentationID$/$Number%06d$.m4s"
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$(RepresentationID|Number|Time|Bandwidth)(?:%0(\d+)d)?\$").unwrap()
});

/// Values substituted into `SegmentTemplate@media` and `SegmentTemplate@initialization`.
#[derive(Debug, Default, Clone)]
pub struct UrlTemplate<'a> {
    args: HashMap<&'a str, String>,
}

impl UrlTemplate<'_> {
    pub const REPRESENTATION_ID: &'static str = "RepresentationID";
    pub const NUMBER: &'static str = "Number";
    pub const TIME: &'static str = "Time";
    pub const BANDWIDTH: &'static str = "Bandwidth";

    pub fn new() -> Self {
        Self {
            args: HashMap::with_capacity(4),
        }
    }

    pub fn insert(&mut self, key: &'static str, value: String) {
        self.args.insert(key, value);
    }

    /// Identifiers without a value are left as they are.
    pub fn resolve(&self, template: &str) -> String {
        TEMPLATE_REGEX
            .replace_all(template, TemplateReplacer(&self.args))
            .to_string()
    }
}

struct TemplateReplacer<'a>(&'a HashMap<&'a str, String>);

impl Replacer for TemplateReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        let Some(key) = caps.get(1) else {
            // `$$`
            dst.push('$');
            return;
        };
        let Some(value) = self.0.get(key.as_str()) else {
            dst.push_str(&caps[0]);
            return;
        };

        match caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok()) {
            Some(width) => dst.push_str(&format!("{value:0>width$}")),
            None => dst.push_str(value),
        }
    }
}

impl SegmentTemplate {
    fn url_template(
        &self,
        representation_id: Option<&str>,
        bandwidth: Option<u64>,
    ) -> UrlTemplate<'static> {
        let mut template = UrlTemplate::new();
        if let Some(representation_id) = representation_id {
            template.insert(UrlTemplate::REPRESENTATION_ID, representation_id.to_string());
        }
        if let Some(bandwidth) = bandwidth {
            template.insert(UrlTemplate::BANDWIDTH, bandwidth.to_string());
        }
        template
    }

    /// `media` with the identifiers of `timing` and the representation filled in.
    pub fn media_url(
        &self,
        timing: &SegmentTiming,
        representation_id: Option<&str>,
        bandwidth: Option<u64>,
    ) -> Option<String> {
        let media = self.media()?;
        let mut template = self.url_template(representation_id, bandwidth);
        template.insert(UrlTemplate::NUMBER, timing.number.to_string());
        template.insert(UrlTemplate::TIME, timing.time.to_string());
        Some(template.resolve(&media))
    }

    pub fn initialization_url(
        &self,
        representation_id: Option<&str>,
        bandwidth: Option<u64>,
    ) -> Option<String> {
        let initialization = self.initialization()?;
        Some(self.url_template(representation_id, bandwidth).resolve(&initialization))
    }
}

#[cfg(test)]
mod tests {
    use super::UrlTemplate;
    use crate::{
        node::Tag,
        tags::{Mpd, SegmentTemplate},
    };

    #[test]
    fn test_template_replace() {
        let mut template = UrlTemplate::new();
        template.insert(UrlTemplate::REPRESENTATION_ID, "v1".to_string());
        template.insert(UrlTemplate::NUMBER, "2".to_string());
        template.insert(UrlTemplate::TIME, "3".to_string());
        template.insert(UrlTemplate::BANDWIDTH, "4".to_string());

        assert_eq!(template.resolve("$Number$"), "2");
        assert_eq!(template.resolve("$Time%02d$"), "03");
        assert_eq!(
            template.resolve("$RepresentationID$/$Number%05d$.m4s"),
            "v1/00002.m4s"
        );
        assert_eq!(
            template.resolve("$RepresentationID$-$Number$-$Time$-$Bandwidth$"),
            "v1-2-3-4"
        );
        assert_eq!(template.resolve("$Number%010d$"), "0000000002");
        // only zero padded widths are identifiers
        assert_eq!(template.resolve("$Number%10d$"), "$Number%10d$");
    }

    #[test]
    fn test_escape_and_unknown() {
        let mut template = UrlTemplate::new();
        template.insert(UrlTemplate::NUMBER, "7".to_string());

        assert_eq!(template.resolve("cost$$-$Number$"), "cost$-7");
        assert_eq!(template.resolve("$Unknown$"), "$Unknown$");
        assert_eq!(template.resolve("$Time$.m4s"), "$Time$.m4s");
    }

    #[test]
    fn test_segment_template_urls() {
        let manifest = Mpd::parse(
            r#"<MPD><Period duration="PT4S"><AdaptationSet>
  <SegmentTemplate timescale="1000" duration="2000" initialization="$RepresentationID$/init.mp4" media="$RepresentationID$/$Bandwidth$/$Number%05d$.m4s"/>
</AdaptationSet></Period></MPD>"#,
        )
        .unwrap();
        let template: SegmentTemplate =
            manifest.periods()[0].adaptation_sets()[0].segment_templates()[0].clone();

        assert_eq!(
            template.initialization_url(Some("v1"), None).as_deref(),
            Some("v1/init.mp4")
        );
        let timings = template.segment_timings().unwrap();
        assert_eq!(
            template.media_url(&timings[1], Some("v1"), Some(800000)).as_deref(),
            Some("v1/800000/00002.m4s")
        );
    }
}
