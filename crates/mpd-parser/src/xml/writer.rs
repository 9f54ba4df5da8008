use quick_xml::{
    events::{BytesCData, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use super::document::{Content, Document, Element, ElementId};
use crate::error::{MpdError, MpdResult};

impl Document {
    /// Renders the whole document, prolog and epilog included.
    pub fn to_xml(&self) -> MpdResult<String> {
        let mut writer = Writer::new(Vec::new());
        for event in &self.prolog {
            writer.write_event(event.clone())?;
        }
        self.write_element(&mut writer, self.root)?;
        for event in &self.epilog {
            writer.write_event(event.clone())?;
        }
        into_string(writer)
    }

    /// Renders a single element and everything below it.
    pub fn element_to_xml(&self, id: ElementId) -> MpdResult<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_element(&mut writer, id)?;
        into_string(writer)
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: ElementId) -> MpdResult<()> {
        let element = self.element(id);

        let start = match &element.source_tag {
            Some(tag) => BytesStart::from_content(tag.as_str(), element.name.len()),
            None => BytesStart::from_content(start_tag(element), element.name.len()),
        };

        if element.children.is_empty() && element.self_closing {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            match child {
                Content::Element(child) => self.write_element(writer, *child)?,
                Content::Text(text) => {
                    writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?
                }
                Content::CData(data) => writer.write_event(Event::CData(BytesCData::new(data)))?,
                Content::Misc(event) => writer.write_event(event.clone())?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
        Ok(())
    }
}

/// Start tag content for an element whose attributes changed. Values are already escaped.
fn start_tag(element: &Element) -> String {
    let mut tag = element.name.clone();
    for attribute in &element.attributes {
        // a value read from a single-quoted attribute may hold a bare `"`
        let quote = if attribute.value.contains('"') { '\'' } else { '"' };
        tag.push(' ');
        tag.push_str(&attribute.name);
        tag.push('=');
        tag.push(quote);
        tag.push_str(&attribute.value);
        tag.push(quote);
    }
    tag
}

fn into_string(writer: Writer<Vec<u8>>) -> MpdResult<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| MpdError::MalformedDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let source = r#"<?xml version="1.0"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" minBufferTime="PT1.5S">
  <!-- generated -->
  <ProgramInformation moreInformationURL="http://gpac.sourceforge.net">
    <Title>Big &amp; Buck</Title>
  </ProgramInformation>
  <Period duration="PT10S"><AdaptationSet></AdaptationSet><BaseURL/></Period>
</MPD>"#;
        let document = Document::parse(source).unwrap();
        assert_eq!(document.to_xml().unwrap(), source);
    }

    #[test]
    fn test_round_trip_keeps_references_and_quoting() {
        let source = "<MPD>\n  <Title>Director's \"Cut\" x&#233; &amp; more</Title>\n  \
            <BaseURL serviceLocation=\"a'b\" byteRange='0-&quot;1&quot;'>x&#233;</BaseURL>\n  \
            <Period\n    id=\"p0\"\n    duration=\"PT10S\" />\n</MPD>";
        let document = Document::parse(source).unwrap();
        assert_eq!(document.to_xml().unwrap(), source);

        let title = document.children_named(document.root(), "Title")[0];
        assert_eq!(
            document.text(title).as_deref(),
            Some("Director's \"Cut\" x\u{e9} & more")
        );
        let base_url = document.children_named(document.root(), "BaseURL")[0];
        assert_eq!(
            document.attribute(base_url, "byteRange").as_deref(),
            Some("0-\"1\"")
        );
    }

    #[test]
    fn test_changed_start_tag_is_rebuilt() {
        let mut document =
            Document::parse("<MPD>\n<Period\n  id='p0'  start=\"PT0S\"/><BaseURL a='\"'/></MPD>")
                .unwrap();
        let root = document.root();
        let period = document.children_named(root, "Period")[0];
        document.set_attribute(period, "duration", Some("it's \"10\"".to_string()));
        let base_url = document.children_named(root, "BaseURL")[0];
        document.set_attribute(base_url, "b", Some("1".to_string()));

        assert_eq!(
            document.to_xml().unwrap(),
            "<MPD>\n<Period id=\"p0\" start=\"PT0S\" duration=\"it&apos;s &quot;10&quot;\"/>\
             <BaseURL a='\"' b=\"1\"/></MPD>"
        );
        assert_eq!(
            document.attribute(period, "duration").as_deref(),
            Some("it's \"10\"")
        );
    }

    #[test]
    fn test_render_mutations() {
        let mut document = Document::parse(r#"<Subset id="1" contains="100,101"/>"#).unwrap();
        let root = document.root();
        document.set_attribute(root, "contains", Some("1,2".to_string()));
        assert_eq!(
            document.to_xml().unwrap(),
            r#"<Subset id="1" contains="1,2"/>"#
        );

        document.set_text(root, Some("a<b".to_string()));
        assert_eq!(
            document.to_xml().unwrap(),
            r#"<Subset id="1" contains="1,2">a&lt;b</Subset>"#
        );
    }

    #[test]
    fn test_render_element() {
        let mut document =
            Document::parse(r#"<Period><AdaptationSet id="1"/></Period>"#).unwrap();
        let root = document.root();
        let adaptation_set = document.children_named(root, "AdaptationSet")[0];
        document.append_child(adaptation_set, "Representation");

        assert_eq!(
            document.element_to_xml(adaptation_set).unwrap(),
            r#"<AdaptationSet id="1"><Representation/></AdaptationSet>"#
        );
    }
}
