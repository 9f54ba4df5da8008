use std::borrow::Cow;

use quick_xml::{
    escape::{escape, partial_escape, unescape},
    events::{BytesStart, Event},
    Reader,
};

use crate::error::{MpdError, MpdResult};

pub type ElementId = usize;

/// One item of an element's ordered content.
#[derive(Debug, Clone)]
pub enum Content {
    Element(ElementId),
    /// Character data as written, references included.
    Text(String),
    CData(String),
    /// Comments and processing instructions, kept verbatim for rendering.
    Misc(Event<'static>),
}

/// An attribute whose value is kept escaped, as written in the source.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Cow<'_, str> {
        unescaped(&self.value)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    /// Qualified name as written in the source, e.g. `cenc:pssh`.
    pub(crate) name: String,
    /// Attributes in source order, namespace declarations included.
    pub(crate) attributes: Vec<Attribute>,
    /// Start tag content as read. Rendered verbatim until an attribute changes.
    pub(crate) source_tag: Option<String>,
    pub(crate) children: Vec<Content>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) self_closing: bool,
}

impl Element {
    fn new(name: String, parent: Option<ElementId>, self_closing: bool) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            source_tag: None,
            children: Vec::new(),
            parent,
            self_closing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Arena-backed element tree.
///
/// Elements are never removed from the arena. Detaching an element only unlinks it from its
/// parent, so every [`ElementId`] handed out stays valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) elements: Vec<Element>,
    pub(crate) root: ElementId,
    /// Declaration, comments and whitespace before the root element.
    pub(crate) prolog: Vec<Event<'static>>,
    pub(crate) epilog: Vec<Event<'static>>,
    /// Bumped on every structural change (child added or removed).
    revision: u64,
    /// Encoding named by a declaration stripped before parsing.
    encoding: Option<String>,
}

fn malformed<E: std::fmt::Display>(position: u64, error: E) -> MpdError {
    MpdError::MalformedDocument(format!("at position {position}: {error}"))
}

// Stored values were checked when parsed and escaped when written.
fn unescaped(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

fn utf8(bytes: &[u8]) -> MpdResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| MpdError::MalformedDocument(e.to_string()))
}

impl Document {
    pub fn parse(text: &str) -> MpdResult<Self> {
        let mut reader = Reader::from_str(text);

        let mut elements: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root = None;
        let mut stack: Vec<ElementId> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|e| malformed(position, e))?;

            match event {
                Event::Start(ref start) | Event::Empty(ref start) => {
                    let self_closing = matches!(event, Event::Empty(_));
                    let parent = stack.last().copied();
                    if parent.is_none() && root.is_some() {
                        return Err(malformed(position, "multiple root elements"));
                    }

                    let id = elements.len();
                    let mut element = Element::new(utf8(start.name().as_ref())?, parent, self_closing);
                    element.attributes = read_attributes(start, position)?;
                    element.source_tag = Some(utf8(&start[..])?);
                    elements.push(element);

                    match parent {
                        Some(parent) => elements[parent].children.push(Content::Element(id)),
                        None => root = Some(id),
                    }
                    if !self_closing {
                        stack.push(id);
                    }
                }
                Event::End(_) => {
                    if stack.pop().is_none() {
                        return Err(malformed(position, "unexpected closing tag"));
                    }
                }
                Event::Text(text) => {
                    text.unescape().map_err(|e| malformed(position, e))?;
                    let content = utf8(&text)?;
                    match stack.last() {
                        Some(&parent) => elements[parent].children.push(Content::Text(content)),
                        None if content.trim().is_empty() => {
                            let outside = if root.is_some() { &mut epilog } else { &mut prolog };
                            outside.push(Event::Text(text.into_owned()));
                        }
                        None => return Err(malformed(position, "text outside of root element")),
                    }
                }
                Event::CData(data) => {
                    let content = utf8(&data)?;
                    match stack.last() {
                        Some(&parent) => elements[parent].children.push(Content::CData(content)),
                        None => return Err(malformed(position, "CDATA outside of root element")),
                    }
                }
                Event::Eof => break,
                misc => match stack.last() {
                    Some(&parent) => elements[parent]
                        .children
                        .push(Content::Misc(misc.into_owned())),
                    None if root.is_some() => epilog.push(misc.into_owned()),
                    None => prolog.push(misc.into_owned()),
                },
            }
        }

        if !stack.is_empty() {
            return Err(malformed(
                reader.buffer_position() as u64,
                "unclosed element at end of input",
            ));
        }
        let root = root.ok_or_else(|| MpdError::MalformedDocument("no root element".to_string()))?;

        log::debug!("Parsed document with {} elements", elements.len());
        Ok(Self {
            elements,
            root,
            prolog,
            epilog,
            revision: 0,
            encoding: None,
        })
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: Option<String>) {
        self.encoding = encoding;
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.elements[id]
            .attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(Attribute::value)
    }

    /// Writes an attribute in place, appends it when missing, or removes it for `None`.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: Option<String>) {
        let element = &mut self.elements[id];
        let existing = element
            .attributes
            .iter()
            .position(|attribute| attribute.name == name);
        let value = value.map(|value| escape(value.as_str()).into_owned());
        match (existing, value) {
            (Some(index), Some(value)) => element.attributes[index].value = value,
            (Some(index), None) => {
                element.attributes.remove(index);
            }
            (None, Some(value)) => element.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
            (None, None) => return,
        }
        element.source_tag = None;
    }

    /// Character data before the first non-text child.
    pub fn text(&self, id: ElementId) -> Option<String> {
        let mut text: Option<String> = None;
        for child in &self.elements[id].children {
            match child {
                Content::Text(value) => text
                    .get_or_insert_with(String::new)
                    .push_str(&unescaped(value)),
                Content::CData(value) => text.get_or_insert_with(String::new).push_str(value),
                _ => break,
            }
        }
        text
    }

    pub fn set_text(&mut self, id: ElementId, value: Option<String>) {
        let children = &mut self.elements[id].children;
        let leading = children
            .iter()
            .take_while(|child| matches!(child, Content::Text(_) | Content::CData(_)))
            .count();
        children.drain(..leading);
        if let Some(value) = value {
            children.insert(0, Content::Text(partial_escape(value.as_str()).into_owned()));
        }
    }

    pub fn append_child(&mut self, parent: ElementId, name: &str) -> ElementId {
        let id = self.elements.len();
        self.elements
            .push(Element::new(name.to_string(), Some(parent), true));
        self.elements[parent].children.push(Content::Element(id));
        self.revision += 1;
        id
    }

    /// Unlinks an element from its parent. The root can not be detached.
    pub fn detach(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.elements[id].parent else {
            return false;
        };
        self.elements[parent]
            .children
            .retain(|child| !matches!(child, Content::Element(child) if *child == id));
        self.elements[id].parent = None;
        self.revision += 1;
        true
    }
}

fn read_attributes(start: &BytesStart, position: u64) -> MpdResult<Vec<Attribute>> {
    start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(|e| malformed(position, e))?;
            attribute
                .unescape_value()
                .map_err(|e| malformed(position, e))?;
            Ok(Attribute {
                name: utf8(attribute.key.as_ref())?,
                value: utf8(&attribute.value)?,
            })
        })
        .collect()
}
