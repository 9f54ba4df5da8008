//! The generic element wrapper every manifest type is built on.
//!
//! A [`Node`] points at one element of a shared [`Document`]. Typed reads go through a memo
//! owned by the wrapper: a value is coerced once and served from the memo afterwards. Writes
//! through a wrapper go straight to the element and drop everything memoized on that wrapper.
//! Clones share the memo; [`Node::new`] over the same element starts with an empty one, so it
//! observes writes made through other wrappers.

use std::{any::Any, borrow::Cow, cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    attribute::{to_bool, AttributeValue},
    error::{MpdError, MpdResult},
    xml::{local_name, Document, ElementId},
};

type Memo = HashMap<&'static str, Rc<dyn Any>>;

#[derive(Clone)]
pub struct Node {
    document: Rc<RefCell<Document>>,
    id: ElementId,
    memo: Rc<RefCell<Memo>>,
}

impl Node {
    pub fn new(document: Rc<RefCell<Document>>, id: ElementId) -> Self {
        Self {
            document,
            id,
            memo: Rc::default(),
        }
    }

    /// Builds a document from `text` and wraps its root element.
    pub fn parse(text: &str) -> MpdResult<Self> {
        let document = Document::parse(text)?;
        let root = document.root();
        Ok(Self::new(Rc::new(RefCell::new(document)), root))
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Whether both wrappers point at the same element.
    pub fn same_element(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.document, &other.document) && self.id == other.id
    }

    fn wrap(&self, id: ElementId) -> Node {
        Node::new(self.document.clone(), id)
    }

    pub fn name(&self) -> String {
        self.document.borrow().element(self.id).name().to_string()
    }

    pub fn local_name(&self) -> String {
        local_name(self.document.borrow().element(self.id).name()).to_string()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.document
            .borrow()
            .attribute(self.id, name)
            .map(Cow::into_owned)
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        self.document
            .borrow()
            .element(self.id)
            .attributes()
            .iter()
            .map(|attribute| (attribute.name().to_string(), attribute.value().into_owned()))
            .collect()
    }

    /// Writes the attribute, or removes it when `value` is `None`.
    pub fn set_attribute(&self, name: &str, value: Option<&str>) {
        self.write_attribute(name, value.map(str::to_string));
    }

    fn write_attribute(&self, name: &str, value: Option<String>) {
        self.document
            .borrow_mut()
            .set_attribute(self.id, name, value);
        self.invalidate();
    }

    pub fn text(&self) -> Option<String> {
        self.document.borrow().text(self.id)
    }

    pub fn set_text(&self, value: Option<&str>) {
        self.document
            .borrow_mut()
            .set_text(self.id, value.map(str::to_string));
        self.invalidate();
    }

    /// Prefix to URI pairs in scope at this element, outermost first.
    pub fn namespaces(&self) -> Vec<(Option<String>, String)> {
        self.document.borrow().namespaces(self.id)
    }

    pub fn parent(&self) -> Option<Node> {
        let parent = self.document.borrow().parent(self.id);
        parent.map(|id| self.wrap(id))
    }

    /// Direct children with the local name `tag`, in document order.
    pub fn children(&self, tag: &str) -> Vec<Node> {
        let ids = self.document.borrow().children_named(self.id, tag);
        ids.into_iter().map(|id| self.wrap(id)).collect()
    }

    pub fn nearest_ancestor(&self, tag: &str) -> Option<Node> {
        let ancestor = self.document.borrow().nearest_ancestor_named(self.id, tag);
        ancestor.map(|id| self.wrap(id))
    }

    pub fn require_ancestor(&self, tag: &'static str) -> MpdResult<Node> {
        self.nearest_ancestor(tag)
            .ok_or(MpdError::AncestorNotFound(tag))
    }

    pub fn append_child(&self, name: &str) -> Node {
        let id = self.document.borrow_mut().append_child(self.id, name);
        self.wrap(id)
    }

    /// Unlinks this element from its parent. Returns `false` for the root.
    pub fn detach(&self) -> bool {
        self.document.borrow_mut().detach(self.id)
    }

    pub fn to_xml(&self) -> MpdResult<String> {
        self.document.borrow().element_to_xml(self.id)
    }

    /// Drops every value memoized on this wrapper.
    pub fn invalidate(&self) {
        self.memo.borrow_mut().clear();
    }

    fn memoized<T: Clone + 'static>(&self, key: &'static str) -> Option<T> {
        self.memo
            .borrow()
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    fn remember<T: Clone + 'static>(&self, key: &'static str, value: &T) {
        self.memo.borrow_mut().insert(key, Rc::new(value.clone()));
    }

    pub fn memoize<T, F>(&self, key: &'static str, compute: F) -> T
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.memoized(key) {
            return value;
        }
        let value = compute();
        self.remember(key, &value);
        value
    }

    /// Like [`Node::memoize`], but failures are returned without being remembered.
    pub fn try_memoize<T, F>(&self, key: &'static str, compute: F) -> MpdResult<T>
    where
        T: Clone + 'static,
        F: FnOnce() -> MpdResult<T>,
    {
        if let Some(value) = self.memoized(key) {
            return Ok(value);
        }
        let value = compute()?;
        self.remember(key, &value);
        Ok(value)
    }

    /// Child wrappers with the local name `tag`. The memoized list is rebuilt once the
    /// document's structure changed since it was taken.
    pub fn memoized_children<T: Tag>(&self, key: &'static str, tag: &str) -> Vec<T> {
        let revision = self.document.borrow().revision();
        if let Some((taken_at, children)) = self.memoized::<(u64, Vec<T>)>(key) {
            if taken_at == revision {
                return children;
            }
        }
        let children: Vec<T> = self.children(tag).into_iter().map(T::from_node).collect();
        self.remember(key, &(revision, children.clone()));
        children
    }

    pub fn text_property(&self, key: &'static str, attribute: &str) -> Option<String> {
        self.memoize(key, || self.attribute(attribute))
    }

    pub fn flag_property(&self, key: &'static str, attribute: &str) -> Option<bool> {
        self.memoize(key, || to_bool(self.attribute(attribute).as_deref()))
    }

    pub fn property<T: AttributeValue>(&self, key: &'static str, attribute: &str) -> MpdResult<T> {
        self.try_memoize(key, || T::from_attribute(self.attribute(attribute).as_deref()))
    }

    pub fn set_property<T: AttributeValue>(&self, attribute: &str, value: &T) {
        self.write_attribute(attribute, value.to_attribute());
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("id", &self.id)
            .finish()
    }
}

/// Maps a property name to the attribute name used by the manifest schema.
///
/// `min_buffer_time` becomes `minBufferTime`. Names listed in `overrides` are taken from there
/// instead, for attributes whose spelling does not follow the rule.
pub fn attribute_name(
    property: &str,
    overrides: &[(&'static str, &'static str)],
) -> Cow<'static, str> {
    let property = property.strip_prefix("r#").unwrap_or(property);
    if let Some((_, attribute)) = overrides.iter().find(|(name, _)| *name == property) {
        return Cow::Borrowed(attribute);
    }

    let mut attribute = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            attribute.extend(c.to_uppercase());
            upper = false;
        } else {
            attribute.push(c);
        }
    }
    Cow::Owned(attribute)
}

/// A typed view over a [`Node`].
pub trait Tag: Clone + Sized + 'static {
    /// Property name to attribute name exceptions, see [`attribute_name`].
    const ATTRIBUTE_OVERRIDES: &'static [(&'static str, &'static str)] = &[];

    fn from_node(node: Node) -> Self;

    fn node(&self) -> &Node;

    /// Wraps the root element of a standalone fragment.
    fn parse(text: &str) -> MpdResult<Self> {
        Node::parse(text).map(Self::from_node)
    }

    fn attribute_name(property: &str) -> Cow<'static, str> {
        attribute_name(property, Self::ATTRIBUTE_OVERRIDES)
    }

    /// Reads an attribute by property name, e.g. `new_attribute` reads `newAttribute`.
    fn property(&self, property: &str) -> Option<String> {
        self.node().attribute(&Self::attribute_name(property))
    }

    fn set_property(&self, property: &str, value: Option<&str>) {
        self.node()
            .set_attribute(&Self::attribute_name(property), value)
    }

    fn to_xml(&self) -> MpdResult<String> {
        self.node().to_xml()
    }
}
