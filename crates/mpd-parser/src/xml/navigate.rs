//! Namespace-insensitive lookups over a [`Document`].
//!
//! Manifests in the wild differ in whether their elements carry a namespace prefix, so all
//! lookups compare the local part of the element name only.

use super::document::{Content, Document, ElementId};

/// `cenc:pssh` -> `pssh`, `Period` -> `Period`
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

const XMLNS: &str = "xmlns";

impl Document {
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id].parent
    }

    pub fn child_elements(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.elements[id].children.iter().filter_map(|child| match child {
            Content::Element(child) => Some(*child),
            _ => None,
        })
    }

    /// Direct children whose local name is `tag`, in document order.
    pub fn children_named(&self, id: ElementId, tag: &str) -> Vec<ElementId> {
        self.child_elements(id)
            .filter(|child| local_name(&self.elements[*child].name) == tag)
            .collect()
    }

    /// The closest enclosing element whose local name is `tag`.
    pub fn nearest_ancestor_named(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if local_name(&self.elements[ancestor].name) == tag {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// Namespace declarations made on this element. `None` is the default namespace.
    pub fn declared_namespaces(&self, id: ElementId) -> Vec<(Option<String>, String)> {
        self.elements[id]
            .attributes
            .iter()
            .filter_map(|attribute| {
                let uri = attribute.value().into_owned();
                if attribute.name() == XMLNS {
                    Some((None, uri))
                } else {
                    attribute
                        .name()
                        .strip_prefix("xmlns:")
                        .map(|prefix| (Some(prefix.to_string()), uri))
                }
            })
            .collect()
    }

    /// Namespaces in scope at this element. Outer declarations come first; a redeclared prefix
    /// keeps its outer position and takes the inner URI.
    pub fn namespaces(&self, id: ElementId) -> Vec<(Option<String>, String)> {
        let mut chain = vec![id];
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent(ancestor);
        }

        let mut namespaces: Vec<(Option<String>, String)> = Vec::new();
        for element in chain.into_iter().rev() {
            for (prefix, uri) in self.declared_namespaces(element) {
                match namespaces.iter().position(|(known, _)| *known == prefix) {
                    Some(index) => namespaces[index].1 = uri,
                    None => namespaces.push((prefix, uri)),
                }
            }
        }
        namespaces
    }
}
