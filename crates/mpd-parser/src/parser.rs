use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::{
    error::MpdResult,
    node::{Node, Tag},
    tags::Mpd,
};

// Example: <?xml version="1.0" encoding="UTF-8"?>
static ENCODING_DECLARATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<\?xml[^>]*?\sencoding\s*=\s*["']([^"']*)["'][^>]*\?>"#).unwrap()
});

/// Entry points for reading a manifest into an [`Mpd`] and writing it back.
pub struct Parser;

impl Parser {
    /// Parses a manifest held in memory.
    ///
    /// An XML declaration carrying an `encoding` is removed before parsing, and the encoding it
    /// names is kept on the returned [`Mpd`].
    pub fn from_string(manifest: &str) -> MpdResult<Mpd> {
        let (manifest, encoding) = match ENCODING_DECLARATION_REGEX.captures(manifest) {
            Some(caps) => {
                let encoding = caps[1].to_string();
                log::debug!("Removing XML declaration with encoding {encoding}");
                let stripped = ENCODING_DECLARATION_REGEX.replace(manifest, "");
                (stripped, Some(encoding))
            }
            None => (manifest.into(), None),
        };

        let node = Node::parse(&manifest)?;
        node.document().borrow_mut().set_encoding(encoding);
        Ok(Mpd::from_node(node))
    }

    pub fn from_file(path: impl AsRef<Path>) -> MpdResult<Mpd> {
        let path = path.as_ref();
        log::debug!("Reading manifest from {}", path.display());
        let manifest = std::fs::read_to_string(path)?;
        Self::from_string(&manifest)
    }

    #[cfg(feature = "remote")]
    pub async fn from_url(client: &reqwest::Client, url: &str) -> MpdResult<Mpd> {
        log::debug!("Fetching manifest from {url}");
        let response = client
            .get(url)
            .header("Accept", "application/dash+xml,video/vnd.mpeg.dash.mpd")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(crate::error::MpdError::HttpError(response.status()));
        }
        let manifest = response.text().await?;
        Self::from_string(&manifest)
    }

    /// Renders the manifest, including every change made through its nodes.
    pub fn to_string(mpd: &Mpd) -> MpdResult<String> {
        mpd.node().document().borrow().to_xml()
    }
}
