use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpdError {
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    #[error("Malformed duration: {0:?}")]
    MalformedDuration(String),

    #[error("Malformed date time: {0:?}")]
    MalformedDateTime(String),

    #[error("Segment {0} does not fit in 64 bits")]
    TimingOverflow(&'static str),

    #[error("No enclosing {0} element found")]
    AncestorNotFound(&'static str),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    XmlError(#[from] quick_xml::Error),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[cfg(feature = "remote")]
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
}

pub type MpdResult<T> = Result<T, MpdError>;
