use thiserror::Error;

/// Failures surfaced to the user by the session handlers.
///
/// Parsers never produce these: malformed model output degrades into
/// empty or partial records instead.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A language-model, image or search call failed.
    #[error("{service} call failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned an empty response")]
    EmptyResponse { service: &'static str },

    #[error("unknown recommendation type: '{0}'")]
    UnknownRecommendationType(String),

    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("no business information entered yet")]
    NoBusinessInfo,
}

impl AssistError {
    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        AssistError::Upstream {
            service,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
