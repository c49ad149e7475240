use thiserror::Error;

/// Fallback shown whenever a failure carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Why a product search produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The collaborator failed and said why.
    #[error("{0}")]
    Reported(String),
    /// The collaborator failed without a message, or the search call itself
    /// faulted.
    #[error("unknown error")]
    Unknown,
}

impl SearchFailure {
    /// Builds a failure from an optional message. Absent or blank messages
    /// become [`SearchFailure::Unknown`].
    pub fn from_message<S: Into<String>>(message: Option<S>) -> Self {
        match message.map(Into::into) {
            Some(text) if !text.trim().is_empty() => Self::Reported(text),
            _ => Self::Unknown,
        }
    }

    pub fn reported(message: impl Into<String>) -> Self {
        Self::from_message(Some(message))
    }

    /// Human-readable reason, never empty.
    pub fn message(&self) -> &str {
        match self {
            Self::Reported(text) => text,
            Self::Unknown => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchFailure, UNKNOWN_ERROR_MESSAGE};

    #[test]
    fn absent_message_is_unknown() {
        assert_eq!(SearchFailure::from_message(None::<String>), SearchFailure::Unknown);
        assert_eq!(SearchFailure::Unknown.message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn blank_message_is_unknown() {
        assert_eq!(SearchFailure::reported("   "), SearchFailure::Unknown);
        assert_eq!(SearchFailure::reported(""), SearchFailure::Unknown);
    }

    #[test]
    fn reported_message_is_kept_verbatim() {
        let failure = SearchFailure::reported("timeout");
        assert_eq!(failure.message(), "timeout");
        assert_eq!(failure.to_string(), "timeout");
    }
}
