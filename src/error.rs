use std::fmt::Display;

/// Rejected pacing or settings input. The previous state is always kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacingError {
    #[error("invalid {what}: {value:?}")]
    InvalidArgument { what: &'static str, value: String },
}

impl PacingError {
    pub fn invalid_argument(what: &'static str, value: impl Display) -> Self {
        Self::InvalidArgument {
            what,
            value: value.to_string(),
        }
    }
}
