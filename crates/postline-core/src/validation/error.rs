use crate::settings::SettingsError;

/// Shape-validation failures, attributed to the first offending element.
///
/// Validation is fail-fast: only the first failure in document order is
/// reported. Indexes are zero-based positions in the submitted arrays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a scheduled or immediate post requires a publish date")]
    MissingScheduleDate,

    #[error("publish date must be in the future")]
    ScheduleDateInPast,

    #[error("a scheduled or immediate post requires at least one target")]
    NoTargets,

    #[error("post {target}: missing integration id")]
    MissingIntegrationId { target: usize },

    #[error("post {target}: duplicate integration '{integration_id}'")]
    DuplicateIntegration {
        target: usize,
        integration_id: String,
    },

    #[error("post {target}: at least one content block is required")]
    NoContentBlocks { target: usize },

    #[error("post {target}, block {block}: content must not be empty")]
    EmptyContent { target: usize, block: usize },

    #[error("post {target}, block {block}: a block may carry either stored media or image URLs, not both")]
    ConflictingMedia { target: usize, block: usize },

    #[error("post {target}, block {block}: '{url}' is not a valid http(s) URL")]
    InvalidMediaUrl {
        target: usize,
        block: usize,
        url: String,
    },

    #[error("post {target}: {source}")]
    Settings {
        target: usize,
        #[source]
        source: SettingsError,
    },
}

impl ValidationError {
    /// Zero-based index of the offending target, when the failure is
    /// attributable to one.
    pub fn target_index(&self) -> Option<usize> {
        match self {
            ValidationError::MissingScheduleDate
            | ValidationError::ScheduleDateInPast
            | ValidationError::NoTargets => None,
            ValidationError::MissingIntegrationId { target }
            | ValidationError::DuplicateIntegration { target, .. }
            | ValidationError::NoContentBlocks { target }
            | ValidationError::EmptyContent { target, .. }
            | ValidationError::ConflictingMedia { target, .. }
            | ValidationError::InvalidMediaUrl { target, .. }
            | ValidationError::Settings { target, .. } => Some(*target),
        }
    }
}
