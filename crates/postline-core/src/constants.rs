//! Shared constants

/// Display name used for media resolved from a URL that has no path segment.
pub const FALLBACK_MEDIA_NAME: &str = "image";

/// Maximum number of collaborators an Instagram post may tag.
pub const INSTAGRAM_MAX_COLLABORATORS: usize = 3;

/// Maximum length of a YouTube or Pinterest title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Poll duration bounds (minutes) accepted by X.
pub const X_POLL_DURATION_MINUTES: std::ops::RangeInclusive<u32> = 5..=10_080;
