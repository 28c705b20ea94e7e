//! Provider settings variants and resolver
//!
//! Each supported integration provider has its own settings schema, selected
//! by the `__type` discriminator field on the wire. The provider set is
//! closed and changes only at build time, so resolution is a static dispatch
//! table keyed by the discriminator value; there is no runtime registration.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

use crate::constants::{INSTAGRAM_MAX_COLLABORATORS, MAX_TITLE_LENGTH, X_POLL_DURATION_MINUTES};

/// Discriminator tags with a registered settings variant, in resolution order.
pub const REGISTERED_PROVIDERS: &[&str] =
    &["generic", "x", "reddit", "youtube", "pinterest", "instagram"];

/// Failure modes of the settings resolver. The caller (the submission
/// validator) attaches the target index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("settings must be an object with a `__type` discriminator")]
    MissingDiscriminator,

    #[error("'{tag}' is not a registered provider")]
    UnknownProviderVariant { tag: String },

    #[error("settings for provider '{provider}' are malformed: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },

    #[error("invalid settings for provider '{provider}': {field}: {reason}")]
    InvalidField {
        provider: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Settings for providers with no custom options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericSettings {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XReplyAudience {
    Everyone,
    Following,
    MentionedUsers,
    Subscribers,
    Verified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_reply: Option<XReplyAudience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditSettings {
    pub subreddit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flair: Option<String>,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub is_nsfw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YoutubePrivacy {
    Public,
    Private,
    Unlisted,
}

impl Default for YoutubePrivacy {
    fn default() -> Self {
        YoutubePrivacy::Public
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeSettings {
    pub title: String,
    #[serde(default)]
    pub privacy: YoutubePrivacy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinterestSettings {
    pub board: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstagramPostType {
    Post,
    Story,
    Reel,
}

impl Default for InstagramPostType {
    fn default() -> Self {
        InstagramPostType::Post
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramSettings {
    #[serde(default)]
    pub post_type: InstagramPostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,
}

/// The closed set of provider settings variants.
///
/// Serializes with the same `__type` tag the wire format uses, so a resolved
/// submission re-serializes to its canonical request shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename_all = "lowercase")]
pub enum ProviderSettings {
    Generic(GenericSettings),
    X(XSettings),
    Reddit(RedditSettings),
    Youtube(YoutubeSettings),
    Pinterest(PinterestSettings),
    Instagram(InstagramSettings),
}

impl ProviderSettings {
    /// The discriminator tag of this variant.
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderSettings::Generic(_) => "generic",
            ProviderSettings::X(_) => "x",
            ProviderSettings::Reddit(_) => "reddit",
            ProviderSettings::Youtube(_) => "youtube",
            ProviderSettings::Pinterest(_) => "pinterest",
            ProviderSettings::Instagram(_) => "instagram",
        }
    }

    /// Resolve a raw settings payload against the registry.
    ///
    /// Fails with `UnknownProviderVariant` when `__type` does not name a
    /// registered variant; there is no silent fallback to the empty variant.
    /// On a known tag, the payload's fields are checked against the variant's
    /// schema and semantic rules.
    pub fn resolve(payload: &JsonValue) -> Result<Self, SettingsError> {
        let tag = payload
            .get("__type")
            .and_then(|v| v.as_str())
            .ok_or(SettingsError::MissingDiscriminator)?;

        let settings = match tag {
            "generic" => ProviderSettings::Generic(parse_variant(payload, "generic")?),
            "x" => ProviderSettings::X(parse_variant(payload, "x")?),
            "reddit" => ProviderSettings::Reddit(parse_variant(payload, "reddit")?),
            "youtube" => ProviderSettings::Youtube(parse_variant(payload, "youtube")?),
            "pinterest" => ProviderSettings::Pinterest(parse_variant(payload, "pinterest")?),
            "instagram" => ProviderSettings::Instagram(parse_variant(payload, "instagram")?),
            other => {
                return Err(SettingsError::UnknownProviderVariant {
                    tag: other.to_string(),
                })
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Per-variant semantic rules on top of the structural schema.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self {
            ProviderSettings::Generic(_) => Ok(()),
            ProviderSettings::X(s) => {
                if let Some(minutes) = s.poll_duration_minutes {
                    if !X_POLL_DURATION_MINUTES.contains(&minutes) {
                        return Err(SettingsError::InvalidField {
                            provider: "x",
                            field: "poll_duration_minutes",
                            reason: format!(
                                "must be between {} and {} minutes",
                                X_POLL_DURATION_MINUTES.start(),
                                X_POLL_DURATION_MINUTES.end()
                            ),
                        });
                    }
                }
                Ok(())
            }
            ProviderSettings::Reddit(s) => {
                if s.subreddit.trim().is_empty() {
                    return Err(SettingsError::InvalidField {
                        provider: "reddit",
                        field: "subreddit",
                        reason: "must not be empty".to_string(),
                    });
                }
                Ok(())
            }
            ProviderSettings::Youtube(s) => {
                if s.title.trim().is_empty() {
                    return Err(SettingsError::InvalidField {
                        provider: "youtube",
                        field: "title",
                        reason: "must not be empty".to_string(),
                    });
                }
                if s.title.chars().count() > MAX_TITLE_LENGTH {
                    return Err(SettingsError::InvalidField {
                        provider: "youtube",
                        field: "title",
                        reason: format!("must be at most {} characters", MAX_TITLE_LENGTH),
                    });
                }
                Ok(())
            }
            ProviderSettings::Pinterest(s) => {
                if s.board.trim().is_empty() {
                    return Err(SettingsError::InvalidField {
                        provider: "pinterest",
                        field: "board",
                        reason: "must not be empty".to_string(),
                    });
                }
                if let Some(title) = &s.title {
                    if title.chars().count() > MAX_TITLE_LENGTH {
                        return Err(SettingsError::InvalidField {
                            provider: "pinterest",
                            field: "title",
                            reason: format!("must be at most {} characters", MAX_TITLE_LENGTH),
                        });
                    }
                }
                if let Some(link) = &s.link {
                    if Url::parse(link).is_err() {
                        return Err(SettingsError::InvalidField {
                            provider: "pinterest",
                            field: "link",
                            reason: "must be a valid absolute URL".to_string(),
                        });
                    }
                }
                if let Some(color) = &s.dominant_color {
                    if !is_hex_color(color) {
                        return Err(SettingsError::InvalidField {
                            provider: "pinterest",
                            field: "dominant_color",
                            reason: "must be a hex color like #a1b2c3".to_string(),
                        });
                    }
                }
                Ok(())
            }
            ProviderSettings::Instagram(s) => {
                if let Some(collaborators) = &s.collaborators {
                    if collaborators.len() > INSTAGRAM_MAX_COLLABORATORS {
                        return Err(SettingsError::InvalidField {
                            provider: "instagram",
                            field: "collaborators",
                            reason: format!(
                                "at most {} collaborators allowed",
                                INSTAGRAM_MAX_COLLABORATORS
                            ),
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

fn parse_variant<T: serde::de::DeserializeOwned>(
    payload: &JsonValue,
    provider: &'static str,
) -> Result<T, SettingsError> {
    // Strip the discriminator before handing the payload to serde; the
    // variant structs do not carry it as a field.
    let mut body = payload.clone();
    if let Some(obj) = body.as_object_mut() {
        obj.remove("__type");
    }
    serde_json::from_value(body).map_err(|e| SettingsError::Malformed {
        provider,
        reason: e.to_string(),
    })
}

fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
