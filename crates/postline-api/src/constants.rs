//! API constants.

/// URL prefix for the public API surface.
pub const API_PREFIX: &str = "/public/v1";

/// Header carrying the caller's organization, set by the gateway in front of
/// this service.
pub const ORGANIZATION_HEADER: &str = "x-organization-id";
