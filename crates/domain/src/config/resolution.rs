use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Token resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Well-known strings used when a token has to be resolved through the
/// package registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Action advertised by components that host a session service.
    #[serde(default = "d_session_service_action")]
    pub session_service_action: String,
    /// Action advertised by components that host a library service.
    #[serde(default = "d_library_service_action")]
    pub library_service_action: String,
    /// Metadata key carrying the session id of a service component.
    #[serde(default = "d_metadata_key")]
    pub metadata_key: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            session_service_action: d_session_service_action(),
            library_service_action: d_library_service_action(),
            metadata_key: d_metadata_key(),
        }
    }
}

pub const DEFAULT_SESSION_SERVICE_ACTION: &str = "media.session.SessionService";
pub const DEFAULT_LIBRARY_SERVICE_ACTION: &str = "media.session.LibraryService";
pub const DEFAULT_METADATA_KEY: &str = "media.session.id";

fn d_session_service_action() -> String {
    DEFAULT_SESSION_SERVICE_ACTION.into()
}

fn d_library_service_action() -> String {
    DEFAULT_LIBRARY_SERVICE_ACTION.into()
}

fn d_metadata_key() -> String {
    DEFAULT_METADATA_KEY.into()
}
