use serde::Serialize;

/// Structured trace events emitted across all mediatoken crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    OwnerResolved {
        package_name: String,
        owner_id: u32,
    },
    SessionIdResolved {
        package_name: String,
        service_name: String,
        action: String,
        session_id: String,
    },
    TokenRestored {
        package_name: String,
        token_type: String,
        has_handle: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "mt_event");
    }
}
