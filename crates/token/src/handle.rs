//! Remote handles: opaque references to live session endpoints.
//!
//! The token never talks to the endpoint.  It only needs two things from a
//! handle: an identity for equality/hashing, and the raw transport handle so
//! the token can be packed into a record.  How raw handles map onto a real
//! IPC mechanism is left to a [`HandleAdapter`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque transport-level handle as carried inside a
/// [`TransferRecord`](crate::TransferRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHandle(pub u64);

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Identity of the endpoint a handle refers to.  Two handles with the same
/// endpoint identity address the same remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(pub u64);

/// Capability view of a remote session endpoint.
pub trait SessionHandle: fmt::Debug + Send + Sync {
    /// Identity of the underlying endpoint.
    fn endpoint(&self) -> EndpointId;

    /// The raw handle to put on the wire, or `None` for a local-only stub
    /// that cannot cross a process boundary.
    fn raw_handle(&self) -> Option<RawHandle>;
}

/// Turns raw handles received from a peer back into live capabilities.
pub trait HandleAdapter: Send + Sync {
    fn wrap(&self, raw: RawHandle) -> Arc<dyn SessionHandle>;
}

/// Handle to an endpoint in another process, known only by its raw handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyHandle {
    raw: RawHandle,
}

impl ProxyHandle {
    pub fn new(raw: RawHandle) -> Self {
        Self { raw }
    }
}

impl SessionHandle for ProxyHandle {
    fn endpoint(&self) -> EndpointId {
        EndpointId(self.raw.0)
    }

    fn raw_handle(&self) -> Option<RawHandle> {
        Some(self.raw)
    }
}

/// Adapter that wraps every raw handle into a fresh [`ProxyHandle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyAdapter;

impl HandleAdapter for ProxyAdapter {
    fn wrap(&self, raw: RawHandle) -> Arc<dyn SessionHandle> {
        Arc::new(ProxyHandle::new(raw))
    }
}
