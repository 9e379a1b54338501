//! In-process connection table.
//!
//! Sessions that live in this process are published under a raw handle.
//! When a record carrying that raw handle is restored locally, the table
//! hands back the published capability itself instead of a proxy, so local
//! round trips keep reference identity.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::handle::{HandleAdapter, ProxyHandle, RawHandle, SessionHandle};

/// Table of locally published session handles.
///
/// The table only holds its own `Arc` to each handle.  Withdrawing an entry
/// never closes the session behind it.
#[derive(Debug, Default)]
pub struct HandleTable {
    local: RwLock<HashMap<RawHandle, Arc<dyn SessionHandle>>>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a local session under `raw`.  Replaces any previous entry.
    pub fn publish(&self, raw: RawHandle, handle: Arc<dyn SessionHandle>) {
        let replaced = self.local.write().insert(raw, handle).is_some();
        tracing::debug!(raw = %raw, replaced, "session handle published");
    }

    /// Remove the entry for `raw`, returning it if one existed.
    pub fn withdraw(&self, raw: RawHandle) -> Option<Arc<dyn SessionHandle>> {
        let removed = self.local.write().remove(&raw);
        if removed.is_some() {
            tracing::debug!(raw = %raw, "session handle withdrawn");
        }
        removed
    }

    pub fn get(&self, raw: RawHandle) -> Option<Arc<dyn SessionHandle>> {
        self.local.read().get(&raw).cloned()
    }

    pub fn len(&self) -> usize {
        self.local.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.read().is_empty()
    }
}

impl HandleAdapter for HandleTable {
    fn wrap(&self, raw: RawHandle) -> Arc<dyn SessionHandle> {
        match self.get(raw) {
            Some(local) => local,
            None => Arc::new(ProxyHandle::new(raw)),
        }
    }
}
