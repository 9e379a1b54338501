use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Static package registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Packages known to a config-driven registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

/// An installed package and the service components it declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    /// Owning user id of the package.
    pub uid: u32,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

/// A service component inside a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Class name of the service, unique within its package.
    pub name: String,
    /// Actions the service advertises (e.g. `media.session.LibraryService`).
    #[serde(default)]
    pub actions: Vec<String>,
    /// Declared metadata block.  `None` means the component declares none,
    /// which is different from an empty block.
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}
