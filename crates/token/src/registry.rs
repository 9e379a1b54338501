//! Package registry. Resolves package owners and discovers service
//! components by the action they advertise.

use std::collections::{BTreeMap, HashMap};

use mt_domain::config::{PackageEntry, RegistryConfig};

/// Lookup surface of the platform package registry.
///
/// Both calls may block.  Build tokens off latency-sensitive paths.
pub trait PackageRegistry: Send + Sync {
    /// Owning user id of `package_name`, or `None` if it is not installed.
    fn resolve_owner_id(&self, package_name: &str) -> Option<u32>;

    /// The component `package_name/service_name` if it advertises `action`.
    fn find_component(
        &self,
        action: &str,
        package_name: &str,
        service_name: &str,
    ) -> Option<ComponentInfo>;
}

/// A discovered service component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub package_name: String,
    pub service_name: String,
    /// `None` when the component declares no metadata block at all.
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Session id declared by a discovered component.
///
/// `None` when nothing was found, `""` when the component has no metadata
/// block or the block lacks `key`.
pub fn session_id_from_component(component: Option<&ComponentInfo>, key: &str) -> Option<String> {
    let component = component?;
    let id = component
        .metadata
        .as_ref()
        .and_then(|meta| meta.get(key))
        .cloned()
        .unwrap_or_default();
    Some(id)
}

/// Registry backed by a fixed package list, typically loaded from config.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    /// package name → entry
    packages: HashMap<String, PackageEntry>,
}

impl StaticRegistry {
    /// Build a registry from the configured package list.  A later entry
    /// for the same package name replaces an earlier one.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut packages = HashMap::new();
        for entry in &config.packages {
            packages.insert(entry.name.clone(), entry.clone());
        }
        Self { packages }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of packages known to the registry.
    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl PackageRegistry for StaticRegistry {
    fn resolve_owner_id(&self, package_name: &str) -> Option<u32> {
        self.packages.get(package_name).map(|p| p.uid)
    }

    fn find_component(
        &self,
        action: &str,
        package_name: &str,
        service_name: &str,
    ) -> Option<ComponentInfo> {
        let service = self
            .packages
            .get(package_name)?
            .services
            .iter()
            .find(|s| s.name == service_name && s.actions.iter().any(|a| a == action))?;

        Some(ComponentInfo {
            package_name: package_name.to_owned(),
            service_name: service.name.clone(),
            metadata: service.metadata.clone(),
        })
    }
}
