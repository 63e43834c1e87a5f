use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vendor (store) whose prices can be charted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Opaque id used by the price API
    pub id: String,

    /// Human-readable name shown in series keys (e.g., "Elko")
    pub name: String,

    /// Vendors with the API disabled are hidden from selection and lookups
    #[serde(default = "default_enabled")]
    pub api_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Vendor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            api_enabled: true,
        }
    }

    pub fn disabled(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_enabled: false,
            ..Self::new(id, name)
        }
    }
}

/// Synchronous vendor id → name lookup.
///
/// Only API-enabled vendors are kept. Insertion order is preserved for listing.
#[derive(Debug, Clone, Default)]
pub struct VendorDirectory {
    vendors: Vec<Vendor>,
    index: HashMap<String, usize>,
}

impl VendorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vendors(vendors: impl IntoIterator<Item = Vendor>) -> Self {
        let mut directory = Self::new();
        for vendor in vendors {
            directory.register(vendor);
        }
        directory
    }

    /// Add a vendor. Disabled vendors are ignored; a repeated id replaces the earlier entry.
    pub fn register(&mut self, vendor: Vendor) {
        if !vendor.api_enabled {
            return;
        }
        match self.index.get(&vendor.id) {
            Some(&idx) => self.vendors[idx] = vendor,
            None => {
                self.index.insert(vendor.id.clone(), self.vendors.len());
                self.vendors.push(vendor);
            }
        }
    }

    /// Resolve a vendor id to its display name.
    pub fn resolve(&self, vendor_id: &str) -> Option<&str> {
        self.index
            .get(vendor_id)
            .map(|&idx| self.vendors[idx].name.as_str())
    }

    /// Every enabled vendor, in registration order.
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vendors.iter().map(|v| v.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}
