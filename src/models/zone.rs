//! Named VLAN groups.

use super::{Base, FolderKind, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::{compare_natural_number_order, MAX_VLAN_ID, MIN_VLAN_ID};
use crate::processing::normalize_vlan_ids;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The zone name is its raw id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    #[serde(flatten)]
    pub base: Base,
    #[serde(default)]
    pub description: String,
    /// Sorted and free of duplicates once normalized.
    #[serde(default)]
    pub vlan_ids: Vec<u16>,
}

impl Zone {
    /// Zone with `vlan_ids` already normalized.
    pub fn new(name: impl Into<String>, vlan_ids: Vec<u16>) -> Zone {
        let mut zone = Zone {
            base: Base::new(name, FolderKind::Zones.name()),
            description: String::new(),
            vlan_ids,
        };
        zone.normalize();
        zone
    }

    pub fn display_name(&self) -> &str {
        &self.base.raw_id
    }

    /// Sort and de-duplicate the VLAN ids.
    pub fn normalize(&mut self) {
        normalize_vlan_ids(&mut self.vlan_ids);
    }

    /// The zone name.
    pub fn display_id(&self) -> String {
        self.base.raw_id.clone()
    }

    /// Natural order of the name.
    pub fn compare(&self, other: &Zone) -> Ordering {
        compare_natural_number_order(self.display_name(), other.display_name())
    }

    /// Zones folder parent, unique name, every VLAN present.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        self.base.check_folder_parent(catalog, FolderKind::Zones)?;

        let name = self.display_name().trim();
        for sibling in self.base.siblings(catalog) {
            if let Item::Zone(other) = sibling {
                if other.display_name().trim().eq_ignore_ascii_case(name) {
                    return Err(Error::invalid(
                        &path,
                        "display_name",
                        format!("zone {name:?} already exists"),
                    ));
                }
            }
        }

        for id in &self.vlan_ids {
            if !(MIN_VLAN_ID..=MAX_VLAN_ID).contains(id) {
                return Err(Error::invalid(
                    &path,
                    "vlan_ids",
                    format!("{id} is outside {MIN_VLAN_ID}-{MAX_VLAN_ID}"),
                ));
            }
            if catalog.find_vlan_by_id(*id).is_none() {
                return Err(Error::invalid(
                    &path,
                    "vlan_ids",
                    format!("VLAN {id} does not exist"),
                ));
            }
        }
        Ok(())
    }
}
