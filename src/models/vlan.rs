//! VLANs and wireless network names.

use super::{Base, FolderKind, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::parse_vlan_id;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An 802.1Q VLAN; the raw id is the decimal id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vlan {
    #[serde(flatten)]
    pub base: Base,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

impl Vlan {
    /// VLAN `id` under the VLANs folder.
    pub fn new(id: u16, display_name: impl Into<String>) -> Vlan {
        Vlan {
            base: Base::new(id.to_string(), FolderKind::Vlans.name()),
            display_name: display_name.into(),
            description: String::new(),
        }
    }

    /// The raw id as a VLAN id.
    pub fn id(&self) -> Result<u16> {
        parse_vlan_id(&self.base.raw_id)
    }

    /// `id (name)`, or the bare id when unnamed.
    pub fn display_id(&self) -> String {
        if self.display_name.is_empty() {
            self.base.raw_id.clone()
        } else {
            format!("{} ({})", self.base.raw_id, self.display_name)
        }
    }

    /// Numeric id order.
    pub fn compare(&self, other: &Vlan) -> Ordering {
        match (self.id(), other.id()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.base.raw_id.cmp(&other.base.raw_id),
        }
    }

    /// Canonical id in range, VLANs folder parent, unique id and name.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        let id = self.id().map_err(|e| e.at(&path, "raw_id"))?;
        if self.base.raw_id != id.to_string() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("must be written as {id}"),
            ));
        }
        self.base.check_folder_parent(catalog, FolderKind::Vlans)?;

        let name = self.display_name.trim();
        for sibling in self.base.siblings(catalog) {
            if let Item::Vlan(other) = sibling {
                if other.id().ok() == Some(id) {
                    return Err(Error::invalid(
                        &path,
                        "raw_id",
                        format!("VLAN {id} already exists"),
                    ));
                }
                if !name.is_empty() && other.display_name.trim().eq_ignore_ascii_case(name) {
                    return Err(Error::invalid(
                        &path,
                        "display_name",
                        format!("{name:?} is already used by VLAN {}", other.base.raw_id),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A wireless network; the raw id is the SSID itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ssid {
    #[serde(flatten)]
    pub base: Base,
    #[serde(default)]
    pub description: String,
}

/// 802.11 limit on SSID length in bytes.
pub const MAX_SSID_LEN: usize = 32;

impl Ssid {
    pub fn new(name: impl Into<String>) -> Ssid {
        Ssid {
            base: Base::new(name, FolderKind::Ssids.name()),
            description: String::new(),
        }
    }

    /// The SSID.
    pub fn display_id(&self) -> String {
        self.base.raw_id.clone()
    }

    /// Lexical.
    pub fn compare(&self, other: &Ssid) -> Ordering {
        self.base.raw_id.cmp(&other.base.raw_id)
    }

    /// Non-empty, at most [`MAX_SSID_LEN`] bytes, under the SSIDs folder.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        self.base.check()?;
        if self.base.raw_id.len() > MAX_SSID_LEN {
            return Err(Error::invalid(
                &self.base.path(),
                "raw_id",
                format!("longer than {MAX_SSID_LEN} bytes"),
            ));
        }
        self.base.check_folder_parent(catalog, FolderKind::Ssids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlan_order_is_numeric() {
        let mut vlans = vec![Vlan::new(100, ""), Vlan::new(20, ""), Vlan::new(3, "")];
        vlans.sort_by(Vlan::compare);
        let ids: Vec<u16> = vlans.iter().map(|v| v.id().unwrap()).collect();
        assert_eq!(ids, vec![3, 20, 100]);
    }

    #[test]
    fn test_vlan_validate() {
        let mut catalog = Catalog::new();
        catalog.add(Vlan::new(10, "Users").into()).unwrap();

        assert!(Vlan::new(11, "Guests").validate(&catalog).is_ok());
        assert!(Vlan::new(11, "users").validate(&catalog).is_err());


        let mut out_of_range = Vlan::new(10, "");
        out_of_range.base.raw_id = "4095".to_string();
        assert!(out_of_range.validate(&catalog).is_err());

        let mut misplaced = Vlan::new(12, "");
        misplaced.base.parent_path = "Zones".to_string();
        assert!(misplaced.validate(&catalog).is_err());
    }

    #[test]
    fn test_vlan_canonical_raw_id() {
        let mut catalog = Catalog::new();
        for raw in ["010", " 10", "10 ", "+10"] {
            let mut padded = Vlan::new(10, "Users");
            padded.base.raw_id = raw.to_string();
            assert!(catalog.add(padded.into()).is_err(), "{raw:?}");
        }
        assert!(catalog.find_vlan_by_id(10).is_none());
        catalog.add(Vlan::new(10, "Users").into()).unwrap();
        assert_eq!(catalog.find_vlan_by_id(10).unwrap().base.raw_id, "10");
    }

    #[test]
    fn test_ssid_validate() {
        let catalog = Catalog::new();
        assert!(Ssid::new("corp-wifi").validate(&catalog).is_ok());
        assert!(Ssid::new("x".repeat(33)).validate(&catalog).is_err());
        assert!(Ssid::new("").validate(&catalog).is_err());
    }
}
