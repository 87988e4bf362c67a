//! Equipment ports.
//!
//! A port's raw id is its number on the device. Besides its own fields a port
//! carries three soft references: VLAN ids, a LAG master on the same device,
//! and the path of the port at the other end of the cable. Validation checks
//! them; nothing repairs them when the target goes away.

use super::{Base, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::{parse_positive_int_id, MAX_VLAN_ID, MIN_VLAN_ID};
use crate::processing::normalize_vlan_ids;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tagged-VLAN policy of a port.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaggedVlanMode {
    #[default]
    None,
    AllowAll,
    BlockAll,
    /// Only the ids listed in `tagged_vlan_ids`.
    Custom,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Port {
    #[serde(flatten)]
    pub base: Base,
    pub disabled: bool,
    pub name: String,
    pub port_type: String,
    pub speed: String,
    pub poe: String,
    /// Port number of the LAG master, 0 when not aggregated.
    pub lag_group: u32,
    pub lag_mode: String,
    /// 0 when unset.
    pub native_vlan_id: u16,
    pub tagged_vlan_mode: TaggedVlanMode,
    pub tagged_vlan_ids: Vec<u16>,
    /// Path of the peer port, empty when unconnected.
    pub connected_to: String,
    pub destination_notes: String,
}

impl Port {
    /// Enabled port `number` on the device at `equipment_path`.
    pub fn new(number: u32, equipment_path: impl Into<String>, name: impl Into<String>) -> Port {
        Port {
            base: Base::new(number.to_string(), equipment_path),
            name: name.into(),
            ..Port::default()
        }
    }

    /// The raw id as a port number.
    pub fn number(&self) -> Result<u32> {
        parse_positive_int_id(&self.base.raw_id)
    }

    /// Sort and de-duplicate the tagged VLAN ids.
    pub fn normalize(&mut self) {
        normalize_vlan_ids(&mut self.tagged_vlan_ids);
    }

    /// `number: name (type)`, leaving out empty parts.
    pub fn display_id(&self) -> String {
        let mut label = self.base.raw_id.clone();
        if !self.name.is_empty() {
            label = format!("{label}: {}", self.name);
        }
        if !self.port_type.is_empty() {
            label = format!("{label} ({})", self.port_type);
        }
        label
    }

    /// Numeric port order.
    pub fn compare(&self, other: &Port) -> Ordering {
        match (self.number(), other.number()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.base.raw_id.cmp(&other.base.raw_id),
        }
    }

    /// Field rules first, then the parent device, sibling numbers, LAG master,
    /// VLANs and the cable peer.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        let number = self.number().map_err(|e| e.at(&path, "raw_id"))?;

        if self.disabled {
            self.check_disabled_is_bare(&path)?;
        } else if self.name.trim().is_empty() {
            return Err(Error::invalid(&path, "name", "required for enabled ports"));
        }
        if (self.lag_group == 0) != self.lag_mode.trim().is_empty() {
            return Err(Error::invalid(
                &path,
                "lag_mode",
                "LAG group and LAG mode must be set together",
            ));
        }
        match self.tagged_vlan_mode {
            TaggedVlanMode::Custom if self.tagged_vlan_ids.is_empty() => {
                return Err(Error::invalid(
                    &path,
                    "tagged_vlan_ids",
                    "Custom mode needs at least one VLAN",
                ));
            }
            TaggedVlanMode::Custom => {}
            mode if !self.tagged_vlan_ids.is_empty() => {
                return Err(Error::invalid(
                    &path,
                    "tagged_vlan_ids",
                    format!("must be empty in {mode:?} mode"),
                ));
            }
            _ => {}
        }

        if !matches!(catalog.get(&self.base.parent_path), Some(Item::Equipment(_))) {
            return Err(Error::invalid(
                &path,
                "parent_path",
                "parent must be equipment",
            ));
        }

        let mut lag_master_found = self.lag_group == 0 || self.lag_group == number;
        for sibling in self.base.siblings(catalog) {
            if let Item::Port(other) = sibling {
                let other_number = other.number().ok();
                if other_number == Some(number) {
                    return Err(Error::invalid(
                        &path,
                        "raw_id",
                        format!("port {number} already exists"),
                    ));
                }
                if other_number == Some(self.lag_group) {
                    lag_master_found = true;
                }
            }
        }
        if !lag_master_found {
            return Err(Error::invalid(
                &path,
                "lag_group",
                format!("port {} does not exist on this device", self.lag_group),
            ));
        }

        if self.native_vlan_id != 0 {
            check_vlan(catalog, &path, "native_vlan_id", self.native_vlan_id)?;
        }
        for id in &self.tagged_vlan_ids {
            check_vlan(catalog, &path, "tagged_vlan_ids", *id)?;
        }

        if !self.connected_to.is_empty() && self.connected_to != path {
            match catalog.get(&self.connected_to) {
                Some(Item::Port(peer)) if peer.connected_to == path => {}
                Some(Item::Port(_)) => {
                    return Err(Error::invalid(
                        &path,
                        "connected_to",
                        format!("{} is not connected back to this port", self.connected_to),
                    ));
                }
                Some(other) => {
                    return Err(Error::invalid(
                        &path,
                        "connected_to",
                        format!("{} is a {}, not a port", self.connected_to, other.kind_name()),
                    ));
                }
                None => {
                    return Err(Error::invalid(
                        &path,
                        "connected_to",
                        format!("{} does not exist", self.connected_to),
                    ));
                }
            }
        }
        Ok(())
    }

    fn check_disabled_is_bare(&self, path: &str) -> Result<()> {
        let leftovers = [
            ("name", !self.name.is_empty()),
            ("lag_group", self.lag_group != 0),
            ("lag_mode", !self.lag_mode.is_empty()),
            ("native_vlan_id", self.native_vlan_id != 0),
            ("tagged_vlan_mode", self.tagged_vlan_mode != TaggedVlanMode::None),
            ("tagged_vlan_ids", !self.tagged_vlan_ids.is_empty()),
            ("connected_to", !self.connected_to.is_empty()),
        ];
        match leftovers.iter().find(|(_, set)| *set) {
            Some((field, _)) => Err(Error::invalid(path, *field, "must be empty on a disabled port")),
            None => Ok(()),
        }
    }
}

fn check_vlan(catalog: &Catalog, path: &str, field: &'static str, id: u16) -> Result<()> {
    if !(MIN_VLAN_ID..=MAX_VLAN_ID).contains(&id) {
        return Err(Error::invalid(
            path,
            field,
            format!("{id} is outside {MIN_VLAN_ID}-{MAX_VLAN_ID}"),
        ));
    }
    if catalog.find_vlan_by_id(id).is_none() {
        return Err(Error::invalid(path, field, format!("VLAN {id} does not exist")));
    }
    Ok(())
}
