//! Address blocks.

use super::{Base, Cidr, FolderKind, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::{MAX_VLAN_ID, MIN_VLAN_ID};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a block is used.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocationMode {
    #[default]
    Unallocated,
    /// Divided into child networks.
    Subnets,
    /// A pool of individually reserved addresses.
    Hosts,
}

/// A CIDR block; the raw id is the prefix in `addr/len` form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    #[serde(flatten)]
    pub base: Base,
    #[serde(default)]
    pub allocation_mode: AllocationMode,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// 0 when no VLAN is attached.
    #[serde(default)]
    pub vlan_id: u16,
}

impl Network {
    /// Unallocated network at `parent_path`.
    pub fn new(cidr: &Cidr, parent_path: impl Into<String>) -> Network {
        Network {
            base: Base::new(cidr.to_string(), parent_path),
            allocation_mode: AllocationMode::Unallocated,
            display_name: String::new(),
            description: String::new(),
            vlan_id: 0,
        }
    }

    /// Top-level network under the Networks folder.
    pub fn root(cidr: &Cidr) -> Network {
        Network::new(cidr, FolderKind::Networks.name())
    }

    /// Set the allocation mode and name.
    pub fn allocated(mut self, mode: AllocationMode, display_name: impl Into<String>) -> Network {
        self.allocation_mode = mode;
        self.display_name = display_name.into();
        self
    }

    /// The raw id as a prefix.
    pub fn cidr(&self) -> Result<Cidr> {
        self.base.raw_id.parse()
    }

    /// `cidr (*)` when unallocated, `cidr (name)` otherwise.
    pub fn display_id(&self) -> String {
        match self.allocation_mode {
            AllocationMode::Unallocated => format!("{} (*)", self.base.raw_id),
            _ => format!("{} ({})", self.base.raw_id, self.display_name),
        }
    }

    /// Masked address, then supernet before subnet. Unparsable ids sort last.
    pub fn compare(&self, other: &Network) -> Ordering {
        match (self.cidr(), other.cidr()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.base.raw_id.cmp(&other.base.raw_id),
        }
    }

    /// Prefix syntax, required name, parent, siblings, children and VLAN, in that order.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;

        let cidr = self.cidr().map_err(|e| e.at(&path, "raw_id"))?;
        if !cidr.is_network_address() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("{cidr} is a host address, the network is {}", cidr.network()),
            ));
        }
        if self.base.raw_id != cidr.to_string() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("must be written as {cidr}"),
            ));
        }
        if cidr.is_single_address() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("/{} is a single address, not a network", cidr.prefix),
            ));
        }

        if self.allocation_mode != AllocationMode::Unallocated
            && self.display_name.trim().is_empty()
        {
            return Err(Error::invalid(
                &path,
                "display_name",
                "required for allocated networks",
            ));
        }
        if self.vlan_id != 0 && !(MIN_VLAN_ID..=MAX_VLAN_ID).contains(&self.vlan_id) {
            return Err(Error::invalid(
                &path,
                "vlan_id",
                format!("{} is outside {MIN_VLAN_ID}-{MAX_VLAN_ID}", self.vlan_id),
            ));
        }

        match catalog.get(&self.base.parent_path) {
            Some(Item::Folder(folder)) if folder.folder == FolderKind::Networks => {}
            Some(Item::Network(parent)) => {
                if parent.allocation_mode != AllocationMode::Subnets {
                    return Err(Error::invalid(
                        &path,
                        "parent_path",
                        "parent network is not divided into subnets",
                    ));
                }
                let parent_cidr = parent.cidr().map_err(|e| e.at(&path, "parent_path"))?;
                if !parent_cidr.contains(&cidr) || cidr.prefix <= parent_cidr.prefix {
                    return Err(Error::invalid(
                        &path,
                        "raw_id",
                        format!("{cidr} is not a subnet of {parent_cidr}"),
                    ));
                }
            }
            _ => {
                return Err(Error::invalid(
                    &path,
                    "parent_path",
                    "parent must be the Networks folder or a network",
                ));
            }
        }

        for sibling in self.base.siblings(catalog) {
            if let Item::Network(other) = sibling {
                if other.cidr().ok() == Some(cidr) {
                    return Err(Error::invalid(
                        &path,
                        "raw_id",
                        format!("{cidr} already exists here"),
                    ));
                }
            }
        }

        for child in catalog.children_of(&path) {
            match child {
                Item::Network(_) if self.allocation_mode != AllocationMode::Subnets => {
                    return Err(Error::invalid(
                        &path,
                        "allocation_mode",
                        "has subnets, so the mode must be Subnets",
                    ));
                }
                Item::Ip(_) if self.allocation_mode != AllocationMode::Hosts => {
                    return Err(Error::invalid(
                        &path,
                        "allocation_mode",
                        "has reserved addresses, so the mode must be Hosts",
                    ));
                }
                _ => {}
            }
        }

        if self.vlan_id != 0 && catalog.find_vlan_by_id(self.vlan_id).is_none() {
            return Err(Error::invalid(
                &path,
                "vlan_id",
                format!("VLAN {} does not exist", self.vlan_id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vlan;

    fn net(s: &str) -> Network {
        Network::root(&s.parse().unwrap())
    }

    #[test]
    fn test_display_id() {
        assert_eq!(net("10.0.0.0/8").display_id(), "10.0.0.0/8 (*)");
        let lab = net("10.0.0.0/8").allocated(AllocationMode::Subnets, "Lab");
        assert_eq!(lab.display_id(), "10.0.0.0/8 (Lab)");
    }

    #[test]
    fn test_compare() {
        let mut nets = vec![
            net("10.0.1.0/24"),
            net("10.0.0.0/24"),
            net("10.0.0.0/16"),
            net("2001:db8::/32"),
            net("192.168.0.0/16"),
        ];
        nets.sort_by(Network::compare);
        let ids: Vec<&str> = nets.iter().map(|n| n.base.raw_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "10.0.0.0/16",
                "10.0.0.0/24",
                "10.0.1.0/24",
                "192.168.0.0/16",
                "2001:db8::/32"
            ]
        );
    }

    #[test]
    fn test_validate_syntax() {
        let catalog = Catalog::new();
        let host = Network::new(&"10.0.0.1/24".parse().unwrap(), "Networks");
        assert!(host.validate(&catalog).is_err());
        let single = Network::new(&"10.0.0.1/32".parse().unwrap(), "Networks");
        assert!(single.validate(&catalog).is_err());
        let mut junk = net("10.0.0.0/8");
        junk.base.raw_id = "10.0.0.0".to_string();
        assert!(junk.validate(&catalog).is_err());
        assert!(net("10.0.0.0/8").validate(&catalog).is_ok());
    }

    #[test]
    fn test_validate_canonical_raw_id() {
        let mut catalog = Catalog::new();
        for raw in [" 10.0.0.0/24 ", "10.0.0.0/024", "2001:DB8::/32", "2001:db8:0::/32"] {
            let mut padded = net("10.0.0.0/24");
            padded.base.raw_id = raw.to_string();
            let err = catalog.add(padded.into()).unwrap_err();
            assert!(err.to_string().contains("must be written as"), "{raw}: {err}");
        }
        assert_eq!(catalog.len(), 6);
        assert!(catalog.add(net("2001:db8::/32").into()).is_ok());
    }

    #[test]
    fn test_validate_name_and_vlan() {
        let mut catalog = Catalog::new();
        let nameless = net("10.0.0.0/8").allocated(AllocationMode::Hosts, " ");
        assert!(nameless.validate(&catalog).is_err());

        let mut tagged = net("10.0.0.0/8");
        tagged.vlan_id = 30;
        assert!(tagged.validate(&catalog).is_err());
        catalog.add(Vlan::new(30, "Servers").into()).unwrap();
        assert!(tagged.validate(&catalog).is_ok());
    }

    #[test]
    fn test_validate_parent() {
        let mut catalog = Catalog::new();
        let parent = net("10.0.0.0/16");
        catalog.add(parent.clone().into()).unwrap();
        let parent_path = parent.base.path();

        // Parent still unallocated.
        let child = Network::new(&"10.0.1.0/24".parse().unwrap(), parent_path.clone());
        assert!(child.validate(&catalog).is_err());

        catalog.put_unchecked(parent.allocated(AllocationMode::Subnets, "Campus").into());
        assert!(child.validate(&catalog).is_ok());

        let outside = Network::new(&"10.1.0.0/24".parse().unwrap(), parent_path.clone());
        assert!(outside.validate(&catalog).is_err());
        let same = Network::new(&"10.0.0.0/16".parse().unwrap(), parent_path);
        assert!(same.validate(&catalog).is_err());

        let orphan = Network::new(&"10.0.1.0/24".parse().unwrap(), "VLANs");
        assert!(orphan.validate(&catalog).is_err());
    }

    #[test]
    fn test_validate_mode_mismatch() {
        let mut catalog = Catalog::new();
        let parent = net("10.0.0.0/16").allocated(AllocationMode::Subnets, "Campus");
        catalog.add(parent.clone().into()).unwrap();
        catalog
            .add(Network::new(&"10.0.1.0/24".parse().unwrap(), parent.base.path()).into())
            .unwrap();

        let hosts = parent.clone().allocated(AllocationMode::Hosts, "Campus");
        assert!(hosts.validate(&catalog).is_err());
        assert!(parent.validate(&catalog).is_ok());
    }
}
