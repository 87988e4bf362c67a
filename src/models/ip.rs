//! Reserved addresses inside a Hosts network.

use super::{normalized_octets, AllocationMode, Base, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::parse_mac_address;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::net::IpAddr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ip {
    #[serde(flatten)]
    pub base: Base,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Empty when unknown.
    #[serde(default)]
    pub mac_address: String,
}

impl Ip {
    /// Reservation of `addr` inside the network at `network_path`.
    pub fn new(addr: IpAddr, network_path: impl Into<String>, display_name: impl Into<String>) -> Ip {
        Ip {
            base: Base::new(addr.to_string(), network_path),
            display_name: display_name.into(),
            description: String::new(),
            mac_address: String::new(),
        }
    }

    /// The raw id as an address.
    pub fn addr(&self) -> Result<IpAddr> {
        self.base
            .raw_id
            .trim()
            .parse()
            .map_err(|_| Error::parse("IP address", &self.base.raw_id, "invalid address"))
    }

    /// `addr (name)`, or the bare address when unnamed.
    pub fn display_id(&self) -> String {
        if self.display_name.is_empty() {
            self.base.raw_id.clone()
        } else {
            format!("{} ({})", self.base.raw_id, self.display_name)
        }
    }

    /// Numeric address order.
    pub fn compare(&self, other: &Ip) -> Ordering {
        match (self.addr(), other.addr()) {
            (Ok(a), Ok(b)) => normalized_octets(a).cmp(&normalized_octets(b)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.base.raw_id.cmp(&other.base.raw_id),
        }
    }

    /// Canonical address, MAC syntax, Hosts parent, family, containment and uniqueness.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        let addr = self.addr().map_err(|e| e.at(&path, "raw_id"))?;
        if self.base.raw_id != addr.to_string() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("must be written as {addr}"),
            ));
        }
        if !self.mac_address.trim().is_empty() {
            parse_mac_address(&self.mac_address).map_err(|e| e.at(&path, "mac_address"))?;
        }

        let network = match catalog.get(&self.base.parent_path) {
            Some(Item::Network(network)) => network,
            _ => {
                return Err(Error::invalid(
                    &path,
                    "parent_path",
                    "parent must be a network",
                ))
            }
        };
        if network.allocation_mode != AllocationMode::Hosts {
            return Err(Error::invalid(
                &path,
                "parent_path",
                "parent network is not a host pool",
            ));
        }
        let cidr = network.cidr().map_err(|e| e.at(&path, "parent_path"))?;
        if addr.is_ipv4() != cidr.is_ipv4() {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("{addr} is not the same address family as {cidr}"),
            ));
        }
        if !cidr.contains_addr(addr) {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("{addr} is outside {cidr}"),
            ));
        }

        for sibling in self.base.siblings(catalog) {
            if let Item::Ip(other) = sibling {
                if other.addr().ok() == Some(addr) {
                    return Err(Error::invalid(
                        &path,
                        "raw_id",
                        format!("{addr} is already reserved"),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    fn hosts_catalog() -> (Catalog, String) {
        let mut catalog = Catalog::new();
        let pool = Network::root(&"192.168.1.0/24".parse().unwrap())
            .allocated(AllocationMode::Hosts, "Office");
        let path = pool.base.path();
        catalog.add(pool.into()).unwrap();
        (catalog, path)
    }

    fn ip(addr: &str, parent: &str) -> Ip {
        Ip::new(addr.parse().unwrap(), parent, "host")
    }

    #[test]
    fn test_display_id() {
        let mut printer = ip("192.168.1.20", "x");
        assert_eq!(printer.display_id(), "192.168.1.20 (host)");
        printer.display_name.clear();
        assert_eq!(printer.display_id(), "192.168.1.20");
    }

    #[test]
    fn test_compare_numeric() {
        let a = ip("192.168.1.9", "x");
        let b = ip("192.168.1.10", "x");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_validate_containment_and_family() {
        let (catalog, pool) = hosts_catalog();
        assert!(ip("192.168.1.20", &pool).validate(&catalog).is_ok());
        assert!(ip("192.168.2.20", &pool).validate(&catalog).is_err());
        assert!(ip("fe80::1", &pool).validate(&catalog).is_err());
        assert!(ip("192.168.1.20", "Networks").validate(&catalog).is_err());
    }

    #[test]
    fn test_validate_mac() {
        let (catalog, pool) = hosts_catalog();
        let mut host = ip("192.168.1.20", &pool);
        host.mac_address = "00:11:22:33:44:55".to_string();
        assert!(host.validate(&catalog).is_ok());
        host.mac_address = "00:11:22".to_string();
        let err = host.validate(&catalog).unwrap_err();
        assert!(err.to_string().contains("mac_address"));
    }

    #[test]
    fn test_validate_unique() {
        let (mut catalog, pool) = hosts_catalog();
        catalog.add(ip("192.168.1.20", &pool).into()).unwrap();
        assert!(ip("192.168.1.20", &pool).validate(&catalog).is_ok());
        let other = Ip::new("192.168.1.20".parse().unwrap(), &pool, "printer");
        assert!(catalog.add(other.into()).is_err());
    }

    #[test]
    fn test_validate_canonical_raw_id() {
        let (mut catalog, pool) = hosts_catalog();
        for raw in [" 192.168.1.5", "192.168.1.5 "] {
            let mut padded = ip("192.168.1.5", &pool);
            padded.base.raw_id = raw.to_string();
            let err = catalog.add(padded.into()).unwrap_err();
            assert!(err.to_string().contains("must be written as"), "{raw:?}: {err}");
        }
        assert!(catalog.get(&format!("{pool} ->  192.168.1.5")).is_none());
        assert!(catalog.add(ip("192.168.1.5", &pool).into()).is_ok());
    }

    #[test]
    fn test_validate_requires_hosts_mode() {
        let mut catalog = Catalog::new();
        let block = Network::root(&"10.0.0.0/24".parse().unwrap());
        let path = block.base.path();
        catalog.add(block.into()).unwrap();
        assert!(ip("10.0.0.5", &path).validate(&catalog).is_err());
    }
}
