//! DNS host records.

use super::{Base, FolderKind, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parsing::is_valid_hostname;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Record types accepted for literal records.
pub const RECORD_TYPES: [&str; 9] = ["A", "AAAA", "CNAME", "MX", "TXT", "NS", "PTR", "SRV", "CAA"];

/// A name under the DNS folder: either a literal record or an alias of a reserved IP.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DnsRecord {
    #[serde(flatten)]
    pub base: Base,
    pub record_type: String,
    pub record_value: String,
    /// Path of an [`Ip`](super::Ip) entry; exclusive with the literal pair.
    pub reserved_ip_path: String,
}

impl DnsRecord {
    /// Record with its own type and value.
    pub fn literal(
        fqdn: impl Into<String>,
        record_type: impl Into<String>,
        record_value: impl Into<String>,
    ) -> DnsRecord {
        DnsRecord {
            base: Base::new(fqdn, FolderKind::Dns.name()),
            record_type: record_type.into(),
            record_value: record_value.into(),
            reserved_ip_path: String::new(),
        }
    }

    /// Record that takes its address from a reserved IP.
    pub fn alias(fqdn: impl Into<String>, reserved_ip_path: impl Into<String>) -> DnsRecord {
        DnsRecord {
            base: Base::new(fqdn, FolderKind::Dns.name()),
            reserved_ip_path: reserved_ip_path.into(),
            ..DnsRecord::default()
        }
    }

    pub fn is_alias(&self) -> bool {
        !self.reserved_ip_path.is_empty()
    }

    /// The FQDN.
    pub fn display_id(&self) -> String {
        self.base.raw_id.clone()
    }

    /// Case-insensitive by name.
    pub fn compare(&self, other: &DnsRecord) -> Ordering {
        self.base
            .raw_id
            .to_ascii_lowercase()
            .cmp(&other.base.raw_id.to_ascii_lowercase())
    }

    /// Name shape, exactly one record form, folder, unique name and alias target.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        if !is_valid_hostname(&self.base.raw_id) {
            return Err(Error::invalid(&path, "raw_id", "not a valid domain name"));
        }

        let has_literal = !self.record_type.is_empty() || !self.record_value.is_empty();
        match (has_literal, self.is_alias()) {
            (true, true) => {
                return Err(Error::invalid(
                    &path,
                    "reserved_ip_path",
                    "a record is either literal or an IP alias, not both",
                ))
            }
            (false, false) => {
                return Err(Error::invalid(
                    &path,
                    "record_type",
                    "needs a type and value or a reserved IP",
                ))
            }
            (true, false) => self.check_literal(&path)?,
            (false, true) => {}
        }

        self.base.check_folder_parent(catalog, FolderKind::Dns)?;
        for sibling in self.base.siblings(catalog) {
            if sibling.raw_id().eq_ignore_ascii_case(&self.base.raw_id) {
                return Err(Error::invalid(
                    &path,
                    "raw_id",
                    format!("{} already exists", sibling.raw_id()),
                ));
            }
        }

        if self.is_alias() {
            match catalog.get(&self.reserved_ip_path) {
                Some(Item::Ip(_)) => {}
                Some(other) => {
                    return Err(Error::invalid(
                        &path,
                        "reserved_ip_path",
                        format!("{} is a {}, not an IP", self.reserved_ip_path, other.kind_name()),
                    ))
                }
                None => {
                    return Err(Error::invalid(
                        &path,
                        "reserved_ip_path",
                        format!("{} does not exist", self.reserved_ip_path),
                    ))
                }
            }
        }
        Ok(())
    }

    fn check_literal(&self, path: &str) -> Result<()> {
        let record_type = self.record_type.trim().to_ascii_uppercase();
        if !RECORD_TYPES.contains(&record_type.as_str()) {
            return Err(Error::invalid(
                path,
                "record_type",
                format!("unsupported type {:?}", self.record_type),
            ));
        }
        let value = self.record_value.trim();
        if value.is_empty() {
            return Err(Error::invalid(path, "record_value", "required"));
        }
        let ok = match record_type.as_str() {
            "A" => value.parse::<Ipv4Addr>().is_ok(),
            "AAAA" => value.parse::<Ipv6Addr>().is_ok(),
            "CNAME" | "NS" | "PTR" => is_valid_hostname(value),
            _ => true,
        };
        if !ok {
            return Err(Error::invalid(
                path,
                "record_value",
                format!("{value:?} is not valid for a {record_type} record"),
            ));
        }
        Ok(())
    }
}
