//! The closed set of catalog entries and their shared identity scheme.

use super::{
    DnsRecord, Equipment, FolderKind, Ip, Network, Port, Ssid, StaticFolder, Vlan, Zone,
};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Joins a parent path and a raw id.
pub const PATH_SEPARATOR: &str = " -> ";

/// `parent -> raw`, or just `raw` at the root.
pub fn join_path(parent_path: &str, raw_id: &str) -> String {
    if parent_path.is_empty() {
        raw_id.to_string()
    } else {
        format!("{parent_path}{PATH_SEPARATOR}{raw_id}")
    }
}

/// Identity shared by every entry: its own key and where it lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Base {
    pub raw_id: String,
    /// Path of the containing entry, empty for the static folders.
    #[serde(default)]
    pub parent_path: String,
}

impl Base {
    pub fn new(raw_id: impl Into<String>, parent_path: impl Into<String>) -> Base {
        Base {
            raw_id: raw_id.into(),
            parent_path: parent_path.into(),
        }
    }

    /// Unique catalog key.
    pub fn path(&self) -> String {
        join_path(&self.parent_path, &self.raw_id)
    }

    /// The raw id must be usable as a path component.
    pub(crate) fn check(&self) -> Result<()> {
        if self.raw_id.trim().is_empty() {
            return Err(Error::invalid(&self.path(), "raw_id", "must not be empty"));
        }
        if self.raw_id.contains(PATH_SEPARATOR) {
            return Err(Error::invalid(
                &self.path(),
                "raw_id",
                format!("must not contain {PATH_SEPARATOR:?}"),
            ));
        }
        Ok(())
    }

    /// The parent must be the given static folder.
    pub(crate) fn check_folder_parent(&self, catalog: &Catalog, kind: FolderKind) -> Result<()> {
        match catalog.get(&self.parent_path) {
            Some(Item::Folder(folder)) if folder.folder == kind => Ok(()),
            _ => Err(Error::invalid(
                &self.path(),
                "parent_path",
                format!("parent must be the {} folder", kind.name()),
            )),
        }
    }

    /// Entries sharing this parent, this entry's own path excluded.
    pub(crate) fn siblings<'a>(&self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Item> {
        let own_path = self.path();
        let parent_path = self.parent_path.clone();
        catalog
            .all()
            .filter(move |item| item.parent_path() == parent_path && item.path() != own_path)
    }
}

/// One catalog entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Folder(StaticFolder),
    Network(Network),
    Ip(Ip),
    Vlan(Vlan),
    Ssid(Ssid),
    Zone(Zone),
    Equipment(Equipment),
    Port(Port),
    DnsRecord(DnsRecord),
}

impl Item {
    /// Identity fields of any variant.
    pub fn base(&self) -> &Base {
        match self {
            Item::Folder(x) => &x.base,
            Item::Network(x) => &x.base,
            Item::Ip(x) => &x.base,
            Item::Vlan(x) => &x.base,
            Item::Ssid(x) => &x.base,
            Item::Zone(x) => &x.base,
            Item::Equipment(x) => &x.base,
            Item::Port(x) => &x.base,
            Item::DnsRecord(x) => &x.base,
        }
    }

    pub fn raw_id(&self) -> &str {
        &self.base().raw_id
    }

    pub fn parent_path(&self) -> &str {
        &self.base().parent_path
    }

    pub fn path(&self) -> String {
        self.base().path()
    }

    /// Short name of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::Folder(_) => "folder",
            Item::Network(_) => "network",
            Item::Ip(_) => "IP",
            Item::Vlan(_) => "VLAN",
            Item::Ssid(_) => "SSID",
            Item::Zone(_) => "zone",
            Item::Equipment(_) => "equipment",
            Item::Port(_) => "port",
            Item::DnsRecord(_) => "DNS record",
        }
    }

    /// Label shown in navigation.
    pub fn display_id(&self) -> String {
        match self {
            Item::Folder(x) => x.display_id(),
            Item::Network(x) => x.display_id(),
            Item::Ip(x) => x.display_id(),
            Item::Vlan(x) => x.display_id(),
            Item::Ssid(x) => x.display_id(),
            Item::Zone(x) => x.display_id(),
            Item::Equipment(x) => x.display_id(),
            Item::Port(x) => x.display_id(),
            Item::DnsRecord(x) => x.display_id(),
        }
    }

    /// Sibling order. Entries of different variants group by variant.
    pub fn compare(&self, other: &Item) -> Ordering {
        let ord = match (self, other) {
            (Item::Folder(a), Item::Folder(b)) => a.compare(b),
            (Item::Network(a), Item::Network(b)) => a.compare(b),
            (Item::Ip(a), Item::Ip(b)) => a.compare(b),
            (Item::Vlan(a), Item::Vlan(b)) => a.compare(b),
            (Item::Ssid(a), Item::Ssid(b)) => a.compare(b),
            (Item::Zone(a), Item::Zone(b)) => a.compare(b),
            (Item::Equipment(a), Item::Equipment(b)) => a.compare(b),
            (Item::Port(a), Item::Port(b)) => a.compare(b),
            (Item::DnsRecord(a), Item::DnsRecord(b)) => a.compare(b),
            _ => self.rank().cmp(&other.rank()),
        };
        ord.then_with(|| self.raw_id().cmp(other.raw_id()))
    }

    fn rank(&self) -> u8 {
        match self {
            Item::Folder(_) => 0,
            Item::Network(_) => 1,
            Item::Ip(_) => 2,
            Item::Vlan(_) => 3,
            Item::Ssid(_) => 4,
            Item::Zone(_) => 5,
            Item::Equipment(_) => 6,
            Item::Port(_) => 7,
            Item::DnsRecord(_) => 8,
        }
    }

    /// Check every invariant of this entry against the catalog. Never mutates.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        match self {
            Item::Folder(_) => Ok(()),
            Item::Network(x) => x.validate(catalog),
            Item::Ip(x) => x.validate(catalog),
            Item::Vlan(x) => x.validate(catalog),
            Item::Ssid(x) => x.validate(catalog),
            Item::Zone(x) => x.validate(catalog),
            Item::Equipment(x) => x.validate(catalog),
            Item::Port(x) => x.validate(catalog),
            Item::DnsRecord(x) => x.validate(catalog),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Item {
                fn from(value: $ty) -> Item {
                    Item::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Folder(StaticFolder),
    Network(Network),
    Ip(Ip),
    Vlan(Vlan),
    Ssid(Ssid),
    Zone(Zone),
    Equipment(Equipment),
    Port(Port),
    DnsRecord(DnsRecord),
);
