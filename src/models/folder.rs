//! The six fixed top-level folders.

use super::Base;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKind {
    Networks,
    Zones,
    Vlans,
    Ssids,
    Equipment,
    Dns,
}

impl FolderKind {
    /// Every folder, in display order.
    pub const ALL: [FolderKind; 6] = [
        FolderKind::Networks,
        FolderKind::Zones,
        FolderKind::Vlans,
        FolderKind::Ssids,
        FolderKind::Equipment,
        FolderKind::Dns,
    ];

    /// Raw id and path of the folder.
    pub fn name(self) -> &'static str {
        match self {
            FolderKind::Networks => "Networks",
            FolderKind::Zones => "Zones",
            FolderKind::Vlans => "VLANs",
            FolderKind::Ssids => "WiFi SSIDs",
            FolderKind::Equipment => "Equipment",
            FolderKind::Dns => "DNS",
        }
    }

    /// Position among the roots.
    pub fn index(self) -> u32 {
        match self {
            FolderKind::Networks => 0,
            FolderKind::Zones => 1,
            FolderKind::Vlans => 2,
            FolderKind::Ssids => 3,
            FolderKind::Equipment => 4,
            FolderKind::Dns => 5,
        }
    }

    /// Fixed help text.
    pub fn description(self) -> &'static str {
        match self {
            FolderKind::Networks => "IPv4 and IPv6 address blocks, their subnets and reserved hosts.",
            FolderKind::Zones => "Named groups of VLANs such as security or trust zones.",
            FolderKind::Vlans => "802.1Q VLAN ids in use across the site.",
            FolderKind::Ssids => "Wireless network names.",
            FolderKind::Equipment => "Switches, routers and other devices with their ports.",
            FolderKind::Dns => "Host records, either literal or tied to a reserved IP.",
        }
    }
}

/// A top-level folder. Always valid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StaticFolder {
    #[serde(flatten)]
    pub base: Base,
    pub folder: FolderKind,
}

impl StaticFolder {
    /// Root entry for `kind`.
    pub fn new(kind: FolderKind) -> StaticFolder {
        StaticFolder {
            base: Base::new(kind.name(), ""),
            folder: kind,
        }
    }

    pub fn index(&self) -> u32 {
        self.folder.index()
    }

    pub fn description(&self) -> &'static str {
        self.folder.description()
    }

    /// The folder name.
    pub fn display_id(&self) -> String {
        self.base.raw_id.clone()
    }

    /// By fixed index.
    pub fn compare(&self, other: &StaticFolder) -> Ordering {
        self.index().cmp(&other.index())
    }
}
