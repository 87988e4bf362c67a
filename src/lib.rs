//! In-memory IP address management catalog.
//!
//! The [`Catalog`] holds networks, reserved addresses, VLANs, SSIDs, zones,
//! equipment with its ports, and DNS records in one path-indexed tree, and
//! checks every structural rule on [`Catalog::add`]. The [`processing`]
//! module does the CIDR math: splitting a block, summarizing adjacent
//! blocks, and finding free space under a parent.

pub mod catalog;
pub mod error;
pub mod models;
pub mod parsing;
pub mod processing;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use models::{
    AllocationMode, Cidr, DnsRecord, Equipment, FolderKind, Ip, Item, Network, Port, Ssid,
    StaticFolder, TaggedVlanMode, Vlan, Zone,
};
