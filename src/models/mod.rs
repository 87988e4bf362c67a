//! Catalog entry types.
//!
//! - [`Cidr`] - address plus prefix length
//! - [`Item`] - the closed set of entries, with [`Base`] identity
//! - one module per entry variant, each with its ordering and validation rules

mod cidr;
mod dns;
mod equipment;
mod folder;
mod ip;
mod item;
mod network;
mod port;
mod vlan;
mod zone;

// Re-export public types
pub use cidr::{addr_bits, cut_addr, normalized_octets, Cidr, IPV4_BITS, IPV6_BITS};
pub use dns::{DnsRecord, RECORD_TYPES};
pub use equipment::Equipment;
pub use folder::{FolderKind, StaticFolder};
pub use ip::Ip;
pub use item::{join_path, Base, Item, PATH_SEPARATOR};
pub use network::{AllocationMode, Network};
pub use port::{Port, TaggedVlanMode};
pub use vlan::{Ssid, Vlan, MAX_SSID_LEN};
pub use zone::Zone;
