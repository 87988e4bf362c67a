//! VLAN-id list de-duplication.
//!
//! Zones and ports keep their VLAN ids sorted and unique; loaders and entry
//! forms hand over raw lists that may repeat ids.

use itertools::Itertools;

/// Sort and de-duplicate in place.
pub fn normalize_vlan_ids(ids: &mut Vec<u16>) {
    // Dedup - must be sorted first
    ids.sort_unstable();
    ids.dedup();
}

/// Render ids as the comma-separated form accepted by
/// [`parse_vlan_list_csv`](crate::parsing::parse_vlan_list_csv).
pub fn format_vlan_list_csv(ids: &[u16]) -> String {
    ids.iter().join(",")
}
