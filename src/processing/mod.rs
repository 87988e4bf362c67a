//! Address and VLAN-list processing.
//!
//! Pure functions used by validation and by outer layers:
//! - [`arithmetic`] - big-integer address math, splitting and summarizing
//! - [`gap_finder`] - unused space inside a network
//! - [`dedup`] - VLAN-id list normalization

pub mod arithmetic;
mod dedup;
mod gap_finder;

// Re-export public functions
pub use arithmetic::{
    bigint_to_addr, block_size, find_summarizable_range, ip_to_bigint, last_addr, split_network,
    summarize_cidrs, MAX_SPLIT_SUBNETS,
};
pub use dedup::{format_vlan_list_csv, normalize_vlan_ids};
pub use gap_finder::find_free_blocks;
