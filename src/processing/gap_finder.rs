//! Finding unused space inside a network.
//!
//! Walks the children of a block in address order and emits the largest
//! aligned prefixes that fit in each gap.

use super::arithmetic::{bigint_to_addr, ip_to_bigint, last_addr};
use crate::models::Cidr;
use num_bigint::BigUint;
use num_traits::One;

/// Unused aligned blocks of `parent`, ascending.
///
/// Children outside `parent` or of the other family are ignored; overlapping
/// children are tolerated.
pub fn find_free_blocks(parent: &Cidr, children: &[Cidr]) -> Vec<Cidr> {
    let parent = parent.network();
    let mut used: Vec<Cidr> = children
        .iter()
        .filter(|c| parent.contains(c))
        .map(Cidr::network)
        .collect();
    used.sort();

    let mut free = Vec::new();
    let mut next = ip_to_bigint(parent.lo());
    for child in &used {
        let lo = ip_to_bigint(child.lo());
        fill_gap(&mut free, &next, &lo, parent.is_ipv4());
        let after = ip_to_bigint(last_addr(child)) + BigUint::one();
        if after > next {
            next = after;
        }
    }
    let end = ip_to_bigint(last_addr(&parent)) + BigUint::one();
    fill_gap(&mut free, &next, &end, parent.is_ipv4());
    log::debug!("{parent}: {} used, {} free blocks", used.len(), free.len());
    free
}

/// Cover `[start, stop)` with the biggest blocks the alignment of each start allows.
fn fill_gap(free: &mut Vec<Cidr>, start: &BigUint, stop: &BigUint, is_ipv4: bool) {
    let bits: u64 = if is_ipv4 { 32 } else { 128 };
    let mut cursor = start.clone();
    while &cursor < stop {
        // Alignment of the start address limits the block size
        let mut host_bits = cursor.trailing_zeros().unwrap_or(bits).min(bits);
        let remaining = stop - &cursor;
        while (BigUint::one() << host_bits) > remaining {
            host_bits -= 1;
        }
        free.push(Cidr {
            addr: bigint_to_addr(&cursor, is_ipv4),
            prefix: (bits - host_bits) as u8,
        });
        cursor += BigUint::one() << host_bits;
    }
}
