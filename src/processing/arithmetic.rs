//! Prefix arithmetic on arbitrary-precision integers.
//!
//! Addresses are converted to [`BigUint`] so IPv4 and IPv6 share one code path
//! and spans as large as `::/0` (2^128 addresses) never overflow.

use crate::error::{Error, Result};
use crate::models::Cidr;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::Range;

/// Upper bound on the number of subnets a single split may produce.
pub const MAX_SPLIT_SUBNETS: usize = 1024;

/// Address as an unsigned integer.
pub fn ip_to_bigint(addr: IpAddr) -> BigUint {
    match addr {
        IpAddr::V4(v4) => BigUint::from_bytes_be(&v4.octets()),
        IpAddr::V6(v6) => BigUint::from_bytes_be(&v6.octets()),
    }
}

/// Integer back to an address of the requested family.
///
/// Short values are zero-padded on the left; values wider than the family keep
/// their low-order bytes.
pub fn bigint_to_addr(n: &BigUint, is_ipv4: bool) -> IpAddr {
    let bytes = n.to_bytes_be();
    if is_ipv4 {
        IpAddr::V4(Ipv4Addr::from(fit_bytes::<4>(&bytes)))
    } else {
        IpAddr::V6(Ipv6Addr::from(fit_bytes::<16>(&bytes)))
    }
}

fn fit_bytes<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let take = bytes.len().min(N);
    out[N - take..].copy_from_slice(&bytes[bytes.len() - take..]);
    out
}

/// Number of addresses in a prefix: `2^(bits - prefix)`.
pub fn block_size(cidr: &Cidr) -> BigUint {
    BigUint::one() << usize::from(cidr.bits() - cidr.prefix)
}

/// Highest address inside the prefix.
pub fn last_addr(cidr: &Cidr) -> IpAddr {
    let last = ip_to_bigint(cidr.lo()) + block_size(cidr) - BigUint::one();
    bigint_to_addr(&last, cidr.is_ipv4())
}

/// Split `cidr` into equal subnets of length `new_prefix`, in address order.
///
/// `None` (or `Some(0)`) means one bit longer than the original.
pub fn split_network(cidr: &str, new_prefix: Option<u8>) -> Result<Vec<Cidr>> {
    let network: Cidr = cidr.parse()?;
    let network = network.network();
    let new_prefix = match new_prefix {
        None | Some(0) => network.prefix.saturating_add(1),
        Some(p) => p,
    };
    let split_err = |reason: String| Error::Split {
        cidr: network.to_string(),
        reason,
    };

    if new_prefix <= network.prefix {
        return Err(split_err(format!(
            "new prefix /{new_prefix} must be longer than /{}",
            network.prefix
        )));
    }
    if new_prefix > network.bits() {
        return Err(split_err(format!(
            "new prefix /{new_prefix} exceeds {} bits",
            network.bits()
        )));
    }
    let extra_bits = new_prefix - network.prefix;
    if extra_bits > 10 || (1usize << extra_bits) > MAX_SPLIT_SUBNETS {
        return Err(split_err(format!(
            "would create 2^{extra_bits} subnets, limit is {MAX_SPLIT_SUBNETS}"
        )));
    }

    let count = 1usize << extra_bits;
    let step = BigUint::one() << usize::from(network.bits() - new_prefix);
    let mut cursor = ip_to_bigint(network.addr);
    let mut subnets = Vec::with_capacity(count);
    for _ in 0..count {
        subnets.push(Cidr {
            addr: bigint_to_addr(&cursor, network.is_ipv4()),
            prefix: new_prefix,
        });
        cursor += &step;
    }
    log::debug!("split {network} into {count} x /{new_prefix}");
    Ok(subnets)
}

/// Merge prefixes that exactly tile one aligned power-of-two block.
///
/// Fails on empty input, mixed families, unparsable entries, gaps, or a tiled
/// span that is not a single aligned prefix.
pub fn summarize_cidrs<S: AsRef<str>>(cidrs: &[S]) -> Result<Cidr> {
    let fail = |reason: String| Error::Summarize { reason };
    if cidrs.is_empty() {
        return Err(fail("no networks given".to_string()));
    }

    let mut ranges: Vec<(BigUint, BigUint)> = Vec::with_capacity(cidrs.len());
    let mut is_ipv4 = None;
    for text in cidrs {
        let cidr: Cidr = text.as_ref().parse()?;
        match is_ipv4 {
            None => is_ipv4 = Some(cidr.is_ipv4()),
            Some(v4) if v4 != cidr.is_ipv4() => {
                return Err(fail("mixed IPv4 and IPv6 networks".to_string()));
            }
            Some(_) => {}
        }
        let start = ip_to_bigint(cidr.lo());
        let end = ip_to_bigint(last_addr(&cidr));
        ranges.push((start, end));
    }
    let is_ipv4 = is_ipv4.unwrap_or(true);
    let bits: u64 = if is_ipv4 { 32 } else { 128 };

    ranges.sort_by(|a, b| a.0.cmp(&b.0));
    let min_addr = ranges[0].0.clone();
    let mut cursor = min_addr.clone();
    let mut max_end = ranges[0].1.clone();
    for (start, end) in &ranges {
        if *start > cursor {
            return Err(fail(format!(
                "gap before {}",
                bigint_to_addr(start, is_ipv4)
            )));
        }
        let next = end + BigUint::one();
        if next > cursor {
            cursor = next;
        }
        if *end > max_end {
            max_end = end.clone();
        }
    }
    if cursor != &max_end + BigUint::one() {
        return Err(fail("ranges do not tile one span".to_string()));
    }

    let total = cursor - &min_addr;
    if total.count_ones() != 1 {
        return Err(fail(format!("{total} addresses is not a power of two")));
    }
    if !(&min_addr % &total).is_zero() {
        return Err(fail(format!(
            "{} is not aligned to a block of {total}",
            bigint_to_addr(&min_addr, is_ipv4)
        )));
    }
    let host_bits = total.bits() - 1;
    let prefix = u8::try_from(bits - host_bits)
        .map_err(|_| fail("prefix out of range".to_string()))?;
    let summary = Cidr {
        addr: bigint_to_addr(&min_addr, is_ipv4),
        prefix,
    };
    log::debug!("summarized {} networks into {summary}", cidrs.len());
    Ok(summary)
}

/// Find the largest window of sorted siblings around `focus` that summarizes.
///
/// Windows shrink from the whole list down to two entries; for equal sizes the
/// lowest start index wins. Returns the window and its summary.
pub fn find_summarizable_range<S: AsRef<str>>(
    cidrs: &[S],
    focus: usize,
) -> Option<(Range<usize>, Cidr)> {
    let n = cidrs.len();
    if focus >= n {
        return None;
    }
    for size in (2..=n).rev() {
        let first = (focus + 1).saturating_sub(size);
        let last = focus.min(n - size);
        for start in first..=last {
            let window = start..start + size;
            match summarize_cidrs(&cidrs[window.clone()]) {
                Ok(summary) => return Some((window, summary)),
                Err(e) => log::trace!("window {window:?} rejected: {e}"),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cidrs: &[Cidr]) -> Vec<String> {
        cidrs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_bigint_round_trip() {
        let v4: IpAddr = "10.1.2.3".parse().unwrap();
        assert_eq!(bigint_to_addr(&ip_to_bigint(v4), true), v4);
        let v6: IpAddr = "2001:db8::ff".parse().unwrap();
        assert_eq!(bigint_to_addr(&ip_to_bigint(v6), false), v6);
        // The family flag decides how small values are read.
        let small = BigUint::from(1u32);
        assert_eq!(bigint_to_addr(&small, true).to_string(), "0.0.0.1");
        assert_eq!(bigint_to_addr(&small, false).to_string(), "::1");
        // Wide values keep their low bytes.
        let wide = BigUint::from(0x1_0a00_0001u64);
        assert_eq!(bigint_to_addr(&wide, true).to_string(), "10.0.0.1");
    }

    #[test]
    fn test_last_addr() {
        let c: Cidr = "10.0.0.0/24".parse().unwrap();
        assert_eq!(last_addr(&c).to_string(), "10.0.0.255");
        let c: Cidr = "10.0.0.77/32".parse().unwrap();
        assert_eq!(last_addr(&c).to_string(), "10.0.0.77");
        let c: Cidr = "0.0.0.0/0".parse().unwrap();
        assert_eq!(last_addr(&c).to_string(), "255.255.255.255");
        let c: Cidr = "2001:db8::/32".parse().unwrap();
        assert_eq!(last_addr(&c).to_string(), "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_split_into_four() {
        let subnets = split_network("10.0.0.0/24", Some(26)).unwrap();
        assert_eq!(
            strings(&subnets),
            vec![
                "10.0.0.0/26",
                "10.0.0.64/26",
                "10.0.0.128/26",
                "10.0.0.192/26"
            ]
        );
    }

    #[test]
    fn test_split_default_prefix() {
        let subnets = split_network("10.0.0.0/24", None).unwrap();
        assert_eq!(strings(&subnets), vec!["10.0.0.0/25", "10.0.0.128/25"]);
        let subnets = split_network("2001:db8::/32", Some(0)).unwrap();
        assert_eq!(strings(&subnets), vec!["2001:db8::/33", "2001:db8:8000::/33"]);
    }

    #[test]
    fn test_split_rejects() {
        assert!(split_network("10.0.0.0/24", Some(24)).is_err());
        assert!(split_network("10.0.0.0/24", Some(16)).is_err());
        assert!(split_network("10.0.0.0/24", Some(33)).is_err());
        assert!(split_network("10.0.0.0/32", None).is_err());
        assert!(split_network("bogus", None).is_err());
        // 2^16 subnets is over the limit.
        assert!(matches!(
            split_network("10.0.0.0/8", Some(24)),
            Err(Error::Split { .. })
        ));
        assert_eq!(split_network("10.0.0.0/8", Some(18)).unwrap().len(), 1024);
        assert!(split_network("10.0.0.0/8", Some(19)).is_err());
    }

    #[test]
    fn test_split_then_summarize() {
        for (net, prefix) in [
            ("10.0.0.0/24", 26),
            ("172.16.0.0/12", 20),
            ("192.168.10.0/31", 32),
            ("2001:db8::/48", 56),
            ("::/0", 3),
        ] {
            let parts = strings(&split_network(net, Some(prefix)).unwrap());
            assert_eq!(summarize_cidrs(&parts).unwrap().to_string(), net);
        }
    }

    #[test]
    fn test_summarize_contiguous() {
        let s = summarize_cidrs(&["10.0.0.0/25", "10.0.0.128/25"]).unwrap();
        assert_eq!(s.to_string(), "10.0.0.0/24");
        // Input order does not matter.
        let s = summarize_cidrs(&["10.0.0.128/25", "10.0.0.0/25"]).unwrap();
        assert_eq!(s.to_string(), "10.0.0.0/24");
        // Unequal sizes that still tile a block.
        let s = summarize_cidrs(&["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/26"]).unwrap();
        assert_eq!(s.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_summarize_rejects() {
        assert!(summarize_cidrs::<&str>(&[]).is_err());
        assert!(summarize_cidrs(&["10.0.0.0/25", "10.0.1.0/25"]).is_err());
        assert!(summarize_cidrs(&["10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]).is_err());
        // Power of two but misaligned.
        assert!(summarize_cidrs(&["10.0.0.64/26", "10.0.0.128/26"]).is_err());
        assert!(summarize_cidrs(&["10.0.0.0/25", "2001:db8::/33"]).is_err());
        assert!(matches!(
            summarize_cidrs(&["10.0.0.0/25", "junk"]),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_summarize_whole_ipv6_space() {
        let s = summarize_cidrs(&["::/1", "8000::/1"]).unwrap();
        assert_eq!(s.to_string(), "::/0");
    }

    #[test]
    fn test_find_summarizable_range() {
        let siblings = [
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.0.128/26",
            "10.0.0.192/26",
            "10.0.2.0/24",
        ];
        let (range, summary) = find_summarizable_range(&siblings, 1).unwrap();
        assert_eq!(range, 0..4);
        assert_eq!(summary.to_string(), "10.0.0.0/24");

        // The trailing /24 sits behind a gap.
        assert!(find_summarizable_range(&siblings, 4).is_none());

        // Lower start wins among equal sizes.
        let (range, summary) = find_summarizable_range(&siblings[..3], 1).unwrap();
        assert_eq!(range, 0..2);
        assert_eq!(summary.to_string(), "10.0.0.0/25");

        let (range, _) = find_summarizable_range(&siblings, 2).unwrap();
        assert_eq!(range, 0..4);
        assert!(find_summarizable_range(&siblings, 9).is_none());
        assert!(find_summarizable_range(&siblings[..1], 0).is_none());
    }
}
