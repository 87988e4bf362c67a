//! Identifier and text-field parsing.
//!
//! Everything the entry forms hand over as text goes through here: ids, VLAN
//! lists, tagged modes and hardware addresses. Also home to the natural-order
//! comparison and the stable record keys derived from addresses.

use crate::error::{Error, Result};
use crate::models::{Cidr, TaggedVlanMode};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::net::IpAddr;

/// Lowest valid 802.1Q VLAN id.
pub const MIN_VLAN_ID: u16 = 1;
/// Highest valid 802.1Q VLAN id.
pub const MAX_VLAN_ID: u16 = 4094;

lazy_static! {
    static ref MAC_COLON: Regex =
        Regex::new(r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2})+$").expect("Invalid Regex?");
    static ref MAC_DOTTED: Regex =
        Regex::new(r"^[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4})+$").expect("Invalid Regex?");
    static ref HOSTNAME: Regex = Regex::new(
        r"^(?i)[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9])?(?:\.[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9])?)*\.?$"
    )
    .expect("Invalid Regex?");
}

/// Parse a strictly positive integer id such as a port number.
pub fn parse_positive_int_id(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| Error::parse("id", text, "not an integer"))?;
    if value < 1 {
        return Err(Error::parse("id", text, "must be at least 1"));
    }
    u32::try_from(value).map_err(|_| Error::parse("id", text, "too large"))
}

/// Parse a single VLAN id and check it is in 1..=4094.
pub fn parse_vlan_id(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| Error::parse("VLAN id", text, "not an integer"))?;
    if value < i64::from(MIN_VLAN_ID) || value > i64::from(MAX_VLAN_ID) {
        return Err(Error::parse(
            "VLAN id",
            text,
            format!("must be between {MIN_VLAN_ID} and {MAX_VLAN_ID}"),
        ));
    }
    Ok(value as u16)
}

/// Parse a comma-separated VLAN list. Duplicates are kept; empty input is an empty list.
pub fn parse_vlan_list_csv(text: &str) -> Result<Vec<u16>> {
    if text.trim().is_empty() {
        return Ok(vec![]);
    }
    text.split(',').map(parse_vlan_id).collect()
}

/// Empty input means "unset" and yields 0.
pub fn parse_optional_vlan_id(text: &str) -> Result<u16> {
    if text.trim().is_empty() {
        return Ok(0);
    }
    parse_vlan_id(text)
}

/// Empty input means "unset" and yields 0.
pub fn parse_optional_int_field(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| Error::parse("integer", text, "not a non-negative integer"))
}

/// Case-insensitive tagged-mode lookup. Unknown text maps to [`TaggedVlanMode::None`].
pub fn parse_tagged_mode(text: &str) -> TaggedVlanMode {
    match text.trim().to_ascii_lowercase().as_str() {
        "allowall" => TaggedVlanMode::AllowAll,
        "blockall" => TaggedVlanMode::BlockAll,
        "custom" => TaggedVlanMode::Custom,
        _ => TaggedVlanMode::None,
    }
}

/// Parse a 6, 8 or 20 octet hardware address.
///
/// Accepts `00:11:22:33:44:55`, `00-11-22-33-44-55` and `0011.2233.4455`.
pub fn parse_mac_address(text: &str) -> Result<Vec<u8>> {
    let s = text.trim();
    let digits: String = if MAC_COLON.is_match(s) {
        let sep = s.as_bytes()[2];
        if s.bytes().filter(|b| *b == b':' || *b == b'-').any(|b| b != sep) {
            return Err(Error::parse("MAC address", text, "mixed separators"));
        }
        s.chars().filter(char::is_ascii_hexdigit).collect()
    } else if MAC_DOTTED.is_match(s) {
        s.chars().filter(char::is_ascii_hexdigit).collect()
    } else {
        return Err(Error::parse("MAC address", text, "invalid syntax"));
    };
    let bytes = hex::decode(&digits).map_err(|e| Error::parse("MAC address", text, e))?;
    match bytes.len() {
        6 | 8 | 20 => Ok(bytes),
        n => Err(Error::parse(
            "MAC address",
            text,
            format!("{n} octets, expected 6, 8 or 20"),
        )),
    }
}

/// Hostname / FQDN shape check: dot-separated labels, optional trailing dot.
pub fn is_valid_hostname(text: &str) -> bool {
    text.len() <= 253 && HOSTNAME.is_match(text)
}

/// Case-insensitive compare treating runs of digits as numbers, so `port9` < `port10`.
///
/// Runs with the same value compare the more zero-padded one as larger. Strings
/// that tie under these rules fall back to a literal comparison, so the order is
/// total.
pub fn compare_natural_number_order(a: &str, b: &str) -> Ordering {
    let left: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let right: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if left[i].is_ascii_digit() && right[j].is_ascii_digit() {
            let end_i = digit_run_end(&left, i);
            let end_j = digit_run_end(&right, j);
            let ord = compare_digit_runs(&left[i..end_i], &right[j..end_j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i = end_i;
            j = end_j;
            continue;
        }
        match left[i].cmp(&right[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            ord => return ord,
        }
    }

    (left.len() - i)
        .cmp(&(right.len() - j))
        .then_with(|| a.cmp(b))
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |p| start + p)
}

fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let zeros_a = a.iter().take_while(|c| **c == '0').count();
    let zeros_b = b.iter().take_while(|c| **c == '0').count();
    let (value_a, value_b) = (&a[zeros_a..], &b[zeros_b..]);
    value_a
        .len()
        .cmp(&value_b.len())
        .then_with(|| value_a.cmp(value_b))
        .then(zeros_a.cmp(&zeros_b))
        .then(a.len().cmp(&b.len()))
}

/// Stable record key for a network: masked address bytes in hex plus `_<prefix>`.
///
/// ```
/// use ipam_catalog::parsing::cidr_to_identifier;
/// let cidr = "10.1.2.3/16".parse().unwrap();
/// assert_eq!(cidr_to_identifier(&cidr), "0a010000_16");
/// ```
pub fn cidr_to_identifier(cidr: &Cidr) -> String {
    format!("{}_{}", ip_to_identifier(cidr.lo()), cidr.prefix)
}

/// Stable record key for a reserved address: its raw bytes in hex.
pub fn ip_to_identifier(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => hex::encode(v4.octets()),
        IpAddr::V6(v6) => hex::encode(v6.octets()),
    }
}
