//! IPv4 / IPv6 prefix value type.
//!
//! Provides [`Cidr`], an address plus prefix length, with parsing, ordering and
//! containment helpers shared by the arithmetic and validation code.

use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Bit length of an IPv4 address.
pub const IPV4_BITS: u8 = 32;
/// Bit length of an IPv6 address.
pub const IPV6_BITS: u8 = 128;

/// Number of address bits for the family of `addr`.
pub fn addr_bits(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => IPV4_BITS,
        IpAddr::V6(_) => IPV6_BITS,
    }
}

/// The 16-byte form used for cross-family ordering (IPv4 as IPv4-mapped IPv6).
pub fn normalized_octets(addr: IpAddr) -> [u8; 16] {
    match addr {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}

/// Clear every bit of `addr` after the first `len` bits.
pub fn cut_addr(addr: IpAddr, len: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let mask = u32::MAX.checked_shl(u32::from(IPV4_BITS - len)).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(bits & mask))
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let mask = u128::MAX.checked_shl(u32::from(IPV6_BITS - len)).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(bits & mask))
        }
    }
}

/// Address with a prefix length, e.g. `10.0.0.0/24` or `2001:db8::/32`.
///
/// The address may carry host bits; [`Cidr::network`] masks them away.
#[derive(Eq, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// The address as written.
    pub addr: IpAddr,
    /// Prefix length, 0..=32 for IPv4 and 0..=128 for IPv6.
    pub prefix: u8,
}

impl Cidr {
    /// Build a prefix, rejecting lengths longer than the address family allows.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Cidr> {
        if prefix > addr_bits(addr) {
            return Err(Error::parse(
                "CIDR",
                &format!("{addr}/{prefix}"),
                "network length is too long",
            ));
        }
        Ok(Cidr { addr, prefix })
    }

    /// True for an IPv4 prefix.
    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Address width of the family: 32 or 128.
    pub fn bits(&self) -> u8 {
        addr_bits(self.addr)
    }

    /// The masked base address.
    pub fn lo(&self) -> IpAddr {
        cut_addr(self.addr, self.prefix)
    }

    /// This prefix with host bits cleared.
    pub fn network(&self) -> Cidr {
        Cidr {
            addr: self.lo(),
            prefix: self.prefix,
        }
    }

    /// True when the written address has no host bits set.
    pub fn is_network_address(&self) -> bool {
        self.addr == self.lo()
    }

    /// True for /32 and /128.
    pub fn is_single_address(&self) -> bool {
        self.prefix == self.bits()
    }

    /// True when `addr` is of the same family and inside this prefix.
    pub fn contains_addr(&self, addr: IpAddr) -> bool {
        addr.is_ipv4() == self.is_ipv4() && cut_addr(addr, self.prefix) == self.lo()
    }

    /// True when `other` lies entirely inside this prefix (equal prefixes included).
    pub fn contains(&self, other: &Cidr) -> bool {
        other.prefix >= self.prefix && self.contains_addr(other.addr)
    }
}

impl FromStr for Cidr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Cidr> {
        let text = s.trim();
        let (addr, prefix) = text
            .split_once('/')
            .ok_or_else(|| Error::parse("CIDR", s, "expected address/prefix"))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| Error::parse("CIDR", s, format!("invalid address {addr}")))?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse("CIDR", s, format!("invalid prefix {prefix}")));
        }
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| Error::parse("CIDR", s, "network length is too long"))?;
        Cidr::new(addr, prefix).map_err(|_| Error::parse("CIDR", s, "network length is too long"))
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl PartialEq for Cidr {
    fn eq(&self, other: &Cidr) -> bool {
        self.addr == other.addr && self.prefix == other.prefix
    }
}

/// Masked base address as 16 bytes, then the supernet (shorter prefix) first.
impl Ord for Cidr {
    fn cmp(&self, other: &Cidr) -> Ordering {
        normalized_octets(self.lo())
            .cmp(&normalized_octets(other.lo()))
            .then(self.prefix.cmp(&other.prefix))
            .then_with(|| normalized_octets(self.addr).cmp(&normalized_octets(other.addr)))
            .then(other.is_ipv4().cmp(&self.is_ipv4()))
    }
}

impl PartialOrd for Cidr {
    fn partial_cmp(&self, other: &Cidr) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
