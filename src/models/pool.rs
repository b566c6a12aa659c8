//! Address pool model.

use super::Ipv4;
use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An inclusive range of dynamically assignable addresses.
///
/// Parsed from either of the two notations the server configuration accepts:
/// `"192.0.2.10 - 192.0.2.100"` or `"192.0.2.128/26"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    pub lo: Ipv4Addr,
    pub hi: Ipv4Addr,
}

impl Pool {
    pub fn new(lo: Ipv4Addr, hi: Ipv4Addr) -> Result<Pool> {
        if lo > hi {
            return Err(Error::InvalidPool(format!("{lo} - {hi}")));
        }
        Ok(Pool { lo, hi })
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.lo <= addr && addr <= self.hi
    }

    /// Number of addresses in the pool.
    pub fn size(&self) -> u64 {
        u64::from(u32::from(self.hi)) - u64::from(u32::from(self.lo)) + 1
    }
}

impl From<Ipv4> for Pool {
    fn from(prefix: Ipv4) -> Pool {
        Pool {
            lo: prefix.lo(),
            hi: prefix.hi(),
        }
    }
}

impl FromStr for Pool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Pool> {
        let s = s.trim();
        if s.contains('/') {
            let prefix = Ipv4::new(s).map_err(|_| Error::InvalidPool(s.to_string()))?;
            return Ok(Pool::from(prefix));
        }
        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidPool(s.to_string()))?;
        let lo: Ipv4Addr = lo
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPool(s.to_string()))?;
        let hi: Ipv4Addr = hi
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPool(s.to_string()))?;
        Pool::new(lo, hi)
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl Serialize for Pool {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pool {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Pool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pool::from_str(&s).map_err(de::Error::custom)
    }
}
