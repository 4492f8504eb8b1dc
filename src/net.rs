//! Host strings and IP addresses.

use std::cmp::Ordering;
use std::fmt;
use std::net::{AddrParseError, IpAddr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SqlError;
use crate::sql::{FromSqlValue, SqlValue, ToSqlValue};

/// Split `host:port` into its parts. IPv6 hosts must be bracketed, as in
/// `[::1]:80`; the brackets are removed. The port may be empty.
///
/// Returns `None` when there is no port separator, or the host part is
/// malformed.
pub fn split_host_port(hostport: &str) -> Option<(&str, &str)> {
    let colon = hostport.rfind(':')?;
    let port = &hostport[colon + 1..];

    let host = if let Some(rest) = hostport.strip_prefix('[') {
        let close = rest.find(']')?;
        // "]" must come right before the last colon.
        if close + 2 != colon {
            return None;
        }
        &rest[..close]
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return None;
        }
        host
    };

    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return None;
    }
    Some((host, port))
}

/// Remove the port from `host`, if it has one.
///
/// ```
/// use utilbelt::net::remove_port;
///
/// assert_eq!(remove_port("example.com:8080"), "example.com");
/// assert_eq!(remove_port("[::1]:80"), "::1");
/// assert_eq!(remove_port("::1"), "::1");
/// ```
pub fn remove_port(host: &str) -> &str {
    split_host_port(host).map_or(host, |(host, _)| host)
}

/// An IP address that orders IPv4 and IPv6 addresses together, by their
/// 16-byte (IPv4-mapped) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ip(pub IpAddr);

fn octets(ip: &IpAddr) -> [u8; 16] {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}

impl Ip {
    pub fn gte(&self, start: IpAddr) -> bool {
        octets(&self.0) >= octets(&start)
    }

    pub fn lte(&self, end: IpAddr) -> bool {
        octets(&self.0) <= octets(&end)
    }

    /// Whether the address lies within `start..=end`.
    pub fn in_range(&self, start: IpAddr, end: IpAddr) -> bool {
        self.gte(start) && self.lte(end)
    }
}

impl Ord for Ip {
    fn cmp(&self, other: &Self) -> Ordering {
        octets(&self.0).cmp(&octets(&other.0))
    }
}

impl PartialOrd for Ip {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<IpAddr> for Ip {
    fn from(ip: IpAddr) -> Self {
        Ip(ip)
    }
}

impl fmt::Display for Ip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Ip {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Ip)
    }
}

impl ToSqlValue for Ip {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError> {
        Ok(SqlValue::Text(self.to_string()))
    }
}

impl FromSqlValue for Ip {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        let kind = value.type_name();
        let text = match value.as_text() {
            Some(text) => text.into_owned(),
            None => return Err(SqlError::UnsupportedFormat(kind)),
        };
        text.parse()
            .map_err(|_| SqlError::InvalidIp { kind, value: text })
    }
}

impl Serialize for Ip {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ip {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
