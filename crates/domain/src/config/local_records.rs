use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, IpAddr};

use super::null_as_default;

/// Static forward override: answers queries for `name` with `ip_address`.
///
/// The address is kept as written in the document. It is only parsed when a
/// consumer asks for it (see [`ForwardNameToAddress::ip_addr`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardNameToAddress {
    /// Hostname, relative to the forward domain or fully qualified
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// IPv4 or IPv6 literal, e.g. "192.168.1.100" or "2001:db8::1"
    #[serde(rename = "ipAddress", deserialize_with = "null_as_default")]
    pub ip_address: String,
}

impl ForwardNameToAddress {
    pub fn new(name: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address: ip_address.into(),
        }
    }

    pub fn ip_addr(&self) -> Result<IpAddr, AddrParseError> {
        self.ip_address.parse()
    }

    /// Qualify the entry name with the forward domain.
    ///
    /// # Examples
    /// ```
    /// use dns_proxy_domain::ForwardNameToAddress;
    ///
    /// let entry = ForwardNameToAddress::new("nas", "192.168.1.100");
    /// assert_eq!(entry.fqdn("home.lan"), "nas.home.lan");
    /// assert_eq!(entry.fqdn(""), "nas");
    /// ```
    pub fn fqdn(&self, forward_domain: &str) -> String {
        qualify(&self.name, forward_domain)
    }
}

/// Static reverse override: answers PTR queries for `reverse_address`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReverseAddressToName {
    /// Reverse-lookup label, e.g. "100.1" under "168.192.in-addr.arpa"
    #[serde(rename = "reverseAddress", deserialize_with = "null_as_default")]
    pub reverse_address: String,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

impl ReverseAddressToName {
    pub fn new(reverse_address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            reverse_address: reverse_address.into(),
            name: name.into(),
        }
    }

    pub fn fqdn(&self, reverse_domain: &str) -> String {
        qualify(&self.reverse_address, reverse_domain)
    }
}

fn qualify(label: &str, domain: &str) -> String {
    let domain = domain.trim_matches('.');
    if domain.is_empty() {
        label.to_string()
    } else {
        format!("{}.{}", label.trim_end_matches('.'), domain)
    }
}
