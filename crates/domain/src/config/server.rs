use serde::{Deserialize, Serialize};
use std::fmt;

use super::null_as_default;

/// Network endpoint the proxy binds to.
///
/// `port` is kept as text so service names (e.g. "domain") survive a load
/// and reach the socket layer unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostAndPort {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,

    #[serde(deserialize_with = "null_as_default")]
    pub port: String,
}

impl HostAndPort {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// Combine host and port into a single "host:port" string.
    ///
    /// Hosts containing a colon (IPv6 literals) are wrapped in brackets.
    ///
    /// # Examples
    /// ```
    /// use dns_proxy_domain::HostAndPort;
    ///
    /// assert_eq!(HostAndPort::new("127.0.0.1", "53").join_host_port(), "127.0.0.1:53");
    /// assert_eq!(HostAndPort::new("2001:db8::1", "53").join_host_port(), "[2001:db8::1]:53");
    /// assert_eq!(HostAndPort::new("localhost", "domain").join_host_port(), "localhost:domain");
    /// ```
    pub fn join_host_port(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.port.is_empty()
    }
}

impl fmt::Display for HostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_host_port())
    }
}
