use serde::{de, Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::errors::ConfigError;
use super::local_records::{ForwardNameToAddress, ReverseAddressToName};
use super::null_as_default;
use super::server::HostAndPort;
use crate::validators::{
    validate_ip_address, validate_non_negative, validate_not_empty, validate_url,
};

/// DNS proxy configuration, loaded once at startup and shared read-only.
///
/// Every key is optional in the document: a missing key (or an explicit
/// `null`) leaves the field at its type's zero value. Unknown keys are
/// ignored. No semantic checks run during [`Configuration::load`]; callers
/// that want to fail fast call [`Configuration::validate`] afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    /// Where the proxy accepts client DNS requests
    #[serde(rename = "listenAddress", deserialize_with = "null_as_default")]
    pub listen_address: HostAndPort,

    /// Upstream resolver reached over HTTP(S), e.g. a DNS-over-HTTPS endpoint
    #[serde(rename = "remoteHTTPURL", deserialize_with = "null_as_default")]
    pub remote_http_url: String,

    #[serde(rename = "forwardDomain", deserialize_with = "null_as_default")]
    pub forward_domain: String,

    /// Static forward entries, kept in document order
    #[serde(rename = "forwardNamesToAddresses", deserialize_with = "null_as_default")]
    pub forward_names_to_addresses: Vec<ForwardNameToAddress>,

    #[serde(rename = "reverseDomain", deserialize_with = "null_as_default")]
    pub reverse_domain: String,

    /// Static reverse entries, kept in document order
    #[serde(rename = "reverseAddressesToNames", deserialize_with = "null_as_default")]
    pub reverse_addresses_to_names: Vec<ReverseAddressToName>,

    // Cache configuration
    #[serde(rename = "minTTLSeconds", deserialize_with = "null_as_default")]
    pub min_ttl_seconds: u32,
    #[serde(rename = "maxTTLSeconds", deserialize_with = "null_as_default")]
    pub max_ttl_seconds: u32,
    #[serde(rename = "maxCacheSize", deserialize_with = "null_as_default")]
    pub max_cache_size: i64,
    #[serde(rename = "timerIntervalSeconds", deserialize_with = "null_as_default")]
    pub timer_interval_seconds: i64,
    #[serde(rename = "maxPurgesPerTimerPop", deserialize_with = "null_as_default")]
    pub max_purges_per_timer_pop: i64,
}

impl Configuration {
    /// Read and deserialize the JSON configuration document at `path`.
    ///
    /// Fails with [`ConfigError::Read`] when the file cannot be read and with
    /// [`ConfigError::Parse`] when its content is not a well-formed document
    /// of the expected shape. Nothing is returned on failure.
    ///
    /// A key repeated in the same object takes its last value. Keys are
    /// matched exactly; a key differing only in case is ignored like any
    /// other unknown key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(config_file = %path.display(), "Reading configuration file");

        let source = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |source: serde_json::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        // Decoding through a `Value` keeps the last of repeated keys, and a
        // bare `null` document leaves every field at its zero value.
        let document: Value = serde_json::from_slice(&source).map_err(parse_error)?;
        let config = match document {
            Value::Null => Configuration::default(),
            document @ Value::Object(_) => {
                serde_json::from_value::<Configuration>(document).map_err(parse_error)?
            }
            _ => {
                return Err(parse_error(de::Error::custom(
                    "expected a JSON object at the top level",
                )))
            }
        };

        debug!(
            forward_entries = config.forward_names_to_addresses.len(),
            reverse_entries = config.reverse_addresses_to_names.len(),
            "Configuration parsed"
        );

        Ok(config)
    }

    /// Check cross-field invariants that loading leaves unchecked.
    ///
    /// All problems are collected and reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let mut check = |result: Result<(), String>| {
            if let Err(problem) = result {
                problems.push(problem);
            }
        };

        check(validate_not_empty(
            &self.listen_address.host,
            "listenAddress.host",
        ));
        check(validate_not_empty(
            &self.listen_address.port,
            "listenAddress.port",
        ));
        check(validate_url(&self.remote_http_url, "remoteHTTPURL"));

        if self.min_ttl_seconds > self.max_ttl_seconds {
            check(Err(format!(
                "minTTLSeconds ({}) must not exceed maxTTLSeconds ({})",
                self.min_ttl_seconds, self.max_ttl_seconds
            )));
        }

        check(validate_non_negative(self.max_cache_size, "maxCacheSize"));
        check(validate_non_negative(
            self.max_purges_per_timer_pop,
            "maxPurgesPerTimerPop",
        ));
        if self.timer_interval_seconds <= 0 {
            check(Err(format!(
                "timerIntervalSeconds must be positive (got {})",
                self.timer_interval_seconds
            )));
        }

        for (i, entry) in self.forward_names_to_addresses.iter().enumerate() {
            check(validate_not_empty(
                &entry.name,
                &format!("forwardNamesToAddresses[{i}].name"),
            ));
            check(validate_ip_address(
                &entry.ip_address,
                &format!("forwardNamesToAddresses[{i}].ipAddress"),
            ));
        }

        for (i, entry) in self.reverse_addresses_to_names.iter().enumerate() {
            check(validate_not_empty(
                &entry.reverse_address,
                &format!("reverseAddressesToNames[{i}].reverseAddress"),
            ));
            check(validate_not_empty(
                &entry.name,
                &format!("reverseAddressesToNames[{i}].name"),
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }

    /// Bound a record TTL to `[minTTLSeconds, maxTTLSeconds]`.
    ///
    /// With inverted bounds the maximum wins.
    pub fn clamp_ttl(&self, ttl: u32) -> u32 {
        ttl.max(self.min_ttl_seconds).min(self.max_ttl_seconds)
    }

    /// Period between cache purge sweeps. Negative values map to zero.
    pub fn timer_interval(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.timer_interval_seconds).unwrap_or(0))
    }

    pub fn max_cache_entries(&self) -> usize {
        usize::try_from(self.max_cache_size).unwrap_or(0)
    }

    pub fn max_purges_per_timer_pop(&self) -> usize {
        usize::try_from(self.max_purges_per_timer_pop).unwrap_or(0)
    }

    /// First forward entry matching `name`, either as written or qualified
    /// with the forward domain. Case-insensitive, trailing dot ignored.
    pub fn forward_address(&self, name: &str) -> Option<&ForwardNameToAddress> {
        let query = name.trim_end_matches('.');
        self.forward_names_to_addresses.iter().find(|entry| {
            entry.name.trim_end_matches('.').eq_ignore_ascii_case(query)
                || entry.fqdn(&self.forward_domain).eq_ignore_ascii_case(query)
        })
    }

    /// First reverse entry matching `address`, either as written or qualified
    /// with the reverse domain. Case-insensitive, trailing dot ignored.
    pub fn reverse_name(&self, address: &str) -> Option<&ReverseAddressToName> {
        let query = address.trim_end_matches('.');
        self.reverse_addresses_to_names.iter().find(|entry| {
            entry
                .reverse_address
                .trim_end_matches('.')
                .eq_ignore_ascii_case(query)
                || entry.fqdn(&self.reverse_domain).eq_ignore_ascii_case(query)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_config(min: u32, max: u32) -> Configuration {
        Configuration {
            min_ttl_seconds: min,
            max_ttl_seconds: max,
            ..Default::default()
        }
    }

    fn valid_config() -> Configuration {
        Configuration {
            listen_address: HostAndPort::new("127.0.0.1", "10053"),
            remote_http_url: "https://dns.google/resolve".to_string(),
            forward_domain: "home.lan".to_string(),
            forward_names_to_addresses: vec![ForwardNameToAddress::new("nas", "192.168.1.100")],
            reverse_domain: "168.192.in-addr.arpa".to_string(),
            reverse_addresses_to_names: vec![ReverseAddressToName::new(
                "100.1",
                "nas.home.lan",
            )],
            min_ttl_seconds: 60,
            max_ttl_seconds: 3600,
            max_cache_size: 10_000,
            timer_interval_seconds: 10,
            max_purges_per_timer_pop: 100,
        }
    }

    #[test]
    fn test_clamp_ttl_within_bounds() {
        let config = cache_config(60, 3600);
        assert_eq!(config.clamp_ttl(0), 60);
        assert_eq!(config.clamp_ttl(300), 300);
        assert_eq!(config.clamp_ttl(86_400), 3600);
    }

    #[test]
    fn test_clamp_ttl_inverted_bounds_max_wins() {
        let config = cache_config(300, 60);
        assert_eq!(config.clamp_ttl(0), 60);
        assert_eq!(config.clamp_ttl(120), 60);
        assert_eq!(config.clamp_ttl(1000), 60);
    }

    #[test]
    fn test_sizing_helpers_map_negatives_to_zero() {
        let config = Configuration {
            max_cache_size: -5,
            timer_interval_seconds: -1,
            max_purges_per_timer_pop: -10,
            ..Default::default()
        };

        assert_eq!(config.max_cache_entries(), 0);
        assert_eq!(config.timer_interval(), Duration::ZERO);
        assert_eq!(config.max_purges_per_timer_pop(), 0);
    }

    #[test]
    fn test_sizing_helpers() {
        let config = valid_config();
        assert_eq!(config.max_cache_entries(), 10_000);
        assert_eq!(config.timer_interval(), Duration::from_secs(10));
        assert_eq!(config.max_purges_per_timer_pop(), 100);
    }

    #[test]
    fn test_forward_address_matches_short_and_qualified_names() {
        let config = valid_config();

        assert_eq!(
            config.forward_address("nas").map(|e| e.ip_address.as_str()),
            Some("192.168.1.100")
        );
        assert!(config.forward_address("NAS.home.lan.").is_some());
        assert!(config.forward_address("printer.home.lan").is_none());
    }

    #[test]
    fn test_forward_address_first_match_wins() {
        let mut config = valid_config();
        config
            .forward_names_to_addresses
            .push(ForwardNameToAddress::new("nas", "192.168.1.200"));

        let entry = config.forward_address("nas.home.lan").unwrap();
        assert_eq!(entry.ip_address, "192.168.1.100");
    }

    #[test]
    fn test_reverse_name_lookup() {
        let config = valid_config();

        assert_eq!(
            config
                .reverse_name("100.1.168.192.in-addr.arpa.")
                .map(|e| e.name.as_str()),
            Some("nas.home.lan")
        );
        assert!(config.reverse_name("101.1.168.192.in-addr.arpa").is_none());
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_ttl_bounds() {
        let config = Configuration {
            min_ttl_seconds: 300,
            max_ttl_seconds: 60,
            ..valid_config()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("minTTLSeconds"));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut config = valid_config();
        config.listen_address.host.clear();
        config.max_cache_size = -1;
        config.timer_interval_seconds = 0;
        config.forward_names_to_addresses[0].ip_address = "not-an-ip".to_string();

        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("listenAddress.host"));
        assert!(message.contains("maxCacheSize"));
        assert!(message.contains("timerIntervalSeconds"));
        assert!(message.contains("forwardNamesToAddresses[0].ipAddress"));
    }

    #[test]
    fn test_validate_rejects_zero_config() {
        assert!(Configuration::default().validate().is_err());
    }
}
