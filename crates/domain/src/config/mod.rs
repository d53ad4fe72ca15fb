//! Configuration module for the DNS proxy
//!
//! This module contains the configuration model and its load path:
//! - `root`: The `Configuration` aggregate, loader and consumer helpers
//! - `server`: Listen endpoint (`HostAndPort`)
//! - `local_records`: Static forward and reverse overrides
//! - `errors`: Configuration errors

pub mod errors;
pub mod local_records;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use local_records::{ForwardNameToAddress, ReverseAddressToName};
pub use root::Configuration;
pub use server::HostAndPort;

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing key: the field keeps its zero value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
