//! DNS Proxy Domain Layer
pub mod config;
pub mod validators;

pub use config::{
    ConfigError, Configuration, ForwardNameToAddress, HostAndPort, ReverseAddressToName,
};
