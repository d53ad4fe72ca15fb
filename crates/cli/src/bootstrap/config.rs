use dns_proxy_domain::Configuration;
use std::path::Path;
use tracing::{info, warn};

pub fn load_config(config_path: &Path, validate: bool) -> anyhow::Result<Configuration> {
    let config = Configuration::load(config_path)?;

    if validate {
        config.validate()?;
    } else if config.min_ttl_seconds > config.max_ttl_seconds {
        warn!(
            min_ttl = config.min_ttl_seconds,
            max_ttl = config.max_ttl_seconds,
            "TTL bounds are inverted; maxTTLSeconds wins when clamping"
        );
    }

    info!(
        config_file = %config_path.display(),
        listen = %config.listen_address,
        remote_url = %config.remote_http_url,
        forward_domain = %config.forward_domain,
        forward_entries = config.forward_names_to_addresses.len(),
        reverse_domain = %config.reverse_domain,
        reverse_entries = config.reverse_addresses_to_names.len(),
        "Configuration loaded"
    );
    info!(
        min_ttl = config.min_ttl_seconds,
        max_ttl = config.max_ttl_seconds,
        max_cache_size = config.max_cache_size,
        timer_interval_secs = config.timer_interval_seconds,
        max_purges_per_timer_pop = config.max_purges_per_timer_pop,
        "Cache settings"
    );

    Ok(config)
}
