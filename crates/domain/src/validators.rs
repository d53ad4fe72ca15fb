use std::net::IpAddr;

pub fn validate_not_empty(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    Ok(())
}

pub fn validate_url(url: &str, field: &str) -> Result<(), String> {
    validate_not_empty(url, field)?;
    if url.len() > 2048 {
        return Err(format!("{field} cannot exceed 2048 characters"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    Ok(())
}

pub fn validate_ip_address(ip: &str, field: &str) -> Result<(), String> {
    ip.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| format!("{field} is not a valid IP address: {ip:?}"))
}

pub fn validate_non_negative(value: i64, field: &str) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{field} cannot be negative (got {value})"));
    }
    Ok(())
}
