use crate::utils::error::{Result, VerifyError};
use std::net::{IpAddr, SocketAddr};
use url::Host;

pub const DNS_PORT: u16 = 53;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    if domain.trim().is_empty() {
        return Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Domain cannot be empty".to_string(),
        });
    }

    match Host::parse(domain) {
        Ok(Host::Domain(_)) => Ok(()),
        Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)) => Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Expected a domain name, not an IP address".to_string(),
        }),
        Err(e) => Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: format!("Invalid domain name: {}", e),
        }),
    }
}

pub fn validate_alphanumeric(field_name: &str, value: &str) -> Result<()> {
    if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Only ASCII letters and digits are allowed, found '{}'", c),
        });
    }
    Ok(())
}

pub fn validate_placeholder(field_name: &str, template: &str, placeholder: &str) -> Result<()> {
    if !template.contains(placeholder) {
        return Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Template must contain the {} placeholder", placeholder),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 解析 nameserver 位址，沒有指定 port 時使用 53
pub fn parse_nameserver(field_name: &str, value: &str) -> Result<SocketAddr> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }

    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|e| VerifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected an IP address with optional port: {}", e),
        })
}
