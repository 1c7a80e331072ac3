//! Host/port validators for component endpoints.

use crate::error::ContainerError;

/// Checks that a single host and a port are present.
///
/// # Errors
///
/// Returns `ContainerError::IncompleteHostPort` if `host` is absent or empty,
/// or if `port` is absent.
pub fn assert_host_and_port(
    component_name: &str,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<(), ContainerError> {
    match (host, port) {
        (Some(h), Some(_)) if !h.is_empty() => Ok(()),
        _ => Err(ContainerError::IncompleteHostPort {
            component_name: component_name.to_owned(),
            detail: format!("host: {} / port: {}", display(host), display(port)),
        }),
    }
}

/// Checks that a non-empty host list and a port are present.
///
/// # Errors
///
/// Returns `ContainerError::IncompleteHostPort` if `hosts` is absent or empty,
/// or if `port` is absent.
pub fn assert_hosts_and_port(
    component_name: &str,
    hosts: Option<&[String]>,
    port: Option<u16>,
) -> Result<(), ContainerError> {
    require_hosts_and_port(component_name, hosts, port).map(|_| ())
}

/// Same check as [`assert_hosts_and_port`], returning the validated port.
///
/// # Errors
///
/// Returns `ContainerError::IncompleteHostPort` if `hosts` is absent or empty,
/// or if `port` is absent.
pub fn require_hosts_and_port(
    component_name: &str,
    hosts: Option<&[String]>,
    port: Option<u16>,
) -> Result<u16, ContainerError> {
    match (hosts, port) {
        (Some(h), Some(p)) if !h.is_empty() => Ok(p),
        _ => Err(ContainerError::IncompleteHostPort {
            component_name: component_name.to_owned(),
            detail: format!(
                "hosts: {} / port: {}",
                hosts.map_or_else(|| "null".to_owned(), |h| format!("[{}]", h.join(", "))),
                display(port)
            ),
        }),
    }
}

fn display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_owned(), |v| v.to_string())
}
