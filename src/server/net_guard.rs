use crate::error::{Result, StreamgateError};
use std::net::IpAddr;
use url::{Host, Url};

/// Validate a user-supplied fetch target before any request is made.
///
/// Only absolute `http`/`https` URLs with a public host pass. IP-literal
/// hosts are checked against loopback, private, link-local and unspecified
/// ranges; domain names pass without resolution (DNS rebinding stays a
/// known limitation without an async resolver).
///
/// # Errors
/// [`StreamgateError::InvalidTarget`] for relative or unparsable URLs,
/// non-HTTP schemes, hostless URLs and private/reserved addresses.
pub fn ensure_public_http_url(target: &str) -> Result<()> {
    let url = Url::parse(target)
        .map_err(|_| StreamgateError::InvalidTarget(format!("not a valid URL: {target}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(StreamgateError::InvalidTarget(format!(
            "scheme '{}' not allowed",
            url.scheme()
        )));
    }

    match url.host() {
        Some(Host::Ipv4(ip)) if !is_public(IpAddr::V4(ip)) => Err(
            StreamgateError::InvalidTarget(format!("non-public address not allowed: {ip}")),
        ),
        Some(Host::Ipv6(ip)) if !is_public(IpAddr::V6(ip)) => Err(
            StreamgateError::InvalidTarget(format!("non-public address not allowed: {ip}")),
        ),
        Some(_) => Ok(()),
        None => Err(StreamgateError::InvalidTarget(format!(
            "no host in URL: {target}"
        ))),
    }
}

/// Whether an IP literal is routable from the public internet.
fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.octets()[0] == 0)
        }
        IpAddr::V6(v6) => {
            let seg0 = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || (seg0 & 0xfe00) == 0xfc00    // fc00::/7 unique-local
                || (seg0 & 0xffc0) == 0xfe80) // fe80::/10 link-local
        }
    }
}
