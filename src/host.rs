//! Host/port normalisation for the startup banner.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Result, TerminalError};

/// Host strings that name the local machine but do not parse as URLs.
const LOOPBACK_ALIASES: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

/// A fully serialised URL plus the port it resolved to (empty when the
/// scheme default applies or no port was given).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    pub url: String,
    pub port: String,
}

/// Normalise `host` and an optional `port` into an `http`/`https` URL.
///
/// Loopback aliases that fail to parse are retried once as
/// `http://localhost`, so `127.0.0.1` is reported as `localhost`. Any other
/// scheme is replaced by `http`.
pub fn format_url(host: &str, port: Option<&str>) -> Result<HostInfo> {
    let url = match Url::parse(host) {
        Ok(url) => url,
        Err(err) if LOOPBACK_ALIASES.contains(&host) => {
            log::trace!("host '{host}' is a loopback alias ({err}), retrying as localhost");
            return format_url("http://localhost", port);
        }
        Err(err) => return Err(err.into()),
    };

    let mut url = force_http(url, host)?;

    if let Some(port) = port.and_then(parse_port) {
        if url.port() != Some(port) && url.set_port(Some(port)).is_err() {
            log::debug!("cannot set port {port} on '{url}'");
        }
    }

    Ok(HostInfo {
        port: url.port().map(|p| p.to_string()).unwrap_or_default(),
        url: url.into(),
    })
}

/// Dynamic entry point for hosts and ports that arrive as JSON values.
/// Ports may be numbers or strings; anything else is ignored, and so is a
/// numeric `0`. The string `"0"` is kept.
pub fn format_url_value(host: &Value, port: Option<&Value>) -> Result<HostInfo> {
    let Value::String(host) = host else {
        return Err(TerminalError::HostNotString);
    };

    let port = port.and_then(|p| match p {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    format_url(host, port.as_deref())
}

fn force_http(mut url: Url, input: &str) -> Result<Url> {
    if matches!(url.scheme(), "http" | "https") {
        return Ok(url);
    }
    if url.set_scheme("http").is_ok() {
        return Ok(url);
    }

    // `localhost:3000` parses as scheme `localhost` with path `3000`; the
    // whole input is really an authority.
    if is_bare_host_port(&url) {
        if let Ok(url) = Url::parse(&format!("http://{input}")) {
            return Ok(url);
        }
    }

    // Other schemes (`mailto:`, `data:`, `foo://`) cannot be switched in
    // place, so rebuild from the parsed parts without the old scheme.
    let mut rest = match url.host_str() {
        Some(host) => match url.port() {
            Some(port) => format!("//{host}:{port}{}", url.path()),
            None => format!("//{host}{}", url.path()),
        },
        None => url.path().to_string(),
    };
    if let Some(query) = url.query() {
        rest.push('?');
        rest.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        rest.push('#');
        rest.push_str(fragment);
    }

    match Url::parse(&format!("http:{rest}")) {
        Ok(url) => Ok(url),
        Err(err) => {
            log::debug!("cannot rebuild '{input}' as http ({err}), using localhost");
            Ok(Url::parse("http://localhost")?)
        }
    }
}

fn is_bare_host_port(url: &Url) -> bool {
    !url.has_host()
        && !url.path().is_empty()
        && url.path().chars().all(|c| c.is_ascii_digit())
}

/// Port strings behave like the URL port setter: leading digits are used,
/// anything unusable leaves the port alone. `"0"` is a real port.
fn parse_port(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());

    raw[..end].parse::<u16>().ok()
}
