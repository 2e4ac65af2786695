//! HTTP client wrapper for talking to the geocoding service.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("geocoder/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Open a response stream for a URL.
///
/// The body is not buffered: the returned response implements
/// [`std::io::Read`] and is meant to be handed to the XML parser. Requests
/// are sent once; HTTP error statuses are reported as failures.
pub fn open_stream(client: &Client, url: &str) -> Result<Response> {
    tracing::debug!(url = %redact_key(url), "Requesting");

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = %status, "Geocoder service answered with HTTP error");
    }
    Ok(response.error_for_status()?)
}

/// Replace the value of the `key` query parameter for logging.
fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(pos) if url[..pos].ends_with(['?', '&']) => {
            let start = pos + "key=".len();
            let end = url[start..].find('&').map_or(url.len(), |i| start + i);
            format!("{}***{}", &url[..start], &url[end..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("http://host/geo?output=xml&key=secret"),
            "http://host/geo?output=xml&key=***"
        );
        assert_eq!(
            redact_key("http://host/geo?key=secret&output=xml"),
            "http://host/geo?key=***&output=xml"
        );
        assert_eq!(redact_key("http://host/geo?q=x"), "http://host/geo?q=x");
    }
}
