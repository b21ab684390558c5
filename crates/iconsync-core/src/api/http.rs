//! Blocking HTTP GET over libcurl.

use std::time::Duration;

use super::error::ApiError;

/// Per-request limits. A request that exceeds them fails like any other transport error.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

/// GETs `url` with the given headers and returns the body.
///
/// Follows redirects. Non-2xx responses are `ApiError::Status`.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub(crate) fn get(
    url: &str,
    headers: &[(&str, &str)],
    opts: HttpOptions,
) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.accept_encoding("")?;

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::debug!(
            status = code,
            body = %String::from_utf8_lossy(&body[..body.len().min(256)]),
            "GET {} failed",
            url
        );
        return Err(ApiError::Status(code));
    }
    Ok(body)
}

/// Decodes a response body as UTF-8 text.
pub(crate) fn into_text(body: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(body).map_err(|e| ApiError::Decode(format!("body is not UTF-8: {}", e)))
}
