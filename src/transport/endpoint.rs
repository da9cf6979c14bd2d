use url::Url;

use crate::utils::error::ClientError;

/// Resolves the WebSocket endpoint to connect to.
///
/// An explicit override takes precedence and must already be a `ws://` or
/// `wss://` URL. Otherwise the endpoint is derived from the configured
/// origin: the scheme is upgraded (`http` → `ws`, `https` → `wss`) and the
/// path set to `/ws`.
pub fn resolve_endpoint(explicit: Option<&str>, origin: &str) -> Result<String, ClientError> {
    if let Some(endpoint) = explicit {
        let url = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        return match url.scheme() {
            "ws" | "wss" => Ok(url.to_string()),
            other => Err(ClientError::InvalidEndpoint(format!(
                "unsupported scheme '{other}' in endpoint override {endpoint}"
            ))),
        };
    }

    let mut url =
        Url::parse(origin).map_err(|e| ClientError::InvalidEndpoint(format!("{origin}: {e}")))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ClientError::InvalidEndpoint(format!(
                "cannot derive websocket endpoint from '{other}' origin {origin}"
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| ClientError::InvalidEndpoint(format!("cannot upgrade scheme of {origin}")))?;
    url.set_path("/ws");
    Ok(url.to_string())
}
