//! Error taxonomy for the screen client.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal to the page. Transport failures feed the reconnect
//! loop, decode failures are dropped by the caller, and setup failures are
//! surfaced to the page script as a rejected entry point.

/// Errors raised while configuring or driving the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required page global was not injected before the script ran.
    #[error("page global `{name}` is not set")]
    MissingGlobal { name: &'static str },
    /// The transport refused to open or failed mid-stream.
    #[error("transport error: {0}")]
    Transport(String),
    /// A browser API call failed.
    #[error("browser api error: {0}")]
    Browser(String),
    /// A wire payload was not valid JSON for the expected shape.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(feature = "hydrate")]
impl ClientError {
    /// Wrap a thrown JS value as a browser error.
    pub(crate) fn from_js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(feature = "hydrate")]
impl From<ClientError> for wasm_bindgen::JsValue {
    fn from(err: ClientError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
