//! Error types for the browser layer

use thiserror::Error;

/// Errors raised while talking to browser APIs
#[derive(Error, Debug)]
pub enum WebError {
    /// A browser API is missing (no window, storage disabled, ...)
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),

    /// A JavaScript call threw
    #[error("JavaScript error: {0}")]
    Js(String),

    /// Value could not be converted to or from JavaScript
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WebError {
    /// Error to report from a `KeyValueStore` implementation
    pub fn into_storage(self) -> buracos_core::Error {
        buracos_core::Error::Storage(self.to_string())
    }
}

impl From<WebError> for buracos_core::Error {
    fn from(error: WebError) -> Self {
        Self::Map(error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for WebError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_errors_become_map_errors() {
        let error: buracos_core::Error = WebError::Unavailable("document").into();
        assert!(matches!(error, buracos_core::Error::Map(ref msg) if msg.contains("document")));
    }

    #[test]
    fn test_storage_errors_keep_their_message() {
        let error = WebError::Js("QuotaExceededError".to_string()).into_storage();
        assert_eq!(
            error.to_string(),
            "Storage error: JavaScript error: QuotaExceededError"
        );
    }
}
