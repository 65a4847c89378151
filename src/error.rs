use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("browser global `{0}` is not available")]
    MissingGlobal(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("`{0}` is not an HtmlElement")]
    NotHtmlElement(String),
}

impl From<JsValue> for BehaviorError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<web_sys::js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        BehaviorError::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, BehaviorError>;
