use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why the drawing surface could not be used.
#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("canvas has no 2d context")]
	MissingContext,
	#[error("2d context is not a CanvasRenderingContext2d")]
	NotCanvas2d,
	#[error("browser error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
