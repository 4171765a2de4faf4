//! Reasons the drawing surface could not be set up.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure to acquire what the animation needs from the host page.
///
/// None of these are shown to the user: the background simply does not start.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// The page has no `window`, or it reports no usable size.
	#[error("no global window")]
	NoWindow,

	/// The canvas node has not been rendered yet.
	#[error("canvas element is not mounted")]
	CanvasMissing,

	/// The canvas refused to hand out a 2d context.
	#[error("2d rendering context unavailable")]
	ContextUnavailable,

	/// A browser call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_missing_piece() {
		assert_eq!(SurfaceError::NoWindow.to_string(), "no global window");
		assert_eq!(SurfaceError::CanvasMissing.to_string(), "canvas element is not mounted");
		assert_eq!(
			SurfaceError::ContextUnavailable.to_string(),
			"2d rendering context unavailable"
		);
		assert_eq!(
			SurfaceError::Js("boom".into()).to_string(),
			"javascript error: boom"
		);
	}
}
