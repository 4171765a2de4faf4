//! Drawing surface abstraction and the adapter that tracks its size and theme.
//!
//! The per-frame code only talks to [`Surface`]; the browser implementation is
//! a thin mapping onto `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::error::SurfaceError;
use super::theme::{Color, Palette, ThemeMode};

/// Fill or stroke source for a drawing call.
#[derive(Clone, Copy, Debug)]
pub enum Paint<'a> {
	/// A single colour.
	Solid(Color),
	/// Circular gradient around `(x, y)`, from radius `r0` to `r1`.
	Radial {
		/// Centre x.
		x: f64,
		/// Centre y.
		y: f64,
		/// Inner radius.
		r0: f64,
		/// Outer radius.
		r1: f64,
		/// Offsets in `[0, 1]` with their colours.
		stops: &'a [(f64, Color)],
	},
	/// Gradient along the segment `(x0, y0)` to `(x1, y1)`.
	Linear {
		/// Start x.
		x0: f64,
		/// Start y.
		y0: f64,
		/// End x.
		x1: f64,
		/// End y.
		y1: f64,
		/// Offsets in `[0, 1]` with their colours.
		stops: &'a [(f64, Color)],
	},
}

impl Paint<'_> {
	/// Colour used when a gradient cannot be built.
	pub fn fallback(&self) -> Color {
		match self {
			Paint::Solid(c) => *c,
			Paint::Radial { stops, .. } | Paint::Linear { stops, .. } => stops
				.first()
				.map(|(_, c)| *c)
				.unwrap_or(Color::rgba(0, 0, 0, 0.0)),
		}
	}
}

/// The 2D primitives the particle field draws with.
pub trait Surface {
	/// Fills an axis-aligned rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);
	/// Fills a full circle.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);
	/// Strokes a straight segment.
	fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, paint: &Paint);
	/// Blurred shadow applied to subsequent fills and strokes.
	fn set_shadow(&mut self, blur: f64, color: Color);
	/// Turns the shadow off.
	fn clear_shadow(&mut self);
}

fn apply_stops(gradient: &web_sys::CanvasGradient, stops: &[(f64, Color)]) -> bool {
	stops
		.iter()
		.all(|(offset, color)| gradient.add_color_stop(*offset as f32, &color.to_css()).is_ok())
}

/// Resolves a [`Paint`] into canvas fill/stroke state.
trait CanvasPaint {
	fn use_fill(&self, paint: &Paint);
	fn use_stroke(&self, paint: &Paint);
}

impl CanvasPaint for CanvasRenderingContext2d {
	fn use_fill(&self, paint: &Paint) {
		match gradient_for(self, paint) {
			Some(gradient) => {
				#[allow(deprecated)]
				self.set_fill_style(&gradient);
			}
			None => self.set_fill_style_str(&paint.fallback().to_css()),
		}
	}

	fn use_stroke(&self, paint: &Paint) {
		match gradient_for(self, paint) {
			Some(gradient) => {
				#[allow(deprecated)]
				self.set_stroke_style(&gradient);
			}
			None => self.set_stroke_style_str(&paint.fallback().to_css()),
		}
	}
}

fn gradient_for(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Option<web_sys::CanvasGradient> {
	let (gradient, stops) = match *paint {
		Paint::Solid(_) => return None,
		Paint::Radial {
			x,
			y,
			r0,
			r1,
			stops,
		} => (ctx.create_radial_gradient(x, y, r0, x, y, r1).ok()?, stops),
		Paint::Linear {
			x0,
			y0,
			x1,
			y1,
			stops,
		} => (ctx.create_linear_gradient(x0, y0, x1, y1), stops),
	};
	apply_stops(&gradient, stops).then_some(gradient)
}

impl Surface for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
		self.use_fill(paint);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		self.begin_path();
		let _ = self.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
		self.use_fill(paint);
		self.fill();
	}

	fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, paint: &Paint) {
		self.begin_path();
		self.use_stroke(paint);
		self.set_line_width(width);
		self.move_to(x0, y0);
		self.line_to(x1, y1);
		self.stroke();
	}

	fn set_shadow(&mut self, blur: f64, color: Color) {
		self.set_shadow_blur(blur);
		self.set_shadow_color(&color.to_css());
	}

	fn clear_shadow(&mut self) {
		self.set_shadow_blur(0.0);
	}
}

/// Obtains the 2d context of a mounted canvas.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::ContextUnavailable)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::ContextUnavailable)
}

/// Current viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> Result<(f64, f64), SurfaceError> {
	let w = window.inner_width()?.as_f64().ok_or(SurfaceError::NoWindow)?;
	let h = window.inner_height()?.as_f64().ok_or(SurfaceError::NoWindow)?;
	Ok((w, h))
}

/// Fresh RNG seed from the browser.
pub fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Owns the surface dimensions and the active palette.
///
/// This is the only place theme state lives; the field receives a palette
/// whenever it is reseeded.
#[derive(Clone, Debug)]
pub struct SurfaceAdapter {
	/// Surface width, at least 1.
	pub width: f64,
	/// Surface height, at least 1.
	pub height: f64,
	mode: ThemeMode,
	palette: Palette,
}

impl SurfaceAdapter {
	/// Adapter for a surface of the given size and theme.
	pub fn new(width: f64, height: f64, mode: ThemeMode) -> Self {
		Self {
			width: width.max(1.0),
			height: height.max(1.0),
			mode,
			palette: Palette::for_mode(mode),
		}
	}

	/// Active theme.
	pub fn mode(&self) -> ThemeMode {
		self.mode
	}

	/// Palette for the active theme.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Records a new viewport size. Returns `true` if it changed.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		let (width, height) = (width.max(1.0), height.max(1.0));
		if width == self.width && height == self.height {
			return false;
		}
		self.width = width;
		self.height = height;
		true
	}

	/// Switches theme, re-deriving the palette. Returns `true` if it changed.
	pub fn set_theme(&mut self, mode: ThemeMode) -> bool {
		if mode == self.mode {
			return false;
		}
		self.mode = mode;
		self.palette = Palette::for_mode(mode);
		true
	}

	/// Resting population for the current size.
	pub fn target_population(&self, config: &FieldConfig) -> usize {
		config.target_population(self.width, self.height)
	}
}

#[cfg(test)]
pub(crate) mod testing {
	//! A [`Surface`] that records what was drawn.

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Rect { w: f64, h: f64, color: Color },
		Circle { x: f64, y: f64, radius: f64, color: Color },
		Line { x0: f64, y0: f64, x1: f64, y1: f64, width: f64 },
		Shadow { blur: f64 },
		ClearShadow,
	}

	#[derive(Default)]
	pub struct RecordingSurface {
		pub ops: Vec<Op>,
	}

	impl RecordingSurface {
		pub fn lines(&self) -> impl Iterator<Item = &Op> {
			self.ops.iter().filter(|op| matches!(op, Op::Line { .. }))
		}

		pub fn circles(&self) -> impl Iterator<Item = &Op> {
			self.ops.iter().filter(|op| matches!(op, Op::Circle { .. }))
		}
	}

	impl Surface for RecordingSurface {
		fn fill_rect(&mut self, _x: f64, _y: f64, w: f64, h: f64, paint: &Paint) {
			self.ops.push(Op::Rect {
				w,
				h,
				color: paint.fallback(),
			});
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
			self.ops.push(Op::Circle {
				x,
				y,
				radius,
				color: paint.fallback(),
			});
		}

		fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, _paint: &Paint) {
			self.ops.push(Op::Line {
				x0,
				y0,
				x1,
				y1,
				width,
			});
		}

		fn set_shadow(&mut self, blur: f64, _color: Color) {
			self.ops.push(Op::Shadow { blur });
		}

		fn clear_shadow(&mut self) {
			self.ops.push(Op::ClearShadow);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resize_clamps_degenerate_sizes() {
		let mut adapter = SurfaceAdapter::new(800.0, 600.0, ThemeMode::Dark);
		assert!(adapter.resize(0.0, -5.0));
		assert_eq!((adapter.width, adapter.height), (1.0, 1.0));
		assert!(!adapter.resize(1.0, 1.0));
	}

	#[test]
	fn theme_change_rederives_palette() {
		let mut adapter = SurfaceAdapter::new(800.0, 600.0, ThemeMode::Dark);
		assert!(!adapter.set_theme(ThemeMode::Dark));
		assert!(adapter.set_theme(ThemeMode::Light));
		assert_eq!(adapter.mode(), ThemeMode::Light);
		assert_eq!(adapter.palette(), &Palette::for_mode(ThemeMode::Light));
	}

	#[test]
	fn gradient_fallback_is_first_stop() {
		let stops = [(0.0, Color::rgb(1, 2, 3)), (1.0, Color::rgb(9, 9, 9))];
		let paint = Paint::Radial {
			x: 0.0,
			y: 0.0,
			r0: 0.0,
			r1: 4.0,
			stops: &stops,
		};
		assert_eq!(paint.fallback(), Color::rgb(1, 2, 3));
	}

	#[test]
	fn target_follows_adapter_size() {
		let adapter = SurfaceAdapter::new(1000.0, 500.0, ThemeMode::Light);
		assert_eq!(adapter.target_population(&FieldConfig::default()), 50);
	}
}
