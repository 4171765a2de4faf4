//! Theme-derived colours for the particle field.
//!
//! Colours are stored as explicit channels and picked once when a particle is
//! created, so nothing downstream ever parses a CSS colour string.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Fully transparent version of this color, for gradient tails.
	pub fn transparent(self) -> Self {
		self.with_alpha(0.0)
	}

	/// CSS `rgba()` notation.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Light or dark page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	/// Light particles on black.
	#[default]
	Dark,
	/// Dimmer particles on white.
	Light,
}

impl ThemeMode {
	/// Whether this is the dark mode.
	pub fn is_dark(self) -> bool {
		matches!(self, ThemeMode::Dark)
	}

	/// The opposite mode.
	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Dark => ThemeMode::Light,
			ThemeMode::Light => ThemeMode::Dark,
		}
	}

	/// Class name applied to the document root for this mode.
	pub fn class_name(self) -> &'static str {
		match self {
			ThemeMode::Dark => "dark",
			ThemeMode::Light => "light",
		}
	}
}

/// Neon hues shared by both themes; only the alpha differs.
const NEON: [(u8, u8, u8); 8] = [
	(147, 51, 234),  // Purple
	(59, 130, 246),  // Blue
	(236, 72, 153),  // Pink
	(124, 58, 237),  // Violet
	(16, 185, 129),  // Emerald
	(245, 158, 11),  // Amber
	(239, 68, 68),   // Red
	(14, 165, 233),  // Sky
];

/// Everything the field needs to know about the active theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	/// Mode this palette was derived from.
	pub mode: ThemeMode,
	/// Seed colours for the initial population.
	pub neon: Vec<Color>,
	/// Translucent overlay painted every frame instead of clearing.
	pub wash: Color,
	/// Shadow tint for connection lines.
	pub link_shadow: Color,
	/// Connection opacity at zero distance.
	pub link_opacity: f64,
	/// Opacity lost per surface unit of distance.
	pub link_falloff: f64,
	/// Inner and middle stop of the ambient glow, alpha ignored.
	pub glow_stops: [Color; 2],
	/// Base intensity for each glow stop before the pulse term.
	pub glow_base: [f64; 2],
	/// Tail colour of the ambient glow.
	pub glow_tail: Color,
	/// Alpha for ambient and ripple spawns.
	pub spawn_alpha: f64,
	/// Alpha for click explosions.
	pub explosion_alpha: f64,
}

impl Palette {
	/// The palette for a theme mode.
	pub fn for_mode(mode: ThemeMode) -> Self {
		let glow_stops = [Color::rgb(147, 51, 234), Color::rgb(59, 130, 246)];
		match mode {
			ThemeMode::Dark => Self {
				mode,
				neon: Self::neon(0.8),
				wash: Color::rgba(0, 0, 0, 0.1),
				link_shadow: Color::rgba(255, 255, 255, 0.3),
				link_opacity: 0.2,
				link_falloff: 1.0 / 1200.0,
				glow_stops,
				glow_base: [0.08, 0.05],
				glow_tail: Color::rgba(0, 0, 0, 0.0),
				spawn_alpha: 0.8,
				explosion_alpha: 0.9,
			},
			ThemeMode::Light => Self {
				mode,
				neon: Self::neon(0.6),
				wash: Color::rgba(255, 255, 255, 0.1),
				link_shadow: Color::rgba(147, 51, 234, 0.3),
				link_opacity: 0.15,
				link_falloff: 1.0 / 1500.0,
				glow_stops,
				glow_base: [0.03, 0.02],
				glow_tail: Color::rgba(255, 255, 255, 0.0),
				spawn_alpha: 0.6,
				explosion_alpha: 0.7,
			},
		}
	}

	fn neon(alpha: f64) -> Vec<Color> {
		NEON.iter()
			.map(|&(r, g, b)| Color::rgba(r, g, b, alpha))
			.collect()
	}

	/// One of the eight neon seed colours.
	pub fn random_seed_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.neon[rng.random_range(0..self.neon.len())]
	}

	/// A random magenta-leaning colour used for spawned particles.
	pub fn random_spawn_color<R: Rng + ?Sized>(&self, rng: &mut R, alpha: f64) -> Color {
		Color::rgba(
			rng.random_range(150..250),
			rng.random_range(50..150),
			rng.random_range(150..250),
			alpha,
		)
	}

	/// Connection opacity for a pair `distance` apart, before the wave term.
	pub fn link_alpha(&self, distance: f64) -> f64 {
		self.link_opacity - distance * self.link_falloff
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::for_mode(ThemeMode::default())
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn palettes_differ_only_in_alpha_for_seed_colors() {
		let dark = Palette::for_mode(ThemeMode::Dark);
		let light = Palette::for_mode(ThemeMode::Light);
		assert_eq!(dark.neon.len(), 8);
		for (d, l) in dark.neon.iter().zip(&light.neon) {
			assert_eq!((d.r, d.g, d.b), (l.r, l.g, l.b));
			assert_eq!(d.a, 0.8);
			assert_eq!(l.a, 0.6);
		}
	}

	#[test]
	fn spawn_colors_stay_in_channel_ranges() {
		let palette = Palette::default();
		let mut rng = SmallRng::seed_from_u64(7);
		for _ in 0..200 {
			let c = palette.random_spawn_color(&mut rng, 0.8);
			assert!((150..250).contains(&c.r));
			assert!((50..150).contains(&c.g));
			assert!((150..250).contains(&c.b));
			assert_eq!(c.a, 0.8);
		}
	}

	#[test]
	fn link_alpha_decays_linearly() {
		let dark = Palette::for_mode(ThemeMode::Dark);
		assert!((dark.link_alpha(0.0) - 0.2).abs() < 1e-12);
		assert!((dark.link_alpha(120.0) - 0.1).abs() < 1e-12);
		let light = Palette::for_mode(ThemeMode::Light);
		assert!((light.link_alpha(150.0) - 0.05).abs() < 1e-12);
	}

	#[test]
	fn theme_mode_round_trips_through_json_names() {
		assert_eq!(serde_json::to_string(&ThemeMode::Light).unwrap(), "\"light\"");
		let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
		assert_eq!(mode, ThemeMode::Dark);
		assert_eq!(mode.toggle(), ThemeMode::Light);
	}

	#[test]
	fn css_output_uses_rgba_notation() {
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}
}
