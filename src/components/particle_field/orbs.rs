//! Soft DOM orbs floating above the canvas, animated purely with CSS.

use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::surface::random_seed;
use super::theme::ThemeMode;

const ORB_COLORS: [&str; 8] = [
	"neon-purple",
	"neon-blue",
	"neon-pink",
	"neon-violet",
	"neon-emerald",
	"neon-amber",
	"neon-red",
	"neon-sky",
];

const ORB_ANIMATIONS: [&str; 8] = [
	"particle-1",
	"particle-2",
	"particle-3",
	"particle-4",
	"float",
	"orbit",
	"wave",
	"drift",
];

/// One decorative orb.
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
	/// Horizontal position, percent of viewport width.
	pub x: f64,
	/// Vertical position, percent of viewport height.
	pub y: f64,
	/// Size factor; the rendered diameter is five times this in pixels.
	pub size: f64,
	/// Neon colour name, used for CSS classes and variables.
	pub color: &'static str,
	/// CSS animation name.
	pub animation: &'static str,
	/// Seconds per pulse cycle.
	pub duration: f64,
}

impl Orb {
	/// CSS classes for the orb element.
	pub fn class(&self) -> String {
		format!(
			"floating-orb shadow-{} animate-{}",
			self.color, self.animation
		)
	}

	/// Inline style placing and sizing the orb.
	pub fn style(&self) -> String {
		let px = self.size * 5.0;
		format!(
			"left: {:.2}vw; top: {:.2}vh; width: {px:.1}px; height: {px:.1}px; \
			 background: radial-gradient(circle, var(--colors-{}) 0%, transparent 70%); \
			 filter: blur(1px); animation-duration: {:.2}s;",
			self.x, self.y, self.color, self.duration
		)
	}
}

/// Scatters `count` orbs across the viewport.
pub fn generate_orbs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Orb> {
	(0..count)
		.map(|_| Orb {
			x: rng.random_range(0.0..100.0),
			y: rng.random_range(0.0..100.0),
			size: rng.random_range(1.0..4.0),
			color: ORB_COLORS[rng.random_range(0..ORB_COLORS.len())],
			animation: ORB_ANIMATIONS[rng.random_range(0..ORB_ANIMATIONS.len())],
			duration: rng.random_range(3.0..8.0),
		})
		.collect()
}

/// A handful of blurred orbs layered over the particle canvas. A new set is
/// scattered whenever the theme changes.
#[component]
pub fn FloatingOrbs(
	/// Page theme; every change scatters a new set.
	#[prop(into)]
	theme: Signal<ThemeMode>,
	/// Number of orbs.
	#[prop(default = 15)]
	count: usize,
) -> impl IntoView {
	let orbs = Memo::new(move |_| {
		theme.track();
		generate_orbs(&mut SmallRng::seed_from_u64(random_seed()), count)
	});

	view! {
		<div class="floating-orbs" aria-hidden="true" style="pointer-events: none;">
			{move || {
				orbs.get()
					.into_iter()
					.map(|orb| view! { <div class=orb.class() style=orb.style() /> })
					.collect_view()
			}}
		</div>
	}
}
