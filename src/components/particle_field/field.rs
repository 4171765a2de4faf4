//! The particle collection and its per-frame update/draw loop.
//!
//! A frame is drawn in passes, bottom to top:
//! 1. Translucent wash over the previous frame (motion blur instead of a clear)
//! 2. Proximity lines between nearby pairs
//! 3. Each particle, advanced then drawn
//! 4. Pulsing ambient glow
//!
//! followed by population churn.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::particle::{Bounds, Particle};
use super::surface::{Paint, Surface};
use super::theme::{Color, Palette};

const LINK_WIDTH: f64 = 0.8;
const LINK_BLUR: f64 = 5.0;

/// Shape of a one-shot spawn at a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
	/// Fast, outward-flying particles from a click.
	Explosion,
	/// A few small, slow particles scattered around the pointer.
	Ripple,
}

/// Population watermarks relative to the target derived from surface area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationPolicy {
	/// Resting population for the current surface.
	pub target: usize,
	/// Ambient spawning only happens below this.
	pub spawn_limit: usize,
	/// Above this the oldest particle is culled once per frame.
	pub settle_limit: usize,
	/// Bursts trim the oldest particles down to this immediately.
	pub burst_limit: usize,
}

impl PopulationPolicy {
	/// Watermarks around `target` using the configured headrooms.
	pub fn new(target: usize, config: &FieldConfig) -> Self {
		Self {
			target,
			spawn_limit: target + config.spawn_headroom,
			settle_limit: target + config.settle_headroom,
			burst_limit: target + config.burst_headroom,
		}
	}
}

/// A pair of particles close enough to be joined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle.
	pub a: usize,
	/// Index of the second particle, always greater than `a`.
	pub b: usize,
	/// Euclidean distance between the two.
	pub distance: f64,
}

/// Owns every particle and drives them one frame at a time.
pub struct ParticleField {
	particles: Vec<Particle>,
	bounds: Bounds,
	palette: Palette,
	config: FieldConfig,
	policy: PopulationPolicy,
	time: f64,
	rng: SmallRng,
}

impl ParticleField {
	/// Creates an empty field. Call [`ParticleField::seed`] to populate it.
	pub fn new(config: FieldConfig, width: f64, height: f64, palette: Palette, seed: u64) -> Self {
		let policy = PopulationPolicy::new(config.target_population(width, height), &config);
		Self {
			particles: Vec::new(),
			bounds: Bounds { width, height },
			palette,
			config,
			policy,
			time: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Current particles, oldest first.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Direct access to the population.
	pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
		&mut self.particles
	}

	/// Number of live particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the field has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Population watermarks for the current size.
	pub fn policy(&self) -> PopulationPolicy {
		self.policy
	}

	/// Resting population for the current size.
	pub fn target(&self) -> usize {
		self.policy.target
	}

	/// Surface size particles bounce inside.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Palette used for new particles and overlays.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Tuning parameters.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Elapsed animation clock.
	pub fn time(&self) -> f64 {
		self.time
	}

	/// Replaces the whole population with `count` fresh particles coloured
	/// from `palette`.
	pub fn seed(&mut self, count: usize, palette: Palette) {
		self.palette = palette;
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			let color = self.palette.random_seed_color(&mut self.rng);
			let p = self.random_particle(color);
			self.particles.push(p);
		}
		debug!(
			"particle field: seeded {} particles ({:?})",
			count, self.palette.mode
		);
	}

	/// Adopts a new surface size. Takes effect on the next tick.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = Bounds { width, height };
		self.policy = PopulationPolicy::new(self.config.target_population(width, height), &self.config);
	}

	fn random_particle(&mut self, color: Color) -> Particle {
		let rng = &mut self.rng;
		let size = rng.random_range(1.0..4.0);
		let x = rng.random_range(0.0..=self.bounds.width.max(0.0));
		let y = rng.random_range(0.0..=self.bounds.height.max(0.0));
		let vx = rng.random_range(-0.6..0.6);
		let vy = rng.random_range(-0.6..0.6);
		Particle::spawn(rng, &self.config, x, y, size, vx, vy, color)
	}

	/// Every unordered pair closer than the link distance.
	pub fn links(&self) -> Vec<Link> {
		let max = self.config.max_distance;
		let mut links = Vec::new();
		for (i, p) in self.particles.iter().enumerate() {
			for (j, q) in self.particles.iter().enumerate().skip(i + 1) {
				let distance = (p.x - q.x).hypot(p.y - q.y);
				if distance < max {
					links.push(Link { a: i, b: j, distance });
				}
			}
		}
		links
	}

	/// Runs one frame: draw, advance, then grow or trim the population.
	pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		self.time += self.config.time_step;
		let Bounds { width, height } = self.bounds;

		surface.fill_rect(0.0, 0.0, width, height, &Paint::Solid(self.palette.wash));

		self.draw_links(surface);

		for p in &mut self.particles {
			p.advance(self.bounds, &self.config, &mut self.rng);
			p.render(surface);
		}

		self.draw_glow(surface);
		self.churn();
	}

	fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
		let links = self.links();
		if links.is_empty() {
			return;
		}
		let max = self.config.max_distance;

		surface.set_shadow(LINK_BLUR, self.palette.link_shadow);
		for link in links {
			let (p, q) = (&self.particles[link.a], &self.particles[link.b]);
			let wave = (self.time + link.a as f64 * 0.1).sin() * 0.05 + 0.05;
			let opacity = (self.palette.link_alpha(link.distance) + wave).max(0.0);
			let stops = [
				(0.0, p.color.with_alpha(opacity)),
				(1.0, q.color.with_alpha(opacity)),
			];
			surface.stroke_line(
				p.x,
				p.y,
				q.x,
				q.y,
				LINK_WIDTH * (1.0 - link.distance / max),
				&Paint::Linear {
					x0: p.x,
					y0: p.y,
					x1: q.x,
					y1: q.y,
					stops: &stops,
				},
			);
		}
		surface.clear_shadow();
	}

	fn draw_glow<S: Surface + ?Sized>(&self, surface: &mut S) {
		let Bounds { width, height } = self.bounds;
		let pulse = (self.time * 0.5).sin() * 0.03 + 0.05;
		let [inner, middle] = self.palette.glow_stops;
		let [inner_base, middle_base] = self.palette.glow_base;
		let stops = [
			(0.0, inner.with_alpha(inner_base + pulse)),
			(0.5, middle.with_alpha(middle_base + pulse)),
			(1.0, self.palette.glow_tail),
		];
		surface.fill_rect(
			0.0,
			0.0,
			width,
			height,
			&Paint::Radial {
				x: width / 2.0,
				y: height / 2.0,
				r0: 0.0,
				r1: width / 1.5,
				stops: &stops,
			},
		);
	}

	fn churn(&mut self) {
		if self.rng.random_bool(self.config.spawn_chance.clamp(0.0, 1.0))
			&& self.particles.len() < self.policy.spawn_limit
		{
			let color = self
				.palette
				.random_spawn_color(&mut self.rng, self.palette.spawn_alpha);
			let p = self.random_particle(color);
			self.particles.push(p);
		}
		if self.particles.len() > self.policy.settle_limit {
			self.particles.remove(0);
		}
	}

	/// Pushes every particle within `radius` of the point away from it.
	/// Only velocities change; positions move on the next tick.
	pub fn apply_force(&mut self, x: f64, y: f64, radius: f64, strength: f64) {
		for p in &mut self.particles {
			let (dx, dy) = (x - p.x, y - p.y);
			let distance = dx.hypot(dy);
			if distance < radius {
				let angle = dy.atan2(dx);
				let force = (radius - distance) / radius;
				p.vx -= angle.cos() * force * strength;
				p.vy -= angle.sin() * force * strength;
			}
		}
	}

	/// Spawns `count` particles at the point, then trims the oldest if the
	/// population went past the burst limit.
	pub fn burst(&mut self, x: f64, y: f64, count: usize, kind: BurstKind) {
		for _ in 0..count {
			let rng = &mut self.rng;
			let angle = rng.random_range(0.0..TAU);
			let (px, py, size, speed, alpha) = match kind {
				BurstKind::Explosion => (
					x,
					y,
					rng.random_range(1.0..4.0),
					rng.random_range(1.0..5.0),
					self.palette.explosion_alpha,
				),
				BurstKind::Ripple => {
					let offset = rng.random_range(0.0..10.0);
					(
						x + angle.cos() * offset,
						y + angle.sin() * offset,
						rng.random_range(0.5..2.5),
						rng.random_range(0.5..1.5) * 1.5,
						self.palette.spawn_alpha,
					)
				}
			};
			let color = self.palette.random_spawn_color(rng, alpha);
			let p = Particle::spawn(
				rng,
				&self.config,
				px,
				py,
				size,
				angle.cos() * speed,
				angle.sin() * speed,
				color,
			);
			self.particles.push(p);
		}

		let excess = self.particles.len().saturating_sub(self.policy.burst_limit);
		if excess > 0 {
			self.particles.drain(..excess);
		}
	}
}
