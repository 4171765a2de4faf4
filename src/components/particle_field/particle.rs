//! A single glowing particle: motion, twinkle, pulse and afterimage trail.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::Rng;

use super::config::FieldConfig;
use super::surface::{Paint, Surface};
use super::theme::Color;

const ALPHA_MIN: f64 = 0.2;
const ALPHA_MAX: f64 = 0.8;
const ALPHA_JITTER: f64 = 0.015;
/// Below this a bounced velocity component is considered stalled.
const STALL_SPEED: f64 = 0.2;
const GLOW_BLUR: f64 = 15.0;

/// Size of the area particles bounce inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Right edge; the left edge is zero.
	pub width: f64,
	/// Bottom edge; the top edge is zero.
	pub height: f64,
}

/// Circular motion around a slowly drifting centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
	/// Centre x.
	pub center_x: f64,
	/// Centre y.
	pub center_y: f64,
	/// Distance from the centre.
	pub radius: f64,
	/// Current angle in radians.
	pub angle: f64,
	/// Radians added per frame; the sign picks the direction.
	pub angular_speed: f64,
}

/// One afterimage sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	/// Sampled x.
	pub x: f64,
	/// Sampled y.
	pub y: f64,
	/// Radius of the afterimage.
	pub size: f64,
	/// Opacity before the age fade is applied.
	pub alpha: f64,
}

/// A single floating particle.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Position x.
	pub x: f64,
	/// Position y.
	pub y: f64,
	/// Horizontal velocity in surface units per frame.
	pub vx: f64,
	/// Vertical velocity in surface units per frame.
	pub vy: f64,
	/// Current radius, kept within half and one and a half times `base_size`.
	pub size: f64,
	/// Resting radius.
	pub base_size: f64,
	/// Radius change per frame.
	pub pulse_speed: f64,
	growing: bool,
	/// Channel values; alpha comes from `alpha` at draw time.
	pub color: Color,
	/// Current opacity, within `[0.2, 0.8]`.
	pub alpha: f64,
	/// When set, position is derived from the orbit instead of velocity.
	pub orbit: Option<Orbit>,
	/// Recent samples, oldest first.
	pub trail: VecDeque<TrailPoint>,
}

impl Particle {
	/// A linearly moving particle with fixed, mid-range appearance.
	pub fn new(x: f64, y: f64, size: f64, vx: f64, vy: f64, color: Color) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			size,
			base_size: size,
			pulse_speed: 0.03,
			growing: true,
			color,
			alpha: 0.5,
			orbit: None,
			trail: VecDeque::new(),
		}
	}

	/// A particle with randomized twinkle, pulse and (sometimes) an orbit
	/// centred on its starting point.
	#[allow(clippy::too_many_arguments)]
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		config: &FieldConfig,
		x: f64,
		y: f64,
		size: f64,
		vx: f64,
		vy: f64,
		color: Color,
	) -> Self {
		let mut p = Self::new(x, y, size, vx, vy, color);
		p.alpha = rng.random_range(ALPHA_MIN..ALPHA_MAX);
		p.growing = rng.random_bool(0.5);
		p.pulse_speed = rng.random_range(0.01..0.06);
		if rng.random_bool(config.orbit_chance.clamp(0.0, 1.0)) {
			p.orbit = Some(Orbit {
				center_x: x,
				center_y: y,
				radius: rng.random_range(20.0..70.0),
				angle: rng.random_range(0.0..TAU),
				angular_speed: rng.random_range(-0.01..0.01),
			});
		}
		p
	}

	/// Switches the particle to orbital motion.
	pub fn with_orbit(mut self, orbit: Orbit) -> Self {
		self.orbit = Some(orbit);
		self
	}

	/// Whether position comes from an orbit rather than velocity.
	pub fn is_orbiting(&self) -> bool {
		self.orbit.is_some()
	}

	/// Velocity magnitude.
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}

	/// Advances one frame of motion and appearance.
	pub fn advance<R: Rng + ?Sized>(&mut self, bounds: Bounds, config: &FieldConfig, rng: &mut R) {
		if rng.random_bool(config.trail_chance.clamp(0.0, 1.0)) {
			self.trail.push_back(TrailPoint {
				x: self.x,
				y: self.y,
				size: self.size * 0.6,
				alpha: self.alpha * 0.3,
			});
			while self.trail.len() > config.trail_len {
				self.trail.pop_front();
			}
		}

		match self.orbit.as_mut() {
			Some(orbit) => {
				orbit.angle += orbit.angular_speed;
				self.x = orbit.center_x + orbit.angle.cos() * orbit.radius;
				self.y = orbit.center_y + orbit.angle.sin() * orbit.radius;
				orbit.center_x += self.vx * 0.2;
				orbit.center_y += self.vy * 0.2;
			}
			None => {
				self.x += self.vx;
				self.y += self.vy;
			}
		}

		self.pulse();

		self.alpha =
			(self.alpha + rng.random_range(-ALPHA_JITTER..ALPHA_JITTER)).clamp(ALPHA_MIN, ALPHA_MAX);

		if self.orbit.is_none() {
			self.vx = bounce(self.x, bounds.width, self.vx, rng);
			self.vy = bounce(self.y, bounds.height, self.vy, rng);
		}

		if rng.random_bool(config.drift_chance.clamp(0.0, 1.0)) {
			self.vx += rng.random_range(-0.15..0.15);
			self.vy += rng.random_range(-0.15..0.15);
		}

		self.limit_speed(config.max_speed);
	}

	fn pulse(&mut self) {
		let (lo, hi) = (self.base_size * 0.5, self.base_size * 1.5);
		if self.growing {
			self.size = (self.size + self.pulse_speed).min(hi);
			if self.size >= hi {
				self.growing = false;
			}
		} else {
			self.size = (self.size - self.pulse_speed).max(lo);
			if self.size <= lo {
				self.growing = true;
			}
		}
	}

	/// Rescales velocity so its magnitude does not exceed `max`.
	pub fn limit_speed(&mut self, max: f64) {
		let speed = self.speed();
		if speed > max && speed > 0.0 {
			self.vx = self.vx / speed * max;
			self.vy = self.vy / speed * max;
		}
	}

	/// Draws the trail, oldest first, then the particle with a soft glow.
	pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
		let len = self.trail.len() as f64;
		for (i, point) in self.trail.iter().enumerate() {
			let alpha = point.alpha * (i as f64 / len);
			surface.fill_circle(
				point.x,
				point.y,
				point.size,
				&Paint::Solid(self.color.with_alpha(alpha)),
			);
		}

		let stops = [
			(0.0, self.color.with_alpha(self.alpha)),
			(0.5, self.color.with_alpha(self.alpha * 0.5)),
			(1.0, self.color.transparent()),
		];
		surface.set_shadow(GLOW_BLUR, self.color);
		surface.fill_circle(
			self.x,
			self.y,
			self.size,
			&Paint::Radial {
				x: self.x,
				y: self.y,
				r0: 0.0,
				r1: self.size * 2.0,
				stops: &stops,
			},
		);
		surface.clear_shadow();
	}
}

/// Reflects a velocity component when its axis leaves `[0, limit]`, with a
/// little randomness so particles don't settle into fixed paths. A reflected
/// component that is nearly stalled gets a fresh random speed.
fn bounce<R: Rng + ?Sized>(pos: f64, limit: f64, v: f64, rng: &mut R) -> f64 {
	if (0.0..=limit).contains(&pos) {
		return v;
	}
	let v = -v * rng.random_range(0.9..1.1);
	if v.abs() < STALL_SPEED {
		rng.random_range(-0.6..0.6)
	} else {
		v
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::surface::testing::{Op, RecordingSurface};
	use super::*;

	const BOUNDS: Bounds = Bounds {
		width: 200.0,
		height: 200.0,
	};

	fn color() -> Color {
		Color::rgba(147, 51, 234, 0.8)
	}

	#[test]
	fn appearance_stays_in_range_over_many_frames() {
		let cfg = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(1);
		let mut particles: Vec<Particle> = (0..50)
			.map(|_| {
				let x = rng.random_range(0.0..200.0);
				let y = rng.random_range(0.0..200.0);
				let size = rng.random_range(1.0..4.0);
				let vx = rng.random_range(-3.0..3.0);
				let vy = rng.random_range(-3.0..3.0);
				Particle::spawn(&mut rng, &cfg, x, y, size, vx, vy, color())
			})
			.collect();

		for _ in 0..2000 {
			for p in &mut particles {
				p.advance(BOUNDS, &cfg, &mut rng);
				assert!((0.2..=0.8).contains(&p.alpha), "alpha {}", p.alpha);
				assert!(p.size >= p.base_size * 0.5 && p.size <= p.base_size * 1.5);
				assert!(p.speed() <= cfg.max_speed + 1e-9);
				assert!(p.trail.len() <= cfg.trail_len);
			}
		}
	}

	#[test]
	fn corner_particle_reflects_both_axes() {
		let cfg = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(2);
		let mut p = Particle::new(0.0, 0.0, 2.0, -1.0, -1.0, color());
		p.advance(BOUNDS, &cfg, &mut rng);
		assert!(p.vx > 0.0 && p.vy > 0.0, "({}, {})", p.vx, p.vy);
	}

	#[test]
	fn right_edge_flips_horizontal_velocity() {
		let cfg = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(3);
		let mut p = Particle::new(205.0, 100.0, 2.0, 0.8, 0.0, color());
		p.advance(BOUNDS, &cfg, &mut rng);
		assert!(p.vx < 0.0);
	}

	#[test]
	fn right_edge_flips_leftward_velocity_too() {
		let cfg = FieldConfig {
			drift_chance: 0.0,
			..FieldConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(13);
		let mut p = Particle::new(205.0, 100.0, 2.0, -0.8, 0.0, color());
		p.advance(BOUNDS, &cfg, &mut rng);
		assert!((204.19..204.21).contains(&p.x));
		assert!((0.72..=0.88).contains(&p.vx), "vx {}", p.vx);
	}

	#[test]
	fn bounce_negates_with_jitter() {
		let mut rng = SmallRng::seed_from_u64(4);
		for _ in 0..1000 {
			let v = bounce(-1.0, 200.0, -1.0, &mut rng);
			assert!((0.9..1.1).contains(&v));
			let v = bounce(201.0, 200.0, 1.0, &mut rng);
			assert!((-1.1..-0.9).contains(&v));
		}
		assert_eq!(bounce(50.0, 200.0, -0.05, &mut rng), -0.05);
	}

	#[test]
	fn stalled_bounce_redraws_either_direction() {
		let mut rng = SmallRng::seed_from_u64(5);
		let draws: Vec<f64> = (0..2000)
			.map(|_| bounce(-1.0, 200.0, -0.05, &mut rng))
			.collect();
		assert!(draws.iter().all(|v| (-0.6..0.6).contains(v)));
		assert!(draws.iter().any(|&v| v < -0.2));
		assert!(draws.iter().any(|&v| v > 0.2));
		assert!(draws.iter().any(|&v| v.abs() < 0.2));
	}

	#[test]
	fn orbiting_particle_ignores_edges() {
		let cfg = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(5);
		let mut p = Particle::new(-50.0, -50.0, 2.0, -1.0, 0.5, color()).with_orbit(Orbit {
			center_x: -50.0,
			center_y: -50.0,
			radius: 30.0,
			angle: 0.0,
			angular_speed: 0.01,
		});
		p.advance(BOUNDS, &cfg, &mut rng);
		assert!(p.is_orbiting());

		let orbit = p.orbit.as_ref().unwrap();
		assert!((orbit.center_x - (-50.2)).abs() < 1e-12);
		assert!((orbit.center_y - (-49.9)).abs() < 1e-12);
		assert!((p.x - (-50.0 + 0.01f64.cos() * 30.0)).abs() < 1e-9);
		assert!((p.y - (-50.0 + 0.01f64.sin() * 30.0)).abs() < 1e-9);
		assert!(p.vx < 0.0, "orbiting particles never bounce");
	}

	#[test]
	fn trail_evicts_oldest_first() {
		let cfg = FieldConfig {
			trail_chance: 1.0,
			drift_chance: 0.0,
			..FieldConfig::default()
		};
		let mut rng = SmallRng::seed_from_u64(6);
		let mut p = Particle::new(10.0, 10.0, 2.0, 1.0, 0.0, color());
		for _ in 0..8 {
			p.advance(BOUNDS, &cfg, &mut rng);
		}
		assert_eq!(p.trail.len(), 5);
		let xs: Vec<f64> = p.trail.iter().map(|t| t.x).collect();
		assert_eq!(xs, vec![13.0, 14.0, 15.0, 16.0, 17.0]);
	}

	#[test]
	fn size_pulse_turns_at_bounds() {
		let cfg = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(8);
		let mut p = Particle::new(100.0, 100.0, 2.0, 0.0, 0.0, color());
		p.pulse_speed = 0.4;
		let mut seen_max = false;
		let mut seen_min = false;
		for _ in 0..20 {
			p.advance(BOUNDS, &cfg, &mut rng);
			seen_max |= p.size == 3.0;
			seen_min |= p.size == 1.0;
		}
		assert!(seen_max && seen_min);
	}

	#[test]
	fn render_draws_trail_then_glowing_body() {
		let mut p = Particle::new(50.0, 60.0, 2.0, 0.0, 0.0, color());
		p.alpha = 0.6;
		for i in 0..3 {
			p.trail.push_back(TrailPoint {
				x: i as f64,
				y: 0.0,
				size: 1.0,
				alpha: 0.3,
			});
		}
		let mut surface = RecordingSurface::default();
		p.render(&mut surface);

		let alphas: Vec<f64> = surface
			.circles()
			.map(|op| match op {
				Op::Circle { color, .. } => color.a,
				_ => unreachable!(),
			})
			.collect();
		assert_eq!(alphas.len(), 4);
		assert!(alphas[0] < alphas[1] && alphas[1] < alphas[2]);
		assert_eq!(alphas[3], 0.6);
		assert_eq!(surface.ops[3], Op::Shadow { blur: 15.0 });
		assert_eq!(surface.ops.last(), Some(&Op::ClearShadow));
	}
}
