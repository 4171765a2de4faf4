//! Pointer events translated into field perturbations.

use super::config::FieldConfig;
use super::field::{BurstKind, ParticleField};

/// Remembers where the pointer was last seen and turns pointer events into
/// bursts and forces on the field.
#[derive(Clone, Debug, Default)]
pub struct InputBridge {
	pointer: Option<(f64, f64)>,
}

impl InputBridge {
	/// A bridge with no pointer seen yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Last known pointer position in surface coordinates.
	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	/// Leaves a small ripple at the pointer and pushes nearby particles away.
	pub fn pointer_move(&mut self, field: &mut ParticleField, x: f64, y: f64) {
		self.pointer = Some((x, y));
		let FieldConfig {
			ripple_count,
			interaction_radius,
			force_strength,
			..
		} = *field.config();
		field.burst(x, y, ripple_count, BurstKind::Ripple);
		field.apply_force(x, y, interaction_radius, force_strength);
	}

	/// Sets off an explosion of particles at the click point.
	pub fn click(&mut self, field: &mut ParticleField, x: f64, y: f64) {
		self.pointer = Some((x, y));
		let count = field.config().explosion_count;
		field.burst(x, y, count, BurstKind::Explosion);
	}

	/// Forgets the pointer, e.g. when it leaves the surface.
	pub fn pointer_leave(&mut self) {
		self.pointer = None;
	}
}

#[cfg(test)]
mod tests {
	use super::super::theme::Palette;
	use super::*;

	fn field() -> ParticleField {
		ParticleField::new(FieldConfig::default(), 800.0, 600.0, Palette::default(), 9)
	}

	#[test]
	fn move_spawns_ripple_and_records_pointer() {
		let mut f = field();
		let mut input = InputBridge::new();
		input.pointer_move(&mut f, 120.0, 80.0);
		assert_eq!(f.len(), 3);
		assert_eq!(input.pointer(), Some((120.0, 80.0)));
		input.pointer_leave();
		assert_eq!(input.pointer(), None);
	}

	#[test]
	fn click_spawns_explosion() {
		let mut f = field();
		f.seed(10, Palette::default());
		let mut input = InputBridge::new();
		input.click(&mut f, 400.0, 300.0);
		assert_eq!(f.len(), 30);
	}

	#[test]
	fn tap_explodes_from_the_touch_point() {
		let mut f = field();
		let mut input = InputBridge::new();
		input.click(&mut f, 250.0, 150.0);
		assert_eq!(input.pointer(), Some((250.0, 150.0)));
		assert_eq!(f.len(), f.config().explosion_count);
		for p in f.particles() {
			assert_eq!((p.x, p.y), (250.0, 150.0));
			if !p.is_orbiting() {
				assert!(p.speed() >= 1.0 - 1e-9);
			}
		}
	}

	#[test]
	fn move_pushes_existing_particles_away() {
		let mut f = field();
		f.particles_mut().push(super::super::particle::Particle::new(
			200.0,
			100.0,
			2.0,
			0.0,
			0.0,
			Palette::default().neon[0],
		));
		let mut input = InputBridge::new();
		input.pointer_move(&mut f, 100.0, 100.0);
		let p = &f.particles()[0];
		assert_eq!((p.x, p.y), (200.0, 100.0));
		assert!(p.vx > 0.0);
	}
}
