//! Tunable constants for the particle field.
//!
//! Every field has a default, so a partial JSON object (or none at all) is a
//! valid configuration.

use serde::Deserialize;

/// Motion, interaction and population parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Hard cap on particle speed, in surface units per frame.
	pub max_speed: f64,
	/// Pairs closer than this are joined by a line.
	pub max_distance: f64,
	/// Number of afterimages kept per particle.
	pub trail_len: usize,
	/// Chance per frame that a particle records a trail sample.
	pub trail_chance: f64,
	/// Chance per frame that a particle's velocity is nudged.
	pub drift_chance: f64,
	/// Chance per frame that the field spawns an ambient particle.
	pub spawn_chance: f64,
	/// Share of new particles that move on an orbit.
	pub orbit_chance: f64,
	/// Surface area per particle when deriving the target population.
	pub area_per_particle: f64,
	/// Upper bound on the target population.
	pub max_target: usize,
	/// Pointer influence radius.
	pub interaction_radius: f64,
	/// Velocity change at the pointer itself.
	pub force_strength: f64,
	/// Particles spawned per pointer move.
	pub ripple_count: usize,
	/// Particles spawned per click.
	pub explosion_count: usize,
	/// Clock advance per frame, drives link waves and the ambient pulse.
	pub time_step: f64,
	/// Ambient spawns stop at `target + spawn_headroom`.
	pub spawn_headroom: usize,
	/// Above `target + settle_headroom` one particle is culled per frame.
	pub settle_headroom: usize,
	/// Bursts never leave more than `target + burst_headroom` particles.
	pub burst_headroom: usize,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_speed: 1.5,
			max_distance: 180.0,
			trail_len: 5,
			trail_chance: 0.3,
			drift_chance: 0.01,
			spawn_chance: 0.01,
			orbit_chance: 0.3,
			area_per_particle: 10_000.0,
			max_target: 120,
			interaction_radius: 150.0,
			force_strength: 0.2,
			ripple_count: 3,
			explosion_count: 20,
			time_step: 0.01,
			spawn_headroom: 20,
			settle_headroom: 30,
			burst_headroom: 100,
		}
	}
}

impl FieldConfig {
	/// Resting population for a surface of the given size.
	pub fn target_population(&self, width: f64, height: f64) -> usize {
		let area = (width * height).max(0.0);
		let by_area = (area / self.area_per_particle.max(1.0)).floor() as usize;
		by_area.min(self.max_target)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn target_scales_with_area_and_caps() {
		let cfg = FieldConfig::default();
		assert_eq!(cfg.target_population(200.0, 200.0), 4);
		assert_eq!(cfg.target_population(1000.0, 500.0), 50);
		assert_eq!(cfg.target_population(1920.0, 1080.0), 120);
		assert_eq!(cfg.target_population(0.0, 900.0), 0);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let cfg: FieldConfig =
			serde_json::from_str(r#"{ "max_distance": 120.0, "explosion_count": 8 }"#).unwrap();
		assert_eq!(cfg.max_distance, 120.0);
		assert_eq!(cfg.explosion_count, 8);
		assert_eq!(cfg.max_speed, 1.5);
		assert_eq!(cfg.trail_len, 5);
	}
}
