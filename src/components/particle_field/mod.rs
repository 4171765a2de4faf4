//! Interactive neon particle background.
//!
//! Renders a field of drifting, twinkling particles on an HTML canvas with:
//! - Proximity lines between nearby particles
//! - Optional orbital motion and fading afterimage trails
//! - Pointer ripples, repulsion and click explosions
//! - Light/dark palettes driven by a theme signal
//!
//! The simulation itself ([`ParticleField`], [`Particle`]) draws through the
//! [`Surface`] trait and does not need a browser; the Leptos component is the
//! only part that touches the DOM.
//!
//! # Example
//!
//! ```ignore
//! use neon_field::{ParticleFieldCanvas, ThemeMode};
//!
//! let theme = RwSignal::new(ThemeMode::Dark);
//! view! { <ParticleFieldCanvas theme=theme /> }
//! ```

mod component;
pub mod config;
mod controller;
mod error;
pub mod field;
mod input;
mod orbs;
pub mod particle;
pub mod surface;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use controller::AnimationController;
pub use error::SurfaceError;
pub use field::{BurstKind, ParticleField, PopulationPolicy};
pub use input::InputBridge;
pub use orbs::FloatingOrbs;
pub use particle::Particle;
pub use surface::{Surface, SurfaceAdapter};
pub use theme::{Color, Palette, ThemeMode};
