//! neon-field: Interactive neon particle background for a portfolio page.
//!
//! This crate provides a WASM-based canvas component that animates a field of
//! glowing particles joined by proximity lines, reacting to the pointer and to
//! the page's light/dark theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	FieldConfig, FloatingOrbs, ParticleField, ParticleFieldCanvas, ThemeMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("neon-field: logging initialized");
}

/// Load field tuning from a script element with id="particle-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] fields.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!("neon-field: loaded particle config");
			Some(config)
		}
		Err(e) => {
			warn!("neon-field: failed to parse particle config: {}", e);
			None
		}
	}
}

/// Initial theme from the user's colour-scheme preference.
fn preferred_theme() -> ThemeMode {
	let prefers_light = web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: light)").ok().flatten())
		.is_some_and(|mq| mq.matches());
	if prefers_light {
		ThemeMode::Light
	} else {
		ThemeMode::Dark
	}
}

/// Main application component.
/// Renders the animated background behind a theme toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let theme = RwSignal::new(preferred_theme());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:class=move || theme.get().class_name() />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="animated-background">
			<ParticleFieldCanvas theme=theme config=config />
			<FloatingOrbs theme=theme />
			<button
				class="theme-toggle"
				aria-label="Toggle theme"
				on:click=move |_| theme.update(|mode| *mode = mode.toggle())
			>
				{move || if theme.get().is_dark() { "Light mode" } else { "Dark mode" }}
			</button>
		</div>
	}
}
