//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a full-viewport canvas behind the page content and
//! wires pointer events to the input bridge, window resizes to the surface
//! adapter, and the theme signal to a palette change plus reseed. Frames are
//! driven by an [`AnimationController`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::config::FieldConfig;
use super::controller::AnimationController;
use super::error::SurfaceError;
use super::field::ParticleField;
use super::input::InputBridge;
use super::surface::{self, SurfaceAdapter};
use super::theme::ThemeMode;

/// Everything the frame loop and event handlers share.
struct FieldContext {
	adapter: SurfaceAdapter,
	field: ParticleField,
	input: InputBridge,
	ctx: CanvasRenderingContext2d,
}

type SharedContext = Rc<RefCell<Option<FieldContext>>>;
type ResizeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Resources released when the component unmounts.
struct Teardown {
	controller: Rc<AnimationController>,
	resize_cb: ResizeCallback,
}

impl Teardown {
	fn run(&self) {
		self.controller.stop();
		if let (Some(cb), Some(win)) = (self.resize_cb.borrow_mut().take(), web_sys::window()) {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

/// Renders the animated particle background on a fixed, full-viewport canvas.
///
/// The `theme` signal selects the palette; changing it reseeds the field so
/// every particle adopts the new colours. If the browser cannot provide a 2d
/// context the canvas simply stays blank.
#[component]
pub fn ParticleFieldCanvas(
	/// Page theme; changes reseed the field.
	#[prop(into)]
	theme: Signal<ThemeMode>,
	/// Tuning parameters.
	#[prop(default = FieldConfig::default())]
	config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let controller = Rc::new(AnimationController::new());
	let resize_cb: ResizeCallback = Rc::new(RefCell::new(None));

	let teardown = StoredValue::new_local(Teardown {
		controller: controller.clone(),
		resize_cb: resize_cb.clone(),
	});
	on_cleanup(move || {
		let _ = teardown.try_with_value(Teardown::run);
	});

	let (context_init, controller_init, resize_init) =
		(context.clone(), controller.clone(), resize_cb.clone());
	Effect::new(move |_| {
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = match canvas_ref.get() {
			Some(canvas) => canvas.into(),
			None => {
				debug!("particle field: waiting: {}", SurfaceError::CanvasMissing);
				return;
			}
		};
		let mode = theme.get_untracked();
		if let Err(e) = mount(
			&canvas,
			mode,
			config.clone(),
			&context_init,
			&controller_init,
			&resize_init,
		) {
			debug!("particle field: not starting: {}", e);
		}
	});

	let context_theme = context.clone();
	Effect::new(move |_| {
		let mode = theme.get();
		if let Some(ref mut c) = *context_theme.borrow_mut() {
			if c.adapter.set_theme(mode) {
				let target = c.field.target();
				c.field.seed(target, c.adapter.palette().clone());
				info!("particle field: theme -> {:?}", mode);
			}
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = surface_point(canvas_ref, ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.input.pointer_move(&mut c.field, x, y);
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		let Some((x, y)) = surface_point(canvas_ref, touch.client_x(), touch.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.input.pointer_move(&mut c.field, x, y);
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		let Some((x, y)) = surface_point(canvas_ref, touch.client_x(), touch.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			c.input.click(&mut c.field, x, y);
		}
	};

	let context_cl = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = surface_point(canvas_ref, ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_cl.borrow_mut() {
			c.input.click(&mut c.field, x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.input.pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			on:mousemove=on_mousemove
			on:touchmove=on_touchmove
			on:touchstart=on_touchstart
			on:click=on_click
			on:mouseleave=on_mouseleave
			style="position: fixed; inset: 0; width: 100%; height: 100%; z-index: -10; display: block;"
		/>
	}
}

/// Sizes the canvas, seeds the field and starts the frame loop.
fn mount(
	canvas: &HtmlCanvasElement,
	mode: ThemeMode,
	config: FieldConfig,
	context: &SharedContext,
	controller: &AnimationController,
	resize_cb: &ResizeCallback,
) -> Result<(), SurfaceError> {
	let window: Window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
	let (w, h) = surface::viewport_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	let ctx = surface::context_2d(canvas)?;

	let adapter = SurfaceAdapter::new(w, h, mode);
	let mut field = ParticleField::new(
		config,
		adapter.width,
		adapter.height,
		adapter.palette().clone(),
		surface::random_seed(),
	);
	let target = field.target();
	field.seed(target, adapter.palette().clone());
	info!("particle field: {}x{} with {} particles", w, h, target);

	*context.borrow_mut() = Some(FieldContext {
		adapter,
		field,
		input: InputBridge::new(),
		ctx,
	});

	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok((nw, nh)) = surface::viewport_size(&win) else {
			return;
		};
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			if c.adapter.resize(nw, nh) {
				canvas_resize.set_width(c.adapter.width as u32);
				canvas_resize.set_height(c.adapter.height as u32);
				c.field.resize(c.adapter.width, c.adapter.height);
				debug!("particle field: resized to {}x{}", nw, nh);
			}
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
	}

	let context_anim = context.clone();
	controller.start(move || {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			c.field.tick(&mut c.ctx);
		}
	})
}

/// Converts client coordinates into canvas-relative ones.
fn surface_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: i32,
	client_y: i32,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
}
