//! Owner of the self-rescheduling `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;

use super::error::SurfaceError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs a step function once per display frame until stopped.
///
/// Exactly one frame is ever pending. [`AnimationController::stop`] cancels it
/// and drops the callback, which also breaks the closure's reference to itself.
#[derive(Default)]
pub struct AnimationController {
	frame: FrameCallback,
	handle: Rc<Cell<Option<i32>>>,
	running: Rc<Cell<bool>>,
}

impl AnimationController {
	/// A stopped controller.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether a frame loop is active.
	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Starts calling `step` every frame. No-op if already running.
	pub fn start(&self, mut step: impl FnMut() + 'static) -> Result<(), SurfaceError> {
		if self.running.get() {
			return Ok(());
		}
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;

		let (frame, handle, running) = (self.frame.clone(), self.handle.clone(), self.running.clone());
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			handle.set(None);
			if !running.get() {
				return;
			}
			step();
			if let (Some(cb), Some(win)) = (frame.borrow().as_ref(), web_sys::window()) {
				handle.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		self.running.set(true);
		if let Some(ref cb) = *self.frame.borrow() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			self.handle.set(Some(id));
		}
		debug!("animation: started");
		Ok(())
	}

	/// Cancels the pending frame, if any. A frame already executing finishes.
	pub fn stop(&self) {
		if !self.running.replace(false) {
			return;
		}
		if let (Some(id), Some(win)) = (self.handle.take(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		self.frame.borrow_mut().take();
		debug!("animation: stopped");
	}
}
