// Frame loop with an explicit lifecycle. A LoopControl is a shared flag the
// frame callback checks before asking the browser for another frame, so
// stopping (or dropping the loop) cancels the recurring work for good.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct LoopControl {
    state: Rc<Cell<LoopState>>,
}

impl LoopControl {
    pub fn new() -> Self {
        LoopControl {
            state: Rc::new(Cell::new(LoopState::Idle)),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }

    /// Returns true when this call moved the loop into `Running`.
    pub fn start(&self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state.set(LoopState::Running);
        true
    }

    /// Returns true when this call stopped a running loop.
    pub fn stop(&self) -> bool {
        let was_running = self.is_running();
        if self.state.get() != LoopState::Idle {
            self.state.set(LoopState::Stopped);
        }
        was_running
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        LoopControl::new()
    }
}

/// Runs one frame if the loop is live. Returns whether the next frame should
/// be scheduled; a callback that stops the loop prevents its own reschedule.
pub fn run_frame<F: FnMut() + ?Sized>(control: &LoopControl, on_frame: &mut F) -> bool {
    if !control.is_running() {
        return false;
    }
    on_frame();
    control.is_running()
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` driven loop around a frame callback.
pub struct AnimationLoop {
    control: LoopControl,
    frame: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn new<F: FnMut() + 'static>(mut on_frame: F) -> Self {
        let control = LoopControl::new();
        let frame: FrameSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let closure = {
            let control = control.clone();
            let frame = frame.clone();
            let pending = pending.clone();
            Closure::wrap(Box::new(move || {
                pending.set(None);
                if !run_frame(&control, &mut on_frame) {
                    return;
                }
                if let Err(err) = request_frame(&frame, &pending) {
                    log::warn!("could not schedule next frame: {:?}", err);
                    control.stop();
                }
            }) as Box<dyn FnMut()>)
        };
        *frame.borrow_mut() = Some(closure);

        AnimationLoop {
            control,
            frame,
            pending,
        }
    }

    pub fn control(&self) -> &LoopControl {
        &self.control
    }

    pub fn start(&self) -> Result<(), JsValue> {
        if !self.control.start() {
            return Ok(());
        }
        log::debug!("animation loop started");
        request_frame(&self.frame, &self.pending).map_err(|err| {
            self.control.stop();
            err
        })
    }

    pub fn stop(&self) {
        if self.control.stop() {
            log::debug!("animation loop stopped");
        }
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        // the closure holds a clone of `frame`, break the cycle
        self.frame.borrow_mut().take();
    }
}

fn request_frame(frame: &FrameSlot, pending: &Cell<Option<i32>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let slot = frame.borrow();
    let callback = slot
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback already dropped"))?;
    let id = window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())?;
    pending.set(Some(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_runs_nothing() {
        let control = LoopControl::new();
        let mut frames = 0;
        assert!(!run_frame(&control, &mut || frames += 1));
        assert_eq!(frames, 0);
        assert_eq!(control.state(), LoopState::Idle);
    }

    #[test]
    fn running_loop_reschedules_until_stopped() {
        let control = LoopControl::new();
        assert!(control.start());
        assert!(!control.start());

        let mut frames = 0;
        for _ in 0..3 {
            assert!(run_frame(&control, &mut || frames += 1));
        }
        assert!(control.stop());
        assert!(!run_frame(&control, &mut || frames += 1));
        assert_eq!(frames, 3);
        assert_eq!(control.state(), LoopState::Stopped);
    }

    #[test]
    fn frame_that_stops_the_loop_is_not_rescheduled() {
        let control = LoopControl::new();
        control.start();
        let inner = control.clone();
        assert!(!run_frame(&control, &mut || {
            inner.stop();
        }));
    }

    #[test]
    fn stopped_loop_can_restart() {
        let control = LoopControl::new();
        control.start();
        control.stop();
        assert!(!control.stop());
        assert!(control.start());
        assert!(control.is_running());
    }

    #[test]
    fn stopping_an_idle_loop_leaves_it_idle() {
        let control = LoopControl::new();
        assert!(!control.stop());
        assert_eq!(control.state(), LoopState::Idle);
    }
}
