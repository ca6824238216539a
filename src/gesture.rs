use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::domain::{AngleRange, ConfigError, ValueDomain};
use crate::event::{ArcGeometry, ControlEvent, EventCaptureStatus, StepDirection};
use crate::math::{distance, needle_angle_to_value, pointer_to_needle_angle, Point};
use crate::needle::NeedleState;
use crate::timer::RepeatTimer;

/// The inner edge of the draggable ring, as a fraction of the arc radius.
pub const TOUCH_BAND_INNER: f32 = 0.8;
/// The outer edge of the draggable ring, as a fraction of the arc radius.
pub const TOUCH_BAND_OUTER: f32 = 1.15;

/// Which input modality currently owns the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// The pointer is dragging the needle along the ring.
    Dragging,
    /// A held step button is auto-repeating.
    Repeating,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        *self == InteractionState::Idle
    }
}

/// What a single input event produced: host notifications in emission
/// order, plus whether the visual state (needle position or touch
/// highlight) changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputResponse {
    pub events: SmallVec<[ControlEvent; 3]>,
    pub needs_redraw: bool,
}

impl InputResponse {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.needs_redraw
    }

    fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    fn merge(&mut self, other: InputResponse) {
        self.events.extend(other.events);
        self.needs_redraw |= other.needs_redraw;
    }
}

/// Translates raw pointer, tap and long-press input into needle updates.
///
/// Owns the interaction state machine: `Dragging` and `Repeating` are
/// mutually exclusive, entering either is guarded on `Idle`, and every
/// notification a session emits is ordered begin → changes → end.
#[derive(Debug)]
pub struct GestureController {
    domain: ValueDomain,
    needle: NeedleState,
    state: InteractionState,
    repeat: RepeatTimer,
}

impl GestureController {
    pub fn new(domain: ValueDomain, initial_value: f64, repeat_interval: Duration) -> Self {
        let needle = NeedleState::from_value(&domain, initial_value);
        Self {
            domain,
            needle,
            state: InteractionState::Idle,
            repeat: RepeatTimer::new(repeat_interval),
        }
    }

    pub fn domain(&self) -> &ValueDomain {
        &self.domain
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The current (clamped, snapped) control value in degrees.
    pub fn value(&self) -> f64 {
        self.needle.value(&self.domain)
    }

    /// The raw needle angle in radians, for the renderer.
    pub fn needle_angle(&self) -> f64 {
        self.needle.angle()
    }

    /// Host-driven value assignment: clamp, snap, store.
    ///
    /// Emits no notification; only user-driven input notifies.
    pub fn set_value(&mut self, value: f64) -> InputResponse {
        let mut response = InputResponse::default();
        response.needs_redraw = self.needle.set_value(&self.domain, value);
        response
    }

    /// Replace the range and step.
    ///
    /// On success the legal value table is rebuilt and the needle is
    /// re-clamped and re-snapped under the new domain; on error nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] if `step` is not a positive number.
    pub fn reconfigure(&mut self, range: AngleRange, step: f64) -> Result<InputResponse, ConfigError> {
        let carried = needle_angle_to_value(self.needle.angle());
        self.domain.configure(range, step)?;
        self.needle.set_value(&self.domain, carried);

        // Range and step changes always invalidate the drawn arc.
        let mut response = InputResponse::default();
        response.needs_redraw = true;
        Ok(response)
    }

    /// A pointer went down at `position`.
    ///
    /// Only positions within the draggable ring
    /// (`[0.8·radius, 1.15·radius]` from the arc center) begin a drag;
    /// everything else is ignored and left uncaptured.
    pub fn on_pointer_down(
        &mut self,
        position: Point,
        geometry: ArcGeometry,
    ) -> (EventCaptureStatus, InputResponse) {
        let mut response = InputResponse::default();

        if !self.state.is_idle() {
            return (EventCaptureStatus::NotCaptured, response);
        }
        if !(geometry.radius > 0.0) {
            log::warn!(
                "ignoring pointer-down: non-positive arc radius {}",
                geometry.radius
            );
            return (EventCaptureStatus::NotCaptured, response);
        }

        let dist = distance(position, geometry.center);
        let band = (geometry.radius * TOUCH_BAND_INNER)..=(geometry.radius * TOUCH_BAND_OUTER);
        if !band.contains(&dist) {
            log::debug!("pointer-down at distance {dist} is outside the ring, ignoring");
            return (EventCaptureStatus::NotCaptured, response);
        }

        self.state = InteractionState::Dragging;
        response.push(ControlEvent::GestureStarted);
        // The touch highlight appears even before the needle moves.
        response.needs_redraw = true;
        response.merge(self.drag_to(position, geometry));

        (EventCaptureStatus::Captured, response)
    }

    /// The pointer moved. Ignored unless a drag is in progress.
    pub fn on_pointer_moved(&mut self, position: Point, geometry: ArcGeometry) -> InputResponse {
        if self.state != InteractionState::Dragging {
            return InputResponse::default();
        }
        self.drag_to(position, geometry)
    }

    /// The pointer went up, ending the drag session.
    pub fn on_pointer_up(&mut self) -> InputResponse {
        let mut response = InputResponse::default();
        if self.state != InteractionState::Dragging {
            return response;
        }

        self.state = InteractionState::Idle;
        response.push(ControlEvent::GestureFinished);
        response.needs_redraw = true;
        response
    }

    /// A step button was tapped.
    ///
    /// A discrete tap is modeled as an instantaneous session bracketing
    /// one change; a tap that changes nothing (the boundary was already
    /// reached) emits nothing at all. Ignored while another session is
    /// open.
    pub fn on_step_button_tapped(&mut self, direction: StepDirection) -> InputResponse {
        if !self.state.is_idle() {
            return InputResponse::default();
        }

        let stepped = self.step_once(direction);
        if stepped.events.is_empty() {
            return stepped;
        }

        let mut response = InputResponse::default();
        response.push(ControlEvent::GestureStarted);
        response.merge(stepped);
        response.push(ControlEvent::GestureFinished);
        response
    }

    /// A long-press began on a step button: enter `Repeating`, arm the
    /// repeat timer and apply one immediate step. Ignored while another
    /// session is open.
    pub fn on_long_press_started(
        &mut self,
        direction: StepDirection,
        now: Instant,
    ) -> InputResponse {
        let mut response = InputResponse::default();
        if !self.state.is_idle() {
            return response;
        }

        self.state = InteractionState::Repeating;
        self.repeat.start(direction, now);
        response.push(ControlEvent::GestureStarted);
        response.needs_redraw = true;
        response.merge(self.step_once(direction));
        response
    }

    /// The long-press ended (or was cancelled): the timer is disarmed
    /// synchronously and the session closes.
    pub fn on_long_press_finished(&mut self) -> InputResponse {
        let mut response = InputResponse::default();
        if self.state != InteractionState::Repeating {
            return response;
        }

        self.repeat.cancel();
        self.state = InteractionState::Idle;
        response.push(ControlEvent::GestureFinished);
        response.needs_redraw = true;
        response
    }

    /// Apply every repeat tick due at `now`.
    ///
    /// Ticks that cannot change the value (a boundary was reached) are
    /// silent.
    pub fn process_repeat_ticks(&mut self, now: Instant) -> InputResponse {
        let mut response = InputResponse::default();
        while let Some(direction) = self.repeat.poll(now) {
            response.merge(self.step_once(direction));
        }
        response
    }

    fn drag_to(&mut self, position: Point, geometry: ArcGeometry) -> InputResponse {
        let mut response = InputResponse::default();

        let folded = pointer_to_needle_angle(geometry.center, position);
        let clamped = self.domain.range().clamp_needle_angle(folded);

        let old_value = self.value();
        response.needs_redraw |= self.needle.set_angle_direct(clamped);
        let new_value = self.value();
        if new_value != old_value {
            response.push(ControlEvent::ValueChanged(new_value));
        }
        response
    }

    fn step_once(&mut self, direction: StepDirection) -> InputResponse {
        let mut response = InputResponse::default();

        let old_value = self.value();
        let target = old_value + direction.factor() * self.domain.step();
        response.needs_redraw |= self.needle.set_value(&self.domain, target);
        let new_value = self.value();
        if new_value != old_value {
            response.push(ControlEvent::ValueChanged(new_value));
        }
        response
    }
}
