// ---------------------------------------------------------------------------------
//
//       .-~~~-.
//      /   |   \       Protractor Widget Library
//     '----o----'
//
// MIT License
// https://github.com/protractor-widget/protractor/blob/main/LICENSE
//
// ---------------------------------------------------------------------------------

use std::time::{Duration, Instant};

use rgb::RGBA8;

use crate::domain::{AngleRange, ConfigError, ValueDomain};
use crate::event::{ArcGeometry, ControlEvent, EventCaptureStatus, StepDirection, UpdateFlags};
use crate::event_queue::{event_channel, EventReceiver, EventSender};
use crate::gesture::{GestureController, InputResponse, InteractionState};
use crate::math::{Angle, Point};
use crate::style::{FontProperties, ProtractorStyle};
use crate::timer::DEFAULT_REPEAT_INTERVAL;

/// The enabled state of the two step buttons.
///
/// The decrement button disables at the minimum legal value and the
/// increment button at the maximum; a single-valued domain disables both
/// permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepButtonStates {
    pub decrement_enabled: bool,
    pub increment_enabled: bool,
}

impl StepButtonStates {
    pub fn enabled_for(&self, direction: StepDirection) -> bool {
        match direction {
            StepDirection::Decrement => self.decrement_enabled,
            StepDirection::Increment => self.increment_enabled,
        }
    }
}

pub struct ProtractorBuilder {
    pub angle_range: AngleRange,
    pub step_value: f64,
    pub value: Option<f64>,
    pub style: ProtractorStyle,
    pub repeat_interval: Duration,
}

impl ProtractorBuilder {
    pub fn new() -> Self {
        Self {
            angle_range: AngleRange::FULL,
            step_value: ValueDomain::DEFAULT_STEP,
            value: None,
            style: ProtractorStyle::default(),
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }

    /// The selectable range in degrees.
    ///
    /// By default this is the full half-circle, `0` to `180`.
    pub const fn angle_range(mut self, range: AngleRange) -> Self {
        self.angle_range = range;
        self
    }

    /// The degrees per discrete increment.
    ///
    /// By default this is set to `1.0`.
    pub const fn step_value(mut self, step: f64) -> Self {
        self.step_value = step;
        self
    }

    /// The initial value (clamped and snapped on build).
    ///
    /// If this method isn't used, the needle starts at the largest legal
    /// value, where the classic control's needle rests.
    pub const fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn style(mut self, style: ProtractorStyle) -> Self {
        self.style = style;
        self
    }

    /// The delay between auto-repeat steps while a button is held.
    ///
    /// By default this is set to `125` milliseconds.
    pub const fn repeat_interval(mut self, interval: Duration) -> Self {
        self.repeat_interval = interval;
        self
    }

    /// Build the control together with the receiving half of its
    /// notification channel.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] if the step value is not positive.
    /// (The range is validated when the [`AngleRange`] is constructed.)
    pub fn build(self) -> Result<(Protractor, EventReceiver<ControlEvent>), ConfigError> {
        let domain = ValueDomain::new(self.angle_range, self.step_value)?;
        let initial_value = self.value.unwrap_or_else(|| domain.max_value());
        let gesture = GestureController::new(domain, initial_value, self.repeat_interval);

        let (sender, receiver) = event_channel();
        let button_states = compute_button_states(&gesture);

        let control = Protractor {
            gesture,
            style: self.style,
            button_states,
            update: UpdateFlags::all(),
            events: sender,
        };

        Ok((control, receiver))
    }
}

impl Default for ProtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A semicircular angle-picker control.
///
/// The rendering/input collaborator invokes the `on_*` handlers directly
/// with the pointer position and the current [`ArcGeometry`], then polls
/// [`Protractor::take_update_flags`]; the host drains the
/// [`EventReceiver`] returned by the builder. Everything runs on the
/// owning thread; dropping the control takes the repeat timer with it, so
/// a dropped control can emit nothing.
pub struct Protractor {
    gesture: GestureController,
    style: ProtractorStyle,
    button_states: StepButtonStates,
    update: UpdateFlags,
    events: EventSender<ControlEvent>,
}

impl Protractor {
    pub fn builder() -> ProtractorBuilder {
        ProtractorBuilder::new()
    }

    // --- Configuration surface ---

    /// The current value in degrees, always a member of the legal value
    /// set.
    pub fn value(&self) -> f64 {
        self.gesture.value()
    }

    /// Set the value, clamping into the range and snapping to the nearest
    /// legal value.
    ///
    /// Emits no notification — only user input notifies — but requests a
    /// redraw and refreshes the button states.
    pub fn set_value(&mut self, value: f64) {
        let response = self.gesture.set_value(value);
        self.apply(response);
    }

    pub fn angle_range(&self) -> AngleRange {
        self.gesture.domain().range()
    }

    pub fn step_value(&self) -> f64 {
        self.gesture.domain().step()
    }

    /// Replace the range and step in one validated operation: the legal
    /// value table is rebuilt, the needle re-snapped, a redraw requested
    /// and the button states refreshed. On error nothing changes.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] if `step` is not a positive number.
    pub fn configure(&mut self, range: AngleRange, step: f64) -> Result<(), ConfigError> {
        let response = self.gesture.reconfigure(range, step)?;
        self.apply(response);
        Ok(())
    }

    /// Replace the selectable range, keeping the current step.
    ///
    /// # Errors
    ///
    /// See [`Protractor::configure`].
    pub fn set_angle_range(&mut self, range: AngleRange) -> Result<(), ConfigError> {
        self.configure(range, self.step_value())
    }

    /// Replace the step value, keeping the current range.
    ///
    /// # Errors
    ///
    /// See [`Protractor::configure`].
    pub fn set_step_value(&mut self, step: f64) -> Result<(), ConfigError> {
        self.configure(self.angle_range(), step)
    }

    // --- Style surface (pass-through; only triggers redraws) ---

    pub fn style(&self) -> &ProtractorStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ProtractorStyle) {
        if self.style != style {
            self.style = style;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    pub fn set_tint_color(&mut self, color: RGBA8) {
        if self.style.tint_color != color {
            self.style.tint_color = color;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    pub fn set_font(&mut self, font: FontProperties) {
        if self.style.font != font {
            self.style.font = font;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    pub fn set_should_draw_separator_line(&mut self, draw: bool) {
        if self.style.should_draw_separator_line != draw {
            self.style.should_draw_separator_line = draw;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    pub fn set_should_draw_value_label(&mut self, draw: bool) {
        if self.style.should_draw_value_label != draw {
            self.style.should_draw_value_label = draw;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    pub fn set_lines_step(&mut self, step: Angle) {
        if self.style.lines_step != step {
            self.style.lines_step = step;
            self.update |= UpdateFlags::REDRAW;
        }
    }

    // --- Read surface for the rendering collaborator ---

    /// The raw needle angle in radians (internal coordinates: `-π` is the
    /// leftmost point of the arc, `0` the rightmost).
    pub fn needle_angle(&self) -> f64 {
        self.gesture.needle_angle()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.gesture.state()
    }

    pub fn button_states(&self) -> StepButtonStates {
        self.button_states
    }

    /// Take (and clear) the accumulated dirty flags.
    pub fn take_update_flags(&mut self) -> UpdateFlags {
        std::mem::replace(&mut self.update, UpdateFlags::empty())
    }

    // --- Input surface, invoked directly by the collaborator ---

    /// A pointer went down at `position` within the control's bounds.
    pub fn on_pointer_down(&mut self, position: Point, geometry: ArcGeometry) -> EventCaptureStatus {
        let (status, response) = self.gesture.on_pointer_down(position, geometry);
        self.apply(response);
        status
    }

    pub fn on_pointer_moved(&mut self, position: Point, geometry: ArcGeometry) {
        let response = self.gesture.on_pointer_moved(position, geometry);
        self.apply(response);
    }

    pub fn on_pointer_up(&mut self) {
        let response = self.gesture.on_pointer_up();
        self.apply(response);
    }

    pub fn on_step_button_tapped(&mut self, direction: StepDirection) {
        let response = self.gesture.on_step_button_tapped(direction);
        self.apply(response);
    }

    pub fn on_long_press_started(&mut self, direction: StepDirection, now: Instant) {
        let response = self.gesture.on_long_press_started(direction, now);
        self.apply(response);
    }

    pub fn on_long_press_finished(&mut self) {
        let response = self.gesture.on_long_press_finished();
        self.apply(response);
    }

    /// Deliver every repeat tick due at `now`. Call from the host's event
    /// loop while a long-press is held.
    pub fn process_repeat_ticks(&mut self, now: Instant) {
        let response = self.gesture.process_repeat_ticks(now);
        self.apply(response);
    }

    fn apply(&mut self, response: InputResponse) {
        if response.needs_redraw {
            self.update |= UpdateFlags::REDRAW;
        }
        for event in response.events {
            self.events.send(event);
        }
        self.refresh_button_states();
    }

    fn refresh_button_states(&mut self) {
        let states = compute_button_states(&self.gesture);
        if states != self.button_states {
            self.button_states = states;
            self.update |= UpdateFlags::BUTTON_STATES;
        }
    }
}

fn compute_button_states(gesture: &GestureController) -> StepButtonStates {
    let domain = gesture.domain();
    if domain.is_single_valued() {
        return StepButtonStates {
            decrement_enabled: false,
            increment_enabled: false,
        };
    }

    let value = gesture.value();
    StepButtonStates {
        decrement_enabled: value != domain.min_value(),
        increment_enabled: value != domain.max_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    const GEOMETRY: ArcGeometry = ArcGeometry {
        center: Point::new(100.0, 100.0),
        radius: 100.0,
    };

    fn build(
        lower: f64,
        upper: f64,
        step: f64,
        value: f64,
    ) -> (Protractor, EventReceiver<ControlEvent>) {
        Protractor::builder()
            .angle_range(AngleRange::new(lower, upper).unwrap())
            .step_value(step)
            .value(value)
            .build()
            .unwrap()
    }

    fn drain(rx: &mut EventReceiver<ControlEvent>) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_builder_defaults() {
        let (mut control, rx) = Protractor::builder().build().unwrap();

        // The needle rests at the far right of the full half-circle.
        assert_eq!(control.value(), 180.0);
        assert_eq!(control.angle_range(), AngleRange::FULL);
        assert_eq!(control.step_value(), 1.0);
        assert_eq!(control.interaction_state(), InteractionState::Idle);

        let states = control.button_states();
        assert!(states.decrement_enabled);
        assert!(!states.increment_enabled);

        // Everything is dirty for the first paint.
        assert_eq!(control.take_update_flags(), UpdateFlags::all());
        assert_eq!(control.take_update_flags(), UpdateFlags::empty());
        assert!(rx.is_empty());
    }

    #[test]
    fn test_invalid_builder_step_fails() {
        let result = Protractor::builder().step_value(0.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_tap_notifies_and_flags() {
        let (mut control, mut rx) = build(0.0, 180.0, 10.0, 0.0);
        control.take_update_flags();

        control.on_step_button_tapped(StepDirection::Increment);

        assert_eq!(
            drain(&mut rx),
            vec![
                ControlEvent::GestureStarted,
                ControlEvent::ValueChanged(10.0),
                ControlEvent::GestureFinished,
            ]
        );
        assert_eq!(control.value(), 10.0);

        // The needle moved and the decrement button re-enabled.
        let flags = control.take_update_flags();
        assert!(flags.contains(UpdateFlags::REDRAW));
        assert!(flags.contains(UpdateFlags::BUTTON_STATES));
    }

    #[test]
    fn test_tap_at_minimum_is_silent() {
        let (mut control, mut rx) = build(0.0, 180.0, 10.0, 0.0);
        control.take_update_flags();

        control.on_step_button_tapped(StepDirection::Decrement);

        assert!(drain(&mut rx).is_empty());
        assert_eq!(control.value(), 0.0);
        assert_eq!(control.take_update_flags(), UpdateFlags::empty());
    }

    #[test]
    fn test_button_states_track_boundaries() {
        let (mut control, _rx) = build(0.0, 180.0, 10.0, 90.0);
        control.take_update_flags();

        control.set_value(180.0);
        let states = control.button_states();
        assert!(states.decrement_enabled);
        assert!(!states.increment_enabled);
        assert!(control
            .take_update_flags()
            .contains(UpdateFlags::BUTTON_STATES));

        control.set_value(0.0);
        let states = control.button_states();
        assert!(!states.enabled_for(StepDirection::Decrement));
        assert!(states.enabled_for(StepDirection::Increment));
    }

    #[test]
    fn test_single_valued_domain_disables_both_buttons() {
        let (control, _rx) = build(42.0, 42.0, 5.0, 42.0);

        let states = control.button_states();
        assert!(!states.decrement_enabled);
        assert!(!states.increment_enabled);
    }

    #[test]
    fn test_set_value_snaps_and_flags_without_notifying() {
        let (mut control, mut rx) = build(0.0, 180.0, 10.0, 0.0);
        control.take_update_flags();

        control.set_value(47.0);

        assert_eq!(control.value(), 50.0);
        assert!(drain(&mut rx).is_empty());
        assert!(control.take_update_flags().contains(UpdateFlags::REDRAW));
    }

    #[test]
    fn test_drag_through_the_control_surface() {
        let (mut control, mut rx) = build(0.0, 180.0, 10.0, 0.0);
        control.take_update_flags();

        let status = control.on_pointer_down(point(100.0, 0.0), GEOMETRY);
        assert_eq!(status, EventCaptureStatus::Captured);
        control.on_pointer_up();

        assert_eq!(
            drain(&mut rx),
            vec![
                ControlEvent::GestureStarted,
                ControlEvent::ValueChanged(90.0),
                ControlEvent::GestureFinished,
            ]
        );
        assert!(control.take_update_flags().contains(UpdateFlags::REDRAW));
    }

    #[test]
    fn test_long_press_through_the_control_surface() {
        let t0 = Instant::now();
        let interval = Duration::from_millis(125);
        let (mut control, mut rx) = build(0.0, 180.0, 5.0, 10.0);
        control.take_update_flags();

        control.on_long_press_started(StepDirection::Increment, t0);
        control.process_repeat_ticks(t0 + interval * 2);
        control.on_long_press_finished();

        let events = drain(&mut rx);
        assert_eq!(events.first(), Some(&ControlEvent::GestureStarted));
        assert_eq!(events.last(), Some(&ControlEvent::GestureFinished));
        let changes = events
            .iter()
            .filter(|e| matches!(e, ControlEvent::ValueChanged(_)))
            .count();
        assert_eq!(changes, 3);
        assert_eq!(control.value(), 25.0);

        // Nothing escapes the cancelled timer.
        control.process_repeat_ticks(t0 + interval * 50);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(control.value(), 25.0);
    }

    #[test]
    fn test_reconfigure_updates_everything() {
        let (mut control, _rx) = build(0.0, 180.0, 10.0, 50.0);
        control.take_update_flags();

        control
            .configure(AngleRange::new(0.0, 30.0).unwrap(), 10.0)
            .unwrap();

        assert_eq!(control.value(), 30.0);
        let flags = control.take_update_flags();
        assert!(flags.contains(UpdateFlags::REDRAW));
        assert!(flags.contains(UpdateFlags::BUTTON_STATES));
    }

    #[test]
    fn test_failed_reconfigure_is_atomic() {
        let (mut control, _rx) = build(0.0, 180.0, 10.0, 50.0);
        control.take_update_flags();

        assert_eq!(
            control.set_step_value(-1.0),
            Err(ConfigError::InvalidStep(-1.0))
        );
        assert_eq!(control.step_value(), 10.0);
        assert_eq!(control.value(), 50.0);
        assert_eq!(control.take_update_flags(), UpdateFlags::empty());
    }

    #[test]
    fn test_style_setters_only_redraw_on_change() {
        let (mut control, mut rx) = build(0.0, 180.0, 10.0, 50.0);
        control.take_update_flags();

        control.set_tint_color(RGBA8::new(255, 0, 0, 255));
        assert_eq!(control.take_update_flags(), UpdateFlags::REDRAW);

        // Assigning the same color again is not an update.
        control.set_tint_color(RGBA8::new(255, 0, 0, 255));
        assert_eq!(control.take_update_flags(), UpdateFlags::empty());

        control.set_should_draw_separator_line(false);
        control.set_lines_step(Angle::degrees(15.0));
        assert_eq!(control.take_update_flags(), UpdateFlags::REDRAW);

        assert!(drain(&mut rx).is_empty());
    }
}
