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

use bitflags::bitflags;

use crate::math::Point;

/// Whether or not a pointer event was consumed by the control.
///
/// Pointer-down input outside the draggable ring is not an error: the
/// control reports it uncaptured and the collaborator may route it
/// elsewhere.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCaptureStatus {
    #[default]
    NotCaptured,
    Captured,
}

/// The direction of a step button (the `±1` button tags of the classic
/// control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepDirection {
    Decrement,
    Increment,
}

impl StepDirection {
    /// The signed multiplier applied to the step value.
    pub fn factor(&self) -> f64 {
        match self {
            StepDirection::Decrement => -1.0,
            StepDirection::Increment => 1.0,
        }
    }
}

/// The arc placement the rendering collaborator derived from the control's
/// current bounds.
///
/// Consumed anew on every pointer event; the core performs no layout of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f32,
}

/// Notifications emitted to the host.
///
/// Within one interaction session a `GestureStarted` always precedes any
/// `ValueChanged`, which always precedes that session's `GestureFinished`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// The user has started interacting with the control
    /// ("editing did begin").
    GestureStarted,
    /// The selected value has changed.
    ValueChanged(f64),
    /// The interaction has finished ("editing did end").
    GestureFinished,
}

bitflags! {
    /// Dirty state reported to the rendering collaborator, polled with
    /// `Protractor::take_update_flags` after delivering input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UpdateFlags: u8 {
        /// The control needs to be redrawn.
        const REDRAW = 1 << 0;
        /// The enabled state of the step buttons changed.
        const BUTTON_STATES = 1 << 1;
    }
}
