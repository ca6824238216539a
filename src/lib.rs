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

pub mod domain;
pub mod event;
pub mod event_queue;
pub mod gesture;
pub mod math;
pub mod needle;
pub mod prelude;
mod protractor;
pub mod style;
pub mod timer;

pub use event_queue::{event_channel, EventReceiver, EventSender};
pub use protractor::{Protractor, ProtractorBuilder, StepButtonStates};
