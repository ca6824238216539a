pub use crate::domain::{AngleRange, ConfigError, EmptyDomainError, ValueDomain};
pub use crate::event::{
    ArcGeometry, ControlEvent, EventCaptureStatus, StepDirection, UpdateFlags,
};
pub use crate::event_queue::{event_channel, EventReceiver, EventSender};
pub use crate::gesture::{
    GestureController, InputResponse, InteractionState, TOUCH_BAND_INNER, TOUCH_BAND_OUTER,
};
pub use crate::math::{degrees, point, radians, Angle, Point, Rect, Size, Vector};
pub use crate::needle::NeedleState;
pub use crate::style::{FontProperties, ProtractorStyle};
pub use crate::timer::{RepeatTimer, DEFAULT_REPEAT_INTERVAL};
pub use crate::{Protractor, ProtractorBuilder, StepButtonStates};
