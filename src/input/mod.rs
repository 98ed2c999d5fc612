//! Pointer input classification.
//!
//! This module translates raw host pointer events into resolved triggers: the
//! zone of the axes the pointer is in, the button involved, and the gesture
//! performed. It holds no handlers; lookup and dispatch live in [`crate::dispatch`].

pub mod events;
pub mod gesture;
pub mod trigger;
pub mod zone;

// Re-export commonly used types at module level
pub use events::{Bounds, Button, EventKind, PickTarget, Point, PointerEvent};
pub use gesture::{GestureClassifier, GestureSettings, Motion, Resolution};
pub use trigger::{Gesture, Trigger, TriggerSignature};
pub use zone::{Zone, ZoneSet, classify};
