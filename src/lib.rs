//! Pointer gesture classification and action dispatch for plot surfaces.
//!
//! A host plotting surface forwards raw pointer events to an
//! [`ActionsManager`]. The manager classifies each event into a trigger (the
//! zone of the axes, the button and the gesture) and runs the single handler
//! registered for it. Configuration, the stock contour drawing action and a
//! trace replay harness are exposed so hosts and tools share the same code.

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod input;
pub mod trace;

pub use config::Config;
pub use dispatch::{Action, ActionsManager, DispatchError, HostSurface};
pub use input::{GestureSettings, PointerEvent, TriggerSignature};
