//! Action registry and pointer event dispatch.
//!
//! [`ActionsManager`] owns the registered [`Action`]s, the per-episode gesture
//! state and a weak handle to the [`HostSurface`]. Hosts feed it raw events;
//! it resolves each into a trigger, runs at most one handler and asks the host
//! to redraw.

mod action;
mod core;
mod host;
mod pointer;
mod registry;
mod types;

pub use action::{Action, AsAny, Binding, HandlerResult};
pub use self::core::ActionsManager;
pub use host::{HostSurface, RedrawCounter};
pub use registry::Registry;
pub use types::{Dispatch, DispatchError, DispatchResult, HandlerKey};
