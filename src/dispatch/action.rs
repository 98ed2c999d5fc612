//! Contract implemented by interactive behaviours plugged into the manager.

use crate::input::{PointerEvent, TriggerSignature};
use std::any::Any;

/// Return type of a handler: the event to hand back as `previous` on the next
/// invocation within the same episode.
pub type HandlerResult = anyhow::Result<Option<PointerEvent>>;

/// A trigger signature paired with the name of the handler it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub signature: TriggerSignature,
    pub handler: String,
}

impl Binding {
    pub fn new(signature: TriggerSignature, handler: impl Into<String>) -> Self {
        Self {
            signature,
            handler: handler.into(),
        }
    }
}

/// Upcast helper so registered actions can be recovered by concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An interactive behaviour: a named bundle of bindings and their handlers.
///
/// Handlers receive the event that completed the gesture and the previous
/// relevant event. For clicks and picks `previous` is the press (or pick) that
/// started the episode; for drags it starts as that press and is then whatever
/// the handler returned last time. Handlers must not block.
pub trait Action: AsAny {
    /// Unique name the action is registered under.
    fn name(&self) -> &str;

    /// Bindings this action wants. Read once, at registration.
    fn bindings(&self) -> Vec<Binding>;

    /// Runs the handler named by one of this action's bindings.
    fn handle(
        &mut self,
        handler: &str,
        current: &PointerEvent,
        previous: Option<&PointerEvent>,
    ) -> HandlerResult;
}
