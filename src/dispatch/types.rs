//! Error and outcome types for trigger dispatch.

use crate::input::{Trigger, TriggerSignature};
use std::fmt;
use thiserror::Error;

/// Errors raised while registering actions or dispatching pointer events.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Two or more registered signatures contain the same occurrence.
    #[error("Multiple actions for trigger {trigger}: {}", .handlers.join(", "))]
    AmbiguousTrigger {
        trigger: Trigger,
        handlers: Vec<String>,
    },

    #[error("Action '{0}' is not registered")]
    ActionNotRegistered(String),

    #[error("Action '{0}' is already registered")]
    ActionAlreadyRegistered(String),

    /// The host surface was dropped while the manager still referenced it.
    #[error("Host surface is no longer available")]
    Detached,

    #[error("Handler {handler} failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: anyhow::Error,
    },
}

/// A registered handler, addressed by its owning action and handler name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerKey {
    pub action: String,
    pub handler: String,
    pub signature: TriggerSignature,
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} {}", self.action, self.handler, self.signature)
    }
}

/// Record of a handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Trigger that selected the handler; for continuous gestures this is the
    /// trigger resolved when the episode was bound
    pub trigger: Trigger,
    pub action: String,
    pub handler: String,
}

impl Dispatch {
    pub(crate) fn new(trigger: Trigger, key: &HandlerKey) -> Self {
        Self {
            trigger,
            action: key.action.clone(),
            handler: key.handler.clone(),
        }
    }
}

pub type DispatchResult = Result<Option<Dispatch>, DispatchError>;
