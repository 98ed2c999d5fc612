//! The actions manager: registry, episode state and host handle.

use super::action::Action;
use super::host::HostSurface;
use super::registry::Registry;
use super::types::{DispatchError, HandlerKey};
use crate::config::InteractionConfig;
use crate::input::{GestureClassifier, GestureSettings, Trigger};
use std::rc::{Rc, Weak};

/// Handler bound to a continuous gesture for the rest of its episode.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoundHandler {
    pub(crate) key: HandlerKey,
    pub(crate) trigger: Trigger,
}

/// Routes pointer events from a host surface to registered actions.
///
/// Each raw event is classified into a trigger (zone, button, gesture) and
/// matched against the bindings of every registered action. At most one
/// handler runs per trigger; overlapping bindings are reported as
/// [`DispatchError::AmbiguousTrigger`] when first exercised.
///
/// The manager is single-threaded: it holds the host through [`Weak`] and is
/// therefore neither `Send` nor `Sync`.
pub struct ActionsManager {
    host: Weak<dyn HostSurface>,
    pub(crate) registry: Registry,
    pub(crate) classifier: GestureClassifier<BoundHandler>,
}

impl ActionsManager {
    /// Creates a manager attached to `host` with no actions.
    pub fn new<H: HostSurface + 'static>(host: &Rc<H>, settings: GestureSettings) -> Self {
        let host: Weak<dyn HostSurface> = Rc::downgrade(host) as Weak<dyn HostSurface>;
        log::debug!(
            "Actions manager created (edge fraction {:.2}, delay {:?})",
            settings.edge_fraction(),
            settings.delay()
        );
        Self {
            host,
            registry: Registry::new(),
            classifier: GestureClassifier::new(settings),
        }
    }

    /// Creates a manager using the `[interaction]` section of the config.
    pub fn from_config<H: HostSurface + 'static>(host: &Rc<H>, config: &InteractionConfig) -> Self {
        Self::new(host, config.settings())
    }

    /// Creates a manager and registers `actions` in order.
    pub fn with_actions<H: HostSurface + 'static>(
        host: &Rc<H>,
        settings: GestureSettings,
        actions: Vec<Box<dyn Action>>,
    ) -> Result<Self, DispatchError> {
        let mut manager = Self::new(host, settings);
        for action in actions {
            manager.register_boxed(action)?;
        }
        Ok(manager)
    }

    pub fn settings(&self) -> &GestureSettings {
        self.classifier.settings()
    }

    /// Returns the host surface, or [`DispatchError::Detached`] if it is gone.
    pub fn host(&self) -> Result<Rc<dyn HostSurface>, DispatchError> {
        self.host.upgrade().ok_or(DispatchError::Detached)
    }

    /// Asks the host to repaint.
    pub fn draw(&self) -> Result<(), DispatchError> {
        self.host()?.request_redraw();
        Ok(())
    }

    pub fn register(&mut self, action: impl Action + 'static) -> Result<(), DispatchError> {
        self.registry.register(Box::new(action))
    }

    pub fn register_boxed(&mut self, action: Box<dyn Action>) -> Result<(), DispatchError> {
        self.registry.register(action)
    }

    /// Removes an action and all its bindings, handing the action back.
    ///
    /// An episode bound to one of its handlers is dropped.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn Action>, DispatchError> {
        let action = self.registry.unregister(name)?;
        if self.bound_action() == Some(name) {
            self.classifier.reset();
        }
        Ok(action)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Borrows a registered action by concrete type.
    pub fn action<T: Action + 'static>(&self, name: &str) -> Option<&T> {
        self.registry.get(name)?.as_any().downcast_ref::<T>()
    }

    pub fn action_mut<T: Action + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.registry.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// Resolves the handler for a trigger without running it.
    pub fn lookup(&self, trigger: &Trigger) -> Result<Option<HandlerKey>, DispatchError> {
        self.registry.lookup(trigger)
    }

    /// Forgets any buffered events and bound handler.
    pub fn clean_events(&mut self) {
        self.classifier.reset();
    }

    fn bound_action(&self) -> Option<&str> {
        self.classifier
            .bound()
            .map(|bound| bound.key.action.as_str())
    }
}
