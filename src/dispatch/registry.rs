//! Registered actions and trigger lookup.

use super::action::{Action, Binding};
use super::types::{DispatchError, HandlerKey};
use crate::input::{PointerEvent, Trigger};
use log::debug;

struct Registered {
    action: Box<dyn Action>,
    name: String,
    bindings: Vec<Binding>,
}

/// Actions in registration order, with the bindings each declared.
///
/// Overlapping bindings are accepted here and only reported when an occurrence
/// actually falls in the overlap.
#[derive(Default)]
pub struct Registry {
    actions: Vec<Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, action: Box<dyn Action>) -> Result<(), DispatchError> {
        let name = action.name().to_string();
        if self.contains(&name) {
            return Err(DispatchError::ActionAlreadyRegistered(name));
        }
        let bindings = action.bindings();
        debug!("Registered action '{}' with {} binding(s)", name, bindings.len());
        self.actions.push(Registered {
            action,
            name,
            bindings,
        });
        Ok(())
    }

    /// Removes an action and every binding it declared.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn Action>, DispatchError> {
        let index = self
            .actions
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| DispatchError::ActionNotRegistered(name.to_string()))?;
        let removed = self.actions.remove(index);
        debug!(
            "Unregistered action '{}' ({} binding(s))",
            removed.name,
            removed.bindings.len()
        );
        Ok(removed.action)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.iter().any(|entry| entry.name == name)
    }

    /// Names of registered actions in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|entry| entry.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Action + 'static)> {
        self.actions
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.action.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Action + 'static)> {
        self.actions
            .iter_mut()
            .find(|entry| entry.name == name)
            .map(|entry| entry.action.as_mut())
    }

    /// Finds the single handler whose binding contains `trigger`.
    ///
    /// No match is `Ok(None)`. More than one match is a configuration error
    /// naming every conflicting handler.
    pub fn lookup(&self, trigger: &Trigger) -> Result<Option<HandlerKey>, DispatchError> {
        let mut matches: Vec<HandlerKey> = self
            .actions
            .iter()
            .flat_map(|entry| {
                entry
                    .bindings
                    .iter()
                    .filter(move |binding| binding.signature.contains(trigger))
                    .map(move |binding| HandlerKey {
                        action: entry.name.clone(),
                        handler: binding.handler.clone(),
                        signature: binding.signature,
                    })
            })
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(DispatchError::AmbiguousTrigger {
                trigger: *trigger,
                handlers: matches.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// Runs the handler behind `key`.
    pub fn invoke(
        &mut self,
        key: &HandlerKey,
        current: &PointerEvent,
        previous: Option<&PointerEvent>,
    ) -> Result<Option<PointerEvent>, DispatchError> {
        let action = self
            .get_mut(&key.action)
            .ok_or_else(|| DispatchError::ActionNotRegistered(key.action.clone()))?;
        action
            .handle(&key.handler, current, previous)
            .map_err(|source| DispatchError::Handler {
                handler: format!("{}::{}", key.action, key.handler),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::action::HandlerResult;
    use crate::input::{Button, Gesture, TriggerSignature, Zone, ZoneSet};

    struct Fixed {
        name: &'static str,
        bindings: Vec<Binding>,
    }

    impl Action for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn bindings(&self) -> Vec<Binding> {
            self.bindings.clone()
        }

        fn handle(
            &mut self,
            handler: &str,
            _current: &PointerEvent,
            _previous: Option<&PointerEvent>,
        ) -> HandlerResult {
            if handler == "fail" {
                anyhow::bail!("refused");
            }
            Ok(None)
        }
    }

    fn fixed(name: &'static str, zone: ZoneSet, gesture: Gesture, handler: &str) -> Box<Fixed> {
        Box::new(Fixed {
            name,
            bindings: vec![Binding::new(
                TriggerSignature::new(zone, Button::Left, gesture),
                handler,
            )],
        })
    }

    fn click_at(zone: Zone) -> Trigger {
        Trigger::new(zone, Button::Left, Gesture::Click)
    }

    #[test]
    fn lookup_without_bindings_is_silent() {
        let registry = Registry::new();
        assert!(registry.lookup(&click_at(Zone::Centre)).unwrap().is_none());
    }

    #[test]
    fn overlap_is_accepted_at_registration_and_reported_at_lookup() {
        let mut registry = Registry::new();
        registry
            .register(fixed("a", ZoneSet::ANY, Gesture::Click, "one"))
            .unwrap();
        registry
            .register(fixed("b", Zone::Centre.into(), Gesture::Click, "two"))
            .unwrap();

        let key = registry.lookup(&click_at(Zone::North)).unwrap().unwrap();
        assert_eq!(key.action, "a");

        match registry.lookup(&click_at(Zone::Centre)) {
            Err(DispatchError::AmbiguousTrigger { handlers, .. }) => {
                assert_eq!(handlers.len(), 2);
                assert!(handlers[0].starts_with("a::one"));
                assert!(handlers[1].starts_with("b::two"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = Registry::new();
        registry
            .register(fixed("a", ZoneSet::ANY, Gesture::Click, "one"))
            .unwrap();
        let err = registry
            .register(fixed("a", ZoneSet::EDGE, Gesture::Drag, "two"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::ActionAlreadyRegistered(name) if name == "a"));
    }

    #[test]
    fn unregister_removes_every_binding() {
        let mut registry = Registry::new();
        registry
            .register(fixed("a", ZoneSet::EDGE, Gesture::Drag, "pan"))
            .unwrap();
        let removed = registry.unregister("a").unwrap();
        assert_eq!(removed.name(), "a");

        for zone in ZoneSet::EDGE.zones() {
            let trigger = Trigger::new(zone, Button::Left, Gesture::Drag);
            assert!(registry.lookup(&trigger).unwrap().is_none());
        }
        assert!(matches!(
            registry.unregister("a"),
            Err(DispatchError::ActionNotRegistered(_))
        ));
    }

    #[test]
    fn handler_errors_name_the_handler() {
        let mut registry = Registry::new();
        registry
            .register(fixed("a", ZoneSet::ANY, Gesture::Click, "fail"))
            .unwrap();
        let key = registry.lookup(&click_at(Zone::Centre)).unwrap().unwrap();
        let event = PointerEvent::new(crate::input::EventKind::Release, Default::default());
        let err = registry.invoke(&key, &event, None).unwrap_err();
        assert!(err.to_string().contains("a::fail"));
        assert!(err.to_string().contains("refused"));
    }
}
