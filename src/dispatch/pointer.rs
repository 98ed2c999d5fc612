use super::core::{ActionsManager, BoundHandler};
use super::host::HostSurface;
use super::types::{Dispatch, DispatchError, DispatchResult};
use crate::input::{EventKind, Gesture, Motion, PointerEvent, Trigger};
use log::{debug, trace};
use std::rc::Rc;

impl ActionsManager {
    /// Feeds any raw event to the matching entry point.
    pub fn handle_event(&mut self, event: PointerEvent) -> DispatchResult {
        match event.kind {
            EventKind::Press => self.on_press(event),
            EventKind::Pick => self.on_pick(event),
            EventKind::Move => self.on_move(&event),
            EventKind::Release => self.on_release(&event),
            EventKind::Scroll => self.on_scroll(&event),
            EventKind::Enter => self.on_enter(&event),
            EventKind::Leave => self.on_leave(&event),
        }
    }

    /// Processes a button press.
    ///
    /// Opens (or extends) the pending episode. Nothing is dispatched until the
    /// episode resolves on a later move or release.
    pub fn on_press(&mut self, event: PointerEvent) -> DispatchResult {
        self.host()?;
        self.classifier.press(event);
        Ok(None)
    }

    /// Processes a pick (a press that hit a pickable artifact).
    pub fn on_pick(&mut self, event: PointerEvent) -> DispatchResult {
        self.on_press(event)
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Inside the delay window of a pending episode: ignored
    /// - After the delay: resolves a drag or pick-drag and binds its handler
    /// - With no episode: resolves a hover move and binds its handler
    /// - With a bound handler: re-invokes it with the previous event it returned
    pub fn on_move(&mut self, event: &PointerEvent) -> DispatchResult {
        let host = self.host()?;
        match self.classifier.motion(event) {
            Motion::Absorbed => Ok(None),
            Motion::Continue { binding, previous } => {
                trace!("Continuing {} with {}", binding.trigger, binding.key);
                self.invoke_bound(&host, binding, event, previous)
            }
            Motion::Resolve(resolution) => {
                let key = match self.registry.lookup(&resolution.trigger) {
                    Ok(Some(key)) => key,
                    Ok(None) => return Ok(None),
                    Err(err) => {
                        self.classifier.reset();
                        return Err(err);
                    }
                };
                debug!("Bound {} to {}", resolution.trigger, key);
                let binding = BoundHandler {
                    key,
                    trigger: resolution.trigger,
                };
                self.classifier.bind(
                    binding.clone(),
                    resolution.trigger.gesture,
                    resolution.reference.clone(),
                );
                self.invoke_bound(&host, binding, event, resolution.reference)
            }
        }
    }

    /// Processes a button release.
    ///
    /// A release within the delay of the press resolves a click, double-click,
    /// pick or double-pick and dispatches it once. Any other release just ends
    /// the episode.
    pub fn on_release(&mut self, event: &PointerEvent) -> DispatchResult {
        let host = self.host()?;
        let Some(resolution) = self.classifier.release(event) else {
            return Ok(None);
        };
        let dispatched =
            self.dispatch_once(resolution.trigger, event, resolution.reference.as_ref())?;
        host.request_redraw();
        Ok(dispatched)
    }

    /// Processes a scroll step. A pending press episode is left as is.
    pub fn on_scroll(&mut self, event: &PointerEvent) -> DispatchResult {
        let host = self.host()?;
        let resolution = self.classifier.scroll(event);
        let dispatched = self.dispatch_once(resolution.trigger, event, None)?;
        host.request_redraw();
        Ok(dispatched)
    }

    /// Processes the pointer entering an axes. Ends any episode in progress.
    pub fn on_enter(&mut self, event: &PointerEvent) -> DispatchResult {
        self.on_crossing(event, Gesture::EnterZone)
    }

    /// Processes the pointer leaving an axes. Ends any episode in progress.
    pub fn on_leave(&mut self, event: &PointerEvent) -> DispatchResult {
        self.on_crossing(event, Gesture::LeaveZone)
    }

    fn on_crossing(&mut self, event: &PointerEvent, gesture: Gesture) -> DispatchResult {
        let host = self.host()?;
        let resolution = self.classifier.crossing(event, gesture);
        let dispatched = self.dispatch_once(resolution.trigger, event, None)?;
        host.request_redraw();
        Ok(dispatched)
    }

    /// Looks up and runs the handler for a one-shot trigger.
    fn dispatch_once(
        &mut self,
        trigger: Trigger,
        current: &PointerEvent,
        previous: Option<&PointerEvent>,
    ) -> DispatchResult {
        let Some(key) = self.registry.lookup(&trigger)? else {
            trace!("No handler for {}", trigger);
            return Ok(None);
        };
        debug!("Dispatching {} to {}", trigger, key);
        self.registry.invoke(&key, current, previous)?;
        Ok(Some(Dispatch::new(trigger, &key)))
    }

    /// Runs the handler bound to a continuous gesture and keeps what it returns
    /// for the next move. A failing handler leaves the stored event untouched.
    fn invoke_bound(
        &mut self,
        host: &Rc<dyn HostSurface>,
        binding: BoundHandler,
        current: &PointerEvent,
        previous: Option<PointerEvent>,
    ) -> DispatchResult {
        let next = match self.registry.invoke(&binding.key, current, previous.as_ref()) {
            Ok(next) => next,
            Err(DispatchError::ActionNotRegistered(name)) => {
                debug!("Bound action '{}' is gone; ending episode", name);
                self.classifier.reset();
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        self.classifier.set_previous(next);
        host.request_redraw();
        Ok(Some(Dispatch::new(binding.trigger, &binding.key)))
    }
}
