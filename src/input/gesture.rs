//! Episode state machine that turns raw pointer events into gestures.
//!
//! A press opens an episode and starts the delay clock. Motion before the delay
//! elapses is ignored; motion after it resolves a drag (or pick-drag) that stays
//! bound until release. A release before the delay resolves a click, double-click,
//! pick or double-pick. The delay is only ever compared against the timestamp of
//! the next event, so a pending episode waits for further input to resolve.

use super::events::{Button, PointerEvent};
use super::trigger::{Gesture, Trigger};
use super::zone::{self, Zone};
use std::time::Duration;

/// Classification tunables, fixed for the lifetime of a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    edge_fraction: f64,
    delay: Duration,
}

impl GestureSettings {
    /// Builds settings from raw values, clamping the edge fraction into
    /// `[0, 0.5]` and negative or NaN delays to zero.
    pub fn new(edge_fraction: f64, delay_seconds: f64) -> Self {
        let delay = if delay_seconds > 0.0 {
            Duration::try_from_secs_f64(delay_seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            edge_fraction: zone::clamp_edge_fraction(edge_fraction),
            delay,
        }
    }

    pub fn edge_fraction(&self) -> f64 {
        self.edge_fraction
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Zone of an event under these settings.
    pub fn zone_of(&self, event: &PointerEvent) -> Zone {
        zone::classify(event.position, event.bounds.as_ref(), self.edge_fraction)
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self::new(0.2, 0.2)
    }
}

/// A gesture ready for handler lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub trigger: Trigger,
    /// Event whose zone and button define the trigger; handed to the handler
    /// as its first `previous` event
    pub reference: Option<PointerEvent>,
}

/// Outcome of feeding a motion event to the classifier.
#[derive(Debug, PartialEq)]
pub enum Motion<B> {
    /// Still inside the delay window of a pending episode
    Absorbed,
    /// A move, drag or pick-drag needs a handler
    Resolve(Resolution),
    /// A handler is already bound for this episode
    Continue {
        binding: B,
        previous: Option<PointerEvent>,
    },
}

#[derive(Debug)]
enum Phase<B> {
    Idle,
    Pending {
        started: Duration,
        buffer: Vec<PointerEvent>,
    },
    Bound {
        binding: B,
        gesture: Gesture,
        previous: Option<PointerEvent>,
    },
}

/// Per-episode state machine.
///
/// `B` is whatever the dispatcher uses to remember the handler bound to a
/// continuous gesture; the classifier only stores and returns it.
#[derive(Debug)]
pub struct GestureClassifier<B> {
    settings: GestureSettings,
    phase: Phase<B>,
}

impl<B> GestureClassifier<B> {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Gesture of the bound handler, if one is bound.
    pub fn bound_gesture(&self) -> Option<Gesture> {
        match &self.phase {
            Phase::Bound { gesture, .. } => Some(*gesture),
            _ => None,
        }
    }

    /// Handler bound to the current continuous gesture.
    pub fn bound(&self) -> Option<&B> {
        match &self.phase {
            Phase::Bound { binding, .. } => Some(binding),
            _ => None,
        }
    }

    /// Events buffered by the pending episode.
    pub fn buffered(&self) -> &[PointerEvent] {
        match &self.phase {
            Phase::Pending { buffer, .. } => buffer,
            _ => &[],
        }
    }

    /// Records a press or pick.
    ///
    /// Opens an episode when none is pending; otherwise appends without
    /// restarting the clock. Any hover or drag binding is dropped.
    pub fn press(&mut self, event: PointerEvent) {
        if let Phase::Pending { buffer, .. } = &mut self.phase {
            buffer.push(event);
            return;
        }
        self.phase = Phase::Pending {
            started: event.timestamp,
            buffer: vec![event],
        };
    }

    /// Classifies a motion event.
    pub fn motion(&self, event: &PointerEvent) -> Motion<B>
    where
        B: Clone,
    {
        match &self.phase {
            Phase::Idle => Motion::Resolve(Resolution {
                trigger: Trigger::new(self.settings.zone_of(event), event.button, Gesture::Move),
                reference: None,
            }),
            Phase::Pending { started, buffer } => {
                if self.elapsed(*started, event) < self.settings.delay {
                    return Motion::Absorbed;
                }
                Motion::Resolve(self.resolve_drag(buffer))
            }
            Phase::Bound {
                binding, previous, ..
            } => Motion::Continue {
                binding: binding.clone(),
                previous: previous.clone(),
            },
        }
    }

    /// Binds the handler found for a continuous gesture.
    pub fn bind(&mut self, binding: B, gesture: Gesture, previous: Option<PointerEvent>) {
        self.phase = Phase::Bound {
            binding,
            gesture,
            previous,
        };
    }

    /// Replaces the event handed to the bound handler on the next move.
    pub fn set_previous(&mut self, event: Option<PointerEvent>) {
        if let Phase::Bound { previous, .. } = &mut self.phase {
            *previous = event;
        }
    }

    /// Ends the episode.
    ///
    /// Returns the click-family resolution when the release arrives within the
    /// delay of the episode start. The classifier is idle afterwards in every
    /// case.
    pub fn release(&mut self, event: &PointerEvent) -> Option<Resolution> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Pending { started, buffer } = phase else {
            return None;
        };
        if self.elapsed(started, event) >= self.settings.delay {
            return None;
        }
        self.resolve_click(buffer)
    }

    /// Resolves a scroll. Pending episodes are left untouched.
    pub fn scroll(&self, event: &PointerEvent) -> Resolution {
        Resolution {
            trigger: Trigger::new(self.settings.zone_of(event), Button::Centre, Gesture::Scroll),
            reference: None,
        }
    }

    /// Resolves an enter or leave and drops any episode in progress.
    pub fn crossing(&mut self, event: &PointerEvent, gesture: Gesture) -> Resolution {
        self.reset();
        Resolution {
            trigger: Trigger::new(self.settings.zone_of(event), Button::None, gesture),
            reference: None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn elapsed(&self, started: Duration, event: &PointerEvent) -> Duration {
        event.timestamp.saturating_sub(started)
    }

    fn resolve_drag(&self, buffer: &[PointerEvent]) -> Resolution {
        let (gesture, reference) = match buffer.iter().rev().find(|e| e.is_pick()) {
            Some(pick) => (Gesture::PickDrag, pick),
            None => (Gesture::Drag, &buffer[0]),
        };
        Resolution {
            trigger: Trigger::new(self.settings.zone_of(reference), reference.button, gesture),
            reference: Some(reference.clone()),
        }
    }

    fn resolve_click(&self, mut buffer: Vec<PointerEvent>) -> Option<Resolution> {
        let reference = match buffer.iter().rposition(|e| e.is_pick()) {
            Some(index) => buffer.swap_remove(index),
            None => buffer.into_iter().next()?,
        };
        let gesture = match (reference.is_pick(), reference.double_click) {
            (true, true) => Gesture::DoublePick,
            (true, false) => Gesture::Pick,
            (false, true) => Gesture::DoubleClick,
            (false, false) => Gesture::Click,
        };
        Some(Resolution {
            trigger: Trigger::new(self.settings.zone_of(&reference), reference.button, gesture),
            reference: Some(reference),
        })
    }
}
