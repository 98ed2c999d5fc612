//! Recorded pointer traces and their replay through an actions manager.
//!
//! A trace is a TOML file listing the bindings to test and the raw events to
//! feed:
//!
//! ```toml
//! bounds = [0.0, 10.0, 0.0, 10.0]
//!
//! [[binding]]
//! name = "pan"
//! zone = "any"
//! button = "left"
//! gesture = "drag"
//!
//! [[event]]
//! kind = "press"
//! t = 0.0
//! x = 5.0
//! y = 5.0
//! button = "left"
//! ```
//!
//! Every binding is registered on a single recording action, so overlapping
//! bindings surface as ambiguity errors during replay exactly as they would
//! between separate actions.

use crate::dispatch::{Action, ActionsManager, Binding, Dispatch, HandlerResult};
use crate::input::{
    Bounds, Button, EventKind, Gesture, PickTarget, Point, PointerEvent, TriggerSignature, ZoneSet,
};
use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name the recording action is registered under.
pub const RECORDER_NAME: &str = "trace";

#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    /// Axes limits used by events that do not give their own
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,

    #[serde(default, rename = "binding")]
    pub bindings: Vec<TraceBinding>,

    #[serde(default, rename = "event")]
    pub events: Vec<TraceEvent>,
}

/// A named trigger signature.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceBinding {
    pub name: String,
    pub zone: ZoneSet,
    #[serde(default)]
    pub button: Button,
    pub gesture: Gesture,
}

/// One raw event, in seconds and data coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceEvent {
    pub kind: EventKind,
    pub t: f64,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    /// `[x_min, x_max, y_min, y_max]`
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,
    #[serde(default)]
    pub button: Button,
    #[serde(default)]
    pub double_click: bool,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub axes: Option<usize>,
}

impl TraceEvent {
    /// Builds the pointer event, falling back to `default_bounds`.
    pub fn to_event(&self, default_bounds: Option<[f64; 4]>) -> Result<PointerEvent> {
        let timestamp = Duration::try_from_secs_f64(self.t)
            .map_err(|_| anyhow!("Invalid event time {}", self.t))?;
        let mut event = PointerEvent::new(self.kind, timestamp)
            .with_button(self.button)
            .with_double_click(self.double_click);
        event.axes = self.axes;

        if let (Some(x), Some(y)) = (self.x, self.y) {
            event.position = Some(Point::new(x, y));
            event.bounds = self
                .bounds
                .or(default_bounds)
                .map(|[x_min, x_max, y_min, y_max]| Bounds::new(x_min, x_max, y_min, y_max));
        }
        if let Some(target) = &self.target {
            event = event.with_target(PickTarget::new(target.clone()));
        }
        Ok(event)
    }
}

/// A dispatch produced during replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub time: Duration,
    pub dispatch: Dispatch,
}

impl Trace {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse trace")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace from {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid trace {}", path.display()))
    }

    /// Action owning every binding of the trace. Each handler passes the
    /// current event on as the next `previous`.
    pub fn recorder(&self) -> Recorder {
        Recorder {
            bindings: self
                .bindings
                .iter()
                .map(|b| {
                    Binding::new(TriggerSignature::new(b.zone, b.button, b.gesture), b.name.clone())
                })
                .collect(),
        }
    }

    /// Feeds every event to `manager` in order and collects the dispatches.
    ///
    /// Stops at the first dispatch error, naming the offending event.
    pub fn replay(&self, manager: &mut ActionsManager) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for (index, raw) in self.events.iter().enumerate() {
            let event = raw
                .to_event(self.bounds)
                .with_context(|| format!("Event #{}", index + 1))?;
            let time = event.timestamp;
            let dispatched = manager
                .handle_event(event)
                .with_context(|| format!("Event #{} at {:.3}s", index + 1, raw.t))?;
            if let Some(dispatch) = dispatched {
                debug!("{:.3}s {} -> {}", raw.t, dispatch.trigger, dispatch.handler);
                records.push(Record { time, dispatch });
            }
        }
        Ok(records)
    }
}

/// Action whose handlers only pass events through; the manager's dispatch
/// records are the output.
#[derive(Debug, Clone)]
pub struct Recorder {
    bindings: Vec<Binding>,
}

impl Action for Recorder {
    fn name(&self) -> &str {
        RECORDER_NAME
    }

    fn bindings(&self) -> Vec<Binding> {
        self.bindings.clone()
    }

    fn handle(
        &mut self,
        _handler: &str,
        current: &PointerEvent,
        _previous: Option<&PointerEvent>,
    ) -> HandlerResult {
        Ok(Some(current.clone()))
    }
}
