//! Raw pointer occurrences delivered by the host surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A position in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Visible data limits of the axes under the pointer.
///
/// Limits may arrive inverted (an axis drawn right-to-left reports
/// `x_min > x_max`); [`Bounds::normalized`] sorts each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Returns a copy with `min <= max` on both axes.
    pub fn normalized(&self) -> Self {
        Self {
            x_min: self.x_min.min(self.x_max),
            x_max: self.x_min.max(self.x_max),
            y_min: self.y_min.min(self.y_max),
            y_max: self.y_min.max(self.y_max),
        }
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).abs()
    }

    /// Inclusive containment test against the normalized limits.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.normalized();
        (b.x_min..=b.x_max).contains(&point.x) && (b.y_min..=b.y_max).contains(&point.y)
    }
}

/// Logical pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Button {
    /// No button held (hover, enter, leave)
    #[default]
    None,
    Left,
    Right,
    /// Middle button or scroll wheel
    Centre,
}

impl Button {
    /// Maps a host button code (1 = left, 2 = middle, 3 = right) to a [`Button`].
    ///
    /// Unknown codes map to [`Button::None`].
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Button::Left,
            2 => Button::Centre,
            3 => Button::Right,
            _ => Button::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Button::None => "none",
            Button::Left => "left",
            Button::Right => "right",
            Button::Centre => "centre",
        }
    }
}

/// Kind of raw occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Press,
    Release,
    Move,
    Scroll,
    Enter,
    Leave,
    /// A press that landed on a pickable artifact
    Pick,
}

/// Identity of a drawn artifact hit by a pick.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickTarget(pub String);

impl PickTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single raw occurrence from the host surface.
///
/// For [`EventKind::Pick`] the position, button and double-click flag are
/// those of the press that produced the pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: EventKind,
    /// Data-space position, `None` when the pointer is not over any axes
    #[serde(default)]
    pub position: Option<Point>,
    /// Visible limits of the axes under the pointer
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub button: Button,
    #[serde(default)]
    pub double_click: bool,
    #[serde(default)]
    pub target: Option<PickTarget>,
    /// Host index of the axes under the pointer
    #[serde(default)]
    pub axes: Option<usize>,
    /// Time since an arbitrary host epoch
    pub timestamp: Duration,
}

impl PointerEvent {
    /// Creates an event over no axes with no button.
    pub fn new(kind: EventKind, timestamp: Duration) -> Self {
        Self {
            kind,
            position: None,
            bounds: None,
            button: Button::None,
            double_click: false,
            target: None,
            axes: None,
            timestamp,
        }
    }

    pub fn at(mut self, position: Point, bounds: Bounds) -> Self {
        self.position = Some(position);
        self.bounds = Some(bounds);
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    pub fn with_double_click(mut self, double_click: bool) -> Self {
        self.double_click = double_click;
        self
    }

    pub fn with_target(mut self, target: PickTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn on_axes(mut self, axes: usize) -> Self {
        self.axes = Some(axes);
        self
    }

    pub fn is_pick(&self) -> bool {
        self.kind == EventKind::Pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_map_like_the_host() {
        assert_eq!(Button::from_code(1), Button::Left);
        assert_eq!(Button::from_code(2), Button::Centre);
        assert_eq!(Button::from_code(3), Button::Right);
        assert_eq!(Button::from_code(8), Button::None);
    }

    #[test]
    fn inverted_bounds_are_normalized() {
        let bounds = Bounds::new(10.0, 0.0, 5.0, -5.0);
        let n = bounds.normalized();
        assert_eq!((n.x_min, n.x_max, n.y_min, n.y_max), (0.0, 10.0, -5.0, 5.0));
        assert!(bounds.contains(Point::new(3.0, 0.0)));
        assert!(!bounds.contains(Point::new(11.0, 0.0)));
    }
}
