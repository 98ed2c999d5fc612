//! Configuration type definitions.

use crate::input::{Button, Gesture, GestureSettings, TriggerSignature, Zone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Gesture classification settings.
///
/// Shared by every action registered on a surface. Values are read once when
/// the actions manager is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Width of each edge band as a fraction of the axes extent
    /// (valid range: 0.0 - 0.5)
    #[serde(default = "default_edge_fraction")]
    pub edge_fraction: f64,

    /// Seconds after a press before motion counts as a drag and a release
    /// stops counting as a click (valid range: 0.0 - 5.0)
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: f64,
}

impl InteractionConfig {
    /// Settings for the gesture classifier.
    pub fn settings(&self) -> GestureSettings {
        GestureSettings::new(self.edge_fraction, self.delay_seconds)
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            edge_fraction: default_edge_fraction(),
            delay_seconds: default_delay_seconds(),
        }
    }
}

/// Contour drawing action settings.
///
/// Triggers are written like `{ zone = "centre", button = "left", gesture = "click" }`;
/// `zone` also accepts a list of zones, `"edge"` or `"any"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContoursConfig {
    /// Adds a point at the pressed position
    #[serde(default = "default_add_point")]
    pub add_point: TriggerSignature,

    /// Removes the picked mark or contour
    #[serde(default = "default_remove_artist")]
    pub remove_artist: TriggerSignature,

    /// Clears every point and contour on the axes
    #[serde(default = "default_clear_drawing")]
    pub clear_drawing: TriggerSignature,

    /// Points kept per axes; negative means unlimited
    #[serde(default = "default_limit")]
    pub num_points: i64,

    /// Contours kept per axes; negative means unlimited
    #[serde(default = "default_limit")]
    pub num_contours: i64,
}

impl Default for ContoursConfig {
    fn default() -> Self {
        Self {
            add_point: default_add_point(),
            remove_artist: default_remove_artist(),
            clear_drawing: default_clear_drawing(),
            num_points: default_limit(),
            num_contours: default_limit(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_edge_fraction() -> f64 {
    0.2
}

fn default_delay_seconds() -> f64 {
    0.2
}

fn default_add_point() -> TriggerSignature {
    TriggerSignature::new(Zone::Centre, Button::Left, Gesture::Click)
}

fn default_remove_artist() -> TriggerSignature {
    TriggerSignature::new(Zone::Centre, Button::Right, Gesture::Pick)
}

fn default_clear_drawing() -> TriggerSignature {
    TriggerSignature::new(Zone::Centre, Button::Right, Gesture::DoubleClick)
}

fn default_limit() -> i64 {
    -1
}
