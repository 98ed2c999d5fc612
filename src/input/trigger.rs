//! Trigger signatures and the containment relation used for lookup.

use super::events::Button;
use super::zone::{Zone, ZoneSet, ZoneSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic gesture resolved from a raw event episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    /// Pointer moving with no button episode in progress
    Move,
    Drag,
    Click,
    DoubleClick,
    Scroll,
    Pick,
    DoublePick,
    PickDrag,
    EnterZone,
    LeaveZone,
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Move => "move",
            Gesture::Drag => "drag",
            Gesture::Click => "click",
            Gesture::DoubleClick => "double-click",
            Gesture::Scroll => "scroll",
            Gesture::Pick => "pick",
            Gesture::DoublePick => "double-pick",
            Gesture::PickDrag => "pick-drag",
            Gesture::EnterZone => "enter-zone",
            Gesture::LeaveZone => "leave-zone",
        }
    }
}

/// A resolved occurrence: one atomic zone, one button, one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trigger {
    pub zone: Zone,
    pub button: Button,
    pub gesture: Gesture,
}

impl Trigger {
    pub fn new(zone: Zone, button: Button, gesture: Gesture) -> Self {
        Self {
            zone,
            button,
            gesture,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.zone,
            self.button.name(),
            self.gesture.name()
        )
    }
}

/// What a handler is registered for.
///
/// # Example TOML
/// ```toml
/// add_point = { zone = "centre", button = "left", gesture = "click" }
/// pan = { zone = ["north", "south"], button = "left", gesture = "drag" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TriggerSignature {
    #[schemars(with = "ZoneSpec")]
    pub zone: ZoneSet,
    pub button: Button,
    pub gesture: Gesture,
}

impl TriggerSignature {
    pub fn new(zone: impl Into<ZoneSet>, button: Button, gesture: Gesture) -> Self {
        Self {
            zone: zone.into(),
            button,
            gesture,
        }
    }

    /// Returns true if a handler registered with this signature should catch `trigger`.
    pub fn contains(&self, trigger: &Trigger) -> bool {
        self.zone.contains(trigger.zone)
            && self.button == trigger.button
            && self.gesture == trigger.gesture
    }

    /// Returns true if every occurrence caught by `other` is also caught by `self`.
    pub fn covers(&self, other: &TriggerSignature) -> bool {
        self.zone.is_superset(&other.zone)
            && self.button == other.button
            && self.gesture == other.gesture
    }
}

impl From<Trigger> for TriggerSignature {
    fn from(trigger: Trigger) -> Self {
        Self::new(trigger.zone, trigger.button, trigger.gesture)
    }
}

impl fmt::Display for TriggerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.zone,
            self.button.name(),
            self.gesture.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_requires_exact_button_and_gesture() {
        let sig = TriggerSignature::new(Zone::Centre, Button::Left, Gesture::Click);
        assert!(sig.contains(&Trigger::new(Zone::Centre, Button::Left, Gesture::Click)));
        assert!(!sig.contains(&Trigger::new(Zone::Centre, Button::Right, Gesture::Click)));
        assert!(!sig.contains(&Trigger::new(
            Zone::Centre,
            Button::Left,
            Gesture::DoubleClick
        )));
        assert!(!sig.contains(&Trigger::new(Zone::North, Button::Left, Gesture::Click)));
    }

    #[test]
    fn edge_contains_every_compass_point() {
        let sig = TriggerSignature::new(ZoneSet::EDGE, Button::Left, Gesture::Drag);
        for zone in ZoneSet::EDGE.zones() {
            assert!(sig.contains(&Trigger::new(zone, Button::Left, Gesture::Drag)));
        }
        assert!(!sig.contains(&Trigger::new(Zone::Centre, Button::Left, Gesture::Drag)));
        assert!(!sig.contains(&Trigger::new(Zone::Outside, Button::Left, Gesture::Drag)));
    }

    #[test]
    fn superset_registrations_contain_subset_occurrences() {
        let sets = [
            ZoneSet::ANY,
            ZoneSet::EDGE,
            ZoneSet::OUTSIDE,
            ZoneSet::from_zones([Zone::North, Zone::NorthEast, Zone::Centre]),
            ZoneSet::only(Zone::West),
        ];
        for a in sets {
            for b in sets {
                if !a.is_superset(&b) {
                    continue;
                }
                let outer = TriggerSignature::new(a, Button::Right, Gesture::Pick);
                let inner = TriggerSignature::new(b, Button::Right, Gesture::Pick);
                assert!(outer.covers(&inner));
                for zone in b.zones() {
                    assert!(outer.contains(&Trigger::new(zone, Button::Right, Gesture::Pick)));
                }
            }
        }
    }

    #[test]
    fn containment_is_reflexive_for_atomic_signatures() {
        for zone in Zone::ALL {
            let trigger = Trigger::new(zone, Button::None, Gesture::Move);
            assert!(TriggerSignature::from(trigger).contains(&trigger));
        }
    }

    #[test]
    fn signature_deserializes_composite_zones() {
        let sig: TriggerSignature =
            toml::from_str("zone = \"edge\"\nbutton = \"left\"\ngesture = \"double-click\"")
                .unwrap();
        assert_eq!(
            sig,
            TriggerSignature::new(ZoneSet::EDGE, Button::Left, Gesture::DoubleClick)
        );

        let sig: TriggerSignature = toml::from_str(
            "zone = [\"north\", \"south\"]\nbutton = \"centre\"\ngesture = \"scroll\"",
        )
        .unwrap();
        assert!(sig.contains(&Trigger::new(Zone::South, Button::Centre, Gesture::Scroll)));
        assert!(!sig.contains(&Trigger::new(Zone::East, Button::Centre, Gesture::Scroll)));
    }
}
