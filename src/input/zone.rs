//! Spatial zones of an axes and the classifier that assigns them.
//!
//! The visible data rectangle is split into a centre region surrounded by a band
//! whose width is a fraction of the axes extent. The band is divided into four
//! edges and four corners named after compass points. Along x the minimum is
//! west; along y the minimum is north, matching hosts whose vertical axis grows
//! downward.

use super::events::{Bounds, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest accepted edge fraction; at 0.5 the edge bands meet in the middle.
pub const MAX_EDGE_FRACTION: f64 = 0.5;

/// Atomic zone produced by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    Centre,
    Outside,
}

impl Zone {
    pub const ALL: [Zone; 10] = [
        Zone::North,
        Zone::South,
        Zone::East,
        Zone::West,
        Zone::NorthWest,
        Zone::NorthEast,
        Zone::SouthWest,
        Zone::SouthEast,
        Zone::Centre,
        Zone::Outside,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Zone::North => "north",
            Zone::South => "south",
            Zone::East => "east",
            Zone::West => "west",
            Zone::NorthWest => "north-west",
            Zone::NorthEast => "north-east",
            Zone::SouthWest => "south-west",
            Zone::SouthEast => "south-east",
            Zone::Centre => "centre",
            Zone::Outside => "outside",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finite set of atomic zones a trigger may be registered for.
///
/// Membership is a single mask test, so containment checks stay cheap on the
/// per-move hot path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ZoneSpec", into = "ZoneSpec")]
pub struct ZoneSet {
    mask: u16,
}

impl ZoneSet {
    pub const EMPTY: ZoneSet = ZoneSet { mask: 0 };

    /// All eight compass points.
    pub const EDGE: ZoneSet = ZoneSet { mask: 0b00_1111_1111 };

    /// Every zone inside the axes (edge and centre).
    pub const ANY: ZoneSet = ZoneSet { mask: 0b01_1111_1111 };

    /// Complement of [`ZoneSet::ANY`].
    pub const OUTSIDE: ZoneSet = ZoneSet { mask: 0b10_0000_0000 };

    const UNIVERSE: u16 = 0b11_1111_1111;

    pub fn only(zone: Zone) -> Self {
        Self { mask: zone.bit() }
    }

    pub fn from_zones<I: IntoIterator<Item = Zone>>(zones: I) -> Self {
        zones.into_iter().fold(Self::EMPTY, |set, zone| set.with(zone))
    }

    pub fn with(self, zone: Zone) -> Self {
        Self {
            mask: self.mask | zone.bit(),
        }
    }

    pub fn union(self, other: ZoneSet) -> Self {
        Self {
            mask: self.mask | other.mask,
        }
    }

    /// Zones of the universe not in this set.
    pub fn complement(self) -> Self {
        Self {
            mask: !self.mask & Self::UNIVERSE,
        }
    }

    pub fn contains(&self, zone: Zone) -> bool {
        self.mask & zone.bit() != 0
    }

    pub fn is_superset(&self, other: &ZoneSet) -> bool {
        self.mask & other.mask == other.mask
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Atomic members in declaration order.
    pub fn zones(&self) -> impl Iterator<Item = Zone> + '_ {
        Zone::ALL.into_iter().filter(|zone| self.contains(*zone))
    }

    /// Resolves a single configuration name, atomic or composite.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        let set = match name.as_str() {
            "edge" => Self::EDGE,
            "any" => Self::ANY,
            "n" => Self::only(Zone::North),
            "s" => Self::only(Zone::South),
            "e" => Self::only(Zone::East),
            "w" => Self::only(Zone::West),
            "nw" => Self::only(Zone::NorthWest),
            "ne" => Self::only(Zone::NorthEast),
            "sw" => Self::only(Zone::SouthWest),
            "se" => Self::only(Zone::SouthEast),
            other => Self::only(Zone::ALL.into_iter().find(|zone| zone.name() == other)?),
        };
        Some(set)
    }
}

impl From<Zone> for ZoneSet {
    fn from(zone: Zone) -> Self {
        Self::only(zone)
    }
}

impl fmt::Debug for ZoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ZoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ZoneSet::ANY => f.write_str("any"),
            ZoneSet::EDGE => f.write_str("edge"),
            _ => {
                let names: Vec<&str> = self.zones().map(|zone| zone.name()).collect();
                if names.is_empty() {
                    f.write_str("{}")
                } else {
                    f.write_str(&names.join("|"))
                }
            }
        }
    }
}

/// Serialized form of a [`ZoneSet`].
///
/// # Examples
/// ```toml
/// zone = "edge"
/// zone = ["north", "centre"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ZoneSpec {
    /// A single atomic or composite name (`edge`, `any`, `north-west`, ...)
    Name(String),
    /// Union of several names
    List(Vec<String>),
}

impl TryFrom<ZoneSpec> for ZoneSet {
    type Error = String;

    fn try_from(spec: ZoneSpec) -> Result<Self, Self::Error> {
        let names = match spec {
            ZoneSpec::Name(name) => vec![name],
            ZoneSpec::List(names) => names,
        };
        let mut set = ZoneSet::EMPTY;
        for name in &names {
            let part = ZoneSet::from_name(name).ok_or_else(|| format!("Unknown zone '{name}'"))?;
            set = set.union(part);
        }
        if set.is_empty() {
            return Err("Empty zone set".to_string());
        }
        Ok(set)
    }
}

impl From<ZoneSet> for ZoneSpec {
    fn from(set: ZoneSet) -> Self {
        match set {
            ZoneSet::ANY => ZoneSpec::Name("any".to_string()),
            ZoneSet::EDGE => ZoneSpec::Name("edge".to_string()),
            _ => {
                let mut names: Vec<String> = set.zones().map(|z| z.name().to_string()).collect();
                if names.len() == 1 {
                    ZoneSpec::Name(names.remove(0))
                } else {
                    ZoneSpec::List(names)
                }
            }
        }
    }
}

/// Clamps an edge fraction into `[0, MAX_EDGE_FRACTION]`. NaN becomes 0.
pub fn clamp_edge_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, MAX_EDGE_FRACTION)
}

/// Assigns a zone to a pointer position.
///
/// Returns [`Zone::Outside`] when the position or bounds are missing, the
/// position is not finite, or it lies beyond the bounds.
pub fn classify(position: Option<Point>, bounds: Option<&Bounds>, fraction: f64) -> Zone {
    let (Some(point), Some(bounds)) = (position, bounds) else {
        return Zone::Outside;
    };
    if !point.is_finite() || !bounds.contains(point) {
        return Zone::Outside;
    }

    let b = bounds.normalized();
    let fraction = clamp_edge_fraction(fraction);
    let dx = b.width() * fraction;
    let dy = b.height() * fraction;

    let west = point.x <= b.x_min + dx;
    let east = point.x >= b.x_max - dx;
    let north = point.y <= b.y_min + dy;
    let south = point.y >= b.y_max - dy;

    // West and north win ties when the bands overlap (fraction 0.5).
    match (west, east, north, south) {
        (true, _, true, _) => Zone::NorthWest,
        (true, _, false, true) => Zone::SouthWest,
        (true, _, false, false) => Zone::West,
        (false, true, true, _) => Zone::NorthEast,
        (false, true, false, true) => Zone::SouthEast,
        (false, true, false, false) => Zone::East,
        (false, false, true, _) => Zone::North,
        (false, false, false, true) => Zone::South,
        (false, false, false, false) => Zone::Centre,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Bounds {
        Bounds::new(0.0, 10.0, 0.0, 10.0)
    }

    fn at(x: f64, y: f64, fraction: f64) -> Zone {
        classify(Some(Point::new(x, y)), Some(&unit()), fraction)
    }

    #[test]
    fn corners_take_precedence_over_edges() {
        assert_eq!(at(0.5, 0.5, 0.1), Zone::NorthWest);
        assert_eq!(at(0.5, 9.5, 0.1), Zone::SouthWest);
        assert_eq!(at(9.5, 0.5, 0.1), Zone::NorthEast);
        assert_eq!(at(9.5, 9.5, 0.1), Zone::SouthEast);
    }

    #[test]
    fn single_edges_and_centre() {
        assert_eq!(at(5.0, 0.5, 0.1), Zone::North);
        assert_eq!(at(5.0, 9.5, 0.1), Zone::South);
        assert_eq!(at(0.5, 5.0, 0.1), Zone::West);
        assert_eq!(at(9.5, 5.0, 0.1), Zone::East);
        assert_eq!(at(5.0, 5.0, 0.1), Zone::Centre);
    }

    #[test]
    fn margin_boundary_is_inclusive() {
        assert_eq!(at(1.0, 5.0, 0.1), Zone::West);
        assert_eq!(at(1.0001, 5.0, 0.1), Zone::Centre);
    }

    #[test]
    fn missing_or_out_of_bounds_positions_are_outside() {
        assert_eq!(classify(None, Some(&unit()), 0.2), Zone::Outside);
        assert_eq!(classify(Some(Point::new(1.0, 1.0)), None, 0.2), Zone::Outside);
        assert_eq!(at(-1.0, 5.0, 0.2), Zone::Outside);
        assert_eq!(at(5.0, 10.5, 0.2), Zone::Outside);
        assert_eq!(at(f64::NAN, 5.0, 0.2), Zone::Outside);
    }

    #[test]
    fn zero_fraction_leaves_only_the_boundary_as_edge() {
        for i in 1..100 {
            for j in 1..100 {
                let (x, y) = (i as f64 / 10.0, j as f64 / 10.0);
                assert_eq!(at(x, y, 0.0), Zone::Centre, "({x}, {y})");
            }
        }
        assert_eq!(at(0.0, 5.0, 0.0), Zone::West);
    }

    #[test]
    fn half_fraction_has_no_centre() {
        for i in 0..=100 {
            for j in 0..=100 {
                let (x, y) = (i as f64 / 10.0, j as f64 / 10.0);
                assert_ne!(at(x, y, 0.5), Zone::Centre, "({x}, {y})");
            }
        }
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(at(4.0, 5.0, 3.0), at(4.0, 5.0, 0.5));
        assert_eq!(at(4.0, 5.0, -1.0), Zone::Centre);
        assert_eq!(clamp_edge_fraction(f64::NAN), 0.0);
    }

    #[test]
    fn inverted_axes_use_sorted_limits() {
        let bounds = Bounds::new(10.0, 0.0, 10.0, 0.0);
        assert_eq!(
            classify(Some(Point::new(0.5, 0.5)), Some(&bounds), 0.1),
            Zone::NorthWest
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let first = at(9.2, 3.3, 0.15);
        for _ in 0..5 {
            assert_eq!(at(9.2, 3.3, 0.15), first);
        }
    }

    #[test]
    fn composite_sets() {
        assert_eq!(ZoneSet::EDGE.zones().count(), 8);
        assert!(!ZoneSet::EDGE.contains(Zone::Centre));
        assert!(ZoneSet::ANY.is_superset(&ZoneSet::EDGE));
        assert!(ZoneSet::ANY.contains(Zone::Centre));
        assert_eq!(ZoneSet::ANY.complement(), ZoneSet::OUTSIDE);
        assert_eq!(ZoneSet::OUTSIDE.zones().collect::<Vec<_>>(), vec![Zone::Outside]);
        assert_eq!(
            ZoneSet::EDGE.with(Zone::Centre),
            ZoneSet::ANY,
            "edge plus centre is any"
        );
    }

    #[test]
    fn zone_spec_parsing() {
        let set = ZoneSet::try_from(ZoneSpec::Name("edge".into())).unwrap();
        assert_eq!(set, ZoneSet::EDGE);

        let set = ZoneSet::try_from(ZoneSpec::List(vec!["north".into(), "NW".into()])).unwrap();
        assert_eq!(set, ZoneSet::from_zones([Zone::North, Zone::NorthWest]));

        let set = ZoneSet::try_from(ZoneSpec::Name("south_east".into())).unwrap();
        assert_eq!(set, ZoneSet::only(Zone::SouthEast));

        let err = ZoneSet::try_from(ZoneSpec::Name("middle".into())).unwrap_err();
        assert!(err.contains("middle"));
        assert!(ZoneSet::try_from(ZoneSpec::List(vec![])).is_err());
    }

    #[test]
    fn zone_set_display() {
        assert_eq!(ZoneSet::EDGE.to_string(), "edge");
        assert_eq!(
            ZoneSet::from_zones([Zone::North, Zone::Centre]).to_string(),
            "north|centre"
        );
    }
}
