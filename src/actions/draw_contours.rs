//! Point-and-contour drawing on plot axes.
//!
//! Each click adds a point (and a mark for it) to the axes under the pointer and
//! asks a [`ContourBuilder`] whether the points collected so far make a contour.
//! Marks and contours can be picked to remove them, and the whole drawing can
//! be cleared.

use crate::config::ContoursConfig;
use crate::dispatch::{Action, Binding, HandlerResult};
use crate::input::{PickTarget, Point, PointerEvent};
use log::debug;
use std::collections::BTreeMap;

pub const ADD_POINT: &str = "add-point";
pub const REMOVE_ARTIST: &str = "remove-artist";
pub const CLEAR_DRAWING: &str = "clear-drawing";

/// Polyline produced by a [`ContourBuilder`].
pub type ContourData = Vec<Point>;

/// Turns the points of one axes into a contour.
///
/// Called after every added point with all points of that axes. Returning
/// `None` means the points do not (yet) form a contour.
pub trait ContourBuilder {
    fn build(&mut self, points: &[Point]) -> Option<ContourData>;
}

impl<F> ContourBuilder for F
where
    F: FnMut(&[Point]) -> Option<ContourData>,
{
    fn build(&mut self, points: &[Point]) -> Option<ContourData> {
        self(points)
    }
}

/// Builder that never produces a contour; points are only marked.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarksOnly;

impl ContourBuilder for MarksOnly {
    fn build(&mut self, _points: &[Point]) -> Option<ContourData> {
        None
    }
}

type ContoursUpdated = Box<dyn FnMut(&[ContourData], &[Point])>;

/// A drawn point, pickable by its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub id: PickTarget,
    pub position: Point,
}

/// A drawn contour, pickable by its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub id: PickTarget,
    pub data: ContourData,
}

#[derive(Debug, Default)]
struct AxesDrawing {
    marks: Vec<Mark>,
    contours: Vec<Contour>,
}

impl AxesDrawing {
    fn points(&self) -> Vec<Point> {
        self.marks.iter().map(|mark| mark.position).collect()
    }

    fn contour_data(&self) -> Vec<ContourData> {
        self.contours.iter().map(|c| c.data.clone()).collect()
    }
}

/// Action collecting points per axes and turning them into contours.
pub struct DrawContours {
    name: String,
    bindings: Vec<Binding>,
    num_points: Option<usize>,
    num_contours: Option<usize>,
    builder: Box<dyn ContourBuilder>,
    contours_updated: Option<ContoursUpdated>,
    drawings: BTreeMap<usize, AxesDrawing>,
    next_id: u64,
}

impl DrawContours {
    pub const NAME: &'static str = "draw-contours";

    /// Creates the action with the triggers and limits from `config`.
    ///
    /// Negative limits mean unlimited.
    pub fn new(config: &ContoursConfig) -> Self {
        Self {
            name: Self::NAME.to_string(),
            bindings: vec![
                Binding::new(config.add_point, ADD_POINT),
                Binding::new(config.remove_artist, REMOVE_ARTIST),
                Binding::new(config.clear_drawing, CLEAR_DRAWING),
            ],
            num_points: usize::try_from(config.num_points).ok(),
            num_contours: usize::try_from(config.num_contours).ok(),
            builder: Box::new(MarksOnly),
            contours_updated: None,
            drawings: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Replaces the contour builder.
    pub fn with_builder(mut self, builder: impl ContourBuilder + 'static) -> Self {
        self.builder = Box::new(builder);
        self
    }

    /// Registers a callback run whenever the contours of an axes change. It
    /// receives every contour and every point of that axes.
    pub fn on_contours_updated(
        mut self,
        callback: impl FnMut(&[ContourData], &[Point]) + 'static,
    ) -> Self {
        self.contours_updated = Some(Box::new(callback));
        self
    }

    /// Registers the action under a different name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn points(&self, axes: usize) -> Vec<Point> {
        self.drawings
            .get(&axes)
            .map(AxesDrawing::points)
            .unwrap_or_default()
    }

    pub fn marks(&self, axes: usize) -> &[Mark] {
        self.drawings
            .get(&axes)
            .map(|d| d.marks.as_slice())
            .unwrap_or_default()
    }

    pub fn contours(&self, axes: usize) -> &[Contour] {
        self.drawings
            .get(&axes)
            .map(|d| d.contours.as_slice())
            .unwrap_or_default()
    }

    fn add_point(&mut self, event: &PointerEvent) {
        let Some(position) = event.position else {
            debug!("Ignoring point without a position");
            return;
        };
        let axes = event.axes.unwrap_or(0);
        let drawing = self.drawings.entry(axes).or_default();
        let full = |len: usize, limit: Option<usize>| limit.is_some_and(|max| len >= max);
        if full(drawing.marks.len(), self.num_points)
            || full(drawing.contours.len(), self.num_contours)
        {
            debug!("Axes {} is full; point at ({}, {}) ignored", axes, position.x, position.y);
            return;
        }

        self.next_id += 1;
        drawing.marks.push(Mark {
            id: PickTarget::new(format!("mark-{}", self.next_id)),
            position,
        });

        let points = drawing.points();
        let Some(data) = self.builder.build(&points) else {
            return;
        };
        self.next_id += 1;
        drawing.contours.push(Contour {
            id: PickTarget::new(format!("contour-{}", self.next_id)),
            data,
        });
        debug!("Axes {} now has {} contour(s)", axes, drawing.contours.len());
        self.notify(axes);
    }

    fn remove_artist(&mut self, event: &PointerEvent) {
        let Some(target) = &event.target else {
            return;
        };
        let axes = event.axes.unwrap_or(0);
        let Some(drawing) = self.drawings.get_mut(&axes) else {
            return;
        };

        if let Some(index) = drawing.marks.iter().position(|m| &m.id == target) {
            drawing.marks.remove(index);
            debug!("Removed {} from axes {}", target.as_str(), axes);
        } else if let Some(index) = drawing.contours.iter().position(|c| &c.id == target) {
            drawing.contours.remove(index);
            debug!("Removed {} from axes {}", target.as_str(), axes);
            self.notify(axes);
        }
    }

    fn clear_drawing(&mut self, event: &PointerEvent) {
        let axes = event.axes.unwrap_or(0);
        self.drawings.insert(axes, AxesDrawing::default());
        debug!("Cleared axes {}", axes);
        self.notify(axes);
    }

    fn notify(&mut self, axes: usize) {
        let (Some(callback), Some(drawing)) =
            (self.contours_updated.as_mut(), self.drawings.get(&axes))
        else {
            return;
        };
        callback(&drawing.contour_data(), &drawing.points());
    }
}

impl Action for DrawContours {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> Vec<Binding> {
        self.bindings.clone()
    }

    /// The press or pick that started the gesture carries the position, the
    /// artifact and the axes; the releasing event is only a fallback.
    fn handle(
        &mut self,
        handler: &str,
        current: &PointerEvent,
        previous: Option<&PointerEvent>,
    ) -> HandlerResult {
        let origin = previous.unwrap_or(current);
        match handler {
            ADD_POINT => self.add_point(origin),
            REMOVE_ARTIST => self.remove_artist(origin),
            CLEAR_DRAWING => self.clear_drawing(origin),
            other => anyhow::bail!("Unknown handler '{}'", other),
        }
        Ok(None)
    }
}
