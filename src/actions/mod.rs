//! Stock actions that can be registered on an [`ActionsManager`](crate::dispatch::ActionsManager).

pub mod draw_contours;

pub use draw_contours::{Contour, ContourBuilder, ContourData, DrawContours, Mark, MarksOnly};
