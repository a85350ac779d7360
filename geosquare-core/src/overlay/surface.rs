use serde::Serialize;

use super::{RectangleStyle, SurfaceError};
use crate::model::{BoundingArea, Coordinate};

/// a marker to place on the rendering surface.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerSpec {
    /// where the user is, titled for hover
    Position { position: Coordinate, title: String },
    /// icon-less text marker naming the cell
    Label {
        position: Coordinate,
        text: String,
        color: String,
    },
}

impl MarkerSpec {
    pub fn position(&self) -> &Coordinate {
        match self {
            MarkerSpec::Position { position, .. } => position,
            MarkerSpec::Label { position, .. } => position,
        }
    }
}

/// the imperative drawing API of an interactive map. every created element
/// is returned as a handle which is later passed back to [`RenderingSurface::remove`].
pub trait RenderingSurface {
    type Handle: std::fmt::Debug;

    /// false when the underlying map library cannot currently draw.
    fn is_available(&self) -> bool;

    fn create_marker(&mut self, marker: &MarkerSpec) -> Result<Self::Handle, SurfaceError>;

    fn create_rectangle(
        &mut self,
        bounds: &BoundingArea,
        style: &RectangleStyle,
    ) -> Result<Self::Handle, SurfaceError>;

    fn fit_viewport_to(&mut self, bounds: &BoundingArea) -> Result<(), SurfaceError>;

    fn remove(&mut self, handle: Self::Handle);
}
