use std::collections::BTreeMap;

use serde::Serialize;

use super::{MapView, MarkerSpec, RectangleStyle, RenderingSurface, SurfaceError};
use crate::model::BoundingArea;

/// identifies an element drawn on a [`RecordingSurface`].
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceElementId(pub u64);

impl std::fmt::Display for SurfaceElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum DrawnElement {
    Marker { marker: MarkerSpec },
    Rectangle {
        bounds: BoundingArea,
        style: RectangleStyle,
    },
}

/// one call made against a [`RecordingSurface`], in call order.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOperation {
    CreateMap { view: MapView },
    CreateMarker { id: SurfaceElementId, marker: MarkerSpec },
    CreateRectangle {
        id: SurfaceElementId,
        bounds: BoundingArea,
        style: RectangleStyle,
    },
    FitViewport { bounds: BoundingArea },
    Remove { id: SurfaceElementId },
}

/// an in-memory rendering surface that records every drawing call. used
/// for scripted replays and in place of a real map in tests.
#[derive(Debug)]
pub struct RecordingSurface {
    view: MapView,
    next_id: u64,
    elements: BTreeMap<SurfaceElementId, DrawnElement>,
    viewport: Option<BoundingArea>,
    operations: Vec<SurfaceOperation>,
    available: bool,
    remaining_creates: Option<usize>,
}

impl RecordingSurface {
    /// creates the map at the given initial view.
    pub fn create_map(view: MapView) -> Self {
        log::debug!(
            "creating map centered at {} with zoom {}",
            view.center(),
            view.zoom
        );
        let operations = vec![SurfaceOperation::CreateMap { view: view.clone() }];
        Self {
            view,
            next_id: 0,
            elements: BTreeMap::new(),
            viewport: None,
            operations,
            available: true,
            remaining_creates: None,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// after `n` more successful element creations, reject every further one.
    pub fn reject_after(&mut self, n: usize) {
        self.remaining_creates = Some(n);
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn elements(&self) -> &BTreeMap<SurfaceElementId, DrawnElement> {
        &self.elements
    }

    pub fn markers(&self) -> Vec<&MarkerSpec> {
        self.elements
            .values()
            .filter_map(|e| match e {
                DrawnElement::Marker { marker } => Some(marker),
                DrawnElement::Rectangle { .. } => None,
            })
            .collect()
    }

    pub fn rectangles(&self) -> Vec<&BoundingArea> {
        self.elements
            .values()
            .filter_map(|e| match e {
                DrawnElement::Rectangle { bounds, .. } => Some(bounds),
                DrawnElement::Marker { .. } => None,
            })
            .collect()
    }

    pub fn viewport(&self) -> Option<&BoundingArea> {
        self.viewport.as_ref()
    }

    pub fn operations(&self) -> &[SurfaceOperation] {
        &self.operations
    }

    fn insert(
        &mut self,
        element_name: &'static str,
        element: DrawnElement,
    ) -> Result<SurfaceElementId, SurfaceError> {
        if !self.available {
            return Err(SurfaceError::Unavailable(format!(
                "cannot draw {element_name}"
            )));
        }
        match self.remaining_creates {
            Some(0) => {
                return Err(SurfaceError::Rejected {
                    element: element_name,
                    message: String::from("element limit reached"),
                })
            }
            Some(n) => self.remaining_creates = Some(n - 1),
            None => {}
        }
        let id = SurfaceElementId(self.next_id);
        self.next_id += 1;
        let op = match &element {
            DrawnElement::Marker { marker } => SurfaceOperation::CreateMarker {
                id,
                marker: marker.clone(),
            },
            DrawnElement::Rectangle { bounds, style } => SurfaceOperation::CreateRectangle {
                id,
                bounds: *bounds,
                style: style.clone(),
            },
        };
        log::debug!("surface {op:?}");
        self.operations.push(op);
        self.elements.insert(id, element);
        Ok(id)
    }
}

impl RenderingSurface for RecordingSurface {
    type Handle = SurfaceElementId;

    fn is_available(&self) -> bool {
        self.available
    }

    fn create_marker(&mut self, marker: &MarkerSpec) -> Result<Self::Handle, SurfaceError> {
        let element = DrawnElement::Marker {
            marker: marker.clone(),
        };
        self.insert("marker", element)
    }

    fn create_rectangle(
        &mut self,
        bounds: &BoundingArea,
        style: &RectangleStyle,
    ) -> Result<Self::Handle, SurfaceError> {
        let element = DrawnElement::Rectangle {
            bounds: *bounds,
            style: style.clone(),
        };
        self.insert("rectangle", element)
    }

    fn fit_viewport_to(&mut self, bounds: &BoundingArea) -> Result<(), SurfaceError> {
        if !self.available {
            return Err(SurfaceError::Unavailable(String::from(
                "cannot fit viewport",
            )));
        }
        self.viewport = Some(*bounds);
        self.operations
            .push(SurfaceOperation::FitViewport { bounds: *bounds });
        Ok(())
    }

    fn remove(&mut self, handle: Self::Handle) {
        if self.elements.remove(&handle).is_some() {
            log::debug!("surface removed element {handle}");
            self.operations.push(SurfaceOperation::Remove { id: handle });
        } else {
            log::warn!("surface asked to remove unknown element {handle}");
        }
    }
}
