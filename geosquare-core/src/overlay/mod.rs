mod error;
mod map_view;
mod overlay_handle;
mod overlay_style;
mod recording_surface;
mod surface;
mod synchronizer;

pub use error::{OverlayError, SurfaceError};
pub use map_view::MapView;
pub use overlay_handle::OverlayHandle;
pub use overlay_style::{OverlayStyle, RectangleStyle};
pub use recording_surface::{DrawnElement, RecordingSurface, SurfaceElementId, SurfaceOperation};
pub use surface::{MarkerSpec, RenderingSurface};
pub use synchronizer::{OverlaySynchronizer, SyncOutcome};
