use serde::Serialize;

use super::{MarkerSpec, OverlayError, OverlayHandle, OverlayStyle, RenderingSurface, SurfaceError};
use crate::model::AreaResult;

/// what a call to [`OverlaySynchronizer::sync`] did to the surface.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// the overlay now shows the target result
    Drawn,
    /// the overlay is now empty
    Cleared,
    /// the surface is still loading; the target is drawn once it attaches
    Deferred,
}

enum SurfaceState<S> {
    Loading,
    Ready(S),
    Unavailable(String),
}

/// keeps the drawn overlay of a rendering surface in step with the current
/// [`AreaResult`].
///
/// every transition removes everything previously drawn before drawing the
/// target state. a target drawn while the surface is still loading is held
/// back and drawn on [`OverlaySynchronizer::attach`]; only the latest such
/// target is kept.
pub struct OverlaySynchronizer<S: RenderingSurface> {
    surface: SurfaceState<S>,
    overlay: OverlayHandle<S::Handle>,
    pending: Option<Option<AreaResult>>,
    style: OverlayStyle,
}

impl<S: RenderingSurface> OverlaySynchronizer<S> {
    /// a synchronizer waiting for its surface to finish loading.
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            surface: SurfaceState::Loading,
            overlay: OverlayHandle::default(),
            pending: None,
            style,
        }
    }

    /// a synchronizer over a surface that has already loaded.
    pub fn with_surface(surface: S, style: OverlayStyle) -> Self {
        Self {
            surface: SurfaceState::Ready(surface),
            overlay: OverlayHandle::default(),
            pending: None,
            style,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.surface, SurfaceState::Ready(_))
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.surface {
            SurfaceState::Ready(surface) => Some(surface),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn surface_mut(&mut self) -> Option<&mut S> {
        match &mut self.surface {
            SurfaceState::Ready(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn overlay(&self) -> &OverlayHandle<S::Handle> {
        &self.overlay
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// hands over the loaded surface and draws any deferred target.
    ///
    /// # Returns
    ///
    /// * the outcome of drawing the deferred target, if there was one
    pub fn attach(&mut self, surface: S) -> Result<Option<SyncOutcome>, OverlayError> {
        if let SurfaceState::Ready(mut previous) =
            std::mem::replace(&mut self.surface, SurfaceState::Ready(surface))
        {
            log::warn!("replacing an attached surface; clearing its overlay");
            clear_overlay(&mut previous, &mut self.overlay);
        }
        match self.pending.take() {
            Some(target) => {
                log::debug!("surface attached, drawing deferred overlay");
                self.sync(target.as_ref()).map(Some)
            }
            None => Ok(None),
        }
    }

    /// records that the surface failed to load or initialize. every later
    /// sync reports [`OverlayError::SurfaceUnavailable`].
    pub fn fail(&mut self, message: &str) {
        let previous = std::mem::replace(
            &mut self.surface,
            SurfaceState::Unavailable(message.to_string()),
        );
        if let SurfaceState::Ready(mut surface) = previous {
            clear_overlay(&mut surface, &mut self.overlay);
        }
        self.pending = None;
        log::warn!("map surface unavailable: {message}");
    }

    /// reconciles the surface with `current`, where `None` clears the overlay.
    /// on error nothing of the target state remains drawn.
    pub fn sync(&mut self, current: Option<&AreaResult>) -> Result<SyncOutcome, OverlayError> {
        let surface = match &mut self.surface {
            SurfaceState::Loading => {
                self.pending = Some(current.cloned());
                return Ok(SyncOutcome::Deferred);
            }
            SurfaceState::Unavailable(message) => {
                return Err(OverlayError::SurfaceUnavailable(message.clone()))
            }
            SurfaceState::Ready(surface) => surface,
        };
        if !surface.is_available() {
            return Err(OverlayError::SurfaceUnavailable(String::from(
                "map library is not ready to draw",
            )));
        }

        clear_overlay(surface, &mut self.overlay);
        match current {
            None => Ok(SyncOutcome::Cleared),
            Some(result) => {
                self.overlay = draw_overlay(surface, result, &self.style)?;
                log::debug!(
                    "overlay shows '{}' ({} elements)",
                    result.label(),
                    self.overlay.len()
                );
                Ok(SyncOutcome::Drawn)
            }
        }
    }
}

fn clear_overlay<S: RenderingSurface>(surface: &mut S, overlay: &mut OverlayHandle<S::Handle>) {
    for handle in overlay.take_all() {
        surface.remove(handle);
    }
}

/// draws the full element set for a result, or nothing: anything drawn
/// before a failure is removed again.
fn draw_overlay<S: RenderingSurface>(
    surface: &mut S,
    result: &AreaResult,
    style: &OverlayStyle,
) -> Result<OverlayHandle<S::Handle>, SurfaceError> {
    let mut drawn = OverlayHandle::default();
    match draw_elements(surface, result, style, &mut drawn) {
        Ok(()) => Ok(drawn),
        Err(e) => {
            clear_overlay(surface, &mut drawn);
            Err(e)
        }
    }
}

fn draw_elements<S: RenderingSurface>(
    surface: &mut S,
    result: &AreaResult,
    style: &OverlayStyle,
    drawn: &mut OverlayHandle<S::Handle>,
) -> Result<(), SurfaceError> {
    let area = result.area();
    drawn.rectangle = Some(surface.create_rectangle(area, &style.rectangle)?);
    surface.fit_viewport_to(area)?;

    let label = MarkerSpec::Label {
        position: area.center(),
        text: result.label().to_string(),
        color: style.label_color.clone(),
    };
    drawn.label = Some(surface.create_marker(&label)?);

    if let Some(position) = result.origin().position() {
        let marker = MarkerSpec::Position {
            position: *position,
            title: style.position_title.clone(),
        };
        drawn.position = Some(surface.create_marker(&marker)?);
    }
    Ok(())
}
