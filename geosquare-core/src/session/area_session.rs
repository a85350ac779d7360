use serde::Serialize;

use super::{AppState, GeosquareError, RequestTicket};
use crate::model::{AreaResult, Coordinate, ModelError, Origin, Rating};
use crate::overlay::{
    OverlayError, OverlayStyle, OverlaySynchronizer, RenderingSurface, SyncOutcome,
};
use crate::reconcile::{reconcile, RawResponse};
use crate::remote::{LocationProvider, RemoteError, RemoteService};

/// how a completed request affected the session.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// the response became the displayed square
    Applied(SyncOutcome),
    /// a newer request was issued meanwhile; the response was dropped
    Superseded,
}

/// one user's session: the remote service, the application state, and the
/// map overlay that mirrors it.
///
/// every user action goes through a method here. failures are written to the
/// error slot of [`AppState`] and also returned; the previously displayed
/// square and its overlay are left as they were.
pub struct AreaSession<R: RemoteService, S: RenderingSurface> {
    service: R,
    overlay: OverlaySynchronizer<S>,
    state: AppState,
    issued: u64,
}

impl<R: RemoteService, S: RenderingSurface> AreaSession<R, S> {
    /// a session whose map surface is still loading.
    pub fn new(service: R, style: OverlayStyle) -> Self {
        Self::from_parts(service, OverlaySynchronizer::new(style))
    }

    pub fn from_parts(service: R, overlay: OverlaySynchronizer<S>) -> Self {
        Self {
            service,
            overlay,
            state: AppState::Idle,
            issued: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn overlay(&self) -> &OverlaySynchronizer<S> {
        &self.overlay
    }

    pub fn service(&self) -> &R {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut R {
        &mut self.service
    }

    /// the map surface finished loading.
    pub fn surface_ready(&mut self, surface: S) -> Result<Option<SyncOutcome>, GeosquareError> {
        self.overlay
            .attach(surface)
            .map_err(|e| self.record_overlay_failure(e))
    }

    /// the map surface failed to load.
    pub fn surface_failed(&mut self, message: &str) -> GeosquareError {
        self.overlay.fail(message);
        let error = OverlayError::SurfaceUnavailable(message.to_string());
        self.record_overlay_failure(error)
    }

    /// look up the square containing a user-entered coordinate.
    pub fn submit_coordinate(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Completion, GeosquareError> {
        let coordinate =
            Coordinate::new(latitude, longitude).map_err(|e| self.record(e.into()))?;
        let ticket = self.begin_request(Origin::FreshLocation { coordinate });
        let reply = self.service.compute_geohash(&coordinate);
        self.complete_request(ticket, reply)
    }

    /// look up the square containing the device's current position.
    pub fn submit_device_location<L: LocationProvider>(
        &mut self,
        provider: &mut L,
    ) -> Result<Completion, GeosquareError> {
        let coordinate = provider
            .current_position()
            .map_err(|e| self.record(GeosquareError::LocationUnavailable(e.0)))?;
        self.submit_coordinate(coordinate.latitude, coordinate.longitude)
    }

    /// look up the square named by a cell label.
    pub fn submit_label(&mut self, label: &str) -> Result<Completion, GeosquareError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(self.record(ModelError::EmptyLabel.into()));
        }
        let ticket = self.begin_request(Origin::LookedUp);
        let reply = self.service.compute_area(label);
        self.complete_request(ticket, reply)
    }

    /// rate the displayed square.
    pub fn submit_rating(&mut self, rating: i64) -> Result<(), GeosquareError> {
        let rating = Rating::try_from(rating).map_err(|e| self.record(e.into()))?;
        let identifier = match self.state.displayed() {
            Some(result) => result.label().to_string(),
            None => return Err(self.record(GeosquareError::NothingDisplayed("rate"))),
        };
        self.service
            .update_rating(&identifier, rating)
            .map_err(|e| self.record(GeosquareError::RemoteCallFailed(e.0)))?;
        log::info!("rated '{identifier}' {rating}");
        Ok(())
    }

    /// remove the displayed square. the state only returns to idle once the
    /// overlay is actually gone.
    pub fn clear(&mut self) -> Result<SyncOutcome, GeosquareError> {
        self.issued += 1;
        match self.overlay.sync(None) {
            Ok(outcome) => {
                self.state = std::mem::take(&mut self.state).clear();
                Ok(outcome)
            }
            Err(e) => Err(self.record_overlay_failure(e)),
        }
    }

    /// registers a new outstanding request, superseding any earlier one.
    pub fn begin_request(&mut self, origin: Origin) -> RequestTicket {
        self.issued += 1;
        RequestTicket {
            sequence: self.issued,
            origin,
        }
    }

    /// applies the reply to a request. replies to superseded tickets change
    /// nothing, whether they succeeded or not.
    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        reply: Result<RawResponse, RemoteError>,
    ) -> Result<Completion, GeosquareError> {
        if ticket.sequence != self.issued {
            log::debug!(
                "dropping reply to request {} ({}), request {} is newer",
                ticket.sequence,
                ticket.origin,
                self.issued
            );
            return Ok(Completion::Superseded);
        }
        let raw = reply.map_err(|e| self.record(GeosquareError::RemoteCallFailed(e.0)))?;
        let result = reconcile(raw, ticket.origin).map_err(|e| self.record(e.into()))?;
        if let Some(position) = result.origin().position() {
            if !result.area().covers(position) {
                log::warn!(
                    "square '{}' does not cover requested position {position}",
                    result.label()
                );
            }
        }
        self.apply(result)
    }

    fn apply(&mut self, result: AreaResult) -> Result<Completion, GeosquareError> {
        match self.overlay.sync(Some(&result)) {
            Ok(outcome) => {
                log::info!("showing square '{}' from {}", result.label(), result.origin());
                self.state = std::mem::take(&mut self.state).show(result);
                Ok(Completion::Applied(outcome))
            }
            Err(e) => Err(self.record_overlay_failure(e)),
        }
    }

    /// the retained result must match what the map still shows: an emptied
    /// overlay drops it, an untouched one keeps it.
    fn record_overlay_failure(&mut self, error: OverlayError) -> GeosquareError {
        if self.overlay.overlay().is_empty() {
            self.state = std::mem::take(&mut self.state).clear();
        }
        self.record(error.into())
    }

    fn record(&mut self, error: GeosquareError) -> GeosquareError {
        log::warn!("{error}");
        self.state = std::mem::take(&mut self.state).fail(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use serde_json::{json, Value};

    use super::*;
    use crate::model::BoundingArea;
    use crate::overlay::{MapView, MarkerSpec, RecordingSurface};
    use crate::reconcile::{ReconcileError, RequiredField};

    #[derive(Default)]
    struct FakeService {
        replies: VecDeque<Result<RawResponse, RemoteError>>,
        ratings: Vec<(String, u8)>,
        rating_error: Option<String>,
        calls: usize,
    }

    impl FakeService {
        fn reply(&mut self, reply: Result<RawResponse, RemoteError>) {
            self.replies.push_back(reply);
        }

        fn next(&mut self) -> Result<RawResponse, RemoteError> {
            self.calls += 1;
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError(String::from("no reply queued"))))
        }
    }

    impl RemoteService for FakeService {
        fn compute_geohash(&mut self, _: &Coordinate) -> Result<RawResponse, RemoteError> {
            self.next()
        }

        fn compute_area(&mut self, _: &str) -> Result<RawResponse, RemoteError> {
            self.next()
        }

        fn update_rating(&mut self, identifier: &str, rating: Rating) -> Result<(), RemoteError> {
            match &self.rating_error {
                Some(msg) => Err(RemoteError(msg.clone())),
                None => {
                    self.ratings.push((identifier.to_string(), rating.value()));
                    Ok(())
                }
            }
        }
    }

    struct FixedLocation(Result<Coordinate, RemoteError>);

    impl LocationProvider for FixedLocation {
        fn current_position(&mut self) -> Result<Coordinate, RemoteError> {
            self.0.clone()
        }
    }

    fn square(label: &str) -> Value {
        json!({
            "lat_start": 40.0,
            "lat_end": 40.1,
            "lon_start": -74.0,
            "lon_end": -73.9,
            "geohash": label,
            "created": false
        })
    }

    fn encoded(label: &str) -> Result<RawResponse, RemoteError> {
        Ok(RawResponse::from(square(label).to_string()))
    }

    fn session() -> AreaSession<FakeService, RecordingSurface> {
        let surface = RecordingSurface::create_map(MapView::default());
        let overlay = OverlaySynchronizer::with_surface(surface, OverlayStyle::default());
        AreaSession::from_parts(FakeService::default(), overlay)
    }

    fn drawn(session: &AreaSession<FakeService, RecordingSurface>) -> usize {
        session
            .overlay()
            .surface()
            .map(|s| s.elements().len())
            .unwrap_or_default()
    }

    #[test]
    fn test_submit_coordinate_shows_fresh_square() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        let completion = s.submit_coordinate(40.05, -73.95);
        assert_eq!(completion, Ok(Completion::Applied(SyncOutcome::Drawn)));
        let shown = s.state().displayed().expect("nothing displayed");
        assert_eq!(shown.label(), "dr5r");
        assert_eq!(shown.created(), Some(false));
        assert_eq!(drawn(&s), 3);
    }

    #[test]
    fn test_submit_label_has_no_position_marker() {
        let mut s = session();
        s.service_mut().reply(Ok(RawResponse::from(square("dr5r"))));
        s.submit_label("  dr5r ").expect("test invariant failed");
        assert_eq!(drawn(&s), 2);
        assert_eq!(s.state().displayed().map(|r| *r.origin()), Some(Origin::LookedUp));
    }

    #[test]
    fn test_invalid_coordinate_never_calls_remote() {
        let mut s = session();
        let result = s.submit_coordinate(91.0, 0.0);
        assert_eq!(
            result,
            Err(GeosquareError::InvalidInput(ModelError::InvalidLatitude(91.0)))
        );
        assert_eq!(s.service().calls, 0);
        assert!(s.state().error_message().is_some());
    }

    #[test]
    fn test_empty_label_is_rejected_locally() {
        let mut s = session();
        let result = s.submit_label("   ");
        assert_eq!(result, Err(GeosquareError::InvalidInput(ModelError::EmptyLabel)));
        assert_eq!(s.service().calls, 0);
    }

    #[test]
    fn test_reconcile_failure_leaves_previous_square() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        s.submit_coordinate(40.05, -73.95).expect("test invariant failed");
        let before: Vec<_> = s
            .overlay()
            .surface()
            .map(|x| x.operations().to_vec())
            .unwrap_or_default();

        s.service_mut().reply(Ok(RawResponse::from(r#"{"lat_start":1}"#)));
        let result = s.submit_label("dr5x");
        assert_eq!(
            result,
            Err(GeosquareError::Reconcile(ReconcileError::UnexpectedShape(
                RequiredField::LonStart
            )))
        );
        assert_eq!(s.state().displayed().map(|r| r.label()), Some("dr5r"));
        let after: Vec<_> = s
            .overlay()
            .surface()
            .map(|x| x.operations().to_vec())
            .unwrap_or_default();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remote_failure_message_is_verbatim() {
        let mut s = session();
        s.service_mut()
            .reply(Err(RemoteError(String::from("canister rejected call"))));
        let result = s.submit_label("dr5r");
        assert_eq!(
            result,
            Err(GeosquareError::RemoteCallFailed(String::from(
                "canister rejected call"
            )))
        );
        assert_eq!(s.state().error_message(), Some("canister rejected call"));
    }

    #[test]
    fn test_stale_reply_is_superseded() {
        let mut s = session();
        let first = s.begin_request(Origin::LookedUp);
        let second = s.begin_request(Origin::LookedUp);

        let applied = s.complete_request(second, Ok(RawResponse::from(square("newer"))));
        assert_eq!(applied, Ok(Completion::Applied(SyncOutcome::Drawn)));

        let stale = s.complete_request(first, Ok(RawResponse::from(square("older"))));
        assert_eq!(stale, Ok(Completion::Superseded));
        assert_eq!(s.state().displayed().map(|r| r.label()), Some("newer"));
        assert_eq!(drawn(&s), 2);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut s = session();
        let first = s.begin_request(Origin::LookedUp);
        let _second = s.begin_request(Origin::LookedUp);
        let stale = s.complete_request(first, Err(RemoteError(String::from("timeout"))));
        assert_eq!(stale, Ok(Completion::Superseded));
        assert_eq!(s.state(), &AppState::Idle);
    }

    #[test]
    fn test_rating_uses_displayed_label() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        s.submit_coordinate(40.05, -73.95).expect("test invariant failed");
        s.submit_rating(7).expect("test invariant failed");
        assert_eq!(s.service().ratings, vec![(String::from("dr5r"), 7)]);
    }

    #[test]
    fn test_rating_without_square_or_out_of_range() {
        let mut s = session();
        assert_eq!(
            s.submit_rating(5),
            Err(GeosquareError::NothingDisplayed("rate"))
        );
        s.service_mut().reply(encoded("dr5r"));
        s.submit_label("dr5r").expect("test invariant failed");
        assert_eq!(
            s.submit_rating(11),
            Err(GeosquareError::InvalidInput(ModelError::RatingOutOfRange(11)))
        );
        s.service_mut().rating_error = Some(String::from("not the owner"));
        assert_eq!(
            s.submit_rating(3),
            Err(GeosquareError::RemoteCallFailed(String::from("not the owner")))
        );
        // the square stays displayed after a failed rating
        assert_eq!(s.state().displayed().map(|r| r.label()), Some("dr5r"));
    }

    #[test]
    fn test_device_location() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        let mut provider = FixedLocation(Ok(Coordinate {
            latitude: 40.05,
            longitude: -73.95,
        }));
        s.submit_device_location(&mut provider)
            .expect("test invariant failed");
        let marker = s.overlay().surface().and_then(|x| {
            x.markers()
                .into_iter()
                .find(|m| matches!(m, MarkerSpec::Position { .. }))
                .cloned()
        });
        assert!(marker.is_some());

        let mut denied = FixedLocation(Err(RemoteError(String::from("permission denied"))));
        assert_eq!(
            s.submit_device_location(&mut denied),
            Err(GeosquareError::LocationUnavailable(String::from(
                "permission denied"
            )))
        );
    }

    #[test]
    fn test_clear_removes_overlay() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        s.submit_coordinate(40.05, -73.95).expect("test invariant failed");
        assert_eq!(s.clear(), Ok(SyncOutcome::Cleared));
        assert_eq!(s.state(), &AppState::Idle);
        assert_eq!(drawn(&s), 0);
    }

    #[test]
    fn test_loading_surface_defers_then_draws() {
        let mut s: AreaSession<FakeService, RecordingSurface> =
            AreaSession::new(FakeService::default(), OverlayStyle::default());
        s.service_mut().reply(encoded("dr5r"));
        let completion = s.submit_coordinate(40.05, -73.95);
        assert_eq!(completion, Ok(Completion::Applied(SyncOutcome::Deferred)));
        assert!(s.state().displayed().is_some());

        let outcome = s.surface_ready(RecordingSurface::create_map(MapView::default()));
        assert_eq!(outcome, Ok(Some(SyncOutcome::Drawn)));
        assert_eq!(drawn(&s), 3);
    }

    #[test]
    fn test_failed_surface_displays_nothing() {
        let mut s: AreaSession<FakeService, RecordingSurface> =
            AreaSession::new(FakeService::default(), OverlayStyle::default());
        s.surface_failed("failed to load map script");
        s.service_mut().reply(encoded("dr5r"));
        let result = s.submit_label("dr5r");
        assert!(matches!(result, Err(GeosquareError::Overlay(_))));
        assert_eq!(s.state().displayed(), None);
        assert!(s.state().error_message().is_some());
    }

    #[test]
    fn test_unavailable_surface_keeps_displayed_square_in_step_with_map() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        s.submit_coordinate(40.05, -73.95).expect("test invariant failed");
        if let Some(surface) = s.overlay.surface_mut() {
            surface.set_available(false);
        }

        s.service_mut().reply(Ok(RawResponse::from(json!({
            "lat_start": 10.0,
            "lat_end": 10.5,
            "lon_start": 20.0,
            "lon_end": 20.5,
            "geohash": "s1"
        }))));
        let result = s.submit_label("s1");
        assert!(matches!(result, Err(GeosquareError::Overlay(_))));
        let shown = s.state().displayed().expect("previous square dropped");
        assert_eq!(shown.label(), "dr5r");
        let rectangles: Vec<BoundingArea> = s
            .overlay()
            .surface()
            .map(|x| x.rectangles().into_iter().copied().collect())
            .unwrap_or_default();
        assert_eq!(rectangles, vec![*shown.area()]);
        assert!(s.state().error_message().is_some());

        assert!(matches!(s.clear(), Err(GeosquareError::Overlay(_))));
        assert_eq!(s.state().displayed().map(|r| r.label()), Some("dr5r"));
        assert_eq!(drawn(&s), 3);
    }

    #[test]
    fn test_rolled_back_draw_drops_displayed_square() {
        let mut s = session();
        s.service_mut().reply(encoded("dr5r"));
        s.submit_label("dr5r").expect("test invariant failed");
        if let Some(surface) = s.overlay.surface_mut() {
            // the new rectangle is accepted, its label is rejected
            surface.reject_after(1);
        }
        s.service_mut().reply(encoded("dr5x"));
        let result = s.submit_label("dr5x");
        assert!(matches!(result, Err(GeosquareError::Overlay(_))));
        assert_eq!(drawn(&s), 0);
        assert_eq!(s.state().displayed(), None);
        assert!(s.state().error_message().is_some());
    }
}
