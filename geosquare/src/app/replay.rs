use std::collections::VecDeque;
use std::path::Path;

use geosquare_core::{
    model::{Coordinate, Rating},
    overlay::{DrawnElement, RecordingSurface, SurfaceOperation, SyncOutcome},
    reconcile::RawResponse,
    remote::{LocationProvider, RemoteError, RemoteService},
    session::{AppState, AreaSession, Completion, GeosquareError},
};
use serde::{Deserialize, Serialize};

use super::{GeosquareAppError, GeosquareConfig};

/// the canned answer the remote service gives to the next request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedReply {
    Response(RawResponse),
    Error(String),
}

/// one user action or surface event in a replay script.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayStep {
    SurfaceReady,
    SurfaceFailed {
        message: String,
    },
    SubmitCoordinate {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        reply: Option<ScriptedReply>,
    },
    SubmitDeviceLocation {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        reply: Option<ScriptedReply>,
    },
    SubmitLabel {
        label: String,
        #[serde(default)]
        reply: Option<ScriptedReply>,
    },
    SubmitRating {
        rating: i64,
        #[serde(default)]
        reply: Option<ScriptedReply>,
    },
    Clear,
}

impl ReplayStep {
    pub fn action(&self) -> &'static str {
        match self {
            ReplayStep::SurfaceReady => "surface_ready",
            ReplayStep::SurfaceFailed { .. } => "surface_failed",
            ReplayStep::SubmitCoordinate { .. } => "submit_coordinate",
            ReplayStep::SubmitDeviceLocation { .. } => "submit_device_location",
            ReplayStep::SubmitLabel { .. } => "submit_label",
            ReplayStep::SubmitRating { .. } => "submit_rating",
            ReplayStep::Clear => "clear",
        }
    }

    /// rejects replies the step's remote call cannot use. a rating call
    /// returns no payload, so only an error reply applies to it.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ReplayStep::SubmitRating {
                reply: Some(ScriptedReply::Response(_)),
                ..
            } => Err(String::from(
                "submit_rating accepts only an error reply, found a response",
            )),
            _ => Ok(()),
        }
    }

    fn reply(&self) -> Option<&ScriptedReply> {
        match self {
            ReplayStep::SubmitCoordinate { reply, .. }
            | ReplayStep::SubmitDeviceLocation { reply, .. }
            | ReplayStep::SubmitLabel { reply, .. }
            | ReplayStep::SubmitRating { reply, .. } => reply.as_ref(),
            _ => None,
        }
    }
}

/// a remote service answering from a queue of scripted replies.
#[derive(Default, Debug)]
pub struct ScriptedService {
    replies: VecDeque<ScriptedReply>,
    ratings: Vec<RatingRecord>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RatingRecord {
    pub identifier: String,
    pub rating: Rating,
}

impl ScriptedService {
    pub fn push_reply(&mut self, reply: ScriptedReply) {
        self.replies.push_back(reply);
    }

    pub fn ratings(&self) -> &[RatingRecord] {
        &self.ratings
    }

    /// drops replies that no request consumed, returning how many there were.
    pub fn discard_unused(&mut self) -> usize {
        let unused = self.replies.len();
        self.replies.clear();
        unused
    }

    fn next_response(&mut self, request: &str) -> Result<RawResponse, RemoteError> {
        match self.replies.pop_front() {
            Some(ScriptedReply::Response(raw)) => Ok(raw),
            Some(ScriptedReply::Error(message)) => Err(RemoteError(message)),
            None => Err(RemoteError(format!("no scripted reply for {request}"))),
        }
    }
}

impl RemoteService for ScriptedService {
    fn compute_geohash(&mut self, coordinate: &Coordinate) -> Result<RawResponse, RemoteError> {
        self.next_response(&format!("compute_geohash {coordinate}"))
    }

    fn compute_area(&mut self, label: &str) -> Result<RawResponse, RemoteError> {
        self.next_response(&format!("compute_area '{label}'"))
    }

    fn update_rating(&mut self, identifier: &str, rating: Rating) -> Result<(), RemoteError> {
        // a rating succeeds unless an error is scripted
        match self.replies.pop_front() {
            Some(ScriptedReply::Error(message)) => return Err(RemoteError(message)),
            Some(ScriptedReply::Response(_)) => {
                log::warn!("ignoring scripted response to update_rating '{identifier}'")
            }
            None => {}
        }
        self.ratings.push(RatingRecord {
            identifier: identifier.to_string(),
            rating,
        });
        Ok(())
    }
}

struct ScriptedLocation(Coordinate);

impl LocationProvider for ScriptedLocation {
    fn current_position(&mut self) -> Result<Coordinate, RemoteError> {
        Ok(self.0)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied { sync: SyncOutcome },
    Superseded,
    SurfaceAttached { sync: Option<SyncOutcome> },
    Cleared { sync: SyncOutcome },
    Rated,
    Failed { message: String },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub action: &'static str,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// what a replay left behind.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ReplaySummary {
    pub steps: Vec<StepReport>,
    pub state: AppState,
    pub drawn: Vec<DrawnElement>,
    pub operations: Vec<SurfaceOperation>,
    pub ratings: Vec<RatingRecord>,
}

pub fn read_script(filepath: &Path) -> Result<Vec<ReplayStep>, GeosquareAppError> {
    let contents =
        std::fs::read_to_string(filepath).map_err(|e| GeosquareAppError::ReadError {
            path: filepath.to_path_buf(),
            source: e,
        })?;
    let invalid = |message: String| GeosquareAppError::InvalidScript {
        path: filepath.to_path_buf(),
        message,
    };
    let steps: Vec<ReplayStep> =
        serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
    for (index, step) in steps.iter().enumerate() {
        step.validate()
            .map_err(|message| invalid(format!("step {index}: {message}")))?;
    }
    Ok(steps)
}

/// plays a script of user actions through a fresh session whose map starts
/// out loading. action failures are reported per step and do not stop the
/// replay.
pub fn run_replay(steps: &[ReplayStep], config: &GeosquareConfig) -> ReplaySummary {
    let mut session: AreaSession<ScriptedService, RecordingSurface> =
        AreaSession::new(ScriptedService::default(), config.overlay.clone());
    let mut reports = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        if let Some(reply) = step.reply() {
            session.service_mut().push_reply(reply.clone());
        }
        log::debug!("replay step {index}: {}", step.action());
        let outcome = match run_step(&mut session, step, config) {
            Ok(outcome) => outcome,
            Err(e) => StepOutcome::Failed {
                message: e.to_string(),
            },
        };
        let unused = session.service_mut().discard_unused();
        if unused > 0 {
            log::warn!("replay step {index} left {unused} scripted replies unused");
        }
        reports.push(StepReport {
            index,
            action: step.action(),
            outcome,
        });
    }

    let (drawn, operations) = match session.overlay().surface() {
        Some(surface) => (
            surface.elements().values().cloned().collect(),
            surface.operations().to_vec(),
        ),
        None => (vec![], vec![]),
    };
    ReplaySummary {
        steps: reports,
        state: session.state().clone(),
        drawn,
        operations,
        ratings: session.service().ratings().to_vec(),
    }
}

fn run_step(
    session: &mut AreaSession<ScriptedService, RecordingSurface>,
    step: &ReplayStep,
    config: &GeosquareConfig,
) -> Result<StepOutcome, GeosquareError> {
    match step {
        ReplayStep::SurfaceReady => {
            let surface = RecordingSurface::create_map(config.map.clone());
            let sync = session.surface_ready(surface)?;
            Ok(StepOutcome::SurfaceAttached { sync })
        }
        ReplayStep::SurfaceFailed { message } => Err(session.surface_failed(message)),
        ReplayStep::SubmitCoordinate {
            latitude,
            longitude,
            ..
        } => session
            .submit_coordinate(*latitude, *longitude)
            .map(StepOutcome::from),
        ReplayStep::SubmitDeviceLocation {
            latitude,
            longitude,
            ..
        } => {
            let mut provider = ScriptedLocation(Coordinate {
                latitude: *latitude,
                longitude: *longitude,
            });
            session
                .submit_device_location(&mut provider)
                .map(StepOutcome::from)
        }
        ReplayStep::SubmitLabel { label, .. } => {
            session.submit_label(label).map(StepOutcome::from)
        }
        ReplayStep::SubmitRating { rating, .. } => {
            session.submit_rating(*rating)?;
            Ok(StepOutcome::Rated)
        }
        ReplayStep::Clear => {
            let sync = session.clear()?;
            Ok(StepOutcome::Cleared { sync })
        }
    }
}

impl From<Completion> for StepOutcome {
    fn from(value: Completion) -> Self {
        match value {
            Completion::Applied(sync) => StepOutcome::Applied { sync },
            Completion::Superseded => StepOutcome::Superseded,
        }
    }
}
