mod error;
mod geosquare_app;
mod geosquare_config;
mod replay;

pub use error::GeosquareAppError;
pub use geosquare_app::{GeosquareApp, GeosquareOperation};
pub use geosquare_config::GeosquareConfig;
pub use replay::{
    read_script, run_replay, RatingRecord, ReplayStep, ReplaySummary, ScriptedReply,
    ScriptedService, StepOutcome, StepReport,
};
