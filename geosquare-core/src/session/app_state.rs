use serde::Serialize;

use crate::model::AreaResult;

/// everything the user interface shows, as one value. the only way to
/// change it is through the transition methods, each of which consumes the
/// previous state.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum AppState {
    #[default]
    Idle,
    ShowingResult(AreaResult),
    /// a failed action. the square shown before the failure stays on screen.
    Error {
        message: String,
        retained: Option<AreaResult>,
    },
}

impl AppState {
    /// the square currently on screen, if any.
    pub fn displayed(&self) -> Option<&AreaResult> {
        match self {
            AppState::Idle => None,
            AppState::ShowingResult(result) => Some(result),
            AppState::Error { retained, .. } => retained.as_ref(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AppState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn show(self, result: AreaResult) -> AppState {
        AppState::ShowingResult(result)
    }

    pub fn fail(self, message: String) -> AppState {
        let retained = match self {
            AppState::Idle => None,
            AppState::ShowingResult(result) => Some(result),
            AppState::Error { retained, .. } => retained,
        };
        AppState::Error { message, retained }
    }

    pub fn clear(self) -> AppState {
        AppState::Idle
    }
}
