mod app_state;
mod area_session;
mod error;
mod request_ticket;

pub use app_state::AppState;
pub use area_session::{AreaSession, Completion};
pub use error::GeosquareError;
pub use request_ticket::RequestTicket;
