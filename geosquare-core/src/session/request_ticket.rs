use serde::Serialize;

use crate::model::Origin;

/// issued for every remote area request. only the most recently issued
/// ticket may change what is displayed.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct RequestTicket {
    pub(crate) sequence: u64,
    pub(crate) origin: Origin,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}
