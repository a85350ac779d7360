use serde::Serialize;

/// the elements currently drawn by an [`super::OverlaySynchronizer`]: at most
/// one of each kind. only the synchronizer mutates it.
#[derive(Serialize, Debug, PartialEq)]
pub struct OverlayHandle<H> {
    pub(crate) position: Option<H>,
    pub(crate) rectangle: Option<H>,
    pub(crate) label: Option<H>,
}

impl<H> Default for OverlayHandle<H> {
    fn default() -> Self {
        Self {
            position: None,
            rectangle: None,
            label: None,
        }
    }
}

impl<H> OverlayHandle<H> {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        [
            self.position.is_some(),
            self.rectangle.is_some(),
            self.label.is_some(),
        ]
        .iter()
        .filter(|drawn| **drawn)
        .count()
    }

    pub fn position(&self) -> Option<&H> {
        self.position.as_ref()
    }

    pub fn rectangle(&self) -> Option<&H> {
        self.rectangle.as_ref()
    }

    pub fn label(&self) -> Option<&H> {
        self.label.as_ref()
    }

    /// empties the handle, returning drawn elements in reverse draw order.
    pub(crate) fn take_all(&mut self) -> Vec<H> {
        [self.position.take(), self.label.take(), self.rectangle.take()]
            .into_iter()
            .flatten()
            .collect()
    }
}
