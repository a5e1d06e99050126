use foundation::ObservationDate;
use layers::LayerKind;

use crate::loader::DataLoader;

/// Mutable map state shared by the shell's event handlers.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    /// Date of the snapshot currently drawn, as reported by the server.
    pub current_date: Option<ObservationDate>,
    pub layer: LayerKind,
    pub loader: DataLoader,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
