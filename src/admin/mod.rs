pub use gate::{AdminGate, DenyReason};
pub use panel::{Editable, Managed, PanelState, SaveOutcome};

pub mod gate;
pub mod panel;
