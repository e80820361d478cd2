// Résumé workflow: file gate, state machine, and the coordinator that drives it.
// Backend calls go through backend_client's traits; rendering goes through Presenter.

pub mod coordinator;
pub mod presenter;
pub mod state;
pub mod validator;

pub use coordinator::WorkflowCoordinator;
pub use presenter::{Notice, Presenter};
