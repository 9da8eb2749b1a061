// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod ui;
pub mod words;

pub use controller::{GameController, GameSettings};
pub use error::GameError;
pub use session::{Action, Outcome, ResultStatus, Session};
pub use words::WordList;
