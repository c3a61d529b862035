//! Quiz server module.
//!
//! Provides the HTTP API over the questions loaded at startup.

mod routes;
mod server;
mod state;

pub use routes::configure;
pub use server::run;
pub use state::{QuizState, ResponseFields};
