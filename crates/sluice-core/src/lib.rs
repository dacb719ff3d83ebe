pub mod config;
pub mod logging;

pub mod capture;
pub mod error;
pub mod extract;
pub mod names;
pub mod run;

pub use error::{ExtractError, MalformedInput};
pub use run::{output_paths, run, RunSummary};
