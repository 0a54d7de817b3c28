//! # Cogbox Sim
//!
//! Data-driven runner for cogbox models. A JSON [`Scenario`] declares the
//! buffers and a set of [`ScriptedProcess`]es that replay fixed messages on
//! fixed cycles; the runner steps the model block by block and reports
//! buffer contents at the end of each block.

pub mod error;
pub mod runner;
pub mod scenario;
pub mod script;

pub use error::{Result, SimError};
pub use runner::{BlockReport, BufferCount, report, run_block, run_session};
pub use scenario::{BufferSpec, DEFAULT_MAX_CYCLES, Scenario, ScriptSpec, SeedSpec};
pub use script::{ScriptStep, ScriptedProcess};
