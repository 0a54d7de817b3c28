//! # Cogbox Core
//!
//! Cycle-driven kernel for box-and-arrow cognitive models. A model is a set
//! of components that talk only through messages:
//!
//! - **Processes**: run once per cycle, read buffers through the matcher and
//!   enqueue messages
//! - **Buffers**: hold timestamped, activation-weighted terms under a decay,
//!   capacity and access policy
//! - **Terms**: Prolog-style data with one-way unification for matching
//!
//! ## Cycle Semantics
//!
//! Every call to [`Model::step`] runs two phases. First all processes see the
//! state left by the previous cycle and generate messages. Then every buffer
//! applies the messages addressed to it in a fixed order: Clear, Delete, Add,
//! Excite/Inhibit, Decay. Messages live for exactly one cycle.
//!
//! ## Quick Start
//!
//! ```rust
//! use cogbox_core::prelude::*;
//!
//! let mut model = Model::with_config(ModelConfig::named("demo").with_seed(7))?;
//! model.add_buffer("wm", 7, BufferConfig::new())?;
//! model.add_process("strategy", 1, |m: &mut Model| {
//!     if m.cycle() == 1 {
//!         m.enqueue_message(MessageKind::Add, 1, 7, Term::parse("item(3)").ok());
//!     }
//! })?;
//!
//! assert!(model.step());
//! assert!(model.step());
//! assert_eq!(model.count_elements(7), Some(1));
//! # Ok::<(), cogbox_core::ModelError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod buffer;
pub mod config;
pub mod error;
pub mod model;
pub mod term;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Buffers and their policies
pub use buffer::{
    ADD_ACTIVATION, AccessOrder, AddOutcome, Buffer, BufferConfig, BufferSnapshot, Capacity,
    Decay, Element, ElementList, ExcessPolicy,
};

// Configuration
pub use config::{DEFAULT_EXCITE_ACTIVATION, DEFAULT_INHIBIT_ACTIVATION, ModelConfig};

// Errors
pub use error::{ModelError, Result};

// Model and scheduler
pub use model::{
    Component, ComponentId, ComponentKind, MODEL_ID, Message, MessageKind, Model, ModelDump,
    Process,
};

// Terms
pub use term::{Term, TermKind, TermParseError, matches, unify};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        AccessOrder, BufferConfig, Capacity, ComponentId, Decay, ExcessPolicy, MODEL_ID,
        MessageKind, Model, ModelConfig, ModelError, Result, Term,
    };
}
