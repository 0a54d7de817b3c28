//! Model errors
//!
//! Only registration, seeding and configuration can fail. Queries against
//! unknown components degrade to `false` / `None` instead of erroring.

use thiserror::Error;

use crate::model::ComponentId;
use crate::term::TermParseError;

/// Errors that can occur while building or seeding a model
#[derive(Debug, Error)]
pub enum ModelError {
    /// Id 0 addresses the model itself
    #[error("Component id 0 is reserved for the model itself")]
    ReservedId,

    /// Another component already uses this id
    #[error("Duplicate component id: {0}")]
    DuplicateId(ComponentId),

    /// No component with this id
    #[error("Component not found: {0}")]
    UnknownComponent(ComponentId),

    /// The component exists but holds no content
    #[error("Component {0} is not a buffer")]
    NotABuffer(ComponentId),

    /// Rejected model or buffer configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Element text is not a well-formed term
    #[error(transparent)]
    TermParse(#[from] TermParseError),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
