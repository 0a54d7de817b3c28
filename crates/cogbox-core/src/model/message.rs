//! Messages
//!
//! Messages live for exactly one cycle: processes create them during the
//! generate phase, buffers consume them during the apply phase, and the
//! whole list is dropped when the next cycle starts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ComponentId;
use crate::term::Term;

/// Kind of directive a message carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Process-to-process signal; no kernel effect
    Send,
    /// Prepend the payload to the target buffer
    Add,
    /// Remove the first element matching the payload
    Delete,
    /// Raise activation of matching elements
    Excite,
    /// Lower activation of matching elements
    Inhibit,
    /// Discard the target buffer's content
    Clear,
    /// Halt the target component, or the whole model when the target is 0
    Stop,
}

impl MessageKind {
    pub const ALL: [MessageKind; 7] = [
        MessageKind::Send,
        MessageKind::Add,
        MessageKind::Delete,
        MessageKind::Excite,
        MessageKind::Inhibit,
        MessageKind::Clear,
        MessageKind::Stop,
    ];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Send => "Send",
            MessageKind::Add => "Add",
            MessageKind::Delete => "Delete",
            MessageKind::Excite => "Excite",
            MessageKind::Inhibit => "Inhibit",
            MessageKind::Clear => "Clear",
            MessageKind::Stop => "Stop",
        }
    }

    /// Parse from string name (case-insensitive)
    pub fn parse_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-cycle directive from one component to another
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub source: ComponentId,
    pub target: ComponentId,
    pub kind: MessageKind,
    /// Owned copy of the term the message talks about
    pub payload: Option<Term>,
}

impl Message {
    pub fn new(
        kind: MessageKind,
        source: ComponentId,
        target: ComponentId,
        payload: Option<Term>,
    ) -> Self {
        Self {
            source,
            target,
            kind,
            payload,
        }
    }

    /// True for a Stop addressed to the model itself
    pub fn halts_model(&self) -> bool {
        self.kind == MessageKind::Stop && self.target == super::MODEL_ID
    }
}
