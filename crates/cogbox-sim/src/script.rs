//! Scripted processes
//!
//! A scripted process carries no model logic of its own: it replays a fixed
//! list of messages, each tagged with the cycle on which it is sent.

use cogbox_core::{ComponentId, MessageKind, Model, Process, Term};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// One scripted message as written in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Cycle on which the message is sent (cycles count from 1)
    pub cycle: u64,
    pub kind: MessageKind,
    pub target: ComponentId,
    /// Term text; omitted for Clear and Stop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Clone)]
struct PlannedMessage {
    cycle: u64,
    kind: MessageKind,
    target: ComponentId,
    payload: Option<Term>,
}

/// Process that sends its scripted messages on their cycles
#[derive(Debug, Clone)]
pub struct ScriptedProcess {
    id: ComponentId,
    plan: Vec<PlannedMessage>,
}

impl ScriptedProcess {
    /// Build from scenario steps. Payloads are parsed here, once.
    pub fn new(name: &str, id: ComponentId, steps: &[ScriptStep]) -> Result<Self> {
        let plan = steps
            .iter()
            .enumerate()
            .map(|(step, s)| {
                let payload = s
                    .payload
                    .as_deref()
                    .map(Term::parse)
                    .transpose()
                    .map_err(|source| SimError::Payload {
                        script: name.to_string(),
                        step,
                        source,
                    })?;
                Ok(PlannedMessage {
                    cycle: s.cycle,
                    kind: s.kind,
                    target: s.target,
                    payload,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { id, plan })
    }
}

impl Process for ScriptedProcess {
    fn run(&mut self, model: &mut Model) {
        let cycle = model.cycle();
        for planned in self.plan.iter().filter(|p| p.cycle == cycle) {
            model.enqueue_message(planned.kind, self.id, planned.target, planned.payload.clone());
        }
    }
}
