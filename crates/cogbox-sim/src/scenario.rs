//! Scenario files
//!
//! A scenario is a JSON description of a model: its configuration, the
//! buffers with their policies and initial content, and the scripted
//! processes that drive them.
//!
//! ```json
//! {
//!   "model": { "name": "demo", "seed": 7 },
//!   "buffers": [
//!     { "name": "wm", "id": 7, "config": { "decay": { "kind": "fixed", "constant": 5 } },
//!       "seed": [{ "term": "goal(start)", "activation": 1.0 }] }
//!   ],
//!   "scripts": [
//!     { "name": "strategy", "id": 1,
//!       "steps": [{ "cycle": 1, "kind": "add", "target": 7, "payload": "item(3)" }] }
//!   ],
//!   "max_cycles": 20
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use cogbox_core::{BufferConfig, ComponentId, MODEL_ID, Model, ModelConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::script::{ScriptStep, ScriptedProcess};

/// Default cycle cap per block
pub const DEFAULT_MAX_CYCLES: u64 = 100;

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_seed_activation() -> f64 {
    cogbox_core::ADD_ACTIVATION
}

/// Initial buffer element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSpec {
    pub term: String,
    #[serde(default = "default_seed_activation")]
    pub activation: f64,
}

/// Buffer declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferSpec {
    pub name: String,
    pub id: ComponentId,
    #[serde(default)]
    pub config: BufferConfig,
    /// Re-seeded at the start of every block
    #[serde(default)]
    pub seed: Vec<SeedSpec>,
}

/// Scripted process declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSpec {
    pub name: String,
    pub id: ComponentId,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// A complete runnable scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub buffers: Vec<BufferSpec>,
    #[serde(default)]
    pub scripts: Vec<ScriptSpec>,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Scenario {
    /// Read a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&text)?;
        for (script, step) in scenario.late_steps() {
            warn!(
                script,
                cycle = step.cycle,
                max_cycles = scenario.max_cycles,
                "Script step is past the cycle cap and will never be sent"
            );
        }
        debug!(
            path = %path.display(),
            buffers = scenario.buffers.len(),
            scripts = scenario.scripts.len(),
            "Scenario loaded"
        );
        Ok(scenario)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Structural checks that do not need a model
    pub fn validate(&self) -> Result<()> {
        if self.max_cycles == 0 {
            return Err(SimError::Invalid("max_cycles must be > 0".to_string()));
        }
        let mut ids = HashSet::new();
        let declared = self
            .buffers
            .iter()
            .map(|b| (b.id, b.name.as_str()))
            .chain(self.scripts.iter().map(|s| (s.id, s.name.as_str())));
        for (id, name) in declared {
            if !ids.insert(id) {
                return Err(SimError::Invalid(format!(
                    "component '{}' reuses id {}",
                    name, id
                )));
            }
        }
        for script in &self.scripts {
            if let Some(step) = script
                .steps
                .iter()
                .find(|s| s.target != MODEL_ID && !ids.contains(&s.target))
            {
                return Err(SimError::Invalid(format!(
                    "script '{}' targets unknown component {}",
                    script.name, step.target
                )));
            }
        }
        Ok(())
    }

    /// Build a fresh model: buffers in declaration order, then scripts.
    /// Buffers are not seeded until a block starts.
    pub fn build(&self) -> Result<Model> {
        let mut model = Model::with_config(self.model.clone())?;
        for buffer in &self.buffers {
            model.add_buffer(buffer.name.as_str(), buffer.id, buffer.config)?;
        }
        for script in &self.scripts {
            let process = ScriptedProcess::new(&script.name, script.id, &script.steps)?;
            model.add_process(script.name.as_str(), script.id, process)?;
        }
        Ok(model)
    }

    /// Put every buffer's initial elements in place
    pub fn seed_buffers(&self, model: &mut Model) -> Result<()> {
        for buffer in &self.buffers {
            for (index, seed) in buffer.seed.iter().enumerate() {
                model
                    .seed_element(buffer.id, &seed.term, seed.activation)
                    .map_err(|source| SimError::Seed {
                        buffer: buffer.name.clone(),
                        index,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Script steps scheduled past `max_cycles`; they never fire
    pub fn late_steps(&self) -> impl Iterator<Item = (&str, &ScriptStep)> {
        self.scripts.iter().flat_map(move |script| {
            script
                .steps
                .iter()
                .filter(move |step| step.cycle > self.max_cycles)
                .map(move |step| (script.name.as_str(), step))
        })
    }

    /// Reset the model for a new block and re-seed its buffers
    pub fn start_block(&self, model: &mut Model) -> Result<()> {
        model.start_new_block();
        model.initialise_trial();
        self.seed_buffers(model)
    }
}
