//! Block and session loops

use cogbox_core::{BufferSnapshot, ComponentId, Model};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::scenario::Scenario;

/// End-of-block state of one buffer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferCount {
    pub id: ComponentId,
    pub name: String,
    #[serde(flatten)]
    pub snapshot: BufferSnapshot,
}

/// What happened during one block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockReport {
    pub block: u64,
    /// Cycles run, including the one that halted the model
    pub cycles: u64,
    /// True when a Stop to the model ended the block before the cycle cap
    pub halted: bool,
    /// Buffers in registration order
    pub counts: Vec<BufferCount>,
}

/// Step the model until it halts or `max_cycles` cycles have run
pub fn run_block(model: &mut Model, max_cycles: u64) -> BlockReport {
    while model.cycle() < max_cycles {
        if !model.step() {
            break;
        }
    }
    report(model)
}

/// Summarise the model's current block
pub fn report(model: &Model) -> BlockReport {
    let counts = model
        .components()
        .filter_map(|c| {
            c.buffer().map(|buffer| BufferCount {
                id: c.id(),
                name: c.name().to_string(),
                snapshot: buffer.snapshot(),
            })
        })
        .collect();
    BlockReport {
        block: model.block(),
        cycles: model.cycle(),
        halted: model.is_stopped(),
        counts,
    }
}

/// Run `blocks` blocks of a scenario. `observe` sees the model and report
/// after each block.
pub fn run_session<F>(
    scenario: &Scenario,
    model: &mut Model,
    blocks: u64,
    mut observe: F,
) -> Result<Vec<BlockReport>>
where
    F: FnMut(&Model, &BlockReport),
{
    let (trials, units) = (model.trials_per_unit(), model.units_per_run());
    model.initialise_session(trials, units);

    let mut reports = Vec::new();
    for _ in 0..blocks {
        scenario.start_block(model)?;
        let report = run_block(model, scenario.max_cycles);
        info!(
            block = report.block,
            cycles = report.cycles,
            halted = report.halted,
            "Block complete"
        );
        observe(model, &report);
        reports.push(report);
    }
    Ok(reports)
}
