//! Debug rendering of a model
//!
//! ```text
//! rng: BLOCK 1; CYCLE 4
//!   MESSAGE (strategy --> wm; Add): item(3)
//!   COMPONENT: strategy (Process)
//!   COMPONENT: wm (Buffer): [item(3)(4, 1.00), item(2)(3, 0.10)]
//! ```

use std::fmt;

use super::Model;

/// Display adapter returned by [`Model::dump`]
pub struct ModelDump<'a> {
    model: &'a Model,
    state: bool,
}

impl<'a> ModelDump<'a> {
    pub(super) fn new(model: &'a Model, state: bool) -> Self {
        Self { model, state }
    }

    fn name_or_unknown(&self, id: super::ComponentId) -> &'a str {
        self.model
            .component(id)
            .map(|c| c.name())
            .unwrap_or("Unknown")
    }
}

impl fmt::Display for ModelDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model;
        writeln!(
            f,
            "{}: BLOCK {}; CYCLE {}",
            model.name(),
            model.block(),
            model.cycle()
        )?;

        if self.state {
            for message in model.messages() {
                write!(
                    f,
                    "  MESSAGE ({} --> {}; {})",
                    self.name_or_unknown(message.source),
                    self.name_or_unknown(message.target),
                    message.kind
                )?;
                match &message.payload {
                    Some(payload) => writeln!(f, ": {}", payload)?,
                    None => writeln!(f)?,
                }
            }
        }

        for component in model.components() {
            write!(f, "  COMPONENT: {} ({})", component.name(), component.class_name())?;
            if let Some(buffer) = component.buffer().filter(|b| self.state && !b.is_empty()) {
                f.write_str(": [")?;
                for (i, element) in buffer.content().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(
                        f,
                        "{}({}, {:4.2})",
                        element.term, element.timestamp, element.activation
                    )?;
                }
                f.write_str("]")?;
            }
            if component.is_stopped() {
                f.write_str(" [stopped]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
