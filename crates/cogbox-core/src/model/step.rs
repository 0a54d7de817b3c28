//! Cycle scheduler
//!
//! One call to [`Model::step`] runs a full cycle:
//!
//! 1. Drop last cycle's messages, keeping any a driver queued since
//! 2. Advance the cycle counter
//! 3. Generate: every running process may enqueue messages
//! 4. Halt the model if a Stop addressed to id 0 was sent
//! 5. Apply (unless halted): per component, in registration order, honour
//!    Stop, then run the buffer phases Clear, Delete, Add, Activate, Decay

use tracing::{debug, trace};

use super::{ComponentKind, Message, MessageKind, Model};

impl Model {
    /// Advance the model by one cycle. Returns false once the model has
    /// been halted.
    pub fn step(&mut self) -> bool {
        self.messages.drain(..self.settled);
        self.cycle += 1;

        self.generate_messages();

        if !self.stopped && self.messages.iter().any(Message::halts_model) {
            debug!(cycle = self.cycle, block = self.block, "Model halted by Stop message");
            self.stopped = true;
        }

        if !self.stopped {
            self.update_states();
        }
        self.settled = self.messages.len();

        debug!(
            cycle = self.cycle,
            block = self.block,
            messages = self.messages.len(),
            "Cycle complete"
        );
        !self.stopped
    }

    fn generate_messages(&mut self) {
        // Index loop: processes may register components while running
        let mut i = 0;
        while i < self.components.len() {
            let component = &mut self.components[i];
            let id = component.id;
            i += 1;
            if component.stopped {
                continue;
            }
            let ComponentKind::Process(slot) = &mut component.kind else {
                continue;
            };
            let Some(mut process) = slot.take() else {
                continue;
            };

            process.run(self);

            if let Some(component) = self.components.iter_mut().find(|c| c.id == id) {
                if let ComponentKind::Process(slot) = &mut component.kind {
                    *slot = Some(process);
                }
            }
        }
    }

    fn update_states(&mut self) {
        let Model {
            config,
            cycle,
            components,
            messages,
            rng,
            ..
        } = self;
        let cycle = *cycle;

        for component in components.iter_mut() {
            let id = component.id;
            let inbox: Vec<&Message> = messages.iter().rev().filter(|m| m.target == id).collect();

            if !component.stopped && inbox.iter().any(|m| m.kind == MessageKind::Stop) {
                debug!(cycle, id, name = %component.name, "Component stopped");
                component.stopped = true;
            }
            if component.stopped {
                continue;
            }

            let ComponentKind::Buffer(buffer) = &mut component.kind else {
                continue;
            };

            let cleared = buffer.apply_clear(&inbox);
            let deleted = buffer.apply_delete(&inbox);
            let added = buffer.apply_add(&inbox, cycle, &mut *rng);
            let activated = buffer.apply_activation(
                &inbox,
                cycle,
                config.excite_activation,
                config.inhibit_activation,
            );
            let decayed = buffer.apply_decay(cycle, &mut *rng);

            trace!(
                cycle,
                id,
                cleared,
                deleted,
                added = added.added,
                evicted = added.evicted,
                dropped = added.dropped,
                activated,
                decayed,
                remaining = buffer.len(),
                "Buffer updated"
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
