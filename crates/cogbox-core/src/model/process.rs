//! Process behaviour
//!
//! A process is the per-cycle logic of a non-buffer component. It reads
//! buffers through the matcher and enqueues messages; it never edits buffer
//! content directly.

use super::Model;

/// Per-cycle logic of a process component
pub trait Process {
    /// Run once per cycle while the component is not stopped
    fn run(&mut self, model: &mut Model);
}

impl<F> Process for F
where
    F: FnMut(&mut Model),
{
    fn run(&mut self, model: &mut Model) {
        self(model)
    }
}
