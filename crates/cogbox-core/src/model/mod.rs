//! Simulation Model
//!
//! The model owns every component, the current cycle's messages and the
//! random stream. Drivers build it once per run, reset it between trials
//! and blocks through the lifecycle operations, and advance it with
//! [`Model::step`].
//!
//! Components are addressed by small integer ids. Id 0 is reserved: it
//! denotes the model itself as a message target.

mod dump;
mod message;
mod process;
mod step;

pub use dump::ModelDump;
pub use message::{Message, MessageKind};
pub use process::Process;

use std::any::Any;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::buffer::{Buffer, BufferConfig, BufferSnapshot, Element, ElementList};
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::term::{Term, unify};

/// Component identifier
pub type ComponentId = u32;

/// Target id that addresses the model itself
pub const MODEL_ID: ComponentId = 0;

// ============================================================================
// COMPONENTS
// ============================================================================

/// What a component is
pub enum ComponentKind {
    /// Runs logic every cycle. The behaviour is absent only while it runs.
    Process(Option<Box<dyn Process>>),
    /// Holds content
    Buffer(Buffer),
}

/// A named participant in the model
pub struct Component {
    id: ComponentId,
    name: String,
    stopped: bool,
    kind: ComponentKind,
}

impl Component {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.kind, ComponentKind::Buffer(_))
    }

    pub fn buffer(&self) -> Option<&Buffer> {
        match &self.kind {
            ComponentKind::Buffer(buffer) => Some(buffer),
            ComponentKind::Process(_) => None,
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut Buffer> {
        match &mut self.kind {
            ComponentKind::Buffer(buffer) => Some(buffer),
            ComponentKind::Process(_) => None,
        }
    }

    /// "Process" or "Buffer"
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            ComponentKind::Process(_) => "Process",
            ComponentKind::Buffer(_) => "Buffer",
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Component");
        s.field("id", &self.id)
            .field("name", &self.name)
            .field("stopped", &self.stopped);
        match &self.kind {
            ComponentKind::Process(_) => s.field("kind", &"Process"),
            ComponentKind::Buffer(buffer) => s.field("buffer", buffer),
        };
        s.finish()
    }
}

fn find(components: &[Component], id: ComponentId) -> Option<&Component> {
    components.iter().find(|c| c.id == id)
}

// ============================================================================
// MODEL
// ============================================================================

/// Global simulation state
pub struct Model {
    config: ModelConfig,
    cycle: u64,
    block: u64,
    stopped: bool,
    /// Registration order
    components: Vec<Component>,
    /// This cycle's messages in enqueue order
    messages: Vec<Message>,
    /// Leading messages that belong to the last completed step. Anything
    /// after them was enqueued by a driver and joins the next cycle.
    settled: usize,
    rng: StdRng,
    extension: Option<Box<dyn Any>>,
}

impl Model {
    /// Create an empty model with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(ModelConfig::named(name))
    }

    /// Create an empty model with custom config
    pub fn with_config(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            cycle: 0,
            block: 0,
            stopped: false,
            components: Vec::new(),
            messages: Vec::new(),
            settled: 0,
            rng,
            extension: None,
        }
    }

    // ========================================================================
    // STATE ACCESSORS
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn block(&self) -> u64 {
        self.block
    }

    /// True once a Stop message addressed to the model has been seen
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn trials_per_unit(&self) -> usize {
        self.config.trials_per_unit
    }

    pub fn units_per_run(&self) -> usize {
        self.config.units_per_run
    }

    /// Restart the random stream from a fixed seed
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Model-specific aggregate data, if set and of type `T`
    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.extension.as_ref()?.downcast_ref()
    }

    pub fn extension_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.extension.as_mut()?.downcast_mut()
    }

    /// Attach model-specific aggregate data, replacing any previous value
    pub fn set_extension<T: Any>(&mut self, data: T) {
        self.extension = Some(Box::new(data));
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    fn register(&mut self, name: String, id: ComponentId, kind: ComponentKind) -> Result<()> {
        if id == MODEL_ID {
            return Err(ModelError::ReservedId);
        }
        if find(&self.components, id).is_some() {
            return Err(ModelError::DuplicateId(id));
        }
        self.components.push(Component {
            id,
            name,
            stopped: false,
            kind,
        });
        Ok(())
    }

    /// Register a process component
    pub fn add_process<P>(&mut self, name: impl Into<String>, id: ComponentId, process: P) -> Result<()>
    where
        P: Process + 'static,
    {
        self.register(
            name.into(),
            id,
            ComponentKind::Process(Some(Box::new(process))),
        )
    }

    /// Register a buffer component
    pub fn add_buffer(
        &mut self,
        name: impl Into<String>,
        id: ComponentId,
        config: BufferConfig,
    ) -> Result<()> {
        config.validate()?;
        self.register(name.into(), id, ComponentKind::Buffer(Buffer::new(config)))
    }

    /// Seed a buffer with an element parsed from text, stamped with the
    /// current cycle
    pub fn seed_element(&mut self, id: ComponentId, text: &str, activation: f64) -> Result<()> {
        let term = Term::parse(text)?;
        self.seed_term(id, term, activation)
    }

    /// Seed a buffer with an element, stamped with the current cycle.
    ///
    /// A full `Limited` buffer makes room the way an Add does: one element
    /// is evicted per its excess policy, or under `Ignore` the seed is
    /// dropped.
    pub fn seed_term(&mut self, id: ComponentId, term: Term, activation: f64) -> Result<()> {
        let cycle = self.cycle;
        let Some(component) = self.components.iter_mut().find(|c| c.id == id) else {
            tracing::warn!(id, "Cannot locate buffer to seed element");
            return Err(ModelError::UnknownComponent(id));
        };
        let Some(buffer) = component.buffer_mut() else {
            tracing::warn!(id, name = %component.name, "Cannot seed element into a process");
            return Err(ModelError::NotABuffer(id));
        };
        if !buffer.seed(Element::new(term, cycle, activation), &mut self.rng) {
            tracing::debug!(id, name = %component.name, "Buffer full, seed element dropped");
        }
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Components in registration order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        find(&self.components, id)
    }

    /// Name of a component, falling back to the model's own name
    pub fn component_name(&self, id: ComponentId) -> &str {
        self.component(id)
            .map(Component::name)
            .unwrap_or(self.config.name.as_str())
    }

    pub fn component_stopped(&self, id: ComponentId) -> Option<bool> {
        self.component(id).map(Component::is_stopped)
    }

    pub fn buffer(&self, id: ComponentId) -> Option<&Buffer> {
        self.component(id).and_then(Component::buffer)
    }

    /// Live content of a buffer, youngest first
    pub fn buffer_contents(&self, id: ComponentId) -> Option<&ElementList> {
        self.buffer(id).map(Buffer::content)
    }

    /// Number of elements in a buffer; `None` for unknown ids and processes
    pub fn count_elements(&self, id: ComponentId) -> Option<usize> {
        self.buffer(id).map(Buffer::len)
    }

    pub fn buffer_snapshot(&self, id: ComponentId) -> Option<BufferSnapshot> {
        self.buffer(id).map(Buffer::snapshot)
    }

    /// Find the first element, in the buffer's access order, whose
    /// activation is at least `threshold` and whose term matches
    /// `template`. On success the bound term replaces `template`.
    ///
    /// Works on a reordered copy, so the live buffer never changes.
    /// Unknown ids simply fail to match.
    pub fn match_above_threshold(
        &mut self,
        id: ComponentId,
        template: &mut Term,
        threshold: f64,
    ) -> bool {
        let Some(buffer) = find(&self.components, id).and_then(Component::buffer) else {
            return false;
        };
        let candidates = buffer.read_copy(&mut self.rng);

        for element in candidates.iter() {
            if element.activation < threshold {
                continue;
            }
            if let Some(mut bound) = unify(template, &element.term) {
                template.swap(&mut bound);
                return true;
            }
        }
        false
    }

    /// [`Model::match_above_threshold`] with a zero threshold
    pub fn match_template(&mut self, id: ComponentId, template: &mut Term) -> bool {
        self.match_above_threshold(id, template, 0.0)
    }

    // ========================================================================
    // MESSAGES
    // ========================================================================

    /// Queue a message. From inside a process it joins the current cycle;
    /// between steps it joins the next one.
    pub fn enqueue_message(
        &mut self,
        kind: MessageKind,
        source: ComponentId,
        target: ComponentId,
        payload: Option<Term>,
    ) {
        self.send(Message::new(kind, source, target, payload));
    }

    pub fn send(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// This cycle's messages, newest first
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Start a trial: cycle back to 0, halt flag cleared
    pub fn initialise_trial(&mut self) {
        self.cycle = 0;
        self.stopped = false;
    }

    /// Start a block: bump the block counter, clear the halt flag and empty
    /// every buffer. Buffer policies are kept.
    pub fn start_new_block(&mut self) {
        self.block += 1;
        self.stopped = false;
        for buffer in self.components.iter_mut().filter_map(Component::buffer_mut) {
            buffer.clear();
        }
    }

    /// Start a session: counters and halt flag reset, repetition counts
    /// stored for the driver
    pub fn initialise_session(&mut self, trials_per_unit: usize, units_per_run: usize) {
        self.cycle = 0;
        self.block = 0;
        self.stopped = false;
        self.config.trials_per_unit = trials_per_unit;
        self.config.units_per_run = units_per_run;
    }

    /// Textual rendering for debugging; `state` adds messages and content
    pub fn dump(&self, state: bool) -> ModelDump<'_> {
        ModelDump::new(self, state)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.config.name)
            .field("cycle", &self.cycle)
            .field("block", &self.block)
            .field("stopped", &self.stopped)
            .field("components", &self.components)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
