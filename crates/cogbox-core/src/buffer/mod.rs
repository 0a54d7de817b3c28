//! Buffers
//!
//! A buffer holds an [`ElementList`] governed by four policies:
//!
//! 1. **Decay**: per-cycle survival test on each element ([`Decay`])
//! 2. **Capacity**: unlimited, or limited to a fixed number of elements
//! 3. **Excess**: what an Add does when a limited buffer is full
//! 4. **Access**: the order in which reads walk the content
//!
//! The scheduler drives a buffer through its message phases once per cycle
//! in the fixed order Clear, Delete, Add, Activate, Decay.

mod decay;
mod element;

pub use decay::Decay;
pub use element::{Element, ElementList};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::{Message, MessageKind};
use crate::term::matches;

/// Activation given to freshly added elements
pub const ADD_ACTIVATION: f64 = 1.0;

// ============================================================================
// POLICIES
// ============================================================================

/// How many elements a buffer may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "constant", rename_all = "lowercase")]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited(usize),
}

/// What happens when an Add reaches a full, limited buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExcessPolicy {
    /// Drop the incoming element
    #[default]
    Ignore,
    /// Evict a uniformly chosen element
    Random,
    /// Evict the tail (oldest) element
    Oldest,
    /// Evict the head (youngest) element
    Youngest,
}

/// Order in which reads walk the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessOrder {
    /// Most recent first (native order)
    #[default]
    Lifo,
    /// Oldest first
    Fifo,
    /// Fresh random permutation on every read
    Random,
}

impl ExcessPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExcessPolicy::Ignore => "ignore",
            ExcessPolicy::Random => "random",
            ExcessPolicy::Oldest => "oldest",
            ExcessPolicy::Youngest => "youngest",
        }
    }
}

impl AccessOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOrder::Lifo => "lifo",
            AccessOrder::Fifo => "fifo",
            AccessOrder::Random => "random",
        }
    }
}

// ============================================================================
// BUFFER CONFIG
// ============================================================================

/// Policy settings for a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BufferConfig {
    pub decay: Decay,
    pub capacity: Capacity,
    pub excess: ExcessPolicy,
    pub access: AccessOrder,
}

impl BufferConfig {
    /// Non-decaying, unlimited, LIFO buffer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decay(mut self, decay: Decay) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_excess(mut self, excess: ExcessPolicy) -> Self {
        self.excess = excess;
        self
    }

    pub fn with_access(mut self, access: AccessOrder) -> Self {
        self.access = access;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.decay.constant() == Some(0) {
            return Err(ModelError::InvalidConfig(format!(
                "{} decay needs a constant >= 1",
                self.decay.as_str()
            )));
        }
        if self.capacity == Capacity::Limited(0) {
            return Err(ModelError::InvalidConfig(
                "limited capacity must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// BUFFER
// ============================================================================

/// Outcome of one Add phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: usize,
    pub evicted: usize,
    pub dropped: usize,
}

/// Result of making room for one new element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Room {
    Free,
    Evicted,
    /// Full under `Ignore`: the new element is dropped
    Full,
}

/// Summary of a buffer's content for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferSnapshot {
    pub count: usize,
    pub mean_activation: f64,
    pub oldest_timestamp: Option<u64>,
}

/// Buffer state: policies plus live content
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    config: BufferConfig,
    content: ElementList,
}

impl Buffer {
    pub fn new(config: BufferConfig) -> Self {
        Self {
            config,
            content: ElementList::new(),
        }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Live content, youngest first
    pub fn content(&self) -> &ElementList {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        let count = self.content.len();
        let mean_activation = if count == 0 {
            0.0
        } else {
            self.content.iter().map(|e| e.activation).sum::<f64>() / count as f64
        };
        BufferSnapshot {
            count,
            mean_activation,
            oldest_timestamp: self.content.iter().map(|e| e.timestamp).min(),
        }
    }

    /// Place an initial element, honouring capacity like an Add does.
    /// Returns `false` when a full `Ignore` buffer drops the element.
    pub(crate) fn seed<R: Rng + ?Sized>(&mut self, element: Element, rng: &mut R) -> bool {
        if self.make_room(rng) == Room::Full {
            return false;
        }
        self.content
            .prepend(element.term, element.timestamp, element.activation);
        true
    }

    /// Evict one element per the excess policy if the buffer is at its limit
    fn make_room<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Room {
        let Capacity::Limited(limit) = self.config.capacity else {
            return Room::Free;
        };
        if self.content.len() < limit {
            return Room::Free;
        }
        let evicted = match self.config.excess {
            ExcessPolicy::Ignore => return Room::Full,
            ExcessPolicy::Random => {
                if self.content.is_empty() {
                    None
                } else {
                    let r = rng.random_range(0..self.content.len());
                    self.content.delete_at(r)
                }
            }
            ExcessPolicy::Oldest => self.content.pop_last(),
            ExcessPolicy::Youngest => self.content.pop_first(),
        };
        if evicted.is_some() {
            Room::Evicted
        } else {
            Room::Free
        }
    }

    pub(crate) fn clear(&mut self) {
        self.content.clear();
    }

    /// Copy of the content in access order. Reads never touch live content.
    pub fn read_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> ElementList {
        let mut copy = self.content.clone();
        match self.config.access {
            AccessOrder::Lifo => {}
            AccessOrder::Fifo => copy.reverse(),
            AccessOrder::Random => copy.permute(rng),
        }
        copy
    }

    // ========================================================================
    // MESSAGE PHASES
    // ========================================================================
    //
    // `inbox` holds this cycle's messages addressed to the buffer, newest
    // first.

    /// Clear phase. Returns true if the content was discarded.
    pub(crate) fn apply_clear(&mut self, inbox: &[&Message]) -> bool {
        if inbox.iter().any(|m| m.kind == MessageKind::Clear) {
            self.content.clear();
            true
        } else {
            false
        }
    }

    /// Delete phase: each Delete removes at most the first matching element.
    pub(crate) fn apply_delete(&mut self, inbox: &[&Message]) -> usize {
        let mut removed = 0;
        for message in inbox.iter().filter(|m| m.kind == MessageKind::Delete) {
            let Some(payload) = &message.payload else {
                continue;
            };
            let hit = self
                .content
                .iter()
                .position(|element| matches(&element.term, payload));
            if let Some(n) = hit {
                self.content.delete_at(n);
                removed += 1;
            }
        }
        removed
    }

    /// Add phase: one eviction (if full) then one prepend per Add.
    pub(crate) fn apply_add<R: Rng + ?Sized>(
        &mut self,
        inbox: &[&Message],
        cycle: u64,
        rng: &mut R,
    ) -> AddOutcome {
        let mut outcome = AddOutcome::default();

        for message in inbox.iter().filter(|m| m.kind == MessageKind::Add) {
            let Some(payload) = &message.payload else {
                tracing::warn!(
                    source = message.source,
                    target = message.target,
                    "Add message without payload ignored"
                );
                continue;
            };

            match self.make_room(rng) {
                Room::Full => {
                    outcome.dropped += 1;
                    continue;
                }
                Room::Evicted => outcome.evicted += 1,
                Room::Free => {}
            }

            self.content.prepend(payload.clone(), cycle, ADD_ACTIVATION);
            outcome.added += 1;
        }

        outcome
    }

    /// Activate phase: net Excite minus Inhibit matches per element.
    ///
    /// Positive nets set `excite_level`, negative nets set `inhibit_level`;
    /// both refresh the timestamp. A zero net leaves the element alone.
    pub(crate) fn apply_activation(
        &mut self,
        inbox: &[&Message],
        cycle: u64,
        excite_level: f64,
        inhibit_level: f64,
    ) -> usize {
        let signals: Vec<(i64, &crate::term::Term)> = inbox
            .iter()
            .filter_map(|m| {
                let sign = match m.kind {
                    MessageKind::Excite => 1,
                    MessageKind::Inhibit => -1,
                    _ => return None,
                };
                m.payload.as_ref().map(|p| (sign, p))
            })
            .collect();
        if signals.is_empty() {
            return 0;
        }

        let mut changed = 0;
        for element in self.content.iter_mut() {
            let net: i64 = signals
                .iter()
                .filter(|(_, payload)| matches(payload, &element.term))
                .map(|(sign, _)| sign)
                .sum();

            if net > 0 {
                element.activation = excite_level;
                element.timestamp = cycle;
                changed += 1;
            } else if net < 0 {
                element.activation = inhibit_level;
                element.timestamp = cycle;
                changed += 1;
            }
        }
        changed
    }

    /// Decay phase. Survivors keep their relative order. Returns the number
    /// of elements that decayed.
    pub(crate) fn apply_decay<R: Rng + ?Sized>(&mut self, cycle: u64, rng: &mut R) -> usize {
        let decay = self.config.decay;
        if decay.is_none() || self.content.is_empty() {
            return 0;
        }

        let before = self.content.len();
        let mut after = ElementList::new();
        for element in std::mem::take(&mut self.content) {
            if decay.survives(cycle, element.timestamp, rng) {
                after.append_tail(element.term, element.timestamp, element.activation);
            }
        }
        self.content = after;
        before - self.content.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
