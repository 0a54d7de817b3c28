//! Timestamped element lists
//!
//! Buffer content is an ordered sequence of (term, timestamp, activation)
//! elements. Native order is youngest first: [`ElementList::prepend`] puts
//! the new element at the head.

use std::collections::VecDeque;

use rand::Rng;

use crate::term::Term;

// ============================================================================
// ELEMENT
// ============================================================================

/// One entry of a buffer's content
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub term: Term,
    /// Cycle on which the element was created or last refreshed
    pub timestamp: u64,
    pub activation: f64,
}

impl Element {
    pub fn new(term: Term, timestamp: u64, activation: f64) -> Self {
        Self {
            term,
            timestamp,
            activation,
        }
    }
}

// ============================================================================
// ELEMENT LIST
// ============================================================================

/// Ordered element sequence, youngest first.
///
/// `Clone` is the deep copy: every term is copied, timestamps and
/// activations are kept, order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementList {
    items: VecDeque<Element>,
}

impl ElementList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> + ExactSizeIterator {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.items.iter_mut()
    }

    /// Element at zero-based position `n`
    pub fn get(&self, n: usize) -> Option<&Element> {
        self.items.get(n)
    }

    /// Head of the list (the youngest element)
    pub fn first(&self) -> Option<&Element> {
        self.items.front()
    }

    /// Tail of the list (the oldest element)
    pub fn last(&self) -> Option<&Element> {
        self.items.back()
    }

    /// Add a new head element
    pub fn prepend(&mut self, term: Term, timestamp: u64, activation: f64) {
        self.items.push_front(Element::new(term, timestamp, activation));
    }

    /// Add a new tail element
    pub fn append_tail(&mut self, term: Term, timestamp: u64, activation: f64) {
        self.items.push_back(Element::new(term, timestamp, activation));
    }

    /// Remove the element at zero-based position `n`.
    ///
    /// Out-of-range positions leave the list unchanged and return `None`.
    pub fn delete_at(&mut self, n: usize) -> Option<Element> {
        self.items.remove(n)
    }

    /// Remove the head element
    pub fn pop_first(&mut self) -> Option<Element> {
        self.items.pop_front()
    }

    /// Remove the tail element
    pub fn pop_last(&mut self) -> Option<Element> {
        self.items.pop_back()
    }

    /// Reverse the list in place
    pub fn reverse(&mut self) {
        self.items.make_contiguous().reverse();
    }

    /// Shuffle in place: for each position `i`, swap with a uniformly drawn
    /// position in `[i, len)`.
    pub fn permute<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.items.len();
        for i in 0..len {
            let r = rng.random_range(i..len);
            self.items.swap(i, r);
        }
    }

    /// Drop every element
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<Element> for ElementList {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ElementList {
    type Item = Element;
    type IntoIter = std::collections::vec_deque::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a Element;
    type IntoIter = std::collections::vec_deque::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
