//! Buffer decay
//!
//! Each cycle every element of a decaying buffer faces a survival test that
//! depends on its age `dt = cycle - timestamp` and the decay constant `k`:
//!
//! | Decay       | Survives when                                   |
//! |-------------|-------------------------------------------------|
//! | None        | always                                          |
//! | Fixed       | `dt < k - 1`                                    |
//! | Linear      | `dt < k` and `p > 1 / (k - dt)`                 |
//! | Quadratic   | `dt < k` and `p > (1 / (k - dt))^2`             |
//! | Exponential | `p < exp(-ln 2 / k)`                            |
//! | Weibull     | `dt <= 0`, or `p < exp(1/k)^(-ln(dt + 1))`      |
//!
//! `p` is a fresh uniform sample in `[0, 1)`. Linear and Quadratic compare
//! the sample against a death threshold (`p > threshold`) while Exponential
//! and Weibull compare it against a survival probability (`p < threshold`).
//! The two directions are kept as they are.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Decay function and its constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "constant", rename_all = "lowercase")]
pub enum Decay {
    /// Elements never decay
    #[default]
    None,
    /// Elements live for exactly `k - 1` cycles
    Fixed(u32),
    Linear(u32),
    Quadratic(u32),
    /// Constant per-cycle survival, half-life `k`
    Exponential(u32),
    Weibull(u32),
}

impl Decay {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Decay::None => "none",
            Decay::Fixed(_) => "fixed",
            Decay::Linear(_) => "linear",
            Decay::Quadratic(_) => "quadratic",
            Decay::Exponential(_) => "exponential",
            Decay::Weibull(_) => "weibull",
        }
    }

    /// The decay constant, if this function has one
    pub fn constant(&self) -> Option<u32> {
        match self {
            Decay::None => None,
            Decay::Fixed(k)
            | Decay::Linear(k)
            | Decay::Quadratic(k)
            | Decay::Exponential(k)
            | Decay::Weibull(k) => Some(*k),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Decay::None)
    }

    /// Decide whether an element stamped `timestamp` survives at `cycle`.
    ///
    /// Draws at most one sample from `rng`, and only for the probabilistic
    /// branches.
    pub fn survives<R: Rng + ?Sized>(&self, cycle: u64, timestamp: u64, rng: &mut R) -> bool {
        // Signed: timestamps can run ahead of the cycle after a trial reset
        let dt = cycle as f64 - timestamp as f64;

        match *self {
            Decay::None => true,
            Decay::Fixed(k) => dt < (k as f64 - 1.0),
            Decay::Linear(k) => {
                let k = k as f64;
                if dt < k {
                    let threshold = 1.0 / (k - dt);
                    rng.random::<f64>() > threshold
                } else {
                    false
                }
            }
            Decay::Quadratic(k) => {
                let k = k as f64;
                if dt < k {
                    let threshold = (1.0 / (k - dt)).powi(2);
                    rng.random::<f64>() > threshold
                } else {
                    false
                }
            }
            Decay::Exponential(k) => {
                let threshold = 1.0 / (std::f64::consts::LN_2 / k as f64).exp();
                rng.random::<f64>() < threshold
            }
            Decay::Weibull(k) => {
                if dt > 0.0 {
                    let threshold = 1.0 / (1.0 / k as f64).exp().powf((dt + 1.0).ln());
                    rng.random::<f64>() < threshold
                } else {
                    true
                }
            }
        }
    }
}

impl std::fmt::Display for Decay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.constant() {
            Some(k) => write!(f, "{}({})", self.as_str(), k),
            None => f.write_str(self.as_str()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
