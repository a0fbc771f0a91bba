//! Fallback Answers
//!
//! Canned advice served when the model gateway fails. Every entry is valid by
//! construction, so selection needs no further checks.

use std::sync::Arc;

use rand::Rng;

use crate::model::{Advice, Verdict};

/// One pre-authored answer
#[derive(Clone, Copy, Debug)]
pub struct FallbackEntry {
    pub verdict: Verdict,
    pub reason: &'static str,
}

/// Spending vs saving, investment timing, debt vs emergency fund, buy vs rent
pub const FALLBACK_TABLE: &[FallbackEntry] = &[
    FallbackEntry {
        verdict: Verdict::Dont,
        reason: "Prioritize savings over discretionary purchases. Experiences and security outlast gadgets that depreciate quickly.",
    },
    FallbackEntry {
        verdict: Verdict::Do,
        reason: "Investing consistently beats timing the market. Start small and keep contributing regardless of headlines.",
    },
    FallbackEntry {
        verdict: Verdict::Dont,
        reason: "Build at least 3-6 months of emergency savings before any non-essential purchase. Financial security comes first.",
    },
    FallbackEntry {
        verdict: Verdict::Do,
        reason: "Pay down high-interest debt once a starter emergency fund is in place. The guaranteed return beats most investments.",
    },
    FallbackEntry {
        verdict: Verdict::Dont,
        reason: "Keep renting until you can cover the down payment, closing costs, and repairs without touching your savings.",
    },
    FallbackEntry {
        verdict: Verdict::Do,
        reason: "Consider this purchase if you can pay cash without affecting debt payments, retirement savings, or your emergency fund.",
    },
];

/// Source of table indices
pub trait Chooser: Send + Sync {
    /// Pick an index in `0..len`; `len` is never zero
    fn choose(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngChooser;

impl Chooser for ThreadRngChooser {
    fn choose(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always the same index, for reproducible answers
#[derive(Clone, Copy, Debug)]
pub struct FixedChooser(pub usize);

impl Chooser for FixedChooser {
    fn choose(&self, _len: usize) -> usize {
        self.0
    }
}

/// Picks a canned answer without consulting any model
#[derive(Clone)]
pub struct FallbackSelector {
    table: &'static [FallbackEntry],
    chooser: Arc<dyn Chooser>,
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FallbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSelector")
            .field("entries", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl FallbackSelector {
    pub fn new() -> Self {
        Self::with_chooser(Arc::new(ThreadRngChooser))
    }

    pub fn with_chooser(chooser: Arc<dyn Chooser>) -> Self {
        Self {
            table: FALLBACK_TABLE,
            chooser,
        }
    }

    pub fn entries(&self) -> &'static [FallbackEntry] {
        self.table
    }

    pub fn select(&self) -> Advice {
        // out-of-range picks wrap around
        let index = self.chooser.choose(self.table.len()) % self.table.len();
        let entry = self.table[index];
        tracing::debug!(index, verdict = %entry.verdict, "Selected fallback advice");
        Advice::new(entry.verdict, entry.reason)
    }
}
