//! Timing for the drag hot path.
//!
//! Pointer moves arrive at display rate and each one recomputes the cell,
//! the ghost frame and the placement check. The controller times every
//! recompute into a [`MoveStats`] window and warns when one misses the
//! frame budget.
//!
//! ## Usage
//!
//! Extra per-scope timing is compiled in with the `profiling` feature:
//! ```toml
//! [dependencies]
//! satchel = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn resolve(&mut self) {
//!     profile_scope!("resolve");  // Times the rest of this block
//! }
//! ```

use std::time::Instant;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Budget for one pointer-move recompute (one 60 FPS frame)
pub const MOVE_BUDGET_MS: f64 = 16.67;

/// Recomputes kept in the rolling window
const MOVE_WINDOW: usize = 120;

/// Scopes under this are not reported by `profile_scope!`
const PROFILE_THRESHOLD_MS: f64 = 1.0;

// ============================================================================
// Profiling Macro (zero-cost when disabled)
// ============================================================================

/// Time the rest of the enclosing block. Compiles to nothing without the
/// `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        #[cfg(feature = "profiling")]
        let _scope = $crate::perf::SlowScope::profiling($label);
        #[cfg(not(feature = "profiling"))]
        let _ = $label;
    };
}

pub use profile_scope;

// ============================================================================
// Move Statistics
// ============================================================================

/// Rolling window of pointer-move recompute times.
#[derive(Debug, Clone)]
pub struct MoveStats {
    window: [f64; MOVE_WINDOW],
    filled: usize,
    next: usize,
    count: u64,
    over_budget: u64,
    last_ms: f64,
    max_ms: f64,
}

impl Default for MoveStats {
    fn default() -> Self {
        Self {
            window: [0.0; MOVE_WINDOW],
            filled: 0,
            next: 0,
            count: 0,
            over_budget: 0,
            last_ms: 0.0,
            max_ms: 0.0,
        }
    }
}

impl MoveStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one recompute time. Returns true if it missed the frame budget.
    pub fn record(&mut self, ms: f64) -> bool {
        self.window[self.next] = ms;
        self.next = (self.next + 1) % MOVE_WINDOW;
        self.filled = (self.filled + 1).min(MOVE_WINDOW);
        self.count += 1;
        self.last_ms = ms;
        self.max_ms = self.max_ms.max(ms);

        let missed = ms > MOVE_BUDGET_MS;
        if missed {
            self.over_budget += 1;
        }
        missed
    }

    /// Recomputes recorded since creation.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Recomputes that missed the frame budget.
    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }

    /// Slowest recompute since creation.
    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    fn recent(&self) -> &[f64] {
        &self.window[..self.filled]
    }

    /// Mean of the window.
    pub fn average(&self) -> f64 {
        let recent = self.recent();
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().sum::<f64>() / recent.len() as f64
    }

    /// 95th percentile of the window.
    pub fn p95(&self) -> f64 {
        let mut sorted = self.recent().to_vec();
        if sorted.is_empty() {
            return 0.0;
        }
        sorted.sort_by(f64::total_cmp);
        let idx = (sorted.len() * 95 / 100).min(sorted.len() - 1);
        sorted[idx]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Slow Scope Guard
// ============================================================================

/// Reports its own lifetime on drop when it ran longer than `limit_ms`.
pub struct SlowScope {
    label: &'static str,
    started: Instant,
    limit_ms: f64,
}

impl SlowScope {
    pub fn new(label: &'static str, limit_ms: f64) -> Self {
        Self {
            label,
            started: Instant::now(),
            limit_ms,
        }
    }

    /// Guard used by `profile_scope!`.
    pub fn profiling(label: &'static str) -> Self {
        Self::new(label, PROFILE_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for SlowScope {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.limit_ms {
            debug!(scope = self.label, elapsed_ms = format!("{elapsed_ms:.2}"), "Slow scope");
        }
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Run `f`, returning its result and how long it took in milliseconds.
#[inline]
pub fn time<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let result = f();
    (result, started.elapsed().as_secs_f64() * 1000.0)
}

/// Log a missed frame budget for the pointer-move recompute.
pub(crate) fn report_slow_move(elapsed_ms: f64, stats: &MoveStats) {
    warn!(
        elapsed_ms = format!("{elapsed_ms:.2}"),
        budget_ms = MOVE_BUDGET_MS,
        misses = stats.over_budget(),
        "Ghost recompute over budget"
    );
}
