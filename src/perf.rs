//! Performance monitoring utilities.
//!
//! Two layers, both kept out of the interaction logic itself:
//!
//! - **Gesture spans**: the canvas reports `span_start`/`span_end` around
//!   hover, drag-start, drag-end and zoom/pan to an optional [`GestureHook`].
//!   A span opens when the event is handled and closes when the next frame is
//!   derived, so it measures input-to-frame latency.
//!   [`GestureProfiler`] aggregates those spans into rolling statistics.
//! - **Scoped timers**: `profile_scope!` on hot paths, compiled in only with
//!   the `profiling` feature.
//!
//! ```ignore
//! use cardcanvas::perf::profile_scope;
//!
//! fn dispatch() {
//!     profile_scope!("dispatch");
//!     // ... work ...
//! }
//! ```

use crate::constants::{STATS_SAMPLE_COUNT, TARGET_FRAME_MS};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Gesture Spans
// ============================================================================

/// Interaction lifecycles measured from input to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureSpan {
    Hover,
    DragStart,
    DragEnd,
    ZoomPan,
}

impl GestureSpan {
    pub const ALL: [GestureSpan; 4] = [
        GestureSpan::Hover,
        GestureSpan::DragStart,
        GestureSpan::DragEnd,
        GestureSpan::ZoomPan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::DragStart => "drag_start",
            Self::DragEnd => "drag_end",
            Self::ZoomPan => "zoom_pan",
        }
    }
}

impl fmt::Display for GestureSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional observer of gesture lifecycles.
pub trait GestureHook {
    fn span_start(&self, span: GestureSpan);
    fn span_end(&self, span: GestureSpan);
}

/// Statistics for one span kind.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    /// Minimum observed time
    min_ms: f64,
    /// Maximum observed time
    max_ms: f64,
    /// Running sum over `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over recent samples.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    pub fn min_ms(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }
}

#[derive(Default)]
struct ProfilerState {
    open: HashMap<GestureSpan, Instant>,
    stats: HashMap<GestureSpan, OperationStats>,
}

static GLOBAL_PROFILER: Lazy<Arc<GestureProfiler>> = Lazy::new(|| Arc::new(GestureProfiler::new()));

/// Aggregates gesture spans. Warns when a span exceeds `threshold_ms`.
pub struct GestureProfiler {
    state: Mutex<ProfilerState>,
    threshold_ms: f64,
}

impl Default for GestureProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureProfiler {
    pub fn new() -> Self {
        Self::with_threshold(TARGET_FRAME_MS)
    }

    pub fn with_threshold(threshold_ms: f64) -> Self {
        Self {
            state: Mutex::new(ProfilerState::default()),
            threshold_ms,
        }
    }

    /// Process-wide profiler.
    pub fn global() -> Arc<GestureProfiler> {
        Arc::clone(&GLOBAL_PROFILER)
    }

    /// Record a completed span directly.
    pub fn record(&self, span: GestureSpan, elapsed_ms: f64) {
        self.state.lock().stats.entry(span).or_default().record(elapsed_ms);
        if elapsed_ms > self.threshold_ms {
            warn!(
                span = span.name(),
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow gesture"
            );
        }
    }

    pub fn stats(&self, span: GestureSpan) -> Option<OperationStats> {
        self.state.lock().stats.get(&span).cloned()
    }

    pub fn is_open(&self, span: GestureSpan) -> bool {
        self.state.lock().open.contains_key(&span)
    }

    pub fn log_summary(&self) {
        let state = self.state.lock();
        for span in GestureSpan::ALL {
            if let Some(stats) = state.stats.get(&span) {
                debug!(
                    "  {}: avg={:.3}ms, p95={:.3}ms, max={:.3}ms, count={}",
                    span,
                    stats.average(),
                    stats.p95(),
                    stats.max_ms,
                    stats.count
                );
            }
        }
    }

    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.open.clear();
        state.stats.clear();
    }
}

impl GestureHook for GestureProfiler {
    /// Re-opening a span restarts it, so repeated zoom events measure the
    /// latest event to the next frame.
    fn span_start(&self, span: GestureSpan) {
        self.state.lock().open.insert(span, Instant::now());
    }

    fn span_end(&self, span: GestureSpan) {
        let started = self.state.lock().open.remove(&span);
        if let Some(started) = started {
            self.record(span, started.elapsed().as_secs_f64() * 1000.0);
        }
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

// Thread-local depth tracking for hierarchical profiling
#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Create a timer for profiling (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}
