//! Synthetic call-graph workload for function-call overhead.
//!
//! One invocation makes `roots` calls into level 0. Every level below the leaf
//! calls the next level `fan_out` times, and the leaf does nothing. Each level
//! takes one argument fewer than its caller, so the default shape (depth 4,
//! fan-out 20, 40 roots) calls functions of arity 4, 3, 2, 1 and 0 and makes
//! 40 × 20⁴ = 6,400,000 leaf calls per sample.

use crate::error::{Error, Result};
use crate::measurement::black_box;

use super::probe::Probe;
use super::Benchmark;

/// Deepest call graph accepted.
pub const MAX_DEPTH: usize = 8;

/// Default number of non-leaf levels.
pub const DEFAULT_DEPTH: usize = 4;

/// Default calls from each level into the next.
pub const DEFAULT_FAN_OUT: usize = 20;

/// Default calls into level 0 per invocation.
pub const DEFAULT_ROOTS: usize = 40;

/// A fixed-shape tree of nested calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraph {
    depth: usize,
    fan_out: usize,
    roots: usize,
    args: Vec<u64>,
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::build(DEFAULT_DEPTH, DEFAULT_FAN_OUT, DEFAULT_ROOTS)
    }
}

impl CallGraph {
    /// Create a call graph, rejecting shapes that are empty or whose call
    /// count does not fit in a `u64`.
    pub fn new(depth: usize, fan_out: usize, roots: usize) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(Error::Config(format!("depth must be <= {MAX_DEPTH}, got {depth}")));
        }
        if fan_out == 0 {
            return Err(Error::Config("fan-out must be > 0".into()));
        }
        if roots == 0 {
            return Err(Error::Config("roots must be > 0".into()));
        }
        let graph = Self::build(depth, fan_out, roots);
        if graph.checked_total_calls().is_none() {
            return Err(Error::Config(format!(
                "{roots} roots with fan-out {fan_out} at depth {depth} overflows the call count"
            )));
        }
        Ok(graph)
    }

    fn build(depth: usize, fan_out: usize, roots: usize) -> Self {
        Self {
            depth,
            fan_out,
            roots,
            args: (1..=depth as u64).collect(),
        }
    }

    /// Number of non-leaf levels.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Calls from each level into the next.
    pub fn fan_out(&self) -> usize {
        self.fan_out
    }

    /// Calls into level 0 per invocation.
    pub fn roots(&self) -> usize {
        self.roots
    }

    /// Leaf calls made by one invocation.
    pub fn leaf_calls(&self) -> u64 {
        self.checked_leaf_calls().unwrap_or(u64::MAX)
    }

    /// Calls at every level made by one invocation.
    pub fn total_calls(&self) -> u64 {
        self.checked_total_calls().unwrap_or(u64::MAX)
    }

    fn checked_leaf_calls(&self) -> Option<u64> {
        (self.fan_out as u64)
            .checked_pow(self.depth as u32)?
            .checked_mul(self.roots as u64)
    }

    fn checked_total_calls(&self) -> Option<u64> {
        let mut level_calls = self.roots as u64;
        let mut total = level_calls;
        for _ in 0..self.depth {
            level_calls = level_calls.checked_mul(self.fan_out as u64)?;
            total = total.checked_add(level_calls)?;
        }
        Some(total)
    }

    /// Run the whole tree once, returning the number of leaf calls made.
    pub fn invoke<P: Probe>(&self, probe: &P) -> u64 {
        let mut leaves = 0;
        for _ in 0..self.roots {
            leaves += level(probe, 0, self.depth, self.fan_out, black_box(&self.args));
        }
        leaves
    }
}

#[inline(never)]
fn level<P: Probe>(probe: &P, depth: usize, remaining: usize, fan_out: usize, args: &[u64]) -> u64 {
    let _frame = probe.call(depth);
    if remaining == 0 {
        black_box(args);
        return 1;
    }

    let next = &args[..args.len().saturating_sub(1)];
    let mut leaves = 0;
    for _ in 0..fan_out {
        leaves += level(probe, depth + 1, remaining - 1, fan_out, black_box(next));
    }
    leaves
}

impl Benchmark for CallGraph {
    fn name(&self) -> &str {
        "call_simple"
    }

    fn sample<P: Probe>(&self, probe: &P) -> Result<()> {
        black_box(self.invoke(probe));
        Ok(())
    }
}
