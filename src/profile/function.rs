//! Function identity and the four-figure cost tuple attached to functions
//! and call edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A profiled function, identified by where it is defined
///
/// Field order matters: the derived `Ord` sorts by file, then line, then name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Function {
    /// Source file path as recorded by the profiler
    pub file: String,

    /// Line number of the definition
    pub line: u32,

    /// Symbol name
    pub name: String,
}

impl Function {
    pub fn new(file: impl Into<String>, line: u32, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            name: name.into(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({})", self.file, self.line, self.name)
    }
}

/// Call counts and times for a function or a single caller/callee edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Calls not caused by recursion
    pub primitive_calls: u64,

    /// All calls, recursive ones included
    pub total_calls: u64,

    /// Seconds spent in the function body itself
    pub exclusive_time: f64,

    /// Seconds spent in the function and everything it calls
    pub inclusive_time: f64,
}

impl Totals {
    pub fn new(primitive_calls: u64, total_calls: u64, exclusive_time: f64, inclusive_time: f64) -> Self {
        Self {
            primitive_calls,
            total_calls,
            exclusive_time,
            inclusive_time,
        }
    }

    /// Exclusive time per primitive call
    ///
    /// A zero call count is treated as one, yielding the raw time.
    pub fn exclusive_per_call(&self) -> f64 {
        self.exclusive_time / self.call_divisor()
    }

    /// Inclusive time per primitive call (zero calls treated as one)
    pub fn inclusive_per_call(&self) -> f64 {
        self.inclusive_time / self.call_divisor()
    }

    /// Check the recorded figures are internally consistent
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Option<String> {
        if self.inclusive_time < self.exclusive_time {
            return Some(format!(
                "inclusive time {} is below exclusive time {}",
                self.inclusive_time, self.exclusive_time
            ));
        }
        if self.total_calls < self.primitive_calls {
            return Some(format!(
                "total calls {} is below primitive calls {}",
                self.total_calls, self.primitive_calls
            ));
        }
        None
    }

    fn call_divisor(&self) -> f64 {
        self.primitive_calls.max(1) as f64
    }
}
