//! Message listing results

use serde::{Deserialize, Serialize};

/// Result of a capped message listing query.
///
/// `result_size_estimate` is an approximation when the true match count
/// exceeds the requested cap, and is recorded as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MessageListResult {
    pub result_size_estimate: u32,
}
