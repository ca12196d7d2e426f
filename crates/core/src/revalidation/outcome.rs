/// Result of a best-effort side-channel operation.
///
/// A separate type from [`crate::errors::Result`]: these operations never
/// fail their caller, so call sites decide to log or ignore instead of
/// propagating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "best-effort outcomes should be logged or explicitly ignored"]
pub enum BestEffortOutcome {
    /// The side effect ran.
    Completed,
    /// The side effect did not apply (e.g. optional schema absent). Counts
    /// as success.
    Skipped,
    /// The side effect failed and the details were logged. The primary
    /// mutation is unaffected.
    Failed,
}

impl BestEffortOutcome {
    /// Boolean view of the outcome; only `Failed` is false.
    pub fn succeeded(self) -> bool {
        !matches!(self, BestEffortOutcome::Failed)
    }
}
