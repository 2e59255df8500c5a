/// Lifecycle of a heatmap session.
///
/// Mount starts surface construction; readiness arrives asynchronously;
/// refreshes then flow until unmount:
/// Uninitialized → Initializing → Ready → TornDown
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Ready,
    TornDown,
}

impl SessionPhase {
    /// Whether the session still owns live resources.
    pub fn is_mounted(&self) -> bool {
        matches!(self, SessionPhase::Initializing | SessionPhase::Ready)
    }
}
