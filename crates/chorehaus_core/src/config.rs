//! Engine tuning knobs shared by assignment and renewal services.

/// Default half-width of the workload window, in days.
pub const DEFAULT_WORKLOAD_WINDOW_DAYS: u32 = 7;

/// Configuration for the assignment and renewal engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Workload counts chores with deadlines in
    /// `[today - workload_window_days, today + workload_window_days]`.
    pub workload_window_days: u32,
    /// Run assignment right after a renewal pass.
    pub assign_after_renewal: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workload_window_days: DEFAULT_WORKLOAD_WINDOW_DAYS,
            assign_after_renewal: true,
        }
    }
}
