//! Configuration for task prioritization.

/// Tunable weights and rates for the priority scheduler.
///
/// The three weights blend the urgency, dependency, and effort sub-scores
/// into the composite priority score. They are policy, not algorithmic
/// necessity, and are not normalized internally.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Weight of the urgency sub-score in the composite.
    pub urgency_weight: f64,
    /// Weight of the dependency sub-score in the composite.
    pub dependency_weight: f64,
    /// Weight of the effort sub-score in the composite.
    pub effort_weight: f64,
    /// Working hours assumed per calendar day when converting effort
    /// estimates to days (urgency tiers, completion estimate).
    pub hours_per_day: f64,
    /// Verbosity level: 0=silent, 1=decisions, 2=debug.
    pub verbosity: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            urgency_weight: 0.5,
            dependency_weight: 0.3,
            effort_weight: 0.2,
            hours_per_day: 8.0,
            verbosity: 0,
        }
    }
}
