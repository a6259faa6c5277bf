use crate::{Outcome, Phase, Workflow};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepairViewModel {
    pub workflow: Option<Workflow>,
    pub phase: Phase,
    pub progress: f64,
    /// Rounded progress for progress-bar rendering.
    pub percent: u8,
    pub outcome: Option<Outcome>,
}
