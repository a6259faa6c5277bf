/// Milestone reached once every channel's processes are stopped.
pub const KILL_PROGRESS: f64 = 20.0;
/// Milestone reached once every shim directory is gone.
pub const DELETE_SHIM_DIRS_PROGRESS: f64 = 50.0;
/// Milestone reached once the module phase is finished (or skipped).
pub const DELETE_MODULE_DIRS_PROGRESS: f64 = 100.0;
/// Plugin removal is a single unit of work.
pub const PLUGIN_REMOVAL_PROGRESS: f64 = 100.0;
pub const REINSTALL_PROGRESS: f64 = 100.0;

/// Percentage shown by the presentation layer.
///
/// No clamp is applied: callers keep the value in `[0, 100]` by adding
/// per-item deltas computed with [`Progress::step_toward`] and snapping to a
/// milestone once a phase completes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    value: f64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Rounded value for progress-bar rendering.
    pub fn percent(&self) -> u8 {
        self.value.round().clamp(0.0, 100.0) as u8
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }

    pub fn advance(&mut self, delta: f64) {
        self.value += delta;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Per-item increment that lands exactly on `target` after `items` steps.
    pub fn step_toward(&self, target: f64, items: usize) -> f64 {
        if items == 0 {
            return 0.0;
        }
        (target - self.value) / items as f64
    }
}

