use crate::classifiers::drift_detection::ChangeDetector;
use std::collections::HashSet;

/// Detector that confirms a change on predetermined input positions
/// (1-based), independent of the error signal it is fed.
pub struct ScriptedDetector {
    fire_at: HashSet<u64>,
    inputs_seen: u64,
    changed: bool,
}

impl ScriptedDetector {
    pub fn at(positions: &[u64]) -> Self {
        Self {
            fire_at: positions.iter().copied().collect(),
            inputs_seen: 0,
            changed: false,
        }
    }

    pub fn never() -> Self {
        Self::at(&[])
    }
}

impl ChangeDetector for ScriptedDetector {
    fn input(&mut self, _error: f64) {
        self.inputs_seen += 1;
        self.changed = self.fire_at.contains(&self.inputs_seen);
    }

    fn change_detected(&self) -> bool {
        self.changed
    }
}
