/// Concept-drift detector fed with a per-instance error signal.
///
/// The host supplies a concrete detector (ADWIN, DDM, ...) at construction
/// time; the ensemble only feeds it one error bit per instance and asks
/// whether that step confirmed a change. Detectors are assumed total: they
/// always accept input and always answer.
pub trait ChangeDetector: Send {
    /// Observes the error indicator of the current instance
    /// (1.0 = misclassified, 0.0 = correct).
    fn input(&mut self, error: f64);

    /// Whether a change was confirmed by the most recent [`input`](ChangeDetector::input).
    fn change_detected(&self) -> bool;
}
