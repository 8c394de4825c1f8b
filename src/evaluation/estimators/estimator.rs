/// Online scalar estimator (e.g., streaming or fading mean).
///
/// Implementations accept values incrementally via [`add`](Estimator::add)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current estimate.
    fn estimation(&self) -> f64;
}
