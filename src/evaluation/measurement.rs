use serde::Serialize;

/// Summarized scalar metric reported by a learner or evaluator.
///
/// Typical examples: `"active pool size"`, `"drifts confirmed"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    /// Convenience constructor
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
