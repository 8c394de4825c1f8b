//! CDCMS-style drift-adaptive ensemble.
//!
//! The meta-classifier keeps three pools of scored models — the actively
//! trained pool, a frozen snapshot taken when drift is confirmed, and a pool
//! recovered from past concepts — backed by a bounded repository of retired
//! models. A clustering backend groups repository models by their correctness
//! patterns over a sliding window; the Q-statistic decides which retired
//! model a newcomer may evict. Predictions combine the pools' votes weighted
//! by fading prequential accuracy.

mod config;
mod controller;
mod diversity;
mod error;
mod pool;
mod repository;
mod scored_model;

pub use config::CdcmsConfig;
pub use controller::Cdcms;
pub use controller::DriftState;
pub use diversity::mean_pairwise_q;
pub use diversity::q_statistic;
pub use error::CdcmsError;
pub use pool::Pool;
pub use repository::Repository;
pub use scored_model::ScoredModel;
