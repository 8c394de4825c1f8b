use thiserror::Error;

/// Construction-time failures of the ensemble.
///
/// Everything here is fatal before the first instance is processed; once a
/// stream is running the ensemble never surfaces an error to the host.
#[derive(Debug, Error)]
pub enum CdcmsError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
