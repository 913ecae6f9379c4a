use thiserror::Error;

/// Fatal acquisition-session failures. A `ReadOutcome::NoData` read is not
/// an error and never reaches this taxonomy.
#[derive(Debug, Error, Clone)]
pub enum AcquireError {
    #[error("acquisition source error: {0}")]
    Source(String),
    #[error("acquisition source fault: {0}")]
    SourceFault(String),
    #[error("invalid state: {0}")]
    State(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;

/// Map a boxed source error to the typed taxonomy, downcasting known driver
/// errors when the `hardware-errors` feature is enabled.
pub fn map_source_error_dyn(e: &(dyn std::error::Error + 'static)) -> AcquireError {
    #[cfg(feature = "hardware-errors")]
    {
        use thermolog_hardware::error::HwError;
        if let Some(hw) = e.downcast_ref::<HwError>() {
            return match hw {
                HwError::Stopped | HwError::AlreadyStarted | HwError::TornDown => {
                    AcquireError::State(hw.to_string())
                }
                other => AcquireError::SourceFault(other.to_string()),
            };
        }
    }
    AcquireError::Source(e.to_string())
}
