use thiserror::Error;

/// Rejections raised while turning raw request or CLI values into a profile.
/// The forecast engine itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("--annual-income must be a finite value >= 0")]
    InvalidIncome,
    #[error("--tax-rate must be between 0 and 100")]
    TaxRateOutOfRange,
    #[error("--return-rate must be a finite value > -100")]
    InvalidReturnRate,
    #[error("--time-horizon must be between 1 and {max} years")]
    HorizonOutOfRange { max: u32 },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
