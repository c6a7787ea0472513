use std::fmt;

/// Result type for planb-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Selection index outside `0..plan_count`
    IndexOutOfRange { index: usize, plan_count: usize },

    /// Billing period other than "monthly" or "yearly"
    InvalidBillingPeriod(String),

    /// Key name that does not map to a navigation key
    UnknownKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, plan_count } => write!(
                f,
                "Index out of range: {} (plan count: {})",
                index, plan_count
            ),
            Error::InvalidBillingPeriod(value) => {
                write!(f, "Invalid billing period: {}", value)
            }
            Error::UnknownKey(key) => write!(f, "Unknown navigation key: {}", key),
        }
    }
}

impl std::error::Error for Error {}
