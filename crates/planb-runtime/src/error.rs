use std::fmt;

/// Result type for planb-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a plan load failed.
///
/// A superseded load is not an error and never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Non-2xx response or transport failure
    Network(String),

    /// Payload was not valid JSON
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Network(msg) => write!(f, "{}", msg),
            LoadError::Parse(msg) => write!(f, "Invalid plan data: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Rejected selection input
    Selection(planb_types::Error),

    /// Plan load failure
    Load(LoadError),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Selection(err) => write!(f, "Selection error: {}", err),
            Error::Load(err) => write!(f, "Load error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Selection(err) => Some(err),
            Error::Load(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<planb_types::Error> for Error {
    fn from(err: planb_types::Error) -> Self {
        Error::Selection(err)
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
