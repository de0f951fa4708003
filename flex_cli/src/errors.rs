use std::fmt;
use std::process::ExitCode;

/// Failures of a CLI command. Details are reported through `ui` where they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// An input file could not be read
    FileError,
    /// Input could not be parsed or was rejected
    InputError,
    /// The listing page has no filter catalog
    UnknownPage,
    /// The subscription draft could not be turned into a request
    SubscriptionError,
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::FileError => ExitCode::from(2),
            CliError::InputError | CliError::UnknownPage => ExitCode::from(3),
            CliError::SubscriptionError => ExitCode::from(4),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError => write!(f, "Failed to read input file"),
            CliError::InputError => write!(f, "Invalid input"),
            CliError::UnknownPage => write!(f, "Unknown listing page"),
            CliError::SubscriptionError => write!(f, "Invalid subscription draft"),
        }
    }
}

impl std::error::Error for CliError {}
