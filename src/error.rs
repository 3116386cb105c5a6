// Error handling for urit

use std::fmt;

/// Errors raised while building the variable set
///
/// Expansion itself never fails with an error: problems found while scanning a
/// template are reported as diagnostics on the expansion result instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UritError {
    InvalidVariableName(String),
    MalformedList(String),
    MalformedMap(String),
}

impl fmt::Display for UritError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UritError::InvalidVariableName(name) => write!(f, "Invalid variable name: {}", name),
            UritError::MalformedList(name) => write!(
                f,
                "Malformed list for variable '{}'. Format: (\"val1\",\"val2\",\"val3\")",
                name
            ),
            UritError::MalformedMap(name) => write!(
                f,
                "Malformed map for variable '{}'. Format: [(\"key1\",\"val1\"),(\"key2\",\"val2\")]",
                name
            ),
        }
    }
}

impl std::error::Error for UritError {}
