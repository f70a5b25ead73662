use std::fmt;

use super::{Collection, Command, Property};

/// Errors a host handle can report.
/// None of these are fatal to the router; each becomes a status line.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleError {
    /// The host does not expose this property.
    MissingProperty(Property),
    /// The host does not expose this collection.
    MissingCollection(Collection),
    /// The host rejected or does not implement this command.
    UnsupportedCommand(Command),
    /// A value had the wrong shape for the property.
    TypeMismatch {
        property: Property,
        expected: &'static str,
    },
    /// A track reference pointed past the end of the collection.
    OutOfRange { index: usize, len: usize },
    /// Anything else the host threw.
    Host(String),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleError::MissingProperty(p) => write!(f, "no such property: {p}"),
            HandleError::MissingCollection(c) => write!(f, "no such collection: {c}"),
            HandleError::UnsupportedCommand(c) => write!(f, "unsupported command: {c}"),
            HandleError::TypeMismatch { property, expected } => {
                write!(f, "{property} expects {expected}")
            }
            HandleError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} items")
            }
            HandleError::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for HandleError {}
