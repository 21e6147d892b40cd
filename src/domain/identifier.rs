use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Kind of OCI resource an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Compartment,
    Instance,
    Topic,
    Alarm,
}

impl ResourceKind {
    /// Literal prefix every OCID of this kind starts with
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Compartment => "ocid1.compartment.",
            Self::Instance => "ocid1.instance.",
            Self::Topic => "ocid1.onstopic.",
            Self::Alarm => "ocid1.alarm.",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compartment => "compartment",
            Self::Instance => "VM instance",
            Self::Topic => "notification topic",
            Self::Alarm => "alarm",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidIdentifierError {
    #[error("{kind} OCID is empty (expected an OCID starting with '{expected}')")]
    Empty {
        kind: ResourceKind,
        expected: &'static str,
    },

    #[error("invalid {kind} OCID format: must start with '{expected}'")]
    WrongPrefix {
        kind: ResourceKind,
        expected: &'static str,
    },

    #[error("invalid {kind} OCID format: nothing follows '{expected}'")]
    Truncated {
        kind: ResourceKind,
        expected: &'static str,
    },
}

/// An OCID whose shape has been checked against its kind.
///
/// Existence is not checked here; that needs the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    kind: ResourceKind,
    value: String,
}

impl ResourceIdentifier {
    pub fn validate(raw: impl Into<String>, kind: ResourceKind) -> Result<Self, InvalidIdentifierError> {
        let value = raw.into();
        let expected = kind.prefix();

        if value.is_empty() {
            return Err(InvalidIdentifierError::Empty { kind, expected });
        }
        if !value.starts_with(expected) {
            return Err(InvalidIdentifierError::WrongPrefix { kind, expected });
        }
        if value.len() == expected.len() {
            return Err(InvalidIdentifierError::Truncated { kind, expected });
        }

        Ok(Self { kind, value })
    }

    #[cfg(test)]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for ResourceIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}
