use std::fmt;

use super::ResourceIdentifier;

/// Notification topic lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicState {
    Active,
    Creating,
    Deleting,
    Other(String),
}

impl TopicState {
    pub fn from_api(state: &str) -> Self {
        match state {
            "ACTIVE" => Self::Active,
            "CREATING" => Self::Creating,
            "DELETING" => Self::Deleting,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for TopicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::Creating => f.write_str("CREATING"),
            Self::Deleting => f.write_str("DELETING"),
            Self::Other(state) => f.write_str(state),
        }
    }
}

/// Notification topic alarms publish to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHandle {
    pub id: ResourceIdentifier,
    pub name: String,
    pub lifecycle_state: TopicState,
    pub description: Option<String>,
}
