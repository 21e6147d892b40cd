use async_trait::async_trait;

use super::ApiError;
use crate::domain::{ResourceIdentifier, TopicHandle};

/// Port for reading notification topics
#[async_trait]
pub trait TopicSource: Send + Sync {
    async fn get_topic(&self, topic_id: &ResourceIdentifier) -> Result<TopicHandle, ApiError>;

    async fn list_topics(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<TopicHandle>, ApiError>;
}
