use std::sync::Arc;

use tracing::info;

use super::ProvisionError;
use crate::domain::{ResourceIdentifier, TopicHandle};
use crate::ports::TopicSource;

/// Fails closed unless the topic exists and is ACTIVE
pub struct TopicValidator {
    topics: Arc<dyn TopicSource>,
}

impl TopicValidator {
    pub fn new(topics: Arc<dyn TopicSource>) -> Self {
        Self { topics }
    }

    pub async fn validate_topic(&self, topic_id: &ResourceIdentifier) -> Result<TopicHandle, ProvisionError> {
        let topic = self
            .topics
            .get_topic(topic_id)
            .await
            .map_err(|source| ProvisionError::TopicNotFound {
                id: topic_id.clone(),
                source,
            })?;

        if !topic.lifecycle_state.is_active() {
            return Err(ProvisionError::TopicInactive {
                name: topic.name,
                state: topic.lifecycle_state,
            });
        }

        info!("✓ Notification topic validated: {}", topic.name);
        Ok(topic)
    }
}
