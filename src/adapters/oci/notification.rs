use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::client::{endpoint, OciClient};
use crate::domain::{ResourceIdentifier, ResourceKind, TopicHandle, TopicState};
use crate::ports::{ApiError, TopicSource};

const API_VERSION: &str = "20181201";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicRecord {
    topic_id: String,
    name: String,
    lifecycle_state: String,
    description: Option<String>,
}

impl TopicRecord {
    fn into_handle(self) -> Result<TopicHandle, ApiError> {
        Ok(TopicHandle {
            id: ResourceIdentifier::validate(self.topic_id, ResourceKind::Topic)
                .map_err(|e| ApiError::Decode(e.to_string()))?,
            name: self.name,
            lifecycle_state: TopicState::from_api(&self.lifecycle_state),
            description: self.description,
        })
    }
}

/// Topics from the Notifications control plane
pub struct OciTopicSource {
    client: Arc<OciClient>,
}

impl OciTopicSource {
    pub fn new(client: Arc<OciClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TopicSource for OciTopicSource {
    async fn get_topic(&self, topic_id: &ResourceIdentifier) -> Result<TopicHandle, ApiError> {
        let url = endpoint(
            &self.client.endpoints().notification,
            &[API_VERSION, "topics", topic_id.as_str()],
        )?;

        let record: TopicRecord = self.client.get_json(url).await?;
        record.into_handle()
    }

    async fn list_topics(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<TopicHandle>, ApiError> {
        let mut url = endpoint(&self.client.endpoints().notification, &[API_VERSION, "topics"])?;
        url.query_pairs_mut().append_pair("compartmentId", compartment_id.as_str());

        let records: Vec<TopicRecord> = self.client.list_json(url).await?;
        records.into_iter().map(TopicRecord::into_handle).collect()
    }
}
