// ── Remote backend contract ──
//
// The seven calls the store needs from the remote producer service.
// `ApiClient` is the production implementation; tests substitute an
// in-memory one.

use std::future::Future;

use ruralis_api::ApiClient;
use ruralis_api::types::{CultureCreate, ProducerCreate, ProducerUpdate};

use crate::command::requests::{CultureDraft, ProducerDraft, ProducerPatch};
use crate::model::{Culture, CultureId, DashboardSummary, Producer, ProducerId};

/// Request client used by the `Controller`.
///
/// Every method maps to exactly one HTTP request. Implementations perform
/// no validation and no retries.
pub trait Backend: Send + Sync + 'static {
    fn list_producers(&self) -> impl Future<Output = Result<Vec<Producer>, ruralis_api::Error>> + Send;

    fn create_producer(
        &self,
        draft: &ProducerDraft,
    ) -> impl Future<Output = Result<Producer, ruralis_api::Error>> + Send;

    fn update_producer(
        &self,
        id: ProducerId,
        patch: &ProducerPatch,
    ) -> impl Future<Output = Result<Producer, ruralis_api::Error>> + Send;

    fn delete_producer(&self, id: ProducerId) -> impl Future<Output = Result<(), ruralis_api::Error>> + Send;

    fn create_culture(
        &self,
        producer_id: ProducerId,
        draft: &CultureDraft,
    ) -> impl Future<Output = Result<Culture, ruralis_api::Error>> + Send;

    fn delete_culture(
        &self,
        producer_id: ProducerId,
        culture_id: CultureId,
    ) -> impl Future<Output = Result<(), ruralis_api::Error>> + Send;

    fn dashboard(&self) -> impl Future<Output = Result<DashboardSummary, ruralis_api::Error>> + Send;
}

impl Backend for ApiClient {
    async fn list_producers(&self) -> Result<Vec<Producer>, ruralis_api::Error> {
        let raw = ApiClient::list_producers(self).await?;
        Ok(raw.into_iter().map(Producer::from).collect())
    }

    async fn create_producer(&self, draft: &ProducerDraft) -> Result<Producer, ruralis_api::Error> {
        let body = ProducerCreate::from(draft);
        ApiClient::create_producer(self, &body).await.map(Producer::from)
    }

    async fn update_producer(
        &self,
        id: ProducerId,
        patch: &ProducerPatch,
    ) -> Result<Producer, ruralis_api::Error> {
        let body = ProducerUpdate::from(patch);
        ApiClient::update_producer(self, id.get(), &body)
            .await
            .map(Producer::from)
    }

    async fn delete_producer(&self, id: ProducerId) -> Result<(), ruralis_api::Error> {
        ApiClient::delete_producer(self, id.get()).await
    }

    async fn create_culture(
        &self,
        producer_id: ProducerId,
        draft: &CultureDraft,
    ) -> Result<Culture, ruralis_api::Error> {
        let body = CultureCreate::from(draft);
        ApiClient::create_culture(self, producer_id.get(), &body)
            .await
            .map(Culture::from)
    }

    async fn delete_culture(
        &self,
        producer_id: ProducerId,
        culture_id: CultureId,
    ) -> Result<(), ruralis_api::Error> {
        ApiClient::delete_culture(self, producer_id.get(), culture_id.get()).await
    }

    async fn dashboard(&self) -> Result<DashboardSummary, ruralis_api::Error> {
        ApiClient::dashboard(self).await.map(DashboardSummary::from)
    }
}
