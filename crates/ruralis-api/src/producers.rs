// Producer and culture endpoints
//
// Producers are a flat collection under `/producers/`; cultures are
// always addressed through their owning producer.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CultureCreate, CultureResponse, ProducerCreate, ProducerResponse, ProducerUpdate,
};

impl ApiClient {
    // ── Producers ────────────────────────────────────────────────────

    /// List every producer, in server order.
    ///
    /// `GET /producers/`
    pub async fn list_producers(&self) -> Result<Vec<ProducerResponse>, Error> {
        self.get("producers/").await
    }

    /// Create a producer. The server assigns the identifier.
    ///
    /// `POST /producers/`
    pub async fn create_producer(&self, body: &ProducerCreate) -> Result<ProducerResponse, Error> {
        debug!(name = %body.name, farm = %body.farm_name, "creating producer");
        self.post("producers/", body).await
    }

    /// Update a producer, returning the canonical record.
    ///
    /// `PUT /producers/{id}`
    pub async fn update_producer(
        &self,
        id: u64,
        body: &ProducerUpdate,
    ) -> Result<ProducerResponse, Error> {
        debug!(id, "updating producer");
        self.put(&format!("producers/{id}"), body).await
    }

    /// Delete a producer.
    ///
    /// `DELETE /producers/{id}`
    pub async fn delete_producer(&self, id: u64) -> Result<(), Error> {
        debug!(id, "deleting producer");
        self.delete(&format!("producers/{id}")).await
    }

    // ── Cultures ─────────────────────────────────────────────────────

    /// Create a culture under a producer.
    ///
    /// `POST /producers/{id}/cultures/`
    pub async fn create_culture(
        &self,
        producer_id: u64,
        body: &CultureCreate,
    ) -> Result<CultureResponse, Error> {
        debug!(producer_id, crop = %body.name, year = %body.crop_year, "adding culture");
        self.post(&format!("producers/{producer_id}/cultures/"), body)
            .await
    }

    /// Delete a culture from a producer.
    ///
    /// `DELETE /producers/{id}/cultures/{culture_id}`
    pub async fn delete_culture(&self, producer_id: u64, culture_id: u64) -> Result<(), Error> {
        debug!(producer_id, culture_id, "removing culture");
        self.delete(&format!("producers/{producer_id}/cultures/{culture_id}"))
            .await
    }
}
