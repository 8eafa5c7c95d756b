// Dashboard endpoint
//
// The summary is aggregated server-side; the client never recomputes it.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::DashboardResponse;

impl ApiClient {
    /// Fetch the pre-aggregated dashboard summary.
    ///
    /// `GET /dashboard/`
    pub async fn dashboard(&self) -> Result<DashboardResponse, Error> {
        self.get("dashboard/").await
    }
}
