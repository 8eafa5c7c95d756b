// ── Dashboard summary ──
//
// Pre-aggregated by the remote service and exposed unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_farms: u64,
    pub total_hectares: f64,
    /// State code -> number of farms, in server order.
    pub farms_by_state: IndexMap<String, u64>,
    /// Crop name -> number of plantings, in server order.
    pub cultures_summary: IndexMap<String, u64>,
    pub area_by_soil_use: SoilUse,
}

/// Hectares by land use, summed across all farms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilUse {
    pub agricultural: f64,
    pub vegetation: f64,
}
