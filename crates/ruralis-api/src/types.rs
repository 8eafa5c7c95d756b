// Wire types for the producer registry API.
//
// Field names follow the server's snake_case JSON. These are transport
// shapes only; `ruralis-core` converts them into its domain model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Producers ────────────────────────────────────────────────────────

/// A producer as returned by `GET /producers/` and every producer write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerResponse {
    pub id: u64,
    pub cpf_cnpj: String,
    pub name: String,
    pub farm_name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    #[serde(default)]
    pub cultures: Vec<CultureResponse>,
}

/// `POST /producers/` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerCreate {
    pub cpf_cnpj: String,
    pub name: String,
    pub farm_name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cultures: Vec<CultureCreate>,
}

/// `PUT /producers/{id}` body. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agricultural_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetation_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultures: Option<Vec<CultureCreate>>,
}

// ── Cultures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultureResponse {
    pub id: u64,
    pub producer_id: u64,
    pub crop_year: String,
    pub name: String,
}

/// `POST /producers/{id}/cultures/` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultureCreate {
    pub crop_year: String,
    pub name: String,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Pre-aggregated summary from `GET /dashboard/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_farms: u64,
    pub total_hectares: f64,
    #[serde(default)]
    pub farms_by_state: IndexMap<String, u64>,
    #[serde(default)]
    pub cultures_summary: IndexMap<String, u64>,
    pub area_by_soil_use: SoilUseResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilUseResponse {
    pub agricultural: f64,
    pub vegetation: f64,
}
