// ── Typed request structs for Command payloads ──
//
// Drafts describe entities that don't exist yet (no identifier); the patch
// carries only the fields a caller wants to change.

use serde::{Deserialize, Serialize};

// ── Producer ───────────────────────────────────────────────────────

/// Every producer field except the server-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerDraft {
    #[serde(alias = "cpf_cnpj")]
    pub tax_id: String,
    pub name: String,
    pub farm_name: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    /// Cultures created together with the producer.
    #[serde(default)]
    pub cultures: Vec<CultureDraft>,
}

/// Partial producer update. `None` fields are not sent.
///
/// The tax identifier is immutable after creation and deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducerPatch {
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
    /// Replacement culture list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultures: Option<Vec<CultureDraft>>,
}

impl ProducerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn touches_areas(&self) -> bool {
        self.total_area.is_some()
            || self.agricultural_area.is_some()
            || self.vegetation_area.is_some()
    }
}

// ── Culture ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultureDraft {
    pub crop_year: String,
    pub name: String,
}

impl CultureDraft {
    pub fn new(crop_year: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            crop_year: crop_year.into(),
            name: name.into(),
        }
    }
}
