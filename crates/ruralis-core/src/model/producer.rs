// ── Producer domain types ──

use serde::{Deserialize, Serialize};

use super::ids::{CultureId, ProducerId};

/// A rural-property owner/operator record.
///
/// Always the server's canonical representation: the store replaces the
/// whole value after every successful write, never merging fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub id: ProducerId,
    /// CPF (11 digits) or CNPJ (14 digits), formatted as the server stores it.
    pub tax_id: String,
    pub name: String,
    pub farm_name: String,
    pub city: String,
    /// Two-letter state code (e.g. "MT").
    pub state: String,
    /// Hectares.
    pub total_area: f64,
    pub agricultural_area: f64,
    pub vegetation_area: f64,
    /// Display order is server order.
    pub cultures: Vec<Culture>,
}

impl Producer {
    pub fn culture(&self, id: CultureId) -> Option<&Culture> {
        self.cultures.iter().find(|c| c.id == id)
    }

    /// Hectares neither farmed nor preserved.
    pub fn unallocated_area(&self) -> f64 {
        self.total_area - self.agricultural_area - self.vegetation_area
    }
}

/// A crop planted in a given year, owned by exactly one producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub id: CultureId,
    pub producer_id: ProducerId,
    /// Free-text crop-year label (e.g. "2023" or "2023/24").
    pub crop_year: String,
    pub name: String,
}
