// ── API-to-domain type conversions ──
//
// Bridges raw `ruralis_api::types` into the canonical `model` types and
// back out again for request bodies. Each conversion is structural only:
// no defaults are invented beyond what the wire format already allows.

use ruralis_api::types::{
    CultureCreate, CultureResponse, DashboardResponse, ProducerCreate, ProducerResponse,
    ProducerUpdate, SoilUseResponse,
};

use crate::command::requests::{CultureDraft, ProducerDraft, ProducerPatch};
use crate::model::{
    Culture, CultureId, DashboardSummary, Producer, ProducerId, SoilUse,
};

// ── Responses → domain ───────────────────────────────────────────────

impl From<CultureResponse> for Culture {
    fn from(c: CultureResponse) -> Self {
        Self {
            id: CultureId(c.id),
            producer_id: ProducerId(c.producer_id),
            crop_year: c.crop_year,
            name: c.name,
        }
    }
}

impl From<ProducerResponse> for Producer {
    fn from(p: ProducerResponse) -> Self {
        Self {
            id: ProducerId(p.id),
            tax_id: p.cpf_cnpj,
            name: p.name,
            farm_name: p.farm_name,
            city: p.city,
            state: p.state,
            total_area: p.total_area,
            agricultural_area: p.agricultural_area,
            vegetation_area: p.vegetation_area,
            cultures: p.cultures.into_iter().map(Culture::from).collect(),
        }
    }
}

impl From<SoilUseResponse> for SoilUse {
    fn from(s: SoilUseResponse) -> Self {
        Self {
            agricultural: s.agricultural,
            vegetation: s.vegetation,
        }
    }
}

impl From<DashboardResponse> for DashboardSummary {
    fn from(d: DashboardResponse) -> Self {
        Self {
            total_farms: d.total_farms,
            total_hectares: d.total_hectares,
            farms_by_state: d.farms_by_state,
            cultures_summary: d.cultures_summary,
            area_by_soil_use: d.area_by_soil_use.into(),
        }
    }
}

// ── Requests → wire ──────────────────────────────────────────────────

impl From<&CultureDraft> for CultureCreate {
    fn from(c: &CultureDraft) -> Self {
        Self {
            crop_year: c.crop_year.clone(),
            name: c.name.clone(),
        }
    }
}

impl From<&ProducerDraft> for ProducerCreate {
    fn from(d: &ProducerDraft) -> Self {
        Self {
            cpf_cnpj: d.tax_id.clone(),
            name: d.name.clone(),
            farm_name: d.farm_name.clone(),
            city: d.city.clone(),
            state: d.state.clone(),
            total_area: d.total_area,
            agricultural_area: d.agricultural_area,
            vegetation_area: d.vegetation_area,
            cultures: d.cultures.iter().map(CultureCreate::from).collect(),
        }
    }
}

impl From<&ProducerPatch> for ProducerUpdate {
    fn from(p: &ProducerPatch) -> Self {
        Self {
            name: p.name.clone(),
            farm_name: p.farm_name.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            total_area: p.total_area,
            agricultural_area: p.agricultural_area,
            vegetation_area: p.vegetation_area,
            cultures: p
                .cultures
                .as_ref()
                .map(|list| list.iter().map(CultureCreate::from).collect()),
        }
    }
}
