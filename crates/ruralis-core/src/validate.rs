// ── Structural validation ──
//
// Pure checks run before any write leaves the process. Individual
// checks return the first problem they find; `validate_draft` and
// `validate_patch` run every check category and collect all failures.

use std::fmt;

use thiserror::Error;

use crate::command::requests::{CultureDraft, ProducerDraft, ProducerPatch};
use crate::model::Producer;

/// Digit counts accepted for a tax identifier: CPF (11) or CNPJ (14).
const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

// ── Errors ───────────────────────────────────────────────────────────

/// A form field that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    FarmName,
    City,
    State,
    CropYear,
    CultureName,
}

impl Field {
    /// End-user label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "nome do produtor",
            Self::FarmName => "nome da fazenda",
            Self::City => "cidade",
            Self::State => "estado",
            Self::CropYear => "ano da safra",
            Self::CultureName => "nome da cultura",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single structural violation. Messages are shown to end users as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("A área total da fazenda deve ser maior que zero.")]
    InvalidArea { total: f64 },

    #[error(
        "A soma das áreas agricultável e de vegetação não pode exceder a área total da fazenda."
    )]
    AreaOverflow { total: f64, allocated: f64 },

    #[error("CPF/CNPJ inválido ou não preenchido.")]
    InvalidTaxId { digits: usize },

    #[error("Campo obrigatório não preenchido: {0}.")]
    MissingField(Field),
}

/// Every violation found in one form, in check order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, predicate: impl Fn(&ValidationError) -> bool) -> bool {
        self.0.iter().any(predicate)
    }

    fn record(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.0.push(e);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Field access ─────────────────────────────────────────────────────

/// Records that carry the four mandatory text fields.
///
/// `None` means "not provided" (a patch leaving the field alone) and is
/// never a violation; `Some` blank text is.
pub trait RequiredFields {
    fn required_fields(&self) -> [(Field, Option<&str>); 4];
}

impl RequiredFields for ProducerDraft {
    fn required_fields(&self) -> [(Field, Option<&str>); 4] {
        [
            (Field::Name, Some(self.name.as_str())),
            (Field::FarmName, Some(self.farm_name.as_str())),
            (Field::City, Some(self.city.as_str())),
            (Field::State, Some(self.state.as_str())),
        ]
    }
}

impl RequiredFields for ProducerPatch {
    fn required_fields(&self) -> [(Field, Option<&str>); 4] {
        [
            (Field::Name, self.name.as_deref()),
            (Field::FarmName, self.farm_name.as_deref()),
            (Field::City, self.city.as_deref()),
            (Field::State, self.state.as_deref()),
        ]
    }
}

impl RequiredFields for Producer {
    fn required_fields(&self) -> [(Field, Option<&str>); 4] {
        [
            (Field::Name, Some(self.name.as_str())),
            (Field::FarmName, Some(self.farm_name.as_str())),
            (Field::City, Some(self.city.as_str())),
            (Field::State, Some(self.state.as_str())),
        ]
    }
}

// ── Checks ───────────────────────────────────────────────────────────

/// Land-area accounting: the total must be positive and the farmed plus
/// preserved hectares must fit inside it.
pub fn validate_areas(total: f64, agricultural: f64, vegetation: f64) -> Result<(), ValidationError> {
    if total.is_nan() || total <= 0.0 {
        return Err(ValidationError::InvalidArea { total });
    }
    let allocated = agricultural + vegetation;
    if allocated.is_nan() || allocated > total {
        return Err(ValidationError::AreaOverflow { total, allocated });
    }
    Ok(())
}

/// Format-only check: after stripping every non-digit, exactly 11 (CPF)
/// or 14 (CNPJ) digits must remain. Check digits are the server's job.
pub fn validate_tax_id(raw: &str) -> Result<(), ValidationError> {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if digits == CPF_DIGITS || digits == CNPJ_DIGITS {
        Ok(())
    } else {
        Err(ValidationError::InvalidTaxId { digits })
    }
}

/// Fails on the first provided-but-blank mandatory field.
pub fn validate_required_fields(record: &impl RequiredFields) -> Result<(), ValidationError> {
    for (field, value) in record.required_fields() {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(field));
        }
    }
    Ok(())
}

pub fn validate_culture(draft: &CultureDraft) -> Result<(), ValidationError> {
    if draft.crop_year.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::CropYear));
    }
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::CultureName));
    }
    Ok(())
}

/// Full creation-form validation. Every category is checked even when an
/// earlier one fails.
pub fn validate_draft(draft: &ProducerDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.record(validate_required_fields(draft));
    errors.record(validate_tax_id(&draft.tax_id));
    errors.record(validate_areas(
        draft.total_area,
        draft.agricultural_area,
        draft.vegetation_area,
    ));
    for culture in &draft.cultures {
        errors.record(validate_culture(culture));
    }
    errors.into_result()
}

/// Update validation against the locally held record.
///
/// Area fields missing from the patch fall back to `current`; if there is
/// no local record, only the area values actually provided are checked.
pub fn validate_patch(
    patch: &ProducerPatch,
    current: Option<&Producer>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.record(validate_required_fields(patch));

    if patch.touches_areas() {
        let total = patch.total_area.or(current.map(|p| p.total_area));
        let agricultural = patch
            .agricultural_area
            .or(current.map(|p| p.agricultural_area));
        let vegetation = patch.vegetation_area.or(current.map(|p| p.vegetation_area));

        match (total, agricultural, vegetation) {
            (Some(t), Some(a), Some(v)) => errors.record(validate_areas(t, a, v)),
            (Some(t), ..) if t.is_nan() || t <= 0.0 => {
                errors.record(Err(ValidationError::InvalidArea { total: t }));
            }
            _ => {}
        }
    }

    if let Some(ref cultures) = patch.cultures {
        for culture in cultures {
            errors.record(validate_culture(culture));
        }
    }
    errors.into_result()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ProducerId;

    fn draft() -> ProducerDraft {
        ProducerDraft {
            tax_id: "123.456.789-09".into(),
            name: "Maria Souza".into(),
            farm_name: "Fazenda Boa Vista".into(),
            city: "Sorriso".into(),
            state: "MT".into(),
            total_area: 100.0,
            agricultural_area: 40.0,
            vegetation_area: 40.0,
            cultures: Vec::new(),
        }
    }

    fn producer() -> Producer {
        Producer {
            id: ProducerId(7),
            tax_id: "123.456.789-09".into(),
            name: "Maria Souza".into(),
            farm_name: "Fazenda Boa Vista".into(),
            city: "Sorriso".into(),
            state: "MT".into(),
            total_area: 100.0,
            agricultural_area: 60.0,
            vegetation_area: 30.0,
            cultures: Vec::new(),
        }
    }

    // ── Areas ────────────────────────────────────────────────────────

    #[test]
    fn areas_within_total_pass() {
        let cases = [
            (100.0, 40.0, 40.0),
            (100.0, 100.0, 0.0),
            (100.0, 0.0, 100.0),
            (100.0, 50.0, 50.0),
            (0.5, 0.0, 0.0),
            (1234.56, 1000.0, 234.56),
        ];
        for (t, a, v) in cases {
            assert!(validate_areas(t, a, v).is_ok(), "expected {t}/{a}/{v} to pass");
        }
    }

    #[test]
    fn overflowing_areas_fail() {
        let err = validate_areas(100.0, 60.0, 50.0).unwrap_err();
        assert!(matches!(err, ValidationError::AreaOverflow { allocated, .. } if (allocated - 110.0).abs() < 1e-9));
        assert!(matches!(
            validate_areas(10.0, 10.0, 0.01),
            Err(ValidationError::AreaOverflow { .. })
        ));
    }

    #[test]
    fn non_positive_total_is_invalid_regardless_of_parts() {
        for (t, a, v) in [(0.0, 0.0, 0.0), (-1.0, 0.0, 0.0), (0.0, 500.0, 500.0), (-10.0, -5.0, -5.0)] {
            assert!(
                matches!(validate_areas(t, a, v), Err(ValidationError::InvalidArea { .. })),
                "expected InvalidArea for {t}/{a}/{v}"
            );
        }
    }

    #[test]
    fn nan_total_is_invalid() {
        assert!(matches!(
            validate_areas(f64::NAN, 1.0, 1.0),
            Err(ValidationError::InvalidArea { .. })
        ));
        assert!(matches!(
            validate_areas(10.0, f64::NAN, 1.0),
            Err(ValidationError::AreaOverflow { .. })
        ));
    }

    // ── Tax id ───────────────────────────────────────────────────────

    #[test]
    fn tax_id_digit_counts() {
        assert!(validate_tax_id("123.456.789-09").is_ok());
        assert!(validate_tax_id("12345678909").is_ok());
        assert!(validate_tax_id("12.345.678/0001-95").is_ok());
        assert!(validate_tax_id("12345678000195").is_ok());

        assert_eq!(
            validate_tax_id("12345"),
            Err(ValidationError::InvalidTaxId { digits: 5 })
        );
        assert_eq!(
            validate_tax_id(""),
            Err(ValidationError::InvalidTaxId { digits: 0 })
        );
        assert!(validate_tax_id("123456789012").is_err());
        assert!(validate_tax_id("123456789012345").is_err());
    }

    #[test]
    fn tax_id_ignores_letters_and_separators() {
        assert!(validate_tax_id("CPF: 123 456 789 09").is_ok());
        assert!(validate_tax_id("abc").is_err());
    }

    // ── Required fields ──────────────────────────────────────────────

    #[test]
    fn required_fields_report_first_blank() {
        let mut d = draft();
        d.farm_name = "   ".into();
        d.state = String::new();
        assert_eq!(
            validate_required_fields(&d),
            Err(ValidationError::MissingField(Field::FarmName))
        );
    }

    #[test]
    fn patch_absent_fields_are_not_missing() {
        let patch = ProducerPatch::default();
        assert!(validate_required_fields(&patch).is_ok());

        let blank = ProducerPatch {
            city: Some(String::new()),
            ..ProducerPatch::default()
        };
        assert_eq!(
            validate_required_fields(&blank),
            Err(ValidationError::MissingField(Field::City))
        );
    }

    #[test]
    fn culture_requires_year_and_name() {
        assert!(validate_culture(&CultureDraft::new("2023", "Soja")).is_ok());
        assert_eq!(
            validate_culture(&CultureDraft::new("", "Soja")),
            Err(ValidationError::MissingField(Field::CropYear))
        );
        assert_eq!(
            validate_culture(&CultureDraft::new("2023", " ")),
            Err(ValidationError::MissingField(Field::CultureName))
        );
    }

    // ── Composite ────────────────────────────────────────────────────

    #[test]
    fn valid_draft_passes() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn draft_collects_every_category() {
        let mut d = draft();
        d.name = String::new();
        d.tax_id = "12345".into();
        d.agricultural_area = 60.0;
        d.vegetation_area = 50.0;

        let errors = validate_draft(&d).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(|e| matches!(e, ValidationError::MissingField(Field::Name))));
        assert!(errors.contains(|e| matches!(e, ValidationError::InvalidTaxId { .. })));
        assert!(errors.contains(|e| matches!(e, ValidationError::AreaOverflow { .. })));
    }

    #[test]
    fn draft_checks_initial_cultures() {
        let mut d = draft();
        d.cultures = vec![CultureDraft::new("2023", "Soja"), CultureDraft::new("", "Milho")];
        let errors = validate_draft(&d).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn errors_display_joined() {
        let mut d = draft();
        d.tax_id = String::new();
        d.total_area = 0.0;
        let errors = validate_draft(&d).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "CPF/CNPJ inválido ou não preenchido.; A área total da fazenda deve ser maior que zero."
        );
    }

    #[test]
    fn patch_areas_fall_back_to_current_record() {
        let current = producer();
        // 60 + 45 > 100 once combined with the stored agricultural area.
        let patch = ProducerPatch {
            vegetation_area: Some(45.0),
            ..ProducerPatch::default()
        };
        let errors = validate_patch(&patch, Some(&current)).unwrap_err();
        assert!(errors.contains(|e| matches!(e, ValidationError::AreaOverflow { .. })));

        let shrink = ProducerPatch {
            vegetation_area: Some(10.0),
            ..ProducerPatch::default()
        };
        assert!(validate_patch(&shrink, Some(&current)).is_ok());
    }

    #[test]
    fn patch_without_local_record_checks_what_it_has() {
        let partial = ProducerPatch {
            vegetation_area: Some(999.0),
            ..ProducerPatch::default()
        };
        assert!(validate_patch(&partial, None).is_ok());

        let zero_total = ProducerPatch {
            total_area: Some(0.0),
            ..ProducerPatch::default()
        };
        assert!(validate_patch(&zero_total, None).is_err());

        let full = ProducerPatch {
            total_area: Some(100.0),
            agricultural_area: Some(60.0),
            vegetation_area: Some(50.0),
            ..ProducerPatch::default()
        };
        assert!(validate_patch(&full, None).is_err());
    }

    #[test]
    fn scenario_overflow_and_fit() {
        assert!(validate_areas(100.0, 60.0, 50.0).is_err());
        assert!(validate_areas(100.0, 40.0, 40.0).is_ok());
    }
}
