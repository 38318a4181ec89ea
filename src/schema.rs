// 📐 Shape Layer - form schema validation
// Checks what the create form collected before anything goes on the wire.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vendor::{Criticality, ServiceCategory, VendorPayload, VendorStatus, VendorType};

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// Join errors into one line for logs and error bodies.
pub fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// FORM SCHEMA
// ============================================================================

pub const NAME_MIN_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// What the create form holds. Unselected drop-downs are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFormData {
    pub name: String,
    pub vendor_type: Option<VendorType>,
    pub criticality: Option<Criticality>,
    pub status: Option<VendorStatus>,
    pub contact: String,
    pub service_provided: Option<ServiceCategory>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate the form and map it onto the wire payload (`contact` → `email`).
pub fn validate_form(form: &VendorFormData) -> ValidationResult<VendorPayload> {
    let mut errors = Vec::new();

    if form.name.chars().count() < NAME_MIN_CHARS {
        errors.push(ValidationError::new(
            "name",
            "Vendor name must be at least 2 characters",
        ));
    }

    if form.vendor_type.is_none() {
        errors.push(ValidationError::new("type", "Required"));
    }

    if form.criticality.is_none() {
        errors.push(ValidationError::new("criticality", "Required"));
    }

    if form.status.is_none() {
        errors.push(ValidationError::new("status", "Required"));
    }

    if !is_valid_email(&form.contact) {
        errors.push(ValidationError::new("contact", "Invalid email address"));
    }

    if form.service_provided.is_none() {
        errors.push(ValidationError::new("serviceProvided", "Required"));
    }

    match (form.vendor_type, form.criticality, form.status, form.service_provided) {
        (Some(vendor_type), Some(criticality), Some(status), Some(service))
            if errors.is_empty() =>
        {
            Ok(VendorPayload {
                name: form.name.clone(),
                vendor_type: vendor_type.as_str().to_string(),
                criticality: criticality.as_str().to_string(),
                status: status.as_str().to_string(),
                email: form.contact.clone(),
                service_provided: service.as_str().to_string(),
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> VendorFormData {
        VendorFormData {
            name: "Acme Corp".to_string(),
            vendor_type: Some(VendorType::Supplier),
            criticality: Some(Criticality::High),
            status: Some(VendorStatus::Active),
            contact: "john@acme.com".to_string(),
            service_provided: Some(ServiceCategory::RawMaterials),
        }
    }

    #[test]
    fn test_valid_form_maps_contact_to_email() {
        let payload = validate_form(&filled_form()).unwrap();

        assert_eq!(payload.name, "Acme Corp");
        assert_eq!(payload.vendor_type, "Supplier");
        assert_eq!(payload.email, "john@acme.com");
        assert_eq!(payload.service_provided, "Raw Materials");
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = filled_form();
        form.name = "A".to_string();

        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Vendor name must be at least 2 characters");
    }

    #[test]
    fn test_bad_email_rejected() {
        for bad in ["", "john", "john@", "john@acme", "jo hn@acme.com"] {
            let mut form = filled_form();
            form.contact = bad.to_string();

            let errors = validate_form(&form).unwrap_err();
            assert_eq!(errors[0].field, "contact", "accepted {bad:?}");
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate_form(&VendorFormData::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec!["name", "type", "criticality", "status", "contact", "serviceProvided"]
        );
    }

    #[test]
    fn test_summarize_joins_messages() {
        let errors = vec![
            ValidationError::new("status", "Required"),
            ValidationError::new("contact", "Invalid email address"),
        ];

        assert_eq!(summarize(&errors), "status: Required; contact: Invalid email address");
    }
}
