// 🏭 Vendor Entity - the one record the registry stores
//
// Identity (UUID) is assigned by the store and never changes.
// Enumerated attributes are typed at the create boundary but persisted as
// plain text, so rows written by other tools still read back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::{ValidationError, ValidationResult};

// ============================================================================
// ENUMERATED ATTRIBUTES
// ============================================================================

/// Raised when a label does not name any variant of an enumerated attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `as_str`, `ALL`, `Display` and case-insensitive `FromStr`
/// for an enumerated vendor attribute.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorType {
    Supplier,
    ServiceProvider,
    Logistics,
    Technology,
}

labelled_enum!(VendorType, "vendor type", {
    Supplier => "Supplier",
    ServiceProvider => "Service Provider",
    Logistics => "Logistics",
    Technology => "Technology",
});

/// Business-impact rating. Variant order is the rating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

labelled_enum!(Criticality, "criticality", {
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Critical => "Critical",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorStatus {
    Active,
    Inactive,
    Pending,
    UnderReview,
}

labelled_enum!(VendorStatus, "status", {
    Active => "Active",
    Inactive => "Inactive",
    Pending => "Pending",
    UnderReview => "Under Review",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    RawMaterials,
    ItSupport,
    Shipping,
    PackagingMaterials,
    Cybersecurity,
}

labelled_enum!(ServiceCategory, "service category", {
    RawMaterials => "Raw Materials",
    ItSupport => "IT Support",
    Shipping => "Shipping",
    PackagingMaterials => "Packaging Materials",
    Cybersecurity => "Cybersecurity",
});

// ============================================================================
// VENDOR RECORD (as stored and served)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Stable identity (UUID) - assigned once by the store
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub vendor_type: String,

    pub criticality: String,

    pub status: String,

    pub email: String,

    pub service_provided: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    /// Build a fresh record from a validated payload.
    pub fn from_new(new: &NewVendor) -> Self {
        let now = Utc::now();

        Vendor {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name.clone(),
            vendor_type: new.vendor_type.as_str().to_string(),
            criticality: new.criticality.as_str().to_string(),
            status: new.status.as_str().to_string(),
            email: new.email.clone(),
            service_provided: new.service_provided.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a fresh record from unchecked strings (CSV import).
    pub fn from_payload(payload: VendorPayload) -> Self {
        let now = Utc::now();

        Vendor {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name,
            vendor_type: payload.vendor_type,
            criticality: payload.criticality,
            status: payload.status,
            email: payload.email,
            service_provided: payload.service_provided,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn vendor_type_kind(&self) -> Option<VendorType> {
        self.vendor_type.parse().ok()
    }

    pub fn criticality_level(&self) -> Option<Criticality> {
        self.criticality.parse().ok()
    }

    pub fn status_kind(&self) -> Option<VendorStatus> {
        self.status.parse().ok()
    }

    pub fn service_category(&self) -> Option<ServiceCategory> {
        self.service_provided.parse().ok()
    }

    /// The user-supplied fields, for comparing a stored record to what was sent.
    pub fn payload(&self) -> VendorPayload {
        VendorPayload {
            name: self.name.clone(),
            vendor_type: self.vendor_type.clone(),
            criticality: self.criticality.clone(),
            status: self.status.clone(),
            email: self.email.clone(),
            service_provided: self.service_provided.clone(),
        }
    }
}

// ============================================================================
// CREATE PAYLOAD
// ============================================================================

/// Raw create request, exactly as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPayload {
    pub name: String,

    #[serde(rename = "type")]
    pub vendor_type: String,

    pub criticality: String,

    pub status: String,

    pub email: String,

    pub service_provided: String,
}

/// Payload whose enumerated fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendor {
    pub name: String,
    pub vendor_type: VendorType,
    pub criticality: Criticality,
    pub status: VendorStatus,
    pub email: String,
    pub service_provided: ServiceCategory,
}

impl VendorPayload {
    /// Type the enumerated fields. Name and email pass through untouched.
    pub fn validate(&self) -> ValidationResult<NewVendor> {
        let mut errors = Vec::new();

        let vendor_type = parse_field::<VendorType>("type", &self.vendor_type, &mut errors);
        let criticality = parse_field::<Criticality>("criticality", &self.criticality, &mut errors);
        let status = parse_field::<VendorStatus>("status", &self.status, &mut errors);
        let service_provided =
            parse_field::<ServiceCategory>("serviceProvided", &self.service_provided, &mut errors);

        match (vendor_type, criticality, status, service_provided) {
            (Some(vendor_type), Some(criticality), Some(status), Some(service_provided))
                if errors.is_empty() =>
            {
                Ok(NewVendor {
                    name: self.name.clone(),
                    vendor_type,
                    criticality,
                    status,
                    email: self.email.clone(),
                    service_provided,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_field<T>(field: &str, value: &str, errors: &mut Vec<ValidationError>) -> Option<T>
where
    T: FromStr<Err = UnknownLabel>,
{
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(ValidationError::new(field, e.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme_payload() -> VendorPayload {
        VendorPayload {
            name: "Acme Corp".to_string(),
            vendor_type: "Supplier".to_string(),
            criticality: "High".to_string(),
            status: "Active".to_string(),
            email: "john@acme.com".to_string(),
            service_provided: "Raw Materials".to_string(),
        }
    }

    #[test]
    fn test_criticality_ordering() {
        assert!(Criticality::Low < Criticality::Medium);
        assert!(Criticality::Medium < Criticality::High);
        assert!(Criticality::High < Criticality::Critical);

        let mut levels = vec![Criticality::Critical, Criticality::Low, Criticality::High];
        levels.sort();
        assert_eq!(levels, vec![Criticality::Low, Criticality::High, Criticality::Critical]);
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("under review".parse::<VendorStatus>(), Ok(VendorStatus::UnderReview));
        assert_eq!("  IT SUPPORT ".parse::<ServiceCategory>(), Ok(ServiceCategory::ItSupport));
        assert_eq!("service provider".parse::<VendorType>(), Ok(VendorType::ServiceProvider));
        assert!("Urgent".parse::<Criticality>().is_err());
    }

    #[test]
    fn test_every_label_round_trips() {
        for t in VendorType::ALL {
            assert_eq!(t.as_str().parse::<VendorType>(), Ok(*t));
        }
        for s in ServiceCategory::ALL {
            assert_eq!(s.to_string().parse::<ServiceCategory>(), Ok(*s));
        }
    }

    #[test]
    fn test_validate_accepts_known_labels() {
        let new = acme_payload().validate().unwrap();

        assert_eq!(new.name, "Acme Corp");
        assert_eq!(new.vendor_type, VendorType::Supplier);
        assert_eq!(new.criticality, Criticality::High);
        assert_eq!(new.status, VendorStatus::Active);
        assert_eq!(new.service_provided, ServiceCategory::RawMaterials);
    }

    #[test]
    fn test_validate_reports_each_bad_field() {
        let mut payload = acme_payload();
        payload.criticality = "Severe".to_string();
        payload.status = "Retired".to_string();

        let errors = payload.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["criticality", "status"]);
    }

    #[test]
    fn test_validate_allows_empty_name_and_email() {
        let mut payload = acme_payload();
        payload.name.clear();
        payload.email.clear();

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_from_new_uses_canonical_labels() {
        let mut payload = acme_payload();
        payload.vendor_type = "supplier".to_string();

        let vendor = Vendor::from_new(&payload.validate().unwrap());

        assert!(!vendor.id.is_empty());
        assert_eq!(vendor.vendor_type, "Supplier");
        assert_eq!(vendor.created_at, vendor.updated_at);
        assert_eq!(vendor.criticality_level(), Some(Criticality::High));
    }

    #[test]
    fn test_unknown_stored_value_has_no_typed_view() {
        let mut vendor = Vendor::from_payload(acme_payload());
        vendor.status = "archived".to_string();

        assert_eq!(vendor.status_kind(), None);
    }

    #[test]
    fn test_wire_field_names() {
        let vendor = Vendor::from_payload(acme_payload());
        let json = serde_json::to_value(&vendor).unwrap();

        assert_eq!(json["type"], "Supplier");
        assert_eq!(json["serviceProvided"], "Raw Materials");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
