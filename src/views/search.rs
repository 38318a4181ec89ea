// Case-insensitive substring search over name, type and email.

use crate::vendor::Vendor;

/// Only the empty term matches everything; whitespace is matched literally.
pub fn matches(vendor: &Vendor, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();

    [&vendor.name, &vendor.vendor_type, &vendor.email]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_vendors<'a>(vendors: &'a [Vendor], term: &str) -> Vec<&'a Vendor> {
    vendors.iter().filter(|v| matches(v, term)).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::vendor::{Vendor, VendorPayload};

    pub fn vendor(name: &str, vendor_type: &str, email: &str) -> Vendor {
        Vendor::from_payload(VendorPayload {
            name: name.to_string(),
            vendor_type: vendor_type.to_string(),
            criticality: "Medium".to_string(),
            status: "Active".to_string(),
            email: email.to_string(),
            service_provided: "IT Support".to_string(),
        })
    }

    /// Seven vendors, three of which mention "tech" in name, type or email.
    pub fn seven_with_three_tech() -> Vec<Vendor> {
        vec![
            vendor("Acme Corp", "Supplier", "john@acme.com"),
            vendor("TechPro Solutions", "Service Provider", "sarah@pro.com"),
            vendor("Global Logistics", "Logistics", "mike@globallogistics.com"),
            vendor("EcoPackage", "Supplier", "lisa@ecopackage.com"),
            vendor("SecureNet", "Technology", "alex@securenet.com"),
            vendor("Northwind", "Supplier", "ops@northwindTECH.io"),
            vendor("Blue Freight", "Logistics", "desk@bluefreight.com"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn names<'a>(found: &[&'a Vendor]) -> Vec<&'a str> {
        found.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_tech_matches_name_type_and_email() {
        let vendors = seven_with_three_tech();

        let found = filter_vendors(&vendors, "tech");

        assert_eq!(names(&found), vec!["TechPro Solutions", "SecureNet", "Northwind"]);
    }

    #[test]
    fn test_case_insensitive() {
        let vendors = seven_with_three_tech();

        assert_eq!(filter_vendors(&vendors, "ACME"), filter_vendors(&vendors, "acme"));
        assert_eq!(filter_vendors(&vendors, "acme").len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let vendors = seven_with_three_tech();

        let once = filter_vendors(&vendors, "logistics");
        let twice = filter_vendors(&vendors, "logistics");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_term_matches_all() {
        let vendors = seven_with_three_tech();

        assert_eq!(filter_vendors(&vendors, "").len(), 7);
    }

    #[test]
    fn test_whitespace_is_part_of_the_term() {
        let vendors = vec![
            vendor("Acme", "Supplier", "a@acme.com"),
            vendor("Acme Corp", "Supplier", "b@acme.com"),
        ];

        assert_eq!(names(&filter_vendors(&vendors, "acme ")), vec!["Acme Corp"]);
        assert_eq!(names(&filter_vendors(&vendors, " ")), vec!["Acme Corp"]);
        assert!(filter_vendors(&vendors, "   ").is_empty());
    }

    #[test]
    fn test_status_and_service_not_searched() {
        let vendors = vec![vendor("Acme", "Supplier", "a@acme.com")];

        assert!(filter_vendors(&vendors, "active").is_empty());
        assert!(filter_vendors(&vendors, "support").is_empty());
    }
}
