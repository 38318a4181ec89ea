// Vendor Registry - Core Library
// Exposes all modules for use in the API server, the terminal client, and tests

pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod schema;
pub mod vendor;
pub mod views;
pub mod wire;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use db::{
    count_vendors, get_all_vendors, insert_vendor, insert_vendors, load_csv, load_csv_reader,
    open_database, setup_database,
};
pub use schema::{validate_form, ValidationError, ValidationResult, VendorFormData};
pub use vendor::{
    Criticality, NewVendor, ServiceCategory, Vendor, VendorPayload, VendorStatus, VendorType,
};
pub use client::{FetchError, VendorApi};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
