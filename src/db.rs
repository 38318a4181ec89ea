use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::vendor::{NewVendor, Vendor, VendorPayload};

/// Open (or create) the vendor database at `path` and make sure the schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Vendors Table
    // Enumerated columns are plain TEXT: the store accepts any label.
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS vendors (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            vendor_type TEXT NOT NULL,
            criticality TEXT NOT NULL,
            status TEXT NOT NULL,
            email TEXT NOT NULL,
            service_provided TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_vendors_created_at ON vendors(created_at)",
        [],
    )?;

    Ok(())
}

/// Persist a validated vendor and return the stored record.
pub fn insert_vendor(conn: &Connection, new: &NewVendor) -> Result<Vendor> {
    let vendor = Vendor::from_new(new);
    write_vendor(conn, &vendor)?;

    debug!(id = %vendor.id, name = %vendor.name, "vendor inserted");
    Ok(vendor)
}

/// Persist already-built records (import path). Returns how many were written.
pub fn insert_vendors(conn: &Connection, vendors: &[Vendor]) -> Result<usize> {
    let mut inserted = 0;

    for vendor in vendors {
        write_vendor(conn, vendor)?;
        inserted += 1;
    }

    info!(inserted, "vendors imported");
    Ok(inserted)
}

fn write_vendor(conn: &Connection, vendor: &Vendor) -> Result<()> {
    conn.execute(
        "INSERT INTO vendors (
            id, name, vendor_type, criticality, status, email, service_provided,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            vendor.id,
            vendor.name,
            vendor.vendor_type,
            vendor.criticality,
            vendor.status,
            vendor.email,
            vendor.service_provided,
            vendor.created_at.to_rfc3339(),
            vendor.updated_at.to_rfc3339(),
        ],
    )
    .with_context(|| format!("Failed to insert vendor {}", vendor.id))?;

    Ok(())
}

/// Full scan, insertion order.
pub fn get_all_vendors(conn: &Connection) -> Result<Vec<Vendor>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, vendor_type, criticality, status, email, service_provided,
                created_at, updated_at
         FROM vendors
         ORDER BY row_id ASC",
    )?;

    let vendors = stmt
        .query_map([], vendor_from_row)?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read vendors")?;

    Ok(vendors)
}

pub fn count_vendors(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM vendors", [], |row| row.get(0))?;
    Ok(count)
}

fn vendor_from_row(row: &Row<'_>) -> rusqlite::Result<Vendor> {
    Ok(Vendor {
        id: row.get(0)?,
        name: row.get(1)?,
        vendor_type: row.get(2)?,
        criticality: row.get(3)?,
        status: row.get(4)?,
        email: row.get(5)?,
        service_provided: row.get(6)?,
        created_at: parse_timestamp(row, 7)?,
        updated_at: parse_timestamp(row, 8)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

// ============================================================================
// CSV IMPORT
// ============================================================================

pub fn load_csv(csv_path: &Path) -> Result<Vec<Vendor>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;
    load_csv_reader(file)
}

/// Headers: name,type,criticality,status,email,serviceProvided
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Vec<Vendor>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut vendors = Vec::new();

    for result in rdr.deserialize() {
        let payload: VendorPayload = result.context("Failed to deserialize vendor row")?;
        vendors.push(Vendor::from_payload(payload));
    }

    Ok(vendors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn payload(name: &str, email: &str) -> VendorPayload {
        VendorPayload {
            name: name.to_string(),
            vendor_type: "Technology".to_string(),
            criticality: "Medium".to_string(),
            status: "Active".to_string(),
            email: email.to_string(),
            service_provided: "IT Support".to_string(),
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let conn = memory_db();

        assert!(get_all_vendors(&conn).unwrap().is_empty());
        assert_eq!(count_vendors(&conn).unwrap(), 0);
    }

    #[test]
    fn test_insert_then_list_round_trip() {
        let conn = memory_db();
        let sent = payload("Acme Corp", "john@acme.com");

        let created = insert_vendor(&conn, &sent.validate().unwrap()).unwrap();
        let listed = get_all_vendors(&conn).unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].payload(), sent);
        assert_eq!(listed[0].created_at, created.created_at);
    }

    #[test]
    fn test_ids_unique_and_order_kept() {
        let conn = memory_db();

        for name in ["First", "Second", "Third"] {
            insert_vendor(&conn, &payload(name, "a@b.co").validate().unwrap()).unwrap();
        }

        let listed = get_all_vendors(&conn).unwrap();
        let names: Vec<&str> = listed.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_ne!(listed[0].id, listed[1].id);
        assert_ne!(listed[1].id, listed[2].id);
    }

    #[test]
    fn test_store_tolerates_arbitrary_labels() {
        let conn = memory_db();
        let mut odd = payload("", "");
        odd.status = "archived-ish".to_string();
        odd.criticality = String::new();

        insert_vendors(&conn, &[Vendor::from_payload(odd.clone())]).unwrap();

        let listed = get_all_vendors(&conn).unwrap();
        assert_eq!(listed[0].payload(), odd);
    }

    #[test]
    fn test_load_csv_reader() {
        let data = "\
name,type,criticality,status,email,serviceProvided
Global Logistics,Logistics,Critical,Active,mike@globallogistics.com,Shipping
EcoPackage,Supplier,Low,Inactive,lisa@ecopackage.com,Packaging Materials
";
        let vendors = load_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(vendors.len(), 2);
        assert_eq!(vendors[0].name, "Global Logistics");
        assert_eq!(vendors[1].service_provided, "Packaging Materials");

        let conn = memory_db();
        assert_eq!(insert_vendors(&conn, &vendors).unwrap(), 2);
        assert_eq!(count_vendors(&conn).unwrap(), 2);
    }

    #[test]
    fn test_load_csv_reader_rejects_missing_columns() {
        let data = "name,type\nAcme,Supplier\n";
        assert!(load_csv_reader(data.as_bytes()).is_err());
    }
}
