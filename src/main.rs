// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use vendor_registry::config::Settings;
use vendor_registry::{count_vendors, insert_vendors, load_csv, open_database};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let settings = Settings::load().context("Failed to load settings")?;

    if args.len() > 1 && args[1] == "import" {
        // Import mode
        run_import(&args[2..], &settings)?;
    } else {
        // UI mode (default)
        run_ui_mode(&settings)?;
    }

    Ok(())
}

/// `import <file.csv> [--db <path>]`
fn run_import(args: &[String], settings: &Settings) -> Result<()> {
    vendor_registry::logging::init_stdout_logging()?;

    let Some(csv_arg) = args.first() else {
        bail!("usage: vendor-registry import <file.csv> [--db <path>]");
    };
    let csv_path = Path::new(csv_arg);

    let db_path = match args.iter().position(|a| a == "--db") {
        Some(i) => match args.get(i + 1) {
            Some(p) => PathBuf::from(p),
            None => bail!("--db needs a path"),
        },
        None => settings.database.path.clone(),
    };

    println!("📂 Loading {}...", csv_path.display());
    let vendors = load_csv(csv_path)?;
    println!("✓ Loaded {} vendors from CSV", vendors.len());

    let conn = open_database(&db_path)?;
    let inserted = insert_vendors(&conn, &vendors)?;
    let count = count_vendors(&conn)?;

    println!("✓ Inserted {} vendors", inserted);
    println!("✓ {} now holds {} vendors", db_path.display(), count);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    use std::sync::Arc;
    use vendor_registry::client::HttpVendorApi;

    let _guard = vendor_registry::logging::init_file_logging("logs")?;
    tracing::info!(base_url = %settings.client.base_url, "starting terminal client");

    let api = Arc::new(HttpVendorApi::new(&settings.client.base_url));
    let mut app = ui::App::new(api, settings.client.page_size);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or import data: cargo run -- import vendors.csv");
    std::process::exit(1);
}
