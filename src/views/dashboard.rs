// 📊 Dashboard - summary counters and chart series derived from the vendor list
//
// Nothing here is stored: every figure is recomputed from the fetched list.

use crate::client::{FetchError, VendorApi};
use crate::vendor::{Criticality, Vendor, VendorStatus, VendorType};

use super::fetch::{FetchTicket, Fetcher, LoadState};
use super::search::filter_vendors;

pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub critical: usize,
}

impl DashboardSummary {
    /// Exact string equality, as stored.
    pub fn from_vendors(vendors: &[Vendor]) -> Self {
        DashboardSummary {
            total: vendors.len(),
            active: vendors.iter().filter(|v| v.status == "Active").count(),
            pending: vendors.iter().filter(|v| v.status == "Pending").count(),
            critical: vendors.iter().filter(|v| v.criticality == "Critical").count(),
        }
    }
}

/// One bar/pie series: `(label, count)` in display order.
pub type Series = Vec<(String, usize)>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartData {
    pub by_type: Series,
    pub by_criticality: Series,
    pub by_status: Series,
}

impl ChartData {
    pub fn from_vendors(vendors: &[Vendor]) -> Self {
        ChartData {
            by_type: series(
                vendors,
                VendorType::ALL.iter().map(|t| t.as_str()),
                |v| &v.vendor_type,
            ),
            by_criticality: series(
                vendors,
                Criticality::ALL.iter().map(|c| c.as_str()),
                |v| &v.criticality,
            ),
            by_status: series(
                vendors,
                VendorStatus::ALL.iter().map(|s| s.as_str()),
                |v| &v.status,
            ),
        }
    }
}

/// Count per canonical label (zeros kept), plus an "Other" bucket only when
/// some value matches no label.
fn series<'a>(
    vendors: &[Vendor],
    labels: impl Iterator<Item = &'a str>,
    field: impl Fn(&Vendor) -> &String,
) -> Series {
    let mut out: Series = labels.map(|l| (l.to_string(), 0)).collect();
    let mut other = 0;

    for vendor in vendors {
        match out.iter_mut().find(|(label, _)| label == field(vendor)) {
            Some((_, count)) => *count += 1,
            None => other += 1,
        }
    }

    if other > 0 {
        out.push((OTHER_LABEL.to_string(), other));
    }
    out
}

// ============================================================================
// DASHBOARD VIEW
// ============================================================================

pub struct Dashboard {
    fetcher: Fetcher<Vec<Vendor>>,
    search_term: String,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            fetcher: Fetcher::new("Failed to load vendors"),
            search_term: String::new(),
        }
    }

    pub fn load_state(&self) -> &LoadState<Vec<Vendor>> {
        self.fetcher.state()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetcher.begin()
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Vendor>, FetchError>,
    ) -> bool {
        self.fetcher.finish(ticket, result)
    }

    pub fn refresh(&mut self, api: &dyn VendorApi) {
        let ticket = self.begin_fetch();
        let result = api.list_vendors();
        self.finish_fetch(ticket, result);
    }

    pub fn vendors(&self) -> &[Vendor] {
        self.fetcher.state().loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_vendors(self.vendors())
    }

    pub fn charts(&self) -> ChartData {
        ChartData::from_vendors(self.vendors())
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Vendor table rows (filtered, not paginated).
    pub fn table(&self) -> Vec<&Vendor> {
        filter_vendors(self.vendors(), &self.search_term)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard::new()
    }
}
