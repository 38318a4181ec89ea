// Client-side views
//
// Each view owns its own copy of the fetched data and derives everything
// it shows from that copy. Nothing is shared between views.

pub mod dashboard;
pub mod fetch;
pub mod form;
pub mod listing;
pub mod paginate;
pub mod search;

pub use dashboard::{ChartData, Dashboard, DashboardSummary};
pub use fetch::{FetchTicket, LoadState};
pub use form::{FormField, Notification, VendorForm};
pub use listing::VendorListView;
pub use paginate::{Pagination, DEFAULT_PAGE_SIZE};
