// 📋 Vendor list view - fetch once, then search + paginate in memory

use crate::client::{FetchError, VendorApi};
use crate::vendor::Vendor;

use super::fetch::{FetchTicket, Fetcher, LoadState};
use super::paginate::Pagination;
use super::search::filter_vendors;

pub struct VendorListView {
    fetcher: Fetcher<Vec<Vendor>>,
    search_term: String,
    pagination: Pagination,
}

impl VendorListView {
    pub fn new(page_size: usize) -> Self {
        VendorListView {
            fetcher: Fetcher::new("Failed to load vendors"),
            search_term: String::new(),
            pagination: Pagination::new(page_size),
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
        if !self.fetcher.finish(ticket, result) {
            return false;
        }
        let count = self.filtered().len();
        self.pagination.clamp(count);
        true
    }

    /// Fetch synchronously through `api`.
    pub fn refresh(&mut self, api: &dyn VendorApi) {
        let ticket = self.begin_fetch();
        let result = api.list_vendors();
        self.finish_fetch(ticket, result);
    }

    pub fn vendors(&self) -> &[Vendor] {
        self.fetcher.state().loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.pagination.reset();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = std::mem::take(&mut self.search_term);
        term.push(c);
        self.set_search_term(term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = std::mem::take(&mut self.search_term);
        term.pop();
        self.set_search_term(term);
    }

    pub fn filtered(&self) -> Vec<&Vendor> {
        filter_vendors(self.vendors(), &self.search_term)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn current_page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_count())
    }

    pub fn current_page_items(&self) -> Vec<&Vendor> {
        let filtered = self.filtered();
        self.pagination.slice(&filtered).to_vec()
    }

    pub fn can_go_previous(&self) -> bool {
        self.pagination.can_go_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.pagination.can_go_next(self.filtered_count())
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.filtered_count();
        self.pagination.next(count)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }
}

#[cfg(test)]
mod tests {
    use super::super::search::fixtures::{seven_with_three_tech, vendor};
    use super::*;
    use crate::vendor::VendorPayload;

    struct FakeApi {
        vendors: Result<Vec<Vendor>, String>,
    }

    impl VendorApi for FakeApi {
        fn list_vendors(&self) -> Result<Vec<Vendor>, FetchError> {
            self.vendors.clone().map_err(FetchError::Network)
        }

        fn add_vendor(&self, _payload: &VendorPayload) -> Result<Vendor, FetchError> {
            Err(FetchError::Network("read-only fake".into()))
        }
    }

    fn loaded(vendors: Vec<Vendor>) -> VendorListView {
        let mut view = VendorListView::new(5);
        view.refresh(&FakeApi { vendors: Ok(vendors) });
        view
    }

    fn many(n: usize) -> Vec<Vendor> {
        (0..n)
            .map(|i| vendor(&format!("Vendor {i}"), "Supplier", &format!("v{i}@corp.com")))
            .collect()
    }

    #[test]
    fn test_loading_until_first_fetch_resolves() {
        let mut view = VendorListView::new(5);
        assert!(view.load_state().is_loading());

        let ticket = view.begin_fetch();
        assert!(view.load_state().is_loading());
        view.finish_fetch(ticket, Ok(vec![]));
        assert!(!view.load_state().is_loading());
    }

    #[test]
    fn test_failed_fetch_shows_error_not_crash() {
        let mut view = VendorListView::new(5);
        view.refresh(&FakeApi { vendors: Err("connection refused".into()) });

        let msg = view.load_state().error().unwrap();
        assert!(msg.starts_with("Failed to load vendors"));
        assert!(view.filtered().is_empty());
        assert_eq!(view.total_pages(), 0);
        assert!(!view.can_go_next());
    }

    #[test]
    fn test_tech_search_scenario() {
        let mut view = loaded(seven_with_three_tech());

        view.set_search_term("tech");

        assert_eq!(view.filtered_count(), 3);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.current_page_items().len(), 3);
        assert!(!view.can_go_previous());
        assert!(!view.can_go_next());
    }

    #[test]
    fn test_clearing_search_restores_full_list() {
        let mut view = loaded(seven_with_three_tech());

        view.set_search_term("tech");
        view.set_search_term("");

        assert_eq!(view.filtered_count(), 7);
        let all: Vec<&Vendor> = view.vendors().iter().collect();
        assert_eq!(view.filtered(), all);
    }

    #[test]
    fn test_changing_term_resets_to_first_page() {
        let mut view = loaded(many(12));
        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);

        view.push_search_char('v');
        assert_eq!(view.current_page(), 1);

        view.next_page();
        view.pop_search_char();
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.search_term(), "");
    }

    #[test]
    fn test_page_navigation_bounds() {
        let mut view = loaded(many(11));
        assert_eq!(view.total_pages(), 3);

        assert!(!view.can_go_previous());
        assert!(!view.previous_page());

        assert!(view.next_page());
        assert!(view.next_page());
        assert!(!view.can_go_next());
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 3);

        let last: Vec<&str> = view.current_page_items().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(last, vec!["Vendor 10"]);
    }

    #[test]
    fn test_refetch_with_fewer_rows_clamps_page() {
        let mut view = loaded(many(12));
        view.next_page();
        view.next_page();

        view.refresh(&FakeApi { vendors: Ok(many(4)) });

        assert_eq!(view.current_page(), 1);
        assert_eq!(view.current_page_items().len(), 4);
    }

    #[test]
    fn test_superseded_fetch_ignored() {
        let mut view = VendorListView::new(5);
        let stale = view.begin_fetch();
        let fresh = view.begin_fetch();

        assert!(view.finish_fetch(fresh, Ok(many(2))));
        assert!(!view.finish_fetch(stale, Ok(many(9))));
        assert_eq!(view.vendors().len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let view = loaded(vec![]);

        assert_eq!(view.total_pages(), 0);
        assert!(view.current_page_items().is_empty());
        assert!(!view.can_go_previous());
        assert!(!view.can_go_next());
    }
}
