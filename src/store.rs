use crate::listing::Listing;

/// Which data source the current authoritative set came from. Advisory only:
/// it picks the section heading and empty-state copy, never the filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    FreshSearch,
    FullCatalog,
}

/// Owns the canonical property view-state: the authoritative listing set,
/// the mode it came from, and the free-text filter applied over it.
///
/// The displayed subset is always derived from `(listings, filter_text)` on
/// demand; it is never stored, so it can never go stale.
///
/// Replacements are gated by a monotonic request generation: each outbound
/// request takes a ticket from `begin_request`, and a response may only
/// replace the set if no newer response has landed first. Chat pushes and
/// catalog pulls share the same gate, so a slow catalog pull cannot clobber
/// the results of a search the user asked for afterwards.
#[derive(Debug)]
pub struct ResultStore {
    listings: Vec<Listing>,
    mode: ViewMode,
    filter_text: String,
    next_generation: u64,
    applied_generation: u64,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            listings: Vec::new(),
            mode: ViewMode::FreshSearch,
            filter_text: String::new(),
            next_generation: 0,
            applied_generation: 0,
        }
    }

    /// Take a generation ticket for an outbound request. Call once per
    /// request, before it is dispatched.
    pub fn begin_request(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Replace the authoritative set with a fresh-search push. An empty
    /// result list is silently ignored; the agent replying without
    /// properties is a normal conversational turn, not a reset.
    pub fn apply_search_results(&mut self, generation: u64, results: Vec<Listing>) -> bool {
        self.replace(generation, results, ViewMode::FreshSearch)
    }

    /// Replace the authoritative set with the full persisted catalog. An
    /// empty catalog leaves the prior state untouched.
    pub fn apply_catalog(&mut self, generation: u64, listings: Vec<Listing>) -> bool {
        self.replace(generation, listings, ViewMode::FullCatalog)
    }

    fn replace(&mut self, generation: u64, listings: Vec<Listing>, mode: ViewMode) -> bool {
        if listings.is_empty() {
            return false;
        }
        if generation <= self.applied_generation {
            tracing::debug!(
                generation,
                applied = self.applied_generation,
                "Dropping stale listing replacement"
            );
            return false;
        }

        self.applied_generation = generation;
        self.listings = listings;
        self.mode = mode;
        self.filter_text.clear();
        true
    }

    /// Set the free-text filter verbatim. No trimming: only the literal
    /// empty string disables filtering.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The authoritative set, untouched by the filter.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// The displayed subset: an order-preserving subsequence of the
    /// authoritative set matching the current filter.
    pub fn displayed(&self) -> Vec<&Listing> {
        if self.filter_text.is_empty() {
            return self.listings.iter().collect();
        }
        self.listings
            .iter()
            .filter(|listing| listing.matches_filter(&self.filter_text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, address: &str, price: f64) -> Listing {
        Listing {
            id: None,
            title: title.to_string(),
            address: address.to_string(),
            description: String::new(),
            bedrooms: 2,
            bathrooms: 1.0,
            price,
            currency_symbol: Some("$".to_string()),
            currency_code: None,
            pet_friendly: None,
            cloudinary_url: None,
            image_url: None,
            screenshot_path: None,
            folder_path: None,
        }
    }

    fn three_results() -> Vec<Listing> {
        vec![
            listing("2BR in Austin", "12 Oak St, Austin", 1800.0),
            listing("2BR in Brooklyn", "99 Bedford Ave, Brooklyn", 1950.0),
            listing("Austin Loft", "4 Congress Ave, Austin", 1700.0),
        ]
    }

    #[test]
    fn search_push_replaces_set_and_resets_filter() {
        let mut store = ResultStore::new();
        store.set_filter("old query");

        let generation = store.begin_request();
        assert!(store.apply_search_results(generation, three_results()));

        assert_eq!(store.listings(), three_results().as_slice());
        assert_eq!(store.filter_text(), "");
        assert_eq!(store.mode(), ViewMode::FreshSearch);
    }

    #[test]
    fn empty_search_push_is_a_no_op() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());
        store.set_filter("austin");

        let generation = store.begin_request();
        assert!(!store.apply_search_results(generation, Vec::new()));

        assert_eq!(store.listings().len(), 3);
        assert_eq!(store.filter_text(), "austin");
        assert_eq!(store.mode(), ViewMode::FreshSearch);
    }

    #[test]
    fn catalog_supersedes_search_results() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        let catalog: Vec<Listing> = (0..10)
            .map(|i| listing(&format!("Listing {i}"), "Somewhere", 1000.0 + i as f64))
            .collect();
        let generation = store.begin_request();
        assert!(store.apply_catalog(generation, catalog));

        assert_eq!(store.listings().len(), 10);
        assert_eq!(store.mode(), ViewMode::FullCatalog);
        assert_eq!(store.filter_text(), "");
    }

    #[test]
    fn empty_catalog_leaves_state_untouched() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());
        store.set_filter("brooklyn");

        let generation = store.begin_request();
        assert!(!store.apply_catalog(generation, Vec::new()));

        assert_eq!(store.listings().len(), 3);
        assert_eq!(store.mode(), ViewMode::FreshSearch);
        assert_eq!(store.filter_text(), "brooklyn");
    }

    #[test]
    fn stale_response_cannot_clobber_newer_replacement() {
        let mut store = ResultStore::new();

        // Catalog pull dispatched first, search dispatched second, but the
        // search response lands first.
        let catalog_generation = store.begin_request();
        let search_generation = store.begin_request();

        assert!(store.apply_search_results(search_generation, three_results()));
        assert!(!store.apply_catalog(
            catalog_generation,
            vec![listing("Stale", "Old Rd", 900.0)]
        ));

        assert_eq!(store.listings().len(), 3);
        assert_eq!(store.mode(), ViewMode::FreshSearch);
    }

    #[test]
    fn displayed_with_empty_filter_is_the_authoritative_set() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        let shown = store.displayed();
        assert_eq!(shown.len(), 3);
        for (shown, original) in shown.iter().zip(store.listings()) {
            assert!(std::ptr::eq(*shown, original));
        }
    }

    #[test]
    fn displayed_is_an_ordered_subsequence() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        store.set_filter("austin");
        let shown = store.displayed();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].title, "2BR in Austin");
        assert_eq!(shown[1].title, "Austin Loft");
        assert_eq!(store.listings().len(), 3);
    }

    #[test]
    fn filtering_is_case_insensitive() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        store.set_filter("AUSTIN");
        let upper: Vec<String> = store.displayed().iter().map(|l| l.title.clone()).collect();
        store.set_filter("austin");
        let lower: Vec<String> = store.displayed().iter().map(|l| l.title.clone()).collect();
        assert_eq!(upper, lower);
    }

    #[test]
    fn whitespace_filter_is_not_treated_as_empty() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        // A two-space filter is applied literally; if it were trimmed to the
        // empty string it would match everything.
        store.set_filter("  ");
        assert!(store.displayed().is_empty());
    }

    #[test]
    fn filter_changes_never_mutate_the_authoritative_set() {
        let mut store = ResultStore::new();
        let generation = store.begin_request();
        store.apply_search_results(generation, three_results());

        store.set_filter("no such listing anywhere");
        assert!(store.displayed().is_empty());
        assert_eq!(store.listings().len(), 3);
    }
}
