pub mod filter;
pub mod product;

pub use filter::*;
pub use product::*;

use foundation::ProductId;
use tracing::debug;

pub const DEFAULT_GRID_TARGET: &str = "product-grid";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed product list: {0}")]
    Malformed(String),
    #[error("product #{index} ({name}) has a negative or non-numeric price")]
    InvalidPrice { index: usize, name: String },
    #[error("unknown search mode: {0}")]
    UnknownSearchMode(String),
}

/// What a search did to the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: the filter was dropped and the mounted products show again.
    Cleared,
    Filtered { count: usize },
}

/// Mounted products, the optional global catalog and the active filter.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    global: Vec<Product>,
    /// `None` means no active filter. `Some(vec![])` is a search with no hits
    /// and renders as the empty-grid placeholder.
    filtered: Option<Vec<Product>>,
    default_target: String,
    grid_target: String,
    mode: SearchMode,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_TARGET, SearchMode::default())
    }
}

impl Catalog {
    pub fn new(default_target: impl Into<String>, mode: SearchMode) -> Self {
        let default_target = default_target.into();
        Self {
            products: Vec::new(),
            global: Vec::new(),
            filtered: None,
            grid_target: default_target.clone(),
            default_target,
            mode,
        }
    }

    /// Replaces the mounted products and drops any active filter.
    ///
    /// `target` names the grid container; `None` falls back to the default.
    pub fn mount(&mut self, products: Vec<Product>, target: Option<&str>) {
        self.grid_target = target
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_target.clone());
        debug!(count = products.len(), target = %self.grid_target, "mounted products");
        self.products = products;
        self.filtered = None;
    }

    /// Changes the fallback grid container. A grid still bound to the old
    /// default follows it; an explicitly mounted target is kept.
    pub fn set_default_target(&mut self, target: impl Into<String>) {
        let target = target.into();
        if self.grid_target == self.default_target {
            self.grid_target = target.clone();
        }
        self.default_target = target;
    }

    /// Stores the global search universe. The rendered grid is untouched.
    pub fn set_global_products(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "global catalog replaced");
        self.global = products;
    }

    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn search_mode(&self) -> SearchMode {
        self.mode
    }

    pub fn search(&mut self, raw: &str) -> SearchOutcome {
        let Some(query) = SearchQuery::parse(raw) else {
            self.filtered = None;
            return SearchOutcome::Cleared;
        };
        let universe = match self.mode {
            SearchMode::Category => &self.products,
            SearchMode::Global => &self.global,
        };
        let hits = query.filter(universe);
        let count = hits.len();
        debug!(query = query.as_str(), mode = ?self.mode, count, "search");
        self.filtered = Some(hits);
        SearchOutcome::Filtered { count }
    }

    pub fn clear_filter(&mut self) {
        self.filtered = None;
    }

    /// The products the grid should show right now.
    pub fn visible(&self) -> &[Product] {
        self.filtered.as_deref().unwrap_or(&self.products)
    }

    pub fn filtered(&self) -> Option<&[Product]> {
        self.filtered.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn global_products(&self) -> &[Product] {
        &self.global
    }

    pub fn grid_target(&self) -> &str {
        &self.grid_target
    }

    /// Looks a product up in the mounted set, then in the global catalog.
    ///
    /// Global search results are not part of the mounted set, so their cards
    /// still need to resolve.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products
            .iter()
            .chain(self.global.iter())
            .find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(names: &[&str]) -> Vec<Product> {
        normalize_products(
            names
                .iter()
                .map(|n| ProductInput::new(*n, 1.0))
                .collect(),
        )
        .unwrap()
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn mount_replaces_products_and_clears_filter() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple", "banana"]), Some("fruit-grid"));
        c.search("apple");
        assert!(c.is_filtered());

        c.mount(sample(&["carrot"]), None);
        assert!(!c.is_filtered());
        assert_eq!(names(c.visible()), vec!["carrot"]);
        assert_eq!(c.grid_target(), DEFAULT_GRID_TARGET);
    }

    #[test]
    fn mount_binds_target() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple"]), Some("fruit-grid"));
        assert_eq!(c.grid_target(), "fruit-grid");
        c.mount(sample(&["apple"]), Some("  "));
        assert_eq!(c.grid_target(), DEFAULT_GRID_TARGET);
    }

    #[test]
    fn default_target_change_keeps_explicit_mount() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple"]), None);
        c.set_default_target("shop-grid");
        assert_eq!(c.grid_target(), "shop-grid");
        assert_eq!(names(c.products()), vec!["apple"]);

        c.mount(sample(&["apple"]), Some("fruit-grid"));
        c.set_default_target("other-grid");
        assert_eq!(c.grid_target(), "fruit-grid");
    }

    #[test]
    fn blank_search_restores_mounted_list() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple", "banana"]), None);
        assert_eq!(c.search("nothing-matches"), SearchOutcome::Filtered { count: 0 });
        assert!(c.visible().is_empty());

        assert_eq!(c.search("   "), SearchOutcome::Cleared);
        assert_eq!(c.visible(), c.products());
    }

    #[test]
    fn global_mode_searches_global_catalog() {
        let mut c = Catalog::new(DEFAULT_GRID_TARGET, SearchMode::Global);
        c.mount(sample(&["apple"]), None);
        c.set_global_products(sample(&["apple", "apricot", "banana"]));

        assert_eq!(c.search("ap"), SearchOutcome::Filtered { count: 2 });
        assert_eq!(names(c.visible()), vec!["apple", "apricot"]);
        assert_eq!(names(c.products()), vec!["apple"]);
    }

    #[test]
    fn category_mode_ignores_global_catalog() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple"]), None);
        c.set_global_products(sample(&["apple", "apricot"]));
        assert_eq!(c.search("ap"), SearchOutcome::Filtered { count: 1 });
    }

    #[test]
    fn find_prefers_mounted_then_global() {
        let mut c = Catalog::default();
        c.mount(sample(&["apple"]), None);
        c.set_global_products(sample(&["kiwi", "lime"]));
        assert_eq!(c.find(ProductId::new(1)).map(|p| p.name.as_str()), Some("apple"));
        assert_eq!(c.find(ProductId::new(2)).map(|p| p.name.as_str()), Some("lime"));
        assert!(c.find(ProductId::new(9)).is_none());
    }
}
