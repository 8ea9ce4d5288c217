use cart::{Cart, QuantityChange, Toggle, Wishlist};
use catalog::{Catalog, Product, SearchMode, SearchOutcome};
use foundation::{Millis, ProductId};
use runtime::{CancellableTimer, Clock, Debouncer, Metrics, MetricsSnapshot, earliest};
use tracing::{debug, trace};
use view::{ResultsState, StorefrontView, ViewModel, render};

use crate::action::Action;
use crate::config::StorefrontConfig;
use crate::panels::Panels;

pub const TOAST_ADDED_TO_CART: &str = "Added to cart";
pub const TOAST_SAVED_TO_WISHLIST: &str = "Saved to wishlist";
pub const TOAST_REMOVED_FROM_WISHLIST: &str = "Removed from wishlist";

/// Which parts of the page need redrawing after an operation, plus one-shot
/// effects the adapter has to perform.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Update {
    pub grid: bool,
    pub cart: bool,
    pub wishlist: bool,
    pub results: bool,
    pub toast: bool,
    pub panels: bool,
    /// Smooth-scroll the results section into view.
    pub scroll_results: bool,
}

impl Update {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn everything() -> Self {
        Self {
            grid: true,
            cart: true,
            wishlist: true,
            results: true,
            toast: true,
            panels: true,
            scroll_results: false,
        }
    }

    pub fn merge(&mut self, other: Update) {
        self.grid |= other.grid;
        self.cart |= other.cart;
        self.wishlist |= other.wishlist;
        self.results |= other.results;
        self.toast |= other.toast;
        self.panels |= other.panels;
        self.scroll_results |= other.scroll_results;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Application state for one storefront widget and the operations on it.
///
/// Every operation mutates synchronously and returns an [`Update`]; the caller
/// renders with [`Storefront::view`] and applies the flagged parts. Timers are
/// driven by the injected clock through [`Storefront::advance`].
#[derive(Debug)]
pub struct Storefront<C: Clock> {
    config: StorefrontConfig,
    clock: C,
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    panels: Panels,
    results: ResultsState,
    toast: Option<&'static str>,
    toast_timer: CancellableTimer,
    search: Debouncer<String>,
    scroll_timer: CancellableTimer,
    metrics: Metrics,
}

impl<C: Clock> Storefront<C> {
    pub fn new(config: StorefrontConfig, clock: C) -> Self {
        Self {
            catalog: Catalog::new(
                config.grid_target.clone(),
                config.search_mode.unwrap_or_default(),
            ),
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            panels: Panels::new(),
            results: ResultsState::default(),
            toast: None,
            toast_timer: CancellableTimer::new(),
            search: Debouncer::new(config.debounce_ms),
            scroll_timer: CancellableTimer::new(),
            metrics: Metrics::new(),
            config,
            clock,
        }
    }

    /// Drops products, cart, wishlist and pending timers. The config, the
    /// search mode and the known panels stay, since the page listeners that
    /// depend on them stay bound.
    pub fn reset(&mut self) -> Update {
        debug!("storefront reset");
        self.catalog = Catalog::new(self.config.grid_target.clone(), self.catalog.search_mode());
        self.cart = Cart::new();
        self.wishlist = Wishlist::new();
        self.panels.reset();
        self.results = ResultsState::default();
        self.toast = None;
        self.toast_timer.cancel();
        self.search.cancel();
        self.scroll_timer.cancel();
        self.metrics.clear();
        Update::everything()
    }

    /// Applies a new config without touching catalog, cart or wishlist, so
    /// products mounted before page init survive it.
    pub fn configure(&mut self, config: StorefrontConfig) -> Update {
        debug!(?config, "storefront configured");
        self.catalog.set_default_target(config.grid_target.clone());
        if let Some(mode) = config.search_mode {
            self.catalog.set_search_mode(mode);
        }
        if config.debounce_ms != self.search.delay_ms() {
            self.search = Debouncer::new(config.debounce_ms);
        }
        self.config = config;
        Update::everything()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Records the side panels present on the page.
    pub fn set_known_panels(&mut self, ids: impl IntoIterator<Item = String>) {
        self.panels.set_known(ids);
    }

    pub fn mount_products(&mut self, products: Vec<Product>, target: Option<&str>) -> Update {
        self.catalog.mount(products, target);
        Update {
            grid: true,
            ..Update::none()
        }
    }

    pub fn set_global_products(&mut self, products: Vec<Product>) -> Update {
        self.catalog.set_global_products(products);
        Update::none()
    }

    pub fn init_search(&mut self, mode: SearchMode) {
        debug!(?mode, "search mode");
        self.catalog.set_search_mode(mode);
    }

    /// Keystroke, Enter or search-button click: (re)arms the debounce.
    pub fn search_input(&mut self, query: &str) -> Update {
        let now = self.clock.now();
        if self.search.trigger(now, query.to_string()) {
            self.metrics.inc_counter("search.superseded", 1);
            trace!("pending search superseded");
        }
        Update::none()
    }

    /// Runs a search immediately, dropping any pending debounced one.
    pub fn search_now(&mut self, query: &str) -> Update {
        self.search.cancel();
        self.run_search(query)
    }

    fn run_search(&mut self, query: &str) -> Update {
        self.metrics.inc_counter("search.run", 1);
        let update = Update {
            grid: true,
            results: true,
            ..Update::none()
        };
        match self.catalog.search(query) {
            SearchOutcome::Cleared => {
                self.results = ResultsState::Hidden;
                self.scroll_timer.cancel();
            }
            SearchOutcome::Filtered { count } => {
                self.results = ResultsState::Shown { count };
                self.scroll_timer
                    .start(self.clock.now(), self.config.scroll_delay_ms);
            }
        }
        update
    }

    /// Dispatch table for decoded click actions.
    pub fn dispatch(&mut self, action: Action) -> Update {
        trace!(?action, "dispatch");
        match action {
            Action::AddToCart(id) => self.add_to_cart(id),
            Action::ToggleWishlist(id) => self.toggle_wishlist(id),
            Action::OpenPanel(panel) => self.open_panel(&panel),
            Action::ClosePanels => self.close_panels(),
            Action::AdjustQuantity { id, delta } => self.update_quantity(id, delta),
            Action::AddFromWishlist(id) => self.add_to_cart(id),
        }
    }

    /// A click that carried no recognizable marker.
    pub fn ignore_click(&mut self) {
        self.metrics.inc_counter("dispatch.ignored", 1);
    }

    pub fn add_to_cart(&mut self, id: ProductId) -> Update {
        let Some(product) = self.catalog.find(id) else {
            trace!(%id, "add to cart: unknown product");
            return Update::none();
        };
        let qty = self.cart.add(product);
        debug!(%id, qty, "added to cart");
        self.metrics.inc_counter("cart.add", 1);
        self.after_cart_change();
        let mut update = self.notify(TOAST_ADDED_TO_CART);
        update.cart = true;
        update
    }

    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Update {
        match self.cart.update_quantity(id, delta) {
            QuantityChange::Missing => {
                trace!(%id, delta, "quantity change: no cart line");
                return Update::none();
            }
            QuantityChange::Updated { qty } => debug!(%id, qty, "cart quantity"),
            QuantityChange::Removed => debug!(%id, "cart line removed"),
        }
        self.metrics.inc_counter("cart.qty", 1);
        self.after_cart_change();
        Update {
            cart: true,
            ..Update::none()
        }
    }

    pub fn toggle_wishlist(&mut self, id: ProductId) -> Update {
        let Some(product) = self.catalog.find(id) else {
            trace!(%id, "wishlist toggle: unknown product");
            return Update::none();
        };
        let message = match self.wishlist.toggle(product) {
            Toggle::Added => TOAST_SAVED_TO_WISHLIST,
            Toggle::Removed => TOAST_REMOVED_FROM_WISHLIST,
        };
        debug!(%id, message, "wishlist toggled");
        self.metrics.inc_counter("wishlist.toggle", 1);
        self.after_wishlist_change();
        let mut update = self.notify(message);
        update.wishlist = true;
        update
    }

    /// Runs [`Storefront::add_to_cart`] for every saved id in insertion
    /// order, then empties the wishlist. Ids no longer in the catalog are
    /// dropped.
    pub fn move_wishlist_to_cart(&mut self) -> Update {
        let ids: Vec<ProductId> = self.wishlist.entries().iter().map(|p| p.id).collect();
        let mut update = Update::none();
        let mut moved = 0usize;
        for id in ids {
            let added = self.add_to_cart(id);
            if !added.is_empty() {
                moved += 1;
            }
            update.merge(added);
        }
        self.wishlist.clear();
        debug!(moved, "wishlist moved to cart");
        self.metrics.inc_counter("wishlist.move", 1);
        self.after_wishlist_change();
        update.cart = true;
        update.wishlist = true;
        update
    }

    pub fn open_panel(&mut self, panel: &str) -> Update {
        self.panels.open(panel);
        Update {
            panels: true,
            ..Update::none()
        }
    }

    pub fn close_panels(&mut self) -> Update {
        self.panels.close();
        Update {
            panels: true,
            ..Update::none()
        }
    }

    /// Fires every timer whose deadline has passed.
    ///
    /// Order is fixed: debounced search, then the results scroll, then the
    /// toast hide, so a search released in this call can arm its scroll.
    pub fn advance(&mut self) -> Update {
        let now = self.clock.now();
        let mut update = Update::none();
        if let Some(query) = self.search.poll(now) {
            update.merge(self.run_search(&query));
        }
        if self.scroll_timer.fire(now) {
            update.scroll_results = true;
        }
        if self.toast_timer.fire(now) {
            self.toast = None;
            update.toast = true;
        }
        update
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([
            self.search.deadline(),
            self.scroll_timer.deadline(),
            self.toast_timer.deadline(),
        ])
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn view(&self) -> StorefrontView {
        render(&ViewModel {
            catalog: &self.catalog,
            cart: &self.cart,
            wishlist: &self.wishlist,
            currency: &self.config.currency_symbol,
            open_panel: self.panels.open_panel(),
            toast: self.toast,
            results: self.results,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn open_panel_id(&self) -> Option<&str> {
        self.panels.open_panel()
    }

    pub fn results(&self) -> ResultsState {
        self.results
    }

    pub fn toast(&self) -> Option<&'static str> {
        self.toast
    }

    pub fn stats(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn notify(&mut self, message: &'static str) -> Update {
        self.toast = Some(message);
        self.toast_timer.start(self.clock.now(), self.config.toast_ms);
        Update {
            toast: true,
            ..Update::none()
        }
    }

    fn after_cart_change(&mut self) {
        self.metrics.set_gauge("cart.lines", self.cart.len() as i64);
        self.metrics
            .set_gauge("cart.qty", self.cart.total_quantity() as i64);
    }

    fn after_wishlist_change(&mut self) {
        self.metrics
            .set_gauge("wishlist.len", self.wishlist.len() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ProductInput, normalize_products};
    use pretty_assertions::assert_eq;
    use runtime::ManualClock;

    fn storefront() -> (Storefront<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut s = Storefront::new(StorefrontConfig::default(), clock.clone());
        let products = normalize_products(vec![
            ProductInput::new("Green Tea", 4.0).with_category("Beverages"),
            ProductInput::new("Teapot", 25.0).with_category("Kitchen"),
            ProductInput::new("Rice", 9.0).with_meta("5kg"),
        ])
        .unwrap();
        s.mount_products(products, None);
        (s, clock)
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let (mut s, _) = storefront();
        let missing = ProductId::new(99);
        assert!(s.add_to_cart(missing).is_empty());
        assert!(s.toggle_wishlist(missing).is_empty());
        assert!(s.update_quantity(missing, 1).is_empty());
        assert!(s.dispatch(Action::AddFromWishlist(missing)).is_empty());
        assert_eq!(s.toast(), None);
    }

    #[test]
    fn add_notifies_and_redraws_cart() {
        let (mut s, _) = storefront();
        let update = s.add_to_cart(ProductId::new(1));
        assert!(update.cart && update.toast);
        assert!(!update.grid);
        assert_eq!(s.toast(), Some(TOAST_ADDED_TO_CART));
        assert_eq!(s.view().cart.count, "1");
    }

    #[test]
    fn wishlist_toggle_messages() {
        let (mut s, _) = storefront();
        s.toggle_wishlist(ProductId::new(2));
        assert_eq!(s.toast(), Some(TOAST_SAVED_TO_WISHLIST));
        s.toggle_wishlist(ProductId::new(2));
        assert_eq!(s.toast(), Some(TOAST_REMOVED_FROM_WISHLIST));
        assert!(s.wishlist().is_empty());
    }

    #[test]
    fn toast_hides_after_delay_and_newer_toast_extends_it() {
        let (mut s, clock) = storefront();
        s.add_to_cart(ProductId::new(1));
        clock.advance(2000);
        s.add_to_cart(ProductId::new(1));
        clock.advance(1000);
        assert!(!s.advance().toast);
        assert_eq!(s.toast(), Some(TOAST_ADDED_TO_CART));
        clock.advance(1200);
        assert!(s.advance().toast);
        assert_eq!(s.toast(), None);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn typed_search_waits_for_quiet_period() {
        let (mut s, clock) = storefront();
        s.search_input("t");
        clock.advance(100);
        s.search_input("te");
        clock.advance(100);
        s.search_input("tea");
        assert_eq!(s.next_deadline(), Some(Millis(500)));

        clock.advance(299);
        assert!(s.advance().is_empty());
        assert!(!s.catalog().is_filtered());

        clock.advance(1);
        let update = s.advance();
        assert!(update.grid && update.results);
        assert_eq!(s.results(), ResultsState::Shown { count: 2 });
        assert_eq!(s.stats().counters, vec![
            ("search.run".to_string(), 1),
            ("search.superseded".to_string(), 2),
        ]);
    }

    #[test]
    fn results_scroll_after_delay() {
        let (mut s, clock) = storefront();
        assert!(!s.search_now("rice").scroll_results);
        clock.advance(99);
        assert!(!s.advance().scroll_results);
        clock.advance(1);
        assert!(s.advance().scroll_results);
    }

    #[test]
    fn clearing_search_cancels_pending_scroll() {
        let (mut s, clock) = storefront();
        s.search_now("rice");
        s.search_now("  ");
        assert_eq!(s.results(), ResultsState::Hidden);
        clock.advance(500);
        assert!(!s.advance().scroll_results);
    }

    #[test]
    fn immediate_search_drops_pending_debounce() {
        let (mut s, clock) = storefront();
        s.search_input("tea");
        s.search_now("rice");
        clock.advance(1_000);
        s.advance();
        assert_eq!(s.results(), ResultsState::Shown { count: 1 });
    }

    #[test]
    fn reset_drops_everything() {
        let (mut s, _) = storefront();
        s.add_to_cart(ProductId::new(1));
        s.open_panel("cart");
        s.search_input("tea");
        assert_eq!(s.reset(), Update::everything());
        assert!(s.cart().is_empty());
        assert!(s.catalog().products().is_empty());
        assert_eq!(s.open_panel_id(), None);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn configure_keeps_products_mounted_before_init() {
        let (mut s, _) = storefront();
        s.add_to_cart(ProductId::new(2));
        s.init_search(SearchMode::Global);

        let config = StorefrontConfig {
            currency_symbol: "$".to_string(),
            debounce_ms: 150,
            ..StorefrontConfig::default()
        };
        assert_eq!(s.configure(config), Update::everything());

        assert_eq!(s.catalog().products().len(), 3);
        assert_eq!(s.catalog().search_mode(), SearchMode::Global);
        let view = s.view();
        assert_eq!(view.grid.layout, view::GridLayout::Triple);
        assert_eq!(view.cart.total, "$25.00");

        s.search_input("tea");
        assert_eq!(s.next_deadline(), Some(Millis(150)));
    }

    #[test]
    fn configure_applies_explicit_search_mode() {
        let (mut s, _) = storefront();
        s.configure(StorefrontConfig {
            search_mode: Some(SearchMode::Global),
            ..StorefrontConfig::default()
        });
        assert_eq!(s.catalog().search_mode(), SearchMode::Global);
    }

    #[test]
    fn reset_keeps_search_mode_and_known_panels() {
        let (mut s, _) = storefront();
        s.set_known_panels(["cart".to_string(), "wishlist".to_string()]);
        s.init_search(SearchMode::Global);
        s.reset();

        s.dispatch(Action::OpenPanel("compare".to_string()));
        assert_eq!(s.open_panel_id(), None);
        assert!(!s.view().panels.overlay_active);
        assert_eq!(s.catalog().search_mode(), SearchMode::Global);
    }

    #[test]
    fn moving_wishlist_skips_products_no_longer_in_catalog() {
        let (mut s, _) = storefront();
        s.toggle_wishlist(ProductId::new(1));
        s.toggle_wishlist(ProductId::new(3));
        let remaining = normalize_products(vec![
            ProductInput::new("Teapot", 25.0).with_id(3),
        ])
        .unwrap();
        s.mount_products(remaining, None);

        let update = s.move_wishlist_to_cart();
        assert!(update.cart && update.wishlist && update.toast);
        let lines: Vec<(u64, &str)> = s
            .cart()
            .lines()
            .iter()
            .map(|l| (l.id().get(), l.product.name.as_str()))
            .collect();
        assert_eq!(lines, vec![(3, "Teapot")]);
        assert!(s.wishlist().is_empty());
    }

    #[test]
    fn moving_wishlist_notifies_per_added_product() {
        let (mut s, _) = storefront();
        s.toggle_wishlist(ProductId::new(1));
        s.toggle_wishlist(ProductId::new(2));
        s.move_wishlist_to_cart();
        assert_eq!(s.toast(), Some(TOAST_ADDED_TO_CART));
        let stats = s.stats();
        assert!(stats.counters.contains(&("cart.add".to_string(), 2)));
        assert!(stats.counters.contains(&("wishlist.move".to_string(), 1)));
    }

    #[test]
    fn empty_wishlist_move_has_no_toast() {
        let (mut s, _) = storefront();
        let update = s.move_wishlist_to_cart();
        assert!(!update.toast);
        assert!(s.cart().is_empty());
    }
}
