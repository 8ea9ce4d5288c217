//! Pure projection of storefront state into view trees.
//!
//! Nothing here touches the DOM. The browser adapter walks the returned
//! [`StorefrontView`] and applies whichever parts changed.

pub mod grid;
pub mod node;
pub mod panels;

pub use grid::*;
pub use node::*;
pub use panels::*;

use cart::{Cart, Wishlist};
use catalog::{Catalog, result_count_message};

/// Visibility of the search results section.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ResultsState {
    /// No search has run yet; the page's own markup decides.
    #[default]
    Untouched,
    Hidden,
    Shown { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub visible: Option<bool>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub shown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelsView {
    pub open: Option<String>,
    pub overlay_active: bool,
}

/// Everything `render` reads, borrowed from the application state.
#[derive(Debug, Clone, Copy)]
pub struct ViewModel<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub wishlist: &'a Wishlist,
    pub currency: &'a str,
    pub open_panel: Option<&'a str>,
    pub toast: Option<&'a str>,
    pub results: ResultsState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontView {
    pub grid: GridView,
    pub cart: CartPanelView,
    pub wishlist: WishlistPanelView,
    pub results: ResultsView,
    pub toast: ToastView,
    pub panels: PanelsView,
}

pub fn render(model: &ViewModel<'_>) -> StorefrontView {
    StorefrontView {
        grid: render_grid(
            model.catalog.visible(),
            model.catalog.grid_target(),
            model.currency,
        ),
        cart: render_cart(model.cart, model.currency),
        wishlist: render_wishlist(model.wishlist, model.currency),
        results: render_results(model.results),
        toast: ToastView {
            message: model.toast.unwrap_or_default().to_string(),
            shown: model.toast.is_some(),
        },
        panels: PanelsView {
            open: model.open_panel.map(str::to_string),
            overlay_active: model.open_panel.is_some(),
        },
    }
}

pub fn render_results(state: ResultsState) -> ResultsView {
    match state {
        ResultsState::Untouched => ResultsView {
            visible: None,
            message: None,
        },
        ResultsState::Hidden => ResultsView {
            visible: Some(false),
            message: None,
        },
        ResultsState::Shown { count } => ResultsView {
            visible: Some(true),
            message: Some(result_count_message(count)),
        },
    }
}
