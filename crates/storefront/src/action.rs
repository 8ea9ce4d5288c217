use foundation::ProductId;

/// DOM attributes the click dispatcher recognizes, in priority order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Marker {
    AddToCart,
    ToggleWishlist,
    OpenPanel,
    ClosePanels,
    AdjustQuantity,
    AddFromWishlist,
}

/// Companion attribute of [`Marker::AdjustQuantity`] holding the signed delta.
pub const DELTA_ATTR: &str = "data-delta";

impl Marker {
    pub const PRIORITY: [Marker; 6] = [
        Marker::AddToCart,
        Marker::ToggleWishlist,
        Marker::OpenPanel,
        Marker::ClosePanels,
        Marker::AdjustQuantity,
        Marker::AddFromWishlist,
    ];

    pub fn attribute(self) -> &'static str {
        match self {
            Marker::AddToCart => "data-product",
            Marker::ToggleWishlist => "data-wishlist",
            Marker::OpenPanel => "data-target",
            Marker::ClosePanels => "data-close",
            Marker::AdjustQuantity => "data-qty",
            Marker::AddFromWishlist => "data-add",
        }
    }

    /// CSS selector for `Element::closest`.
    pub fn selector(self) -> &'static str {
        match self {
            Marker::AddToCart => "[data-product]",
            Marker::ToggleWishlist => "[data-wishlist]",
            Marker::OpenPanel => "[data-target]",
            Marker::ClosePanels => "[data-close]",
            Marker::AdjustQuantity => "[data-qty]",
            Marker::AddFromWishlist => "[data-add]",
        }
    }
}

/// A decoded click intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    ToggleWishlist(ProductId),
    OpenPanel(String),
    ClosePanels,
    AdjustQuantity { id: ProductId, delta: i64 },
    AddFromWishlist(ProductId),
}

/// An element found by [`ClickTarget::closest`].
pub trait MarkedElement {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// The element a click landed on, able to search its ancestors.
pub trait ClickTarget {
    type Element: MarkedElement;

    /// Nearest ancestor-or-self carrying `marker`.
    fn closest(&self, marker: Marker) -> Option<Self::Element>;
}

/// Decodes a click into at most one action.
///
/// Markers are tried in [`Marker::PRIORITY`] order and the first one found
/// decides the outcome. A marker with an unparseable value yields `None`
/// without falling through to lower-priority markers.
pub fn decode<T: ClickTarget>(target: &T) -> Option<Action> {
    let (marker, element) = Marker::PRIORITY
        .iter()
        .find_map(|m| target.closest(*m).map(|el| (*m, el)))?;
    let value = element.attribute(marker.attribute()).unwrap_or_default();
    match marker {
        Marker::AddToCart => ProductId::parse(&value).map(Action::AddToCart),
        Marker::ToggleWishlist => ProductId::parse(&value).map(Action::ToggleWishlist),
        Marker::OpenPanel => Some(Action::OpenPanel(value.trim().to_string())),
        Marker::ClosePanels => Some(Action::ClosePanels),
        Marker::AdjustQuantity => {
            let id = ProductId::parse(&value)?;
            let delta = element.attribute(DELTA_ATTR)?.trim().parse::<i64>().ok()?;
            Some(Action::AdjustQuantity { id, delta })
        }
        Marker::AddFromWishlist => ProductId::parse(&value).map(Action::AddFromWishlist),
    }
}
