use cart::{Cart, Wishlist};

use crate::node::{Element, Node};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";
pub const EMPTY_WISHLIST_MESSAGE: &str = "No saved items yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelView {
    pub items: Vec<Node>,
    /// Text for the count badge.
    pub count: String,
    /// Text for both total badges (header and panel footer).
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistPanelView {
    pub items: Vec<Node>,
    pub count: String,
}

pub fn render_cart(cart: &Cart, currency: &str) -> CartPanelView {
    let items = if cart.is_empty() {
        vec![empty_message(EMPTY_CART_MESSAGE)]
    } else {
        cart.lines()
            .iter()
            .map(|line| {
                let id = line.id();
                Element::new("div")
                    .class("panel-item")
                    .child(
                        Element::new("div")
                            .child(Element::new("strong").text(line.product.name.clone()))
                            .child(Element::new("small").text(format!(
                                "{} • Qty: {}",
                                line.product.price.format_with(currency),
                                line.qty
                            ))),
                    )
                    .child(
                        Element::new("div")
                            .child(qty_button(id, -1, "Decrease", "-"))
                            .child(qty_button(id, 1, "Increase", "+")),
                    )
                    .into()
            })
            .collect()
    };
    CartPanelView {
        items,
        count: cart.total_quantity().to_string(),
        total: cart.total_price().format_with(currency),
    }
}

fn qty_button(
    id: foundation::ProductId,
    delta: i64,
    label: &'static str,
    glyph: &'static str,
) -> Element {
    Element::new("button")
        .class("qty-btn")
        .attr("aria-label", label)
        .attr("data-qty", id)
        .attr("data-delta", delta)
        .text(glyph)
}

pub fn render_wishlist(wishlist: &Wishlist, currency: &str) -> WishlistPanelView {
    let items = if wishlist.is_empty() {
        vec![empty_message(EMPTY_WISHLIST_MESSAGE)]
    } else {
        wishlist
            .entries()
            .iter()
            .map(|product| {
                Element::new("div")
                    .class("panel-item")
                    .child(
                        Element::new("div")
                            .child(Element::new("strong").text(product.name.clone()))
                            .child(
                                Element::new("small").text(product.price.format_with(currency)),
                            ),
                    )
                    .child(
                        Element::new("button")
                            .class("wishlist-add")
                            .attr("data-add", product.id)
                            .text("Add"),
                    )
                    .into()
            })
            .collect()
    };
    WishlistPanelView {
        items,
        count: wishlist.len().to_string(),
    }
}

fn empty_message(text: &str) -> Node {
    Element::new("p").class("panel-empty").text(text).into()
}
