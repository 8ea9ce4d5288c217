use catalog::Product;

use crate::node::{Element, Node};

pub const EMPTY_GRID_MESSAGE: &str = "No products found. Try a different search term.";

/// Column layout for the product grid, picked from the number of cards.
///
/// Small result sets are centered in narrow fixed-width columns so one or two
/// cards do not stretch across the whole row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridLayout {
    Empty,
    Single,
    Pair,
    Triple,
    Flow,
}

impl GridLayout {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => GridLayout::Empty,
            1 => GridLayout::Single,
            2 => GridLayout::Pair,
            3 => GridLayout::Triple,
            _ => GridLayout::Flow,
        }
    }

    /// Value for `grid-template-columns`; empty means "use the stylesheet".
    pub fn template_columns(self) -> &'static str {
        match self {
            GridLayout::Single => "minmax(280px, 320px)",
            GridLayout::Pair => "repeat(auto-fit, minmax(280px, 320px))",
            GridLayout::Triple => "repeat(auto-fit, minmax(260px, 300px))",
            GridLayout::Empty | GridLayout::Flow => "",
        }
    }

    pub fn justify_content(self) -> &'static str {
        match self {
            GridLayout::Single | GridLayout::Pair | GridLayout::Triple => "center",
            GridLayout::Empty | GridLayout::Flow => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Id of the container element the grid renders into.
    pub target: String,
    pub layout: GridLayout,
    pub children: Vec<Node>,
}

pub fn render_grid(products: &[Product], target: &str, currency: &str) -> GridView {
    let layout = GridLayout::for_count(products.len());
    let children = if products.is_empty() {
        vec![empty_placeholder()]
    } else {
        products.iter().map(|p| product_card(p, currency).into()).collect()
    };
    GridView {
        target: target.to_string(),
        layout,
        children,
    }
}

fn empty_placeholder() -> Node {
    Element::new("div")
        .class("grid-empty")
        .child(Element::new("i").class("bx").class("bx-search"))
        .child(Element::new("p").text(EMPTY_GRID_MESSAGE))
        .into()
}

pub fn product_card(product: &Product, currency: &str) -> Element {
    Element::new("article")
        .class("product-card")
        .child(
            Element::new("img")
                .attr("src", &product.image)
                .attr("alt", &product.name),
        )
        .child(
            Element::new("div")
                .class("product-meta")
                .child(Element::new("span").text(product.category.clone()))
                .child(Element::new("span").text(product.meta.clone())),
        )
        .child(Element::new("h3").text(product.name.clone()))
        .child(
            Element::new("div")
                .class("price")
                .text(product.price.format_with(currency)),
        )
        .child(
            Element::new("div")
                .class("card-actions")
                .child(
                    Element::new("button")
                        .class("btn-cart")
                        .attr("data-product", product.id)
                        .text("Add to cart"),
                )
                .child(
                    Element::new("button")
                        .class("btn-wishlist")
                        .attr("data-wishlist", product.id)
                        .attr("aria-label", "Save to wishlist")
                        .child(Element::new("i").class("bx").class("bx-heart")),
                ),
        )
}
