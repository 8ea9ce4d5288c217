use std::cell::RefCell;

use storefront::{ClickTarget, ElementIds, MarkedElement, Marker, Update};
use view::{
    CartPanelView, GridView, Node, PanelsView, ResultsView, StorefrontView, ToastView,
    WishlistPanelView,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// Last tree applied to each container, so unchanged containers are not rebuilt.
#[derive(Default)]
struct Applied {
    grid: Option<GridView>,
    cart: Option<CartPanelView>,
    wishlist: Option<WishlistPanelView>,
}

thread_local! {
    static APPLIED: RefCell<Applied> = RefCell::new(Applied::default());
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn by_id(doc: &Document, id: &str) -> Option<Element> {
    if id.is_empty() {
        return None;
    }
    doc.get_element_by_id(id)
}

/// Forgets what was applied; the next [`apply`] rebuilds every container.
pub fn invalidate() {
    let _ = APPLIED.try_with(|a| *a.borrow_mut() = Applied::default());
}

/// Applies the parts of `view` flagged in `update`. Missing elements are skipped.
pub fn apply(view: &StorefrontView, update: Update, ids: &ElementIds) -> Result<(), JsValue> {
    let Some(doc) = document() else {
        return Ok(());
    };
    APPLIED
        .try_with(|applied| {
            let mut applied = applied.borrow_mut();
            if update.grid && applied.grid.as_ref() != Some(&view.grid) {
                apply_grid(&doc, &view.grid)?;
                applied.grid = Some(view.grid.clone());
            }
            if update.cart && applied.cart.as_ref() != Some(&view.cart) {
                apply_cart(&doc, &view.cart, ids)?;
                applied.cart = Some(view.cart.clone());
            }
            if update.wishlist && applied.wishlist.as_ref() != Some(&view.wishlist) {
                apply_wishlist(&doc, &view.wishlist, ids)?;
                applied.wishlist = Some(view.wishlist.clone());
            }
            Ok::<(), JsValue>(())
        })
        .unwrap_or(Ok(()))?;
    if update.results {
        apply_results(&doc, &view.results, ids)?;
    }
    if update.toast {
        apply_toast(&doc, &view.toast, ids);
    }
    if update.panels {
        apply_panels(&doc, &view.panels, ids)?;
    }
    if update.scroll_results {
        scroll_into_view(&doc, &ids.results_section);
    }
    Ok(())
}

fn build(doc: &Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(text) => Ok(doc.create_text_node(text).into()),
        Node::Element(el) => {
            let out = doc.create_element(el.tag)?;
            for class in &el.classes {
                out.class_list().add_1(class)?;
            }
            for (name, value) in &el.attrs {
                out.set_attribute(name, value)?;
            }
            for child in &el.children {
                out.append_child(&build(doc, child)?)?;
            }
            Ok(out.into())
        }
    }
}

fn replace_children(doc: &Document, parent: &Element, nodes: &[Node]) -> Result<(), JsValue> {
    parent.set_text_content(None);
    for node in nodes {
        parent.append_child(&build(doc, node)?)?;
    }
    Ok(())
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = by_id(doc, id) {
        el.set_text_content(Some(text));
    }
}

fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    let Some(el) = el.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    let style = el.style();
    if value.is_empty() {
        style.remove_property(property)?;
    } else {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn apply_grid(doc: &Document, grid: &GridView) -> Result<(), JsValue> {
    let Some(el) = by_id(doc, &grid.target) else {
        return Ok(());
    };
    el.set_class_name("product-grid");
    set_style(&el, "grid-template-columns", grid.layout.template_columns())?;
    set_style(&el, "justify-content", grid.layout.justify_content())?;
    replace_children(doc, &el, &grid.children)
}

fn apply_cart(doc: &Document, cart: &CartPanelView, ids: &ElementIds) -> Result<(), JsValue> {
    if let Some(el) = by_id(doc, &ids.cart_items) {
        replace_children(doc, &el, &cart.items)?;
    }
    set_text(doc, &ids.cart_count, &cart.count);
    set_text(doc, &ids.cart_total, &cart.total);
    set_text(doc, &ids.panel_total, &cart.total);
    Ok(())
}

fn apply_wishlist(
    doc: &Document,
    wishlist: &WishlistPanelView,
    ids: &ElementIds,
) -> Result<(), JsValue> {
    if let Some(el) = by_id(doc, &ids.wishlist_items) {
        replace_children(doc, &el, &wishlist.items)?;
    }
    set_text(doc, &ids.wishlist_count, &wishlist.count);
    Ok(())
}

fn apply_results(doc: &Document, results: &ResultsView, ids: &ElementIds) -> Result<(), JsValue> {
    let Some(visible) = results.visible else {
        return Ok(());
    };
    let Some(section) = by_id(doc, &ids.results_section) else {
        return Ok(());
    };
    set_style(&section, "display", if visible { "block" } else { "none" })?;
    if let Some(message) = &results.message {
        set_text(doc, &ids.results_count, message);
    }
    Ok(())
}

fn apply_toast(doc: &Document, toast: &ToastView, ids: &ElementIds) {
    let Some(el) = by_id(doc, &ids.toast) else {
        return;
    };
    if toast.shown {
        el.set_text_content(Some(&toast.message));
    }
    let _ = el.class_list().toggle_with_force("show", toast.shown);
}

fn apply_panels(doc: &Document, panels: &PanelsView, ids: &ElementIds) -> Result<(), JsValue> {
    let list = doc.query_selector_all(&format!(".{}", ids.side_panel_class))?;
    for i in 0..list.length() {
        if let Some(panel) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            panel.class_list().remove_1("open")?;
        }
    }
    if let Some(panel) = panels.open.as_deref().and_then(|id| by_id(doc, id)) {
        panel.class_list().add_1("open")?;
    }
    if let Some(overlay) = by_id(doc, &ids.overlay) {
        overlay
            .class_list()
            .toggle_with_force("active", panels.overlay_active)?;
    }
    Ok(())
}

fn scroll_into_view(doc: &Document, id: &str) {
    let Some(el) = by_id(doc, id) else {
        return;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Ids of every side panel on the page.
pub fn side_panel_ids(doc: &Document, ids: &ElementIds) -> Vec<String> {
    let Ok(list) = doc.query_selector_all(&format!(".{}", ids.side_panel_class)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i)?.dyn_into::<Element>().ok())
        .map(|el| el.id())
        .filter(|id| !id.is_empty())
        .collect()
}

/// The element a click event landed on.
pub struct DomTarget(pub Element);

pub struct DomMarked(Element);

impl ClickTarget for DomTarget {
    type Element = DomMarked;

    fn closest(&self, marker: Marker) -> Option<DomMarked> {
        self.0.closest(marker.selector()).ok().flatten().map(DomMarked)
    }
}

impl MarkedElement for DomMarked {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}
