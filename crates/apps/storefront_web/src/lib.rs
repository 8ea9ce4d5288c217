use std::cell::RefCell;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::{Product, SearchMode, parse_products};
use storefront::{Storefront, StorefrontConfig, Update, decode};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent};

mod clock;
pub mod dom;
mod logging;

pub use clock::BrowserClock;

// Guard against double-initialization (hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static CLICK_BOUND: AtomicBool = AtomicBool::new(false);
static SEARCH_BOUND: AtomicBool = AtomicBool::new(false);

/// The pending `setTimeout` that drives the storefront timers.
#[derive(Default)]
struct TimerSlot {
    callback: Option<Closure<dyn FnMut()>>,
    handle: Option<i32>,
}

thread_local! {
    static STATE: RefCell<Storefront<BrowserClock>> =
        RefCell::new(Storefront::new(StorefrontConfig::default(), BrowserClock));
    static TIMER: RefCell<TimerSlot> = RefCell::new(TimerSlot::default());
}

/// TLS access that returns a default on teardown instead of panicking.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<Storefront<BrowserClock>>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn reject(err: impl Display) -> JsValue {
    tracing::warn!(%err, "rejected input");
    JsValue::from_str(&err.to_string())
}

/// Renders the flagged parts, then re-arms the timer for the next deadline.
fn commit(update: Update) {
    if !update.is_empty() {
        let rendered = with_state(|s| {
            let s = s.borrow();
            Some((s.view(), s.config().elements.clone()))
        });
        if let Some((view, ids)) = rendered {
            if let Err(err) = dom::apply(&view, update, &ids) {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "storefront render error: {:?}",
                    err
                )));
            }
        }
    }
    rearm();
}

fn rearm() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let wait = with_state(|s| {
        let s = s.borrow();
        s.next_deadline().map(|deadline| s.now().until(deadline))
    });
    let _ = TIMER.try_with(|slot| {
        let mut slot = slot.borrow_mut();
        let slot = &mut *slot;
        if let Some(handle) = slot.handle.take() {
            window.clear_timeout_with_handle(handle);
        }
        let Some(wait) = wait else {
            return;
        };
        let callback = slot
            .callback
            .get_or_insert_with(|| Closure::wrap(Box::new(on_timer) as Box<dyn FnMut()>));
        let timeout = wait.min(i32::MAX as u64) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) {
            Ok(handle) => slot.handle = Some(handle),
            Err(err) => tracing::error!(?err, "setTimeout failed"),
        }
    });
}

fn on_timer() {
    let _ = TIMER.try_with(|slot| slot.borrow_mut().handle = None);
    let update = with_state(|s| s.borrow_mut().advance());
    commit(update);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    Ok(())
}

/// Applies the optional JSON config, wires the document and overlay click
/// listeners and repaints. Products mounted before `init` are kept.
#[wasm_bindgen]
pub fn init(config_json: Option<String>) -> Result<(), JsValue> {
    let config = StorefrontConfig::from_json(config_json.as_deref().unwrap_or("")).map_err(reject)?;
    logging::init(&config.log_level);
    let known = dom::document()
        .map(|doc| dom::side_panel_ids(&doc, &config.elements))
        .unwrap_or_default();
    tracing::info!(panels = known.len(), "storefront init");
    let overlay_id = config.elements.overlay.clone();
    let update = with_state(|s| {
        let mut s = s.borrow_mut();
        s.set_known_panels(known);
        s.configure(config)
    });
    dom::invalidate();
    bind_clicks(&overlay_id)?;
    commit(update);
    Ok(())
}

fn bind_clicks(overlay_id: &str) -> Result<(), JsValue> {
    if CLICK_BOUND.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let Some(doc) = dom::document() else {
        return Ok(());
    };

    let on_click = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let update = with_state(|s| {
            let mut s = s.borrow_mut();
            match decode(&dom::DomTarget(target)) {
                Some(action) => s.dispatch(action),
                None => {
                    s.ignore_click();
                    Update::none()
                }
            }
        });
        commit(update);
    }));
    doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    if let Some(overlay) = doc.get_element_by_id(overlay_id) {
        let on_overlay = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
            let update = with_state(|s| s.borrow_mut().close_panels());
            commit(update);
        }));
        overlay.add_event_listener_with_callback("click", on_overlay.as_ref().unchecked_ref())?;
        on_overlay.forget();
    }
    Ok(())
}

/// Products arrive as a JS array or as JSON text; both go through serde.
fn read_products(products: &JsValue) -> Result<Vec<Product>, JsValue> {
    let json = match products.as_string() {
        Some(text) => text,
        None => js_sys::JSON::stringify(products)
            .map(String::from)
            .map_err(|_| reject("products are not serializable"))?,
    };
    parse_products(&json).map_err(reject)
}

/// `targetId` from a `{ targetId }` options object. A bare string is taken as
/// the id itself.
fn read_target_id(options: &JsValue) -> Option<String> {
    if let Some(id) = options.as_string() {
        return Some(id);
    }
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str("targetId"))
        .ok()
        .and_then(|v| v.as_string())
}

#[wasm_bindgen(js_name = mountProducts)]
pub fn mount_products(products: JsValue, options: JsValue) -> Result<(), JsValue> {
    let products = read_products(&products)?;
    let target_id = read_target_id(&options);
    let update = with_state(|s| {
        s.borrow_mut()
            .mount_products(products, target_id.as_deref())
    });
    commit(update);
    Ok(())
}

#[wasm_bindgen(js_name = setGlobalProducts)]
pub fn set_global_products(products: JsValue) -> Result<(), JsValue> {
    let products = read_products(&products)?;
    let update = with_state(|s| s.borrow_mut().set_global_products(products));
    commit(update);
    Ok(())
}

/// Sets the search scope and binds the search input and button.
#[wasm_bindgen(js_name = initSearch)]
pub fn init_search(mode: Option<String>) -> Result<(), JsValue> {
    let mode: SearchMode = mode.as_deref().unwrap_or("").parse().map_err(reject)?;
    with_state(|s| s.borrow_mut().init_search(mode));
    bind_search()
}

fn search_input_element() -> Option<HtmlInputElement> {
    let doc = dom::document()?;
    let selector = with_state(|s| s.borrow().config().elements.search_input.clone());
    doc.query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

fn queue_search(input: &HtmlInputElement) {
    let query = input.value();
    let update = with_state(|s| s.borrow_mut().search_input(&query));
    commit(update);
}

fn bind_search() -> Result<(), JsValue> {
    let Some(input) = search_input_element() else {
        tracing::debug!("no search input on page");
        return Ok(());
    };
    if SEARCH_BOUND.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let field = input.clone();
    let on_input = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
        queue_search(&field);
    }));
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    let field = input.clone();
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |event: KeyboardEvent| {
        if event.key() == "Enter" {
            event.prevent_default();
            queue_search(&field);
        }
    }));
    input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    let button_selector = with_state(|s| s.borrow().config().elements.search_button.clone());
    let button = dom::document().and_then(|doc| doc.query_selector(&button_selector).ok().flatten());
    if let Some(button) = button {
        let field = input.clone();
        let on_button = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            queue_search(&field);
        }));
        button.add_event_listener_with_callback("click", on_button.as_ref().unchecked_ref())?;
        on_button.forget();
    }
    Ok(())
}

/// Runs a search right away, bypassing the debounce.
#[wasm_bindgen(js_name = searchProducts)]
pub fn search_products(query: &str) {
    let update = with_state(|s| s.borrow_mut().search_now(query));
    commit(update);
}

#[wasm_bindgen(js_name = moveWishlistToCart)]
pub fn move_wishlist_to_cart() {
    let update = with_state(|s| s.borrow_mut().move_wishlist_to_cart());
    commit(update);
}

/// Drops catalog, cart, wishlist and pending timers; listeners stay bound.
#[wasm_bindgen]
pub fn reset() {
    let update = with_state(|s| s.borrow_mut().reset());
    dom::invalidate();
    commit(update);
}

/// Interaction counters and gauges as JSON.
#[wasm_bindgen(js_name = storefrontStats)]
pub fn storefront_stats() -> Result<String, JsValue> {
    let stats = with_state(|s| s.borrow().stats());
    serde_json::to_string(&stats).map_err(reject)
}
