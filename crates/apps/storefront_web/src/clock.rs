use foundation::Millis;
use runtime::Clock;

/// `performance.now()`, falling back to `Date.now()` when the Performance API
/// is unavailable. Only differences between readings matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Millis {
        let ms = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now);
        Millis::from_f64(ms)
    }
}
