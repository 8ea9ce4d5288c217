use catalog::{DEFAULT_GRID_TARGET, SearchMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed storefront config: {0}")]
    Malformed(String),
}

/// Page-level settings, passed to `init` as JSON. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Grid container used when `mount_products` gets no target.
    pub grid_target: String,
    /// `None` leaves the mode already chosen through `initSearch`.
    pub search_mode: Option<SearchMode>,
    pub currency_symbol: String,
    /// Quiet period before a typed query runs.
    pub debounce_ms: u64,
    /// Delay between showing results and scrolling them into view.
    pub scroll_delay_ms: u64,
    /// How long a toast stays visible.
    pub toast_ms: u64,
    /// `EnvFilter` directive for the console logger.
    pub log_level: String,
    pub elements: ElementIds,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            grid_target: DEFAULT_GRID_TARGET.to_string(),
            search_mode: None,
            currency_symbol: "₹".to_string(),
            debounce_ms: 300,
            scroll_delay_ms: 100,
            toast_ms: 2200,
            log_level: "info".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl StorefrontConfig {
    /// Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}

/// Element ids and selectors the DOM adapter looks up. Missing elements are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub toast: String,
    pub overlay: String,
    pub cart_items: String,
    pub cart_count: String,
    pub cart_total: String,
    pub panel_total: String,
    pub wishlist_items: String,
    pub wishlist_count: String,
    pub results_section: String,
    pub results_count: String,
    /// CSS selectors, not ids.
    pub search_input: String,
    pub search_button: String,
    /// Class carried by every side panel.
    pub side_panel_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            toast: "toast".to_string(),
            overlay: "overlay".to_string(),
            cart_items: "cart-items".to_string(),
            cart_count: "cart-count".to_string(),
            cart_total: "cart-total".to_string(),
            panel_total: "panel-total".to_string(),
            wishlist_items: "wishlist-items".to_string(),
            wishlist_count: "wishlist-count".to_string(),
            results_section: "shop".to_string(),
            results_count: "search-results-count".to_string(),
            search_input: r#".search input[type="search"]"#.to_string(),
            search_button: ".search button".to_string(),
            side_panel_class: "side-panel".to_string(),
        }
    }
}
