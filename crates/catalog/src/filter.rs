use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CatalogError, Product};

/// Which product set a search runs over.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The products mounted into the current grid.
    #[default]
    Category,
    /// The separately supplied full catalog.
    Global,
}

impl FromStr for SearchMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "" => Ok(SearchMode::Category),
            "global" => Ok(SearchMode::Global),
            other => Err(CatalogError::UnknownSearchMode(other.to_string())),
        }
    }
}

/// A trimmed, lower-cased, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` for empty or whitespace-only input, which means "clear the filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            None
        } else {
            Some(SearchQuery(term.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring match against name, category and meta, ignoring case.
    pub fn matches(&self, product: &Product) -> bool {
        [&product.name, &product.category, &product.meta]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }

    pub fn filter<'a>(&self, universe: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        universe
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Text shown in the results banner after a search.
pub fn result_count_message(count: usize) -> String {
    match count {
        0 => "No products found".to_string(),
        1 => "1 product found".to_string(),
        n => format!("{n} products found"),
    }
}
