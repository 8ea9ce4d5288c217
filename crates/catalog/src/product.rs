use foundation::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// A mounted, normalized product. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    pub meta: String,
}

/// Product as the page supplies it.
///
/// Everything except `name` and `price` may be missing; `grams` is an older
/// spelling of `meta` still used by some catalogs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub price: PriceInput,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub grams: Option<String>,
}

/// Prices are usually JSON numbers but hand-written catalogs sometimes quote them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    fn to_money(&self) -> Option<Money> {
        match self {
            PriceInput::Number(n) => Money::from_decimal(*n),
            PriceInput::Text(s) => Money::from_decimal(s.trim().parse().ok()?),
        }
    }
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price: PriceInput::Number(price),
            image: None,
            category: None,
            meta: None,
            grams: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(ProductId::new(id));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Normalizes one entry; `index` is its 0-based position in the supplied list.
    fn normalize(self, index: usize) -> Result<Product, CatalogError> {
        let price = self.price.to_money().ok_or_else(|| CatalogError::InvalidPrice {
            index,
            name: self.name.clone(),
        })?;
        Ok(Product {
            id: self.id.unwrap_or(ProductId::new(index as u64 + 1)),
            name: self.name,
            price,
            image: self.image.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            meta: self.meta.or(self.grams).unwrap_or_default(),
        })
    }
}

/// Assigns missing ids by position (1-based) and defaults optional text fields.
pub fn normalize_products(inputs: Vec<ProductInput>) -> Result<Vec<Product>, CatalogError> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.normalize(index))
        .collect()
}

/// Parses a JSON array of products and normalizes it.
pub fn parse_products(json: &str) -> Result<Vec<Product>, CatalogError> {
    let inputs: Vec<ProductInput> =
        serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
    normalize_products(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assigns_positional_ids_only_when_missing() {
        let products = normalize_products(vec![
            ProductInput::new("Kettle", 10.0),
            ProductInput::new("Toaster", 20.0).with_id(40),
            ProductInput::new("Mug", 3.0),
        ])
        .unwrap();
        let ids: Vec<u64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 40, 3]);
    }

    #[test]
    fn defaults_optional_text_fields() {
        let products = parse_products(r#"[{"name": "Tea", "price": 4.5}]"#).unwrap();
        assert_eq!(
            products[0],
            Product {
                id: ProductId::new(1),
                name: "Tea".to_string(),
                price: Money::from_minor(450),
                image: String::new(),
                category: String::new(),
                meta: String::new(),
            }
        );
    }

    #[test]
    fn grams_fills_missing_meta() {
        let products = parse_products(
            r#"[
                {"name": "Rice", "price": 2, "grams": "500g"},
                {"name": "Oats", "price": 3, "meta": "1kg", "grams": "ignored"},
                {"name": "Salt", "price": 1, "meta": null}
            ]"#,
        )
        .unwrap();
        let metas: Vec<&str> = products.iter().map(|p| p.meta.as_str()).collect();
        assert_eq!(metas, vec!["500g", "1kg", ""]);
    }

    #[test]
    fn accepts_quoted_prices() {
        let products = parse_products(r#"[{"name": "Pen", "price": " 1.25 "}]"#).unwrap();
        assert_eq!(products[0].price, Money::from_minor(125));
    }

    #[test]
    fn rejects_negative_price_with_position() {
        let err = normalize_products(vec![
            ProductInput::new("Ok", 1.0),
            ProductInput::new("Refund", -5.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidPrice {
                index: 1,
                name: "Refund".to_string()
            }
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_products(r#"{"name": "not a list"}"#),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            parse_products(r#"[{"price": 1}]"#),
            Err(CatalogError::Malformed(_))
        ));
    }
}
