use catalog::Product;
use foundation::ProductId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Saved products, unique per id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the product if present, otherwise saves a snapshot of it.
    pub fn toggle(&mut self, product: &Product) -> Toggle {
        if let Some(idx) = self.entries.iter().position(|e| e.id == product.id) {
            self.entries.remove(idx);
            Toggle::Removed
        } else {
            self.entries.push(product.clone());
            Toggle::Added
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
