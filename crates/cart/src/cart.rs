use catalog::Product;
use foundation::{Money, ProductId};
use serde::Serialize;

/// A product snapshot plus its quantity. `qty` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub qty: u32,
}

impl CartLine {
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn subtotal(&self) -> Money {
        self.product.price.times(self.qty)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line for the id; nothing changed.
    Missing,
    Updated { qty: u32 },
    Removed,
}

/// Cart lines in the order they were first added.
///
/// Ordering contract: at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product` and returns the line's new quantity.
    ///
    /// A new line snapshots the product; an existing line keeps its snapshot.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id() == product.id) {
            line.qty = line.qty.saturating_add(1);
            return line.qty;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            qty: 1,
        });
        1
    }

    /// Applies a signed delta. A resulting quantity of zero or less removes the line.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
        let Some(idx) = self.lines.iter().position(|l| l.id() == id) else {
            return QuantityChange::Missing;
        };
        let next = i64::from(self.lines[idx].qty).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(idx);
            QuantityChange::Removed
        } else {
            let qty = u32::try_from(next).unwrap_or(u32::MAX);
            self.lines[idx].qty = qty;
            QuantityChange::Updated { qty }
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.qty)).sum()
    }

    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ProductInput, normalize_products};
    use pretty_assertions::assert_eq;

    fn products() -> Vec<Product> {
        normalize_products(vec![
            ProductInput::new("Lamp", 19.99),
            ProductInput::new("Bulb", 2.5),
            ProductInput::new("Shade", 7.25),
        ])
        .unwrap()
    }

    fn quantities(cart: &Cart) -> Vec<(u64, u32)> {
        cart.lines().iter().map(|l| (l.id().get(), l.qty)).collect()
    }

    #[test]
    fn adding_twice_increments_one_line() {
        let p = products();
        let mut cart = Cart::new();
        assert_eq!(cart.add(&p[0]), 1);
        assert_eq!(cart.add(&p[0]), 2);
        assert_eq!(quantities(&cart), vec![(1, 2)]);
    }

    #[test]
    fn delta_covering_full_quantity_removes_line() {
        let p = products();
        let mut cart = Cart::new();
        cart.add(&p[0]);
        cart.add(&p[0]);
        cart.add(&p[1]);

        assert_eq!(
            cart.update_quantity(p[0].id, -1),
            QuantityChange::Updated { qty: 1 }
        );
        assert_eq!(cart.update_quantity(p[0].id, -5), QuantityChange::Removed);
        assert_eq!(quantities(&cart), vec![(2, 1)]);
    }

    #[test]
    fn unknown_line_is_untouched() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.update_quantity(ProductId::new(3), 1),
            QuantityChange::Missing
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn positive_delta_grows_line() {
        let p = products();
        let mut cart = Cart::new();
        cart.add(&p[2]);
        assert_eq!(
            cart.update_quantity(p[2].id, 4),
            QuantityChange::Updated { qty: 5 }
        );
    }

    #[test]
    fn totals_track_every_mutation() {
        let p = products();
        let mut cart = Cart::new();
        let check = |cart: &Cart| {
            let qty: u64 = cart.lines().iter().map(|l| u64::from(l.qty)).sum();
            let price: u64 = cart
                .lines()
                .iter()
                .map(|l| l.product.price.minor() * u64::from(l.qty))
                .sum();
            assert_eq!(cart.total_quantity(), qty);
            assert_eq!(cart.total_price(), Money::from_minor(price));
        };

        cart.add(&p[0]);
        check(&cart);
        cart.add(&p[1]);
        cart.add(&p[1]);
        check(&cart);
        assert_eq!(cart.total_price(), Money::from_minor(1999 + 500));
        cart.update_quantity(p[1].id, 3);
        check(&cart);
        cart.update_quantity(p[0].id, -1);
        check(&cart);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_price(), Money::from_minor(1250));
    }

    #[test]
    fn line_keeps_snapshot_taken_when_added() {
        let mut p = products();
        let mut cart = Cart::new();
        cart.add(&p[0]);
        p[0].name = "Renamed".to_string();
        cart.add(&p[0]);
        assert_eq!(cart.lines()[0].product.name, "Lamp");
    }
}
