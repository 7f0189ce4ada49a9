//! Cart

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{
    catalog::{Product, SizeLabel},
    money::Reais,
    pricing::{TotalPriceError, line_total, total_price},
};

/// One product and size in the cart, with the unit price captured when it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Arc<Product>,
    size: SizeLabel,
    quantity: u32,
    unit_price: Reais,
}

impl CartLine {
    /// Creates a line with quantity 1, capturing the product's current price for `size`.
    #[must_use]
    pub fn new(product: Arc<Product>, size: SizeLabel) -> Self {
        let unit_price = product.price(size);

        Self {
            product,
            size,
            quantity: 1,
            unit_price,
        }
    }

    /// The product on this line.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Selected size.
    #[must_use]
    pub fn size(&self) -> SizeLabel {
        self.size
    }

    /// Number of pizzas on this line (always at least 1).
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured at insertion time.
    #[must_use]
    pub fn unit_price(&self) -> Reais {
        self.unit_price
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the amount does not fit.
    pub fn total(&self) -> Result<Reais, TotalPriceError> {
        line_total(self.unit_price, self.quantity)
    }

    fn matches(&self, product: &Product, size: SizeLabel) -> bool {
        self.product.id == product.id && self.size == size
    }
}

/// Confirmation returned when a selection is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAdded {
    /// Product name
    pub name: String,

    /// Selected size
    pub size: SizeLabel,

    /// Quantity on the line after the addition
    pub quantity: u32,
}

impl Display for SelectionAdded {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) foi adicionada ao carrinho.", self.name, self.size)
    }
}

/// Selections for the active session, at most one line per product and size.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` in `size`.
    ///
    /// An existing line for the same product and size has its quantity
    /// incremented; otherwise a new line is appended with the current price.
    pub fn add_selection(&mut self, product: &Arc<Product>, size: SizeLabel) -> SelectionAdded {
        let quantity = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product, size))
        {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine::new(Arc::clone(product), size));
            1
        };

        SelectionAdded {
            name: product.name.clone(),
            size,
            quantity,
        }
    }

    /// Remove the line at `index`. Out of range indexes leave the cart untouched.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Sum of unit price × quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the amount does not fit.
    pub fn subtotal(&self) -> Result<Reais, TotalPriceError> {
        total_price(&self.lines)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line from the cart.
    #[must_use]
    pub fn get_line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of pizzas across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::{Catalog, ProductId, SizePrices},
        money::from_cents,
    };

    use super::*;

    fn pizza(id: &str, cents: i64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            name: format!("Pizza {id}"),
            description: String::new(),
            ingredients: Vec::new(),
            prices: SizePrices::new([
                from_cents(cents),
                from_cents(cents + 1000),
                from_cents(cents + 2000),
                from_cents(cents + 3000),
                from_cents(cents + 4000),
            ]),
        })
    }

    #[test]
    fn repeated_selection_increments_quantity() {
        let product = pizza("a", 2800);
        let mut cart = Cart::new();

        cart.add_selection(&product, SizeLabel::M);
        cart.add_selection(&product, SizeLabel::M);
        let added = cart.add_selection(&product, SizeLabel::M);

        assert_eq!(cart.len(), 1);
        assert_eq!(added.quantity, 3);
        assert_eq!(cart.get_line(0).map(CartLine::quantity), Some(3));
    }

    #[test]
    fn one_line_per_distinct_product_and_size() {
        let a = pizza("a", 2800);
        let b = pizza("b", 3200);
        let mut cart = Cart::new();

        let selections = [
            (&a, SizeLabel::M),
            (&b, SizeLabel::G),
            (&a, SizeLabel::G),
            (&a, SizeLabel::M),
            (&b, SizeLabel::G),
            (&a, SizeLabel::M),
        ];

        for (product, size) in selections {
            cart.add_selection(product, size);
        }

        let lines: Vec<(&str, SizeLabel, u32)> = cart
            .lines()
            .iter()
            .map(|line| (line.product().id.as_str(), line.size(), line.quantity()))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("a", SizeLabel::M, 3),
                ("b", SizeLabel::G, 2),
                ("a", SizeLabel::G, 1),
            ]
        );
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn unit_price_is_captured_at_insertion() {
        let product = pizza("a", 2800);
        let mut cart = Cart::new();

        cart.add_selection(&product, SizeLabel::P);

        let mut repriced = (*product).clone();
        repriced.prices = SizePrices::new([from_cents(9900); 5]);
        let repriced = Arc::new(repriced);

        cart.add_selection(&repriced, SizeLabel::P);

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.get_line(0).map(CartLine::unit_price),
            Some(from_cents(2800))
        );
    }

    #[test]
    fn confirmation_names_product_and_size() {
        let product = pizza("a", 2800);
        let mut cart = Cart::new();

        let added = cart.add_selection(&product, SizeLabel::ExGG);

        assert_eq!(added.to_string(), "Pizza a (EX GG) foi adicionada ao carrinho.");
    }

    #[test]
    fn remove_line_out_of_range_is_noop() {
        let product = pizza("a", 2800);
        let mut cart = Cart::new();
        cart.add_selection(&product, SizeLabel::P);

        assert!(cart.remove_line(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_line_removes_by_position() {
        let a = pizza("a", 2800);
        let b = pizza("b", 3200);
        let mut cart = Cart::new();
        cart.add_selection(&a, SizeLabel::P);
        cart.add_selection(&b, SizeLabel::P);

        let removed = cart.remove_line(0);

        assert_eq!(removed.map(|line| line.product().id.clone()), Some(ProductId::new("a")));
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.get_line(0).map(|line| line.product().id.clone()),
            Some(ProductId::new("b"))
        );
    }

    #[test]
    fn subtotal_sums_unit_price_times_quantity() -> TestResult {
        let catalog = Catalog::house_menu()?;
        let tucuma = catalog.get("1").ok_or("missing product 1")?;
        let tambaqui = catalog.get("2").ok_or("missing product 2")?;
        let mut cart = Cart::new();

        cart.add_selection(tucuma, SizeLabel::M);
        cart.add_selection(tucuma, SizeLabel::M);
        cart.add_selection(tambaqui, SizeLabel::G);

        assert_eq!(cart.subtotal()?, from_cents(12_800));

        Ok(())
    }

    #[test]
    fn subtotal_is_independent_of_removal_order() -> TestResult {
        let a = pizza("a", 2800);
        let b = pizza("b", 3200);
        let c = pizza("c", 4100);

        let build = || {
            let mut cart = Cart::new();
            cart.add_selection(&a, SizeLabel::P);
            cart.add_selection(&b, SizeLabel::M);
            cart.add_selection(&c, SizeLabel::G);
            cart.add_selection(&b, SizeLabel::M);
            cart
        };

        let mut first = build();
        first.remove_line(0);
        first.remove_line(1);

        let mut second = build();
        second.remove_line(2);
        second.remove_line(0);

        assert_eq!(first.subtotal()?, second.subtotal()?);
        assert_eq!(first.subtotal()?, from_cents(2 * 4200));

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let product = pizza("a", 2800);
        let mut cart = Cart::new();
        cart.add_selection(&product, SizeLabel::P);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal()?, from_cents(0));

        Ok(())
    }
}
