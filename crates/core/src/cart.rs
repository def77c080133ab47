//! The cart aggregator.
//!
//! A [`Cart`] collects menu items from a single canteen while the customer
//! browses its menu. Lines are keyed by item name and keep the order in
//! which items were first added.

use core::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::checkout::LineToken;
use crate::types::{CanteenId, Price};

/// One item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    name: String,
    price: Price,
    quantity: NonZeroU32,
}

impl CartLine {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured when the item was first added.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity())
    }
}

/// What the menu page shows under the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSummary {
    /// Nothing added yet; checkout is disabled.
    Empty,
    /// At least one item in the cart.
    Items {
        /// Sum of all quantities.
        item_count: u32,
        /// Sum of price times quantity over all lines.
        total: Price,
    },
}

impl CartSummary {
    /// Whether checkout should be offered.
    #[must_use]
    pub const fn can_checkout(&self) -> bool {
        matches!(self, Self::Items { .. })
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("No items added yet."),
            Self::Items { item_count, total } => {
                write!(f, "{item_count} item(s) in cart. Total: {total}")
            }
        }
    }
}

/// The flattened cart as posted to checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSubmission {
    /// Display name of the canteen the cart was filled at.
    pub canteen_name: String,
    /// One token per unit of quantity.
    pub items: Vec<LineToken>,
}

/// Items selected at one canteen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    canteen_id: CanteenId,
    canteen_name: String,
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart for the given canteen.
    #[must_use]
    pub fn new(canteen_id: CanteenId, canteen_name: impl Into<String>) -> Self {
        Self {
            canteen_id,
            canteen_name: canteen_name.into(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub const fn canteen_id(&self) -> CanteenId {
        self.canteen_id
    }

    #[must_use]
    pub fn canteen_name(&self) -> &str {
        &self.canteen_name
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current quantity of `name`, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, name: &str) -> u32 {
        let name = name.trim();
        self.lines
            .iter()
            .find(|line| line.name == name)
            .map_or(0, CartLine::quantity)
    }

    /// Add one unit of `name` and return its new quantity.
    ///
    /// `price` is only used when the item is not in the cart yet; an existing
    /// line keeps the price it was added with.
    pub fn add(&mut self, name: &str, price: Price) -> u32 {
        let name = name.trim();
        if let Some(line) = self.lines.iter_mut().find(|line| line.name == name) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity.get();
        }

        self.lines.push(CartLine {
            name: name.to_owned(),
            price,
            quantity: NonZeroU32::MIN,
        });
        1
    }

    /// Remove one unit of `name` and return what is left of it.
    ///
    /// The line disappears when its quantity reaches zero. Removing an item
    /// that is not in the cart does nothing.
    pub fn remove(&mut self, name: &str) -> u32 {
        let name = name.trim();
        let Some(index) = self.lines.iter().position(|line| line.name == name) else {
            return 0;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return 0;
        };
        if let Some(quantity) = NonZeroU32::new(line.quantity.get() - 1) {
            line.quantity = quantity;
            return quantity.get();
        }

        self.lines.remove(index);
        0
    }

    /// Total item count and price.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        if self.lines.is_empty() {
            return CartSummary::Empty;
        }
        CartSummary::Items {
            item_count: self.lines.iter().map(CartLine::quantity).sum(),
            total: self.lines.iter().map(CartLine::line_total).sum(),
        }
    }

    /// Flatten into one token per unit, in line order.
    #[must_use]
    pub fn serialize(&self) -> CartSubmission {
        let items = self
            .lines
            .iter()
            .flat_map(|line| {
                let token = LineToken::new(&line.name, line.price);
                std::iter::repeat_n(token, line.quantity() as usize)
            })
            .collect();

        CartSubmission {
            canteen_name: self.canteen_name.clone(),
            items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::checkout::Checkout;

    fn cart() -> Cart {
        Cart::new(CanteenId::new(1), "SJT Canteen")
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = cart();
        assert_eq!(cart.add("Veg Fried Rice", Price::from(120)), 1);
        assert_eq!(cart.add("Veg Fried Rice", Price::from(120)), 2);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_price_is_fixed_at_first_add() {
        let mut cart = cart();
        cart.add("Brownie", Price::from(90));
        cart.add("Brownie", Price::from(1));
        assert_eq!(cart.lines()[0].price(), Price::from(90));
    }

    #[test]
    fn test_remove_deletes_line_at_zero() {
        let mut cart = cart();
        cart.add("Brownie", Price::from(90));
        cart.add("Brownie", Price::from(90));
        assert_eq!(cart.remove("Brownie"), 1);
        assert_eq!(cart.remove("Brownie"), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.remove("Brownie"), 0);
        assert_eq!(cart.remove("Never Added"), 0);
    }

    #[test]
    fn test_summary_example() {
        let mut cart = cart();
        cart.add("Veg Fried Rice", Price::from(120));
        cart.add("Veg Fried Rice", Price::from(120));
        cart.add("Gobi Manchurian", Price::from(110));

        let summary = cart.summary();
        assert_eq!(
            summary,
            CartSummary::Items {
                item_count: 3,
                total: Price::from(350)
            }
        );
        assert_eq!(summary.to_string(), "3 item(s) in cart. Total: ₹350.00");
        assert!(summary.can_checkout());
    }

    #[test]
    fn test_empty_summary_disables_checkout() {
        let summary = cart().summary();
        assert_eq!(summary, CartSummary::Empty);
        assert_eq!(summary.to_string(), "No items added yet.");
        assert!(!summary.can_checkout());
    }

    #[test]
    fn test_summary_matches_lines_after_mixed_actions() {
        let menu = [
            ("Idli Sambar", Price::from(40)),
            ("Masala Dosa", Price::from(60)),
            ("Filter Coffee", Price::parse("15.5").unwrap()),
        ];
        let mut cart = cart();
        // Deterministic pseudo-random walk over add/remove actions.
        let mut seed: u32 = 7;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let (name, price) = menu[(seed >> 8) as usize % menu.len()];
            if (seed >> 4) % 3 == 0 {
                cart.remove(name);
            } else {
                cart.add(name, price);
            }

            let expected_count: u32 = menu.iter().map(|(n, _)| cart.quantity_of(n)).sum();
            let expected_total: Price = menu
                .iter()
                .map(|(n, p)| p.times(cart.quantity_of(n)))
                .sum();
            match cart.summary() {
                CartSummary::Empty => assert_eq!(expected_count, 0),
                CartSummary::Items { item_count, total } => {
                    assert_eq!(item_count, expected_count);
                    assert_eq!(total, expected_total);
                }
            }
            assert!(cart.lines().iter().all(|line| line.quantity() > 0));
        }
    }

    #[test]
    fn test_serialize_repeats_per_unit() {
        let mut cart = cart();
        for _ in 0..3 {
            cart.add("Chicken Puff", Price::from(50));
        }
        cart.add("Black Forest Pastry", Price::from(80));

        let submission = cart.serialize();
        assert_eq!(submission.canteen_name, "SJT Canteen");
        let wire: Vec<String> = submission.items.iter().map(ToString::to_string).collect();
        assert_eq!(
            wire,
            [
                "Chicken Puff|50",
                "Chicken Puff|50",
                "Chicken Puff|50",
                "Black Forest Pastry|80"
            ]
        );
    }

    #[test]
    fn test_serialize_then_aggregate_round_trips() {
        let mut cart = cart();
        for _ in 0..4 {
            cart.add("Pav Bhaji", Price::from(100));
        }
        cart.add("Tea | Large", Price::parse("25.50").unwrap());
        cart.add("Tea | Large", Price::parse("25.50").unwrap());

        let submission = cart.serialize();
        let wire: Vec<String> = submission.items.iter().map(ToString::to_string).collect();
        let checkout = Checkout::aggregate(Some(submission.canteen_name.as_str()), &wire).unwrap();

        assert_eq!(checkout.lines().len(), cart.lines().len());
        for (line, expected) in checkout.lines().iter().zip(cart.lines()) {
            assert_eq!(line.name(), expected.name());
            assert_eq!(line.price(), expected.price());
            assert_eq!(line.quantity(), expected.quantity());
        }
        assert_eq!(checkout.label(), "SJT Canteen");
    }

    #[test]
    fn test_cart_survives_session_serialization() {
        let mut cart = cart();
        cart.add("Cold Coffee", Price::from(100));
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);

        let zero_quantity = json.replace("\"quantity\":1", "\"quantity\":0");
        assert!(serde_json::from_str::<Cart>(&zero_quantity).is_err());
    }
}
