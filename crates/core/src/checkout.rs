//! Checkout wire tokens and server-side re-aggregation.
//!
//! The menu page submits a cart as one `name|price` token per unit of
//! quantity. [`Checkout::aggregate`] folds those tokens back into lines with
//! quantities, in order of first appearance.

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use crate::types::{Price, PriceError};

/// Label used when the submission does not name a canteen.
pub const DEFAULT_CHECKOUT_LABEL: &str = "Your";

/// Separator between item name and price in a wire token.
const TOKEN_DELIMITER: char = '|';

/// Errors parsing a single checkout token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No `|` in the token.
    #[error("malformed item {0:?}: expected name|price")]
    MissingDelimiter(String),
    /// Blank item name.
    #[error("malformed item {0:?}: empty name")]
    EmptyName(String),
    /// Price part is not a non-negative decimal.
    #[error("malformed item {token:?}: {source}")]
    InvalidPrice {
        token: String,
        #[source]
        source: PriceError,
    },
}

/// Errors building a [`Checkout`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Merged quantity of one item does not fit in a `u32`.
    #[error("quantity of {0:?} is too large")]
    QuantityOverflow(String),
    /// Item count or an amount overflowed.
    #[error("order total is too large")]
    TotalOverflow,
}

/// One unit of a cart line on the wire: `name|price`.
///
/// Parsing splits on the last `|`, so item names may themselves contain the
/// delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineToken {
    name: String,
    price: Price,
}

impl LineToken {
    #[must_use]
    pub fn new(name: &str, price: Price) -> Self {
        Self {
            name: name.trim().to_owned(),
            price,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }
}

impl fmt::Display for LineToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TOKEN_DELIMITER}{}",
            self.name,
            self.price.to_plain_string()
        )
    }
}

impl FromStr for LineToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, price) = s
            .rsplit_once(TOKEN_DELIMITER)
            .ok_or_else(|| TokenError::MissingDelimiter(s.to_owned()))?;
        if name.trim().is_empty() {
            return Err(TokenError::EmptyName(s.to_owned()));
        }
        let price = Price::parse(price).map_err(|source| TokenError::InvalidPrice {
            token: s.to_owned(),
            source,
        })?;
        Ok(Self::new(name, price))
    }
}

/// An aggregated checkout line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    name: String,
    price: Price,
    quantity: u32,
    line_total: Price,
}

impl CheckoutLine {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price from the first occurrence of the item.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.line_total
    }
}

/// The checkout page model: aggregated lines plus the originating label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    label: String,
    lines: Vec<CheckoutLine>,
    index: HashMap<String, usize>,
    item_count: u32,
    subtotal: Price,
}

impl Checkout {
    /// An empty checkout. A blank or missing label becomes
    /// [`DEFAULT_CHECKOUT_LABEL`].
    #[must_use]
    pub fn new(label: Option<&str>) -> Self {
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_CHECKOUT_LABEL);
        Self {
            label: label.to_owned(),
            lines: Vec::new(),
            index: HashMap::new(),
            item_count: 0,
            subtotal: Price::ZERO,
        }
    }

    /// Parse and aggregate raw wire tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Token`] for the first malformed token, or an
    /// overflow error when the totals cannot be represented.
    pub fn aggregate<I, S>(label: Option<&str>, tokens: I) -> Result<Self, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checkout = Self::new(label);
        for raw in tokens {
            let token: LineToken = raw.as_ref().parse()?;
            checkout.add_units(&token.name, token.price, 1)?;
        }
        Ok(checkout)
    }

    /// Add `quantity` units of an item.
    ///
    /// The first call for a name fixes its price and its position; later
    /// calls only raise the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::QuantityOverflow`] or
    /// [`CheckoutError::TotalOverflow`] when a count or amount would not
    /// fit. The checkout is left unchanged in that case.
    pub fn add_units(
        &mut self,
        name: &str,
        price: Price,
        quantity: u32,
    ) -> Result<(), CheckoutError> {
        let name = name.trim();
        let position = self.index.get(name).copied();
        let existing = position.and_then(|position| self.lines.get(position));

        let unit_price = existing.map_or(price, CheckoutLine::price);
        let line_quantity = existing
            .map_or(Some(quantity), |line| line.quantity.checked_add(quantity))
            .ok_or_else(|| CheckoutError::QuantityOverflow(name.to_owned()))?;
        let line_total = unit_price
            .checked_times(line_quantity)
            .ok_or(CheckoutError::TotalOverflow)?;
        let item_count = self
            .item_count
            .checked_add(quantity)
            .ok_or(CheckoutError::TotalOverflow)?;
        let subtotal = unit_price
            .checked_times(quantity)
            .and_then(|added| self.subtotal.checked_add(added))
            .ok_or(CheckoutError::TotalOverflow)?;

        self.item_count = item_count;
        self.subtotal = subtotal;
        match position.and_then(|position| self.lines.get_mut(position)) {
            Some(line) => {
                line.quantity = line_quantity;
                line.line_total = line_total;
            }
            None => {
                self.index.insert(name.to_owned(), self.lines.len());
                self.lines.push(CheckoutLine {
                    name: name.to_owned(),
                    price,
                    quantity,
                    line_total,
                });
            }
        }
        Ok(())
    }

    /// Canteen display name, or [`DEFAULT_CHECKOUT_LABEL`].
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lines in order of first appearance.
    #[must_use]
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Sum of price times quantity.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }
}
