//! Order placement.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised when placing an order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Please select a payment method.")]
    MissingPaymentMethod,
}

/// A payment method offered on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay the deliverer in cash.
    #[serde(rename = "cod")]
    CashOnDelivery,
    Upi,
    Card,
}

impl PaymentMethod {
    /// Every offered method, in the order the checkout page lists them.
    pub const ALL: [Self; 3] = [Self::CashOnDelivery, Self::Upi, Self::Card];

    /// Look up an offered method by form value, ignoring case.
    #[must_use]
    pub fn find(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::Upi => "upi",
            Self::Card => "card",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Upi => "UPI",
            Self::Card => "Credit / Debit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payment method submitted with an order.
///
/// Any non-blank value is accepted. Values matching one of the offered
/// methods also resolve to a [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSelection {
    value: String,
    method: Option<PaymentMethod>,
}

impl PaymentSelection {
    /// Read the submitted form value.
    ///
    /// # Errors
    ///
    /// [`OrderError::MissingPaymentMethod`] when absent or blank.
    pub fn parse(value: Option<&str>) -> Result<Self, OrderError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(OrderError::MissingPaymentMethod)?;
        Ok(Self {
            value: value.to_owned(),
            method: PaymentMethod::find(value),
        })
    }

    /// The trimmed value as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The offered method this value names, if any.
    #[must_use]
    pub const fn method(&self) -> Option<PaymentMethod> {
        self.method
    }
}

impl fmt::Display for PaymentSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offered_methods_resolve() {
        let selection = PaymentSelection::parse(Some("cod")).unwrap();
        assert_eq!(selection.method(), Some(PaymentMethod::CashOnDelivery));

        let selection = PaymentSelection::parse(Some(" UPI ")).unwrap();
        assert_eq!(selection.as_str(), "UPI");
        assert_eq!(selection.method(), Some(PaymentMethod::Upi));

        assert_eq!(PaymentMethod::find("card"), Some(PaymentMethod::Card));
    }

    #[test]
    fn test_missing_method() {
        assert_eq!(
            PaymentSelection::parse(None),
            Err(OrderError::MissingPaymentMethod)
        );
        assert_eq!(
            PaymentSelection::parse(Some("  ")),
            Err(OrderError::MissingPaymentMethod)
        );
        assert_eq!(
            OrderError::MissingPaymentMethod.to_string(),
            "Please select a payment method."
        );
    }

    #[test]
    fn test_other_values_are_kept_as_submitted() {
        let selection = PaymentSelection::parse(Some(" Wallet ")).unwrap();
        assert_eq!(selection.as_str(), "Wallet");
        assert_eq!(selection.to_string(), "Wallet");
        assert_eq!(selection.method(), None);
    }

    #[test]
    fn test_serde_uses_form_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cod\""
        );
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }
}
