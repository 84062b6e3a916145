//! Order model: lines, payment status, committed order records.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use shopledger_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId, SupplierId, UserId};

/// Raw order line as submitted by a caller, before validation.
///
/// `unit_price` is signed here so a negative price can be *rejected* rather
/// than silently wrapped; committed lines carry an unsigned price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: i64,
}

/// A validated order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

impl OrderLine {
    pub fn from_input(input: &LineInput) -> DomainResult<Self> {
        if input.quantity <= 0 {
            return Err(DomainError::invalid_line(format!(
                "quantity must be positive (got {})",
                input.quantity
            )));
        }
        if input.unit_price < 0 {
            return Err(DomainError::invalid_line(format!(
                "unit_price cannot be negative (got {})",
                input.unit_price
            )));
        }
        Ok(Self {
            product_id: input.product_id,
            quantity: input.quantity,
            unit_price: input.unit_price as u64,
        })
    }

    pub fn line_total(&self) -> u64 {
        self.quantity as u64 * self.unit_price
    }
}

/// Validate a submitted line list into committed-order shape.
///
/// Fails `EmptyOrder` on an empty list and `InvalidLine` on the first bad
/// line; nothing is partially accepted.
pub fn validate_lines(inputs: &[LineInput]) -> DomainResult<Vec<OrderLine>> {
    if inputs.is_empty() {
        return Err(DomainError::EmptyOrder);
    }
    inputs.iter().map(OrderLine::from_input).collect()
}

/// Sum of line totals, in smallest currency unit.
pub fn total_amount(lines: &[OrderLine]) -> u64 {
    lines.iter().map(OrderLine::line_total).sum()
}

/// Payment status of a committed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(DomainError::validation(format!(
                "unknown payment status '{other}' (expected unpaid or paid)"
            ))),
        }
    }
}

/// Sales order channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Normal,
    Livestream,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Normal => "normal",
            OrderType::Livestream => "livestream",
        }
    }
}

impl core::fmt::Display for OrderType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(OrderType::Normal),
            "livestream" => Ok(OrderType::Livestream),
            other => Err(DomainError::validation(format!(
                "unknown order type '{other}' (expected normal or livestream)"
            ))),
        }
    }
}

/// A committed purchase order.
///
/// Immutable once committed except for `payment_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: OrderId,
    pub supplier_id: SupplierId,
    pub date: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    /// Σ(quantity × unit_price), in smallest currency unit.
    pub total_amount: u64,
    pub payment_status: PaymentStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// A committed sales order. `customer_id = None` means a walk-in sale.
///
/// Immutable once committed except for `payment_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: OrderId,
    pub customer_id: Option<CustomerId>,
    pub date: DateTime<Utc>,
    pub order_type: OrderType,
    pub lines: Vec<OrderLine>,
    /// Σ(quantity × unit_price), in smallest currency unit.
    pub total_amount: u64,
    pub payment_status: PaymentStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Filter for order listings. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderFilter {
    pub fn matches(&self, date: DateTime<Utc>, payment_status: PaymentStatus) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        if let Some(status) = self.payment_status {
            if payment_status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(quantity: i64, unit_price: i64) -> LineInput {
        LineInput {
            product_id: ProductId::new(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn validate_lines_rejects_empty_order() {
        let err = validate_lines(&[]).unwrap_err();
        assert!(matches!(err, DomainError::EmptyOrder));
    }

    #[test]
    fn validate_lines_rejects_non_positive_quantity() {
        for quantity in [0, -1] {
            let err = validate_lines(&[line(quantity, 100)]).unwrap_err();
            assert!(matches!(err, DomainError::InvalidLine { .. }));
        }
    }

    #[test]
    fn validate_lines_rejects_negative_price() {
        let err = validate_lines(&[line(1, -5)]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidLine { .. }));
    }

    #[test]
    fn zero_price_lines_are_valid() {
        let lines = validate_lines(&[line(2, 0)]).unwrap();
        assert_eq!(total_amount(&lines), 0);
    }

    #[test]
    fn total_amount_sums_line_totals() {
        let lines = validate_lines(&[line(10, 1000), line(5, 2000)]).unwrap();
        assert_eq!(total_amount(&lines), 20_000);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let at = Utc::now();
        let filter = OrderFilter {
            from: Some(at),
            to: Some(at),
            payment_status: None,
        };
        assert!(filter.matches(at, PaymentStatus::Unpaid));
        assert!(!filter.matches(at - chrono::Duration::seconds(1), PaymentStatus::Unpaid));
        assert!(!filter.matches(at + chrono::Duration::seconds(1), PaymentStatus::Unpaid));
    }

    #[test]
    fn filter_on_payment_status() {
        let filter = OrderFilter {
            payment_status: Some(PaymentStatus::Paid),
            ..OrderFilter::default()
        };
        assert!(filter.matches(Utc::now(), PaymentStatus::Paid));
        assert!(!filter.matches(Utc::now(), PaymentStatus::Unpaid));
    }

    #[test]
    fn parse_payment_status_and_order_type() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!("livestream".parse::<OrderType>().unwrap(), OrderType::Livestream);
        assert!("partial".parse::<PaymentStatus>().is_err());
        assert!("tiktok".parse::<OrderType>().is_err());
    }

    proptest! {
        /// Property: total_amount always equals the sum of quantity × unit_price.
        #[test]
        fn total_amount_matches_line_arithmetic(
            raw in proptest::collection::vec((1i64..10_000, 0i64..1_000_000), 1..20)
        ) {
            let inputs: Vec<LineInput> =
                raw.iter().map(|&(quantity, unit_price)| line(quantity, unit_price)).collect();
            let lines = validate_lines(&inputs).unwrap();
            let expected: u64 = raw
                .iter()
                .map(|&(quantity, unit_price)| quantity as u64 * unit_price as u64)
                .sum();
            prop_assert_eq!(total_amount(&lines), expected);
        }

        /// Property: any line with non-positive quantity or negative price is rejected.
        #[test]
        fn bad_lines_never_validate(quantity in -100i64..=0, unit_price in -100i64..100) {
            let result = validate_lines(&[line(quantity, unit_price)]);
            prop_assert!(result.is_err());
        }
    }
}
