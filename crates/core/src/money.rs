//! Money and tax arithmetic.
//!
//! All amounts are decimal currency units (`rust_decimal::Decimal`). Nothing
//! here rounds stored values; rounding only happens inside the `format_*`
//! helpers, which produce display text.
//!
//! Input leniency: numeric fields arrive as raw user text. Empty or
//! non-numeric text contributes zero instead of failing, so a half-filled row
//! still renders a total. Magnitudes above [`MAX_AMOUNT`] are set aside the
//! same way, which keeps every parsed line clear of `Decimal` overflow.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::MalformedField;

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Largest accepted magnitude for a quantity, price or rate (10^9).
///
/// At this bound `quantity × price × rate` stays below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Parse a user-entered amount, degrading to zero.
pub fn parse_amount(raw: &str) -> Decimal {
    parse_amount_checked("amount", raw).unwrap_or(Decimal::ZERO)
}

/// Parse a user-entered amount, reporting non-numeric text.
///
/// Empty (or whitespace-only) input is a missing value, not a malformed one,
/// and yields `Ok(0)`. Numbers beyond [`MAX_AMOUNT`] are reported as out of
/// range.
pub fn parse_amount_checked(field: &'static str, raw: &str) -> Result<Decimal, MalformedField> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MalformedField::new(field, raw))?;
    if value.abs() > MAX_AMOUNT {
        return Err(MalformedField::out_of_range(field, raw));
    }
    Ok(value)
}

/// Numeric inputs of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineAmounts {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Percentage, e.g. `18` for 18%.
    pub tax_rate: Decimal,
}

/// Anything that can be priced as an invoice line.
pub trait Taxable {
    fn amounts(&self) -> LineAmounts;
}

impl Taxable for LineAmounts {
    fn amounts(&self) -> LineAmounts {
        *self
    }
}

impl<T: Taxable + ?Sized> Taxable for &T {
    fn amounts(&self) -> LineAmounts {
        (**self).amounts()
    }
}

/// Derived totals of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineTotals {
    /// `quantity × unit_price`
    pub subtotal: Decimal,
    /// `subtotal × tax_rate / 100`
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount`
    pub line_total: Decimal,
}

/// Derived totals of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    fn accumulate(mut self, line: LineTotals) -> Self {
        self.subtotal = self.subtotal.saturating_add(line.subtotal);
        self.total_tax = self.total_tax.saturating_add(line.tax_amount);
        self.grand_total = self.subtotal.saturating_add(self.total_tax);
        self
    }
}

/// Price a single line.
///
/// Arithmetic saturates at `Decimal::MAX` instead of panicking. Inputs that
/// went through [`parse_amount_checked`] never get that far.
pub fn line_totals(quantity: Decimal, unit_price: Decimal, tax_rate: Decimal) -> LineTotals {
    let subtotal = quantity.saturating_mul(unit_price);
    let tax_amount = subtotal.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED;
    LineTotals {
        subtotal,
        tax_amount,
        line_total: subtotal.saturating_add(tax_amount),
    }
}

/// Sum line totals over every line given. Filtering is the caller's job.
pub fn aggregate<I>(lines: I) -> InvoiceTotals
where
    I: IntoIterator,
    I::Item: Taxable,
{
    lines
        .into_iter()
        .map(|line| {
            let a = line.amounts();
            line_totals(a.quantity, a.unit_price, a.tax_rate)
        })
        .fold(InvoiceTotals::default(), InvoiceTotals::accumulate)
}

/// `₹` amount with `en-IN` grouping and 2–3 fraction digits.
///
/// Used for live row and invoice totals.
pub fn format_inr(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_grouped(amount, 2, 3))
}

/// `₹` amount with `en-IN` grouping and 0–3 fraction digits.
pub fn format_inr_compact(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_grouped(amount, 0, 3))
}

/// `₹` amount with exactly two fraction digits and no grouping.
pub fn format_inr_fixed(amount: Decimal) -> String {
    let mut fixed = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    fixed.rescale(2);
    format!("{CURRENCY_SYMBOL}{fixed}")
}

/// Tax rate as a percentage label (`18%`, `12.5%`).
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

fn format_grouped(amount: Decimal, min_frac: usize, max_frac: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(max_frac, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + 8);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));

    if !frac_part.is_empty() || min_frac > 0 {
        out.push('.');
        out.push_str(frac_part);
        for _ in frac_part.len()..min_frac {
            out.push('0');
        }
    }
    out
}

/// Indian digit grouping: the last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedReason;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn amounts(quantity: Decimal, unit_price: Decimal, tax_rate: Decimal) -> LineAmounts {
        LineAmounts {
            quantity,
            unit_price,
            tax_rate,
        }
    }

    #[test]
    fn widget_line_matches_worked_example() {
        let t = line_totals(dec!(2), dec!(100), dec!(18));
        assert_eq!(t.subtotal, dec!(200));
        assert_eq!(t.tax_amount, dec!(36));
        assert_eq!(t.line_total, dec!(236));
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let totals = aggregate(Vec::<LineAmounts>::new());
        assert_eq!(totals, InvoiceTotals::default());
        assert!(totals.grand_total.is_zero());
    }

    #[test]
    fn aggregate_sums_every_line_it_is_given() {
        let lines = vec![
            amounts(dec!(1), dec!(50), dec!(18)),
            amounts(dec!(0), dec!(0), dec!(18)),
            amounts(dec!(3), dec!(10.5), dec!(5)),
        ];
        let totals = aggregate(&lines);
        assert_eq!(totals.subtotal, dec!(81.5));
        assert_eq!(totals.total_tax, dec!(10.575));
        assert_eq!(totals.grand_total, dec!(92.075));
    }

    #[test]
    fn lenient_parsing_degrades_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount(" 2.5 "), dec!(2.5));
        assert_eq!(parse_amount("-4"), dec!(-4));
        assert_eq!(parse_amount("1e2"), dec!(100));
    }

    #[test]
    fn checked_parsing_reports_malformed_text_only() {
        assert_eq!(parse_amount_checked("quantity", ""), Ok(Decimal::ZERO));
        let err = parse_amount_checked("quantity", "2 boxes").unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(err.raw, "2 boxes");
        assert_eq!(err.reason, MalformedReason::NotANumber);
    }

    #[test]
    fn oversized_amounts_are_out_of_range() {
        assert_eq!(parse_amount_checked("quantity", "1000000000"), Ok(MAX_AMOUNT));
        assert_eq!(parse_amount_checked("quantity", "-1000000000"), Ok(-MAX_AMOUNT));

        let err = parse_amount_checked("quantity", "100000000000000000000").unwrap_err();
        assert_eq!(err.reason, MalformedReason::OutOfRange);
        assert_eq!(
            err.to_string(),
            "quantity is out of range: \"100000000000000000000\""
        );
        assert_eq!(parse_amount("1e12"), Decimal::ZERO);
    }

    #[test]
    fn largest_accepted_line_keeps_its_tax_rate() {
        let t = line_totals(MAX_AMOUNT, MAX_AMOUNT, MAX_AMOUNT);
        assert_eq!(t.subtotal, dec!(1000000000000000000));
        assert_eq!(t.tax_amount, t.subtotal * MAX_AMOUNT / Decimal::ONE_HUNDRED);
        assert_eq!(t.line_total, t.subtotal + t.tax_amount);
        assert!(t.line_total < Decimal::MAX);

        let t = line_totals(MAX_AMOUNT, MAX_AMOUNT, dec!(18));
        assert_eq!(t.tax_amount, dec!(180000000000000000));
    }

    #[test]
    fn formats_with_indian_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(236)), "₹236.00");
        assert_eq!(format_inr(dec!(1234567.5)), "₹12,34,567.50");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_inr(dec!(10.5755)), "₹10.576");
        assert_eq!(format_inr(dec!(-1500)), "₹-1,500.00");
    }

    #[test]
    fn compact_format_drops_trailing_zeros() {
        assert_eq!(format_inr_compact(dec!(1500.00)), "₹1,500");
        assert_eq!(format_inr_compact(dec!(1500.5)), "₹1,500.5");
        assert_eq!(format_inr_compact(dec!(0)), "₹0");
    }

    #[test]
    fn fixed_format_has_two_digits_and_no_grouping() {
        assert_eq!(format_inr_fixed(dec!(36)), "₹36.00");
        assert_eq!(format_inr_fixed(dec!(1234567.125)), "₹1234567.13");
        assert_eq!(format_inr_fixed(dec!(0.5)), "₹0.50");
    }

    #[test]
    fn rate_labels_are_normalized() {
        assert_eq!(format_rate(dec!(18)), "18%");
        assert_eq!(format_rate(dec!(18.00)), "18%");
        assert_eq!(format_rate(dec!(12.5)), "12.5%");
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn positive_cents() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn rate() -> impl Strategy<Value = Decimal> {
        (0i64..10_000).prop_map(|r| Decimal::new(r, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// lineTotal = q·p·(1 + r/100) and taxAmount = lineTotal − subtotal.
        #[test]
        fn line_total_has_closed_form(q in positive_cents(), p in cents(), r in rate()) {
            let t = line_totals(q, p, r);
            let expected = q * p * (Decimal::ONE + r / Decimal::ONE_HUNDRED);
            prop_assert_eq!(t.line_total, expected);
            prop_assert_eq!(t.tax_amount, t.line_total - t.subtotal);
        }

        /// Permuting lines never changes the totals.
        #[test]
        fn aggregate_is_order_independent(
            lines in prop::collection::vec((positive_cents(), cents(), rate()), 0..12),
            shift in 0usize..12,
        ) {
            let lines: Vec<LineAmounts> = lines
                .into_iter()
                .map(|(q, p, r)| amounts(q, p, r))
                .collect();

            let mut reversed = lines.clone();
            reversed.reverse();

            let mut rotated = lines.clone();
            if !rotated.is_empty() {
                let k = shift % rotated.len();
                rotated.rotate_left(k);
            }

            let base = aggregate(&lines);
            prop_assert_eq!(base, aggregate(&reversed));
            prop_assert_eq!(base, aggregate(&rotated));
            prop_assert_eq!(base.grand_total, base.subtotal + base.total_tax);
        }
    }
}
