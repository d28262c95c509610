//! Booking cost and cleaner-pay derivation.
//!
//! The dashboard recomputes `total_cost` whenever an hours or rate field
//! changes, unless the operator has typed a total by hand. That manual
//! override is a dirty flag: while set, hour and discount edits leave the
//! total alone; editing the hourly rate or explicitly clearing the override
//! resumes auto-derivation. Everything here is a pure transition on an
//! immutable sheet so the policy stays testable without a form in sight.

use rust_decimal::Decimal;

use crate::models::cleaner::{Cleaner, PAY_MODEL_HOURLY, PAY_MODEL_PERCENTAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    None,
    Amount(Decimal),
    Percent(Decimal),
}

impl Discount {
    /// Bookings store the discount as two nullable columns; amount wins if
    /// both are somehow present.
    pub fn from_fields(amount: Option<Decimal>, percent: Option<Decimal>) -> Self {
        match (amount, percent) {
            (Some(a), _) => Discount::Amount(a),
            (None, Some(p)) => Discount::Percent(p),
            (None, None) => Discount::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayModel {
    Hourly(Decimal),
    Percentage(Decimal),
}

impl PayModel {
    pub fn for_cleaner(cleaner: &Cleaner) -> Self {
        match cleaner.pay_model.as_str() {
            PAY_MODEL_PERCENTAGE => PayModel::Percentage(cleaner.percentage),
            PAY_MODEL_HOURLY => PayModel::Hourly(cleaner.hourly_rate),
            other => {
                log::warn!("unknown pay model {other:?}, treating as hourly");
                PayModel::Hourly(cleaner.hourly_rate)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostSheet {
    pub hours: Decimal,
    pub cost_per_hour: Decimal,
    pub discount: Discount,
    pub total_cost: Decimal,
    pub manual_total: bool,
}

impl CostSheet {
    pub fn new(hours: Decimal, cost_per_hour: Decimal, discount: Discount) -> Self {
        let total_cost = derive_total(hours, cost_per_hour, discount);
        CostSheet {
            hours,
            cost_per_hour,
            discount,
            total_cost,
            manual_total: false,
        }
    }

    /// Rebuild a sheet from stored booking fields, preserving a persisted
    /// manual total as-is.
    pub fn restore(
        hours: Decimal,
        cost_per_hour: Decimal,
        discount: Discount,
        total_cost: Decimal,
        manual_total: bool,
    ) -> Self {
        CostSheet {
            hours,
            cost_per_hour,
            discount,
            total_cost,
            manual_total,
        }
    }

    /// Change the booked hours. A manual total stays put.
    pub fn with_hours(self, hours: Decimal) -> Self {
        let sheet = CostSheet { hours, ..self };
        sheet.recompute_unless_manual()
    }

    /// Change the hourly rate. This resumes auto-derivation even after a
    /// manual override.
    pub fn with_rate(self, cost_per_hour: Decimal) -> Self {
        let sheet = CostSheet {
            cost_per_hour,
            manual_total: false,
            ..self
        };
        sheet.recompute_unless_manual()
    }

    /// Change the discount. A manual total stays put.
    pub fn with_discount(self, discount: Discount) -> Self {
        let sheet = CostSheet { discount, ..self };
        sheet.recompute_unless_manual()
    }

    /// The operator typed a total by hand.
    pub fn with_manual_total(self, total_cost: Decimal) -> Self {
        CostSheet {
            total_cost,
            manual_total: true,
            ..self
        }
    }

    /// Drop the override and return to the derived figure.
    pub fn clear_manual(self) -> Self {
        let sheet = CostSheet {
            manual_total: false,
            ..self
        };
        sheet.recompute_unless_manual()
    }

    /// What the cleaner earns on this sheet: hours × rate for hourly-paid
    /// cleaners, a share of the final total otherwise.
    pub fn cleaner_pay(&self, model: PayModel) -> Decimal {
        match model {
            PayModel::Hourly(rate) => (self.hours * rate).round_dp(2),
            PayModel::Percentage(percent) => {
                (self.total_cost * percent / Decimal::ONE_HUNDRED).round_dp(2)
            }
        }
    }

    fn recompute_unless_manual(self) -> Self {
        if self.manual_total {
            return self;
        }
        CostSheet {
            total_cost: derive_total(self.hours, self.cost_per_hour, self.discount),
            ..self
        }
    }
}

/// `max(0, hours × rate − discount)`; a 100% discount yields exactly zero.
fn derive_total(hours: Decimal, cost_per_hour: Decimal, discount: Discount) -> Decimal {
    let base = hours * cost_per_hour;
    let discounted = match discount {
        Discount::None => base,
        Discount::Amount(amount) => base - amount,
        Discount::Percent(percent) => base - base * percent / Decimal::ONE_HUNDRED,
    };
    discounted.max(Decimal::ZERO).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn total_tracks_hours_times_rate() {
        let sheet = CostSheet::new(dec(3), dec(18), Discount::None);
        assert_eq!(sheet.total_cost, dec(54));

        let sheet = sheet.with_hours(dec(4));
        assert_eq!(sheet.total_cost, dec(72));

        let sheet = sheet.with_rate(dec(20));
        assert_eq!(sheet.total_cost, dec(80));
    }

    #[test]
    fn fixed_discount_clamps_at_zero() {
        let sheet = CostSheet::new(dec(2), dec(15), Discount::Amount(dec(50)));
        assert_eq!(sheet.total_cost, Decimal::ZERO);
    }

    #[test]
    fn full_percentage_discount_yields_zero_not_negative() {
        let sheet = CostSheet::new(dec(5), dec(22), Discount::Percent(dec(100)));
        assert_eq!(sheet.total_cost, Decimal::ZERO);
    }

    #[test]
    fn partial_percentage_discount() {
        let sheet = CostSheet::new(dec(4), dec(25), Discount::Percent(dec(10)));
        assert_eq!(sheet.total_cost, dec(90));
    }

    #[test]
    fn manual_total_survives_hour_changes() {
        let sheet = CostSheet::new(dec(3), dec(18), Discount::None).with_manual_total(dec(65));
        assert!(sheet.manual_total);

        let sheet = sheet.with_hours(dec(6));
        assert_eq!(sheet.total_cost, dec(65));
        assert!(sheet.manual_total);
    }

    #[test]
    fn manual_total_survives_discount_changes() {
        let sheet = CostSheet::new(dec(3), dec(18), Discount::None)
            .with_manual_total(dec(65))
            .with_discount(Discount::Amount(dec(10)));
        assert_eq!(sheet.total_cost, dec(65));
    }

    #[test]
    fn rate_change_resumes_auto_derivation() {
        let sheet = CostSheet::new(dec(3), dec(18), Discount::None)
            .with_manual_total(dec(65))
            .with_rate(dec(20));
        assert!(!sheet.manual_total);
        assert_eq!(sheet.total_cost, dec(60));
    }

    #[test]
    fn clearing_the_override_recomputes() {
        let sheet = CostSheet::new(dec(2), dec(30), Discount::None)
            .with_manual_total(dec(99))
            .clear_manual();
        assert!(!sheet.manual_total);
        assert_eq!(sheet.total_cost, dec(60));
    }

    #[test]
    fn hourly_cleaner_pay_uses_hours() {
        let sheet = CostSheet::new(dec(4), dec(25), Discount::None);
        assert_eq!(sheet.cleaner_pay(PayModel::Hourly(dec(12))), dec(48));
    }

    #[test]
    fn percentage_cleaner_pay_follows_the_final_total() {
        let sheet = CostSheet::new(dec(4), dec(25), Discount::Percent(dec(10)));
        // 90 after discount, 60% share
        assert_eq!(sheet.cleaner_pay(PayModel::Percentage(dec(60))), dec(54));
    }

    #[test]
    fn discount_from_fields_prefers_amount() {
        assert_eq!(
            Discount::from_fields(Some(dec(5)), Some(dec(50))),
            Discount::Amount(dec(5))
        );
        assert_eq!(
            Discount::from_fields(None, Some(dec(50))),
            Discount::Percent(dec(50))
        );
        assert_eq!(Discount::from_fields(None, None), Discount::None);
    }
}
