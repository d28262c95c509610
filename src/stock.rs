//! Linen reservation check.
//!
//! A booking carries its linen selection as an owned usage list; before any
//! change lands we compare the would-be quantity against the clean stock
//! snapshot fetched earlier. The check is deliberately non-transactional:
//! nothing is reserved against other sessions, matching the dashboard's
//! original behavior.

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::LinenUsageItem;

/// Quantity of a product already selected in the usage list.
pub fn selected_quantity(usage: &[LinenUsageItem], product_id: Uuid) -> i32 {
    usage
        .iter()
        .find(|item| item.product_id == product_id)
        .map(|item| item.quantity)
        .unwrap_or(0)
}

/// Apply a signed quantity delta for one product against the available clean
/// stock. On acceptance the list is updated in place: a new entry is added,
/// an existing entry incremented, or the entry removed once its quantity
/// reaches zero. On rejection the list is left untouched.
pub fn apply_delta(
    usage: &mut Vec<LinenUsageItem>,
    product_id: Uuid,
    product_name: &str,
    delta: i32,
    available: i32,
) -> ServiceResult<()> {
    let current = selected_quantity(usage, product_id);
    let requested = current + delta;

    if requested < 0 {
        return Err(ServiceError::Validation(format!(
            "cannot remove {} of {product_name}: only {current} selected",
            delta.unsigned_abs()
        )));
    }

    if requested > available {
        return Err(ServiceError::InsufficientStock {
            product: product_name.to_string(),
            requested,
            available,
        });
    }

    if requested == 0 {
        usage.retain(|item| item.product_id != product_id);
    } else if let Some(item) = usage.iter_mut().find(|item| item.product_id == product_id) {
        item.quantity = requested;
    } else {
        usage.push(LinenUsageItem {
            product_id,
            product_name: product_name.to_string(),
            quantity: requested,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Uuid, name: &str, quantity: i32) -> LinenUsageItem {
        LinenUsageItem {
            product_id,
            product_name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn accepts_while_within_available_stock() {
        let id = Uuid::new_v4();
        let mut usage = vec![item(id, "King sheet", 3)];

        // available=5, already=3, delta=+2 -> accepted at quantity 5
        apply_delta(&mut usage, id, "King sheet", 2, 5).expect("within stock");
        assert_eq!(usage[0].quantity, 5);
    }

    #[test]
    fn rejects_over_available_without_mutating() {
        let id = Uuid::new_v4();
        let mut usage = vec![item(id, "King sheet", 3)];
        let before = usage.clone();

        // available=5, already=3, delta=+3 -> rejected, list unchanged
        let err = apply_delta(&mut usage, id, "King sheet", 3, 5).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            }
        ));
        assert_eq!(usage, before);
    }

    #[test]
    fn first_selection_adds_a_new_entry() {
        let id = Uuid::new_v4();
        let mut usage = Vec::new();

        apply_delta(&mut usage, id, "Pillowcase", 4, 10).expect("within stock");
        assert_eq!(usage, vec![item(id, "Pillowcase", 4)]);
    }

    #[test]
    fn decrement_to_zero_removes_the_entry() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut usage = vec![item(id, "Pillowcase", 2), item(other, "Bath towel", 1)];

        apply_delta(&mut usage, id, "Pillowcase", -2, 10).expect("removal");
        assert_eq!(usage, vec![item(other, "Bath towel", 1)]);
    }

    #[test]
    fn removing_more_than_selected_is_rejected() {
        let id = Uuid::new_v4();
        let mut usage = vec![item(id, "Pillowcase", 1)];
        let before = usage.clone();

        let err = apply_delta(&mut usage, id, "Pillowcase", -2, 10).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(usage, before);
    }

    #[test]
    fn other_products_do_not_count_against_the_limit() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut usage = vec![item(other, "Bath towel", 5)];

        apply_delta(&mut usage, id, "Hand towel", 2, 2).expect("independent stock");
        assert_eq!(selected_quantity(&usage, id), 2);
        assert_eq!(selected_quantity(&usage, other), 5);
    }
}
