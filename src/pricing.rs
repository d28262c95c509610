//! End-of-tenancy package pricing.
//!
//! The wizard collects a selection (property, condition, room counts and a
//! handful of independently priced add-on groups) and the whole thing prices
//! through one pure function. Unknown identifiers price to zero so stale
//! option lists in the dashboard never error, they just stop contributing.

use serde::Deserialize;

const ROOM_RATE: f64 = 20.0;

const PROPERTY_BASE: &[(&str, f64)] = &[
    ("studio", 180.0),
    ("flat", 200.0),
    ("house", 220.0),
    ("bungalow", 220.0),
    ("maisonette", 240.0),
];

const CONDITION_MULTIPLIER: &[(&str, f64)] = &[
    ("excellent", 1.0),
    ("good", 1.2),
    ("fair", 1.4),
    ("poor", 1.6),
];

const ADDITIONAL_ROOMS: &[(&str, f64)] = &[
    ("garage", 30.0),
    ("conservatory", 35.0),
    ("basement", 30.0),
    ("loft", 25.0),
    ("utility_room", 15.0),
    ("dining_room", 20.0),
];

const OVEN: &[(&str, f64)] = &[
    ("single", 45.0),
    ("double", 60.0),
    ("range", 80.0),
];

// Priced per blind.
const BLINDS: &[(&str, f64)] = &[
    ("venetian", 12.0),
    ("roller", 8.0),
    ("vertical", 10.0),
];

const EXTRA_SERVICES: &[(&str, f64)] = &[
    ("exterior_windows", 40.0),
    ("balcony", 25.0),
    ("key_collection", 10.0),
    ("same_day", 35.0),
];

const CARPETS: &[(&str, f64)] = &[
    ("bedroom", 25.0),
    ("living_room", 35.0),
    ("hallway", 15.0),
    ("stairs", 25.0),
    ("landing", 10.0),
];

// Priced per piece.
const UPHOLSTERY: &[(&str, f64)] = &[
    ("armchair", 20.0),
    ("two_seater", 40.0),
    ("three_seater", 55.0),
    ("corner_sofa", 70.0),
];

const MATTRESSES: &[(&str, f64)] = &[
    ("single", 20.0),
    ("double", 30.0),
    ("king", 35.0),
];

#[derive(Debug, Clone, Deserialize)]
pub struct CountedItem {
    pub id: String,
    pub count: u32,
}

/// The wizard's transient selection. Lives for one request; flattened into a
/// booking on submit. Every field defaults so a partial payload prices the
/// options it actually carries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndOfTenancySelection {
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub additional_rooms: Vec<String>,
    #[serde(default)]
    pub oven: Option<String>,
    #[serde(default)]
    pub blinds: Vec<CountedItem>,
    #[serde(default)]
    pub extra_services: Vec<String>,
    #[serde(default)]
    pub carpets: Vec<String>,
    #[serde(default)]
    pub upholstery: Vec<CountedItem>,
    #[serde(default)]
    pub mattresses: Vec<String>,
}

fn price_of(table: &[(&str, f64)], id: &str) -> f64 {
    table
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, price)| *price)
        .unwrap_or(0.0)
}

fn sum_of(table: &[(&str, f64)], ids: &[String]) -> f64 {
    ids.iter().map(|id| price_of(table, id)).sum()
}

fn sum_counted(table: &[(&str, f64)], items: &[CountedItem]) -> f64 {
    items
        .iter()
        .map(|item| price_of(table, &item.id) * f64::from(item.count))
        .sum()
}

/// Price a selection in whole currency units.
///
/// `round(base × condition + (bedrooms + bathrooms) × 20 + Σ add-ons)`.
/// Pure and idempotent; an empty selection prices to 0.
pub fn quote(selection: &EndOfTenancySelection) -> i64 {
    let base = selection
        .property_type
        .as_deref()
        .map(|p| price_of(PROPERTY_BASE, p))
        .unwrap_or(0.0);

    // An unknown condition label multiplies by 1.0 rather than zeroing the
    // base; only priced identifiers contribute zero when unrecognized.
    let multiplier = selection
        .condition
        .as_deref()
        .and_then(|c| {
            CONDITION_MULTIPLIER
                .iter()
                .find(|(key, _)| *key == c)
                .map(|(_, m)| *m)
        })
        .unwrap_or(1.0);

    let rooms = f64::from(selection.bedrooms + selection.bathrooms) * ROOM_RATE;

    let add_ons = sum_of(ADDITIONAL_ROOMS, &selection.additional_rooms)
        + selection
            .oven
            .as_deref()
            .map(|o| price_of(OVEN, o))
            .unwrap_or(0.0)
        + sum_counted(BLINDS, &selection.blinds)
        + sum_of(EXTRA_SERVICES, &selection.extra_services)
        + sum_of(CARPETS, &selection.carpets)
        + sum_counted(UPHOLSTERY, &selection.upholstery)
        + sum_of(MATTRESSES, &selection.mattresses);

    (base * multiplier + rooms + add_ons).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counted(id: &str, count: u32) -> CountedItem {
        CountedItem {
            id: id.to_string(),
            count,
        }
    }

    #[test]
    fn empty_selection_prices_to_zero() {
        assert_eq!(quote(&EndOfTenancySelection::default()), 0);
    }

    #[test]
    fn worked_example_house_good_condition() {
        // house(220) × good(1.2) + (2 + 1) × 20 + garage(30) = 354
        let selection = EndOfTenancySelection {
            property_type: Some("house".into()),
            condition: Some("good".into()),
            bedrooms: 2,
            bathrooms: 1,
            additional_rooms: vec!["garage".into()],
            ..Default::default()
        };
        assert_eq!(quote(&selection), 354);
    }

    #[test]
    fn counted_categories_multiply_by_count() {
        let selection = EndOfTenancySelection {
            blinds: vec![counted("venetian", 3)],
            upholstery: vec![counted("two_seater", 2)],
            ..Default::default()
        };
        // 3 × 12 + 2 × 40
        assert_eq!(quote(&selection), 116);
    }

    #[test]
    fn unknown_identifiers_contribute_zero() {
        let selection = EndOfTenancySelection {
            property_type: Some("castle".into()),
            additional_rooms: vec!["moat".into(), "garage".into()],
            oven: Some("cauldron".into()),
            ..Default::default()
        };
        assert_eq!(quote(&selection), 30);
    }

    #[test]
    fn unknown_condition_multiplies_by_one() {
        let selection = EndOfTenancySelection {
            property_type: Some("flat".into()),
            condition: Some("apocalyptic".into()),
            ..Default::default()
        };
        assert_eq!(quote(&selection), 200);
    }

    #[test]
    fn unrelated_fields_never_change_the_price() {
        let base = EndOfTenancySelection {
            property_type: Some("flat".into()),
            condition: Some("excellent".into()),
            bedrooms: 1,
            ..Default::default()
        };
        let with_unknown_extras = EndOfTenancySelection {
            extra_services: vec!["unlisted_option".into()],
            ..base.clone()
        };
        assert_eq!(quote(&base), quote(&with_unknown_extras));
    }

    #[test]
    fn quoting_twice_is_idempotent() {
        let selection = EndOfTenancySelection {
            property_type: Some("maisonette".into()),
            condition: Some("poor".into()),
            bedrooms: 3,
            bathrooms: 2,
            carpets: vec!["stairs".into(), "landing".into()],
            mattresses: vec!["king".into()],
            ..Default::default()
        };
        assert_eq!(quote(&selection), quote(&selection));
    }
}
