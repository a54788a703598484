//! Reference scenario: 10M X deposited over [0.01, 0.06], then 9M bought.

use clmm_swap_simulation::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

fn relative_error(actual: Decimal, expected: f64) -> f64 {
    let actual = actual.to_f64().unwrap();
    ((actual - expected) / expected).abs()
}

fn reference_position() -> Position {
    let range = PriceRange::new(Price::new(dec!(0.01)), Price::new(dec!(0.06))).unwrap();
    initialize_at_lower(range, dec!(10000000)).unwrap()
}

#[test]
fn test_reference_liquidity_matches_closed_form() {
    let position = reference_position();

    let expected_l = 10_000_000.0 / (10.0 - 1.0 / 0.06_f64.sqrt());
    assert!(relative_error(position.liquidity(), expected_l) < 1e-9);
    assert!(position.liquidity() > dec!(1689000));
    assert!(position.liquidity() < dec!(1691000));

    assert!((position.reserve_x().unwrap() - dec!(10000000)).abs() < dec!(0.000001));
    assert!(position.reserve_y().unwrap().abs() < dec!(0.000001));
    assert!((position.price().unwrap().value - dec!(0.01)).abs() < dec!(0.0000000001));
}

#[test]
fn test_reference_swap() {
    let position = reference_position();
    let start = position.sqrt_price();
    let liquidity = position.liquidity().to_f64().unwrap();

    let (next, quote) = apply_swap(position, dec!(9000000)).unwrap();

    assert!((next.reserve_x().unwrap() - dec!(1000000)).abs() < dec!(0.000001));
    assert!(next.sqrt_price() > start);
    assert!(quote.y_required > Decimal::ZERO);

    let expected_sqrt = 1.0 / (1_000_000.0 / liquidity + 1.0 / 0.06_f64.sqrt());
    let expected_y = liquidity * (expected_sqrt - 0.1);
    assert!(relative_error(quote.sqrt_price_after, expected_sqrt) < 1e-9);
    assert!(relative_error(quote.y_required, expected_y) < 1e-9);
    assert_eq!(quote.reserve_y_after, next.reserve_y().unwrap());
}

#[test]
fn test_reference_three_buys_stop_at_overdraw() {
    let sequence = apply_swaps(
        reference_position(),
        &[dec!(4000000), dec!(5000000), dec!(2000000)],
    );

    assert_eq!(sequence.completed_steps(), 2);
    let failure = sequence.failure.clone().unwrap();
    assert_eq!(failure.index, 2);
    assert!(matches!(
        failure.error,
        PositionError::InsufficientReserve { .. }
    ));

    let one_shot = apply_swap(reference_position(), dec!(9000000)).unwrap().1;
    let diff = (sequence.total_y_required - one_shot.y_required).abs();
    assert!(diff < dec!(0.000001));
}

#[test]
fn test_reference_scenario_serializes() {
    let range = PriceRange::new(Price::new(dec!(0.01)), Price::new(dec!(0.06))).unwrap();
    let config = ScenarioConfig::new(range, dec!(10000000)).with_swap(dec!(9000000));
    let result = simulate_scenario(&config).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["sequence"]["failure"].is_null());
    assert_eq!(json["sequence"]["quotes"].as_array().unwrap().len(), 1);
}
