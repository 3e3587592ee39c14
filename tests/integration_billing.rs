//! End-to-end bill itemization checks against hand-computed statements.

mod common;

use nem_calc::billing::compute_bill;
use nem_calc::quantity::SenPerKwh;

const EPS: f64 = 1e-9;

/// 500 kWh on the low tier, no AFA: every line item recomputed by hand.
///
/// energy 500 x 0.2703, capacity 500 x 0.0455, network 500 x 0.1285,
/// incentive 500 x -0.12, KWTBB 1.6% of the sum rounded to whole sen.
#[test]
fn low_tier_statement_matches_hand_calculation() {
    let bill = compute_bill(&common::tariff(), 500.0, SenPerKwh(0.0));

    assert_eq!(bill.usage_non_service_kwh, 500.0);
    assert_eq!(bill.usage_service_kwh, 0.0);

    assert!((bill.energy_total_rm - 135.15).abs() < EPS);
    assert!((bill.capacity_total_rm - 22.75).abs() < EPS);
    assert!((bill.network_total_rm - 64.25).abs() < EPS);
    assert!((bill.incentive_total_rm - (-60.0)).abs() < EPS);

    // no excess usage: no retail surcharge, no SST, and AFA is gated off
    assert_eq!(bill.retail_service_rm, 0.0);
    assert_eq!(bill.sst_rm, 0.0);
    assert_eq!(bill.afa_total_rm, 0.0);

    assert!((bill.usage_charge_total_rm - 162.15).abs() < EPS);
    assert!((bill.kwtbb_rm - 2.59).abs() < EPS);
    assert!((bill.total_rm - 164.74).abs() < EPS);
}

/// 1800 kWh with a 3 sen AFA: high tier applies to the whole month and every
/// levy is active.
#[test]
fn high_tier_statement_matches_hand_calculation() {
    let bill = compute_bill(&common::tariff(), 1800.0, SenPerKwh(3.0));

    assert_eq!(bill.usage_non_service_kwh, 600.0);
    assert_eq!(bill.usage_service_kwh, 1200.0);

    // both portions at the 37.03 sen rate
    assert!((bill.energy_non_service_rm - 222.18).abs() < EPS);
    assert!((bill.energy_service_rm - 444.36).abs() < EPS);
    assert!((bill.capacity_non_service_rm - 27.30).abs() < EPS);
    assert!((bill.capacity_service_rm - 54.60).abs() < EPS);
    assert!((bill.network_non_service_rm - 77.10).abs() < EPS);
    assert!((bill.network_service_rm - 154.20).abs() < EPS);

    // 1800 kWh is outside every incentive band
    assert_eq!(bill.incentive_total_rm, 0.0);

    assert_eq!(bill.retail_service_rm, 10.0);
    assert!((bill.afa_non_service_rm - 18.0).abs() < EPS);
    assert!((bill.afa_service_rm - 36.0).abs() < EPS);

    assert!((bill.usage_charge_non_service_rm - 344.58).abs() < EPS);
    assert!((bill.usage_charge_service_rm - 699.16).abs() < EPS);

    // KWTBB on energy + capacity + network (979.74 RM), rounded to whole sen
    assert!((bill.kwtbb_rm - 15.68).abs() < EPS);
    // SST at 8% of the service subtotal
    assert!((bill.sst_rm - 55.93).abs() < EPS);

    assert!((bill.total_rm - 1115.35).abs() < EPS);
}

/// Crossing the base block flips on every excess-only charge at once.
#[test]
fn base_block_boundary_activates_service_charges() {
    let t = common::tariff();

    let at_block = compute_bill(&t, 600.0, SenPerKwh(3.0));
    assert_eq!(at_block.retail_service_rm, 0.0);
    assert_eq!(at_block.sst_rm, 0.0);
    assert_eq!(at_block.afa_total_rm, 0.0);

    let over_block = compute_bill(&t, 601.0, SenPerKwh(3.0));
    assert_eq!(over_block.retail_service_rm, 10.0);
    assert!(over_block.sst_rm > 0.0);
    // AFA now covers both portions
    assert!((over_block.afa_total_rm - 601.0 * 0.03).abs() < EPS);
}

/// The incentive discount shrinks band by band and vanishes above 1000 kWh.
#[test]
fn incentive_discount_tapers_with_usage() {
    let t = common::tariff();
    let mut prev_rate = f64::NEG_INFINITY;
    for usage in [150.0, 250.0, 450.0, 650.0, 900.0, 1000.0, 1100.0] {
        let bill = compute_bill(&t, usage, SenPerKwh(0.0));
        let rate = bill.incentive_total_rm / usage;
        assert!(
            rate >= prev_rate - EPS,
            "incentive rate regressed at usage {usage}"
        );
        prev_rate = rate;
    }
    let above_coverage = compute_bill(&t, 1100.0, SenPerKwh(0.0));
    assert_eq!(above_coverage.incentive_total_rm, 0.0);
}
