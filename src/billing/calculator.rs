//! Itemized bill computation: tier selection, base/excess split, levies.

use crate::billing::breakdown::BillBreakdown;
use crate::quantity::{SenPerKwh, round_rm};
use crate::tariff::TariffSchedule;

/// Computes a fully itemized monthly bill.
///
/// Pure function of its inputs; repeated invocation with the same arguments
/// yields an identical breakdown. Inputs are assumed numeric and parsed;
/// validation is the adapter's responsibility. Negative or zero usage
/// degenerates to zero (or discount-only) line items rather than erroring.
///
/// Billing rules:
/// - usage splits into `base = min(usage, base_block)` and
///   `excess = max(usage - base_block, 0)`;
/// - a single energy rate applies to both portions, selected from the usage
///   total (high tier above the 1500 kWh threshold);
/// - capacity and network rates are flat per kWh;
/// - the incentive rate from the band lookup applies to both portions;
/// - the fixed retail surcharge applies only when excess exists;
/// - AFA applies to both portions, gated on usage exceeding the base block;
/// - KWTBB is a percentage of energy + capacity + network + incentive,
///   gated on the KWTBB threshold and rounded to whole sen;
/// - SST is a percentage of the service subtotal, rounded to whole sen.
pub fn compute_bill(
    tariff: &TariffSchedule,
    usage_kwh: f64,
    afa_rate: SenPerKwh,
) -> BillBreakdown {
    let energy_rate_rm = tariff.energy_rate_rm(usage_kwh);
    let capacity_rate_rm = tariff.capacity.as_rm();
    let network_rate_rm = tariff.network.as_rm();

    let base_kwh = usage_kwh.min(tariff.base_block_kwh);
    let excess_kwh = (usage_kwh - tariff.base_block_kwh).max(0.0);

    let energy_non_service_rm = base_kwh * energy_rate_rm;
    let energy_service_rm = excess_kwh * energy_rate_rm;

    let capacity_non_service_rm = base_kwh * capacity_rate_rm;
    let capacity_service_rm = excess_kwh * capacity_rate_rm;

    let network_non_service_rm = base_kwh * network_rate_rm;
    let network_service_rm = excess_kwh * network_rate_rm;

    let incentive_rate_rm = tariff.incentive.rate_for(usage_kwh);
    let incentive_non_service_rm = base_kwh * incentive_rate_rm;
    let incentive_service_rm = excess_kwh * incentive_rate_rm;

    let retail_service_rm = if excess_kwh > 0.0 {
        tariff.retail_charge_rm
    } else {
        0.0
    };

    // AFA gate is on the usage total, not on the base/excess split.
    let (afa_non_service_rm, afa_service_rm) = if usage_kwh > tariff.base_block_kwh {
        let afa_rm = afa_rate.as_rm();
        (base_kwh * afa_rm, excess_kwh * afa_rm)
    } else {
        (0.0, 0.0)
    };

    let usage_charge_non_service_rm = energy_non_service_rm
        + capacity_non_service_rm
        + network_non_service_rm
        + incentive_non_service_rm
        + afa_non_service_rm;
    let usage_charge_service_rm = energy_service_rm
        + capacity_service_rm
        + network_service_rm
        + retail_service_rm
        + incentive_service_rm
        + afa_service_rm;
    let usage_charge_total_rm = usage_charge_non_service_rm + usage_charge_service_rm;

    // KWTBB excludes retail and AFA.
    let kwtbb_basis_rm = (energy_non_service_rm + energy_service_rm)
        + (capacity_non_service_rm + capacity_service_rm)
        + (network_non_service_rm + network_service_rm)
        + (incentive_non_service_rm + incentive_service_rm);
    let kwtbb_rm = if usage_kwh > tariff.kwtbb_threshold_kwh {
        round_rm(kwtbb_basis_rm * tariff.kwtbb.fraction())
    } else {
        0.0
    };

    let sst_rm = if excess_kwh > 0.0 {
        round_rm(usage_charge_service_rm * tariff.sst.fraction())
    } else {
        0.0
    };

    let total_rm = usage_charge_total_rm + kwtbb_rm + sst_rm;

    BillBreakdown {
        usage_non_service_kwh: base_kwh,
        usage_service_kwh: excess_kwh,
        usage_total_kwh: usage_kwh,
        energy_non_service_rm,
        energy_service_rm,
        energy_total_rm: energy_non_service_rm + energy_service_rm,
        capacity_non_service_rm,
        capacity_service_rm,
        capacity_total_rm: capacity_non_service_rm + capacity_service_rm,
        network_non_service_rm,
        network_service_rm,
        network_total_rm: network_non_service_rm + network_service_rm,
        afa_non_service_rm,
        afa_service_rm,
        afa_total_rm: afa_non_service_rm + afa_service_rm,
        incentive_non_service_rm,
        incentive_service_rm,
        incentive_total_rm: incentive_non_service_rm + incentive_service_rm,
        retail_service_rm,
        usage_charge_non_service_rm,
        usage_charge_service_rm,
        usage_charge_total_rm,
        kwtbb_rm,
        sst_rm,
        total_rm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn tariff() -> TariffSchedule {
        TariffSchedule::tnb_domestic()
    }

    #[test]
    fn zero_usage_is_zero_bill() {
        let bill = compute_bill(&tariff(), 0.0, SenPerKwh(3.0));
        assert_eq!(bill.total_rm, 0.0);
        assert_eq!(bill.usage_charge_total_rm, 0.0);
        assert_eq!(bill.kwtbb_rm, 0.0);
        assert_eq!(bill.sst_rm, 0.0);
    }

    #[test]
    fn below_base_block_has_no_service_charges() {
        let bill = compute_bill(&tariff(), 450.0, SenPerKwh(3.0));
        assert_eq!(bill.usage_service_kwh, 0.0);
        assert_eq!(bill.retail_service_rm, 0.0);
        assert_eq!(bill.sst_rm, 0.0);
        // AFA gated off below the base block even with a non-zero rate
        assert_eq!(bill.afa_total_rm, 0.0);
        // but KWTBB applies above 300 kWh
        assert!(bill.kwtbb_rm > 0.0);
    }

    #[test]
    fn kwtbb_gated_below_threshold() {
        let bill = compute_bill(&tariff(), 300.0, SenPerKwh(0.0));
        assert_eq!(bill.kwtbb_rm, 0.0);
        let bill = compute_bill(&tariff(), 300.5, SenPerKwh(0.0));
        assert!(bill.kwtbb_rm > 0.0);
    }

    #[test]
    fn afa_applies_to_both_portions_above_base_block() {
        let bill = compute_bill(&tariff(), 800.0, SenPerKwh(3.0));
        assert!((bill.afa_non_service_rm - 600.0 * 0.03).abs() < EPS);
        assert!((bill.afa_service_rm - 200.0 * 0.03).abs() < EPS);
        assert!((bill.afa_total_rm - 24.0).abs() < EPS);
    }

    #[test]
    fn retail_surcharge_only_with_excess() {
        let t = tariff();
        assert_eq!(compute_bill(&t, 600.0, SenPerKwh(0.0)).retail_service_rm, 0.0);
        assert_eq!(
            compute_bill(&t, 600.5, SenPerKwh(0.0)).retail_service_rm,
            10.0
        );
    }

    #[test]
    fn high_tier_rate_applies_to_whole_month() {
        let bill = compute_bill(&tariff(), 1800.0, SenPerKwh(0.0));
        // 600 base and 1200 excess both at 37.03 sen
        assert!((bill.energy_non_service_rm - 600.0 * 0.3703).abs() < EPS);
        assert!((bill.energy_service_rm - 1200.0 * 0.3703).abs() < EPS);
    }

    #[test]
    fn grand_total_identity() {
        let t = tariff();
        for usage in [0.0, 120.0, 300.0, 301.0, 600.0, 601.0, 999.0, 1500.0, 1800.0, 2500.0] {
            let bill = compute_bill(&t, usage, SenPerKwh(3.0));
            let total = bill.usage_charge_total_rm + bill.kwtbb_rm + bill.sst_rm;
            assert!(
                (bill.total_rm - total).abs() < EPS,
                "identity broken at usage {usage}"
            );
        }
    }

    #[test]
    fn energy_total_is_monotonic_in_usage() {
        let t = tariff();
        let mut prev = f64::NEG_INFINITY;
        let mut usage = 0.0;
        while usage <= 2400.0 {
            let bill = compute_bill(&t, usage, SenPerKwh(3.0));
            assert!(
                bill.energy_total_rm >= prev - EPS,
                "energy total decreased at usage {usage}"
            );
            prev = bill.energy_total_rm;
            usage += 25.0;
        }
    }

    #[test]
    fn negative_usage_degenerates() {
        let bill = compute_bill(&tariff(), -50.0, SenPerKwh(3.0));
        assert_eq!(bill.usage_service_kwh, 0.0);
        assert_eq!(bill.retail_service_rm, 0.0);
        assert_eq!(bill.afa_total_rm, 0.0);
        assert_eq!(bill.kwtbb_rm, 0.0);
        assert_eq!(bill.sst_rm, 0.0);
        // no incentive band covers negative usage, so the bill is plain rates
        assert!(bill.total_rm < 0.0);
    }
}
