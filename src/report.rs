//! Plain-text report rendering for a computed analysis.

use std::fmt::Write as _;

use crate::analysis::Analysis;

/// Renders the full report: plan, before/after bills, both savings paths,
/// and the payback estimate.
///
/// Monetary values print with 2 decimals and unit rates with 4, matching
/// the statement layout the breakdown mirrors.
pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    let plan = &analysis.plan;

    let _ = writeln!(out, "--- System Plan ---");
    let _ = writeln!(out, "System capacity:     {:.2} kWp", plan.sizing.capacity_kwp);
    let _ = writeln!(
        out,
        "Generation:          {:.2} kWh/day, {:.2} kWh/month",
        plan.sizing.daily_generation_kwh, plan.sizing.monthly_generation_kwh
    );
    let _ = writeln!(
        out,
        "Usage split:         {:.2} kWh/day daytime, {:.2} kWh/day night",
        plan.split.daytime_daily_kwh, plan.split.night_daily_kwh
    );
    let _ = writeln!(
        out,
        "Battery:             {:.2} kWh total, {:.2} kWh usable",
        plan.battery.total_capacity_kwh, plan.battery.usable_capacity_kwh
    );
    let _ = writeln!(out, "Night coverage:      {:.1}%", plan.night_coverage_pct);
    let _ = writeln!(
        out,
        "Stored solar:        {:.2} kWh/day ({:.2} kWh/month)",
        plan.stored_solar_daily_kwh, plan.stored_solar_monthly_kwh
    );
    let _ = writeln!(
        out,
        "Daily flow:          {:.2} self-use / {:.2} stored / {:.2} exported kWh",
        plan.flow.self_use_kwh, plan.flow.stored_kwh, plan.flow.exported_kwh
    );
    let _ = writeln!(
        out,
        "Recommended system:  {} panels, {} battery units",
        analysis.recommendation.panel_count, analysis.recommendation.battery_units
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "--- Bill Before Solar ---");
    let _ = writeln!(out, "{}", analysis.atap.bill_without_solar);
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Bill After Solar ---");
    let _ = writeln!(out, "{}", analysis.atap.bill_with_solar);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", analysis.atap);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", analysis.saving_value);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", analysis.generation_value);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", analysis.roi);

    out
}
