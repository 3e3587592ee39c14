//! Payback-period estimation from capital cost and monthly savings.

use std::fmt;

/// Payback period, with an explicit sentinel for non-positive savings.
///
/// Division by a zero annual saving must never leak a NaN or infinity into
/// reports; `Indefinite` is the defined marker for "the system never pays
/// itself back at current savings".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    /// The investment is recovered after this period.
    Within {
        /// Payback period in years.
        years: f64,
        /// Payback period in months.
        months: f64,
    },
    /// Savings are zero or negative; the investment is never recovered.
    Indefinite,
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Within { years, months } => {
                write!(f, "{years:.2} years ({months:.1} months)")
            }
            Self::Indefinite => write!(f, "indefinite (no positive savings)"),
        }
    }
}

/// Return-on-investment summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiEstimate {
    /// Monthly savings figure fed into the estimate (RM).
    pub monthly_savings_rm: f64,
    /// Annualized savings (RM).
    pub annual_savings_rm: f64,
    /// Payback period.
    pub payback: Payback,
}

/// Estimates the payback period for a system price.
///
/// Annualizes the monthly savings and divides the capital cost by it.
pub fn estimate_roi(capital_cost_rm: f64, monthly_savings_rm: f64) -> RoiEstimate {
    let annual_savings_rm = monthly_savings_rm * 12.0;
    let payback = if annual_savings_rm > 0.0 {
        let years = capital_cost_rm / annual_savings_rm;
        Payback::Within {
            years,
            months: years * 12.0,
        }
    } else {
        Payback::Indefinite
    };
    RoiEstimate {
        monthly_savings_rm,
        annual_savings_rm,
        payback,
    }
}

impl fmt::Display for RoiEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- ROI ---")?;
        writeln!(f, "Monthly savings:  RM {:.2}", self.monthly_savings_rm)?;
        writeln!(f, "Annual savings:   RM {:.2}", self.annual_savings_rm)?;
        write!(f, "Payback:          {}", self.payback)
    }
}
