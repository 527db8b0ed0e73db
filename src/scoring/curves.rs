//! Subscore curves: one raw metric -> integer score in [0, 100]
//!
//! Each curve is piecewise linear between named breakpoints. The boundary
//! cases are spelled out explicitly because the exact value at each
//! breakpoint is part of the contract.

use crate::profile::{BureauStatus, IncomeType};

/// Linear interpolation of `x` across `[x0, x1]` mapped onto `[y0, y1]`, rounded
fn ramp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> u8 {
    let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    (y0 + t * (y1 - y0)).round().clamp(0.0, 100.0) as u8
}

/// Debt-to-income (lower is better)
///
/// | DTI            | score     |
/// |----------------|-----------|
/// | <= 0.30        | 100       |
/// | (0.30, 0.35]   | 100 -> 90 |
/// | (0.35, 0.40]   | 90 -> 75  |
/// | (0.40, 0.45]   | 75 -> 55  |
/// | (0.45, 0.55]   | 55 -> 20  |
/// | > 0.55         | 10        |
pub fn dti_score(dti: f64) -> u8 {
    if dti <= 0.30 {
        100
    } else if dti <= 0.35 {
        ramp(dti, 0.30, 0.35, 100.0, 90.0)
    } else if dti <= 0.40 {
        ramp(dti, 0.35, 0.40, 90.0, 75.0)
    } else if dti <= 0.45 {
        ramp(dti, 0.40, 0.45, 75.0, 55.0)
    } else if dti <= 0.55 {
        ramp(dti, 0.45, 0.55, 55.0, 20.0)
    } else {
        10
    }
}

/// Loan-to-value (lower is better)
///
/// The last ramp stops short of 0.95: a loan financing exactly 95% of the
/// property already scores the floor of 20.
pub fn ltv_score(ltv: f64) -> u8 {
    if ltv <= 0.80 {
        100
    } else if ltv <= 0.85 {
        ramp(ltv, 0.80, 0.85, 100.0, 85.0)
    } else if ltv <= 0.90 {
        ramp(ltv, 0.85, 0.90, 85.0, 65.0)
    } else if ltv < 0.95 {
        ramp(ltv, 0.90, 0.95, 65.0, 40.0)
    } else {
        20
    }
}

/// Years in the current job or business (higher is better)
pub fn stability_score(years: f64) -> u8 {
    if years >= 3.0 {
        100
    } else if years >= 2.0 {
        ramp(years, 2.0, 3.0, 85.0, 100.0)
    } else if years >= 1.0 {
        ramp(years, 1.0, 2.0, 65.0, 85.0)
    } else if years >= 0.5 {
        ramp(years, 0.5, 1.0, 40.0, 65.0)
    } else if years > 0.0 {
        30
    } else {
        15
    }
}

/// Applicant age, bell shaped with a plateau between 25 and 55
pub fn age_score(age: f64) -> u8 {
    if age < 21.0 || age > 75.0 {
        10
    } else if age < 25.0 {
        ramp(age, 21.0, 25.0, 80.0, 100.0)
    } else if age <= 55.0 {
        100
    } else if age <= 65.0 {
        ramp(age, 55.0, 65.0, 100.0, 70.0)
    } else {
        ramp(age, 65.0, 75.0, 70.0, 40.0)
    }
}

pub fn income_type_score(income_type: IncomeType) -> u8 {
    match income_type {
        IncomeType::Salaried => 100,
        IncomeType::Mixed => 85,
        IncomeType::Independent => 70,
    }
}

pub fn bureau_score(status: BureauStatus) -> u8 {
    match status {
        BureauStatus::None => 100,
        BureauStatus::Regularized => 70,
        BureauStatus::Adverse => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dti_breakpoints() {
        assert_eq!(dti_score(0.0), 100);
        assert_eq!(dti_score(0.30), 100);
        assert_eq!(dti_score(0.325), 95);
        assert_eq!(dti_score(0.35), 90);
        assert_eq!(dti_score(0.40), 75);
        assert_eq!(dti_score(0.45), 55);
        assert_eq!(dti_score(0.49), 41);
        assert_eq!(dti_score(0.55), 20);
        assert_eq!(dti_score(0.56), 10);
        assert_eq!(dti_score(1.8), 10);
    }

    #[test]
    fn test_ltv_breakpoints() {
        assert_eq!(ltv_score(0.5), 100);
        assert_eq!(ltv_score(0.80), 100);
        assert_eq!(ltv_score(0.85), 85);
        assert_eq!(ltv_score(0.90), 65);
        assert_eq!(ltv_score(0.92), 55);
        assert_eq!(ltv_score(76_000.0 / 80_000.0), 20);
        assert_eq!(ltv_score(0.95), 20);
        assert_eq!(ltv_score(1.0), 20);
    }

    #[test]
    fn test_stability_breakpoints() {
        assert_eq!(stability_score(0.0), 15);
        assert_eq!(stability_score(0.25), 30);
        assert_eq!(stability_score(0.5), 40);
        assert_eq!(stability_score(1.0), 65);
        assert_eq!(stability_score(1.5), 75);
        assert_eq!(stability_score(2.0), 85);
        assert_eq!(stability_score(3.0), 100);
        assert_eq!(stability_score(12.0), 100);
    }

    #[test]
    fn test_age_breakpoints() {
        assert_eq!(age_score(18.0), 10);
        assert_eq!(age_score(21.0), 80);
        assert_eq!(age_score(23.0), 90);
        assert_eq!(age_score(25.0), 100);
        assert_eq!(age_score(40.0), 100);
        assert_eq!(age_score(55.0), 100);
        assert_eq!(age_score(60.0), 85);
        assert_eq!(age_score(65.0), 70);
        assert_eq!(age_score(75.0), 40);
        assert_eq!(age_score(75.5), 10);
    }

    #[test]
    fn test_categorical_curves() {
        assert_eq!(income_type_score(IncomeType::Salaried), 100);
        assert_eq!(income_type_score(IncomeType::Mixed), 85);
        assert_eq!(income_type_score(IncomeType::Independent), 70);
        assert_eq!(bureau_score(BureauStatus::None), 100);
        assert_eq!(bureau_score(BureauStatus::Regularized), 70);
        assert_eq!(bureau_score(BureauStatus::Adverse), 30);
    }

    #[test]
    fn test_monotonic_in_improving_direction() {
        let mut prev_dti = 100;
        let mut prev_ltv = 100;
        let mut prev_stab = 0;
        for i in 0..=300 {
            let x = i as f64 / 200.0;
            let dti = dti_score(x);
            let ltv = ltv_score(x);
            assert!(dti <= prev_dti, "dti not monotonic at {x}");
            assert!(ltv <= prev_ltv, "ltv not monotonic at {x}");
            prev_dti = dti;
            prev_ltv = ltv;

            let stab = stability_score(x * 3.0);
            assert!(stab >= prev_stab, "stability not monotonic at {}", x * 3.0);
            prev_stab = stab;
        }
    }

    #[test]
    fn test_age_shape() {
        let mut prev = 0;
        for age in 21..=25 {
            let s = age_score(age as f64);
            assert!(s >= prev);
            prev = s;
        }
        for age in 55..=75 {
            let s = age_score(age as f64);
            assert!(s <= prev);
            prev = s;
        }
        for age in 0..=100 {
            assert!(age_score(age as f64) <= 100);
        }
    }
}
