//! P1 vs P2 matching analysis for tandem units.
//!
//! Stateless and per-unit: no cross-unit comparison, no global state. The
//! thresholds arrive in an explicit `Tolerances` value owned by the caller.

use pumpqc_model::{TandemUnit, ToleranceResult, Tolerances};

/// Relative difference in percent, scaled by the larger of the two values.
/// Symmetric in its arguments.
pub fn relative_delta_pct(a: f64, b: f64) -> f64 {
    let larger = a.max(b);
    if larger <= 0.0 {
        return 0.0;
    }
    (a - b).abs() / larger * 100.0
}

/// Checks one unit against the tolerances.
pub fn check_unit(unit: &TandemUnit, tolerances: &Tolerances) -> ToleranceResult {
    let amperage_delta_pct = relative_delta_pct(unit.p1.amperage, unit.p2.amperage);
    let efficiency_delta_pct = relative_delta_pct(unit.p1.efficiency, unit.p2.efficiency);
    ToleranceResult {
        unit: unit.clone(),
        amperage_delta_pct,
        efficiency_delta_pct,
        amperage_fail: amperage_delta_pct > tolerances.amperage_pct,
        efficiency_fail: efficiency_delta_pct > tolerances.efficiency_pct,
    }
}

/// Checks every unit, preserving input order.
pub fn check_units(units: &[TandemUnit], tolerances: &Tolerances) -> Vec<ToleranceResult> {
    units.iter().map(|unit| check_unit(unit, tolerances)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpqc_model::PumpRecord;

    fn unit(p1_eff: f64, p1_amp: f64, p2_eff: f64, p2_amp: f64) -> TandemUnit {
        let record = |serial: &str, efficiency, amperage| PumpRecord {
            serial: serial.to_string(),
            efficiency,
            amperage,
            sheet_label: "TandemPump".to_string(),
        };
        TandemUnit {
            unit_id: "A".to_string(),
            p1: record("A-P1", p1_eff, p1_amp),
            p2: record("A-P2", p2_eff, p2_amp),
        }
    }

    #[test]
    fn spec_scenario_amperage_fails_efficiency_passes() {
        // [("A-P1", eff=93, amp=10), ("A-P2", eff=95, amp=12)]
        let result = check_unit(&unit(93.0, 10.0, 95.0, 12.0), &Tolerances::default());
        assert!((result.amperage_delta_pct - 100.0 * 2.0 / 12.0).abs() < 1e-9);
        assert!((result.efficiency_delta_pct - 100.0 * 2.0 / 95.0).abs() < 1e-9);
        assert!(result.amperage_fail);
        assert!(!result.efficiency_fail);
        assert!(result.is_mismatch());
    }

    #[test]
    fn thresholds_are_strict_inequalities() {
        // Exactly 10% amperage delta: 9 vs 10 -> 1/10 = 10%, not a failure.
        let result = check_unit(&unit(93.0, 9.0, 93.0, 10.0), &Tolerances::default());
        assert!((result.amperage_delta_pct - 10.0).abs() < 1e-9);
        assert!(!result.amperage_fail);
        assert!(!result.is_mismatch());
    }

    #[test]
    fn custom_tolerances_are_honored() {
        let tight = Tolerances {
            amperage_pct: 5.0,
            efficiency_pct: 1.0,
        };
        let result = check_unit(&unit(93.0, 9.0, 95.0, 10.0), &tight);
        assert!(result.amperage_fail);
        assert!(result.efficiency_fail);
    }
}
