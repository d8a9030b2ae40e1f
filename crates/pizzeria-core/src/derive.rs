//! Values derived on each reporting tick.
//!
//! Rounding order matters for wire parity: CPU usage is rounded to two
//! decimals as a ratio and only then scaled to a percentage, so e.g. a ratio
//! of `0.57` reports as `56.99999999999999`.

/// Mean over the entire sample history. Empty input yields `NaN`.
pub fn average(samples: &[f64]) -> f64 {
    let total: f64 = samples.iter().sum();
    total / samples.len() as f64
}

/// `round2(load / cores) * 100`. Zero cores yields `NaN`.
pub fn cpu_percent(load_1m: f64, cores: usize) -> f64 {
    if cores == 0 {
        return f64::NAN;
    }
    round2(load_1m / cores as f64) * 100.0
}

/// Used-memory percentage formatted with two decimals. Zero total yields `"NaN"`.
pub fn memory_percent(total_bytes: u64, free_bytes: u64) -> String {
    if total_bytes == 0 {
        return f64::NAN.to_string();
    }
    let used = total_bytes.saturating_sub(free_bytes) as f64;
    format!("{:.2}", used / total_bytes as f64 * 100.0)
}

/// Round to two decimals through the decimal string, matching fixed-point formatting.
fn round2(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    format!("{v:.2}").parse().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_over_full_history() {
        assert_eq!(average(&[10.0, 20.0, 30.0]), 20.0);
    }

    #[test]
    fn average_of_nothing_is_nan() {
        assert!(average(&[]).is_nan());
    }

    #[test]
    fn cpu_rounds_before_scaling() {
        assert_eq!(cpu_percent(1.0, 4), 25.0);
        // 2.28 / 4 = 0.57 -> 0.57 * 100 in binary floating point
        assert_eq!(cpu_percent(2.28, 4), 0.57 * 100.0);
        // 0.333.. is rounded to 0.33 first
        assert_eq!(cpu_percent(1.0, 3), 0.33 * 100.0);
    }

    #[test]
    fn cpu_without_cores_is_nan() {
        assert!(cpu_percent(1.0, 0).is_nan());
    }

    #[test]
    fn memory_is_two_decimal_string() {
        assert_eq!(memory_percent(1000, 250), "75.00");
        assert_eq!(memory_percent(3, 2), "33.33");
        assert_eq!(memory_percent(0, 0), "NaN");
    }
}
