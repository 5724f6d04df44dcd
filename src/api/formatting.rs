//! Output formatting for position estimates
//!
//! Formatters turn a [`PositionEstimate`] into text, JSON, or CSV for
//! display layers and logs. They never alter the estimate itself.

use crate::api::types::PositionEstimate;

/// Human-readable text formatter
pub struct TextFormatter {
    /// Single-line output instead of the block layout
    pub compact: bool,
    /// Decimal places for coordinates
    pub precision: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            compact: false,
            precision: 6,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format an estimate as human-readable text
    pub fn format(&self, estimate: &PositionEstimate) -> String {
        let p = self.precision;
        if self.compact {
            return format!(
                "{:.p$}, {:.p$} (residual {:.2} m, quality {:.2}{})",
                estimate.lat,
                estimate.lng,
                estimate.residual_norm,
                estimate.quality,
                if estimate.underdetermined {
                    ", underdetermined"
                } else {
                    ""
                },
            );
        }

        let mut output = String::new();
        output.push_str("Position estimate:\n");
        output.push_str(&format!("  Latitude:   {:.p$}\n", estimate.lat));
        output.push_str(&format!("  Longitude:  {:.p$}\n", estimate.lng));
        output.push_str(&format!("  Residual:   {:.3} m\n", estimate.residual_norm));
        output.push_str(&format!("  Quality:    {:.2}\n", estimate.quality));
        output.push_str(&format!(
            "  Solver:     {:?} ({} beacons, {} iterations)\n",
            estimate.strategy, estimate.beacon_count, estimate.iterations
        ));
        output.push_str(&format!("  Geometry:   {:?}\n", estimate.geometry_grade));
        output.push_str(&format!(
            "  Flags:      converged={}, underdetermined={}\n",
            estimate.converged, estimate.underdetermined
        ));
        output
    }
}

/// JSON formatter backed by serde
pub struct JsonFormatter {
    /// Pretty-print with indentation
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: false }
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize an estimate to JSON
    pub fn format(&self, estimate: &PositionEstimate) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(estimate)
        } else {
            serde_json::to_string(estimate)
        }
    }
}

/// CSV formatter producing one record per estimate
pub struct CsvFormatter {
    /// Emit the header line before the record
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

impl CsvFormatter {
    pub const HEADER: &'static str = "lat,lng,residual_norm,converged,iterations,\
underdetermined,quality,strategy,geometry_grade,beacon_count";

    pub fn new() -> Self {
        Self::default()
    }

    /// Format an estimate as a CSV record
    pub fn format(&self, estimate: &PositionEstimate) -> String {
        let record = format!(
            "{},{},{},{},{},{},{},{:?},{:?},{}",
            estimate.lat,
            estimate.lng,
            estimate.residual_norm,
            estimate.converged,
            estimate.iterations,
            estimate.underdetermined,
            estimate.quality,
            estimate.strategy,
            estimate.geometry_grade,
            estimate.beacon_count
        );
        if self.include_header {
            format!("{}\n{}", Self::HEADER, record)
        } else {
            record
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geometry::{GeometryGrade, SolveStrategy};

    fn sample_estimate() -> PositionEstimate {
        PositionEstimate {
            lat: 47.269212,
            lng: 11.404102,
            residual_norm: 0.42,
            converged: true,
            iterations: 5,
            underdetermined: false,
            quality: 0.87,
            strategy: SolveStrategy::LeastSquares,
            geometry_grade: GeometryGrade::Good,
            beacon_count: 6,
        }
    }

    #[test]
    fn test_text_block_format() {
        let text = TextFormatter::new().format(&sample_estimate());
        assert!(text.contains("47.269212"));
        assert!(text.contains("11.404102"));
        assert!(text.contains("converged=true"));
    }

    #[test]
    fn test_text_compact_format() {
        let formatter = TextFormatter {
            compact: true,
            precision: 4,
        };
        let text = formatter.format(&sample_estimate());
        assert!(text.contains("47.2692, 11.4041"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_compact_flags_underdetermined() {
        let mut estimate = sample_estimate();
        estimate.underdetermined = true;
        let formatter = TextFormatter {
            compact: true,
            precision: 6,
        };
        assert!(formatter.format(&estimate).contains("underdetermined"));
    }

    #[test]
    fn test_json_round_trip() {
        let estimate = sample_estimate();
        let json = JsonFormatter::new().format(&estimate).unwrap();
        let back: PositionEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(estimate, back);
    }

    #[test]
    fn test_csv_header_and_record() {
        let output = CsvFormatter::new().format(&sample_estimate());
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some(CsvFormatter::HEADER));
        let record = lines.next().unwrap();
        assert!(record.starts_with("47.269212,11.404102,"));
        assert!(record.contains("LeastSquares"));
    }

    #[test]
    fn test_csv_without_header() {
        let formatter = CsvFormatter {
            include_header: false,
        };
        let output = formatter.format(&sample_estimate());
        assert_eq!(output.lines().count(), 1);
    }
}
