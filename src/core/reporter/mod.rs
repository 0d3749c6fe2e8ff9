//! # Reporter Module
//!
//! Formats a [`ComparisonResult`] for people and for scripts.
//!
//! ## Formats
//! - **Text** - the `comparison_report.txt` layout
//! - **JSON** - the serialized result, pretty-printed

use crate::core::comparator::ComparisonResult;
use std::io::Write;

/// Render the plain-text report
pub fn render_text(result: &ComparisonResult) -> String {
    let verdict = if result.is_similar() {
        "The images are similar"
    } else {
        "The images are not similar"
    };

    format!(
        "Image Comparison Report\n\
         {verdict}\n\
         Total Pixels: {}\n\
         Pixels Differing: {}\n\
         Difference Percentage: {:.2}%\n\
         Tolerance Value: {}%\n\
         Threshold: {}\n",
        result.total_pixels,
        result.differing_pixels,
        result.percent_different,
        result.tolerance_percent,
        result.threshold,
    )
}

/// Write the plain-text report
pub fn export_text<W: Write>(result: &ComparisonResult, mut writer: W) -> std::io::Result<()> {
    writer.write_all(render_text(result).as_bytes())
}

/// Write the result as pretty-printed JSON
pub fn export_json<W: Write>(result: &ComparisonResult, mut writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)
}

/// A compact bar showing the share of differing pixels:
/// `[██░░░░░░░░] 25.00%`
pub fn difference_bar(percent_different: f64) -> String {
    let filled = ((percent_different / 10.0).round() as usize).min(10);
    let empty = 10 - filled;

    format!(
        "[{}{}] {:.2}%",
        "█".repeat(filled),
        "░".repeat(empty),
        percent_different
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(differing: u64, total: u64, tolerance: f64, threshold: u8) -> ComparisonResult {
        ComparisonResult {
            total_pixels: total,
            differing_pixels: differing,
            percent_different: 100.0 * differing as f64 / total as f64,
            tolerance_percent: tolerance,
            threshold,
        }
    }

    #[test]
    fn text_report_lists_counts() {
        let report = render_text(&result(1, 4, 0.0, 0));

        assert!(report.starts_with("Image Comparison Report\n"));
        assert!(report.contains("The images are not similar"));
        assert!(report.contains("Total Pixels: 4\n"));
        assert!(report.contains("Pixels Differing: 1\n"));
        assert!(report.contains("Difference Percentage: 25.00%\n"));
        assert!(report.contains("Tolerance Value: 0%\n"));
    }

    #[test]
    fn text_report_declares_similarity() {
        let report = render_text(&result(0, 10_000, 12.5, 32));

        assert!(report.contains("The images are similar"));
        assert!(report.contains("Tolerance Value: 12.5%"));
        assert!(report.contains("Threshold: 32"));
    }

    #[test]
    fn percentage_is_rounded_to_two_places() {
        let report = render_text(&result(10, 1000 * 3, 0.0, 0));
        assert!(report.contains("Difference Percentage: 0.33%"));
    }

    #[test]
    fn export_text_writes_report() {
        let mut buffer = Vec::new();
        export_text(&result(10, 1000, 0.0, 0), &mut buffer).unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert!(written.contains("Pixels Differing: 10"));
    }

    #[test]
    fn export_json_is_parseable() {
        let expected = result(1, 4, 0.0, 0);
        let mut buffer = Vec::new();
        export_json(&expected, &mut buffer).unwrap();

        let parsed: ComparisonResult = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(difference_bar(0.0), "[░░░░░░░░░░] 0.00%");
        assert_eq!(difference_bar(100.0), "[██████████] 100.00%");

        let half = difference_bar(50.0);
        assert!(half.contains("█████░░░░░"));
    }
}
