//! Console presentation of sweep summaries and datasets.

use std::time::Duration;

use console::style;

use pathbench_harness::compare::{ComparisonDataset, ScalingDataset};

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Print a styled header.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

/// Print a success message.
pub fn print_success(text: &str) {
    if is_color_disabled() {
        println!("[OK] {text}");
    } else {
        println!("{} {text}", style("[OK]").green().bold());
    }
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Print the comparison dataset, one line per workload.
#[allow(clippy::cast_possible_truncation)]
pub fn present_comparison(dataset: &ComparisonDataset) {
    print_header("Serial vs parallel");
    for p in &dataset.points {
        let serial = format_duration(Duration::from_millis(p.serial_ms as u64));
        let parallel = format_duration(Duration::from_millis(p.parallel_ms as u64));
        println!(
            "{:<20} {:>8} updates  serial {serial:>10}  parallel({}) {parallel:>10}",
            p.workload, p.item_count, p.parallel_processes
        );
    }
}

/// Print the scaling dataset, one line per process count.
#[allow(clippy::cast_possible_truncation)]
pub fn present_scaling(dataset: &ScalingDataset) {
    print_header(&format!("Scaling: {}", dataset.workload));
    for p in &dataset.points {
        let duration = format_duration(Duration::from_millis(p.duration_ms as u64));
        println!("np={:<4} {duration:>10}", p.processes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_scales() {
        assert_eq!(format_duration(Duration::from_micros(5)), "5.00µs");
        assert_eq!(format_duration(Duration::from_millis(250)), "250.00ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.000s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn color_check_does_not_panic() {
        let _ = is_color_disabled();
    }
}
