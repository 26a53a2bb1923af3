//! Terminal formatting for the scenario reports.

use ferrite_perceptron::EpochStats;

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const RESET: &str = "\x1b[0m";

pub fn section(title: &str) {
    println!("\n[ {YELLOW}{title}{RESET} ]");
}

/// Colored `[ 03/30 SUCCESS ]` style prefix.
pub fn verdict(index: usize, total: usize, ok: bool) -> String {
    let (color, word) = if ok { (GREEN, "SUCCESS") } else { (RED, "FAILURE") };
    format!("[ {color}{index:02}/{total:02} {word}{RESET} ]")
}

/// `w·x + b = 0` solved for x, or `None` when the weight is zero.
pub fn crossing(weight: f64, bias: f64) -> Option<f64> {
    if weight == 0.0 {
        None
    } else {
        Some(-bias / weight)
    }
}

/// `w0·x + w1·y + b = 0` rearranged to `y = slope·x + intercept`, or `None`
/// when `w1` is zero and the boundary is vertical.
pub fn solve_for_y(w0: f64, w1: f64, bias: f64) -> Option<(f64, f64)> {
    if w1 == 0.0 {
        None
    } else {
        Some((-w0 / w1, -bias / w1))
    }
}

/// One line on how the misclassification count evolved.
pub fn learning_curve(stats: &[EpochStats]) {
    let Some(last) = stats.last() else {
        return;
    };
    match stats.iter().position(EpochStats::is_clean) {
        Some(i) => println!(
            "First epoch with no misclassified samples: {} of {}.",
            stats[i].epoch, last.total_epochs
        ),
        None => println!(
            "Never reached an epoch without mistakes; \
             last epoch misclassified {} sample(s) ({:.0}% accuracy).",
            last.misclassified,
            last.accuracy * 100.0
        ),
    }
}
