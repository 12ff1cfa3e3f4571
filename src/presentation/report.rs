// Plain-text rendering of a diagnosis for operators
use crate::domain::diagnosis::Diagnosis;

const FAULT_HEADLINE: &str = "Fault Detected — Maintenance Required";
const NORMAL_HEADLINE: &str = "Normal Operation — No Fault Detected";
const ALL_CLEAR: &str = "All physics metrics are within safe operating ranges.";

pub fn render_report(diagnosis: &Diagnosis) -> String {
    let verdict = &diagnosis.verdict;
    let physics = &diagnosis.physics;

    let headline = if verdict.is_fault {
        FAULT_HEADLINE
    } else {
        NORMAL_HEADLINE
    };
    let mut lines = vec![
        "AI Model Prediction".to_string(),
        headline.to_string(),
        format!(
            "Model's Probability of Fault: {}",
            percent(verdict.fault_probability)
        ),
        String::new(),
        "Physics-Based Validation".to_string(),
        format!(
            "Expected Power Output: {} W",
            group_thousands(physics.expected_power_w.trunc() as i64)
        ),
        format!("Efficiency: {}", percent(physics.efficiency)),
        format!("Tip Speed Ratio (TSR): {:.2}", physics.tip_speed_ratio),
    ];

    if physics.anomalies.is_empty() {
        lines.push(ALL_CLEAR.to_string());
    } else {
        lines.extend(physics.anomalies.iter().map(|a| format!("Warning: {}", a)));
    }
    lines.push("Validation complete.".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// 1234567 -> "1,234,567"
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
