//! Output formatting for CLI

use crate::{arena::MatchResult, persistence::SavedPolicy, training::TrainingReport};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Summarise a saved policy envelope
pub fn print_saved_policy(saved: &SavedPolicy) {
    print_kv("Method", &saved.method.to_string());
    print_kv("States covered", &format_number(saved.policy.len()));
    if let Some(values) = &saved.values {
        print_kv("Value entries", &format_number(values.len()));
    }
    if let Some(q) = &saved.q_values {
        print_kv("Q states (X/O)", &format!("{}/{}", q.x.size(), q.o.size()));
    }
    let meta = &saved.metadata;
    if let Some(sweeps) = meta.sweeps {
        print_kv("Sweeps", &sweeps.to_string());
    }
    if let Some(converged) = meta.converged {
        print_kv("Converged", &converged.to_string());
    }
    if let Some(episodes) = meta.episodes {
        print_kv("Episodes", &format_number(episodes));
    }
    if let Some(seed) = meta.seed {
        print_kv("Seed", &seed.to_string());
    }
    if let Some(opponent) = &meta.opponent {
        print_kv("Opponent", opponent);
    }
}

/// Print per-role results of a sampling run
pub fn print_training_report(report: &TrainingReport) {
    for role in &report.roles {
        print_kv(
            &format!("Learner as {}", role.role),
            &format!(
                "{} episodes, W {} / D {} / L {}, final epsilon {:.4}",
                format_number(role.episodes),
                percent(role.win_rate()),
                percent(role.draw_rate()),
                percent(role.loss_rate()),
                role.final_epsilon
            ),
        );
    }
    print_kv("States covered", &format_number(report.states_covered));
}

/// Print a match tally
pub fn print_match_result(label: &str, result: &MatchResult) {
    print_kv(
        label,
        &format!(
            "{} games, W {} ({}) / D {} ({}) / L {} ({})",
            format_number(result.games),
            result.wins,
            percent(result.win_rate),
            result.draws,
            percent(result.draw_rate),
            result.losses,
            percent(result.loss_rate)
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(5478), "5,478");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }
}
