//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized

use crate::analysis::PhillipsRelation;
use crate::app::pipeline::{CrossingOutput, PhillipsOutput, SelectionOutput, SkippedModel};
use crate::domain::{AcceptanceRule, StandardizationParameters};

/// Format the list of available models.
pub fn format_models(ids: &[String], extension: &str) -> String {
    let mut out = format!("Models with .{extension} tables: {}\n", ids.len());
    for id in ids {
        out.push_str(&format!("  {id}\n"));
    }
    out
}

/// Format the standardization selection (settings, per-entry verdicts, accepted ids).
pub fn format_selection(selection: &SelectionOutput, params: &StandardizationParameters, rule: AcceptanceRule) -> String {
    let mut out = String::new();

    out.push_str("=== light - standardization selection ===\n");
    out.push_str(&format!(
        "Relation: M = {:.3} - {:.3}*x1 + {:.3}*c  (band ±{:.3}, rule={})\n",
        params.intercept,
        params.slope_x1,
        params.slope_color,
        params.half_band_width,
        rule_label(rule)
    ));
    out.push('\n');

    out.push_str(
        format!(
            "{:<20} {:>8} {:>8} {:>9} {:>9} {:>9} {:>9} {:<6}",
            "id", "x1", "c", "mag", "surface", "lower", "upper", "inside"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<20} {:-<8} {:-<8} {:-<9} {:-<9} {:-<9} {:-<9} {:-<6}",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (entry, c) in selection.catalog.entries().iter().zip(&selection.classification.entries) {
        out.push_str(&format!(
            "{:<20} {:>8.3} {:>8.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:<6}\n",
            truncate(&c.id, 20),
            entry.x1,
            entry.color,
            c.magnitude,
            c.surface,
            c.lower,
            c.upper,
            if c.inside { "yes" } else { "no" }
        ));
    }

    let accepted = selection.classification.accepted_ids();
    out.push_str(&format!(
        "\nAccepted: {}/{}\n",
        accepted.len(),
        selection.classification.len()
    ));
    if !accepted.is_empty() {
        out.push_str(&format!("  {}\n", accepted.join(", ")));
    }
    out.push_str(&format_skipped(&selection.skipped));
    out
}

/// Format crossing times per model.
pub fn format_crossings(output: &CrossingOutput, eps: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== light - crossing times (eps={eps:e}) ===\n"));

    out.push_str(
        format!(
            "{:<20} {:>5} {:>9} {:>9} {:>9} {:>9}",
            "model", "M_Ni", "t_A", "t_B", "logL_A", "logL_B"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<5} {:-<9} {:-<9} {:-<9} {:-<9}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for c in &output.crossings {
        match c.crossing.found() {
            Some(x) => out.push_str(&format!(
                "{:<20} {:>5.1} {:>9.2} {:>9.2} {:>9.3} {:>9.3}\n",
                truncate(&c.id, 20),
                c.nickel_mass,
                x.t_a,
                x.t_b,
                x.value_at_a,
                x.value_at_b
            )),
            None => out.push_str(&format!(
                "{:<20} {:>5.1} {:>9}\n",
                truncate(&c.id, 20),
                c.nickel_mass,
                "no crossing"
            )),
        }
    }

    out.push_str(&format_skipped(&output.skipped));
    out
}

/// Format the peak / decline table with the Phillips band check.
pub fn format_phillips(output: &PhillipsOutput, relation: &PhillipsRelation) -> String {
    let mut out = String::new();
    out.push_str("=== light - Phillips relation ===\n");
    out.push_str(&format!(
        "Relation: M_V = {:.3} + {:.3}*dm15 ± {:.3}\n\n",
        relation.intercept, relation.slope, relation.sigma
    ));

    out.push_str(
        format!(
            "{:<20} {:>8} {:>8} {:>7} {:>8} {:<6}",
            "model", "M_B", "M_V", "dm15", "M_V fit", "within"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<8} {:-<8} {:-<7} {:-<8} {:-<6}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in &output.rows {
        out.push_str(
            format!(
                "{:<20} {:>8.3} {:>8.3} {:>7} {:>8} {:<6}",
                truncate(&r.id, 20),
                r.summary.peak_b,
                r.summary.peak_v,
                fmt_opt(r.summary.delta_m15, 3),
                fmt_opt(r.predicted_v, 3),
                match r.within_band {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "-",
                }
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str(&format_skipped(&output.skipped));
    out
}

fn format_skipped(skipped: &[SkippedModel]) -> String {
    if skipped.is_empty() {
        return String::new();
    }
    let mut out = format!("\nSkipped: {}\n", skipped.len());
    for s in skipped {
        out.push_str(&format!("  {}: {}\n", s.id, s.reason));
    }
    out
}

fn rule_label(rule: AcceptanceRule) -> &'static str {
    match rule {
        AcceptanceRule::EmbeddedRadius => "embedded-radius",
        AcceptanceRule::Linear => "linear",
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.precision$}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
