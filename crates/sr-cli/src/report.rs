use sr_core::models::{Candidate, Detection, DetectionTrace, StageTrace, SupportResistanceLevel};
use sr_core::utils::{format_date, format_price};
use std::fmt::Write;

const RULE: &str = "* -----------------------------";

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "* {}", title);
    let _ = writeln!(out, "{}", RULE);
}

fn candidate_section(
    out: &mut String,
    title: &str,
    candidates: &[Candidate<'_>],
    date_format: &str,
) {
    section(out, title);
    for c in candidates {
        let _ = writeln!(
            out,
            "{} : {} : {}",
            format_date(c.date(), date_format),
            format_price(c.price()),
            c.recurrence_count
        );
    }
    let _ = writeln!(out, "* COUNT : {}", candidates.len());
}

fn level_section(
    out: &mut String,
    title: &str,
    levels: &[SupportResistanceLevel],
    date_format: &str,
) {
    section(out, title);
    for level in levels {
        let _ = writeln!(
            out,
            "{} : {} : {}",
            format_date(level.date, date_format),
            format_price(level.price),
            level.strength
        );
    }
    let _ = writeln!(out, "* COUNT : {}", levels.len());
}

/// Final resistance and support levels as a text report
pub fn render_levels(detection: &Detection, date_format: &str) -> String {
    let mut out = String::new();
    level_section(&mut out, "RESISTANCE", &detection.resistance, date_format);
    level_section(&mut out, "SUPPORT", &detection.support, date_format);
    out
}

fn stage_sections(out: &mut String, name: &str, stages: &StageTrace<'_>, date_format: &str) {
    candidate_section(
        out,
        &format!("{} LOCAL EXTREMA", name),
        &stages.candidates,
        date_format,
    );
    candidate_section(
        out,
        &format!("{} WITH SIMILAR COUNTS", name),
        &stages.counted,
        date_format,
    );
    candidate_section(
        out,
        &format!("{} DOMINANT LEVELS", name),
        &stages.reduced,
        date_format,
    );
    candidate_section(
        out,
        &format!("{} WITHOUT MINOR LEVELS", name),
        &stages.filtered,
        date_format,
    );
}

/// The analysed window followed by every intermediate list of both pipelines
pub fn render_stages(trace: &DetectionTrace<'_>, date_format: &str) -> String {
    let mut out = String::new();

    section(&mut out, "SAMPLES");
    for sample in trace.window {
        let _ = writeln!(
            out,
            "{} : {}",
            format_date(sample.date, date_format),
            format_price(sample.price)
        );
    }
    let _ = writeln!(out, "* COUNT : {}", trace.window.len());

    stage_sections(&mut out, "HIGH", &trace.resistance, date_format);
    stage_sections(&mut out, "LOW", &trace.support, date_format);
    out
}
