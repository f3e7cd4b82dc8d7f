//! Human-readable explanations of routing decisions.
//!
//! Rendering is kept apart from selection so the engine can be tested without
//! looking at prose. Output depends only on the decision, so identical
//! decisions render identically.

use std::fmt::Write;

use triage_types::{ComponentCounts, Dimension, RoutingDecision};

/// Formats [`RoutingDecision`]s as text.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplanationRenderer;

impl ExplanationRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Multi-line explanation: chosen track and why, the scope breakdown and
    /// one line per rejected track in evaluation order.
    pub fn render(&self, decision: &RoutingDecision) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_explanation(&mut out, decision);
        out
    }

    /// One-line form for logs.
    pub fn render_summary(&self, decision: &RoutingDecision) -> String {
        format!(
            "{} -> {} ({}): {}",
            decision.artifact_id(),
            decision.track(),
            decision.confidence(),
            decision.primary_reason()
        )
    }

    fn write_explanation(
        &self,
        out: &mut String,
        decision: &RoutingDecision,
    ) -> std::fmt::Result {
        writeln!(out, "Routing decision {}", decision.artifact_id())?;
        writeln!(out, "  Request:    {}", decision.request())?;
        writeln!(out, "  Timestamp:  {}", decision.timestamp().to_rfc3339())?;
        writeln!(out, "  Thresholds: {}", decision.thresholds_version())?;
        writeln!(out)?;

        writeln!(
            out,
            "Selected `{}` ({}), confidence {}",
            decision.track(),
            decision.kind().description(),
            decision.confidence()
        )?;
        writeln!(out, "  Because: {}", decision.primary_reason())?;
        writeln!(out)?;

        writeln!(out, "Scope:")?;
        for (label, value) in breakdown(decision.counts()) {
            writeln!(out, "  {:<24}{}", label, value)?;
        }

        if !decision.alternatives().is_empty() {
            writeln!(out)?;
            writeln!(out, "Not selected:")?;
            for (track, reason) in decision.ordered_alternatives() {
                writeln!(out, "  `{}`: {}", track, reason)?;
            }
        }
        Ok(())
    }
}

/// Non-zero stored counts followed by the derived totals, which are always shown.
fn breakdown(counts: &ComponentCounts) -> Vec<(&'static str, u64)> {
    Dimension::STORED
        .into_iter()
        .filter(|d| counts.get(*d) > 0)
        .chain([
            Dimension::FilesChanged,
            Dimension::TotalFiles,
            Dimension::TotalTestWork,
        ])
        .map(|d| (d.field_name(), counts.get(d)))
        .collect()
}
