//! Structured text render reports, and the stable `PART:` line stream.
//!
//! The part stream is the one parseable textual contract the annotation
//! layer guarantees: one `PART:<number>` line per listed part, in
//! traversal order, duplicates preserved. Everything else in a report is
//! for human eyes.

use std::io::{self, Write};

use annotate_engine::types::RenderSummary;
use geom_bridge::MockGeometry;

/// Write the `PART:` line stream for a render's listed parts.
pub fn write_part_lines<W: Write>(out: &mut W, parts: &[String]) -> io::Result<()> {
    for part in parts {
        writeln!(out, "PART:{}", part)?;
    }
    Ok(())
}

/// The `PART:` line stream as a single string.
pub fn part_lines(parts: &[String]) -> String {
    let mut buf = Vec::new();
    write_part_lines(&mut buf, parts).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("part lines are valid UTF-8")
}

/// A complete render report.
pub struct RenderReport {
    pub emitted: usize,
    pub text_count: usize,
    pub stroke_count: usize,
    pub region_count: usize,
    pub parts: Vec<String>,
    pub warnings: Vec<String>,
}

impl RenderReport {
    pub fn new(summary: &RenderSummary, mock: &MockGeometry) -> Self {
        Self {
            emitted: summary.emitted,
            text_count: mock.texts.len(),
            stroke_count: mock.strokes.len(),
            region_count: mock.regions.len(),
            parts: summary.parts.clone(),
            warnings: summary.warnings.clone(),
        }
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Redline Render Report ===\n\n");
        out.push_str(&format!(
            "Primitives: {} ({} text, {} strokes, {} regions)\n",
            self.emitted, self.text_count, self.stroke_count, self.region_count,
        ));

        out.push_str(&format!("\nParts ({}):\n", self.parts.len()));
        out.push_str(&part_lines(&self.parts));

        if !self.warnings.is_empty() {
            out.push_str(&format!("\nWarnings ({}):\n", self.warnings.len()));
            for warning in &self.warnings {
                out.push_str(&format!("  - {}\n", warning));
            }
        }
        out
    }
}
