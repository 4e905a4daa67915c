//! Material report: piece counts and linear lengths per category.
//!
//! Derived from the model alone; resolution is not required.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use tenon_engine::Model;
use tenon_types::Category;

use crate::errors::ReportError;
use crate::metadata::ProjectMetadata;

/// One line of the piece table, in model insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct PieceLine {
    pub id: String,
    pub category: Category,
    pub length: f64,
}

/// Aggregated totals for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub count: usize,
    pub total_length: f64,
}

/// The bill of materials for a model.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialReport {
    pub project: ProjectMetadata,
    pub piece_count: usize,
    pub joint_count: usize,
    /// Sum of all piece lengths, mm.
    pub total_length: f64,
    /// Per-category totals, ordered by category name.
    pub categories: Vec<CategoryTotal>,
    pub pieces: Vec<PieceLine>,
}

impl MaterialReport {
    pub fn from_model(model: &Model, project: ProjectMetadata) -> Self {
        let mut by_category: BTreeMap<Category, (usize, f64)> = BTreeMap::new();
        let mut pieces = Vec::with_capacity(model.piece_count());
        let mut total_length = 0.0;

        for piece in model.pieces() {
            let entry = by_category.entry(piece.category).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += piece.length;
            total_length += piece.length;
            pieces.push(PieceLine {
                id: piece.id.clone(),
                category: piece.category,
                length: piece.length,
            });
        }

        let categories = by_category
            .into_iter()
            .map(|(category, (count, total_length))| CategoryTotal {
                category,
                count,
                total_length,
            })
            .collect();

        Self {
            project,
            piece_count: model.piece_count(),
            joint_count: model.connections().len(),
            total_length,
            categories,
            pieces,
        }
    }

    /// Render as a markdown document.
    pub fn to_markdown(&self, include_cut_diagram: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} — material report", self.project.name);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Generated {}",
            self.project.generated.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} pieces, {} joints, {:.0} mm of stock total.",
            self.piece_count, self.joint_count, self.total_length
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "## Pieces");
        let _ = writeln!(out);
        let _ = writeln!(out, "| id | category | length (mm) |");
        let _ = writeln!(out, "|----|----------|-------------|");
        for piece in &self.pieces {
            let _ = writeln!(
                out,
                "| {} | {} | {:.0} |",
                piece.id, piece.category, piece.length
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Stock per category");
        let _ = writeln!(out);
        let _ = writeln!(out, "| category | pieces | total length (mm) |");
        let _ = writeln!(out, "|----------|--------|-------------------|");
        for total in &self.categories {
            let _ = writeln!(
                out,
                "| {} | {} | {:.0} |",
                total.category, total.count, total.total_length
            );
        }

        if include_cut_diagram {
            let _ = writeln!(out);
            out.push_str(&self.cut_diagram());
        }
        out
    }

    /// A text cut diagram: one bar per piece, grouped by category and
    /// scaled to the longest piece in the report.
    pub fn cut_diagram(&self) -> String {
        const BAR_WIDTH: usize = 40;
        let longest = self
            .pieces
            .iter()
            .map(|p| p.length)
            .fold(0.0f64, f64::max)
            .max(1.0);
        let id_width = self.pieces.iter().map(|p| p.id.len()).max().unwrap_or(2);

        let mut out = String::new();
        let _ = writeln!(out, "## Cut diagram");
        let _ = writeln!(out);
        let _ = writeln!(out, "```");
        for total in &self.categories {
            let _ = writeln!(out, "{}", total.category);
            let mut group: Vec<&PieceLine> = self
                .pieces
                .iter()
                .filter(|p| p.category == total.category)
                .collect();
            group.sort_by(|a, b| b.length.total_cmp(&a.length).then(a.id.cmp(&b.id)));
            for piece in group {
                let bars = ((piece.length / longest) * BAR_WIDTH as f64).round() as usize;
                let _ = writeln!(
                    out,
                    "  {:id_width$}  {:>6.0} mm  {}",
                    piece.id,
                    piece.length,
                    "=".repeat(bars.max(1)),
                );
            }
        }
        let _ = writeln!(out, "```");
        out
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
