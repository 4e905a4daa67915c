//! Test harness for end-to-end assembly scenarios.
//!
//! [`PlanBuilder`] accumulates plan statements and runs the full
//! text -> model -> assembly pipeline in one call, so scenario tests read
//! like the plans users write.

use plan_format::{parse_plan, ParseError};
use tenon_engine::{resolve, Assembly, EngineError, Model};

/// Unified error type for the harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Fluent builder for plan text.
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    lines: Vec<String>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a piece statement: `(id:category =length)`.
    pub fn piece(mut self, id: &str, category: &str, length: f64) -> Self {
        self.lines.push(format!("({id}:{category} ={length})"));
        self
    }

    /// Add a joint statement from its three anchor/pose tokens.
    pub fn joint(mut self, base: &str, spec: &str, target: &str) -> Self {
        self.lines.push(format!("{base} -[{spec}]- {target}"));
        self
    }

    /// Add a raw plan line verbatim.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// The accumulated plan text.
    pub fn text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Parse the plan into a model.
    pub fn model(&self) -> Result<Model, HarnessError> {
        Ok(parse_plan(&self.text())?)
    }

    /// Parse and resolve in one step.
    pub fn assembly(&self) -> Result<(Model, Assembly), HarnessError> {
        let model = self.model()?;
        let assembly = resolve(&model)?;
        Ok((model, assembly))
    }
}

/// Assert that every joint's two anchor points coincide within `tol`.
pub fn assert_joints_closed(assembly: &Assembly, tol: f64) {
    for joint in assembly.joints() {
        let gap = joint.base_point.distance_to(&joint.target_point);
        assert!(
            gap < tol,
            "joint {} -> {} left a {gap}mm gap between anchors",
            joint.base,
            joint.target
        );
    }
}
