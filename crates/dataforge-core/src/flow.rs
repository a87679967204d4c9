//! Data-flow summary of a configured pipeline

use crate::catalog::{tool_label, Icon, ToolCategory};
use crate::config::ProjectConfig;

/// A stage in the data flow, from sources to analytics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStage {
    pub label: &'static str,
    /// Tool name, fixed caption, or `Pending` when the stage has no tool yet
    pub detail: String,
    pub icon: Icon,
    /// Whether the stage is satisfied (fixed stages always are)
    pub active: bool,
}

impl FlowStage {
    fn fixed(label: &'static str, detail: &str, icon: Icon) -> Self {
        Self {
            label,
            detail: detail.to_string(),
            icon,
            active: true,
        }
    }

    fn tool(label: &'static str, tool: Option<&str>, icon: Icon) -> Self {
        Self {
            label,
            detail: tool.map(tool_label).unwrap_or_else(|| "Pending".to_string()),
            icon,
            active: tool.is_some(),
        }
    }
}

/// Stages of the pipeline in flow order
///
/// The quality gate only appears when a quality tool is selected.
pub fn pipeline_flow(config: &ProjectConfig) -> Vec<FlowStage> {
    let tools = &config.tools;
    let mut stages = vec![
        FlowStage::fixed("Sources", "API / DB / Files", Icon::Database),
        FlowStage::tool("Ingestion", tools.get(ToolCategory::Ingestion), Icon::Layers),
        FlowStage::fixed("Bronze Layer", "Raw Data", Icon::Box),
        FlowStage::tool(
            "Transformation",
            tools.get(ToolCategory::Transformation),
            ToolCategory::Transformation.icon(),
        ),
        FlowStage::fixed("Silver/Gold", "Modeled Data", Icon::Box),
    ];
    if let Some(quality) = tools.get(ToolCategory::Quality) {
        stages.push(FlowStage::tool("Data Quality", Some(quality), Icon::Shield));
    }
    stages.push(FlowStage::tool(
        "Analytics",
        tools.get(ToolCategory::Visualization),
        Icon::BarChart,
    ));
    stages
}

/// Plain-language description of what each selected stage does
pub fn pipeline_notes(config: &ProjectConfig) -> Vec<String> {
    let tools = &config.tools;
    let mut notes = Vec::new();
    if let Some(ingestion) = tools.get(ToolCategory::Ingestion) {
        notes.push(format!(
            "Ingestion: {} connects to the sources and lands raw data in the Bronze layer.",
            tool_label(ingestion)
        ));
    }
    if tools.is(ToolCategory::Transformation, "dbt") {
        notes.push(
            "Transformation: dbt reads Bronze, cleans it into Silver and aggregates business marts into Gold."
                .to_string(),
        );
    }
    if let Some(quality) = tools.get(ToolCategory::Quality) {
        notes.push(format!(
            "Quality: {} runs automated validations before data reaches analytics.",
            tool_label(quality)
        ));
    }
    if let Some(orchestration) = tools.get(ToolCategory::Orchestration) {
        notes.push(format!(
            "Orchestration: {} schedules the jobs, alerting and retrying when a step fails.",
            tool_label(orchestration)
        ));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flow_is_pending() {
        let stages = pipeline_flow(&ProjectConfig::default());
        let labels: Vec<_> = stages.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["Sources", "Ingestion", "Bronze Layer", "Transformation", "Silver/Gold", "Analytics"]
        );
        assert_eq!(stages[1].detail, "Pending");
        assert!(!stages[1].active);
        assert!(stages[0].active);
        assert!(pipeline_notes(&ProjectConfig::default()).is_empty());
    }

    #[test]
    fn test_quality_gate_inserted_before_analytics() {
        let config = ProjectConfig::default().with_tools(&[
            (ToolCategory::Quality, "soda"),
            (ToolCategory::Visualization, "metabase"),
        ]);
        let stages = pipeline_flow(&config);
        let gate = &stages[stages.len() - 2];
        assert_eq!(gate.label, "Data Quality");
        assert_eq!(gate.detail, "Soda");
        assert_eq!(stages.last().map(|s| s.detail.as_str()), Some("Metabase"));
    }

    #[test]
    fn test_notes_use_catalog_names() {
        let config = ProjectConfig::default().with_tools(&[
            (ToolCategory::Ingestion, "kafka"),
            (ToolCategory::Transformation, "dbt"),
            (ToolCategory::Orchestration, "in-house"),
        ]);
        let notes = pipeline_notes(&config);
        assert_eq!(notes.len(), 3);
        assert!(notes[0].starts_with("Ingestion: Kafka"));
        assert!(notes[2].starts_with("Orchestration: in-house"));
    }
}
