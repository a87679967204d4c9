//! Project README renderer

use super::tool_cell;
use crate::catalog::ToolCategory;
use crate::config::{ProjectConfig, ToolSelection};

/// Whether the prerequisites list the Terraform CLI
pub fn needs_terraform_cli(tools: &ToolSelection) -> bool {
    tools.is(ToolCategory::Iac, "terraform")
}

/// Local service URLs advertised in the README, in display order
///
/// The MinIO console line is always listed, whatever the storage selection.
pub fn service_urls(tools: &ToolSelection) -> Vec<(&'static str, &'static str)> {
    let mut urls = Vec::new();
    if tools.is(ToolCategory::Orchestration, "airflow") {
        urls.push(("Airflow", "http://localhost:8080"));
    }
    urls.push(("MinIO (S3)", "http://localhost:9001"));
    if tools.is(ToolCategory::Visualization, "superset") {
        urls.push(("Superset", "http://localhost:8088"));
    }
    if tools.is(ToolCategory::Visualization, "metabase") {
        urls.push(("Metabase", "http://localhost:3000"));
    }
    if tools.is(ToolCategory::Visualization, "jupyter") {
        urls.push(("Jupyter", "http://localhost:8888"));
    }
    urls
}

fn stack_table(tools: &ToolSelection) -> String {
    let cell = |category| tool_cell(tools.get(category), "N/A");
    let rows = [
        (
            "Infra",
            format!(
                "{} / {}",
                tool_cell(tools.get(ToolCategory::Cloud), "Local"),
                tool_cell(tools.get(ToolCategory::Iac), "Manual")
            ),
            "Base infrastructure",
        ),
        ("Ingestion", cell(ToolCategory::Ingestion), "Raw data movement"),
        (
            "Storage",
            cell(ToolCategory::Warehouse),
            "Bronze -> Silver -> Gold (Medallion)",
        ),
        (
            "Transformation",
            cell(ToolCategory::Transformation),
            "Cleaning and modeling",
        ),
        (
            "Orchestration",
            cell(ToolCategory::Orchestration),
            "Dependency management and scheduling",
        ),
        (
            "Visualization",
            cell(ToolCategory::Visualization),
            "Dashboards and insights",
        ),
        ("Quality", cell(ToolCategory::Quality), "Data tests and validation"),
    ];

    let mut table = String::from("| Layer | Tool | Description |\n|------|-------------|-------------|\n");
    for (layer, tool, description) in rows {
        table.push_str(&format!("| **{}** | {} | {} |\n", layer, tool, description));
    }
    table
}

fn prerequisites(tools: &ToolSelection) -> String {
    let mut lines = vec!["- Docker & Docker Compose v2+", "- Python 3.9+"];
    if needs_terraform_cli(tools) {
        lines.push("- Terraform CLI");
    }
    lines.join("\n")
}

/// Render README.md
pub fn readme(config: &ProjectConfig) -> String {
    let tools = &config.tools;
    let services: String = service_urls(tools)
        .into_iter()
        .map(|(name, url)| format!("- {}: {}\n", name, url))
        .collect();

    format!(
        r#"# {name}

{description}

## Project Architecture

This project follows a modern data engineering architecture, designed for scalability and maintainability.

### Tech Stack
{table}
## Quick Start

### 1. Prerequisites
{prerequisites}

### 2. Environment
Copy the example file and adjust your credentials:
```bash
cp .env.example .env
```

### 3. Services (Docker)
Start the local infrastructure (database, orchestrator, visualization tools):
```bash
docker-compose up -d
```
Services are available at:
{services}
### 4. Development Setup
```bash
python -m venv venv
source venv/bin/activate
pip install -r requirements.txt
```

Generated by **DataForge**.
"#,
        name = config.project_name,
        description = config.description,
        table = stack_table(tools),
        prerequisites = prerequisites(tools),
        services = services,
    )
}
