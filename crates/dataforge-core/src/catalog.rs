//! Static tool and project template catalogs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pipeline stage a tool belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Cloud,
    Ingestion,
    Warehouse,
    Transformation,
    Quality,
    Orchestration,
    Visualization,
    Container,
    Iac,
}

impl ToolCategory {
    /// All categories in wizard order
    pub const ALL: [ToolCategory; 9] = [
        ToolCategory::Cloud,
        ToolCategory::Ingestion,
        ToolCategory::Warehouse,
        ToolCategory::Transformation,
        ToolCategory::Quality,
        ToolCategory::Orchestration,
        ToolCategory::Visualization,
        ToolCategory::Container,
        ToolCategory::Iac,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolCategory::Cloud => "cloud",
            ToolCategory::Ingestion => "ingestion",
            ToolCategory::Warehouse => "warehouse",
            ToolCategory::Transformation => "transformation",
            ToolCategory::Quality => "quality",
            ToolCategory::Orchestration => "orchestration",
            ToolCategory::Visualization => "visualization",
            ToolCategory::Container => "container",
            ToolCategory::Iac => "iac",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Cloud => "Cloud Provider",
            ToolCategory::Ingestion => "Data Ingestion",
            ToolCategory::Warehouse => "Storage",
            ToolCategory::Transformation => "Processing",
            ToolCategory::Quality => "Quality & Governance",
            ToolCategory::Orchestration => "Orchestration",
            ToolCategory::Visualization => "Visualization",
            ToolCategory::Container => "Containers",
            ToolCategory::Iac => "Infrastructure",
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            ToolCategory::Cloud => Icon::Cloud,
            ToolCategory::Ingestion => Icon::Layers,
            ToolCategory::Warehouse => Icon::Database,
            ToolCategory::Transformation => Icon::Code,
            ToolCategory::Quality => Icon::Shield,
            ToolCategory::Orchestration => Icon::Workflow,
            ToolCategory::Visualization => Icon::BarChart,
            ToolCategory::Container => Icon::Box,
            ToolCategory::Iac => Icon::Server,
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool category '{0}'. Expected one of: cloud, ingestion, warehouse, transformation, quality, orchestration, visualization, container, iac")]
pub struct UnknownCategory(pub String);

impl FromStr for ToolCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cloud" => Ok(ToolCategory::Cloud),
            "ingestion" => Ok(ToolCategory::Ingestion),
            "warehouse" => Ok(ToolCategory::Warehouse),
            "transformation" => Ok(ToolCategory::Transformation),
            "quality" => Ok(ToolCategory::Quality),
            "orchestration" => Ok(ToolCategory::Orchestration),
            "visualization" => Ok(ToolCategory::Visualization),
            "container" => Ok(ToolCategory::Container),
            "iac" | "infrastructure" => Ok(ToolCategory::Iac),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Display icon for a category or tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Cloud,
    Layers,
    Database,
    Settings,
    Code,
    Workflow,
    BarChart,
    Server,
    Box,
    Shield,
}

impl Icon {
    /// Terminal glyph used by the wizard and the CLI listings
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Cloud => "☁",
            Icon::Layers => "≋",
            Icon::Database => "⛁",
            Icon::Settings => "⚙",
            Icon::Code => "⌘",
            Icon::Workflow => "⇄",
            Icon::BarChart => "▤",
            Icon::Server => "▣",
            Icon::Box => "▢",
            Icon::Shield => "⛨",
        }
    }
}

/// A selectable tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ToolCategory,
    pub icon: Icon,
    pub description: &'static str,
}

const fn tool(
    id: &'static str,
    name: &'static str,
    category: ToolCategory,
    icon: Icon,
    description: &'static str,
) -> Tool {
    Tool {
        id,
        name,
        category,
        icon,
        description,
    }
}

pub const TOOLS: &[Tool] = &[
    // Cloud
    tool("aws", "AWS", ToolCategory::Cloud, Icon::Cloud, "Amazon Web Services (S3, EMR, Redshift)"),
    tool(
        "gcp",
        "Google Cloud",
        ToolCategory::Cloud,
        Icon::Cloud,
        "Google Cloud Platform (GCS, BigQuery)",
    ),
    tool("azure", "Azure", ToolCategory::Cloud, Icon::Cloud, "Microsoft Azure (ADLS, Synapse)"),
    // Ingestion
    tool(
        "airbyte",
        "Airbyte",
        ToolCategory::Ingestion,
        Icon::Layers,
        "ELT: Open-source data integration",
    ),
    tool(
        "fivetran",
        "Fivetran",
        ToolCategory::Ingestion,
        Icon::Layers,
        "ELT: Automated managed data movement",
    ),
    tool(
        "kafka",
        "Kafka",
        ToolCategory::Ingestion,
        Icon::Layers,
        "Streaming: Distributed event streaming",
    ),
    tool(
        "python",
        "Custom Python",
        ToolCategory::Ingestion,
        Icon::Layers,
        "Custom: Requests/Pandas scripts",
    ),
    // Warehouse / storage
    tool(
        "snowflake",
        "Snowflake",
        ToolCategory::Warehouse,
        Icon::Database,
        "Warehouse: Cloud Data Warehouse",
    ),
    tool(
        "bigquery",
        "BigQuery",
        ToolCategory::Warehouse,
        Icon::Database,
        "Warehouse: Serverless Data Warehouse",
    ),
    tool(
        "duckdb",
        "DuckDB",
        ToolCategory::Warehouse,
        Icon::Database,
        "OLAP: In-process high-performance SQL",
    ),
    tool(
        "postgres",
        "PostgreSQL",
        ToolCategory::Warehouse,
        Icon::Database,
        "OLTP/OLAP: Reliable Relational Database",
    ),
    tool(
        "s3",
        "Data Lake (S3/MinIO)",
        ToolCategory::Warehouse,
        Icon::Database,
        "Lake: Object Storage (Parquet/Delta)",
    ),
    // Transformation
    tool(
        "dbt",
        "dbt Core",
        ToolCategory::Transformation,
        Icon::Settings,
        "SQL-based transformation & modeling",
    ),
    tool(
        "spark",
        "Apache Spark",
        ToolCategory::Transformation,
        Icon::Settings,
        "Distributed data processing",
    ),
    tool(
        "polars",
        "Polars",
        ToolCategory::Transformation,
        Icon::Settings,
        "Lightning-fast DataFrame library",
    ),
    // Orchestration
    tool(
        "airflow",
        "Apache Airflow",
        ToolCategory::Orchestration,
        Icon::Workflow,
        "Platform to programmatically author workflows",
    ),
    tool(
        "dagster",
        "Dagster",
        ToolCategory::Orchestration,
        Icon::Workflow,
        "Cloud-native data orchestrator",
    ),
    tool(
        "prefect",
        "Prefect",
        ToolCategory::Orchestration,
        Icon::Workflow,
        "Modern workflow coordination",
    ),
    // Visualization
    tool(
        "superset",
        "Apache Superset",
        ToolCategory::Visualization,
        Icon::BarChart,
        "Modern enterprise BI",
    ),
    tool(
        "metabase",
        "Metabase",
        ToolCategory::Visualization,
        Icon::BarChart,
        "Easy, open source business intelligence",
    ),
    tool(
        "streamlit",
        "Streamlit",
        ToolCategory::Visualization,
        Icon::BarChart,
        "Interactive data apps in Python",
    ),
    tool(
        "jupyter",
        "Jupyter Notebooks",
        ToolCategory::Visualization,
        Icon::BarChart,
        "Interactive computing & analysis",
    ),
    // IaC
    tool("terraform", "Terraform", ToolCategory::Iac, Icon::Server, "Infrastructure as Code"),
    // Container
    tool("docker", "Docker", ToolCategory::Container, Icon::Box, "Containerization & Compose"),
    // Quality & governance
    tool(
        "great_expectations",
        "Great Expectations",
        ToolCategory::Quality,
        Icon::Shield,
        "Data quality & validation",
    ),
    tool("soda", "Soda", ToolCategory::Quality, Icon::Shield, "Data observability & contracts"),
];

/// Look up a tool by id
pub fn find_tool(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

/// Tools belonging to a category, in catalog order
pub fn tools_in(category: ToolCategory) -> impl Iterator<Item = &'static Tool> {
    TOOLS.iter().filter(move |t| t.category == category)
}

/// Human-readable name for a tool id, falling back to the raw id
pub fn tool_label(id: &str) -> String {
    find_tool(id)
        .map(|t| t.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// A named preset of tool selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Partial selection; `None` clears the category, absent categories are left alone
    pub tools: &'static [(ToolCategory, Option<&'static str>)],
}

pub const TEMPLATES: &[ProjectTemplate] = &[
    ProjectTemplate {
        id: "lakehouse",
        name: "Modern Data Lakehouse",
        description: "Full Medallion architecture (Bronze/Silver/Gold) using S3, Spark/dbt and Airflow.",
        tools: &[
            (ToolCategory::Cloud, Some("aws")),
            (ToolCategory::Ingestion, Some("airbyte")),
            (ToolCategory::Warehouse, Some("s3")),
            (ToolCategory::Transformation, Some("spark")),
            (ToolCategory::Orchestration, Some("airflow")),
            (ToolCategory::Visualization, Some("superset")),
            (ToolCategory::Iac, Some("terraform")),
            (ToolCategory::Container, Some("docker")),
            (ToolCategory::Quality, Some("great_expectations")),
        ],
    },
    ProjectTemplate {
        id: "streaming",
        name: "Real-time Streaming",
        description: "Real-time event pipeline with Kafka, Spark Streaming and DuckDB.",
        tools: &[
            (ToolCategory::Cloud, Some("aws")),
            (ToolCategory::Ingestion, Some("kafka")),
            (ToolCategory::Warehouse, Some("duckdb")),
            (ToolCategory::Transformation, Some("spark")),
            (ToolCategory::Orchestration, Some("prefect")),
            (ToolCategory::Visualization, Some("metabase")),
            (ToolCategory::Iac, Some("terraform")),
            (ToolCategory::Container, Some("docker")),
            (ToolCategory::Quality, None),
        ],
    },
    ProjectTemplate {
        id: "mds",
        name: "Modern Data Stack (MDS)",
        description: "Standard stack: Snowflake (Warehouse), dbt (Transform), Airflow (Orchestrate).",
        tools: &[
            (ToolCategory::Cloud, Some("aws")),
            (ToolCategory::Ingestion, Some("fivetran")),
            (ToolCategory::Warehouse, Some("snowflake")),
            (ToolCategory::Transformation, Some("dbt")),
            (ToolCategory::Orchestration, Some("airflow")),
            (ToolCategory::Visualization, Some("superset")),
            (ToolCategory::Iac, Some("terraform")),
            (ToolCategory::Container, Some("docker")),
            (ToolCategory::Quality, Some("great_expectations")),
        ],
    },
    ProjectTemplate {
        id: "local-analytics",
        name: "Local Analytics Engineer",
        description: "Lightweight, powerful stack for local analysis: DuckDB + dbt + Streamlit + Jupyter.",
        tools: &[
            (ToolCategory::Cloud, None),
            (ToolCategory::Ingestion, Some("python")),
            (ToolCategory::Warehouse, Some("duckdb")),
            (ToolCategory::Transformation, Some("dbt")),
            (ToolCategory::Orchestration, Some("prefect")),
            (ToolCategory::Visualization, Some("jupyter")),
            (ToolCategory::Iac, None),
            (ToolCategory::Container, Some("docker")),
            (ToolCategory::Quality, None),
        ],
    },
];

/// Look up a project template by id
pub fn find_template(id: &str) -> Option<&'static ProjectTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl ProjectTemplate {
    /// Names of the tools this template selects (for previews)
    pub fn tool_names(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter_map(|(_, id)| id.map(tool_label))
            .collect()
    }
}
