//! Project structure generation
//!
//! `generate` maps a configuration to the ordered list of root nodes of the
//! project skeleton. Each pipeline stage contributes its subtree
//! independently; stages with nothing to contribute are omitted entirely.

use crate::catalog::ToolCategory;
use crate::config::{ProjectConfig, ToolSelection};
use crate::render::{self, stubs};
use crate::tree::FileNode;

const BASE_REQUIREMENTS: &[&str] = &["pandas", "python-dotenv"];

/// Extra requirement lines, each gated on one tool selection
const TOOL_REQUIREMENTS: &[(ToolCategory, &str, &[&str])] = &[
    (ToolCategory::Orchestration, "airflow", &["apache-airflow"]),
    (ToolCategory::Orchestration, "prefect", &["prefect"]),
    (ToolCategory::Transformation, "dbt", &["dbt-core", "dbt-postgres"]),
    (ToolCategory::Transformation, "polars", &["polars"]),
    (ToolCategory::Ingestion, "kafka", &["kafka-python"]),
    (ToolCategory::Quality, "great_expectations", &["great_expectations"]),
];

/// Medallion layer names, in refinement order
pub const MEDALLION_LAYERS: [&str; 3] = ["bronze", "silver", "gold"];

/// Build the requirements.txt content
pub fn requirements(tools: &ToolSelection) -> String {
    let extra = TOOL_REQUIREMENTS
        .iter()
        .filter(|(category, tool, _)| tools.is(*category, tool))
        .flat_map(|(_, _, lines)| lines.iter());

    BASE_REQUIREMENTS
        .iter()
        .chain(extra)
        .map(|line| format!("{}\n", line))
        .collect()
}

fn root_files(config: &ProjectConfig) -> Vec<FileNode> {
    vec![
        FileNode::file("README.md", render::readme(config)),
        FileNode::file(".gitignore", stubs::GITIGNORE),
        FileNode::file(".env.example", stubs::ENV_EXAMPLE),
        FileNode::file("requirements.txt", requirements(&config.tools)),
    ]
}

fn infrastructure(config: &ProjectConfig) -> Option<FileNode> {
    if !config.tools.is(ToolCategory::Iac, "terraform") {
        return None;
    }
    Some(FileNode::folder(
        "infrastructure",
        vec![
            FileNode::file("main.tf", stubs::terraform_main(config)),
            FileNode::file("variables.tf", stubs::TERRAFORM_VARIABLES),
            FileNode::empty_file("outputs.tf"),
        ],
    ))
}

fn ingestion(tools: &ToolSelection) -> FileNode {
    let children = match tools.get(ToolCategory::Ingestion) {
        Some("airbyte") => vec![FileNode::file("airbyte_config.yaml", stubs::AIRBYTE_CONFIG)],
        Some("kafka") => vec![
            FileNode::folder(
                "producers",
                vec![FileNode::file("producer.py", stubs::KAFKA_PRODUCER)],
            ),
            FileNode::folder(
                "consumers",
                vec![FileNode::file("consumer.py", stubs::KAFKA_CONSUMER)],
            ),
        ],
        Some("python") => vec![FileNode::file("extract.py", stubs::PYTHON_EXTRACT)],
        _ => Vec::new(),
    };
    FileNode::folder("ingestion", children)
}

/// Object-store selections get a medallion lake layout instead of a SQL warehouse
fn is_lake(warehouse: &str) -> bool {
    matches!(warehouse, "s3" | "gcp")
}

fn storage(tools: &ToolSelection) -> Option<FileNode> {
    let warehouse = tools.get(ToolCategory::Warehouse)?;
    if is_lake(warehouse) {
        let layers = MEDALLION_LAYERS
            .iter()
            .map(|layer| FileNode::folder(*layer, vec![FileNode::empty_file(".gitkeep")]))
            .collect();
        Some(FileNode::folder("data_lake", layers))
    } else {
        Some(FileNode::folder(
            "warehouse",
            vec![FileNode::file("init.sql", stubs::WAREHOUSE_INIT_SQL)],
        ))
    }
}

fn transformations(config: &ProjectConfig) -> Option<FileNode> {
    let project = match config.tools.get(ToolCategory::Transformation) {
        Some("dbt") => FileNode::folder(
            "dbt_project",
            vec![
                FileNode::file("dbt_project.yml", stubs::dbt_project_yml(config)),
                FileNode::folder(
                    "models",
                    vec![
                        FileNode::folder(
                            "staging",
                            vec![FileNode::file("stg_users.sql", stubs::DBT_STAGING_MODEL)],
                        ),
                        FileNode::folder(
                            "marts",
                            vec![FileNode::file("dim_customers.sql", stubs::DBT_MART_MODEL)],
                        ),
                    ],
                ),
                FileNode::folder("tests", Vec::new()),
            ],
        ),
        Some("spark") => FileNode::folder(
            "spark_jobs",
            vec![
                FileNode::file("bronze_to_silver.py", stubs::SPARK_BRONZE_TO_SILVER),
                FileNode::file("silver_to_gold.py", stubs::SPARK_SILVER_TO_GOLD),
            ],
        ),
        _ => return None,
    };
    Some(FileNode::folder("transformations", vec![project]))
}

fn orchestration(tools: &ToolSelection) -> Option<FileNode> {
    let child = match tools.get(ToolCategory::Orchestration) {
        Some("airflow") => FileNode::folder(
            "dags",
            vec![FileNode::file("main_etl_dag.py", stubs::AIRFLOW_DAG)],
        ),
        Some("prefect") => FileNode::folder(
            "flows",
            vec![FileNode::file("etl_flow.py", stubs::PREFECT_FLOW)],
        ),
        _ => return None,
    };
    Some(FileNode::folder("orchestration", vec![child]))
}

fn notebooks(tools: &ToolSelection) -> Option<FileNode> {
    tools.is(ToolCategory::Visualization, "jupyter").then(|| {
        FileNode::folder(
            "notebooks",
            vec![FileNode::file("exploratory_analysis.ipynb", stubs::EMPTY_NOTEBOOK)],
        )
    })
}

fn quality(tools: &ToolSelection) -> Option<FileNode> {
    tools.is(ToolCategory::Quality, "great_expectations").then(|| {
        FileNode::folder(
            "great_expectations",
            vec![
                FileNode::file("great_expectations.yml", stubs::GX_CONFIG),
                FileNode::folder("expectations", Vec::new()),
                FileNode::folder("checkpoints", Vec::new()),
            ],
        )
    })
}

fn compose(config: &ProjectConfig) -> Option<FileNode> {
    config
        .tools
        .is(ToolCategory::Container, "docker")
        .then(|| FileNode::file("docker-compose.yml", render::docker_compose(config)))
}

/// Generate the project tree for a configuration
pub fn generate(config: &ProjectConfig) -> Vec<FileNode> {
    let tools = &config.tools;
    let mut root = root_files(config);
    root.extend(infrastructure(config));
    root.push(ingestion(tools));
    root.extend(storage(tools));
    root.extend(transformations(config));
    root.extend(orchestration(tools));
    root.extend(notebooks(tools));
    root.extend(quality(tools));
    root.extend(compose(config));
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TEMPLATES;
    use crate::config::Action;
    use crate::render::compose::service_names;
    use crate::tree::{find, paths, walk};

    fn with(pairs: &[(ToolCategory, &str)]) -> ProjectConfig {
        ProjectConfig::default().with_tools(pairs)
    }

    fn root_names(nodes: &[FileNode]) -> Vec<&str> {
        nodes.iter().map(FileNode::name).collect()
    }

    #[test]
    fn test_empty_selection_yields_minimal_tree() {
        let tree = generate(&ProjectConfig::default());
        assert_eq!(
            root_names(&tree),
            vec!["README.md", ".gitignore", ".env.example", "requirements.txt", "ingestion"]
        );
        let ingestion = find(&tree, "ingestion").unwrap();
        assert!(!ingestion.is_file());
        assert!(ingestion.children().is_empty());
    }

    #[test]
    fn test_generate_is_deterministic() {
        for template in TEMPLATES {
            let config =
                ProjectConfig::default().apply(&Action::ApplyTemplate(template.id.to_string()));
            assert_eq!(generate(&config), generate(&config));
        }
    }

    #[test]
    fn test_lake_streaming_airflow_scenario() {
        let config = with(&[
            (ToolCategory::Warehouse, "s3"),
            (ToolCategory::Ingestion, "kafka"),
            (ToolCategory::Orchestration, "airflow"),
            (ToolCategory::Container, "docker"),
        ]);
        let tree = generate(&config);

        for layer in MEDALLION_LAYERS {
            let path = format!("data_lake/{}/.gitkeep", layer);
            assert!(find(&tree, &path).is_some(), "missing {}", path);
        }
        assert!(find(&tree, "ingestion/producers/producer.py").is_some());
        assert!(find(&tree, "ingestion/consumers/consumer.py").is_some());
        assert!(find(&tree, "orchestration/dags/main_etl_dag.py").is_some());

        let compose = find(&tree, "docker-compose.yml")
            .and_then(FileNode::content)
            .unwrap();
        let positions: Vec<usize> = [
            "  minio:",
            "  zookeeper:",
            "  kafka:",
            "  airflow-webserver:",
            "  airflow-scheduler:",
        ]
        .iter()
        .map(|s| compose.find(s).unwrap_or_else(|| panic!("missing {}", s)))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(tree.last().map(FileNode::name), Some("docker-compose.yml"));
    }

    #[test]
    fn test_adding_dbt_only_adds_transformations() {
        let before = with(&[(ToolCategory::Warehouse, "duckdb")]);
        let after = before.apply(&Action::SelectTool {
            category: ToolCategory::Transformation,
            tool: Some("dbt".to_string()),
        });

        let old_tree = generate(&before);
        let new_tree = generate(&after);

        let mut new_names = root_names(&new_tree);
        let position = new_names
            .iter()
            .position(|n| *n == "transformations")
            .expect("transformations added");
        new_names.remove(position);
        assert_eq!(root_names(&old_tree), new_names);

        // README and requirements.txt describe the selection, everything else is untouched
        for node in old_tree
            .iter()
            .filter(|n| !matches!(n.name(), "README.md" | "requirements.txt"))
        {
            assert!(new_tree.contains(node), "{} changed", node.name());
        }
        assert!(find(&new_tree, "transformations/dbt_project/dbt_project.yml").is_some());
    }

    #[test]
    fn test_dbt_layout() {
        let tree = generate(&with(&[(ToolCategory::Transformation, "dbt")]));
        let dbt_paths: Vec<_> = paths(&tree)
            .into_iter()
            .filter(|p| p.starts_with("transformations"))
            .collect();
        assert_eq!(
            dbt_paths,
            vec![
                "transformations",
                "transformations/dbt_project",
                "transformations/dbt_project/dbt_project.yml",
                "transformations/dbt_project/models",
                "transformations/dbt_project/models/staging",
                "transformations/dbt_project/models/staging/stg_users.sql",
                "transformations/dbt_project/models/marts",
                "transformations/dbt_project/models/marts/dim_customers.sql",
                "transformations/dbt_project/tests",
            ]
        );
    }

    #[test]
    fn test_spark_jobs() {
        let tree = generate(&with(&[(ToolCategory::Transformation, "spark")]));
        assert!(find(&tree, "transformations/spark_jobs/bronze_to_silver.py").is_some());
        assert!(find(&tree, "transformations/spark_jobs/silver_to_gold.py").is_some());

        let tree = generate(&with(&[(ToolCategory::Transformation, "polars")]));
        assert!(find(&tree, "transformations").is_none());
    }

    #[test]
    fn test_gcp_storage_is_a_lake() {
        let tree = generate(&with(&[(ToolCategory::Warehouse, "gcp")]));
        for layer in MEDALLION_LAYERS {
            let path = format!("data_lake/{}/.gitkeep", layer);
            assert_eq!(
                find(&tree, &path).and_then(FileNode::content),
                Some(""),
                "missing {}",
                path
            );
        }
        assert!(find(&tree, "warehouse").is_none());
    }

    #[test]
    fn test_sql_warehouse_layout() {
        let tree = generate(&with(&[(ToolCategory::Warehouse, "snowflake")]));
        let init = find(&tree, "warehouse/init.sql").and_then(FileNode::content).unwrap();
        for layer in MEDALLION_LAYERS {
            assert!(init.contains(&format!("CREATE SCHEMA IF NOT EXISTS {};", layer)));
        }
        assert!(find(&tree, "data_lake").is_none());
    }

    #[test]
    fn test_ingestion_variants() {
        let tree = generate(&with(&[(ToolCategory::Ingestion, "airbyte")]));
        assert!(find(&tree, "ingestion/airbyte_config.yaml").is_some());

        let tree = generate(&with(&[(ToolCategory::Ingestion, "python")]));
        assert!(find(&tree, "ingestion/extract.py").is_some());

        let tree = generate(&with(&[(ToolCategory::Ingestion, "fivetran")]));
        assert!(find(&tree, "ingestion").unwrap().children().is_empty());
    }

    #[test]
    fn test_terraform_infrastructure() {
        let tree = generate(&with(&[(ToolCategory::Iac, "terraform")]));
        let names: Vec<_> = find(&tree, "infrastructure")
            .unwrap()
            .children()
            .iter()
            .map(FileNode::name)
            .collect();
        assert_eq!(names, vec!["main.tf", "variables.tf", "outputs.tf"]);
        assert_eq!(
            find(&tree, "infrastructure/outputs.tf").and_then(FileNode::content),
            Some("")
        );
        // infrastructure comes right after the root files
        assert_eq!(tree[4].name(), "infrastructure");
    }

    #[test]
    fn test_prefect_notebooks_and_quality() {
        let tree = generate(&with(&[
            (ToolCategory::Orchestration, "prefect"),
            (ToolCategory::Visualization, "jupyter"),
            (ToolCategory::Quality, "great_expectations"),
        ]));
        assert!(find(&tree, "orchestration/flows/etl_flow.py").is_some());
        assert!(find(&tree, "orchestration/dags").is_none());

        let notebook = find(&tree, "notebooks/exploratory_analysis.ipynb")
            .and_then(FileNode::content)
            .unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(notebook).unwrap();
        assert_eq!(parsed.get("nbformat").and_then(|v| v.as_u64()), Some(4));

        let gx = find(&tree, "great_expectations").unwrap();
        let names: Vec<_> = gx.children().iter().map(FileNode::name).collect();
        assert_eq!(names, vec!["great_expectations.yml", "expectations", "checkpoints"]);
        assert!(find(&tree, "great_expectations/expectations").unwrap().children().is_empty());
    }

    #[test]
    fn test_soda_and_dagster_add_nothing() {
        let tree = generate(&with(&[
            (ToolCategory::Quality, "soda"),
            (ToolCategory::Orchestration, "dagster"),
            (ToolCategory::Container, "podman"),
        ]));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_requirements_are_additive() {
        assert_eq!(requirements(&ToolSelection::default()), "pandas\npython-dotenv\n");

        let config = with(&[
            (ToolCategory::Orchestration, "airflow"),
            (ToolCategory::Transformation, "dbt"),
            (ToolCategory::Ingestion, "kafka"),
            (ToolCategory::Quality, "great_expectations"),
        ]);
        assert_eq!(
            requirements(&config.tools),
            "pandas\npython-dotenv\napache-airflow\ndbt-core\ndbt-postgres\nkafka-python\ngreat_expectations\n"
        );

        let config = with(&[
            (ToolCategory::Orchestration, "prefect"),
            (ToolCategory::Transformation, "polars"),
        ]);
        assert_eq!(requirements(&config.tools), "pandas\npython-dotenv\nprefect\npolars\n");
    }

    #[test]
    fn test_every_template_keeps_tree_invariants() {
        for template in TEMPLATES {
            let config =
                ProjectConfig::default().apply(&Action::ApplyTemplate(template.id.to_string()));
            let tree = generate(&config);
            for (path, node) in walk(&tree) {
                if node.is_file() {
                    assert!(node.children().is_empty(), "{}", path);
                    assert!(node.content().is_some(), "{}", path);
                } else {
                    assert!(node.content().is_none(), "{}", path);
                }
            }
            let has_compose = find(&tree, "docker-compose.yml").is_some();
            assert_eq!(has_compose, config.tools.is(ToolCategory::Container, "docker"));
            if has_compose {
                assert!(!service_names(&config.tools).is_empty());
            }
        }
    }
}
