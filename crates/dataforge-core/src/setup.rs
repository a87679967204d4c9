//! Post-generation instructions

use crate::archive::{archive_file_name, ExportFormat};
use crate::catalog::ToolCategory;
use crate::config::ProjectConfig;
use crate::render::compose::needs_minio;
use std::path::Path;

/// Generate the "next steps" instructions after the project is written
pub fn next_steps(config: &ProjectConfig, dir: &Path) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();
    let tools = &config.tools;

    // Step 1: cd to directory if not current
    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    // Step 2: environment file
    steps.push("cp .env.example .env".to_string());

    // Step 3: services or a local virtualenv
    if tools.is(ToolCategory::Container, "docker") {
        steps.push("docker-compose up -d".to_string());
    } else {
        steps.push(
            "Set up Python environment:\n\
                  python -m venv venv && source venv/bin/activate\n\
                  pip install -r requirements.txt"
                .to_string(),
        );
    }

    // Step 4: first transformation run
    if tools.is(ToolCategory::Transformation, "dbt") {
        steps.push("cd transformations/dbt_project && dbt run".to_string());
    }

    steps
}

/// Instructions after an export into `out_dir`
///
/// Archive entries sit at the zip root, so a zip export is first unpacked
/// into the project folder.
pub fn export_steps(config: &ProjectConfig, out_dir: &Path, format: ExportFormat) -> Vec<String> {
    let project_dir = out_dir.join(&config.project_name);
    let mut steps = Vec::new();
    if format == ExportFormat::Zip {
        steps.push(format!(
            "unzip {} -d {}",
            out_dir.join(archive_file_name(config)).display(),
            project_dir.display()
        ));
    }
    steps.extend(next_steps(config, &project_dir));
    steps
}

/// A local service exposed by the generated compose stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub name: &'static str,
    pub address: &'static str,
}

/// Services the generated stack exposes on localhost
pub fn service_endpoints(config: &ProjectConfig) -> Vec<ServiceEndpoint> {
    let tools = &config.tools;
    let mut endpoints = Vec::new();
    if tools.is(ToolCategory::Warehouse, "postgres") {
        endpoints.push(ServiceEndpoint {
            name: "PostgreSQL (Warehouse)",
            address: "localhost:5432",
        });
    }
    if tools.is(ToolCategory::Orchestration, "airflow") {
        endpoints.push(ServiceEndpoint {
            name: "Airflow Webserver",
            address: "localhost:8080",
        });
    }
    if needs_minio(tools) {
        endpoints.push(ServiceEndpoint {
            name: "MinIO Console (S3 Mock)",
            address: "localhost:9001",
        });
    }
    endpoints
}
