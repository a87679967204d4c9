//! Stub file contents for individual tools

use crate::catalog::ToolCategory;
use crate::config::ProjectConfig;

pub const GITIGNORE: &str = "venv/\n__pycache__/\n.env\n*.log\n.DS_Store\n.terraform/\n.ipynb_checkpoints/";

pub const ENV_EXAMPLE: &str = "ENVIRONMENT=dev\nDB_HOST=localhost\nDB_PORT=5432\nDB_USER=user\nDB_PASS=password\nAWS_ACCESS_KEY_ID=xxx\nAWS_SECRET_ACCESS_KEY=xxx";

pub const TERRAFORM_VARIABLES: &str = "variable \"env\" { default = \"dev\" }";

pub const AIRBYTE_CONFIG: &str = "# Define connectors here";
pub const KAFKA_PRODUCER: &str = "from kafka import KafkaProducer\n# Producer logic here";
pub const KAFKA_CONSUMER: &str = "from kafka import KafkaConsumer\n# Consumer logic here";
pub const PYTHON_EXTRACT: &str = "import requests\nimport pandas as pd\n\ndef extract_data():\n    # Logic to fetch data from API\n    pass\n\nif __name__ == \"__main__\":\n    extract_data()";

pub const WAREHOUSE_INIT_SQL: &str = "CREATE SCHEMA IF NOT EXISTS bronze;\nCREATE SCHEMA IF NOT EXISTS silver;\nCREATE SCHEMA IF NOT EXISTS gold;";

pub const DBT_STAGING_MODEL: &str = "SELECT * FROM source_users";
pub const DBT_MART_MODEL: &str = "SELECT * FROM stg_users";

pub const SPARK_BRONZE_TO_SILVER: &str = "spark.read.format(\"parquet\").load(\"s3://bronze\")...";
pub const SPARK_SILVER_TO_GOLD: &str = "# Aggregation logic";

pub const AIRFLOW_DAG: &str = "from airflow import DAG\nfrom airflow.operators.bash import BashOperator\nfrom datetime import datetime\n\nwith DAG('main_etl', start_date=datetime(2023, 1, 1)) as dag:\n    t1 = BashOperator(task_id='extract', bash_command='python ingestion/extract.py')";
pub const PREFECT_FLOW: &str = "@flow\ndef main_flow():\n    pass";

pub const EMPTY_NOTEBOOK: &str = r#"{ "cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5 }"#;

pub const GX_CONFIG: &str = "# GX Config";

/// Terraform main.tf; AWS gets a lake bucket, anything else a Google provider
pub fn terraform_main(config: &ProjectConfig) -> String {
    if config.tools.is(ToolCategory::Cloud, "aws") {
        format!(
            "provider \"aws\" {{\n  region = \"us-east-1\"\n}}\n\nresource \"aws_s3_bucket\" \"data_lake\" {{\n  bucket = \"{}-lake\"\n}}",
            config.project_name
        )
    } else {
        format!(
            "provider \"google\" {{\n  project = \"{}\"\n}}",
            config.project_name
        )
    }
}

pub fn dbt_project_yml(config: &ProjectConfig) -> String {
    format!(
        "name: '{}'\nversion: '1.0.0'\nprofile: 'default'",
        config.project_name
    )
}
