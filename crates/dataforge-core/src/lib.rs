//! DataForge Core - Project skeleton generation for data engineering stacks
//!
//! This library turns a choice of tools (one per pipeline stage) into a complete
//! project skeleton: folder layout, a README, a docker-compose file, Python
//! requirements and starter code for each selected tool.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Catalog and Configuration** - The tool catalog, templates, and the
//!   `ProjectConfig` value with its pure update actions
//! - **Layer 2: Generation** - Pure functions rendering the `FileNode` tree and the
//!   README / docker-compose documents
//! - **Layer 3: Export and CLI/TUI Interface** - Zip or directory export, plus the
//!   optional cliclack-based configurator (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive configurator
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use dataforge_core::{generate, Action, ProjectConfig};
//!
//! let config = ProjectConfig::default()
//!     .apply(&Action::ApplyTemplate("lakehouse".to_string()));
//! let tree = generate(&config);
//! let zip_bytes = dataforge_core::archive::build_zip(&tree)?;
//! ```

pub mod archive;
pub mod catalog;
pub mod config;
pub mod flow;
pub mod generator;
pub mod render;
pub mod setup;
pub mod tree;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use archive::{
    build_zip, export_zip, validate_project_name, ArchiveError, ExportFormat, Exporter,
};
pub use catalog::{
    find_template, find_tool, ProjectTemplate, Tool, ToolCategory, TEMPLATES, TOOLS,
};
pub use config::{load_base_config, Action, ConfigError, ProjectConfig, ToolSelection};
pub use generator::generate;
pub use render::{docker_compose, readme};
pub use tree::{render_tree, FileNode};

#[cfg(feature = "tui")]
pub use tui::run;
