//! Project configuration state and its update function

use crate::catalog::{find_template, ToolCategory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PROJECT_NAME: &str = "my-data-platform";
pub const DEFAULT_DESCRIPTION: &str = "End-to-end data engineering pipeline.";
pub const DEFAULT_AUTHOR: &str = "data-team";

/// Environment variable naming a YAML config file to start from
pub const CONFIG_ENV: &str = "DATAFORGE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// One optional tool id per pipeline stage
///
/// Every category is a field, so a selection can never be missing a key.
/// Ids are not validated against the catalog; renderers fall back to the raw id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSelection {
    pub cloud: Option<String>,
    pub ingestion: Option<String>,
    pub warehouse: Option<String>,
    pub transformation: Option<String>,
    pub quality: Option<String>,
    pub orchestration: Option<String>,
    pub visualization: Option<String>,
    pub container: Option<String>,
    pub iac: Option<String>,
}

impl ToolSelection {
    fn slot(&self, category: ToolCategory) -> &Option<String> {
        match category {
            ToolCategory::Cloud => &self.cloud,
            ToolCategory::Ingestion => &self.ingestion,
            ToolCategory::Warehouse => &self.warehouse,
            ToolCategory::Transformation => &self.transformation,
            ToolCategory::Quality => &self.quality,
            ToolCategory::Orchestration => &self.orchestration,
            ToolCategory::Visualization => &self.visualization,
            ToolCategory::Container => &self.container,
            ToolCategory::Iac => &self.iac,
        }
    }

    fn slot_mut(&mut self, category: ToolCategory) -> &mut Option<String> {
        match category {
            ToolCategory::Cloud => &mut self.cloud,
            ToolCategory::Ingestion => &mut self.ingestion,
            ToolCategory::Warehouse => &mut self.warehouse,
            ToolCategory::Transformation => &mut self.transformation,
            ToolCategory::Quality => &mut self.quality,
            ToolCategory::Orchestration => &mut self.orchestration,
            ToolCategory::Visualization => &mut self.visualization,
            ToolCategory::Container => &mut self.container,
            ToolCategory::Iac => &mut self.iac,
        }
    }

    /// Selected tool id for a category
    pub fn get(&self, category: ToolCategory) -> Option<&str> {
        self.slot(category).as_deref()
    }

    pub fn set(&mut self, category: ToolCategory, tool: Option<String>) {
        *self.slot_mut(category) = tool;
    }

    /// Check whether a category has exactly this tool selected
    pub fn is(&self, category: ToolCategory, tool: &str) -> bool {
        self.get(category) == Some(tool)
    }

    /// Selected (category, tool) pairs in wizard order
    pub fn selected(&self) -> impl Iterator<Item = (ToolCategory, &str)> + '_ {
        ToolCategory::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|t| (c, t)))
    }
}

/// The state edited by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    pub description: String,
    pub author: String,
    pub tools: ToolSelection,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            tools: ToolSelection::default(),
        }
    }
}

/// A user action against the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetProjectName(String),
    SetDescription(String),
    SetAuthor(String),
    /// Select a tool, or clear the category if that tool is already selected
    ToggleTool {
        category: ToolCategory,
        tool: String,
    },
    SelectTool {
        category: ToolCategory,
        tool: Option<String>,
    },
    /// Overwrite the listed categories and the description from a preset
    ApplyTemplate(String),
}

impl ProjectConfig {
    /// Produce the configuration that results from an action
    pub fn apply(&self, action: &Action) -> ProjectConfig {
        let mut next = self.clone();
        match action {
            Action::SetProjectName(name) => next.project_name = name.clone(),
            Action::SetDescription(description) => next.description = description.clone(),
            Action::SetAuthor(author) => next.author = author.clone(),
            Action::ToggleTool { category, tool } => {
                let value = if next.tools.is(*category, tool) {
                    None
                } else {
                    Some(tool.clone())
                };
                next.tools.set(*category, value);
            }
            Action::SelectTool { category, tool } => next.tools.set(*category, tool.clone()),
            Action::ApplyTemplate(id) => {
                let Some(template) = find_template(id) else {
                    return next;
                };
                next.description = template.description.to_string();
                for (category, tool) in template.tools {
                    next.tools.set(*category, tool.map(str::to_string));
                }
            }
        }
        next
    }

    /// Fold a sequence of actions over this configuration
    pub fn apply_all<'a>(&self, actions: impl IntoIterator<Item = &'a Action>) -> ProjectConfig {
        actions
            .into_iter()
            .fold(self.clone(), |config, action| config.apply(action))
    }

    /// Load a configuration from a YAML file; missing fields take defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
impl ProjectConfig {
    /// Select several tools at once
    pub(crate) fn with_tools(mut self, pairs: &[(ToolCategory, &str)]) -> Self {
        for (category, tool) in pairs {
            self.tools.set(*category, Some(tool.to_string()));
        }
        self
    }
}

/// Starting configuration: an explicit file, else the `DATAFORGE_CONFIG` file, else defaults
pub fn load_base_config(explicit: Option<&Path>) -> Result<ProjectConfig, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    match explicit.map(Path::to_path_buf).or(from_env) {
        Some(path) => ProjectConfig::from_yaml_file(&path),
        None => Ok(ProjectConfig::default()),
    }
}
