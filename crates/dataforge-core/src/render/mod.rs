//! Template renderers
//!
//! Each renderer is a pure function of the project configuration that
//! returns the literal text of one generated artifact:
//! - `readme` - the project README with the stack table and service URLs
//! - `compose` - the docker-compose manifest
//! - `stubs` - fixed or lightly parameterized per-tool stub files

pub mod compose;
pub mod readme;
pub mod stubs;

pub use compose::docker_compose;
pub use readme::readme;

use crate::catalog::find_tool;

/// Table cell for a selected tool id, or the placeholder when unset
///
/// Catalog tools render as `Name (`id`)`; unknown ids render as-is.
pub(crate) fn tool_cell(tool: Option<&str>, placeholder: &str) -> String {
    match tool {
        Some(id) => match find_tool(id) {
            Some(t) => format!("{} (`{}`)", t.name, t.id),
            None => id.to_string(),
        },
        None => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_cell() {
        assert_eq!(tool_cell(Some("dbt"), "N/A"), "dbt Core (`dbt`)");
        assert_eq!(tool_cell(Some("homegrown"), "N/A"), "homegrown");
        assert_eq!(tool_cell(None, "Local"), "Local");
    }
}
