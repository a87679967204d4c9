//! Generated file tree

use serde::{Deserialize, Serialize};

/// A node in the generated project tree
///
/// Children order is significant and is preserved by every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File { name: String, content: String },
    Folder { name: String, children: Vec<FileNode> },
}

impl FileNode {
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        FileNode::File {
            name: name.into(),
            content: content.into(),
        }
    }

    /// A file with no content, used for `.gitkeep` markers
    pub fn empty_file(name: impl Into<String>) -> Self {
        Self::file(name, String::new())
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        FileNode::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::File { name, .. } | FileNode::Folder { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FileNode::File { .. })
    }

    /// Children of a folder; files have none
    pub fn children(&self) -> &[FileNode] {
        match self {
            FileNode::Folder { children, .. } => children,
            FileNode::File { .. } => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            FileNode::File { content, .. } => Some(content),
            FileNode::Folder { .. } => None,
        }
    }
}

/// Depth-first, pre-order iterator over `(relative path, node)` pairs
pub struct Walk<'a> {
    stack: Vec<(String, &'a FileNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (String, &'a FileNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for child in node.children().iter().rev() {
            self.stack.push((format!("{}/{}", path, child.name()), child));
        }
        Some((path, node))
    }
}

/// Walk every node of a generated tree in display order
pub fn walk(nodes: &[FileNode]) -> Walk<'_> {
    Walk {
        stack: nodes
            .iter()
            .rev()
            .map(|n| (n.name().to_string(), n))
            .collect(),
    }
}

/// Find a node by slash-separated path
pub fn find<'a>(nodes: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
    let mut current = nodes;
    let mut found = None;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let node = current.iter().find(|n| n.name() == segment)?;
        current = node.children();
        found = Some(node);
    }
    found
}

/// All paths in display order
pub fn paths(nodes: &[FileNode]) -> Vec<String> {
    walk(nodes).map(|(path, _)| path).collect()
}

/// Render an ASCII tree preview
pub fn render_tree(nodes: &[FileNode]) -> String {
    fn render_level(nodes: &[FileNode], prefix: &str, out: &mut String) {
        for (i, node) in nodes.iter().enumerate() {
            let last = i + 1 == nodes.len();
            let branch = if last { "└── " } else { "├── " };
            let suffix = if node.is_file() { "" } else { "/" };
            out.push_str(&format!("{}{}{}{}\n", prefix, branch, node.name(), suffix));

            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_level(node.children(), &child_prefix, out);
        }
    }

    let mut out = String::new();
    render_level(nodes, "", &mut out);
    out
}
