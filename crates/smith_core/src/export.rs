//! Rendering, saving and loading of node trees.
//!
//! The rendered form is the serde representation of [`Node`]; no document
//! format beyond that is implied.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::node::Node;

/// Text encodings a node tree can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFormat {
    Json,
    Yaml,
}

impl NodeFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(NodeFormat::Json),
            "yaml" | "yml" => Some(NodeFormat::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            NodeFormat::Json => "json",
            NodeFormat::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for NodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Reader and writer for node trees.
pub struct NodeExport;

impl NodeExport {
    pub fn render(node: &Node, format: NodeFormat) -> CoreResult<String> {
        Ok(match format {
            NodeFormat::Json => serde_json::to_string_pretty(node)?,
            NodeFormat::Yaml => serde_yaml::to_string(node)?,
        })
    }

    pub fn parse(content: &str, format: NodeFormat) -> CoreResult<Node> {
        Ok(match format {
            NodeFormat::Json => serde_json::from_str(content)?,
            NodeFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Default file name for a node: `{name}-{id}.{ext}`.
    pub fn default_file_name(node: &Node, format: NodeFormat) -> String {
        format!("{}-{}.{}", node.name, node.id, format.extension())
    }

    pub fn save(node: &Node, path: impl AsRef<Path>, format: NodeFormat) -> CoreResult<()> {
        let path = path.as_ref();
        debug!("Writing {} node to {:?}", node.name, path);

        let content = Self::render(node, format)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load a node, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Node> {
        let path = path.as_ref();
        let format = NodeFormat::from_path(path)
            .ok_or_else(|| CoreError::UnsupportedFormat(path.to_path_buf()))?;
        debug!("Reading node from {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }
}
