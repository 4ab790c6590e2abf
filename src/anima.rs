// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generates `.anima` manifests from plugin definitions.
//!
//! The manifest is a projection of [`PluginDefinition`] for readers; it is
//! never read back to build a plugin.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::definition::PluginDefinition;
use crate::errors::ExecutionError;
use crate::registry::PluginRegistry;

const INDENT: &str = "    ";

/// Renders `definition` as `.anima` text.
pub fn render(definition: &PluginDefinition) -> String {
    let mut out = String::new();
    let metadata = &definition.metadata;
    out.push_str(&format!("// {} {}\n", metadata.name, metadata.version));
    if !metadata.description.is_empty() {
        out.push_str(&format!("// {}\n", metadata.description));
    }
    out.push('\n');

    out.push_str("-- types\n");
    for type_def in definition.types.values() {
        match type_def.fields() {
            Some(fields) => {
                out.push_str(&format!("{} {{\n", type_def.name));
                render_pairs(&mut out, fields, 1);
                out.push_str("}\n");
            }
            None => {
                out.push_str(&format!("{}\n", type_def.name));
            }
        }
    }
    out.push_str("--\n\n");

    out.push_str("-- nodes\n");
    for node in definition.nodes.values() {
        if let Some(description) = &node.description {
            out.push_str(&format!("// {}\n", description));
        }
        out.push_str(&format!("{} {{\n", node.name));
        out.push_str(&format!("{}mode {}\n", INDENT, node.mode));
        for (keyword, ports) in [("in", &node.inputs), ("out", &node.outputs)] {
            if ports.is_empty() {
                continue;
            }
            out.push_str(&format!("{}{} {{\n", INDENT, keyword));
            render_pairs(&mut out, ports, 2);
            out.push_str(&format!("{}}}\n", INDENT));
        }
        out.push_str("}\n");
    }
    out.push_str("--\n");

    out
}

fn render_pairs(out: &mut String, pairs: &IndexMap<String, String>, depth: usize) {
    for (name, type_name) in pairs {
        out.push_str(&format!("{}{} {}\n", INDENT.repeat(depth), name, type_name));
    }
}

/// Writes `<plugin>.anima` for every registered plugin into `dir`, creating it
/// if needed. Returns the written paths in plugin-name order.
pub async fn write_plugin_files(
    dir: &Path,
    registry: &PluginRegistry,
) -> Result<Vec<PathBuf>, ExecutionError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExecutionError::Io {
            path: dir.display().to_string(),
            source,
        })?;

    let mut written = Vec::new();
    for name in registry.names() {
        let Some(plugin) = registry.get(&name) else {
            continue;
        };
        let path = dir.join(format!("{}.{}", name, crate::parser::ANIMA_SUFFIX));
        tokio::fs::write(&path, render(plugin.definition()))
            .await
            .map_err(|source| ExecutionError::Io {
                path: path.display().to_string(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}
