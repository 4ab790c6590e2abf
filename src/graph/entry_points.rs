// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A type-safe wrapper for graph entry points.
///
/// Entry points seed the scheduler's traversal in listed order. Nodes not
/// reachable from any entry point are still scheduled afterwards.
///
/// # Examples
///
/// ```
/// use anima_weave::graph::EntryPoints;
///
/// let mut entry_points = EntryPoints::new();
/// entry_points.add("starter".to_string());
///
/// let ids: Vec<String> = entry_points.into();
/// assert_eq!(ids, vec!["starter".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPoints(pub Vec<String>);

impl EntryPoints {
    /// Create a new empty entrypoints list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an entrypoint
    pub fn add(&mut self, node_id: String) {
        self.0.push(node_id);
    }

    /// Get iterator over entrypoints
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for EntryPoints {
    fn from(entrypoints: Vec<String>) -> Self {
        Self(entrypoints)
    }
}

impl From<EntryPoints> for Vec<String> {
    fn from(value: EntryPoints) -> Self {
        value.0
    }
}
