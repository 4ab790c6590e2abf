// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::TypeError;
use crate::types::{TypeDefinition, Value};

/// Resolves type names and routes plugin-specific hooks to the owning plugin.
pub trait TypeScope {
    /// Finds a definition by bare name or `plugin.Type` qualified name.
    fn lookup(&self, type_name: &str) -> Option<&TypeDefinition>;

    /// Applies one semantic validation rule of `type_name` to `value`.
    fn check_rule(&self, type_name: &str, rule: &str, value: &Value) -> bool;

    /// Adjusts the base-type default of semantic type `type_name`.
    fn refine_default(&self, type_name: &str, base_default: Value) -> Value;

    /// Converts between two semantic types sharing a base type.
    fn convert_semantic(&self, value: Value, from: &str, to: &str) -> Result<Value, TypeError>;
}

/// Splits `plugin.Type` into `(Some("plugin"), "Type")`; bare names yield `(None, name)`.
pub fn split_qualified(type_name: &str) -> (Option<&str>, &str) {
    match type_name.split_once('.') {
        Some((plugin, name)) => (Some(plugin), name),
        None => (None, type_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("basic.UUID"), (Some("basic"), "UUID"));
        assert_eq!(split_qualified("UUID"), (None, "UUID"));
    }
}
