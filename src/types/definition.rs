// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Host representation backing a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Integer,
    String,
}

/// Kind-specific payload of a declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Primitive {
        primitive: PrimitiveType,
    },
    Semantic {
        /// Underlying primitive or semantic type, bare or `plugin.Type` qualified.
        base_type: String,
        /// Opaque rule identifiers interpreted by the owning plugin.
        #[serde(default)]
        validation_rules: Vec<String>,
    },
    Composite {
        /// Field name to type name, in declaration order.
        fields: IndexMap<String, String>,
    },
}

/// A type declared by a plugin. Immutable once the plugin is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl TypeDefinition {
    pub fn primitive(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Primitive { primitive },
        }
    }

    pub fn semantic<I, R>(name: impl Into<String>, base_type: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Semantic {
                base_type: base_type.into(),
                validation_rules: rules.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn composite<I, N, T>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Composite {
                fields: fields
                    .into_iter()
                    .map(|(n, t)| (n.into(), t.into()))
                    .collect(),
            },
        }
    }

    /// `primitive`, `semantic` or `composite`.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Primitive { .. } => "primitive",
            TypeKind::Semantic { .. } => "semantic",
            TypeKind::Composite { .. } => "composite",
        }
    }

    pub fn base_type(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Semantic { base_type, .. } => Some(base_type),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, String>> {
        match &self.kind {
            TypeKind::Composite { fields } => Some(fields),
            _ => None,
        }
    }
}
