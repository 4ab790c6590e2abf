// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Self-describing type system shared by plugins and the engine.
//!
//! Types come in three closed kinds:
//!
//! * **Primitive** - maps directly onto a JSON host value (boolean, integer, string)
//! * **Semantic** - refines a base type with plugin-interpreted validation rules
//! * **Composite** - a keyed record whose fields are themselves typed
//!
//! Validation, defaults and casts dispatch on [`TypeKind`] by pattern matching.
//! Name resolution and the plugin-specific hooks (rule checks, default
//! refinement, semantic conversions) come from a [`TypeScope`], which is
//! implemented both by every plugin (its own types only) and by the
//! registry (types across all registered plugins, `plugin.Type` qualified).

mod definition;
mod scope;
mod system;

pub use definition::{PrimitiveType, TypeDefinition, TypeKind};
pub use scope::{split_qualified, TypeScope};
pub use system::{cast, create_default, validate, MAX_TYPE_DEPTH};

use std::collections::BTreeMap;

/// Runtime value flowing between node ports.
pub type Value = serde_json::Value;

/// Port name to value map used for node inputs and outputs.
pub type PortValues = BTreeMap<String, Value>;
