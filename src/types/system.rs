// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Kind-dispatched validation, defaults and casts.
//!
//! All three walk type definitions recursively (semantic → base, composite →
//! fields). A definition that refers back to itself would recurse forever, so
//! every walk is bounded by [`MAX_TYPE_DEPTH`].

use serde_json::Map;

use crate::errors::TypeError;
use crate::types::{PrimitiveType, TypeKind, TypeScope, Value};

/// Deepest base/field chain followed before a type is treated as unresolvable.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Checks `value` against `type_name`.
///
/// Primitive types check the JSON host shape. Semantic types must pass their
/// base type and every validation rule. Composite types must be objects holding
/// every declared field, each valid for its field type; extra keys are ignored.
/// Unknown types never validate.
pub fn validate<S: TypeScope + ?Sized>(scope: &S, value: &Value, type_name: &str) -> bool {
    validate_at(scope, value, type_name, 0)
}

fn validate_at<S: TypeScope + ?Sized>(
    scope: &S,
    value: &Value,
    type_name: &str,
    depth: usize,
) -> bool {
    if depth > MAX_TYPE_DEPTH {
        return false;
    }
    let Some(definition) = scope.lookup(type_name) else {
        return false;
    };

    match &definition.kind {
        TypeKind::Primitive { primitive } => matches_primitive(*primitive, value),
        TypeKind::Semantic {
            base_type,
            validation_rules,
        } => {
            validate_at(scope, value, base_type, depth + 1)
                && validation_rules
                    .iter()
                    .all(|rule| scope.check_rule(type_name, rule, value))
        }
        TypeKind::Composite { fields } => match value.as_object() {
            Some(record) => fields.iter().all(|(field, field_type)| {
                record
                    .get(field)
                    .is_some_and(|v| validate_at(scope, v, field_type, depth + 1))
            }),
            None => false,
        },
    }
}

fn matches_primitive(primitive: PrimitiveType, value: &Value) -> bool {
    match primitive {
        PrimitiveType::Boolean => value.is_boolean(),
        PrimitiveType::Integer => value.is_i64() || value.is_u64(),
        PrimitiveType::String => value.is_string(),
    }
}

/// Produces the default value for `type_name`.
///
/// Primitives yield host zero values. Semantic types start from their base
/// default and let the owning plugin refine it (an identifier type may mint a
/// fresh value here). Composites default every field.
pub fn create_default<S: TypeScope + ?Sized>(scope: &S, type_name: &str) -> Result<Value, TypeError> {
    default_at(scope, type_name, 0)
}

fn default_at<S: TypeScope + ?Sized>(
    scope: &S,
    type_name: &str,
    depth: usize,
) -> Result<Value, TypeError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(TypeError::UnknownType(type_name.to_string()));
    }
    let definition = scope
        .lookup(type_name)
        .ok_or_else(|| TypeError::UnknownType(type_name.to_string()))?;

    match &definition.kind {
        TypeKind::Primitive { primitive } => Ok(match primitive {
            PrimitiveType::Boolean => Value::Bool(false),
            PrimitiveType::Integer => Value::from(0),
            PrimitiveType::String => Value::String(String::new()),
        }),
        TypeKind::Semantic { base_type, .. } => {
            let base = default_at(scope, base_type, depth + 1)?;
            Ok(scope.refine_default(type_name, base))
        }
        TypeKind::Composite { fields } => {
            let mut record = Map::new();
            for (field, field_type) in fields {
                record.insert(field.clone(), default_at(scope, field_type, depth + 1)?);
            }
            Ok(Value::Object(record))
        }
    }
}

/// Converts `value` from one declared type to another.
///
/// Names resolving to the same definition are an identity cast. Two semantic types sharing the same
/// base type go through the owning plugin's conversion hook. Every other pair
/// is rejected with [`TypeError::UnsupportedCast`] naming both types; there is
/// no implicit widening between unrelated kinds.
pub fn cast<S: TypeScope + ?Sized>(
    scope: &S,
    value: Value,
    from: &str,
    to: &str,
) -> Result<Value, TypeError> {
    if from == to {
        return Ok(value);
    }

    let from_def = scope
        .lookup(from)
        .ok_or_else(|| TypeError::UnknownType(from.to_string()))?;
    let to_def = scope
        .lookup(to)
        .ok_or_else(|| TypeError::UnknownType(to.to_string()))?;
    // Bare and qualified spellings of one definition
    if std::ptr::eq(from_def, to_def) {
        return Ok(value);
    }

    let (Some(from_base), Some(to_base)) = (from_def.base_type(), to_def.base_type()) else {
        return Err(unsupported(from, to));
    };
    if !same_type(scope, from_base, to_base) {
        return Err(unsupported(from, to));
    }

    if !validate(scope, &value, from) {
        return Err(TypeError::InvalidValue {
            type_name: from.to_string(),
        });
    }
    scope.convert_semantic(value, from, to)
}

/// Base names may be spelled bare or qualified; compare what they resolve to.
fn same_type<S: TypeScope + ?Sized>(scope: &S, a: &str, b: &str) -> bool {
    match (scope.lookup(a), scope.lookup(b)) {
        (Some(x), Some(y)) => std::ptr::eq(x, y),
        _ => a == b,
    }
}

fn unsupported(from: &str, to: &str) -> TypeError {
    TypeError::UnsupportedCast {
        from: from.to_string(),
        to: to.to_string(),
    }
}
