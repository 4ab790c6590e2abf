// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the type system.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The type name does not resolve to any known definition.
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// No conversion path exists between the two types.
    #[error("Unsupported cast from '{from}' to '{to}'")]
    UnsupportedCast { from: String, to: String },

    /// A semantic conversion hook rejected the value.
    #[error("Cannot convert value from '{from}' to '{to}': {reason}")]
    ConversionFailed {
        from: String,
        to: String,
        reason: String,
    },

    /// The value does not satisfy the declared type.
    #[error("Value is not a valid '{type_name}'")]
    InvalidValue { type_name: String },
}
