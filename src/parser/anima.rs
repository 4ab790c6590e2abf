// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `.anima` plugin manifests.
//!
//! ```text
//! -- types
//! Int
//! Prompt {
//!     id UUID
//!     content String
//! }
//! --
//!
//! -- nodes
//! FormatNumber {
//!     mode Concurrent
//!     in {
//!         number Int
//!     }
//!     out {
//!         formatted String
//!     }
//! }
//! --
//! ```
//!
//! The text only names types and lists composite fields. Kinds, base types
//! and validation rules live in the plugin's own definition.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::definition::NodeMode;
use crate::errors::ParseError;
use crate::parser::lexer::{TokenKind, TokenStream};

const SOURCE_KIND: &str = "anima";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimaType {
    pub name: String,
    /// Field name to type name; `None` for bare (non-composite) declarations.
    pub fields: Option<IndexMap<String, String>>,
}

impl AnimaType {
    pub fn is_composite(&self) -> bool {
        self.fields.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimaNode {
    pub name: String,
    pub mode: NodeMode,
    pub inputs: IndexMap<String, String>,
    pub outputs: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimaDefinition {
    pub types: Vec<AnimaType>,
    pub nodes: Vec<AnimaNode>,
}

impl AnimaDefinition {
    pub fn find_type(&self, name: &str) -> Option<&AnimaType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_node(&self, name: &str) -> Option<&AnimaNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Parses `.anima` text. Either section may be omitted; neither may repeat.
pub fn parse_anima(text: &str) -> Result<AnimaDefinition, ParseError> {
    let mut stream = TokenStream::new(text, SOURCE_KIND)?;
    let mut definition = AnimaDefinition::default();
    let mut seen_sections = HashSet::new();

    while !stream.is_at_end() {
        let marker = stream.expect(TokenKind::Marker, "to open a section")?;
        let section = stream
            .ident_on_line(marker.line)
            .ok_or_else(|| stream.error_at(&marker, "expected section name after '--'"))?;
        if !seen_sections.insert(section.clone()) {
            return Err(stream.error_at(&marker, format!("duplicate '{}' section", section)));
        }

        match section.as_str() {
            "types" => definition.types = parse_types(&mut stream)?,
            "nodes" => definition.nodes = parse_nodes(&mut stream)?,
            other => {
                return Err(stream.error_at(
                    &marker,
                    format!("unknown section '{}', expected 'types' or 'nodes'", other),
                ))
            }
        }

        stream.expect(TokenKind::Marker, "to close the section")?;
    }

    Ok(definition)
}

fn parse_types(stream: &mut TokenStream) -> Result<Vec<AnimaType>, ParseError> {
    let mut types = Vec::new();
    let mut names = HashSet::new();

    while let Some(TokenKind::Ident(_)) = stream.peek_kind() {
        let (name, token) = stream.expect_ident_at("for a type name")?;
        if !names.insert(name.clone()) {
            return Err(stream.error_at(&token, format!("type '{}' declared twice", name)));
        }

        let fields = if stream.eat(&TokenKind::LBrace) {
            Some(parse_pairs(stream, "field")?)
        } else {
            None
        };
        types.push(AnimaType { name, fields });
    }

    Ok(types)
}

fn parse_nodes(stream: &mut TokenStream) -> Result<Vec<AnimaNode>, ParseError> {
    let mut nodes: Vec<AnimaNode> = Vec::new();

    while let Some(TokenKind::Ident(_)) = stream.peek_kind() {
        let (name, token) = stream.expect_ident_at("for a node name")?;
        if nodes.iter().any(|n| n.name == name) {
            return Err(stream.error_at(&token, format!("node '{}' declared twice", name)));
        }
        stream.expect(TokenKind::LBrace, "after node name")?;

        let mut node = AnimaNode {
            name,
            mode: NodeMode::default(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        };

        while !stream.eat(&TokenKind::RBrace) {
            let (keyword, keyword_token) = stream.expect_ident_at("for 'mode', 'in' or 'out'")?;
            match keyword.as_str() {
                "mode" => {
                    let (mode, mode_token) = stream.expect_ident_at("for the node mode")?;
                    node.mode = mode
                        .parse()
                        .map_err(|message: String| stream.error_at(&mode_token, message))?;
                }
                "in" => {
                    stream.expect(TokenKind::LBrace, "after 'in'")?;
                    node.inputs = parse_pairs(stream, "input port")?;
                }
                "out" => {
                    stream.expect(TokenKind::LBrace, "after 'out'")?;
                    node.outputs = parse_pairs(stream, "output port")?;
                }
                other => {
                    return Err(stream.error_at(
                        &keyword_token,
                        format!("unknown node attribute '{}', expected 'mode', 'in' or 'out'", other),
                    ))
                }
            }
        }

        nodes.push(node);
    }

    Ok(nodes)
}

/// `name Type` pairs up to and including the closing brace.
fn parse_pairs(stream: &mut TokenStream, what: &str) -> Result<IndexMap<String, String>, ParseError> {
    let mut pairs = IndexMap::new();
    while !stream.eat(&TokenKind::RBrace) {
        let (name, token) = stream.expect_ident_at(&format!("for a {} name", what))?;
        let type_name = stream.expect_type_name(&format!("for the type of {} '{}'", what, name))?;
        if pairs.insert(name.clone(), type_name).is_some() {
            return Err(stream.error_at(&token, format!("{} '{}' declared twice", what, name)));
        }
    }
    Ok(pairs)
}
