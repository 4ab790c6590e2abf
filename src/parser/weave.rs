// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `.weave` graph descriptions.
//!
//! ```text
//! -- import
//! basic.anima
//! --
//!
//! -- graph timestamp_demo
//! nodes {
//!     start: basic.Start
//!     timer: basic.GetTimestamp
//!     label: basic.FormatNumber { number = 42 }
//! }
//! control {
//!     start.signal -> timer.trigger
//! }
//! data {
//!     timer.timestamp -> label.number
//! }
//! entry {
//!     start
//! }
//! --
//! ```
//!
//! Blocks inside `graph` may appear in any order and may repeat. The graph
//! name and the `import` and `entry` blocks are optional.

use std::collections::HashSet;

use crate::errors::ParseError;
use crate::graph::{ConnectionKind, PortRef, WeaveConnection, WeaveGraph, WeaveNode};
use crate::parser::lexer::{TokenKind, TokenStream};
use crate::types::Value;

const SOURCE_KIND: &str = "weave";

/// Suffix stripped from import references.
pub const ANIMA_SUFFIX: &str = "anima";

/// Parses `.weave` text. The graph name is empty when the text does not give one.
pub fn parse_weave(text: &str) -> Result<WeaveGraph, ParseError> {
    let mut stream = TokenStream::new(text, SOURCE_KIND)?;
    let mut graph = WeaveGraph::default();
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
            "import" => graph.imports = parse_imports(&mut stream)?,
            "graph" => {
                if let Some(name) = stream.ident_on_line(marker.line) {
                    graph.metadata.name = name;
                }
                parse_graph_body(&mut stream, &mut graph)?;
            }
            other => {
                return Err(stream.error_at(
                    &marker,
                    format!("unknown section '{}', expected 'import' or 'graph'", other),
                ))
            }
        }

        stream.expect(TokenKind::Marker, "to close the section")?;
    }

    if !seen_sections.contains("graph") {
        return Err(stream.unexpected("expected a '-- graph' section"));
    }
    Ok(graph)
}

fn parse_imports(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
    let mut imports = Vec::new();
    while let Some(TokenKind::Ident(_)) = stream.peek_kind() {
        let (plugin, token) = stream.expect_ident_at("for an imported plugin")?;
        stream.expect(TokenKind::Dot, &format!("in import '{}'", plugin))?;
        let (suffix, suffix_token) = stream.expect_ident_at("for the import file suffix")?;
        if suffix != ANIMA_SUFFIX {
            return Err(stream.error_at(
                &suffix_token,
                format!("import '{}.{}' must reference a .{} file", plugin, suffix, ANIMA_SUFFIX),
            ));
        }
        if imports.contains(&plugin) {
            return Err(stream.error_at(&token, format!("plugin '{}' imported twice", plugin)));
        }
        imports.push(plugin);
    }
    Ok(imports)
}

fn parse_graph_body(stream: &mut TokenStream, graph: &mut WeaveGraph) -> Result<(), ParseError> {
    while let Some(TokenKind::Ident(_)) = stream.peek_kind() {
        let (block, token) = stream.expect_ident_at("for a graph block")?;
        stream.expect(TokenKind::LBrace, &format!("after '{}'", block))?;
        match block.as_str() {
            "nodes" => parse_nodes(stream, graph)?,
            "data" => parse_connections(stream, graph, ConnectionKind::Data)?,
            "control" => parse_connections(stream, graph, ConnectionKind::Control)?,
            "entry" => {
                while !stream.eat(&TokenKind::RBrace) {
                    let id = stream.expect_ident("for an entry point")?;
                    graph.metadata.entry_points.push(id);
                }
            }
            other => {
                return Err(stream.error_at(
                    &token,
                    format!(
                        "unknown graph block '{}', expected 'nodes', 'data', 'control' or 'entry'",
                        other
                    ),
                ))
            }
        }
    }
    Ok(())
}

/// `id: plugin.Type` with an optional `{ port = literal }` parameter block.
fn parse_nodes(stream: &mut TokenStream, graph: &mut WeaveGraph) -> Result<(), ParseError> {
    while !stream.eat(&TokenKind::RBrace) {
        let (id, token) = stream.expect_ident_at("for a node id")?;
        if graph.nodes.contains_key(&id) {
            return Err(stream.error_at(&token, format!("node id '{}' declared twice", id)));
        }
        stream.expect(TokenKind::Colon, &format!("after node id '{}'", id))?;
        let plugin = stream.expect_ident(&format!("for the plugin of node '{}'", id))?;
        stream.expect(TokenKind::Dot, &format!("between plugin and node type of '{}'", id))?;
        let node_type = stream.expect_ident(&format!("for the node type of '{}'", id))?;

        let mut node = WeaveNode::new(id, plugin, node_type);
        if stream.eat(&TokenKind::LBrace) {
            while !stream.eat(&TokenKind::RBrace) {
                let port = stream.expect_ident("for a parameter port")?;
                stream.expect(TokenKind::Equals, &format!("after parameter '{}'", port))?;
                let value = parse_literal(stream)?;
                node = node.with_parameter(port, value);
            }
        }
        graph.add_node(node);
    }
    Ok(())
}

fn parse_literal(stream: &mut TokenStream) -> Result<Value, ParseError> {
    let value = match stream.peek_kind() {
        Some(TokenKind::Integer(n)) => Value::from(*n),
        Some(TokenKind::Str(s)) => Value::String(s.clone()),
        Some(TokenKind::Ident(word)) if word == "true" => Value::Bool(true),
        Some(TokenKind::Ident(word)) if word == "false" => Value::Bool(false),
        _ => return Err(stream.unexpected("expected integer, string, true or false")),
    };
    stream.advance();
    Ok(value)
}

fn parse_connections(
    stream: &mut TokenStream,
    graph: &mut WeaveGraph,
    kind: ConnectionKind,
) -> Result<(), ParseError> {
    while !stream.eat(&TokenKind::RBrace) {
        let from = parse_port_ref(stream)?;
        stream.expect(TokenKind::Arrow, &format!("after '{}'", from))?;
        let to = parse_port_ref(stream)?;
        graph.connect(WeaveConnection { from, to, kind });
    }
    Ok(())
}

fn parse_port_ref(stream: &mut TokenStream) -> Result<PortRef, ParseError> {
    let node = stream.expect_ident("for a node id")?;
    stream.expect(TokenKind::Dot, &format!("after '{}'", node))?;
    let port = stream.expect_ident(&format!("for a port of '{}'", node))?;
    Ok(PortRef::new(node, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEMO: &str = r#"
-- import
basic.anima
--

-- graph timestamp_demo
nodes {
    start: basic.Start
    timer: basic.GetTimestamp
    even: basic.IsEven
    label: basic.FormatNumber { number = -42 }
}
control {
    start.signal -> timer.trigger
    timer.done -> even.trigger
}
data {
    timer.timestamp -> even.number
    timer.timestamp -> label.number // fan out
}
entry {
    start
}
--
"#;

    #[test]
    fn test_parses_full_graph() {
        let graph = parse_weave(DEMO).unwrap();

        assert_eq!(graph.metadata.name, "timestamp_demo");
        assert_eq!(graph.imports, vec!["basic".to_string()]);
        let ids: Vec<&String> = graph.nodes.keys().collect();
        assert_eq!(ids, vec!["start", "timer", "even", "label"]);
        assert_eq!(graph.nodes["timer"].plugin, "basic");
        assert_eq!(graph.nodes["timer"].node_type, "GetTimestamp");
        assert_eq!(graph.nodes["label"].parameters["number"], json!(-42));
        assert_eq!(graph.metadata.entry_points, vec!["start".to_string()]);

        assert_eq!(graph.connections.len(), 4);
        assert_eq!(graph.connections[0].kind, ConnectionKind::Control);
        assert_eq!(graph.connections[3].kind, ConnectionKind::Data);
        assert_eq!(graph.connections[3].to_string(), "timer.timestamp -> label.number");
    }

    #[test]
    fn test_minimal_graph_without_name_or_imports() {
        let graph = parse_weave("-- graph\nnodes {\n a: basic.Start\n}\n--\n").unwrap();
        assert_eq!(graph.metadata.name, "");
        assert!(graph.imports.is_empty());
        assert!(graph.metadata.entry_points.is_empty());
        assert_eq!(graph.nodes.len(), 1);
    }

    #[test]
    fn test_parameter_literals() {
        let graph = parse_weave(
            "-- graph\nnodes {\n p: x.Y { s = \"hi\" b = true c = false n = 7 }\n}\n--",
        )
        .unwrap();
        let params = &graph.nodes["p"].parameters;
        assert_eq!(params["s"], json!("hi"));
        assert_eq!(params["b"], json!(true));
        assert_eq!(params["c"], json!(false));
        assert_eq!(params["n"], json!(7));
    }

    #[test]
    fn test_missing_graph_section_fails() {
        let err = parse_weave("-- import\nbasic.anima\n--").unwrap_err();
        assert!(err.message.contains("graph"));
    }

    #[test]
    fn test_bad_import_suffix_fails() {
        let err = parse_weave("-- import\nbasic.weave\n--\n-- graph\n--").unwrap_err();
        assert_eq!(err.fragment, "weave");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_malformed_connection_reports_position() {
        let err = parse_weave("-- graph\ndata {\n  a.x = b.y\n}\n--").unwrap_err();
        assert_eq!(err.source_kind, "weave");
        assert_eq!(err.line, 3);
        assert_eq!(err.fragment, "=");
    }

    #[test]
    fn test_duplicate_node_id_fails() {
        let err = parse_weave("-- graph\nnodes {\n a: p.X\n a: p.Y\n}\n--").unwrap_err();
        assert_eq!((err.line, err.fragment.as_str()), (4, "a"));
    }

    #[test]
    fn test_unknown_block_fails() {
        let err = parse_weave("-- graph\nwires {\n}\n--").unwrap_err();
        assert!(err.message.contains("wires"));
    }
}
