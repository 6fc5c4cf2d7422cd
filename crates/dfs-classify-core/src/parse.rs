//! Reading graphs from edge lists.
//!
//! Text format: one edge per line (`;` also separates edges), written as
//! `u v`, `u,v` or `u -> v`. Blank lines and `#` comments are ignored.
//!
//! JSON format: `[[u, v], ...]` or `{"edges": [[u, v], ...]}`. With
//! [`parse_json_edge_list`] vertices may be JSON strings or numbers.

use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::graph::GraphStore;

/// Parse a text edge list with string vertices.
pub fn parse_edge_list(input: &str) -> ParseResult<GraphStore<String>> {
    parse_edge_list_as(input)
}

/// Parse a text edge list, converting each token with [`FromStr`].
pub fn parse_edge_list_as<V>(input: &str) -> ParseResult<GraphStore<V>>
where
    V: FromStr + Clone + Eq + Hash,
    V::Err: Display,
{
    let mut graph = GraphStore::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default();

        for segment in content.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (from, to) = split_edge(segment).ok_or_else(|| ParseError::MalformedLine {
                line,
                content: segment.to_string(),
            })?;
            graph.add_edge(parse_vertex(line, from)?, parse_vertex(line, to)?);
        }
    }

    debug!(
        sources = graph.vertex_count(),
        edges = graph.edge_count(),
        "edge_list_parsed"
    );
    Ok(graph)
}

/// Read a text edge list from disk.
pub fn read_edge_list(path: impl AsRef<Path>) -> ParseResult<GraphStore<String>> {
    let contents = std::fs::read_to_string(path)?;
    parse_edge_list(&contents)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeListDocument<V> {
    Bare(Vec<(V, V)>),
    Wrapped { edges: Vec<(V, V)> },
}

/// Parse a JSON edge list.
pub fn parse_json_edges<V>(json: &str) -> ParseResult<GraphStore<V>>
where
    V: DeserializeOwned + Clone + Eq + Hash,
{
    let edges = match serde_json::from_str::<EdgeListDocument<V>>(json)? {
        EdgeListDocument::Bare(edges) | EdgeListDocument::Wrapped { edges } => edges,
    };
    Ok(edges.into_iter().collect())
}

/// A JSON vertex written as a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum VertexToken {
    Text(String),
    Number(serde_json::Number),
}

impl From<VertexToken> for String {
    fn from(token: VertexToken) -> Self {
        match token {
            VertexToken::Text(text) => text,
            VertexToken::Number(number) => number.to_string(),
        }
    }
}

/// Parse a JSON edge list whose vertices are strings, numbers, or a mix.
///
/// Numbers keep their JSON spelling, so `[[0, 1]]` and `[["0", "1"]]` build
/// the same graph.
pub fn parse_json_edge_list(json: &str) -> ParseResult<GraphStore<String>> {
    let edges = match serde_json::from_str::<EdgeListDocument<VertexToken>>(json)? {
        EdgeListDocument::Bare(edges) | EdgeListDocument::Wrapped { edges } => edges,
    };
    let graph: GraphStore<String> = edges
        .into_iter()
        .map(|(from, to)| (String::from(from), String::from(to)))
        .collect();

    debug!(
        sources = graph.vertex_count(),
        edges = graph.edge_count(),
        "json_edge_list_parsed"
    );
    Ok(graph)
}

fn split_edge(segment: &str) -> Option<(&str, &str)> {
    if let Some((from, to)) = segment.split_once("->") {
        let (from, to) = (from.trim(), to.trim());
        return (!from.is_empty() && !to.is_empty() && !to.contains("->")).then_some((from, to));
    }

    let mut tokens = segment
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(from), Some(to), None) => Some((from, to)),
        _ => None,
    }
}

fn parse_vertex<V>(line: usize, token: &str) -> ParseResult<V>
where
    V: FromStr,
    V::Err: Display,
{
    token.parse().map_err(|e: V::Err| ParseError::InvalidVertex {
        line,
        token: token.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_separators() {
        let graph = parse_edge_list("u v\nu -> x\nv,y\n\n# comment\ny x # trailing").unwrap();

        assert_eq!(graph.neighbors(&"u".to_string()), &["v", "x"]);
        assert_eq!(graph.neighbors(&"v".to_string()), &["y"]);
        assert_eq!(graph.neighbors(&"y".to_string()), &["x"]);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_semicolon_separated() {
        let graph: GraphStore<u64> = parse_edge_list_as("0->1; 1->2;2 -> 3").unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.vertices().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_edge_list("a b\na b c").unwrap_err();
        match err {
            ParseError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "a b c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dangling_arrow_is_malformed() {
        assert!(parse_edge_list("a ->").is_err());
        assert!(parse_edge_list("a -> b -> c").is_err());
    }

    #[test]
    fn test_invalid_numeric_vertex() {
        let err = parse_edge_list_as::<u64>("1 two").unwrap_err();
        assert!(matches!(err, ParseError::InvalidVertex { line: 1, ref token, .. } if token == "two"));
    }

    #[test]
    fn test_json_forms() {
        let bare: GraphStore<u32> = parse_json_edges("[[0, 1], [1, 0]]").unwrap();
        let wrapped: GraphStore<String> =
            parse_json_edges(r#"{"edges": [["a", "b"], ["a", "c"]]}"#).unwrap();

        assert_eq!(bare.edge_count(), 2);
        assert_eq!(wrapped.neighbors(&"a".to_string()), &["b", "c"]);
    }

    #[test]
    fn test_json_numeric_and_mixed_vertices_as_labels() {
        let numeric = parse_json_edge_list("[[0, 1], [1, 0]]").unwrap();
        let quoted = parse_json_edge_list(r#"[["0", "1"], ["1", "0"]]"#).unwrap();
        let mixed = parse_json_edge_list(r#"{"edges": [["a", 2], [2, "a"]]}"#).unwrap();

        assert_eq!(numeric.neighbors(&"0".to_string()), &["1"]);
        assert_eq!(
            numeric.edges().collect::<Vec<_>>(),
            quoted.edges().collect::<Vec<_>>()
        );
        assert_eq!(mixed.neighbors(&"a".to_string()), &["2"]);
        assert!(parse_json_edge_list("[[true, 1]]").is_err());
    }

    #[test]
    fn test_json_garbage_is_error() {
        assert!(matches!(
            parse_json_edges::<u32>("{\"nodes\": []}"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_read_edge_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        std::fs::write(&path, "0 1\n1 0\n").unwrap();

        let graph = read_edge_list(&path).unwrap();
        assert_eq!(graph.edge_count(), 2);

        assert!(matches!(
            read_edge_list(dir.path().join("missing.txt")),
            Err(ParseError::Io(_))
        ));
    }
}
