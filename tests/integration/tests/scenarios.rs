//! Integration test: edge-list text through the engine to a forwarding table.
//!
//! Exercises linkstate-core (parsing, graph) and linkstate-routing (engine,
//! resolver) together on small hand-checked networks.

use linkstate_core::{load_edge_list, parse_edge_list, CoreError, NodeId};
use linkstate_routing::{
    Cell, ForwardingResolver, ForwardingTable, LinkStateEngine, RoutingError, ShortestPathTree,
};

fn n(id: u32) -> NodeId {
    NodeId::new(id).unwrap()
}

/// Helper: parse, validate the source, run, and resolve.
fn solve(input: &str, source: u32) -> Result<(ShortestPathTree, ForwardingTable), String> {
    let graph = parse_edge_list(input).map_err(|e| e.to_string())?;
    let source = LinkStateEngine::validate_source(&graph, source).map_err(|e| e.to_string())?;
    let tree = LinkStateEngine::with_defaults()
        .run(&graph, source)
        .map_err(|e| e.to_string())?;
    let table = ForwardingResolver::new(&tree).resolve();
    Ok((tree, table))
}

// =========================================================================
// Fully connected triangle
// =========================================================================

#[test]
fn test_triangle_prefers_two_hop_path() {
    let (tree, table) = solve("3\n1 2 5\n1 3 9\n2 3 2\n", 1).unwrap();

    assert_eq!(tree.confirmed(), &[n(1), n(2), n(3)]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(n(2)).unwrap().next_hop, n(2));

    // 1 -> 2 -> 3 costs 7, less than the direct 9.
    let to_three = table.get(n(3)).unwrap();
    assert_eq!(to_three.next_hop, n(2));
    assert_eq!(to_three.distance, 7);
}

// =========================================================================
// Disconnected node
// =========================================================================

#[test]
fn test_isolated_node_is_never_confirmed() {
    let (tree, table) = solve("4\n1 2 5\n1 3 9\n2 3 2\n", 1).unwrap();

    assert!(!tree.confirmed().contains(&n(4)));
    assert_eq!(tree.confirmed().len(), 3);
    assert!(table.get(n(4)).is_none());
    assert_eq!(table.unreachable(), &[n(4)]);

    assert_eq!(tree.steps().len(), 4);
    for round in tree.steps().rounds() {
        let cell = round.get(n(4)).unwrap();
        assert_eq!(cell.to_string(), "INF,1");
    }
}

#[test]
fn test_resolver_reports_unreachable_destination() {
    let (tree, _) = solve("4\n1 2 5\n", 1).unwrap();
    let resolver = ForwardingResolver::new(&tree);
    let err = resolver.first_hop(n(4)).unwrap_err();
    assert!(err.is_unreachable());
    assert!(matches!(err, RoutingError::UnreachableDestination { .. }));
}

// =========================================================================
// Single node
// =========================================================================

#[test]
fn test_single_node_network() {
    let (tree, table) = solve("1\n", 1).unwrap();
    assert!(tree.steps().is_empty());
    assert_eq!(tree.confirmed(), &[n(1)]);
    assert!(table.is_empty());
}

// =========================================================================
// Failures before the algorithm runs
// =========================================================================

#[test]
fn test_invalid_source_node() {
    let graph = parse_edge_list("3\n1 2 5\n").unwrap();
    let err = LinkStateEngine::validate_source(&graph, 4).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidSourceNode { node: 4, node_count: 3 }));
    assert!(LinkStateEngine::validate_source(&graph, 0).is_err());
}

#[test]
fn test_malformed_node_count() {
    let err = parse_edge_list("x\n1 2 5\n").unwrap_err();
    assert!(matches!(err, CoreError::MalformedInput { line: 1, .. }));
}

#[test]
fn test_node_count_beyond_node_id_width() {
    let err = parse_edge_list("4294967296\n1 2 5\n").unwrap_err();
    assert!(matches!(err, CoreError::MalformedInput { line: 1, .. }));
}

#[test]
fn test_malformed_edge_line() {
    let err = parse_edge_list("3\n1 2 5\n2 three 1\n").unwrap_err();
    assert!(matches!(err, CoreError::MalformedInput { line: 3, .. }));
}

#[test]
fn test_missing_input_file() {
    let err = load_edge_list(std::path::Path::new("/nonexistent/linkstate/net.txt")).unwrap_err();
    assert!(matches!(err, CoreError::InputUnreadable { .. }));
}

// =========================================================================
// Larger network
// =========================================================================

/// Classic six-router textbook network, source u (= 1).
///
/// ```text
///   u=1, v=2, w=3, x=4, y=5, z=6
///   u-v 2, u-x 1, u-w 5, v-x 2, v-w 3, x-w 3, x-y 1, w-y 1, w-z 5, y-z 2
/// ```
const TEXTBOOK: &str = "6
1 2 2
2 1 2
1 4 1
4 1 1
1 3 5
3 1 5
2 4 2
4 2 2
2 3 3
3 2 3
4 3 3
3 4 3
4 5 1
5 4 1
3 5 1
5 3 1
3 6 5
6 3 5
5 6 2
6 5 2
";

#[test]
fn test_textbook_network() {
    let (tree, table) = solve(TEXTBOOK, 1).unwrap();

    // N' grows u, x, v, y, w, z
    assert_eq!(tree.confirmed(), &[n(1), n(4), n(2), n(5), n(3), n(6)]);

    let expected = [(2, 2, 2), (3, 4, 3), (4, 4, 1), (5, 4, 2), (6, 4, 4)];
    for (dest, hop, distance) in expected {
        let entry = table.get(n(dest)).unwrap();
        assert_eq!(entry.next_hop, n(hop), "first hop to {dest}");
        assert_eq!(entry.distance, distance, "distance to {dest}");
        assert_eq!(entry.source, n(1));
    }

    let path = ForwardingResolver::new(&tree).path(n(6)).unwrap();
    assert_eq!(path, vec![n(1), n(4), n(5), n(6)]);
}

#[test]
fn test_textbook_round_one() {
    let (tree, _) = solve(TEXTBOOK, 1).unwrap();
    let steps = tree.steps();
    // After confirming x (4): w improves 5 -> 4 via x, y becomes 2 via x.
    assert_eq!(
        steps.cell(1, n(3)),
        Some(&Cell::Tentative {
            distance: 4,
            predecessor: n(4)
        })
    );
    assert_eq!(
        steps.cell(1, n(5)),
        Some(&Cell::Tentative {
            distance: 2,
            predecessor: n(4)
        })
    );
    assert_eq!(steps.cell(1, n(4)), Some(&Cell::Settled));
}

#[test]
fn test_json_round_trip_of_results() {
    let (tree, table) = solve("3\n1 2 5\n1 3 9\n2 3 2\n", 1).unwrap();
    let tree_json = serde_json::to_value(&tree).unwrap();
    assert_eq!(tree_json["confirmed"], serde_json::json!([1, 2, 3]));
    assert_eq!(tree_json["steps"][0]["cells"]["3"]["distance"], 9);

    let table_json = serde_json::to_value(&table).unwrap();
    assert_eq!(table_json["entries"].as_array().unwrap().len(), 2);
}
