use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first search tracking the in-progress path. Returns the nodes of the first cycle found,
/// in edge order, starting from the node the search re-entered.
pub(super) fn find_cycle<N, E>(graph: &DiGraph<N, E>) -> Option<Vec<NodeIndex>> {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    let mut path = Vec::new();
    for start in graph.node_indices() {
        if marks[start.index()] == Mark::Unvisited {
            if let Some(cycle) = visit(graph, start, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit<N, E>(
    graph: &DiGraph<N, E>,
    node: NodeIndex,
    marks: &mut [Mark],
    path: &mut Vec<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    marks[node.index()] = Mark::InProgress;
    path.push(node);

    // petgraph yields neighbors newest edge first
    let mut next: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
    next.sort_unstable();

    for neighbor in next {
        match marks[neighbor.index()] {
            Mark::InProgress => {
                let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                return Some(path[start..].to_vec());
            }
            Mark::Unvisited => {
                if let Some(cycle) = visit(graph, neighbor, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node.index()] = Mark::Done;
    None
}

/// Kahn's algorithm, always releasing the lowest-positioned ready node first so the order is
/// stable and follows the recipe's reading order wherever dependencies allow.
///
/// Only meaningful on acyclic graphs; nodes on a cycle are left out.
pub(super) fn topological_order<N, E>(graph: &DiGraph<N, E>) -> Vec<NodeIndex> {
    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|n| graph.neighbors_directed(n, Direction::Incoming).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(i)) = ready.pop() {
        let node = NodeIndex::new(i);
        order.push(node);
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                ready.push(Reverse(next.index()));
            }
        }
    }
    order
}
