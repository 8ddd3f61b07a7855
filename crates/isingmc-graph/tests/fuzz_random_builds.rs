use std::collections::BTreeSet;

use isingmc_core::VertexId;
use isingmc_graph::Graph;
use proptest::prelude::*;

fn check_invariants(graph: &Graph<(), ()>) {
    let mut pairs = BTreeSet::new();
    for edge in graph.edges() {
        let (a, b) = (edge.head.index(), edge.tail.index());
        pairs.insert((a.min(b), a.max(b)));
    }
    assert_eq!(pairs.len(), graph.edge_count());

    let incident_total: usize = graph
        .vertices()
        .map(|(id, _)| graph.degree(id).unwrap())
        .sum();
    let self_loops = graph.edges().filter(|edge| edge.head == edge.tail).count();
    assert_eq!(incident_total, 2 * graph.edge_count() - self_loops);
}

proptest! {
    #[test]
    fn random_insertions_never_duplicate_pairs(
        nodes in 2usize..12,
        raw_pairs in proptest::collection::vec((0usize..12, 0usize..12), 0..80),
    ) {
        let mut graph: Graph<(), ()> = Graph::from_vertices(vec![(); nodes]);
        let mut expected = BTreeSet::new();
        for (a, b) in raw_pairs {
            let (a, b) = (a % nodes, b % nodes);
            let insert = graph.add_edge(VertexId::new(a), VertexId::new(b)).unwrap();
            let fresh = expected.insert((a.min(b), a.max(b)));
            prop_assert_eq!(insert.is_added(), fresh);
        }
        prop_assert_eq!(graph.edge_count(), expected.len());
        check_invariants(&graph);

        for &(a, b) in &expected {
            let found = graph.find_edge(VertexId::new(b), VertexId::new(a)).unwrap();
            prop_assert!(found.is_some());
        }
    }
}
