use isingmc_core::{IsingError, VertexId};
use isingmc_graph::{EdgeInsert, Graph};

fn v(index: usize) -> VertexId {
    VertexId::new(index)
}

#[test]
fn reversed_duplicate_is_not_inserted() {
    let mut graph: Graph<(), ()> = Graph::from_vertices(vec![(); 3]);
    graph.add_edge(v(0), v(1)).unwrap();
    graph.add_edge(v(0), v(2)).unwrap();
    let again = graph.add_edge(v(1), v(0)).unwrap();

    assert!(matches!(again, EdgeInsert::Existing(_)));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.degree(v(0)).unwrap(), 2);
    assert_eq!(graph.degree(v(1)).unwrap(), 1);
    assert_eq!(graph.degree(v(2)).unwrap(), 1);
}

#[test]
fn single_pair_reports_one_incident_edge_each() {
    let mut graph: Graph<(), ()> = Graph::from_vertices(vec![(); 2]);
    let first = graph.add_edge(v(0), v(1)).unwrap();
    let second = graph.add_edge(v(1), v(0)).unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.incident_edges(v(0)).unwrap().len(), 1);
    assert_eq!(graph.incident_edges(v(1)).unwrap().len(), 1);
}

#[test]
fn unknown_vertex_leaves_graph_untouched() {
    let mut graph: Graph<(), ()> = Graph::from_vertices(vec![(); 2]);
    let err = graph.add_edge(v(0), v(5)).unwrap_err();
    match err {
        IsingError::Index(info) => {
            assert_eq!(info.code, "unknown-vertex");
            assert_eq!(info.context.get("index"), Some(&"5".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.degree(v(0)).unwrap(), 0);
}

#[test]
fn edges_expose_endpoints_for_inspection() {
    let mut graph: Graph<&str, ()> = Graph::new();
    let a = graph.add_vertex("a");
    let b = graph.add_vertex("b");
    let id = graph.add_edge(b, a).unwrap().id();

    let edges: Vec<_> = graph.edges().map(|edge| (edge.head, edge.tail)).collect();
    assert_eq!(edges, vec![(b, a)]);
    assert_eq!(graph.endpoints(id).unwrap(), (b, a));
    assert_eq!(graph.edge(id).unwrap().other(a), Some(b));
    assert_eq!(*graph.vertex(a).unwrap(), "a");
}

#[test]
fn find_edge_reports_absent_pairs() {
    let mut graph: Graph<(), ()> = Graph::from_vertices(vec![(); 4]);
    graph.add_edge(v(0), v(1)).unwrap();
    graph.add_edge(v(2), v(3)).unwrap();
    assert_eq!(graph.find_edge(v(1), v(2)).unwrap(), None);
    assert!(graph.find_edge(v(3), v(2)).unwrap().is_some());
    assert!(graph.find_edge(v(3), v(9)).is_err());
}
