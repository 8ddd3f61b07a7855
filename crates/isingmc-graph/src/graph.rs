use std::collections::BTreeSet;

use isingmc_core::{EdgeId, IsingError, VertexId};

/// Result of an edge insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// A new edge was created and the topology changed.
    Added(EdgeId),
    /// The unordered pair was already connected by this edge; nothing changed.
    Existing(EdgeId),
}

impl EdgeInsert {
    /// Returns the identifier of the edge connecting the requested pair.
    pub fn id(&self) -> EdgeId {
        match self {
            EdgeInsert::Added(id) | EdgeInsert::Existing(id) => *id,
        }
    }

    /// Returns whether the insertion created a new edge.
    pub fn is_added(&self) -> bool {
        matches!(self, EdgeInsert::Added(_))
    }
}

#[derive(Debug, Clone)]
struct VertexRecord<V> {
    data: V,
    incident: BTreeSet<EdgeId>,
}

#[derive(Debug, Clone)]
struct EdgeRecord<E> {
    head: VertexId,
    tail: VertexId,
    data: E,
}

impl<E> EdgeRecord<E> {
    fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.head == a && self.tail == b) || (self.head == b && self.tail == a)
    }
}

/// Borrowed view over a stored edge.
#[derive(Debug)]
pub struct EdgeRef<'a, E> {
    /// Identifier of the edge.
    pub id: EdgeId,
    /// Head endpoint as supplied on insertion.
    pub head: VertexId,
    /// Tail endpoint as supplied on insertion.
    pub tail: VertexId,
    /// Payload produced by the edge factory.
    pub data: &'a E,
}

impl<E> Clone for EdgeRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EdgeRef<'_, E> {}

impl<E> EdgeRef<'_, E> {
    /// Returns the endpoint opposite to `vertex`, or `None` when `vertex` is not
    /// an endpoint of this edge.
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.head {
            Some(self.tail)
        } else if vertex == self.tail {
            Some(self.head)
        } else {
            None
        }
    }
}

/// Undirected graph with arena-allocated vertices and edges.
///
/// Vertices carry a payload `V` and edges a payload `E`. Both are addressed by
/// stable integer identifiers; every vertex keeps the set of its incident edge
/// identifiers. At most one edge connects any unordered pair of vertices.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    vertices: Vec<VertexRecord<V>>,
    edges: Vec<EdgeRecord<E>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Creates an edgeless graph whose vertices carry the given payloads, in order.
    pub fn from_vertices(vertices: impl IntoIterator<Item = V>) -> Self {
        let vertices = vertices
            .into_iter()
            .map(|data| VertexRecord {
                data,
                incident: BTreeSet::new(),
            })
            .collect();
        Self {
            vertices,
            edges: Vec::new(),
        }
    }

    /// Appends a vertex and returns its identifier.
    pub fn add_vertex(&mut self, data: V) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(VertexRecord {
            data,
            incident: BTreeSet::new(),
        });
        id
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the payload of a vertex.
    pub fn vertex(&self, id: VertexId) -> Result<&V, IsingError> {
        Ok(&self.vertex_record(id)?.data)
    }

    /// Returns the payload of a vertex for mutation.
    ///
    /// Only the payload is exposed; the incident edge set stays owned by the graph.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut V, IsingError> {
        let len = self.vertices.len();
        self.vertices
            .get_mut(id.index())
            .map(|record| &mut record.data)
            .ok_or_else(|| unknown_vertex(id, len))
    }

    /// Iterates over all vertices in index order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &V)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, record)| (VertexId::new(idx), &record.data))
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeRef<'_, E>> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, record)| edge_ref(EdgeId::new(idx), record))
    }

    /// Returns a view over a single edge.
    pub fn edge(&self, id: EdgeId) -> Result<EdgeRef<'_, E>, IsingError> {
        self.edges
            .get(id.index())
            .map(|record| edge_ref(id, record))
            .ok_or_else(|| {
                IsingError::out_of_range("unknown-edge", "edge", id.index(), self.edges.len())
            })
    }

    /// Returns the `(head, tail)` endpoints of an edge.
    pub fn endpoints(&self, id: EdgeId) -> Result<(VertexId, VertexId), IsingError> {
        let edge = self.edge(id)?;
        Ok((edge.head, edge.tail))
    }

    /// Iterates over the identifiers of the edges incident to `vertex`.
    pub fn incident_edges(
        &self,
        vertex: VertexId,
    ) -> Result<impl ExactSizeIterator<Item = EdgeId> + '_, IsingError> {
        Ok(self.vertex_record(vertex)?.incident.iter().copied())
    }

    /// Returns the number of edges incident to `vertex`.
    pub fn degree(&self, vertex: VertexId) -> Result<usize, IsingError> {
        Ok(self.vertex_record(vertex)?.incident.len())
    }

    /// Iterates over `(edge, neighbour)` pairs around `vertex`.
    pub fn neighbours(
        &self,
        vertex: VertexId,
    ) -> Result<impl Iterator<Item = (EdgeId, VertexId)> + '_, IsingError> {
        let record = self.vertex_record(vertex)?;
        Ok(record.incident.iter().map(move |&edge| {
            let stored = &self.edges[edge.index()];
            let other = if stored.head == vertex {
                stored.tail
            } else {
                stored.head
            };
            (edge, other)
        }))
    }

    /// Finds the edge connecting the unordered pair `{a, b}`.
    ///
    /// Scans the incident set of whichever endpoint has the smaller degree.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Result<Option<EdgeId>, IsingError> {
        let record_a = self.vertex_record(a)?;
        let record_b = self.vertex_record(b)?;
        let incident = if record_a.incident.len() <= record_b.incident.len() {
            &record_a.incident
        } else {
            &record_b.incident
        };
        Ok(incident
            .iter()
            .copied()
            .find(|edge| self.edges[edge.index()].connects(a, b)))
    }

    /// Connects `head` and `tail`, building the edge payload with `factory`.
    ///
    /// When the pair is already connected the existing edge is returned and the
    /// factory is not called. Unknown endpoints leave the graph untouched.
    pub fn add_edge_with<F>(
        &mut self,
        head: VertexId,
        tail: VertexId,
        factory: F,
    ) -> Result<EdgeInsert, IsingError>
    where
        F: FnOnce(VertexId, VertexId) -> E,
    {
        if let Some(existing) = self.find_edge(head, tail)? {
            return Ok(EdgeInsert::Existing(existing));
        }
        let id = EdgeId::new(self.edges.len());
        self.edges.push(EdgeRecord {
            head,
            tail,
            data: factory(head, tail),
        });
        self.vertices[head.index()].incident.insert(id);
        self.vertices[tail.index()].incident.insert(id);
        Ok(EdgeInsert::Added(id))
    }

    /// Connects `head` and `tail` with a default edge payload.
    pub fn add_edge(&mut self, head: VertexId, tail: VertexId) -> Result<EdgeInsert, IsingError>
    where
        E: Default,
    {
        self.add_edge_with(head, tail, |_, _| E::default())
    }

    /// Validates that `vertex` exists.
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), IsingError> {
        self.vertex_record(vertex).map(|_| ())
    }

    fn vertex_record(&self, id: VertexId) -> Result<&VertexRecord<V>, IsingError> {
        self.vertices
            .get(id.index())
            .ok_or_else(|| unknown_vertex(id, self.vertices.len()))
    }
}

fn edge_ref<E>(id: EdgeId, record: &EdgeRecord<E>) -> EdgeRef<'_, E> {
    EdgeRef {
        id,
        head: record.head,
        tail: record.tail,
        data: &record.data,
    }
}

fn unknown_vertex(id: VertexId, len: usize) -> IsingError {
    IsingError::out_of_range("unknown-vertex", "vertex", id.index(), len)
}
