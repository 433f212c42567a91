use crate::error::{AllocBudget, TopoResult, TopologyError};
use crate::ids::{EdgeId, FaceId, VertexId};
use crate::pool::{Arena, PairArena};

pub(crate) struct HalfEdge<E> {
    pub(crate) onext: EdgeId,
    pub(crate) oprev: EdgeId,
    pub(crate) org: VertexId,
    pub(crate) lface: FaceId,
    pub(crate) data: E,
}

pub(crate) struct VertexSlot<V> {
    pub(crate) edge: EdgeId,
    pub(crate) data: V,
}

pub(crate) struct FaceSlot<F> {
    pub(crate) edge: EdgeId,
    pub(crate) data: F,
}

/// A half-edge mesh with per-element payloads `E` (edges), `V` (vertices)
/// and `F` (faces).
///
/// Elements are created only through the Euler operators in [`crate::euler`]
/// and destroyed only by their inverses; the constructors here and the raw
/// `alloc_*`/`kill_*` helpers are an internal concern of that module.
pub struct Mesh<E = (), V = (), F = ()> {
    pub(crate) edges: PairArena<HalfEdge<E>>,
    pub(crate) vertices: Arena<VertexSlot<V>>,
    pub(crate) faces: Arena<FaceSlot<F>>,
    pub(crate) budget: AllocBudget,
}

impl<E, V, F> Mesh<E, V, F> {
    /// An empty mesh with no allocation limit.
    pub fn new() -> Self {
        Mesh {
            edges: PairArena::new(),
            vertices: Arena::new(),
            faces: Arena::new(),
            budget: AllocBudget::unlimited(),
        }
    }

    /// Limits the mesh to `n` further pool allocations, deterministically
    /// failing the `(n+1)`-th with `OutOfMemory`. Used to exercise the
    /// all-or-nothing rollback path.
    pub fn set_alloc_budget(&mut self, budget: AllocBudget) {
        self.budget = budget;
    }

    /// Destroys every element, leaving an empty mesh that can be reused.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
        self.faces.clear();
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|(i, _)| EdgeId(i))
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|(i, _)| VertexId(i))
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().map(|(i, _)| FaceId(i))
    }

    // --- payload access -----------------------------------------------

    pub fn edge_data(&self, e: EdgeId) -> &E {
        &self.edges.get(e.0).data
    }

    pub fn edge_data_mut(&mut self, e: EdgeId) -> &mut E {
        &mut self.edges.get_mut(e.0).data
    }

    pub fn vertex_data(&self, v: VertexId) -> &V {
        &self.vertices.get(v.0).data
    }

    pub fn vertex_data_mut(&mut self, v: VertexId) -> &mut V {
        &mut self.vertices.get_mut(v.0).data
    }

    pub fn face_data(&self, f: FaceId) -> &F {
        &self.faces.get(f.0).data
    }

    pub fn face_data_mut(&mut self, f: FaceId) -> &mut F {
        &mut self.faces.get_mut(f.0).data
    }

    // --- link accessors --------------------------------------------------

    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.edges.get(e.0).onext
    }

    /// `sym(onext(sym(e)))`, but cached directly by `splice` rather than
    /// recomputed on every read.
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self.edges.get(e.0).oprev
    }

    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.oprev(e.sym())
    }

    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e).sym()
    }

    pub fn org(&self, e: EdgeId) -> VertexId {
        self.edges.get(e.0).org
    }

    pub fn dst(&self, e: EdgeId) -> VertexId {
        self.org(e.sym())
    }

    pub fn lface(&self, e: EdgeId) -> FaceId {
        self.edges.get(e.0).lface
    }

    pub fn rface(&self, e: EdgeId) -> FaceId {
        self.lface(e.sym())
    }

    pub fn vertex_edge(&self, v: VertexId) -> EdgeId {
        self.vertices.get(v.0).edge
    }

    pub fn face_edge(&self, f: FaceId) -> EdgeId {
        self.faces.get(f.0).edge
    }

    pub(crate) fn set_onext(&mut self, e: EdgeId, v: EdgeId) {
        self.edges.get_mut(e.0).onext = v;
    }

    pub(crate) fn set_oprev(&mut self, e: EdgeId, v: EdgeId) {
        self.edges.get_mut(e.0).oprev = v;
    }

    pub(crate) fn set_org(&mut self, e: EdgeId, v: VertexId) {
        self.edges.get_mut(e.0).org = v;
    }

    pub(crate) fn set_lface(&mut self, e: EdgeId, f: FaceId) {
        self.edges.get_mut(e.0).lface = f;
    }

    pub(crate) fn set_vertex_edge(&mut self, v: VertexId, e: EdgeId) {
        self.vertices.get_mut(v.0).edge = e;
    }

    pub(crate) fn set_face_edge(&mut self, f: FaceId, e: EdgeId) {
        self.faces.get_mut(f.0).edge = e;
    }

    // --- splice ------------------------------------------------------------

    /// The four-pointer rewrite every structural operator is built from.
    ///
    /// On the origin orbits of `a` and `b`: if they already share an
    /// origin, `splice` separates the orbit in two; otherwise it merges
    /// them into one. `splice` never touches `org` or `lface`; the caller
    /// is responsible for owner-field consistency afterwards.
    ///
    /// Its own inverse: `splice(a, b)` applied twice in a row restores the
    /// original links.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
        let x = self.onext(a);
        let y = self.onext(b);
        self.set_oprev(x, b);
        self.set_oprev(y, a);
        self.set_onext(a, y);
        self.set_onext(b, x);
    }

    // --- orbit helpers -------------------------------------------------

    /// Walks `onext` from `e` looking for a half-edge whose `lface` is `f`.
    pub fn orbit_edge(&self, e: EdgeId, f: FaceId) -> Option<EdgeId> {
        let mut cur = e;
        loop {
            if self.lface(cur) == f {
                return Some(cur);
            }
            cur = self.onext(cur);
            if cur == e {
                return None;
            }
        }
    }

    /// Walks the origin orbit of `e` and writes `org = v` on every
    /// half-edge in it. Called after a splice that merges or splits
    /// origin orbits.
    pub fn orbit_org_set(&mut self, e: EdgeId, v: VertexId) {
        let mut cur = e;
        loop {
            self.set_org(cur, v);
            cur = self.onext(cur);
            if cur == e {
                break;
            }
        }
    }

    /// Walks the left-face orbit of `e` and writes `lface = f` on every
    /// half-edge in it. The dual of [`Mesh::orbit_org_set`], needed by
    /// `make_face_edge`/`kill_face_edge`.
    pub fn orbit_lface_set(&mut self, e: EdgeId, f: FaceId) {
        let mut cur = e;
        loop {
            self.set_lface(cur, f);
            cur = self.lnext(cur);
            if cur == e {
                break;
            }
        }
    }

    // --- raw pool allocation (internal; used by euler.rs) ---------------

    pub(crate) fn alloc_vertex(&mut self, data: V) -> TopoResult<VertexId> {
        if !self.budget.try_consume() {
            return Err(TopologyError::OutOfMemory);
        }
        Ok(VertexId(self.vertices.alloc(VertexSlot {
            edge: EdgeId(0),
            data,
        })))
    }

    pub(crate) fn alloc_face(&mut self, data: F) -> TopoResult<FaceId> {
        if !self.budget.try_consume() {
            return Err(TopologyError::OutOfMemory);
        }
        Ok(FaceId(self.faces.alloc(FaceSlot {
            edge: EdgeId(0),
            data,
        })))
    }

    /// Allocates a fresh, unlinked half-edge pair: each half is self-fixed
    /// in its own origin orbit (`onext(e) = e`, `onext(sym(e)) = sym(e)`).
    /// This is what `make_edge` builds on.
    pub(crate) fn alloc_edge_pair(&mut self, data_a: E, data_b: E) -> TopoResult<EdgeId> {
        if !self.budget.try_consume() {
            return Err(TopologyError::OutOfMemory);
        }
        let base = self.edges.alloc_pair(
            HalfEdge {
                onext: EdgeId(0),
                oprev: EdgeId(0),
                org: VertexId(0),
                lface: FaceId(0),
                data: data_a,
            },
            HalfEdge {
                onext: EdgeId(0),
                oprev: EdgeId(0),
                org: VertexId(0),
                lface: FaceId(0),
                data: data_b,
            },
        );
        let e = EdgeId(base);
        let sym = e.sym();
        self.set_onext(e, e);
        self.set_oprev(e, e);
        self.set_onext(sym, sym);
        self.set_oprev(sym, sym);
        Ok(e)
    }

    /// Allocates a fresh self-loop pair: the two-cycle orbit
    /// `onext(e) = sym(e)`, `onext(sym(e)) = e`. Seeds any non-trivial
    /// mesh and is what `make_loop_edge` and the internal loop used by
    /// `make_vertex_edge`/`make_face_edge` build on.
    pub(crate) fn alloc_loop_pair(&mut self, data_a: E, data_b: E) -> TopoResult<EdgeId> {
        let e = self.alloc_edge_pair(data_a, data_b)?;
        let sym = e.sym();
        self.set_onext(e, sym);
        self.set_oprev(e, sym);
        self.set_onext(sym, e);
        self.set_oprev(sym, e);
        Ok(e)
    }

    pub(crate) fn kill_vertex(&mut self, v: VertexId) {
        self.vertices.dealloc(v.0);
    }

    pub(crate) fn kill_face(&mut self, f: FaceId) {
        self.faces.dealloc(f.0);
    }

    pub(crate) fn kill_edge_pair(&mut self, e: EdgeId) {
        self.edges.dealloc_pair(e.0);
    }

    /// A trace-style dump of all edges, faces and vertices, walking
    /// `onext`/`lnext` orbits. Debug-only: gated behind `cfg(debug_assertions)`
    /// plus the `checked` feature (on by default) so it costs nothing in
    /// release builds and can still be compiled out of a debug build.
    #[cfg(all(debug_assertions, feature = "checked"))]
    pub fn dump(&self) -> String {
        use std::fmt::Write as _;
        let mut out = String::new();
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort();
        for e in &edges {
            let _ = writeln!(
                out,
                "edge {:?}: onext={:?} oprev={:?} org={:?} lface={:?}",
                e,
                self.onext(*e),
                self.oprev(*e),
                self.org(*e),
                self.lface(*e)
            );
        }
        let mut verts: Vec<_> = self.vertices().collect();
        verts.sort();
        for v in &verts {
            let _ = writeln!(out, "vertex {:?}: edge={:?}", v, self.vertex_edge(*v));
        }
        let mut faces: Vec<_> = self.faces().collect();
        faces.sort();
        for f in &faces {
            let _ = writeln!(out, "face {:?}: edge={:?}", f, self.face_edge(*f));
        }
        out
    }
}

impl<E, V, F> Default for Mesh<E, V, F> {
    fn default() -> Self {
        Mesh::new()
    }
}
