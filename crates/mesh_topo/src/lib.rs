//! Half-edge / quad-edge mesh topology and Euler-operator algebra.
//!
//! This crate is the topological substrate for a 2D graphics engine's
//! polygon tessellation, Boolean operations, and stroke offsetting: a
//! mesh of vertices, edges and faces with O(1) neighbour traversal and a
//! small, precise set of invariants preserved by every legal mutation.
//!
//! It knows nothing about coordinates, geometric predicates, rendering, or
//! persistence; those are the concern of crates built on top of it. See
//! [`mesh_check`](https://docs.rs/mesh_check) for an invariant checker.
#![warn(rust_2018_idioms)]

mod error;
mod euler;
mod ids;
mod mesh;
mod pool;

pub use error::{AllocBudget, TopoResult, TopologyError};
pub use ids::{EdgeId, FaceId, VertexId};
pub use mesh::Mesh;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_has_no_elements() {
        let m: Mesh<(), (), ()> = Mesh::new();
        assert_eq!(m.edge_count(), 0);
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.edges().count(), 0);
    }

    #[test]
    fn make_edge_scenario() {
        let mut m: Mesh<(), (), ()> = Mesh::new();
        let e = m.make_edge().unwrap();
        assert_ne!(m.org(e), m.dst(e));
        assert_eq!(m.lface(e), m.lface(e.sym()));
        assert_eq!(m.onext(e), e);
        assert_eq!(m.onext(e.sym()), e.sym());
        assert_eq!(m.vertex_count(), 2);
        assert_eq!(m.edge_count(), 1);
        assert_eq!(m.face_count(), 1);
    }

    #[test]
    fn make_loop_edge_scenario() {
        let mut m: Mesh<(), (), ()> = Mesh::new();
        let e = m.make_loop_edge(true).unwrap();
        assert_eq!(m.org(e), m.org(e.sym()));
        assert_ne!(m.lface(e), m.lface(e.sym()));
        assert_eq!(m.onext(e), e);
        assert_eq!(m.onext(e.sym()), e.sym());
        assert_eq!(m.vertex_count(), 1);
        assert_eq!(m.edge_count(), 1);
        assert_eq!(m.face_count(), 2);
    }

    #[test]
    fn splice_is_involutive() {
        let mut m: Mesh<(), (), ()> = Mesh::new();
        let a = m.make_loop_edge(true).unwrap();
        let b = m.make_loop_edge(false).unwrap();

        let before: Vec<_> = m
            .edges()
            .map(|e| (e, m.onext(e), m.oprev(e), m.org(e), m.lface(e)))
            .collect();

        m.splice(a, b);
        m.splice(a, b);

        let after: Vec<_> = m
            .edges()
            .map(|e| (e, m.onext(e), m.oprev(e), m.org(e), m.lface(e)))
            .collect();

        assert_eq!(before, after);
    }

    /// Joins two independent self-loops at a single shared vertex, as a
    /// fixture for `make_vertex_edge`/`kill_vertex_edge` tests. `splice`
    /// only merges the origin orbits; owner rewrite and reclaiming the
    /// now-redundant vertex is the caller's job per its documented contract.
    fn join_loops_at_vertex(m: &mut Mesh<(), (), ()>, a: EdgeId, b: EdgeId) -> VertexId {
        let v_a = m.org(a);
        let v_b = m.org(b);
        m.splice(a, b);
        m.orbit_org_set(b, v_a);
        m.kill_vertex(v_b);
        v_a
    }

    #[test]
    fn make_vertex_edge_round_trip() {
        let mut m: Mesh<(), (), ()> = Mesh::new();
        let a = m.make_loop_edge(true).unwrap();
        let b = m.make_loop_edge(false).unwrap();
        let lf = m.lface(a);
        let rf = m.lface(b);
        let v = join_loops_at_vertex(&mut m, a, b);

        let v_before = m.vertex_count();
        let e_before = m.edge_count();
        let f_before = m.face_count();

        let (v_new, e_new) = m.make_vertex_edge(v, lf, rf).unwrap();
        assert_eq!(m.vertex_count(), v_before + 1);
        assert_eq!(m.edge_count(), e_before + 1);
        assert_eq!(m.face_count(), f_before);
        assert_eq!(m.org(e_new), v);
        assert_eq!(m.dst(e_new), v_new);

        m.kill_vertex_edge(e_new).unwrap();
        assert_eq!(m.vertex_count(), v_before);
        assert_eq!(m.edge_count(), e_before);
        assert_eq!(m.face_count(), f_before);
    }

    #[test]
    fn all_or_nothing_allocation() {
        for k in 0..6u64 {
            let mut m: Mesh<(), (), ()> = Mesh::new();
            let a = m.make_loop_edge(true).unwrap();
            let b = m.make_loop_edge(false).unwrap();
            let lf = m.lface(a);
            let rf = m.lface(b);
            let v = join_loops_at_vertex(&mut m, a, b);

            let v_before = m.vertex_count();
            let e_before = m.edge_count();
            let f_before = m.face_count();

            m.set_alloc_budget(AllocBudget::limited(k));
            let result = m.make_vertex_edge(v, lf, rf);
            m.set_alloc_budget(AllocBudget::unlimited());

            if result.is_err() {
                assert_eq!(m.vertex_count(), v_before);
                assert_eq!(m.edge_count(), e_before);
                assert_eq!(m.face_count(), f_before);
            }
        }
    }
}
