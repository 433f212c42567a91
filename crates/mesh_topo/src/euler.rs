//! Euler operators: the structural mutations built on [`Mesh::splice`].
//!
//! Every operator here is the inverse of another in the same set, and each
//! is built from one or two splices plus element allocation and owner-field
//! rewrites, following the all-or-nothing failure model: on any
//! sub-allocation failure, every handle allocated so far by this call is
//! torn down in reverse order before the error is returned.

use crate::error::{TopoResult, TopologyError};
use crate::ids::{EdgeId, FaceId, VertexId};
use crate::mesh::Mesh;

#[derive(Default)]
struct Rollback {
    vertices: Vec<VertexId>,
    faces: Vec<FaceId>,
    edges: Vec<EdgeId>,
}

impl Rollback {
    fn unwind<E, V, F>(self, mesh: &mut Mesh<E, V, F>) {
        for e in self.edges.into_iter().rev() {
            mesh.kill_edge_pair(e);
        }
        for f in self.faces.into_iter().rev() {
            mesh.kill_face(f);
        }
        for v in self.vertices.into_iter().rev() {
            mesh.kill_vertex(v);
        }
    }
}

impl<E: Default, V: Default, F: Default> Mesh<E, V, F> {
    fn track_vertex(&mut self, rb: &mut Rollback) -> TopoResult<VertexId> {
        let v = self.alloc_vertex(V::default())?;
        rb.vertices.push(v);
        Ok(v)
    }

    fn track_face(&mut self, rb: &mut Rollback) -> TopoResult<FaceId> {
        let f = self.alloc_face(F::default())?;
        rb.faces.push(f);
        Ok(f)
    }

    fn track_edge_pair(&mut self, rb: &mut Rollback) -> TopoResult<EdgeId> {
        let e = self.alloc_edge_pair(E::default(), E::default())?;
        rb.edges.push(e);
        Ok(e)
    }

    fn track_loop_pair(&mut self, rb: &mut Rollback) -> TopoResult<EdgeId> {
        let e = self.alloc_loop_pair(E::default(), E::default())?;
        rb.edges.push(e);
        Ok(e)
    }

    /// Creates an isolated edge: two new vertices, one new face shared by
    /// both sides of the dangling edge. Origin orbit of `e` is `{e}`; of
    /// `sym(e)` is `{sym(e)}`.
    pub fn make_edge(&mut self) -> TopoResult<EdgeId> {
        let mut rb = Rollback::default();
        let result = (|| {
            let org = self.track_vertex(&mut rb)?;
            let dst = self.track_vertex(&mut rb)?;
            let face = self.track_face(&mut rb)?;
            let e = self.track_edge_pair(&mut rb)?;
            let sym = e.sym();

            self.set_org(e, org);
            self.set_org(sym, dst);
            self.set_lface(e, face);
            self.set_lface(sym, face);

            self.set_vertex_edge(org, e);
            self.set_vertex_edge(dst, sym);
            self.set_face_edge(face, e);

            Ok(e)
        })();
        if result.is_err() {
            rb.unwind(self);
        }
        result
    }

    /// Creates a self-loop: one new vertex, two new faces. `ccw` selects
    /// which of the two allocated half-edges is returned as the primary
    /// handle `e` (`lface(e)` becomes the first new face either way).
    pub fn make_loop_edge(&mut self, ccw: bool) -> TopoResult<EdgeId> {
        let mut rb = Rollback::default();
        let result = (|| {
            let v = self.track_vertex(&mut rb)?;
            let lface = self.track_face(&mut rb)?;
            let rface = self.track_face(&mut rb)?;
            let e0 = self.track_loop_pair(&mut rb)?;
            let (e, e_rev) = if ccw { (e0, e0.sym()) } else { (e0.sym(), e0) };

            self.set_org(e, v);
            self.set_org(e_rev, v);
            self.set_lface(e, lface);
            self.set_lface(e_rev, rface);

            self.set_vertex_edge(v, e);
            self.set_face_edge(lface, e);
            self.set_face_edge(rface, e_rev);

            Ok(e)
        })();
        if result.is_err() {
            rb.unwind(self);
        }
        result
    }

    /// Splits `v` by inserting a new edge between the sectors of its
    /// origin orbit incident to `lface` and `rface`.
    pub fn make_vertex_edge(
        &mut self,
        v: VertexId,
        lface: FaceId,
        rface: FaceId,
    ) -> TopoResult<(VertexId, EdgeId)> {
        let v_edge = self.vertex_edge(v);
        let e_lf = self
            .orbit_edge(v_edge, lface)
            .ok_or(TopologyError::InvalidTopology(
                "vertex has no edge incident to lface",
            ))?;
        let e_rf = self
            .orbit_edge(v_edge, rface)
            .ok_or(TopologyError::InvalidTopology(
                "vertex has no edge incident to rface",
            ))?;

        let mut rb = Rollback::default();
        let result = (|| {
            let v_new = self.track_vertex(&mut rb)?;
            let e_new = self.track_loop_pair(&mut rb)?;
            let e_new_sym = e_new.sym();

            self.splice(e_lf, e_new);
            self.splice(e_rf, e_new_sym);

            self.orbit_org_set(e_new_sym, v_new);
            self.set_org(e_new, v);
            self.set_lface(e_new, lface);
            self.set_lface(e_new_sym, rface);

            self.set_vertex_edge(v, e_new);
            self.set_vertex_edge(v_new, e_new_sym);
            self.set_face_edge(lface, e_new);
            self.set_face_edge(rface, e_new_sym);

            Ok((v_new, e_new))
        })();
        if result.is_err() {
            rb.unwind(self);
        }
        result
    }

    /// Inverse of [`Mesh::make_vertex_edge`]: merges `v_new = dst(e)` back
    /// into `org(e)` and removes `e`.
    pub fn kill_vertex_edge(&mut self, e: EdgeId) -> TopoResult<()> {
        let e_sym = e.sym();
        let v = self.org(e);
        let v_new = self.org(e_sym);
        if v == v_new {
            return Err(TopologyError::InvalidTopology(
                "edge endpoints already merged; not a splittable vertex bridge",
            ));
        }
        let lface = self.lface(e);
        let rface = self.lface(e_sym);

        // Recovers the splice partners from make_vertex_edge: splice(e_lf, e)
        // left oprev(e_sym) = e_lf, and splice(e_rf, e_sym) left oprev(e) = e_rf.
        let e_lf = self.oprev(e_sym);
        let e_rf = self.oprev(e);

        self.orbit_org_set(e_sym, v);
        self.splice(e_lf, e);
        self.splice(e_rf, e_sym);

        self.set_vertex_edge(v, e_lf);
        self.set_face_edge(lface, e_lf);
        self.set_face_edge(rface, e_rf);

        self.kill_edge_pair(e);
        self.kill_vertex(v_new);
        Ok(())
    }

    /// The dual of [`Mesh::make_vertex_edge`]: splits `face` by inserting a
    /// new edge between two vertices already on its boundary.
    pub fn make_face_edge(
        &mut self,
        face: FaceId,
        org: VertexId,
        dst: VertexId,
    ) -> TopoResult<(FaceId, EdgeId)> {
        let e_org = self
            .orbit_edge(self.vertex_edge(org), face)
            .ok_or(TopologyError::InvalidTopology(
                "org vertex has no edge incident to face",
            ))?;
        let e_dst = self
            .orbit_edge(self.vertex_edge(dst), face)
            .ok_or(TopologyError::InvalidTopology(
                "dst vertex has no edge incident to face",
            ))?;

        let mut rb = Rollback::default();
        let result = (|| {
            let f_new = self.track_face(&mut rb)?;
            let e_new = self.track_edge_pair(&mut rb)?;
            let e_new_sym = e_new.sym();

            self.splice(e_org, e_new);
            self.splice(e_dst, e_new_sym);

            self.set_org(e_new, org);
            self.set_org(e_new_sym, dst);
            self.set_lface(e_new_sym, face);
            self.orbit_lface_set(e_new, f_new);

            self.set_face_edge(face, e_org);
            self.set_face_edge(f_new, e_new);

            Ok((f_new, e_new))
        })();
        if result.is_err() {
            rb.unwind(self);
        }
        result
    }

    /// Inverse of [`Mesh::make_face_edge`]: merges `f_new = lface(sym(e))`
    /// back into `lface(e)` and removes `e`.
    pub fn kill_face_edge(&mut self, e: EdgeId) -> TopoResult<()> {
        let e_sym = e.sym();
        let f_new = self.lface(e);
        let face = self.lface(e_sym);
        if face == f_new {
            return Err(TopologyError::InvalidTopology(
                "edge faces already merged; not a splittable face bridge",
            ));
        }

        // Recovers the splice partners from make_face_edge: splice(e_org, e)
        // left oprev(e) = e_org, and splice(e_dst, e_sym) left oprev(e_sym) = e_dst.
        let e_org = self.oprev(e);
        let e_dst = self.oprev(e_sym);

        self.orbit_lface_set(e, face);
        self.splice(e_org, e);
        self.splice(e_dst, e_sym);

        self.set_face_edge(face, e_org);

        self.kill_edge_pair(e);
        self.kill_face(f_new);
        Ok(())
    }
}
