//! Invariant checker for [`mesh_topo`] half-edge meshes.
//!
//! A sibling crate rather than an in-crate feature, the way the underlying
//! topology and its validator are split across separate crates: the checker
//! walks every edge, face and vertex orbit and confirms the structural
//! invariants a legal sequence of Euler operators is supposed to preserve.

#![warn(rust_2018_idioms)]

use mesh_topo::{EdgeId, FaceId, Mesh, VertexId};

/// A single structural defect found by [`Validator::validate`].
///
/// Gated behind `cfg(debug_assertions)` plus the `checked` feature (on by
/// default): the checker is a build-time flag, not runtime state, and
/// walking every orbit in the mesh has no business costing anything in a
/// release build.
#[cfg(all(debug_assertions, feature = "checked"))]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `sym(sym(e)) != e` for some edge.
    #[error("sym is not an involution at {0:?}")]
    SymNotInvolution(EdgeId),
    /// The quad-edge identity `sym(onext(lnext(e))) == e` failed.
    #[error("quad-edge identity (onext/lnext) broken at {0:?}")]
    QuadEdgeIdentityBroken(EdgeId),
    /// The quad-edge identity `lnext(sym(onext(e))) == e` failed.
    #[error("quad-edge identity (sym/onext) broken at {0:?}")]
    DualQuadEdgeIdentityBroken(EdgeId),
    /// Two edges in the same origin orbit disagree on `org`.
    #[error("origin orbit of {vertex:?} contains edge {edge:?} with a different org")]
    OriginOrbitInconsistent { vertex: VertexId, edge: EdgeId },
    /// Two edges in the same left-face orbit disagree on `lface`.
    #[error("left-face orbit of {face:?} contains edge {edge:?} with a different lface")]
    FaceOrbitInconsistent { face: FaceId, edge: EdgeId },
    /// `vertex_edge(v)`'s own `org` is not `v`.
    #[error("vertex {0:?} has a representative edge it does not own")]
    VertexRepresentativeWrong(VertexId),
    /// `face_edge(f)`'s own `lface` is not `f`.
    #[error("face {0:?} has a representative edge it does not bound")]
    FaceRepresentativeWrong(FaceId),
    /// Walking an orbit did not return to its starting edge within one full
    /// pass over the mesh; the orbit is not a closed cycle.
    #[error("orbit starting at {0:?} never closes")]
    OrbitDoesNotClose(EdgeId),
}

/// The outcome of [`Validator::validate`]: either clean, or the complete
/// list of defects found (checking does not stop at the first one).
#[cfg(all(debug_assertions, feature = "checked"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

#[cfg(all(debug_assertions, feature = "checked"))]
impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, err: ValidationError) {
        self.errors.push(err);
    }
}

/// Walks a mesh and checks every structural invariant it is supposed to
/// maintain after any sequence of Euler operators.
#[cfg(all(debug_assertions, feature = "checked"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

#[cfg(all(debug_assertions, feature = "checked"))]
impl Validator {
    pub fn new() -> Self {
        Validator
    }

    /// Runs every check against `mesh`, collecting all defects found.
    pub fn validate<E, V, F>(&self, mesh: &Mesh<E, V, F>) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.check_edges(mesh, &mut result);
        self.check_faces(mesh, &mut result);
        self.check_vertices(mesh, &mut result);
        result
    }

    fn check_quad_edge_identity<E, V, F>(
        &self,
        mesh: &Mesh<E, V, F>,
        e: EdgeId,
        result: &mut ValidationResult,
    ) {
        if mesh.onext(mesh.lnext(e)).sym() != e {
            result.push(ValidationError::QuadEdgeIdentityBroken(e));
        }
        if mesh.lnext(mesh.onext(e).sym()) != e {
            result.push(ValidationError::DualQuadEdgeIdentityBroken(e));
        }
    }

    fn check_edges<E, V, F>(&self, mesh: &Mesh<E, V, F>, result: &mut ValidationResult) {
        for e in mesh.edges() {
            if e.sym().sym() != e || e.sym() == e {
                result.push(ValidationError::SymNotInvolution(e));
            }
            self.check_quad_edge_identity(mesh, e, result);
        }
    }

    fn check_faces<E, V, F>(&self, mesh: &Mesh<E, V, F>, result: &mut ValidationResult) {
        for f in mesh.faces() {
            let head = mesh.face_edge(f);
            if mesh.lface(head) != f {
                result.push(ValidationError::FaceRepresentativeWrong(f));
            }
            let mut edge = head;
            let mut steps = 0usize;
            let limit = mesh.edge_count() * 2 + 1;
            loop {
                if mesh.lface(edge) != f {
                    result.push(ValidationError::FaceOrbitInconsistent { face: f, edge });
                }
                edge = mesh.lnext(edge);
                steps += 1;
                if edge == head {
                    break;
                }
                if steps > limit {
                    result.push(ValidationError::OrbitDoesNotClose(head));
                    break;
                }
            }
        }
    }

    fn check_vertices<E, V, F>(&self, mesh: &Mesh<E, V, F>, result: &mut ValidationResult) {
        for v in mesh.vertices() {
            let head = mesh.vertex_edge(v);
            if mesh.org(head) != v {
                result.push(ValidationError::VertexRepresentativeWrong(v));
            }
            let mut edge = head;
            let mut steps = 0usize;
            let limit = mesh.edge_count() * 2 + 1;
            loop {
                if mesh.org(edge) != v {
                    result.push(ValidationError::OriginOrbitInconsistent { vertex: v, edge });
                }
                edge = mesh.onext(edge);
                steps += 1;
                if edge == head {
                    break;
                }
                if steps > limit {
                    result.push(ValidationError::OrbitDoesNotClose(head));
                    break;
                }
            }
        }
    }
}

/// Validates `mesh`, returning `Ok(())` if it is structurally sound.
#[cfg(all(debug_assertions, feature = "checked"))]
pub fn check<E, V, F>(mesh: &Mesh<E, V, F>) -> Result<(), ValidationResult> {
    let result = Validator::new().validate(mesh);
    if result.is_valid() {
        Ok(())
    } else {
        Err(result)
    }
}

/// Validates `mesh`, panicking with the first defect found.
///
/// Intended for test and debug-build call sites, mirroring the abort-on-
/// first-failure behaviour of a debug assertion rather than the
/// collect-everything behaviour of [`Validator::validate`].
#[cfg(all(debug_assertions, feature = "checked"))]
pub fn assert_valid<E, V, F>(mesh: &Mesh<E, V, F>) {
    let result = Validator::new().validate(mesh);
    if let Some(err) = result.errors.first() {
        panic!("mesh invariant violated: {err}");
    }
}
