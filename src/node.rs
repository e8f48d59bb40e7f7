//! The two node capability tiers.
//!
//! [`SdfCore`] is the minimal surface an author implements over their own
//! data: evaluate a distance, report a box, and point discovery at the value
//! that holds any nested nodes. [`Sdf`] is the full surface the export
//! protocol needs; [`crate::adapter::WrappedSdf`] lifts any core into it, or
//! authors can implement `Sdf` directly to bypass the adapter.

use std::sync::{Arc, Mutex};

use glam::Vec3;

use crate::discovery::Inspect;
use crate::params::{ParamError, SdfParam, SdfParamValue};
use crate::types::{Aabb, ChangedAabb, SdfSample};

/// Shared handle to a full-capability node.
///
/// Children are handed out as clones of these handles, so mutating a child
/// obtained from [`Sdf::children`] mutates the same object its parent will
/// evaluate on the next sample.
pub type SharedSdf = Arc<Mutex<dyn Sdf>>;

/// Shared handle to a type-erased core node.
pub type SharedCore = Arc<Mutex<dyn SdfCore>>;

/// Minimal author-supplied capability.
///
/// Implementors also implement [`Inspect`] so discovery can walk their
/// structure. `Send` is required because node handles live inside the
/// lock-guarded export boundary state.
///
/// # Cyclic structures
///
/// Discovery is a bounded-recursion walk over acyclic data by contract. A
/// value graph that reaches back into itself recurses without bound (and,
/// with shared handles, deadlocks on its own lock). This is documented
/// undefined behavior, not a guarded condition.
pub trait SdfCore: Inspect + Send {
    /// Signed distance from `point` to the surface (negative inside).
    fn eval(&self, point: Vec3) -> f32;

    /// Bounding box of the surface. Every point the host will sample lies
    /// inside the box this node ultimately reports.
    fn aabb(&self) -> Aabb;

    /// Root of the author's own data from which children are discovered.
    ///
    /// Usually `self`: the walk starts *inside* the returned value, so
    /// returning `self` exposes this node's fields without reporting the
    /// node as its own child.
    fn children_root(&self) -> &dyn Inspect;

    /// Display label used for auto-naming when the concrete type name is
    /// not recoverable (type-erased handles). Concrete handles are labeled
    /// with their type name instead.
    fn type_label(&self) -> &'static str {
        "sdf"
    }
}

/// Full capability: what the export protocol asks of every node.
///
/// Methods take `&mut self` because results are cached in place; handles are
/// shared through [`SharedSdf`], whose lock provides the mutable access.
pub trait Sdf: Send {
    /// Cached bounding box.
    fn aabb(&mut self) -> Aabb;

    /// Sample the surface at `point`. Includes the effect of all children
    /// and none of the parents. `distance_only` is a hint that the caller
    /// will ignore the shading fields.
    fn sample(&mut self, point: Vec3, distance_only: bool) -> SdfSample;

    /// Direct children of this node, in discovery order.
    fn children(&mut self) -> Vec<SharedSdf>;

    /// Display name; unique within a hierarchy when auto-derived, but
    /// uniqueness is not required of author-supplied names.
    fn name(&mut self) -> String;

    /// Dynamic parameters, in display order. Empty unless configured.
    fn parameters(&mut self) -> Vec<SdfParam>;

    /// Set the parameter with identifier `param_id`.
    ///
    /// A successful mutation is expected to also mark the node's pending
    /// change so the next [`Sdf::changed`] poll reports the dirty region.
    fn set_parameter(&mut self, param_id: u32, value: &SdfParamValue) -> Result<(), ParamError>;

    /// Poll and clear the pending change of this node and all descendants.
    ///
    /// Each node's own dirty flag is consumed exactly once per occurrence;
    /// the returned region is the union of every dirty region reported by
    /// this subtree since the previous poll.
    fn changed(&mut self) -> ChangedAabb;
}
