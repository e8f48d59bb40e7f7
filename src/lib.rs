//! # sdf-atlas
//!
//! Expose an application-defined tree of signed-distance-field nodes to an
//! external renderer over a small, stable C ABI — without writing any
//! boundary marshaling or tree bookkeeping by hand.
//!
//! ## How it fits together
//!
//! - Authors implement [`SdfCore`](node::SdfCore) (evaluate a distance,
//!   report a box, point discovery at their data) plus
//!   [`Inspect`](discovery::Inspect) for their aggregate types.
//! - [`discovery`] walks any author value structurally and finds the nodes
//!   embedded in it, so hierarchies need no explicit registration.
//! - [`adapter::WrappedSdf`] lifts a core node into the full capability the
//!   protocol needs: cached bounds and names, auto-discovered children,
//!   deterministic default materials, settable parameters, dirty-region
//!   polling.
//! - [`registry::Registry`] numbers one tree snapshot (root is always 0)
//!   and [`ffi`] answers by-ID requests in flat C-compatible form.
//!
//! ## Example
//!
//! ```rust
//! use sdf_atlas::prelude::*;
//! use glam::Vec3;
//!
//! struct Sphere {
//!     radius: f32,
//! }
//!
//! impl Inspect for Sphere {
//!     fn inspect(&self, _walker: &mut Walker) {}
//! }
//!
//! impl SdfCore for Sphere {
//!     fn eval(&self, point: Vec3) -> f32 {
//!         point.length() - self.radius
//!     }
//!
//!     fn aabb(&self) -> Aabb {
//!         Aabb::from_center_extents(Vec3::ZERO, Vec3::splat(self.radius))
//!     }
//!
//!     fn children_root(&self) -> &dyn Inspect {
//!         self
//!     }
//! }
//!
//! let mut node = WrappedSdf::new(Sphere { radius: 1.0 });
//! assert!(node.sample(Vec3::ZERO, true).distance < 0.0);
//! // The reported box is padded slightly past the core box.
//! assert!(node.aabb().max.x > 1.0);
//! ```
//!
//! A deployed scene then calls [`ffi::set_root_sdf`] from its exported init
//! hook, and the host drives the tree through the C entry points by ID.
//!
//! ## Limits
//!
//! Discovery walks acyclic data; self-referential structures are documented
//! undefined behavior (see [`SdfCore`](node::SdfCore)). The export layer
//! assumes one sequential caller.

#![warn(missing_docs)]

pub mod adapter;
pub mod discovery;
pub mod ffi;
pub mod material;
pub mod node;
pub mod params;
pub mod registry;
pub mod types;

/// Everything a node author usually needs.
pub mod prelude {
    pub use crate::adapter::{MaterialFn, ParamCtx, SetParamsFn, WrappedSdf};
    pub use crate::discovery::{Found, Inspect, Walker};
    pub use crate::ffi::{set_root, set_root_sdf};
    pub use crate::node::{Sdf, SdfCore, SharedCore, SharedSdf};
    pub use crate::params::{ParamError, SdfParam, SdfParamKind, SdfParamValue};
    pub use crate::registry::Registry;
    pub use crate::types::{Aabb, ChangedAabb, SdfSample};
}
