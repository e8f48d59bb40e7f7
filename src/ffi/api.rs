//! The exported request/response surface.
//!
//! Seven C-ABI entry points, each taking a node ID the caller obtained from
//! registration or a previous `children` call. The symbol names are the
//! protocol: the host resolves `bounding_box`, `sample`, `children`,
//! `name`, `parameters`, `set_parameter` and `changed` by name.
//!
//! All boundary state — the ID registry and the scratch arena backing
//! variable-length results — lives here behind one coarse lock each. The
//! contract is a single sequential caller; the locks only make the globals
//! storable, they are not a concurrency feature.
//!
//! # Fatal conditions
//!
//! Passing an unknown ID, or a tagged value with an unknown discriminant,
//! is a contract violation (or a protocol version skew) and panics; a panic
//! crossing the C boundary aborts the process. Recoverable failures —
//! `set_parameter` on an unconfigured node — come back as a [`StatusFfi`]
//! value instead.

use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use log::debug;

use super::memory::{decode_value, Scratch};
use super::types::{
    AabbFfi, ChangedFfi, IdListFfi, ParamListFfi, ParamValueFfi, SampleFfi, StatusFfi, StrFfi,
};
use crate::node::{Sdf, SharedSdf};
use crate::registry::Registry;

/// Status code for a rejected or unsupported parameter mutation.
pub const STATUS_PARAM_ERROR: u32 = 1;

lazy_static! {
    /// The boundary's ID registry.
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry::new());

    /// Scratch arena behind every (pointer, length) result.
    static ref SCRATCH: Mutex<Scratch> = Mutex::new(Scratch::default());
}

/// Register `root` as the exported tree, replacing any previous one.
///
/// The root becomes ID 0 and every discovered descendant is numbered
/// depth-first. Call this once at startup — typically from the module's
/// exported init hook — and again whenever the topology changed enough
/// that a clean renumbering is preferable to on-demand IDs.
pub fn set_root_sdf(root: SharedSdf) {
    REGISTRY.lock().unwrap().set_root(root);
}

/// Convenience form of [`set_root_sdf`]: wraps a concrete node into a
/// shared handle, registers it, and returns the handle so the author can
/// keep configuring it.
pub fn set_root<T: Sdf + 'static>(root: T) -> SharedSdf {
    let handle: SharedSdf = Arc::new(Mutex::new(root));
    set_root_sdf(handle.clone());
    handle
}

fn lookup(id: u32) -> SharedSdf {
    REGISTRY
        .lock()
        .unwrap()
        .get(id)
        .unwrap_or_else(|| panic!("unknown SDF id {id}: register a root before calling exports"))
}

/// Bounding box of the node. All sampling stays inside this box.
#[no_mangle]
pub extern "C" fn bounding_box(sdf_id: u32) -> AabbFfi {
    SCRATCH.lock().unwrap().reset();
    lookup(sdf_id).lock().unwrap().aabb().into()
}

/// Sample the node's surface at a point. With `distance_only` set, the
/// shading fields are left at their defaults.
#[no_mangle]
pub extern "C" fn sample(sdf_id: u32, x: f32, y: f32, z: f32, distance_only: bool) -> SampleFfi {
    SCRATCH.lock().unwrap().reset();
    lookup(sdf_id)
        .lock()
        .unwrap()
        .sample(glam::Vec3::new(x, y, z), distance_only)
        .into()
}

/// IDs of the node's direct children, in discovery order. Children not
/// seen before are assigned fresh IDs on the spot.
#[no_mangle]
pub extern "C" fn children(sdf_id: u32) -> IdListFfi {
    let mut scratch = SCRATCH.lock().unwrap();
    scratch.reset();
    let node = lookup(sdf_id);
    let child_handles = node.lock().unwrap().children();
    let mut registry = REGISTRY.lock().unwrap();
    let ids: Vec<u32> = child_handles
        .iter()
        .map(|child| registry.ensure_id(child))
        .collect();
    drop(registry);
    debug!("children({sdf_id}) -> {ids:?}");
    scratch.id_list(ids)
}

/// Display name of the node.
#[no_mangle]
pub extern "C" fn name(sdf_id: u32) -> StrFfi {
    let mut scratch = SCRATCH.lock().unwrap();
    scratch.reset();
    let node = lookup(sdf_id);
    let node_name = node.lock().unwrap().name();
    scratch.str_view(&node_name)
}

/// The node's parameter descriptors, in display order.
#[no_mangle]
pub extern "C" fn parameters(sdf_id: u32) -> ParamListFfi {
    let mut scratch = SCRATCH.lock().unwrap();
    scratch.reset();
    let node = lookup(sdf_id);
    let params = node.lock().unwrap().parameters();
    scratch.encode_params(&params)
}

/// Set one parameter. Success is code 0; a rejected or unsupported
/// mutation reports [`STATUS_PARAM_ERROR`] plus a message.
#[no_mangle]
pub extern "C" fn set_parameter(sdf_id: u32, param_id: u32, value: ParamValueFfi) -> StatusFfi {
    let mut scratch = SCRATCH.lock().unwrap();
    scratch.reset();
    let node = lookup(sdf_id);
    let decoded = unsafe { decode_value(&value) };
    // Bind before matching so the guard's borrow of `node` ends here.
    let result = node.lock().unwrap().set_parameter(param_id, &decoded);
    match result {
        Ok(()) => StatusFfi::ok(),
        Err(err) => {
            debug!("set_parameter({sdf_id}, {param_id}) rejected: {err}");
            scratch.error_status(STATUS_PARAM_ERROR, &err.to_string())
        }
    }
}

/// Poll the node's pending change. The dirty flag and region are reported
/// once per occurrence, folded over the whole subtree.
#[no_mangle]
pub extern "C" fn changed(sdf_id: u32) -> ChangedFfi {
    SCRATCH.lock().unwrap().reset();
    lookup(sdf_id).lock().unwrap().changed().into()
}
