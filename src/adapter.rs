//! Lifts a minimal [`SdfCore`] into the full [`Sdf`] capability set.
//!
//! [`WrappedSdf`] adds everything the export protocol needs on top of the
//! author's evaluate/bounds pair: cached bounds with sampling margin,
//! auto-discovered children, derived names, default procedural materials
//! with closest-child compositing, parameter plumbing and dirty-region
//! aggregation. All caches are public so authors can pre-seed or invalidate
//! them by hand.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use glam::Vec3;
use lazy_static::lazy_static;

use crate::discovery::Walker;
use crate::material;
use crate::node::{Sdf, SdfCore, SharedCore, SharedSdf};
use crate::params::{ParamError, SdfParam, SdfParamValue};
use crate::types::{Aabb, ChangedAabb, SdfSample};

/// Fraction of the core box's extent added as sampling margin on each axis.
pub const AABB_PAD_FRACTION: f32 = 0.01;

/// Smallest sampling margin added per axis, for degenerate boxes.
pub const AABB_PAD_MIN: f32 = 1e-4;

/// Custom material hook: receives the sampled point and a sample
/// pre-populated with the distance, and may overwrite any shading field.
pub type MaterialFn = Box<dyn FnMut(Vec3, &mut SdfSample) + Send>;

/// Parameter mutation hook. Receives a [`ParamCtx`] over the node's mutable
/// parameter state, the parameter identifier and the new value.
pub type SetParamsFn =
    Box<dyn FnMut(&mut ParamCtx<'_>, u32, &SdfParamValue) -> Result<(), ParamError> + Send>;

lazy_static! {
    /// Per-label occurrence counter backing auto-derived names.
    static ref NAME_COUNTS: Mutex<HashMap<String, usize>> = Mutex::new(HashMap::new());
}

/// Mutable view of a node's parameter state, handed to the mutation hook.
///
/// A successful mutation updates the relevant entry in `params`, marks
/// `changed` with the invalidated region, and may swap `material_fn` (for
/// parameters that select a material).
pub struct ParamCtx<'a> {
    /// The node's parameter list
    pub params: &'a mut Vec<SdfParam>,
    /// The node's pending-change record
    pub changed: &'a mut ChangedAabb,
    /// The node's material hook
    pub material_fn: &'a mut Option<MaterialFn>,
    /// The node's current (cached) bounding box, for region marking
    pub aabb: Aabb,
}

/// Full-capability wrapper around a core node.
pub struct WrappedSdf {
    core: SharedCore,
    label: &'static str,
    /// Cached bounding box; pre-seed to skip the core box and its margin
    pub aabb_cache: Option<Aabb>,
    /// Cached display name; pre-seed to skip auto-naming
    pub name_cache: Option<String>,
    /// Cached children; cleared automatically when a change is observed
    pub children_cache: Option<Vec<SharedSdf>>,
    /// Custom material hook; `None` selects the default material
    pub material_fn: Option<MaterialFn>,
    /// Exposed parameters; empty by default
    pub params: Vec<SdfParam>,
    /// Parameter mutation hook; `None` rejects all mutations
    pub set_params: Option<SetParamsFn>,
    /// Pending change, drained by [`Sdf::changed`]
    pub changed: ChangedAabb,
    base_sample: Option<SdfSample>,
}

impl WrappedSdf {
    /// Wrap a concrete core node.
    pub fn new<T: SdfCore + 'static>(core: T) -> Self {
        WrappedSdf::from_shared(
            Arc::new(Mutex::new(core)),
            std::any::type_name::<T>(),
        )
    }

    /// Wrap an already-shared core handle, labeled for auto-naming.
    /// Discovery uses this for every core node it finds.
    pub fn from_shared(core: SharedCore, label: &'static str) -> Self {
        WrappedSdf {
            core,
            label,
            aabb_cache: None,
            name_cache: None,
            children_cache: None,
            material_fn: None,
            params: Vec::new(),
            set_params: None,
            changed: ChangedAabb::default(),
            base_sample: None,
        }
    }

    /// Handle to the wrapped core node.
    pub fn core(&self) -> &SharedCore {
        &self.core
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_cache = Some(name.into());
        self
    }

    /// Set the material hook.
    pub fn with_material_fn(mut self, material_fn: MaterialFn) -> Self {
        self.material_fn = Some(material_fn);
        self
    }

    /// Expose parameters together with their mutation hook.
    pub fn with_parameters(mut self, params: Vec<SdfParam>, set_params: SetParamsFn) -> Self {
        self.params = params;
        self.set_params = Some(set_params);
        self
    }

    /// Convert into the shared handle form used throughout the tree.
    pub fn into_shared(self) -> SharedSdf {
        Arc::new(Mutex::new(self))
    }

    /// Record that `region` needs re-sampling.
    pub fn mark_changed(&mut self, region: Aabb) {
        self.changed.mark(region);
    }

    fn base_sample_cached(&mut self) -> SdfSample {
        if self.base_sample.is_none() {
            let name = self.name();
            self.base_sample = Some(material::base_sample(&name));
        }
        self.base_sample.unwrap()
    }
}

/// Derive a unique display name from a type label.
///
/// The label's trailing path segment is kept; repeated labels get a
/// numeric suffix (`Sphere`, `Sphere_1`, `Sphere_2`, ...).
fn unique_name(label: &str) -> String {
    let short = label.rsplit("::").next().unwrap_or(label);
    let mut counts = NAME_COUNTS.lock().unwrap();
    let n = counts.entry(short.to_string()).or_insert(0);
    let name = if *n == 0 {
        short.to_string()
    } else {
        format!("{short}_{n}")
    };
    *n += 1;
    name
}

impl Sdf for WrappedSdf {
    fn aabb(&mut self) -> Aabb {
        if let Some(aabb) = self.aabb_cache {
            return aabb;
        }
        let aabb = self
            .core
            .lock()
            .unwrap()
            .aabb()
            .enlarged(AABB_PAD_FRACTION, AABB_PAD_MIN);
        self.aabb_cache = Some(aabb);
        aabb
    }

    fn sample(&mut self, point: Vec3, distance_only: bool) -> SdfSample {
        let distance = self.core.lock().unwrap().eval(point);
        let mut sample = SdfSample::with_distance(distance);
        if distance_only {
            return sample;
        }

        if let Some(material_fn) = self.material_fn.as_mut() {
            material_fn(point, &mut sample);
            return sample;
        }

        let children = self.children();
        if children.is_empty() {
            // Leaf: stable pseudo-random material derived from the name.
            let mut base = self.base_sample_cached();
            base.distance = distance;
            return base;
        }

        // Composite node: shade like the closest child. `<=` lets later
        // children win exact ties, which looks better in practice but is a
        // heuristic with known artifacts on exact ties.
        let mut best = f32::INFINITY;
        let mut closest: Option<SharedSdf> = None;
        for child in &children {
            let child_distance = child.lock().unwrap().sample(point, true).distance;
            if child_distance.abs() <= best {
                best = child_distance.abs();
                closest = Some(child.clone());
            }
        }
        if let Some(child) = closest {
            // Keep this node's own distance, take everything else from
            // the chosen child.
            sample = child.lock().unwrap().sample(point, false);
            sample.distance = distance;
        }
        sample
    }

    fn children(&mut self) -> Vec<SharedSdf> {
        if let Some(cached) = &self.children_cache {
            return cached.clone();
        }
        let discovered = {
            let core = self.core.lock().unwrap();
            Walker::collect(core.children_root())
        };
        self.children_cache = Some(discovered.clone());
        discovered
    }

    fn name(&mut self) -> String {
        if let Some(name) = &self.name_cache {
            return name.clone();
        }
        let name = unique_name(self.label);
        self.name_cache = Some(name.clone());
        name
    }

    fn parameters(&mut self) -> Vec<SdfParam> {
        self.params.clone()
    }

    fn set_parameter(&mut self, param_id: u32, value: &SdfParamValue) -> Result<(), ParamError> {
        let aabb = self.aabb();
        let set_params = self.set_params.as_mut().ok_or(ParamError::NotConfigured)?;
        let mut ctx = ParamCtx {
            params: &mut self.params,
            changed: &mut self.changed,
            material_fn: &mut self.material_fn,
            aabb,
        };
        set_params(&mut ctx, param_id, value)
    }

    fn changed(&mut self) -> ChangedAabb {
        let mut report = self.changed.take();
        if report.changed {
            // The mutation that marked us may have created or removed
            // children; force re-discovery on the next access.
            self.children_cache = None;
        }
        for child in self.children() {
            let child_report = child.lock().unwrap().changed();
            report.merge(child_report);
        }
        report
    }
}
