//! Common scene builders for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use glam::Vec3;
use sdf_atlas::prelude::*;

// ============================================================================
// Core shapes
// ============================================================================

/// Sphere centered at the origin
pub struct Sphere {
    pub radius: f32,
}

impl Inspect for Sphere {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.radius);
    }
}

impl SdfCore for Sphere {
    fn eval(&self, point: Vec3) -> f32 {
        point.length() - self.radius
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::ZERO, Vec3::splat(self.radius))
    }

    fn children_root(&self) -> &dyn Inspect {
        self
    }

    fn type_label(&self) -> &'static str {
        "Sphere"
    }
}

/// Sphere displaced from the origin
pub struct OffsetSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Inspect for OffsetSphere {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.center);
        walker.visit(&self.radius);
    }
}

impl SdfCore for OffsetSphere {
    fn eval(&self, point: Vec3) -> f32 {
        (point - self.center).length() - self.radius
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.center, Vec3::splat(self.radius))
    }

    fn children_root(&self) -> &dyn Inspect {
        self
    }

    fn type_label(&self) -> &'static str {
        "OffsetSphere"
    }
}

/// Union of shared child nodes; evaluates to the minimum child distance.
pub struct Union {
    pub nodes: Vec<SharedCore>,
}

impl Inspect for Union {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.nodes);
    }
}

impl SdfCore for Union {
    fn eval(&self, point: Vec3) -> f32 {
        self.nodes
            .iter()
            .map(|n| n.lock().unwrap().eval(point))
            .fold(f32::INFINITY, f32::min)
    }

    fn aabb(&self) -> Aabb {
        self.nodes
            .iter()
            .map(|n| n.lock().unwrap().aabb())
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Aabb::ZERO)
    }

    fn children_root(&self) -> &dyn Inspect {
        self
    }

    fn type_label(&self) -> &'static str {
        "Union"
    }
}

pub fn sphere_core(radius: f32) -> SharedCore {
    Arc::new(Mutex::new(Sphere { radius }))
}

pub fn offset_sphere_core(center: Vec3, radius: f32) -> SharedCore {
    Arc::new(Mutex::new(OffsetSphere { center, radius }))
}

pub fn union_core(nodes: Vec<SharedCore>) -> SharedCore {
    Arc::new(Mutex::new(Union { nodes }))
}

// ============================================================================
// Parameterized nodes
// ============================================================================

/// The "Material" string-enum parameter, as the deployed scenes build it.
pub fn material_param(value: &str) -> SdfParam {
    SdfParam::new(
        0,
        "Material",
        SdfParamKind::StringEnum {
            values: vec!["Default".into(), "Custom".into()],
        },
        SdfParamValue::String(value.into()),
        "The material to use for this SDF object.",
    )
}

/// A position-dependent pattern material.
pub fn custom_material() -> MaterialFn {
    Box::new(|point: Vec3, sample: &mut SdfSample| {
        sample.color = Vec3::new(
            0.1 + 0.1 * (point.x / 10.0).sin(),
            0.1 + 0.1 * (point.y / 10.0).cos(),
            0.1 + 0.1 * (point.z / 10.0).sin(),
        );
    })
}

/// Sphere whose single parameter switches between the default material and
/// [`custom_material`].
pub fn switchable_sphere(radius: f32) -> WrappedSdf {
    WrappedSdf::new(Sphere { radius })
        .with_name("switchable")
        .with_parameters(
            vec![material_param("Default")],
            Box::new(|ctx, param_id, value| {
                if param_id != 0 {
                    return Err(ParamError::UnknownParam(param_id));
                }
                let choice = match value {
                    SdfParamValue::String(s) => s.clone(),
                    other => {
                        return Err(ParamError::KindMismatch(format!(
                            "expected a string, got {other:?}"
                        )))
                    }
                };
                if choice != "Default" && choice != "Custom" {
                    return Err(ParamError::Rejected(format!(
                        "unsupported material {choice:?}"
                    )));
                }
                *ctx.material_fn = if choice == "Custom" {
                    Some(custom_material())
                } else {
                    None
                };
                ctx.params[0].value = SdfParamValue::String(choice);
                let region = ctx.aabb;
                ctx.changed.mark(region);
                Ok(())
            }),
        )
}

/// Attach a bounded float parameter (id 0, range [0.01, 0.99]) to a node.
/// The setter validates the range, stores the value and marks the node's
/// box dirty.
pub fn with_float_dial(node: WrappedSdf) -> WrappedSdf {
    node.with_parameters(
        vec![SdfParam::new(
            0,
            "Blend",
            SdfParamKind::Float {
                min: 0.01,
                max: 0.99,
                step: 0.01,
            },
            SdfParamValue::Float(0.5),
            "Blend factor between the node's materials.",
        )],
        Box::new(|ctx, param_id, value| {
            if param_id != 0 {
                return Err(ParamError::UnknownParam(param_id));
            }
            let v = match value {
                SdfParamValue::Float(f) => *f,
                other => {
                    return Err(ParamError::KindMismatch(format!(
                        "expected a float, got {other:?}"
                    )))
                }
            };
            if !(0.01..=0.99).contains(&v) {
                return Err(ParamError::Rejected(format!("{v} is out of range")));
            }
            ctx.params[0].value = SdfParamValue::Float(v);
            let region = ctx.aabb;
            ctx.changed.mark(region);
            Ok(())
        }),
    )
}
