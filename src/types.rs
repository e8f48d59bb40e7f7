//! Core geometric and sample types shared by every layer.
//!
//! Everything here is plain data: boxes, surface samples and the one-shot
//! pending-change record that parameter mutations feed and `changed()` drains.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Empty box at the origin
    pub const ZERO: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Box center
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// True if the point lies inside (inclusive)
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Smallest box containing both operands
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Pad the box outward by `fraction` of its extent on each axis,
    /// never by less than `floor`.
    ///
    /// Samplers treat every point inside the reported box as valid, so a
    /// box that hugs the surface exactly produces seams at the faces.
    pub fn enlarged(&self, fraction: f32, floor: f32) -> Aabb {
        let pad = ((self.max - self.min) * fraction).max(Vec3::splat(floor));
        Aabb {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::ZERO
    }
}

/// One surface sample: signed distance plus shading attributes.
///
/// `distance` is negative inside the surface. The shading fields follow the
/// metallic-roughness convention and are only meaningful when the sample was
/// requested with `distance_only = false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdfSample {
    /// Signed distance to the surface
    pub distance: f32,
    /// Base color (RGB, linear space)
    pub color: Vec3,
    /// Metallic factor (0.0 = dielectric, 1.0 = metal)
    pub metallic: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = diffuse)
    pub roughness: f32,
    /// Ambient occlusion factor
    pub occlusion: f32,
}

impl SdfSample {
    /// A sample carrying only a distance, shading left at defaults
    pub fn with_distance(distance: f32) -> Self {
        SdfSample {
            distance,
            ..Default::default()
        }
    }
}

impl Default for SdfSample {
    fn default() -> Self {
        SdfSample {
            distance: 0.0,
            color: Vec3::splat(0.8),
            metallic: 0.0,
            roughness: 0.5,
            occlusion: 1.0,
        }
    }
}

/// One-shot dirty-region record.
///
/// Parameter mutations (or any internal event) `mark()` the region they
/// invalidated; `take()` returns the accumulated record exactly once and
/// clears it. The region is the union of everything marked since the
/// previous `take()`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChangedAabb {
    /// Whether anything was invalidated since the last read
    pub changed: bool,
    /// Union of the invalidated regions
    pub aabb: Aabb,
}

impl ChangedAabb {
    /// Record that `region` needs re-sampling, merging with anything
    /// already pending.
    pub fn mark(&mut self, region: Aabb) {
        if self.changed {
            self.aabb = self.aabb.union(&region);
        } else {
            self.changed = true;
            self.aabb = region;
        }
    }

    /// Read and clear the record.
    pub fn take(&mut self) -> ChangedAabb {
        let out = *self;
        self.changed = false;
        out
    }

    /// Fold another report into this one, ignoring clean reports.
    pub fn merge(&mut self, other: ChangedAabb) {
        if other.changed {
            self.mark(other.aabb);
        }
    }
}
