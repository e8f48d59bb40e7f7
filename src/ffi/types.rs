//! C-compatible wire types for the export protocol.
//!
//! Fixed-size records cross the boundary by value; strings and lists cross
//! as (pointer, length) views into exporter-owned scratch memory that stays
//! valid only until the next export call. Parameter kinds and values are
//! tagged: a small integer discriminant followed by a fixed number of
//! payload words, with strings out of band. The tag values and payload
//! layout are the one version-sensitive contract of this crate.

use crate::types::{Aabb, ChangedAabb, SdfSample};

/// Tag for boolean parameter kinds and values
pub const TAG_BOOL: u32 = 0;
/// Tag for integer parameter kinds and values
pub const TAG_INT: u32 = 1;
/// Tag for float parameter kinds and values
pub const TAG_FLOAT: u32 = 2;
/// Tag for string-enumeration kinds and string values
pub const TAG_STRING: u32 = 3;

/// 3D vector (C-compatible layout)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3Ffi {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl From<glam::Vec3> for Vec3Ffi {
    fn from(v: glam::Vec3) -> Self {
        Vec3Ffi {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Ffi> for glam::Vec3 {
    fn from(v: Vec3Ffi) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// Axis-aligned box (C-compatible layout)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AabbFfi {
    /// Minimum corner
    pub min: Vec3Ffi,
    /// Maximum corner
    pub max: Vec3Ffi,
}

impl From<Aabb> for AabbFfi {
    fn from(aabb: Aabb) -> Self {
        AabbFfi {
            min: aabb.min.into(),
            max: aabb.max.into(),
        }
    }
}

impl From<AabbFfi> for Aabb {
    fn from(aabb: AabbFfi) -> Self {
        Aabb::new(aabb.min.into(), aabb.max.into())
    }
}

/// Surface sample (C-compatible layout)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFfi {
    /// Signed distance to the surface
    pub distance: f32,
    /// Base color (RGB, linear)
    pub color: Vec3Ffi,
    /// Metallic factor
    pub metallic: f32,
    /// Roughness factor
    pub roughness: f32,
    /// Ambient occlusion factor
    pub occlusion: f32,
}

impl From<SdfSample> for SampleFfi {
    fn from(s: SdfSample) -> Self {
        SampleFfi {
            distance: s.distance,
            color: s.color.into(),
            metallic: s.metallic,
            roughness: s.roughness,
            occlusion: s.occlusion,
        }
    }
}

/// Change report (C-compatible layout)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ChangedFfi {
    /// 1 if anything in the subtree was invalidated, else 0
    pub changed: u32,
    /// Union of the invalidated regions
    pub aabb: AabbFfi,
}

impl From<ChangedAabb> for ChangedFfi {
    fn from(c: ChangedAabb) -> Self {
        ChangedFfi {
            changed: c.changed as u32,
            aabb: c.aabb.into(),
        }
    }
}

/// UTF-8 string view: pointer + length, no NUL terminator, no ownership
/// transfer. Valid until the next export call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrFfi {
    /// First byte, or null for the empty string
    pub ptr: *const u8,
    /// Byte length
    pub len: u32,
}

impl StrFfi {
    /// The empty string.
    pub fn empty() -> Self {
        StrFfi {
            ptr: std::ptr::null(),
            len: 0,
        }
    }

    /// Read the view back into an owned string.
    ///
    /// # Safety
    /// `ptr` must reference `len` bytes of valid UTF-8 that outlive the
    /// call.
    pub unsafe fn read(&self) -> String {
        if self.ptr.is_null() || self.len == 0 {
            return String::new();
        }
        let bytes = std::slice::from_raw_parts(self.ptr, self.len as usize);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// View over a list of string views.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrListFfi {
    /// First entry, or null for an empty list
    pub ptr: *const StrFfi,
    /// Entry count
    pub len: u32,
}

impl StrListFfi {
    /// The empty list.
    pub fn empty() -> Self {
        StrListFfi {
            ptr: std::ptr::null(),
            len: 0,
        }
    }
}

/// View over a list of node IDs.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IdListFfi {
    /// First ID, or null for an empty list
    pub ptr: *const u32,
    /// ID count
    pub len: u32,
}

/// Tagged parameter kind: discriminant + three payload words + an
/// out-of-band string list (string enumerations only).
///
/// Payload layout by tag: `TAG_BOOL` none; `TAG_INT` min/max/step as `i32`
/// bit patterns; `TAG_FLOAT` min/max/step as `f32` bit patterns;
/// `TAG_STRING` the accepted values in `values`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ParamKindFfi {
    /// Discriminant (`TAG_*`)
    pub tag: u32,
    /// First payload word
    pub w0: u32,
    /// Second payload word
    pub w1: u32,
    /// Third payload word
    pub w2: u32,
    /// Accepted values for string enumerations
    pub values: StrListFfi,
}

/// Tagged parameter value: discriminant + one payload word + an out-of-band
/// string view (string values only).
///
/// Payload by tag: `TAG_BOOL` 0/1; `TAG_INT` `i32` bit pattern; `TAG_FLOAT`
/// `f32` bit pattern; `TAG_STRING` the `string` view.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ParamValueFfi {
    /// Discriminant (`TAG_*`)
    pub tag: u32,
    /// Payload bit pattern (unused for strings)
    pub bits: u32,
    /// String payload (unused for the other tags)
    pub string: StrFfi,
}

/// One parameter descriptor on the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ParamFfi {
    /// Parameter identifier, unique within the node
    pub id: u32,
    /// Display name
    pub name: StrFfi,
    /// Value shape and bounds
    pub kind: ParamKindFfi,
    /// Current value
    pub value: ParamValueFfi,
    /// Human-readable description
    pub description: StrFfi,
}

/// View over a node's parameter descriptors.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ParamListFfi {
    /// First descriptor, or null for an empty list
    pub ptr: *const ParamFfi,
    /// Descriptor count
    pub len: u32,
}

/// Operation outcome: 0 = ok, anything else is an error whose message is a
/// scratch view valid until the next call. Errors are values, never
/// unwinds.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StatusFfi {
    /// 0 on success
    pub code: u32,
    /// Empty on success, human-readable otherwise
    pub message: StrFfi,
}

impl StatusFfi {
    /// Successful status.
    pub fn ok() -> Self {
        StatusFfi {
            code: 0,
            message: StrFfi::empty(),
        }
    }
}
