//! Dynamic node parameters.
//!
//! A node may expose an ordered list of typed parameters that the host can
//! enumerate and set at runtime: booleans, bounded integers and floats, and
//! string enumerations. Kinds and values are tagged variants internally; the
//! flat wire encoding lives in [`crate::ffi::types`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of a parameter: what values it accepts and how a UI should edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdfParamKind {
    /// On/off toggle
    Boolean,
    /// Bounded integer with UI step
    Int {
        /// Smallest accepted value
        min: i32,
        /// Largest accepted value
        max: i32,
        /// UI slider increment
        step: i32,
    },
    /// Bounded float with UI step
    Float {
        /// Smallest accepted value
        min: f32,
        /// Largest accepted value
        max: f32,
        /// UI slider increment
        step: f32,
    },
    /// One of a fixed set of strings
    StringEnum {
        /// Accepted values, in display order
        values: Vec<String>,
    },
}

impl SdfParamKind {
    /// True if `value`'s variant matches this kind's shape.
    ///
    /// Range and membership checks are the setter's business; this only
    /// guards against variant mismatches.
    pub fn accepts(&self, value: &SdfParamValue) -> bool {
        matches!(
            (self, value),
            (SdfParamKind::Boolean, SdfParamValue::Bool(_))
                | (SdfParamKind::Int { .. }, SdfParamValue::Int(_))
                | (SdfParamKind::Float { .. }, SdfParamValue::Float(_))
                | (SdfParamKind::StringEnum { .. }, SdfParamValue::String(_))
        )
    }
}

/// Current value of a parameter; the variant must match the parameter's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdfParamValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i32),
    /// Float value
    Float(f32),
    /// String value
    String(String),
}

/// One enumerable, settable parameter of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdfParam {
    /// Identifier, unique within the node's parameter list
    pub id: u32,
    /// Display name
    pub name: String,
    /// Value shape and editing bounds
    pub kind: SdfParamKind,
    /// Current value; variant matches `kind`
    pub value: SdfParamValue,
    /// Human-readable description for tooltips
    pub description: String,
}

impl SdfParam {
    /// Convenience constructor; `value` must match `kind`'s shape.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: SdfParamKind,
        value: SdfParamValue,
        description: impl Into<String>,
    ) -> Self {
        let param = SdfParam {
            id,
            name: name.into(),
            kind,
            value,
            description: description.into(),
        };
        debug_assert!(param.kind.accepts(&param.value));
        param
    }
}

/// Recoverable parameter-mutation failures.
///
/// These cross the export boundary as an error code plus message, never as
/// an unwind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The node exposes no mutation hook
    #[error("set_parameter is not configured for this node")]
    NotConfigured,

    /// No parameter with this identifier
    #[error("unknown parameter id {0}")]
    UnknownParam(u32),

    /// Value variant does not match the parameter's kind
    #[error("value does not match parameter kind: {0}")]
    KindMismatch(String),

    /// The setter rejected the value (out of range, not in the enum, ...)
    #[error("{0}")]
    Rejected(String),
}
