//! C-ABI export layer.
//!
//! Flattens the node tree into a request/response protocol a foreign host
//! can drive with nothing but primitive values and (pointer, length) views:
//!
//! - fixed-size records ([`types::AabbFfi`], [`types::SampleFfi`],
//!   [`types::ChangedFfi`], [`types::StatusFfi`]) cross by value;
//! - strings, ID lists and parameter descriptors cross as views into a
//!   scratch arena that is reset on every call — copy before the next call,
//!   never free;
//! - parameter kinds and values cross as tagged records
//!   (discriminant + payload words, [`types::ParamKindFfi`] /
//!   [`types::ParamValueFfi`]).
//!
//! The Rust side registers a tree with [`api::set_root_sdf`]; the host then
//! operates purely on node IDs, starting from the root at ID 0.

pub mod api;
mod memory;
pub mod types;

pub use api::{set_root, set_root_sdf, STATUS_PARAM_ERROR};
pub use memory::{decode_kind, decode_value};
pub use types::*;
