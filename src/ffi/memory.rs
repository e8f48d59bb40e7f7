//! Exporter-owned scratch memory and the tagged encode/decode helpers.
//!
//! Every export call that returns variable-length data writes it into the
//! boundary's [`Scratch`] arena first and hands out views. The arena is
//! reset at the start of each call, so a view is valid exactly until the
//! next call — the caller copies what it wants to keep and owns nothing.

use crate::ffi::types::{
    IdListFfi, ParamFfi, ParamKindFfi, ParamListFfi, ParamValueFfi, StatusFfi, StrFfi, StrListFfi,
    TAG_BOOL, TAG_FLOAT, TAG_INT, TAG_STRING,
};
use crate::params::{SdfParam, SdfParamKind, SdfParamValue};

/// Bump-style arena backing (pointer, length) views.
///
/// Strings and string lists are individually boxed so growing the arena
/// never moves bytes a view already points at.
#[derive(Default)]
pub(crate) struct Scratch {
    strings: Vec<Box<str>>,
    str_lists: Vec<Box<[StrFfi]>>,
    params: Vec<ParamFfi>,
    ids: Vec<u32>,
}

// Raw pointers inside the stored ParamFfi records point into the boxed
// strings above, which the scratch owns; moving the Scratch between
// threads moves the ownership with it.
unsafe impl Send for Scratch {}

impl Scratch {
    /// Invalidate all outstanding views.
    pub fn reset(&mut self) {
        self.strings.clear();
        self.str_lists.clear();
        self.params.clear();
        self.ids.clear();
    }

    /// Intern a string and return its view.
    pub fn str_view(&mut self, s: &str) -> StrFfi {
        if s.is_empty() {
            return StrFfi::empty();
        }
        let boxed: Box<str> = s.into();
        let view = StrFfi {
            ptr: boxed.as_ptr(),
            len: boxed.len() as u32,
        };
        self.strings.push(boxed);
        view
    }

    /// Intern a list of strings and return its view.
    pub fn str_list(&mut self, items: &[String]) -> StrListFfi {
        if items.is_empty() {
            return StrListFfi::empty();
        }
        let views: Box<[StrFfi]> = items.iter().map(|s| self.str_view(s)).collect();
        let list = StrListFfi {
            ptr: views.as_ptr(),
            len: views.len() as u32,
        };
        self.str_lists.push(views);
        list
    }

    /// Store an ID list and return its view.
    pub fn id_list(&mut self, ids: Vec<u32>) -> IdListFfi {
        self.ids = ids;
        IdListFfi {
            ptr: self.ids.as_ptr(),
            len: self.ids.len() as u32,
        }
    }

    /// Encode a parameter kind into its tagged wire form.
    pub fn encode_kind(&mut self, kind: &SdfParamKind) -> ParamKindFfi {
        match kind {
            SdfParamKind::Boolean => ParamKindFfi {
                tag: TAG_BOOL,
                w0: 0,
                w1: 0,
                w2: 0,
                values: StrListFfi::empty(),
            },
            SdfParamKind::Int { min, max, step } => ParamKindFfi {
                tag: TAG_INT,
                w0: *min as u32,
                w1: *max as u32,
                w2: *step as u32,
                values: StrListFfi::empty(),
            },
            SdfParamKind::Float { min, max, step } => ParamKindFfi {
                tag: TAG_FLOAT,
                w0: min.to_bits(),
                w1: max.to_bits(),
                w2: step.to_bits(),
                values: StrListFfi::empty(),
            },
            SdfParamKind::StringEnum { values } => ParamKindFfi {
                tag: TAG_STRING,
                w0: 0,
                w1: 0,
                w2: 0,
                values: self.str_list(values),
            },
        }
    }

    /// Encode a parameter value into its tagged wire form.
    pub fn encode_value(&mut self, value: &SdfParamValue) -> ParamValueFfi {
        match value {
            SdfParamValue::Bool(b) => ParamValueFfi {
                tag: TAG_BOOL,
                bits: *b as u32,
                string: StrFfi::empty(),
            },
            SdfParamValue::Int(i) => ParamValueFfi {
                tag: TAG_INT,
                bits: *i as u32,
                string: StrFfi::empty(),
            },
            SdfParamValue::Float(f) => ParamValueFfi {
                tag: TAG_FLOAT,
                bits: f.to_bits(),
                string: StrFfi::empty(),
            },
            SdfParamValue::String(s) => ParamValueFfi {
                tag: TAG_STRING,
                bits: 0,
                string: self.str_view(s),
            },
        }
    }

    /// Encode a node's parameter descriptors and return the list view.
    pub fn encode_params(&mut self, params: &[SdfParam]) -> ParamListFfi {
        let mut encoded = Vec::with_capacity(params.len());
        for p in params {
            let name = self.str_view(&p.name);
            let description = self.str_view(&p.description);
            let kind = self.encode_kind(&p.kind);
            let value = self.encode_value(&p.value);
            encoded.push(ParamFfi {
                id: p.id,
                name,
                kind,
                value,
                description,
            });
        }
        self.params = encoded;
        ParamListFfi {
            ptr: self.params.as_ptr(),
            len: self.params.len() as u32,
        }
    }

    /// Build an error status carrying `message`.
    pub fn error_status(&mut self, code: u32, message: &str) -> StatusFfi {
        StatusFfi {
            code,
            message: self.str_view(message),
        }
    }
}

/// Decode a tagged value received from the caller.
///
/// An unrecognized discriminant means the two sides disagree on the
/// protocol version; that is unrecoverable and panics.
///
/// # Safety
/// A `TAG_STRING` payload must point at `len` valid bytes for the duration
/// of the call.
pub unsafe fn decode_value(value: &ParamValueFfi) -> SdfParamValue {
    match value.tag {
        TAG_BOOL => SdfParamValue::Bool(value.bits != 0),
        TAG_INT => SdfParamValue::Int(value.bits as i32),
        TAG_FLOAT => SdfParamValue::Float(f32::from_bits(value.bits)),
        TAG_STRING => SdfParamValue::String(value.string.read()),
        tag => panic!("unrecognized parameter value tag {tag}: protocol version mismatch"),
    }
}

/// Decode a tagged kind. Counterpart of [`Scratch::encode_kind`], used by
/// host-side Rust callers and the protocol tests.
///
/// # Safety
/// A `TAG_STRING` payload's `values` list must be valid for the duration
/// of the call.
pub unsafe fn decode_kind(kind: &ParamKindFfi) -> SdfParamKind {
    match kind.tag {
        TAG_BOOL => SdfParamKind::Boolean,
        TAG_INT => SdfParamKind::Int {
            min: kind.w0 as i32,
            max: kind.w1 as i32,
            step: kind.w2 as i32,
        },
        TAG_FLOAT => SdfParamKind::Float {
            min: f32::from_bits(kind.w0),
            max: f32::from_bits(kind.w1),
            step: f32::from_bits(kind.w2),
        },
        TAG_STRING => {
            let mut values = Vec::with_capacity(kind.values.len as usize);
            if !kind.values.ptr.is_null() {
                let entries = std::slice::from_raw_parts(kind.values.ptr, kind.values.len as usize);
                for entry in entries {
                    values.push(entry.read());
                }
            }
            SdfParamKind::StringEnum { values }
        }
        tag => panic!("unrecognized parameter kind tag {tag}: protocol version mismatch"),
    }
}
