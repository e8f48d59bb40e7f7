//! Structural discovery of nested nodes.
//!
//! Authors rarely register children by hand: discovery walks the value
//! returned by [`SdfCore::children_root`](crate::node::SdfCore::children_root)
//! and reports every embedded node as a direct child. The walk is an
//! explicit visitor over a small closed set of structural shapes —
//! aggregates of named fields, sequences, keyed collections, optional and
//! boxed values, scalar leaves — with one extension point: does this value
//! carry node capability ([`Inspect::probe`])?
//!
//! On a probe match the walker records the value and does not descend into
//! it, so a node's internals are never re-reported through its parent. The
//! starting root itself is never probed: a node cannot appear as its own
//! child.
//!
//! Discovery is read-only and assumes acyclic data; see
//! [`SdfCore`](crate::node::SdfCore) for the cyclic-input caveat.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use log::trace;

use crate::adapter::WrappedSdf;
use crate::node::{Sdf, SdfCore, SharedCore, SharedSdf};

/// A value discovery recognized as a node.
pub enum Found {
    /// Minimal capability; will be lifted through [`WrappedSdf`].
    Core {
        /// Shared handle to the core node
        core: SharedCore,
        /// Type label used for auto-naming
        label: &'static str,
    },
    /// Already full capability; kept as-is.
    Full(SharedSdf),
}

/// Structural decomposition plus the node-capability probe.
///
/// Implement `inspect` for aggregate types by feeding each field to
/// [`Walker::visit`]; leaves inspect nothing. `probe` is provided for the
/// shared-handle types and defaults to "not a node" everywhere else.
pub trait Inspect {
    /// Return a node handle if this value *is* a node.
    fn probe(&self) -> Option<Found> {
        None
    }

    /// Feed this value's direct structural children to the walker.
    fn inspect(&self, walker: &mut Walker);
}

/// Depth-first collector of discovered children.
pub struct Walker {
    found: Vec<SharedSdf>,
}

impl Walker {
    /// Walk `root`'s structure and return the nodes found, in traversal
    /// order. `root` itself is inspected but never probed.
    pub fn collect(root: &dyn Inspect) -> Vec<SharedSdf> {
        let mut walker = Walker { found: Vec::new() };
        root.inspect(&mut walker);
        trace!("discovery found {} children", walker.found.len());
        walker.found
    }

    /// Visit one value: record it and stop descending if it is a node,
    /// otherwise recurse into its structure.
    pub fn visit(&mut self, value: &dyn Inspect) {
        match value.probe() {
            Some(Found::Core { core, label }) => {
                trace!("discovered core node ({label})");
                self.found
                    .push(WrappedSdf::from_shared(core, label).into_shared());
            }
            Some(Found::Full(node)) => {
                trace!("discovered full-capability node");
                self.found.push(node);
            }
            None => value.inspect(self),
        }
    }
}

// ============================================================================
// Scalar leaves
// ============================================================================

macro_rules! impl_leaf {
    ($($t:ty),* $(,)?) => {
        $(
            impl Inspect for $t {
                fn inspect(&self, _walker: &mut Walker) {}
            }
        )*
    };
}

impl_leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    isize,
    f32,
    f64,
    String,
    glam::Vec2,
    glam::Vec3,
    glam::Quat,
);

impl Inspect for str {
    fn inspect(&self, _walker: &mut Walker) {}
}

// ============================================================================
// Optional and boxed values
// ============================================================================

impl<T: Inspect> Inspect for Option<T> {
    // Absent values are silently skipped.
    fn inspect(&self, walker: &mut Walker) {
        if let Some(inner) = self {
            walker.visit(inner);
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    // Transparent indirection: probe and inspect the pointee.
    fn probe(&self) -> Option<Found> {
        (**self).probe()
    }

    fn inspect(&self, walker: &mut Walker) {
        (**self).inspect(walker)
    }
}

// ============================================================================
// Sequences and aggregates
// ============================================================================

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self, walker: &mut Walker) {
        for item in self {
            walker.visit(item);
        }
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self, walker: &mut Walker) {
        for item in self {
            walker.visit(item);
        }
    }
}

impl<A: Inspect, B: Inspect> Inspect for (A, B) {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.0);
        walker.visit(&self.1);
    }
}

impl<A: Inspect, B: Inspect, C: Inspect> Inspect for (A, B, C) {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.0);
        walker.visit(&self.1);
        walker.visit(&self.2);
    }
}

// ============================================================================
// Keyed collections
// ============================================================================

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    // Keys are visited too; a node used as a map key is still a child.
    fn inspect(&self, walker: &mut Walker) {
        for (k, v) in self {
            walker.visit(k);
            walker.visit(v);
        }
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self, walker: &mut Walker) {
        for (k, v) in self {
            walker.visit(k);
            walker.visit(v);
        }
    }
}

// ============================================================================
// Node handles (the capability extension point)
// ============================================================================

impl<T: SdfCore + 'static> Inspect for Arc<Mutex<T>> {
    fn probe(&self) -> Option<Found> {
        let core: SharedCore = self.clone();
        Some(Found::Core {
            core,
            label: std::any::type_name::<T>(),
        })
    }

    fn inspect(&self, walker: &mut Walker) {
        self.lock().unwrap().inspect(walker)
    }
}

impl Inspect for Arc<Mutex<dyn SdfCore>> {
    fn probe(&self) -> Option<Found> {
        let label = self.lock().unwrap().type_label();
        Some(Found::Core {
            core: self.clone(),
            label,
        })
    }

    fn inspect(&self, walker: &mut Walker) {
        self.lock().unwrap().inspect(walker)
    }
}

impl Inspect for Arc<Mutex<dyn Sdf>> {
    fn probe(&self) -> Option<Found> {
        Some(Found::Full(self.clone()))
    }

    fn inspect(&self, _walker: &mut Walker) {
        // Full-capability nodes keep their internals to themselves.
    }
}

impl Inspect for Arc<Mutex<WrappedSdf>> {
    fn probe(&self) -> Option<Found> {
        let node: SharedSdf = self.clone();
        Some(Found::Full(node))
    }

    fn inspect(&self, _walker: &mut Walker) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Aabb;
    use glam::Vec3;

    struct Ball {
        radius: f32,
    }

    impl Inspect for Ball {
        fn inspect(&self, walker: &mut Walker) {
            walker.visit(&self.radius);
        }
    }

    impl SdfCore for Ball {
        fn eval(&self, point: Vec3) -> f32 {
            point.length() - self.radius
        }

        fn aabb(&self) -> Aabb {
            Aabb::from_center_extents(Vec3::ZERO, Vec3::splat(self.radius))
        }

        fn children_root(&self) -> &dyn Inspect {
            self
        }
    }

    struct Scene {
        a: Arc<Mutex<Ball>>,
        b: Arc<Mutex<Ball>>,
        label: String,
        unused: Option<f32>,
    }

    impl Inspect for Scene {
        fn inspect(&self, walker: &mut Walker) {
            walker.visit(&self.a);
            walker.visit(&self.b);
            walker.visit(&self.label);
            walker.visit(&self.unused);
        }
    }

    fn ball(radius: f32) -> Arc<Mutex<Ball>> {
        Arc::new(Mutex::new(Ball { radius }))
    }

    #[test]
    fn finds_direct_handles() {
        let scene = Scene {
            a: ball(1.0),
            b: ball(2.0),
            label: "scene".into(),
            unused: None,
        };
        assert_eq!(Walker::collect(&scene).len(), 2);
    }

    #[test]
    fn match_stops_descent() {
        // Holder is itself a node and contains another node; once the
        // holder matches, its inner ball must not surface as a sibling.
        struct Holder {
            inner: Arc<Mutex<Ball>>,
        }

        impl Inspect for Holder {
            fn inspect(&self, walker: &mut Walker) {
                walker.visit(&self.inner);
            }
        }

        impl SdfCore for Holder {
            fn eval(&self, point: Vec3) -> f32 {
                self.inner.lock().unwrap().eval(point)
            }

            fn aabb(&self) -> Aabb {
                self.inner.lock().unwrap().aabb()
            }

            fn children_root(&self) -> &dyn Inspect {
                self
            }
        }

        let root = (Arc::new(Mutex::new(Holder { inner: ball(1.0) })), ball(3.0));
        let found = Walker::collect(&root);
        assert_eq!(found.len(), 2, "holder and sibling, not holder's inner");
    }

    #[test]
    fn containers_are_traversed() {
        let nested: Vec<(String, Option<Arc<Mutex<Ball>>>)> = vec![
            ("a".into(), Some(ball(1.0))),
            ("b".into(), None),
            ("c".into(), Some(ball(2.0))),
        ];
        assert_eq!(Walker::collect(&nested).len(), 2);
    }

    #[test]
    fn root_is_not_its_own_child() {
        let lone = Ball { radius: 1.0 };
        // Walking the ball's own structure finds no children even though a
        // handle to the same type would match the probe.
        assert!(Walker::collect(&lone).is_empty());
    }
}
