//! Stable integer identifiers for one registered tree snapshot.
//!
//! The export protocol only speaks numeric IDs, so every node handle that
//! crosses the boundary is numbered here first. Registration resets the map
//! and walks the tree depth-first, giving the root ID 0; children discovered
//! after registration (a mutation can grow the tree) get IDs on demand.
//! IDs are stable until the tree is re-registered, not across structural
//! changes.

use std::collections::HashMap;

use log::debug;

use crate::node::SharedSdf;

/// Maps IDs to node handles for one registered snapshot.
#[derive(Default)]
pub struct Registry {
    nodes: HashMap<u32, SharedSdf>,
    // Reverse map keyed by handle identity, so re-encountered handles keep
    // their ID.
    ids: HashMap<usize, u32>,
    next_id: u32,
}

/// Identity key of a shared handle: the address of its reference-counted
/// allocation.
fn identity(node: &SharedSdf) -> usize {
    std::sync::Arc::as_ptr(node) as *const () as usize
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Reset and register `root` as ID 0, then number its descendants
    /// depth-first in discovery order.
    ///
    /// Re-run this whenever the topology may have changed; IDs do not
    /// survive re-registration.
    pub fn set_root(&mut self, root: SharedSdf) {
        self.clear();
        self.register_subtree(root);
        debug!("registered SDF tree: {} nodes", self.nodes.len());
    }

    fn register_subtree(&mut self, node: SharedSdf) {
        self.ensure_id(&node);
        let children = node.lock().unwrap().children();
        for child in children {
            if !self.ids.contains_key(&identity(&child)) {
                self.register_subtree(child);
            }
        }
    }

    /// ID of `node`, assigning the next unused one if it is new.
    pub fn ensure_id(&mut self, node: &SharedSdf) -> u32 {
        if let Some(&id) = self.ids.get(&identity(node)) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(identity(node), id);
        self.nodes.insert(id, node.clone());
        id
    }

    /// Resolve an ID. `None` means the caller violated the registration
    /// contract; the export layer treats that as fatal.
    pub fn get(&self, id: u32) -> Option<SharedSdf> {
        self.nodes.get(&id).cloned()
    }

    /// All assigned IDs, unordered.
    pub fn ids(&self) -> Vec<u32> {
        self.nodes.keys().copied().collect()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all assignments.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ids.clear();
        self.next_id = 0;
    }
}
