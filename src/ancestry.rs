//! Parent links for tree nodes
//!
//! Rules that look at the context of a node (its parent and grandparent) read
//! these links. They are filled once by [`ParentLinks::connect`] before any
//! rule runs and never change afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MutationError, Result};
use crate::node::{Node, NodeId};

/// Side-table mapping a node to the node that syntactically contains it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentLinks {
    parents: HashMap<NodeId, NodeId>,
}

impl ParentLinks {
    /// Walk the tree from `root` and record the parent of every reachable node.
    ///
    /// The root itself has no parent. A node reachable through more than one
    /// parent keeps the first one found in source order.
    pub fn connect(nodes: &[Node], root: NodeId) -> Result<Self> {
        check_id(nodes, root)?;

        let mut parents = HashMap::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let children = nodes[id.index()].kind.children();
            // Reverse so children are visited in source order
            for child in children.into_iter().rev() {
                check_id(nodes, child)?;
                if child == root || parents.contains_key(&child) {
                    continue;
                }
                parents.insert(child, id);
                stack.push(child);
            }
        }

        debug!(root = %root, links = parents.len(), "connected parent links");
        Ok(Self { parents })
    }

    /// Parent of `id`, absent for the root or for nodes outside the walked tree
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

fn check_id(nodes: &[Node], id: NodeId) -> Result<()> {
    if id.index() < nodes.len() {
        Ok(())
    } else {
        Err(MutationError::InvalidNode {
            id: id.0,
            len: nodes.len(),
        })
    }
}
