//! Arena-backed syntax tree
//!
//! A [`Tree`] owns every node of one parsed source file. Children are pushed
//! before their parents, so the last node pushed is the root unless another
//! one is chosen with [`Tree::set_root`].

use crate::ancestry::ParentLinks;
use crate::error::{MutationError, Result};
use crate::node::{Attributes, BinaryOperator, Callee, Name, Node, NodeId, NodeKind};

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    parents: ParentLinks,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the arena and return its id
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
            .or_else(|| self.nodes.len().checked_sub(1).map(|i| NodeId(i as u32)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Replace the attributes of an existing node
    pub fn set_attributes(&mut self, id: NodeId, attributes: Attributes) -> Result<()> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(MutationError::InvalidNode { id: id.0, len })?;
        node.attributes = attributes;
        Ok(())
    }

    /// Annotate every node reachable from the root with its parent.
    ///
    /// Must run once, after the tree is fully built and before any rule is
    /// asked about its nodes.
    pub fn connect_parents(&mut self) -> Result<()> {
        self.parents = match self.root() {
            Some(root) => ParentLinks::connect(&self.nodes, root)?,
            None => ParentLinks::default(),
        };
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.parent(id)
    }

    pub fn parent_links(&self) -> &ParentLinks {
        &self.parents
    }

    /// Build a mutant: a copy of this tree with the node at `id` replaced
    pub fn substitute(&self, id: NodeId, replacement: Node) -> Result<Tree> {
        let mut mutant = self.clone();
        let len = mutant.nodes.len();
        let slot = mutant
            .nodes
            .get_mut(id.index())
            .ok_or(MutationError::InvalidNode { id: id.0, len })?;
        *slot = replacement;

        if !self.parents.is_empty() {
            mutant.connect_parents()?;
        }
        Ok(mutant)
    }

    // Builders

    pub fn variable(&mut self, name: &str) -> NodeId {
        self.push(Node::new(NodeKind::Variable {
            name: name.to_string(),
        }))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.push(Node::new(NodeKind::Int { value }))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.push(Node::new(NodeKind::Str {
            value: value.to_string(),
        }))
    }

    pub fn const_fetch(&mut self, name: Name) -> NodeId {
        self.push(Node::new(NodeKind::ConstFetch { name }))
    }

    pub fn array(&mut self, items: Vec<NodeId>) -> NodeId {
        self.push(Node::new(NodeKind::Array { items }))
    }

    pub fn array_item(&mut self, key: Option<NodeId>, value: NodeId) -> NodeId {
        self.push(Node::new(NodeKind::ArrayItem {
            key,
            value,
            by_ref: false,
            unpack: false,
        }))
    }

    pub fn arg(&mut self, value: NodeId) -> NodeId {
        self.push(Node::new(NodeKind::Arg {
            value,
            by_ref: false,
            unpack: false,
        }))
    }

    /// `name(args)`, wrapping every argument expression in an `Arg` node
    pub fn func_call(&mut self, name: Callee, args: Vec<NodeId>) -> NodeId {
        let args: Vec<NodeId> = args.into_iter().map(|value| self.arg(value)).collect();
        self.push(Node::new(NodeKind::FuncCall { name, args }))
    }

    /// `var->name(args)`, wrapping every argument expression in an `Arg` node
    pub fn method_call(&mut self, var: NodeId, name: &str, args: Vec<NodeId>) -> NodeId {
        let args: Vec<NodeId> = args.into_iter().map(|value| self.arg(value)).collect();
        self.push(Node::new(NodeKind::MethodCall {
            var,
            name: Name::new(name),
            args,
        }))
    }

    pub fn property_fetch(&mut self, var: NodeId, name: &str) -> NodeId {
        self.push(Node::new(NodeKind::PropertyFetch {
            var,
            name: Name::new(name),
        }))
    }

    pub fn binary(&mut self, op: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node::new(NodeKind::BinaryOp { op, left, right }))
    }

    pub fn assign(&mut self, var: NodeId, expr: NodeId) -> NodeId {
        self.push(Node::new(NodeKind::Assign { var, expr }))
    }

    // Rendering

    /// Compact source-like text of the node at `id`, for diagnostics
    pub fn render(&self, id: NodeId) -> String {
        match self.get(id) {
            Some(node) => self.render_node(node),
            None => format!("<missing {}>", id),
        }
    }

    /// Like [`Tree::render`] but for a node that is not (yet) part of the
    /// tree, such as a replacement produced by a rule
    pub fn render_node(&self, node: &Node) -> String {
        match &node.kind {
            NodeKind::Variable { name } => format!("${}", name),
            NodeKind::Int { value } => value.to_string(),
            NodeKind::Float { value } => format!("{:?}", value),
            NodeKind::Str { value } => format!("'{}'", value.replace('\'', "\\'")),
            NodeKind::ConstFetch { name } => name.to_string(),
            NodeKind::Array { items } => format!("[{}]", self.render_list(items)),
            NodeKind::ArrayItem {
                key,
                value,
                by_ref,
                unpack,
            } => {
                let value = format!("{}{}", prefix(*by_ref, *unpack), self.render(*value));
                match key {
                    Some(key) => format!("{} => {}", self.render(*key), value),
                    None => value,
                }
            }
            NodeKind::Arg {
                value,
                by_ref,
                unpack,
            } => format!("{}{}", prefix(*by_ref, *unpack), self.render(*value)),
            NodeKind::FuncCall { name, args } => {
                let callee = match name {
                    Callee::Name(name) => name.to_string(),
                    Callee::Expr(expr) => self.render(*expr),
                };
                format!("{}({})", callee, self.render_list(args))
            }
            NodeKind::MethodCall { var, name, args } => {
                format!("{}->{}({})", self.render(*var), name, self.render_list(args))
            }
            NodeKind::PropertyFetch { var, name } => format!("{}->{}", self.render(*var), name),
            NodeKind::BinaryOp { op, left, right } => {
                format!("{} {} {}", self.render(*left), op.symbol(), self.render(*right))
            }
            NodeKind::Assign { var, expr } => {
                format!("{} = {}", self.render(*var), self.render(*expr))
            }
        }
    }

    fn render_list(&self, ids: &[NodeId]) -> String {
        ids.iter()
            .map(|id| self.render(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn prefix(by_ref: bool, unpack: bool) -> &'static str {
    match (by_ref, unpack) {
        (true, _) => "&",
        (false, true) => "...",
        (false, false) => "",
    }
}
