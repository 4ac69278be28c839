//! Scene graph
//!
//! Nodes live in a `BTreeMap` keyed by id, so every pass over the scene runs
//! in creation order. Each node has a speed scalar; the effective speed of a
//! node is the product of its own and all ancestors' speeds, and scales the
//! dt its actions receive. Setting a container's speed to 0 freezes its whole
//! subtree without cancelling anything.
//!
//! Containers are never rotated or scaled, so a node's world position is the
//! sum of positions along its parent chain.

use std::collections::BTreeMap;

use glam::Vec2;

use super::action::{Action, Cue, Effect, RunningAction, Transform};
use super::physics::PhysicsBody;
use super::texture::Texture;

/// Stable node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// What a node draws
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping node, draws nothing
    Container,
    /// Textured sprite; `Transform::frame` picks the current frame
    Sprite { frames: Vec<Texture> },
    /// Text label
    Label { text: String },
}

impl NodeKind {
    pub fn sprite(texture: Texture) -> Self {
        NodeKind::Sprite {
            frames: vec![texture],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Draw order, higher is in front
    pub z: f32,
    /// Action playback rate for this subtree
    pub speed: f32,
    pub body: Option<PhysicsBody>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    actions: Vec<RunningAction>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind, position: Vec2, parent: Option<NodeId>) -> Self {
        Self {
            id,
            kind,
            transform: Transform {
                position,
                ..Default::default()
            },
            z: 0.0,
            speed: 1.0,
            body: None,
            parent,
            children: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn actions(&self) -> &[RunningAction] {
        &self.actions
    }

    /// Texture currently shown, if this is a sprite
    pub fn texture(&self) -> Option<&Texture> {
        match &self.kind {
            NodeKind::Sprite { frames } => frames
                .get(self.transform.frame)
                .or_else(|| frames.first()),
            _ => None,
        }
    }
}

/// A cue fired by an action on `node`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneEvent {
    pub node: NodeId,
    pub cue: Cue,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    next_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Node::new(root, NodeKind::Container, Vec2::ZERO, None));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a node under `parent` (falls back to the root if `parent` is gone)
    pub fn add(&mut self, parent: NodeId, kind: NodeKind, position: Vec2) -> NodeId {
        let parent = if self.nodes.contains_key(&parent) {
            parent
        } else {
            log::warn!("add: parent {:?} missing, attaching to root", parent);
            self.root
        };
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes
            .insert(id, Node::new(id, kind, position, Some(parent)));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children()).unwrap_or(&[])
    }

    /// All nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes that carry a physics body
    pub fn bodies(&self) -> impl Iterator<Item = (NodeId, &PhysicsBody)> {
        self.nodes
            .values()
            .filter_map(|n| n.body.as_ref().map(|b| (n.id, b)))
    }

    pub fn body(&self, id: NodeId) -> Option<&PhysicsBody> {
        self.nodes.get(&id).and_then(|n| n.body.as_ref())
    }

    pub fn body_mut(&mut self, id: NodeId) -> Option<&mut PhysicsBody> {
        self.nodes.get_mut(&id).and_then(|n| n.body.as_mut())
    }

    /// Remove a node and its subtree
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            self.remove_all_children(id);
            return;
        }
        let Some(parent) = self.nodes.get(&id).map(|n| n.parent) else {
            return;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        self.drop_subtree(id);
    }

    /// Remove every descendant of `id`, keeping `id` itself
    pub fn remove_all_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        for child in std::mem::take(&mut node.children) {
            self.drop_subtree(child);
        }
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
    }

    /// Start an action on a node
    pub fn run(&mut self, id: NodeId, action: Action) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.actions.push(RunningAction::new(action));
        }
    }

    /// Drop every running action on a node
    pub fn stop_actions(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.actions.clear();
        }
    }

    /// Own speed scalar (0.0 for a missing node)
    pub fn speed(&self, id: NodeId) -> f32 {
        self.nodes.get(&id).map(|n| n.speed).unwrap_or(0.0)
    }

    pub fn set_speed(&mut self, id: NodeId, speed: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.speed = speed;
        }
    }

    /// Product of speed scalars from `id` up to the root
    pub fn effective_speed(&self, id: NodeId) -> f32 {
        let mut speed = 1.0;
        let mut current = Some(id);
        while let Some(next) = current {
            let Some(node) = self.nodes.get(&next) else {
                return 0.0;
            };
            speed *= node.speed;
            current = node.parent;
        }
        speed
    }

    /// Sum of ancestor positions, excluding the node itself
    pub fn parent_offset(&self, id: NodeId) -> Option<Vec2> {
        let mut offset = Vec2::ZERO;
        let mut current = self.nodes.get(&id)?.parent;
        while let Some(next) = current {
            let node = self.nodes.get(&next)?;
            offset += node.transform.position;
            current = node.parent;
        }
        Some(offset)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        let node = self.nodes.get(&id)?;
        Some(self.parent_offset(id)? + node.transform.position)
    }

    /// Evaluate all actions for one tick, returning the cues they fired
    pub fn advance(&mut self, dt: f32) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        let mut removals = Vec::new();
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();

        for id in ids {
            let speed = self.effective_speed(id);
            if speed <= 0.0 {
                continue;
            }
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            if node.actions.is_empty() {
                continue;
            }

            let mut effects = Vec::new();
            let transform = &mut node.transform;
            node.actions
                .retain_mut(|action| !action.advance(transform, dt * speed, &mut effects));

            for effect in effects {
                match effect {
                    Effect::RemoveSelf => removals.push(id),
                    Effect::Cue(cue) => events.push(SceneEvent { node: id, cue }),
                }
            }
        }

        for id in removals {
            self.remove(id);
        }
        events
    }
}
