//! Arena scene graph: transforms, parenting, visibility.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::material::{Material, MeshKind};

/// Index of a node inside its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Local position / rotation / scale of a node.
///
/// Rotation is a set of Euler angles in radians applied in XYZ order, so
/// the local matrix is `T · Rx · Ry · Rz · S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles (radians, XYZ order).
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity rotation and scale at `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Identity translation and scale with the given Euler rotation.
    #[must_use]
    pub fn from_rotation(rotation: Vec3) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Matrix mapping local coordinates into the parent's space.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            self.scale,
            rotation,
            self.position,
        )
    }
}

/// Mesh + material drawn at a node's world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshAttachment {
    /// Shared geometry the node is drawn with.
    pub kind: MeshKind,
    /// Surface appearance.
    pub material: Material,
}

/// A single scene-graph node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Human-readable label, used in logs.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Hidden nodes hide their whole subtree.
    pub visible: bool,
    /// Geometry drawn at this node, if any. Group nodes have none.
    pub mesh: Option<MeshAttachment>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Parent node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Flat node storage with parent links.
///
/// Nodes are never removed, so a [`NodeId`] handed out by
/// [`add`](Self::add) stays valid for the graph's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent` (or as a root).
    pub fn add(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            transform,
            visible: true,
            mesh: None,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Append a node that draws `mesh`.
    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<NodeId>,
        mesh: MeshAttachment,
    ) -> NodeId {
        let id = self.add(name, transform, parent);
        self.nodes[id.0].mesh = Some(mesh);
        id
    }

    /// Read access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Write access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent-to-root composition of local matrices.
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = self.node(id).transform.local_matrix();
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            let node = self.node(parent);
            matrix = node.transform.local_matrix() * matrix;
            cursor = node.parent;
        }
        matrix
    }

    /// World-space origin of a node.
    #[must_use]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).w_axis.truncate()
    }

    /// True when the node and all of its ancestors are visible.
    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            if !node.visible {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    /// Ids of nodes drawing with `kind`, in insertion order.
    pub fn mesh_nodes(
        &self,
        kind: MeshKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(move |(i, node)| {
            node.mesh
                .filter(|mesh| mesh.kind == kind)
                .map(|_| NodeId(i))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::util::color::Color;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn child_inherits_parent_rotation() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add("pivot", Transform::default(), None);
        let child = graph.add(
            "child",
            Transform::from_position(Vec3::new(15.0, 0.0, 0.0)),
            Some(pivot),
        );

        graph.node_mut(pivot).transform.rotation.y = FRAC_PI_2;
        // +X rotated a quarter turn about +Y lands on -Z
        assert!(close(graph.world_position(child), Vec3::new(0.0, 0.0, -15.0)));
        assert_eq!(graph.node(child).parent(), Some(pivot));
        assert_eq!(graph.node(pivot).children(), &[child]);
    }

    #[test]
    fn quarter_turn_about_x_lays_xy_plane_flat() {
        let t = Transform::from_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let p = t.local_matrix().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(close(p, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hidden_parent_hides_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.add("root", Transform::default(), None);
        let leaf = graph.add("leaf", Transform::default(), Some(root));
        assert!(graph.is_visible(leaf));
        graph.node_mut(root).visible = false;
        assert!(!graph.is_visible(leaf));
    }

    #[test]
    fn mesh_nodes_filters_by_kind() {
        let mut graph = SceneGraph::new();
        let star = MeshAttachment {
            kind: MeshKind::Star,
            material: Material::basic(Color::WHITE),
        };
        let _ = graph.add("group", Transform::default(), None);
        let a = graph.add_mesh("a", Transform::default(), None, star);
        let b = graph.add_mesh("b", Transform::default(), None, star);
        let found: Vec<_> = graph.mesh_nodes(MeshKind::Star).collect();
        assert_eq!(found, vec![a, b]);
        assert_eq!(graph.mesh_nodes(MeshKind::Sun).count(), 0);
        assert_eq!(graph.len(), 3);
    }
}
