//! Render collection pass
//!
//! The single place that knows how a mesh's vertex-attribute arrays and
//! resolved matrices become draw submissions. Components never see the
//! graphics backend; this system pairs each initialized mesh with the
//! entity's final local-to-world and local-to-camera matrices and emits an
//! ordered draw list for the out-of-scope GPU collaborator, which looks
//! the attribute arrays up by entity id.

use log::debug;

use crate::foundation::math::Mat4;
use crate::scene::components::ComponentStore;
use crate::scene::entity::{Entity, SceneTree};
use crate::scene::system::{NodeContext, System};

/// One draw submission: an entity's mesh with its resolved matrices
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Entity whose mesh is drawn; attribute arrays are fetched by this id
    pub entity: Entity,
    /// Number of vertex rows in the mesh
    pub vertex_count: usize,
    /// Number of primitive-assembly indices
    pub index_count: usize,
    /// Resolved local-to-world matrix
    pub l2world: Mat4,
    /// Resolved local-to-camera matrix
    pub l2cam: Mat4,
}

/// Collects draw items in traversal order
#[derive(Debug, Default)]
pub struct RenderCollector {
    items: Vec<DrawItem>,
}

impl RenderCollector {
    /// Create the collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the previous frame's draw list
    pub fn begin_frame(&mut self) {
        self.items.clear();
    }

    /// The draw list collected this frame, in traversal order
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }
}

impl System for RenderCollector {
    fn visit_mesh(&mut self, ctx: &NodeContext, _tree: &SceneTree, store: &mut ComponentStore) {
        let Some(mesh) = store.meshes.get(ctx.entity) else {
            return;
        };
        if !mesh.is_initialized() {
            debug!("skipping uninitialized mesh on {:?}", ctx.entity);
            return;
        }
        let (l2world, l2cam) = store
            .transforms
            .get(ctx.entity)
            .map_or((Mat4::identity(), Mat4::identity()), |t| (t.l2world(), t.l2cam()));
        self.items.push(DrawItem {
            entity: ctx.entity,
            vertex_count: mesh.row_count().unwrap_or(0),
            index_count: mesh.indices().len(),
            l2world,
            l2cam,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::translate;
    use crate::scene::components::{MeshComponent, TransformComponent, VertexAttribute};
    use crate::scene::systems::{InitSystem, TransformSystem};
    use crate::scene::world::World;
    use approx::assert_relative_eq;

    fn triangle() -> MeshComponent {
        let mut mesh = MeshComponent::new();
        mesh.add_attribute(VertexAttribute::new(
            "position",
            vec![
                [0.0, 0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
            ],
        ))
        .unwrap();
        mesh.set_indices(vec![0, 1, 2]).unwrap();
        mesh
    }

    #[test]
    fn collects_initialized_meshes_with_resolved_matrices() {
        let mut world = World::new();
        let root = world.create_entity("root");
        let shape = world.create_entity("shape");
        world.add_child(root, shape).unwrap();
        world
            .add_transform(shape, TransformComponent::from_trs(translate(0.0, 0.0, -8.0)))
            .unwrap();
        world.add_mesh(shape, triangle()).unwrap();

        let mut init = InitSystem::new();
        init.begin_pass();
        world.traverse_visit(&mut init, root).unwrap();
        world.traverse_visit(&mut TransformSystem::new(), root).unwrap();

        let mut collector = RenderCollector::new();
        collector.begin_frame();
        world.traverse_visit(&mut collector, root).unwrap();

        let items = collector.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entity, shape);
        assert_eq!(items[0].vertex_count, 3);
        assert_eq!(items[0].index_count, 3);
        assert_relative_eq!(items[0].l2world, translate(0.0, 0.0, -8.0));
    }

    #[test]
    fn uninitialized_meshes_are_skipped() {
        let mut world = World::new();
        let shape = world.create_entity("shape");
        world.add_mesh(shape, triangle()).unwrap();

        let mut collector = RenderCollector::new();
        collector.begin_frame();
        world.traverse_visit(&mut collector, shape).unwrap();
        assert!(collector.items().is_empty());
    }
}
