//! End-to-end frame test: init, camera, transform, animation and collection

use crate::animation::{AnimationComponent, Interpolation};
use crate::foundation::math::{translate, Mat4, Quat, Vec3};
use crate::scene::components::{
    CameraComponent, KeyframeComponent, MeshComponent, TransformComponent, VertexAttribute,
};
use crate::scene::systems::{CameraSystem, InitSystem, RenderCollector, TransformSystem};
use crate::scene::world::World;
use approx::assert_relative_eq;

/// Builds the animation-demo scene: a camera rig under the root and an
/// animated object with a mesh and two keyframe poses.
fn build_scene(world: &mut World) -> (crate::scene::Entity, crate::scene::Entity, crate::scene::Entity) {
    let root = world.create_entity("root");

    let rig = world.create_entity("camera_rig");
    world.add_child(root, rig).unwrap();
    world
        .add_transform(rig, TransformComponent::from_trs(translate(0.0, 0.0, -8.0)))
        .unwrap();

    let cam = world.create_entity("camera");
    world.add_child(rig, cam).unwrap();
    world.add_transform(cam, TransformComponent::identity()).unwrap();
    world
        .add_camera(cam, CameraComponent::perspective(50.0_f32.to_radians(), 1.0, 1.0, 10.0))
        .unwrap();

    let object = world.create_entity("object");
    world.add_child(root, object).unwrap();
    world.add_transform(object, TransformComponent::identity()).unwrap();

    let mut mesh = MeshComponent::new();
    mesh.add_attribute(VertexAttribute::new(
        "position",
        vec![[0.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]],
    ))
    .unwrap();
    mesh.add_attribute(VertexAttribute::new(
        "color",
        vec![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]],
    ))
    .unwrap();
    mesh.set_indices(vec![0, 1, 2]).unwrap();
    world.add_mesh(object, mesh).unwrap();

    let rest = KeyframeComponent::new(vec![Mat4::identity(), Mat4::identity()]);
    let bent = KeyframeComponent::new(vec![
        Quat::from_axis_angle(&Vec3::z_axis(), 0.8).to_homogeneous(),
        translate(0.0, 1.0, 0.0),
    ]);
    world.add_keyframe(object, rest).unwrap();
    world.add_keyframe(object, bent).unwrap();
    world
        .add_animation(object, AnimationComponent::new(2.0, [0.0, 100.0, 200.0], Interpolation::Slerp))
        .unwrap();

    (root, cam, object)
}

#[test]
fn one_frame_resolves_matrices_poses_and_draw_list() {
    let mut world = World::new();
    let (root, cam, object) = build_scene(&mut world);

    // Init pass requests one upload for the object's mesh
    let mut init = InitSystem::new();
    init.begin_pass();
    world.traverse_visit(&mut init, root).unwrap();
    assert_eq!(init.uploads(), &[object]);

    // Camera ancestor pass, then the general passes
    let mut camera_system = CameraSystem::new();
    camera_system.prepare(&mut world, cam).unwrap();
    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();
    world.traverse_visit(&mut camera_system, root).unwrap();

    // The camera sits 8 units behind the root, so the object appears
    // 8 units in front of the camera
    assert_relative_eq!(
        world.store().transforms[object].l2cam(),
        translate(0.0, 0.0, 8.0),
        epsilon = 1.0e-5
    );

    // Animation tick blends the pose sequence attached to the object
    let [key1, key2] = world.store().keyframes_of(object) else {
        panic!("expected exactly two keyframes");
    };
    let (key1, key2) = (key1.clone(), key2.clone());
    let animation = world
        .store_mut()
        .animations
        .get_mut(object)
        .expect("animation state attached");
    let pose = animation.advance(&key1, &key2, None);
    assert_eq!(pose.bone_count(), 2);
    assert_eq!(pose.as_floats().len(), 32);
    // First tick blends at the first boundary: the rest pose
    assert_relative_eq!(pose.matrix(0).unwrap(), Mat4::identity(), epsilon = 1.0e-5);

    // Render pass pairs the mesh with its resolved matrices
    let mut collector = RenderCollector::new();
    collector.begin_frame();
    world.traverse_visit(&mut collector, root).unwrap();
    let items = collector.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].entity, object);
    assert_eq!(items[0].vertex_count, 3);
    assert_relative_eq!(items[0].l2cam, translate(0.0, 0.0, 8.0), epsilon = 1.0e-5);
}

#[test]
fn geometry_swap_between_frames_triggers_a_fresh_upload() {
    let mut world = World::new();
    let (root, _cam, object) = build_scene(&mut world);

    let mut init = InitSystem::new();
    init.begin_pass();
    world.traverse_visit(&mut init, root).unwrap();
    assert_eq!(init.uploads(), &[object]);

    // A feature wrapper regenerates the curve geometry between frames
    let mut mesh = MeshComponent::new();
    mesh.add_attribute(VertexAttribute::new(
        "position",
        vec![[0.0, 0.0, 0.0, 1.0], [2.0, 0.0, 0.0, 1.0]],
    ))
    .unwrap();
    world.add_mesh(object, mesh).unwrap();

    init.begin_pass();
    world.traverse_visit(&mut init, root).unwrap();
    assert_eq!(init.uploads(), &[object]);
}
