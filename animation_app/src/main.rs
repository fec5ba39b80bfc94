//! Headless skeletal-animation demo
//!
//! Builds the classic demo scene — a camera rig eight units behind the
//! root and an animated two-bone object — then runs the per-frame passes
//! and logs the resolved matrices and pose buffers. Rendering itself is a
//! collaborator's job; this demo stops at the draw list.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use ecss_engine::foundation::logging::{self, debug, info};
use ecss_engine::prelude::*;

/// Logs detached components so a render backend could free GPU buffers
struct CleanupListener;

impl EventHandler for CleanupListener {
    fn on_event(&mut self, event: &Event) {
        if let Some(detached) = event.detached("detached") {
            for d in detached {
                info!("stale GPU resources: {:?} on {:?}", d.kind, d.entity);
            }
        }
    }
}

fn build_object_mesh() -> Result<MeshComponent, SceneError> {
    let mut mesh = MeshComponent::new();
    mesh.add_attribute(VertexAttribute::new(
        "position",
        vec![
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
        ],
    ))?;
    mesh.add_attribute(VertexAttribute::new(
        "color",
        vec![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        ],
    ))?;
    mesh.set_indices(vec![0, 1, 2, 0, 2, 3])?;
    Ok(mesh)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = if Path::new("playback.toml").exists() {
        PlaybackConfig::load_from_file("playback.toml")?
    } else {
        PlaybackConfig::default()
    };
    info!(
        "playback: tempo {}, boundaries {:?}, {:?}",
        config.tempo, config.boundaries, config.interpolation
    );

    let mut world = World::new();
    let root = world.create_entity("root");

    let rig = world.create_entity("camera_rig");
    world.add_child(root, rig)?;
    world.add_transform(rig, TransformComponent::from_trs(translate(0.0, 0.0, -8.0)))?;

    let cam = world.create_entity("camera");
    world.add_child(rig, cam)?;
    world.add_transform(cam, TransformComponent::identity())?;
    world.add_camera(cam, CameraComponent::perspective(50.0_f32.to_radians(), 1.0, 1.0, 10.0))?;

    let object = world.create_entity("object");
    world.add_child(root, object)?;
    world.add_transform(object, TransformComponent::from_trs(scale(0.1)))?;
    world.add_mesh(object, build_object_mesh()?)?;

    // Two-bone pose pair: rest, and a bend with a lifted second bone
    let rest = KeyframeComponent::new(vec![Mat4::identity(), Mat4::identity()]);
    let bent = KeyframeComponent::new(vec![
        Quat::from_axis_angle(&Vec3::z_axis(), 0.8).to_homogeneous(),
        translate(0.0, 1.0, 0.0),
    ]);
    world.add_keyframe(object, rest)?;
    world.add_keyframe(object, bent)?;
    world.add_animation(object, config.to_animation())?;

    let listener = Rc::new(RefCell::new(CleanupListener));
    world.events_mut().subscribe(COMPONENTS_DETACHED, &listener);

    // One-time init pass: collect GPU upload requests
    let mut init = InitSystem::new();
    init.begin_pass();
    world.traverse_visit(&mut init, root)?;
    for &entity in init.uploads() {
        info!("upload mesh for {:?}", entity);
    }

    let mut transform_system = TransformSystem::new();
    let mut camera_system = CameraSystem::new();
    let mut collector = RenderCollector::new();

    for frame in 0..config.frames {
        camera_system.prepare(&mut world, cam)?;
        world.traverse_visit(&mut transform_system, root)?;
        world.traverse_visit(&mut camera_system, root)?;

        let [key1, key2] = world.store().keyframes_of(object) else {
            return Err("object needs exactly two keyframes".into());
        };
        let (key1, key2) = (key1.clone(), key2.clone());
        let pose = world
            .store_mut()
            .animations
            .get_mut(object)
            .ok_or("animation state missing")?
            .advance(&key1, &key2, None);

        collector.begin_frame();
        world.traverse_visit(&mut collector, root)?;

        if frame % 25 == 0 {
            let animation = &world.store().animations[object];
            info!(
                "frame {frame}: alpha {:.2}, accumulator {:.0}, {} draw item(s)",
                animation.alpha(),
                animation.accumulator(),
                collector.items().len()
            );
            for item in collector.items() {
                debug!(
                    "  draw {:?}: {} vertices, {} indices, l2cam {:?}",
                    item.entity, item.vertex_count, item.index_count, item.l2cam
                );
            }
            debug!("  pose buffer: {} floats", pose.as_floats().len());
        }
    }

    // Tear the object down; the bus announces its detached components
    world.destroy_subtree(object)?;
    info!("done");
    Ok(())
}
