//! World facade, resources table and bevy interop.

use edgecore::archetypes::{create_basic_enemy, create_platform, create_player};
use edgecore::components::physics::Physics;
use edgecore::components::playerinput::{BufferPriority, BufferedAction};
use edgecore::components::transform::Transform;
use edgecore::error::CoreError;
use edgecore::resources::camera::CameraState;
use edgecore::resources::gamestate::GameState;
use edgecore::resources::input::InputState;
use edgecore::resources::{ResourceKind, Resources};
use edgecore::world::{ComponentKind, EntityId, World};

#[test]
fn facade_entities_are_visible_to_bevy_queries() {
    let mut world = World::new();
    let player = create_player(&mut world, 1.0, 2.0).unwrap();
    let enemy = create_basic_enemy(&mut world, 3.0, 4.0).unwrap();
    create_platform(&mut world, 0.0, 300.0, 100.0, 10.0).unwrap();

    let mut query = world.ecs_mut().query::<(&EntityId, &Physics)>();
    let mut ids: Vec<EntityId> = query.iter(world.ecs()).map(|(id, _)| *id).collect();
    ids.sort();
    assert_eq!(ids, vec![player, enemy]);
}

#[test]
fn writes_through_bevy_are_seen_by_facade() {
    let mut world = World::new();
    let id = create_basic_enemy(&mut world, 0.0, 0.0).unwrap();

    let mut query = world.ecs_mut().query::<&mut Transform>();
    for mut transform in query.iter_mut(world.ecs_mut()) {
        transform.translate(5.0, -5.0);
    }

    let transform = world.get_component::<Transform>(id).unwrap();
    assert_eq!((transform.x, transform.y), (5.0, -5.0));
}

#[test]
fn dangling_ids_never_alias_new_entities() {
    let mut world = World::new();
    let old = create_player(&mut world, 0.0, 0.0).unwrap();
    world.remove_entity(old);
    let new = create_player(&mut world, 0.0, 0.0).unwrap();

    assert_ne!(old, new);
    assert!(world.get_component::<Transform>(old).is_none());
    assert_eq!(
        world.add_component(old, Physics::new()).unwrap_err(),
        CoreError::EntityNotFound(old)
    );
    assert_eq!(world.query(&[ComponentKind::PlayerInput]), vec![new]);
}

#[test]
fn query_with_no_kinds_matches_all() {
    let mut world = World::new();
    let a = world.create_entity();
    let b = create_player(&mut world, 0.0, 0.0).unwrap();
    let mut all = world.query(&[]);
    all.sort();
    assert_eq!(all, vec![a, b]);
}

#[test]
fn resources_clear_is_idempotent_for_every_kind() {
    let mut resources = Resources::new();
    resources.register(InputState::new());
    resources.register(CameraState::new());
    resources.register(GameState::default());

    for _ in 0..2 {
        resources.clear();
        for kind in ResourceKind::ALL {
            assert!(!resources.has(kind));
            assert!(resources.get(kind).is_err());
        }
    }
}

#[test]
fn buffered_input_overwrite_law() {
    let mut input = InputState::new();
    assert!(input.buffer_input(BufferedAction::Roll, BufferPriority::High, 1000.0));

    // lower priority inside the window is rejected
    assert!(!input.buffer_input(BufferedAction::Jump, BufferPriority::Low, 1100.0));
    assert_eq!(
        input.buffered_input().map(|b| b.action),
        Some(BufferedAction::Roll)
    );

    // lower priority after the window replaces it
    assert!(input.buffer_input(BufferedAction::Jump, BufferPriority::Low, 1134.0));
    assert_eq!(
        input.buffered_input().map(|b| b.action),
        Some(BufferedAction::Jump)
    );

    // equal or higher priority always replaces
    assert!(input.buffer_input(BufferedAction::LightAttack, BufferPriority::Medium, 1140.0));
    assert!(input.buffer_input(BufferedAction::HeavyAttack, BufferPriority::Medium, 1150.0));
    let pending = input.buffered_input().unwrap();
    assert_eq!(pending.action, BufferedAction::HeavyAttack);
    assert_eq!(pending.timestamp, 1150.0);
}
