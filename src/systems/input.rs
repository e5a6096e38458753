//! Input projection system.
//!
//! Copies the raw [`InputState`] into every entity carrying
//! [`PlayerInput`] and [`Transform`]: key and button flags become named
//! intents, mouse coordinates are copied, the pending buffered action is
//! mirrored (not consumed) and the weapon zone is recomputed against the
//! entity's position and facing.

use crate::components::playerinput::PlayerInput;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::resources::Resources;
use crate::resources::input::{InputState, KeyCode, MouseButton};
use crate::world::{GameSystem, World};

/// Refresh player intents from raw input. Variable-rate only.
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        Self
    }
}

/// Write the key/button mapping into `intent`.
fn project_input(intent: &mut PlayerInput, input: &InputState) {
    intent.move_left = input.is_key_pressed(KeyCode::KeyA);
    intent.move_right = input.is_key_pressed(KeyCode::KeyD);
    intent.move_up = input.is_key_pressed(KeyCode::KeyW);
    intent.move_down = input.is_key_pressed(KeyCode::KeyS);

    intent.run =
        input.is_key_pressed(KeyCode::ShiftLeft) || input.is_key_pressed(KeyCode::ShiftRight);
    intent.jump = input.is_key_pressed(KeyCode::Space);
    intent.crouch = input.is_key_pressed(KeyCode::KeyS);
    intent.dodge_roll = input.is_key_pressed(KeyCode::KeyG);
    intent.backstep =
        input.is_key_pressed(KeyCode::AltLeft) || input.is_key_pressed(KeyCode::AltRight);
    intent.light_attack = input.is_mouse_button_pressed(MouseButton::Left);
    intent.heavy_attack = input.is_key_pressed(KeyCode::KeyE);
    intent.block = input.is_mouse_button_pressed(MouseButton::Right);
    intent.parry = input.is_key_pressed(KeyCode::KeyQ);

    intent.mouse_x = input.mouse_x;
    intent.mouse_y = input.mouse_y;
    intent.world_mouse_x = input.world_mouse_x;
    intent.world_mouse_y = input.world_mouse_y;

    intent.set_buffered_input(input.buffered_input());
}

impl GameSystem for InputSystem {
    fn name(&self) -> &'static str {
        "InputSystem"
    }

    fn update(&mut self, world: &mut World, resources: &mut Resources, _dt: f32) -> Result<()> {
        let input = resources.input()?;
        let mut query = world
            .ecs_mut()
            .query::<(&mut PlayerInput, &Transform)>();
        for (mut intent, transform) in query.iter_mut(world.ecs_mut()) {
            project_input(&mut intent, input);
            intent.update_weapon_zone(transform.x, transform.y, transform.facing());
        }
        Ok(())
    }

    fn fixed_update(&mut self, _world: &mut World, _res: &mut Resources, _dt: f32) -> Result<()> {
        Ok(())
    }
}
