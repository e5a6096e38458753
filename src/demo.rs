//! Scripted input for headless runs.
//!
//! A [`DemoScript`] is a time-ordered list of host events (key and mouse
//! presses, mouse moves, camera shakes) replayed into the session's
//! [`InputState`](crate::resources::input::InputState) as the simulated
//! clock passes each event's timestamp.
use log::debug;

use crate::error::Result;
use crate::resources::Resources;
use crate::resources::input::{KeyCode, MouseButton};

/// One host-side event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemoEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Screen and world position of the cursor.
    MouseMove { screen: (f32, f32), world: (f32, f32) },
    /// Camera shake for the given milliseconds.
    Shake(f32),
}

/// Events with their session times in milliseconds, replayed in order.
#[derive(Debug, Clone)]
pub struct DemoScript {
    events: Vec<(f64, DemoEvent)>,
    cursor: usize,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self::showcase()
    }
}

impl DemoScript {
    /// Build a script. Events are sorted by time; ties keep their order.
    pub fn new(mut events: Vec<(f64, DemoEvent)>) -> Self {
        events.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { events, cursor: 0 }
    }

    /// Walk, run, jump, roll, backstep, crouch-slide, aim, attack and shake.
    pub fn showcase() -> Self {
        use DemoEvent::*;
        Self::new(vec![
            (500.0, KeyDown(KeyCode::KeyD)),
            (1500.0, KeyDown(KeyCode::ShiftLeft)),
            (2500.0, KeyUp(KeyCode::ShiftLeft)),
            (2500.0, KeyDown(KeyCode::Space)),
            (2600.0, KeyUp(KeyCode::Space)),
            (3500.0, KeyUp(KeyCode::KeyD)),
            (3500.0, KeyDown(KeyCode::KeyG)),
            (3600.0, KeyUp(KeyCode::KeyG)),
            (4500.0, KeyDown(KeyCode::AltLeft)),
            (4600.0, KeyUp(KeyCode::AltLeft)),
            (5500.0, KeyDown(KeyCode::KeyA)),
            (5500.0, KeyDown(KeyCode::KeyS)),
            (6300.0, KeyUp(KeyCode::KeyS)),
            (6300.0, KeyUp(KeyCode::KeyA)),
            (
                7000.0,
                MouseMove {
                    screen: (400.0, 200.0),
                    world: (0.0, 150.0),
                },
            ),
            (7200.0, MouseDown(MouseButton::Left)),
            (7300.0, MouseUp(MouseButton::Left)),
            (8000.0, Shake(400.0)),
        ])
    }

    /// Apply every event due at or before `now`. Returns how many fired.
    pub fn apply_until(&mut self, now: f64, resources: &mut Resources) -> Result<usize> {
        let mut fired = 0;
        while let Some(&(at, event)) = self.events.get(self.cursor) {
            if at > now {
                break;
            }
            debug!("demo @{}ms: {:?}", at, event);
            apply(event, at, resources)?;
            self.cursor += 1;
            fired += 1;
        }
        Ok(fired)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Time of the last event, or 0 for an empty script.
    pub fn duration_ms(&self) -> f64 {
        self.events.last().map_or(0.0, |(at, _)| *at)
    }
}

fn apply(event: DemoEvent, at: f64, resources: &mut Resources) -> Result<()> {
    match event {
        DemoEvent::KeyDown(key) => resources.input_mut()?.handle_key_down(key, at),
        DemoEvent::KeyUp(key) => resources.input_mut()?.handle_key_up(key),
        DemoEvent::MouseDown(button) => resources.input_mut()?.handle_mouse_down(button, at),
        DemoEvent::MouseUp(button) => resources.input_mut()?.handle_mouse_up(button),
        DemoEvent::MouseMove { screen, world } => {
            resources.input_mut()?.set_mouse_position(screen, world)
        }
        DemoEvent::Shake(duration) => resources.camera_mut()?.start_shake(duration),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::camera::CameraState;
    use crate::resources::input::InputState;

    fn resources() -> Resources {
        let mut resources = Resources::new();
        resources.register(InputState::new());
        resources.register(CameraState::new());
        resources
    }

    #[test]
    fn test_events_fire_in_time_order() {
        let mut res = resources();
        let mut script = DemoScript::new(vec![
            (200.0, DemoEvent::KeyUp(KeyCode::KeyD)),
            (100.0, DemoEvent::KeyDown(KeyCode::KeyD)),
        ]);

        assert_eq!(script.apply_until(50.0, &mut res).unwrap(), 0);
        assert_eq!(script.apply_until(150.0, &mut res).unwrap(), 1);
        assert!(res.input().unwrap().is_key_pressed(KeyCode::KeyD));
        assert_eq!(script.apply_until(1000.0, &mut res).unwrap(), 1);
        assert!(!res.input().unwrap().is_key_pressed(KeyCode::KeyD));
        assert!(script.is_finished());
    }

    #[test]
    fn test_key_down_uses_event_time_for_buffer() {
        let mut res = resources();
        let mut script = DemoScript::new(vec![(120.0, DemoEvent::KeyDown(KeyCode::Space))]);
        script.apply_until(130.0, &mut res).unwrap();
        let buffered = res.input().unwrap().buffered_input().unwrap();
        assert_eq!(buffered.timestamp, 120.0);
    }

    #[test]
    fn test_shake_reaches_camera() {
        let mut res = resources();
        let mut script = DemoScript::new(vec![(0.0, DemoEvent::Shake(300.0))]);
        script.apply_until(0.0, &mut res).unwrap();
        assert!(res.camera().unwrap().is_shaking());
    }

    #[test]
    fn test_showcase_is_sorted() {
        let script = DemoScript::showcase();
        assert!(script.events.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(script.duration_ms(), 8000.0);
    }
}
