//! Session setup and the per-frame loop.
//!
//! [`Game`] owns the [`World`], the [`Resources`] table and the
//! [`WorldTime`] clock. The host calls [`Game::frame`] once per display
//! frame with its wall-clock time in milliseconds:
//!
//! 1. the clock accumulates the (clamped, scaled) frame delta
//! 2. stale buffered input is dropped
//! 3. fixed steps run until the accumulator is drained (physics)
//! 4. one variable-rate update runs (input, movement, camera)
//! 5. the render sink, if any, reads the result
//!
//! A failing frame stops the loop and returns the error; the host decides
//! what to do next.
use log::{error, info, trace};

use crate::archetypes::create_player;
use crate::error::Result;
use crate::render::RenderSink;
use crate::resources::Resources;
use crate::resources::camera::CameraState;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::GameState;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::CameraSystem;
use crate::systems::input::InputSystem;
use crate::systems::movement::MovementSystem;
use crate::systems::physics::PhysicsSystem;
use crate::world::{EntityId, World};

pub struct Game {
    config: GameConfig,
    world: World,
    resources: Resources,
    time: WorldTime,
    running: bool,
    render_sink: Option<Box<dyn RenderSink>>,
}

impl Game {
    /// Build a session: resources, the system pipeline and the player.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut resources = Resources::new();
        resources.register(InputState::new());
        let mut camera = CameraState::new();
        camera.set_zoom(config.camera_zoom);
        resources.register(camera);
        resources.register(GameState::new(config.level.clone()));

        let mut world = World::new();
        world.add_system(InputSystem::new());
        world.add_system(MovementSystem::new());
        world.add_system(PhysicsSystem::from_config(&config));
        world.add_system(CameraSystem::new());

        let player = create_player(&mut world, config.spawn_x, config.spawn_y)?;
        resources.game_mut()?.player_entity = Some(player);

        let mut time = WorldTime::new().with_max_frame_time(config.max_frame_ms);
        time.time_scale = config.time_scale;

        info!(
            "Game created: level '{}', player {}, systems {:?}",
            config.level,
            player,
            world.system_names()
        );

        Ok(Self {
            config,
            world,
            resources,
            time,
            running: false,
            render_sink: None,
        })
    }

    /// Begin scheduling frames. The first frame after starting has zero delta.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.time.reset();
        self.running = true;
        info!("Game started");
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Game stopped after {} frames", self.time.frame_count());
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop and drop all session resources.
    pub fn shutdown(&mut self) {
        self.stop();
        self.resources.clear();
        info!("Game shut down");
    }

    pub fn set_render_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.render_sink = Some(sink);
    }

    /// Run one display frame at wall-clock time `now_ms`.
    ///
    /// Does nothing while stopped. On error the game stops.
    pub fn frame(&mut self, now_ms: f64) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let result = self.tick(now_ms);
        if let Err(e) = &result {
            error!("Frame {} failed, stopping: {}", self.time.frame_count(), e);
            self.running = false;
        }
        result
    }

    fn tick(&mut self, now_ms: f64) -> Result<()> {
        self.time.begin_frame(now_ms);
        self.resources.input_mut()?.expire_buffer(now_ms);

        if self.resources.game()?.is_paused {
            self.time.discard_accumulated();
        } else {
            let fixed_dt = self.time.fixed_delta_seconds();
            let mut steps = 0;
            while self.time.should_run_fixed_step() {
                self.world.fixed_update(&mut self.resources, fixed_dt)?;
                self.time.consume_fixed_step();
                steps += 1;
            }
            trace!("Frame {}: {} fixed steps", self.time.frame_count(), steps);

            self.world
                .update(&mut self.resources, self.time.delta_seconds())?;
        }

        self.time.calculate_alpha();

        if let Some(sink) = self.render_sink.as_mut() {
            sink.render(&self.world, &self.resources, self.time.alpha() as f32)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Host access, e.g. to feed input events into
    /// [`InputState`] or toggle pause.
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    /// The player entity created at startup.
    pub fn player(&self) -> Option<EntityId> {
        self.resources.game().ok().and_then(|g| g.player_entity)
    }
}
