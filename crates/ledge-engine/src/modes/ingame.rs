//! The in-game mode: runs one level from loading until its exit is reached.
//!
//! Owns the scene, the map, the player model and every per-level system.
//! Each `update_and_render` call runs the logic passes in a fixed order,
//! applies the queued commands, draws the frame into an off-screen target
//! and composites it. When the player dies the level restarts from the
//! state it had when it was loaded.

use std::time::Instant;

use glam::{IVec2, Vec2};

use crate::api::game::{Context, Difficulty, GameConfig, GameMode};
use crate::api::types::{format_vec2, Entity, PixelRect, TimeDelta};
use crate::assets::loader::{LevelLoader, LoadError};
use crate::components::player::PlayerControlled;
use crate::components::spatial::{Physical, WorldPosition};
use crate::core::commands::{Command, CommandQueue};
use crate::core::factory::EntityFactory;
use crate::core::level::{level_file_name, loading_screen_file_name, LevelData};
use crate::core::map::Map;
use crate::core::physics::PhysicsSystem;
use crate::core::player_model::PlayerModel;
use crate::core::scene::Scene;
use crate::input::queue::{InputEvent, Key, PlayerInput};
use crate::renderer::camera::ScrollCamera;
use crate::renderer::map_renderer::MapRenderer;
use crate::renderer::traits::{RenderTargetId, Renderer};
use crate::systems::{
    level_exit_reached, tick_animations, AttackSystem, DamageInflictionSystem, DebuggingSystem,
    ElevatorSystem, MapScrollSystem, PlayerAnimationSystem, PlayerDamageSystem,
    PlayerInteractionSystem, PlayerMovementSystem, RenderingSystem, SecurityCameraSystem,
};

/// Music played while the loading screen is up.
pub const LOADING_SCREEN_MUSIC: &str = "MENUSNG2.IMF";

/// Logic passes that capture the player handle. Rebuilt on every restart.
struct LevelSystems {
    elevator: ElevatorSystem,
    movement: PlayerMovementSystem,
    attack: AttackSystem,
    interaction: PlayerInteractionSystem,
    security_cameras: SecurityCameraSystem,
    physics: PhysicsSystem,
    player_damage: PlayerDamageSystem,
    damage_infliction: DamageInflictionSystem,
    player_animation: PlayerAnimationSystem,
    map_scroll: MapScrollSystem,
}

impl LevelSystems {
    fn new(player: Entity, difficulty: Difficulty, config: &GameConfig) -> Self {
        Self {
            elevator: ElevatorSystem::new(player, config),
            movement: PlayerMovementSystem::new(player, config),
            attack: AttackSystem::new(player, config),
            interaction: PlayerInteractionSystem::new(player),
            security_cameras: SecurityCameraSystem::new(player),
            physics: PhysicsSystem::new(config),
            player_damage: PlayerDamageSystem::new(player, difficulty, config),
            damage_infliction: DamageInflictionSystem::new(),
            player_animation: PlayerAnimationSystem::new(player, config),
            map_scroll: MapScrollSystem::new(player, config),
        }
    }

    fn set_input_state(&mut self, input: PlayerInput) {
        self.elevator.set_input_state(input);
        self.movement.set_input_state(input);
        self.attack.set_input_state(input);
    }
}

/// What the end-of-frame checks found. Both are evaluated every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameOutcome {
    level_exit_reached: bool,
    player_died: bool,
}

pub struct IngameMode {
    config: GameConfig,
    difficulty: Difficulty,
    factory: EntityFactory,
    scene: Scene,
    player: Entity,
    level: LevelData,
    map_at_level_start: Map,
    player_model: PlayerModel,
    player_model_at_level_start: PlayerModel,
    camera: ScrollCamera,
    systems: LevelSystems,
    rendering: RenderingSystem,
    debugging: DebuggingSystem,
    commands: CommandQueue,
    input: PlayerInput,
    render_target: RenderTargetId,
    show_debug_text: bool,
    level_finished: bool,
}

impl IngameMode {
    /// Show the loading screen, load the level and set it up.
    ///
    /// `player_position_override` places the player somewhere other than
    /// the level's start position (used for debugging).
    pub fn new(
        episode: u32,
        level: u32,
        difficulty: Difficulty,
        config: GameConfig,
        loader: &dyn LevelLoader,
        ctx: &mut Context<'_>,
        player_position_override: Option<Vec2>,
    ) -> Result<Self, LoadError> {
        let started = Instant::now();
        let file_name = level_file_name(episode, level);

        show_loading_screen(episode, loader, ctx)?;

        let loaded = loader.load_level(&file_name, difficulty)?;
        let factory = EntityFactory::new(difficulty, config.clone());
        let mut scene = Scene::new();
        let player = factory.create_entities_for_level(&mut scene, &loaded.actors);

        let map_renderer = MapRenderer::new(ctx.renderer, &loaded, &config);
        let viewport_px = config.viewport_size_px();
        let render_target = ctx.renderer.create_render_target(viewport_px.x, viewport_px.y);
        let camera = ScrollCamera::new(
            IVec2::new(config.viewport_width_tiles, config.viewport_height_tiles),
            IVec2::new(loaded.map.width(), loaded.map.height()),
            config.tile_size_px,
        );
        let music_file = loaded.music_file.clone();
        let level_data = LevelData {
            map: loaded.map,
            initial_actors: loaded.actors,
        };
        let player_model = PlayerModel::new();

        let mut mode = Self {
            systems: LevelSystems::new(player, difficulty, &config),
            config,
            difficulty,
            factory,
            scene,
            player,
            map_at_level_start: level_data.map.clone(),
            level: level_data,
            player_model_at_level_start: player_model.clone(),
            player_model,
            camera,
            rendering: RenderingSystem::new(map_renderer),
            debugging: DebuggingSystem::new(),
            commands: CommandQueue::new(),
            input: PlayerInput::default(),
            render_target,
            show_debug_text: false,
            level_finished: false,
        };

        ctx.services.play_music(&music_file);

        if let Some(position) = player_position_override {
            mode.scene.component_mut::<WorldPosition>(mode.player).0 = position;
        }
        mode.systems.map_scroll.center_on_player(&mode.scene, &mut mode.camera);

        log::info!(
            "{file_name} loaded in {} ms",
            started.elapsed().as_millis()
        );
        Ok(mode)
    }

    /// True once the player reached the level exit. Stays true.
    pub fn level_finished(&self) -> bool {
        self.level_finished
    }

    /// The player entity. Changes when the level restarts.
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Entities of the running level.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The level map, including elevator moves made so far.
    pub fn map(&self) -> &Map {
        &self.level.map
    }

    /// Health, weapon and score of the player.
    pub fn player_model(&self) -> &PlayerModel {
        &self.player_model
    }

    /// Current scroll position.
    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    /// Debug overlay toggles.
    pub fn debugging(&self) -> &DebuggingSystem {
        &self.debugging
    }

    /// Whether scroll and player info is sent to the debug text each frame.
    pub fn shows_debug_text(&self) -> bool {
        self.show_debug_text
    }

    /// Difficulty the level was loaded with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Release the backend resources the mode holds.
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        self.rendering.destroy(renderer);
    }

    fn run_frame(&mut self, dt: TimeDelta, ctx: &mut Context<'_>) -> FrameOutcome {
        self.update_game_logic(dt, ctx.renderer);
        self.dispatch_commands(ctx);

        ctx.renderer.set_render_target(Some(self.render_target));
        self.rendering.update(ctx.renderer, &self.scene, &self.camera, dt);
        self.debugging.update(ctx.renderer, &self.scene, &self.level.map, &self.camera);
        ctx.renderer.set_render_target(None);
        ctx.renderer.draw_render_target(self.render_target, self.config.viewport_offset_px);

        if self.show_debug_text {
            ctx.services.show_debug_text(&self.debug_text());
        }

        FrameOutcome {
            level_exit_reached: level_exit_reached(&self.scene, self.player),
            player_died: self.player_is_dead(),
        }
    }

    fn update_game_logic(&mut self, dt: TimeDelta, renderer: &mut dyn Renderer) {
        let systems = &mut self.systems;
        systems.set_input_state(self.input);

        if systems.elevator.update(&mut self.scene, &mut self.level.map, dt) {
            self.rendering.rebuild_map(renderer, &self.level.map);
        }
        systems.movement.update(&mut self.scene, &self.level.map, dt);
        systems
            .attack
            .update(&mut self.scene, &mut self.player_model, &mut self.commands, dt);
        systems
            .interaction
            .update(&self.scene, &mut self.player_model, &mut self.commands);
        systems.security_cameras.update(&mut self.scene);
        systems.physics.update(&mut self.scene, &self.level.map, dt);
        systems
            .player_damage
            .update(&mut self.scene, &mut self.player_model, &mut self.commands, dt);
        systems
            .damage_infliction
            .update(&mut self.scene, &mut self.player_model, &mut self.commands);
        systems.player_animation.update(&mut self.scene, dt);
        tick_animations(&mut self.scene, dt);
        systems.map_scroll.update(&self.scene, &mut self.camera);
    }

    fn dispatch_commands(&mut self, ctx: &mut Context<'_>) {
        for command in self.commands.drain() {
            match command {
                Command::SpawnProjectile {
                    kind,
                    position,
                    direction,
                } => {
                    self.factory
                        .create_projectile(&mut self.scene, kind, position, direction);
                }
                Command::Despawn(entity) => {
                    self.scene.despawn(entity);
                }
                Command::PlaySound(sound) => ctx.services.play_sound(sound),
            }
        }
    }

    /// Health alone is not enough: the player state must have reached Dead.
    fn player_is_dead(&self) -> bool {
        self.player_model.is_dead() && self.scene.component::<PlayerControlled>(self.player).is_dead()
    }

    /// Put the level back into the state it was loaded in.
    fn restart_level(&mut self, ctx: &mut Context<'_>) {
        log::info!("player died, restarting level");
        ctx.services.fade_out_screen();

        self.level.map = self.map_at_level_start.clone();
        self.scene.reset();
        self.player = self
            .factory
            .create_entities_for_level(&mut self.scene, &self.level.initial_actors);
        self.player_model = self.player_model_at_level_start.clone();
        self.systems = LevelSystems::new(self.player, self.difficulty, &self.config);
        self.rendering.rebuild_map(ctx.renderer, &self.level.map);
        self.commands.drain();
        self.camera.scroll_to(Vec2::ZERO);
        self.systems.map_scroll.center_on_player(&self.scene, &mut self.camera);

        // Draw the fresh level once so the fade in shows it.
        self.run_frame(0.0, ctx);
        ctx.services.fade_in_screen();
    }

    fn debug_text(&self) -> String {
        let position = self.scene.component::<WorldPosition>(self.player).0;
        let velocity = self
            .scene
            .get::<Physical>(self.player)
            .map_or(Vec2::ZERO, |p| p.velocity);
        format!(
            "Scroll: {}\nPlayer: {}, Vel.: {}",
            format_vec2(self.camera.offset, 4),
            format_vec2(position, 4),
            format_vec2(velocity, 5)
        )
    }
}

impl GameMode for IngameMode {
    fn handle_event(&mut self, event: &InputEvent) {
        let (key, pressed) = event.key();
        if self.input.apply(key, pressed) || pressed {
            return;
        }

        match key {
            Key::Char('b') => self.debugging.toggle_bounding_box_display(),
            Key::Char('c') => self.debugging.toggle_world_collision_data_display(),
            Key::Char('g') => self.debugging.toggle_grid_display(),
            Key::Char('d') => {
                self.show_debug_text = !self.show_debug_text;
                log::debug!("debug text: {}", self.show_debug_text);
            }
            _ => {}
        }
    }

    fn update_and_render(&mut self, dt: TimeDelta, ctx: &mut Context<'_>) {
        if self.level_finished {
            return;
        }

        let outcome = self.run_frame(dt, ctx);
        if outcome.level_exit_reached {
            self.level_finished = true;
            log::info!("level finished, score {}", self.player_model.score());
        }
        if outcome.player_died {
            self.restart_level(ctx);
        }
    }

    fn finished(&self) -> bool {
        self.level_finished
    }
}

fn show_loading_screen(
    episode: u32,
    loader: &dyn LevelLoader,
    ctx: &mut Context<'_>,
) -> Result<(), LoadError> {
    ctx.services.fade_out_screen();
    ctx.services.play_music(LOADING_SCREEN_MUSIC);

    let image = loader.load_image(&loading_screen_file_name(episode))?;
    let texture = ctx.renderer.create_texture(&image);
    let area = PixelRect::new(0, 0, image.width as i32, image.height as i32);
    ctx.renderer.draw_texture(texture, area, area);

    ctx.services.fade_in_screen();
    Ok(())
}
