use color_eyre::Result;
use log::info;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use lockstep_invaders::geometry::{cell_position, screen_cell};
use lockstep_invaders::input::{InputAction, InputManager};
use lockstep_invaders::renderer::{GameRenderer, RenderView};
use lockstep_invaders::{
    BoundaryMarkers, Enemy, EnemyId, EnemyPool, EnemyTier, FileHiScoreStore, FormationConfig,
    FormationEngine, FrameTime, GameConfig, GameManager, GameServices, GameState,
    GameStateListener, LevelTable, Player, PlayerRig, PoolConfig, Projectile, ProjectileOwner,
    Scoreboard, SpawnGrid, StateHandle,
};

use crate::audio::{AudioManager, MarchCue};

/// Cells an enemy moves per lateral step
const MARCH_STRIDE: f32 = 2.0;
/// Cells the formation drops per descend step
const MARCH_DESCENT: f32 = 1.0;
/// Frames between clearing a wave and spawning the next (~1.5s)
const WAVE_DELAY_FRAMES: u64 = 90;
const HISCORE_ENV: &str = "LOCKSTEP_HISCORE";
/// Screen row of the formation's top line at spawn
const GRID_ORIGIN_ROW: u16 = 2;
/// Rows between formation lines
const ROW_SPACING: u16 = 3;
/// Minimum free rows between the spawned formation and the cannon
const DESCENT_ROOM: u16 = 4;

/// Formation depth that fits above `player_row` with room left to descend.
/// Never fewer than two rows, so level 1 has enemies.
fn fitting_rows(player_row: u16) -> usize {
    let enemy_height = EnemyTier::Easy.get_height();
    let usable = player_row.saturating_sub(GRID_ORIGIN_ROW + DESCENT_ROOM + enemy_height);
    let rows = (usable / ROW_SPACING) as usize + 1;
    rows.clamp(2, FormationConfig::default().max_rows)
}

/// An enemy sprite overlaps the cannon's first row
fn has_landed(enemies: &[Enemy], player_row: u16) -> bool {
    enemies.iter().any(|e| {
        let (_, row) = screen_cell(e.position);
        row + e.tier().get_height() > player_row
    })
}

/// Values the core pushes to the HUD
#[derive(Debug, Default)]
struct Hud {
    score: u32,
    is_hi_score: bool,
    lives: u32,
}

impl Scoreboard for Hud {
    fn update_score(&mut self, score: u32, is_hi_score: bool) {
        self.score = score;
        self.is_hi_score = is_hi_score;
    }

    fn update_player_lives(&mut self, lives: u32) {
        self.lives = lives;
    }
}

/// Projectiles in flight; swept whenever the player goes down
#[derive(Debug, Default)]
struct Battlefield {
    projectiles: Vec<Projectile>,
}

impl GameStateListener for Battlefield {
    fn on_game_state_changed(&mut self, from: GameState, to: GameState) {
        if to == GameState::MainMenu || (from.can_start() && to == GameState::Playing) {
            self.projectiles.clear();
        }
    }

    fn on_clear_hazards(&mut self) {
        self.projectiles.clear();
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    manager: GameManager,
    state: StateHandle,
    player: Rc<RefCell<Player>>,
    hud: Rc<RefCell<Hud>>,
    battlefield: Rc<RefCell<Battlefield>>,
    /// Playfield size inside the side borders
    field_width: u16,
    field_height: u16,
    edge_width: u16,
    frame_count: u64,
    wave_delay_frames: u64,
    last_frame_time: Instant,
    fps: u32,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio: Rc<AudioManager>,
}

impl App {
    /// Build the game for a terminal of the given size. The playfield, and
    /// with it the level bounds, is fixed from here on.
    pub fn new(screen_width: u16, screen_height: u16) -> Self {
        let field = screen_width.saturating_sub(2).min(120);
        let edge_width = screen_width.saturating_sub(field) / 2;
        let game_area = GameRenderer::game_area(
            Rect::new(0, 0, screen_width, screen_height),
            edge_width,
        );
        let field_width = game_area.width;
        let field_height = game_area.height;

        let enemy_width = EnemyTier::Easy.get_width();
        let player = Rc::new(RefCell::new(Player::new(0, 0)));
        let spawn_column = (field_width / 2).saturating_sub(player.borrow().get_width() / 2);
        let player_row = field_height.saturating_sub(4);
        let markers = BoundaryMarkers {
            left_wall: cell_position(0, 0),
            right_wall: cell_position(field_width.saturating_sub(enemy_width + 1), 0),
            top_wall: cell_position(0, 0),
            bottom_wall: cell_position(0, 0),
            far_wall: cell_position(0, 1),
            player_spawn: cell_position(spawn_column, player_row),
        };
        player.borrow_mut().respawn_at(markers.player_spawn);

        // Leave some room to march before the first edge
        let offset_x = ((field_width as f32 - enemy_width as f32 - 12.0) / 10.0).clamp(1.0, 9.0);
        let grid = SpawnGrid::new(
            cell_position(2, GRID_ORIGIN_ROW),
            offset_x,
            ROW_SPACING as f32,
        );
        let formation_config = FormationConfig {
            max_rows: fitting_rows(player_row),
            ..FormationConfig::default()
        };

        let audio = Rc::new(AudioManager::new());
        info!("formation depth {} rows", formation_config.max_rows);
        let formation = FormationEngine::new(
            formation_config,
            EnemyPool::new(PoolConfig::default()),
            Box::new(grid),
            Box::new(MarchCue::new(audio.clone())),
        );

        let hi_score_path =
            std::env::var(HISCORE_ENV).unwrap_or_else(|_| "hiscore.txt".to_string());
        let hud = Rc::new(RefCell::new(Hud::default()));
        let services = GameServices {
            scoreboard: hud.clone(),
            hi_scores: Box::new(FileHiScoreStore::new(hi_score_path)),
            levels: Box::new(LevelTable::classic()),
            player: player.clone(),
        };

        let mut manager = GameManager::new(GameConfig::default(), formation, &markers, services);
        let battlefield = Rc::new(RefCell::new(Battlefield::default()));
        manager.add_listener(battlefield.clone());
        info!(
            "playfield {}x{}, bounds {:?}",
            field_width,
            field_height,
            manager.bounds()
        );

        Self {
            running: true,
            state: manager.state_handle(),
            manager,
            player,
            hud,
            battlefield,
            field_width,
            field_height,
            edge_width,
            frame_count: 0,
            wave_delay_frames: WAVE_DELAY_FRAMES,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            terminal.draw(|frame| {
                let player = self.player.borrow();
                let hud = self.hud.borrow();
                let battlefield = self.battlefield.borrow();
                let formation = self.manager.formation();
                let view = RenderView {
                    game_state: self.state.get(),
                    player: &player,
                    enemies: formation.enemies(),
                    projectiles: &battlefield.projectiles,
                    score: hud.score,
                    hi_score: self.manager.hi_score(),
                    is_hi_score: hud.is_hi_score,
                    lives: hud.lives,
                    level: self.manager.level(),
                    level_name: self.manager.level_name(),
                    march_interval: formation.march_interval(),
                    revival_remaining: self.manager.revival().remaining(),
                    frame_count: self.frame_count,
                    area: frame.area(),
                    edge_width: self.edge_width,
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.state.get())?;
            let actions = self.input_manager.get_actions(self.state.get());
            self.process_actions(&actions);

            self.update(frame_time);

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Start => {
                    self.player
                        .borrow_mut()
                        .respawn_at(self.manager.player_spawn());
                    self.wave_delay_frames = WAVE_DELAY_FRAMES;
                    self.manager.start_game();
                }
                InputAction::Pause => self.manager.pause(),
                InputAction::Resume => self.manager.resume(),
                InputAction::TitleScreen => self.manager.back_to_title_screen(),
                InputAction::MoveLeft => self.player.borrow_mut().move_left(0),
                InputAction::MoveRight => {
                    let mut player = self.player.borrow_mut();
                    let max_x = self.field_width.saturating_sub(player.get_width() + 1);
                    player.move_right(max_x);
                }
                InputAction::Fire => {
                    let shot = self.player.borrow_mut().try_fire();
                    if let Some(shot) = shot {
                        self.audio.play_fire_sound();
                        self.battlefield.borrow_mut().projectiles.push(shot);
                    }
                }
            }
        }
    }

    fn update(&mut self, elapsed: Duration) {
        self.frame_count += 1;

        let time = if self.state.get() == GameState::Paused {
            FrameTime::frozen(elapsed)
        } else {
            FrameTime::uniform(elapsed)
        };
        let report = self.manager.tick(time);
        if let Some(step) = report.step {
            self.march(step);
        }

        if self.state.get() != GameState::Playing {
            return;
        }

        self.player.borrow_mut().update();
        self.update_projectiles();
        self.resolve_hits();

        if self.state.get() == GameState::Playing && self.manager.formation().live_count() == 0 {
            if self.wave_delay_frames > 0 {
                self.wave_delay_frames -= 1;
            } else {
                self.manager.spawn_next_wave();
                self.wave_delay_frames = WAVE_DELAY_FRAMES;
            }
        }
    }

    /// Move every enemy for one formation step, then run the edge and
    /// landing sensors against the new positions.
    fn march(&mut self, step: lockstep_invaders::Direction) {
        let formation = self.manager.formation_mut();
        for enemy in formation.enemies_mut() {
            enemy.march(step, MARCH_STRIDE, MARCH_DESCENT);
        }

        let bounds = *self.manager.bounds();
        let enemies = self.manager.formation().enemies();
        let touching_wall = enemies
            .iter()
            .any(|e| e.position.x <= bounds.left || e.position.x >= bounds.right);
        let landed = has_landed(enemies, self.player.borrow().y);

        // Pick a random shooter from the front of the formation
        let shooter = if !enemies.is_empty() && rand::rng().random_bool(0.3) {
            let enemy = &enemies[rand::rng().random_range(0..enemies.len())];
            let (x, y) = screen_cell(enemy.position);
            Some(Projectile::new(
                x + enemy.tier().get_width() / 2,
                y + enemy.tier().get_height(),
                ProjectileOwner::Enemy,
            ))
        } else {
            None
        };
        if let Some(shot) = shooter {
            self.battlefield.borrow_mut().projectiles.push(shot);
        }

        if step.is_lateral() && touching_wall {
            self.manager.edge_reached();
        }
        if landed {
            self.manager.formation_landed();
        }
    }

    fn update_projectiles(&mut self) {
        let mut battlefield = self.battlefield.borrow_mut();
        for projectile in &mut battlefield.projectiles {
            projectile.update();
        }
        let (max_x, max_y) = (self.field_width, self.field_height);
        battlefield
            .projectiles
            .retain(|p| !p.is_out_of_bounds(max_x, max_y));
    }

    fn resolve_hits(&mut self) {
        let mut killed: Vec<EnemyId> = Vec::new();
        let mut player_hit = false;
        {
            let mut battlefield = self.battlefield.borrow_mut();
            let player = self.player.borrow();
            let enemies = self.manager.formation().enemies();

            battlefield.projectiles.retain(|projectile| match projectile.owner {
                ProjectileOwner::Player => {
                    let target = enemies.iter().find(|e| {
                        let (x, y) = screen_cell(e.position);
                        projectile.x >= x
                            && projectile.x < x + e.tier().get_width()
                            && projectile.y >= y
                            && projectile.y < y + e.tier().get_height()
                            && !killed.contains(&e.id())
                    });
                    match target {
                        Some(enemy) => {
                            killed.push(enemy.id());
                            false
                        }
                        None => true,
                    }
                }
                ProjectileOwner::Enemy => {
                    if player.is_hit_by(projectile) {
                        player_hit = true;
                        false
                    } else {
                        true
                    }
                }
            });
        }

        for id in killed {
            self.manager.enemy_killed(id);
        }
        if player_hit {
            self.manager.player_died();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_invaders::{Direction, Vec3};

    fn enemy_at_row(pool: &mut EnemyPool, row: u16) -> Enemy {
        let mut enemy = pool.acquire(EnemyTier::Easy).unwrap();
        enemy.init(cell_position(10, row), (255, 255, 255));
        enemy
    }

    #[test]
    fn test_landing_needs_overlap_with_cannon() {
        let mut pool = EnemyPool::new(PoolConfig::default());
        // Sprite rows 17..=19 sit just above a cannon on row 20
        let above = vec![enemy_at_row(&mut pool, 17)];
        assert!(!has_landed(&above, 20));

        let touching = vec![enemy_at_row(&mut pool, 18)];
        assert!(has_landed(&touching, 20));
    }

    #[test]
    fn test_fitting_rows_scales_with_height() {
        assert_eq!(fitting_rows(20), 4);
        assert_eq!(fitting_rows(60), FormationConfig::default().max_rows);
        assert_eq!(fitting_rows(3), 2);
    }

    #[test]
    fn test_standard_terminal_survives_first_steps() {
        let mut app = App::new(80, 24);
        app.manager.start_game();
        assert!(app.manager.formation().live_count() > 0);

        let player_row = app.player.borrow().y;
        assert!(!has_landed(app.manager.formation().enemies(), player_row));

        let before: Vec<Vec3> = app
            .manager
            .formation()
            .enemies()
            .iter()
            .map(|e| e.position)
            .collect();
        app.march(Direction::Right);
        app.march(Direction::Descend);

        assert_eq!(app.manager.state(), GameState::Playing);
        let after = app.manager.formation().enemies();
        assert_eq!(after[0].position.x, before[0].x + MARCH_STRIDE);
        assert_eq!(after[0].position.z, before[0].z - MARCH_DESCENT);
    }
}
