mod revival;

pub use revival::RevivalSequencer;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::entities::{Direction, EnemyId, FormationEngine, GameState, KillReport};
use crate::events::{GameStateListener, ListenerId, ObserverList, StateHandle};
use crate::geometry::{BoundaryMarkers, LevelBounds, Vec3};
use crate::services::{HiScoreStore, LevelDatabase, PlayerRig, Scoreboard};

/// Collaborators the game manager talks to
pub struct GameServices {
    pub scoreboard: Rc<RefCell<dyn Scoreboard>>,
    pub hi_scores: Box<dyn HiScoreStore>,
    pub levels: Box<dyn LevelDatabase>,
    pub player: Rc<RefCell<dyn PlayerRig>>,
}

/// Time elapsed this frame. `delta` is gameplay time (frozen while paused),
/// `unscaled` is wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    pub delta: f32,
    pub unscaled: Duration,
}

impl FrameTime {
    pub fn uniform(elapsed: Duration) -> Self {
        Self {
            delta: elapsed.as_secs_f32(),
            unscaled: elapsed,
        }
    }

    /// Gameplay time stopped, wall clock still running
    pub fn frozen(elapsed: Duration) -> Self {
        Self {
            delta: 0.0,
            unscaled: elapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Formation step taken this frame
    pub step: Option<Direction>,
    /// The revival finished and play resumed this frame
    pub revived: bool,
}

/// Owns score, level, lives and the game state, and drives the formation.
///
/// State writes are broadcast to listeners before they are stored.
pub struct GameManager {
    config: GameConfig,
    state: StateHandle,
    listeners: ObserverList<dyn GameStateListener>,
    formation: FormationEngine,
    revival: RevivalSequencer,
    bounds: LevelBounds,
    player_spawn: Vec3,
    score: u32,
    stored_hi_score: u32,
    level: usize,
    lives: u32,
    scoreboard: Rc<RefCell<dyn Scoreboard>>,
    hi_scores: Box<dyn HiScoreStore>,
    levels: Box<dyn LevelDatabase>,
    player: Rc<RefCell<dyn PlayerRig>>,
}

impl GameManager {
    pub fn new(
        config: GameConfig,
        mut formation: FormationEngine,
        markers: &BoundaryMarkers,
        mut services: GameServices,
    ) -> Self {
        formation.init();
        let stored_hi_score = services.hi_scores.load_hi_score();
        info!("loaded hi-score {}", stored_hi_score);

        Self {
            state: StateHandle::new(GameState::MainMenu),
            listeners: ObserverList::new(),
            formation,
            revival: RevivalSequencer::new(),
            bounds: LevelBounds::from_markers(markers),
            player_spawn: markers.player_spawn,
            score: 0,
            stored_hi_score,
            level: config.starting_level,
            lives: config.starting_lives,
            config,
            scoreboard: services.scoreboard,
            hi_scores: services.hi_scores,
            levels: services.levels,
            player: services.player,
        }
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state.get();
        if from == to {
            debug!("game state already {:?}", to);
            return;
        }
        if (to.is_finished() || to == GameState::MainMenu) && self.revival.cancel() {
            info!("pending revival cancelled by {:?}", to);
        }
        info!("game state {:?} -> {:?}", from, to);
        self.listeners
            .notify(|l| l.on_game_state_changed(from, to));
        self.state.set(to);
    }

    fn publish_score(&mut self) {
        let is_hi_score = self.is_hi_score();
        match self.scoreboard.try_borrow_mut() {
            Ok(mut scoreboard) => scoreboard.update_score(self.score, is_hi_score),
            Err(_) => warn!("scoreboard busy, score {} not shown", self.score),
        }
    }

    fn publish_lives(&mut self) {
        match self.scoreboard.try_borrow_mut() {
            Ok(mut scoreboard) => scoreboard.update_player_lives(self.lives),
            Err(_) => warn!("scoreboard busy, lives {} not shown", self.lives),
        }
    }

    /// Begin a fresh match from the title screen or an end screen
    pub fn start_game(&mut self) {
        let state = self.state.get();
        if !state.can_start() {
            warn!("start_game ignored in {:?}", state);
            return;
        }

        self.score = 0;
        self.level = self.config.starting_level;
        self.lives = self.config.starting_lives;
        self.formation.re_init();
        self.set_state(GameState::Playing);
        self.formation.spawn_wave(self.level);
        self.publish_score();
        self.publish_lives();
    }

    pub fn pause(&mut self) {
        match self.state.get() {
            GameState::Playing => self.set_state(GameState::Paused),
            other => warn!("pause ignored in {:?}", other),
        }
    }

    pub fn resume(&mut self) {
        match self.state.get() {
            GameState::Paused => self.set_state(GameState::Playing),
            other => warn!("resume ignored in {:?}", other),
        }
    }

    /// Abandon whatever is happening and return to the menu
    pub fn back_to_title_screen(&mut self) {
        self.set_state(GameState::MainMenu);
        self.score = 0;
        self.formation.re_init();
        self.publish_score();
    }

    /// Persist the hi-score if this match beat it
    pub fn end_game(&mut self) {
        let state = self.state.get();
        if !state.is_finished() {
            warn!("end_game ignored in {:?}", state);
            return;
        }
        if self.score > self.stored_hi_score {
            info!("new hi-score {} (was {})", self.score, self.stored_hi_score);
            self.hi_scores.save_hi_score(self.score);
            self.stored_hi_score = self.score;
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        self.publish_score();
    }

    /// Advance past a cleared wave, or win if there are no levels left.
    /// The next wave is spawned separately with [`GameManager::spawn_next_wave`].
    pub fn next_level(&mut self) {
        let state = self.state.get();
        if state != GameState::Playing {
            warn!("next_level ignored in {:?}", state);
            return;
        }

        self.level += 1;
        if self.level >= self.levels.count() {
            info!("level {} is past the last level, victory", self.level);
            self.set_state(GameState::Victory);
            self.end_game();
            return;
        }
        info!("advancing to level {}", self.level);
        self.formation.re_init();
    }

    /// Spawn the wave for the current level onto an empty formation. Levels
    /// too deep for the grid have no enemies and are skipped.
    pub fn spawn_next_wave(&mut self) -> usize {
        let state = self.state.get();
        if state != GameState::Playing {
            warn!("spawn_next_wave ignored in {:?}", state);
            return 0;
        }
        if self.formation.live_count() > 0 {
            warn!(
                "spawn_next_wave ignored, {} enemies still live",
                self.formation.live_count()
            );
            return 0;
        }
        while self.level >= self.formation.config().max_rows {
            warn!("level {} has no formation rows, skipping", self.level);
            self.next_level();
            if self.state.get() != GameState::Playing {
                return 0;
            }
        }
        self.formation.spawn_wave(self.level)
    }

    /// Score a kill exactly once; clearing the formation moves to the next level
    pub fn enemy_killed(&mut self, id: EnemyId) -> Option<KillReport> {
        let state = self.state.get();
        if state != GameState::Playing {
            warn!("kill of {:?} ignored in {:?}", id, state);
            return None;
        }

        let report = self.formation.enemy_killed(id)?;
        self.add_score(report.points);
        if report.wave_complete {
            self.next_level();
        }
        Some(report)
    }

    pub fn edge_reached(&mut self) {
        self.formation.edge_reached();
    }

    /// Lose a life. With lives left, play is suspended until the revival
    /// countdown finishes; otherwise the game is over.
    pub fn player_died(&mut self) {
        let state = self.state.get();
        if state != GameState::Playing {
            warn!("player death ignored in {:?}", state);
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.publish_lives();
        if self.lives == 0 {
            self.set_state(GameState::GameOver);
            self.end_game();
            return;
        }

        if let Err(err) = self.revival.trigger(self.config.revival_delay) {
            warn!("player death not handled: {}", err);
            return;
        }
        self.set_state(GameState::Waiting);
        self.listeners.notify(|l| l.on_clear_hazards());
    }

    /// The formation reached the player's line: every life is lost at once
    pub fn formation_landed(&mut self) {
        let state = self.state.get();
        if state != GameState::Playing {
            warn!("formation landing ignored in {:?}", state);
            return;
        }
        self.lives = 0;
        self.publish_lives();
        self.set_state(GameState::GameOver);
        self.end_game();
    }

    /// Advance one frame
    pub fn tick(&mut self, time: FrameTime) -> TickReport {
        let step = self.formation.tick(time.delta, self.state.get());

        let mut revived = false;
        if self.revival.advance(time.unscaled) {
            match self.player.try_borrow_mut() {
                Ok(mut player) => player.respawn_at(self.player_spawn),
                Err(_) => warn!("player busy, respawn position not reset"),
            }
            self.set_state(GameState::Playing);
            revived = true;
        }

        TickReport { step, revived }
    }

    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn GameStateListener>>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn state(&self) -> GameState {
        self.state.get()
    }

    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hi_score(&self) -> u32 {
        self.stored_hi_score.max(self.score)
    }

    pub fn is_hi_score(&self) -> bool {
        self.score > self.stored_hi_score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_name(&self) -> Option<&str> {
        self.levels.get(self.level).map(|l| l.name.as_str())
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn bounds(&self) -> &LevelBounds {
        &self.bounds
    }

    pub fn player_spawn(&self) -> Vec3 {
        self.player_spawn
    }

    pub fn revival(&self) -> &RevivalSequencer {
        &self.revival
    }

    pub fn formation(&self) -> &FormationEngine {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut FormationEngine {
        &mut self.formation
    }
}
