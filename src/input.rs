use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GameState;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
    Pause,
    Resume,
    TitleScreen,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into game actions
#[derive(Default)]
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    /// Maps a key press to the one-shot action valid in `game_state`
    pub fn oneshot_for(key_event: KeyEvent, game_state: GameState) -> Option<InputAction> {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            return Some(InputAction::Quit);
        }

        let pause_key = matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P'));
        let title_key = matches!(key_event.code, KeyCode::Char('t') | KeyCode::Char('T'));
        match game_state {
            GameState::Playing if pause_key => Some(InputAction::Pause),
            GameState::Paused if pause_key => Some(InputAction::Resume),
            state if state.can_start() && key_event.code == KeyCode::Enter => {
                Some(InputAction::Start)
            }
            GameState::MainMenu => None,
            _ if title_key => Some(InputAction::TitleScreen),
            _ => None,
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        if let Some(action) = Self::oneshot_for(key_event, game_state) {
            self.oneshot_actions.push(action);
            return;
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: GameState) -> Vec<InputAction> {
        let mut actions = self.oneshot_actions.clone();

        // Held keys only steer the cannon during play
        if game_state == GameState::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_works_in_every_state() {
        for state in [GameState::MainMenu, GameState::Playing, GameState::Waiting] {
            assert_eq!(
                InputManager::oneshot_for(press(KeyCode::Esc), state),
                Some(InputAction::Quit)
            );
        }
    }

    #[test]
    fn test_pause_key_toggles_by_state() {
        let key = press(KeyCode::Char('p'));
        assert_eq!(
            InputManager::oneshot_for(key, GameState::Playing),
            Some(InputAction::Pause)
        );
        assert_eq!(
            InputManager::oneshot_for(key, GameState::Paused),
            Some(InputAction::Resume)
        );
        assert_eq!(InputManager::oneshot_for(key, GameState::Waiting), None);
    }

    #[test]
    fn test_enter_starts_only_outside_a_match() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            InputManager::oneshot_for(enter, GameState::MainMenu),
            Some(InputAction::Start)
        );
        assert_eq!(
            InputManager::oneshot_for(enter, GameState::GameOver),
            Some(InputAction::Start)
        );
        assert_eq!(InputManager::oneshot_for(enter, GameState::Playing), None);
    }

    #[test]
    fn test_title_key_ignored_on_title_screen() {
        let key = press(KeyCode::Char('t'));
        assert_eq!(InputManager::oneshot_for(key, GameState::MainMenu), None);
        assert_eq!(
            InputManager::oneshot_for(key, GameState::Victory),
            Some(InputAction::TitleScreen)
        );
    }

    #[test]
    fn test_held_keys_only_emit_while_playing() {
        let mut input = InputManager::new();
        input.handle_key_event(press(KeyCode::Left), GameState::Playing);
        input.handle_key_event(press(KeyCode::Char(' ')), GameState::Playing);

        assert_eq!(
            input.get_actions(GameState::Playing),
            vec![InputAction::MoveLeft, InputAction::Fire]
        );
        assert!(input.get_actions(GameState::Paused).is_empty());
    }
}
