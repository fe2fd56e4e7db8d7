#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    /// Player is down and the revival timer is running
    Waiting,
    Victory,
    GameOver,
}

impl GameState {
    /// States a new game may be started from
    pub fn can_start(self) -> bool {
        matches!(
            self,
            GameState::MainMenu | GameState::Victory | GameState::GameOver
        )
    }

    pub fn is_finished(self) -> bool {
        matches!(self, GameState::Victory | GameState::GameOver)
    }
}
