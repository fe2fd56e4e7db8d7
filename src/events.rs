use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;

use crate::entities::{Direction, GameState};

/// Receives formation events, dispatched synchronously from the engine
pub trait FormationListener {
    fn on_direction_step(&mut self, _direction: Direction) {}
    fn on_enemy_killed(&mut self, _points: u32) {}
    fn on_wave_complete(&mut self) {}
}

/// Receives game state changes.
///
/// `on_game_state_changed` runs before the new state is stored, so a
/// [`StateHandle`] read inside the callback still returns `from`.
pub trait GameStateListener {
    fn on_game_state_changed(&mut self, from: GameState, to: GameState);

    /// Player died with lives left; projectiles and other hazards should go
    fn on_clear_hazards(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registration-ordered list of shared subscribers
pub struct ObserverList<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Rc<RefCell<T>>)>,
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: Rc<RefCell<T>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if the id was never registered or already removed
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&self, mut f: impl FnMut(&mut T)) {
        for (id, listener) in &self.entries {
            match listener.try_borrow_mut() {
                Ok(mut guard) => f(&mut *guard),
                // Re-entrant dispatch into a listener that is mid-callback
                Err(_) => warn!("listener {:?} is busy, event skipped", id),
            }
        }
    }
}

/// Read-only view onto the current game state, shareable with listeners
#[derive(Debug, Clone, Default)]
pub struct StateHandle(Rc<Cell<GameState>>);

impl StateHandle {
    pub fn new(state: GameState) -> Self {
        Self(Rc::new(Cell::new(state)))
    }

    pub fn get(&self) -> GameState {
        self.0.get()
    }

    pub(crate) fn set(&self, state: GameState) {
        self.0.set(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Tally {
        fn bump(&mut self, by: u32);
    }

    struct Counter {
        log: Rc<RefCell<Vec<(&'static str, u32)>>>,
        name: &'static str,
    }

    impl Tally for Counter {
        fn bump(&mut self, by: u32) {
            self.log.borrow_mut().push((self.name, by));
        }
    }

    #[test]
    fn test_notify_runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list: ObserverList<dyn Tally> = ObserverList::new();
        for name in ["a", "b", "c"] {
            let counter = Rc::new(RefCell::new(Counter {
                log: log.clone(),
                name,
            }));
            list.add(counter);
        }

        list.notify(|l| l.bump(7));

        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7), ("c", 7)]);
    }

    #[test]
    fn test_removed_listener_stops_receiving() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list: ObserverList<dyn Tally> = ObserverList::new();
        let first = list.add(Rc::new(RefCell::new(Counter {
            log: log.clone(),
            name: "first",
        })));
        list.add(Rc::new(RefCell::new(Counter {
            log: log.clone(),
            name: "second",
        })));

        assert!(list.remove(first));
        assert!(!list.remove(first));
        list.notify(|l| l.bump(1));

        assert_eq!(*log.borrow(), vec![("second", 1)]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_busy_listener_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let counter = Rc::new(RefCell::new(Counter {
            log: log.clone(),
            name: "busy",
        }));
        let mut list: ObserverList<dyn Tally> = ObserverList::new();
        list.add(counter.clone());

        let _held = counter.borrow_mut();
        list.notify(|l| l.bump(1));

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_state_handle_is_shared() {
        let handle = StateHandle::new(GameState::MainMenu);
        let view = handle.clone();
        handle.set(GameState::Playing);
        assert_eq!(view.get(), GameState::Playing);
    }
}
