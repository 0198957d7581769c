// Shared counters and flags mutated by the frame loop, observers and background tasks.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Each field is independently atomic; no cross-field consistency is promised.
#[derive(Debug)]
pub struct GameState {
    lives: AtomicI32,
    level: AtomicU32,
    score: AtomicU64,
    paused: AtomicBool,
    over: AtomicBool,
    debug: bool,
    /// Set while a level start is in flight so one clear starts one level.
    level_transition: AtomicBool,
    banner: Mutex<Option<String>>,
}

impl GameState {
    pub fn new(starting_lives: i32, debug: bool) -> Self {
        Self {
            lives: AtomicI32::new(starting_lives),
            level: AtomicU32::new(0),
            score: AtomicU64::new(0),
            paused: AtomicBool::new(false),
            over: AtomicBool::new(false),
            debug,
            level_transition: AtomicBool::new(false),
            banner: Mutex::new(None),
        }
    }

    pub fn lives(&self) -> i32 {
        self.lives.load(Ordering::SeqCst)
    }

    /// Takes a life, never going below zero, and returns what is left.
    pub fn lose_life(&self) -> i32 {
        let previous = self
            .lives
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |lives| {
                Some((lives - 1).max(0))
            })
            .unwrap_or_default();
        (previous - 1).max(0)
    }

    /// Grants a life unless already at `max`; returns the new count when granted.
    pub fn grant_life(&self, max: i32) -> Option<i32> {
        self.lives
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |lives| {
                (lives < max).then_some(lives + 1)
            })
            .ok()
            .map(|previous| previous + 1)
    }

    pub fn level(&self) -> u32 {
        self.level.load(Ordering::SeqCst)
    }

    /// Moves to the next level and returns its number.
    pub fn next_level(&self) -> u32 {
        self.level.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn score(&self) -> u64 {
        self.score.load(Ordering::SeqCst)
    }

    /// Adds points and returns the score before and after.
    pub fn add_points(&self, points: u64) -> (u64, u64) {
        let before = self.score.fetch_add(points, Ordering::SeqCst);
        (before, before + points)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_over(&self) -> bool {
        self.over.load(Ordering::SeqCst)
    }

    /// Marks the game over; true only for the call that made the change.
    pub fn set_over(&self) -> bool {
        !self.over.swap(true, Ordering::SeqCst)
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn try_begin_level_transition(&self) -> bool {
        self.level_transition
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn finish_level_transition(&self) {
        self.level_transition.store(false, Ordering::SeqCst);
    }

    pub fn banner(&self) -> Option<String> {
        self.banner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_banner(&self, text: Option<String>) {
        *self.banner.lock().unwrap_or_else(PoisonError::into_inner) = text;
    }

    /// Clears the banner only if it still shows `text`.
    pub fn clear_banner(&self, text: &str) {
        let mut banner = self.banner.lock().unwrap_or_else(PoisonError::into_inner);
        if banner.as_deref() == Some(text) {
            *banner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_lives_run_out_then_they_stay_at_zero() {
        let state = GameState::new(1, false);

        assert_eq!(state.lose_life(), 0);
        assert_eq!(state.lose_life(), 0);
        assert_eq!(state.lives(), 0);
    }

    #[test]
    fn when_lives_are_at_the_cap_then_no_life_is_granted() {
        let state = GameState::new(19, false);

        assert_eq!(state.grant_life(20), Some(20));
        assert_eq!(state.grant_life(20), None);
        assert_eq!(state.lives(), 20);
    }

    #[test]
    fn when_level_transition_is_in_flight_then_a_second_one_is_refused() {
        let state = GameState::new(3, false);

        assert!(state.try_begin_level_transition());
        assert!(!state.try_begin_level_transition());
        state.finish_level_transition();
        assert!(state.try_begin_level_transition());
    }

    #[test]
    fn when_toggling_pause_then_the_new_value_is_returned() {
        let state = GameState::new(3, false);

        assert!(state.toggle_pause());
        assert!(state.is_paused());
        assert!(!state.toggle_pause());
    }

    #[test]
    fn when_game_ends_twice_then_only_the_first_call_reports_it() {
        let state = GameState::new(3, false);

        assert!(state.set_over());
        assert!(!state.set_over());
        assert!(state.is_over());
    }
}
