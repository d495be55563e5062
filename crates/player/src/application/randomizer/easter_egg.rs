//! NOPE easter egg.
//!
//! Late in a roll, with a small chance per frame, the animation is hijacked
//! for a few decoy frames before handing back to the regular sequence. It
//! fires at most once per session and never changes the winner.

use lunchroll_domain::Restaurant;
use rand::{Rng, RngCore};

/// Decoy frames shown once the egg fires.
pub const NOPE_FRAMES: u32 = 3;

/// Bernoulli gate with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChanceGate {
    chance: f64,
}

impl ChanceGate {
    pub fn new(chance: f64) -> Self {
        Self {
            chance: chance.clamp(0.0, 1.0),
        }
    }

    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub fn open(&self, rng: &mut dyn RngCore) -> bool {
        rng.gen::<f64>() < self.chance
    }
}

/// Eligibility window: the last `ceil(max_rolls / 2)` rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    window: u32,
}

impl Countdown {
    pub fn new(max_rolls: u32) -> Self {
        Self {
            window: max_rolls.div_ceil(2),
        }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn reached(&self, rolls_remaining: u32) -> bool {
        rolls_remaining <= self.window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EggState {
    Armed,
    Active,
    Spent,
}

#[derive(Debug, Clone)]
pub struct EasterEggTrigger {
    gate: ChanceGate,
    countdown: Countdown,
    state: EggState,
}

impl EasterEggTrigger {
    pub fn new(chance: f64, max_rolls: u32) -> Self {
        Self {
            gate: ChanceGate::new(chance),
            countdown: Countdown::new(max_rolls),
            state: EggState::Armed,
        }
    }

    /// Ready the egg for a new session.
    pub fn rearm(&mut self) {
        self.state = EggState::Armed;
    }

    /// Consulted once per regular frame. Returns true when the egg takes over.
    ///
    /// Needs at least two candidates to have something to decoy with, and
    /// at least one roll left to hand back to.
    pub fn update_and_try_trigger(
        &mut self,
        rng: &mut dyn RngCore,
        candidates: &[Restaurant],
        rolls_remaining: u32,
    ) -> bool {
        let eligible = self.state == EggState::Armed
            && candidates.len() >= 2
            && rolls_remaining > 0
            && self.countdown.reached(rolls_remaining);
        if !eligible || !self.gate.open(rng) {
            return false;
        }

        self.state = EggState::Active;
        tracing::info!(rolls_remaining, "NOPE easter egg triggered");
        true
    }

    /// A candidate index other than `showing`.
    pub fn pick_decoy(
        &self,
        rng: &mut dyn RngCore,
        candidate_count: usize,
        showing: usize,
    ) -> usize {
        if candidate_count < 2 {
            return showing;
        }
        (showing + rng.gen_range(1..candidate_count)) % candidate_count
    }

    /// The decoy frames are done; back to the regular roll.
    pub fn resolve(&mut self) {
        if self.state == EggState::Active {
            self.state = EggState::Spent;
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == EggState::Active
    }

    pub fn has_fired(&self) -> bool {
        self.state != EggState::Armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidates(n: usize) -> Vec<Restaurant> {
        (0..n)
            .map(|i| Restaurant::new(i.to_string(), format!("R{}", i)))
            .collect()
    }

    #[test]
    fn countdown_window_is_half_rounded_up() {
        assert_eq!(Countdown::new(35).window(), 18);
        assert_eq!(Countdown::new(10).window(), 5);
        assert!(Countdown::new(10).reached(5));
        assert!(!Countdown::new(10).reached(6));
    }

    #[test]
    fn zero_chance_never_fires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut egg = EasterEggTrigger::new(0.0, 10);
        for remaining in (0..=10).rev() {
            assert!(!egg.update_and_try_trigger(&mut rng, &candidates(3), remaining));
        }
        assert!(!egg.has_fired());
    }

    #[test]
    fn certain_chance_fires_once_inside_the_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut egg = EasterEggTrigger::new(1.0, 10);

        assert!(!egg.update_and_try_trigger(&mut rng, &candidates(3), 6));
        assert!(egg.update_and_try_trigger(&mut rng, &candidates(3), 5));
        assert!(egg.is_active());

        egg.resolve();
        assert!(!egg.is_active());
        assert!(!egg.update_and_try_trigger(&mut rng, &candidates(3), 4));

        egg.rearm();
        assert!(egg.update_and_try_trigger(&mut rng, &candidates(3), 4));
    }

    #[test]
    fn needs_company_and_a_roll_to_return_to() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut egg = EasterEggTrigger::new(1.0, 10);
        assert!(!egg.update_and_try_trigger(&mut rng, &candidates(1), 3));
        assert!(!egg.update_and_try_trigger(&mut rng, &candidates(3), 0));
    }

    #[test]
    fn decoys_differ_from_the_current_frame() {
        let mut rng = StdRng::seed_from_u64(9);
        let egg = EasterEggTrigger::new(1.0, 10);
        for showing in 0..4 {
            for _ in 0..50 {
                let decoy = egg.pick_decoy(&mut rng, 4, showing);
                assert_ne!(decoy, showing);
                assert!(decoy < 4);
            }
        }
    }
}
