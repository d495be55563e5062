//! Roll session state and the snapshot published to observers.

use std::fmt;

use lunchroll_domain::{Filter, Restaurant, SessionId};
use serde::Serialize;

/// Whether frames come from the regular roll or the NOPE easter egg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    Normal,
    EasterEgg,
}

/// Lifecycle of the randomizer.
///
/// `Idle -> Loading -> Rolling -> Settled -> Approved`. A failed fetch lands in
/// `Errored`; `Settled` and `Errored` may start over, `Approved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "mode", rename_all = "snake_case")]
pub enum RollPhase {
    #[default]
    Idle,
    Loading,
    Rolling(RollMode),
    Settled,
    Approved,
    Errored,
}

impl RollPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Rolling(RollMode::Normal) => "rolling",
            Self::Rolling(RollMode::EasterEgg) => "rolling (nope)",
            Self::Settled => "settled",
            Self::Approved => "approved",
            Self::Errored => "errored",
        }
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self, Self::Rolling(_))
    }

    /// A roll is in flight: fetching or animating.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Rolling(_))
    }

    pub fn has_result(&self) -> bool {
        matches!(self, Self::Settled | Self::Approved)
    }
}

impl fmt::Display for RollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a pending timer resumes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Show frame `roll` of the regular sequence
    Roll { roll: u32 },
    /// Show a decoy while `frames_left > 0`, else resume at `resume_roll + 1`
    Nope { resume_roll: u32, frames_left: u32 },
}

/// A continuation bound to the session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub session: SessionId,
    pub continuation: Continuation,
}

impl ScheduledStep {
    pub fn roll(session: SessionId, roll: u32) -> Self {
        Self {
            session,
            continuation: Continuation::Roll { roll },
        }
    }

    pub fn nope(session: SessionId, resume_roll: u32, frames_left: u32) -> Self {
        Self {
            session,
            continuation: Continuation::Nope {
                resume_roll,
                frames_left,
            },
        }
    }
}

/// One roll over a fixed, shuffled candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct RollSession {
    pub id: SessionId,
    /// Shuffled once on load, immutable afterwards
    candidates: Vec<Restaurant>,
    selected_index: usize,
    /// Last regular frame shown
    pub current_roll: u32,
    displayed_index: Option<usize>,
    /// Frames shown so far, decoys included
    pub frames: u32,
}

impl RollSession {
    /// `candidates` must be non-empty and already shuffled. The winner is
    /// fixed here: the frame at `max_rolls` lands on it.
    pub fn new(id: SessionId, candidates: Vec<Restaurant>, max_rolls: u32) -> Self {
        let selected_index = (max_rolls as usize) % candidates.len().max(1);
        Self {
            id,
            candidates,
            selected_index,
            current_roll: 0,
            displayed_index: None,
            frames: 0,
        }
    }

    pub fn candidates(&self) -> &[Restaurant] {
        &self.candidates
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Restaurant> {
        self.candidates.get(self.selected_index)
    }

    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed_index
    }

    pub fn displayed(&self) -> Option<&Restaurant> {
        self.displayed_index.and_then(|i| self.candidates.get(i))
    }

    /// Show regular frame `roll`.
    pub fn show_roll(&mut self, roll: u32) {
        self.current_roll = roll;
        self.show_index(roll as usize % self.candidates.len().max(1));
    }

    /// Show the winner outright, skipping the animation.
    pub fn show_selected(&mut self, max_rolls: u32) {
        self.current_roll = max_rolls;
        self.show_index(self.selected_index);
    }

    pub fn show_index(&mut self, index: usize) {
        self.displayed_index = Some(index);
        self.frames += 1;
    }
}

/// Read-only view of the randomizer, published after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollSnapshot {
    pub session_id: Option<SessionId>,
    pub phase: RollPhase,
    /// Candidate currently on screen
    pub displayed: Option<Restaurant>,
    /// The winner, once settled
    pub result: Option<Restaurant>,
    pub rolls_remaining: u32,
    pub max_rolls: u32,
    pub frames: u32,
    pub easter_egg_active: bool,
    /// Message for a failed fetch
    pub error: Option<String>,
    pub filter: Filter,
}

impl RollSnapshot {
    pub fn idle(max_rolls: u32, filter: Filter) -> Self {
        Self {
            session_id: None,
            phase: RollPhase::Idle,
            displayed: None,
            result: None,
            rolls_remaining: max_rolls,
            max_rolls,
            frames: 0,
            easter_egg_active: false,
            error: None,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(n: usize) -> Vec<Restaurant> {
        (0..n)
            .map(|i| Restaurant::new(i.to_string(), format!("R{}", i)))
            .collect()
    }

    #[test]
    fn winner_is_fixed_by_max_rolls() {
        let session = RollSession::new(SessionId::new(), candidates(3), 10);
        assert_eq!(session.selected_index(), 1);
        assert_eq!(session.selected().map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn frames_cycle_through_candidates() {
        let mut session = RollSession::new(SessionId::new(), candidates(3), 10);
        assert!(session.displayed().is_none());

        for roll in 0..=10 {
            session.show_roll(roll);
        }
        assert_eq!(session.frames, 11);
        assert_eq!(session.displayed_index(), Some(session.selected_index()));
    }

    #[test]
    fn phase_predicates() {
        assert!(RollPhase::Loading.is_busy());
        assert!(RollPhase::Rolling(RollMode::EasterEgg).is_rolling());
        assert!(!RollPhase::Errored.is_busy());
        assert!(RollPhase::Approved.has_result());
        assert_eq!(RollPhase::Settled.to_string(), "settled");
    }
}
