//! Roll sequencer - the randomizer state machine.
//!
//! Synchronous and free of I/O: every command returns the [`Effect`]s the
//! runtime has to carry out (fetch, schedule, sound, counter update). The
//! winner is fixed when candidates arrive, the animation only reveals it.

use std::time::Duration;

use lunchroll_domain::common::shuffle;
use lunchroll_domain::{Filter, Restaurant, RestaurantId, RollPacing, SessionId};
use rand::RngCore;

use super::config::RandomizerConfig;
use super::easter_egg::{EasterEggTrigger, NOPE_FRAMES};
use super::error::RandomizerError;
use super::reconciliation::CounterUpdate;
use super::session::{Continuation, RollMode, RollPhase, RollSession, RollSnapshot, ScheduledStep};
use crate::ports::outbound::{MatchQuery, SoundCue};
use crate::ports::ServiceError;

/// Side effect requested by the sequencer, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch candidates; answer with `candidates_loaded` or `candidates_failed`
    Fetch { session: SessionId, query: MatchQuery },
    /// Arm the step timer, replacing any pending step
    Schedule { delay: Duration, step: ScheduledStep },
    CancelTimer,
    Sound(SoundCue),
    Reconcile(CounterUpdate),
}

pub struct RollSequencer {
    pacing: RollPacing,
    rng: Box<dyn RngCore + Send>,
    egg: EasterEggTrigger,
    phase: RollPhase,
    filter: Filter,
    /// Session waiting on its fetch
    loading: Option<SessionId>,
    session: Option<RollSession>,
    /// Winner fixed by the last loaded session; survives failed rerolls
    previous_selected: Option<RestaurantId>,
    error: Option<String>,
}

impl RollSequencer {
    pub fn new(config: &RandomizerConfig, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            pacing: config.pacing,
            rng,
            egg: EasterEggTrigger::new(config.easter_egg_chance(), config.pacing.max_rolls()),
            phase: RollPhase::Idle,
            filter: Filter::default(),
            loading: None,
            session: None,
            previous_selected: None,
            error: None,
        }
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn session(&self) -> Option<&RollSession> {
        self.session.as_ref()
    }

    /// Begin a new roll with the current filter.
    pub fn start(&mut self) -> Result<Vec<Effect>, RandomizerError> {
        if self.phase.is_busy() || self.phase == RollPhase::Approved {
            return Err(RandomizerError::invalid_transition("start", self.phase.name()));
        }

        let mut effects = vec![Effect::CancelTimer];
        // Rolling again rejects the previous winner, every time until a new one is fixed.
        if let Some(previous) = &self.previous_selected {
            effects.push(Effect::Reconcile(CounterUpdate::not_selected(previous.clone())));
        }
        self.session = None;

        let session = SessionId::new();
        self.filter.hide();
        self.error = None;
        self.phase = RollPhase::Loading;
        self.loading = Some(session);

        tracing::info!(
            session_id = %session,
            match_type = %self.filter.match_type,
            categories = self.filter.categories.len(),
            distance = ?self.filter.distance,
            "Starting roll"
        );
        effects.push(Effect::Fetch {
            session,
            query: MatchQuery::from(&self.filter),
        });
        Ok(effects)
    }

    /// Candidates arrived for `session`.
    pub fn candidates_loaded(
        &mut self,
        session: SessionId,
        candidates: Vec<Restaurant>,
    ) -> Vec<Effect> {
        if !self.take_loading(session) {
            return Vec::new();
        }
        if candidates.is_empty() {
            self.previous_selected = None;
            return self.fail(session, ServiceError::NoMatches);
        }

        let max_rolls = self.pacing.max_rolls();
        let candidates = shuffle(&candidates, &mut *self.rng);
        let mut roll = RollSession::new(session, candidates, max_rolls);
        self.previous_selected = roll.selected().map(|r| r.id.clone());
        self.egg.rearm();

        tracing::debug!(
            session_id = %session,
            candidates = roll.candidates().len(),
            selected_index = roll.selected_index(),
            "Candidates shuffled"
        );

        let effects = if roll.candidates().len() == 1 {
            roll.show_selected(max_rolls);
            self.phase = RollPhase::Settled;
            settle_effects(&roll)
        } else {
            self.phase = RollPhase::Rolling(RollMode::Normal);
            schedule_roll(session, 0, self.pacing.initial_delay())
        };
        self.session = Some(roll);
        effects
    }

    /// Fetching candidates for `session` failed.
    pub fn candidates_failed(&mut self, session: SessionId, error: ServiceError) -> Vec<Effect> {
        if !self.take_loading(session) {
            return Vec::new();
        }
        self.fail(session, error)
    }

    /// The step timer fired.
    pub fn timer_fired(&mut self, step: ScheduledStep) -> Vec<Effect> {
        let live = self.phase.is_rolling()
            && self.session.as_ref().is_some_and(|s| s.id == step.session);
        if !live {
            tracing::debug!(session_id = %step.session, "Ignoring step from a stale session");
            return Vec::new();
        }

        match step.continuation {
            Continuation::Roll { roll } => self.roll_next(roll),
            Continuation::Nope {
                resume_roll,
                frames_left,
            } => self.nope_next(resume_roll, frames_left),
        }
    }

    /// Accept the settled winner.
    pub fn approve(&mut self) -> Result<Vec<Effect>, RandomizerError> {
        if self.phase != RollPhase::Settled {
            return Err(RandomizerError::invalid_transition("approve", self.phase.name()));
        }
        let Some(selected) = self.session.as_ref().and_then(|s| s.selected()) else {
            return Err(RandomizerError::invalid_transition("approve", self.phase.name()));
        };

        tracing::info!(restaurant_id = %selected.id, name = %selected.name, "Result approved");
        let update = CounterUpdate::selected(selected.id.clone());
        self.phase = RollPhase::Approved;
        self.filter.hide();
        Ok(vec![Effect::Reconcile(update)])
    }

    pub fn toggle_filter(&mut self) -> Result<(), RandomizerError> {
        self.ensure_filter_editable("toggle the filter")?;
        self.filter.toggle_visible();
        Ok(())
    }

    /// Replace the filter criteria. Panel visibility is kept.
    pub fn set_filter(&mut self, filter: Filter) -> Result<(), RandomizerError> {
        self.ensure_filter_editable("edit the filter")?;
        self.filter = Filter {
            visible: self.filter.visible,
            ..filter
        };
        Ok(())
    }

    /// Tear down: drop the pending step and any in-flight fetch.
    pub fn dispose(&mut self) -> Vec<Effect> {
        self.loading = None;
        self.egg.resolve();
        if self.phase.is_busy() {
            self.phase = RollPhase::Idle;
            self.session = None;
        }
        vec![Effect::CancelTimer]
    }

    pub fn snapshot(&self) -> RollSnapshot {
        let mut snapshot = RollSnapshot::idle(self.pacing.max_rolls(), self.filter.clone());
        snapshot.phase = self.phase;
        snapshot.error = self.error.clone();
        snapshot.easter_egg_active = self.egg.is_active();
        snapshot.session_id = self.loading.or(self.session.as_ref().map(|s| s.id));

        if let Some(session) = &self.session {
            snapshot.displayed = session.displayed().cloned();
            snapshot.rolls_remaining = self.pacing.rolls_remaining(session.current_roll);
            snapshot.frames = session.frames;
            if self.phase.has_result() {
                snapshot.result = session.selected().cloned();
            }
        }
        snapshot
    }

    fn roll_next(&mut self, roll: u32) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.show_roll(roll);
        let remaining = self.pacing.rolls_remaining(roll);
        tracing::trace!(session_id = %session.id, roll, remaining, "Roll frame");

        if self
            .egg
            .update_and_try_trigger(&mut *self.rng, session.candidates(), remaining)
        {
            self.phase = RollPhase::Rolling(RollMode::EasterEgg);
            return schedule_nope(session.id, roll, NOPE_FRAMES, self.pacing.max_delay());
        }

        if remaining == 0 {
            self.phase = RollPhase::Settled;
            if let Some(selected) = session.selected() {
                tracing::info!(
                    session_id = %session.id,
                    restaurant_id = %selected.id,
                    name = %selected.name,
                    frames = session.frames,
                    "Roll settled"
                );
            }
            return settle_effects(session);
        }

        schedule_roll(session.id, roll + 1, self.pacing.delay_after(roll))
    }

    fn nope_next(&mut self, resume_roll: u32, frames_left: u32) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        if frames_left > 0 {
            let showing = session.displayed_index().unwrap_or_default();
            let decoy = self
                .egg
                .pick_decoy(&mut *self.rng, session.candidates().len(), showing);
            session.show_index(decoy);
            return schedule_nope(session.id, resume_roll, frames_left - 1, self.pacing.max_delay());
        }

        // Hand back to the regular sequence where it left off.
        tracing::debug!(session_id = %session.id, resume_roll, "NOPE easter egg resolved");
        self.egg.resolve();
        self.phase = RollPhase::Rolling(RollMode::Normal);
        self.roll_next(resume_roll + 1)
    }

    fn take_loading(&mut self, session: SessionId) -> bool {
        if self.phase != RollPhase::Loading || self.loading != Some(session) {
            tracing::debug!(session_id = %session, "Discarding fetch result for a stale session");
            return false;
        }
        self.loading = None;
        true
    }

    fn fail(&mut self, session: SessionId, error: ServiceError) -> Vec<Effect> {
        tracing::warn!(session_id = %session, error = %error, "Roll failed");
        self.phase = RollPhase::Errored;
        self.error = Some(error.display_message());
        self.session = None;
        vec![Effect::CancelTimer, Effect::Sound(SoundCue::Trombone)]
    }

    fn ensure_filter_editable(&self, command: &'static str) -> Result<(), RandomizerError> {
        if self.phase.is_rolling() || self.phase == RollPhase::Approved {
            return Err(RandomizerError::invalid_transition(command, self.phase.name()));
        }
        Ok(())
    }
}

fn schedule_roll(session: SessionId, roll: u32, delay: Duration) -> Vec<Effect> {
    vec![
        Effect::Sound(SoundCue::Beep),
        Effect::Schedule {
            delay,
            step: ScheduledStep::roll(session, roll),
        },
    ]
}

fn schedule_nope(
    session: SessionId,
    resume_roll: u32,
    frames_left: u32,
    delay: Duration,
) -> Vec<Effect> {
    vec![
        Effect::Sound(SoundCue::Beep),
        Effect::Schedule {
            delay,
            step: ScheduledStep::nope(session, resume_roll, frames_left),
        },
    ]
}

fn settle_effects(session: &RollSession) -> Vec<Effect> {
    let mut effects = vec![Effect::CancelTimer, Effect::Sound(SoundCue::Fanfare)];
    if let Some(selected) = session.selected() {
        effects.push(Effect::Reconcile(CounterUpdate::result(selected.id.clone())));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::randomizer::reconciliation::CounterKind;
    use lunchroll_domain::CategoryId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pacing(max_rolls: u32) -> RollPacing {
        RollPacing::new(
            max_rolls,
            Duration::ZERO,
            Duration::from_millis(1),
            Duration::ZERO,
        )
        .unwrap()
    }

    fn sequencer(max_rolls: u32, chance: f64, seed: u64) -> RollSequencer {
        let config = RandomizerConfig::new(pacing(max_rolls))
            .with_easter_egg_chance(chance)
            .unwrap();
        RollSequencer::new(&config, Box::new(StdRng::seed_from_u64(seed)))
    }

    fn candidates(n: usize) -> Vec<Restaurant> {
        (0..n)
            .map(|i| Restaurant::new(format!("r{}", i), format!("Restaurant {}", i)))
            .collect()
    }

    fn fetch_session(effects: &[Effect]) -> SessionId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch { session, .. } => Some(*session),
                _ => None,
            })
            .expect("start should request a fetch")
    }

    fn scheduled(effects: &[Effect]) -> Option<ScheduledStep> {
        effects.iter().find_map(|e| match e {
            Effect::Schedule { step, .. } => Some(*step),
            _ => None,
        })
    }

    fn counter_updates(effects: &[Effect], kind: CounterKind) -> Vec<RestaurantId> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Reconcile(update) if update.kind == kind => {
                    Some(update.restaurant_id.clone())
                }
                _ => None,
            })
            .collect()
    }

    struct Run {
        effects: Vec<Effect>,
        displays: Vec<Option<usize>>,
        egg_steps: usize,
    }

    /// Start, load `list`, then fire every scheduled step until the timer idles.
    fn roll(seq: &mut RollSequencer, list: Vec<Restaurant>) -> Run {
        let mut effects = seq.start().unwrap();
        let session = fetch_session(&effects);
        let mut next = seq.candidates_loaded(session, list);
        let mut displays = Vec::new();
        let mut egg_steps = 0;

        if seq.phase() == RollPhase::Settled {
            displays.push(seq.session().and_then(|s| s.displayed_index()));
        }
        loop {
            let step = scheduled(&next);
            effects.append(&mut next);
            let Some(step) = step else { break };
            next = seq.timer_fired(step);
            displays.push(seq.session().and_then(|s| s.displayed_index()));
            if seq.phase() == RollPhase::Rolling(RollMode::EasterEgg) {
                egg_steps += 1;
            }
        }
        Run {
            effects,
            displays,
            egg_steps,
        }
    }

    #[test]
    fn single_candidate_settles_without_animation() {
        let mut seq = sequencer(10, 0.0, 1);
        let run = roll(&mut seq, candidates(1));

        assert_eq!(seq.phase(), RollPhase::Settled);
        assert!(scheduled(&run.effects).is_none());
        assert_eq!(
            counter_updates(&run.effects, CounterKind::Result),
            vec![RestaurantId::new("r0")]
        );
        assert!(run.effects.contains(&Effect::Sound(SoundCue::Fanfare)));

        let snapshot = seq.snapshot();
        assert_eq!(snapshot.rolls_remaining, 0);
        assert_eq!(snapshot.result.map(|r| r.id), Some(RestaurantId::new("r0")));
    }

    #[test]
    fn ten_rolls_over_three_candidates() {
        let mut seq = sequencer(10, 0.0, 42);
        let run = roll(&mut seq, candidates(3));

        assert_eq!(seq.phase(), RollPhase::Settled);
        assert_eq!(run.displays.len(), 11);
        let expected: Vec<Option<usize>> = (0..=10).map(|i| Some(i % 3)).collect();
        assert_eq!(run.displays, expected);

        let session = seq.session().unwrap();
        assert_eq!(session.selected_index(), 1);
        assert_eq!(session.frames, 11);
        assert_eq!(session.displayed_index(), Some(1));

        let results = counter_updates(&run.effects, CounterKind::Result);
        assert_eq!(results.len(), 1);
        assert_eq!(Some(&results[0]), session.selected().map(|r| &r.id));
    }

    #[test]
    fn final_frame_is_always_the_winner() {
        for seed in 0..40 {
            for size in 2..7 {
                let mut seq = sequencer(7, 0.0, seed);
                roll(&mut seq, candidates(size));

                let snapshot = seq.snapshot();
                assert_eq!(snapshot.phase, RollPhase::Settled);
                assert!(snapshot.result.is_some());
                assert_eq!(snapshot.displayed, snapshot.result, "seed {} size {}", seed, size);
            }
        }
    }

    #[test]
    fn every_scheduled_step_is_preceded_by_a_beep() {
        let mut seq = sequencer(10, 1.0, 3);
        let run = roll(&mut seq, candidates(4));

        for (i, effect) in run.effects.iter().enumerate() {
            if matches!(effect, Effect::Schedule { .. }) {
                assert_eq!(run.effects[i - 1], Effect::Sound(SoundCue::Beep));
            }
        }
    }

    #[test]
    fn first_step_waits_the_max_delay() {
        let mut seq = sequencer(10, 0.0, 1);
        let session = fetch_session(&seq.start().unwrap());
        let effects = seq.candidates_loaded(session, candidates(3));

        assert_eq!(seq.phase(), RollPhase::Rolling(RollMode::Normal));
        assert!(effects.contains(&Effect::Schedule {
            delay: Duration::from_millis(1),
            step: ScheduledStep::roll(session, 0),
        }));
    }

    #[test]
    fn rerolling_rejects_the_previous_winner_before_fetching() {
        let mut seq = sequencer(5, 0.0, 8);
        roll(&mut seq, candidates(3));
        let previous = seq.snapshot().result.unwrap().id;

        let effects = seq.start().unwrap();
        let not_selected = effects
            .iter()
            .position(|e| matches!(e, Effect::Reconcile(u) if u.kind == CounterKind::NotSelected));
        let fetch = effects.iter().position(|e| matches!(e, Effect::Fetch { .. }));

        assert_eq!(counter_updates(&effects, CounterKind::NotSelected), vec![previous]);
        assert!(not_selected < fetch);
    }

    #[test]
    fn first_roll_rejects_nobody() {
        let mut seq = sequencer(5, 0.0, 8);
        let effects = seq.start().unwrap();
        assert!(counter_updates(&effects, CounterKind::NotSelected).is_empty());
    }

    #[test]
    fn failed_reroll_keeps_rejecting_the_last_winner() {
        let mut seq = sequencer(5, 0.0, 8);
        roll(&mut seq, candidates(3));
        let previous = seq.snapshot().result.unwrap().id;

        let effects = seq.start().unwrap();
        assert_eq!(
            counter_updates(&effects, CounterKind::NotSelected),
            vec![previous.clone()]
        );
        seq.candidates_failed(fetch_session(&effects), ServiceError::Request("offline".into()));
        assert_eq!(seq.phase(), RollPhase::Errored);

        let effects = seq.start().unwrap();
        assert_eq!(counter_updates(&effects, CounterKind::NotSelected), vec![previous]);
    }

    #[test]
    fn new_winner_replaces_the_rejected_one() {
        let mut seq = sequencer(5, 0.0, 8);
        roll(&mut seq, candidates(3));

        let effects = seq.start().unwrap();
        let session = fetch_session(&effects);
        seq.candidates_loaded(session, vec![Restaurant::new("solo", "Solo")]);
        assert_eq!(seq.phase(), RollPhase::Settled);

        let effects = seq.start().unwrap();
        assert_eq!(
            counter_updates(&effects, CounterKind::NotSelected),
            vec![RestaurantId::new("solo")]
        );
    }

    #[test]
    fn no_matches_forgets_the_last_winner() {
        let mut seq = sequencer(5, 0.0, 8);
        roll(&mut seq, candidates(3));

        let effects = seq.start().unwrap();
        seq.candidates_loaded(fetch_session(&effects), Vec::new());
        assert_eq!(seq.phase(), RollPhase::Errored);

        let effects = seq.start().unwrap();
        assert!(counter_updates(&effects, CounterKind::NotSelected).is_empty());
    }

    #[test]
    fn approving_is_terminal() {
        let mut seq = sequencer(5, 0.0, 2);
        roll(&mut seq, candidates(3));
        let winner = seq.snapshot().result.unwrap().id;

        let effects = seq.approve().unwrap();
        assert_eq!(counter_updates(&effects, CounterKind::Selected), vec![winner]);
        assert_eq!(effects.len(), 1);
        assert_eq!(seq.phase(), RollPhase::Approved);
        assert!(!seq.filter().visible);

        assert!(seq.approve().is_err());
        assert!(seq.start().is_err());
        assert!(seq.toggle_filter().is_err());
        assert!(seq.set_filter(Filter::default()).is_err());
    }

    #[test]
    fn approve_needs_a_settled_roll() {
        let mut seq = sequencer(5, 0.0, 2);
        assert_eq!(
            seq.approve().unwrap_err(),
            RandomizerError::invalid_transition("approve", "idle")
        );

        let session = fetch_session(&seq.start().unwrap());
        seq.candidates_loaded(session, candidates(3));
        assert!(seq.approve().is_err());
    }

    #[test]
    fn start_is_rejected_while_a_roll_is_in_flight() {
        let mut seq = sequencer(5, 0.0, 2);
        let session = fetch_session(&seq.start().unwrap());
        assert!(seq.start().is_err());

        seq.candidates_loaded(session, candidates(3));
        assert!(seq.start().is_err());
        assert!(seq.toggle_filter().is_err());
    }

    #[test]
    fn forced_easter_egg_fires_once_and_still_settles() {
        let mut seq = sequencer(10, 1.0, 5);
        let run = roll(&mut seq, candidates(3));

        assert_eq!(seq.phase(), RollPhase::Settled);
        assert_eq!(run.egg_steps, NOPE_FRAMES as usize + 1);
        assert_eq!(run.displays.len(), 11 + NOPE_FRAMES as usize);
        assert!(!seq.snapshot().easter_egg_active);

        let snapshot = seq.snapshot();
        assert_eq!(snapshot.displayed, snapshot.result);
        assert_eq!(counter_updates(&run.effects, CounterKind::Result).len(), 1);
    }

    #[test]
    fn easter_egg_waits_for_the_second_half() {
        let mut seq = sequencer(10, 1.0, 5);
        let session = fetch_session(&seq.start().unwrap());
        let mut next = seq.candidates_loaded(session, candidates(3));

        let mut triggered_at = None;
        while let Some(step) = scheduled(&next) {
            next = seq.timer_fired(step);
            if seq.snapshot().easter_egg_active {
                triggered_at = Some(seq.snapshot().rolls_remaining);
                break;
            }
        }
        assert_eq!(triggered_at, Some(5));
    }

    #[test]
    fn decoy_frames_differ_from_what_was_showing() {
        let mut seq = sequencer(10, 1.0, 11);
        let run = roll(&mut seq, candidates(3));

        // Roll 5 triggers the egg, the decoys follow it.
        assert_eq!(run.displays.len(), 11 + NOPE_FRAMES as usize);
        let window = &run.displays[5..=5 + NOPE_FRAMES as usize];
        for pair in window.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn no_matches_is_an_error() {
        let mut seq = sequencer(5, 0.0, 2);
        let session = fetch_session(&seq.start().unwrap());
        let effects = seq.candidates_loaded(session, Vec::new());

        assert_eq!(seq.phase(), RollPhase::Errored);
        assert!(effects.contains(&Effect::Sound(SoundCue::Trombone)));
        assert_eq!(
            seq.snapshot().error.as_deref(),
            Some("No restaurants match the filter")
        );
    }

    #[test]
    fn fetch_failure_is_shown_and_recoverable() {
        let mut seq = sequencer(5, 0.0, 2);
        let session = fetch_session(&seq.start().unwrap());
        let effects = seq.candidates_failed(
            session,
            ServiceError::Server {
                status: 500,
                message: "kitchen on fire".into(),
            },
        );

        assert_eq!(
            effects,
            vec![Effect::CancelTimer, Effect::Sound(SoundCue::Trombone)]
        );
        assert_eq!(seq.snapshot().error.as_deref(), Some("kitchen on fire"));

        seq.toggle_filter().unwrap();
        let run = roll(&mut seq, candidates(2));
        assert_eq!(seq.phase(), RollPhase::Settled);
        assert!(seq.snapshot().error.is_none());
        assert!(!run.effects.is_empty());
    }

    #[test]
    fn stale_results_and_steps_are_ignored() {
        let mut seq = sequencer(5, 0.0, 2);
        let first = fetch_session(&seq.start().unwrap());
        seq.candidates_failed(first, ServiceError::Request("offline".into()));

        let second = fetch_session(&seq.start().unwrap());
        assert!(seq.candidates_loaded(first, candidates(3)).is_empty());
        assert_eq!(seq.phase(), RollPhase::Loading);

        seq.candidates_loaded(second, candidates(3));
        assert!(seq.timer_fired(ScheduledStep::roll(first, 0)).is_empty());
        assert!(seq.session().unwrap().displayed_index().is_none());
    }

    #[test]
    fn start_hides_the_filter_and_queries_it() {
        let mut seq = sequencer(5, 0.0, 2);
        seq.toggle_filter().unwrap();
        seq.set_filter(Filter {
            categories: [CategoryId::new("pizza")].into_iter().collect(),
            distance: Some(500),
            ..Filter::default()
        })
        .unwrap();
        assert!(seq.filter().visible);

        let effects = seq.start().unwrap();
        assert!(!seq.filter().visible);
        let query = effects.iter().find_map(|e| match e {
            Effect::Fetch { query, .. } => Some(query.clone()),
            _ => None,
        });
        assert_eq!(
            query,
            Some(MatchQuery {
                categories: vec![CategoryId::new("pizza")],
                distance: Some(500),
                ..MatchQuery::default()
            })
        );
    }

    #[test]
    fn dispose_mid_roll_cancels_everything() {
        let mut seq = sequencer(5, 0.0, 2);
        let session = fetch_session(&seq.start().unwrap());
        let next = seq.candidates_loaded(session, candidates(3));

        assert_eq!(seq.dispose(), vec![Effect::CancelTimer]);
        assert_eq!(seq.phase(), RollPhase::Idle);
        assert!(seq.timer_fired(scheduled(&next).unwrap()).is_empty());
    }

    #[test]
    fn dispose_while_loading_discards_the_fetch() {
        let mut seq = sequencer(5, 0.0, 2);
        let session = fetch_session(&seq.start().unwrap());
        seq.dispose();

        assert!(seq.candidates_loaded(session, candidates(3)).is_empty());
        assert_eq!(seq.phase(), RollPhase::Idle);
    }
}
