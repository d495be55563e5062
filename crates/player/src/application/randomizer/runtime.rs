//! Randomizer runtime.
//!
//! One task owns the [`RollSequencer`] and the single step timer. Commands
//! come in over a channel, snapshots go out over a watch channel, so nothing
//! outside the task ever touches roll state.

use std::collections::VecDeque;
use std::sync::Arc;

use lunchroll_domain::Filter;
use rand::RngCore;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::config::RandomizerConfig;
use super::error::RandomizerError;
use super::reconciliation::{CounterKind, ResultReconciler};
use super::scheduler::StepTimer;
use super::sequencer::{Effect, RollSequencer};
use super::session::{RollSnapshot, ScheduledStep};
use crate::ports::outbound::{play, RestaurantPort, SoundPort};

type Reply = oneshot::Sender<Result<(), RandomizerError>>;

enum Command {
    Start(Reply),
    Approve(Reply),
    ToggleFilter(Reply),
    SetFilter(Filter, Reply),
}

/// Handle to a running randomizer.
pub struct Randomizer {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<RollSnapshot>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Randomizer {
    /// Spawn the roll task on the current tokio runtime.
    pub fn spawn(
        config: RandomizerConfig,
        restaurants: Arc<dyn RestaurantPort>,
        sound: Arc<dyn SoundPort>,
    ) -> Self {
        let rng = config.rng();
        Self::spawn_with_rng(config, rng, restaurants, sound)
    }

    pub fn spawn_with_rng(
        config: RandomizerConfig,
        rng: Box<dyn RngCore + Send>,
        restaurants: Arc<dyn RestaurantPort>,
        sound: Arc<dyn SoundPort>,
    ) -> Self {
        let sequencer = RollSequencer::new(&config, rng);
        let (snapshot_tx, snapshot_rx) = watch::channel(sequencer.snapshot());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let worker = RollWorker {
            sequencer,
            timer: StepTimer::new(),
            commands: command_rx,
            snapshots: snapshot_tx,
            reconciler: ResultReconciler::new(Arc::clone(&restaurants)),
            restaurants,
            sound,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(worker.run());

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown,
            task: Some(task),
        }
    }

    /// Roll with the current filter. Returns once candidates are loaded and
    /// the animation is under way (or the roll settled or failed outright).
    pub async fn start(&self) -> Result<(), RandomizerError> {
        self.request(Command::Start).await
    }

    pub async fn approve(&self) -> Result<(), RandomizerError> {
        self.request(Command::Approve).await
    }

    pub async fn toggle_filter(&self) -> Result<(), RandomizerError> {
        self.request(Command::ToggleFilter).await
    }

    pub async fn set_filter(&self, filter: Filter) -> Result<(), RandomizerError> {
        self.request(|reply| Command::SetFilter(filter, reply)).await
    }

    pub fn subscribe(&self) -> watch::Receiver<RollSnapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> RollSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop the roll task: the pending step is cancelled, an in-flight fetch
    /// is discarded, and counter updates already sent are waited for.
    pub async fn dispose(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Randomizer task panicked");
            }
        }
    }

    async fn request(&self, command: impl FnOnce(Reply) -> Command) -> Result<(), RandomizerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| RandomizerError::Disposed)?;
        response.await.map_err(|_| RandomizerError::Disposed)?
    }
}

impl Drop for Randomizer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

enum WorkerEvent {
    Command(Command),
    Step(ScheduledStep),
}

struct RollWorker {
    sequencer: RollSequencer,
    timer: StepTimer<ScheduledStep>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<RollSnapshot>,
    restaurants: Arc<dyn RestaurantPort>,
    reconciler: ResultReconciler,
    sound: Arc<dyn SoundPort>,
    shutdown: CancellationToken,
}

impl RollWorker {
    async fn run(mut self) {
        loop {
            let event = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(command) => WorkerEvent::Command(command),
                    None => break,
                },
                step = self.timer.fired() => WorkerEvent::Step(step),
            };

            match event {
                WorkerEvent::Command(command) => self.handle(command).await,
                WorkerEvent::Step(step) => {
                    let effects = self.sequencer.timer_fired(step);
                    // Only fetches can be interrupted and steps never fetch.
                    let _ = self.apply(effects).await;
                }
            }
        }

        let effects = self.sequencer.dispose();
        let _ = self.apply(effects).await;
        self.reconciler.drain().await;
        tracing::debug!("Randomizer stopped");
    }

    async fn handle(&mut self, command: Command) {
        let (outcome, reply) = match command {
            Command::Start(reply) => (self.sequencer.start(), reply),
            Command::Approve(reply) => (self.sequencer.approve(), reply),
            Command::ToggleFilter(reply) => {
                (self.sequencer.toggle_filter().map(|_| Vec::new()), reply)
            }
            Command::SetFilter(filter, reply) => {
                (self.sequencer.set_filter(filter).map(|_| Vec::new()), reply)
            }
        };

        let result = match outcome {
            Ok(effects) => self.apply(effects).await,
            Err(e) => {
                tracing::debug!(error = %e, "Command rejected");
                Err(e)
            }
        };
        // The caller may have given up waiting.
        let _ = reply.send(result);
    }

    /// Carry out effects in order, then publish a snapshot.
    async fn apply(&mut self, effects: Vec<Effect>) -> Result<(), RandomizerError> {
        let mut queue = VecDeque::from(effects);

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Fetch { session, query } => {
                    self.publish();
                    let fetched = tokio::select! {
                        _ = self.shutdown.cancelled() => {
                            tracing::debug!(session_id = %session, "Disposed while fetching");
                            return Err(RandomizerError::Disposed);
                        }
                        fetched = self.restaurants.get_all_matches(query) => fetched,
                    };
                    let follow_up = match fetched {
                        Ok(candidates) => self.sequencer.candidates_loaded(session, candidates),
                        Err(e) => self.sequencer.candidates_failed(session, e),
                    };
                    queue.extend(follow_up);
                }
                Effect::Schedule { delay, step } => {
                    if self.timer.schedule(delay, step).is_some() {
                        tracing::warn!(session_id = %step.session, "Replaced a pending roll step");
                    }
                }
                Effect::CancelTimer => {
                    self.timer.cancel();
                }
                Effect::Sound(cue) => play(self.sound.as_ref(), cue),
                Effect::Reconcile(update) => {
                    // The rejection of the previous winner lands before the
                    // next fetch; the other counters never hold up the roll.
                    if update.kind == CounterKind::NotSelected {
                        self.reconciler.apply(update).await;
                    } else {
                        self.reconciler.dispatch(update);
                    }
                }
            }
        }

        self.publish();
        Ok(())
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.sequencer.snapshot());
    }
}
