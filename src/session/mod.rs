//! Real-time session actor
//!
//! One task owns the [`Engine`] and is the only writer. It multiplexes a
//! fixed-rate physics timer, a slower chart-sampling timer, a headline
//! timer, player requests and advisory replies. Readers observe committed
//! [`Frame`]s on a `watch` channel and notable events on a `broadcast`
//! channel; they never touch the live state.

use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::command::{Command, CommandOutcome};
use crate::core::error::{MeltdownError, Result};
use crate::llm::advisor::{topic_for, Advisor, AdvisoryTopic};
use crate::llm::context::AdvisoryContext;
use crate::simulation::engine::Engine;
use crate::simulation::events::NotableEvent;
use crate::simulation::snapshot::Snapshot;
use crate::ui::hooks::EventHook;
use crate::ui::state::{Dashboard, ScorePoint};

const REQUEST_QUEUE: usize = 64;
const EVENT_QUEUE: usize = 256;

/// What a front end renders after each commit
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub headline: String,
    pub chart: Vec<ScorePoint>,
    /// Newest first
    pub log: Vec<NotableEvent>,
}

enum SessionRequest {
    Command {
        command: Command,
        reply: oneshot::Sender<CommandOutcome>,
    },
    Advise(AdvisoryTopic),
    Shutdown,
}

/// Cloneable handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<SessionRequest>,
    frames: watch::Receiver<Frame>,
    events: broadcast::Sender<NotableEvent>,
}

impl SessionHandle {
    /// Apply a command between ticks and wait for its outcome
    pub async fn send(&self, command: Command) -> Result<CommandOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.requests
            .send(SessionRequest::Command { command, reply })
            .await
            .map_err(|_| MeltdownError::SessionClosed)?;
        outcome.await.map_err(|_| MeltdownError::SessionClosed)
    }

    /// Ask for a fresh headline; the answer arrives in a later frame
    pub async fn advise(&self, topic: AdvisoryTopic) -> Result<()> {
        self.requests
            .send(SessionRequest::Advise(topic))
            .await
            .map_err(|_| MeltdownError::SessionClosed)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.requests
            .send(SessionRequest::Shutdown)
            .await
            .map_err(|_| MeltdownError::SessionClosed)
    }

    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    pub fn latest(&self) -> Frame {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotableEvent> {
        self.events.subscribe()
    }
}

pub struct Session<R: RngCore = ChaCha8Rng> {
    engine: Engine<R>,
    advisor: Arc<Advisor>,
    dashboard: Dashboard,
    hooks: Vec<Box<dyn EventHook>>,
}

impl<R: RngCore + Send + 'static> Session<R> {
    pub fn new(engine: Engine<R>, advisor: Advisor) -> Self {
        let tuning = &engine.config().session;
        let dashboard = Dashboard::new(tuning.log_capacity, tuning.chart_capacity);
        Self {
            engine,
            advisor: Arc::new(advisor),
            dashboard,
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Box<dyn EventHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Start the actor on the current runtime. The join handle yields the
    /// engine back after shutdown.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<Engine<R>>) {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_QUEUE);
        let (event_tx, _) = broadcast::channel(EVENT_QUEUE);
        let (frame_tx, frame_rx) = watch::channel(self.frame());

        let handle = SessionHandle {
            requests: request_tx,
            frames: frame_rx,
            events: event_tx.clone(),
        };
        let task = tokio::spawn(self.run(request_rx, frame_tx, event_tx));
        (handle, task)
    }

    async fn run(
        mut self,
        mut requests: mpsc::Receiver<SessionRequest>,
        frames: watch::Sender<Frame>,
        events: broadcast::Sender<NotableEvent>,
    ) -> Engine<R> {
        let tuning = self.engine.config().session.clone();
        let mut physics = interval(Duration::from_millis(tuning.tick_interval_ms.max(1)));
        physics.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut chart = interval(Duration::from_millis(tuning.chart_interval_ms.max(1)));
        chart.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut headlines = interval(Duration::from_millis(tuning.headline_interval_ms.max(1)));
        headlines.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let (advice_tx, mut advice_rx) = mpsc::channel::<String>(4);
        let started = Instant::now();
        tracing::info!(tick_ms = tuning.tick_interval_ms, "Session started");

        loop {
            tokio::select! {
                _ = physics.tick() => {
                    let report = self.engine.tick();
                    self.publish(report.events, &events);
                    frames.send_replace(self.frame());
                }
                _ = chart.tick() => {
                    let elapsed = started.elapsed().as_millis() as u64;
                    let snapshot = self.engine.snapshot();
                    self.dashboard.chart.sample(elapsed, &snapshot);
                }
                _ = headlines.tick() => {
                    let snapshot = self.engine.snapshot();
                    let context = AdvisoryContext::from_snapshot(&snapshot);
                    let topic = topic_for(&context, snapshot.state.reactor.meltdown_progress);
                    self.request_headline(context, topic, &advice_tx);
                }
                Some(text) = advice_rx.recv() => {
                    self.dashboard.headline = text;
                    frames.send_replace(self.frame());
                }
                request = requests.recv() => match request {
                    Some(SessionRequest::Command { command, reply }) => {
                        let outcome = self.engine.apply(command);
                        let emitted = self.engine.take_events();
                        self.publish(emitted, &events);
                        frames.send_replace(self.frame());
                        let _ = reply.send(outcome);
                    }
                    Some(SessionRequest::Advise(topic)) => {
                        let context = AdvisoryContext::from_snapshot(&self.engine.snapshot());
                        self.request_headline(context, topic, &advice_tx);
                    }
                    Some(SessionRequest::Shutdown) | None => break,
                },
            }
        }

        tracing::info!(tick = self.engine.current_tick(), "Session stopped");
        self.engine
    }

    /// Advisory calls run off the actor; a slow service never delays a tick
    fn request_headline(
        &self,
        context: AdvisoryContext,
        topic: AdvisoryTopic,
        replies: &mpsc::Sender<String>,
    ) {
        let advisor = Arc::clone(&self.advisor);
        let replies = replies.clone();
        tokio::spawn(async move {
            let text = advisor.headline(&context, topic).await;
            let _ = replies.send(text).await;
        });
    }

    fn publish(&mut self, emitted: Vec<NotableEvent>, events: &broadcast::Sender<NotableEvent>) {
        for event in emitted {
            for hook in self.hooks.iter_mut() {
                hook.on_event(&event);
            }
            // No subscribers is fine
            let _ = events.send(event.clone());
            self.dashboard.log.push(event);
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            snapshot: self.engine.snapshot(),
            headline: self.dashboard.headline.clone(),
            chart: self.dashboard.chart.points().copied().collect(),
            log: self.dashboard.log.recent().cloned().collect(),
        }
    }
}
