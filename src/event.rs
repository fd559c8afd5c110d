//! Synchronous execution-event dispatch.
//!
//! The engine owns an [`EventRegistry`] and publishes lifecycle events into
//! it; observers subscribe per [`EventKind`] and are called in registration
//! order on the publishing thread.
use crate::result::SuiteResult;
use anyhow::Result;

/// Lifecycle points the engine publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SuiteStart,
    SpecStart,
    SpecEnd,
    ScenarioStart,
    ScenarioEnd,
    StepStart,
    StepEnd,
    ConceptStart,
    ConceptEnd,
    SuiteEnd,
}

/// One published event. Only suite-level events carry a result.
#[derive(Debug, Clone)]
pub struct ExecutionEvent {
    pub kind: EventKind,
    pub result: Option<SuiteResult>,
}

impl ExecutionEvent {
    pub fn new(kind: EventKind, result: Option<SuiteResult>) -> Self {
        Self { kind, result }
    }

    pub fn suite_end(result: SuiteResult) -> Self {
        Self::new(EventKind::SuiteEnd, Some(result))
    }
}

/// Receiver of execution events.
pub trait Observer {
    fn handle(&mut self, event: &ExecutionEvent) -> Result<()>;
}

/// Subscription table owned by the execution engine.
#[derive(Default)]
pub struct EventRegistry {
    subscribers: Vec<(EventKind, Box<dyn Observer>)>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every subscription. Safe to call repeatedly.
    pub fn init(&mut self) {
        self.subscribers.clear();
    }

    /// Subscribe `observer` to events of `kind`, after existing subscribers.
    pub fn register(&mut self, kind: EventKind, observer: Box<dyn Observer>) {
        self.subscribers.push((kind, observer));
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers
            .iter()
            .filter(|(subscribed, _)| *subscribed == kind)
            .count()
    }

    /// Deliver `event` to its subscribers.
    ///
    /// A failing observer does not stop delivery; its error is logged and
    /// returned alongside any others.
    pub fn notify(&mut self, event: &ExecutionEvent) -> Vec<anyhow::Error> {
        let mut errors = Vec::new();
        for (kind, observer) in self.subscribers.iter_mut() {
            if *kind != event.kind {
                continue;
            }
            if let Err(err) = observer.handle(event) {
                tracing::error!(kind = ?event.kind, error = %format!("{err:#}"), "observer failed");
                errors.push(err);
            }
        }
        errors
    }
}
