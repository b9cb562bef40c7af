use crate::generation::Generation;

/// Kinds of navigation events recorded on the bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A transition started.
    Transition,
    ButtonCreated,
    ButtonDisposed,
    /// Loading indicator shown.
    Busy,
    /// Loading indicator cleared.
    Idle,
    /// A texture completion arrived for a superseded swap.
    StaleCompletion,
    LoadFailure,
    /// A navigation request was refused or deferred.
    Rejected,
    Notice,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Transition => "transition",
            EventKind::ButtonCreated => "button_created",
            EventKind::ButtonDisposed => "button_disposed",
            EventKind::Busy => "busy",
            EventKind::Idle => "idle",
            EventKind::StaleCompletion => "stale_completion",
            EventKind::LoadFailure => "load_failure",
            EventKind::Rejected => "rejected",
            EventKind::Notice => "notice",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation trace event.
///
/// Events carry the swap generation that was current when they were emitted,
/// so a trace can be replayed and compared without wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub generation: Generation,
    pub kind: EventKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, generation: Generation, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            generation,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
