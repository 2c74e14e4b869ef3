/// Minimal session event for traceability.
///
/// For now this is structured text; as the surrounding shell grows this
/// can become a stable, serializable event enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub seq: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    next_seq: u64,
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(SessionEvent {
            seq,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
