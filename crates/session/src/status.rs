/// Load status surfaced to UI affordances (spinner, error banner).
///
/// `Error` never blanks the map: markers loaded before the failure stay
/// usable alongside the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Error(String),
}
