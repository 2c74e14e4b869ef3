/// Identifies an issued fetch in a deterministic, stable way.
///
/// This is intentionally a small, copyable handle so it can be carried
/// through commands and completions without heap allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);
