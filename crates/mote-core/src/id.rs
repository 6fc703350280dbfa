//! Emitter handles

use std::fmt;

/// A handle to an emitter inside one registry.
///
/// Handles are issued by the registry from its own counter and never reused,
/// so a handle taken before a clear cannot resolve to an emitter created after it.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct EmitterId(pub u64);

impl EmitterId {
    /// Create an EmitterId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmitterId({})", self.0)
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let id = EmitterId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "EmitterId(42)");
    }

    #[test]
    fn test_ordering_follows_raw() {
        assert!(EmitterId::from_raw(1) < EmitterId::from_raw(2));
    }
}
