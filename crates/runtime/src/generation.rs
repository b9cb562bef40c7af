/// Tag identifying one asynchronous swap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Monotonic generation counter.
///
/// Every new request supersedes all earlier ones; a completion is only
/// honoured while its generation is still current.
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose next generation follows `last`, so tags stay unique
    /// across owners that hand the numbering on.
    pub fn continuing_from(last: Generation) -> Self {
        Self { current: last }
    }

    pub fn current(&self) -> Generation {
        self.current
    }

    /// Starts a new generation and returns it.
    pub fn bump(&mut self) -> Generation {
        self.current = Generation(self.current.0.wrapping_add(1));
        self.current
    }
}
