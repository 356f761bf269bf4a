//! Core domain: timed phases advanced by frame deltas.
//!
//! A phase is a `{remaining, on-expiry}` pair. Owners start phases, then call
//! [`PhaseScheduler::tick`] once per frame with the elapsed time and a resolver
//! that runs each expired phase exactly once and may chain the next one.

/// A phase request: which phase, and how long it lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase<P> {
    pub phase: P,
    pub duration: f32,
}

impl<P> Phase<P> {
    pub fn new(phase: P, duration: f32) -> Self {
        Self { phase, duration }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActivePhase<P> {
    phase: P,
    remaining: f32,
}

/// Runs any number of independent timed phases side by side.
///
/// The scheduler does not stop a phase from being started twice; the owning
/// state machine guards against that before calling [`start`](Self::start).
#[derive(Debug, Clone)]
pub struct PhaseScheduler<P> {
    active: Vec<ActivePhase<P>>,
}

impl<P> Default for PhaseScheduler<P> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<P: Copy + PartialEq> PhaseScheduler<P> {
    pub fn start(&mut self, phase: P, duration: f32) {
        self.active.push(ActivePhase {
            phase,
            remaining: duration.max(0.0),
        });
    }

    pub fn is_active(&self, phase: P) -> bool {
        self.active.iter().any(|entry| entry.phase == phase)
    }

    /// Seconds left on the first matching phase.
    pub fn remaining(&self, phase: P) -> Option<f32> {
        self.active
            .iter()
            .find(|entry| entry.phase == phase)
            .map(|entry| entry.remaining)
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Drop a phase without resolving it. Returns whether anything was dropped.
    pub fn cancel(&mut self, phase: P) -> bool {
        let before = self.active.len();
        self.active.retain(|entry| entry.phase != phase);
        before != self.active.len()
    }

    /// Abandon every phase without resolving any of them.
    pub fn cancel_all(&mut self) -> usize {
        let abandoned = self.active.len();
        self.active.clear();
        abandoned
    }

    /// Advance all phases by `dt` seconds.
    ///
    /// Each phase whose time ran out is removed and handed to `resolve` once.
    /// A chained phase returned by `resolve` inherits the overshoot, so a long
    /// frame can resolve several links of a chain in one call.
    pub fn tick<F>(&mut self, dt: f32, mut resolve: F)
    where
        F: FnMut(P) -> Option<Phase<P>>,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for entry in &mut self.active {
            entry.remaining -= dt;
        }

        while let Some(index) = self.active.iter().position(|entry| entry.remaining <= 0.0) {
            let expired = self.active.remove(index);
            if let Some(next) = resolve(expired.phase) {
                self.active.push(ActivePhase {
                    phase: next.phase,
                    remaining: next.duration.max(0.0) + expired.remaining,
                });
            }
        }
    }
}
