//! Tracking of the single object the gaze is resting on.

/// One stare transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stare<T> {
    /// Gaze arrived on the target.
    Enter(T),
    /// Gaze is on the target this cycle.
    Stay(T),
    /// Gaze left the target.
    Exit(T),
}

/// The set of stared-at objects, which holds at most one member because a
/// single ray is cast per cycle.
///
/// Each detection cycle reports what was hit (or nothing) and receives the
/// transitions to fire, exits always before enters.
#[derive(Debug, Clone)]
pub struct StareTracker<T> {
    current: Option<T>,
}

impl<T> Default for StareTracker<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Copy + PartialEq> StareTracker<T> {
    /// Nothing stared at.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stared object.
    pub fn current(&self) -> Option<T> {
        self.current
    }

    /// Whether `target` is the stared object.
    pub fn is_staring_at(&self, target: T) -> bool {
        self.current == Some(target)
    }

    /// Record this cycle's hit and return the transitions to fire.
    pub fn observe(&mut self, hit: Option<T>) -> Vec<Stare<T>> {
        let mut transitions = Vec::with_capacity(3);
        match hit {
            Some(target) if self.current == Some(target) => {
                transitions.push(Stare::Stay(target));
            }
            Some(target) => {
                if let Some(previous) = self.current.replace(target) {
                    transitions.push(Stare::Exit(previous));
                }
                transitions.push(Stare::Enter(target));
                transitions.push(Stare::Stay(target));
            }
            None => {
                if let Some(previous) = self.current.take() {
                    transitions.push(Stare::Exit(previous));
                }
            }
        }
        transitions
    }

    /// Forget the stared object, returning its exit.
    pub fn clear(&mut self) -> Vec<Stare<T>> {
        self.observe(None)
    }
}
