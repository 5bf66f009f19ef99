// File: crates/chart-core/src/observer.rs
// Summary: Listener registration for change notifications emitted by core components.

use std::fmt;

/// Handle returned by [`Observers::subscribe`]; pass it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of callbacks invoked synchronously, in registration order, on every emitted event.
///
/// Cloning a component does not clone its listeners; the clone starts with none.
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self { next_id: 0, listeners: Vec::new() }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize { self.listeners.len() }
    pub fn is_empty(&self) -> bool { self.listeners.is_empty() }
}

impl<E> Default for Observers<E> {
    fn default() -> Self { Self::new() }
}

impl<E> Clone for Observers<E> {
    fn clone(&self) -> Self { Self::new() }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("listeners", &self.listeners.len()).finish()
    }
}
