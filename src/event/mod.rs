mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::EditorEvent;

/// Receives [`EditorEvent`]s. Closures taking `&EditorEvent` qualify.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent) + Send,
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
