mod bus;
mod events;

pub use bus::EventBus;
pub use events::EditorEvent;

/// Receives every [`EditorEvent`] a session emits: cell repaints, grid
/// rebuilds, picker updates from rainbow mode, and mode, theme and border
/// changes. Handlers run synchronously inside the action that caused the
/// event, after the grid is in its new state.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F: FnMut(&EditorEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
