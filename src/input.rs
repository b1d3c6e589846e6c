use crate::grid::CellPos;

/// Pointer input as seen by the grid. `cell` is `None` when the pointer is
/// over the grid area but not over any cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Down { cell: Option<CellPos> },
    /// Pointer moved onto (or over) a cell, or off of one
    Move { cell: Option<CellPos> },
    /// Button released, anywhere
    Up,
    /// Pointer left the grid
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Tracks whether a click-and-drag stroke is in progress and decides which
/// pointer events paint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Drop any stroke in progress
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Advance the drag state and return the cell to paint, if any
    pub fn handle(&mut self, event: PointerEvent) -> Option<CellPos> {
        match event {
            PointerEvent::Down { cell } => {
                self.state = DragState::Dragging;
                cell
            }
            PointerEvent::Move { cell } => match self.state {
                DragState::Dragging => cell,
                DragState::Idle => None,
            },
            PointerEvent::Up | PointerEvent::Leave => {
                self.state = DragState::Idle;
                None
            }
        }
    }
}
