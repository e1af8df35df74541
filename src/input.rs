// input.rs - Pointer tracking
//
// A single snapshot of the last pointer position. Writers replace the whole
// value; the frame step is the only reader. No queue, no history.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default)]
pub struct InputTracker {
    pointer: PointerState,
    moves: u64,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move notification. Last write wins.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = PointerState { x, y };
        self.moves += 1;
    }

    /// Latest pointer position, (0, 0) before the first move
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Number of moves seen since creation
    pub fn moves(&self) -> u64 {
        self.moves
    }
}
