// world/ - Viewport geometry
//
// Pure queries against the current viewport. No state, no allocation.

mod viewport;

pub use viewport::*;
