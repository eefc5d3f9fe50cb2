pub mod viewport;

pub use viewport::{CommandOutcome, Screen, Viewport, VisibleLine};
