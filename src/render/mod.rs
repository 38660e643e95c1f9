//! Flat-color rendering of the remote board
//!
//! Boards are drawn into an RGB pixel frame at a fixed number of pixels per
//! cell, then handed to a `Surface`: a desktop window, the terminal, or memory
//! for tests and recording.

pub mod frame;
pub mod renderer;
pub mod surface;
pub mod terminal;
pub mod window;

pub use frame::{BoardSnapshot, Palette, PixelFrame, Rgb, draw_board};
pub use renderer::Renderer;
pub use surface::{MemorySurface, Surface, SurfaceKind};
pub use terminal::TerminalSurface;
pub use window::WindowSurface;
