use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::frame::PixelFrame;

/// Surface the renderer opens on its own when none was injected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Desktop window, `cell_scale` pixels per cell
    #[default]
    Window,
    /// Colored blocks in the terminal, one per cell
    Terminal,
}

/// Somewhere finished frames are shown
pub trait Surface {
    fn present(&mut self, frame: &PixelFrame) -> Result<()>;

    /// Release whatever the surface holds; called once before it is dropped
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every presented frame in memory.
///
/// Clones share the same storage, so a caller can keep one clone and hand the
/// other to an environment.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    frames: Rc<RefCell<Vec<PixelFrame>>>,
    closed: Rc<RefCell<bool>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn last_frame(&self) -> Option<PixelFrame> {
        self.frames.borrow().last().cloned()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

impl Surface for MemorySurface {
    fn present(&mut self, frame: &PixelFrame) -> Result<()> {
        self.frames.borrow_mut().push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        *self.closed.borrow_mut() = true;
        Ok(())
    }
}
