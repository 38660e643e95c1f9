use anyhow::Result;

use super::frame::{BoardSnapshot, Palette, draw_board};
use super::surface::{Surface, SurfaceKind};
use super::terminal::TerminalSurface;
use super::window::WindowSurface;

const WINDOW_TITLE: &str = "Snake";

/// Draws board snapshots onto a surface it owns.
///
/// Without an injected surface the renderer opens one of kind `kind` the first
/// time it is asked to draw.
pub struct Renderer {
    cell_scale: usize,
    kind: SurfaceKind,
    palette: Palette,
    surface: Option<Box<dyn Surface>>,
}

impl Renderer {
    pub fn new(cell_scale: usize, kind: SurfaceKind) -> Self {
        Self {
            cell_scale,
            kind,
            palette: Palette::default(),
            surface: None,
        }
    }

    pub fn with_surface(cell_scale: usize, surface: Box<dyn Surface>) -> Self {
        Self {
            cell_scale,
            kind: SurfaceKind::default(),
            palette: Palette::default(),
            surface: Some(surface),
        }
    }

    pub fn cell_scale(&self) -> usize {
        self.cell_scale
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    pub fn render(&mut self, snapshot: &BoardSnapshot) -> Result<()> {
        let frame = draw_board(snapshot, &self.palette, self.cell_scale);

        if self.surface.is_none() {
            let surface: Box<dyn Surface> = match self.kind {
                SurfaceKind::Window => Box::new(WindowSurface::open(
                    WINDOW_TITLE,
                    frame.width(),
                    frame.height(),
                )?),
                SurfaceKind::Terminal => Box::new(TerminalSurface::open(self.cell_scale)?),
            };
            self.surface = Some(surface);
        }
        match self.surface.as_mut() {
            Some(surface) => surface.present(&frame),
            None => Ok(()),
        }
    }

    /// Release the surface; a later `render` opens a new one
    pub fn close(&mut self) -> Result<()> {
        match self.surface.take() {
            Some(mut surface) => surface.close(),
            None => Ok(()),
        }
    }
}
