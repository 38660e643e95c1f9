use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal, TerminalOptions, Viewport,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::io::{Stderr, Write, stderr};

use super::frame::PixelFrame;
use super::surface::Surface;

/// Shows frames in the terminal, one block per board cell.
///
/// Opening switches to the alternate screen and hides the cursor; closing (or
/// dropping) switches back. Input modes are left alone, so Ctrl+C keeps working
/// while frames are shown. Code that reads keys enables raw mode itself.
pub struct TerminalSurface<W: Write = Stderr> {
    terminal: Option<Terminal<CrosstermBackend<W>>>,
    cell_scale: usize,
}

impl TerminalSurface<Stderr> {
    /// Draw full screen on stderr
    pub fn open(cell_scale: usize) -> Result<Self> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal =
            Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")?;
        Self::start(terminal, cell_scale)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Draw into a fixed `area` of any writer
    pub fn with_writer(mut writer: W, area: Rect, cell_scale: usize) -> Result<Self> {
        execute!(writer, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal = Terminal::with_options(
            CrosstermBackend::new(writer),
            TerminalOptions {
                viewport: Viewport::Fixed(area),
            },
        )
        .context("Failed to create terminal")?;
        Self::start(terminal, cell_scale)
    }

    fn start(mut terminal: Terminal<CrosstermBackend<W>>, cell_scale: usize) -> Result<Self> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal: Some(terminal),
            cell_scale: cell_scale.max(1),
        })
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)
                .context("Failed to leave alternate screen")?;
            terminal.show_cursor().context("Failed to show cursor")?;
        }
        Ok(())
    }

    /// Writer the frames go to, while open
    pub fn writer(&self) -> Option<&W> {
        self.terminal.as_ref().map(|t| t.backend().writer())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn present(&mut self, frame: &PixelFrame) -> Result<()> {
        let cell_scale = self.cell_scale;
        let terminal = self
            .terminal
            .as_mut()
            .context("Terminal surface already closed")?;

        terminal
            .draw(|f| {
                let grid = frame_to_paragraph(frame, cell_scale);
                f.render_widget(grid, f.area());
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.restore()
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Sample one pixel per cell and draw it as a two-column block
fn frame_to_paragraph(frame: &PixelFrame, cell_scale: usize) -> Paragraph<'static> {
    let columns = frame.width() / cell_scale;
    let rows = frame.height() / cell_scale;
    let mut lines = Vec::with_capacity(rows);

    for row in 0..rows {
        let spans: Vec<Span> = (0..columns)
            .map(|column| {
                let color = frame
                    .pixel(column * cell_scale, row * cell_scale)
                    .map(|p| Color::Rgb(p.0, p.1, p.2))
                    .unwrap_or(Color::Reset);
                Span::styled("██", Style::default().fg(color))
            })
            .collect();
        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Snake {}x{} ", columns, rows)),
        )
        .alignment(Alignment::Center)
}
