use anyhow::{Context, Result, anyhow};
use macroquad::color::{BLACK, WHITE};
use macroquad::math::vec2;
use macroquad::texture::{DrawTextureParams, FilterMode, Texture2D, draw_texture_ex};
use macroquad::window::{Conf, clear_background, next_frame, screen_height, screen_width};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use super::frame::PixelFrame;
use super::surface::Surface;

/// A desktop window showing frames pixel for pixel.
///
/// The window runs its own macroquad loop on a dedicated thread and always
/// shows the newest frame it was sent. Closing the window by hand makes the
/// next `present` fail. macOS only allows windows on the main thread, so use
/// the terminal surface there.
pub struct WindowSurface {
    frames: Option<Sender<PixelFrame>>,
    thread: Option<JoinHandle<()>>,
}

impl WindowSurface {
    /// Open a window of exactly `width` x `height` pixels
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self> {
        let conf = Conf {
            window_title: title.to_owned(),
            window_width: width as i32,
            window_height: height as i32,
            window_resizable: false,
            ..Default::default()
        };
        let (sender, receiver) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("render-window".to_string())
            .spawn(move || macroquad::Window::from_config(conf, show_frames(receiver)))
            .context("Failed to start render window thread")?;
        tracing::debug!(width, height, "opened render window");

        Ok(Self {
            frames: Some(sender),
            thread: Some(thread),
        })
    }
}

impl Surface for WindowSurface {
    fn present(&mut self, frame: &PixelFrame) -> Result<()> {
        let frames = self
            .frames
            .as_ref()
            .context("Render window already closed")?;
        frames
            .send(frame.clone())
            .map_err(|_| anyhow!("Render window was closed"))
    }

    fn close(&mut self) -> Result<()> {
        // Hanging up ends the window loop
        self.frames.take();
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| anyhow!("Render window thread panicked"))?;
        }
        Ok(())
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

async fn show_frames(frames: Receiver<PixelFrame>) {
    let mut texture: Option<Texture2D> = None;

    while let Some(update) = newest(&frames) {
        if let Some(frame) = update {
            let upload = Texture2D::from_rgba8(
                frame.width() as u16,
                frame.height() as u16,
                &frame.to_rgba_bytes(),
            );
            upload.set_filter(FilterMode::Nearest);
            texture = Some(upload);
        }

        clear_background(BLACK);
        if let Some(texture) = &texture {
            draw_texture_ex(
                texture,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(screen_width(), screen_height())),
                    ..Default::default()
                },
            );
        }
        next_frame().await;
    }
}

/// Drain pending frames down to the newest one.
///
/// `None` once the sending side hung up, `Some(None)` when nothing new arrived.
fn newest(frames: &Receiver<PixelFrame>) -> Option<Option<PixelFrame>> {
    let mut latest = None;
    loop {
        match frames.try_recv() {
            Ok(frame) => latest = Some(frame),
            Err(TryRecvError::Empty) => return Some(latest),
            Err(TryRecvError::Disconnected) => return None,
        }
    }
}
