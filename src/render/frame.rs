use crate::remote::Coordinate;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Flat colors used for each kind of cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub food: Rgb,
    pub head: Rgb,
    pub body: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            food: Rgb(230, 20, 20),
            head: Rgb(140, 230, 140),
            body: Rgb(80, 230, 80),
        }
    }
}

/// What the renderer needs to know about the board, read fresh from the engine
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub food: Coordinate,
    pub head: Coordinate,
    /// Body segments, head-adjacent first
    pub tail: Vec<Coordinate>,
}

/// Row-major RGB pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFrame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelFrame {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Fill a rectangle, clipped to the frame
    pub fn fill_rect(&mut self, x: i64, y: i64, w: usize, h: usize, color: Rgb) {
        let x0 = x.clamp(0, self.width as i64) as usize;
        let y0 = y.clamp(0, self.height as i64) as usize;
        let x1 = (x + w as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y + h as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }

    /// Packed opaque `[r, g, b, a, ...]` bytes, the layout window textures take
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.0, p.1, p.2, 255]).collect()
    }
}

/// Draw the board as flat `scale`×`scale` squares.
///
/// Order is background, food, head, then each tail segment, so later layers
/// win where cells overlap. Cells off the board are clipped away.
pub fn draw_board(snapshot: &BoardSnapshot, palette: &Palette, scale: usize) -> PixelFrame {
    let mut frame = PixelFrame::new(
        snapshot.width * scale,
        snapshot.height * scale,
        palette.background,
    );

    let mut fill_cell = |cell: Coordinate, color: Rgb| {
        frame.fill_rect(
            cell.x as i64 * scale as i64,
            cell.y as i64 * scale as i64,
            scale,
            scale,
            color,
        );
    };

    fill_cell(snapshot.food, palette.food);
    fill_cell(snapshot.head, palette.head);
    for &segment in &snapshot.tail {
        fill_cell(segment, palette.body);
    }

    frame
}
