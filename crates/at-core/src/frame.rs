/// BT.709 luma weight for the red channel.
pub const LUMA_R: f64 = 0.2126;
/// BT.709 luma weight for the green channel.
pub const LUMA_G: f64 = 0.7152;
/// BT.709 luma weight for the blue channel.
pub const LUMA_B: f64 = 0.0722;

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use at_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use at_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Crée un buffer rempli d'une couleur unie (alpha opaque).
    ///
    /// # Example
    /// ```
    /// use at_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (255, 255, 255));
    /// assert_eq!(fb.pixel(1, 1), (255, 255, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Accès au pixel (x, y) → (r, g, b). Alpha is ignored by the engine.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = self.index(x, y);
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Write an opaque pixel at (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = self.index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
    }

    /// Niveau de gris BT.709 dans [0, 255], non arrondi.
    ///
    /// # Example
    /// ```
    /// use at_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(1, 1, (255, 255, 255));
    /// assert!((fb.grayscale(0, 0) - 255.0).abs() < 1e-9);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn grayscale(&self, x: u32, y: u32) -> f64 {
        let (r, g, b) = self.pixel(x, y);
        f64::from(r) * LUMA_R + f64::from(g) * LUMA_G + f64::from(b) * LUMA_B
    }
}

/// Grille de luminosité par tuile, valeurs dans [0, 1], row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    /// One brightness value per tile.
    pub values: Vec<f32>,
    /// Tiles per row.
    pub cols: u32,
    /// Tile rows.
    pub rows: u32,
}

impl TileGrid {
    /// Wrap row-major values. `values.len()` must equal `cols * rows`.
    #[must_use]
    pub fn from_values(values: Vec<f32>, cols: u32, rows: u32) -> Self {
        debug_assert_eq!(values.len(), cols as usize * rows as usize);
        Self { values, cols, rows }
    }

    /// Brightness of the tile at column `col`, row `row`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> f32 {
        self.values[row as usize * self.cols as usize + col as usize]
    }

    /// `(cols, rows)`.
    #[must_use]
    pub fn shape(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }
}

/// Grille de sortie ASCII.
///
/// # Example
/// ```
/// use at_core::frame::CharGrid;
/// let mut grid = CharGrid::new(4, 2);
/// grid.set(3, 1, '@');
/// assert_eq!(grid.get(3, 1), '@');
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of characters, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl CharGrid {
    /// Grid filled with spaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set the character at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Character at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

/// Fixed-size boolean glyph bitmap, row-major, `true` = foreground pixel.
///
/// # Example
/// ```
/// use at_core::frame::GlyphBitmap;
/// let g = GlyphBitmap::new(2, 2, vec![true, false, false, false]);
/// assert!((g.coverage() - 0.25).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` pixels.
    pub bits: Vec<bool>,
}

impl GlyphBitmap {
    /// Wrap row-major bits. `bits.len()` must equal `width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Self {
        debug_assert_eq!(bits.len(), width as usize * height as usize);
        Self {
            width,
            height,
            bits,
        }
    }

    /// Fraction of foreground pixels, in [0, 1]. An empty bitmap has coverage 0.
    #[must_use]
    pub fn coverage(&self) -> f32 {
        if self.bits.is_empty() {
            return 0.0;
        }
        let on = self.bits.iter().filter(|&&b| b).count();
        on as f32 / self.bits.len() as f32
    }
}
