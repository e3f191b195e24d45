//! Monochrome bitmap view

/// A 1bpp image borrowed from external storage
///
/// Constructing a `Bitmap` only records the slice; it never allocates or
/// copies, so it can be built in a `const` next to the pixel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<'a> {
    row_stride: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as `height` rows of `row_stride` bytes each
    pub const fn new(row_stride: u16, height: u16, data: &'a [u8]) -> Self {
        Self {
            row_stride,
            height,
            data,
        }
    }

    /// Bytes per row
    pub const fn row_stride(&self) -> u16 {
        self.row_stride
    }

    /// Rows
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Width in pixels (every bit of every row byte), capped at `u16::MAX`
    pub const fn width(&self) -> u16 {
        self.row_stride.saturating_mul(8)
    }

    /// Underlying pixel bytes
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of row `y`, or `None` past the end of the data
    pub fn row(&self, y: u16) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_stride as usize;
        self.data.get(start..start + self.row_stride as usize)
    }

    /// Whether the pixel at (`x`, `y`) is set; out-of-range reads are unset
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width() {
            return false;
        }
        match self.row(y) {
            Some(row) => row[x as usize / 8] & (0x80 >> (x % 8)) != 0,
            None => false,
        }
    }

    /// Coordinates of every set pixel, row by row
    pub fn set_pixels(&self) -> impl Iterator<Item = (u16, u16)> + 'a {
        let bitmap = *self;
        (0..bitmap.height).flat_map(move |y| {
            (0..bitmap.width())
                .filter(move |&x| bitmap.pixel(x, y))
                .map(move |x| (x, y))
        })
    }
}
