//! Padding and tiling geometry: pure functions over `FrameBuffer`s.

use at_core::frame::{FrameBuffer, TileGrid};
use rayon::prelude::*;

/// Padding color (white, maximum brightness).
pub const PAD_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Smallest power of two `>= n`. Zero maps to 1.
///
/// # Example
/// ```
/// use at_ascii::geometry::next_power_of_two;
/// assert_eq!(next_power_of_two(100), 128);
/// assert_eq!(next_power_of_two(64), 64);
/// assert_eq!(next_power_of_two(1), 1);
/// ```
#[inline]
#[must_use]
pub fn next_power_of_two(n: u32) -> u32 {
    n.max(1).next_power_of_two()
}

/// Split `padded - original` between both sides: `(before, after)`.
///
/// An odd remainder gives the extra pixel to the `after` side.
///
/// # Example
/// ```
/// use at_ascii::geometry::padding;
/// assert_eq!(padding(50, 64), (7, 7));
/// assert_eq!(padding(5, 8), (1, 2));
/// ```
#[inline]
#[must_use]
pub fn padding(original: u32, padded: u32) -> (u32, u32) {
    debug_assert!(padded >= original);
    let total = padded - original;
    let before = total / 2;
    (before, total - before)
}

/// Center `image` in a white canvas whose sides are the next powers of two.
///
/// # Example
/// ```
/// use at_ascii::geometry::pad_image;
/// use at_core::frame::FrameBuffer;
/// let padded = pad_image(&FrameBuffer::new(100, 50));
/// assert_eq!((padded.width, padded.height), (128, 64));
/// ```
#[must_use]
pub fn pad_image(image: &FrameBuffer) -> FrameBuffer {
    let width = next_power_of_two(image.width);
    let height = next_power_of_two(image.height);
    if width == image.width && height == image.height {
        return image.clone();
    }

    let (left, _) = padding(image.width, width);
    let (top, _) = padding(image.height, height);
    let mut padded = FrameBuffer::filled(width, height, PAD_COLOR);

    let src_stride = image.width as usize * 4;
    let dst_stride = width as usize * 4;
    for (y, src_row) in image.data.chunks_exact(src_stride.max(1)).enumerate() {
        let start = (top as usize + y) * dst_stride + left as usize * 4;
        padded.data[start..start + src_stride].copy_from_slice(src_row);
    }
    padded
}

/// `(cols, rows)` of the tile grid for `resolution` tiles per row.
///
/// Precondition: `resolution` divides `frame.width` and the resulting edge
/// divides `frame.height`. Not checked in release builds. An edge taller than
/// the frame yields zero rows.
#[must_use]
pub fn tile_grid_shape(frame: &FrameBuffer, resolution: u32) -> (u32, u32) {
    let edge = tile_edge(frame, resolution);
    (resolution, frame.height / edge)
}

/// Tile edge length in pixels.
#[must_use]
pub fn tile_edge(frame: &FrameBuffer, resolution: u32) -> u32 {
    debug_assert!(resolution > 0 && resolution <= frame.width);
    debug_assert_eq!(frame.width % resolution, 0, "resolution must divide width");
    let edge = (frame.width / resolution.max(1)).max(1);
    debug_assert!(
        edge > frame.height || frame.height % edge == 0,
        "tile edge must divide height"
    );
    edge
}

/// Mean BT.709 grayscale of the `edge`×`edge` tile at pixel (x0, y0), in [0, 1].
///
/// # Example
/// ```
/// use at_ascii::geometry::tile_brightness;
/// use at_core::frame::FrameBuffer;
/// let white = FrameBuffer::filled(4, 4, (255, 255, 255));
/// assert!((tile_brightness(&white, 0, 0, 4) - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn tile_brightness(frame: &FrameBuffer, x0: u32, y0: u32, edge: u32) -> f32 {
    let mut total = 0.0f64;
    for y in y0..y0 + edge {
        for x in x0..x0 + edge {
            total += frame.grayscale(x, y);
        }
    }
    let count = f64::from(edge) * f64::from(edge);
    (total / count / 255.0) as f32
}

/// Brightness of every tile of an already padded frame.
///
/// Rows are computed in parallel; each tile is summed in the same order as a
/// sequential pass, so the result is deterministic.
#[must_use]
pub fn compute_tile_grid(padded: &FrameBuffer, resolution: u32) -> TileGrid {
    let edge = tile_edge(padded, resolution);
    let (cols, rows) = tile_grid_shape(padded, resolution);

    let mut values = vec![0.0f32; cols as usize * rows as usize];
    values
        .par_chunks_mut(cols as usize)
        .enumerate()
        .for_each(|(row, out)| {
            let y0 = row as u32 * edge;
            for (col, slot) in out.iter_mut().enumerate() {
                *slot = tile_brightness(padded, col as u32 * edge, y0, edge);
            }
        });

    TileGrid::from_values(values, cols, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_by_fifty_pads_to_128_by_64() {
        assert_eq!(next_power_of_two(100), 128);
        assert_eq!(next_power_of_two(50), 64);
        assert_eq!(padding(50, 64), (7, 7));
        assert_eq!(padding(100, 128), (14, 14));
    }

    #[test]
    fn padded_image_is_centered_and_white() {
        let image = FrameBuffer::filled(100, 50, (0, 0, 0));
        let padded = pad_image(&image);
        assert_eq!((padded.width, padded.height), (128, 64));
        // Corners are padding.
        assert_eq!(padded.pixel(0, 0), PAD_COLOR);
        assert_eq!(padded.pixel(127, 63), PAD_COLOR);
        // Border of the original area.
        assert_eq!(padded.pixel(13, 7), PAD_COLOR);
        assert_eq!(padded.pixel(14, 7), (0, 0, 0));
        assert_eq!(padded.pixel(113, 56), (0, 0, 0));
        assert_eq!(padded.pixel(114, 56), PAD_COLOR);
        assert_eq!(padded.pixel(113, 57), PAD_COLOR);
    }

    #[test]
    fn odd_padding_puts_extra_pixel_after() {
        let image = FrameBuffer::filled(5, 8, (0, 0, 0));
        let padded = pad_image(&image);
        assert_eq!(padded.width, 8);
        // 1 column before, 2 after.
        assert_eq!(padded.pixel(0, 0), PAD_COLOR);
        assert_eq!(padded.pixel(1, 0), (0, 0, 0));
        assert_eq!(padded.pixel(5, 0), (0, 0, 0));
        assert_eq!(padded.pixel(6, 0), PAD_COLOR);
    }

    #[test]
    fn power_of_two_image_is_untouched() {
        let mut image = FrameBuffer::new(4, 4);
        image.set_pixel(1, 2, (9, 8, 7));
        assert_eq!(pad_image(&image), image);
    }

    #[test]
    fn tile_grid_shape_follows_width() {
        let frame = FrameBuffer::new(128, 64);
        assert_eq!(tile_edge(&frame, 4), 32);
        assert_eq!(tile_grid_shape(&frame, 4), (4, 2));
        assert_eq!(tile_grid_shape(&frame, 128), (128, 64));
    }

    #[test]
    fn edge_taller_than_frame_gives_empty_grid() {
        let frame = FrameBuffer::filled(128, 64, (255, 255, 255));
        assert_eq!(tile_grid_shape(&frame, 1), (1, 0));
        assert!(compute_tile_grid(&frame, 1).values.is_empty());
    }

    #[test]
    fn tile_brightness_averages_grayscale() {
        // Left half black, right half white.
        let mut frame = FrameBuffer::filled(4, 2, (255, 255, 255));
        for y in 0..2 {
            for x in 0..2 {
                frame.set_pixel(x, y, (0, 0, 0));
            }
        }
        let grid = compute_tile_grid(&frame, 2);
        assert_eq!(grid.shape(), (2, 1));
        assert!(grid.get(0, 0).abs() < 1e-6);
        assert!((grid.get(1, 0) - 1.0).abs() < 1e-6);

        let whole = tile_brightness(&FrameBuffer::filled(2, 2, (255, 255, 255)), 0, 0, 2);
        assert!((whole - 1.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_grid_matches_sequential() {
        let mut frame = FrameBuffer::new(16, 16);
        let mut rng = fastrand::Rng::with_seed(3);
        for y in 0..16 {
            for x in 0..16 {
                frame.set_pixel(x, y, (rng.u8(..), rng.u8(..), rng.u8(..)));
            }
        }
        let grid = compute_tile_grid(&frame, 4);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(grid.get(col, row), tile_brightness(&frame, col * 4, row * 4, 4));
            }
        }
    }
}
