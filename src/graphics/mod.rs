pub mod blend;
pub mod board;
pub mod draw;
pub mod font;

use blend::Mixer;

use std::ops;

pub type Argb = u32;

pub(crate) trait Pixel:
    Copy
    + Clone
    + Sized
    + ops::BitAnd<Output = Self>
    + ops::BitOr<Output = Self>
    + std::fmt::Debug
{
    fn white() -> Self;
    fn trans() -> Self;

    fn over(self, other: Self) -> Self;
    fn mix(self, other: Self) -> Self;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P2(pub i32, pub i32);

/// Software canvas. Pixels start transparent and are composited over
/// `background` when copied out with [`PixelBuffer::scale_to`].
pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    color: Argb,
    mixer: Mixer,

    background: Argb,
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            color: Argb::white(),
            mixer: u32::over,

            background: 0xFF_F5_F5_DC,
        }
    }

    pub fn color(&mut self, c: Argb) {
        self.color = c;
    }

    pub fn current_color(&self) -> Argb {
        self.color
    }

    pub fn mixerd(&mut self) {
        self.mixer = u32::over;
    }

    pub fn set_background(&mut self, bg: Argb) {
        self.background = bg;
    }

    pub fn background(&self) -> Argb {
        self.background
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    #[cfg(test)]
    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer[i]
    }

    #[cfg(test)]
    pub fn pixel_xy(&self, p: P2) -> Option<Argb> {
        self.index(p).map(|i| self.buffer[i])
    }

    pub(crate) fn index(&self, p: P2) -> Option<usize> {
        let (x, y) = (usize::try_from(p.0).ok()?, usize::try_from(p.1).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub(crate) fn blend_at(&mut self, i: usize, c: Argb) {
        if let Some(p) = self.buffer.get_mut(i) {
            *p = (self.mixer)(*p, c);
        }
    }

    /// Copies the canvas into `dest`, each source pixel becoming a
    /// `scale`×`scale` block composited over the background.
    ///
    /// `width` is the row pitch of `dest`, which can be wider than
    /// `self.width * scale` when the window was resized.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], width: Option<usize>) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = width.unwrap_or(self.width * scale);
        if dst_width == 0 {
            return;
        }

        let background = self.background;

        self.buffer
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_exact_mut(dst_width * scale)) // with destination line groups
            .for_each(|(src_row, dst_rows)| {
                for dst_row in dst_rows.chunks_exact_mut(dst_width) {
                    src_row
                        .iter()
                        .zip(dst_row.chunks_exact_mut(scale))
                        .for_each(|(src_pixel, dst_chunk)| {
                            dst_chunk.fill(background.mix(*src_pixel))
                        });
                }
            });
    }
}
