use crate::renderer::Rgba;

/// Fixed-size pixel grid the render pass draws into.
///
/// Sized once at construction to the projection plane dimensions and never
/// reallocated.  Callers clamp coordinates themselves; an out-of-range
/// `set_pixel` is a caller bug and panics on the slice index.
pub struct Framebuffer {
    w: usize,
    h: usize,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn new(w: usize, h: usize) -> Self {
        assert!(w > 0 && h > 0, "framebuffer must be non-empty, got {w}×{h}");
        Self {
            w,
            h,
            pixels: vec![0; w * h],
        }
    }

    /// Zero-fill (background color) for the next frame.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline(always)]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        self.pixels[y * self.w + x] = color;
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared_and_clears_again() {
        let mut fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&p| p == 0));

        fb.set_pixel(1, 2, 0xFF_112233);
        assert_eq!(fb.pixels()[2 * 4 + 1], 0xFF_112233);

        fb.clear();
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    #[should_panic]
    fn out_of_range_write_panics() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(0, 3, 0xFF_FFFFFF);
    }
}
