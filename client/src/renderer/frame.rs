pub const PIXEL_STRIDE: usize = 4;

/// One frame's worth of RGBA pixels, borrowed from the pixels buffer.
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl Frame<'_> {
    pub fn fill(&mut self, color: [u8; PIXEL_STRIDE]) {
        for pixel in self.buffer.chunks_exact_mut(PIXEL_STRIDE) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn draw_pixel(&mut self, x: u32, y: u32, color: [u8; PIXEL_STRIDE]) {
        if let Some(pixel) = self.pixel_mut(x, y) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; PIXEL_STRIDE]) {
        for y in y..y + height {
            for x in x..x + width {
                self.draw_pixel(x, y, color);
            }
        }
    }

    fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        // The x bound matters: a row-relative overflow would otherwise wrap
        // into the next row instead of being clipped.
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (x as usize + y as usize * self.width as usize) * PIXEL_STRIDE;
        self.buffer.get_mut(index..index + PIXEL_STRIDE)
    }
}
