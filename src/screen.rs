use std::io::Write;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::Color;

/// Row-major frame buffer, top scanline first.
pub struct Screen {
    pub width: usize,
    pub height: usize,
    /// Flat buffer of linear colors with length of `width * height`
    pub buffer: Box<[Color]>,
}
impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![Color::BLACK; width * height].into(),
        }
    }

    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<Color> {
        self.buffer.par_chunks_exact_mut(self.width)
    }

    /// Writes the buffer as an ASCII `P3` PPM, gamma correcting each pixel.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> Result<()> {
        let mut body = String::with_capacity(12 * self.buffer.len() + 32);
        body.push_str(&format!("P3\n{} {}\n255\n", self.width, self.height));
        for pixel in self.buffer.iter() {
            let [r, g, b] = pixel.to_rgb8();
            body.push_str(&format!("{} {} {}\n", r, g, b));
        }

        out.write_all(body.as_bytes())
            .and_then(|_| out.flush())
            .context("Failed to write PPM image")
    }
}
