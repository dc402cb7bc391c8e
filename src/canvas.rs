//! In-memory RGB canvas for report rendering.
//!
//! The canvas is an `embedded-graphics` draw target, so the renderer can draw
//! onto it or onto any other `Rgb888` target. Pixels outside the canvas are
//! dropped silently.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use image::{ImageResult, Rgb, RgbImage};
use std::convert::Infallible;
use std::path::Path;

/// Square RGB raster, black by default
pub struct Canvas {
    size: u32,
    pixels: Vec<Rgb888>,
}

impl Canvas {
    pub fn new(size: u32) -> Self {
        let len = size as usize * size as usize;
        Self {
            size,
            pixels: vec![Rgb888::BLACK; len],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Color at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.index(Point::new(x, y)).map(|i| self.pixels[i])
    }

    /// Number of pixels that are not background
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != Rgb888::BLACK).count()
    }

    pub fn count_color(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.size, self.size, |x, y| {
            let c = self.pixels[(y * self.size + x) as usize];
            Rgb([c.r(), c.g(), c.b()])
        })
    }

    pub fn save_png(&self, path: &Path) -> ImageResult<()> {
        self.to_rgb_image().save_with_format(path, image::ImageFormat::Png)
    }

    fn index(&self, point: Point) -> Option<usize> {
        let size = i64::from(self.size);
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some((y * size + x) as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.size, self.size)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}
