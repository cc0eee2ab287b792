use std::{fmt::Display, fs::File, io::Write, path::Path};

use clap::ValueEnum;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::math::color::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "ppm"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; height * width],
        }
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Checked accessor; out-of-range coordinates yield None.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, new_color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let id = self.index(x, y);
        self.pixels[id] = new_color;
    }

    /// Computes every pixel from its coordinates, in parallel. Pixels are
    /// disjoint, so the workers share nothing but the closure.
    pub fn set_each_pixel<F>(&mut self, fun: F, progressbar: Option<indicatif::ProgressBar>)
    where
        F: Fn(usize, usize) -> Color + Sync,
    {
        let width = self.width;
        let set = |(id, pixel_color): (usize, &mut Color)| {
            let x = id % width;
            let y = id / width;
            *pixel_color = fun(x, y);
        };

        match progressbar {
            Some(pb) => self
                .pixels
                .par_iter_mut()
                .enumerate()
                .progress_with(pb)
                .for_each(set),
            None => self.pixels.par_iter_mut().enumerate().for_each(set),
        }
    }

    pub fn as_u8_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color.as_scaled_values())
            .collect()
    }

    pub fn save_to_file(&self, path: &Path, format: ImageFormat) -> std::io::Result<()> {
        let file = File::create(path)?;
        match format {
            ImageFormat::Ppm => self.save_to_ppm(file),
            ImageFormat::Png => self.save_to_png(file),
        }
    }
}

/// Plain-text PPM output. The layout is fixed: "P3", dimensions, the 255
/// maximum, then rows of clamped channel values with lines capped at 70
/// characters and a trailing newline.
impl Canvas {
    const MAX_LINE_LEN: usize = 70;

    fn ppm_header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    fn ppm_data(&self) -> String {
        let mut out = String::new();

        for row in self.pixels.chunks(self.width) {
            let mut line_len = 0;
            for val in row.iter().flat_map(|color| color.as_scaled_values()) {
                let val_str = val.to_string();
                if line_len == 0 {
                    out.push_str(&val_str);
                    line_len = val_str.len();
                } else if line_len + 1 + val_str.len() > Self::MAX_LINE_LEN {
                    out.push('\n');
                    out.push_str(&val_str);
                    line_len = val_str.len();
                } else {
                    out.push(' ');
                    out.push_str(&val_str);
                    line_len += 1 + val_str.len();
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn save_to_ppm(&self, mut file: File) -> std::io::Result<()> {
        file.write_all(self.ppm_header().as_bytes())?;
        file.write_all(self.ppm_data().as_bytes())?;
        Ok(())
    }
}

/// PNG output.
impl Canvas {
    pub fn save_to_png(&self, file: File) -> std::io::Result<()> {
        let mut encoder = png::Encoder::new(file, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;

        writer
            .write_image_data(&self.as_u8_rgb())
            .map_err(|e| e.into())
    }
}
