use image::{DynamicImage, GrayImage};

/// Luma coefficients: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Row-major grid of 8-bit intensities
///
/// Processing stages never mutate a raster in place; each filter returns a
/// new one. Reads outside the grid return 0 (background).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Create a black raster of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap an existing buffer. Returns `None` when the length does not
    /// match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width.checked_mul(height)? {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert packed RGB bytes (3 per pixel) to luma.
    /// Returns `None` when the buffer is too short.
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> Option<Self> {
        let pixel_count = width.checked_mul(height)?;
        if rgb.len() < pixel_count.checked_mul(3)? {
            return None;
        }
        let data = rgb
            .chunks_exact(3)
            .take(pixel_count)
            .map(|px| {
                ((COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8)
                    as u8
            })
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Raster width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the raster holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Intensity at (x, y), 0 when out of bounds
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Set intensity at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// One row of pixels
    pub fn row(&self, y: usize) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Raw row-major bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Convert to an `image` grayscale buffer
    pub fn to_gray_image(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }
}

impl From<&GrayImage> for Raster {
    fn from(img: &GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.as_raw().clone(),
        }
    }
}

impl From<&DynamicImage> for Raster {
    fn from(img: &DynamicImage) -> Self {
        Self::from(&img.to_luma8())
    }
}
