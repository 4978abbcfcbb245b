/// Bit-packed foreground mask
///
/// `true` marks a foreground (white) pixel. Reads outside the mask return
/// background, which is what the region extractor relies on at the borders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Create an all-background mask
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Foreground test at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Foreground test with signed coordinates, false outside the mask
    pub fn get_signed(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    /// Set (x, y) to foreground or background
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Raw packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BinaryMask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_mask() {
        let mut mask = BinaryMask::new(8, 8);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 8);

        mask.set(3, 4, true);
        assert!(mask.get(3, 4));
        assert!(!mask.get(3, 3));
        assert_eq!(mask.count_foreground(), 1);

        mask.set(3, 4, false);
        assert!(!mask.get(3, 4));
        assert_eq!(mask.count_foreground(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_background() {
        let mut mask = BinaryMask::new(5, 3);
        mask.set(10, 10, true); // Should not panic
        assert!(!mask.get(10, 10));
        assert!(!mask.get_signed(-1, 0));
        assert_eq!(mask.count_foreground(), 0);
    }
}
