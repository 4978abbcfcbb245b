use crate::models::{BinaryMask, Raster};

/// Intensity above which a pixel counts as foreground
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Global threshold binarization.
/// Pixels strictly brighter than `threshold` become foreground.
pub fn threshold_binarize(gray: &Raster, threshold: u8) -> BinaryMask {
    let mut binary = BinaryMask::new(gray.width(), gray.height());

    for y in 0..gray.height() {
        for (x, &value) in gray.row(y).iter().enumerate() {
            if value > threshold {
                binary.set(x, y, true);
            }
        }
    }

    binary
}

/// Binarize using Otsu's threshold.
/// Pixels at or above the threshold become foreground.
pub fn otsu_binarize(gray: &Raster) -> BinaryMask {
    let threshold = calculate_otsu_threshold(gray.as_bytes());
    threshold_binarize(gray, threshold.saturating_sub(1))
}

/// Otsu's optimal threshold: the split `t` (class 1 is `< t`) that maximizes
/// between-class variance. Returns 128 when the histogram has one class.
pub fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_variance = 0.0;
    let mut optimal_threshold = 128u8;
    let mut class1_pixels = 0.0;
    let mut class1_sum = 0.0;

    // Running sums: class 1 holds intensities below `threshold`
    for threshold in 1..=255usize {
        let count = histogram[threshold - 1] as f64;
        class1_pixels += count;
        class1_sum += (threshold - 1) as f64 * count;

        let class2_pixels = total - class1_pixels;
        if class1_pixels == 0.0 || class2_pixels == 0.0 {
            continue;
        }

        let mean1 = class1_sum / class1_pixels;
        let mean2 = (total_sum - class1_sum) / class2_pixels;
        let variance = (class1_pixels / total) * (class2_pixels / total) * (mean1 - mean2).powi(2);

        if variance > best_variance {
            best_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = Raster::from_vec(2, 2, vec![100, 150, 127, 128]).unwrap();
        let binary = threshold_binarize(&gray, DEFAULT_THRESHOLD);

        assert!(!binary.get(0, 0)); // 100 <= 127
        assert!(binary.get(1, 0)); // 150 > 127
        assert!(!binary.get(0, 1)); // 127 is not foreground
        assert!(binary.get(1, 1));
    }

    #[test]
    fn test_otsu_binarize() {
        let mut data = vec![50u8; 50];
        data.extend(vec![200u8; 50]);
        let gray = Raster::from_vec(10, 10, data).unwrap();

        let threshold = calculate_otsu_threshold(gray.as_bytes());
        assert!(threshold > 50 && threshold <= 200);

        let binary = otsu_binarize(&gray);
        assert!(!binary.get(0, 0)); // Dark
        assert!(binary.get(0, 7)); // Light
        assert_eq!(binary.count_foreground(), 50);
    }

    #[test]
    fn test_otsu_uniform_image() {
        assert_eq!(calculate_otsu_threshold(&[90; 64]), 128);
    }
}
