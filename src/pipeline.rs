//! Multi-variant driver: preprocess, extract, classify, fuse.
//!
//! Each preprocessing variant runs the whole extraction path on its own
//! mask. Contours are fanned out across the rayon pool once there are more
//! than `parallel_threshold` of them. The fused list is deduplicated
//! sequentially after every variant has finished.

use crate::config::{CircleConfig, Preprocess, RectangleConfig};
use crate::detector::circle::detect_in_blob;
use crate::detector::contour::{Contour, order_boundary};
use crate::detector::fusion::{dedup, map_indexed};
use crate::detector::rectangle::detect_in_contour;
use crate::detector::regions::extract_blobs;
use crate::models::{BinaryMask, CircleCandidate, Raster, RectangleCandidate};
use crate::utils::binarization::{DEFAULT_THRESHOLD, otsu_binarize, threshold_binarize};
use crate::utils::filters::{close, gaussian_blur, open, sharpen};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Stage-level counters collected during one detection call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionTelemetry {
    /// Preprocessing variants executed
    pub variants_run: usize,
    /// Regions that passed the size filters, summed over variants
    pub blobs_found: usize,
    /// Candidates accepted across all variants
    pub candidates_before_dedup: usize,
    /// Candidates returned to the caller
    pub candidates_after_dedup: usize,
    /// Accepted rectangles per simplification strategy
    pub strategy_hits: BTreeMap<&'static str, usize>,
}

/// Binarized mask for one preprocessing variant
pub fn binarize_variant(raster: &Raster, variant: Preprocess) -> BinaryMask {
    match variant {
        Preprocess::Threshold => threshold_binarize(raster, DEFAULT_THRESHOLD),
        Preprocess::EdgeEnhanced => threshold_binarize(&sharpen(raster), DEFAULT_THRESHOLD),
        Preprocess::Morphological => {
            let binary = Raster::from_fn(raster.width(), raster.height(), |x, y| {
                if raster.get(x, y) > DEFAULT_THRESHOLD { 255 } else { 0 }
            });
            threshold_binarize(&open(&close(&binary)), DEFAULT_THRESHOLD)
        }
        Preprocess::Blurred { sigma } => {
            threshold_binarize(&gaussian_blur(raster, sigma), DEFAULT_THRESHOLD)
        }
        Preprocess::Otsu => otsu_binarize(raster),
    }
}

/// Rectangle path with telemetry
pub fn rectangles_with_telemetry(
    raster: &Raster,
    config: &RectangleConfig,
) -> (Vec<RectangleCandidate>, DetectionTelemetry) {
    let mut tel = DetectionTelemetry::default();
    if raster.is_empty() {
        return (Vec::new(), tel);
    }

    let mut fused = Vec::new();
    for &variant in &config.preprocess {
        let mask = binarize_variant(raster, variant);
        let contours: Vec<Contour> =
            extract_blobs(&mask, config.min_region_pixels, config.min_boundary_points)
                .into_iter()
                .map(|blob| order_boundary(blob.boundary))
                .collect();

        let hits = map_indexed(&contours, config.parallel_threshold, |contour| {
            detect_in_contour(contour, config)
        });
        debug!(
            "rectangles: {:?} gave {} contours, {} accepted",
            variant,
            contours.len(),
            hits.len()
        );

        tel.variants_run += 1;
        tel.blobs_found += contours.len();
        for (rect, strategy) in hits {
            *tel.strategy_hits.entry(strategy).or_default() += 1;
            fused.push(rect);
        }
    }

    tel.candidates_before_dedup = fused.len();
    let result = dedup(fused, config.thresholds.dedup_distance_fraction);
    tel.candidates_after_dedup = result.len();
    debug!(
        "rectangles: {} candidates fused into {}",
        tel.candidates_before_dedup, tel.candidates_after_dedup
    );

    (result, tel)
}

/// Circle path with telemetry
pub fn circles_with_telemetry(
    raster: &Raster,
    config: &CircleConfig,
) -> (Vec<CircleCandidate>, DetectionTelemetry) {
    let mut tel = DetectionTelemetry::default();
    if raster.is_empty() {
        return (Vec::new(), tel);
    }

    let mut fused = Vec::new();
    for &variant in &config.preprocess {
        let mask = binarize_variant(raster, variant);
        let blobs = extract_blobs(&mask, config.min_region_pixels, config.min_boundary_points);
        let hits = map_indexed(&blobs, config.parallel_threshold, |blob| {
            detect_in_blob(blob, config)
        });
        debug!(
            "circles: {:?} gave {} blobs, {} accepted",
            variant,
            blobs.len(),
            hits.len()
        );

        tel.variants_run += 1;
        tel.blobs_found += blobs.len();
        fused.extend(hits);
    }

    tel.candidates_before_dedup = fused.len();
    let result = dedup(fused, config.dedup_distance_fraction);
    tel.candidates_after_dedup = result.len();
    debug!(
        "circles: {} candidates fused into {}",
        tel.candidates_before_dedup, tel.candidates_after_dedup
    );

    (result, tel)
}
