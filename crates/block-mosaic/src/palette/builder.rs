//! Palette construction: sample every eligible candidate's texture
//!
//! Candidates are independent, so sampling runs on the rayon worker pool;
//! the order-preserving collect keeps palette insertion order equal to
//! candidate order regardless of scheduling.

use rayon::prelude::*;

use super::candidate::{BlockCandidate, TextureError};
use super::palette::{Palette, PaletteEntry};
use crate::color::{Lab, Rgb};
use crate::image::PixelImage;

/// Pixels with alpha below this are background and excluded from the
/// representative-color average.
const ALPHA_THRESHOLD: u8 = 128;

/// Sentinel color for fully transparent textures. Magenta, so degenerate
/// palette members are visually obvious instead of silently black.
const TRANSPARENT_FALLBACK: Rgb = Rgb::new(255, 0, 255);

/// Why a candidate was left out of the palette.
#[derive(Debug)]
pub enum SkipReason {
    /// Collision volume missing or not the full unit cube.
    NotFullCube,
    /// Candidate is an air-like void.
    Void,
    /// Texture fetch or decode failed.
    Texture(TextureError),
}

/// One skipped candidate with its reason.
#[derive(Debug)]
pub struct SkippedCandidate {
    /// The candidate's identifier.
    pub identifier: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome summary of a palette build.
///
/// Skips are an expected part of construction (most block registries are
/// full of partial shapes and unreadable textures); the report makes them
/// observable so callers and tests can assert on them instead of scraping
/// logs.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Total candidates examined.
    pub candidates: usize,
    /// Candidates excluded, in candidate order.
    pub skipped: Vec<SkippedCandidate>,
}

impl BuildReport {
    /// Number of candidates that produced palette entries.
    pub fn sampled(&self) -> usize {
        self.candidates - self.skipped.len()
    }
}

/// A built palette together with its construction report.
#[derive(Debug)]
pub struct PaletteBuild {
    /// The immutable palette.
    pub palette: Palette,
    /// What happened to every candidate.
    pub report: BuildReport,
}

enum Outcome {
    Entry(PaletteEntry),
    Skipped(SkippedCandidate),
}

/// Build a palette by sampling every eligible candidate's texture.
///
/// Per candidate:
///
/// 1. The collision box must be exactly the unit cube (within epsilon);
///    partial shapes are skipped as [`SkipReason::NotFullCube`].
/// 2. Void (air-like) candidates are skipped.
/// 3. Texture bytes are fetched and decoded; any failure skips just that
///    candidate ([`SkipReason::Texture`]), never the whole build.
/// 4. The representative color is the average of all pixels with
///    alpha >= 128, converted to Lab; a fully transparent texture gets the
///    magenta sentinel.
///
/// Candidates are sampled in parallel; insertion order always equals
/// candidate order, so the result is deterministic. Duplicate identifiers
/// follow the palette's last-write-wins rule.
///
/// Construction is a pure function of its inputs: no global state, no
/// "not yet initialized" mode. The returned palette is immutable and
/// freely shareable.
pub fn build_palette<C>(candidates: &[C]) -> PaletteBuild
where
    C: BlockCandidate + Sync,
{
    let outcomes: Vec<Outcome> = candidates.par_iter().map(sample_candidate).collect();

    let mut palette = Palette::new();
    let mut report = BuildReport {
        candidates: candidates.len(),
        skipped: Vec::new(),
    };

    for outcome in outcomes {
        match outcome {
            Outcome::Entry(entry) => palette.insert(entry),
            Outcome::Skipped(skip) => {
                tracing::debug!(
                    identifier = %skip.identifier,
                    reason = ?skip.reason,
                    "candidate skipped"
                );
                report.skipped.push(skip);
            }
        }
    }

    tracing::info!(
        entries = palette.len(),
        skipped = report.skipped.len(),
        "palette built"
    );

    PaletteBuild { palette, report }
}

fn sample_candidate<C: BlockCandidate>(candidate: &C) -> Outcome {
    let skip = |reason| {
        Outcome::Skipped(SkippedCandidate {
            identifier: candidate.identifier().to_owned(),
            reason,
        })
    };

    match candidate.collision_bounds() {
        Some(bounds) if bounds.is_unit_cube() => {}
        _ => return skip(SkipReason::NotFullCube),
    }
    if candidate.is_void() {
        return skip(SkipReason::Void);
    }

    let bytes = match candidate.texture_bytes() {
        Ok(bytes) => bytes,
        Err(err) => return skip(SkipReason::Texture(err)),
    };
    let texture = match PixelImage::decode_png(&bytes) {
        Ok(texture) => texture,
        Err(err) => return skip(SkipReason::Texture(TextureError::Decode(err))),
    };

    let rgb = average_opaque_rgb(&texture);
    Outcome::Entry(PaletteEntry::new(candidate.identifier(), Lab::from(rgb)))
}

/// Average color over sufficiently opaque pixels, truncating each channel
/// mean to an integer before the Lab conversion.
fn average_opaque_rgb(texture: &PixelImage) -> Rgb {
    let (mut sr, mut sg, mut sb) = (0u64, 0u64, 0u64);
    let mut count = 0u64;

    for px in texture.pixels() {
        if px.a < ALPHA_THRESHOLD {
            continue;
        }
        sr += px.r as u64;
        sg += px.g as u64;
        sb += px.b as u64;
        count += 1;
    }

    if count == 0 {
        return TRANSPARENT_FALLBACK;
    }

    Rgb::new(
        (sr as f64 / count as f64) as u8,
        (sg as f64 / count as f64) as u8,
        (sb as f64 / count as f64) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::palette::Bounds;

    /// In-memory candidate for builder tests.
    struct FakeCandidate {
        id: &'static str,
        bounds: Option<Bounds>,
        void: bool,
        texture: Result<Vec<u8>, &'static str>,
    }

    impl FakeCandidate {
        fn full_cube(id: &'static str, pixels: &[Rgba], width: u32, height: u32) -> Self {
            Self {
                id,
                bounds: Some(Bounds::UNIT),
                void: false,
                texture: Ok(encode_rgba(width, height, pixels)),
            }
        }
    }

    impl BlockCandidate for FakeCandidate {
        fn identifier(&self) -> &str {
            self.id
        }
        fn collision_bounds(&self) -> Option<Bounds> {
            self.bounds
        }
        fn is_void(&self) -> bool {
            self.void
        }
        fn texture_bytes(&self) -> Result<Vec<u8>, TextureError> {
            match &self.texture {
                Ok(bytes) => Ok(bytes.clone()),
                Err(msg) => Err(TextureError::Fetch((*msg).to_owned())),
            }
        }
    }

    fn encode_rgba(width: u32, height: u32, pixels: &[Rgba]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let data: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
            writer.write_image_data(&data).unwrap();
        }
        bytes
    }

    fn solid(color: Rgba, count: usize) -> Vec<Rgba> {
        vec![color; count]
    }

    #[test]
    fn test_full_cube_filter() {
        let candidates = [
            FakeCandidate::full_cube("t:stone", &solid(Rgba::opaque(120, 120, 120), 4), 2, 2),
            FakeCandidate {
                id: "t:slab",
                bounds: Some(Bounds::new([0.0; 3], [0.5, 1.0, 1.0])),
                void: false,
                texture: Ok(encode_rgba(1, 1, &[Rgba::opaque(1, 1, 1)])),
            },
            FakeCandidate {
                id: "t:no_collision",
                bounds: None,
                void: false,
                texture: Ok(encode_rgba(1, 1, &[Rgba::opaque(1, 1, 1)])),
            },
        ];
        let build = build_palette(&candidates);

        assert_eq!(build.palette.len(), 1);
        assert!(build.palette.contains("t:stone"));
        assert_eq!(build.report.candidates, 3);
        assert_eq!(build.report.skipped.len(), 2);
        assert!(build
            .report
            .skipped
            .iter()
            .all(|s| matches!(s.reason, SkipReason::NotFullCube)));
    }

    #[test]
    fn test_void_candidates_are_skipped() {
        let candidates = [FakeCandidate {
            id: "t:air",
            bounds: Some(Bounds::UNIT),
            void: true,
            texture: Ok(encode_rgba(1, 1, &[Rgba::opaque(0, 0, 0)])),
        }];
        let build = build_palette(&candidates);
        assert!(build.palette.is_empty());
        assert!(matches!(
            build.report.skipped[0].reason,
            SkipReason::Void
        ));
    }

    #[test]
    fn test_texture_failures_skip_only_that_candidate() {
        let candidates = [
            FakeCandidate {
                id: "t:missing",
                bounds: Some(Bounds::UNIT),
                void: false,
                texture: Err("no such resource"),
            },
            FakeCandidate {
                id: "t:corrupt",
                bounds: Some(Bounds::UNIT),
                void: false,
                texture: Ok(b"definitely not a png".to_vec()),
            },
            FakeCandidate::full_cube("t:dirt", &solid(Rgba::opaque(134, 96, 67), 4), 2, 2),
        ];
        let build = build_palette(&candidates);

        assert_eq!(build.palette.len(), 1);
        assert!(build.palette.contains("t:dirt"));
        assert_eq!(build.report.sampled(), 1);
        assert!(matches!(
            build.report.skipped[0].reason,
            SkipReason::Texture(TextureError::Fetch(_))
        ));
        assert!(matches!(
            build.report.skipped[1].reason,
            SkipReason::Texture(TextureError::Decode(_))
        ));
    }

    #[test]
    fn test_average_skips_translucent_pixels() {
        // Two opaque white pixels, one barely-visible black pixel (alpha
        // 127, below threshold) and one transparent black pixel. Only the
        // white pixels count.
        let pixels = [
            Rgba::new(255, 255, 255, 255),
            Rgba::new(255, 255, 255, 128),
            Rgba::new(0, 0, 0, 127),
            Rgba::new(0, 0, 0, 0),
        ];
        let candidates = [FakeCandidate::full_cube("t:snow", &pixels, 2, 2)];
        let build = build_palette(&candidates);

        let entry = build.palette.get("t:snow").unwrap();
        let expected = Lab::from(Rgb::new(255, 255, 255));
        assert_eq!(entry.lab(), expected);
    }

    #[test]
    fn test_average_truncates_channel_means() {
        // Means (127.5, 0, 0) truncate to (127, 0, 0).
        let pixels = [Rgba::opaque(127, 0, 0), Rgba::opaque(128, 0, 0)];
        let candidates = [FakeCandidate::full_cube("t:red", &pixels, 2, 1)];
        let build = build_palette(&candidates);

        let entry = build.palette.get("t:red").unwrap();
        assert_eq!(entry.lab(), Lab::from(Rgb::new(127, 0, 0)));
    }

    #[test]
    fn test_fully_transparent_texture_gets_magenta_sentinel() {
        let pixels = solid(Rgba::new(50, 60, 70, 0), 4);
        let candidates = [FakeCandidate::full_cube("t:glass", &pixels, 2, 2)];
        let build = build_palette(&candidates);

        let entry = build.palette.get("t:glass").unwrap();
        assert_eq!(entry.lab(), Lab::from(Rgb::new(255, 0, 255)));
    }

    #[test]
    fn test_insertion_order_matches_candidate_order() {
        let candidates: Vec<FakeCandidate> = [
            ("t:a", 10u8),
            ("t:b", 20),
            ("t:c", 30),
            ("t:d", 40),
        ]
        .into_iter()
        .map(|(id, v)| FakeCandidate::full_cube(id, &solid(Rgba::opaque(v, v, v), 1), 1, 1))
        .collect();

        let build = build_palette(&candidates);
        let ids: Vec<&str> = build
            .palette
            .entries()
            .iter()
            .map(|e| e.identifier())
            .collect();
        assert_eq!(ids, ["t:a", "t:b", "t:c", "t:d"]);
    }
}
