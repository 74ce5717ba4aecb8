//! End-to-end pipeline test: manifest + textures on disk -> palette ->
//! quantized grid -> encoded packet -> decoded grid.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use block_mosaic::{
    build_palette, decode_grid, encode_grid, BlockPos, PixelImage, Quantizer, SkipReason,
};
use blockprint::manifest::BlockManifest;
use blockprint::sources::TextureStore;

/// Write an RGBA PNG fixture.
fn write_png(path: &Path, width: u32, height: u32, rgba: &[[u8; 4]]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    let data: Vec<u8> = rgba.iter().flatten().copied().collect();
    writer.write_image_data(&data).unwrap();
}

/// Solid-color texture pixels.
fn solid(rgba: [u8; 4], count: usize) -> Vec<[u8; 4]> {
    vec![rgba; count]
}

/// Lay out a texture pack and manifest in a temp directory:
/// three usable blocks, plus one of every skippable kind.
fn fixture_world(dir: &TempDir) -> (BlockManifest, TextureStore) {
    let textures = dir.path().join("textures");

    write_png(
        &textures.join("minecraft/coal_block.png"),
        4,
        4,
        &solid([18, 16, 16, 255], 16),
    );
    write_png(
        &textures.join("minecraft/snow_block.png"),
        4,
        4,
        &solid([248, 250, 250, 255], 16),
    );
    write_png(
        &textures.join("minecraft/stone.png"),
        4,
        4,
        &solid([125, 125, 125, 255], 16),
    );
    // Fully transparent: becomes the magenta sentinel entry.
    write_png(
        &textures.join("minecraft/structure_void.png"),
        4,
        4,
        &solid([0, 0, 0, 0], 16),
    );
    // Corrupt texture: skipped, not fatal.
    let corrupt = textures.join("minecraft/corrupt.png");
    fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
    fs::write(&corrupt, b"not a png at all").unwrap();

    let manifest_path = dir.path().join("blocks.json");
    fs::write(
        &manifest_path,
        r#"{
          "blocks": [
            { "id": "minecraft:coal_block" },
            { "id": "minecraft:snow_block" },
            { "id": "minecraft:stone" },
            { "id": "minecraft:structure_void" },
            { "id": "minecraft:oak_slab", "shape": { "max": [1.0, 0.5, 1.0] } },
            { "id": "minecraft:air", "void": true },
            { "id": "minecraft:corrupt" },
            { "id": "minecraft:unobtainium" }
          ]
        }"#,
    )
    .unwrap();

    (
        BlockManifest::load(&manifest_path).unwrap(),
        TextureStore::new(textures),
    )
}

#[test]
fn test_palette_build_from_disk() {
    let dir = TempDir::new().unwrap();
    let (manifest, store) = fixture_world(&dir);

    let candidates = manifest.candidates(&store);
    let build = build_palette(&candidates);

    // Four textured full cubes make it in; slab, air, corrupt texture and
    // missing texture are skipped with their own reasons.
    assert_eq!(build.palette.len(), 4);
    assert_eq!(build.report.candidates, 8);
    assert_eq!(build.report.skipped.len(), 4);

    let reason_for = |id: &str| {
        &build
            .report
            .skipped
            .iter()
            .find(|s| s.identifier == id)
            .unwrap()
            .reason
    };
    assert!(matches!(
        reason_for("minecraft:oak_slab"),
        SkipReason::NotFullCube
    ));
    assert!(matches!(reason_for("minecraft:air"), SkipReason::Void));
    assert!(matches!(
        reason_for("minecraft:corrupt"),
        SkipReason::Texture(_)
    ));
    assert!(matches!(
        reason_for("minecraft:unobtainium"),
        SkipReason::Texture(_)
    ));

    // Palette order follows manifest order.
    let ids: Vec<&str> = build
        .palette
        .entries()
        .iter()
        .map(|e| e.identifier())
        .collect();
    assert_eq!(
        ids,
        [
            "minecraft:coal_block",
            "minecraft:snow_block",
            "minecraft:stone",
            "minecraft:structure_void"
        ]
    );
}

#[test]
fn test_image_to_packet_and_back() {
    let dir = TempDir::new().unwrap();
    let (manifest, store) = fixture_world(&dir);
    let candidates = manifest.candidates(&store);
    let build = build_palette(&candidates);

    // A 2x2 input: near-black, near-white, mid-grey, magenta.
    let image_path = dir.path().join("input.png");
    write_png(
        &image_path,
        2,
        2,
        &[
            [10, 10, 10, 255],
            [245, 245, 245, 255],
            [128, 128, 128, 255],
            [250, 5, 250, 255],
        ],
    );
    let pixels = PixelImage::decode_png(&fs::read(&image_path).unwrap()).unwrap();

    let quantizer = Quantizer::new(build.palette).with_fallback("minecraft:air");
    let grid = quantizer.quantize(&pixels);

    assert_eq!(grid.get(0, 0), "minecraft:coal_block");
    assert_eq!(grid.get(1, 0), "minecraft:snow_block");
    assert_eq!(grid.get(0, 1), "minecraft:stone");
    // The magenta pixel lands on the transparent texture's sentinel entry.
    assert_eq!(grid.get(1, 1), "minecraft:structure_void");

    // Across the wire and back, via an actual file.
    let origin = BlockPos::new(100, 64, -42);
    let packet_path = dir.path().join("mosaic.grid");
    fs::write(&packet_path, encode_grid(origin, &grid)).unwrap();

    let (decoded_origin, decoded) = decode_grid(&fs::read(&packet_path).unwrap()).unwrap();
    assert_eq!(decoded_origin, origin);
    assert_eq!(decoded, grid);
}

#[test]
fn test_empty_manifest_quantizes_to_fallback() {
    let dir = TempDir::new().unwrap();
    let manifest_path = dir.path().join("blocks.json");
    fs::write(&manifest_path, r#"{ "blocks": [] }"#).unwrap();
    let manifest = BlockManifest::load(&manifest_path).unwrap();
    let store = TextureStore::new(dir.path().join("textures"));

    let build = build_palette(&manifest.candidates(&store));
    assert!(build.palette.is_empty());

    let image_path = dir.path().join("input.png");
    write_png(&image_path, 2, 1, &solid([90, 90, 90, 255], 2));
    let pixels = PixelImage::decode_png(&fs::read(&image_path).unwrap()).unwrap();

    let grid = Quantizer::new(build.palette)
        .with_fallback("minecraft:air")
        .quantize(&pixels);
    assert!(grid.cells().iter().all(|c| c == "minecraft:air"));

    // Empty-palette output still round-trips.
    let (_, decoded) = decode_grid(&encode_grid(BlockPos::ZERO, &grid)).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn test_truncated_packet_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (manifest, store) = fixture_world(&dir);
    let build = build_palette(&manifest.candidates(&store));

    let pixels = PixelImage::from_pixels(
        vec![block_mosaic::Rgba::opaque(125, 125, 125); 9],
        3,
        3,
    );
    let grid = Quantizer::new(build.palette).quantize(&pixels);
    let packet = encode_grid(BlockPos::ZERO, &grid);

    let packet_path = dir.path().join("truncated.grid");
    fs::write(&packet_path, &packet[..packet.len() - 4]).unwrap();

    let result = decode_grid(&fs::read(&packet_path).unwrap());
    assert!(result.is_err(), "truncated packet must not decode");
}
