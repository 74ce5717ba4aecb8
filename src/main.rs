use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use block_mosaic::{
    build_palette, decode_grid, encode_grid, BlockPos, PaletteBuild, PixelImage, Quantizer,
};
use blockprint::error::BlockprintError;
use blockprint::manifest::BlockManifest;
use blockprint::sources::TextureStore;

#[derive(Parser)]
#[command(name = "blockprint")]
#[command(about = "Print raster images into voxel worlds as block mosaics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the block palette and print its entries
    Palette {
        /// Block manifest JSON file
        #[arg(short, long)]
        manifest: PathBuf,

        /// Texture root directory
        #[arg(short, long)]
        textures: PathBuf,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Quantize an image against the palette and encode it as a grid packet
    Print {
        /// Block manifest JSON file
        #[arg(short, long)]
        manifest: PathBuf,

        /// Texture root directory
        #[arg(short, long)]
        textures: PathBuf,

        /// Input image (PNG)
        #[arg(short, long)]
        image: PathBuf,

        /// Output packet file
        #[arg(short, long)]
        output: PathBuf,

        /// Placement origin as "x,y,z"
        #[arg(long, default_value = "0,0,0", value_parser = parse_block_pos)]
        origin: BlockPos,

        /// Identifier used when no palette entry can be matched
        #[arg(long, default_value = "air")]
        fallback: String,
    },
    /// Decode a grid packet and report its contents
    Inspect {
        /// Input packet file
        #[arg(short, long)]
        input: PathBuf,

        /// Emit machine-readable JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn parse_block_pos(s: &str) -> Result<BlockPos, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got {s:?}"));
    }
    let coord = |p: &str| {
        p.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate {p:?}: {e}"))
    };
    Ok(BlockPos::new(
        coord(parts[0])?,
        coord(parts[1])?,
        coord(parts[2])?,
    ))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockprint=info,block_mosaic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Palette {
            manifest,
            textures,
            json,
        } => run_palette(&manifest, &textures, json),
        Commands::Print {
            manifest,
            textures,
            image,
            output,
            origin,
            fallback,
        } => run_print(&manifest, &textures, &image, &output, origin, &fallback),
        Commands::Inspect { input, json } => run_inspect(&input, json),
    }
}

/// Build the palette from a manifest and texture directory.
fn build_from_manifest(
    manifest_path: &Path,
    textures: &Path,
) -> Result<PaletteBuild, BlockprintError> {
    let manifest = BlockManifest::load(manifest_path)?;
    let store = TextureStore::new(textures);
    let candidates = manifest.candidates(&store);
    Ok(build_palette(&candidates))
}

fn run_palette(manifest: &Path, textures: &Path, json: bool) -> anyhow::Result<()> {
    let build = build_from_manifest(manifest, textures)?;

    if json {
        let entries: Vec<_> = build
            .palette
            .entries()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.identifier(),
                    "lab": [e.lab().l, e.lab().a, e.lab().b],
                })
            })
            .collect();
        let skipped: Vec<_> = build
            .report
            .skipped
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.identifier,
                    "reason": format!("{:?}", s.reason),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "entries": entries,
                "skipped": skipped,
            }))?
        );
        return Ok(());
    }

    for entry in build.palette.entries() {
        let lab = entry.lab();
        println!(
            "{:<40} L {:>7.2}  a {:>7.2}  b {:>7.2}",
            entry.identifier(),
            lab.l,
            lab.a,
            lab.b
        );
    }
    println!(
        "\n{} entries ({} candidates, {} skipped)",
        build.palette.len(),
        build.report.candidates,
        build.report.skipped.len()
    );
    Ok(())
}

fn run_print(
    manifest: &Path,
    textures: &Path,
    image: &Path,
    output: &Path,
    origin: BlockPos,
    fallback: &str,
) -> anyhow::Result<()> {
    let build = build_from_manifest(manifest, textures)?;
    if build.palette.is_empty() {
        tracing::warn!("palette is empty; every cell will be the fallback identifier");
    }

    // Unlike palette textures, a broken input image fails the whole run.
    let bytes = std::fs::read(image).map_err(|source| BlockprintError::ReadFile {
        path: image.to_owned(),
        source,
    })?;
    let pixels = PixelImage::decode_png(&bytes).map_err(BlockprintError::Image)?;
    tracing::info!(
        width = pixels.width(),
        height = pixels.height(),
        "image decoded"
    );

    let quantizer = Quantizer::new(build.palette).with_fallback(fallback);
    let grid = quantizer.quantize(&pixels);

    let packet = encode_grid(origin, &grid);
    std::fs::write(output, &packet)?;
    println!(
        "Encoded {}x{} grid to {} ({} bytes)",
        grid.width(),
        grid.height(),
        output.display(),
        packet.len()
    );
    Ok(())
}

fn run_inspect(input: &Path, json: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(input).map_err(|source| BlockprintError::ReadFile {
        path: input.to_owned(),
        source,
    })?;
    let (origin, grid) = decode_grid(&bytes).map_err(BlockprintError::Decode)?;

    // Identifier histogram; resolution is the materializer's business,
    // so unknown identifiers are reported like any other.
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cell in grid.cells() {
        *counts.entry(cell.as_str()).or_default() += 1;
    }
    let mut by_count: Vec<(&str, usize)> = counts.into_iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    if json {
        let histogram: Vec<_> = by_count
            .iter()
            .map(|(id, n)| serde_json::json!({ "id": id, "cells": n }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "origin": [origin.x, origin.y, origin.z],
                "width": grid.width(),
                "height": grid.height(),
                "histogram": histogram,
            }))?
        );
        return Ok(());
    }

    println!(
        "origin ({}, {}, {}), {}x{} cells",
        origin.x,
        origin.y,
        origin.z,
        grid.width(),
        grid.height()
    );
    for (id, n) in by_count {
        println!("{n:>8}  {id}");
    }
    Ok(())
}
