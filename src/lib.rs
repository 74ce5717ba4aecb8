//! Blockprint - print raster images into voxel worlds as block mosaics.
//!
//! The algorithmic core lives in the `block-mosaic` crate; this package
//! supplies the host glue: a block manifest (candidate enumeration with
//! shape descriptors), a filesystem texture store, and the CLI.
//! This library exposes modules for integration testing.

pub mod error;
pub mod manifest;
pub mod sources;
