//! Grid packet encoding and decoding

use super::error::DecodeError;
use super::grid::{BlockPos, QuantizedGrid};

/// Maximum accepted identifier token length in bytes.
pub const MAX_IDENTIFIER_LEN: u64 = 32767;

/// Maximum accepted cell count for a decoded grid (16M cells).
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Encode a grid packet: origin, dimensions, then one identifier token
/// per cell in row-major order.
///
/// An empty grid encodes as origin + height 0 and nothing else.
///
/// # Example
///
/// ```
/// use block_mosaic::{decode_grid, encode_grid, BlockPos, QuantizedGrid};
///
/// let grid = QuantizedGrid::new(1, 1, vec!["mosaic:stone".to_owned()]);
/// let bytes = encode_grid(BlockPos::new(10, 64, -4), &grid);
/// let (origin, decoded) = decode_grid(&bytes).unwrap();
/// assert_eq!(origin, BlockPos::new(10, 64, -4));
/// assert_eq!(decoded, grid);
/// ```
pub fn encode_grid(origin: BlockPos, grid: &QuantizedGrid) -> Vec<u8> {
    // Rough capacity: varint overhead is small next to the identifiers.
    let ids_len: usize = grid.cells().iter().map(|c| c.len() + 1).sum();
    let mut out = Vec::with_capacity(16 + ids_len);

    write_signed(&mut out, origin.x);
    write_signed(&mut out, origin.y);
    write_signed(&mut out, origin.z);

    write_unsigned(&mut out, grid.height() as u64);
    if grid.height() == 0 {
        return out;
    }
    write_unsigned(&mut out, grid.width() as u64);

    for cell in grid.cells() {
        write_unsigned(&mut out, cell.len() as u64);
        out.extend_from_slice(cell.as_bytes());
    }
    out
}

/// Decode a grid packet produced by [`encode_grid`].
///
/// Reads exactly the declared content and stops; trailing bytes are
/// ignored. Fails with a [`DecodeError`] if the stream is exhausted before
/// the declared number of tokens is read, or if declared sizes exceed the
/// [`MAX_IDENTIFIER_LEN`] / [`MAX_GRID_CELLS`] guards. A failed decode
/// never yields a partial grid.
pub fn decode_grid(bytes: &[u8]) -> Result<(BlockPos, QuantizedGrid), DecodeError> {
    let mut cursor = Cursor::new(bytes);

    let origin = BlockPos::new(
        cursor.read_signed()?,
        cursor.read_signed()?,
        cursor.read_signed()?,
    );

    let height = cursor.read_unsigned()?;
    if height == 0 {
        return Ok((origin, QuantizedGrid::empty()));
    }
    let width = cursor.read_unsigned()?;

    let total = width
        .checked_mul(height)
        .ok_or(DecodeError::GridTooLarge { cells: u64::MAX })?;
    if total > MAX_GRID_CELLS {
        return Err(DecodeError::GridTooLarge { cells: total });
    }

    let mut cells = Vec::with_capacity(total as usize);
    for _ in 0..total {
        let len = cursor.read_unsigned()?;
        if len > MAX_IDENTIFIER_LEN {
            return Err(DecodeError::IdentifierTooLong { len });
        }
        let raw = cursor.take(len as usize)?;
        cells.push(String::from_utf8(raw.to_vec())?);
    }

    Ok((
        origin,
        QuantizedGrid::new(width as usize, height as usize, cells),
    ))
}

/// Append a LEB128 unsigned varint.
fn write_unsigned(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Append a zigzag-mapped signed varint.
fn write_signed(out: &mut Vec<u8>, value: i32) {
    let zigzag = ((value << 1) ^ (value >> 31)) as u32;
    write_unsigned(out, zigzag as u64);
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.bytes.len() - self.pos < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_unsigned(&mut self) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = *self
                .bytes
                .get(self.pos)
                .ok_or(DecodeError::UnexpectedEof)?;
            self.pos += 1;

            if shift >= 64 || (shift == 63 && byte > 1) {
                return Err(DecodeError::VarIntTooLong);
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_signed(&mut self) -> Result<i32, DecodeError> {
        let raw = self.read_unsigned()?;
        let zigzag = u32::try_from(raw).map_err(|_| DecodeError::VarIntTooLong)?;
        Ok(((zigzag >> 1) as i32) ^ -((zigzag & 1) as i32))
    }
}
