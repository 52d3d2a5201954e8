use std::io::{BufReader, BufWriter, Read, Write};

use crate::error::VecError;
use crate::flat::FlatIndex;

const FLAT_MAGIC: [u8; 4] = [b'F', b'L', b'A', b'T'];
const FLAT_VERSION: u32 = 1;

/// Save serializes the index to a writer in a compact binary format:
///
/// ```text
/// [4B magic "FLAT"] [4B version=1]
/// [4B dim] [4B count]
/// [count x dim x 4B float32 vectors, insertion order]
/// ```
///
/// All multi-byte values are little-endian.
pub fn save(idx: &FlatIndex, w: &mut dyn Write) -> Result<(), VecError> {
    let mut bw = BufWriter::new(w);
    let write_err = |e: std::io::Error| VecError::Io(e.to_string());

    bw.write_all(&FLAT_MAGIC).map_err(write_err)?;
    bw.write_all(&FLAT_VERSION.to_le_bytes()).map_err(write_err)?;

    let dim = u32::try_from(idx.dim())
        .map_err(|_| VecError::InvalidFormat(format!("dimension {} too large", idx.dim())))?;
    let count = u32::try_from(idx.len())
        .map_err(|_| VecError::InvalidFormat(format!("count {} too large", idx.len())))?;
    bw.write_all(&dim.to_le_bytes()).map_err(write_err)?;
    bw.write_all(&count.to_le_bytes()).map_err(write_err)?;

    for &v in idx.raw() {
        bw.write_all(&v.to_le_bytes()).map_err(write_err)?;
    }

    bw.flush().map_err(write_err)?;
    Ok(())
}

/// Load deserializes an index from a reader.
///
/// The stream must hold exactly what [`save`] wrote: a short read, any
/// trailing bytes or a NaN/infinite component are reported as
/// [`VecError::InvalidFormat`].
pub fn load(r: &mut dyn Read) -> Result<FlatIndex, VecError> {
    let mut br = BufReader::new(r);

    let read_u32 = |br: &mut BufReader<&mut dyn Read>| -> Result<u32, VecError> {
        let mut buf = [0u8; 4];
        br.read_exact(&mut buf).map_err(truncated)?;
        Ok(u32::from_le_bytes(buf))
    };

    let mut magic = [0u8; 4];
    br.read_exact(&mut magic).map_err(truncated)?;
    if magic != FLAT_MAGIC {
        return Err(VecError::InvalidFormat(format!("invalid magic {magic:?}")));
    }

    let version = read_u32(&mut br)?;
    if version != FLAT_VERSION {
        return Err(VecError::InvalidFormat(format!(
            "unsupported version {version} (want {FLAT_VERSION})"
        )));
    }

    let dim = read_u32(&mut br)? as usize;
    if dim == 0 {
        return Err(VecError::InvalidFormat("invalid dimension 0".into()));
    }
    let count = read_u32(&mut br)? as usize;

    let total = count
        .checked_mul(dim)
        .ok_or_else(|| VecError::InvalidFormat(format!("{count} x {dim} overflows")))?;

    // Grow as data arrives so a corrupt header cannot force a huge allocation.
    let mut data = Vec::new();
    let mut fb = [0u8; 4];
    for i in 0..total {
        br.read_exact(&mut fb).map_err(truncated)?;
        let v = f32::from_le_bytes(fb);
        if !v.is_finite() {
            return Err(VecError::InvalidFormat(format!(
                "non-finite value in vector {} at component {}",
                i / dim,
                i % dim
            )));
        }
        data.push(v);
    }

    let mut probe = [0u8; 1];
    match br.read(&mut probe) {
        Ok(0) => {}
        Ok(_) => {
            return Err(VecError::InvalidFormat(
                "trailing data after last vector".into(),
            ));
        }
        Err(e) => return Err(VecError::Io(e.to_string())),
    }

    Ok(FlatIndex::from_raw(dim, data))
}

fn truncated(e: std::io::Error) -> VecError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        VecError::InvalidFormat("unexpected end of data".into())
    } else {
        VecError::Io(e.to_string())
    }
}
