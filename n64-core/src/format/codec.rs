use crate::error::FormatError;

/// Reverse the byte order inside every `group_size` run of `bytes`.
///
/// Groups keep their relative order, so `[A,B,C,D]` becomes `[B,A,D,C]` for a
/// group size of 2 and `[D,C,B,A]` for 4. The input length must be an exact
/// multiple of `group_size`.
pub fn normalize(bytes: &[u8], group_size: usize) -> Result<Vec<u8>, FormatError> {
    if group_size == 0 {
        return Err(FormatError::InvalidGroupSize);
    }
    if bytes.len() % group_size != 0 {
        return Err(FormatError::Misaligned {
            length: bytes.len(),
            group_size,
        });
    }

    let mut out = bytes.to_vec();
    for chunk in out.chunks_exact_mut(group_size) {
        chunk.reverse();
    }
    Ok(out)
}
