use crate::error::{DataIoError, Result};

/// Borrows `len` bytes of `bz` starting at `offset`.
///
/// # Returns
/// * `Ok(&[u8])` - The requested bytes
/// * `Err(DataIoError::EndOfData)` - If fewer than `len` bytes follow `offset`
///
/// # Examples
/// ```
/// use dataio::slice::get_range;
///
/// let data = &[1, 2, 3, 4, 5];
/// assert_eq!(get_range(data, 1, 2).unwrap(), &[2, 3]);
/// assert!(get_range(data, 4, 2).is_err());
/// ```
pub fn get_range(bz: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = checked_end(bz.len(), offset, len)?;
    Ok(&bz[offset..end])
}

/// Mutable counterpart of [`get_range`].
pub fn get_range_mut(bz: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    let end = checked_end(bz.len(), offset, len)?;
    Ok(&mut bz[offset..end])
}

/// Borrows `N` bytes at `offset` as a fixed-size array.
pub fn get_array<const N: usize>(bz: &[u8], offset: usize) -> Result<[u8; N]> {
    let mut res = [0u8; N];
    res.copy_from_slice(get_range(bz, offset, N)?);
    Ok(res)
}

fn checked_end(total: usize, offset: usize, len: usize) -> Result<usize> {
    let available = total.saturating_sub(offset);
    match offset.checked_add(len) {
        Some(end) if end <= total => Ok(end),
        _ => Err(DataIoError::end_of_data(len, available)),
    }
}
