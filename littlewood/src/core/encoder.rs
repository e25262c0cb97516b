//! Bijection between coefficient codes and ±1 coefficient vectors.
//!
//! A code of degree `D` is read as a fixed-width binary string of `D + 1` bits,
//! most significant bit first. Bit `0` maps to coefficient `-1`, bit `1` to
//! `+1`, and bit order is coefficient order (leading coefficient first).

/// Number of records persisted per block file.
pub const BLOCK_SIZE: u64 = 20;

/// Largest degree whose codes fit in a `u64`.
pub const MAX_DEGREE: u32 = 63;

/// Largest valid code for `degree`, i.e. `2^(degree + 1) - 1`.
///
/// Returns `None` for degree 0 or degrees above [`MAX_DEGREE`].
pub fn max_code(degree: u32) -> Option<u64> {
    if degree == 0 || degree > MAX_DEGREE {
        return None;
    }
    Some(u64::MAX >> (MAX_DEGREE - degree))
}

/// Expand `code` into the `degree + 1` coefficients it identifies.
///
/// The caller keeps `code` within `0..=max_code(degree)`; higher bits are ignored.
pub fn encode(code: u64, degree: u32) -> Vec<i8> {
    debug_assert!(max_code(degree).is_some_and(|max| code <= max));
    (0..=degree)
        .rev()
        .map(|bit| if (code >> bit) & 1 == 1 { 1 } else { -1 })
        .collect()
}

/// Inverse of [`encode`]: read the coefficients back as bits.
///
/// Returns `None` if any coefficient is not ±1 or the vector is too long to fit.
pub fn decode(coefficients: &[i8]) -> Option<u64> {
    if coefficients.is_empty() || coefficients.len() > 64 {
        return None;
    }
    coefficients.iter().try_fold(0u64, |code, coeff| match coeff {
        1 => Some((code << 1) | 1),
        -1 => Some(code << 1),
        _ => None,
    })
}

/// Block that stores the record for `code`.
pub fn block_number(code: u64) -> u64 {
    code / BLOCK_SIZE
}

/// Inclusive code range covered by block `number` of `degree`.
///
/// The last block of a degree is clipped to the degree's maximum code; blocks
/// past the end return `None`.
pub fn block_range(degree: u32, number: u64) -> Option<(u64, u64)> {
    let max = max_code(degree)?;
    let first = number.checked_mul(BLOCK_SIZE)?;
    if first > max {
        return None;
    }
    let last = first.saturating_add(BLOCK_SIZE - 1).min(max);
    Some((first, last))
}

/// Number of blocks needed to store every code of `degree`.
pub fn blocks_in_degree(degree: u32) -> Option<u64> {
    let max = max_code(degree)?;
    Some(max / BLOCK_SIZE + 1)
}
