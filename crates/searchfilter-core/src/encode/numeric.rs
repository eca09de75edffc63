//! Order-preserving numeric terms.
//!
//! A number is indexed at several precisions: the full value (shift 0) and
//! progressively coarser prefixes. Each term starts with a header byte
//! `NUMERIC_MAGIC + shift` followed by the significant big-endian bytes.

/// Header byte of a 64-bit numeric term at shift 0.
pub const NUMERIC_MAGIC: u8 = 0x60;

/// Bits dropped between successive granular terms.
pub const PRECISION_STEP: u32 = 16;

const BITS: u32 = u64::BITS;
const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

// Map an f64 onto a u64 whose unsigned order matches numeric order.
// Negative zero is folded onto zero so both encode identically.
const fn ordered_bits(value: f64) -> u64 {
    let value = if value == 0.0 { 0.0 } else { value };
    let bits = value.to_bits();
    if bits & SIGN_BIT == 0 {
        bits ^ SIGN_BIT
    } else {
        !bits
    }
}

const fn from_ordered_bits(ordered: u64) -> f64 {
    let bits = if ordered & SIGN_BIT == 0 {
        !ordered
    } else {
        ordered ^ SIGN_BIT
    };
    f64::from_bits(bits)
}

/// Term for `value` with the low `shift` bits dropped.
///
/// `shift` must be below 64.
#[must_use]
pub fn term_at_shift(value: f64, shift: u32) -> Vec<u8> {
    debug_assert!(shift < BITS, "shift out of range");

    let masked = (ordered_bits(value) >> shift) << shift;
    let len = (BITS - shift).div_ceil(8) as usize;

    #[expect(clippy::cast_possible_truncation)]
    let header = NUMERIC_MAGIC + shift as u8;

    let mut term = Vec::with_capacity(len + 1);
    term.push(header);
    term.extend_from_slice(&masked.to_be_bytes()[..len]);
    term
}

/// Full-precision term; the one equality filters match on.
#[must_use]
pub fn full_precision_term(value: f64) -> Vec<u8> {
    term_at_shift(value, 0)
}

/// Terms for every precision level, finest first.
#[must_use]
pub fn granular_terms(value: f64) -> Vec<Vec<u8>> {
    (0..BITS)
        .step_by(PRECISION_STEP as usize)
        .map(|shift| term_at_shift(value, shift))
        .collect()
}

/// Inverse of [`full_precision_term`]; `None` for coarser or foreign terms.
#[must_use]
pub fn decode_full_precision(term: &[u8]) -> Option<f64> {
    let (&header, body) = term.split_first()?;
    if header != NUMERIC_MAGIC {
        return None;
    }
    let bytes: [u8; 8] = body.try_into().ok()?;

    Some(from_ordered_bits(u64::from_be_bytes(bytes)))
}
