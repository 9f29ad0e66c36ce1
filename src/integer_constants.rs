/// One machine word of magnitude, least-significant limb first.
pub type Limb = u64;

/// Wide enough to hold the product of two limbs plus a limb.
pub type DoubleLimb = u128;

pub const LIMB_BITS: u32 = Limb::BITS;

/// Largest number of decimal digits that always fits in one limb.
pub const DIGITS_PER_LIMB: usize = 19;

/// `10^DIGITS_PER_LIMB`
pub const DECIMAL_CHUNK: Limb = 10_000_000_000_000_000_000;

/// `log2(10) * 1024`, rounded up.
pub const BITS_PER_DIGIT: usize = 3402;

pub const MAX_CONSTANT: usize = 16;
