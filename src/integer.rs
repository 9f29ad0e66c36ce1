//! # Integer
//! Arbitrary-precision signed integers in sign-magnitude form.
//!
//! The magnitude lives in a grow-only buffer of 64-bit limbs, least
//! significant first. The sign of `size` is the sign of the value and its
//! absolute value is the number of limbs in use.
//!
//! # Example
//! ```
//! use bigz::Integer;
//!
//! let a: Integer = "10000000000000000000000".parse().unwrap();
//! let b = Integer::from(900000000000_i64);
//! println!("a + b = {}", &a + &b);
//! println!("a / b = {}", &a / &b);
//! println!("a << 10 = {}", &a << 10_i64);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::{IntegerError, Result};
use crate::integer_cache::{NEG_CACHE, POS_CACHE};
use crate::integer_constants::*;
use crate::limb;

pub struct Integer {
    pub(crate) size: isize,
    pub(crate) data: Vec<Limb>,
}

// 构造与缓冲区
impl Integer {
    /// The value zero. Holds no allocation.
    pub const ZERO: Integer = Integer { size: 0, data: Vec::new() };

    pub fn new() -> Integer {
        Integer::ZERO
    }

    pub(crate) fn with_capacity(limbs: usize) -> Integer {
        let mut ret = Integer::ZERO;
        ret.ensure_capacity(limbs);
        ret
    }

    /// Builds an Integer from a little-endian magnitude.
    pub fn from_limbs(limbs: Vec<Limb>, negative: bool) -> Integer {
        let len = limbs.len();
        let mut ret = Integer { size: 0, data: limbs };
        ret.set_normalized(len, negative);
        ret
    }

    pub(crate) fn value_of(mag: u64, negative: bool) -> Integer {
        if mag == 0 {
            Integer::ZERO
        } else if mag <= MAX_CONSTANT as u64 {
            if negative {
                NEG_CACHE[mag as usize].clone()
            } else {
                POS_CACHE[mag as usize].clone()
            }
        } else {
            let mut ret = Integer::with_capacity(1);
            ret.data[0] = mag;
            ret.size = if negative { -1 } else { 1 };
            ret
        }
    }

    /// Number of limbs the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of limbs in use.
    pub fn len(&self) -> usize {
        self.abs_size()
    }

    /// Signed limb count: negative for negative values, zero for zero.
    pub fn size(&self) -> isize {
        self.size
    }

    #[inline(always)]
    pub(crate) fn abs_size(&self) -> usize {
        self.size.unsigned_abs()
    }

    /// Grows the buffer to at least `limbs` limbs, keeping the limbs already
    /// stored. Never shrinks.
    pub fn try_ensure_capacity(&mut self, limbs: usize) -> Result<()> {
        let old = self.data.len();
        if limbs <= old {
            return Ok(());
        }
        if self.data.try_reserve_exact(limbs - old).is_err() {
            debug!("limb buffer growth to {} limbs failed", limbs);
            return Err(IntegerError::OutOfMemory { limbs });
        }
        self.data.resize(limbs, 0);
        trace!("grew limb buffer from {} to {} limbs", old, limbs);
        Ok(())
    }

    /// Like [`try_ensure_capacity`](Self::try_ensure_capacity), but running
    /// out of memory is fatal.
    pub fn ensure_capacity(&mut self, limbs: usize) {
        if let Err(err) = self.try_ensure_capacity(limbs) {
            panic!("{}", err);
        }
    }

    /// The limbs currently in use.
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.data[..self.abs_size()]
    }

    /// Sets the size from a tentative limb count, dropping high zero limbs.
    pub(crate) fn set_normalized(&mut self, len: usize, negative: bool) {
        let len = limb::normalized_len(&self.data[..len]);
        self.size = if negative { -(len as isize) } else { len as isize };
        debug_assert!(self.well_formed());
    }

    fn well_formed(&self) -> bool {
        if self.size == 0 {
            return true;
        }
        self.abs_size() <= self.data.len() && self.data[self.abs_size() - 1] != 0
    }

    /// Overwrites `self` with `src` inside the existing buffer.
    pub(crate) fn assign(&mut self, src: &Integer) {
        let n = src.abs_size();
        self.ensure_capacity(n);
        self.data[..n].copy_from_slice(src.limbs());
        self.size = src.size;
    }

    /// Deep copy, independent of `self`.
    pub fn copy(&self) -> Integer {
        self.clone()
    }

    /// Exchanges the values and buffers of two Integers in O(1).
    pub fn swap(&mut self, other: &mut Integer) {
        std::mem::swap(self, other);
    }
}

impl Clone for Integer {
    fn clone(&self) -> Integer {
        Integer { size: self.size, data: self.limbs().to_vec() }
    }

    fn clone_from(&mut self, source: &Integer) {
        self.assign(source);
    }
}

impl Default for Integer {
    fn default() -> Integer {
        Integer::ZERO
    }
}

// 符号与位查询
impl Integer {
    /// Returns -1, 0 or 1 for negative, zero or positive values.
    #[inline]
    pub fn sign(&self) -> i32 {
        self.size.signum() as i32
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.size < 0
    }

    pub fn is_even(&self) -> bool {
        self.size == 0 || self.data[0] & 1 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    pub fn abs(&self) -> Integer {
        let mut ret = self.clone();
        ret.size = ret.size.abs();
        ret
    }

    /// Flips the sign in place.
    pub fn negate(&mut self) {
        self.size = -self.size;
    }

    /// Three-way comparison returning -1, 0 or 1.
    pub fn cmp3(&self, other: &Integer) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub(crate) fn cmp_abs(&self, other: &Integer) -> Ordering {
        limb::cmp_mag(self.limbs(), other.limbs())
    }

    /// Number of significant bits in the magnitude; 0 for zero.
    pub fn bit_length(&self) -> u64 {
        let n = self.abs_size();
        if n == 0 {
            0
        } else {
            (n as u64 - 1) * LIMB_BITS as u64 + (LIMB_BITS - self.data[n - 1].leading_zeros()) as u64
        }
    }

    /// Number of trailing zero bits in the magnitude; 0 for zero.
    pub fn trailing_zeros(&self) -> u64 {
        if self.is_zero() {
            0
        } else {
            limb::scan_1(self.limbs())
        }
    }

    /// Bit `index` of the magnitude.
    pub fn bit(&self, index: u64) -> bool {
        let word = (index / LIMB_BITS as u64) as usize;
        let sub_bit = (index % LIMB_BITS as u64) as u32;
        word < self.abs_size() && (self.data[word] >> sub_bit) & 1 == 1
    }

    /// The value as an `i64`, or `None` when it does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        match self.size {
            0 => Some(0),
            1 => i64::try_from(self.data[0]).ok(),
            -1 => {
                let mag = self.data[0];
                if mag <= i64::MAX as u64 + 1 {
                    Some((mag as i64).wrapping_neg())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

// 实现解析
impl Integer {
    /// Parses an optional leading `-` followed by one or more decimal digits.
    pub fn from_str_radix10(src: &str) -> Result<Integer> {
        let (negative, digits) = match src.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, src),
        };
        if digits.is_empty() {
            debug!("rejecting empty decimal literal {:?}", src);
            return Err(IntegerError::parse(src, "no digits"));
        }
        if !digits.bytes().all(|c| c.is_ascii_digit()) {
            debug!("rejecting decimal literal {:?}", src);
            return Err(IntegerError::parse(src, "invalid digit"));
        }

        let mut ret = Integer::ZERO;
        ret.try_ensure_capacity(limb::decimal_len_estimate(digits.len()))?;
        let len = limb::from_decimal(&mut ret.data, digits.as_bytes());
        ret.set_normalized(len, negative);
        Ok(ret)
    }
}

impl FromStr for Integer {
    type Err = IntegerError;

    fn from_str(src: &str) -> Result<Integer> {
        Integer::from_str_radix10(src)
    }
}

// 实现打印
impl Integer {
    pub fn to_string_radix10(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }
        // to_decimal consumes its input
        let mut mag = self.limbs().to_vec();
        let digits = limb::to_decimal(&mut mag);
        if self.is_negative() {
            let mut s = String::with_capacity(digits.len() + 1);
            s.push('-');
            s.push_str(&digits);
            s
        } else {
            digits
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_string_radix10();
        match s.strip_prefix('-') {
            Some(digits) => f.pad_integral(false, "", digits),
            None => f.pad_integral(true, "", &s),
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

macro_rules! impl_unsigned_to_integer {
    ($($u: ty),*) => {
    $(
    impl From<$u> for Integer {
        fn from(val: $u) -> Self {
            Integer::value_of(val as u64, false)
        }
    }
    )*
    };
}

macro_rules! impl_signed_to_integer {
    ($($i: ty),*) => {
    $(
    impl From<$i> for Integer {
        fn from(val: $i) -> Self {
            Integer::value_of((val as i64).unsigned_abs(), val < 0)
        }
    }
    )*
    };
}
impl_unsigned_to_integer!(u8, u16, u32, usize, u64);
impl_signed_to_integer!(i8, i16, i32, isize, i64);

impl TryFrom<&Integer> for i64 {
    type Error = ();

    fn try_from(val: &Integer) -> std::result::Result<i64, ()> {
        val.to_i64().ok_or(())
    }
}

// 实现大小比较
impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.limbs() == other.limbs()
    }
}
impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if self.is_negative() {
            self.cmp_abs(other).reverse()
        } else {
            self.cmp_abs(other)
        }
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.to_i64() == Some(*other)
    }
}

impl PartialOrd<i64> for Integer {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(match self.to_i64() {
            Some(v) => v.cmp(other),
            None if self.is_negative() => Ordering::Less,
            None => Ordering::Greater,
        })
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.limbs().hash(state);
    }
}

// 实现取反
impl Neg for Integer {
    type Output = Integer;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

#[test]
fn test_from() {
    let big = Integer::from(12_i8);
    assert_eq!(big.limbs(), &[12]);
    assert_eq!(big.size(), 1);

    let big = Integer::from(-100_i16);
    assert_eq!(big.limbs(), &[100]);
    assert_eq!(big.size(), -1);

    let big = Integer::from(i64::MIN);
    assert_eq!(big.limbs(), &[1 << 63]);
    assert_eq!(big.to_i64(), Some(i64::MIN));

    let big = Integer::from(u64::MAX);
    assert_eq!(big.to_i64(), None);
    assert!(big > i64::MAX);
}

#[test]
fn test_zero() {
    let zero = Integer::default();
    assert_eq!(zero.capacity(), 0);
    assert_eq!(zero, Integer::from(0));
    assert_eq!(Integer::from(0), "0".parse::<Integer>().unwrap());
    assert_eq!("-0".parse::<Integer>().unwrap().to_string(), "0");
    assert_eq!(zero.bit_length(), 0);
    assert_eq!(zero.trailing_zeros(), 0);
}

#[test]
fn test_parse() {
    assert_eq!("123".parse::<Integer>().unwrap(), Integer::from(123));
    assert_eq!("-0000123".parse::<Integer>().unwrap(), Integer::from(-123));
    let two_64: Integer = "18446744073709551616".parse().unwrap();
    assert_eq!(two_64.limbs(), &[0, 1]);

    for bad in ["", "-", "+1", "12a", " 1", "1-", "--1", "1_000"] {
        match bad.parse::<Integer>() {
            Err(IntegerError::ParseError { input, .. }) => assert_eq!(input, bad),
            other => panic!("{:?} parsed to {:?}", bad, other),
        }
    }
}

#[test]
fn test_to_string() {
    for s in [
        "0",
        "7",
        "-7",
        "9999999999999999999",
        "10000000000000000000",
        "-18446744073709551616",
        "100000000000000000000000000000000000000000000000000000000000000000000000000000001",
    ] {
        assert_eq!(s.parse::<Integer>().unwrap().to_string(), s);
    }
    assert_eq!(format!("{:>5}", Integer::from(-42)), "  -42");
    assert_eq!(format!("{:?}", Integer::from(3)), "Integer(3)");
}

#[test]
fn test_capacity_never_shrinks() {
    let mut a: Integer = "340282366920938463463374607431768211456".parse().unwrap();
    let cap = a.capacity();
    assert_eq!(a.len(), 3);
    a.assign(&Integer::from(5));
    assert_eq!(a, Integer::from(5));
    assert_eq!(a.len(), 1);
    assert_eq!(a.capacity(), cap);
    a.ensure_capacity(1);
    assert_eq!(a.capacity(), cap);
    a.ensure_capacity(cap + 4);
    assert_eq!(a.capacity(), cap + 4);
    assert_eq!(a, Integer::from(5));
}

#[test]
fn test_swap_and_copy() {
    let mut a = Integer::from(1);
    let mut b = Integer::from(-2);
    a.swap(&mut b);
    assert_eq!((a.clone(), b.clone()), (Integer::from(-2), Integer::from(1)));
    let mut c = a.copy();
    c.negate();
    assert_eq!(a, Integer::from(-2));
    assert_eq!(c, Integer::from(2));
}

#[test]
fn test_ordering() {
    let values: Vec<Integer> = ["-18446744073709551616", "-5", "0", "3", "18446744073709551616"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    for (i, a) in values.iter().enumerate() {
        for (j, b) in values.iter().enumerate() {
            assert_eq!(a.cmp3(b), (i as i32 - j as i32).signum());
        }
    }
}

#[test]
fn test_bits() {
    let a: Integer = "18446744073709551616".parse().unwrap();
    assert_eq!(a.bit_length(), 65);
    assert_eq!(a.trailing_zeros(), 64);
    assert!(a.bit(64));
    assert!(!a.bit(0));
    assert!(Integer::from(-6).is_even());
    assert_eq!(Integer::from(-6).trailing_zeros(), 1);
}
