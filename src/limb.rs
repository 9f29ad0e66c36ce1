//! # Limb kernel
//! Unsigned magnitude arithmetic over little-endian limb slices.
//!
//! Every routine here works on plain magnitudes and knows nothing about
//! signs. Output slices must already be long enough for the result; callers
//! grow their buffers before calling in. Routines ending in `_in_place`
//! read each limb before writing it, so the destination and the first
//! source are the same slice.

use std::cmp::Ordering;

use log::trace;

use crate::integer_constants::*;

#[inline(always)]
fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let sum = a as DoubleLimb + b as DoubleLimb + carry as DoubleLimb;
    (sum as Limb, (sum >> LIMB_BITS) as Limb)
}

#[inline(always)]
fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let (d1, o1) = a.overflowing_sub(b);
    let (d2, o2) = d1.overflowing_sub(borrow);
    (d2, (o1 | o2) as Limb)
}

/// Length of `x` once high zero limbs are stripped.
pub fn normalized_len(x: &[Limb]) -> usize {
    let mut len = x.len();
    while len > 0 && x[len - 1] == 0 {
        len -= 1;
    }
    len
}

/// Compares two magnitudes of the same length, starting from the high limb.
pub fn cmp(x: &[Limb], y: &[Limb]) -> Ordering {
    debug_assert_eq!(x.len(), y.len());
    for (a, b) in x.iter().rev().zip(y.iter().rev()) {
        if a != b {
            return a.cmp(b);
        }
    }
    Ordering::Equal
}

/// Compares two normalized magnitudes: by length first, then limb by limb.
pub fn cmp_mag(x: &[Limb], y: &[Limb]) -> Ordering {
    x.len().cmp(&y.len()).then_with(|| cmp(x, y))
}

// 加法

/// `out[..x.len()] = x + y` where `x.len() >= y.len()`. Returns the carry-out.
pub fn add(out: &mut [Limb], x: &[Limb], y: &[Limb]) -> Limb {
    debug_assert!(x.len() >= y.len() && out.len() >= x.len());
    let mut carry = 0;
    for i in 0..y.len() {
        let (s, c) = adc(x[i], y[i], carry);
        out[i] = s;
        carry = c;
    }
    for i in y.len()..x.len() {
        let (s, c) = adc(x[i], 0, carry);
        out[i] = s;
        carry = c;
    }
    carry
}

/// `x += y` where `x.len() >= y.len()`. Returns the carry-out.
pub fn add_in_place(x: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert!(x.len() >= y.len());
    let mut carry = 0;
    for (i, limb) in x.iter_mut().enumerate() {
        if i >= y.len() && carry == 0 {
            break;
        }
        let b = if i < y.len() { y[i] } else { 0 };
        let (s, c) = adc(*limb, b, carry);
        *limb = s;
        carry = c;
    }
    carry
}

/// `x += w`. Returns the carry-out, which is `w` itself when `x` is empty.
pub fn add_1_in_place(x: &mut [Limb], w: Limb) -> Limb {
    let mut carry = w;
    for limb in x.iter_mut() {
        if carry == 0 {
            break;
        }
        let (s, c) = limb.overflowing_add(carry);
        *limb = s;
        carry = c as Limb;
    }
    carry
}

// 减法

/// `out[..x.len()] = x - y` where `x >= y`. Returns the borrow-out.
pub fn sub(out: &mut [Limb], x: &[Limb], y: &[Limb]) -> Limb {
    debug_assert!(x.len() >= y.len() && out.len() >= x.len());
    let mut borrow = 0;
    for i in 0..y.len() {
        let (d, b) = sbb(x[i], y[i], borrow);
        out[i] = d;
        borrow = b;
    }
    for i in y.len()..x.len() {
        let (d, b) = sbb(x[i], 0, borrow);
        out[i] = d;
        borrow = b;
    }
    borrow
}

/// `x -= y` where `x.len() >= y.len()`. Returns the borrow-out.
pub fn sub_in_place(x: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert!(x.len() >= y.len());
    let mut borrow = 0;
    for (i, limb) in x.iter_mut().enumerate() {
        if i >= y.len() && borrow == 0 {
            break;
        }
        let b = if i < y.len() { y[i] } else { 0 };
        let (d, bo) = sbb(*limb, b, borrow);
        *limb = d;
        borrow = bo;
    }
    borrow
}

/// `x = y - x` for slices of equal length. Returns the borrow-out.
pub fn rsub_in_place(x: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert_eq!(x.len(), y.len());
    let mut borrow = 0;
    for (limb, &b) in x.iter_mut().zip(y) {
        let (d, bo) = sbb(b, *limb, borrow);
        *limb = d;
        borrow = bo;
    }
    borrow
}

/// `x -= w`. Returns the borrow-out.
pub fn sub_1_in_place(x: &mut [Limb], w: Limb) -> Limb {
    let mut borrow = w;
    for limb in x.iter_mut() {
        if borrow == 0 {
            break;
        }
        let (d, b) = limb.overflowing_sub(borrow);
        *limb = d;
        borrow = b as Limb;
    }
    borrow
}

// 乘法

/// `x *= w`. Returns the high carry limb.
pub fn mul_1_in_place(x: &mut [Limb], w: Limb) -> Limb {
    let mut carry: Limb = 0;
    for limb in x.iter_mut() {
        let product = (*limb as DoubleLimb) * (w as DoubleLimb) + carry as DoubleLimb;
        *limb = product as Limb;
        carry = (product >> LIMB_BITS) as Limb;
    }
    carry
}

/// `out[..x.len()] += x * w`. Returns the high carry limb.
pub fn addmul_1(out: &mut [Limb], x: &[Limb], w: Limb) -> Limb {
    debug_assert!(out.len() >= x.len());
    let mut carry: Limb = 0;
    for (o, &a) in out.iter_mut().zip(x) {
        let t = (a as DoubleLimb) * (w as DoubleLimb) + *o as DoubleLimb + carry as DoubleLimb;
        *o = t as Limb;
        carry = (t >> LIMB_BITS) as Limb;
    }
    carry
}

/// `out[..x.len() + y.len()] = x * y`.
///
/// The larger operand must come first: `x.len() >= y.len() >= 1`. The top
/// limb of the product may be zero.
pub fn mul(out: &mut [Limb], x: &[Limb], y: &[Limb]) {
    debug_assert!(x.len() >= y.len() && !y.is_empty());
    let n = x.len() + y.len();
    debug_assert!(out.len() >= n);
    out[..n].fill(0);
    for (j, &w) in y.iter().enumerate() {
        let carry = addmul_1(&mut out[j..j + x.len()], x, w);
        out[j + x.len()] = carry;
    }
}

// 除法

/// `q[..x.len()] = x / d`, truncating. Returns the remainder.
pub fn divrem_1(q: &mut [Limb], x: &[Limb], d: Limb) -> Limb {
    debug_assert!(d != 0 && q.len() >= x.len());
    q[..x.len()].copy_from_slice(x);
    divrem_1_in_place(&mut q[..x.len()], d)
}

/// `x /= d`, truncating. Returns the remainder.
pub fn divrem_1_in_place(x: &mut [Limb], d: Limb) -> Limb {
    debug_assert!(d != 0);
    let d = d as DoubleLimb;
    let mut r: DoubleLimb = 0;
    for limb in x.iter_mut().rev() {
        let n = (r << LIMB_BITS) | *limb as DoubleLimb;
        *limb = (n / d) as Limb;
        r = n % d;
    }
    r as Limb
}

/// `x mod d`, leaving `x` untouched.
pub fn mod_1(x: &[Limb], d: Limb) -> Limb {
    debug_assert!(d != 0);
    let d = d as DoubleLimb;
    x.iter().rev().fold(0 as DoubleLimb, |r, &limb| ((r << LIMB_BITS) | limb as DoubleLimb) % d) as Limb
}

/// Truncating division of `n` by a divisor of at least two limbs.
///
/// Writes `n.len() - d.len() + 1` quotient limbs to `q` and `d.len()`
/// remainder limbs to `r`. Both may carry high zero limbs.
///
/// Uses Algorithm D in Knuth "The Art Of Computer Programming" Vol.2 section 4.3.1.
pub fn divrem(q: &mut [Limb], r: &mut [Limb], n: &[Limb], d: &[Limb]) {
    let dn = d.len();
    let nn = n.len();
    debug_assert!(dn >= 2 && nn >= dn && d[dn - 1] != 0);
    debug_assert!(q.len() > nn - dn && r.len() >= dn);

    // D1 normalize so the top divisor limb has its high bit set
    let shift = d[dn - 1].leading_zeros();
    let mut v = vec![0; dn];
    let mut u = vec![0; nn + 1];
    if shift == 0 {
        v.copy_from_slice(d);
        u[..nn].copy_from_slice(n);
    } else {
        shl(&mut v, d, shift);
        u[nn] = shl(&mut u[..nn], n, shift);
    }
    trace!("divrem: normalized by {} bits, {} / {} limbs", shift, nn, dn);

    let base: DoubleLimb = 1 << LIMB_BITS;
    let v_top = v[dn - 1] as DoubleLimb;
    let v_next = v[dn - 2] as DoubleLimb;

    for j in (0..=nn - dn).rev() {
        // D3 estimate qhat from the top two limbs
        let num = ((u[j + dn] as DoubleLimb) << LIMB_BITS) | u[j + dn - 1] as DoubleLimb;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= base || qhat * v_next > ((rhat << LIMB_BITS) | u[j + dn - 2] as DoubleLimb) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= base {
                break;
            }
        }

        // D4 multiply and subtract
        let mut borrow: Limb = 0;
        let mut carry: Limb = 0;
        for i in 0..dn {
            let p = qhat * v[i] as DoubleLimb + carry as DoubleLimb;
            carry = (p >> LIMB_BITS) as Limb;
            let (diff, b) = sbb(u[i + j], p as Limb, borrow);
            u[i + j] = diff;
            borrow = b;
        }
        let (diff, b) = sbb(u[j + dn], carry, borrow);
        u[j + dn] = diff;

        // D6 add back
        if b != 0 {
            qhat -= 1;
            let c = add_in_place(&mut u[j..j + dn], &v);
            u[j + dn] = u[j + dn].wrapping_add(c);
        }
        q[j] = qhat as Limb;
    }

    // D8 unnormalize
    if shift == 0 {
        r[..dn].copy_from_slice(&u[..dn]);
    } else {
        shr(&mut r[..dn], &u[..dn], shift);
    }
}

// 移位

/// `out[..x.len()] = x << bits` for `0 < bits < LIMB_BITS`. Returns the bits shifted out of the top.
pub fn shl(out: &mut [Limb], x: &[Limb], bits: u32) -> Limb {
    out[..x.len()].copy_from_slice(x);
    shl_in_place(&mut out[..x.len()], bits)
}

/// `x <<= bits` for `0 < bits < LIMB_BITS`. Returns the bits shifted out of the top.
pub fn shl_in_place(x: &mut [Limb], bits: u32) -> Limb {
    debug_assert!(bits > 0 && bits < LIMB_BITS);
    let mut carry = 0;
    for limb in x.iter_mut() {
        let v = *limb;
        *limb = (v << bits) | carry;
        carry = v >> (LIMB_BITS - bits);
    }
    carry
}

/// `out[..x.len()] = x >> bits` for `0 < bits < LIMB_BITS`.
/// Returns the bits shifted out of the bottom, left-aligned in a limb.
pub fn shr(out: &mut [Limb], x: &[Limb], bits: u32) -> Limb {
    out[..x.len()].copy_from_slice(x);
    shr_in_place(&mut out[..x.len()], bits)
}

/// `x >>= bits` for `0 < bits < LIMB_BITS`.
pub fn shr_in_place(x: &mut [Limb], bits: u32) -> Limb {
    debug_assert!(bits > 0 && bits < LIMB_BITS);
    let mut carry = 0;
    for limb in x.iter_mut().rev() {
        let v = *limb;
        *limb = (v >> bits) | carry;
        carry = v << (LIMB_BITS - bits);
    }
    carry
}

/// Number of trailing zero bits. `x` must be non-zero.
pub fn scan_1(x: &[Limb]) -> u64 {
    let mut count = 0;
    for &limb in x {
        if limb != 0 {
            return count + limb.trailing_zeros() as u64;
        }
        count += LIMB_BITS as u64;
    }
    count
}

// 向量辅助

fn strip_high_zeros(x: &mut Vec<Limb>) {
    let len = normalized_len(x);
    x.truncate(len);
}

fn strip_low_zero_bits(x: &mut Vec<Limb>) {
    let tz = scan_1(x);
    let limbs = (tz / LIMB_BITS as u64) as usize;
    let bits = (tz % LIMB_BITS as u64) as u32;
    x.drain(..limbs);
    if bits != 0 {
        shr_in_place(x, bits);
    }
    strip_high_zeros(x);
}

/// Truncating quotient and remainder of two normalized magnitudes; `d` non-empty.
fn divrem_vec(n: &[Limb], d: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    if cmp_mag(n, d) == Ordering::Less {
        return (Vec::new(), n.to_vec());
    }
    let mut q = vec![0; n.len() - d.len() + 1];
    let mut r = if d.len() == 1 {
        let rem = divrem_1(&mut q, n, d[0]);
        vec![rem]
    } else {
        let mut r = vec![0; d.len()];
        divrem(&mut q, &mut r, n, d);
        r
    };
    strip_high_zeros(&mut q);
    strip_high_zeros(&mut r);
    (q, r)
}

fn mul_vec(x: &[Limb], y: &[Limb]) -> Vec<Limb> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    let (x, y) = if x.len() >= y.len() { (x, y) } else { (y, x) };
    let mut out = vec![0; x.len() + y.len()];
    mul(&mut out, x, y);
    strip_high_zeros(&mut out);
    out
}

fn add_vec(x: &[Limb], y: &[Limb]) -> Vec<Limb> {
    let (x, y) = if x.len() >= y.len() { (x, y) } else { (y, x) };
    let mut out = vec![0; x.len() + 1];
    let carry = add(&mut out, x, y);
    out[x.len()] = carry;
    strip_high_zeros(&mut out);
    out
}

// 最大公约数

/// Binary GCD of two odd, normalized magnitudes.
///
/// When the operands differ by more than a limb a Euclidean remainder step
/// replaces the long run of subtractions.
pub fn gcd(mut u: Vec<Limb>, mut v: Vec<Limb>) -> Vec<Limb> {
    debug_assert!(!u.is_empty() && !v.is_empty());
    debug_assert!(u[0] & 1 == 1 && v[0] & 1 == 1);
    loop {
        match cmp_mag(&u, &v) {
            Ordering::Equal => return u,
            Ordering::Less => std::mem::swap(&mut u, &mut v),
            Ordering::Greater => {}
        }
        if u.len() > v.len() + 1 {
            let (_, r) = divrem_vec(&u, &v);
            if r.is_empty() {
                return v;
            }
            u = r;
        } else {
            sub_in_place(&mut u, &v);
            strip_high_zeros(&mut u);
        }
        strip_low_zero_bits(&mut u);
    }
}

/// Extended Euclid on magnitudes with `x >= y > 0`.
///
/// Returns `(g, s, negative)` with `(-1)^negative * s * x ≡ g (mod y)`, that
/// is `±s*x + t*y == g` for some `t`. The cofactor signs alternate every
/// step, so only magnitudes are tracked.
pub fn gcdext(x: &[Limb], y: &[Limb]) -> (Vec<Limb>, Vec<Limb>, bool) {
    debug_assert!(!y.is_empty() && cmp_mag(x, y) != Ordering::Less);
    let mut r0 = x.to_vec();
    let mut r1 = y.to_vec();
    let mut s0: Vec<Limb> = vec![1];
    let mut s1: Vec<Limb> = Vec::new();
    let mut negative = false;
    while !r1.is_empty() {
        let (q, r) = divrem_vec(&r0, &r1);
        let s2 = add_vec(&s0, &mul_vec(&q, &s1));
        r0 = std::mem::replace(&mut r1, r);
        s0 = std::mem::replace(&mut s1, s2);
        negative = !negative;
    }
    let negative = negative && !s0.is_empty();
    (r0, s0, negative)
}

// 十进制转换

/// Upper bound on the limbs needed for a number of `digits` decimal digits.
pub fn decimal_len_estimate(digits: usize) -> usize {
    let bits = ((digits * BITS_PER_DIGIT) >> 10) + 1;
    (bits + LIMB_BITS as usize - 1) / LIMB_BITS as usize
}

/// Parses ASCII decimal digits into `out`, returning the normalized length.
///
/// `out` must hold at least `decimal_len_estimate(digits.len())` limbs and
/// the digits must already be validated.
pub fn from_decimal(out: &mut [Limb], digits: &[u8]) -> usize {
    let mut size = 0;
    let mut first = digits.len() % DIGITS_PER_LIMB;
    if first == 0 {
        first = DIGITS_PER_LIMB;
    }
    let (head, tail) = digits.split_at(first.min(digits.len()));
    for group in std::iter::once(head).chain(tail.chunks(DIGITS_PER_LIMB)) {
        let value = group
            .iter()
            .fold(0, |acc: Limb, &c| acc * 10 + (c - b'0') as Limb);
        let carry = mul_1_in_place(&mut out[..size], DECIMAL_CHUNK);
        if carry != 0 {
            out[size] = carry;
            size += 1;
        }
        let carry = add_1_in_place(&mut out[..size], value);
        if carry != 0 {
            out[size] = carry;
            size += 1;
        }
    }
    size
}

/// Renders a magnitude as decimal digits. Destroys `x`.
pub fn to_decimal(x: &mut [Limb]) -> String {
    let mut size = normalized_len(x);
    if size == 0 {
        return String::from("0");
    }
    let mut groups = Vec::with_capacity(size * 20 / DIGITS_PER_LIMB + 1);
    while size > 0 {
        groups.push(divrem_1_in_place(&mut x[..size], DECIMAL_CHUNK));
        size = normalized_len(&x[..size]);
    }
    let mut s = String::with_capacity(groups.len() * DIGITS_PER_LIMB);
    let mut iter = groups.iter().rev();
    if let Some(top) = iter.next() {
        s.push_str(&top.to_string());
    }
    for group in iter {
        s.push_str(&format!("{:0width$}", group, width = DIGITS_PER_LIMB));
    }
    s
}

#[test]
fn test_add_sub() {
    let x = [Limb::MAX, Limb::MAX];
    let y = [1];
    let mut out = [0; 2];
    assert_eq!(add(&mut out, &x, &y), 1);
    assert_eq!(out, [0, 0]);

    let mut z = [0, 0, 1];
    assert_eq!(sub_in_place(&mut z, &[1]), 0);
    assert_eq!(z, [Limb::MAX, Limb::MAX, 0]);

    let mut w = [5, 0];
    assert_eq!(rsub_in_place(&mut w, &[3, 1]), 0);
    assert_eq!(w, [Limb::MAX - 1, 0]);
}

#[test]
fn test_add_1_on_empty() {
    let mut empty: [Limb; 0] = [];
    assert_eq!(add_1_in_place(&mut empty, 7), 7);
}

#[test]
fn test_mul() {
    let x = [Limb::MAX, Limb::MAX];
    let y = [Limb::MAX];
    let mut out = [0; 3];
    mul(&mut out, &x, &y);
    // (2^128 - 1)(2^64 - 1) = 2^192 - 2^128 - 2^64 + 1
    assert_eq!(out, [1, Limb::MAX, Limb::MAX - 1]);
}

#[test]
fn test_divrem_1() {
    let x = [0, 1];
    let mut q = [0; 2];
    assert_eq!(divrem_1(&mut q, &x, 3), 1);
    assert_eq!(q, [0x5555_5555_5555_5555, 0]);
    assert_eq!(mod_1(&x, 3), 1);
    assert_eq!(mod_1(&[7, 0, 0], 7), 0);
    assert_eq!(mod_1(&[], 7), 0);
}

#[test]
fn test_divrem() {
    // (2^128 + 5) / (2^64 + 1) = 2^64 - 1 remainder 6
    let n = [5, 0, 1];
    let d = [1, 1];
    let mut q = [0; 2];
    let mut r = [0; 2];
    divrem(&mut q, &mut r, &n, &d);
    assert_eq!(q, [Limb::MAX, 0]);
    assert_eq!(r, [6, 0]);
}

#[test]
fn test_divrem_unnormalized() {
    let d = [0x1234_5678_9abc_def0, 0x0fed_cba9];
    let q_expected = [0xdead_beef, 0x42];
    let mut n = [0; 4];
    mul(&mut n, &d, &q_expected);
    add_in_place(&mut n, &[17]);
    let mut q = [0; 3];
    let mut r = [0; 2];
    divrem(&mut q, &mut r, &n, &d);
    assert_eq!(q, [0xdead_beef, 0x42, 0]);
    assert_eq!(r, [17, 0]);
}

#[test]
fn test_shifts() {
    let mut x = [1 << 63, 1];
    assert_eq!(shl_in_place(&mut x, 1), 0);
    assert_eq!(x, [0, 3]);
    assert_eq!(shr_in_place(&mut x, 1), 0);
    assert_eq!(x, [1 << 63, 1]);
    assert_eq!(scan_1(&[0, 8]), 67);
}

#[test]
fn test_gcd() {
    assert_eq!(gcd(vec![21], vec![35]), vec![7]);
    assert_eq!(gcd(vec![1, 0, 1], vec![3]), vec![1]);
}

#[test]
fn test_gcdext() {
    let (g, s, negative) = gcdext(&[240], &[46]);
    assert_eq!(g, vec![2]);
    // -9 * 240 + 47 * 46 = 2
    assert_eq!((s, negative), (vec![9], true));
}

#[test]
fn test_decimal() {
    let digits = b"340282366920938463463374607431768211456";
    let mut out = vec![0; decimal_len_estimate(digits.len())];
    let size = from_decimal(&mut out, digits);
    assert_eq!(&out[..size], &[0, 0, 1]);
    assert_eq!(to_decimal(&mut out[..size]), "340282366920938463463374607431768211456");
    assert_eq!(to_decimal(&mut []), "0");
}
