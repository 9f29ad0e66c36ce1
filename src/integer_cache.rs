use lazy_static::*;

use crate::integer_constants::*;
use crate::Integer;

fn small(mag: usize, negative: bool) -> Integer {
    if mag == 0 {
        Integer::ZERO
    } else {
        Integer::from_limbs(vec![mag as Limb], negative)
    }
}

lazy_static! {
    pub static ref POS_CACHE: [Integer; MAX_CONSTANT + 1] = std::array::from_fn(|i| small(i, false));
    pub static ref NEG_CACHE: [Integer; MAX_CONSTANT + 1] = std::array::from_fn(|i| small(i, true));
    pub static ref ONE: Integer = POS_CACHE[1].clone();
}

#[test]
fn test_cache() {
    assert!(POS_CACHE[0].is_zero());
    assert_eq!(POS_CACHE[16].to_i64(), Some(16));
    assert_eq!(NEG_CACHE[3].to_i64(), Some(-3));
    assert_eq!(*ONE, Integer::from(1));
}
