// Copyright 2025 Irreducible Inc.

//! Reduction of a double-width product modulo `f(x) = x^degree + r(x)`.
//!
//! Every supported reduction polynomial is a sparse trinomial or pentanomial
//! whose low part `r(x)` fits in a `u128`, so clearing one high bit costs a
//! constant number of limb XORs.

use crate::limb_vec::{bit_len, xor_shifted_u128};

/// Reduces the polynomial in `acc` to its canonical representative of degree
/// below `degree`.
///
/// Scans bits from the top down to `degree`; each set bit `i` is cleared and
/// rewritten as `r(x) * x^(i - degree)`, using `x^i = (x^degree + r(x)) *
/// x^(i - degree) + r(x) * x^(i - degree)` over GF(2). Bits introduced by the
/// rewrite always land strictly below `i`, so a single downward pass
/// terminates with every bit at or above `degree` clear. Idempotent on
/// already-reduced input.
pub(crate) fn reduce_in_place(acc: &mut [u64], degree: usize, poly: u128) {
	debug_assert!(degree >= 128 || poly >> degree == 0, "r(x) must have degree below the field degree");
	for limb_idx in (degree / 64..acc.len()).rev() {
		let base = limb_idx * 64;
		// Only bits at or above `degree` within this limb are eligible.
		let mask = if limb_idx == degree / 64 { !0u64 << (degree % 64) } else { !0u64 };
		loop {
			let high = acc[limb_idx] & mask;
			if high == 0 {
				break;
			}
			let bit = base + 63 - high.leading_zeros() as usize;
			acc[limb_idx] ^= 1u64 << (bit - base);
			xor_shifted_u128(acc, poly, bit - degree);
		}
	}
	debug_assert!(bit_len(acc) <= degree);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::limb_vec::{LimbVec, get_bit};

	// x^163 + x^7 + x^6 + x^3 + 1
	const DEGREE: usize = 163;
	const POLY: u128 = 0xC9;

	fn reduce6(mut acc: [u64; 6]) -> [u64; 6] {
		reduce_in_place(&mut acc, DEGREE, POLY);
		acc
	}

	#[test]
	fn test_reduced_input_is_fixed_point() {
		let mut acc = [0u64; 6];
		acc[0] = 0xDEADBEEF;
		acc[2] = 1 << 34; // bit 162, just below the degree
		assert_eq!(reduce6(acc), acc);
	}

	#[test]
	fn test_single_high_bit_becomes_poly() {
		// x^163 = r(x) mod f(x)
		let mut acc = [0u64; 6];
		acc[2] = 1 << 35;
		assert_eq!(LimbVec::new(reduce6(acc)), LimbVec::<6>::from_u128(POLY));
	}

	#[test]
	fn test_x_324_reduces_to_pinned_value() {
		// x^324 = x^161 + x^12 + x^10 + x^5 + x mod f(x)
		let mut acc = [0u64; 6];
		acc[5] = 1 << 4;
		let out = reduce6(acc);
		let mut expected = LimbVec::<6>::from_u128(0x1422);
		expected.flip_bit(161);
		assert_eq!(LimbVec::new(out), expected);
	}

	#[test]
	fn test_all_high_bits_clear() {
		let mut acc = [u64::MAX; 6];
		reduce_in_place(&mut acc, DEGREE, POLY);
		for i in DEGREE..6 * 64 {
			assert!(!get_bit(&acc, i), "bit {i} still set");
		}
	}

	#[test]
	fn test_trinomial_with_wide_low_part() {
		// x^233 + x^74 + 1: r(x) spills into the second limb of the shifted
		// pattern for most shift offsets.
		let mut acc = [0u64; 8];
		acc[4] = 1 << 41; // bit 297 = 233 + 64
		reduce_in_place(&mut acc, 233, (1 << 74) | 1);
		let mut expected = LimbVec::<8>::ZERO;
		expected.flip_bit(74 + 64);
		expected.flip_bit(64);
		assert_eq!(LimbVec::new(acc), expected);
	}
}
