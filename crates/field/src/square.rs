// Copyright 2025 Irreducible Inc.

//! Squaring by bit-spreading.
//!
//! Squaring is GF(2)-linear: `(sum a_i x^i)^2 = sum a_i x^(2i)`, so the
//! unreduced square is the input with a zero interleaved after every bit.
//! The default path spreads one 4-bit window per table lookup; windows start
//! at multiples of 4, so their doubled offsets are byte-aligned and every
//! source limb expands into exactly two accumulator limbs.

use crate::limb_vec::{flip_bit, get_bit};

/// `SPREAD_4[u]` interleaves the 4 bits of `u` with zeroes.
const SPREAD_4: [u8; 16] = [
	0x00, 0x01, 0x04, 0x05, 0x10, 0x11, 0x14, 0x15, 0x40, 0x41, 0x44, 0x45, 0x50, 0x51, 0x54, 0x55,
];

#[inline]
fn spread_word(word: u32) -> u64 {
	let mut out = 0u64;
	for t in 0..8 {
		out |= (SPREAD_4[((word >> (4 * t)) & 0xF) as usize] as u64) << (8 * t);
	}
	out
}

/// XORs the unreduced square of `a` into the zeroed `2l`-limb accumulator.
pub(crate) fn square_acc_windowed(a: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(acc.len(), 2 * a.len());
	for (j, &limb) in a.iter().enumerate() {
		acc[2 * j] ^= spread_word(limb as u32);
		acc[2 * j + 1] ^= spread_word((limb >> 32) as u32);
	}
}

/// Table-free fallback: sets bit `2i` of the accumulator per set bit `i`.
#[allow(dead_code)]
pub(crate) fn square_acc_per_bit(a: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(acc.len(), 2 * a.len());
	for i in 0..a.len() * 64 {
		if get_bit(a, i) {
			flip_bit(acc, 2 * i);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;

	#[test]
	fn test_spread_table_matches_per_bit() {
		let mut rng = StdRng::seed_from_u64(6);
		for _ in 0..50 {
			let a: [u64; 3] = rng.random();
			let mut windowed = [0u64; 6];
			square_acc_windowed(&a, &mut windowed);
			let mut per_bit = [0u64; 6];
			square_acc_per_bit(&a, &mut per_bit);
			assert_eq!(windowed, per_bit);
		}
	}

	#[test]
	fn test_square_doubles_bit_positions() {
		let a = [1u64 << 40, 1 << 5];
		let mut acc = [0u64; 4];
		square_acc_windowed(&a, &mut acc);
		assert_eq!(acc, [0, 1 << 16, 1 << 10, 0]);
	}
}
