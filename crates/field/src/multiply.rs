// Copyright 2025 Irreducible Inc.

//! Carryless polynomial multiplication strategies.
//!
//! Every kernel takes two reduced `l`-limb operands and XORs the unreduced
//! `2l`-limb product into `acc`; the caller reduces afterwards (except for
//! [`mul_interleaved`], which folds the reduction into the scan). The
//! windowed left-to-right comb is the measured default; the others are kept
//! as named entry points so the benches can compare them on the target
//! platform.
//!
//! None of these run in constant time: the scans branch on bits of the
//! multiplier, which leaks secret material through timing. Callers handling
//! secrets must provide their own hardening.

use rayon::prelude::*;

use crate::limb_vec::{get_bit, shl, xor_shifted, xor_shifted_u128};

/// Limbs in the widest supported field (degree 571).
pub(crate) const MAX_LIMBS: usize = 9;

/// Window width of the default comb multiplier.
pub(crate) const WINDOW: usize = 4;

/// Right-to-left shift-and-add: one shifted XOR of `b` per set bit of `a`.
pub(crate) fn mul_acc_shift_add(a: &[u64], b: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(acc.len(), 2 * a.len());
	for (j, &limb) in a.iter().enumerate() {
		let mut limb = limb;
		while limb != 0 {
			let k = limb.trailing_zeros() as usize;
			limb &= limb - 1;
			xor_shifted(acc, b, j * 64 + k);
		}
	}
}

/// Right-to-left comb: scans bit column `k` across all limbs of `a` per
/// pass, shifting a widened copy of `b` one bit between passes.
pub(crate) fn mul_acc_comb_right_to_left(a: &[u64], b: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(acc.len(), 2 * a.len());
	let l = a.len();
	let mut shifted = [0u64; MAX_LIMBS + 1];
	shifted[..l].copy_from_slice(b);
	for k in 0..64 {
		for j in 0..l {
			if (a[j] >> k) & 1 == 1 {
				for (i, &limb) in shifted[..=l].iter().enumerate() {
					acc[j + i] ^= limb;
				}
			}
		}
		if k < 63 {
			shl(&mut shifted[..=l], 1);
		}
	}
}

/// Left-to-right comb: the windowed comb with a one-bit window, shifting the
/// accumulator instead of the multiplicand.
pub(crate) fn mul_acc_comb_left_to_right(a: &[u64], b: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(acc.len(), 2 * a.len());
	let l = a.len();
	for k in (0..64).rev() {
		for j in 0..l {
			if (a[j] >> k) & 1 == 1 {
				for (i, &limb) in b.iter().enumerate() {
					acc[j + i] ^= limb;
				}
			}
		}
		if k > 0 {
			shl(acc, 1);
		}
	}
}

/// Left-to-right comb with a 4-bit window, the default strategy.
///
/// Precomputes `b * u` for every window value `u`, then per pass XORs the
/// table row selected by the window of `a` at bit `64j + WINDOW * k` into
/// the accumulator at limb offset `j`, shifting the accumulator `WINDOW`
/// bits between passes. The passes accumulate
/// `sum_{k,j} b * a_window(j, k) * x^(64j + WINDOW * k)`, which is `a * b`.
pub(crate) fn mul_acc_comb_windowed(a: &[u64], b: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(acc.len(), 2 * a.len());
	let l = a.len();

	// table[u] = b * u; one limb wider than b for the x^3 shift
	let mut table = [[0u64; MAX_LIMBS + 1]; 1 << WINDOW];
	table[1][..l].copy_from_slice(b);
	for u in 2..1 << WINDOW {
		if u % 2 == 0 {
			table[u] = table[u / 2];
			shl(&mut table[u][..=l], 1);
		} else {
			table[u] = table[u - 1];
			for (i, &limb) in b.iter().enumerate() {
				table[u][i] ^= limb;
			}
		}
	}

	for k in (0..64 / WINDOW).rev() {
		for j in 0..l {
			let u = ((a[j] >> (WINDOW * k)) & ((1 << WINDOW) - 1)) as usize;
			if u != 0 {
				for (i, &limb) in table[u][..=l].iter().enumerate() {
					acc[j + i] ^= limb;
				}
			}
		}
		if k > 0 {
			shl(acc, WINDOW);
		}
	}
}

/// Shift-and-add with the reduction folded into the scan: maintains
/// `b * x^i mod f` stepwise, so `out` is the reduced `l`-limb result and no
/// separate reduction pass runs.
pub(crate) fn mul_interleaved(a: &[u64], b: &[u64], out: &mut [u64], degree: usize, poly: u128) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(out.len(), a.len());
	let l = a.len();
	let mut shifted = [0u64; MAX_LIMBS];
	shifted[..l].copy_from_slice(b);
	for i in 0..degree {
		if get_bit(a, i) {
			for (o, &limb) in out.iter_mut().zip(&shifted[..l]) {
				*o ^= limb;
			}
		}
		if i + 1 < degree {
			mul_x_in_place(&mut shifted[..l], degree, poly);
		}
	}
}

/// One step of `t <- t * x mod f`, for reduced `t`.
pub(crate) fn mul_x_in_place(limbs: &mut [u64], degree: usize, poly: u128) {
	let carry = get_bit(limbs, degree - 1);
	shl(limbs, 1);
	if carry {
		// None of the supported degrees is a multiple of 64, so bit `degree`
		// lands inside the top limb rather than past it.
		limbs[degree / 64] ^= 1u64 << (degree % 64);
		xor_shifted_u128(limbs, poly, 0);
	}
}

/// Shift-and-add with the set bits of `a` partitioned across rayon workers.
///
/// Each worker folds its share into a thread-private accumulator; the
/// accumulators are XOR-joined, which is order-insensitive, and the caller
/// reduces the joined product once.
pub(crate) fn mul_acc_parallel(a: &[u64], b: &[u64], acc: &mut [u64]) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(acc.len(), 2 * a.len());
	let joined = a
		.par_iter()
		.enumerate()
		.fold(
			|| [0u64; 2 * MAX_LIMBS],
			|mut local, (j, &limb)| {
				let mut limb = limb;
				while limb != 0 {
					let k = limb.trailing_zeros() as usize;
					limb &= limb - 1;
					xor_shifted(&mut local, b, j * 64 + k);
				}
				local
			},
		)
		.reduce(
			|| [0u64; 2 * MAX_LIMBS],
			|mut lhs, rhs| {
				for (l, r) in lhs.iter_mut().zip(rhs) {
					*l ^= r;
				}
				lhs
			},
		);
	for (dst, src) in acc.iter_mut().zip(joined) {
		*dst ^= src;
	}
}
