// Copyright 2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	hash::Hash,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytemuck::Zeroable;

use crate::{
	Random,
	arithmetic_traits::{InvertOrZero, Square},
	error::Error,
	serialization::{DeserializeBytes, SerializeBytes},
};

/// This trait is based on `ff::Field` with some unused functionality removed.
pub trait Field:
	Sized
	+ Eq
	+ Copy
	+ Clone
	+ Default
	+ Send
	+ Sync
	+ Debug
	+ Display
	+ Hash
	+ 'static
	+ Neg<Output = Self>
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Sum
	+ Product
	+ for<'a> Add<&'a Self, Output = Self>
	+ for<'a> Sub<&'a Self, Output = Self>
	+ for<'a> Mul<&'a Self, Output = Self>
	+ for<'a> Sum<&'a Self>
	+ for<'a> Product<&'a Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ for<'a> AddAssign<&'a Self>
	+ for<'a> SubAssign<&'a Self>
	+ for<'a> MulAssign<&'a Self>
	+ Square
	+ InvertOrZero
	+ Random
	+ Zeroable
	+ SerializeBytes
	+ DeserializeBytes
{
	/// The zero element of the field, the additive identity.
	const ZERO: Self;

	/// The one element of the field, the multiplicative identity.
	const ONE: Self;

	/// The characteristic of the field.
	const CHARACTERISTIC: usize;

	/// Returns true iff this element is zero.
	fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}

	/// Doubles this element.
	#[must_use]
	fn double(&self) -> Self;

	/// Computes the multiplicative inverse of this element,
	/// failing if the element is zero.
	fn invert(&self) -> Option<Self> {
		let inv = self.invert_or_zero();
		(!inv.is_zero()).then_some(inv)
	}

	/// Like [`Self::invert`], but reports the zero operand as an error.
	fn checked_invert(&self) -> Result<Self, Error> {
		self.invert().ok_or(Error::DivideByZero)
	}

	/// Computes `self / rhs` as `self * rhs^-1`, failing when `rhs` is zero.
	fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
		Ok(*self * rhs.checked_invert()?)
	}

	/// Exponentiates `self` by `exp`, where `exp` is a little-endian order
	/// integer exponent. A zero (or empty) exponent yields one.
	///
	/// Right-to-left square-and-multiply: the accumulator picks up the
	/// running square at every set exponent bit. The multiply sequence
	/// depends on the bit pattern of `exp`, so timing leaks the exponent.
	fn pow<S: AsRef<[u64]>>(&self, exp: S) -> Self {
		let digits = exp.as_ref();
		let n_bits = digits
			.iter()
			.enumerate()
			.rev()
			.find(|&(_, &digit)| digit != 0)
			.map_or(0, |(i, &digit)| i * 64 + 64 - digit.leading_zeros() as usize);

		let mut res = Self::ONE;
		let mut base = *self;
		for i in 0..n_bits {
			if (digits[i / 64] >> (i % 64)) & 1 == 1 {
				res *= base;
			}
			if i + 1 < n_bits {
				base = base.square();
			}
		}
		res
	}
}
