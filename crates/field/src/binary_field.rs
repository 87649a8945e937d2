// Copyright 2025 Irreducible Inc.

//! The binary extension fields of SEC 2 table 3.
//!
//! Each field GF(2^D) is a distinct type generated by [`binary_field!`],
//! carrying its degree and reduction polynomial as associated constants so
//! the limb count is fixed at compile time and the kernels monomorphize per
//! field. Mixing elements of different degrees is ill-typed.

use std::{
	fmt::{self, Debug, Display, Formatter, Write as _},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use num_bigint::{BigInt, BigUint, Sign};
use rand::{
	Rng,
	distr::{Distribution, StandardUniform},
};

use crate::{
	Field,
	arithmetic_traits::{InvertOrZero, Square},
	error::Error,
	limb_vec::{LimbVec, limb_count},
	serialization::{DeserializeBytes, SerializationError, SerializeBytes},
};

/// A binary extension field GF(2^DEGREE) reduced by a fixed sparse
/// polynomial `x^DEGREE + r(x)`.
///
/// The representation is canonical: every externally visible value has all
/// bits at or above `DEGREE` clear, and equality is bit-for-bit. None of the
/// arithmetic runs in constant time; multiplication and inversion branch on
/// operand bits, so callers handling secrets must provide their own
/// hardening.
pub trait BinaryField: Field {
	/// Extension degree over GF(2).
	const DEGREE: usize;

	/// Limbs in the packed representation, `ceil(DEGREE / 64)`.
	const N_LIMBS: usize;

	/// Bytes in the SEC 1 octet-string encoding.
	const N_BYTES: usize = Self::DEGREE.div_ceil(8);

	/// The low part `r(x)` of the reduction polynomial, as an integer.
	const REDUCTION_POLY: u128;

	/// Parses the fixed-width big-endian hex encoding (SEC 1 §2.3.5).
	///
	/// ASCII whitespace is stripped; exactly `2 * N_BYTES` hex digits of
	/// either case must remain, and no bit at or above `DEGREE` may be set.
	fn from_hex(s: &str) -> Result<Self, Error>;

	/// The fixed-width lowercase hex encoding, `2 * N_BYTES` digits.
	fn to_hex(&self) -> String;

	/// Converts from the unsigned integer `sum a_i 2^i` (SEC 1 §2.3.9),
	/// failing when the value needs `DEGREE` bits or more.
	fn from_biguint(value: &BigUint) -> Result<Self, Error>;

	/// The unsigned integer `sum a_i 2^i` (SEC 1 §2.3.9).
	fn to_biguint(&self) -> BigUint;

	/// Exponentiation by a signed big integer; a negative exponent fails.
	fn pow_int(&self, exp: &BigInt) -> Result<Self, Error> {
		if exp.sign() == Sign::Minus {
			return Err(Error::NegativeExponent);
		}
		Ok(self.pow(exp.magnitude().to_u64_digits()))
	}

	/// The square root, i.e. the preimage under the Frobenius map `x -> x^2`.
	///
	/// Squaring is a field automorphism of order `DEGREE`, so the root is
	/// `self^(2^(DEGREE - 1))`: `DEGREE - 1` repeated squarings. Total.
	fn sqrt(self) -> Self {
		let mut root = self;
		for _ in 0..Self::DEGREE - 1 {
			root = root.square();
		}
		root
	}

	/// Multiplication by `x` with the reduction folded into the shift.
	fn mul_x(self) -> Self;

	// Multiplication strategies. All are total, return the canonical product
	// and exist as separate entry points so the benches can compare them;
	// `Mul` uses `mul_windowed`.

	/// Left-to-right comb with a 4-bit window, the measured default.
	fn mul_windowed(self, rhs: Self) -> Self;

	/// Right-to-left shift-and-add over the set bits of `self`.
	fn mul_shift_add(self, rhs: Self) -> Self;

	/// Right-to-left comb, shifting the multiplicand between bit columns.
	fn mul_comb_right_to_left(self, rhs: Self) -> Self;

	/// Left-to-right comb, shifting the accumulator between bit columns.
	fn mul_comb_left_to_right(self, rhs: Self) -> Self;

	/// Per-bit scan with the reduction interleaved, no widened accumulator.
	fn mul_interleaved(self, rhs: Self) -> Self;

	/// Shift-and-add fanned out over rayon workers, one thread-private
	/// accumulator each, XOR-joined before the single reduction.
	fn mul_parallel(self, rhs: Self) -> Self;
}

fn parse_hex<const N: usize>(s: &str, degree: usize) -> Result<LimbVec<N>, Error> {
	let expected_bytes = degree.div_ceil(8);
	let digits: Vec<char> = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
	if digits.len() != 2 * expected_bytes {
		return Err(Error::InvalidHexLength { expected_bytes });
	}
	let mut bytes = vec![0u8; expected_bytes];
	for (i, pair) in digits.chunks(2).enumerate() {
		let hi = pair[0].to_digit(16).ok_or(Error::InvalidHexDigit { digit: pair[0] })?;
		let lo = pair[1].to_digit(16).ok_or(Error::InvalidHexDigit { digit: pair[1] })?;
		bytes[i] = (hi << 4 | lo) as u8;
	}
	let limbs = LimbVec::from_bytes_be(&bytes);
	if limbs.bit_len() > degree {
		return Err(Error::ValueOutOfRange { degree });
	}
	Ok(limbs)
}

fn format_hex<const N: usize>(limbs: &LimbVec<N>, degree: usize) -> String {
	let n_bytes = degree.div_ceil(8);
	let mut out = String::with_capacity(2 * n_bytes);
	for byte in limbs.to_bytes_be(n_bytes) {
		write!(out, "{byte:02x}").expect("writing to a String cannot fail");
	}
	out
}

fn limbs_from_biguint<const N: usize>(value: &BigUint, degree: usize) -> Result<LimbVec<N>, Error> {
	if value.bits() > degree as u64 {
		return Err(Error::ValueOutOfRange { degree });
	}
	let mut limbs = [0u64; N];
	for (i, digit) in value.to_u64_digits().into_iter().enumerate() {
		limbs[i] = digit;
	}
	Ok(LimbVec::new(limbs))
}

fn limbs_to_biguint<const N: usize>(limbs: &LimbVec<N>) -> BigUint {
	limbs.limbs().iter().rev().fold(BigUint::ZERO, |acc, &limb| (acc << 64) | BigUint::from(limb))
}

/// Macro to generate the implementation of a [`BinaryField`].
macro_rules! binary_field {
	($(#[$attr:meta])* $vis:vis $name:ident, $degree:literal, $poly:expr) => {
		$(#[$attr])*
		#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, bytemuck::Zeroable)]
		#[repr(transparent)]
		$vis struct $name(LimbVec<{ limb_count($degree) }>);

		impl $name {
			pub const fn new(value: LimbVec<{ limb_count($degree) }>) -> Self {
				Self(value)
			}

			pub const fn val(self) -> LimbVec<{ limb_count($degree) }> {
				self.0
			}

			fn reduced(mut acc: [u64; 2 * limb_count($degree)]) -> Self {
				crate::reduce::reduce_in_place(&mut acc, $degree, $poly);
				let mut limbs = [0u64; limb_count($degree)];
				limbs.copy_from_slice(&acc[..limb_count($degree)]);
				Self(LimbVec::new(limbs))
			}
		}

		impl Neg for $name {
			type Output = Self;

			#[inline]
			fn neg(self) -> Self::Output {
				self
			}
		}

		impl Add<Self> for $name {
			type Output = Self;

			#[allow(clippy::suspicious_arithmetic_impl)]
			#[inline]
			fn add(self, rhs: Self) -> Self::Output {
				Self(self.0 ^ rhs.0)
			}
		}

		impl Add<&Self> for $name {
			type Output = Self;

			#[allow(clippy::suspicious_arithmetic_impl)]
			#[inline]
			fn add(self, rhs: &Self) -> Self::Output {
				Self(self.0 ^ rhs.0)
			}
		}

		impl Sub<Self> for $name {
			type Output = Self;

			#[allow(clippy::suspicious_arithmetic_impl)]
			#[inline]
			fn sub(self, rhs: Self) -> Self::Output {
				Self(self.0 ^ rhs.0)
			}
		}

		impl Sub<&Self> for $name {
			type Output = Self;

			#[allow(clippy::suspicious_arithmetic_impl)]
			#[inline]
			fn sub(self, rhs: &Self) -> Self::Output {
				Self(self.0 ^ rhs.0)
			}
		}

		impl Mul<Self> for $name {
			type Output = Self;

			fn mul(self, rhs: Self) -> Self::Output {
				if self == rhs { self.square() } else { crate::BinaryField::mul_windowed(self, rhs) }
			}
		}

		impl Mul<&Self> for $name {
			type Output = Self;

			fn mul(self, rhs: &Self) -> Self::Output {
				self * *rhs
			}
		}

		impl AddAssign<Self> for $name {
			#[inline]
			fn add_assign(&mut self, rhs: Self) {
				*self = *self + rhs;
			}
		}

		impl AddAssign<&Self> for $name {
			#[inline]
			fn add_assign(&mut self, rhs: &Self) {
				*self = *self + rhs;
			}
		}

		impl SubAssign<Self> for $name {
			#[inline]
			fn sub_assign(&mut self, rhs: Self) {
				*self = *self - rhs;
			}
		}

		impl SubAssign<&Self> for $name {
			#[inline]
			fn sub_assign(&mut self, rhs: &Self) {
				*self = *self - rhs;
			}
		}

		impl MulAssign<Self> for $name {
			#[inline]
			fn mul_assign(&mut self, rhs: Self) {
				*self = *self * rhs;
			}
		}

		impl MulAssign<&Self> for $name {
			#[inline]
			fn mul_assign(&mut self, rhs: &Self) {
				*self = *self * rhs;
			}
		}

		impl Sum<Self> for $name {
			fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
				iter.fold(Self::ZERO, |acc, x| acc + x)
			}
		}

		impl<'a> Sum<&'a Self> for $name {
			fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
				iter.fold(Self::ZERO, |acc, x| acc + x)
			}
		}

		impl Product<Self> for $name {
			fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
				iter.fold(Self::ONE, |acc, x| acc * x)
			}
		}

		impl<'a> Product<&'a Self> for $name {
			fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
				iter.fold(Self::ONE, |acc, x| acc * x)
			}
		}

		impl Square for $name {
			fn square(self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::square::square_acc_windowed(self.0.limbs(), &mut acc);
				Self::reduced(acc)
			}
		}

		impl InvertOrZero for $name {
			fn invert_or_zero(self) -> Self {
				let mut out = [0u64; limb_count($degree)];
				if crate::invert::invert(self.0.limbs(), $degree, $poly, &mut out) {
					Self(LimbVec::new(out))
				} else {
					Self::ZERO
				}
			}
		}

		impl Field for $name {
			const ZERO: Self = Self(LimbVec::ZERO);
			const ONE: Self = Self(LimbVec::from_u128(1));
			const CHARACTERISTIC: usize = 2;

			fn double(&self) -> Self {
				Self::ZERO
			}
		}

		impl crate::BinaryField for $name {
			const DEGREE: usize = $degree;
			const N_LIMBS: usize = limb_count($degree);
			const REDUCTION_POLY: u128 = $poly;

			fn from_hex(s: &str) -> Result<Self, Error> {
				parse_hex(s, $degree).map(Self)
			}

			fn to_hex(&self) -> String {
				format_hex(&self.0, $degree)
			}

			fn from_biguint(value: &BigUint) -> Result<Self, Error> {
				limbs_from_biguint(value, $degree).map(Self)
			}

			fn to_biguint(&self) -> BigUint {
				limbs_to_biguint(&self.0)
			}

			fn mul_x(self) -> Self {
				let mut limbs = *self.0.limbs();
				crate::multiply::mul_x_in_place(&mut limbs, $degree, $poly);
				Self(LimbVec::new(limbs))
			}

			fn mul_windowed(self, rhs: Self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::multiply::mul_acc_comb_windowed(self.0.limbs(), rhs.0.limbs(), &mut acc);
				Self::reduced(acc)
			}

			fn mul_shift_add(self, rhs: Self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::multiply::mul_acc_shift_add(self.0.limbs(), rhs.0.limbs(), &mut acc);
				Self::reduced(acc)
			}

			fn mul_comb_right_to_left(self, rhs: Self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::multiply::mul_acc_comb_right_to_left(self.0.limbs(), rhs.0.limbs(), &mut acc);
				Self::reduced(acc)
			}

			fn mul_comb_left_to_right(self, rhs: Self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::multiply::mul_acc_comb_left_to_right(self.0.limbs(), rhs.0.limbs(), &mut acc);
				Self::reduced(acc)
			}

			fn mul_interleaved(self, rhs: Self) -> Self {
				let mut out = [0u64; limb_count($degree)];
				crate::multiply::mul_interleaved(self.0.limbs(), rhs.0.limbs(), &mut out, $degree, $poly);
				Self(LimbVec::new(out))
			}

			fn mul_parallel(self, rhs: Self) -> Self {
				let mut acc = [0u64; 2 * limb_count($degree)];
				crate::multiply::mul_acc_parallel(self.0.limbs(), rhs.0.limbs(), &mut acc);
				Self::reduced(acc)
			}
		}

		impl Distribution<$name> for StandardUniform {
			fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> $name {
				let mut limbs = LimbVec::new(rng.random());
				limbs.mask_excess_bits($degree);
				$name(limbs)
			}
		}

		impl From<u128> for $name {
			/// Values at or above `2^DEGREE` are truncated modulo `2^DEGREE`;
			/// no reduction is performed.
			#[inline]
			fn from(value: u128) -> Self {
				let mut limbs = LimbVec::from_u128(value);
				limbs.mask_excess_bits($degree);
				Self(limbs)
			}
		}

		impl From<u64> for $name {
			#[inline]
			fn from(value: u64) -> Self {
				Self::from(value as u128)
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				write!(f, "0x{}", crate::BinaryField::to_hex(self))
			}
		}

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				write!(f, "{}({})", stringify!($name), self)
			}
		}

		impl SerializeBytes for $name {
			fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
				let bytes = self.0.to_bytes_be(($degree + 7) / 8);
				if write_buf.remaining_mut() < bytes.len() {
					return Err(SerializationError::WriteBufferFull);
				}
				write_buf.put_slice(&bytes);
				Ok(())
			}
		}

		impl DeserializeBytes for $name {
			fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
				let mut bytes = [0u8; ($degree + 7) / 8];
				if read_buf.remaining() < bytes.len() {
					return Err(SerializationError::NotEnoughBytes);
				}
				read_buf.copy_to_slice(&mut bytes);
				let limbs = LimbVec::from_bytes_be(&bytes);
				if limbs.bit_len() > $degree {
					return Err(SerializationError::ValueOutOfRange);
				}
				Ok(Self(limbs))
			}
		}
	};
}

// SEC 2 table 3. The first three degrees appear in SEC 2 v1 only and are
// kept for backward compatibility.
binary_field!(
	/// GF(2^113), reduction polynomial `x^113 + x^9 + 1`.
	pub BinaryField113b, 113, 0x201
);
binary_field!(
	/// GF(2^131), reduction polynomial `x^131 + x^8 + x^3 + x^2 + 1`.
	pub BinaryField131b, 131, 0x10D
);
binary_field!(
	/// GF(2^163), reduction polynomial `x^163 + x^7 + x^6 + x^3 + 1`.
	pub BinaryField163b, 163, 0xC9
);
binary_field!(
	/// GF(2^193), reduction polynomial `x^193 + x^15 + 1`.
	pub BinaryField193b, 193, 0x8001
);
binary_field!(
	/// GF(2^233), reduction polynomial `x^233 + x^74 + 1`.
	pub BinaryField233b, 233, (1u128 << 74) | 1
);
binary_field!(
	/// GF(2^239), reduction polynomial `x^239 + x^36 + 1`.
	pub BinaryField239b, 239, (1u128 << 36) | 1
);
binary_field!(
	/// GF(2^283), reduction polynomial `x^283 + x^12 + x^7 + x^5 + 1`.
	pub BinaryField283b, 283, 0x10A1
);
binary_field!(
	/// GF(2^409), reduction polynomial `x^409 + x^87 + 1`.
	pub BinaryField409b, 409, (1u128 << 87) | 1
);
binary_field!(
	/// GF(2^571), reduction polynomial `x^571 + x^10 + x^5 + x^2 + 1`.
	pub BinaryField571b, 571, 0x425
);

#[cfg(test)]
mod tests {
	use bytes::BytesMut;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;

	type F163 = BinaryField163b;

	fn hex_163(tail: &str) -> F163 {
		F163::from_hex(&format!("{tail:0>42}")).unwrap()
	}

	#[test]
	fn test_add_is_xor() {
		assert_eq!(hex_163("02") + hex_163("03"), hex_163("01"));
	}

	#[test]
	fn test_x_times_x() {
		assert_eq!(F163::from(2u64) * F163::from(2u64), F163::from(4u64));
		assert_eq!(F163::from(2u64).mul_windowed(F163::from(2u64)), F163::from(4u64));
	}

	#[test]
	fn test_generator_square_pinned() {
		// (x^162)^2 = x^324 = x^161 + x^12 + x^10 + x^5 + x mod f(x)
		let g = hex_163("040000000000000000000000000000000000000000");
		assert_eq!((g * g).to_hex(), "020000000000000000000000000000000000001422");
	}

	#[test]
	fn test_x_to_the_degree_is_the_low_part() {
		// x^163 = r(x) mod f(x)
		assert_eq!(F163::from(2u64).pow([163]), F163::from(0xC9u64));
	}

	#[test]
	fn test_inversion_of_small_values() {
		assert_eq!(F163::ONE.invert().unwrap(), F163::ONE);
		let two = F163::from(2u64);
		assert_eq!(two.invert().unwrap() * two, F163::ONE);
	}

	#[test]
	fn test_inverse_on_zero() {
		assert!(F163::ZERO.invert().is_none());
		assert!(matches!(F163::ZERO.checked_invert(), Err(Error::DivideByZero)));
		assert!(matches!(F163::ONE.checked_div(&F163::ZERO), Err(Error::DivideByZero)));
	}

	#[test]
	fn test_frobenius_fixpoint() {
		let a: F163 = StdRng::seed_from_u64(7).random();
		// 2^163: bit 35 of the third little-endian digit
		assert_eq!(a.pow([0, 0, 1 << 35]), a);
	}

	#[test]
	fn test_from_hex_rejects_wrong_length() {
		assert!(matches!(
			F163::from_hex(""),
			Err(Error::InvalidHexLength { expected_bytes: 21 })
		));
		assert!(matches!(F163::from_hex("0042"), Err(Error::InvalidHexLength { .. })));
	}

	#[test]
	fn test_from_hex_rejects_bad_digit() {
		let s = format!("{:0>41}g", "");
		assert!(matches!(F163::from_hex(&s), Err(Error::InvalidHexDigit { digit: 'g' })));
	}

	#[test]
	fn test_from_hex_rejects_bits_above_degree() {
		// bit 167 of a 21-byte string
		let s = format!("80{:0>40}", "");
		assert!(matches!(F163::from_hex(&s), Err(Error::ValueOutOfRange { degree: 163 })));
	}

	#[test]
	fn test_from_hex_strips_whitespace_and_accepts_upper_case() {
		let spaced = format!("0 4\t{}\n00 1F", "00".repeat(18));
		let a = F163::from_hex(&spaced).unwrap();
		let x_162 = hex_163("040000000000000000000000000000000000000000");
		assert_eq!(a, x_162 + F163::from(0x1Fu64));
		assert_eq!(F163::from_hex(&a.to_hex().to_uppercase()).unwrap(), a);
	}

	#[test]
	fn test_hex_round_trip_width() {
		let a: F163 = StdRng::seed_from_u64(8).random();
		let hex = a.to_hex();
		assert_eq!(hex.len(), 42);
		assert_eq!(F163::from_hex(&hex).unwrap(), a);
	}

	#[test]
	fn test_biguint_round_trip() {
		let a: F163 = StdRng::seed_from_u64(9).random();
		assert_eq!(F163::from_biguint(&a.to_biguint()).unwrap(), a);

		let too_big = BigUint::from(1u8) << 163;
		assert!(matches!(F163::from_biguint(&too_big), Err(Error::ValueOutOfRange { degree: 163 })));
	}

	#[test]
	fn test_pow_int() {
		let a: F163 = StdRng::seed_from_u64(10).random();
		assert_eq!(a.pow_int(&BigInt::from(5)).unwrap(), a.pow([5]));
		assert!(matches!(a.pow_int(&BigInt::from(-1)), Err(Error::NegativeExponent)));
	}

	#[test]
	fn test_from_u128_truncates_in_the_113_bit_field() {
		let wrapped = BinaryField113b::from(u128::MAX);
		assert_eq!(wrapped.to_biguint(), (BigUint::from(1u8) << 113) - 1u8);
	}

	#[test]
	fn test_mul_x_matches_multiplication_by_two() {
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..10 {
			let a: F163 = rng.random();
			assert_eq!(a.mul_x(), a * F163::from(2u64));
		}
	}

	#[test]
	fn test_field_formatting() {
		assert_eq!(
			format!("{}", F163::from(5u64)),
			"0x000000000000000000000000000000000000000005"
		);
		assert_eq!(format!("{}", BinaryField113b::from(0xABu64)).len(), 2 + 30);
		assert!(format!("{:?}", F163::from(5u64)).starts_with("BinaryField163b(0x"));
	}

	#[test]
	fn test_serialization_round_trip() {
		let mut buffer = BytesMut::new();
		let a: F163 = StdRng::seed_from_u64(12).random();
		let b: BinaryField571b = StdRng::seed_from_u64(13).random();

		a.serialize(&mut buffer).unwrap();
		b.serialize(&mut buffer).unwrap();

		let mut read_buffer = buffer.freeze();
		assert_eq!(F163::deserialize(&mut read_buffer).unwrap(), a);
		assert_eq!(BinaryField571b::deserialize(&mut read_buffer).unwrap(), b);
	}

	#[test]
	fn test_deserialize_rejects_out_of_range() {
		let mut bytes = vec![0u8; 21];
		bytes[0] = 0x80; // bit 167
		assert!(matches!(
			F163::deserialize(&mut bytes.as_slice()),
			Err(SerializationError::ValueOutOfRange)
		));
	}

	#[test]
	fn test_random_is_in_range_for_every_field() {
		let mut rng = StdRng::seed_from_u64(14);
		for _ in 0..20 {
			assert!(rng.random::<BinaryField113b>().val().bit_len() <= 113);
			assert!(rng.random::<BinaryField571b>().val().bit_len() <= 571);
		}
	}
}
