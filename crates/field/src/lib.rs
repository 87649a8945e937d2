// Copyright 2025 Irreducible Inc.

#![warn(rustdoc::missing_crate_level_docs)]

//! Arithmetic in the binary extension fields GF(2^m) underlying the SEC 2
//! elliptic curves over characteristic-2 fields.
//!
//! One type per supported degree (113, 131, 163, 193, 233, 239, 283, 409 and
//! 571, per SEC 2 table 3) wraps a packed vector of 64-bit limbs and reduces
//! modulo the standardized sparse trinomial or pentanomial. The default
//! multiplication is a windowed left-to-right comb; the other strategies
//! stay available as named entry points for benchmarking, and squaring,
//! extended-Euclidean inversion and the SEC 1 hex/integer encodings round
//! out the arithmetic.
//!
//! # Timing side channels
//!
//! The algorithms branch on operand bits (multiplier scanning, the degree
//! comparisons inside inversion), so execution time leaks information about
//! the operands. Nothing in this crate is constant-time; callers handling
//! secret material must harden at a higher layer.

pub mod arithmetic_traits;
pub mod binary_field;
pub mod error;
pub mod field;
mod invert;
pub mod limb_vec;
mod multiply;
mod random;
mod reduce;
pub mod serialization;
mod square;
pub mod util;

pub use binary_field::{
	BinaryField, BinaryField113b, BinaryField131b, BinaryField163b, BinaryField193b,
	BinaryField233b, BinaryField239b, BinaryField283b, BinaryField409b, BinaryField571b,
};
pub use error::Error;
pub use field::Field;
pub use limb_vec::LimbVec;
pub use random::Random;
pub use serialization::{DeserializeBytes, SerializationError, SerializeBytes};
