// Copyright 2025 Irreducible Inc.

/// Errors raised by field element constructors and checked arithmetic.
///
/// Every failure is raised synchronously at the call site and surfaced to the
/// caller; there are no transient or retryable classes. Arithmetic on
/// well-formed inputs is total.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("hex string must encode exactly {expected_bytes} bytes")]
	InvalidHexLength { expected_bytes: usize },
	#[error("invalid hex digit {digit:?}")]
	InvalidHexDigit { digit: char },
	#[error("value has bits set at or above the field degree {degree}")]
	ValueOutOfRange { degree: usize },
	#[error("division by zero")]
	DivideByZero,
	#[error("exponent must be non-negative")]
	NegativeExponent,
}
