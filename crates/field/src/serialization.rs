// Copyright 2025 Irreducible Inc.

//! Byte-level encoding of field elements.
//!
//! Elements serialize as the SEC 1 §2.3.5 octet string: the big-endian,
//! zero-padded `ceil(degree / 8)`-byte representation of the polynomial.

use bytes::{Buf, BufMut};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SerializationError {
	#[error("the write buffer is too small")]
	WriteBufferFull,
	#[error("not enough bytes in the read buffer")]
	NotEnoughBytes,
	#[error("deserialized value has bits set at or above the field degree")]
	ValueOutOfRange,
}

/// Values that can be appended to a byte buffer.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError>;
}

/// Values that can be read back from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError>
	where
		Self: Sized;
}
