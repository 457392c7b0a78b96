//! Curve parameters.
//!
//! Every component of this crate operates on a single fixed curve,
//! NIST P-256 (secp256r1). The constants here describe its canonical
//! byte encodings; the arithmetic itself comes from the `p256` crate.

/// Size in bytes of a P-256 field element.
///
/// Coordinates, scalars, and the raw ECDH output (the big-endian
/// x-coordinate of the shared point) are all this size.
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size in bytes of an uncompressed SEC1 point encoding (`0x04 || x || y`).
pub const UNCOMPRESSED_POINT_SIZE: usize = 1 + 2 * FIELD_ELEMENT_SIZE;
