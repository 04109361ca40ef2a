//! Target machine parameters
//!
//! The backend targets a flat, two-register-class, 32-bit stack machine
//! addressed in AT&T syntax. These constants fix the storage widths, the
//! stack alignment boundary, and the symbol decoration used for globals.

/// Size of a `char` in bytes.
pub const SIZEOF_CHAR: u32 = 1;

/// Size of an `int` in bytes.
pub const SIZEOF_INT: u32 = 4;

/// Size of a `double` in bytes.
pub const SIZEOF_DOUBLE: u32 = 8;

/// Size of any pointer in bytes.
pub const SIZEOF_PTR: u32 = 4;

/// Width of a general-purpose register in bytes.
pub const SIZEOF_REG: i32 = 4;

/// Every frame size must be a multiple of this boundary.
pub const STACK_ALIGNMENT: i32 = 8;

/// Decoration prepended to every externally visible symbol name.
pub const GLOBAL_PREFIX: &str = "";

/// Offset of the first parameter from the frame base: the call pushes a
/// return address and the prologue pushes the caller's frame pointer, so
/// parameters start two register slots above `%ebp`.
pub const PARAM_OFFSET: i32 = 2 * SIZEOF_REG;
