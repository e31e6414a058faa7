// src/defaults.rs

// Layout constants
pub const LANE_BYTES: usize = 16;
pub const LANES_PER_VECTOR: usize = 4;
pub const VECTOR_BYTES: usize = LANE_BYTES * LANES_PER_VECTOR;
pub const VECTOR_ALIGN: usize = 64;
pub const ELEMENTS_PER_LANE: usize = 4;
pub const ELEMENTS_PER_VECTOR: usize = ELEMENTS_PER_LANE * LANES_PER_VECTOR;

// Element shift counts at or above this width clear the element
pub const ELEMENT_BITS: u32 = 32;

// Environment overrides
pub const FORCE_SOFT_ENV: &str = "WIDELANE_FORCE_SOFT";

// CLI defaults
pub const VERBOSITY: i32 = 3;
