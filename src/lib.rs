//! 512-bit packed-integer vectors composed from four 128-bit lanes.
//!
//! `WideVector<L>` reproduces the lane and element contract of the wide
//! (AVX-512 style) integer/AES vocabulary on targets that only provide
//! 128-bit vectors: every wide operation is four independent applications
//! of a 128-bit lane primitive from [`lane::Lane128`].

pub mod defaults;
pub mod detect;
pub mod lane;
pub mod mnemonics;
pub mod selftest;
pub mod wide;

pub use detect::{LaneBackend, detect_lane_backend, lane_backend_description};
pub use lane::{Lane128, NativeLane, SoftLane};
pub use wide::{ElementMask, Wide512, WideVector};

#[cfg(target_arch = "x86_64")]
pub use lane::AesNiLane;

#[cfg(target_arch = "aarch64")]
pub use lane::NeonLane;
