//! The 128-bit lane capability.
//!
//! A `WideVector` is four lanes; every wide operation is decomposed into
//! four calls to the primitives declared by [`Lane128`]. The trait is the
//! only seam between the composition logic and the hardware, so the same
//! `WideVector` code runs over:
//!
//! - [`AesNiLane`] on x86_64 (`__m128i`, SSE2 baseline plus AES-NI),
//! - [`NeonLane`] on aarch64 (`uint8x16_t`, NEON baseline plus ARMv8 AES),
//! - [`SoftLane`] anywhere (plain bytes, AES round from the `aes` crate).
//!
//! Design notes
//! - Baseline operations (construction, bitwise, shifts, byte conversion)
//!   are safe: SSE2 and NEON are always present on their targets.
//! - The AES round functions are `unsafe` for the same reason as the
//!   underlying intrinsics: the caller must know the CPU supports AES
//!   (see [`crate::detect`]). `SoftLane` has no such requirement.
//! - Raw-pointer loads/stores are `unsafe` (pointer validity), and touch
//!   exactly 16 bytes.
//! - Element shift counts of 32 or more produce zero in every
//!   implementation; this is handled explicitly, never by an over-wide
//!   native shift.

use crate::detect::LaneBackend;
use core::fmt::Debug;

#[cfg(target_arch = "x86_64")]
mod x86;
#[cfg(target_arch = "x86_64")]
pub use x86::AesNiLane;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
pub use neon::NeonLane;

mod soft;
pub use soft::SoftLane;


/// Hardware lane of the compile target.
#[cfg(target_arch = "x86_64")]
pub type NativeLane = AesNiLane;

/// Hardware lane of the compile target.
#[cfg(target_arch = "aarch64")]
pub type NativeLane = NeonLane;

/// Hardware lane of the compile target (portable fallback).
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub type NativeLane = SoftLane;

/// Trait abstracting over 128-bit vector implementations.
///
/// Each lane holds four 32-bit elements; element 0 sits at the lowest
/// memory offset. Implementations must reproduce the x86 SSE2/AES-NI
/// semantics of the corresponding instruction bit for bit.
pub trait Lane128: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Backend this lane type implements.
    const BACKEND: LaneBackend;

    // ===== Creation and Initialization =====

    /// All-zero lane
    fn setzero() -> Self;

    /// Build a lane from four 32-bit integers in index order (`e0` lowest)
    fn setr_epi32(e0: i32, e1: i32, e2: i32, e3: i32) -> Self;

    /// Reinterpret 16 bytes as a lane
    fn from_bytes(bytes: [u8; 16]) -> Self;

    /// Reinterpret a lane as 16 bytes
    fn to_bytes(self) -> [u8; 16];

    /// View the lane as four 32-bit elements in index order.
    #[inline(always)]
    fn to_epi32(self) -> [i32; 4] {
        let b = self.to_bytes();
        [
            i32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            i32::from_le_bytes([b[4], b[5], b[6], b[7]]),
            i32::from_le_bytes([b[8], b[9], b[10], b[11]]),
            i32::from_le_bytes([b[12], b[13], b[14], b[15]]),
        ]
    }

    // ===== Memory Operations =====

    /// Load 16 bytes from unaligned memory
    ///
    /// # Safety
    /// `p` must be valid for reading 16 bytes.
    unsafe fn loadu(p: *const u8) -> Self;

    /// Store 16 bytes to unaligned memory
    ///
    /// # Safety
    /// `p` must be valid for writing 16 bytes.
    unsafe fn storeu(p: *mut u8, a: Self);

    // ===== Bitwise Operations =====

    /// Bitwise XOR
    fn xor(a: Self, b: Self) -> Self;

    /// Bitwise OR
    fn or(a: Self, b: Self) -> Self;

    /// Bitwise AND
    fn and(a: Self, b: Self) -> Self;

    // ===== AES =====

    /// One AES encryption round: SubBytes, ShiftRows, MixColumns, then
    /// XOR with `round_key`.
    ///
    /// # Safety
    /// The CPU must support the AES extension this lane uses
    /// (`Self::BACKEND.is_available()`).
    unsafe fn aesenc(state: Self, round_key: Self) -> Self;

    /// Final AES encryption round: as [`Lane128::aesenc`] without MixColumns.
    ///
    /// # Safety
    /// Same requirement as [`Lane128::aesenc`].
    unsafe fn aesenclast(state: Self, round_key: Self) -> Self;

    // ===== Shift Operations =====

    /// Logical right shift of each 32-bit element; `count >= 32` yields zero
    fn srli_epi32(a: Self, count: u32) -> Self;

    /// Logical left shift of each 32-bit element; `count >= 32` yields zero
    fn slli_epi32(a: Self, count: u32) -> Self;
}
