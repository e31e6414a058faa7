//! aarch64 lane: `uint8x16_t` with NEON baseline and ARMv8 AES rounds.
//!
//! The ARM AES instructions split the round differently from AES-NI:
//! `AESE` is AddRoundKey, SubBytes and ShiftRows, and `AESMC` is
//! MixColumns. Running `AESE` with a zero key, then `AESMC`, then XOR with
//! the round key reproduces `_mm_aesenc_si128`; skipping `AESMC` gives
//! `_mm_aesenclast_si128`.
//!
//! All reinterpretations between element widths are bitcasts (no lane
//! reordering), implemented via NEON `vreinterpret` intrinsics.

use super::Lane128;
use crate::defaults::ELEMENT_BITS;
use crate::detect::LaneBackend;
use core::fmt::{Debug, Formatter};
use std::arch::aarch64 as simd_arch;

/// 128-bit lane backed by NEON `uint8x16_t`.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonLane(pub simd_arch::uint8x16_t);

impl NeonLane {
    /// View as unsigned 32-bit lanes.
    #[inline(always)]
    pub fn as_u32(self) -> simd_arch::uint32x4_t {
        unsafe { simd_arch::vreinterpretq_u32_u8(self.0) }
    }

    /// Construct from unsigned 32-bit lanes by reinterpretation.
    #[inline(always)]
    pub fn from_u32(v: simd_arch::uint32x4_t) -> Self {
        Self(unsafe { simd_arch::vreinterpretq_u8_u32(v) })
    }

    #[inline(always)]
    fn shl_u32(a: Self, signed_count: i32) -> Self {
        unsafe {
            let cnt = simd_arch::vdupq_n_s32(signed_count);
            Self::from_u32(simd_arch::vshlq_u32(a.as_u32(), cnt))
        }
    }
}

impl Debug for NeonLane {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "NeonLane({:08x?})", self.to_epi32())
    }
}

impl PartialEq for NeonLane {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for NeonLane {}

impl Default for NeonLane {
    fn default() -> Self {
        Self::setzero()
    }
}

#[allow(unsafe_op_in_unsafe_fn)]
impl Lane128 for NeonLane {
    const BACKEND: LaneBackend = LaneBackend::NeonAes;

    #[inline(always)]
    fn setzero() -> Self {
        unsafe { Self(simd_arch::vdupq_n_u8(0)) }
    }

    #[inline(always)]
    fn setr_epi32(e0: i32, e1: i32, e2: i32, e3: i32) -> Self {
        let words = [e0, e1, e2, e3];
        unsafe { Self(simd_arch::vreinterpretq_u8_s32(simd_arch::vld1q_s32(words.as_ptr()))) }
    }

    #[inline(always)]
    fn from_bytes(bytes: [u8; 16]) -> Self {
        unsafe { Self::loadu(bytes.as_ptr()) }
    }

    #[inline(always)]
    fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        unsafe { Self::storeu(out.as_mut_ptr(), self) };
        out
    }

    #[inline(always)]
    unsafe fn loadu(p: *const u8) -> Self {
        // NEON loads are unaligned by default
        Self(simd_arch::vld1q_u8(p))
    }

    #[inline(always)]
    unsafe fn storeu(p: *mut u8, a: Self) {
        // NEON stores are unaligned by default
        simd_arch::vst1q_u8(p, a.0);
    }

    #[inline(always)]
    fn xor(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::veorq_u8(a.0, b.0)) }
    }

    #[inline(always)]
    fn or(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::vorrq_u8(a.0, b.0)) }
    }

    #[inline(always)]
    fn and(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::vandq_u8(a.0, b.0)) }
    }

    #[target_feature(enable = "aes")]
    unsafe fn aesenc(state: Self, round_key: Self) -> Self {
        let zero = simd_arch::vdupq_n_u8(0);
        let sub_shifted = simd_arch::vaeseq_u8(state.0, zero);
        Self(simd_arch::veorq_u8(simd_arch::vaesmcq_u8(sub_shifted), round_key.0))
    }

    #[target_feature(enable = "aes")]
    unsafe fn aesenclast(state: Self, round_key: Self) -> Self {
        let zero = simd_arch::vdupq_n_u8(0);
        Self(simd_arch::veorq_u8(simd_arch::vaeseq_u8(state.0, zero), round_key.0))
    }

    // USHL shifts right for negative counts.
    #[inline(always)]
    fn srli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        Self::shl_u32(a, -(count as i32))
    }

    #[inline(always)]
    fn slli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        Self::shl_u32(a, count as i32)
    }
}
