//! x86_64 lane: `__m128i` with SSE2 baseline and AES-NI rounds.

use super::Lane128;
use crate::defaults::ELEMENT_BITS;
use crate::detect::LaneBackend;
use core::fmt::{Debug, Formatter};
use std::arch::x86_64 as simd_arch;

/// 128-bit lane backed by the native `__m128i`.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct AesNiLane(pub simd_arch::__m128i);

impl Debug for AesNiLane {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "AesNiLane({:08x?})", self.to_epi32())
    }
}

impl PartialEq for AesNiLane {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for AesNiLane {}

impl Default for AesNiLane {
    fn default() -> Self {
        Self::setzero()
    }
}

#[allow(unsafe_op_in_unsafe_fn)]
impl Lane128 for AesNiLane {
    const BACKEND: LaneBackend = LaneBackend::AesNi;

    #[inline(always)]
    fn setzero() -> Self {
        unsafe { Self(simd_arch::_mm_setzero_si128()) }
    }

    #[inline(always)]
    fn setr_epi32(e0: i32, e1: i32, e2: i32, e3: i32) -> Self {
        unsafe { Self(simd_arch::_mm_setr_epi32(e0, e1, e2, e3)) }
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
        Self(simd_arch::_mm_loadu_si128(p as *const simd_arch::__m128i))
    }

    #[inline(always)]
    unsafe fn storeu(p: *mut u8, a: Self) {
        simd_arch::_mm_storeu_si128(p as *mut simd_arch::__m128i, a.0);
    }

    #[inline(always)]
    fn xor(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::_mm_xor_si128(a.0, b.0)) }
    }

    #[inline(always)]
    fn or(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::_mm_or_si128(a.0, b.0)) }
    }

    #[inline(always)]
    fn and(a: Self, b: Self) -> Self {
        unsafe { Self(simd_arch::_mm_and_si128(a.0, b.0)) }
    }

    #[target_feature(enable = "aes")]
    unsafe fn aesenc(state: Self, round_key: Self) -> Self {
        Self(simd_arch::_mm_aesenc_si128(state.0, round_key.0))
    }

    #[target_feature(enable = "aes")]
    unsafe fn aesenclast(state: Self, round_key: Self) -> Self {
        Self(simd_arch::_mm_aesenclast_si128(state.0, round_key.0))
    }

    // `_mm_srli_epi32` wants a const immediate; the register-count form
    // takes a runtime value with identical results for 0..=31.
    #[inline(always)]
    fn srli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        unsafe {
            let cnt = simd_arch::_mm_cvtsi32_si128(count as i32);
            Self(simd_arch::_mm_srl_epi32(a.0, cnt))
        }
    }

    #[inline(always)]
    fn slli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        unsafe {
            let cnt = simd_arch::_mm_cvtsi32_si128(count as i32);
            Self(simd_arch::_mm_sll_epi32(a.0, cnt))
        }
    }
}
