//! Free functions mirroring the 512-bit intrinsic vocabulary.
//!
//! Code written against the wide intrinsics can be ported by swapping the
//! leading underscore for this module's `mm512_` prefix and the `__m512i`
//! type for [`WideVector<L>`] (or [`crate::Wide512`]). Nothing here
//! shadows a platform intrinsic name.
//!
//! Argument order follows the intrinsics, including
//! `mm512_mask_broadcast_i32x4(src, k, a)`. Pointer arguments accept any
//! pointee type, like the `void *` parameters they replace.

use crate::lane::Lane128;
use crate::wide::{ElementMask, WideVector};

#[inline(always)]
pub fn mm512_setzero_si512<L: Lane128>() -> WideVector<L> {
    WideVector::setzero()
}

#[inline(always)]
pub fn mm512_set1_epi32<L: Lane128>(a: i32) -> WideVector<L> {
    WideVector::set1_epi32(a)
}

/// Build a 512-bit vector from 16 ints in register order.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn mm512_setr_epi32<L: Lane128>(
    e0: i32,
    e1: i32,
    e2: i32,
    e3: i32,
    e4: i32,
    e5: i32,
    e6: i32,
    e7: i32,
    e8: i32,
    e9: i32,
    e10: i32,
    e11: i32,
    e12: i32,
    e13: i32,
    e14: i32,
    e15: i32,
) -> WideVector<L> {
    WideVector::setr_epi32([
        e0, e1, e2, e3, e4, e5, e6, e7, e8, e9, e10, e11, e12, e13, e14, e15,
    ])
}

/// Unaligned load of 64 bytes.
///
/// # Safety
/// `mem_addr` must be valid for reading 64 bytes.
#[inline(always)]
pub unsafe fn mm512_loadu_si512<L: Lane128, T>(mem_addr: *const T) -> WideVector<L> {
    unsafe { WideVector::loadu(mem_addr as *const u8) }
}

/// Unaligned store of 64 bytes.
///
/// # Safety
/// `mem_addr` must be valid for writing 64 bytes.
#[inline(always)]
pub unsafe fn mm512_storeu_si512<L: Lane128, T>(mem_addr: *mut T, a: WideVector<L>) {
    unsafe { a.storeu(mem_addr as *mut u8) }
}

/// Aligned load of 64 bytes.
///
/// # Safety
/// `mem_addr` must be 64-byte aligned and valid for reading 64 bytes.
#[inline(always)]
pub unsafe fn mm512_load_si512<L: Lane128, T>(mem_addr: *const T) -> WideVector<L> {
    unsafe { WideVector::load(mem_addr as *const u8) }
}

/// Aligned store of 64 bytes.
///
/// # Safety
/// `mem_addr` must be 64-byte aligned and valid for writing 64 bytes.
#[inline(always)]
pub unsafe fn mm512_store_si512<L: Lane128, T>(mem_addr: *mut T, a: WideVector<L>) {
    unsafe { a.store(mem_addr as *mut u8) }
}

#[inline(always)]
pub fn mm512_xor_si512<L: Lane128>(a: WideVector<L>, b: WideVector<L>) -> WideVector<L> {
    a.xor(b)
}

#[inline(always)]
pub fn mm512_or_si512<L: Lane128>(a: WideVector<L>, b: WideVector<L>) -> WideVector<L> {
    a.or(b)
}

#[inline(always)]
pub fn mm512_and_si512<L: Lane128>(a: WideVector<L>, b: WideVector<L>) -> WideVector<L> {
    a.and(b)
}

/// One AESENC round on each 128-bit lane.
///
/// # Safety
/// The CPU must support the lane's AES extension.
#[inline(always)]
pub unsafe fn mm512_aesenc_epi128<L: Lane128>(
    a: WideVector<L>,
    round_key: WideVector<L>,
) -> WideVector<L> {
    unsafe { a.aesenc(round_key) }
}

/// One AESENCLAST round on each 128-bit lane.
///
/// # Safety
/// The CPU must support the lane's AES extension.
#[inline(always)]
pub unsafe fn mm512_aesenclast_epi128<L: Lane128>(
    a: WideVector<L>,
    round_key: WideVector<L>,
) -> WideVector<L> {
    unsafe { a.aesenclast(round_key) }
}

#[inline(always)]
pub fn mm512_shuffle_i32x4<L: Lane128>(a: WideVector<L>, b: WideVector<L>, imm8: u8) -> WideVector<L> {
    WideVector::shuffle_i32x4(a, b, imm8)
}

#[inline(always)]
pub fn mm512_extracti32x4_epi32<L: Lane128>(a: WideVector<L>, imm8: u32) -> L {
    a.extract_i32x4(imm8)
}

#[inline(always)]
pub fn mm512_inserti32x4<L: Lane128>(a: WideVector<L>, b: L, imm8: u32) -> WideVector<L> {
    a.insert_i32x4(b, imm8)
}

#[inline(always)]
pub fn mm512_broadcast_i32x4<L: Lane128>(a: L) -> WideVector<L> {
    WideVector::broadcast_i32x4(a)
}

#[inline(always)]
pub fn mm512_mask_broadcast_i32x4<L: Lane128>(
    src: WideVector<L>,
    k: ElementMask,
    a: L,
) -> WideVector<L> {
    src.mask_broadcast_i32x4(a, k)
}

#[inline(always)]
pub fn mm512_srli_epi32<L: Lane128>(a: WideVector<L>, imm8: u32) -> WideVector<L> {
    a.srli_epi32(imm8)
}

#[inline(always)]
pub fn mm512_slli_epi32<L: Lane128>(a: WideVector<L>, imm8: u32) -> WideVector<L> {
    a.slli_epi32(imm8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::SoftLane;

    type V = WideVector<SoftLane>;

    #[test]
    fn test_setr_matches_method() {
        let v: V = mm512_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);
        let expected: [i32; 16] = core::array::from_fn(|i| i as i32);
        assert_eq!(v, V::setr_epi32(expected));
    }

    #[test]
    fn test_mask_broadcast_argument_order() {
        let src: V = mm512_set1_epi32(-1);
        let x = SoftLane::setr_epi32(10, 20, 30, 40);
        let out = mm512_mask_broadcast_i32x4(src, 0b0000_0000_0000_0110, x);
        assert_eq!(out.to_epi32()[..4], [-1, 20, 30, -1]);
        assert_eq!(out.to_epi32()[4..], [-1; 12]);
    }

    #[test]
    fn test_pointer_roundtrip_through_words() {
        let words: [u32; 16] = core::array::from_fn(|i| 0x0101_0101 * i as u32);
        let mut out = [0u32; 16];
        unsafe {
            let v: V = mm512_loadu_si512(words.as_ptr());
            mm512_storeu_si512(out.as_mut_ptr(), v);
        }
        assert_eq!(words, out);
    }
}
