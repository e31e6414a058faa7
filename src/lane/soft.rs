//! Portable lane: 16 bytes in memory order.
//!
//! Bitwise ops and shifts are plain integer code. The AES round comes from
//! the RustCrypto `aes` crate's `hazmat` module, which is constant-time in
//! software and uses AES-NI/ARMv8 AES underneath when it detects them.

use super::Lane128;
use crate::defaults::ELEMENT_BITS;
use crate::detect::LaneBackend;
use aes::Block;
use aes::hazmat::{cipher_round, inv_mix_columns};
use core::fmt::{Debug, Formatter};

/// 128-bit lane stored as plain bytes; available on every target.
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct SoftLane(pub [u8; 16]);

impl SoftLane {
    #[inline(always)]
    fn map_words(self, f: impl Fn(u32) -> u32) -> Self {
        let mut out = [0u8; 16];
        for (dst, src) in out.chunks_exact_mut(4).zip(self.0.chunks_exact(4)) {
            let word = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
            dst.copy_from_slice(&f(word).to_le_bytes());
        }
        Self(out)
    }

    #[inline(always)]
    fn zip_bytes(a: Self, b: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        let mut out = [0u8; 16];
        for (o, (x, y)) in out.iter_mut().zip(a.0.iter().zip(b.0.iter())) {
            *o = f(*x, *y);
        }
        Self(out)
    }

    #[inline(always)]
    fn from_block(block: &Block) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(block);
        Self(out)
    }
}

impl Debug for SoftLane {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "SoftLane({:08x?})", self.to_epi32())
    }
}

impl Lane128 for SoftLane {
    const BACKEND: LaneBackend = LaneBackend::Soft;

    #[inline(always)]
    fn setzero() -> Self {
        Self([0u8; 16])
    }

    #[inline(always)]
    fn setr_epi32(e0: i32, e1: i32, e2: i32, e3: i32) -> Self {
        let mut out = [0u8; 16];
        for (dst, e) in out.chunks_exact_mut(4).zip([e0, e1, e2, e3]) {
            dst.copy_from_slice(&e.to_le_bytes());
        }
        Self(out)
    }

    #[inline(always)]
    fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    #[inline(always)]
    unsafe fn loadu(p: *const u8) -> Self {
        unsafe { Self(core::ptr::read_unaligned(p as *const [u8; 16])) }
    }

    #[inline(always)]
    unsafe fn storeu(p: *mut u8, a: Self) {
        unsafe { core::ptr::write_unaligned(p as *mut [u8; 16], a.0) }
    }

    #[inline(always)]
    fn xor(a: Self, b: Self) -> Self {
        Self::zip_bytes(a, b, |x, y| x ^ y)
    }

    #[inline(always)]
    fn or(a: Self, b: Self) -> Self {
        Self::zip_bytes(a, b, |x, y| x | y)
    }

    #[inline(always)]
    fn and(a: Self, b: Self) -> Self {
        Self::zip_bytes(a, b, |x, y| x & y)
    }

    #[inline(always)]
    unsafe fn aesenc(state: Self, round_key: Self) -> Self {
        let mut block = Block::clone_from_slice(&state.0);
        cipher_round(&mut block, &Block::clone_from_slice(&round_key.0));
        Self::from_block(&block)
    }

    // cipher_round always mixes columns; undo that on a zero-key round
    // before adding the real key.
    #[inline(always)]
    unsafe fn aesenclast(state: Self, round_key: Self) -> Self {
        let mut block = Block::clone_from_slice(&state.0);
        cipher_round(&mut block, &Block::default());
        inv_mix_columns(&mut block);
        Self::xor(Self::from_block(&block), round_key)
    }

    #[inline(always)]
    fn srli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        a.map_words(|w| w >> count)
    }

    #[inline(always)]
    fn slli_epi32(a: Self, count: u32) -> Self {
        if count >= ELEMENT_BITS {
            return Self::setzero();
        }
        a.map_words(|w| w << count)
    }
}
