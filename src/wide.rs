//! The 512-bit vector type and its operations.
//!
//! `WideVector<L>` is four named 128-bit lanes `a`, `b`, `c`, `d` stored
//! at byte offsets 0, 16, 32 and 48. Every operation here is a pure
//! function of its arguments: it splits the wide value into lanes, applies
//! exactly one lane primitive per lane (or moves whole lanes), and
//! reassembles the result.
//!
//! Immediates follow the hardware conventions:
//! - lane indices use only their low 2 bits,
//! - the shuffle control byte is four independent 2-bit fields,
//! - element shift counts of 32 or more clear every element.

use crate::defaults::{LANE_BYTES, VECTOR_ALIGN, VECTOR_BYTES};
use crate::lane::{Lane128, NativeLane};
use core::fmt::{Debug, Formatter};
use core::ops::{BitAnd, BitOr, BitXor};

#[cfg(test)]
mod tests;

/// Bit `i` selects 32-bit element `i` of a wide vector: lane a is bits
/// 0-3, lane b 4-7, lane c 8-11, lane d 12-15.
pub type ElementMask = u16;

/// Wide vector over the compile target's hardware lane.
pub type Wide512 = WideVector<NativeLane>;

/// Four 128-bit lanes treated as one 512-bit vector.
#[derive(Copy, Clone)]
#[repr(C, align(64))]
pub struct WideVector<L: Lane128> {
    pub a: L,
    pub b: L,
    pub c: L,
    pub d: L,
}

impl<L: Lane128> WideVector<L> {
    // ===== Lane plumbing =====

    #[inline(always)]
    pub fn from_lanes(lanes: [L; 4]) -> Self {
        let [a, b, c, d] = lanes;
        Self { a, b, c, d }
    }

    #[inline(always)]
    pub fn lanes(self) -> [L; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Lane selected by the low 2 bits of `imm`.
    #[inline(always)]
    pub fn lane(self, imm: u32) -> L {
        match imm & 0x3 {
            0 => self.a,
            1 => self.b,
            2 => self.c,
            _ => self.d,
        }
    }

    #[inline(always)]
    fn map_lanes(self, f: impl Fn(L) -> L) -> Self {
        Self {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
            d: f(self.d),
        }
    }

    #[inline(always)]
    fn zip_lanes(self, other: Self, f: impl Fn(L, L) -> L) -> Self {
        Self {
            a: f(self.a, other.a),
            b: f(self.b, other.b),
            c: f(self.c, other.c),
            d: f(self.d, other.d),
        }
    }

    // ===== Creation and Initialization =====

    #[inline(always)]
    pub fn setzero() -> Self {
        Self::broadcast_i32x4(L::setzero())
    }

    /// Every 32-bit element set to `x`.
    #[inline(always)]
    pub fn set1_epi32(x: i32) -> Self {
        Self::broadcast_i32x4(L::setr_epi32(x, x, x, x))
    }

    /// Build from 16 elements in index order: `e[0..4]` is lane a,
    /// `e[4..8]` lane b, `e[8..12]` lane c, `e[12..16]` lane d.
    #[inline(always)]
    pub fn setr_epi32(e: [i32; 16]) -> Self {
        Self {
            a: L::setr_epi32(e[0], e[1], e[2], e[3]),
            b: L::setr_epi32(e[4], e[5], e[6], e[7]),
            c: L::setr_epi32(e[8], e[9], e[10], e[11]),
            d: L::setr_epi32(e[12], e[13], e[14], e[15]),
        }
    }

    /// The 16 elements in index order.
    pub fn to_epi32(self) -> [i32; 16] {
        let mut out = [0i32; 16];
        for (dst, lane) in out.chunks_exact_mut(4).zip(self.lanes()) {
            dst.copy_from_slice(&lane.to_epi32());
        }
        out
    }

    // ===== Memory Operations =====

    /// Load 64 bytes from unaligned memory.
    ///
    /// # Safety
    /// `p` must be valid for reading 64 bytes. Nothing outside
    /// `p..p + 64` is read.
    #[inline(always)]
    pub unsafe fn loadu(p: *const u8) -> Self {
        unsafe {
            Self {
                a: L::loadu(p),
                b: L::loadu(p.add(LANE_BYTES)),
                c: L::loadu(p.add(2 * LANE_BYTES)),
                d: L::loadu(p.add(3 * LANE_BYTES)),
            }
        }
    }

    /// Store 64 bytes to unaligned memory.
    ///
    /// # Safety
    /// `p` must be valid for writing 64 bytes. Exactly `p..p + 64` is
    /// written, as four 16-byte stores.
    #[inline(always)]
    pub unsafe fn storeu(self, p: *mut u8) {
        unsafe {
            L::storeu(p, self.a);
            L::storeu(p.add(LANE_BYTES), self.b);
            L::storeu(p.add(2 * LANE_BYTES), self.c);
            L::storeu(p.add(3 * LANE_BYTES), self.d);
        }
    }

    /// Load 64 bytes from 64-byte aligned memory.
    ///
    /// # Safety
    /// As [`WideVector::loadu`], and `p` must be 64-byte aligned.
    #[inline(always)]
    pub unsafe fn load(p: *const u8) -> Self {
        debug_assert_eq!(p as usize % VECTOR_ALIGN, 0, "unaligned wide load");
        unsafe { Self::loadu(p) }
    }

    /// Store 64 bytes to 64-byte aligned memory.
    ///
    /// # Safety
    /// As [`WideVector::storeu`], and `p` must be 64-byte aligned.
    #[inline(always)]
    pub unsafe fn store(self, p: *mut u8) {
        debug_assert_eq!(p as usize % VECTOR_ALIGN, 0, "unaligned wide store");
        unsafe { self.storeu(p) }
    }

    #[inline(always)]
    pub fn from_bytes(bytes: &[u8; VECTOR_BYTES]) -> Self {
        unsafe { Self::loadu(bytes.as_ptr()) }
    }

    #[inline(always)]
    pub fn store_bytes(self, out: &mut [u8; VECTOR_BYTES]) {
        unsafe { self.storeu(out.as_mut_ptr()) }
    }

    #[inline(always)]
    pub fn to_bytes(self) -> [u8; VECTOR_BYTES] {
        let mut out = [0u8; VECTOR_BYTES];
        self.store_bytes(&mut out);
        out
    }

    // ===== Bitwise Operations =====

    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        self.zip_lanes(other, L::xor)
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        self.zip_lanes(other, L::or)
    }

    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        self.zip_lanes(other, L::and)
    }

    // ===== AES =====

    /// One AES encryption round per lane, lane `i` of `self` keyed by
    /// lane `i` of `round_key`.
    ///
    /// # Safety
    /// The CPU must support the lane's AES extension
    /// (`L::BACKEND.is_available()`).
    #[inline(always)]
    pub unsafe fn aesenc(self, round_key: Self) -> Self {
        unsafe {
            Self {
                a: L::aesenc(self.a, round_key.a),
                b: L::aesenc(self.b, round_key.b),
                c: L::aesenc(self.c, round_key.c),
                d: L::aesenc(self.d, round_key.d),
            }
        }
    }

    /// Final AES encryption round (no MixColumns) per lane.
    ///
    /// # Safety
    /// Same requirement as [`WideVector::aesenc`].
    #[inline(always)]
    pub unsafe fn aesenclast(self, round_key: Self) -> Self {
        unsafe {
            Self {
                a: L::aesenclast(self.a, round_key.a),
                b: L::aesenclast(self.b, round_key.b),
                c: L::aesenclast(self.c, round_key.c),
                d: L::aesenclast(self.d, round_key.d),
            }
        }
    }

    // ===== Lane Addressing =====

    /// Lane shuffle across two vectors.
    ///
    /// ```text
    /// imm8[1:0] -> result.a from a
    /// imm8[3:2] -> result.b from a
    /// imm8[5:4] -> result.c from b
    /// imm8[7:6] -> result.d from b
    /// ```
    #[inline(always)]
    pub fn shuffle_i32x4(a: Self, b: Self, imm8: u8) -> Self {
        let imm = imm8 as u32;
        Self {
            a: a.lane(imm),
            b: a.lane(imm >> 2),
            c: b.lane(imm >> 4),
            d: b.lane(imm >> 6),
        }
    }

    /// Lane `imm & 3` as a standalone 128-bit value.
    #[inline(always)]
    pub fn extract_i32x4(self, imm: u32) -> L {
        self.lane(imm)
    }

    #[inline(always)]
    pub fn broadcast_i32x4(x: L) -> Self {
        Self {
            a: x,
            b: x,
            c: x,
            d: x,
        }
    }

    /// Copy of `self` with lane `imm & 3` replaced by `x`.
    #[inline(always)]
    pub fn insert_i32x4(self, x: L, imm: u32) -> Self {
        let mut out = self;
        match imm & 0x3 {
            0 => out.a = x,
            1 => out.b = x,
            2 => out.c = x,
            _ => out.d = x,
        }
        out
    }

    // ===== Masked Broadcast =====

    /// Per-element select between `self` and `value` repeated in every lane.
    ///
    /// Element `p` of lane `l` comes from `value[p]` when mask bit
    /// `4 * l + p` is set and from `self` otherwise, computed as
    /// `src ^ ((src ^ value) & element_mask)`. No branch depends on `mask`.
    #[inline(always)]
    pub fn mask_broadcast_i32x4(self, value: L, mask: ElementMask) -> Self {
        let select = |src: L, lane: u32| {
            L::xor(src, L::and(L::xor(src, value), element_mask::<L>(mask, lane)))
        };
        Self {
            a: select(self.a, 0),
            b: select(self.b, 1),
            c: select(self.c, 2),
            d: select(self.d, 3),
        }
    }

    // ===== Shift Operations =====

    /// Logical right shift of all 16 elements; `count >= 32` gives zero.
    #[inline(always)]
    pub fn srli_epi32(self, count: u32) -> Self {
        self.map_lanes(|lane| L::srli_epi32(lane, count))
    }

    /// Logical left shift of all 16 elements; `count >= 32` gives zero.
    #[inline(always)]
    pub fn slli_epi32(self, count: u32) -> Self {
        self.map_lanes(|lane| L::slli_epi32(lane, count))
    }
}

/// All-ones or all-zeros word for bit `pos` of `bits`.
#[inline(always)]
fn expand_bit(bits: u32, pos: u32) -> i32 {
    0u32.wrapping_sub((bits >> pos) & 1) as i32
}

/// The four element words of `lane` selected by `mask`.
#[inline(always)]
fn element_mask<L: Lane128>(mask: ElementMask, lane: u32) -> L {
    let bits = (mask as u32) >> (4 * lane);
    L::setr_epi32(
        expand_bit(bits, 0),
        expand_bit(bits, 1),
        expand_bit(bits, 2),
        expand_bit(bits, 3),
    )
}

impl<L: Lane128> Default for WideVector<L> {
    fn default() -> Self {
        Self::setzero()
    }
}

impl<L: Lane128> PartialEq for WideVector<L> {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl<L: Lane128> Eq for WideVector<L> {}

impl<L: Lane128> Debug for WideVector<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d] = self.lanes().map(|lane| lane.to_epi32());
        f.debug_struct("WideVector")
            .field("a", &format_args!("{:08x?}", a))
            .field("b", &format_args!("{:08x?}", b))
            .field("c", &format_args!("{:08x?}", c))
            .field("d", &format_args!("{:08x?}", d))
            .finish()
    }
}

impl<L: Lane128> BitXor for WideVector<L> {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl<L: Lane128> BitOr for WideVector<L> {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl<L: Lane128> BitAnd for WideVector<L> {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}
