//! Unit tests for `WideVector`.

use super::*;
use crate::lane::SoftLane;

fn iota<L: Lane128>() -> WideVector<L> {
    WideVector::setr_epi32(core::array::from_fn(|i| i as i32))
}

fn distinct_lanes<L: Lane128>() -> WideVector<L> {
    WideVector::from_lanes([
        L::setr_epi32(0xA0, 0xA1, 0xA2, 0xA3),
        L::setr_epi32(0xB0, 0xB1, 0xB2, 0xB3),
        L::setr_epi32(0xC0, 0xC1, 0xC2, 0xC3),
        L::setr_epi32(0xD0, 0xD1, 0xD2, 0xD3),
    ])
}

fn check_setr_store_layout<L: Lane128>() {
    let bytes = iota::<L>().to_bytes();
    for (i, chunk) in bytes.chunks_exact(4).enumerate() {
        assert_eq!(chunk, (i as i32).to_le_bytes(), "element {i}");
    }
    assert_eq!(iota::<L>().a.to_epi32(), [0, 1, 2, 3]);
    assert_eq!(iota::<L>().d.to_epi32(), [12, 13, 14, 15]);
}

fn check_store_window<L: Lane128>() {
    let mut buf = [0x5Au8; 80];
    unsafe { iota::<L>().storeu(buf.as_mut_ptr().add(7)) };
    assert!(buf[..7].iter().all(|&b| b == 0x5A), "bytes before the window changed");
    assert!(buf[71..].iter().all(|&b| b == 0x5A), "bytes after the window changed");
    let reloaded = unsafe { WideVector::<L>::loadu(buf.as_ptr().add(7)) };
    assert_eq!(reloaded, iota::<L>());
}

fn check_shuffle<L: Lane128>() {
    let a = distinct_lanes::<L>();
    let b = a.slli_epi32(8);

    let s = WideVector::shuffle_i32x4(a, b, 0x00);
    assert_eq!(s.a, a.a);
    assert_eq!(s.b, a.a);
    assert_eq!(s.c, b.a);
    assert_eq!(s.d, b.a);

    // 0b00_01_10_11: a.d, a.c, b.b, b.a
    let s = WideVector::shuffle_i32x4(a, b, 0x1B);
    assert_eq!(s.lanes(), [a.d, a.c, b.b, b.a]);

    for imm8 in 0..=255u8 {
        let s = WideVector::shuffle_i32x4(a, b, imm8);
        let sel = |shift: u8| ((imm8 >> shift) & 3) as usize;
        let expected = [a.lanes()[sel(0)], a.lanes()[sel(2)], b.lanes()[sel(4)], b.lanes()[sel(6)]];
        assert_eq!(s.lanes(), expected, "imm8 = {imm8:#04x}");
    }
}

fn check_lane_addressing<L: Lane128>() {
    let v = distinct_lanes::<L>();
    let x = L::setr_epi32(-1, -2, -3, -4);
    let wide = WideVector::<L>::broadcast_i32x4(x);

    for i in 0..4u32 {
        assert_eq!(wide.extract_i32x4(i), x);
        assert_eq!(v.extract_i32x4(i), v.lanes()[i as usize]);
        // High bits of the immediate are ignored.
        assert_eq!(v.extract_i32x4(i | 0xF0), v.extract_i32x4(i));

        let inserted = v.insert_i32x4(x, i);
        for j in 0..4u32 {
            let expected = if j == i { x } else { v.extract_i32x4(j) };
            assert_eq!(inserted.extract_i32x4(j), expected, "insert {i}, lane {j}");
        }
        assert_eq!(v.insert_i32x4(x, i + 4), inserted);
    }
}

fn check_mask_broadcast<L: Lane128>() {
    let src = iota::<L>();
    let value = L::setr_epi32(100, 101, 102, 103);

    assert_eq!(src.mask_broadcast_i32x4(value, 0xFFFF), WideVector::broadcast_i32x4(value));
    assert_eq!(src.mask_broadcast_i32x4(value, 0x0000), src);

    for bit in 0..16u32 {
        let out = src.mask_broadcast_i32x4(value, 1 << bit).to_epi32();
        for (i, e) in out.iter().enumerate() {
            let expected = if i as u32 == bit { 100 + (bit % 4) as i32 } else { i as i32 };
            assert_eq!(*e, expected, "mask bit {bit}, element {i}");
        }
    }

    // Lane c positions 0 and 3, lane d position 1.
    let out = src.mask_broadcast_i32x4(value, 0b0010_1001_0000_0000).to_epi32();
    assert_eq!(out, [0, 1, 2, 3, 4, 5, 6, 7, 100, 9, 10, 103, 12, 101, 14, 15]);
}

fn check_shifts<L: Lane128>() {
    let v = WideVector::<L>::set1_epi32(-1);
    assert_eq!(v.srli_epi32(0), v);
    assert_eq!(v.slli_epi32(0), v);
    assert_eq!(v.srli_epi32(32), WideVector::setzero());
    assert_eq!(v.slli_epi32(32), WideVector::setzero());
    assert_eq!(v.srli_epi32(1000), WideVector::setzero());
    assert_eq!(v.srli_epi32(28).to_epi32(), [0xF; 16]);
    assert_eq!(v.slli_epi32(31).to_epi32(), [i32::MIN; 16]);
}

fn check_bitwise<L: Lane128>() {
    let v = iota::<L>();
    let w = distinct_lanes::<L>();
    assert_eq!(v ^ v, WideVector::setzero());
    assert_eq!(v ^ w, w ^ v);
    assert_eq!(v | w, w | v);
    assert_eq!(v & w, w & v);
    assert_eq!((v & w).to_epi32()[5], 5 & 0xB1);
    assert_eq!((v | w).to_epi32()[15], 15 | 0xD3);
}

#[test]
fn test_soft_setr_store_layout() {
    check_setr_store_layout::<SoftLane>();
}

#[test]
fn test_soft_store_window() {
    check_store_window::<SoftLane>();
}

#[test]
fn test_soft_shuffle() {
    check_shuffle::<SoftLane>();
}

#[test]
fn test_soft_lane_addressing() {
    check_lane_addressing::<SoftLane>();
}

#[test]
fn test_soft_mask_broadcast() {
    check_mask_broadcast::<SoftLane>();
}

#[test]
fn test_soft_shifts() {
    check_shifts::<SoftLane>();
}

#[test]
fn test_soft_bitwise() {
    check_bitwise::<SoftLane>();
}

#[test]
fn test_native_wide_ops() {
    check_setr_store_layout::<NativeLane>();
    check_store_window::<NativeLane>();
    check_shuffle::<NativeLane>();
    check_lane_addressing::<NativeLane>();
    check_mask_broadcast::<NativeLane>();
    check_shifts::<NativeLane>();
    check_bitwise::<NativeLane>();
}

#[test]
fn test_aligned_load_store() {
    let v = iota::<SoftLane>();
    let mut slot = WideVector::<SoftLane>::setzero();
    let p = &mut slot as *mut WideVector<SoftLane> as *mut u8;
    unsafe {
        v.store(p);
        assert_eq!(WideVector::<SoftLane>::load(p), v);
    }
    assert_eq!(slot, v);
    assert_eq!(core::mem::align_of::<WideVector<SoftLane>>(), VECTOR_ALIGN);
    assert_eq!(core::mem::size_of::<WideVector<SoftLane>>(), VECTOR_BYTES);
}

#[test]
fn test_debug_format() {
    let v = WideVector::<SoftLane>::set1_epi32(-1);
    let rendered = format!("{:?}", v);
    assert!(rendered.starts_with("WideVector"));
    assert!(rendered.contains("ffffffff"));
}
