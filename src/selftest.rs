//! Known-answer self-test for a lane backend.
//!
//! Exercises every wide operation whose contract is easy to get subtly
//! wrong (element layout, shuffle asymmetry, masked broadcast, shift
//! saturation) and checks the AES rounds against FIPS-197 Appendix B,
//! placing a different round in each lane.

use crate::detect::{LaneBackend, lane_backend_description};
use crate::lane::{Lane128, SoftLane};
use crate::wide::WideVector;
use anyhow::{Context, Result, bail, ensure};

/// One AES round: (state at start of round, round key, next state).
pub type RoundVector = ([u8; 16], [u8; 16], [u8; 16]);

/// FIPS-197 Appendix B, rounds 1 to 4 of AES-128 with key
/// `2b7e1516 28aed2a6 abf71588 09cf4f3c`.
pub const FIPS197_ROUNDS: [RoundVector; 4] = [
    (
        [0x19, 0x3d, 0xe3, 0xbe, 0xa0, 0xf4, 0xe2, 0x2b, 0x9a, 0xc6, 0x8d, 0x2a, 0xe9, 0xf8, 0x48, 0x08],
        [0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a, 0x6c, 0x76, 0x05],
        [0xa4, 0x9c, 0x7f, 0xf2, 0x68, 0x9f, 0x35, 0x2b, 0x6b, 0x5b, 0xea, 0x43, 0x02, 0x6a, 0x50, 0x49],
    ),
    (
        [0xa4, 0x9c, 0x7f, 0xf2, 0x68, 0x9f, 0x35, 0x2b, 0x6b, 0x5b, 0xea, 0x43, 0x02, 0x6a, 0x50, 0x49],
        [0xf2, 0xc2, 0x95, 0xf2, 0x7a, 0x96, 0xb9, 0x43, 0x59, 0x35, 0x80, 0x7a, 0x73, 0x59, 0xf6, 0x7f],
        [0xaa, 0x8f, 0x5f, 0x03, 0x61, 0xdd, 0xe3, 0xef, 0x82, 0xd2, 0x4a, 0xd2, 0x68, 0x32, 0x46, 0x9a],
    ),
    (
        [0xaa, 0x8f, 0x5f, 0x03, 0x61, 0xdd, 0xe3, 0xef, 0x82, 0xd2, 0x4a, 0xd2, 0x68, 0x32, 0x46, 0x9a],
        [0x3d, 0x80, 0x47, 0x7d, 0x47, 0x16, 0xfe, 0x3e, 0x1e, 0x23, 0x7e, 0x44, 0x6d, 0x7a, 0x88, 0x3b],
        [0x48, 0x6c, 0x4e, 0xee, 0x67, 0x1d, 0x9d, 0x0d, 0x4d, 0xe3, 0xb1, 0x38, 0xd6, 0x5f, 0x58, 0xe7],
    ),
    (
        [0x48, 0x6c, 0x4e, 0xee, 0x67, 0x1d, 0x9d, 0x0d, 0x4d, 0xe3, 0xb1, 0x38, 0xd6, 0x5f, 0x58, 0xe7],
        [0xef, 0x44, 0xa5, 0x41, 0xa8, 0x52, 0x5b, 0x7f, 0xb6, 0x71, 0x25, 0x3b, 0xdb, 0x0b, 0xad, 0x00],
        [0xe0, 0x92, 0x7f, 0xe8, 0xc8, 0x63, 0x63, 0xc0, 0xd9, 0xb1, 0x35, 0x50, 0x85, 0xb8, 0xbe, 0x01],
    ),
];

/// FIPS-197 Appendix B, round 10 (final round) producing the ciphertext.
pub const FIPS197_FINAL_ROUND: RoundVector = (
    [0xeb, 0x40, 0xf2, 0x1e, 0x59, 0x2e, 0x38, 0x84, 0x8b, 0xa1, 0x13, 0xe7, 0x1b, 0xc3, 0x42, 0xd2],
    [0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63, 0x0c, 0xa6],
    [0x39, 0x25, 0x84, 0x1d, 0x02, 0xdc, 0x09, 0xfb, 0xdc, 0x11, 0x85, 0x97, 0x19, 0x6a, 0x0b, 0x32],
);

fn check(name: &str, ok: bool) -> Result<()> {
    ensure!(ok, "{name}: result does not match the expected value");
    log::debug!("{name}: ok");
    Ok(())
}

fn check_layout<L: Lane128>() -> Result<()> {
    let v = WideVector::<L>::setr_epi32(core::array::from_fn(|i| i as i32 * 0x0101_0101));
    let bytes = v.to_bytes();
    let in_order = bytes
        .chunks_exact(4)
        .enumerate()
        .all(|(i, chunk)| chunk == (i as i32 * 0x0101_0101).to_le_bytes());
    check("setr/store layout", in_order)?;
    check("load/store round trip", WideVector::<L>::from_bytes(&bytes).to_bytes() == bytes)?;
    check("xor self is zero", (v ^ v) == WideVector::setzero())
}

fn check_lane_moves<L: Lane128>() -> Result<()> {
    let a = WideVector::<L>::setr_epi32(core::array::from_fn(|i| i as i32));
    let b = a.slli_epi32(16);

    let s = WideVector::shuffle_i32x4(a, b, 0x00);
    check("shuffle 0x00", s.lanes() == [a.a, a.a, b.a, b.a])?;
    let s = WideVector::shuffle_i32x4(a, b, 0xE4);
    check("shuffle 0xe4", s.lanes() == [a.a, a.b, b.c, b.d])?;

    let x = L::setr_epi32(-7, -8, -9, -10);
    let all_extract = (0..4).all(|i| WideVector::<L>::broadcast_i32x4(x).extract_i32x4(i) == x);
    check("extract(broadcast)", all_extract)?;
    let inserted = a.insert_i32x4(x, 6);
    check("insert ignores high bits", inserted.lanes() == [a.a, a.b, x, a.d])
}

fn check_masked_broadcast<L: Lane128>() -> Result<()> {
    let src = WideVector::<L>::set1_epi32(0x1111_1111);
    let value = L::setr_epi32(1, 2, 3, 4);
    check(
        "mask_broadcast all ones",
        src.mask_broadcast_i32x4(value, 0xFFFF) == WideVector::broadcast_i32x4(value),
    )?;
    check("mask_broadcast all zeros", src.mask_broadcast_i32x4(value, 0) == src)?;
    let out = src.mask_broadcast_i32x4(value, 0x8001).to_epi32();
    let mut expected = [0x1111_1111; 16];
    expected[0] = 1;
    expected[15] = 4;
    check("mask_broadcast single bits", out == expected)
}

fn check_shifts<L: Lane128>() -> Result<()> {
    let v = WideVector::<L>::set1_epi32(-1);
    check("srli 0", v.srli_epi32(0) == v)?;
    check("slli 0", v.slli_epi32(0) == v)?;
    check("srli 32", v.srli_epi32(32) == WideVector::setzero())?;
    check("slli 32", v.slli_epi32(32) == WideVector::setzero())?;
    check("srli 31", v.srli_epi32(31) == WideVector::set1_epi32(1))
}

/// # Safety
/// The lane's AES extension must be available.
unsafe fn check_aes<L: Lane128>() -> Result<()> {
    let lanes = |pick: fn(&RoundVector) -> [u8; 16]| {
        WideVector::<L>::from_lanes(FIPS197_ROUNDS.map(|round| L::from_bytes(pick(&round))))
    };
    let state = lanes(|r| r.0);
    let key = lanes(|r| r.1);
    let expected = lanes(|r| r.2);
    let got = unsafe { state.aesenc(key) };
    for (i, (g, e)) in got.lanes().iter().zip(expected.lanes()).enumerate() {
        check(&format!("aesenc lane {i}"), *g == e)?;
    }

    let (s, k, out) = FIPS197_FINAL_ROUND;
    let wide = |bytes: [u8; 16]| WideVector::<L>::broadcast_i32x4(L::from_bytes(bytes));
    let last = unsafe { wide(s).aesenclast(wide(k)) };
    check("aesenclast", last == wide(out))
}

/// Runs every known-answer check on lane type `L`.
pub fn run_known_answer_tests<L: Lane128>() -> Result<()> {
    let backend = L::BACKEND;
    ensure!(
        backend.is_available(),
        "lane backend {} is not supported on this CPU",
        backend.name()
    );

    check_layout::<L>().context("layout")?;
    check_lane_moves::<L>().context("lane addressing")?;
    check_masked_broadcast::<L>().context("masked broadcast")?;
    check_shifts::<L>().context("element shifts")?;
    // Availability was checked above.
    unsafe { check_aes::<L>() }.context("aes rounds")?;

    log::info!(
        "Self-test passed for {} ({})",
        backend.name(),
        lane_backend_description(backend)
    );
    Ok(())
}

/// Runs the self-test on the lane type implementing `backend`.
pub fn run_for_backend(backend: LaneBackend) -> Result<()> {
    match backend {
        LaneBackend::Soft => run_known_answer_tests::<SoftLane>(),
        LaneBackend::AesNi => {
            #[cfg(target_arch = "x86_64")]
            {
                run_known_answer_tests::<crate::lane::AesNiLane>()
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                bail!("lane backend {} requires an x86_64 target", backend.name())
            }
        }
        LaneBackend::NeonAes => {
            #[cfg(target_arch = "aarch64")]
            {
                run_known_answer_tests::<crate::lane::NeonLane>()
            }
            #[cfg(not(target_arch = "aarch64"))]
            {
                bail!("lane backend {} requires an aarch64 target", backend.name())
            }
        }
    }
}
