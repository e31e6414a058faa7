//! Runtime lane backend detection.
//!
//! This module detects which 128-bit lane implementation can run on the
//! current CPU and provides human-readable descriptions for logging.

use crate::defaults::FORCE_SOFT_ENV;

/// Available lane implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneBackend {
    /// SSE2 + AES-NI - x86_64 only
    AesNi,
    /// NEON + ARMv8 AES - aarch64 only
    NeonAes,
    /// Portable bytes + `aes` crate round - always available
    Soft,
}

impl LaneBackend {
    /// All backends, in preference order.
    pub const ALL: [LaneBackend; 3] = [LaneBackend::AesNi, LaneBackend::NeonAes, LaneBackend::Soft];

    /// Whether this backend's lane type exists on the compile target and its
    /// AES round is supported by the running CPU.
    pub fn is_available(self) -> bool {
        match self {
            LaneBackend::AesNi => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("aes")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
            LaneBackend::NeonAes => {
                #[cfg(target_arch = "aarch64")]
                {
                    std::arch::is_aarch64_feature_detected!("aes")
                }
                #[cfg(not(target_arch = "aarch64"))]
                {
                    false
                }
            }
            LaneBackend::Soft => true,
        }
    }

    /// Short lowercase name, as accepted by the CLI.
    pub fn name(self) -> &'static str {
        match self {
            LaneBackend::AesNi => "aesni",
            LaneBackend::NeonAes => "neon",
            LaneBackend::Soft => "soft",
        }
    }
}

/// Interprets the value of the force-soft environment variable.
pub fn force_soft_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1"))
}

/// Detects the best lane backend for this CPU
///
/// Environment variable override for testing/debugging:
/// - `WIDELANE_FORCE_SOFT=1`: Force the portable lane even when hardware AES exists
pub fn detect_lane_backend() -> LaneBackend {
    let forced = std::env::var(FORCE_SOFT_ENV).ok();
    if force_soft_requested(forced.as_deref()) {
        log::info!("{}=1: Using portable (soft) lane", FORCE_SOFT_ENV);
        return LaneBackend::Soft;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if LaneBackend::AesNi.is_available() {
            return LaneBackend::AesNi;
        }
        log::debug!("AES-NI not detected, falling back to portable lane");
    }

    #[cfg(target_arch = "aarch64")]
    {
        if LaneBackend::NeonAes.is_available() {
            return LaneBackend::NeonAes;
        }
        log::debug!("ARMv8 AES not detected, falling back to portable lane");
    }

    LaneBackend::Soft
}

/// Returns a human-readable description of the lane backend
pub fn lane_backend_description(backend: LaneBackend) -> &'static str {
    match backend {
        LaneBackend::AesNi => "SSE2 + AES-NI (4 x 128-bit lanes)",
        LaneBackend::NeonAes => "NEON + ARMv8 AES (4 x 128-bit lanes)",
        LaneBackend::Soft => "portable (4 x 128-bit byte lanes, aes crate round)",
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
