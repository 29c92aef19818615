use crate::nvsdk_ngx::NgxPerfQuality;
use glam::UVec2;

/// DLSS support on the current system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlssSupport {
    /// DLSS is supported.
    Supported,
    /// DLSS is not supported.
    #[default]
    NotSupported,
    /// Incompatible hardware (eg. non-NVIDIA GPU).
    NotSupportedIncompatibleHardware,
    /// Incompatible driver (too old version).
    NotSupportedDriverOutOfDate,
    /// Incompatible operating system (too old version).
    NotSupportedOperatingSystemOutOfDate,
}

impl DlssSupport {
    pub fn is_supported(self) -> bool {
        self == Self::Supported
    }
}

/// DLSS upscaling quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlssQuality {
    UltraPerformance,
    /// Max performance.
    Performance,
    #[default]
    Balanced,
    /// Max quality.
    Quality,
    UltraQuality,
}

impl DlssQuality {
    pub(crate) fn as_perf_quality_value(self) -> NgxPerfQuality {
        match self {
            Self::UltraPerformance => NgxPerfQuality::UltraPerformance,
            Self::Performance => NgxPerfQuality::MaxPerf,
            Self::Balanced => NgxPerfQuality::Balanced,
            Self::Quality => NgxPerfQuality::MaxQuality,
            Self::UltraQuality => NgxPerfQuality::UltraQuality,
        }
    }
}

/// Optimal settings for rendering into a given display resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DlssRecommendedSettings {
    /// Optimal render resolution.
    pub resolution_optimal: UVec2,
    /// Minimum render resolution, for dynamic resolution.
    pub resolution_min: UVec2,
    /// Maximum render resolution, for dynamic resolution.
    pub resolution_max: UVec2,
    pub sharpness: f32,
}

impl DlssRecommendedSettings {
    /// Settings that render at display resolution, used when DLSS can't answer.
    pub fn passthrough(display_size: UVec2) -> Self {
        Self {
            resolution_optimal: display_size,
            resolution_min: display_size,
            resolution_max: display_size,
            sharpness: 0.0,
        }
    }
}
