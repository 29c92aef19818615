//! Types shared with the NVIDIA NGX runtime, and the [`NgxBackend`] seam the vendor
//! library is reached through.

use crate::types::DlssRecommendedSettings;
use ash::vk;
use glam::{UVec2, Vec2};
use std::{ffi::c_void, fmt, path::PathBuf};
use uuid::Uuid;

/// Raw `NVSDK_NGX_Result` code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NgxResult(pub u32);

impl NgxResult {
    pub const SUCCESS: Self = Self(0x1);
    pub const FAIL: Self = Self(0xBAD00000);
    pub const FAIL_FEATURE_NOT_SUPPORTED: Self = Self(0xBAD00000 | 1);
    pub const FAIL_PLATFORM_ERROR: Self = Self(0xBAD00000 | 2);
    pub const FAIL_FEATURE_ALREADY_EXISTS: Self = Self(0xBAD00000 | 3);
    pub const FAIL_FEATURE_NOT_FOUND: Self = Self(0xBAD00000 | 4);
    pub const FAIL_INVALID_PARAMETER: Self = Self(0xBAD00000 | 5);
    pub const FAIL_SCRATCH_BUFFER_TOO_SMALL: Self = Self(0xBAD00000 | 6);
    pub const FAIL_NOT_INITIALIZED: Self = Self(0xBAD00000 | 7);
    pub const FAIL_UNSUPPORTED_INPUT_FORMAT: Self = Self(0xBAD00000 | 8);
    pub const FAIL_RW_FLAG_MISSING: Self = Self(0xBAD00000 | 9);
    pub const FAIL_MISSING_INPUT: Self = Self(0xBAD00000 | 10);
    pub const FAIL_UNABLE_TO_INITIALIZE_FEATURE: Self = Self(0xBAD00000 | 11);
    pub const FAIL_OUT_OF_DATE: Self = Self(0xBAD00000 | 12);
    pub const FAIL_OUT_OF_GPU_MEMORY: Self = Self(0xBAD00000 | 13);
    pub const FAIL_UNSUPPORTED_FORMAT: Self = Self(0xBAD00000 | 14);
    pub const FAIL_UNABLE_TO_WRITE_TO_APP_DATA_PATH: Self = Self(0xBAD00000 | 15);
    pub const FAIL_UNSUPPORTED_PARAMETER: Self = Self(0xBAD00000 | 16);
    pub const FAIL_DENIED: Self = Self(0xBAD00000 | 17);
    pub const FAIL_NOT_IMPLEMENTED: Self = Self(0xBAD00000 | 18);

    pub fn failed(self) -> bool {
        self.0 & 0xFFF00000 == Self::FAIL.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SUCCESS => "Success",
            Self::FAIL => "Fail",
            Self::FAIL_FEATURE_NOT_SUPPORTED => "Feature not supported",
            Self::FAIL_PLATFORM_ERROR => "Platform error",
            Self::FAIL_FEATURE_ALREADY_EXISTS => "Feature already exists",
            Self::FAIL_FEATURE_NOT_FOUND => "Feature not found",
            Self::FAIL_INVALID_PARAMETER => "Invalid parameter",
            Self::FAIL_SCRATCH_BUFFER_TOO_SMALL => "Scratch buffer too small",
            Self::FAIL_NOT_INITIALIZED => "Not initialized",
            Self::FAIL_UNSUPPORTED_INPUT_FORMAT => "Unsupported input format",
            Self::FAIL_RW_FLAG_MISSING => "RW flag missing",
            Self::FAIL_MISSING_INPUT => "Missing input",
            Self::FAIL_UNABLE_TO_INITIALIZE_FEATURE => "Unable to initialize feature",
            Self::FAIL_OUT_OF_DATE => "Out of date",
            Self::FAIL_OUT_OF_GPU_MEMORY => "Out of GPU memory",
            Self::FAIL_UNSUPPORTED_FORMAT => "Unsupported format",
            Self::FAIL_UNABLE_TO_WRITE_TO_APP_DATA_PATH => "Unable to write to app data path",
            Self::FAIL_UNSUPPORTED_PARAMETER => "Unsupported parameter",
            Self::FAIL_DENIED => "Denied",
            Self::FAIL_NOT_IMPLEMENTED => "Not implemented",
            _ => "Unknown",
        }
    }
}

impl fmt::Debug for NgxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NgxResult(0x{:x})", self.0)
    }
}

impl fmt::Display for NgxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}, {}", self.0, self.as_str())
    }
}

pub fn check_ngx_result(result: NgxResult) -> Result<(), DlssError> {
    if result.failed() {
        Err(DlssError::Ngx(result))
    } else {
        Ok(())
    }
}

/// Error returned by DLSS operations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlssError {
    #[error("NGX error: {0}")]
    Ngx(NgxResult),
    #[error("DLSS is not initialized")]
    NotInitialized,
}

impl DlssError {
    pub fn ngx_result(&self) -> Option<NgxResult> {
        match self {
            Self::Ngx(result) => Some(*result),
            _ => None,
        }
    }
}

/// `NVSDK_NGX_PerfQuality_Value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NgxPerfQuality {
    MaxPerf,
    Balanced,
    MaxQuality,
    UltraPerformance,
    UltraQuality,
}

bitflags::bitflags! {
    /// `NVSDK_NGX_DLSS_Feature_Flags` used when creating the DLSS feature.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DlssFeatureFlags: i32 {
        const IS_HDR = 1 << 0;
        const MV_LOW_RES = 1 << 1;
        const MV_JITTERED = 1 << 2;
        const DEPTH_INVERTED = 1 << 3;
        const DO_SHARPENING = 1 << 5;
        const AUTO_EXPOSURE = 1 << 6;
    }
}

/// Graphics API the engine renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RendererType {
    DirectX11,
    DirectX12,
    Vulkan,
    Null,
}

impl RendererType {
    /// Whether this build can drive NGX for the renderer.
    pub fn is_available(self) -> bool {
        match self {
            Self::DirectX11 | Self::DirectX12 => true,
            Self::Vulkan => cfg!(graphics_api_vulkan),
            Self::Null => false,
        }
    }
}

/// Native device handles NGX is initialized with.
#[derive(Clone, Copy, Debug)]
pub enum NativeDevice {
    /// `ID3D11Device*`.
    DirectX11(*mut c_void),
    /// `ID3D12Device*`.
    DirectX12(*mut c_void),
    Vulkan {
        instance: vk::Instance,
        physical_device: vk::PhysicalDevice,
        device: vk::Device,
    },
    Null,
}

impl NativeDevice {
    pub fn renderer_type(&self) -> RendererType {
        match self {
            Self::DirectX11(_) => RendererType::DirectX11,
            Self::DirectX12(_) => RendererType::DirectX12,
            Self::Vulkan { .. } => RendererType::Vulkan,
            Self::Null => RendererType::Null,
        }
    }
}

/// Native command recording context DLSS commands are written into.
#[derive(Clone, Copy, Debug)]
pub enum NativeCommandList {
    /// `ID3D11DeviceContext*`.
    DirectX11(*mut c_void),
    /// `ID3D12GraphicsCommandList*`.
    DirectX12(*mut c_void),
    Vulkan(vk::CommandBuffer),
}

/// Native texture handed to DLSS.
#[derive(Clone, Copy, Debug)]
pub enum NativeResource {
    /// `ID3D11Resource*` or `ID3D12Resource*`.
    DirectX(*mut c_void),
    Vulkan {
        image: vk::Image,
        image_view: vk::ImageView,
        format: vk::Format,
        aspect_mask: vk::ImageAspectFlags,
        size: UVec2,
        read_write: bool,
    },
}

/// GPU capabilities relevant to DLSS.
#[derive(Clone, Copy, Debug)]
pub struct GpuDeviceInfo {
    pub native: NativeDevice,
    pub has_compute: bool,
    pub is_nvidia: bool,
    /// False on Windows older than 10.
    pub os_up_to_date: bool,
}

impl GpuDeviceInfo {
    pub fn renderer_type(&self) -> RendererType {
        self.native.renderer_type()
    }
}

/// Arguments for `NVSDK_NGX_*_Init` / `NVSDK_NGX_*_Init_with_ProjectID`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NgxInitParams {
    pub app_id: u32,
    /// When set, the project id entry point is used instead of the app id.
    pub project_id: Option<Uuid>,
    pub engine_version: String,
    pub app_data_path: PathBuf,
}

/// `NVSDK_NGX_DLSS_Create_Params`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NgxCreateParams {
    pub render_size: UVec2,
    pub target_size: UVec2,
    pub perf_quality: NgxPerfQuality,
    pub flags: DlssFeatureFlags,
}

/// Evaluation inputs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct NgxEvalParams {
    pub color: NativeResource,
    pub output: NativeResource,
    pub depth: NativeResource,
    pub motion_vectors: Option<NativeResource>,
    pub render_subrect: UVec2,
    pub sharpness: f32,
    pub jitter_offset: Vec2,
    /// Scales motion vectors into pixel space.
    pub motion_vector_scale: Vec2,
    pub reset: bool,
    pub frame_time_delta_ms: f32,
}

/// Opaque `NVSDK_NGX_Handle*` owned by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NgxFeatureHandle(pub u64);

/// Entry points of the NGX runtime for one renderer.
///
/// Builds linked against the SDK with the Vulkan loader get `VulkanNgx`. Direct3D hosts
/// implement it over their own bindings, tests use [`MockNgx`](crate::mock::MockNgx)
/// (`mock` feature).
pub trait NgxBackend {
    fn init(&mut self, params: &NgxInitParams, device: &NativeDevice) -> Result<(), DlssError>;

    /// Reads `NVSDK_NGX_EParameter_SuperSampling_Available` from the capability parameters.
    fn super_sampling_available(&mut self) -> Result<bool, DlssError>;

    /// `NGX_DLSS_GET_OPTIMAL_SETTINGS`.
    fn optimal_settings(
        &self,
        display_size: UVec2,
        quality: NgxPerfQuality,
    ) -> Result<DlssRecommendedSettings, DlssError>;

    fn create_feature(
        &mut self,
        command_list: NativeCommandList,
        params: &NgxCreateParams,
    ) -> Result<NgxFeatureHandle, DlssError>;

    fn evaluate(
        &mut self,
        command_list: NativeCommandList,
        feature: NgxFeatureHandle,
        params: &NgxEvalParams,
    ) -> Result<(), DlssError>;

    fn release_feature(&mut self, feature: NgxFeatureHandle) -> Result<(), DlssError>;

    /// Destroys the parameter objects and calls `NVSDK_NGX_*_Shutdown1`.
    fn shutdown(&mut self, device: &NativeDevice) -> Result<(), DlssError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_codes() {
        assert!(!NgxResult::SUCCESS.failed());
        assert!(NgxResult::FAIL.failed());
        assert!(NgxResult::FAIL_OUT_OF_DATE.failed());
        assert_eq!(check_ngx_result(NgxResult::SUCCESS), Ok(()));
        assert_eq!(
            check_ngx_result(NgxResult::FAIL_DENIED),
            Err(DlssError::Ngx(NgxResult::FAIL_DENIED))
        );
        assert_eq!(
            DlssError::Ngx(NgxResult::FAIL_OUT_OF_DATE).to_string(),
            "NGX error: 0xbad0000c, Out of date"
        );
    }
}
