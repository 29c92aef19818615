//! [`NgxBackend`] over the `nvsdk_ngx` Vulkan entry points.
//!
//! Only compiled when `build.rs` linked the SDK and found the Vulkan SDK; the bindings are
//! generated from the vendor headers at build time.

mod bindings {
    #![allow(non_upper_case_globals)]
    #![allow(non_camel_case_types)]
    #![allow(non_snake_case)]
    #![allow(dead_code)]
    #![allow(clippy::all)]

    use ash::vk::{
        Buffer as VkBuffer, CommandBuffer as VkCommandBuffer, Device as VkDevice,
        ExtensionProperties as VkExtensionProperties, Format as VkFormat, Image as VkImage,
        ImageSubresourceRange as VkImageSubresourceRange, ImageView as VkImageView,
        Instance as VkInstance, PFN_vkGetDeviceProcAddr, PFN_vkGetInstanceProcAddr,
        PhysicalDevice as VkPhysicalDevice,
    };

    include!(concat!(env!("OUT_DIR"), "/nvsdk_ngx_bindings.rs"));
}

use self::bindings::*;
use crate::{
    nvsdk_ngx::{
        DlssError, NativeCommandList, NativeDevice, NativeResource, NgxBackend, NgxCreateParams,
        NgxEvalParams, NgxFeatureHandle, NgxInitParams, NgxPerfQuality, NgxResult,
        check_ngx_result,
    },
    types::DlssRecommendedSettings,
};
use ash::{Entry, vk};
use glam::UVec2;
use log::warn;
use std::{ffi::CString, iter, mem, path::Path, ptr};

/// NGX runtime driven through a Vulkan device.
///
/// The Vulkan loader is opened at construction; NGX resolves its Vulkan entry points
/// through it instead of a statically linked loader.
pub struct VulkanNgx {
    entry: Entry,
    capability_parameters: *mut NVSDK_NGX_Parameter,
    parameters: *mut NVSDK_NGX_Parameter,
}

impl VulkanNgx {
    pub fn new() -> Result<Self, ash::LoadingError> {
        let entry = unsafe { Entry::load()? };
        Ok(Self {
            entry,
            capability_parameters: ptr::null_mut(),
            parameters: ptr::null_mut(),
        })
    }
}

impl NgxBackend for VulkanNgx {
    fn init(&mut self, params: &NgxInitParams, device: &NativeDevice) -> Result<(), DlssError> {
        let NativeDevice::Vulkan {
            instance,
            physical_device,
            device,
        } = *device
        else {
            return Err(DlssError::Ngx(NgxResult::FAIL_PLATFORM_ERROR));
        };

        let app_data_path = wide_path(&params.app_data_path);
        let get_instance_proc_addr = self.entry.static_fn().get_instance_proc_addr;
        let get_device_proc_addr = unsafe { ash::Instance::load(self.entry.static_fn(), instance) }
            .fp_v1_0()
            .get_device_proc_addr;

        unsafe {
            match params.project_id {
                Some(project_id) => {
                    let project_id = c_string(&project_id.to_string())?;
                    let engine_version = c_string(&params.engine_version)?;
                    check(NVSDK_NGX_VULKAN_Init_with_ProjectID(
                        project_id.as_ptr(),
                        NVSDK_NGX_EngineType_NVSDK_NGX_ENGINE_TYPE_CUSTOM,
                        engine_version.as_ptr(),
                        app_data_path.as_ptr(),
                        instance,
                        physical_device,
                        device,
                        get_instance_proc_addr,
                        get_device_proc_addr,
                        ptr::null(),
                        NVSDK_NGX_Version_NVSDK_NGX_Version_API,
                    ))
                }
                None => check(NVSDK_NGX_VULKAN_Init(
                    params.app_id as _,
                    app_data_path.as_ptr(),
                    instance,
                    physical_device,
                    device,
                    get_instance_proc_addr,
                    get_device_proc_addr,
                    ptr::null(),
                    NVSDK_NGX_Version_NVSDK_NGX_Version_API,
                )),
            }
        }
    }

    fn super_sampling_available(&mut self) -> Result<bool, DlssError> {
        unsafe {
            check(NVSDK_NGX_VULKAN_GetCapabilityParameters(
                &mut self.capability_parameters,
            ))?;
            if self.capability_parameters.is_null() {
                return Err(DlssError::Ngx(NgxResult::FAIL));
            }

            let mut available = 0;
            check(NVSDK_NGX_Parameter_GetI(
                self.capability_parameters,
                NVSDK_NGX_Parameter_SuperSampling_Available.as_ptr().cast(),
                &mut available,
            ))?;
            Ok(available != 0)
        }
    }

    fn optimal_settings(
        &self,
        display_size: UVec2,
        quality: NgxPerfQuality,
    ) -> Result<DlssRecommendedSettings, DlssError> {
        if self.capability_parameters.is_null() {
            return Err(DlssError::NotInitialized);
        }

        let mut optimal = UVec2::ZERO;
        let mut min = UVec2::ZERO;
        let mut max = UVec2::ZERO;
        let mut sharpness = 0.0f32;
        unsafe {
            check(NGX_DLSS_GET_OPTIMAL_SETTINGS(
                self.capability_parameters,
                display_size.x,
                display_size.y,
                perf_quality_value(quality),
                &mut optimal.x,
                &mut optimal.y,
                &mut max.x,
                &mut max.y,
                &mut min.x,
                &mut min.y,
                &mut sharpness,
            ))?;
        }

        Ok(DlssRecommendedSettings {
            resolution_optimal: optimal,
            resolution_min: min,
            resolution_max: max,
            sharpness,
        })
    }

    fn create_feature(
        &mut self,
        command_list: NativeCommandList,
        params: &NgxCreateParams,
    ) -> Result<NgxFeatureHandle, DlssError> {
        let command_buffer = vulkan_command_buffer(command_list)?;

        unsafe {
            if self.parameters.is_null() {
                check(NVSDK_NGX_VULKAN_AllocateParameters(&mut self.parameters))?;
            }

            let mut create_params: NVSDK_NGX_DLSS_Create_Params = mem::zeroed();
            create_params.Feature.InWidth = params.render_size.x;
            create_params.Feature.InHeight = params.render_size.y;
            create_params.Feature.InTargetWidth = params.target_size.x;
            create_params.Feature.InTargetHeight = params.target_size.y;
            create_params.Feature.InPerfQualityValue = perf_quality_value(params.perf_quality);
            create_params.InFeatureCreateFlags = params.flags.bits();

            let mut feature: *mut NVSDK_NGX_Handle = ptr::null_mut();
            check(NGX_VULKAN_CREATE_DLSS_EXT(
                command_buffer,
                1,
                1,
                &mut feature,
                self.parameters,
                &mut create_params,
            ))?;
            Ok(NgxFeatureHandle(feature as u64))
        }
    }

    fn evaluate(
        &mut self,
        command_list: NativeCommandList,
        feature: NgxFeatureHandle,
        params: &NgxEvalParams,
    ) -> Result<(), DlssError> {
        let command_buffer = vulkan_command_buffer(command_list)?;

        let mut color = resource_to_ngx(&params.color)?;
        let mut output = resource_to_ngx(&params.output)?;
        let mut depth = resource_to_ngx(&params.depth)?;
        let mut motion_vectors = params
            .motion_vectors
            .as_ref()
            .map(resource_to_ngx)
            .transpose()?;

        unsafe {
            let mut eval_params: NVSDK_NGX_VK_DLSS_Eval_Params = mem::zeroed();
            eval_params.Feature.pInColor = &mut color;
            eval_params.Feature.pInOutput = &mut output;
            eval_params.Feature.InSharpness = params.sharpness;
            eval_params.pInDepth = &mut depth;
            eval_params.pInMotionVectors = motion_vectors
                .as_mut()
                .map_or(ptr::null_mut(), |resource| resource as *mut _);
            eval_params.InRenderSubrectDimensions = NVSDK_NGX_Dimensions {
                Width: params.render_subrect.x,
                Height: params.render_subrect.y,
            };
            eval_params.pInExposureTexture = ptr::null_mut();
            eval_params.InPreExposure = 0.0;
            eval_params.InJitterOffsetX = params.jitter_offset.x;
            eval_params.InJitterOffsetY = params.jitter_offset.y;
            eval_params.InMVScaleX = params.motion_vector_scale.x;
            eval_params.InMVScaleY = params.motion_vector_scale.y;
            eval_params.InReset = params.reset as _;
            eval_params.InFrameTimeDeltaInMsec = params.frame_time_delta_ms;

            check(NGX_VULKAN_EVALUATE_DLSS_EXT(
                command_buffer,
                feature_ptr(feature),
                self.parameters,
                &mut eval_params,
            ))
        }
    }

    fn release_feature(&mut self, feature: NgxFeatureHandle) -> Result<(), DlssError> {
        unsafe { check(NVSDK_NGX_VULKAN_ReleaseFeature(feature_ptr(feature))) }
    }

    fn shutdown(&mut self, device: &NativeDevice) -> Result<(), DlssError> {
        let NativeDevice::Vulkan { device, .. } = *device else {
            return Err(DlssError::Ngx(NgxResult::FAIL_PLATFORM_ERROR));
        };

        unsafe {
            for parameters in [&mut self.parameters, &mut self.capability_parameters] {
                if parameters.is_null() {
                    continue;
                }
                if let Err(err) = check(NVSDK_NGX_VULKAN_DestroyParameters(*parameters)) {
                    warn!("Failed to destroy NGX parameters: {err}");
                }
                *parameters = ptr::null_mut();
            }
            check(NVSDK_NGX_VULKAN_Shutdown1(device))
        }
    }
}

unsafe impl Send for VulkanNgx {}

fn check(result: NVSDK_NGX_Result) -> Result<(), DlssError> {
    check_ngx_result(NgxResult(result as u32))
}

fn c_string(value: &str) -> Result<CString, DlssError> {
    CString::new(value).map_err(|_| DlssError::Ngx(NgxResult::FAIL_INVALID_PARAMETER))
}

fn feature_ptr(feature: NgxFeatureHandle) -> *mut NVSDK_NGX_Handle {
    feature.0 as usize as *mut NVSDK_NGX_Handle
}

fn vulkan_command_buffer(command_list: NativeCommandList) -> Result<vk::CommandBuffer, DlssError> {
    match command_list {
        NativeCommandList::Vulkan(command_buffer) => Ok(command_buffer),
        _ => Err(DlssError::Ngx(NgxResult::FAIL_INVALID_PARAMETER)),
    }
}

fn perf_quality_value(quality: NgxPerfQuality) -> NVSDK_NGX_PerfQuality_Value {
    match quality {
        NgxPerfQuality::MaxPerf => {
            NVSDK_NGX_PerfQuality_Value_NVSDK_NGX_PerfQuality_Value_MaxPerf
        }
        NgxPerfQuality::Balanced => {
            NVSDK_NGX_PerfQuality_Value_NVSDK_NGX_PerfQuality_Value_Balanced
        }
        NgxPerfQuality::MaxQuality => {
            NVSDK_NGX_PerfQuality_Value_NVSDK_NGX_PerfQuality_Value_MaxQuality
        }
        NgxPerfQuality::UltraPerformance => {
            NVSDK_NGX_PerfQuality_Value_NVSDK_NGX_PerfQuality_Value_UltraPerformance
        }
        NgxPerfQuality::UltraQuality => {
            NVSDK_NGX_PerfQuality_Value_NVSDK_NGX_PerfQuality_Value_UltraQuality
        }
    }
}

fn resource_to_ngx(resource: &NativeResource) -> Result<NVSDK_NGX_Resource_VK, DlssError> {
    match *resource {
        NativeResource::Vulkan {
            image,
            image_view,
            format,
            aspect_mask,
            size,
            read_write,
        } => Ok(unsafe {
            NVSDK_NGX_Create_ImageView_Resource_VK(
                image_view,
                image,
                vk::ImageSubresourceRange {
                    aspect_mask,
                    base_mip_level: 0,
                    level_count: vk::REMAINING_MIP_LEVELS,
                    base_array_layer: 0,
                    layer_count: vk::REMAINING_ARRAY_LAYERS,
                },
                format,
                size.x,
                size.y,
                read_write,
            )
        }),
        NativeResource::DirectX(_) => Err(DlssError::Ngx(NgxResult::FAIL_INVALID_PARAMETER)),
    }
}

/// NUL-terminated `wchar_t` string for the app data path.
fn wide_path(path: &Path) -> Vec<wchar_t> {
    let path = path.to_string_lossy();
    #[cfg(windows)]
    let units = path.encode_utf16().map(|unit| unit as wchar_t);
    #[cfg(not(windows))]
    let units = path.chars().map(|c| c as wchar_t);
    units.chain(iter::once(0)).collect()
}
