//! In-process stand-ins for the NGX runtime and the host renderer, for running without an
//! NVIDIA GPU.

use crate::{
    nvsdk_ngx::*,
    render::{GpuContext, GpuTexture, ResourceState, TextureDescription},
    types::DlssRecommendedSettings,
};
use glam::UVec2;
use std::ptr;

/// [`NgxBackend`] that records every call and answers from fixed tables.
#[derive(Debug)]
pub struct MockNgx {
    pub init_result: NgxResult,
    pub super_sampling_available: bool,
    pub fail_optimal_settings: bool,
    pub fail_create: bool,
    pub init_calls: usize,
    pub shutdown_calls: usize,
    pub last_init: Option<NgxInitParams>,
    pub created: Vec<NgxCreateParams>,
    pub released: Vec<NgxFeatureHandle>,
    pub evaluations: Vec<NgxEvalParams>,
    next_handle: u64,
}

impl Default for MockNgx {
    fn default() -> Self {
        Self {
            init_result: NgxResult::SUCCESS,
            super_sampling_available: true,
            fail_optimal_settings: false,
            fail_create: false,
            init_calls: 0,
            shutdown_calls: 0,
            last_init: None,
            created: Vec::new(),
            released: Vec::new(),
            evaluations: Vec::new(),
            next_handle: 1,
        }
    }
}

impl MockNgx {
    pub fn failing_init(mut self, result: NgxResult) -> Self {
        self.init_result = result;
        self
    }

    pub fn without_super_sampling(mut self) -> Self {
        self.super_sampling_available = false;
        self
    }

    /// Render scale NGX reports for each quality mode.
    pub fn render_scale(quality: NgxPerfQuality) -> f32 {
        match quality {
            NgxPerfQuality::UltraPerformance => 1.0 / 3.0,
            NgxPerfQuality::MaxPerf => 0.5,
            NgxPerfQuality::Balanced => 0.58,
            NgxPerfQuality::MaxQuality => 2.0 / 3.0,
            NgxPerfQuality::UltraQuality => 0.77,
        }
    }
}

impl NgxBackend for MockNgx {
    fn init(&mut self, params: &NgxInitParams, _device: &NativeDevice) -> Result<(), DlssError> {
        self.init_calls += 1;
        self.last_init = Some(params.clone());
        check_ngx_result(self.init_result)
    }

    fn super_sampling_available(&mut self) -> Result<bool, DlssError> {
        Ok(self.super_sampling_available)
    }

    fn optimal_settings(
        &self,
        display_size: UVec2,
        quality: NgxPerfQuality,
    ) -> Result<DlssRecommendedSettings, DlssError> {
        if self.fail_optimal_settings {
            return Err(DlssError::Ngx(NgxResult::FAIL_INVALID_PARAMETER));
        }
        let scale = Self::render_scale(quality);
        let optimal = (display_size.as_vec2() * scale).round().as_uvec2();
        Ok(DlssRecommendedSettings {
            resolution_optimal: optimal,
            resolution_min: (display_size.as_vec2() * 1.0 / 3.0).round().as_uvec2(),
            resolution_max: display_size,
            sharpness: 0.0,
        })
    }

    fn create_feature(
        &mut self,
        _command_list: NativeCommandList,
        params: &NgxCreateParams,
    ) -> Result<NgxFeatureHandle, DlssError> {
        if self.fail_create {
            return Err(DlssError::Ngx(NgxResult::FAIL_UNABLE_TO_INITIALIZE_FEATURE));
        }
        self.created.push(*params);
        let handle = NgxFeatureHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn evaluate(
        &mut self,
        _command_list: NativeCommandList,
        _feature: NgxFeatureHandle,
        params: &NgxEvalParams,
    ) -> Result<(), DlssError> {
        self.evaluations.push(*params);
        Ok(())
    }

    fn release_feature(&mut self, feature: NgxFeatureHandle) -> Result<(), DlssError> {
        self.released.push(feature);
        Ok(())
    }

    fn shutdown(&mut self, _device: &NativeDevice) -> Result<(), DlssError> {
        self.shutdown_calls += 1;
        Ok(())
    }
}

/// A DirectX 12 capable NVIDIA GPU on an up to date OS.
pub fn nvidia_gpu() -> GpuDeviceInfo {
    GpuDeviceInfo {
        native: NativeDevice::DirectX12(ptr::null_mut()),
        has_compute: true,
        is_nvidia: true,
        os_up_to_date: true,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MockTexture {
    pub description: TextureDescription,
}

impl MockTexture {
    pub fn new(size: UVec2, unordered_access: bool) -> Self {
        Self {
            description: TextureDescription {
                size,
                unordered_access,
                back_buffer: false,
            },
        }
    }
}

impl GpuTexture for MockTexture {
    fn description(&self) -> TextureDescription {
        self.description
    }

    fn native(&self) -> NativeResource {
        NativeResource::DirectX(ptr::null_mut())
    }
}

/// [`GpuContext`] that counts the calls made on it.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub resource_states: Vec<(UVec2, ResourceState)>,
    pub flushes: usize,
    pub clears: usize,
    pub rebinds: usize,
    pub copies: Vec<(TextureDescription, TextureDescription)>,
    pub acquired: Vec<TextureDescription>,
    pub released: usize,
}

impl GpuContext for RecordingContext {
    fn native_command_list(&self) -> NativeCommandList {
        NativeCommandList::DirectX12(ptr::null_mut())
    }

    fn set_resource_state(&mut self, texture: &dyn GpuTexture, state: ResourceState) {
        self.resource_states.push((texture.size(), state));
    }

    fn flush_state(&mut self) {
        self.flushes += 1;
    }

    fn clear_state(&mut self) {
        self.clears += 1;
    }

    fn force_rebind_descriptors(&mut self) {
        self.rebinds += 1;
    }

    fn copy_resource(&mut self, destination: &dyn GpuTexture, source: &dyn GpuTexture) {
        self.copies
            .push((destination.description(), source.description()));
    }

    fn acquire_render_target(&mut self, description: TextureDescription) -> Box<dyn GpuTexture> {
        self.acquired.push(description);
        Box::new(MockTexture { description })
    }

    fn release_render_target(&mut self, _texture: Box<dyn GpuTexture>) {
        self.released += 1;
    }
}
