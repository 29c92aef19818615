use crate::{
    nvsdk_ngx::*,
    render::{GpuContext, GpuTexture, RenderContext, ResourceState},
    types::{DlssQuality, DlssRecommendedSettings, DlssSupport},
};
use glam::{UVec2, Vec2};
use log::{error, warn};

/// Parameters the current DLSS feature was created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NgxParams {
    src_size: UVec2,
    dst_size: UVec2,
    quality: DlssQuality,
    use_sharpness: bool,
}

/// Owns the NGX runtime state for one device.
pub struct NgxWrapper<B> {
    backend: B,
    device: Option<NativeDevice>,
    params: Option<NgxParams>,
    feature: Option<NgxFeatureHandle>,
}

impl<B: NgxBackend> NgxWrapper<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            device: None,
            params: None,
            feature: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.device.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Initializes NGX on `gpu` and reports whether DLSS can be used.
    pub fn initialize(&mut self, gpu: &GpuDeviceInfo, params: &NgxInitParams) -> DlssSupport {
        if !gpu.has_compute || !gpu.is_nvidia {
            return DlssSupport::NotSupportedIncompatibleHardware;
        }
        if !gpu.os_up_to_date {
            return DlssSupport::NotSupportedOperatingSystemOutOfDate;
        }
        let renderer = gpu.renderer_type();
        if !renderer.is_available() {
            warn!("DLSS can not run on {renderer:?} renderer.");
            return DlssSupport::NotSupported;
        }

        if let Err(err) = self.backend.init(params, &gpu.native) {
            let result = err.ngx_result().unwrap_or(NgxResult::FAIL);
            if result == NgxResult::FAIL_FEATURE_NOT_SUPPORTED
                || result == NgxResult::FAIL_PLATFORM_ERROR
            {
                warn!("NVIDIA NGX not available on this hardware/platform. Error code: {result}");
            } else {
                error!("Failed to initialize NGX. Error code: {result}");
            }
            return match result {
                NgxResult::FAIL_OUT_OF_DATE => DlssSupport::NotSupportedDriverOutOfDate,
                NgxResult::FAIL_FEATURE_NOT_SUPPORTED => {
                    DlssSupport::NotSupportedIncompatibleHardware
                }
                _ => DlssSupport::NotSupported,
            };
        }
        // NGX is up from here on, so failures below still need a shutdown.
        self.device = Some(gpu.native);

        match self.backend.super_sampling_available() {
            Ok(true) => DlssSupport::Supported,
            Ok(false) => {
                warn!("DLSS is not available.");
                self.shutdown();
                DlssSupport::NotSupported
            }
            Err(err) => {
                error!("Failed to get NGX capability parameters. {err}");
                self.shutdown();
                DlssSupport::NotSupported
            }
        }
    }

    pub fn shutdown(&mut self) {
        let Some(device) = self.device.take() else {
            return;
        };
        if let Some(feature) = self.feature.take() {
            if let Err(err) = self.backend.release_feature(feature) {
                error!("Failed to release DLSS feature. {err}");
            }
        }
        self.params = None;
        if let Err(err) = self.backend.shutdown(&device) {
            error!("Failed to shutdown NGX. {err}");
        }
    }

    /// Optimal settings for rendering into `display_size`, or a passthrough if NGX can't
    /// answer.
    pub fn query_recommended_settings(
        &self,
        display_size: UVec2,
        quality: DlssQuality,
    ) -> DlssRecommendedSettings {
        if self.is_initialized() {
            if let Ok(settings) = self
                .backend
                .optimal_settings(display_size, quality.as_perf_quality_value())
            {
                return settings;
            }
        }
        DlssRecommendedSettings::passthrough(display_size)
    }

    /// Upscales `input` into `output`, which must allow unordered access.
    ///
    /// The DLSS feature is recreated whenever the sizes, quality or sharpening toggle
    /// change between calls.
    #[allow(clippy::too_many_arguments)]
    pub fn temporal_resolve(
        &mut self,
        context: &mut dyn GpuContext,
        render_context: &RenderContext,
        input: &dyn GpuTexture,
        output: &dyn GpuTexture,
        quality: DlssQuality,
        pixel_offset: Vec2,
        sharpness: f32,
    ) -> Result<(), DlssError> {
        let Some(device) = self.device else {
            return Err(DlssError::NotInitialized);
        };
        let renderer = device.renderer_type();
        let command_list = context.native_command_list();

        let params = NgxParams {
            src_size: input.size(),
            dst_size: output.size(),
            quality,
            use_sharpness: sharpness != 0.0,
        };
        let feature = match (self.feature, self.params) {
            (Some(feature), Some(current)) if current == params => feature,
            _ => self.recreate_feature(command_list, params)?,
        };

        // Put resources into proper state
        if renderer == RendererType::DirectX12 {
            context.set_resource_state(output, ResourceState::UnorderedAccess);
            context.set_resource_state(input, ResourceState::ShaderResource);
            context.set_resource_state(render_context.depth_buffer, ResourceState::ShaderResource);
            if let Some(motion_vectors) = render_context.motion_vectors {
                context.set_resource_state(motion_vectors, ResourceState::ShaderResource);
            }
        }
        context.flush_state();

        let eval_params = NgxEvalParams {
            color: input.native(),
            output: output.native(),
            depth: render_context.depth_buffer.native(),
            motion_vectors: render_context.motion_vectors.map(|texture| texture.native()),
            render_subrect: params.src_size,
            sharpness,
            jitter_offset: pixel_offset,
            motion_vector_scale: params.src_size.as_vec2(),
            reset: render_context.task.is_camera_cut,
            frame_time_delta_ms: render_context.frame_time_delta_ms,
        };
        let result = self.backend.evaluate(command_list, feature, &eval_params);
        if renderer == RendererType::DirectX12 {
            context.force_rebind_descriptors();
        }
        result?;

        context.clear_state();
        Ok(())
    }

    fn recreate_feature(
        &mut self,
        command_list: NativeCommandList,
        params: NgxParams,
    ) -> Result<NgxFeatureHandle, DlssError> {
        self.params = None;
        if let Some(old) = self.feature.take() {
            if let Err(err) = self.backend.release_feature(old) {
                error!("Failed to release DLSS feature. {err}");
            }
        }

        let mut flags = DlssFeatureFlags::IS_HDR | DlssFeatureFlags::AUTO_EXPOSURE;
        flags.set(DlssFeatureFlags::DO_SHARPENING, params.use_sharpness);
        let create_params = NgxCreateParams {
            render_size: params.src_size,
            target_size: params.dst_size,
            perf_quality: params.quality.as_perf_quality_value(),
            flags,
        };
        let feature = self.backend.create_feature(command_list, &create_params)?;

        self.feature = Some(feature);
        self.params = Some(params);
        Ok(feature)
    }
}

impl<B> Drop for NgxWrapper<B> {
    fn drop(&mut self) {
        if self.device.is_some() {
            warn!("NGX wrapper dropped without shutdown");
        }
    }
}
