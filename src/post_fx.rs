use crate::{
    nvsdk_ngx::{DlssError, NgxBackend},
    plugin::DlssPlugin,
    render::{AntialiasingMode, GpuContext, GpuTexture, RenderContext, UpscaleLocation},
};
use glam::Vec2;
use log::error;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Where in the frame a custom post-process effect runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostProcessEffectLocation {
    Default,
    BeforeForwardPass,
    AfterForwardPass,
    BeforeReflectionsPass,
    AfterAntiAliasingPass,
    /// Replaces the renderer's upscaler.
    CustomUpscale,
}

/// A post-process effect registered with the host renderer.
pub trait PostProcessEffect: Send + Sync {
    fn name(&self) -> &str;
    fn location(&self) -> PostProcessEffectLocation;
    fn is_enabled(&self) -> bool;
}

/// Host registry of effects applied to every scene render task.
pub trait PostFxRegistry {
    fn add_global_custom_post_fx(&mut self, effect: Arc<dyn PostProcessEffect>);
    fn remove_global_custom_post_fx(&mut self, effect: &Arc<dyn PostProcessEffect>);
}

/// In-memory [`PostFxRegistry`].
#[derive(Default)]
pub struct GlobalPostFx {
    effects: Vec<Arc<dyn PostProcessEffect>>,
}

impl GlobalPostFx {
    pub fn effects(&self) -> &[Arc<dyn PostProcessEffect>] {
        &self.effects
    }
}

impl PostFxRegistry for GlobalPostFx {
    fn add_global_custom_post_fx(&mut self, effect: Arc<dyn PostProcessEffect>) {
        self.effects.push(effect);
    }

    fn remove_global_custom_post_fx(&mut self, effect: &Arc<dyn PostProcessEffect>) {
        self.effects.retain(|e| !Arc::ptr_eq(e, effect));
    }
}

/// DLSS upscaling effect.
#[derive(Debug)]
pub struct DlssPostFx {
    enabled: AtomicBool,
}

impl Default for DlssPostFx {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl PostProcessEffect for DlssPostFx {
    fn name(&self) -> &str {
        "DLSS"
    }

    fn location(&self) -> PostProcessEffectLocation {
        PostProcessEffectLocation::CustomUpscale
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl DlssPostFx {
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn can_render<B: NgxBackend>(&self, plugin: &DlssPlugin<B>) -> bool {
        self.is_enabled() && plugin.support.is_supported()
    }

    /// Moves upscaling before post-processing and swaps TAA for jittered DLSS input.
    pub fn pre_render(&self, render_context: &mut RenderContext) {
        if render_context.task.rendering_percentage >= 1.0 {
            return;
        }
        let setup = &mut render_context.setup;
        setup.upscale_location = UpscaleLocation::BeforePostProcessingPass;
        setup.use_temporal_aa_jitter = true;
        setup.antialiasing = AntialiasingMode::None;
    }

    /// Upscales `input` into `output`.
    ///
    /// DLSS writes through unordered access, so outputs without it are rendered into a
    /// pooled target and copied back.
    pub fn render<B: NgxBackend>(
        &self,
        plugin: &mut DlssPlugin<B>,
        context: &mut dyn GpuContext,
        render_context: &RenderContext,
        input: &dyn GpuTexture,
        output: &dyn GpuTexture,
    ) -> Result<(), DlssError> {
        let pooled = if output.is_unordered_access() {
            None
        } else {
            let mut description = output.description();
            description.back_buffer = false;
            description.unordered_access = true;
            Some(context.acquire_render_target(description))
        };
        let dlss_output: &dyn GpuTexture = match &pooled {
            Some(texture) => texture.as_ref(),
            None => output,
        };

        let quality = plugin.quality;
        let sharpness = plugin.sharpness.clamp(-1.0, 1.0);
        let view = &render_context.view;
        let pixel_offset = Vec2::new(
            view.temporal_aa_jitter.x * view.screen_size.x / 2.0,
            view.temporal_aa_jitter.y * view.screen_size.y / 2.0,
        );
        let result = plugin.ngx_mut().temporal_resolve(
            context,
            render_context,
            input,
            dlss_output,
            quality,
            pixel_offset,
            sharpness,
        );
        if let Err(err) = &result {
            error!("Failed to evaluate DLSS. {err}");
        }

        if let Some(texture) = pooled {
            if result.is_ok() {
                context.copy_resource(output, texture.as_ref());
            }
            context.release_render_target(texture);
        }
        result
    }
}
