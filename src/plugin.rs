use crate::{
    ngx_wrapper::NgxWrapper,
    nvsdk_ngx::{GpuDeviceInfo, NgxBackend, NgxInitParams},
    post_fx::{DlssPostFx, PostFxRegistry, PostProcessEffect},
    render::RenderTask,
    settings::DlssSettings,
    types::{DlssQuality, DlssRecommendedSettings, DlssSupport},
};
use glam::UVec2;
use log::{info, warn};
use std::{fmt, path::PathBuf, sync::Arc};

/// Scripting type name the editor plugin pairs with.
pub const PLUGIN_TYPE_NAME: &str = "NVIDIA.DLSS";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// Metadata shown in the host's plugin list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginDescription {
    pub name: String,
    pub category: String,
    pub description: String,
    pub author: String,
    pub repository_url: String,
    pub version: Version,
}

impl PluginDescription {
    pub fn dlss() -> Self {
        Self {
            name: "DLSS".to_owned(),
            category: "Rendering".to_owned(),
            description: "DLSS is a revolutionary breakthrough in AI-powered graphics upscaling technology that massively boosts performance.".to_owned(),
            author: "NVIDIA".to_owned(),
            repository_url: "https://github.com/FlaxEngine/DLSS".to_owned(),
            version: Version::new(2, 4, 0),
        }
    }
}

/// Game plugin owning the NGX runtime and the upscaling effect.
pub struct DlssPlugin<B> {
    description: PluginDescription,
    ngx: NgxWrapper<B>,
    engine_version: String,
    app_data_path: PathBuf,
    post_fx: Option<Arc<DlssPostFx>>,
    /// DLSS support on the current device, set by [`Self::initialize`].
    pub support: DlssSupport,
    pub quality: DlssQuality,
    /// Softening (negative) or sharpening (positive) factor in [-1, 1].
    pub sharpness: f32,
}

impl<B: NgxBackend> DlssPlugin<B> {
    /// `app_data_path` is a writable folder NGX keeps its logs and model caches in.
    pub fn new(
        backend: B,
        engine_version: impl Into<String>,
        app_data_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            description: PluginDescription::dlss(),
            ngx: NgxWrapper::new(backend),
            engine_version: engine_version.into(),
            app_data_path: app_data_path.into(),
            post_fx: None,
            support: DlssSupport::NotSupported,
            quality: DlssQuality::default(),
            sharpness: 0.0,
        }
    }

    pub fn description(&self) -> &PluginDescription {
        &self.description
    }

    pub fn post_fx(&self) -> Option<&Arc<DlssPostFx>> {
        self.post_fx.as_ref()
    }

    pub fn ngx(&self) -> &NgxWrapper<B> {
        &self.ngx
    }

    pub(crate) fn ngx_mut(&mut self) -> &mut NgxWrapper<B> {
        &mut self.ngx
    }

    pub fn initialize(
        &mut self,
        gpu: &GpuDeviceInfo,
        settings: &DlssSettings,
        post_fx_registry: &mut dyn PostFxRegistry,
    ) {
        self.support = DlssSupport::NotSupported;
        info!(
            "Initializing DLSS with AppId={}, ProjectId={}",
            settings.app_id,
            settings
                .project_id
                .map(|id| id.to_string())
                .unwrap_or_default()
        );

        let params = NgxInitParams {
            app_id: settings.effective_app_id(),
            project_id: settings.project_id,
            engine_version: self.engine_version.clone(),
            app_data_path: self.app_data_path.clone(),
        };
        self.support = self.ngx.initialize(gpu, &params);
        if !self.support.is_supported() {
            warn!("DLSS is not supported on this platform.");
            return;
        }

        // TODO: apply a global mip bias to texture group samplers once the host exposes them
        let post_fx = Arc::new(DlssPostFx::default());
        post_fx_registry.add_global_custom_post_fx(post_fx.clone());
        self.post_fx = Some(post_fx);
    }

    pub fn deinitialize(&mut self, post_fx_registry: &mut dyn PostFxRegistry) {
        if let Some(post_fx) = self.post_fx.take() {
            let post_fx: Arc<dyn PostProcessEffect> = post_fx;
            post_fx_registry.remove_global_custom_post_fx(&post_fx);
        }
        self.ngx.shutdown();
    }

    /// Optimal settings for rendering into `display_size`; `None` uses [`Self::quality`].
    pub fn query_recommended_settings(
        &self,
        display_size: UVec2,
        quality: Option<DlssQuality>,
    ) -> DlssRecommendedSettings {
        self.ngx
            .query_recommended_settings(display_size, quality.unwrap_or(self.quality))
    }

    /// Sets the task's render scale and the plugin sharpness to the recommended values.
    ///
    /// Tasks without an output size are left untouched.
    pub fn apply_recommended_settings(&mut self, task: &mut RenderTask, quality: Option<DlssQuality>) {
        if task.output_size.x == 0 || task.output_size.y == 0 {
            return;
        }
        let output_size = task.output_size.as_vec2();
        let settings = self.query_recommended_settings(task.output_size, quality);
        let optimal = settings.resolution_optimal.as_vec2();
        task.rendering_percentage = (optimal.x / output_size.x).min(optimal.y / output_size.y);
        self.sharpness = settings.sharpness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{MockNgx, nvidia_gpu},
        nvsdk_ngx::NgxResult,
        post_fx::GlobalPostFx,
    };
    use uuid::Uuid;

    fn plugin(backend: MockNgx) -> DlssPlugin<MockNgx> {
        DlssPlugin::new(backend, "1.9.6605", "/tmp/engine")
    }

    #[test]
    fn initialize_registers_post_fx_when_supported() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut registry = GlobalPostFx::default();
        let mut plugin = plugin(MockNgx::default());
        let settings = DlssSettings {
            project_id: Some(Uuid::nil()),
            ..Default::default()
        };

        plugin.initialize(&nvidia_gpu(), &settings, &mut registry);
        assert_eq!(plugin.support, DlssSupport::Supported);
        assert_eq!(registry.effects().len(), 1);
        assert_eq!(registry.effects()[0].name(), "DLSS");

        let init = plugin.ngx().backend().last_init.clone().unwrap();
        assert_eq!(init.app_id, crate::settings::FALLBACK_APP_ID);
        assert_eq!(init.project_id, Some(Uuid::nil()));
        assert_eq!(init.engine_version, "1.9.6605");
        assert_eq!(init.app_data_path, PathBuf::from("/tmp/engine"));

        plugin.deinitialize(&mut registry);
        assert!(registry.effects().is_empty());
        assert!(plugin.post_fx().is_none());
        assert!(!plugin.ngx().is_initialized());
        assert_eq!(plugin.ngx().backend().shutdown_calls, 1);
    }

    #[test]
    fn unsupported_device_registers_nothing() {
        let mut registry = GlobalPostFx::default();
        let mut plugin = plugin(MockNgx::default().failing_init(NgxResult::FAIL_OUT_OF_DATE));

        plugin.initialize(&nvidia_gpu(), &DlssSettings::default(), &mut registry);
        assert_eq!(plugin.support, DlssSupport::NotSupportedDriverOutOfDate);
        assert!(registry.effects().is_empty());

        plugin.deinitialize(&mut registry);
        assert_eq!(plugin.ngx().backend().shutdown_calls, 0);
    }

    #[test]
    fn apply_recommended_settings_scales_render_task() {
        let mut registry = GlobalPostFx::default();
        let mut plugin = plugin(MockNgx::default());
        plugin.initialize(&nvidia_gpu(), &DlssSettings::default(), &mut registry);
        plugin.sharpness = 0.7;

        let mut task = RenderTask::new(UVec2::new(1920, 1080));
        plugin.apply_recommended_settings(&mut task, Some(DlssQuality::Performance));
        assert_eq!(task.rendering_percentage, 0.5);
        assert_eq!(plugin.sharpness, 0.0);

        plugin.quality = DlssQuality::UltraPerformance;
        let settings = plugin.query_recommended_settings(UVec2::new(3840, 2160), None);
        assert_eq!(settings.resolution_optimal, UVec2::new(1280, 720));
        plugin.deinitialize(&mut registry);
    }

    #[test]
    fn zero_output_size_leaves_task_untouched() {
        let mut registry = GlobalPostFx::default();
        let mut plugin = plugin(MockNgx::default());
        plugin.initialize(&nvidia_gpu(), &DlssSettings::default(), &mut registry);
        plugin.sharpness = 0.7;

        for output_size in [UVec2::ZERO, UVec2::new(1920, 0), UVec2::new(0, 1080)] {
            let mut task = RenderTask::new(output_size);
            task.rendering_percentage = 0.75;
            plugin.apply_recommended_settings(&mut task, Some(DlssQuality::Performance));
            assert_eq!(task.rendering_percentage, 0.75);
            assert_eq!(plugin.sharpness, 0.7);
        }
        plugin.deinitialize(&mut registry);
    }

    #[test]
    fn uninitialized_plugin_renders_at_full_resolution() {
        let mut plugin = plugin(MockNgx::default());
        let mut task = RenderTask::new(UVec2::new(1280, 720));
        task.rendering_percentage = 0.5;
        plugin.apply_recommended_settings(&mut task, None);
        assert_eq!(task.rendering_percentage, 1.0);
    }

    #[test]
    fn description_matches_editor_listing() {
        let description = PluginDescription::dlss();
        assert_eq!(description.name, "DLSS");
        assert_eq!(description.category, "Rendering");
        assert_eq!(description.version.to_string(), "2.4.0");
    }
}
