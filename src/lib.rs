//! # dlss_plugin
//!
//! This crate integrates NVIDIA DLSS (Deep Learning Super Sampling) into a game engine's build, runtime and editor.
//!
//! ## Setup
//! Point `DLSS_MODULE_DIR` at the module folder sitting next to `ThirdParty/DLSS` before building.
//! The build script then links `nvsdk_ngx` for the current target and stages the DLSS runtime next to the binary.
//! Without it the crate builds, but only the [`mock`] backend can be used (with the `mock` feature).
//!
//! Only Windows and Linux on x64 are supported. Setting `VULKAN_SDK` additionally enables the Vulkan renderer,
//! binds the SDK headers with `bindgen` (libclang is required) and provides `VulkanNgx`.
//!
//! For further info on how to integrate DLSS into your application, read `$DLSS_SDK/doc/DLSS_Programming_Guide_Release.pdf`.
//!
//! ## API Usage
//! ```rust,ignore
//! use dlss_plugin::{DlssPlugin, DlssQuality, DlssSettings, VulkanNgx, post_fx::GlobalPostFx};
//!
//! // Create the plugin once per application, with the host's NGX backend
//! let backend = VulkanNgx::new()?;
//! let mut plugin = DlssPlugin::new(backend, engine_version, temporary_folder);
//! let settings = DlssSettings::from_json(&settings_asset)?;
//! plugin.initialize(&gpu_device_info, &settings, &mut global_post_fx);
//!
//! // Check `plugin.support`, the upscaling effect is only registered when supported
//! println!("DLSS support: {:?}", plugin.support);
//!
//! // Pick a render resolution for the main task
//! plugin.quality = DlssQuality::Quality;
//! plugin.apply_recommended_settings(&mut main_render_task, None);
//!
//! // Every frame, from the host renderer
//! let post_fx = plugin.post_fx().cloned().unwrap();
//! post_fx.pre_render(&mut render_context);
//! post_fx.render(&mut plugin, &mut gpu_context, &render_context, &input, &output)?;
//!
//! // On shutdown
//! plugin.deinitialize(&mut global_post_fx);
//! ```

pub mod build_config;
pub mod editor;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod ngx_wrapper;
mod nvsdk_ngx;
mod plugin;
pub mod post_fx;
pub mod render;
mod settings;
pub mod target;
mod types;
#[cfg(all(dlss_sdk, vulkan_loader))]
mod vulkan_ngx;

pub use ngx_wrapper::NgxWrapper;
pub use nvsdk_ngx::{
    DlssError, DlssFeatureFlags, GpuDeviceInfo, NativeCommandList, NativeDevice, NativeResource,
    NgxBackend, NgxCreateParams, NgxEvalParams, NgxFeatureHandle, NgxInitParams, NgxPerfQuality,
    NgxResult, RendererType, check_ngx_result,
};
pub use plugin::{DlssPlugin, PLUGIN_TYPE_NAME, PluginDescription, Version};
pub use settings::{DlssSettings, FALLBACK_APP_ID, SettingsError};
pub use types::{DlssQuality, DlssRecommendedSettings, DlssSupport};
#[cfg(all(dlss_sdk, vulkan_loader))]
pub use vulkan_ngx::VulkanNgx;
