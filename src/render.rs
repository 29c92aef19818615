//! The slice of the host renderer DLSS talks to.

use crate::nvsdk_ngx::{NativeCommandList, NativeResource};
use glam::{UVec2, Vec2};

/// Where the upscaling pass runs relative to post-processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpscaleLocation {
    #[default]
    AfterPostProcessingPass,
    BeforePostProcessingPass,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AntialiasingMode {
    None,
    Fxaa,
    #[default]
    TemporalAntialiasing,
    Smaa,
}

/// Per-frame render list setup an effect may override in `pre_render`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSetup {
    pub upscale_location: UpscaleLocation,
    pub use_temporal_aa_jitter: bool,
    pub antialiasing: AntialiasingMode,
}

/// Render task state that outlives a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTask {
    pub output_size: UVec2,
    /// Render resolution scale, 1 renders at output resolution.
    pub rendering_percentage: f32,
    /// Set on camera cuts, resets temporal history.
    pub is_camera_cut: bool,
}

impl RenderTask {
    pub fn new(output_size: UVec2) -> Self {
        Self {
            output_size,
            rendering_percentage: 1.0,
            is_camera_cut: false,
        }
    }
}

/// Camera view data for the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderView {
    /// Temporal AA jitter in normalized device coordinates.
    pub temporal_aa_jitter: Vec2,
    pub screen_size: Vec2,
}

/// Texture usage states DLSS needs its inputs and outputs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    UnorderedAccess,
    ShaderResource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureDescription {
    pub size: UVec2,
    pub unordered_access: bool,
    pub back_buffer: bool,
}

pub trait GpuTexture {
    fn description(&self) -> TextureDescription;
    fn native(&self) -> NativeResource;

    fn size(&self) -> UVec2 {
        self.description().size
    }

    fn is_unordered_access(&self) -> bool {
        self.description().unordered_access
    }
}

/// GPU command context of the host renderer.
pub trait GpuContext {
    fn native_command_list(&self) -> NativeCommandList;

    /// Only meaningful on explicit APIs, ignored elsewhere.
    fn set_resource_state(&mut self, texture: &dyn GpuTexture, state: ResourceState);

    /// Syncs cached pipeline state with the backend before NGX records commands.
    fn flush_state(&mut self);

    /// Drops cached state after NGX changed it behind the renderer's back.
    fn clear_state(&mut self);

    /// Rebinds root signature and descriptor heaps after NGX modified them.
    fn force_rebind_descriptors(&mut self) {}

    fn copy_resource(&mut self, destination: &dyn GpuTexture, source: &dyn GpuTexture);

    /// Takes a temporary render target from the pool.
    fn acquire_render_target(&mut self, description: TextureDescription) -> Box<dyn GpuTexture>;

    fn release_render_target(&mut self, texture: Box<dyn GpuTexture>);
}

/// Everything the renderer hands to an effect for one frame.
pub struct RenderContext<'a> {
    pub task: &'a RenderTask,
    pub setup: RenderSetup,
    pub view: RenderView,
    pub depth_buffer: &'a dyn GpuTexture,
    pub motion_vectors: Option<&'a dyn GpuTexture>,
    pub frame_time_delta_ms: f32,
}
