//! Lagprobe Render System
//!
//! wgpu presentation for the probe: surface setup and present-mode control,
//! display-mode switching, and a flat-quad pipeline for the overlay and HUD.

pub mod backend;
pub mod batch;
pub mod presenter;
pub mod renderer;
pub mod text;
pub mod window;

pub use backend::BackendType;
pub use batch::QuadBatch;
pub use presenter::Presenter;
pub use wgpu;
pub use winit;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter can present to this window")]
    NoAdapter,

    #[error("failed to open graphics device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no usable formats")]
    NoSurfaceFormat,
}
