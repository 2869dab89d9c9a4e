//! Rendering backend classification
//!
//! Present-mode and fullscreen behavior differ per graphics API; this maps
//! the adapter wgpu picked onto what the presenter may promise.

/// Rendering backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 12 (Windows)
    DirectX12,
    /// Vulkan (cross-platform)
    Vulkan,
    /// OpenGL (cross-platform, fallback)
    OpenGL,
    /// WebGPU (web)
    WebGpu,
    /// No real backend
    Empty,
}

impl BackendType {
    pub fn from_wgpu(backend: wgpu::Backend) -> Self {
        match backend {
            wgpu::Backend::Metal => BackendType::Metal,
            wgpu::Backend::Dx12 => BackendType::DirectX12,
            wgpu::Backend::Vulkan => BackendType::Vulkan,
            wgpu::Backend::Gl => BackendType::OpenGL,
            wgpu::Backend::BrowserWebGpu => BackendType::WebGpu,
            _ => BackendType::Empty,
        }
    }

    /// Whether `desired_maximum_frame_latency` reaches the swapchain.
    pub fn controls_frame_queue(self) -> bool {
        matches!(self, BackendType::DirectX12 | BackendType::Vulkan | BackendType::Metal)
    }

    /// Exclusive fullscreen only bypasses the compositor on these.
    pub fn supports_exclusive_fullscreen(self) -> bool {
        matches!(self, BackendType::DirectX12 | BackendType::Vulkan)
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendType::Metal => "Metal",
            BackendType::DirectX12 => "DirectX 12",
            BackendType::Vulkan => "Vulkan",
            BackendType::OpenGL => "OpenGL",
            BackendType::WebGpu => "WebGPU",
            BackendType::Empty => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_cannot_limit_queue() {
        let gl = BackendType::from_wgpu(wgpu::Backend::Gl);
        assert_eq!(gl, BackendType::OpenGL);
        assert!(!gl.controls_frame_queue());
        assert!(!gl.supports_exclusive_fullscreen());
    }

    #[test]
    fn explicit_apis_support_exclusive() {
        assert!(BackendType::from_wgpu(wgpu::Backend::Dx12).supports_exclusive_fullscreen());
        assert!(BackendType::from_wgpu(wgpu::Backend::Vulkan).supports_exclusive_fullscreen());
        assert!(!BackendType::from_wgpu(wgpu::Backend::Metal).supports_exclusive_fullscreen());
    }
}
