//! Pixel formats for graph-managed render targets

/// Render target format declared by a pass output
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Format {
    /// 4×8-bit normalized RGBA
    Rgba8,
    /// 4×16-bit float RGBA (HDR intermediates)
    Rgba16Float,
    /// Single 32-bit float channel
    R32Float,
    /// 32-bit float depth
    Depth32Float,
}

impl Format {
    /// Matching wgpu texture format
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            Format::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
            Format::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
            Format::R32Float => wgpu::TextureFormat::R32Float,
            Format::Depth32Float => wgpu::TextureFormat::Depth32Float,
        }
    }

    pub fn is_depth(self) -> bool {
        matches!(self, Format::Depth32Float)
    }

    /// Bytes per texel
    pub fn block_size(self) -> u32 {
        match self {
            Format::Rgba8 | Format::R32Float | Format::Depth32Float => 4,
            Format::Rgba16Float => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_maps_to_unorm() {
        assert_eq!(Format::Rgba8.to_wgpu(), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(Format::Rgba8.block_size(), 4);
        assert!(!Format::Rgba8.is_depth());
        assert!(Format::Depth32Float.is_depth());
    }
}
