use super::helpers;

pub(crate) const FIELD_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// The two simulation buffers. Which one is read and which is written on a
/// given frame is decided by `PingPong`, never here.
///
/// Texels hold (pressure, velocity, gradient x, gradient y).
pub(crate) struct FieldTargets {
    pub(crate) textures: [wgpu::Texture; 2],
    pub(crate) views: [wgpu::TextureView; 2],
}

fn create_pair(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> ([wgpu::Texture; 2], [wgpu::TextureView; 2]) {
    let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
    let (a, a_view) = helpers::create_color_texture(device, "field_a", width, height, FIELD_FORMAT, usage);
    let (b, b_view) = helpers::create_color_texture(device, "field_b", width, height, FIELD_FORMAT, usage);
    ([a, b], [a_view, b_view])
}

impl FieldTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (textures, views) = create_pair(device, width, height);
        Self { textures, views }
    }

    #[inline]
    pub(crate) fn extent(&self) -> (u32, u32) {
        (self.textures[0].width(), self.textures[0].height())
    }

    /// New buffers start at rest; the previous field is discarded. Returns
    /// false when the extent is unchanged and the field was kept.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        if self.extent() == (width, height) {
            return false;
        }
        (self.textures, self.views) = create_pair(device, width, height);
        true
    }
}
