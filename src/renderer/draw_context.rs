/// Bind groups shared across all mesh draw calls.
pub struct DrawBindGroups<'a> {
    /// Camera uniform bind group (view-projection, eye position).
    pub camera: &'a wgpu::BindGroup,
    /// Point light uniform bind group.
    pub lighting: &'a wgpu::BindGroup,
}
