//! Blend modes offered by shape materials.

/// How a shape's color is combined with what is already in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No partial transparency, but writes depth and sorts correctly.
    Opaque,

    /// Standard alpha blending.
    ///
    /// Formula: `src.rgb * src.a + dst.rgb * (1 - src.a)`
    #[default]
    Transparent,

    /// Colors are added together. Good for glows against dark backgrounds.
    ///
    /// Formula: `src.rgb * src.a + dst.rgb`
    Additive,

    /// Colors are multiplied. Good for tinting against bright backgrounds.
    ///
    /// Formula: `src.rgb * dst.rgb`
    Multiplicative,
}

impl BlendMode {
    /// All blend modes, in material-table order.
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Opaque,
        BlendMode::Transparent,
        BlendMode::Additive,
        BlendMode::Multiplicative,
    ];

    /// Convert to wgpu BlendState. `None` means blending is disabled.
    pub fn to_blend_state(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Transparent => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendMode::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            BlendMode::Multiplicative => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Dst,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::DstAlpha,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }

    /// Only opaque shapes write to the depth buffer.
    pub fn writes_depth(self) -> bool {
        matches!(self, BlendMode::Opaque)
    }

    /// Create a color target state with this blend mode.
    pub fn to_color_target_state(self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: self.to_blend_state(),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }
}

impl From<BlendMode> for Option<wgpu::BlendState> {
    fn from(mode: BlendMode) -> Self {
        mode.to_blend_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_disables_blending() {
        assert!(BlendMode::Opaque.to_blend_state().is_none());
        assert!(BlendMode::Opaque.writes_depth());
        assert!(!BlendMode::Transparent.writes_depth());
    }

    #[test]
    fn test_transparent_is_alpha_blending() {
        assert_eq!(
            BlendMode::Transparent.to_blend_state(),
            Some(wgpu::BlendState::ALPHA_BLENDING)
        );
    }

    #[test]
    fn test_color_target_state() {
        for mode in BlendMode::ALL {
            let target = mode.to_color_target_state(wgpu::TextureFormat::Bgra8UnormSrgb);
            assert_eq!(target.blend, mode.to_blend_state());
            assert_eq!(target.write_mask, wgpu::ColorWrites::ALL);
        }
    }
}
