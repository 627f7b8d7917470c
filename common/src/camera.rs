//! Pixel-space camera for canvas drawing

use glam::{Mat4, Vec2};

/// Orthographic camera that maps canvas pixels straight onto the surface.
///
/// The origin is the top-left corner and `y` grows downward, the same
/// convention as pointer coordinates. `surface` may be larger than the
/// canvas (the control strip sits underneath it); pixels keep a 1:1 scale.
#[derive(Debug, Clone)]
pub struct CanvasCamera {
    pub surface: Vec2,
}

impl CanvasCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: Vec2::new(width as f32, height as f32),
        }
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.surface.x, self.surface.y, 0.0, -1.0, 1.0)
    }

    pub fn update_surface(&mut self, width: u32, height: u32) {
        self.surface = Vec2::new(width as f32, height as f32);
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_canvas_camera(camera: &CanvasCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn corners_map_to_clip_space() {
        let camera = CanvasCamera::new(1000, 640);
        let vp = camera.view_projection();

        let top_left = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = vp * Vec4::new(1000.0, 640.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }
}
