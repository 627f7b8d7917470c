//! GPU renderer for the canvas display list

use common::{create_uniform_buffer, CameraUniform, CanvasCamera, GraphicsContext, Vertex};
use gravity::canvas::{Color, DisplayList};

pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_vertices: usize,
    linear: bool,
    overflowing: bool,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, max_vertices: usize) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/canvas.wgsl").into()),
        });

        let camera = CanvasCamera::new(ctx.size.width, ctx.size.height);
        let camera_buffer =
            create_uniform_buffer(device, &CameraUniform::from_canvas_camera(&camera));

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_canvas",
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_canvas",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Vertex Buffer"),
            size: (std::mem::size_of::<Vertex>() * max_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            camera_buffer,
            camera_bind_group,
            max_vertices,
            linear: ctx.is_srgb(),
            overflowing: false,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CanvasCamera) {
        let uniform = CameraUniform::from_canvas_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload the display list; returns the number of vertices to draw.
    pub fn update_canvas(&mut self, queue: &wgpu::Queue, canvas: &DisplayList) -> u32 {
        let mut vertices = canvas.tessellate(self.linear);

        let dropped = fit_to_capacity(&mut vertices, self.max_vertices);
        if dropped > 0 && !self.overflowing {
            log::warn!("canvas exceeds {} vertices, dropping the oldest geometry", self.max_vertices);
        }
        self.overflowing = dropped > 0;

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        vertices.len() as u32
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        num_vertices: u32,
        background: Color,
    ) {
        let [r, g, b, a] = background.to_rgba(self.linear);
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if num_vertices == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..num_vertices, 0..1);
    }
}

/// Trim whole triangles from the front (the oldest items) until the list
/// fits in `max_vertices`. Returns how many vertices were dropped.
fn fit_to_capacity(vertices: &mut Vec<Vertex>, max_vertices: usize) -> usize {
    let capacity = max_vertices - max_vertices % 3;
    if vertices.len() <= capacity {
        return 0;
    }
    let excess = vertices.len() - capacity;
    let dropped = excess.div_ceil(3) * 3;
    vertices.drain(..dropped);
    dropped
}
