//! 2D Gravity Toy
//!
//! Particles fall toward black holes you place on the canvas. Rendered
//! with wgpu, controls drawn with egui.
//!
//! Controls:
//! - Left click: Place a black hole (or grow the one under the pointer)
//! - Right click: Pick up / drop a black hole
//! - P: Add a particle on a random edge
//! - C: Clear
//! - A: Toggle debug arrows
//! - T: Toggle trace
//! - L: Toggle trails

mod controls;
mod renderer;

use std::time::Instant;

use anyhow::Result;
use common::{CanvasCamera, GraphicsContext};
use controls::{draw_controls, Action};
use glam::Vec2;
use gravity::config::{
    window_height, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH, MAX_CANVAS_VERTICES,
    MILLISECONDS_PER_FRAME,
};
use gravity::driver::TickClock;
use gravity::{DisplayList, Simulation};
use renderer::Renderer;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    camera: CanvasCamera,
    canvas: DisplayList,
    simulation: Simulation,
    clock: TickClock,
    cursor: Option<Vec2>,
    rng: rand::rngs::ThreadRng,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = Renderer::new(&ctx, MAX_CANVAS_VERTICES);
        let camera = CanvasCamera::new(ctx.size.width, ctx.size.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            camera,
            canvas: DisplayList::new(),
            simulation: Simulation::new(),
            clock: TickClock::new(Instant::now()),
            cursor: None,
            rng: rand::thread_rng(),
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    /// Grow or shrink the window so the control strip gets its height in
    /// points at the current scale factor.
    fn fit_window(&mut self) {
        let scale_factor = self.ctx.window.scale_factor();
        let wanted = PhysicalSize::new(CANVAS_WIDTH, window_height(scale_factor));
        if wanted == self.ctx.size {
            return;
        }
        log::debug!("scale factor {scale_factor}, resizing window to {wanted:?}");
        if let Some(size) = self.ctx.window.request_inner_size(wanted) {
            self.resize(size);
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_surface(self.ctx.size.width, self.ctx.size.height);
        self.renderer.update_camera(&self.ctx.queue, &self.camera);
    }

    fn tick(&mut self) {
        self.simulation.tick(&mut self.canvas);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::AddParticle => self.simulation.add_particle(&mut self.rng),
            Action::Clear => self.simulation.clear(&mut self.canvas),
            Action::ToggleArrows => self.simulation.toggle_arrows(&mut self.canvas),
            Action::ToggleTrace => self.simulation.toggle_trace(),
            Action::ToggleTrails => self.simulation.toggle_trails(),
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Build egui UI
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let mut actions = Vec::new();
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            draw_controls(ctx, &self.simulation.scene, &mut actions);
        });
        for action in actions {
            self.apply(action);
        }

        let num_vertices = self.renderer.update_canvas(&self.ctx.queue, &self.canvas);

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, num_vertices, BACKGROUND);

        let egui_commands = self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(
            egui_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        Ok(())
    }

    /// Pointer position in canvas pixels, if it is over the canvas.
    fn canvas_cursor(&self) -> Option<Vec2> {
        self.cursor.filter(|p| {
            p.x >= 0.0
                && p.y >= 0.0
                && p.x < CANVAS_WIDTH as f32
                && p.y < CANVAS_HEIGHT as f32
        })
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        let position = Vec2::new(position.x as f32, position.y as f32);
        self.cursor = Some(position);
        if let Some(point) = self.canvas_cursor() {
            self.simulation.drag(point);
        }
    }

    fn handle_click(&mut self, button: MouseButton) {
        let Some(point) = self.canvas_cursor() else {
            return;
        };
        match button {
            MouseButton::Left => self.simulation.click(point),
            MouseButton::Right => self.simulation.grab(point),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        let action = match key {
            KeyCode::KeyP => Action::AddParticle,
            KeyCode::KeyC => Action::Clear,
            KeyCode::KeyA => Action::ToggleArrows,
            KeyCode::KeyT => Action::ToggleTrace,
            KeyCode::KeyL => Action::ToggleTrails,
            _ => return,
        };
        self.apply(action);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.egui.state.on_window_event(&self.ctx.window, event);
        if response.repaint {
            self.ctx.window.request_redraw();
        }
        response.consumed
    }
}

fn main() -> Result<()> {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Gravity",
        CANVAS_WIDTH,
        window_height(1.0),
    ))?;
    log::info!(
        "canvas {CANVAS_WIDTH}x{CANVAS_HEIGHT}, tick every {MILLISECONDS_PER_FRAME}ms"
    );

    let mut app = App::new(ctx);
    app.fit_window();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { ref event, .. } => {
            let consumed = app.handle_window_event(event);

            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(*size),
                WindowEvent::ScaleFactorChanged { .. } => app.fit_window(),
                WindowEvent::CursorMoved { position, .. } => app.handle_cursor(*position),
                WindowEvent::CursorLeft { .. } => app.cursor = None,
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button,
                    ..
                } if !consumed => app.handle_click(*button),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state,
                            ..
                        },
                    ..
                } if !consumed => app.handle_key(*key, *state),
                WindowEvent::RedrawRequested => match app.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        elwt.exit();
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                },
                _ => {}
            }
        }
        Event::AboutToWait => {
            if app.clock.due(Instant::now()) {
                app.tick();
                app.clock.reschedule(Instant::now());
                app.ctx.window.request_redraw();
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(app.clock.deadline()));
        }
        _ => {}
    })?;

    Ok(())
}
