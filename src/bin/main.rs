use eframe::egui_wgpu::wgpu;
use eframe::wgpu::include_wgsl;
use eframe::{egui, wgpu::util::DeviceExt};
use encase::{ArrayLength, ShaderType, StorageBuffer};
use particle_life::{
    FieldConfig, FieldState, FilledRect, FrameClock, FramePacer, InputEvent, ParticleField,
    PointerButton, RectBatch,
};
use std::sync::Arc;

const TITLE: &str = "Particle Life";

#[derive(ShaderType)]
struct GpuRects<'a> {
    pub viewport: cgmath::Vector2<f32>,
    pub length: ArrayLength,
    #[size(runtime)]
    pub rects: &'a [FilledRect],
}

// Draws every rectangle of a frame as one instanced triangle strip.
struct Renderer {
    rects_storage_buffer: wgpu::Buffer,
    rects_storage_buffer_size: usize,
    rects_bind_group_layout: wgpu::BindGroupLayout,
    rects_bind_group: wgpu::BindGroup,
    rects_render_pipeline: wgpu::RenderPipeline,
}

impl Renderer {
    fn new(render_state: &eframe::egui_wgpu::RenderState) -> Self {
        let device = &render_state.device;
        let rects_shader = device.create_shader_module(include_wgsl!("./rects.wgsl"));

        let rects_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Rects Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: Some(<GpuRects as ShaderType>::min_size()),
                    },
                    count: None,
                }],
            });

        const RECTS_STORAGE_BUFFER_SIZE: usize =
            <GpuRects as ShaderType>::METADATA.min_size().get() as _;

        let rects_storage_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rects Storage Buffer"),
            contents: &[0; RECTS_STORAGE_BUFFER_SIZE],
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
        });

        let rects_bind_group = Self::create_bind_group(
            device,
            &rects_bind_group_layout,
            &rects_storage_buffer,
        );

        let rects_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rects Pipeline Layout"),
            bind_group_layouts: &[&rects_bind_group_layout],
            push_constant_ranges: &[],
        });

        let rects_render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rects Render Pipeline"),
            layout: Some(&rects_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &rects_shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &rects_shader,
                entry_point: "fs_main",
                targets: &[Some(render_state.target_format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                polygon_mode: wgpu::PolygonMode::Fill,
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            rects_storage_buffer,
            rects_storage_buffer_size: RECTS_STORAGE_BUFFER_SIZE,
            rects_bind_group_layout,
            rects_bind_group,
            rects_render_pipeline,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Rects Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn prepare(
        &mut self,
        rects: &[u8],
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Vec<wgpu::CommandBuffer> {
        if self.rects_storage_buffer_size >= rects.len() {
            queue.write_buffer(&self.rects_storage_buffer, 0, rects);
        } else {
            // Grown buffers need a fresh bind group.
            self.rects_storage_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Rects Storage Buffer"),
                    contents: rects,
                    usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
                });
            self.rects_storage_buffer_size = rects.len();
            self.rects_bind_group = Self::create_bind_group(
                device,
                &self.rects_bind_group_layout,
                &self.rects_storage_buffer,
            );
        }

        vec![]
    }

    fn paint<'a>(&'a self, rect_count: u32, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.rects_render_pipeline);
        render_pass.set_bind_group(0, &self.rects_bind_group, &[]);
        render_pass.draw(0..4, 0..rect_count);
    }
}

struct ParticleLifeApp {
    field: ParticleField,
    surface: RectBatch,
    clock: FrameClock,
    gpu: bool,
}

impl ParticleLifeApp {
    fn new(cc: &eframe::CreationContext, field: ParticleField) -> Self {
        let gpu = match cc.wgpu_render_state.as_ref() {
            Some(render_state) => {
                let renderer = Renderer::new(render_state);
                render_state
                    .renderer
                    .write()
                    .paint_callback_resources
                    .insert(renderer);
                log::info!("Drawing with the wgpu rectangle renderer");
                true
            }
            None => {
                log::warn!("No wgpu render state available, drawing with the egui painter");
                false
            }
        };

        let config = field.config();
        let surface = RectBatch::new(config.width as f32, config.height as f32);

        ParticleLifeApp {
            field,
            surface,
            clock: FrameClock::new(),
            gpu,
        }
    }

    fn paint_gpu(&self, ui: &egui::Ui, rect: egui::Rect) {
        let mut rects_storage = StorageBuffer::new(vec![]);
        if let Err(err) = rects_storage.write(&GpuRects {
            viewport: self.surface.size(),
            length: ArrayLength,
            rects: self.surface.frame(),
        }) {
            log::error!("Failed to encode rectangles, skipping frame: {:?}", err);
            return;
        }
        let rects = rects_storage.into_inner();
        let rect_count = self.surface.frame().len() as u32;

        ui.painter().add(egui::PaintCallback {
            rect,
            callback: Arc::new(
                eframe::egui_wgpu::CallbackFn::new()
                    .prepare(move |device, queue, _encoder, paint_callback_resources| {
                        let Some(renderer) = paint_callback_resources.get_mut::<Renderer>() else {
                            return vec![];
                        };
                        renderer.prepare(&rects, device, queue)
                    })
                    .paint(move |_info, render_pass, paint_callback_resources| {
                        if let Some(renderer) = paint_callback_resources.get::<Renderer>() {
                            renderer.paint(rect_count, render_pass);
                        }
                    }),
            ),
        });
    }

    fn paint_fallback(&self, ui: &egui::Ui, rect: egui::Rect) {
        let painter = ui.painter_at(rect);
        for filled in self.surface.frame() {
            let min = rect.min + egui::vec2(filled.position.x, filled.position.y);
            let color = egui::Rgba::from_rgba_unmultiplied(
                filled.color.x,
                filled.color.y,
                filled.color.z,
                filled.color.w,
            );
            painter.rect_filled(
                egui::Rect::from_min_size(min, egui::vec2(filled.size.x, filled.size.y)),
                0.0,
                color,
            );
        }
    }
}

/// Maps a pointer press to field coordinates; releases and extra buttons are dropped.
fn pointer_event(event: &egui::Event, origin: egui::Pos2) -> Option<InputEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed: true,
            ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => PointerButton::Primary,
                egui::PointerButton::Secondary => PointerButton::Secondary,
                egui::PointerButton::Middle => PointerButton::Middle,
                _ => return None,
            };
            Some(InputEvent::PointerDown {
                button,
                x: pos.x - origin.x,
                y: pos.y - origin.y,
            })
        }
        _ => None,
    }
}

impl eframe::App for ParticleLifeApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if self.field.state() == FieldState::Stopped {
            frame.close();
            return;
        }

        let size = self.surface.size();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(egui::vec2(size.x, size.y), egui::Sense::click());

                let events: Vec<InputEvent> = ctx.input(|i| {
                    i.events
                        .iter()
                        .filter_map(|event| pointer_event(event, rect.min))
                        .collect()
                });

                if self.field.frame(events, &mut self.surface) == FieldState::Running {
                    if self.gpu {
                        self.paint_gpu(ui, rect);
                    } else {
                        self.paint_fallback(ui, rect);
                    }
                }
            });

        self.clock.tick(self.field.config().target_fps);
        ctx.request_repaint();
    }

    fn on_close_event(&mut self) -> bool {
        self.field.handle_input(InputEvent::Quit);
        true
    }
}

fn main() -> Result<(), particle_life::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FieldConfig::default();
    let window_size = egui::vec2(config.width as f32, config.height as f32);
    let field = ParticleField::new(config)?;

    eframe::run_native(
        TITLE,
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            wgpu_options: eframe::egui_wgpu::WgpuConfiguration {
                present_mode: wgpu::PresentMode::AutoNoVsync,
                ..Default::default()
            },
            vsync: false,
            initial_window_size: Some(window_size),
            resizable: false,
            ..Default::default()
        },
        Box::new(move |cc| Box::new(ParticleLifeApp::new(cc, field))),
    )?;

    Ok(())
}
