//! SDF-based WebGPU render pipeline
//!
//! Rasterizes the discs and rings of a [`DrawList`] in a fullscreen fragment
//! shader. Text commands are left to the platform layer.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::*;
use crate::render::{Color, DrawCmd, DrawList};

/// Maximum number of discs and rings per frame (must match shader)
pub const MAX_DISCS: usize = 128;
/// Stroke width of outline rings, in logical pixels
const RING_WIDTH: f32 = 1.5;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    view_size: [f32; 2],  // offset 8
    background: [f32; 4], // offset 16
    disc_count: u32,      // offset 32
    _pad: [u32; 3],       // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct DiscData {
    center: [f32; 2],
    radius: f32,
    /// 0 = filled
    ring_width: f32,
    color: [f32; 4],
}

/// GPU-ready contents of one frame
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EncodedFrame {
    background: [f32; 4],
    discs: Vec<DiscData>,
}

/// Convert recorded draw calls into shader data.
///
/// `linear` selects linear-light colors for sRGB render targets. Discs beyond
/// [`MAX_DISCS`] are dropped.
pub(crate) fn encode_frame(frame: &DrawList, linear: bool) -> EncodedFrame {
    let convert = |c: Color| {
        if linear {
            c.to_linear_f32()
        } else {
            c.to_srgb_f32()
        }
    };

    let mut encoded = EncodedFrame {
        background: convert(BACKGROUND_COLOR),
        discs: Vec::with_capacity(frame.commands().len().min(MAX_DISCS)),
    };

    for cmd in frame.commands() {
        match cmd {
            DrawCmd::Fill(color) => {
                encoded.background = convert(*color);
                encoded.discs.clear();
            }
            DrawCmd::FilledCircle {
                center,
                radius,
                color,
            } => encoded.discs.push(DiscData {
                center: center.to_array(),
                radius: *radius,
                ring_width: 0.0,
                color: convert(*color),
            }),
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => encoded.discs.push(DiscData {
                center: center.to_array(),
                radius: *radius,
                ring_width: RING_WIDTH,
                color: convert(*color),
            }),
            DrawCmd::Text { .. } => {}
        }
    }

    if encoded.discs.len() > MAX_DISCS {
        log::warn!(
            "Frame has {} discs, drawing the first {}",
            encoded.discs.len(),
            MAX_DISCS
        );
        encoded.discs.truncate(MAX_DISCS);
    }
    encoded
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    // Uniform buffers
    globals_buffer: wgpu::Buffer,
    discs_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [config.width as f32, config.height as f32],
                view_size: [WIDTH, HEIGHT],
                background: BACKGROUND_COLOR.to_linear_f32(),
                disc_count: 0,
                _pad: [0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let discs_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("discs"),
            size: (std::mem::size_of::<DiscData>() * MAX_DISCS) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: discs_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            size: (config.width, config.height),
            config,
            pipeline,
            globals_buffer,
            discs_buffer,
            bind_group,
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        self.resize(self.size.0, self.size.1);
    }

    /// Upload a recorded frame and present it
    pub fn render(&mut self, frame: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let encoded = encode_frame(frame, self.config.format.is_srgb());

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            view_size: [WIDTH, HEIGHT],
            background: encoded.background,
            disc_count: encoded.discs.len() as u32,
            _pad: [0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        if !encoded.discs.is_empty() {
            self.queue.write_buffer(
                &self.discs_buffer,
                0,
                bytemuck::cast_slice(&encoded.discs),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Anchor, Canvas};
    use glam::Vec2;

    #[test]
    fn test_gpu_struct_sizes() {
        // WGSL uniform layout: 16-byte aligned structs
        assert_eq!(std::mem::size_of::<Globals>(), 48);
        assert_eq!(std::mem::size_of::<DiscData>(), 32);
    }

    #[test]
    fn test_encode_discs_and_rings() {
        let mut list = DrawList::new();
        list.fill(Color::new(0, 0, 0));
        list.filled_circle(Vec2::new(10.0, 20.0), 5.0, Color::new(255, 0, 0));
        list.circle(Vec2::new(10.0, 20.0), 5.0, Color::new(255, 255, 255));
        list.text("Score: 0", Anchor::TopLeft(Vec2::ZERO), 30.0, Color::new(1, 1, 1));

        let encoded = encode_frame(&list, false);

        assert_eq!(encoded.background, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded.discs.len(), 2);
        assert_eq!(encoded.discs[0].center, [10.0, 20.0]);
        assert_eq!(encoded.discs[0].ring_width, 0.0);
        assert_eq!(encoded.discs[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded.discs[1].ring_width, RING_WIDTH);
    }

    #[test]
    fn test_encode_linear_colors() {
        let mut list = DrawList::new();
        list.fill(BACKGROUND_COLOR);
        let encoded = encode_frame(&list, true);
        assert_eq!(encoded.background, BACKGROUND_COLOR.to_linear_f32());
    }

    #[test]
    fn test_encode_caps_disc_count() {
        let mut list = DrawList::new();
        for i in 0..(MAX_DISCS + 10) {
            list.filled_circle(Vec2::new(i as f32, 0.0), 1.0, Color::new(9, 9, 9));
        }
        let encoded = encode_frame(&list, false);
        assert_eq!(encoded.discs.len(), MAX_DISCS);
        assert_eq!(encoded.discs[0].center, [0.0, 0.0]);
    }

    #[test]
    fn test_largest_allowed_game_fits() {
        let settings = crate::Settings {
            min_circles: CIRCLE_LIMIT,
            max_circles: CIRCLE_LIMIT,
            ..Default::default()
        };
        let mut state = crate::sim::GameState::new(3, settings);
        let mut list = DrawList::new();
        crate::sim::draw(&mut state, &mut list);

        let encoded = encode_frame(&list, false);
        assert_eq!(encoded.discs.len(), 2 * CIRCLE_LIMIT);
        // Half the budget stays free for popping circles
        assert!(encoded.discs.len() <= MAX_DISCS / 2);
    }
}
