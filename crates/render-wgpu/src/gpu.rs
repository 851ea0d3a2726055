use crate::shaders;
use bytemuck::{Pod, Zeroable};
use facehover_kernel::Stage;
use facehover_render::{FrameDescription, TrailVertex as FrameTrailVertex};
use facehover_scene::{BoxGeometry, FACE_COUNT};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    face_colors: [[f32; 4]; FACE_COUNT],
    wire_color: [f32; 4],
    light_dir: [f32; 4],
    params: [f32; 4],
}

impl Uniforms {
    fn flat(view_proj: Mat4, model: Mat4, color: [f32; 4]) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            face_colors: [color; FACE_COUNT],
            wire_color: color,
            light_dir: [0.0, 1.0, 0.0, 0.0],
            params: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    face: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct TrailVertex {
    ndc: [f32; 2],
    color: [f32; 4],
}

impl From<&FrameTrailVertex> for TrailVertex {
    fn from(v: &FrameTrailVertex) -> Self {
        Self {
            ndc: v.ndc.to_array(),
            color: v.color,
        }
    }
}

/// Cube vertices tagged with their material slot.
fn cube_mesh(geometry: &BoxGeometry) -> Vec<Vertex> {
    let materials = geometry.vertex_materials();
    geometry
        .positions()
        .iter()
        .zip(geometry.normals())
        .zip(materials)
        .map(|((p, n), face)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
            face,
        })
        .collect()
}

/// Unit quad in the XZ plane, facing up.
fn ground_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let up = [0.0, 1.0, 0.0];
    let vertices = [[-p, 0.0, -p], [p, 0.0, -p], [p, 0.0, p], [-p, 0.0, p]]
        .into_iter()
        .map(|position| Vertex {
            position,
            normal: up,
            face: 0,
        })
        .collect();
    (vertices, vec![0, 1, 2, 2, 3, 0])
}

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&Uniforms::flat(Mat4::IDENTITY, Mat4::IDENTITY, [1.0; 4])),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

/// wgpu renderer for the stage.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    trail_pipeline: wgpu::RenderPipeline,
    cube_uniforms: UniformSlot,
    shadow_uniforms: UniformSlot,
    ground_uniforms: UniformSlot,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    wire_index_buffer: wgpu::Buffer,
    wire_index_count: u32,
    ground_vertex_buffer: wgpu::Buffer,
    ground_index_buffer: wgpu::Buffer,
    ground_index_count: u32,
    trail_buffer: wgpu::Buffer,
    trail_capacity: usize,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        stage: &Stage,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Uint32,
            ],
        };

        // Winding is not culled: the shadow projection may mirror triangles.
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[mesh_layout.clone()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_state(true, wgpu::CompareFunction::Less)),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let wire_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wire_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[mesh_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_wire"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state(false, wgpu::CompareFunction::LessEqual)),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let trail_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trail_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TRAIL_SHADER.into()),
        });

        let trail_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trail_pipeline_layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let trail_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trail_pipeline"),
            layout: Some(&trail_layout),
            vertex: wgpu::VertexState {
                module: &trail_shader,
                entry_point: Some("vs_trail"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TrailVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &trail_shader,
                entry_point: Some("fs_trail"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: Some(depth_state(false, wgpu::CompareFunction::Always)),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Cube mesh
        let geometry = stage.geometry();
        let cube_verts = cube_mesh(geometry);
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cube_index_count = geometry.indices().len() as u32;

        let wire_indices: Vec<u16> = geometry.wireframe_edges().into_iter().flatten().collect();
        let wire_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_index_buffer"),
            contents: bytemuck::cast_slice(&wire_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let wire_index_count = wire_indices.len() as u32;

        // Ground mesh
        let (ground_verts, ground_indices) = ground_mesh();
        let ground_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_vertex_buffer"),
            contents: bytemuck::cast_slice(&ground_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ground_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_index_buffer"),
            contents: bytemuck::cast_slice(&ground_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let ground_index_count = ground_indices.len() as u32;

        // Trail buffer (pre-allocated)
        let trail_capacity = stage.trail().map_or(1, |trail| trail.capacity().max(1));
        let trail_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trail_buffer"),
            size: (trail_capacity * std::mem::size_of::<TrailVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            "wgpu renderer ready: format={surface_format:?}, {} wire edges",
            wire_index_count / 2
        );

        Self {
            mesh_pipeline,
            wire_pipeline,
            trail_pipeline,
            cube_uniforms: UniformSlot::new(device, &bind_group_layout, "cube_uniforms"),
            shadow_uniforms: UniformSlot::new(device, &bind_group_layout, "shadow_uniforms"),
            ground_uniforms: UniformSlot::new(device, &bind_group_layout, "ground_uniforms"),
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            wire_index_buffer,
            wire_index_count,
            ground_vertex_buffer,
            ground_index_buffer,
            ground_index_count,
            trail_buffer,
            trail_capacity,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: ground and shadow when lit, the cube, its wireframe, then the trail.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        stage: &Stage,
    ) {
        let frame = FrameDescription::from_stage(stage);

        let mut cube = Uniforms::flat(frame.view_proj, frame.model, frame.wire_color);
        cube.face_colors = frame.face_colors;
        if let Some(lit) = &frame.lighting {
            cube.light_dir = lit.light_dir.extend(0.0).to_array();
            cube.params = [lit.ambient, 1.0, 0.0, 0.0];

            let mut ground = Uniforms::flat(frame.view_proj, lit.ground, lit.ground_color);
            ground.light_dir = cube.light_dir;
            ground.params = cube.params;
            self.ground_uniforms.write(queue, &ground);
            self.shadow_uniforms
                .write(queue, &Uniforms::flat(frame.view_proj, lit.shadow, lit.shadow_color));
        }
        self.cube_uniforms.write(queue, &cube);

        let trail: Vec<TrailVertex> = frame
            .trail
            .iter()
            .rev()
            .take(self.trail_capacity)
            .rev()
            .map(TrailVertex::from)
            .collect();
        if trail.len() >= 2 {
            queue.write_buffer(&self.trail_buffer, 0, bytemuck::cast_slice(&trail));
        }

        let [r, g, b, a] = frame.background.map(f64::from);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.mesh_pipeline);

            if frame.lighting.is_some() {
                pass.set_bind_group(0, &self.ground_uniforms.bind_group, &[]);
                pass.set_vertex_buffer(0, self.ground_vertex_buffer.slice(..));
                pass.set_index_buffer(self.ground_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.ground_index_count, 0, 0..1);

                pass.set_bind_group(0, &self.shadow_uniforms.bind_group, &[]);
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.cube_index_count, 0, 0..1);
            }

            // Cube faces
            pass.set_bind_group(0, &self.cube_uniforms.bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..1);

            // Wireframe overlay
            pass.set_pipeline(&self.wire_pipeline);
            pass.set_index_buffer(self.wire_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.wire_index_count, 0, 0..1);

            if trail.len() >= 2 {
                pass.set_pipeline(&self.trail_pipeline);
                pass.set_vertex_buffer(0, self.trail_buffer.slice(..));
                pass.draw(0..trail.len() as u32, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 * 2 + 16 * (FACE_COUNT + 3));
    }

    #[test]
    fn cube_vertices_carry_face_slots() {
        let geometry = BoxGeometry::unit();
        let verts = cube_mesh(&geometry);
        assert_eq!(verts.len(), 24);
        for (i, v) in verts.iter().enumerate() {
            assert_eq!(v.face as usize, i / 4);
        }
    }

    #[test]
    fn ground_quad_faces_up() {
        let (verts, indices) = ground_mesh();
        assert_eq!(verts.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(verts.iter().all(|v| v.position[1] == 0.0 && v.normal == [0.0, 1.0, 0.0]));
    }
}
