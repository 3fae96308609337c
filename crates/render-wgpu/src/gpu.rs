use crate::camera::OrbitCamera;
use crate::palette::MaterialPalette;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use voxglobe_common::Transform;
use voxglobe_render::PrimitiveList;
use wgpu::util::DeviceExt;

const INITIAL_INSTANCE_CAPACITY: u32 = 4096;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GlobeUniforms {
    view_proj: [[f32; 4]; 4],
    globe: [[f32; 4]; 4],
}

impl GlobeUniforms {
    fn new(view_proj: Mat4, globe: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            globe: globe.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Per-primitive record: local model matrix columns, then RGBA.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct CubeInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Unit cube centred on the origin, four vertices per face so each face keeps a flat normal.
/// Faces wind counter-clockwise seen from outside.
fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let normals = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for n in normals {
        let u = Vec3::new(n.y, n.z, n.x);
        let v = n.cross(u);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (n + u * su + v * sv) * 0.5;
            vertices.push(Vertex {
                position: corner.to_array(),
                normal: n.to_array(),
            });
        }
        indices.extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
    }
    (vertices, indices)
}

/// Instance records for every primitive, in local globe space.
fn build_instances(primitives: &PrimitiveList, palette: &MaterialPalette) -> Vec<CubeInstance> {
    primitives
        .primitives()
        .iter()
        .map(|p| CubeInstance {
            model: p.model(Mat4::IDENTITY).to_cols_array_2d(),
            color: palette.color(p.material),
        })
        .collect()
}

/// Growable GPU instance buffer tagged with the primitive-list generation it holds.
struct InstanceStore {
    buffer: wgpu::Buffer,
    capacity: u32,
    count: u32,
    generation: Option<u64>,
}

impl InstanceStore {
    fn new(device: &wgpu::Device, capacity: u32) -> Self {
        Self {
            buffer: Self::allocate(device, capacity),
            capacity,
            count: 0,
            generation: None,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globe_instances"),
            size: u64::from(capacity.max(1)) * std::mem::size_of::<CubeInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Re-upload only when the list was republished since the last sync.
    fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        primitives: &PrimitiveList,
        palette: &MaterialPalette,
    ) {
        if self.generation == Some(primitives.generation()) {
            return;
        }
        let instances = build_instances(primitives, palette);
        let needed = instances.len() as u32;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.capacity);
            tracing::debug!(capacity = self.capacity, "grew instance buffer");
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.count = needed;
        self.generation = Some(primitives.generation());
    }
}

fn globe_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("globe_shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::GLOBE_SHADER.into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("globe_pipeline_layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });

    let mesh_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<CubeInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
        ],
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("globe_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[mesh_layout, instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
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
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("globe_depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&Default::default())
}

/// wgpu-based globe renderer.
///
/// Every primitive is one instance of a shared unit cube. Instance data is
/// uploaded only when the primitive list is republished; per-frame work is a
/// single uniform write carrying the camera and the globe transform.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    cube_vertices: wgpu::Buffer,
    cube_indices: wgpu::Buffer,
    cube_index_count: u32,
    instances: InstanceStore,
    depth: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    pub clear_color: wgpu::Color,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniforms = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_uniforms"),
            contents: bytemuck::bytes_of(&GlobeUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globe_uniform_layout"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe_uniform_group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        let (vertices, indices) = unit_cube();
        let cube_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline: globe_pipeline(device, &layout, surface_format),
            uniforms,
            bind_group,
            cube_vertices,
            cube_indices,
            cube_index_count: indices.len() as u32,
            instances: InstanceStore::new(device, INITIAL_INSTANCE_CAPACITY),
            depth: depth_view(device, width, height),
            surface_format,
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.05,
                a: 1.0,
            },
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = depth_view(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Force the next frame to re-upload instances, e.g. after a palette edit.
    pub fn invalidate(&mut self) {
        self.instances.generation = None;
    }

    /// Render one frame of the globe.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        globe: &Transform,
        primitives: &PrimitiveList,
        palette: &MaterialPalette,
    ) {
        self.instances.sync(device, queue, primitives, palette);
        queue.write_buffer(
            &self.uniforms,
            0,
            bytemuck::bytes_of(&GlobeUniforms::new(camera.view_projection(), globe.matrix())),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("globe_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Empty shell: clear only.
            if self.instances.count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.cube_vertices.slice(..));
                pass.set_vertex_buffer(1, self.instances.buffer.slice(..));
                pass.set_index_buffer(self.cube_indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.cube_index_count, 0, 0..self.instances.count);
            }
        }
        queue.submit(std::iter::once(encoder.finish()));
    }
}
