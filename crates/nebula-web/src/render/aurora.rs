use super::helpers;
use nebula_core::RibbonParams;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct AuroraUniforms {
    pub(crate) view_proj_model: [[f32; 4]; 4],
    pub(crate) time: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StripVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RibbonInstance {
    params: [f32; 4],  // height, depth, speed, amplitude
    color_a: [f32; 4], // rgb + opacity
    color_b: [f32; 4],
}

const RIBBON_LENGTH: f32 = 60.0;
const RIBBON_HEIGHT: f32 = 4.0;

pub(crate) struct AuroraResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) strip_vb: wgpu::Buffer,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) vertex_count: u32,
    pub(crate) ribbon_count: u32,
}

pub(crate) fn create_aurora_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    segments: u32,
    ribbons: &[RibbonParams],
) -> AuroraResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("aurora_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::render::AURORA_WGSL.into()),
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "aurora_uniforms",
        std::mem::size_of::<AuroraUniforms>() as u64,
    );
    let (bgl, bind_group) = helpers::uniform_bind_group(device, "aurora_bg", &uniform_buffer);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("aurora_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    // Tessellate one ribbon as a triangle strip; every ribbon instances it.
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for s in 0..=segments {
        let u = s as f32 / segments as f32;
        let x = (u - 0.5) * RIBBON_LENGTH;
        vertices.push(StripVertex {
            pos: [x, -RIBBON_HEIGHT / 2.0],
            uv: [u, 0.0],
        });
        vertices.push(StripVertex {
            pos: [x, RIBBON_HEIGHT / 2.0],
            uv: [u, 1.0],
        });
    }
    let strip_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("aurora_strip_vb"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let instances: Vec<RibbonInstance> = ribbons
        .iter()
        .map(|r| RibbonInstance {
            params: [r.height, r.depth, r.speed, r.amplitude],
            color_a: [r.color_a[0], r.color_a[1], r.color_a[2], r.opacity],
            color_b: [r.color_b[0], r.color_b[1], r.color_b[2], 0.0],
        })
        .collect();
    let instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("aurora_instance_vb"),
        contents: bytemuck::cast_slice(&instances),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let strip_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<StripVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 8,
                shader_location: 1,
            },
        ],
    };
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<RibbonInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 4,
            },
        ],
    };

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("aurora_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[strip_layout, instance_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            // Ribbons are visible from both sides.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(helpers::ADDITIVE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    AuroraResources {
        pipeline,
        uniform_buffer,
        bind_group,
        strip_vb,
        instance_vb,
        vertex_count: (segments + 1) * 2,
        ribbon_count: ribbons.len() as u32,
    }
}

impl AuroraResources {
    pub(crate) fn dispose(&self) {
        self.uniform_buffer.destroy();
        self.strip_vb.destroy();
        self.instance_vb.destroy();
    }
}
