use super::helpers;
use nebula_core::ParticleInstance;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticlesUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) point_scale: [f32; 4],
}

pub(crate) struct ParticlesResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) capacity: usize,
}

pub(crate) fn create_particles_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    capacity: usize,
) -> ParticlesResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::render::PARTICLES_WGSL.into()),
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "particles_uniforms",
        std::mem::size_of::<ParticlesUniforms>() as u64,
    );
    let (bgl, bind_group) = helpers::uniform_bind_group(device, "particles_bg", &uniform_buffer);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 2,
            },
        ],
    };

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("particles_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[helpers::QUAD_LAYOUT, instance_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
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

    let instance_vb = helpers::create_vertex_buffer(
        device,
        "particles_instance_vb",
        (std::mem::size_of::<ParticleInstance>() * capacity.max(1)) as u64,
    );

    ParticlesResources {
        pipeline,
        uniform_buffer,
        bind_group,
        instance_vb,
        capacity,
    }
}

impl ParticlesResources {
    pub(crate) fn dispose(&self) {
        self.uniform_buffer.destroy();
        self.instance_vb.destroy();
    }
}
