use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FlareUniforms {
    pub(crate) aspect: [f32; 4],
}

/// Screen-space flare disc instance.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FlareInstance {
    pub(crate) ndc: [f32; 2],
    pub(crate) scale: f32,
    pub(crate) _pad: f32,
    pub(crate) color: [f32; 4],
}

pub(crate) struct FlareResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) capacity: usize,
}

pub(crate) fn create_flare_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    capacity: usize,
) -> FlareResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flare_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::render::FLARE_WGSL.into()),
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "flare_uniforms",
        std::mem::size_of::<FlareUniforms>() as u64,
    );
    let (bgl, bind_group) = helpers::uniform_bind_group(device, "flare_bg", &uniform_buffer);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flare_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<FlareInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 8,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
        ],
    };

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flare_pipeline"),
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
        "flare_instance_vb",
        (std::mem::size_of::<FlareInstance>() * capacity.max(1)) as u64,
    );

    FlareResources {
        pipeline,
        uniform_buffer,
        bind_group,
        instance_vb,
        capacity,
    }
}

impl FlareResources {
    pub(crate) fn dispose(&self) {
        self.uniform_buffer.destroy();
        self.instance_vb.destroy();
    }
}
