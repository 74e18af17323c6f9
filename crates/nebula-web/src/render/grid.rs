use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GridUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4], // time, half extent, cell size, plane y
}

pub(crate) struct GridResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_grid_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
) -> GridResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("grid_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::render::GRID_WGSL.into()),
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "grid_uniforms",
        std::mem::size_of::<GridUniforms>() as u64,
    );
    let (bgl, bind_group) = helpers::uniform_bind_group(device, "grid_bg", &uniform_buffer);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("grid_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    // The plane is generated from the vertex index; no vertex buffer.
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("grid_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
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

    GridResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}

impl GridResources {
    pub(crate) fn dispose(&self) {
        self.uniform_buffer.destroy();
    }
}
