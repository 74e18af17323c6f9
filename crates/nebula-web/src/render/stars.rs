use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct StarsUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) trail_color: [f32; 4],
    pub(crate) point_scale: [f32; 4],
}

/// One sample of a star's trail, alpha pre-faded toward the tail.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct TrailVertex {
    pub(crate) pos: [f32; 3],
    pub(crate) alpha: f32,
}

/// Head/glow sprite instance.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteInstance {
    pub(crate) pos: [f32; 3],
    pub(crate) scale: f32,
    pub(crate) color: [f32; 4],
}

pub(crate) struct StarsResources {
    pub(crate) trail_pipeline: wgpu::RenderPipeline,
    pub(crate) head_pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) trail_vb: wgpu::Buffer,
    pub(crate) head_vb: wgpu::Buffer,
    pub(crate) trail_capacity: usize,
    pub(crate) head_capacity: usize,
}

pub(crate) fn create_stars_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    max_stars: usize,
    trail_len: usize,
) -> StarsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("stars_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::render::STARS_WGSL.into()),
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "stars_uniforms",
        std::mem::size_of::<StarsUniforms>() as u64,
    );
    let (bgl, bind_group) = helpers::uniform_bind_group(device, "stars_bg", &uniform_buffer);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("stars_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let trail_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TrailVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 1,
            },
        ],
    };
    let trail_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("stars_trail_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_trail"),
            buffers: &[trail_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_trail"),
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

    let head_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SpriteInstance>() as u64,
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
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
        ],
    };
    let head_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("stars_head_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_head"),
            buffers: &[helpers::QUAD_LAYOUT, head_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_head"),
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

    // Two sprites per star: white core plus glow halo.
    let trail_capacity = max_stars * trail_len;
    let head_capacity = max_stars * 2;
    let trail_vb = helpers::create_vertex_buffer(
        device,
        "stars_trail_vb",
        (std::mem::size_of::<TrailVertex>() * trail_capacity.max(1)) as u64,
    );
    let head_vb = helpers::create_vertex_buffer(
        device,
        "stars_head_vb",
        (std::mem::size_of::<SpriteInstance>() * head_capacity.max(1)) as u64,
    );

    StarsResources {
        trail_pipeline,
        head_pipeline,
        uniform_buffer,
        bind_group,
        trail_vb,
        head_vb,
        trail_capacity,
        head_capacity,
    }
}

impl StarsResources {
    pub(crate) fn dispose(&self) {
        self.uniform_buffer.destroy();
        self.trail_vb.destroy();
        self.head_vb.destroy();
    }
}
