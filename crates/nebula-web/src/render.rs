//! WebGPU renderer for the background scene. One `GpuState` owns the
//! surface and a `*Resources` bundle per effect; simulation state arrives
//! each frame through [`SceneBuffers`], written by the effect callbacks.
//!
//! GPU buffers are released explicitly in [`GpuState::dispose`]; the host
//! GC reclaims neither them nor the surface on its own.

use glam::{Mat4, Vec3};
use nebula_core::{ParticleInstance, RibbonParams};
use web_sys as web;
use wgpu;

mod aurora;
mod flare;
mod grid;
mod helpers;
mod particles;
mod stars;

pub(crate) use flare::FlareInstance;
pub(crate) use stars::{SpriteInstance, TrailVertex};

pub(crate) static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub(crate) static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");
pub(crate) static AURORA_WGSL: &str = include_str!("../shaders/aurora.wgsl");
pub(crate) static GRID_WGSL: &str = include_str!("../shaders/grid.wgsl");
pub(crate) static FLARE_WGSL: &str = include_str!("../shaders/flare.wgsl");

const CAMERA_Z: f32 = 6.0;
const FOVY: f32 = std::f32::consts::FRAC_PI_4;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 200.0;

const AURORA_GROUP_POS: Vec3 = Vec3::new(0.0, 8.0, -20.0);
const AURORA_GROUP_TILT: f32 = 0.2;
const GRID_PLANE_Y: f32 = -10.0;

/// Everything the simulation side hands the renderer for one frame.
#[derive(Default)]
pub(crate) struct SceneBuffers {
    pub(crate) particles: Vec<ParticleInstance>,
    pub(crate) rotation: (f32, f32),
    pub(crate) trail_vertices: Vec<TrailVertex>,
    /// Per-star (first vertex, count) ranges into `trail_vertices`.
    pub(crate) trail_ranges: Vec<(u32, u32)>,
    pub(crate) heads: Vec<SpriteInstance>,
    pub(crate) flares: Vec<FlareInstance>,
    pub(crate) time: f32,
}

/// Static geometry/size decisions derived from the device budget at mount.
pub(crate) struct SceneConfig {
    pub(crate) particle_capacity: usize,
    pub(crate) particle_size: f32,
    pub(crate) particle_color: [f32; 3],
    pub(crate) aurora_segments: u32,
    pub(crate) ribbons: Vec<RibbonParams>,
    pub(crate) max_stars: usize,
    pub(crate) trail_len: usize,
    pub(crate) grid_extent: f32,
    pub(crate) grid_cell: f32,
    pub(crate) flare_capacity: usize,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad_vb: wgpu::Buffer,
    particles: particles::ParticlesResources,
    stars: stars::StarsResources,
    aurora: aurora::AuroraResources,
    grid: grid::GridResources,
    flare: flare::FlareResources,
    scene: SceneConfig,
    width: u32,
    height: u32,
    disposed: bool,
}

impl<'a> GpuState<'a> {
    pub(crate) async fn new(
        canvas: &'a web::HtmlCanvasElement,
        scene: SceneConfig,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_vb = helpers::create_quad_vb(&device);
        let particles =
            particles::create_particles_resources(&device, format, scene.particle_capacity);
        let stars =
            stars::create_stars_resources(&device, format, scene.max_stars, scene.trail_len);
        let aurora = aurora::create_aurora_resources(
            &device,
            format,
            scene.aurora_segments,
            &scene.ribbons,
        );
        let grid = grid::create_grid_resources(&device, format);
        let flare = flare::create_flare_resources(&device, format, scene.flare_capacity);

        log::info!(
            "[render] gpu ready: {} particles, {} ribbons x {} segments, {} stars max",
            scene.particle_capacity,
            scene.ribbons.len(),
            scene.aurora_segments,
            scene.max_stars
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad_vb,
            particles,
            stars,
            aurora,
            grid,
            flare,
            scene,
            width,
            height,
            disposed: false,
        })
    }

    pub(crate) fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(FOVY, self.aspect(), Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    /// Clip-space half extents for a quad of the given world size, so
    /// sprite size attenuates with depth after the perspective divide.
    fn point_scale(&self, world_size: f32) -> [f32; 2] {
        let f = 1.0 / (FOVY / 2.0).tan();
        [world_size * f / self.aspect(), world_size * f]
    }

    /// Project a world position to NDC for the screen-space flares,
    /// clamped so off-screen lights still anchor a visible axis.
    pub(crate) fn project_to_ndc(&self, pos: Vec3) -> [f32; 2] {
        let clip = self.view_proj() * pos.extend(1.0);
        if clip.w.abs() < 1e-4 {
            return [0.0, 0.0];
        }
        [
            (clip.x / clip.w).clamp(-1.2, 1.2),
            (clip.y / clip.w).clamp(-1.2, 1.2),
        ]
    }

    pub(crate) fn render(&mut self, buffers: &SceneBuffers) -> Result<(), wgpu::SurfaceError> {
        if self.disposed {
            return Ok(());
        }
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let vp = self.view_proj();
        let (yaw, pitch) = buffers.rotation;
        let field_model = Mat4::from_rotation_x(pitch) * Mat4::from_rotation_y(yaw);
        let aurora_model =
            Mat4::from_translation(AURORA_GROUP_POS) * Mat4::from_rotation_x(AURORA_GROUP_TILT);

        let c = self.scene.particle_color;
        self.queue.write_buffer(
            &self.particles.uniform_buffer,
            0,
            bytemuck::bytes_of(&particles::ParticlesUniforms {
                view_proj: (vp * field_model).to_cols_array_2d(),
                color: [c[0], c[1], c[2], 0.6],
                point_scale: {
                    let s = self.point_scale(self.scene.particle_size);
                    [s[0], s[1], 0.0, 0.0]
                },
            }),
        );
        self.queue.write_buffer(
            &self.stars.uniform_buffer,
            0,
            bytemuck::bytes_of(&stars::StarsUniforms {
                view_proj: vp.to_cols_array_2d(),
                trail_color: [
                    nebula_core::COLOR_CYAN[0],
                    nebula_core::COLOR_CYAN[1],
                    nebula_core::COLOR_CYAN[2],
                    1.0,
                ],
                point_scale: {
                    let s = self.point_scale(1.0);
                    [s[0], s[1], 0.0, 0.0]
                },
            }),
        );
        self.queue.write_buffer(
            &self.aurora.uniform_buffer,
            0,
            bytemuck::bytes_of(&aurora::AuroraUniforms {
                view_proj_model: (vp * aurora_model).to_cols_array_2d(),
                time: [buffers.time, 0.0, 0.0, 0.0],
            }),
        );
        self.queue.write_buffer(
            &self.grid.uniform_buffer,
            0,
            bytemuck::bytes_of(&grid::GridUniforms {
                view_proj: vp.to_cols_array_2d(),
                color: [
                    nebula_core::COLOR_CYAN[0],
                    nebula_core::COLOR_CYAN[1],
                    nebula_core::COLOR_CYAN[2],
                    1.0,
                ],
                params: [
                    buffers.time,
                    self.scene.grid_extent / 2.0,
                    self.scene.grid_cell,
                    GRID_PLANE_Y,
                ],
            }),
        );
        self.queue.write_buffer(
            &self.flare.uniform_buffer,
            0,
            bytemuck::bytes_of(&flare::FlareUniforms {
                aspect: [self.aspect(), 0.0, 0.0, 0.0],
            }),
        );

        let particle_count = buffers.particles.len().min(self.particles.capacity);
        if particle_count > 0 {
            self.queue.write_buffer(
                &self.particles.instance_vb,
                0,
                bytemuck::cast_slice(&buffers.particles[..particle_count]),
            );
        }
        let trail_count = buffers.trail_vertices.len().min(self.stars.trail_capacity);
        if trail_count > 0 {
            self.queue.write_buffer(
                &self.stars.trail_vb,
                0,
                bytemuck::cast_slice(&buffers.trail_vertices[..trail_count]),
            );
        }
        let head_count = buffers.heads.len().min(self.stars.head_capacity);
        if head_count > 0 {
            self.queue.write_buffer(
                &self.stars.head_vb,
                0,
                bytemuck::cast_slice(&buffers.heads[..head_count]),
            );
        }
        let flare_count = buffers.flares.len().min(self.flare.capacity);
        if flare_count > 0 {
            self.queue.write_buffer(
                &self.flare.instance_vb,
                0,
                bytemuck::cast_slice(&buffers.flares[..flare_count]),
            );
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Back to front: grid, aurora, particles, stars, flares.
            rpass.set_pipeline(&self.grid.pipeline);
            rpass.set_bind_group(0, &self.grid.bind_group, &[]);
            rpass.draw(0..6, 0..1);

            rpass.set_pipeline(&self.aurora.pipeline);
            rpass.set_bind_group(0, &self.aurora.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.aurora.strip_vb.slice(..));
            rpass.set_vertex_buffer(1, self.aurora.instance_vb.slice(..));
            rpass.draw(0..self.aurora.vertex_count, 0..self.aurora.ribbon_count);

            if particle_count > 0 {
                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.particles.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.particles.instance_vb.slice(..));
                rpass.draw(0..6, 0..particle_count as u32);
            }

            if trail_count > 0 {
                rpass.set_pipeline(&self.stars.trail_pipeline);
                rpass.set_bind_group(0, &self.stars.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.stars.trail_vb.slice(..));
                for (start, count) in &buffers.trail_ranges {
                    let end = (start + count).min(trail_count as u32);
                    if *start < end {
                        rpass.draw(*start..end, 0..1);
                    }
                }
            }
            if head_count > 0 {
                rpass.set_pipeline(&self.stars.head_pipeline);
                rpass.set_bind_group(0, &self.stars.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.stars.head_vb.slice(..));
                rpass.draw(0..6, 0..head_count as u32);
            }

            if flare_count > 0 {
                rpass.set_pipeline(&self.flare.pipeline);
                rpass.set_bind_group(0, &self.flare.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.flare.instance_vb.slice(..));
                rpass.draw(0..6, 0..flare_count as u32);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release GPU buffers. Rendering becomes a no-op afterwards; called
    /// from the scene teardown path and from `Drop`.
    pub(crate) fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.quad_vb.destroy();
        self.particles.dispose();
        self.stars.dispose();
        self.aurora.dispose();
        self.grid.dispose();
        self.flare.dispose();
        log::info!("[render] gpu resources released");
    }
}

impl<'a> Drop for GpuState<'a> {
    fn drop(&mut self) {
        self.dispose();
    }
}
