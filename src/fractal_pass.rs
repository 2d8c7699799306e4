//! Fullscreen fractal pass.
//!
//! [`FractalPass`] draws a single triangle covering the viewport with the
//! fractal shader, binding a [`FractalUniforms`] buffer at
//! `@group(0) @binding(0)`. The shader must define `vs` and `fs` entry points.
//!
//! Sources are validated with naga before a pipeline is built, so a broken
//! shader yields a [`ViewerError::Shader`] with the compiler diagnostic
//! instead of a wgpu panic. When the source is a file, [`check_reload`]
//! rebuilds the pipeline on change and keeps the previous one if the edit
//! does not compile.
//!
//! [`check_reload`]: FractalPass::check_reload

use crate::error::ViewerError;
use crate::gpu::GpuContext;
use crate::shader::ShaderSource;
use crate::uniforms::FractalUniforms;

pub struct FractalPass {
    shader: ShaderSource,
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl FractalPass {
    /// Create the pass and its uniform resources.
    pub fn new(gpu: &GpuContext, shader: ShaderSource) -> Result<Self, ViewerError> {
        let device = &gpu.device;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Fractal Uniforms"),
            size: std::mem::size_of::<FractalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Fractal Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FractalUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Fractal Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fractal Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = Self::build_pipeline(gpu, &pipeline_layout, &shader)?;
        log::info!("Loaded shader {}", shader.name());

        Ok(Self {
            shader,
            pipeline,
            pipeline_layout,
            uniform_buffer,
            bind_group,
        })
    }

    fn build_pipeline(
        gpu: &GpuContext,
        layout: &wgpu::PipelineLayout,
        shader: &ShaderSource,
    ) -> Result<wgpu::RenderPipeline, ViewerError> {
        shader.validate()?;

        let device = &gpu.device;
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Fractal Shader"),
            source: wgpu::ShaderSource::Wgsl(shader.source().into()),
        });

        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Fractal Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            multiview: None,
            cache: None,
        }))
    }

    /// Poll the shader file and rebuild the pipeline if it changed.
    /// Call this once per frame.
    pub fn check_reload(&mut self, gpu: &GpuContext) {
        if !self.shader.check_reload() {
            return;
        }

        log::info!("Reloading shader {}", self.shader.name());
        match Self::build_pipeline(gpu, &self.pipeline_layout, &self.shader) {
            Ok(pipeline) => {
                self.pipeline = pipeline;
                log::info!("Shader compiled successfully");
            }
            Err(e) => log::error!("{e}\nKeeping previous shader"),
        }
    }

    /// Upload `uniforms` and draw the fullscreen triangle.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        uniforms: &FractalUniforms,
    ) {
        gpu.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(uniforms)),
        );

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
