use std::{sync::Arc, time::Duration};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture, wgpu::TextureFormat};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use super::{frame::Frame, limiter::FrameLimiter};

pub struct LifeWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,
    pub draw_callback: Box<dyn FnMut(Frame)>,
    pub event_callback: Box<dyn FnMut(&WindowEvent)>,
}

pub struct LifeWindow {
    config: LifeWindowConfig,
    surface: Option<ActiveSurface>,
    limiter: FrameLimiter,
}

struct ActiveSurface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl LifeWindow {
    pub fn new(config: LifeWindowConfig) -> Self {
        let limiter = {
            let target_frame_time = Duration::from_micros(1_000_000 / config.target_fps);
            FrameLimiter::new(target_frame_time)
        };

        Self {
            config,
            surface: None,
            limiter,
        }
    }
}

impl ApplicationHandler for LifeWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new({
            let window_size = LogicalSize::new(self.config.width as f64, self.config.height as f64);

            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .expect("Creating window")
        });

        let pixels = {
            let window_size = window.inner_size();

            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, window.clone());

            PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
                .texture_format(TextureFormat::Rgba8UnormSrgb)
                .build()
                .expect("Creating pixels buffer")
        };

        window.request_redraw();

        self.surface = Some(ActiveSurface { window, pixels });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        // SAFETY: winit delivers resumed before any window event.
        let ActiveSurface { window, pixels } = self.surface.as_mut().unwrap();

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                (self.config.draw_callback)(Frame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                });

                pixels.render().expect("Rendering with pixels");

                self.limiter.wait();
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                pixels.resize_surface(width, height).unwrap();
                pixels.resize_buffer(width, height).unwrap();
                window.request_redraw();
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }

        (self.config.event_callback)(&event);
    }
}
