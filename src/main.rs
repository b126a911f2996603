//! Orrery - textured solar system viewer
//!
//! Twenty-odd textured spheres orbiting the Sun, seen through an orbiting look-at camera.

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orrery::config::AppConfig;
use orrery::input::{InputAction, InputMapper};
use orrery::systems::{RenderError, RenderSystem, SimulationSystem, TitleStats, WindowSystem};
use orrery_core::SolarSystem;
use orrery_input::CameraController;
use orrery_render::Camera;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    system: SolarSystem,
    camera: Camera,
    controller: CameraController,
    simulation: SimulationSystem,
    mapper: InputMapper,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let system = SolarSystem::standard();

        let cam = &config.camera;
        let camera = Camera::new(
            Vec3::from_array(cam.eye),
            Vec3::from_array(cam.target),
            Vec3::from_array(cam.up),
        )
        .with_distance_limits(cam.min_distance, cam.max_distance);

        let input = &config.input;
        let controller = CameraController::new()
            .with_orbit_speed(input.orbit_speed)
            .with_zoom_speed(input.zoom_speed)
            .with_mouse_sensitivity(input.mouse_sensitivity)
            .with_scroll_zoom_step(input.scroll_zoom_step);

        let simulation = SimulationSystem::new(&config.simulation);
        let mapper = InputMapper::new(input.scene_rotate_step);

        Self {
            config,
            window: None,
            render: None,
            system,
            camera,
            controller,
            simulation,
            mapper,
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetScene => {
                self.system.reset();
                self.camera.reset();
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::TogglePause => {
                let paused = self.simulation.toggle_pause();
                log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
            }
            InputAction::SpeedUp => {
                log::info!("Time scale: {}x", self.simulation.speed_up());
            }
            InputAction::SlowDown => {
                log::info!("Time scale: {}x", self.simulation.slow_down());
            }
            InputAction::RotateScene(degrees) => {
                self.system.scene_transform_mut().rotate(degrees, Vec3::Y);
                self.system.update_transforms();
                log::debug!(
                    "Scene rotation: {:.1} deg",
                    self.system.scene_transform().rotation_degrees()
                );
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation.update(&mut self.system, &mut self.camera, &mut self.controller);

        if let Some(window) = &mut self.window {
            if self.config.debug.show_title_stats {
                window.update_title(TitleStats {
                    time_scale: self.simulation.time_scale(),
                    paused: self.simulation.is_paused(),
                    scene_rotation: self.system.scene_transform().rotation_degrees(),
                });
            }
        }

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.camera, &self.system) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            &self.config.camera,
            &self.config.assets,
            window.vsync(),
            &self.system,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render.size();
        log::info!("Rendering {} bodies at {}x{}", self.system.len(), width, height);

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match self.mapper.map_keyboard(key, event.state) {
                        Some(action) => self.handle_action(action, event_loop),
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = self.mapper.map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Orrery");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
