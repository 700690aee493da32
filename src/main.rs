//! Tyk-Tyk entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use tyk_tyk::App;
    use tyk_tyk::Settings;
    use tyk_tyk::consts::*;
    use tyk_tyk::platform::input::{key_from_code, mouse_button_from_index};
    use tyk_tyk::platform::InputEvent;
    use tyk_tyk::render::{Anchor, DrawList};
    use tyk_tyk::renderer::SdfRenderState;

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: Option<SdfRenderState>,
        canvas: HtmlCanvasElement,
        /// One DOM element per HUD text line
        hud: Vec<HtmlElement>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            Self {
                app: App::new(seed, settings),
                render_state: None,
                canvas,
                hud: Vec::new(),
            }
        }

        /// Convert a canvas-relative CSS position to game coordinates
        fn to_game_coords(&self, x: f32, y: f32) -> Vec2 {
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            Vec2::new(x * WIDTH / w, y * HEIGHT / h)
        }

        /// Run due ticks, render, and refresh the HUD
        fn frame(&mut self, time_ms: f64) {
            let Some(frame) = self.app.frame(time_ms / 1000.0) else {
                return;
            };

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                update_hud(&document, &self.canvas, &mut self.hud, frame);
            }
        }
    }

    /// Mirror the frame's text commands into absolutely positioned DOM
    /// elements over the canvas
    fn update_hud(
        document: &Document,
        canvas: &HtmlCanvasElement,
        hud: &mut Vec<HtmlElement>,
        frame: &DrawList,
    ) {
        let rect = canvas.get_bounding_client_rect();
        let scale = rect.width() as f32 / WIDTH;

        for (i, (text, anchor, font_size, color)) in frame.texts().enumerate() {
            if hud.len() <= i {
                let Some(el) = create_hud_element(document) else {
                    return;
                };
                hud.push(el);
            }
            let el = &hud[i];

            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }

            let point = anchor.point() * scale;
            let transform = match anchor {
                Anchor::TopLeft(_) => "none",
                Anchor::TopRight(_) => "translateX(-100%)",
                Anchor::Center(_) => "translate(-50%, -50%)",
            };
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", rect.left() as f32 + point.x));
            let _ = style.set_property("top", &format!("{}px", rect.top() as f32 + point.y));
            let _ = style.set_property("transform", transform);
            let _ = style.set_property("font-size", &format!("{}px", font_size * scale));
            let _ = style.set_property("color", &color.to_css());
        }
    }

    fn create_hud_element(document: &Document) -> Option<HtmlElement> {
        let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let style = el.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("white-space", "nowrap");
        let _ = style.set_property("font-family", "sans-serif");
        document.body()?.append_child(&el).ok()?;
        Some(el)
    }

    fn clear_hud(hud: &mut Vec<HtmlElement>) {
        for el in hud.drain(..) {
            el.remove();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tyk-Tyk starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size, backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (WIDTH as f64 * dpr) as u32;
        let height = (HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = canvas.style().set_property("width", &format!("{}px", WIDTH));
        let _ = canvas.style().set_property("height", &format!("{}px", HEIGHT));

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings, canvas.clone())));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Tyk-Tyk running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_game_coords(event.offset_x() as f32, event.offset_y() as f32);
                let button = mouse_button_from_index(event.button());
                g.app.handle_input(InputEvent::MouseDown { pos, button });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = key_from_code(&event.code());
                game.borrow_mut().app.handle_input(InputEvent::KeyDown(key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.app.quit_requested() {
                // A page cannot close itself; stop the loop instead
                clear_hud(&mut g.hud);
                log::info!("Tyk-Tyk stopped");
                return;
            }
            g.frame(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Arc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use winit::application::ApplicationHandler;
    use winit::dpi::{LogicalSize, PhysicalPosition};
    use winit::event::{ElementState, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use tyk_tyk::Settings;
    use tyk_tyk::app::{App, title_text};
    use tyk_tyk::consts::*;
    use tyk_tyk::platform::{InputEvent, Key, MouseButton};
    use tyk_tyk::renderer::SdfRenderState;

    /// Game instance holding all state
    struct Game {
        app: App,
        window: Option<Arc<Window>>,
        render_state: Option<SdfRenderState>,
        /// Last cursor position in game coordinates
        cursor: Vec2,
        start: Instant,
        title: String,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                app: App::new(seed, settings),
                window: None,
                render_state: None,
                cursor: Vec2::ZERO,
                start: Instant::now(),
                title: TITLE.to_string(),
            }
        }

        /// Convert a physical window position to game coordinates
        fn to_game_coords(&self, pos: PhysicalPosition<f64>) -> Vec2 {
            let Some(window) = self.window.as_ref() else {
                return Vec2::ZERO;
            };
            let size = window.inner_size();
            Vec2::new(
                pos.x as f32 * WIDTH / size.width.max(1) as f32,
                pos.y as f32 * HEIGHT / size.height.max(1) as f32,
            )
        }

        fn init_graphics(&mut self, event_loop: &ActiveEventLoop) {
            let attributes = Window::default_attributes()
                .with_title(TITLE)
                .with_inner_size(LogicalSize::new(WIDTH as f64, HEIGHT as f64))
                .with_resizable(false);

            let window = match event_loop.create_window(attributes) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::PRIMARY,
                ..Default::default()
            });

            let surface = match instance.create_surface(window.clone()) {
                Ok(surface) => surface,
                Err(e) => {
                    log::error!("Failed to create surface: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let adapter = match pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                },
            )) {
                Ok(adapter) => adapter,
                Err(e) => {
                    log::error!("Failed to get adapter: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let size = window.inner_size();
            let render_state = pollster::block_on(SdfRenderState::new(
                surface,
                &adapter,
                size.width,
                size.height,
            ));

            log::info!("{}", HINT_TEXT);
            log::info!("{}", HELP_TEXT);

            window.request_redraw();
            self.render_state = Some(render_state);
            self.window = Some(window);
        }

        fn redraw(&mut self, event_loop: &ActiveEventLoop) {
            let now = self.start.elapsed().as_secs_f64();
            let Some(frame) = self.app.frame(now) else {
                return;
            };

            // Window title stands in for the HUD counters and key hints
            let title = title_text(frame);
            if title != self.title {
                if let Some(window) = self.window.as_ref() {
                    window.set_title(&title);
                }
                self.title = title;
            }

            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    impl ApplicationHandler for Game {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_none() {
                self.init_graphics(event_loop);
            }
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested => {
                    event_loop.exit();
                }

                WindowEvent::Resized(size) => {
                    if let Some(render_state) = self.render_state.as_mut() {
                        render_state.resize(size.width, size.height);
                    }
                }

                WindowEvent::CursorMoved { position, .. } => {
                    self.cursor = self.to_game_coords(position);
                }

                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button,
                    ..
                } => {
                    let button = match button {
                        winit::event::MouseButton::Left => MouseButton::Left,
                        winit::event::MouseButton::Middle => MouseButton::Middle,
                        winit::event::MouseButton::Right => MouseButton::Right,
                        _ => MouseButton::Other,
                    };
                    self.app.handle_input(InputEvent::MouseDown {
                        pos: self.cursor,
                        button,
                    });
                }

                // Physical key codes so R works on any keyboard layout
                WindowEvent::KeyboardInput { event, .. }
                    if event.state == ElementState::Pressed && !event.repeat =>
                {
                    let key = match event.physical_key {
                        PhysicalKey::Code(KeyCode::KeyR) => Key::R,
                        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
                        _ => Key::Other,
                    };
                    self.app.handle_input(InputEvent::KeyDown(key));
                    if self.app.quit_requested() {
                        event_loop.exit();
                    }
                }

                WindowEvent::RedrawRequested => {
                    self.redraw(event_loop);
                }

                _ => {}
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Tyk-Tyk (native) starting...");

        let settings = Settings::load();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {}", e);
                return;
            }
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut game = Game::new(seed, settings);
        if let Err(e) = event_loop.run_app(&mut game) {
            log::error!("Event loop error: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
