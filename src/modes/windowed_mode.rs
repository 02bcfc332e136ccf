use anyhow::{Context as _, Result};

use softbuffer::{Context, SoftBufferError, Surface};

use qoi::{Decoder, Header};

#[cfg(target_os = "linux")]
use winit::platform::wayland::WindowAttributesExtWayland;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    platform::modifier_supplement::KeyEventExtModifierSupplement,
    window::{Icon, Window, WindowId},
};

use tracing::{debug, warn};

use std::{num::NonZeroU32, time::Instant};

use crate::constants::TITLE;
use crate::data::*;
use crate::game::Command;
use crate::graphics::board::BoardRenderer;

type WindowSurface = Surface<&'static Window, &'static Window>;

enum KeyAction {
    Game(Command),
    Exit,
}

fn key_action(key: Key<&str>) -> Option<KeyAction> {
    let cmd = match key {
        Key::Named(NamedKey::Escape) => return Some(KeyAction::Exit),

        Key::Named(NamedKey::ArrowUp) => Command::Up,
        Key::Named(NamedKey::ArrowDown) => Command::Down,
        Key::Named(NamedKey::ArrowLeft) => Command::Left,
        Key::Named(NamedKey::ArrowRight) => Command::Right,

        Key::Character("r") => Command::Restart,

        _ => return None,
    };

    Some(KeyAction::Game(cmd))
}

struct WindowState {
    prog: Program,
    game: Game<BoardRenderer>,
    window: Option<&'static Window>,
    surface: Option<WindowSurface>,
    final_buffer_size: PhysicalSize<u32>,
    error: Option<anyhow::Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Leaking the window into a static reference is only sound once.
        if self.window.is_some() {
            debug!("resumed again, keeping the existing window");
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    warn!("resize before the surface exists");
                    return;
                };

                if !Self::resize_surface(surface, width, height) {
                    return;
                }

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Ok(mut buffer) = surface.buffer_mut() {
                    buffer.fill(self.game.renderer().pix.background());
                }

                if let Some(w) = self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match key_action(event.key_without_modifiers().as_ref()) {
                    Some(KeyAction::Exit) => event_loop.exit(),
                    Some(KeyAction::Game(cmd)) => self.game.handle(cmd),
                    None => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                match surface.buffer_mut() {
                    Ok(mut buffer) => {
                        self.game.renderer().pix.scale_to(
                            self.prog.scale() as usize,
                            &mut buffer,
                            Some(self.final_buffer_size.width as usize),
                        );

                        window.pre_present_notify();
                        if let Err(e) = buffer.present() {
                            warn!("failed to present the frame: {e}");
                        }
                    }

                    Err(e) => warn!("failed to get the window buffer: {e}"),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.scheduler_mut().fire(Instant::now()) {
            self.game.tick();
        }

        if self.game.renderer_mut().take_dirty() {
            if let Some(w) = self.window {
                w.request_redraw();
            }
        }

        match self.game.scheduler().deadline() {
            Some(t) => event_loop.set_control_flow(ControlFlow::WaitUntil(t)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

impl WindowState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (w, h) = self.prog.window_size();
        let win_size = PhysicalSize::<u32>::new(w, h);

        let icon = read_icon().and_then(|(w, h, v)| {
            Icon::from_rgba(v, w, h)
                .inspect_err(|e| warn!("failed to create window icon: {e}"))
                .ok()
        });

        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(win_size)
            .with_resizable(false)
            .with_window_icon(icon);

        #[cfg(target_os = "linux")]
        let window_attributes = window_attributes.with_name("gridsnake", "gridsnake");

        let window: &'static Window = Box::leak(Box::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the game window")?,
        ));
        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window)
            .map_err(softbuffer_error("failed to create a softbuffer context"))?;
        let mut surface = Surface::new(&context, window)
            .map_err(softbuffer_error("failed to create the window surface"))?;

        Self::resize_surface(&mut surface, size.width, size.height);
        self.surface = Some(surface);

        // Some window managers ignore with_resizable(false).
        window.set_min_inner_size(Some(win_size));
        window.set_max_inner_size(Some(win_size));

        window.request_redraw();
        Ok(())
    }

    /// Returns false when the size is zero, which happens while minimized.
    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> bool {
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return false;
        };

        if let Err(e) = surface.resize(w, h) {
            warn!("failed to resize the surface buffer: {e}");
            return false;
        }

        true
    }
}

/// `SoftBufferError` is not `Send + Sync`, so it is flattened into its message.
fn softbuffer_error(what: &'static str) -> impl FnOnce(SoftBufferError) -> anyhow::Error {
    move |e| anyhow::anyhow!("{what}: {e}")
}

fn read_icon() -> Option<(u32, u32, Vec<u8>)> {
    let icon_file = include_bytes!("../../assets/gridsnake_icon_32x32.qoi");

    let mut icon = Decoder::new(icon_file)
        .map(|i| i.with_channels(qoi::Channels::Rgba))
        .ok()?;

    let &Header { width, height, .. } = icon.header();

    icon.decode_to_vec().ok().map(|v| (width, height, v))
}

pub fn winit_main(prog: Program) -> Result<()> {
    prog.print_startup_info();

    let event_loop = EventLoop::new().context("failed to create the event loop")?;

    let game = prog.new_game(BoardRenderer::new());

    let mut state = WindowState {
        prog,
        game,
        window: None,
        surface: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut state)
        .context("event loop terminated abnormally")?;

    match state.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
