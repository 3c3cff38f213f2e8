use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;

use crate::foundation::core::Canvas;
use crate::foundation::error::{PlayerError, PlayerResult};
use crate::nav::input::{InputEvent, KeySym};
use crate::present::Presenter;
use crate::render::frame::Frame;

/// Presenter backed by an SDL2 window.
///
/// The window is resizable; frames are stretched to fill it and pointer coordinates are mapped back
/// to canvas pixels. One streaming texture at canvas size is reused for every frame; its creator
/// is leaked so the texture can live alongside the canvas, which keeps the renderer alive until the
/// process exits.
pub struct SdlPresenter {
    texture: Texture<'static>,
    texture_size: (u32, u32),
    creator: &'static TextureCreator<WindowContext>,
    canvas: WindowCanvas,
    events: sdl2::EventPump,
    size: Canvas,
    _sdl: sdl2::Sdl,
}

impl SdlPresenter {
    /// Open a window titled `title`, initially sized to `size`.
    pub fn open(title: &str, size: Canvas) -> PlayerResult<Self> {
        size.validate()?;
        let sdl = sdl2::init().map_err(|e| PlayerError::present(format!("SDL init failed: {e}")))?;
        let video = sdl
            .video()
            .map_err(|e| PlayerError::present(format!("SDL video init failed: {e}")))?;
        let window = video
            .window(title, size.width, size.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| PlayerError::present(format!("create window: {e}")))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| PlayerError::present(format!("create renderer: {e}")))?;
        let creator: &'static TextureCreator<WindowContext> =
            Box::leak(Box::new(canvas.texture_creator()));
        let texture = streaming_texture(creator, size.width, size.height)?;
        let events = sdl
            .event_pump()
            .map_err(|e| PlayerError::present(format!("create event pump: {e}")))?;
        tracing::debug!(width = size.width, height = size.height, "opened SDL window");
        Ok(Self {
            texture,
            texture_size: (size.width, size.height),
            creator,
            canvas,
            events,
            size,
            _sdl: sdl,
        })
    }

    fn to_canvas(&self, x: i32, y: i32) -> (i32, i32) {
        let (ww, wh) = self.canvas.window().size();
        if ww == 0 || wh == 0 {
            return (x, y);
        }
        let cx = i64::from(x) * i64::from(self.size.width) / i64::from(ww);
        let cy = i64::from(y) * i64::from(self.size.height) / i64::from(wh);
        (cx as i32, cy as i32)
    }

    fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Quit { .. } => Some(InputEvent::CloseRequested),
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => Some(InputEvent::Key(key_sym(key))),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => {
                let (x, y) = self.to_canvas(x, y);
                Some(InputEvent::PointerDown { x, y })
            }
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => {
                let (x, y) = self.to_canvas(x, y);
                Some(InputEvent::PointerUp { x, y })
            }
            Event::MouseMotion { x, y, .. } => {
                let (x, y) = self.to_canvas(x, y);
                Some(InputEvent::PointerMove { x, y })
            }
            _ => None,
        }
    }
}

fn streaming_texture(
    creator: &'static TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> PlayerResult<Texture<'static>> {
    creator
        .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
        .map_err(|e| PlayerError::present(format!("create texture: {e}")))
}

fn key_sym(key: Keycode) -> KeySym {
    match key {
        Keycode::Up => KeySym::ArrowUp,
        Keycode::Down => KeySym::ArrowDown,
        Keycode::Left => KeySym::ArrowLeft,
        Keycode::Right => KeySym::ArrowRight,
        Keycode::Space => KeySym::Space,
        Keycode::Escape => KeySym::Escape,
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeySym::Char(c).normalized(),
                _ => KeySym::Other,
            }
        }
    }
}

impl Presenter for SdlPresenter {
    fn present(&mut self, frame: &Frame) -> PlayerResult<()> {
        if self.texture_size != (frame.width, frame.height) {
            self.texture = streaming_texture(self.creator, frame.width, frame.height)?;
            self.texture_size = (frame.width, frame.height);
        }
        self.texture
            .update(None, &frame.data, frame.row_bytes())
            .map_err(|e| PlayerError::present(format!("upload frame: {e}")))?;
        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(|e| PlayerError::present(format!("copy frame: {e}")))?;
        self.canvas.present();
        Ok(())
    }

    fn poll_input(&mut self, timeout: Duration) -> PlayerResult<Vec<InputEvent>> {
        let deadline = Instant::now() + timeout;
        let mut out = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let ms = remaining.as_millis().clamp(1, u128::from(u32::MAX)) as u32;
            let Some(event) = self.events.wait_event_timeout(ms) else {
                break;
            };
            if let Some(input) = self.translate(event) {
                let decisive = !matches!(input, InputEvent::PointerMove { .. });
                out.push(input);
                if decisive {
                    break;
                }
            }
        }
        // Drain whatever else is already queued without blocking.
        let queued: Vec<Event> = self.events.poll_iter().collect();
        out.extend(queued.into_iter().filter_map(|e| self.translate(e)));
        Ok(out)
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/sdl.rs"]
mod tests;
