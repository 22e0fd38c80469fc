// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A real window to show the render in.
//!
//! The image is drawn into a `Canvas` at its logical size.  Presenting
//! copies the canvas into a `pixels` framebuffer of the same size,
//! which is stretched over a window `scale` times larger in each
//! direction.

use log::{debug, info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use crate::config::Resolution;
use crate::error::{Error, Result};
use crate::surface::{Canvas, DisplaySurface};

/// A window plus the canvas it shows.
pub struct WindowSurface {
    // Field order is drop order; the GPU surface must go before the
    // window it was created from.
    pixels: Pixels,
    window: Window,
    event_loop: EventLoop<()>,
    canvas: Canvas,
}

impl WindowSurface {
    /// Opens a window for an image of the given resolution.  Fails if
    /// there is no display to connect to or no usable graphics
    /// adapter.
    pub fn open(resolution: &Resolution) -> Result<WindowSurface> {
        // winit panics rather than returning an error when no backend
        // can be reached.
        let event_loop = std::panic::catch_unwind(EventLoop::new)
            .map_err(|_| Error::Display("could not connect to a display server".to_string()))?;

        let (physical_width, physical_height) = resolution.physical();
        let window = WindowBuilder::new()
            .with_title("Mandelbrot")
            .with_inner_size(PhysicalSize::new(physical_width as u32, physical_height as u32))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(Error::display)?;

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(resolution.width as u32, resolution.height as u32, texture)
            .map_err(Error::display)?;

        info!(
            "opened {}x{} window for a {}x{} image",
            size.width, size.height, resolution.width, resolution.height
        );
        Ok(WindowSurface {
            pixels,
            window,
            event_loop,
            canvas: Canvas::new(resolution.width, resolution.height),
        })
    }
}

impl DisplaySurface for WindowSurface {
    type Plotter = Canvas;

    fn size(&self) -> (usize, usize) {
        self.canvas.size()
    }

    fn plotter(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<()> {
        self.pixels
            .frame_mut()
            .copy_from_slice(self.canvas.as_bytes());
        self.canvas.present()?;
        self.pixels.render().map_err(|e| {
            warn!("could not present frame: {}", e);
            Error::display(e)
        })
    }

    // Runs the event loop for one batch of events.  The first batch of
    // every run is the loop's own start-up and does not count; after
    // that the loop sleeps until the window system has something.
    fn poll_quit_requested(&mut self) -> Result<bool> {
        let WindowSurface {
            pixels,
            window,
            event_loop,
            ..
        } = self;
        let window_id = window.id();
        let mut quit = false;
        let mut woken = false;
        let mut failure: Option<Error> = None;

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::NewEvents(StartCause::Init) => {}
                Event::NewEvents(_) => woken = true,
                Event::WindowEvent { window_id: id, event } if id == window_id => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => quit = true,
                    WindowEvent::Resized(size) => {
                        if let Err(e) = pixels.resize_surface(size.width, size.height) {
                            warn!("could not resize surface to {:?}: {}", size, e);
                            failure = Some(Error::display(e));
                        }
                    }
                    _ => {}
                },
                Event::RedrawRequested(id) if id == window_id => {
                    if let Err(e) = pixels.render() {
                        warn!("redraw failed: {}", e);
                        failure = Some(Error::display(e));
                    }
                }
                Event::RedrawEventsCleared => {
                    if quit || woken || failure.is_some() {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });

        match failure {
            Some(e) => Err(e),
            None => {
                if quit {
                    debug!("quit requested");
                }
                Ok(quit)
            }
        }
    }

    fn destroy(self) {
        let WindowSurface { pixels, window, .. } = self;
        drop(pixels);
        drop(window);
        debug!("window destroyed");
    }
}
