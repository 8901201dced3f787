mod cli;
mod controls;
mod overlay;
mod viewer;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pollster::FutureExt;
use vibecade_engine::{
    FrameClock, FrameScheduler, HubWorld, InputSnapshot, NullRenderer, RecordingOverlay,
};
use wgpu::SurfaceError;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use crate::cli::Args;
use crate::controls::{engage_look, key_char, release_look, zoom_from_scroll};
use crate::overlay::{OverlaySession, WindowOverlay, system_launcher};
use crate::viewer::{HubRenderer, close_button_rect};

const WINDOW_TITLE: &str = "Vibecade";

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init();

    let config = args.hub_config()?;
    let mut world = HubWorld::new(&config).context("building hub world")?;
    println!(
        "Hub ready: {} cabinet{}, {} NPC{}, {} neon light{}",
        world.portals().len(),
        if world.portals().len() == 1 { "" } else { "s" },
        world.agents().len(),
        if world.agents().len() == 1 { "" } else { "s" },
        world.lights().len(),
        if world.lights().len() == 1 { "" } else { "s" },
    );

    if args.headless {
        let mut scheduler = FrameScheduler::new(FrameClock::fixed(1.0 / 60.0));
        let mut input = InputSnapshot::new();
        let mut overlay = RecordingOverlay::new();
        let report = match scheduler.frame(&mut world, &mut input, &mut overlay, &mut NullRenderer)
        {
            Ok(report) => report,
            Err(never) => match never {},
        };
        let camera = world.camera_pose();
        println!(
            "Headless mode requested; stepped tick {} with camera at ({:.2}, {:.2}, {:.2}).",
            report.tick, camera.eye.x, camera.eye.y, camera.eye.z
        );
        return Ok(());
    }

    let event_loop = EventLoop::new().context("creating winit event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(args.width, args.height))
            .build(&event_loop)
            .context("creating viewer window")?,
    );

    let mut renderer = HubRenderer::new(window.clone()).block_on()?;
    let mut scheduler = FrameScheduler::new(FrameClock::wall());
    let mut input = InputSnapshot::new();
    let launcher = (!args.no_launch).then(system_launcher);
    let session = OverlaySession::new(WINDOW_TITLE, launcher);
    let mut overlay = WindowOverlay::new(window.clone(), session);
    let mut cursor = PhysicalPosition::new(0.0_f64, 0.0_f64);

    println!("Click to look around, WASD to walk, F at a cabinet to play, Esc or X to close.");

    event_loop
        .run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Focused(false) => {
                            input.clear_keys();
                            release_look(&window, &mut input);
                        }
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    logical_key: Key::Named(NamedKey::Escape),
                                    state: ElementState::Pressed,
                                    ..
                                },
                            ..
                        } => {
                            if overlay.showing().is_some() {
                                overlay.request_dismissal();
                            } else {
                                release_look(&window, &mut input);
                            }
                        }
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    logical_key,
                                    state,
                                    ..
                                },
                            ..
                        } => {
                            let Some(key) = key_char(&logical_key) else {
                                return;
                            };
                            match state {
                                ElementState::Pressed => {
                                    if key == 'x' && overlay.showing().is_some() {
                                        overlay.request_dismissal();
                                    }
                                    input.press(key);
                                }
                                ElementState::Released => input.release(key),
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => cursor = position,
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => {
                            if overlay.showing().is_some() {
                                let button = close_button_rect(renderer.size());
                                if button.contains(cursor.x as f32, cursor.y as f32) {
                                    overlay.request_dismissal();
                                }
                            } else {
                                engage_look(&window, &mut input);
                            }
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            if let Some(direction) = zoom_from_scroll(delta) {
                                input.add_zoom(direction);
                            }
                        }
                        WindowEvent::Resized(new_size) => renderer.resize(new_size),
                        WindowEvent::RedrawRequested => {
                            match scheduler.frame(&mut world, &mut input, &mut overlay, &mut renderer)
                            {
                                Ok(report) => {
                                    if report.activated.is_some() {
                                        release_look(&window, &mut input);
                                    }
                                }
                                Err(SurfaceError::Lost) => renderer.resize(renderer.size()),
                                Err(SurfaceError::OutOfMemory) => target.exit(),
                                Err(err) => log::warn!("render error: {err:?}"),
                            }
                        }
                        _ => {}
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => input.add_mouse_delta(delta.0 as f32, delta.1 as f32),
                Event::AboutToWait => renderer.window().request_redraw(),
                _ => {}
            }
        })
        .context("running viewer application")?;
    Ok(())
}
