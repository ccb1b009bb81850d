use anyhow::Result;
use log::info;
use rusted_input::engine::frame_timer::FrameTimer;
use rusted_input::engine::hid::WinitHid;
use rusted_input::engine::input::{
    ActionId, ContextParams, GamepadMapsDef, InputBinding, InputBindingDef, InputContext,
};
use std::rc::Rc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

const DEFAULT_BINDING: &str = include_str!("../assets/input/default.input_binding.toml");
const DEFAULT_GAMEPADS: &str = include_str!("../assets/input/default.gamepads.toml");

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Input demo...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Input")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Input setup
    let hid = Rc::new(WinitHid::new());
    let context = InputContext::new(hid.clone(), ContextParams::default()).into_shared();
    let registered = context
        .borrow_mut()
        .register_gamepads(&GamepadMapsDef::from_toml_str(DEFAULT_GAMEPADS)?);
    info!("{} gamepad maps registered", registered);

    let mut binding = InputBinding::new(&context);
    binding.set_binding(&InputBindingDef::from_toml_str(DEFAULT_BINDING)?)?;
    info!("Player binding ready with {} actions", binding.len());

    let pause = ActionId::from_name("pause");
    let mut timer = FrameTimer::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                hid.handle_window_event(&event);
                match event {
                    WindowEvent::CloseRequested => {
                        info!(
                            "Close requested after {} frames in {:.1}s, shutting down...",
                            timer.frame_count(),
                            timer.elapsed().as_secs_f32()
                        );
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        binding.update(timer.tick());

                        binding.for_each_active(|id, action| {
                            let name = binding.actions().name(id).unwrap_or("pointer");
                            if action.pressed {
                                info!("{} pressed", name);
                            } else if action.released {
                                info!("{} released", name);
                            } else {
                                log::debug!(
                                    "{} = {:.2} at {} (moved {})",
                                    name,
                                    action.value,
                                    action.position,
                                    action.delta
                                );
                            }
                        });

                        if binding.repeated(pause) {
                            info!("Pause toggled (frame {})", timer.frame_count());
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
