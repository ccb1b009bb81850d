// Engine modules: device polling, input bindings, frame timing

pub mod frame_timer;
pub mod hid;
pub mod input;
