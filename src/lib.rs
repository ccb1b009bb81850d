// Rusted Input: device-independent input bindings for winit applications

pub mod engine;
