//! Photosphere Viewer
//!
//! Presentation core for panoramic photospheres and 360° stereo video:
//! - resolves host capabilities once and gates the session on graphics support
//! - picks the preview, video or image path for a loaded scene
//! - works around platform playback quirks (autoplay limits, stalled
//!   background video clocks, hosts without video textures)
//! - drives the per-frame render loop
//!
//! Rendering, scene fetching and the loading widget are collaborators behind
//! traits. The `native` feature provides a winit desktop host, the `wasm`
//! feature a browser host.

pub mod app;
pub mod capability;
pub mod render;
pub mod scene;
pub mod ui;

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "wasm")]
pub mod web;

#[cfg(test)]
mod testing;

pub use app::{Collaborators, Controller, Failure, HostEvent, LoopControl, LoopHandle, Startup};
pub use capability::{Capabilities, CapabilityProbe};
pub use scene::SceneDescriptor;
