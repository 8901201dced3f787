//! Simulation core for the Vibecade arcade hub.
//!
//! A third-person player walks a bounded room, wandering NPCs retarget inside
//! it, and standing next to a cabinet while pressing the activation key opens
//! that cabinet's page in an overlay. Everything here is windowless; hosts
//! provide input, an [`OverlayGateway`] and a [`FrameRenderer`].

pub mod bounds;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod entity;
pub mod input;
pub mod lights;
pub mod overlay;
pub mod player;
pub mod portal;
pub mod scheduler;
pub mod script;
pub mod trace;
pub mod wander;
pub mod world;

pub use bounds::BoundaryVolume;
pub use camera::{CameraPose, CameraRig};
pub use catalog::{default_cabinets, CabinetSpec, PropKind, SceneProp};
pub use config::{ConfigError, HubConfig};
pub use entity::SpatialEntity;
pub use input::{InputSnapshot, ZoomDirection};
pub use lights::NeonLight;
pub use overlay::{OverlayEvent, OverlayGateway, RecordingOverlay};
pub use player::{PlayerController, PlayerState};
pub use portal::{ActivationTrigger, Portal, PortalId, PortalRegistry};
pub use scheduler::{FrameClock, FrameRenderer, FrameScheduler, FrameView, NullRenderer};
pub use script::{InputScript, ScriptCue, ScriptError, ScriptSegment, ScriptedInput};
pub use trace::{HubTrace, TickSample};
pub use wander::{WanderAgent, WanderStep};
pub use world::{Activation, HubWorld, TickReport};
