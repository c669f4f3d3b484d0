//! Brightness-controllable LED output exposed as an actor.
//!
//! The actor owns one PWM binding (pin, channel, frequency, resolution),
//! keeps its tunable parameters in a JSON record on a configuration store and
//! answers two numbered actions: `state` (on/off) and `dutycycle`.
#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use app::PwmOutputActor;
pub use infrastructure::drivers::{FlashConfigStorage, SimulatedLedc};
pub use infrastructure::services::SharedActor;
pub use domain::dto::{ActionFailure, ActionResponse, ResponseBody};
pub use domain::entity::{ActionCatalog, ActionCode, DeviceDescription, OutputState, PwmConfig};
pub use domain::ports::{
    Actor,
    ActorError,
    ConfigBuffer,
    ConfigStorage,
    LedcDriver,
    LedcError,
    PayloadParsing,
    Persistence,
    StorageError,
};
