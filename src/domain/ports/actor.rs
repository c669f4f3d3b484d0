use core::fmt;

use heapless::String;

use crate::{
    config::CONFIG_RECORD_CAPACITY,
    domain::{
        dto::ResponseBody,
        entity::DeviceDescription,
        ports::{LedcError, StorageError},
    },
};

/// Encoded configuration record.
pub type ConfigBuffer = String<CONFIG_RECORD_CAPACITY>;

/// Error type for the actor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorError {
    /// Configuration store failed
    Storage(StorageError),
    /// Configuration record is malformed or incomplete
    Decode,
    /// Configuration record does not fit its buffer
    Encode,
    /// Record duty cycle exceeds what its resolution allows
    DutyCycleOutOfRange { duty_cycle: u32, max: u32 },
    /// Peripheral rejected the channel setup
    Output(LedcError),
    /// Name, path or record exceeds its fixed capacity
    CapacityExceeded,
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorError::Storage(e) => write!(f, "storage error: {}", e),
            ActorError::Decode => write!(f, "configuration decode failed"),
            ActorError::Encode => write!(f, "configuration encode failed"),
            ActorError::DutyCycleOutOfRange { duty_cycle, max } => {
                write!(f, "duty cycle {} out of range 0..={}", duty_cycle, max)
            }
            ActorError::Output(e) => write!(f, "output error: {}", e),
            ActorError::CapacityExceeded => write!(f, "capacity exceeded"),
        }
    }
}

impl From<StorageError> for ActorError {
    fn from(e: StorageError) -> Self {
        ActorError::Storage(e)
    }
}

impl From<LedcError> for ActorError {
    fn from(e: LedcError) -> Self {
        ActorError::Output(e)
    }
}

/// What happened to the record when a configuration was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Saving was not requested
    Skipped,
    /// Record written to the store
    Saved,
    /// Store rejected the write. The runtime configuration still applies.
    Failed(StorageError),
}

/// How a `dutycycle` payload is turned into a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadParsing {
    /// Whole payload must be a base-10 integer, otherwise the action fails
    #[default]
    Strict,
    /// Leading integer is used and anything unparsable reads as zero
    Lenient,
}

/// Device interface exposed to the actor framework.
pub trait Actor {
    /// Name, type tag and action catalog used for routing
    fn description(&self) -> &DeviceDescription;

    /// Load or seed the configuration and drive the output
    fn begin(&mut self) -> Result<(), ActorError>;

    /// Handle an action, returning whether it was handled and the response body
    fn receive_action(&mut self, action: i32, payload: &str) -> (bool, ResponseBody);

    /// Encode the current configuration
    fn get_config(&self) -> Result<ConfigBuffer, ActorError>;

    /// Replace the configuration from an encoded record
    fn set_config(&mut self, config: &[u8], save: bool) -> Result<Persistence, ActorError>;
}
