/// Directory that holds one configuration record per actor.
pub const CONFIG_DIR: &str = "/settings/act/";
/// Record file name used when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "LEDPWM.json";

/// Device type tag reported to the actor framework.
pub const DEVICE_TYPE: &str = "output";

pub const DEFAULT_CHANNEL: u8 = 0;
pub const DEFAULT_DUTY_CYCLE: u32 = 127;
pub const DEFAULT_RESOLUTION: u8 = 8;
pub const DEFAULT_FREQUENCY: u32 = 8000;
pub const DEFAULT_SAVE_DUTY_CYCLE: bool = false;

/// Capacity of the device name.
pub const NAME_CAPACITY: usize = 32;
/// Capacity of the full record path (`CONFIG_DIR` + file name).
pub const PATH_CAPACITY: usize = 64;
/// Capacity of a configuration record, read or written.
///
/// Covers the longest encoding: a full name of control characters, each
/// escaped as `\u00XX`, with every number at its maximum.
pub const CONFIG_RECORD_CAPACITY: usize = 384;
/// Capacity of an encoded action response.
pub const RESPONSE_CAPACITY: usize = 96;
