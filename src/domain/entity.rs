use heapless::String;

use crate::config::{
    DEFAULT_CHANNEL,
    DEFAULT_DUTY_CYCLE,
    DEFAULT_FREQUENCY,
    DEFAULT_RESOLUTION,
    DEFAULT_SAVE_DUTY_CYCLE,
    DEVICE_TYPE,
    NAME_CAPACITY,
};

/// Number of actions the PWM output exposes.
pub const ACTION_COUNT: usize = 2;

/// Tunable state of one PWM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    /// GPIO driven by the channel
    pub pin: u8,
    /// Write every duty cycle change back to the configuration store
    pub save_duty_cycle: bool,
    /// Output level, `0..=max_duty_cycle()`
    pub duty_cycle: u32,
    /// LEDC channel bound to `pin`
    pub channel: u8,
    /// Duty cycle resolution in bits
    pub resolution: u8,
    /// Carrier frequency in Hz
    pub frequency: u32,
}

impl PwmConfig {
    /// Create a config with safe defaults for the given binding.
    pub const fn new(pin: u8, channel: u8) -> Self {
        Self {
            pin,
            save_duty_cycle: DEFAULT_SAVE_DUTY_CYCLE,
            duty_cycle: DEFAULT_DUTY_CYCLE,
            channel,
            resolution: DEFAULT_RESOLUTION,
            frequency: DEFAULT_FREQUENCY,
        }
    }

    /// Highest duty cycle the current resolution can express.
    pub const fn max_duty_cycle(&self) -> u32 {
        max_duty_cycle(self.resolution)
    }

    /// Check if `duty_cycle` is legal for the current resolution.
    pub const fn accepts(&self, duty_cycle: u32) -> bool {
        duty_cycle <= self.max_duty_cycle()
    }
}

/// `2^resolution - 1`, saturating at `u32::MAX`.
pub const fn max_duty_cycle(resolution: u8) -> u32 {
    if resolution >= 32 {
        u32::MAX
    } else {
        (1u32 << resolution) - 1
    }
}

/// Whether the output is currently lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    On,
    Off,
}

/// Stable action codes of the PWM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCode {
    /// Turn the output off (`"0"`) or back on (`"1"`)
    State,
    /// Set and apply a new duty cycle
    DutyCycle,
}

impl ActionCode {
    pub const ALL: [ActionCode; ACTION_COUNT] = [ActionCode::State, ActionCode::DutyCycle];

    pub const fn code(self) -> i32 {
        match self {
            ActionCode::State => 0,
            ActionCode::DutyCycle => 1,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ActionCode::State),
            1 => Some(ActionCode::DutyCycle),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ActionCode::State => "state",
            ActionCode::DutyCycle => "dutycycle",
        }
    }
}

/// Per-instance mapping from action names to numeric codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCatalog {
    entries: [(&'static str, i32); ACTION_COUNT],
}

impl ActionCatalog {
    /// Catalog of the PWM output actions.
    pub fn pwm_output() -> Self {
        Self {
            entries: ActionCode::ALL.map(|action| (action.name(), action.code())),
        }
    }

    /// Get the code routed to `name`
    pub fn code(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, code)| *code)
    }

    /// Get the name registered for `code`
    pub fn name(&self, code: i32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, entry)| *entry == code)
            .map(|(name, _)| *name)
    }

    pub fn action_quantity(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.entries.iter().copied()
    }
}

/// Identity the actor framework routes by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    pub name: String<NAME_CAPACITY>,
    pub device_type: &'static str,
    pub actions: ActionCatalog,
}

impl DeviceDescription {
    pub fn pwm_output(name: String<NAME_CAPACITY>) -> Self {
        Self {
            name,
            device_type: DEVICE_TYPE,
            actions: ActionCatalog::pwm_output(),
        }
    }
}
