//! PWM output actor use cases.
//!
//! One struct carries the three responsibilities: configuration lifecycle
//! (`configuration`), action dispatch (`actions`) and the sequencing of
//! peripheral calls (`output`).

mod actions;
mod configuration;
mod output;
mod payload;

use heapless::String;

use crate::{
    config::{CONFIG_DIR, DEFAULT_CHANNEL, DEFAULT_CONFIG_FILE, PATH_CAPACITY},
    domain::{
        dto::ResponseBody,
        entity::{DeviceDescription, OutputState, PwmConfig},
        ports::{
            Actor,
            ActorError,
            ConfigBuffer,
            ConfigStorage,
            LedcDriver,
            PayloadParsing,
            Persistence,
        },
    },
};

/// LED output with brightness driven by one PWM channel.
pub struct PwmOutputActor<S: ConfigStorage, D: LedcDriver> {
    description: DeviceDescription,
    config: PwmConfig,
    config_path: String<PATH_CAPACITY>,
    output: OutputState,
    ready: bool,
    parsing: PayloadParsing,
    storage: S,
    driver: D,
}

impl<S: ConfigStorage, D: LedcDriver> PwmOutputActor<S, D> {
    /// Create an actor bound to `pin` on `channel`, keeping its record at
    /// `/settings/act/<config_file>`.
    pub fn new(
        name: &str,
        pin: u8,
        channel: u8,
        config_file: &str,
        storage: S,
        driver: D,
    ) -> Result<Self, ActorError> {
        let mut device_name = String::new();
        device_name
            .push_str(name)
            .map_err(|()| ActorError::CapacityExceeded)?;

        let mut config_path = String::new();
        config_path
            .push_str(CONFIG_DIR)
            .and_then(|()| config_path.push_str(config_file))
            .map_err(|()| ActorError::CapacityExceeded)?;

        Ok(Self {
            description: DeviceDescription::pwm_output(device_name),
            config: PwmConfig::new(pin, channel),
            config_path,
            output: OutputState::On,
            ready: false,
            parsing: PayloadParsing::default(),
            storage,
            driver,
        })
    }

    /// Create an actor on channel 0 using the default record file.
    pub fn with_defaults(name: &str, pin: u8, storage: S, driver: D) -> Result<Self, ActorError> {
        Self::new(name, pin, DEFAULT_CHANNEL, DEFAULT_CONFIG_FILE, storage, driver)
    }

    /// Set how `dutycycle` payloads are parsed
    #[must_use]
    pub fn with_payload_parsing(mut self, parsing: PayloadParsing) -> Self {
        self.parsing = parsing;
        self
    }

    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn output_state(&self) -> OutputState {
        self.output
    }

    /// Check if the last `begin` or `set_config` left a working binding
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the storage and driver
    pub fn release(self) -> (S, D) {
        (self.storage, self.driver)
    }
}

impl<S: ConfigStorage, D: LedcDriver> Actor for PwmOutputActor<S, D> {
    fn description(&self) -> &DeviceDescription {
        &self.description
    }

    fn begin(&mut self) -> Result<(), ActorError> {
        self.startup()
    }

    fn receive_action(&mut self, action: i32, payload: &str) -> (bool, ResponseBody) {
        let (handled, response) = self.dispatch(action, payload);
        (handled, response.to_body())
    }

    fn get_config(&self) -> Result<ConfigBuffer, ActorError> {
        self.encode_config()
    }

    fn set_config(&mut self, config: &[u8], save: bool) -> Result<Persistence, ActorError> {
        self.apply_config(config, save)
    }
}
