use crate::domain::{
    entity::OutputState,
    ports::{ActorError, ConfigStorage, LedcDriver},
};

use super::PwmOutputActor;

impl<S: ConfigStorage, D: LedcDriver> PwmOutputActor<S, D> {
    /// Detach the configured pin from its channel
    pub(super) fn release_output(&mut self) {
        self.driver.release_binding(self.config.pin);
        self.ready = false;
    }

    /// Set up the channel from the current config and attach the pin to it.
    /// The pin must have been released first.
    pub(super) fn configure_output(&mut self) -> Result<(), ActorError> {
        let config = self.config;
        self.driver
            .configure_channel(config.channel, config.frequency, config.resolution)
            .map_err(|e| {
                #[cfg(feature = "log")]
                log::error!(
                    "pwm: channel {} rejected {} Hz at {} bits: {}",
                    config.channel,
                    config.frequency,
                    config.resolution,
                    e
                );
                ActorError::Output(e)
            })?;
        self.driver.bind_pin(config.pin, config.channel);
        self.ready = true;
        Ok(())
    }

    /// Drive the output at the level implied by the output state
    pub(super) fn restore_output_level(&mut self) {
        match self.output {
            OutputState::On => self.set_duty_cycle(self.config.duty_cycle),
            OutputState::Off => self.set_duty_cycle(0),
        }
    }

    pub(super) fn set_duty_cycle(&mut self, duty_cycle: u32) {
        self.driver.write_duty_cycle(self.config.channel, duty_cycle);
    }
}
