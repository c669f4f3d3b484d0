use crate::{
    config::{CONFIG_RECORD_CAPACITY, NAME_CAPACITY},
    domain::{
        dto::ConfigRecord,
        entity::OutputState,
        ports::{ActorError, ConfigBuffer, ConfigStorage, LedcDriver, Persistence},
    },
};

use super::PwmOutputActor;

impl<S: ConfigStorage, D: LedcDriver> PwmOutputActor<S, D> {
    /// Load the stored record, or seed the store with the defaults on first
    /// run, then configure the output and drive it at the stored duty cycle.
    pub(super) fn startup(&mut self) -> Result<(), ActorError> {
        self.ready = false;
        self.output = OutputState::On;

        if self.storage.exists(&self.config_path) {
            let mut buffer = [0u8; CONFIG_RECORD_CAPACITY];
            let len = self
                .storage
                .read(&self.config_path, &mut buffer)
                .map_err(|e| {
                    #[cfg(feature = "log")]
                    log::error!("pwm: reading {} failed: {}", self.config_path, e);
                    ActorError::Storage(e)
                })?;
            self.apply_config(&buffer[..len], false)?;
        } else {
            #[cfg(feature = "log")]
            log::info!("pwm: no record at {}, seeding defaults", self.config_path);

            let record = self.encode_config()?;
            self.storage
                .write(&self.config_path, record.as_bytes())
                .map_err(|e| {
                    #[cfg(feature = "log")]
                    log::error!("pwm: seeding {} failed: {}", self.config_path, e);
                    ActorError::Storage(e)
                })?;
            self.release_output();
            self.configure_output()?;
            self.restore_output_level();
        }
        Ok(())
    }

    /// Encode the name and current configuration as a JSON record
    pub(super) fn encode_config(&self) -> Result<ConfigBuffer, ActorError> {
        let record = ConfigRecord::new(&self.description.name, &self.config);
        serde_json_core::to_string(&record).map_err(|_| ActorError::Encode)
    }

    /// Decode `bytes` and make it the live configuration.
    ///
    /// A record that fails to decode or validate, or that is longer than
    /// [`CONFIG_RECORD_CAPACITY`] and so could not be loaded back, leaves the
    /// configuration and the binding untouched. Once accepted, the old pin is
    /// released, the config replaced, the raw record saved when `save` is set
    /// and the output reconfigured. The result reflects the reconfiguration; a failed
    /// save is reported through [`Persistence::Failed`].
    pub(super) fn apply_config(
        &mut self,
        bytes: &[u8],
        save: bool,
    ) -> Result<Persistence, ActorError> {
        if bytes.len() > CONFIG_RECORD_CAPACITY {
            #[cfg(feature = "log")]
            log::warn!(
                "pwm: rejected record of {} bytes, limit is {}",
                bytes.len(),
                CONFIG_RECORD_CAPACITY
            );
            return Err(ActorError::CapacityExceeded);
        }
        let record = decode_record(bytes)?;
        let config = record.pwm_config();
        if !config.accepts(config.duty_cycle) {
            #[cfg(feature = "log")]
            log::warn!(
                "pwm: rejected record, duty cycle {} exceeds {}",
                config.duty_cycle,
                config.max_duty_cycle()
            );
            return Err(ActorError::DutyCycleOutOfRange {
                duty_cycle: config.duty_cycle,
                max: config.max_duty_cycle(),
            });
        }

        // Pin may change
        self.release_output();
        self.config = config;
        self.description.name = record.name;

        let persistence = if save {
            match self.storage.write(&self.config_path, bytes) {
                Ok(()) => Persistence::Saved,
                Err(e) => {
                    #[cfg(feature = "log")]
                    log::warn!("pwm: saving {} failed: {}", self.config_path, e);
                    Persistence::Failed(e)
                }
            }
        } else {
            Persistence::Skipped
        };

        self.configure_output()?;
        self.restore_output_level();
        Ok(persistence)
    }

    /// Write the current configuration to the store
    pub(super) fn persist_config(&mut self) -> Result<(), ActorError> {
        let record = self.encode_config()?;
        self.storage
            .write(&self.config_path, record.as_bytes())
            .map_err(|e| {
                #[cfg(feature = "log")]
                log::warn!("pwm: saving {} failed: {}", self.config_path, e);
                ActorError::Storage(e)
            })
    }
}

/// Decode a record, unescaping the name. The name is the only string field, so
/// the scratch buffer needs no more than its capacity.
fn decode_record(bytes: &[u8]) -> Result<ConfigRecord, ActorError> {
    let mut scratch = [0u8; NAME_CAPACITY];
    serde_json_core::from_slice_escaped::<ConfigRecord>(bytes, &mut scratch)
        .map(|(record, _)| record)
        .map_err(|_e| {
            #[cfg(feature = "log")]
            log::error!("pwm: deserialization failed: {}", _e);
            ActorError::Decode
        })
}
