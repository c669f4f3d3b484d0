//! In-memory model of the ESP32 LEDC peripheral.
//!
//! Applies the limits the hardware enforces on channel setup so the actor can
//! run, and be exercised, without a chip attached.

use heapless::LinearMap;

use crate::domain::ports::{LedcDriver, LedcError};

/// Number of LEDC channels (8 high speed + 8 low speed)
pub const LEDC_CHANNELS: usize = 16;
/// Widest duty resolution the timers support
pub const MAX_RESOLUTION: u8 = 20;
/// Timer source clock
pub const APB_CLOCK_HZ: u64 = 80_000_000;

/// Setup and level of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelState {
    pub frequency: u32,
    pub resolution: u8,
    pub duty_cycle: u32,
}

/// LEDC peripheral model: channel table plus pin routing.
#[derive(Debug, Default)]
pub struct SimulatedLedc {
    channels: [Option<ChannelState>; LEDC_CHANNELS],
    pins: LinearMap<u8, u8, LEDC_CHANNELS>,
}

impl SimulatedLedc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the setup of `channel`, `None` when it was never configured
    pub fn channel(&self, channel: u8) -> Option<ChannelState> {
        self.channels.get(usize::from(channel)).copied().flatten()
    }

    /// Get the channel `pin` is routed to
    pub fn bound_channel(&self, pin: u8) -> Option<u8> {
        self.pins.get(&pin).copied()
    }

    /// Get the level currently driven on `pin`
    pub fn pin_level(&self, pin: u8) -> Option<u32> {
        let channel = self.bound_channel(pin)?;
        self.channel(channel).map(|state| state.duty_cycle)
    }
}

impl LedcDriver for SimulatedLedc {
    fn release_binding(&mut self, pin: u8) {
        self.pins.remove(&pin);
    }

    fn configure_channel(
        &mut self,
        channel: u8,
        frequency: u32,
        resolution: u8,
    ) -> Result<(), LedcError> {
        let slot = self
            .channels
            .get_mut(usize::from(channel))
            .ok_or(LedcError::ChannelUnavailable)?;
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(LedcError::ResolutionUnsupported);
        }
        if frequency == 0 || u64::from(frequency) << resolution > APB_CLOCK_HZ {
            return Err(LedcError::FrequencyUnreachable);
        }

        *slot = Some(ChannelState {
            frequency,
            resolution,
            duty_cycle: 0,
        });
        Ok(())
    }

    fn bind_pin(&mut self, pin: u8, channel: u8) {
        if self.channel(channel).is_none() {
            #[cfg(feature = "log")]
            log::warn!("ledc: pin {} bound to unconfigured channel {}", pin, channel);
        }
        if self.pins.insert(pin, channel).is_err() {
            #[cfg(feature = "log")]
            log::warn!("ledc: pin table full, pin {} not routed to channel {}", pin, channel);
        }
    }

    fn write_duty_cycle(&mut self, channel: u8, duty_cycle: u32) {
        match self
            .channels
            .get_mut(usize::from(channel))
            .and_then(Option::as_mut)
        {
            Some(state) => state.duty_cycle = duty_cycle,
            None => {
                #[cfg(feature = "log")]
                log::warn!("ledc: write to unconfigured channel {}", channel);
            }
        }
    }
}
