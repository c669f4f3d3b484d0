use core::fmt;

/// Error type for the PWM peripheral operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedcError {
    /// Channel does not exist on the peripheral
    ChannelUnavailable,
    /// Resolution outside what the peripheral supports
    ResolutionUnsupported,
    /// Frequency cannot be generated at the requested resolution
    FrequencyUnreachable,
}

impl fmt::Display for LedcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedcError::ChannelUnavailable => write!(f, "channel unavailable"),
            LedcError::ResolutionUnsupported => write!(f, "resolution unsupported"),
            LedcError::FrequencyUnreachable => {
                write!(f, "frequency unreachable at this resolution")
            }
        }
    }
}

/// PWM peripheral interface.
///
/// A binding is changed with `release_binding`, then `configure_channel`,
/// then `bind_pin`. `write_duty_cycle` is valid once a pin is bound.
pub trait LedcDriver {
    /// Detach `pin` from whatever channel drives it. No-op for a free pin.
    fn release_binding(&mut self, pin: u8);

    /// Set up `channel` with the given carrier frequency and resolution
    fn configure_channel(
        &mut self,
        channel: u8,
        frequency: u32,
        resolution: u8,
    ) -> Result<(), LedcError>;

    /// Route `channel` to `pin`. The channel must be configured first.
    fn bind_pin(&mut self, pin: u8, channel: u8);

    /// Set the channel output level. The caller range-checks `duty_cycle`.
    fn write_duty_cycle(&mut self, channel: u8, duty_cycle: u32);
}

impl<T: LedcDriver + ?Sized> LedcDriver for &mut T {
    fn release_binding(&mut self, pin: u8) {
        (**self).release_binding(pin);
    }

    fn configure_channel(
        &mut self,
        channel: u8,
        frequency: u32,
        resolution: u8,
    ) -> Result<(), LedcError> {
        (**self).configure_channel(channel, frequency, resolution)
    }

    fn bind_pin(&mut self, pin: u8, channel: u8) {
        (**self).bind_pin(pin, channel);
    }

    fn write_duty_cycle(&mut self, channel: u8, duty_cycle: u32) {
        (**self).write_duty_cycle(channel, duty_cycle);
    }
}
