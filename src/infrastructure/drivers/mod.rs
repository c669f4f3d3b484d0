mod flash_storage;
mod ledc;

pub use flash_storage::{FlashConfigStorage, MAGIC_HEADER_SIZE, SLOT_IMAGE_SIZE};
pub use ledc::{APB_CLOCK_HZ, ChannelState, LEDC_CHANNELS, MAX_RESOLUTION, SimulatedLedc};
