//! Configuration store on NOR flash.
//!
//! The region starting at `base` is split into `SLOTS` erase-aligned slots,
//! one record per slot:
//!
//! | bytes | content                     |
//! |-------|-----------------------------|
//! | 0..2  | magic header (LE)           |
//! | 2     | path length                 |
//! | 3..5  | payload length (LE)         |
//! | 5..   | path, then payload          |
//!
//! A slot without the magic header is free. Writes erase the whole slot
//! before programming it.

use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};

use crate::domain::ports::{ConfigStorage, StorageError};

const MAGIC_HEADER: u16 = 0xBEEF;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();
const SLOT_HEADER_SIZE: usize = MAGIC_HEADER_SIZE + 3;

/// Bytes of a slot that hold the record image.
pub const SLOT_IMAGE_SIZE: usize = 512;

type SlotImage = [u8; SLOT_IMAGE_SIZE];

#[derive(Debug, Clone, Copy)]
struct SlotHeader {
    path_len: usize,
    payload_len: usize,
}

impl SlotHeader {
    fn parse(image: &SlotImage) -> Option<Self> {
        let magic = u16::from_le_bytes([image[0], image[1]]);
        if magic != MAGIC_HEADER {
            return None;
        }
        let header = Self {
            path_len: usize::from(image[MAGIC_HEADER_SIZE]),
            payload_len: usize::from(u16::from_le_bytes([
                image[MAGIC_HEADER_SIZE + 1],
                image[MAGIC_HEADER_SIZE + 2],
            ])),
        };
        (header.image_len() <= SLOT_IMAGE_SIZE).then_some(header)
    }

    const fn image_len(self) -> usize {
        SLOT_HEADER_SIZE + self.path_len + self.payload_len
    }

    fn path(self, image: &SlotImage) -> &[u8] {
        &image[SLOT_HEADER_SIZE..SLOT_HEADER_SIZE + self.path_len]
    }

    fn payload(self, image: &SlotImage) -> &[u8] {
        &image[SLOT_HEADER_SIZE + self.path_len..self.image_len()]
    }
}

/// Result of scanning the slots for a path.
struct Lookup {
    found: Option<(usize, SlotHeader)>,
    first_free: Option<usize>,
}

/// Path-keyed record store backed by a NOR flash region.
pub struct FlashConfigStorage<F: NorFlash, const SLOTS: usize> {
    flash: F,
    base: u32,
}

impl<F: NorFlash, const SLOTS: usize> FlashConfigStorage<F, SLOTS> {
    /// Create a store over `SLOTS` slots starting at `base`, which must be
    /// aligned to the flash erase size.
    pub fn new(flash: F, base: u32) -> Self {
        Self { flash, base }
    }

    pub fn flash(&self) -> &F {
        &self.flash
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Distance between two slots, the image rounded up to whole erase blocks
    pub const fn slot_stride() -> usize {
        align_up(SLOT_IMAGE_SIZE, F::ERASE_SIZE)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn slot_addr(&self, slot: usize) -> u32 {
        self.base + (slot * Self::slot_stride()) as u32
    }

    fn read_slot(&mut self, slot: usize, image: &mut SlotImage) -> Result<(), StorageError> {
        let addr = self.slot_addr(slot);
        self.flash
            .read(addr, image)
            .map_err(|_| StorageError::DriverError)
    }

    /// Scan every slot, leaving the matching slot image in `image`
    fn lookup(&mut self, path: &str, image: &mut SlotImage) -> Result<Lookup, StorageError> {
        let mut first_free = None;
        for slot in 0..SLOTS {
            self.read_slot(slot, image)?;
            match SlotHeader::parse(image) {
                Some(header) if header.path(image) == path.as_bytes() => {
                    return Ok(Lookup {
                        found: Some((slot, header)),
                        first_free,
                    });
                }
                Some(_) => {}
                None => {
                    first_free = first_free.or(Some(slot));
                }
            }
        }
        Ok(Lookup {
            found: None,
            first_free,
        })
    }
}

impl<F: NorFlash, const SLOTS: usize> ConfigStorage for FlashConfigStorage<F, SLOTS> {
    fn exists(&mut self, path: &str) -> bool {
        let mut image = [0u8; SLOT_IMAGE_SIZE];
        matches!(
            self.lookup(path, &mut image),
            Ok(Lookup { found: Some(_), .. })
        )
    }

    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut image = [0u8; SLOT_IMAGE_SIZE];
        let Some((_, header)) = self.lookup(path, &mut image)?.found else {
            return Err(StorageError::NotFound);
        };
        let payload = header.payload(&image);
        buffer
            .get_mut(..payload.len())
            .ok_or(StorageError::BufferTooSmall)?
            .copy_from_slice(payload);
        Ok(payload.len())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        if path.len() > usize::from(u8::MAX) {
            return Err(StorageError::PathTooLong);
        }
        let header = SlotHeader {
            path_len: path.len(),
            payload_len: data.len(),
        };
        if header.image_len() > SLOT_IMAGE_SIZE {
            return Err(StorageError::BufferTooSmall);
        }

        let mut image = [0xFFu8; SLOT_IMAGE_SIZE];
        let lookup = self.lookup(path, &mut image)?;
        let slot = match lookup.found {
            Some((slot, _)) => slot,
            None => lookup.first_free.ok_or(StorageError::Full)?,
        };

        image.fill(0xFF);
        image[..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        image[MAGIC_HEADER_SIZE] = path.len() as u8;
        image[MAGIC_HEADER_SIZE + 1..SLOT_HEADER_SIZE]
            .copy_from_slice(&(data.len() as u16).to_le_bytes());
        image[SLOT_HEADER_SIZE..SLOT_HEADER_SIZE + path.len()].copy_from_slice(path.as_bytes());
        image[SLOT_HEADER_SIZE + path.len()..header.image_len()].copy_from_slice(data);

        let addr = self.slot_addr(slot);
        let len = align_up(header.image_len(), F::WRITE_SIZE).min(SLOT_IMAGE_SIZE);
        self.flash
            .erase(addr, addr + Self::slot_stride() as u32)
            .map_err(|_| StorageError::DriverError)?;
        self.flash
            .write(addr, &image[..len])
            .map_err(|_| StorageError::DriverError)
    }
}

const fn align_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}
