use std::fs::File;
use memmap2::{Mmap, MmapOptions};

use crate::image_setup::assemble::DEFAULT_PAD_SIZE;
use crate::image_setup::header::{HEADER_LEN, ImageHeader, SECTOR_SIZE, kernel_sectors_for_len};

/// What an assembled image's header claims, cross-checked against its length.
#[derive(Debug)]
pub struct ImageReport {
    /// Marker bytes found at the header offset.
    pub magic_tag: [u8; 2],
    /// Sector count stored in the header.
    pub kernel_sectors: u16,
    /// Kernel payload length in bytes.
    pub kernel_len: usize,
    /// Total image length in bytes.
    pub image_len: usize,
}

pub fn map_assembled_image(path: &str) -> Result<Mmap, String> {
    // Only assembled image files are mapped
    if !path.ends_with(".iso") && !path.ends_with(".img") {
        return Err(format!("passed path is not path to .iso or .img file"));
    }
    let file = match File::options().read(true).open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("{:?}", e))
    };

    // Map read-only; inspection never mutates the image
    match unsafe { MmapOptions::new().map(&file) } {
        Ok(mmap) => Ok(mmap),
        Err(e) => Err(format!("{:?}", e))
    }
}

/// Decode and verify the header of an assembled image.
///
/// Checks that the image is long enough to carry a header at `pad_size`, then
/// that the header's sector count matches the kernel payload that actually
/// follows it. `pad_size` of 0 means the 10 MiB default.
pub fn inspect_image(path: &str, pad_size: usize) -> Result<ImageReport, String> {
    let pad_size = if pad_size == 0 { DEFAULT_PAD_SIZE } else { pad_size };

    let mmap = match map_assembled_image(path) {
        Ok(mmap) => mmap,
        Err(e) => return Err(e)
    };

    if mmap.len() < pad_size + HEADER_LEN {
        return Err(format!(
            "image is {} bytes, too short for a header at offset {}",
            mmap.len(),
            pad_size
        ));
    }

    let header = match ImageHeader::from_bytes(&mmap[pad_size..pad_size + HEADER_LEN]) {
        Ok(header) => header,
        Err(e) => return Err(e)
    };

    let kernel_len = mmap.len() - pad_size - HEADER_LEN;
    let expected_sectors = match kernel_sectors_for_len(kernel_len) {
        Ok(sectors) => sectors,
        Err(e) => return Err(e)
    };
    if header.get_kernel_sectors() != expected_sectors {
        return Err(format!(
            "header claims {} sectors but {} bytes of kernel payload need {}",
            header.get_kernel_sectors(),
            kernel_len,
            expected_sectors
        ));
    }

    log::debug!(
        "inspected {}: {} kernel bytes in {} sectors of {}",
        path,
        kernel_len,
        header.get_kernel_sectors(),
        SECTOR_SIZE
    );

    Ok(ImageReport {
        magic_tag: header.get_magic_tag(),
        kernel_sectors: header.get_kernel_sectors(),
        kernel_len,
        image_len: mmap.len(),
    })
}
