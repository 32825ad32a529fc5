//! Flat disk image assembly: zero padding, boot sector overlay, kernel header
//! and kernel payload, written in one linear pass.

use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::image_setup::header::{HEADER_LEN, ImageHeader};
use crate::utils::artifacts::read_artifact;

/// Size of the zero-padded region ahead of the kernel header: 10 MiB.
pub const DEFAULT_PAD_SIZE: usize = 10 * 1024 * 1024;

pub const DEFAULT_OUTPUT_DIR: &str = ".out";
pub const DEFAULT_IMAGE_NAME: &str = "alvm.iso";
pub const DEFAULT_BOOT_NAME: &str = "boot.bin";
pub const DEFAULT_KERNEL_NAME: &str = "kernel.bin";

/// Configuration for one image assembly run.
pub struct ImageSetup {
    /// Directory holding the input binaries and receiving the image.
    output_dir: String,
    /// Size in bytes of the zero-padded region before the kernel header.
    pad_size: usize,
    /// Two ASCII marker bytes written ahead of the kernel.
    magic_tag: [u8; 2],
    image_name: String,
    boot_name: String,
    kernel_name: String,
}

impl ImageSetup {
    /// Create a new `ImageSetup` with the default artifact file names.
    ///
    /// # Arguments
    /// * `output_dir` - Directory with the prebuilt binaries.
    /// * `pad_size` - Padded region size in bytes (defaults to 10 MiB if 0).
    /// * `magic_tag` - Two ASCII marker bytes.
    pub fn new(output_dir: &str, pad_size: usize, magic_tag: [u8; 2]) -> ImageSetup {
        ImageSetup::with_artifact_names(
            output_dir,
            pad_size,
            magic_tag,
            DEFAULT_IMAGE_NAME,
            DEFAULT_BOOT_NAME,
            DEFAULT_KERNEL_NAME,
        )
    }

    /// Create an `ImageSetup` with explicit artifact file names.
    pub fn with_artifact_names(
        output_dir: &str,
        pad_size: usize,
        magic_tag: [u8; 2],
        image_name: &str,
        boot_name: &str,
        kernel_name: &str,
    ) -> ImageSetup {
        let pad_size_to_set = if pad_size == 0 { DEFAULT_PAD_SIZE } else { pad_size };
        ImageSetup {
            output_dir: output_dir.to_string(),
            pad_size: pad_size_to_set,
            magic_tag,
            image_name: image_name.to_string(),
            boot_name: boot_name.to_string(),
            kernel_name: kernel_name.to_string(),
        }
    }

    /// Get the configured output directory.
    pub fn get_output_dir(&self) -> &str {
        &self.output_dir
    }

    /// Get the configured pad size in bytes.
    pub fn get_pad_size(&self) -> usize {
        self.pad_size
    }

    /// Get the configured magic tag bytes.
    pub fn get_magic_tag(&self) -> [u8; 2] {
        self.magic_tag
    }

    /// Full path of the assembled image.
    pub fn image_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.image_name)
    }

    /// Full path of the boot sector binary.
    pub fn boot_bin_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.boot_name)
    }

    /// Full path of the kernel binary.
    pub fn kernel_bin_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.kernel_name)
    }

    pub fn get_boot_name(&self) -> &str {
        &self.boot_name
    }

    pub fn get_kernel_name(&self) -> &str {
        &self.kernel_name
    }
}

/// Assemble the disk image described by `setup`.
///
/// Layout of the output file:
/// * bytes `[0, len(boot))` - boot sector binary
/// * bytes `[len(boot), pad_size)` - zero padding
/// * bytes `[pad_size, pad_size + 4)` - magic tag + little-endian kernel sector count
/// * bytes from `pad_size + 4` - kernel binary
///
/// The image always ends right after the kernel: a boot binary longer than
/// the padded region has its tail overwritten by the header and kernel and
/// truncated beyond the kernel end.
///
/// The image is staged in a temporary file inside the output directory and
/// only moved to its final path once every write succeeded, so a failed run
/// never leaves a finalized image behind.
///
/// # Returns
/// * `Ok(())` once the image is persisted at `setup.image_path()`.
/// * `Err(String)` on a missing input, oversized kernel or I/O failure.
pub fn assemble_image(setup: &ImageSetup) -> Result<(), String> {
    let boot_bytes = match read_artifact(&setup.boot_bin_path()) {
        Ok(bytes) => bytes,
        Err(e) => return Err(e)
    };
    let kernel_bytes = match read_artifact(&setup.kernel_bin_path()) {
        Ok(bytes) => bytes,
        Err(e) => return Err(e)
    };

    let header = match ImageHeader::new(setup.get_magic_tag(), kernel_bytes.len()) {
        Ok(header) => header,
        Err(e) => return Err(e)
    };

    log::info!(
        "assembling image: boot {} bytes, kernel {} bytes ({} sectors), pad {} bytes",
        boot_bytes.len(),
        kernel_bytes.len(),
        header.get_kernel_sectors(),
        setup.get_pad_size()
    );

    // Stage the image next to its final location so persist stays on one filesystem
    let mut staged = match NamedTempFile::new_in(setup.get_output_dir()) {
        Ok(file) => file,
        Err(e) => return Err(format!("{:?}", e))
    };
    let output = staged.as_file_mut();

    // Zero-fill the padded region
    if let Err(e) = output.write_all(&vec![0x00; setup.get_pad_size()]) {
        return Err(format!("{:?}", e));
    }

    // Overlay the boot sector at the start of the image
    if let Err(e) = output.seek(SeekFrom::Start(0)) {
        return Err(format!("{:?}", e));
    }
    if let Err(e) = output.write_all(&boot_bytes) {
        return Err(format!("{:?}", e));
    }

    // Header and kernel go right after the padded region
    if let Err(e) = output.seek(SeekFrom::Start(setup.get_pad_size() as u64)) {
        return Err(format!("{:?}", e));
    }
    if let Err(e) = output.write_all(&header.to_bytes()) {
        return Err(format!("{:?}", e));
    }
    if let Err(e) = output.write_all(&kernel_bytes) {
        return Err(format!("{:?}", e));
    }

    // A boot binary longer than the padded region extended the file past the
    // kernel end; the image always ends where the kernel does
    let image_len = (setup.get_pad_size() + HEADER_LEN + kernel_bytes.len()) as u64;
    if let Err(e) = output.set_len(image_len) {
        return Err(format!("{:?}", e));
    }
    if let Err(e) = output.flush() {
        return Err(format!("{:?}", e));
    }

    let image_path = setup.image_path();
    if let Err(e) = staged.persist(&image_path) {
        return Err(format!("{:?}", e));
    }

    log::info!("image written to {}", image_path.display());
    Ok(())
}
