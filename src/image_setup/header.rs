/// Size of one disk sector in bytes; the kernel's length is expressed in
/// sectors of this size in the image header.
pub const SECTOR_SIZE: usize = 512;

/// Total length of the on-disk header: 2 magic bytes + 2-byte sector count.
pub const HEADER_LEN: usize = 4;

/// Magic tag written ahead of the kernel so the boot sector can recognize it.
pub const DEFAULT_MAGIC_TAG: [u8; 2] = *b"AL";

/// The 4-byte header placed between the zero-padded region and the kernel.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct ImageHeader {
    /// Two ASCII marker bytes identifying the header format.
    magic_tag: [u8; 2],
    /// Kernel length in 512-byte sectors, rounded up.
    kernel_sectors: u16,
}

/// Computes the kernel's size in 512-byte sectors, rounded up.
///
/// Fails when the sector count does not fit the header's 2-byte field
/// instead of silently truncating it.
pub fn kernel_sectors_for_len(kernel_len: usize) -> Result<u16, String> {
    let sectors = kernel_len.div_ceil(SECTOR_SIZE);
    if sectors > u16::MAX as usize {
        return Err(format!(
            "kernel of {} bytes needs {} sectors, which does not fit the header's 16-bit sector count",
            kernel_len, sectors
        ));
    }
    Ok(sectors as u16)
}

/// Parses a magic tag from its command-line form: exactly two ASCII characters.
pub fn magic_tag_from_str(tag: &str) -> Result<[u8; 2], String> {
    let bytes = tag.as_bytes();
    if bytes.len() != 2 || !tag.is_ascii() {
        return Err(format!("magic tag must be exactly 2 ASCII characters, got {:?}", tag));
    }
    Ok([bytes[0], bytes[1]])
}

impl ImageHeader {
    /// Create a header for a kernel of the given byte length.
    ///
    /// # Arguments
    /// * `magic_tag` - Two ASCII marker bytes.
    /// * `kernel_len` - Kernel image length in bytes.
    pub fn new(magic_tag: [u8; 2], kernel_len: usize) -> Result<ImageHeader, String> {
        let kernel_sectors = match kernel_sectors_for_len(kernel_len) {
            Ok(s) => s,
            Err(e) => return Err(e)
        };
        Ok(ImageHeader { magic_tag, kernel_sectors })
    }

    /// Get the two magic marker bytes.
    pub fn get_magic_tag(&self) -> [u8; 2] {
        self.magic_tag
    }

    /// Get the kernel sector count stored in the header.
    pub fn get_kernel_sectors(&self) -> u16 {
        self.kernel_sectors
    }

    /// Encode to the on-disk form: magic bytes followed by the sector count
    /// as a little-endian unsigned 16-bit integer.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let count = self.kernel_sectors.to_le_bytes();
        [self.magic_tag[0], self.magic_tag[1], count[0], count[1]]
    }

    /// Decode a header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<ImageHeader, String> {
        if bytes.len() < HEADER_LEN {
            return Err(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            ));
        }
        Ok(ImageHeader {
            magic_tag: [bytes[0], bytes[1]],
            kernel_sectors: u16::from_le_bytes([bytes[2], bytes[3]]),
        })
    }
}
