use std::fs::{read, read_dir};
use std::path::Path;

/// Reads a prebuilt binary artifact fully into memory.
///
/// A missing file is reported as its own error so callers can tell a missing
/// build input apart from an I/O failure.
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, String> {
    if !path.exists() {
        return Err(format!("artifact file {} not found", path.display()));
    }
    match read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => Err(format!("{:?}", e))
    }
}

/// Checks whether both boot and kernel binaries are present in the given directory.
pub fn check_if_boot_artifacts_present_in_dir(
    dir: &str,
    boot_name: &str,
    kernel_name: &str,
) -> Result<(), String> {
    let entries = match read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => return Err(format!("{:?}", e))
    };

    let mut boot_found = false;
    let mut kernel_found = false;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Err(format!("{:?}", e))
        };
        let filename = entry.file_name().to_string_lossy().into_owned();
        if filename == boot_name {
            boot_found = true;
        } else if filename == kernel_name {
            kernel_found = true;
        }
    }

    if !boot_found {
        return Err(format!("{} not found in {}", boot_name, dir));
    }
    if !kernel_found {
        return Err(format!("{} not found in {}", kernel_name, dir));
    }
    Ok(())
}
