use AlvmImager::image_setup::assemble::{ImageSetup, assemble_image};
use AlvmImager::image_setup::header::DEFAULT_MAGIC_TAG;
use AlvmImager::image_setup::inspect::{inspect_image, map_assembled_image};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

const TEST_PAD: usize = 4096;

fn assemble_test_image(dir: &TempDir, boot: &[u8], kernel: &[u8]) -> String {
    let mut boot_file = File::create(dir.path().join("boot.bin")).unwrap();
    boot_file.write_all(boot).unwrap();
    let mut kernel_file = File::create(dir.path().join("kernel.bin")).unwrap();
    kernel_file.write_all(kernel).unwrap();

    let output_dir = dir.path().to_string_lossy().into_owned();
    let setup = ImageSetup::new(&output_dir, TEST_PAD, DEFAULT_MAGIC_TAG);
    assemble_image(&setup).unwrap();
    setup.image_path().to_string_lossy().into_owned()
}

#[test]
fn test_inspect_roundtrip_after_assemble() {
    let temp_dir = TempDir::new().unwrap();
    let image_path = assemble_test_image(&temp_dir, &[0x55, 0xAA], &[0xFF; 1337]);

    let report = inspect_image(&image_path, TEST_PAD).unwrap();
    assert_eq!(report.magic_tag, *b"AL");
    assert_eq!(report.kernel_len, 1337);
    assert_eq!(report.kernel_sectors, 3);
}

#[test]
fn test_inspect_empty_kernel_image() {
    let temp_dir = TempDir::new().unwrap();
    let image_path = assemble_test_image(&temp_dir, &[0x55], &[]);

    let report = inspect_image(&image_path, TEST_PAD).unwrap();
    assert_eq!(report.kernel_len, 0);
    assert_eq!(report.kernel_sectors, 0);
}

#[test]
fn test_inspect_rejects_wrong_extension() {
    let result = inspect_image("image.txt", TEST_PAD);
    assert!(result.is_err());
}

#[test]
fn test_inspect_missing_image() {
    let result = inspect_image("definitely_missing.iso", TEST_PAD);
    assert!(result.is_err());
}

#[test]
fn test_map_assembled_image_exposes_raw_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let image_path = assemble_test_image(&temp_dir, &[0xEB, 0xFE], &[0x11; 10]);

    let mmap = map_assembled_image(&image_path).unwrap();
    assert_eq!(mmap[0], 0xEB);
    assert_eq!(mmap[1], 0xFE);
    assert_eq!(&mmap[TEST_PAD..TEST_PAD + 2], b"AL");
}
