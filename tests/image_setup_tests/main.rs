use AlvmImager::image_setup::assemble::{DEFAULT_PAD_SIZE, ImageSetup};
use AlvmImager::image_setup::header::DEFAULT_MAGIC_TAG;

mod inspect_tests;

const TEST_PAD: usize = 4096;
const ZERO_PAD: usize = 0;

#[test]
fn test_imagesetup_new_with_explicit_pad() {
    let setup = ImageSetup::new(".out", TEST_PAD, DEFAULT_MAGIC_TAG);
    assert_eq!(setup.get_pad_size(), TEST_PAD);
    assert_eq!(setup.get_output_dir(), ".out");
    assert_eq!(setup.get_magic_tag(), *b"AL");
}

#[test]
fn test_imagesetup_new_with_zero_pad_sets_default() {
    let setup = ImageSetup::new(".out", ZERO_PAD, DEFAULT_MAGIC_TAG);
    assert_eq!(setup.get_pad_size(), DEFAULT_PAD_SIZE);
    assert_eq!(setup.get_pad_size(), 10 * 1024 * 1024);
}

#[test]
fn test_imagesetup_artifact_names_default() {
    let setup = ImageSetup::new(".out", TEST_PAD, DEFAULT_MAGIC_TAG);
    assert_eq!(setup.get_boot_name(), "boot.bin");
    assert_eq!(setup.get_kernel_name(), "kernel.bin");
    assert!(setup.image_path().ends_with("alvm.iso"));
}

#[test]
fn test_imagesetup_with_artifact_names_overrides() {
    let setup = ImageSetup::with_artifact_names(
        "build",
        TEST_PAD,
        *b"ZZ",
        "disk.img",
        "mbr.bin",
        "core.bin",
    );
    assert_eq!(setup.get_magic_tag(), *b"ZZ");
    assert_eq!(setup.get_boot_name(), "mbr.bin");
    assert_eq!(setup.get_kernel_name(), "core.bin");
    assert!(setup.image_path().ends_with("disk.img"));
}
