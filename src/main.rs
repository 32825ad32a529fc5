use clap::Parser;

use AlvmImager::image_setup::assemble::{
    DEFAULT_BOOT_NAME, DEFAULT_IMAGE_NAME, DEFAULT_KERNEL_NAME, DEFAULT_OUTPUT_DIR, ImageSetup,
    assemble_image,
};
use AlvmImager::image_setup::header::magic_tag_from_str;
use AlvmImager::image_setup::inspect::inspect_image;
use AlvmImager::utils::artifacts::check_if_boot_artifacts_present_in_dir;

#[derive(Debug, Parser)]
#[command(name = "alvm-imager")]
/// Assembles prebuilt boot and kernel binaries into a flat bootable disk image
struct Cli {
    #[command(subcommand)]
    command: ImagerSubcommand,
}

#[derive(Debug, Parser)]
enum ImagerSubcommand {
    #[command(about = "Assemble the boot sector and kernel into a disk image")]
    Assemble(AssembleArgs),
    #[command(about = "Decode and verify the header of an assembled image")]
    Inspect(InspectArgs),
}

#[derive(Debug, Parser)]
struct AssembleArgs {
    #[arg(
        long,
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory holding the input binaries and receiving the image"
    )]
    output_dir: String,
    #[arg(
        long,
        default_value = "0",
        help = "Size in bytes of the zero-padded region before the kernel header (0 means 10 MiB)"
    )]
    pad_size: usize,
    #[arg(long, default_value = "AL", help = "Two ASCII bytes marking the kernel header")]
    magic: String,
    #[arg(long, default_value = DEFAULT_IMAGE_NAME, help = "File name of the assembled image")]
    image: String,
    #[arg(long, default_value = DEFAULT_BOOT_NAME, help = "File name of the boot sector binary")]
    boot: String,
    #[arg(long, default_value = DEFAULT_KERNEL_NAME, help = "File name of the kernel binary")]
    kernel: String,
}

#[derive(Debug, Parser)]
struct InspectArgs {
    #[arg(name = "IMAGE_PATH", help = "Path to an assembled .iso or .img file")]
    image_path: String,
    #[arg(
        long,
        default_value = "0",
        help = "Pad size the image was assembled with (0 means 10 MiB)"
    )]
    pad_size: usize,
}

fn execute_assemble_command(args: &AssembleArgs) -> Result<(), String> {
    let magic_tag = match magic_tag_from_str(&args.magic) {
        Ok(tag) => tag,
        Err(e) => return Err(e)
    };

    let setup = ImageSetup::with_artifact_names(
        &args.output_dir,
        args.pad_size,
        magic_tag,
        &args.image,
        &args.boot,
        &args.kernel,
    );

    if let Err(e) = check_if_boot_artifacts_present_in_dir(
        setup.get_output_dir(),
        setup.get_boot_name(),
        setup.get_kernel_name(),
    ) {
        return Err(e);
    }

    assemble_image(&setup)
}

fn execute_inspect_command(args: &InspectArgs) -> Result<(), String> {
    let report = match inspect_image(&args.image_path, args.pad_size) {
        Ok(report) => report,
        Err(e) => return Err(e)
    };

    println!(
        "{}: {} bytes total, magic {:?}, kernel {} bytes in {} sectors",
        args.image_path,
        report.image_len,
        String::from_utf8_lossy(&report.magic_tag),
        report.kernel_len,
        report.kernel_sectors
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match &cli.command {
        ImagerSubcommand::Assemble(args) => execute_assemble_command(args),
        ImagerSubcommand::Inspect(args) => execute_inspect_command(args),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
