//! List the device shells.

use shotframe_model::device;

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:<10} {:<10} {:<9} {:>10} {:>8}",
        "KEY", "NAME", "PLATFORM", "FRAME", "RATIO"
    );
    for d in device::all() {
        println!(
            "{:<10} {:<10} {:<9} {:>10} {:>8.4}",
            d.key,
            d.name,
            format!("{:?}", d.platform).to_lowercase(),
            format!("{}x{}", d.frame_size.w, d.frame_size.h),
            d.screen_ratio
        );
    }
    Ok(())
}
