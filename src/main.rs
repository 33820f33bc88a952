use raw_xyz_bridge::RawToXyzPipeline;
use raw_xyz_bridge::logger;

use anyhow::bail;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: raw_xyz_bridge <FILE>...");
    }

    let pipeline = RawToXyzPipeline::new();
    info!("Demosaic: {:?}", pipeline.config().demosaic);

    let mut failed = 0usize;
    for path in &paths {
        let result = pipeline.decode(path);
        match result.image() {
            Some(image) => {
                let meta = image.metadata();
                info!(
                    file = %path,
                    width = image.width(),
                    height = image.height(),
                    stride = image.stride(),
                    "Decoded"
                );
                match meta.baseline_exposure {
                    Some(ev) => info!("BaselineExposure: {:+.2} EV", ev),
                    None => info!("BaselineExposure: none"),
                }
                info!(
                    "White balance: R {:.3} G {:.3} B {:.3}",
                    meta.wb_multipliers[0], meta.wb_multipliers[1], meta.wb_multipliers[2]
                );
                match meta.color_temperature {
                    Some(cct) => info!("Color temperature: {:.0} K", cct),
                    None => info!("Color temperature: unknown"),
                }
            }
            None => {
                failed += 1;
                error!(file = %path, "Decode failed: {}", result.error_message().unwrap_or_default());
            }
        }
        raw_xyz_bridge::release(result);
    }

    if failed > 0 {
        bail!("{} of {} files failed to decode", failed, paths.len());
    }
    Ok(())
}
