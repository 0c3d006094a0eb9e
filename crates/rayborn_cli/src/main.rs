use anyhow::Result;
use clap::Parser;
use rayborn_renderer::{load_world, render, BvhNode, Camera, Hittable, HittableList, RenderConfig};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Rayborn");

    let (mut camera, world) = match load_world(&args.scene) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load scene {}: {}", args.scene.display(), e);
            log::warn!("Rendering an empty scene");
            (Camera::default(), HittableList::new())
        }
    };

    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }

    let config = RenderConfig {
        use_parallel: !args.no_mt,
        threads: args.threads,
        seed: args.seed,
    };

    let image = if args.no_bvh {
        log::info!("BVH disabled, testing {} objects linearly", world.len());
        render(&mut camera, &world, &config)
    } else {
        let bvh = BvhNode::from_list(&world);
        log::info!(
            "Built BVH over {} objects (depth {})",
            world.len(),
            bvh.depth()
        );
        log::debug!("Scene bounds: {:?}", bvh.bounding_box());
        render(&mut camera, &bvh, &config)
    };

    let output = args.output_path();
    if let Err(e) = image.save_png(&output) {
        log::error!("Failed to save {}: {}", output.display(), e);
    }

    Ok(())
}
