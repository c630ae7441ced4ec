use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use zraster::prelude::*;

#[derive(Parser)]
#[command(about = "Render the reference scenes into character grids")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 150)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// Also save the first frame to <SAVE>.dat
    #[arg(long)]
    save: Option<String>,

    /// Save the depth buffer of the last scene as a grayscale image
    #[arg(long)]
    depth_image: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let projection = Projection::new(-1.0, 1.0, -1.0, 1.0, 1.0, 2.0)?;

    // A quad split along its diagonal, sharing two of its four vertices.
    let quad = Scene::from_raw(
        [
            [1.0, -1.0, 1.5],
            [1.0, 1.0, 1.1],
            [-1.0, 1.0, 1.5],
            [-1.0, -1.0, 1.9],
        ],
        [[0, 1, 2], [0, 2, 3]],
    );
    // Two triangles crossing each other in depth.
    let crossing = Scene::from_raw(
        [
            [0.0, -1.0, 1.5],
            [1.0, 1.0, 1.5],
            [-1.0, 1.0, 1.5],
            [-0.75, -1.0, 1.9],
            [1.5, 0.75, 1.9],
            [0.0, 1.0, 1.1],
        ],
        [[0, 1, 2], [3, 4, 5]],
    );

    let mut chars = Pipeline::<char>::new(args.width, args.height, projection, DepthBandShader)?;
    let mut ints = Pipeline::<i32>::new(args.width, args.height, projection, DepthBandShader)?;

    chars.render(&quad).context("rendering the quad")?;
    print!("{}", chars.frame_buffer());
    if let Some(stem) = &args.save {
        chars.frame_buffer().save_framed(stem)?;
    }
    chars.clear();

    ints.render(&quad).context("rendering the quad")?;
    print!("{}", ints.frame_buffer());

    chars.render(&crossing).context("rendering the crossing triangles")?;
    print!("{}", chars.frame_buffer());

    chars.set_shader(FlatShader::new('x')).clear();
    chars.render(&crossing).context("rendering the flat silhouette")?;
    print!("{}", chars.frame_buffer());

    if let Some(path) = &args.depth_image {
        chars.depth_buffer().save_image(path)?;
    }

    let stats = chars.last_stats();
    info!(
        "last pass: {} triangles, {} pixels written",
        stats.triangles, stats.pixels_written
    );
    Ok(())
}
