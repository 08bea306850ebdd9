use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, bail};
use fractal_dispatch::{
    AreaSize, Batch, Dispatcher, DispatcherConfig, GenerationRequest, MoveOffset,
    RayonWorkerPool, write_pgm,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let request = GenerationRequest::new(
        AreaSize::new(800, 600),
        MoveOffset::new(-0.75, 0.0),
        0.004,
        256,
    );

    let (tx, rx) = mpsc::channel::<Batch>();
    let pool = RayonWorkerPool::new(None)?;
    let dispatcher = Dispatcher::new(pool, tx, DispatcherConfig::default())?;

    let Some(generation) = dispatcher.submit_generation(request) else {
        bail!("request covers no pixels");
    };

    let width = request.area_size.width as usize;
    let mut counts = vec![0u32; request.area_size.pixel_count() as usize];

    loop {
        let batch = rx
            .recv_timeout(Duration::from_secs(60))
            .context("timed out waiting for rows")?;

        for row in &batch.rows {
            let start = row.row_index as usize * width;
            counts[start..start + width].copy_from_slice(&row.iteration_counts);
        }

        if let Some(elapsed) = batch.elapsed {
            println!(
                "Generation {generation}: {}x{} in {:?}",
                request.area_size.width, request.area_size.height, elapsed
            );
            break;
        }
    }

    std::fs::create_dir_all("output")?;
    write_pgm(request.area_size, &counts, request.iteration_max, "output/mandelbrot.pgm")?;

    Ok(())
}
