use std::io::{self, Write};
use std::path::Path;

use crate::core::data::area_size::AreaSize;

/// Writes row-major iteration counts as a binary greyscale PGM.
///
/// Points that never escaped (`iteration_max`) are black; everything else is
/// shaded linearly by iteration count.
pub fn write_pgm(
    area_size: AreaSize,
    iteration_counts: &[u32],
    iteration_max: u32,
    filepath: impl AsRef<Path>,
) -> io::Result<()> {
    if iteration_counts.len() as u64 != area_size.pixel_count() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "expected {} iteration counts for {}x{}, got {}",
                area_size.pixel_count(),
                area_size.width,
                area_size.height,
                iteration_counts.len()
            ),
        ));
    }

    let mut file = io::BufWriter::new(std::fs::File::create(filepath)?);

    // P5: binary greyscale, then width height max_value
    writeln!(file, "P5")?;
    writeln!(file, "{} {}", area_size.width, area_size.height)?;
    writeln!(file, "255")?;

    let pixels: Vec<u8> = iteration_counts
        .iter()
        .map(|&count| shade(count, iteration_max))
        .collect();
    file.write_all(&pixels)?;
    file.flush()
}

fn shade(count: u32, iteration_max: u32) -> u8 {
    if iteration_max == 0 || count >= iteration_max {
        return 0;
    }
    (u64::from(count) * 255 / u64::from(iteration_max)) as u8
}
