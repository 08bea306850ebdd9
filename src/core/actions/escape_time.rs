//! Escape-time evaluation of a single pixel.
//!
//! Pure functions only: the same pixel under the same request always yields the
//! same iteration count.

use crate::core::data::complex::Complex;
use crate::core::data::generation_request::GenerationRequest;

/// Squared bail-out radius (|z| > 2).
pub const BAILOUT_RADIUS_SQUARED: f64 = 4.0;

/// Maps pixel `(col, row)` to the parameter plane.
///
/// The area centre sits on `move_offset`; one pixel spans `scale_factor` units.
/// The imaginary axis points up, so the y offset is subtracted.
#[must_use]
pub fn pixel_to_plane(col: u32, row: u32, request: &GenerationRequest) -> Complex {
    let half_width = f64::from(request.area_size.width) / 2.0;
    let half_height = f64::from(request.area_size.height) / 2.0;

    Complex {
        real: (f64::from(col) - half_width) * request.scale_factor + request.move_offset.x,
        imag: (f64::from(row) - half_height) * request.scale_factor - request.move_offset.y,
    }
}

/// Counts iterations of `z = z² + c` until `|z| > 2`, capped at `iteration_max`.
#[must_use]
pub fn escape_time(c: Complex, iteration_max: u32) -> u32 {
    let mut z = Complex::ZERO;

    for iteration in 0..iteration_max {
        if z.magnitude_squared() > BAILOUT_RADIUS_SQUARED {
            return iteration;
        }
        z = z * z + c;
    }

    iteration_max
}

#[inline]
#[must_use]
pub fn evaluate_pixel(col: u32, row: u32, request: &GenerationRequest) -> u32 {
    escape_time(pixel_to_plane(col, row, request), request.iteration_max)
}
