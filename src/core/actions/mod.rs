pub mod cancellation;
pub mod compute_row;
pub mod escape_time;
