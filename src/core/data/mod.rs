pub mod area_size;
pub mod complex;
pub mod generation_request;
pub mod move_offset;
pub mod row_result;
