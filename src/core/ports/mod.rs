pub mod row_result_sink;
pub mod worker_pool;
