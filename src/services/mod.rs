pub mod download;
pub mod excel;
pub mod pagination;
pub mod row_ingest;
pub mod session;
pub mod summary;
