pub mod cell;
pub mod cell_value;
pub mod dataset_config;
pub mod row_record;

pub use cell::Cell;
pub use cell_value::CellValue;
pub use dataset_config::{DatasetConfig, DatasetStatus};
pub use row_record::RowRecord;
