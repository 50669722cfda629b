/// Maximum length of a dataset id, in bytes.
pub const MAX_DATASET_ID_LENGTH: usize = 256;

/// The only dataset type the server knows how to create.
pub const SPARSE_MUTABLE_DATASET_TYPE: &str = "sparse.mutable";

/// Maximum length of a SQL statement accepted by the query route, in bytes.
pub const MAX_QUERY_LENGTH: usize = 64 * 1024;
