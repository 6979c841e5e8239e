pub mod embedding_port;
pub mod example_index;
