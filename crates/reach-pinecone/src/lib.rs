mod vector_store;

pub use vector_store::{PineconeConfig, PineconeVectorStore};
