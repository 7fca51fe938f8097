mod descriptor_store;
mod model_fetcher;

pub use descriptor_store::{DescriptorStore, JsonFileStore, MemoryStore};
pub use model_fetcher::ModelFetcher;
