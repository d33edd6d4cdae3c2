pub mod schema;
pub mod local_storage;

pub use local_storage::LocalStorage;
