pub mod store;

pub use store::{SessionStore, SubscriptionId, SESSION_KEY};
