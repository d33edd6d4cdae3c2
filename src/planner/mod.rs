pub mod refresh;
pub mod view_model;

pub use refresh::RefreshCounter;
pub use view_model::{LoadingListenerId, PlannerViewModel};
