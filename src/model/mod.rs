pub mod ids;
pub mod member;
pub mod draft;
pub mod itinerary;
pub mod vote;
pub mod session;

// Re-exports for convenience
pub use ids::Id;
pub use member::{Constraints, Member, MemberEntry, PreferenceWeights};
pub use draft::{FieldTarget, MemberDraft};
pub use itinerary::ItineraryItem;
pub use vote::VoteTally;
pub use session::{Session, SessionUser};
