use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlannerResult;
use crate::model::{Member, MemberEntry, SessionUser};

pub const MEMBERS_PATH: &str = "/getusers";
pub const ADD_MEMBER_PATH: &str = "/adduser";
pub const DELETE_MEMBER_PATH: &str = "/deluser";
pub const CITIES_PATH: &str = "/getcities";
pub const PLAN_TRIP_PATH: &str = "/planmytrip";
pub const GOOGLE_AUTH_PATH: &str = "/api/auth/google";

/// Body of `POST /api/auth/google`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The remote planning backend.
///
/// Every method is one request. Transport problems, non-2xx statuses and
/// unexpected bodies come back as `Transport`, `Server` and `Decode`
/// errors respectively.
pub trait PlannerApi {
    fn list_members(&self) -> PlannerResult<Vec<MemberEntry>>;

    /// Any 2xx response counts as created; the body is ignored.
    fn add_member(&self, member: &Member) -> PlannerResult<()>;

    fn delete_member(&self, name: &str) -> PlannerResult<()>;

    fn list_cities(&self) -> PlannerResult<Vec<String>>;

    /// Raw planning body. It may be the itinerary array or a JSON string
    /// encoding it; see `model::itinerary::decode_itinerary`.
    fn plan_trip(&self) -> PlannerResult<Value>;

    fn verify_google_token(&self, token: &str) -> PlannerResult<AuthResponse>;
}
