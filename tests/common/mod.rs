#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use wandersync::api::{AuthResponse, PlannerApi};
use wandersync::error::{PlannerError, PlannerResult};
use wandersync::model::*;
use wandersync::planner::PlannerViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Transport,
    Server(u16),
    Decode,
}

impl Failure {
    fn to_error(self) -> PlannerError {
        match self {
            Failure::Transport => PlannerError::Transport("connection refused".into()),
            Failure::Server(status) => PlannerError::Server {
                status,
                message: "Database connection failed".into(),
            },
            Failure::Decode => PlannerError::Decode("expected value at line 1 column 1".into()),
        }
    }
}

/// In-memory backend that records every request it receives.
#[derive(Default)]
pub struct FakeApi {
    pub roster: RefCell<Vec<MemberEntry>>,
    pub cities: RefCell<Vec<String>>,
    pub plan_body: RefCell<Value>,
    pub auth: RefCell<AuthResponse>,
    pub failures: RefCell<HashMap<&'static str, Failure>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, endpoint: &'static str, failure: Failure) {
        self.failures.borrow_mut().insert(endpoint, failure);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failures.borrow_mut().remove(endpoint);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(' ').next() == Some(endpoint))
            .count()
    }

    fn record(&self, endpoint: &'static str, detail: &str) -> PlannerResult<()> {
        let entry = if detail.is_empty() {
            endpoint.to_string()
        } else {
            format!("{} {}", endpoint, detail)
        };
        self.calls.borrow_mut().push(entry);
        match self.failures.borrow().get(endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

impl PlannerApi for FakeApi {
    fn list_members(&self) -> PlannerResult<Vec<MemberEntry>> {
        self.record("list_members", "")?;
        Ok(self.roster.borrow().clone())
    }

    fn add_member(&self, member: &Member) -> PlannerResult<()> {
        self.record("add_member", &member.name)?;
        // Go through JSON the way the real backend would.
        let wire = serde_json::to_value(member)?;
        let stored: MemberEntry = serde_json::from_value(wire)?;
        self.roster.borrow_mut().push(stored);
        Ok(())
    }

    fn delete_member(&self, name: &str) -> PlannerResult<()> {
        self.record("delete_member", name)?;
        self.roster.borrow_mut().retain(|e| e.name() != name);
        Ok(())
    }

    fn list_cities(&self) -> PlannerResult<Vec<String>> {
        self.record("list_cities", "")?;
        Ok(self.cities.borrow().clone())
    }

    fn plan_trip(&self) -> PlannerResult<Value> {
        self.record("plan_trip", "")?;
        Ok(self.plan_body.borrow().clone())
    }

    fn verify_google_token(&self, token: &str) -> PlannerResult<AuthResponse> {
        self.record("verify_google_token", token)?;
        Ok(self.auth.borrow().clone())
    }
}

pub fn planner() -> PlannerViewModel<FakeApi> {
    PlannerViewModel::new(FakeApi::new(), Duration::ZERO)
}

pub fn item(name: &str, budget: f64) -> Value {
    serde_json::json!({ "name": name, "budget": budget, "justification_score": format!("{} fits the group", name) })
}

pub fn user(name: &str) -> SessionUser {
    SessionUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        google_id: format!("g-{}", name.to_lowercase()),
    }
}
