use std::thread;
use std::time::Duration;

use super::refresh::RefreshCounter;
use crate::api::PlannerApi;
use crate::error::PlannerResult;
use crate::model::itinerary::decode_itinerary;
use crate::model::*;
use crate::validation;

pub struct LoadingListener;
pub type LoadingListenerId = Id<LoadingListener>;

type Listener = Box<dyn FnMut(bool)>;

/// Client-side state for the planner page, kept in sync with the backend.
///
/// Every fetch replaces its collection wholesale. Failed requests are
/// logged and leave the previous state in place; the error is returned
/// for diagnostics only and nothing is retried.
pub struct PlannerViewModel<A: PlannerApi> {
    api: A,
    members: Vec<MemberEntry>,
    itinerary: Vec<ItineraryItem>,
    cities: Vec<String>,
    draft: MemberDraft,
    delete_input: String,
    tally: VoteTally,
    refresh: RefreshCounter,
    fetched_generation: Option<u64>,
    loading: bool,
    loading_delay: Duration,
    loading_listeners: Vec<(LoadingListenerId, Listener)>,
}

impl<A: PlannerApi> PlannerViewModel<A> {
    pub fn new(api: A, loading_delay: Duration) -> Self {
        Self {
            api,
            members: Vec::new(),
            itinerary: Vec::new(),
            cities: Vec::new(),
            draft: MemberDraft::default(),
            delete_input: String::new(),
            tally: VoteTally::new(),
            refresh: RefreshCounter::new(),
            fetched_generation: None,
            loading: false,
            loading_delay,
            loading_listeners: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn members(&self) -> &[MemberEntry] {
        &self.members
    }

    pub fn itinerary(&self) -> &[ItineraryItem] {
        &self.itinerary
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    pub fn delete_input(&self) -> &str {
        &self.delete_input
    }

    pub fn set_delete_input(&mut self, value: &str) {
        self.delete_input = value.to_string();
    }

    pub fn tally(&self) -> &VoteTally {
        &self.tally
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh.value()
    }

    // ----------------------------------------------------------------
    // Members
    // ----------------------------------------------------------------

    /// Fetch the full roster and replace the local copy.
    pub fn load_members(&mut self) -> PlannerResult<()> {
        self.fetched_generation = Some(self.refresh.value());
        match self.api.list_members() {
            Ok(members) => {
                tracing::info!(count = members.len(), "members loaded");
                self.members = members;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load members, keeping previous list");
                Err(e)
            }
        }
    }

    /// Re-fetch the roster if the refresh counter moved since the last
    /// fetch (or nothing was fetched yet).
    pub fn refresh_if_stale(&mut self) -> PlannerResult<()> {
        if self.fetched_generation == Some(self.refresh.value()) {
            return Ok(());
        }
        self.load_members()
    }

    /// Apply one form edit to the draft.
    pub fn edit_field(&mut self, field: &str, value: &str) -> PlannerResult<FieldTarget> {
        self.draft.edit_field(field, value).map_err(|e| {
            tracing::warn!(field, error = %e, "rejected form edit");
            e
        })
    }

    /// Submit the draft as a new member. The draft is only reset once the
    /// backend accepted it.
    pub fn add_member(&mut self) -> PlannerResult<()> {
        let member = self.draft.to_member().map_err(|e| {
            tracing::warn!(error = %e, "draft is not a valid member");
            e
        })?;

        if let Err(e) = self.api.add_member(&member) {
            tracing::warn!(name = %member.name, error = %e, "failed to add member");
            return Err(e);
        }

        tracing::info!(name = %member.name, "member added");
        self.draft.reset();
        self.refresh.bump();
        // A failed reload is already logged; the add itself succeeded.
        let _ = self.refresh_if_stale();
        Ok(())
    }

    /// Delete a member by name. Blank names are ignored without a request.
    pub fn delete_member(&mut self, name: &str) -> PlannerResult<()> {
        let Ok(name) = validation::non_blank(name, "name") else {
            tracing::debug!("ignoring delete with blank name");
            return Ok(());
        };
        let name = name.as_str();

        if let Err(e) = self.api.delete_member(name) {
            tracing::warn!(name, error = %e, "failed to delete member");
            return Err(e);
        }

        tracing::info!(name, "member deleted");
        self.delete_input.clear();
        self.refresh.bump();
        let _ = self.refresh_if_stale();
        Ok(())
    }

    /// Delete whoever is named in the delete input.
    pub fn delete_pending(&mut self) -> PlannerResult<()> {
        let name = self.delete_input.clone();
        self.delete_member(&name)
    }

    // ----------------------------------------------------------------
    // Trip
    // ----------------------------------------------------------------

    /// Fetch candidate destinations.
    pub fn load_cities(&mut self) -> PlannerResult<()> {
        match self.api.list_cities() {
            Ok(cities) => {
                tracing::info!(count = cities.len(), "cities loaded");
                self.cities = cities;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cities, keeping previous list");
                Err(e)
            }
        }
    }

    /// Ask the backend for an itinerary. The loading flag stays up for the
    /// configured delay after the request settles, success or not.
    pub fn plan_trip(&mut self) -> PlannerResult<()> {
        self.set_loading(true);

        let outcome = match self.api.plan_trip().and_then(decode_itinerary) {
            Ok(items) => {
                tracing::info!(count = items.len(), "itinerary received");
                self.itinerary = items;
                self.tally.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to plan trip, keeping previous itinerary");
                Err(e)
            }
        };

        if !self.loading_delay.is_zero() {
            thread::sleep(self.loading_delay);
        }
        self.set_loading(false);
        outcome
    }

    /// Add one local vote for an itinerary item.
    pub fn vote(&mut self, item_name: &str) -> u32 {
        self.tally.vote(item_name)
    }

    /// The most-voted item, or `None` if there is no itinerary.
    pub fn finalize(&self) -> Option<&ItineraryItem> {
        let chosen = self.tally.finalize(&self.itinerary)?;
        tracing::info!(name = %chosen.name, votes = self.tally.count(&chosen.name), "trip finalized");
        Some(chosen)
    }

    // ----------------------------------------------------------------
    // Loading indicator
    // ----------------------------------------------------------------

    pub fn subscribe_loading<F>(&mut self, listener: F) -> LoadingListenerId
    where
        F: FnMut(bool) + 'static,
    {
        let id = LoadingListenerId::generate();
        self.loading_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe_loading(&mut self, id: LoadingListenerId) -> bool {
        let before = self.loading_listeners.len();
        self.loading_listeners.retain(|(lid, _)| *lid != id);
        self.loading_listeners.len() != before
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        for (_, listener) in self.loading_listeners.iter_mut() {
            listener(loading);
        }
    }
}
