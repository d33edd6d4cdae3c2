use crate::api::PlannerApi;
use crate::db::LocalStorage;
use crate::error::{PlannerError, PlannerResult};
use crate::model::{Id, Session};

/// Durable storage key holding the serialized session.
pub const SESSION_KEY: &str = "user";

pub struct SessionSubscription;
pub type SubscriptionId = Id<SessionSubscription>;

type Listener = Box<dyn FnMut(Option<&Session>)>;

/// Holds the signed-in user, mirrored into durable storage so it
/// survives a restart. Subscribers hear about every change.
pub struct SessionStore {
    storage: LocalStorage,
    current: Option<Session>,
    login_enabled: bool,
    subscribers: Vec<(SubscriptionId, Listener)>,
}

impl SessionStore {
    pub fn new(storage: LocalStorage, login_enabled: bool) -> Self {
        Self {
            storage,
            current: None,
            login_enabled,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn login_enabled(&self) -> bool {
        self.login_enabled
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(Option<&Session>) + 'static,
    {
        let id = SubscriptionId::generate();
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Adopt a previously stored session without re-verifying it.
    /// An unreadable entry is deleted and treated as signed out.
    pub fn restore(&mut self) -> PlannerResult<Option<&Session>> {
        let Some(raw) = self.storage.get_item(SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                tracing::info!(name = %session.user.name, "restored session");
                self.current = Some(session);
                self.notify();
                Ok(self.current.as_ref())
            }
            Err(e) => {
                tracing::debug!(error = %e, "discarding unreadable stored session");
                self.storage.remove_item(SESSION_KEY)?;
                Ok(None)
            }
        }
    }

    /// Exchange an identity-provider credential for a session. On any
    /// failure the existing session, if any, is left as it was.
    pub fn sign_in<A>(&mut self, api: &A, credential: Option<&str>) -> PlannerResult<&Session>
    where
        A: PlannerApi + ?Sized,
    {
        if !self.login_enabled {
            return Err(PlannerError::LoginDisabled);
        }

        let session = match verify(api, credential) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                return Err(e);
            }
        };

        self.storage
            .set_item(SESSION_KEY, &serde_json::to_string(&session)?)?;
        tracing::info!(
            name = %session.user.name,
            google_id = %session.user.google_id,
            "signed in"
        );
        self.current = Some(session);
        self.notify();
        self.current
            .as_ref()
            .ok_or_else(|| PlannerError::AuthFailed("session was not stored".into()))
    }

    pub fn sign_out(&mut self) -> PlannerResult<()> {
        self.storage.remove_item(SESSION_KEY)?;
        if self.current.take().is_some() {
            tracing::info!("signed out");
        }
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        let current = self.current.as_ref();
        for (_, listener) in self.subscribers.iter_mut() {
            listener(current);
        }
    }
}

fn verify<A>(api: &A, credential: Option<&str>) -> PlannerResult<Session>
where
    A: PlannerApi + ?Sized,
{
    let token = credential
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| PlannerError::AuthFailed("No credential received from Google".into()))?;

    let response = api.verify_google_token(token).map_err(|e| match e {
        PlannerError::Server { message, .. } => PlannerError::AuthFailed(message),
        PlannerError::Transport(msg) => {
            PlannerError::AuthFailed(format!("Cannot connect to backend: {}", msg))
        }
        other => PlannerError::AuthFailed(other.to_string()),
    })?;

    if !response.success {
        return Err(PlannerError::AuthFailed(
            response
                .error
                .unwrap_or_else(|| "Authentication failed".into()),
        ));
    }

    let user = response
        .user
        .ok_or_else(|| PlannerError::AuthFailed("response did not include a user".into()))?;
    Ok(Session::new(user, Some(token.to_string())))
}
