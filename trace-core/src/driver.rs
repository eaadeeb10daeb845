//! Async glue between the reducers and the backend.
//!
//! Each driver validates synchronously, awaits exactly one backend operation
//! and applies the settlement. State is reached through [`StateHandle`] so the
//! same code runs against Dioxus signals and plain `Rc<RefCell<_>>` in tests.
//! No borrow is held across an await.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::api::{LoginRequest, TraceApi};
use crate::board::TraceBoard;
use crate::credential::CredentialStore;
use crate::error::{ApiError, TraceError};
use crate::history::{HistoryScope, HistoryStore};
use crate::section::{EndpointRole, SectionId, TraceForm};
use crate::session::{AuthUser, Session};
use crate::status::TraceStatus;

/// Shared, single-threaded mutable access to one piece of app state.
pub trait StateHandle<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with_mut(|value| f(value))
    }
}

impl<T> StateHandle<T> for Rc<RefCell<T>> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }
}

/// Looks up the default gateway for one address of a section.
pub async fn fetch_gateway<F, H>(
    api: &dyn TraceApi,
    board: &H,
    id: SectionId,
    role: EndpointRole,
) -> Result<(), TraceError>
where
    F: TraceForm,
    H: StateHandle<TraceBoard<F>>,
{
    let lookup = board
        .with_mut(|board| board.begin_gateway_fetch(id, role))
        .inspect_err(|error| debug!(section = %id, %role, %error, "Gateway fetch rejected"))?;

    let result = api.default_gateway(&lookup.ip).await;
    if let Err(error) = &result {
        warn!(section = %id, %role, %error, "Gateway fetch failed");
    }
    board.with_mut(|board| board.finish_gateway_fetch(&lookup, result));
    Ok(())
}

/// Runs the section's trace and returns the status it settled with.
pub async fn perform_trace<F, H>(
    api: &dyn TraceApi,
    board: &H,
    id: SectionId,
) -> Result<TraceStatus, TraceError>
where
    F: TraceForm,
    H: StateHandle<TraceBoard<F>>,
{
    let request = board
        .with_mut(|board| board.begin_trace(id))
        .inspect_err(|error| debug!(section = %id, %error, "Trace rejected"))?;

    info!(section = %id, kind = F::KIND.as_str(), "Running trace");
    let outcome = F::execute(api, &request).await;
    let status = outcome.status;
    board.with_mut(|board| board.finish_trace(id, outcome));
    Ok(status)
}

/// Fetches a history collection if it has not been fetched yet. Returns
/// whether a request was made.
pub async fn load_history<H>(api: &dyn TraceApi, store: &H, scope: HistoryScope) -> bool
where
    H: StateHandle<HistoryStore>,
{
    if !store.with_mut(|store| store.begin_fetch(scope)) {
        return false;
    }
    let result = match scope {
        HistoryScope::User => api.user_routes().await,
        HistoryScope::All => api.all_routes().await,
    };
    store.with_mut(|store| store.finish_fetch(scope, result));
    true
}

pub async fn sign_in<H>(
    api: &dyn TraceApi,
    session: &H,
    credentials: &dyn CredentialStore,
    request: LoginRequest,
) -> Result<(), ApiError>
where
    H: StateHandle<Session>,
{
    if !session.with_mut(Session::begin_sign_in) {
        debug!("Sign-in already pending");
        return Ok(());
    }

    let result = api.login(&request).await.and_then(|token| {
        if token.trim().is_empty() {
            Err(ApiError::Empty("Login failed: no token received".to_string()))
        } else {
            Ok(token)
        }
    });

    match result {
        Ok(token) => {
            credentials.store(token.trim());
            session.with_mut(|session| {
                session.sign_in_succeeded(AuthUser {
                    username: request.username,
                })
            });
            Ok(())
        }
        Err(error) => {
            warn!(%error, "Sign-in failed");
            credentials.clear();
            session.with_mut(|session| session.sign_in_failed(error.to_string()));
            Err(error)
        }
    }
}

/// Clears the credential, the session and both history caches.
pub fn sign_out<S, H>(session: &S, history: &H, credentials: &dyn CredentialStore)
where
    S: StateHandle<Session>,
    H: StateHandle<HistoryStore>,
{
    credentials.clear();
    session.with_mut(Session::sign_out);
    history.with_mut(HistoryStore::reset);
    info!("Signed out");
}
