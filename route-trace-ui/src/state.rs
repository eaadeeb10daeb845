//! App-wide state: one signal per container, shared through context.

use dioxus::prelude::*;
use trace_core::driver::{self, StateHandle};
use trace_core::{
    CombinedForm, CredentialStore, DirectForm, EndpointRole, HistoryScope, HistoryStore,
    MacForm, SectionId, Session, TraceBoard, TraceForm,
};

use crate::api::HttpTraceApi;
use crate::credentials::CookieCredentials;
use crate::theme;

/// Lets the core drivers mutate a signal. Wrapped because `StateHandle` and
/// `Signal` both live in other crates.
pub struct SignalHandle<T: 'static>(pub Signal<T>);

impl<T: 'static> StateHandle<T> for SignalHandle<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = self.0;
        let mut guard = signal.write();
        f(&mut *guard)
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.0.read())
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<Session>,
    pub history: Signal<HistoryStore>,
    pub combined: Signal<TraceBoard<CombinedForm>>,
    pub direct: Signal<TraceBoard<DirectForm>>,
    pub mac: Signal<TraceBoard<MacForm>>,
    pub theme: Signal<String>,
}

impl AppState {
    pub fn api(&self) -> HttpTraceApi {
        HttpTraceApi::new(self.session)
    }

    pub fn toggle_theme(&self) {
        let mut theme_signal = self.theme;
        let next = theme::next_theme(&theme_signal.read());
        theme::apply_theme_to_document(&next);
        theme::set_cached_theme_preference(&next);
        theme_signal.set(next);
    }

    pub fn sign_out(&self) {
        driver::sign_out(
            &SignalHandle(self.session),
            &SignalHandle(self.history),
            &CookieCredentials,
        );
    }

    pub fn load_history(&self, scope: HistoryScope) {
        let api = self.api();
        let history = SignalHandle(self.history);
        spawn(async move {
            driver::load_history(&api, &history, scope).await;
        });
    }

    pub fn refresh_history(&self, scope: HistoryScope) {
        let mut history = self.history;
        history.write().invalidate(scope);
        self.load_history(scope);
    }
}

/// Creates every container signal and provides them as context.
pub fn use_app_state_provider() -> AppState {
    let session = use_signal(|| Session::from_credential(CookieCredentials.load().as_deref()));
    let history = use_signal(HistoryStore::new);
    let combined = use_signal(TraceBoard::<CombinedForm>::new);
    let direct = use_signal(TraceBoard::<DirectForm>::new);
    let mac = use_signal(TraceBoard::<MacForm>::new);
    let theme = use_signal(theme::initial_theme);

    use_context_provider(|| AppState {
        session,
        history,
        combined,
        direct,
        mac,
        theme,
    })
}

pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}

/// Applies one field edit; the section resets to idle.
pub fn edit_field<F: TraceForm>(
    mut board: Signal<TraceBoard<F>>,
    id: SectionId,
    field: F::Field,
    value: String,
) {
    if let Err(e) = board.write().update_field(id, field, value) {
        dioxus_logger::tracing::debug!("Edit ignored: {}", e);
    }
}

pub fn spawn_gateway_fetch<F: TraceForm>(
    api: HttpTraceApi,
    board: Signal<TraceBoard<F>>,
    id: SectionId,
    role: EndpointRole,
) {
    spawn(async move {
        if let Err(e) = driver::fetch_gateway(&api, &SignalHandle(board), id, role).await {
            dioxus_logger::tracing::debug!("Gateway fetch not started: {}", e);
        }
    });
}

pub fn spawn_trace<F: TraceForm>(api: HttpTraceApi, board: Signal<TraceBoard<F>>, id: SectionId) {
    spawn(async move {
        match driver::perform_trace(&api, &SignalHandle(board), id).await {
            Ok(status) => dioxus_logger::tracing::info!("Trace {} settled: {}", id, status.as_str()),
            Err(e) => dioxus_logger::tracing::debug!("Trace not started: {}", e),
        }
    });
}
