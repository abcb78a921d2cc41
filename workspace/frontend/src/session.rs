//! Authenticated-user state for the whole app, provided as a context
//! backed by a reducer. Components read the state through
//! [`use_session`]; the async operations here are the only writers.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::{IdentityDto, LoginRequest, SignupRequest};

use crate::api_client::{self, ApiError};
use crate::storage;

/// The signed-in user as known client-side.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub name: String,
}

impl From<IdentityDto> for Identity {
    fn from(dto: IdentityDto) -> Self {
        Self {
            uid: dto.uid,
            email: dto.email,
            name: dto.name,
        }
    }
}

/// Session state. Authentication is derived from `identity`; there is
/// no separate boolean to fall out of sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True only from app start until the one-time restore resolves.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

pub enum SessionAction {
    /// Result of the one-time startup restore.
    Restored(Option<Identity>),
    SignedIn(Identity),
    SignedOut,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        match action {
            // A late restore result must not clobber a session that
            // resolved first (the user may sign in while the stored
            // token is still being checked). Only the first resolution
            // flips `loading`.
            SessionAction::Restored(identity) if self.loading => Rc::new(SessionState {
                identity,
                loading: false,
            }),
            SessionAction::Restored(_) => self,
            SessionAction::SignedIn(identity) => Rc::new(SessionState {
                identity: Some(identity),
                loading: false,
            }),
            SessionAction::SignedOut => Rc::new(SessionState {
                identity: None,
                loading: false,
            }),
        }
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

/// Read the session context. Panics when called outside
/// [`SessionProvider`], which is a wiring bug, not a runtime condition.
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider is missing from the component tree")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(SessionState::default);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let identity = restore_identity().await;
                session.dispatch(SessionAction::Restored(identity));
            });
            || ()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Validate the persisted credentials against the backend. Failures
/// resolve to the signed-out state and never surface to the user.
async fn restore_identity() -> Option<Identity> {
    let credentials = storage::load_credentials()?;
    match api_client::auth::me(&credentials.token).await {
        Ok(dto) => {
            log::info!("Restored session for {}", dto.email);
            Some(dto.into())
        }
        Err(err) => {
            if err == ApiError::Authentication {
                // The stored token will never work again.
                storage::clear_credentials();
            }
            log::debug!("Session restore failed, starting signed out: {}", err);
            None
        }
    }
}

/// Exchange credentials for a session. Persists the token and signs the
/// state in before returning the identity.
pub async fn login(
    session: &SessionContext,
    email: String,
    password: String,
) -> Result<Identity, ApiError> {
    let auth = api_client::auth::login(&LoginRequest { email, password }).await?;
    storage::save_credentials(&auth.uid, &auth.token);

    let identity = Identity {
        uid: auth.uid,
        email: auth.email,
        name: auth.name,
    };
    session.dispatch(SessionAction::SignedIn(identity.clone()));
    Ok(identity)
}

/// Register a new account. The server signs the account in on signup,
/// so this persists and dispatches exactly like [`login`]. The identity
/// is returned for the role-assignment flow.
pub async fn signup(
    session: &SessionContext,
    name: String,
    email: String,
    password: String,
) -> Result<Identity, ApiError> {
    let auth = api_client::auth::signup(&SignupRequest {
        name,
        email,
        password,
    })
    .await?;
    storage::save_credentials(&auth.uid, &auth.token);

    let identity = Identity {
        uid: auth.uid,
        email: auth.email,
        name: auth.name,
    };
    session.dispatch(SessionAction::SignedIn(identity.clone()));
    Ok(identity)
}

/// Sign out. The server-side revoke is best-effort; the local session
/// and the persisted credentials are always cleared, so a second call
/// is a harmless no-op.
pub async fn logout(session: &SessionContext) {
    if let Some(credentials) = storage::load_credentials() {
        if let Err(err) = api_client::auth::logout(&credentials.token).await {
            log::warn!("Proceeding with local sign-out despite: {}", err);
        }
    }
    storage::clear_credentials();
    session.dispatch(SessionAction::SignedOut);
}
