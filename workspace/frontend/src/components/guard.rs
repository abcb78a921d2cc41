//! Gate between the router and the authenticated pages.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::common::Loading;
use crate::session::use_session;
use crate::Route;

/// What the guard renders for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore still in flight. Never redirect while waiting: the
    /// stored session may turn out to be valid.
    Wait,
    RedirectToLogin,
    RenderChildren,
}

pub fn decide(loading: bool, is_authenticated: bool) -> GuardDecision {
    if loading {
        GuardDecision::Wait
    } else if !is_authenticated {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::RenderChildren
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let session = use_session();

    match decide(session.loading, session.is_authenticated()) {
        GuardDecision::Wait => html! {
            <div class="min-h-screen flex items-center justify-center bg-base-200">
                <Loading text="Checking your session..." />
            </div>
        },
        GuardDecision::RedirectToLogin => {
            log::debug!("Unauthenticated visit to a guarded route, redirecting to login");
            html! { <Redirect<Route> to={Route::Login} /> }
        }
        GuardDecision::RenderChildren => html! { <>{ props.children.clone() }</> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_always_waits() {
        // While the restore is unresolved the guard must not redirect,
        // whatever the (still provisional) identity says.
        assert_eq!(decide(true, false), GuardDecision::Wait);
        assert_eq!(decide(true, true), GuardDecision::Wait);
    }

    #[test]
    fn test_unauthenticated_redirects() {
        assert_eq!(decide(false, false), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_authenticated_renders_children() {
        assert_eq!(decide(false, true), GuardDecision::RenderChildren);
    }
}
