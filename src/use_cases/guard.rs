use crate::interface_adapters::session::SessionStore;

// Views a host application can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Notes,
    NoteList,
    NoteEditor,
    Search,
    Settings,
    Files,
    Login,
    Register,
    NotFound,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            Route::Notes | Route::NoteList | Route::NoteEditor | Route::Settings | Route::Files
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

// Pre-navigation check. The only state change is the store's own pruning of
// an expired session inside `is_authenticated`.
pub fn check_navigation(target: Route, session: &SessionStore) -> GuardDecision {
    if target.requires_auth() && !session.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    if target == Route::Login && session.is_authenticated() {
        return GuardDecision::RedirectToHome;
    }
    GuardDecision::Proceed
}
