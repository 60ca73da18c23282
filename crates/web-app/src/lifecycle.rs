use log::error;
use stride_domain::AppState;
use web_sys::VisibilityState;

#[must_use]
pub fn app_state(visibility: VisibilityState) -> AppState {
    match visibility {
        VisibilityState::Visible => AppState::Active,
        VisibilityState::Hidden => AppState::Background,
        _ => AppState::Inactive,
    }
}

/// The app state derived from the visibility of the document.
#[must_use]
pub fn current_app_state() -> AppState {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        app_state(document.visibility_state())
    } else {
        error!("failed to access document to determine visibility");
        AppState::Active
    }
}
