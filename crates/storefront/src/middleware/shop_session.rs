//! Session-backed shopper state extractor.
//!
//! Loads the shopper's [`ShopState`] from the session, and writes it back
//! after every action that changed it. Page views alone never create a
//! session, so anonymous browsing leaves nothing in the session store.

use axum::{extract::FromRequestParts, http::request::Parts};
use luxury_core::{Action, Catalog, ShopState};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// The current shopper's state, bound to their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     State(state): State<AppState>,
///     mut shop: ShopSession,
/// ) -> Result<Redirect, AppError> {
///     shop.dispatch(state.catalog(), Action::CloseCart).await?;
///     Ok(Redirect::to(&shop.state().page().path()))
/// }
/// ```
pub struct ShopSession {
    session: Session,
    state: ShopState,
}

impl ShopSession {
    /// The shopper state as of the last dispatch.
    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    /// Apply `action` and persist the result if it changed anything.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Shop` if the action is rejected (the session is
    /// left untouched), or `AppError::Session` if saving fails.
    pub async fn dispatch(&mut self, catalog: &Catalog, action: Action) -> Result<(), AppError> {
        self.dispatch_all(catalog, [action]).await
    }

    /// Apply `actions` in order, all or nothing.
    ///
    /// # Errors
    ///
    /// Same as [`ShopSession::dispatch`]. The state is left as it was before
    /// the first action when any of them is rejected.
    pub async fn dispatch_all(
        &mut self,
        catalog: &Catalog,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<(), AppError> {
        if self.apply(catalog, actions)? {
            self.save().await?;
        }
        Ok(())
    }

    /// Apply a page-view `action` such as [`Action::Navigate`].
    ///
    /// The change is only persisted for shoppers who already have a session.
    ///
    /// # Errors
    ///
    /// Same as [`ShopSession::dispatch`].
    pub async fn visit(&mut self, catalog: &Catalog, action: Action) -> Result<(), AppError> {
        if self.apply(catalog, [action])? && self.session.id().is_some() {
            self.save().await?;
        }
        Ok(())
    }

    /// Whether `actions` changed the state.
    fn apply(
        &mut self,
        catalog: &Catalog,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<bool, AppError> {
        let mut next = self.state.clone();
        for action in actions {
            tracing::debug!(?action, "Dispatching shop action");
            next.dispatch(catalog, action)?;
        }
        let changed = next != self.state;
        self.state = next;
        Ok(changed)
    }

    async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::SHOP_STATE, &self.state)
            .await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for ShopSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))?;

        let state = match session.get::<ShopState>(session_keys::SHOP_STATE).await {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                // Unreadable state (e.g. written by an older build) starts over
                tracing::warn!("Discarding unreadable shop state: {e}");
                ShopState::default()
            }
        };

        Ok(Self { session, state })
    }
}
