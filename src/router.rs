use axum::{
    Router,
    extract::FromRef,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::auth::TokenService;
use crate::db::{Database, OwnerStorer, TeaOwnerStorer, TeaStorer, TeaTypeStorer, UserStorer};
use crate::handlers::{owner, tea, tea_owner, tea_type, user};

/// Shared handler state. Each store is held behind its capability trait so
/// tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub tea_types: Arc<dyn TeaTypeStorer>,
    pub owners: Arc<dyn OwnerStorer>,
    pub teas: Arc<dyn TeaStorer>,
    pub tea_owners: Arc<dyn TeaOwnerStorer>,
    pub users: Arc<dyn UserStorer>,
    pub tokens: Arc<TokenService>,
    /// Whether `POST /register` is routed at all.
    pub register_enabled: bool,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService, register_enabled: bool) -> Self {
        let db = Arc::new(db);
        Self {
            tea_types: db.clone(),
            owners: db.clone(),
            teas: db.clone(),
            tea_owners: db.clone(),
            users: db,
            tokens: Arc::new(tokens),
            register_enabled,
        }
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

pub fn tea_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Account
        .route("/login", post(user::login))
        .route("/changepassword", post(user::change_password))
        // Tea types
        .route("/types", get(tea_type::list_tea_types))
        .route("/types/teas", get(tea_type::list_teas_by_type))
        .route("/type", post(tea_type::create_tea_type))
        .route(
            "/type/{id}",
            get(tea_type::get_tea_type).delete(tea_type::delete_tea_type),
        )
        // Owners
        .route("/owners", get(owner::list_owners))
        .route("/owners/teas", get(owner::list_teas_by_owner))
        .route("/owner", post(owner::create_owner))
        .route(
            "/owner/{id}",
            get(owner::get_owner).delete(owner::delete_owner),
        )
        // Teas
        .route("/teas", get(tea::list_teas))
        .route("/tea", post(tea::create_tea))
        .route("/tea/{id}", get(tea::get_tea).delete(tea::delete_tea))
        // Tea owners
        .route("/teas/owners", get(tea_owner::list_teas_with_owners))
        .route("/tea/{id}/owners", get(tea_owner::list_owners_of_tea))
        .route("/tea/{id}/owner", post(tea_owner::create_tea_owner))
        .route(
            "/tea/{tea_id}/owner/{owner_id}",
            delete(tea_owner::delete_tea_owner),
        );

    if state.register_enabled {
        router = router.route("/register", post(user::register));
    }

    router.with_state(state)
}
