//! Session middleware and the current-user extractors.
//!
//! [`SessionMiddleware`] reads the session cookie, loads the session once and
//! resolves the logged-in user before any handler runs. Handlers receive the
//! result as a plain parameter ([`CurrentUser`] or [`LoginUser`]) and never
//! touch the session store themselves.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};

use folio_core::domain::SessionUser;
use folio_core::ports::SessionStore;
use folio_core::session;

use crate::middleware::error::AppError;

/// The user resolved for this request; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionUser>);

/// Id of the live session this request carried, if any.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Middleware factory resolving the session user once per request.
pub struct SessionMiddleware {
    store: Arc<dyn SessionStore>,
    cookie_name: Rc<str>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<dyn SessionStore>, cookie_name: impl Into<String>) -> Self {
        Self {
            store,
            cookie_name: Rc::from(cookie_name.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: self.store.clone(),
            cookie_name: self.cookie_name.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<dyn SessionStore>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let store = self.store.clone();
        let session_id = req
            .cookie(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|id| !id.is_empty());

        Box::pin(async move {
            let mut user = None;

            if let Some(id) = session_id {
                let data = store.load(&id).await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to load session");
                    AppError::from(e)
                })?;

                if let Some(data) = data {
                    user = session::resolve(&data);
                    req.extensions_mut().insert(SessionId(id));
                }
            }

            tracing::debug!(authenticated = user.is_some(), "Session resolved");
            req.extensions_mut().insert(CurrentUser(user));

            service.call(req).await
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => {
                tracing::error!("SessionMiddleware is not installed");
                ready(Err(AppError::Internal(
                    "Session middleware missing".to_string(),
                )))
            }
        }
    }
}

/// Extractor for routes that require a logged-in user. Rejects anonymous
/// requests with 401.
#[derive(Debug, Clone)]
pub struct LoginUser(pub SessionUser);

impl FromRequest for LoginUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match CurrentUser::from_request(req, payload).into_inner() {
            Ok(CurrentUser(Some(user))) => ready(Ok(LoginUser(user))),
            Ok(CurrentUser(None)) => ready(Err(AppError::Unauthorized)),
            Err(e) => ready(Err(e)),
        }
    }
}

impl FromRequest for SessionId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionId>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("no session")),
        )
    }
}
