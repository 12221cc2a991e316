use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body extractor that never rejects.
///
/// A body that is missing, not JSON, or of the wrong shape binds to
/// `T::default()`; the validation rules on `T` then decide whether the
/// request is acceptable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    rejection = %rejection.body_text(),
                    "request body did not bind, using defaults"
                );
                Ok(Self(T::default()))
            }
        }
    }
}
