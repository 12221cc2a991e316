//! Request validation, independent of the HTTP layer.
//!
//! Rules live on the DTOs themselves as `garde` attributes; handlers only ever
//! call [`validate`] and let `?` turn a failing report into a 400.

use garde::Validate;

use crate::error::{AppError, AppResult};

pub fn validate<T>(value: &T) -> AppResult<()>
where
    T: Validate<Context = ()>,
{
    value.validate(&()).map_err(AppError::ValidationError)
}
