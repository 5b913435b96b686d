//! Process-wide field, installed once when the first geometry message arrives.
//!
//! Passing a [`Field`] explicitly is the primary API; this barrier is for
//! hosts that want a single shared instance. After [`install`] the field is
//! read-only and can be used from any thread.

use once_cell::sync::OnceCell;

use crate::error::{FieldError, Result};
use crate::field::Field;

static FIELD: OnceCell<Field> = OnceCell::new();

/// Stores the field. Fails if a field has already been installed.
pub fn install(field: Field) -> Result<&'static Field> {
    FIELD.set(field).map_err(|_| FieldError::AlreadyInitialized)?;
    FIELD.get().ok_or(FieldError::NotInitialized)
}

pub fn field() -> Result<&'static Field> {
    FIELD.get().ok_or(FieldError::NotInitialized)
}

pub fn is_installed() -> bool {
    FIELD.get().is_some()
}
