//! Provider data handed to resources at configure time.
//!
//! Resources accept the data as an opaque handle and check its concrete type
//! once, in `configure`. A handle of any other type is a programming error in
//! the caller and is reported with the type that was actually received.

use std::any::Any;

use crate::ProviderError;

/// Opaque, type-checkable provider data.
pub trait ResourceData: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Concrete type name, for diagnostics.
    fn data_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> ResourceData for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn data_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Data the provider shares with its resources after configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderData {
    /// Provider version, for log context.
    pub version: String,
}

impl ProviderData {
    /// Check a configure-time handle.
    ///
    /// `None` is accepted: the caller may configure resources before the
    /// provider itself has been configured.
    pub fn from_handle(
        data: Option<&dyn ResourceData>,
    ) -> Result<Option<&ProviderData>, ProviderError> {
        let Some(data) = data else {
            return Ok(None);
        };

        match data.as_any().downcast_ref::<ProviderData>() {
            Some(provider_data) => Ok(Some(provider_data)),
            None => Err(ProviderError::UnexpectedConfigureType {
                expected: std::any::type_name::<ProviderData>(),
                received: data.data_type_name(),
            }),
        }
    }
}
