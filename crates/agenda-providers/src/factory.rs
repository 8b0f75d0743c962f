//! Provider construction by name.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::CalendarProvider;

/// Names of the providers compiled into this build.
pub fn available_providers() -> &'static [&'static str] {
    &[
        #[cfg(feature = "morgen")]
        crate::morgen::MorgenProvider::NAME,
    ]
}

/// Builds the provider registered as `name` from its configuration entry.
///
/// No network I/O happens here and credentials are not read yet.
///
/// # Errors
///
/// - `UnknownProvider` if `providers` has no entry for `name`
/// - `UnsupportedProvider` if the entry exists but no implementation is
///   compiled in under that name
/// - `ConfigurationError` if the entry is invalid
pub fn create_provider(
    name: &str,
    providers: &BTreeMap<String, ProviderConfig>,
) -> ProviderResult<Box<dyn CalendarProvider>> {
    let config = providers
        .get(name)
        .ok_or_else(|| ProviderError::unknown_provider(name))?;

    debug!("creating provider {} ({})", name, config.base_url);

    match name {
        #[cfg(feature = "morgen")]
        crate::morgen::MorgenProvider::NAME => {
            let provider = crate::morgen::MorgenProvider::new(config.clone())
                .map_err(|e| e.with_provider(name))?;
            Ok(Box::new(provider))
        }
        _ => Err(ProviderError::unsupported_provider(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    fn providers() -> BTreeMap<String, ProviderConfig> {
        let mut providers = BTreeMap::new();
        providers.insert("morgen".to_string(), ProviderConfig::morgen_default());
        providers.insert(
            "google".to_string(),
            ProviderConfig::new("https://www.googleapis.com/calendar/v3", "GOOGLE_KEY"),
        );
        providers
    }

    fn error_code(result: ProviderResult<Box<dyn CalendarProvider>>) -> ProviderErrorCode {
        match result {
            Ok(provider) => panic!("expected an error, got provider {}", provider.name()),
            Err(e) => e.code(),
        }
    }

    #[test]
    fn unknown_when_not_configured() {
        let code = error_code(create_provider("outlook", &providers()));
        assert_eq!(code, ProviderErrorCode::UnknownProvider);
    }

    #[test]
    fn unsupported_when_configured_without_implementation() {
        let code = error_code(create_provider("google", &providers()));
        assert_eq!(code, ProviderErrorCode::UnsupportedProvider);
    }

    #[cfg(feature = "morgen")]
    #[test]
    fn builds_morgen_without_credentials() {
        let mut providers = providers();
        if let Some(config) = providers.get_mut("morgen") {
            config.env_api_key = "AGENDA_TEST_FACTORY_UNSET".to_string();
        }
        let provider = create_provider("morgen", &providers).unwrap();
        assert_eq!(provider.name(), "morgen");
        assert!(available_providers().contains(&"morgen"));
    }

    #[cfg(feature = "morgen")]
    #[test]
    fn invalid_entry_is_configuration_error() {
        let mut providers = BTreeMap::new();
        providers.insert(
            "morgen".to_string(),
            ProviderConfig::new("not a url", "MORGEN_API_KEY"),
        );
        let code = error_code(create_provider("morgen", &providers));
        assert_eq!(code, ProviderErrorCode::ConfigurationError);
    }
}
