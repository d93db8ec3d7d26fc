use crate::config::SourceKind;
use crate::source::contract::MusicSource;
use crate::source::native::{NativeAdapter, NativeConfig};
use crate::source::subsonic::{SubsonicAdapter, SubsonicConfig};
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

struct Bound {
    kind: SourceKind,
    source: Arc<dyn MusicSource>,
}

/// Holder for "the adapter that is live now". Switching replaces the whole
/// binding in one swap; it never mutates the previous instance, so calls
/// that captured the old `Arc` finish against the configuration they
/// started with.
pub struct SourceBinding {
    inner: RwLock<Bound>,
}

impl SourceBinding {
    pub fn native(config: NativeConfig) -> Self {
        Self {
            inner: RwLock::new(Bound {
                kind: SourceKind::Native,
                source: Arc::new(NativeAdapter::new(config)),
            }),
        }
    }

    pub fn subsonic(config: SubsonicConfig) -> Self {
        Self {
            inner: RwLock::new(Bound {
                kind: SourceKind::Subsonic,
                source: Arc::new(SubsonicAdapter::new(config)),
            }),
        }
    }

    /// Read the current binding. Callers hold the returned `Arc` for the
    /// duration of their request; a switch mid-flight does not retarget them.
    pub fn adapter(&self) -> Arc<dyn MusicSource> {
        self.inner.read().unwrap().source.clone()
    }

    pub fn kind(&self) -> SourceKind {
        self.inner.read().unwrap().kind
    }

    pub fn bind_native(&self, config: NativeConfig) {
        log::info!("Binding native source at {}", config.base_url);
        *self.inner.write().unwrap() = Bound {
            kind: SourceKind::Native,
            source: Arc::new(NativeAdapter::new(config)),
        };
    }

    pub fn bind_subsonic(&self, config: SubsonicConfig) {
        log::info!("Binding Subsonic source at {}", config.base_url);
        *self.inner.write().unwrap() = Bound {
            kind: SourceKind::Subsonic,
            source: Arc::new(SubsonicAdapter::new(config)),
        };
    }
}

/// Process-wide binding read by the command layer. Tests needing isolation
/// construct their own `SourceBinding` instead.
static BINDING: Lazy<SourceBinding> = Lazy::new(|| SourceBinding::native(NativeConfig::default()));

pub fn binding() -> &'static SourceBinding {
    &BINDING
}

pub fn adapter() -> Arc<dyn MusicSource> {
    BINDING.adapter()
}

pub fn active_kind() -> SourceKind {
    BINDING.kind()
}

pub fn bind_native(config: NativeConfig) {
    BINDING.bind_native(config);
}

pub fn bind_subsonic(config: SubsonicConfig) {
    BINDING.bind_subsonic(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsonic_config() -> SubsonicConfig {
        SubsonicConfig {
            base_url: "http://music.invalid".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            client_name: None,
        }
    }

    #[test]
    fn starts_bound_to_native() {
        let binding = SourceBinding::native(NativeConfig::default());
        assert_eq!(binding.kind(), SourceKind::Native);
    }

    #[test]
    fn switching_replaces_the_whole_binding() {
        let binding = SourceBinding::native(NativeConfig::default());
        let before = binding.adapter();

        binding.bind_subsonic(subsonic_config());
        assert_eq!(binding.kind(), SourceKind::Subsonic);

        let after = binding.adapter();
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn captured_binding_outlives_a_switch() {
        let binding = SourceBinding::subsonic(subsonic_config());

        // A request captures the adapter at call start...
        let captured = binding.adapter();

        // ...the user switches source mid-flight...
        binding.bind_native(NativeConfig::default());
        assert_eq!(binding.kind(), SourceKind::Native);

        // ...and the in-flight call still completes against the old
        // instance's configuration.
        let greeting = captured.hello().await.unwrap();
        assert_eq!(greeting.data, "Hello from the Subsonic source");
    }
}
