use serde::Deserialize;

/// Process-wide catalog policy, owned by the bootstrap and passed into the
/// services that need it (no ambient/static configuration).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// When an actor referenced by movies is deleted: `true` strips the
    /// actor id from every referencing movie first, `false` refuses the
    /// whole deletion.
    pub allow_cascade_delete: bool,
    /// Ceiling on the number of stored actors, enforced at create time.
    pub max_actors: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            allow_cascade_delete: false,
            max_actors: 100,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from the environment (and a `.env` file if one is
    /// present), falling back to defaults for unset or unparsable values.
    ///
    /// Recognized variables: `KINOTEKA_ALLOW_CASCADE_DELETE`,
    /// `KINOTEKA_MAX_ACTORS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let allow_cascade_delete = std::env::var("KINOTEKA_ALLOW_CASCADE_DELETE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.allow_cascade_delete);

        let max_actors = std::env::var("KINOTEKA_MAX_ACTORS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_actors);

        Self {
            allow_cascade_delete,
            max_actors,
        }
    }
}
