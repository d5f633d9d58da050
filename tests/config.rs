#[cfg(test)]
mod tests {
    use kanbo::api::sync::RemoteConfig;
    use kanbo::libs::config::{Config, ProfileConfig};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata
    /// directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_lifecycle(_ctx: &mut ConfigTestContext) {
        // No file yet: defaults, nothing to delete
        let config = Config::read().unwrap();
        assert!(config.profile.is_none());
        assert!(config.remote.is_none());
        assert!(!Config::delete().unwrap());

        // Save a full configuration and read it back
        let config = Config {
            profile: Some(ProfileConfig {
                user: "alice".to_string(),
                name: Some("Alice".to_string()),
            }),
            remote: Some(RemoteConfig {
                api_url: "https://boards.example.com/api".to_string(),
                auth_token: "secret-token".to_string(),
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(
            loaded.profile,
            Some(ProfileConfig {
                user: "alice".to_string(),
                name: Some("Alice".to_string()),
            })
        );
        let remote = loaded.remote.unwrap();
        assert_eq!(remote.api_url, "https://boards.example.com/api");
        assert_eq!(remote.auth_token, "secret-token");

        // Delete removes the file; the next read is defaults again
        assert!(Config::delete().unwrap());
        assert!(Config::read().unwrap().remote.is_none());
    }

    #[test]
    fn test_unset_modules_are_omitted_from_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, "{}");

        let config = Config {
            profile: Some(ProfileConfig {
                user: "bob".to_string(),
                name: None,
            }),
            remote: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"user\":\"bob\""));
        assert!(!json.contains("remote"));
        assert!(!json.contains("name"));
    }

    #[test]
    fn test_current_user_prefers_profile() {
        let config = Config {
            profile: Some(ProfileConfig {
                user: "alice".to_string(),
                name: None,
            }),
            remote: None,
        };
        assert_eq!(config.current_user(), "alice");
    }

    #[test]
    fn test_current_user_falls_back_to_env() {
        // The only test in this binary touching USER
        std::env::set_var("USER", "env_user");
        assert_eq!(Config::default().current_user(), "env_user");

        std::env::remove_var("USER");
        assert_eq!(Config::default().current_user(), "local");
    }
}
