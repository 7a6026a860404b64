//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;
    use std::time::{Duration, SystemTime};

    use autolinker::config::{ConfigManager, LinkTarget, Settings};
    use tempfile::TempDir;

    const TOML_CONFIG: &str = r#"
[settings]
max_links_per_post = 3
max_links_per_keyword = 2
link_target = "new-window"
excluded_tag_names = ["H2", " blockquote "]
link_class = "autolink"

[[keywords]]
keyword = "estate planning"
url = "/services/estate-planning"

[[keywords]]
keyword = "  will "
url = "/wills"

[[keywords]]
keyword = "Will"
url = "/duplicate"

[[keywords]]
keyword = ""
url = "/empty"
"#;

    #[test]
    fn loads_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.toml");
        fs::write(&path, TOML_CONFIG).unwrap();

        let manager = ConfigManager::from_path(&path);
        let config = manager.load();

        assert_eq!(manager.config_path(), Some(path.as_path()));
        assert_eq!(config.settings.max_links_per_post, 3);
        assert_eq!(config.settings.max_links_per_keyword, 2);
        assert_eq!(config.settings.link_target, LinkTarget::NewWindow);
        assert!(config.settings.is_excluded_tag("h2"));
        assert!(config.settings.is_excluded_tag("blockquote"));
        assert!(!config.settings.is_excluded_tag("h3"));
        assert_eq!(config.settings.link_class.as_deref(), Some("autolink"));

        let keywords: Vec<(&str, &str)> = config
            .dictionary
            .iter()
            .map(|entry| (entry.keyword.as_str(), entry.url.as_str()))
            .collect();
        assert_eq!(
            keywords,
            vec![
                ("estate planning", "/services/estate-planning"),
                ("will", "/wills"),
            ]
        );
    }

    #[test]
    fn loads_json_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.json");
        fs::write(
            &path,
            r#"{"keywords": [{"keyword": "probate", "url": "/probate"}]}"#,
        )
        .unwrap();

        let config = ConfigManager::from_path(&path).load();

        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.dictionary.len(), 1);
    }

    #[test]
    fn clamps_zero_keyword_quota() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.toml");
        fs::write(&path, "[settings]\nmax_links_per_keyword = 0\n").unwrap();

        let config = ConfigManager::from_path(&path).load();

        assert_eq!(config.settings.max_links_per_keyword, 1);
        assert!(config.dictionary.is_empty());
    }

    #[test]
    fn example_config_roundtrip() {
        let dir = TempDir::new().unwrap();

        for name in ["example.toml", "example.json"] {
            let path = dir.path().join(name);
            ConfigManager::generate_example_config(&path).unwrap();

            let file = ConfigManager::load_from_file(&path).unwrap();
            assert_eq!(file.settings, Settings::default());
            assert_eq!(file.keywords.len(), 2);
        }
    }

    #[test]
    fn reload_picks_up_admin_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.toml");
        fs::write(&path, "[[keywords]]\nkeyword = \"will\"\nurl = \"/wills\"\n").unwrap();

        let manager = ConfigManager::from_path(&path);
        assert!(!manager.reload_if_changed().unwrap());

        fs::write(
            &path,
            "[[keywords]]\nkeyword = \"will\"\nurl = \"/wills\"\n\n[[keywords]]\nkeyword = \"trust\"\nurl = \"/trusts\"\n",
        )
        .unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();

        assert!(manager.reload_if_changed().unwrap());
        assert_eq!(manager.load().dictionary.len(), 2);
        assert!(!manager.reload_if_changed().unwrap());
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use std::fs;

    use autolinker::config::{ConfigManager, KeywordEntry, LinkerConfig, Settings};
    use autolinker::core::AutolinkError;
    use tempfile::TempDir;

    #[test]
    fn corrupt_file_falls_back_to_empty_dictionary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.toml");
        fs::write(&path, "[settings\nmax_links_per_post = ").unwrap();

        let manager = ConfigManager::from_path(&path);
        let config = manager.load();

        assert!(config.dictionary.is_empty());
        assert_eq!(config.settings, Settings::default());
        assert!(matches!(manager.reload(), Err(AutolinkError::Config(_))));
    }

    #[test]
    fn failed_reload_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.json");
        fs::write(&path, r#"{"keywords": [{"keyword": "will", "url": "/wills"}]}"#).unwrap();

        let manager = ConfigManager::from_path(&path);
        assert_eq!(manager.load().dictionary.len(), 1);

        fs::write(&path, "{ not json").unwrap();
        assert!(manager.reload().is_err());
        assert!(manager.load().dictionary.is_empty());
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(
            ConfigManager::load_from_file(&path),
            Err(AutolinkError::Config(_))
        ));
        assert!(ConfigManager::from_path(&path).load().dictionary.is_empty());
    }

    #[test]
    fn wrong_field_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.toml");
        fs::write(&path, "[settings]\nmax_links_per_post = \"five\"\n").unwrap();

        assert!(ConfigManager::load_from_file(&path).is_err());
    }

    #[test]
    fn entries_without_url_are_dropped() {
        let config = LinkerConfig::new(
            Settings::default(),
            vec![
                KeywordEntry::new("will", ""),
                KeywordEntry::new("   ", "/blank"),
                KeywordEntry::new("trust", "/trusts"),
            ],
        );

        assert_eq!(config.dictionary.len(), 1);
        assert_eq!(config.dictionary.entries()[0].keyword, "trust");
    }
}
