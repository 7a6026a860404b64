//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use autolinker::config::{KeywordEntry, LinkerConfig, Settings};
    use autolinker::core::{AutolinkStatus, Autolinker};

    fn autolinker() -> Autolinker {
        Autolinker::from_config(LinkerConfig::new(
            Settings::default(),
            vec![KeywordEntry::new("lasting power of attorney", "/lpa")],
        ))
    }

    #[test]
    fn annotates_eligible_scope() {
        let outcome = autolinker().annotate(
            "<p>Register a lasting power of attorney early.</p>",
            "page",
        );

        assert_eq!(
            outcome.html,
            "<p>Register a <a href=\"/lpa\">lasting power of attorney</a> early.</p>"
        );
        assert_eq!(outcome.status, AutolinkStatus::Linked);
    }

    #[test]
    fn scope_names_are_case_insensitive() {
        let outcome = autolinker().annotate("<p>lasting power of attorney</p>", " Post ");

        assert!(outcome.is_modified());
    }

    #[test]
    fn replaced_configuration_applies_to_next_call() {
        let autolinker = autolinker();
        let markup = "<p>Ask about probate.</p>";

        assert!(!autolinker.annotate(markup, "post").is_modified());

        autolinker.config_manager().replace(LinkerConfig::new(
            Settings::default(),
            vec![KeywordEntry::new("probate", "/probate")],
        ));

        assert_eq!(
            autolinker.annotate(markup, "post").html,
            "<p>Ask about <a href=\"/probate\">probate</a>.</p>"
        );
    }

    #[test]
    fn snapshot_outlives_replacement() {
        let autolinker = autolinker();
        let snapshot = autolinker.config_manager().load();

        autolinker
            .config_manager()
            .replace(LinkerConfig::new(Settings::default(), Vec::new()));

        assert_eq!(snapshot.dictionary.len(), 1);
        assert!(autolinker.config_manager().load().dictionary.is_empty());
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
    use autolinker::config::{KeywordEntry, LinkerConfig, Settings};
    use autolinker::core::{AutolinkStatus, Autolinker, NoOpReason};

    #[test]
    fn ineligible_scope() {
        let autolinker = Autolinker::from_config(LinkerConfig::new(
            Settings::default(),
            vec![KeywordEntry::new("will", "/wills")],
        ));

        let outcome = autolinker.annotate("<p>will</p>", "product");

        assert_eq!(outcome.html, "<p>will</p>");
        assert_eq!(
            outcome.status,
            AutolinkStatus::NoOp(NoOpReason::ScopeNotEligible)
        );
    }

    #[test]
    fn missing_config_file_falls_back_to_empty_dictionary() {
        let manager =
            autolinker::config::ConfigManager::from_path("/nonexistent/autolink-config.toml");
        let autolinker = Autolinker::new(manager);

        let outcome = autolinker.annotate("<p>will</p>", "post");

        assert_eq!(outcome.html, "<p>will</p>");
        assert_eq!(
            outcome.status,
            AutolinkStatus::NoOp(NoOpReason::EmptyDictionary)
        );
    }
}
