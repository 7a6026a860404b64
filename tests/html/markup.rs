//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use autolinker::config::{KeywordDictionary, KeywordEntry, Settings};
    use autolinker::core::autolink_html;
    use autolinker::parsers::html::{html_to_dom, serialize_document, DocumentKind};

    fn link(markup: &str, entries: Vec<KeywordEntry>) -> String {
        let dictionary = KeywordDictionary::from_entries(entries, false);
        autolink_html(markup, &Settings::default(), &dictionary)
    }

    #[test]
    fn attributes_and_comments_survive() {
        let html = link(
            "<!-- wp:paragraph --><p class=\"lead\" id=\"intro\">A will <!-- note --> matters</p><!-- /wp:paragraph -->",
            vec![KeywordEntry::new("will", "/wills")],
        );

        assert_eq!(
            html,
            "<!-- wp:paragraph --><p class=\"lead\" id=\"intro\">A <a href=\"/wills\">will</a> <!-- note --> matters</p><!-- /wp:paragraph -->"
        );
    }

    #[test]
    fn void_elements_and_entities() {
        let html = link(
            "<p>Fish &amp; chips<br>then a will<img src=\"a.png\" alt=\"x &amp; y\"></p>",
            vec![KeywordEntry::new("will", "/wills")],
        );

        assert_eq!(
            html,
            "<p>Fish &amp; chips<br>then a <a href=\"/wills\">will</a><img src=\"a.png\" alt=\"x &amp; y\"></p>"
        );
    }

    #[test]
    fn keyword_across_non_breaking_space() {
        let html = link(
            "<p>Book estate&nbsp;planning today.</p>",
            vec![KeywordEntry::new("estate planning", "/services/estate-planning")],
        );

        assert_eq!(
            html,
            "<p>Book <a href=\"/services/estate-planning\">estate&nbsp;planning</a> today.</p>"
        );
    }

    #[test]
    fn keyword_across_line_break() {
        let html = link(
            "<p>Book estate\nplanning today.</p>",
            vec![KeywordEntry::new("estate planning", "/services/estate-planning")],
        );

        assert_eq!(
            html,
            "<p>Book <a href=\"/services/estate-planning\">estate\nplanning</a> today.</p>"
        );
    }

    #[test]
    fn url_is_escaped_in_attribute() {
        let html = link(
            "<p>probate</p>",
            vec![KeywordEntry::new("probate", "/search?q=probate&page=1")],
        );

        assert_eq!(
            html,
            "<p><a href=\"/search?q=probate&amp;page=1\">probate</a></p>"
        );
    }

    #[test]
    fn plain_text_input() {
        let html = link(
            "Making a will is simple.",
            vec![KeywordEntry::new("will", "/wills")],
        );

        assert_eq!(html, "Making a <a href=\"/wills\">will</a> is simple.");
    }

    #[test]
    fn detects_full_documents() {
        let parsed = html_to_dom("<!doctype html><html><body><p>x</p></body></html>").unwrap();
        assert_eq!(parsed.kind, DocumentKind::Document);

        let parsed = html_to_dom("<p>x</p>").unwrap();
        assert_eq!(parsed.kind, DocumentKind::Fragment);
        assert_eq!(serialize_document(&parsed).unwrap(), "<p>x</p>");
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
    use autolinker::config::{KeywordDictionary, KeywordEntry, Settings};
    use autolinker::core::{autolink_html_with_stats, AutolinkStatus};

    #[test]
    fn malformed_markup_still_annotates() {
        let dictionary =
            KeywordDictionary::from_entries(vec![KeywordEntry::new("will", "/wills")], false);

        let outcome = autolink_html_with_stats(
            "<div><p>Unclosed will",
            &Settings::default(),
            &dictionary,
        );

        assert_eq!(outcome.status, AutolinkStatus::Linked);
        assert_eq!(
            outcome.html,
            "<div><p>Unclosed <a href=\"/wills\">will</a></p></div>"
        );
    }

    #[test]
    fn empty_markup() {
        let dictionary =
            KeywordDictionary::from_entries(vec![KeywordEntry::new("will", "/wills")], false);

        let outcome = autolink_html_with_stats("", &Settings::default(), &dictionary);

        assert_eq!(outcome.html, "");
        assert!(!outcome.is_modified());
    }
}
