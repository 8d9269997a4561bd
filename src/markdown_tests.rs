    use super::*;

    fn config(ignore_links: bool, ignore_images: bool, citations: bool) -> MarkdownConfig {
        MarkdownConfig {
            ignore_links,
            ignore_images,
            citations,
        }
    }

    #[test]
    fn test_markdown_convert_keeps_text() {
        let md = convert(
            "<html><body><h1>Title</h1><p>Body text</p></body></html>",
            &MarkdownConfig::default(),
        );
        assert!(md.contains("Title"));
        assert!(md.contains("Body text"));
        assert!(!md.contains("<p>"));
    }

    #[test]
    fn test_markdown_convert_preserves_links_by_default() {
        let md = convert(
            r#"<p>See <a href="https://docs.rs">the docs</a>.</p>"#,
            &MarkdownConfig::default(),
        );
        assert!(md.contains("[the docs](https://docs.rs)"));
    }

    #[test]
    fn test_markdown_convert_ignore_links() {
        let md = convert(
            r#"<p>See <a href="https://docs.rs">the docs</a>.</p>"#,
            &config(true, false, false),
        );
        assert!(md.contains("the docs"));
        assert!(!md.contains("https://docs.rs"));
    }

    #[test]
    fn test_markdown_ignore_links_keeps_text() {
        let md = rewrite_links("See [docs](https://d.io) now.", &config(true, false, false));
        assert_eq!(md, "See docs now.");
    }

    #[test]
    fn test_markdown_ignore_links_keeps_inline_formatting() {
        let md = rewrite_links("[*bold* move](https://x.io)", &config(true, false, false));
        assert_eq!(md, "*bold* move");
    }

    #[test]
    fn test_markdown_ignore_links_empty_text() {
        let md = rewrite_links("a [](https://x.io) b", &config(true, false, false));
        assert_eq!(md, "a  b");
    }

    #[test]
    fn test_markdown_ignore_images() {
        let md = rewrite_links("A ![logo](l.png) B", &config(false, true, false));
        assert_eq!(md, "A  B");
    }

    #[test]
    fn test_markdown_image_inside_kept_link() {
        let md = rewrite_links("[![logo](l.png) Home](https://h.io)", &config(false, true, false));
        assert_eq!(md, "[ Home](https://h.io)");
    }

    #[test]
    fn test_markdown_code_spans_untouched() {
        let src = "# Title\n\nBody with `[x](y)` code";
        assert_eq!(rewrite_links(src, &config(true, true, false)), src);
    }

    #[test]
    fn test_markdown_citations_number_by_first_occurrence() {
        let md = rewrite_links(
            "[a](https://x.com) and [b](https://y.com) and [c](https://x.com)",
            &config(false, false, true),
        );
        assert_eq!(
            md,
            "a⟨1⟩ and b⟨2⟩ and c⟨1⟩\n\n## References\n\n⟨1⟩ https://x.com\n⟨2⟩ https://y.com"
        );
    }

    #[test]
    fn test_markdown_citations_include_title() {
        let md = rewrite_links(r#"[a](https://x.com "X Site")"#, &config(false, false, true));
        assert_eq!(md, "a⟨1⟩\n\n## References\n\n⟨1⟩ https://x.com: X Site");
    }

    #[test]
    fn test_markdown_citations_with_dropped_image() {
        let md = rewrite_links("[![logo](l.png) Home](https://h.io)", &config(false, true, true));
        assert_eq!(md, " Home⟨1⟩\n\n## References\n\n⟨1⟩ https://h.io");
    }

    #[test]
    fn test_markdown_citations_skip_links_inside_dropped_image() {
        let md = rewrite_links(
            "![alt [a](https://x.com)](i.png) text",
            &config(false, true, true),
        );
        assert_eq!(md, " text");
    }

    #[test]
    fn test_markdown_citations_numbering_ignores_dropped_image() {
        let md = rewrite_links(
            "![alt [a](https://x.com)](i.png) [b](https://y.com)",
            &config(false, true, true),
        );
        assert_eq!(md, " b⟨1⟩\n\n## References\n\n⟨1⟩ https://y.com");
    }

    #[test]
    fn test_markdown_citations_without_links_add_nothing() {
        let src = "Just text\n\n* item";
        assert_eq!(rewrite_links(src, &config(false, false, true)), src);
    }

    #[test]
    fn test_markdown_citations_trim_before_references() {
        let md = rewrite_links("[a](https://x.com)\n\n", &config(false, false, true));
        assert!(md.starts_with("a⟨1⟩\n\n## References"));
    }

    #[test]
    fn test_markdown_default_config_skips_rewrite() {
        assert!(!MarkdownConfig::default().rewrites());
        assert!(config(false, false, true).rewrites());
    }
