//! Tests for key resolution, derivation and Makefile.in emission

use super::*;
use crate::error::ExportError;
use crate::registry::{ConfigRegistry, MapRegistry};

use tempfile::TempDir;

/// Registry with every key the full variant requires.
fn full_registry() -> MapRegistry {
    MapRegistry::from_pairs([
        ("rubyhdrdir", "/usr/include/ruby"),
        ("arch", "x86_64-linux"),
        ("libdir", "/usr/lib"),
        ("RUBY_SO_NAME", "ruby3.0"),
        ("LIBRUBYARG_SHARED", ""),
        ("LIBRUBYARG_STATIC", "-lruby"),
    ])
}

/// Parse a generated fragment back into (name, value) pairs.
fn parse_fragment(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(|line| {
            let (name, value) = line.split_once(" = ").expect("line has no separator");
            (name.trim_end().to_string(), value.to_string())
        })
        .collect()
}

mod resolve_tests {
    use super::*;

    #[test]
    fn test_minimal_record() {
        let registry = MapRegistry::from_pairs([("rubyhdrdir", "/opt/ruby/include")]);
        let record = resolve(&registry, Variant::Minimal).unwrap();

        assert_eq!(record.len(), 1);
        assert_eq!(record[0].0, ExportKey::RubyInclude);
        assert_eq!(record[0].1, "/opt/ruby/include");
    }

    #[test]
    fn test_full_record_order() {
        let record = resolve(&full_registry(), Variant::Full).unwrap();
        let names: Vec<&str> = record.iter().map(|(k, _)| k.name()).collect();

        assert_eq!(
            names,
            vec![
                "RUBY_INCLUDE",
                "RUBY_INCLUDE_ARCH",
                "RUBY_LIB",
                "RUBY_SO_NAME",
                "LIBRUBYARG_SHARED",
                "LIBRUBYARG_STATIC",
                "LIBRUBYARG",
            ]
        );
    }

    #[test]
    fn test_include_arch_join() {
        let record = resolve(&full_registry(), Variant::Full).unwrap();
        let include_arch = &record[1].1;

        let expected = std::path::Path::new("/usr/include/ruby")
            .join("x86_64-linux")
            .to_string_lossy()
            .into_owned();
        assert_eq!(*include_arch, expected);
    }

    #[test]
    fn test_missing_key_names_the_key() {
        // Everything the full variant needs except libdir
        let full = full_registry();
        let mut registry = MapRegistry::new();
        for key in [
            "rubyhdrdir",
            "arch",
            "RUBY_SO_NAME",
            "LIBRUBYARG_SHARED",
            "LIBRUBYARG_STATIC",
        ] {
            registry.set(key, &full.lookup(key).unwrap());
        }

        let err = resolve(&registry, Variant::Full).unwrap_err();
        match err {
            ExportError::MissingKey(key) => assert_eq!(key, "libdir"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_fallback_uses_static_when_shared_empty() {
        let record = resolve(&full_registry(), Variant::Full).unwrap();
        let libruby_arg = &record[6].1;
        assert_eq!(*libruby_arg, "-lruby");
    }

    #[test]
    fn test_fallback_prefers_shared_when_present() {
        let mut registry = full_registry();
        registry.set("LIBRUBYARG_SHARED", "-lruby-shared");

        let record = resolve(&registry, Variant::Full).unwrap();
        assert_eq!(record[6].1, "-lruby-shared");
    }

    #[test]
    fn test_passthrough_exports_registry_value_verbatim() {
        let mut registry = full_registry();
        registry.set("LIBRUBYARG", "-Wl,-rpath -lruby3.0");

        let record = resolve(&registry, Variant::Passthrough).unwrap();
        assert_eq!(record[6].1, "-Wl,-rpath -lruby3.0");
    }

    #[test]
    fn test_passthrough_does_not_fall_back() {
        // Policies never mix: passthrough requires its own key even though
        // the shared/static pair is present
        let err = resolve(&full_registry(), Variant::Passthrough).unwrap_err();
        match err {
            ExportError::MissingKey(key) => assert_eq!(key, "LIBRUBYARG"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("minimal".parse::<Variant>().unwrap(), Variant::Minimal);
        assert_eq!("full".parse::<Variant>().unwrap(), Variant::Full);
        assert_eq!(
            "passthrough".parse::<Variant>().unwrap(),
            Variant::Passthrough
        );
        assert!(matches!(
            "shared".parse::<Variant>(),
            Err(ExportError::UnknownVariant(_))
        ));
    }
}

mod writer_tests {
    use super::*;

    #[test]
    fn test_line_count_per_variant() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());
        let registry = full_registry();

        for variant in [Variant::Minimal, Variant::Full] {
            let report = writer.export(&registry, variant).unwrap();
            assert_eq!(report.entries, variant.line_count());

            let text = std::fs::read_to_string(report.path).unwrap();
            assert_eq!(text.lines().count(), variant.line_count());
        }
    }

    #[test]
    fn test_round_trip_and_idempotence() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());
        let registry = full_registry();

        let report = writer.export(&registry, Variant::Full).unwrap();
        let first = std::fs::read_to_string(&report.path).unwrap();

        let pairs = parse_fragment(&first);
        assert_eq!(pairs[0], ("RUBY_INCLUDE".to_string(), "/usr/include/ruby".to_string()));
        assert_eq!(pairs[3], ("RUBY_SO_NAME".to_string(), "ruby3.0".to_string()));
        assert_eq!(pairs[4], ("LIBRUBYARG_SHARED".to_string(), String::new()));

        writer.export(&registry, Variant::Full).unwrap();
        let second = std::fs::read_to_string(&report.path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());

        let registry = MapRegistry::from_pairs([("rubyhdrdir", "/usr/include/ruby")]);
        let report = writer.export(&registry, Variant::Minimal).unwrap();

        let text = std::fs::read_to_string(report.path).unwrap();
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_missing_key_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());

        let sentinel = "SENTINEL = do-not-touch\n";
        std::fs::write(writer.path(), sentinel).unwrap();

        let empty = MapRegistry::new();
        let err = writer.export(&empty, Variant::Full).unwrap_err();
        assert!(matches!(err, ExportError::MissingKey(_)));

        let text = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(text, sentinel);
    }

    #[test]
    fn test_overwrites_previous_fragment() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());
        let registry = full_registry();

        writer.export(&registry, Variant::Full).unwrap();
        writer.export(&registry, Variant::Minimal).unwrap();

        // Truncate semantics: no stale lines from the longer fragment
        let text = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_scenario_exact_output() {
        let dir = TempDir::new().unwrap();
        let writer = MakefileWriter::new(dir.path());

        let report = writer.export(&full_registry(), Variant::Full).unwrap();
        let text = std::fs::read_to_string(report.path).unwrap();

        // Line-by-line literals: the empty-value line ends in "= " and a
        // multi-line raw string would lose that space to whitespace trimming
        let expected = [
            "RUBY_INCLUDE      = /usr/include/ruby\n",
            "RUBY_INCLUDE_ARCH = /usr/include/ruby/x86_64-linux\n",
            "RUBY_LIB          = /usr/lib\n",
            "RUBY_SO_NAME      = ruby3.0\n",
            "LIBRUBYARG_SHARED = \n",
            "LIBRUBYARG_STATIC = -lruby\n",
            "LIBRUBYARG        = -lruby\n",
        ]
        .concat();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "LIBRUBYARG_SHARED = ");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist
        let writer = MakefileWriter::new(dir.path().join("no-such-dir"));

        let err = writer.export(&full_registry(), Variant::Full).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
