use expect_test::expect;
use flagbind::{Config, Duplicates, Error, Flag, OptionInfo, Parser};

fn long(name: &str) -> Flag {
    Flag::Long(name.to_owned())
}

#[test]
fn malformed_spellings_are_invalid_declarations() {
    let parser = Parser::new(["-a"]);

    for spelling in ["--", "-", "-ab", "--a=b"] {
        let error = parser.switch([spelling], "").err().unwrap();

        assert!(
            matches!(&error, Error::InvalidDeclaration { spelling: s, .. } if s == spelling),
            "{spelling:?}: {error:?}"
        );
        assert_eq!(error.exit_code(), 70);
    }
}

#[test]
fn positional_declarations_are_not_implemented() {
    let parser = Parser::new(["-a"]);
    let error = parser.value::<String>(["input"], "").err().unwrap();

    assert_eq!(error, Error::NotImplemented("input".to_owned()));
    assert!(!error.is_usage());
}

#[test]
fn declaration_needs_a_spelling() {
    let parser = Parser::new(["-a"]);
    let error = parser.switch(std::iter::empty(), "").err().unwrap();

    assert!(matches!(error, Error::InvalidDeclaration { .. }));
}

#[test]
fn duplicate_short_declarations_fail() {
    let parser = Parser::new(["-v"]);
    let verbose = parser.switch(["-v"], "").unwrap();

    let error = parser.count(["-v", "--verbose"], "").err().unwrap();
    assert_eq!(error, Error::DuplicateDeclaration(Flag::Short('v')));

    // The failed declaration registered nothing, so `--verbose` is unknown
    assert_eq!(verbose.get(), Ok(true));
    let parser = Parser::new(["--verbose"]);
    let _v = parser.switch(["-v"], "").unwrap();
    let _ = parser.count(["-v", "--verbose"], "");
    assert_eq!(parser.parse(), Err(Error::InvalidOption(long("verbose"))));
}

#[test]
fn repeated_short_spelling_in_one_declaration_fails() {
    let parser = Parser::new(["-v"]);
    let error = parser.switch(["-v", "-v"], "").err().unwrap();

    assert_eq!(error, Error::DuplicateDeclaration(Flag::Short('v')));
}

#[test]
fn short_and_long_key_spaces_are_separate() {
    let parser = Parser::new(["-v", "--v"]);
    let short = parser.switch(["-v"], "").unwrap();
    let long = parser.count(["--v"], "").unwrap();

    assert_eq!(short.get(), Ok(true));
    assert_eq!(long.get(), Ok(1));
}

#[test]
fn duplicate_long_declaration_replaces_by_default() {
    let parser = Parser::new(["--level", "3"]);
    let first = parser.value::<u32>(["-l", "--level"], "first").unwrap();
    let second = parser.value::<u32>(["--level"], "second").unwrap();

    assert_eq!(second.get(), Ok(3));
    assert_eq!(first.get(), Err(Error::MissingRequiredOption(Flag::Short('l'))));

    let options = parser.options().unwrap();
    assert_eq!(options[0].spellings, [Flag::Short('l')]);
    assert_eq!(options[1].spellings, [long("level")]);
}

#[test]
fn fully_replaced_declaration_is_not_listed() {
    let parser = Parser::new(["--level", "3"]);
    let _first = parser.value::<u32>(["--level"], "first").unwrap();
    let _second = parser.value::<u32>(["--level"], "second").unwrap();

    let options = parser.options().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].help.as_deref(), Some("second"));
}

#[test]
fn duplicate_long_declaration_can_be_rejected() {
    let config = Config {
        long_duplicates: Duplicates::Reject,
        ..Config::default()
    };
    let parser = Parser::with_config(["--level", "3"], config);
    let first = parser.value::<u32>(["--level"], "").unwrap();

    let error = parser.value::<u32>(["--level"], "").err().unwrap();
    assert_eq!(error, Error::DuplicateDeclaration(long("level")));
    assert_eq!(first.get(), Ok(3));
}

#[test]
fn terminator_is_opt_in() {
    assert!(!Config::default().terminator);

    let parser = Parser::new(["--"]);
    let verbose = parser.switch(["-v"], "").unwrap();
    assert_eq!(verbose.get(), Err(Error::InvalidOption(long(""))));

    let config = Config {
        terminator: true,
        ..Config::default()
    };
    let parser = Parser::with_config(["--"], config);
    let verbose = parser.switch(["-v"], "").unwrap();
    assert_eq!(verbose.get(), Ok(false));
}

#[test]
fn repeated_long_spelling_in_one_declaration_is_listed_once() {
    let parser = Parser::new(["--all"]);
    let all = parser.switch(["--all", "-a", "--all"], "").unwrap();

    let options = parser.options().unwrap();
    assert_eq!(options[0].spellings, [long("all"), Flag::Short('a')]);
    assert_eq!(options[0].to_string(), "--all, -a");
    assert_eq!(all.get(), Ok(true));
}

#[test]
fn options_describe_declarations() {
    let parser = Parser::new(["-v"]);
    let _verbose = parser.count(["-v", "--verbose"], "print more").unwrap();
    let _output = parser.value::<String>(["--output", "-o"], "").unwrap();

    assert_eq!(
        parser.options().unwrap(),
        [
            OptionInfo {
                spellings: vec![Flag::Short('v'), long("verbose")],
                help: Some("print more".to_owned()),
                takes_argument: false,
            },
            OptionInfo {
                spellings: vec![long("output"), Flag::Short('o')],
                help: None,
                takes_argument: true,
            },
        ]
    );

    let listing: Vec<String> = parser
        .options()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    expect![[r#"
        [
            "-v, --verbose",
            "--output, -o",
        ]
    "#]]
    .assert_debug_eq(&listing);
}
