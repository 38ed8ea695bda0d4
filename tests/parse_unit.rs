use seash::{parse_pipeline, parse_tokens, ErrorKind};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn pipeline_black_box() {
    let tokens = parse_tokens("echo hi | cat", false).unwrap();
    let plan = parse_pipeline(tokens).unwrap();
    assert!(plan.is_pipeline());
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.segments()[0].argv(), strings(&["echo", "hi"]).as_slice());
    assert_eq!(plan.segments()[1].program(), "cat");
    assert!(plan.segments()[1].arguments().is_empty());
}

#[test]
fn quoting_black_box() {
    assert!(parse_tokens("", false).unwrap().is_empty());
    assert_eq!(parse_tokens("ls -l", false).unwrap(), strings(&["ls", "-l"]));
    assert_eq!(
        parse_tokens("echo \"a b\" c", false).unwrap(),
        strings(&["echo", "a b", "c"])
    );
    assert_eq!(parse_tokens("echo 'a\\b'", false).unwrap(), strings(&["echo", "a\\b"]));
    assert_eq!(parse_tokens("echo a\\ b", false).unwrap(), strings(&["echo", "a b"]));
    assert_eq!(parse_tokens("echo a\tb", false).unwrap(), strings(&["echo", "a\tb"]));
    assert_eq!(parse_tokens("echo a\\", false).unwrap(), strings(&["echo", "a"]));
}

#[test]
fn unterminated_quote_profiles() {
    assert_eq!(parse_tokens("echo \"abc", false).unwrap(), strings(&["echo", "abc"]));
    let err = parse_tokens("echo \"abc", true).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.position, Some(5));
}

#[test]
fn separator_only_when_standalone() {
    let plan = parse_pipeline(parse_tokens("a|b", false).unwrap()).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.segments()[0].program(), "a|b");

    let plan = parse_pipeline(strings(&["a", "|", "b", "|", "c"])).unwrap();
    let programs: Vec<&str> = plan.segments().iter().map(|s| s.program()).collect();
    assert_eq!(programs, vec!["a", "b", "c"]);
}

#[test]
fn empty_segments_are_syntax_errors() {
    for (tokens, pos) in [
        (strings(&["|", "a"]), 0),
        (strings(&["a", "|"]), 1),
        (strings(&["a", "|", "|", "b"]), 2),
    ] {
        let err = parse_pipeline(tokens.clone()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax, "{tokens:?}");
        assert_eq!(err.position, Some(pos), "{tokens:?}");
        assert_eq!(err.exit_status(), 2);
    }
}
