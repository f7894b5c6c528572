//! Unit tests for the tokenizer

use super::*;

fn kinds(source: &str) -> Vec<FragmentKind> {
    tokenize(source).map(|f| f.unwrap().kind).collect()
}

#[test]
fn test_tokenize_plain_text() {
    let fragments: Vec<_> = tokenize("just text").collect::<Result<_, _>>().unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].kind, FragmentKind::Text);
    assert_eq!(fragments[0].raw, "just text");
}

#[test]
fn test_tokenize_empty_input() {
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn test_tokenize_classifies_fragments() {
    assert_eq!(
        kinds("a{{b}}c{% if x %}d{% end %}"),
        vec![
            FragmentKind::Text,
            FragmentKind::Variable,
            FragmentKind::Text,
            FragmentKind::OpenBlock,
            FragmentKind::Text,
            FragmentKind::CloseBlock,
        ]
    );
}

#[test]
fn test_tokenize_adjacent_tags_produce_no_empty_text() {
    assert_eq!(
        kinds("{{a}}{{b}}"),
        vec![FragmentKind::Variable, FragmentKind::Variable]
    );
}

#[test]
fn test_tokenize_inner_and_command() {
    let fragments: Vec<_> = tokenize("{{  post.title }}{%   call log 'x' %}")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(fragments[0].inner(), "post.title");
    assert_eq!(fragments[1].command(), Some("call"));
    assert_eq!(fragments[1].arguments(), "log 'x'");
    assert_eq!(fragments[0].command(), None);
}

#[test]
fn test_tokenize_is_non_greedy() {
    let fragments: Vec<_> = tokenize("{{a}} and {{b}}").collect::<Result<_, _>>().unwrap();
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].raw, "{{a}}");
    assert_eq!(fragments[1].raw, " and ");
    assert_eq!(fragments[2].raw, "{{b}}");
}

#[test]
fn test_tokenize_single_braces_are_text() {
    assert_eq!(kinds("fn main() { x }"), vec![FragmentKind::Text]);
    assert_eq!(kinds("{ {a} }"), vec![FragmentKind::Text]);
}

#[test]
fn test_tokenize_triple_brace_closes_at_first_pair() {
    let raws: Vec<_> = tokenize("{{a}}}")
        .map(|f| f.unwrap().raw)
        .collect();
    assert_eq!(raws, vec!["{{a}}", "}"]);
}

#[test]
fn test_tokenize_end_with_label_is_close_block() {
    assert_eq!(kinds("{% end if %}"), vec![FragmentKind::CloseBlock]);
    assert_eq!(kinds("{% endless %}"), vec![FragmentKind::OpenBlock]);
}

#[test]
fn test_tokenize_tracks_positions_and_lines() {
    let fragments: Vec<_> = tokenize("line one\n{{a}}\n\n{% each xs %}")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(fragments[1].start, 9);
    assert_eq!(fragments[1].line, 2);
    assert_eq!(fragments[2].line, 2);
    assert_eq!(fragments[3].line, 4);
    assert_eq!(fragments[3].end(), fragments[3].start + "{% each xs %}".len());
}

#[test]
fn test_tokenize_multiline_tag() {
    let fragments: Vec<_> = tokenize("{%\nif x\n%}{{y}}").collect::<Result<_, _>>().unwrap();
    assert_eq!(fragments[0].command(), Some("if"));
    assert_eq!(fragments[1].line, 3);
}

#[test]
fn test_tokenize_unterminated_variable() {
    let mut tokens = tokenize("Value: {{title");
    match tokens.next() {
        Some(Err(TemplateError::Syntax { fragment, line, .. })) => {
            assert_eq!(fragment, "{{title");
            assert_eq!(line, 1);
        }
        other => panic!("Expected Syntax error, got {:?}", other),
    }
    assert!(tokens.next().is_none());
}

#[test]
fn test_tokenize_unterminated_block_does_not_swallow_document() {
    let source = "{% if x }}\nlots\nof\ntext";
    let result: Result<Vec<_>, _> = tokenize(source).collect();
    match result {
        Err(TemplateError::Syntax { fragment, message, .. }) => {
            assert_eq!(fragment, "{% if x }}");
            assert!(message.contains("%}"));
        }
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_tokenize_closing_delimiter_must_match_opener() {
    // `%}` does not close a variable tag
    assert!(tokenize("{{ a %}").any(|f| f.is_err()));
}

#[test]
fn test_tokenize_is_restartable() {
    let tokens = tokenize("a{{b}}c");
    let first: Vec<_> = tokens.clone().map(|f| f.unwrap().raw).collect();
    let second: Vec<_> = tokens.map(|f| f.unwrap().raw).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["a", "{{b}}", "c"]);
}

#[test]
fn test_tokenize_fragments_serialize_to_json() {
    let fragment = tokenize("{{a}}").next().unwrap().unwrap();
    let json = serde_json::to_value(&fragment).unwrap();
    assert_eq!(json["kind"], "variable");
    assert_eq!(json["raw"], "{{a}}");
    assert_eq!(json["line"], 1);
}
