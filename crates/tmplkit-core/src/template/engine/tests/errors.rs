//! Compile and render error tests

use super::*;

fn compile_err(source: &str) -> TemplateError {
    compile(source).unwrap_err()
}

fn assert_structural(source: &str, expected_fragment: &str) {
    match compile_err(source) {
        TemplateError::Structural { fragment, .. } => assert_eq!(fragment, expected_fragment),
        other => panic!("Expected Structural error for {:?}, got {:?}", source, other),
    }
}

fn assert_syntax(source: &str, expected_message: &str) {
    match compile_err(source) {
        TemplateError::Syntax { message, .. } => assert!(
            message.contains(expected_message),
            "message {:?} does not contain {:?}",
            message,
            expected_message
        ),
        other => panic!("Expected Syntax error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_lone_end_is_structural() {
    assert_structural("{% end %}", "{% end %}");
    assert_structural("{% if x %}{% end %}{% end %}", "{% end %}");
}

#[test]
fn test_unclosed_block_is_structural() {
    assert_structural("{% if x %}", "{% if x %}");
    assert_structural("{% each xs %}{% if x %}{% end %}", "{% each xs %}");
}

#[test]
fn test_unclosed_block_reports_opening_line() {
    match compile_err("a\nb\n{% each xs %}\n{{it}}") {
        TemplateError::Structural { line, message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("never closed"));
        }
        other => panic!("Expected Structural error, got {:?}", other),
    }
}

#[test]
fn test_else_errors_are_structural() {
    assert_structural("{% else %}", "{% else %}");
    assert_structural("{% each xs %}{% else %}{% end %}", "{% else %}");
    assert_structural(
        "{% if x %}a{% else %}b{% else %}c{% end %}",
        "{% else %}",
    );
}

#[test]
fn test_unknown_block_command_is_structural() {
    assert_structural("{% for x in xs %}{% end %}", "{% for x in xs %}");
}

#[test]
fn test_malformed_block_arguments_are_syntax_errors() {
    assert_syntax("{{ }}", "empty variable tag");
    assert_syntax("{%  %}", "empty block tag");
    assert_syntax("{% if %}{% end %}", "if expects");
    assert_syntax("{% if a b %}{% end %}", "if expects");
    assert_syntax("{% if a =~ b %}{% end %}", "unknown operator '=~'");
    assert_syntax("{% each %}{% end %}", "each expects");
    assert_syntax("{% call %}", "call expects a function name");
    assert_syntax("{% call 'f' %}", "must be a name");
    assert_syntax("{% call f a=1 a=2 %}", "duplicate keyword argument 'a'");
    assert_syntax("{% if x %}{% else y %}{% end %}", "else takes no arguments");
    assert_syntax("{% if x %}a{% end garbage %}", "end takes no arguments");
}

#[test]
fn test_unterminated_tag_is_syntax_error() {
    assert_syntax("Hello {{name", "unterminated tag");
    assert_syntax("{% if x }}", "unterminated tag");
}

#[test]
fn test_unparseable_expression_fails_at_compile_time() {
    match compile_err("{{ a + b }}") {
        TemplateError::Expression { expr, .. } => assert_eq!(expr, "a + b"),
        other => panic!("Expected Expression error, got {:?}", other),
    }
    assert!(matches!(
        compile_err("{% each [1, %}{% end %}"),
        TemplateError::Expression { .. }
    ));
}

#[test]
fn test_end_with_arguments_is_rejected_even_when_unmatched() {
    match compile_err("{% end if %}") {
        TemplateError::Syntax { fragment, .. } => assert_eq!(fragment, "{% end if %}"),
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_malformed_number_is_expression_error_not_lookup() {
    for source in ["{{ 99999999999999999999 }}", "{{ 1-2 }}", "{% if n > 1e %}{% end %}"] {
        assert!(
            matches!(compile_err(source), TemplateError::Expression { .. }),
            "{}",
            source
        );
    }
}

#[test]
fn test_missing_name_is_context_error_with_full_path() {
    let mut ctx = Context::new();
    ctx.insert("a", Map::new());
    let err = render("{{a.b}}", &ctx).unwrap_err();
    assert_eq!(
        err,
        TemplateError::Context {
            name: "a.b".to_string()
        }
    );
}

#[test]
fn test_path_through_scalar_is_context_error() {
    let mut ctx = Context::new();
    ctx.insert("title", "x");
    assert!(matches!(
        render("{{title.length}}", &ctx),
        Err(TemplateError::Context { ref name }) if name == "title.length"
    ));
}

#[test]
fn test_parent_prefix_outside_loop_is_context_error() {
    let mut ctx = Context::new();
    ctx.insert("site", "x");
    assert!(matches!(
        render("{{..site}}", &ctx),
        Err(TemplateError::Context { .. })
    ));
}

#[test]
fn test_render_error_returns_no_partial_output() {
    let template = compile("before {{missing}} after").unwrap();
    assert!(template.render(&Context::new()).is_err());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        compile_err("x\n{% end %}").to_string(),
        "Structural error at line 2: 'end' without a matching open block in '{% end %}'"
    );
    assert_eq!(
        render("{{a.b}}", &Context::new()).unwrap_err().to_string(),
        "Could not resolve 'a.b' in the template context"
    );
}
