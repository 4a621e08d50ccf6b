use super::*;

#[test]
fn test_default_context() {
    let ctx = ParseContext::new();
    assert_eq!(ctx, ParseContext::NONE);
    assert!(ctx.allows_do_block());
    assert!(!ctx.in_rescue());
    assert!(!ctx.pipe_is_separator());
    assert!(!ctx.in_def());
}

#[test]
fn test_with_flag() {
    let ctx = ParseContext::new().with(ParseContext::NO_DO_BLOCK);
    assert!(!ctx.allows_do_block());
    assert!(!ctx.in_rescue());
}

#[test]
fn test_without_flag() {
    let ctx = ParseContext::new()
        .with(ParseContext::IN_RESCUE)
        .with(ParseContext::IN_DEF);
    let ctx = ctx.without(ParseContext::IN_RESCUE);
    assert!(!ctx.in_rescue());
    assert!(ctx.in_def());
}

#[test]
fn test_removing_an_absent_flag_is_a_no_op() {
    let ctx = ParseContext::new().with(ParseContext::IN_PATTERN);
    assert_eq!(ctx.without(ParseContext::PIPE_IS_SEPARATOR), ctx);
}
