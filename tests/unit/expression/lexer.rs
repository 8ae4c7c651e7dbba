use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn double_star_is_caret() {
    assert_eq!(
        kinds("x**2"),
        vec![
            TokenKind::Ident("x".to_owned()),
            TokenKind::Caret,
            TokenKind::Number(2.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn exponent_requires_digits_otherwise_e_is_an_ident() {
    assert_eq!(kinds("1e3"), vec![TokenKind::Number(1000.0), TokenKind::Eof]);
    assert_eq!(
        kinds("2e"),
        vec![
            TokenKind::Number(2.0),
            TokenKind::Ident("e".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn trailing_dot_number_is_accepted() {
    assert_eq!(kinds("3."), vec![TokenKind::Number(3.0), TokenKind::Eof]);
    assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5), TokenKind::Eof]);
}

#[test]
fn unknown_character_reports_offset() {
    let err = lex("x + $").unwrap_err();
    assert_eq!(err.offset, 4);
    assert!(err.message.contains('$'));
}
