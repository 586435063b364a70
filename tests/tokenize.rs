use linebeam::{Token, tokenize};

#[test]
fn splits_key_and_value() {
    assert_eq!(tokenize("ELEMENT01=3", '='), Some(Token::new("ELEMENT01", "3")));
}

#[test]
fn splits_on_first_delimiter_only() {
    let token = tokenize("ELEMENT01=3=4", '=').unwrap();
    assert_eq!(token.key, "ELEMENT01");
    assert_eq!(token.value, "3=4");
}

#[test]
fn lines_without_delimiter_are_absent() {
    assert_eq!(tokenize("discarded:incorrect", '='), None);
    assert_eq!(tokenize("", '='), None);
}

#[test]
fn empty_key_or_value_is_still_a_token() {
    assert_eq!(tokenize("=5", '='), Some(Token::new("", "5")));
    assert_eq!(tokenize("KEY=", '='), Some(Token::new("KEY", "")));
}

#[test]
fn custom_delimiter() {
    assert_eq!(
        tokenize("discarded:incorrect", ':'),
        Some(Token::new("discarded", "incorrect"))
    );
}

#[test]
fn rejoin_reproduces_the_line() {
    for line in ["a=b", "a=b=c", "=", "ELEMENT06=not an integer"] {
        assert_eq!(tokenize(line, '=').unwrap().rejoin('='), line);
    }
}

#[test]
fn multibyte_delimiter() {
    let token = tokenize("clé→valeur", '→').unwrap();
    assert_eq!(token, Token::new("clé", "valeur"));
    assert_eq!(token.rejoin('→'), "clé→valeur");
}
