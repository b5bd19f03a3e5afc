use super::*;

#[test]
fn redirect_path_stays_readable() {
    assert_eq!(encode_query_value("/empresa/acme/mis-turnos"), "/empresa/acme/mis-turnos");
}

#[test]
fn nested_query_separators_escaped() {
    assert_eq!(encode_query_value("/reservar/acme?a=1&b=2#top"), "/reservar/acme?a=1%26b=2%23top");
}

#[test]
fn spaces_plus_and_non_ascii_escaped() {
    assert_eq!(encode_query_value("a b+c"), "a%20b%2Bc");
    assert_eq!(encode_query_value("peluquería"), "peluquer%C3%ADa");
}

#[test]
fn decode_reverses_encode() {
    let raw = "/reservar/acme?a=1&b=peluquería 2";
    assert_eq!(decode_query_value(&encode_query_value(raw)), raw);
}

#[test]
fn decode_keeps_malformed_escapes() {
    assert_eq!(decode_query_value("100%"), "100%");
    assert_eq!(decode_query_value("%zz+x"), "%zz x");
}

#[test]
fn decode_ignores_sign_inside_escape() {
    assert_eq!(decode_query_value("a%+1b"), "a% 1b");
    assert_eq!(decode_query_value("%-1"), "%-1");
}

#[test]
fn decode_encoded_plus_stays_plus() {
    assert_eq!(decode_query_value("a%2Bb+c"), "a+b c");
}

#[test]
fn form_encoding_uses_plus_for_space() {
    let fields = vec![("username".to_owned(), "ana@x.test".to_owned()), ("password".to_owned(), "p w&1".to_owned())];
    assert_eq!(encode_form(&fields), "username=ana%40x.test&password=p+w%261");
}

#[test]
fn parse_query_decodes_pairs() {
    assert_eq!(parse_query("redirect=%2Fempresa%2Facme&flag"), vec![
        ("redirect".to_owned(), "/empresa/acme".to_owned()),
        ("flag".to_owned(), String::new()),
    ]);
}
