use fitsbridge::Error;
use fitsbridge::header::parse_header;

#[test]
fn test_parse_header_round_trip_preserves_order() {
    let map = parse_header("OBJECT:M31; EXPOSURE:30; FILTER:Ha").expect("well-formed header");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get("OBJECT"), Some("M31"));
    assert_eq!(map.get("EXPOSURE"), Some("30"));
    assert_eq!(map.get("FILTER"), Some("Ha"));

    let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["OBJECT", "EXPOSURE", "FILTER"]);
}

#[test]
fn test_parse_header_empty_input_yields_empty_map() {
    let map = parse_header("").expect("empty input is not an error");
    assert!(map.is_empty());
}

#[test]
fn test_parse_header_separator_only_yields_empty_map() {
    let map = parse_header("; ").expect("separator-only input is not an error");
    assert!(map.is_empty());

    let map = parse_header("; ; ; ").expect("repeated separators are not an error");
    assert!(map.is_empty());
}

#[test]
fn test_parse_header_trailing_separator_is_ignored() {
    let map = parse_header("OBJECT:M31; EXPOSURE:30; ").expect("trailing separator is fine");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("EXPOSURE"), Some("30"));
}

#[test]
fn test_parse_header_entry_without_colon_is_rejected() {
    let err = parse_header("BADENTRY; OBJECT:M31").unwrap_err();
    match err {
        Error::HeaderParse { entry } => assert_eq!(entry, "BADENTRY"),
        other => panic!("expected HeaderParse, got {other:?}"),
    }
}

#[test]
fn test_parse_header_empty_value_is_allowed() {
    let map = parse_header("COMMENT:; OBJECT:M31").expect("empty values are legal");
    assert_eq!(map.get("COMMENT"), Some(""));
    assert_eq!(map.get("OBJECT"), Some("M31"));
}

#[test]
fn test_parse_header_splits_on_first_colon_only() {
    let map = parse_header("DATE-OBS:2021-01-02T14:56:06").expect("colons in values are legal");
    assert_eq!(map.get("DATE-OBS"), Some("2021-01-02T14:56:06"));
}

#[test]
fn test_parse_header_duplicate_key_keeps_position_takes_last_value() {
    let map = parse_header("OBJECT:M31; FILTER:Ha; OBJECT:M42").expect("duplicates are legal");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("OBJECT"), Some("M42"));

    let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["OBJECT", "FILTER"], "first appearance wins for position");
}
