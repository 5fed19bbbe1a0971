use crate::Amount;

/// **VALUE**: Verifies amounts accept both string and numeric JSON.
///
/// **WHY THIS MATTERS**: Decimal fields arrive as strings from most endpoints but as
/// numbers from aggregates. A strict `String` field would fail the whole page.
#[test]
fn given_string_or_number_when_deserializing_amount_then_both_succeed() {
    let text: Amount = serde_json::from_str("\"12.50\"").unwrap();
    let integer: Amount = serde_json::from_str("12").unwrap();
    let float: Amount = serde_json::from_str("12.5").unwrap();

    assert_eq!(text.as_str(), "12.50");
    assert_eq!(integer.as_str(), "12");
    assert_eq!(float.as_str(), "12.5");
}

/// **VALUE**: Verifies amounts serialize back as plain strings.
#[test]
fn given_amount_when_serialized_then_is_plain_string() {
    assert_eq!(serde_json::to_string(&Amount::new("3.00")).unwrap(), "\"3.00\"");
}
