use check_http_json::domain::predicate::Predicate;
use check_http_json::engine::checks::check_json;
use check_http_json::engine::json_assert::{Evaluation, evaluate};
use serde_json::Value;

fn parse(raw: &str) -> Value {
    serde_json::from_str(raw).expect("valid json")
}

fn reason_text(evaluation: &Evaluation) -> Option<String> {
    evaluation.reason.as_ref().map(ToString::to_string)
}

#[test]
fn flag_driven_predicates_against_flat_objects() {
    let cases: Vec<(Predicate, &str, bool, Option<&str>)> = vec![
        (
            Predicate::parse_exists("foo").expect("flag"),
            r#"{"baz":"qux", "foo":"bar"}"#,
            true,
            None,
        ),
        (
            Predicate::parse_equals("foo:bar").expect("flag"),
            r#"{"foo":"bar", "baz":"qux"}"#,
            true,
            None,
        ),
        (
            Predicate::parse_lte("foo:100").expect("flag"),
            r#"{"foo":50, "baz":"qux"}"#,
            true,
            None,
        ),
        (
            Predicate::parse_lte("foo:10.00001").expect("flag"),
            r#"{"baz":"qux", "foo":10}"#,
            true,
            None,
        ),
        (
            Predicate::parse_gte("foo:100").expect("flag"),
            r#"{"foo":150, "baz":"qux"}"#,
            true,
            None,
        ),
        (
            Predicate::parse_gte("foo:9.99999").expect("flag"),
            r#"{"baz":"qux", "foo":10}"#,
            true,
            None,
        ),
        (
            Predicate::parse_exists("foo").expect("flag"),
            r#"{"baz":"qux", "wibble":"wobble"}"#,
            false,
            None,
        ),
        (
            Predicate::parse_equals("foo:bar").expect("flag"),
            r#"{"baz":"qux", "foo":"fub"}"#,
            true,
            Some("key 'foo' does not equal 'bar'"),
        ),
        (
            Predicate::parse_lte("foo:10").expect("flag"),
            r#"{"foo":"bar", "baz":"qux"}"#,
            true,
            Some("key 'foo' value is not numeric"),
        ),
        (
            Predicate::parse_lte("foo:1").expect("flag"),
            r#"{"baz":"qux", "foo":1000000000000000}"#,
            true,
            Some("key 'foo' is greater than '1'"),
        ),
        (
            Predicate::parse_gte("foo:10").expect("flag"),
            r#"{"baz":"qux", "foo":"10"}"#,
            true,
            Some("key 'foo' value is not numeric"),
        ),
        (
            Predicate::parse_gte("foo:1000").expect("flag"),
            r#"{"baz":"qux", "foo":1}"#,
            true,
            Some("key 'foo' is less than '1000'"),
        ),
    ];

    for (predicate, raw, matched, reason) in cases {
        let evaluation = evaluate(&parse(raw), &predicate);
        assert_eq!(evaluation.matched, matched, "{predicate} on {raw}");
        assert_eq!(reason_text(&evaluation).as_deref(), reason, "{predicate} on {raw}");
    }
}

#[test]
fn nested_and_array_documents() {
    let equals = |key: &str, pattern: &str| Predicate::equals(key, pattern).expect("pattern");
    let cases: Vec<(&str, Predicate, bool, Option<&str>)> = vec![
        (
            r#"{"Foo":1,"Baz":"Qux"}"#,
            equals("Baz", "Qux"),
            true,
            None,
        ),
        (
            r#"{"Animal":{"Name":"Platypus", "Order":"Monotremata"}}"#,
            equals("Name", "Platypus"),
            true,
            None,
        ),
        (
            r#"{"Animal":{"Mammal":{"Name":"Platypus"}}}"#,
            equals("Name", "Platypus"),
            true,
            None,
        ),
        (
            r#"[{"Foo":1,"Baz":"Qux"}, {"success":true}]"#,
            equals("success", "true"),
            true,
            None,
        ),
        (
            r#"[{"Foo":1,"Baz":"Qux"}, {"success":true}, {"success":false}]"#,
            equals("success", "true"),
            true,
            None,
        ),
        (
            r#"[{"Foo":100,"Baz":"Qux"}]"#,
            Predicate::less_or_equal("Foo", 150.0),
            true,
            None,
        ),
        (
            r#"[{"Foo":100,"Baz":"Qux"}]"#,
            Predicate::less_or_equal("Foo", 50.0),
            true,
            Some("key 'Foo' is greater than '50'"),
        ),
        (
            r#"[{"Foo":100,"Baz":"Qux"}]"#,
            Predicate::greater_or_equal("Foo", 50.0),
            true,
            None,
        ),
        (
            r#"[{"Foo":100,"Baz":"Qux"}]"#,
            Predicate::greater_or_equal("Foo", 150.0),
            true,
            Some("key 'Foo' is less than '150'"),
        ),
        (
            r#"{"Wibble":"Wobble","Baz":"Qux"}"#,
            equals("Foo", "Baz"),
            false,
            None,
        ),
        (
            r#"{"Foo":"Ber","Baz":"Qux"}"#,
            equals("Foo", "Bar"),
            true,
            Some("key 'Foo' does not equal 'Bar'"),
        ),
        ("[]", equals("success", "true"), false, None),
        ("{}", equals("success", "true"), false, None),
    ];

    for (raw, predicate, matched, reason) in cases {
        let evaluation = evaluate(&parse(raw), &predicate);
        assert_eq!(evaluation.matched, matched, "{predicate} on {raw}");
        assert_eq!(reason_text(&evaluation).as_deref(), reason, "{predicate} on {raw}");
    }
}

#[test]
fn predicates_sharing_a_key_are_independent() {
    let document = parse(r#"{"data":{"latency":120,"status":"degraded"}}"#);
    let predicates = vec![
        Predicate::parse_gte("latency:100").expect("gte"),
        Predicate::parse_lte("latency:100").expect("lte"),
        Predicate::parse_equals("status:^ok$").expect("equals"),
    ];

    let failures: Vec<String> = check_json(&document, &predicates)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        failures,
        vec![
            "key 'latency' is greater than '100'",
            "key 'status' does not equal '^ok$'",
        ]
    );
}

#[test]
fn evaluation_does_not_mutate_the_document() {
    let raw = r#"{"items":[{"id":1},{"id":"two"},{"id":null}]}"#;
    let document = parse(raw);
    let predicate = Predicate::parse_gte("id:1").expect("gte");

    let first = evaluate(&document, &predicate);
    let second = evaluate(&document, &predicate);
    assert_eq!(first, second);
    assert_eq!(document, parse(raw));
}
