//! Integration tests for the bundled [`StringCase`] extension.

use quill::{
    ErrorKind, ExtensionError, Quill, QuillError, Value,
    config::{AppConfig, ExtensionsConfig},
    extensions::StringCase,
};

const EMPTY: &str = "";
const CHL: &str = "l";
const CHU: &str = "U";
const HELLO: &str = "heLLo WORLD";
const NAME: &str = "DoLly mollY";
const SYM: &str = "$%[]123";

fn quill() -> Quill {
    let config = AppConfig::new(ExtensionsConfig::default().with_string_case("S"));
    Quill::with_config(config).expect("Failed to configure")
}

/// Format each input with `template` and compare with the expected outputs.
fn check(template: &str, cases: &[(&str, &str)]) {
    let quill = quill();
    for (input, expected) in cases {
        let output = quill
            .format(template, &[Value::from(*input)])
            .unwrap_or_else(|e| panic!("{template} with {input:?} failed: {e}"));
        assert_eq!(&output, expected, "{template} with {input:?}");
    }
}

#[test]
fn test_invalid_formats() {
    let quill = quill();
    for template in [
        "%[ ]S", "%[z]S", "%[u]S", "%[L]S", "%[c]S", "%[ U]S", "%[FU]S", "%[fl]S", "%[CU]S",
        "%[cU]S", "%[cl]S",
    ] {
        let err = quill
            .format(template, &[Value::from(HELLO)])
            .expect_err(template);
        assert_eq!(err.kind(), ErrorKind::Extension, "{template}");
        assert!(
            matches!(
                err,
                QuillError::Extension {
                    source: ExtensionError::UnknownFormat(_),
                    ..
                }
            ),
            "{template}"
        );
    }
}

#[test]
fn test_unknown_format_message() {
    let err = quill().format("%[z]S", &[Value::from("x")]).unwrap_err();
    assert_eq!(err.to_string(), "extension 'S' failed: unknown format 'z'");
}

#[test]
fn test_as_is() {
    check(
        "%[]S",
        &[
            (EMPTY, EMPTY),
            (CHL, CHL),
            (CHU, CHU),
            (HELLO, HELLO),
            (NAME, NAME),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_upper_case() {
    let cases = [
        (EMPTY, EMPTY),
        (CHL, "L"),
        (CHU, "U"),
        (HELLO, "HELLO WORLD"),
        (NAME, "DOLLY MOLLY"),
        (SYM, SYM),
    ];
    check("%S", &cases);
    check("%[U]S", &cases);
}

#[test]
fn test_lower_case() {
    check(
        "%[l]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "l"),
            (CHU, "u"),
            (HELLO, "hello world"),
            (NAME, "dolly molly"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_first_upper() {
    check(
        "%[F]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "L"),
            (CHU, "U"),
            (HELLO, "HeLLo WORLD"),
            (NAME, "DoLly mollY"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_first_lower() {
    check(
        "%[f]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "l"),
            (CHU, "u"),
            (HELLO, "heLLo WORLD"),
            (NAME, "doLly mollY"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_first_upper_rest_lower() {
    check(
        "%[Fl]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "L"),
            (CHU, "U"),
            (HELLO, "Hello world"),
            (NAME, "Dolly molly"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_first_lower_rest_upper() {
    check(
        "%[fU]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "l"),
            (CHU, "u"),
            (HELLO, "hELLO WORLD"),
            (NAME, "dOLLY MOLLY"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_capitalize_words() {
    check(
        "%[C]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "L"),
            (CHU, "U"),
            ("l U", "L U"),
            (HELLO, "HeLLo WORLD"),
            (NAME, "DoLly MollY"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_capitalize_words_rest_lower() {
    check(
        "%[Cl]S",
        &[
            (EMPTY, EMPTY),
            (CHL, "L"),
            (CHU, "U"),
            ("l U", "L U"),
            (HELLO, "Hello World"),
            (NAME, "Dolly Molly"),
            (SYM, SYM),
        ],
    );
}

#[test]
fn test_with_width_and_arguments() {
    let quill = quill();
    let args = [
        Value::from("cracker"),
        Value::from("Polly"),
        Value::from("wants"),
    ];
    assert_eq!(
        quill.format("%2$S %3$S a %1$S", &args).unwrap(),
        "POLLY WANTS a CRACKER"
    );
    assert_eq!(
        quill
            .format("Hello %(who)S!", &[Value::object([("who", "world")])])
            .unwrap(),
        "Hello WORLD!"
    );
    assert_eq!(
        quill.format("%5.1S", &[Value::from("xxxxxx")]).unwrap(),
        "    X"
    );
}

#[test]
fn test_registered_under_other_letter() {
    let quill = Quill::new();
    quill.register_extension("K", StringCase).unwrap();
    assert_eq!(
        quill.format("%[Cl]K", &[Value::from("ab cd")]).unwrap(),
        "Ab Cd"
    );
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [extensions]
        string_case = "W"
        "#,
    )
    .expect("Failed to parse config");

    let quill = Quill::with_config(config).unwrap();
    assert_eq!(quill.format("%W", &[Value::from("up")]).unwrap(), "UP");
}

#[test]
fn test_config_rejects_invalid_letter() {
    let config = AppConfig::new(ExtensionsConfig::default().with_string_case("SS"));
    let err = Quill::with_config(config).unwrap_err();
    assert!(matches!(err, QuillError::InvalidSpecifier(letter) if letter == "SS"));
}
