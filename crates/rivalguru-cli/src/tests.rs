use super::*;

#[test]
fn parses_website_with_defaults() {
    let cli =
        Cli::try_parse_from(["rivalguru-cli", "microsoft.com"]).expect("expected valid cli args");

    assert_eq!(cli.website, "microsoft.com");
    assert!(!cli.json);
    assert_eq!(cli.timeout_secs, 330);
}

#[test]
fn parses_backend_url_and_json_flag() {
    let cli = Cli::try_parse_from([
        "rivalguru-cli",
        "apple.com",
        "--backend-url",
        "http://analysis.internal:9000",
        "--json",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.backend_url, "http://analysis.internal:9000");
    assert!(cli.json);
}

#[test]
fn website_is_required() {
    assert!(Cli::try_parse_from(["rivalguru-cli"]).is_err());
}

#[test]
fn json_flag_takes_no_value() {
    let cli = Cli::try_parse_from(["rivalguru-cli", "--json", "google.com"])
        .expect("expected valid cli args");
    assert!(cli.json);
    assert_eq!(cli.website, "google.com");
}
