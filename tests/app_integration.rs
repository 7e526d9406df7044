use std::fs;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const CURRENCIES: &str = r#"{
        "EUR": "Euro",
        "GBP": "British Pound",
        "JPY": "Japanese Yen",
        "USD": "United States Dollar"
    }"#;

    pub const HISTORY: &str = r#"{
        "amount": 1.0,
        "base": "EUR",
        "start_date": "2023-12-29",
        "end_date": "2024-01-03",
        "rates": {
            "2024-01-03": {"USD": 1.0919, "EUR": 0.9158},
            "2023-12-29": {"USD": 1.105, "EUR": 0.905},
            "2024-01-02": {"USD": 1.0956, "EUR": 0.9127}
        }
    }"#;

    pub async fn create_gallery_mock_server(latest: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(latest))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CURRENCIES))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn mount_pair(mock_server: &MockServer, base: &str, target: &str, rate: f64) {
        let latest = format!(
            r#"{{"amount": 1.0, "base": "{base}", "date": "2024-01-03", "rates": {{"{target}": {rate}}}}}"#
        );
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", base))
            .and(query_param("symbols", target))
            .respond_with(ResponseTemplate::new(200).set_body_string(latest))
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/\d{4}-\d{2}-\d{2}\.\.$"))
            .and(query_param("base", base))
            .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY))
            .mount(mock_server)
            .await;
    }

    pub fn write_config(dir: &tempfile::TempDir, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.path().join("config.yaml");
        let config_content = format!(
            r#"
        providers:
          frankfurter:
            base_url: {base_url}
            timeout_secs: 2
        base_currency: "EUR"
        history_days: 7
        theme: light
    "#
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

#[test_log::test(tokio::test)]
async fn test_full_gallery_flow_with_mock() {
    let mock_server = test_utils::create_gallery_mock_server(
        r#"{"amount": 1.0, "base": "EUR", "date": "2024-01-03", "rates": {"USD": 1.0919, "GBP": 0.8625, "JPY": 155.79}}"#,
    )
    .await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri());

    let result = fxr::run_command(
        fxr::AppCommand::Gallery {
            search: Some("dollar".to_string()),
            sort: fxr::core::SortKey::RateDesc,
            base: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Gallery command failed with: {:?}",
        result.err()
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_gallery_api_failure_does_not_fail_command() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri());

    let result = fxr::run_command(
        fxr::AppCommand::Gallery {
            search: None,
            sort: fxr::core::SortKey::CodeAsc,
            base: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Unavailable data should not be fatal");
}

#[test_log::test(tokio::test)]
async fn test_gallery_loader_end_to_end() {
    use fxr::core::config::FrankfurterProviderConfig;
    use fxr::core::gallery::{GalleryFilter, apply};
    use fxr::core::loader::load_gallery;
    use fxr::providers::frankfurter::FrankfurterProvider;

    let mock_server = test_utils::create_gallery_mock_server(
        r#"{"base": "EUR", "date": "2024-01-03", "rates": {"USD": 1.0919, "EUR": 1.0, "XAU": 0.00049}}"#,
    )
    .await;
    let provider = FrankfurterProvider::new(&FrankfurterProviderConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let gallery = load_gallery(&provider, &"eur".parse().unwrap()).await;
    info!(?gallery, "Loaded gallery");
    assert!(gallery.error.is_none());

    let entries = apply(&gallery.entries, &GalleryFilter::default());
    let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["USD", "XAU"]);
    assert_eq!(entries[0].name, "United States Dollar");
    assert_eq!(entries[1].name, "XAU");
    assert_eq!(fxr::core::format_rate(Some(entries[1].rate)), "4.900e-4");
}

#[test_log::test(tokio::test)]
async fn test_full_pair_flow_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_pair(&mock_server, "EUR", "USD", 1.0919).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri());

    let result = fxr::run_command(
        fxr::AppCommand::Pair {
            from: "eur".to_string(),
            to: "usd".to_string(),
            amount: Some("250".to_string()),
            to_amount: None,
            interactive: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Pair command failed with: {:?}", result.err());

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&"/latest".to_string()));
    assert!(paths.iter().any(|p| p.ends_with("..")));
}

#[test_log::test(tokio::test)]
async fn test_invalid_pair_redirects_to_gallery() {
    let mock_server = test_utils::create_gallery_mock_server(
        r#"{"base": "EUR", "date": "2024-01-03", "rates": {"USD": 1.0919}}"#,
    )
    .await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri());

    let result = fxr::run_command(
        fxr::AppCommand::Pair {
            from: "eur".to_string(),
            to: "EUR".to_string(),
            amount: None,
            to_amount: None,
            interactive: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().any(|r| r.url.path() == "/currencies"));
}

#[test_log::test(tokio::test)]
async fn test_open_route_shows_pair() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_pair(&mock_server, "GBP", "JPY", 197.3).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri());

    let result = fxr::run_command(
        fxr::AppCommand::Open {
            path: "/gbp/jpy".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_interactive_session_with_mock() {
    use fxr::cli::pair::{PairOptions, run_interactive};
    use fxr::core::config::{FrankfurterProviderConfig, Preferences, Theme};
    use fxr::core::{CalculatorSession, CurrencyPair};
    use fxr::providers::frankfurter::FrankfurterProvider;

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_pair(&mock_server, "EUR", "USD", 1.1).await;
    test_utils::mount_pair(&mock_server, "USD", "EUR", 0.9).await;

    let provider = FrankfurterProvider::new(&FrankfurterProviderConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    let pair = CurrencyPair::new("EUR".parse().unwrap(), "USD".parse().unwrap()).unwrap();
    let mut session = CalculatorSession::new(pair);
    let mut preferences = Preferences::new(Theme::Dark);
    let options = PairOptions {
        history_days: 7,
        ..Default::default()
    };

    let input: &[u8] = b"from 2\nto 0\nbogus\ntheme\nswap\nquit\nfrom 5\n";
    let mut output = Vec::new();
    run_interactive(
        &provider,
        &mut session,
        &options,
        &mut preferences,
        input,
        &mut output,
    )
    .await
    .expect("Interactive session failed");

    let output = String::from_utf8(output).unwrap();
    info!("{output}");
    assert!(output.contains("1 EUR = 1.1000 USD"));
    assert!(output.contains("2.2000"));
    assert!(output.contains("0.0000"));
    assert!(output.contains("Unknown command: bogus"));
    assert!(output.contains("Theme: Light"));
    assert!(output.contains("Switched to /usd/eur"));
    assert!(output.contains("1 USD = 0.9000 EUR"));
    assert!(output.contains("Rate History (Last 7 Days)"));

    // Input after quit is not processed.
    assert_eq!(session.pair().from.as_str(), "USD");
    assert_eq!(session.engine().from_text(), "1");
    assert_eq!(preferences.theme(), Theme::Light);
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.yaml");

    let result = fxr::run_command(
        fxr::AppCommand::Open {
            path: "/".to_string(),
        },
        Some(missing.to_str().unwrap()),
    )
    .await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
    let _ = fs::metadata(temp_dir.path()).expect("Temp dir should still exist");
}
