//! End-to-end search against mocked catalog sites.

use book_scout::catalog::{CatalogClient, Source};
use book_scout::commands::{SearchCommand, NO_RESULTS_MESSAGE};
use book_scout::config::Config;
use book_scout::export::report::report_lines;
use calamine::{open_workbook, Data, Reader, Xlsx};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GUTENBERG_FIXTURE: &str = include_str!("fixtures/gutenberg.html");
const EMPTY_PAGE: &str = "<html><body><p>No results</p></body></html>";

/// Serves an empty results page for every site except Gutenberg.
async fn mock_sites(gutenberg: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ebooks/search/"))
        .and(query_param("query", "python"))
        .respond_with(ResponseTemplate::new(200).set_body_string(gutenberg))
        .mount(&server)
        .await;

    for site_path in ["/search", "/search/results", "/servlet/SearchResults"] {
        Mock::given(method("GET"))
            .and(path(site_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path_regex(r"^/catalogue/page-\d+\.html$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
        .mount(&server)
        .await;

    server
}

fn make_test_config(dir: &std::path::Path) -> Config {
    Config { output_dir: dir.to_path_buf(), open_report: false, ..Config::default() }
}

#[tokio::test]
async fn test_single_source_end_to_end() {
    let server = mock_sites(GUTENBERG_FIXTURE).await;
    let dir = tempfile::tempdir().unwrap();
    let config = make_test_config(dir.path());
    let client = CatalogClient::with_base_url(&config, Some(server.uri())).unwrap();

    let report = SearchCommand::new(config).execute_with_client(&client, "python").await.unwrap();
    let aggregation = &report.aggregation;

    assert_eq!(aggregation.records.len(), 2);
    assert_eq!(aggregation.tally.len(), 5);
    assert_eq!(aggregation.tally.get(Source::Gutenberg), 2);
    assert_eq!(aggregation.tally.total(), 2);
    assert_eq!(aggregation.failures().count(), 0);

    // Header plus one data row per record, read back from the written file
    let mut workbook: Xlsx<_> = open_workbook(dir.path().join("book_results.xlsx")).unwrap();
    let sheet = workbook.worksheet_range("Books").unwrap();
    assert_eq!(sheet.height(), 3);
    assert_eq!(sheet.get((0, 3)), Some(&Data::String("Website".to_string())));
    assert_eq!(sheet.get((1, 0)), Some(&Data::String("The Python Tutorial".to_string())));
    assert_eq!(sheet.get((2, 3)), Some(&Data::String("Gutenberg".to_string())));

    let lines = report_lines(aggregation);
    assert_eq!(lines.iter().filter(|l| l.ends_with("books found")).count(), 5);
    assert!(lines.contains(&"Gutenberg: 2 books found".to_string()));
    assert!(lines.contains(&"AbeBooks: 0 books found".to_string()));
    assert!(lines.contains(
        &"- The Python Tutorial | Author: Guido van Rossum | Price: Free | Gutenberg".to_string()
    ));

    for name in ["book_results.xlsx", "graph.png", "report.pdf"] {
        assert!(dir.path().join(name).is_file(), "{} should be written", name);
    }
    assert!(std::fs::read(dir.path().join("report.pdf")).unwrap().starts_with(b"%PDF"));
    assert_eq!(report.artifacts.len(), 3);
}

#[tokio::test]
async fn test_zero_matches_writes_nothing() {
    let server = mock_sites(EMPTY_PAGE).await;
    let dir = tempfile::tempdir().unwrap();
    let config = make_test_config(dir.path());
    let client = CatalogClient::with_base_url(&config, Some(server.uri())).unwrap();

    let report = SearchCommand::new(config).execute_with_client(&client, "python").await.unwrap();

    assert!(report.found_nothing());
    assert_eq!(report.to_string(), NO_RESULTS_MESSAGE);
    for name in ["book_results.xlsx", "graph.png", "report.pdf"] {
        assert!(!dir.path().join(name).exists(), "{} should not be written", name);
    }
}

#[tokio::test]
async fn test_failing_site_is_reported() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = make_test_config(dir.path());

    Mock::given(method("GET"))
        .and(path("/ebooks/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GUTENBERG_FIXTURE))
        .mount(&server)
        .await;
    // Everything else is unmatched and answered with 404

    let client = CatalogClient::with_base_url(&config, Some(server.uri())).unwrap();
    let report = SearchCommand::new(config).execute_with_client(&client, "python").await.unwrap();

    assert_eq!(report.aggregation.records.len(), 2);
    assert_eq!(report.aggregation.failures().count(), 4);

    let output = report.to_string();
    assert!(output.contains("Error scraping BooksToScrape: Request failed with status: 404"));
    assert!(output.contains("Report saved to:"));
}
