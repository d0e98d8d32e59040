// tests/source_fixtures.rs
// Link extraction against canned results pages.

use car_sleuth::{CarGurusScraper, CarfaxScraper, SourceScraper};

#[tokio::test]
async fn cargurus_extracts_blade_links_in_page_order() {
    let html = include_str!("fixtures/cargurus.html");
    let scraper = CarGurusScraper::from_fixture(html);

    let links = scraper.fetch_links().await.unwrap();
    assert_eq!(
        links,
        vec![
            "https://www.cargurus.com/Cars/link/412345",
            "https://www.cargurus.com/Cars/link/467890",
        ]
    );
    assert_eq!(scraper.name(), "CarGurus");
}

#[tokio::test]
async fn cargurus_ignores_pages_without_blades() {
    let scraper = CarGurusScraper::from_fixture("<html><body><a href=\"/Cars/\">nope</a></body></html>");
    assert!(scraper.fetch_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn carfax_keeps_only_vehicle_links() {
    let html = include_str!("fixtures/carfax.html");
    let scraper = CarfaxScraper::from_fixture(html);

    // The match is case-insensitive but the extracted link keeps the page's
    // own casing.
    let links = scraper.fetch_links().await.unwrap();
    assert_eq!(
        links,
        vec![
            "https://www.carfax.com/vehicle/5J6YH28708L012345",
            "https://www.carfax.com/Vehicle/5J6YH18329L067890",
        ]
    );
    assert_eq!(scraper.name(), "Carfax");
}

#[tokio::test]
async fn carfax_empty_page_yields_no_links() {
    let scraper = CarfaxScraper::from_fixture("<html><body></body></html>");
    assert!(scraper.fetch_links().await.unwrap().is_empty());
}
