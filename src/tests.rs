//! Tests

#[cfg(test)]
mod tests {
    use crate::config::ScrapeConfig;
    use crate::engine::{Engine, EngineOptions};
    use crate::error::FetchError;
    use crate::tools::fetch::PageFetcher;
    use crate::types::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;
    use url::Url;

    /// In-memory pages keyed by URL; unknown URLs fail like a dead host.
    #[derive(Default)]
    struct MemoryFetcher {
        pages: HashMap<String, Result<String, FetchError>>,
        stall: Option<String>,
        cancel_on_fetch: Option<CancellationToken>,
        calls: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(html.to_string()));
            self
        }

        fn failing(mut self, url: &str, err: FetchError) -> Self {
            self.pages.insert(url.to_string(), Err(err));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for MemoryFetcher {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if let Some(token) = &self.cancel_on_fetch {
                token.cancel();
            }
            if self.stall.as_deref() == Some(url) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Request(format!("connection refused: {url}"))))
        }
    }

    fn listing(hrefs: &[&str]) -> String {
        let items: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<div class="product-layout"><div class="product-thumb">
                        <div class="image"><a href="{href}"><img src="x.jpg"></a></div>
                    </div></div>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><div id="content">
                <h1>6S Batteries</h1><div></div><div></div><div></div><div></div><div></div>
                <div class="row">{items}</div>
            </div></body></html>"#
        )
    }

    fn product(name: &str, price: &str, voltage: &str) -> String {
        format!(
            r#"<html><body><div id="content">
                <h1>{name}</h1>
                <ul class="list-unstyled"><li><h2>${price}</h2></li></ul>
                <div id="tab-description">
                    <h4><span>{name}</span></h4>
                    <p>Voltage: {voltage}</p>
                    <p>True mAh +/- 5%: 5000</p>
                </div>
            </div></body></html>"#
        )
    }

    fn quick() -> EngineOptions {
        EngineOptions {
            delay: Duration::ZERO,
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_run_two_products() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher::default()
            .page("https://shop.test/p/1", &product("HCL-HP 5000", "162.95", "22.2V"))
            .page("https://shop.test/p/2", &product("SRD-V4 2S", "89.00", "7.4V"));
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let base = Url::parse("https://shop.test/batteries").unwrap();
        let report = engine
            .run_listing(&listing(&["/p/1", "/p/2"]), Some(&base))
            .await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.failures, 0);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(fetcher.calls(), vec!["https://shop.test/p/1", "https://shop.test/p/2"]);

        let first = &report.rows.rows()[0];
        assert_eq!(first.len(), 1 + cfg.fields.len());
        assert_eq!(first.name(), "HCL-HP 5000");
        assert_eq!(first.values()[0], "162.95");
        assert_eq!(first.values()[3], "5000");
        assert_eq!(first.values()[4], "22.2V");
        assert_eq!(first.values()[1], MISSING_VALUE);

        let second = &report.rows.rows()[1];
        assert_eq!(second.name(), "SRD-V4 2S");
        assert_eq!(second.values()[4], "7.4V");
    }

    #[tokio::test]
    async fn test_failed_fetch_becomes_error_row() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher::default()
            .page("https://shop.test/p/1", &product("A", "1.00", "3.7V"))
            .page("https://shop.test/p/3", &product("C", "3.00", "11.1V"));
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let urls: Vec<String> = ["p/1", "p/2", "p/3"]
            .iter()
            .map(|p| format!("https://shop.test/{p}"))
            .collect();
        let report = engine.run(&urls).await;

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.failures, 1);
        let err_row = &report.rows.rows()[1];
        assert!(err_row.is_error());
        assert_eq!(err_row.as_slice(), vec![ERROR_VALUE.to_string(); 1 + cfg.fields.len()]);
        assert_eq!(report.rows.rows()[2].name(), "C");
    }

    #[tokio::test]
    async fn test_empty_page_yields_missing_values() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher::default().page("https://shop.test/blank", "");
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let report = engine.run(&["https://shop.test/blank".to_string()]).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.failures, 0);
        let row = &report.rows.rows()[0];
        assert!(!row.is_error());
        assert_eq!(row.as_slice(), vec![MISSING_VALUE.to_string(); 1 + cfg.fields.len()]);
    }

    #[tokio::test]
    async fn test_status_error_becomes_error_row() {
        let cfg = ScrapeConfig::description_tab();
        let fetcher = MemoryFetcher::default()
            .failing("https://shop.test/gone", FetchError::Status { status: 404 });
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let report = engine.run(&["https://shop.test/gone".to_string()]).await;
        assert_eq!(report.failures, 1);
        assert_eq!(report.rows.rows()[0].len(), 1 + cfg.fields.len());
        assert!(report.rows.rows()[0].is_error());
    }

    #[tokio::test]
    async fn test_missing_container_aborts_without_fetching() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher::default();
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let report = engine
            .run_listing("<html><body><div id=\"content\"><h1>Empty</h1></div></body></html>", None)
            .await;

        assert_eq!(report.outcome, RunOutcome::ContainerNotFound);
        assert!(report.rows.is_empty());
        assert!(fetcher.calls().is_empty());
        assert_eq!(report.rows.to_json_pretty().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_fetch_timeout_becomes_error_row() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher {
            stall: Some("https://shop.test/slow".into()),
            ..Default::default()
        }
        .page("https://shop.test/fast", &product("Fast", "1.00", "7.4V"));
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(EngineOptions {
            delay: Duration::ZERO,
            timeout: Duration::from_millis(50),
        });

        let report = engine
            .run(&["https://shop.test/slow".to_string(), "https://shop.test/fast".to_string()])
            .await;

        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.rows()[0].is_error());
        assert_eq!(report.rows.rows()[1].name(), "Fast");
    }

    #[tokio::test]
    async fn test_scrape_page_reports_timeout() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher {
            stall: Some("https://shop.test/slow".into()),
            ..Default::default()
        };
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(EngineOptions {
            delay: Duration::ZERO,
            timeout: Duration::from_millis(20),
        });

        assert_eq!(
            engine.scrape_page("https://shop.test/slow").await,
            Err(FetchError::Timeout { ms: 20 })
        );
    }

    #[tokio::test]
    async fn test_cancel_stops_before_next_fetch() {
        let cfg = ScrapeConfig::complete();
        let token = CancellationToken::new();
        let fetcher = MemoryFetcher {
            cancel_on_fetch: Some(token.clone()),
            ..Default::default()
        }
        .page("https://shop.test/p/1", &product("A", "1.00", "3.7V"));
        let engine = Engine::new(&cfg, &fetcher)
            .unwrap()
            .with_options(EngineOptions {
                delay: Duration::from_secs(10),
                timeout: Duration::from_secs(2),
            })
            .with_cancellation(token);

        let start = Instant::now();
        let report = engine
            .run(&["https://shop.test/p/1".to_string(), "https://shop.test/p/2".to_string()])
            .await;

        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(fetcher.calls().len(), 1);
        // The politeness delay is cut short by the cancellation.
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_delay_between_pages() {
        let cfg = ScrapeConfig::complete();
        let fetcher = MemoryFetcher::default();
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(EngineOptions {
            delay: Duration::from_millis(40),
            timeout: Duration::from_secs(2),
        });

        let urls: Vec<String> = (0..3).map(|i| format!("https://shop.test/{i}")).collect();
        let start = Instant::now();
        let report = engine.run(&urls).await;

        // Two gaps between three pages, failures included.
        assert!(start.elapsed() >= Duration::from_millis(80));
        assert_eq!(report.failures, 3);
    }

    #[tokio::test]
    async fn test_rows_serialize_as_array_of_arrays() {
        let cfg = ScrapeConfig::description_tab();
        let fetcher = MemoryFetcher::default()
            .page("https://shop.test/p/1", &product("SRD-V4 2S", "89.00", "7.4V"));
        let engine = Engine::new(&cfg, &fetcher).unwrap().with_options(quick());

        let report = engine
            .run(&["https://shop.test/p/1".to_string(), "https://shop.test/p/2".to_string()])
            .await;
        let json = report.rows.to_json_pretty().unwrap();
        let parsed: Vec<Vec<String>> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|row| row.len() == 1 + cfg.fields.len()));
        assert_eq!(parsed[0][0], "SRD-V4 2S");
        assert_eq!(parsed[0][1], "5000");
        assert_eq!(parsed[0][2], "7.4V");
        assert_eq!(parsed[1][0], ERROR_VALUE);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut cfg = ScrapeConfig::complete();
        cfg.listing.container = "div >".into();
        let fetcher = MemoryFetcher::default();
        assert!(Engine::new(&cfg, &fetcher).is_err());
    }
}
