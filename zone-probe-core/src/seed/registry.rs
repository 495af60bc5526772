//! 公共子域名注册表（FreeDNS 风格的分页 HTML 表格）
//!
//! 首页带有 "Page 1 of N" 字样，其余页为 `page-N.html`。
//! 每个数据行是 `tr.trl` / `tr.trd`，四列：域名、状态、所有者、创建时间。

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{CoreError, CoreResult};
use crate::traits::SeedSource;
use crate::utils::Pacer;

pub const DEFAULT_REGISTRY_URL: &str = "https://freedns.afraid.org/domain/registry/";

/// Per-page request timeout.
pub const REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// One row of the registry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub domain: String,
    pub status: String,
    pub owner: String,
    /// Creation date as printed inside the parentheses of the age column.
    pub date: String,
}

/// Walks every page of the registry and yields the domain column.
///
/// A page that cannot be fetched is logged and contributes no rows; the
/// walk continues with the next page.
#[derive(Debug, Clone)]
pub struct RegistrySeedSource {
    client: reqwest::Client,
    base_url: String,
    pacer: Pacer,
}

impl RegistrySeedSource {
    /// `pacer` runs between page requests.
    pub fn new(base_url: impl Into<String>, pacer: Pacer) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REGISTRY_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CoreError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self {
            client,
            base_url,
            pacer,
        })
    }

    fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.base_url.clone()
        } else {
            format!("{}page-{page}.html", self.base_url)
        }
    }

    async fn get_page(&self, url: &str) -> Option<String> {
        let result = async {
            self.client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await;

        match result {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("Error scraping {url}: {e}");
                None
            }
        }
    }

    /// Every row of every page, in page order.
    pub async fn entries(&self) -> Vec<RegistryEntry> {
        let first = self.get_page(&self.page_url(1)).await;
        let total = first.as_deref().map_or(1, total_pages);
        log::info!("Total pages to scrape: {total}");

        log::info!("Scraping page 1/{total}...");
        let mut entries = first.as_deref().map(parse_rows).unwrap_or_default();

        for page in 2..=total {
            self.pacer.pause().await;
            log::info!("Scraping page {page}/{total}...");
            if let Some(body) = self.get_page(&self.page_url(page)).await {
                entries.extend(parse_rows(&body));
            }
        }

        log::info!("Total domains scraped: {}", entries.len());
        entries
    }
}

#[async_trait]
impl SeedSource for RegistrySeedSource {
    fn name(&self) -> String {
        format!("registry {}", self.base_url)
    }

    async fn fetch(&self) -> CoreResult<Vec<String>> {
        Ok(self
            .entries()
            .await
            .into_iter()
            .map(|entry| entry.domain)
            .collect())
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Page count from the "Page X of Y" banner; 1 when there is none.
pub fn total_pages(html: &str) -> u32 {
    let (Some(font), Ok(banner)) = (selector("font"), Regex::new(r"Page.*of\s+(\d+)")) else {
        return 1;
    };
    let document = Html::parse_document(html);
    document
        .select(&font)
        .find_map(|el| {
            let text = text_of(el);
            banner
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
        })
        .unwrap_or(1)
        .max(1)
}

/// `"9013 days ago (03/15/2001)"` -> `"03/15/2001"`; text without
/// parentheses is returned unchanged.
fn parse_age(text: &str) -> String {
    Regex::new(r"\(([^)]+)\)")
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| text.to_string(), |m| m.as_str().to_string())
}

/// Rows of the registry table. Rows with fewer than four cells or without a
/// link in the first cell are skipped.
pub fn parse_rows(html: &str) -> Vec<RegistryEntry> {
    let (Some(row_sel), Some(cell_sel), Some(link_sel)) =
        (selector("tr.trl, tr.trd"), selector("td"), selector("a"))
    else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&row_sel)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            if cells.len() < 4 {
                return None;
            }
            let domain = cells[0].select(&link_sel).next().map(text_of)?;
            if domain.is_empty() {
                return None;
            }
            let owner = cells[2]
                .select(&link_sel)
                .next()
                .map_or_else(|| text_of(cells[2]), text_of);
            Some(RegistryEntry {
                domain,
                status: text_of(cells[1]),
                owner,
                date: parse_age(&text_of(cells[3])),
            })
        })
        .collect()
}
