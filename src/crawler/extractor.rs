//! Track record extraction from listing pages
//!
//! A listing page shows one grid box per track:
//!
//! ```html
//! <div class="boxgridSocial" data-trackid="1234567">...</div>
//! ```
//!
//! A page without any such box marks the end of the listing. A box whose id
//! is missing or malformed still counts as a record, so a page of unusable
//! boxes does not end the crawl.

use crate::session::RawPage;
use crate::track::{TrackId, TrackIdSet};
use scraper::{Html, Selector};

/// Track records found on one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecords {
    /// Valid ids among the records
    pub ids: TrackIdSet,

    /// Number of track records on the page, including ones without a usable id
    pub records: usize,
}

impl PageRecords {
    /// Returns true if the page had no track records at all
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}

/// Turns a listing page into the track records it shows
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, page: &RawPage) -> PageRecords;
}

/// Extracts ids from the `boxgridSocial` track grid
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackGridExtractor;

impl TrackGridExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts track records from an HTML document
    pub fn extract_html(&self, html: &str) -> PageRecords {
        let document = Html::parse_document(html);
        let mut page = PageRecords::default();

        let Ok(selector) = Selector::parse(".boxgridSocial") else {
            return page;
        };

        for element in document.select(&selector) {
            page.records += 1;

            let Some(raw) = element.value().attr("data-trackid") else {
                tracing::warn!("Track record without data-trackid attribute, skipping");
                continue;
            };

            match TrackId::parse(raw) {
                Ok(id) => {
                    page.ids.insert(id);
                }
                Err(e) => tracing::warn!("Skipping track record: {}", e),
            }
        }

        page
    }
}

impl RecordExtractor for TrackGridExtractor {
    fn extract(&self, page: &RawPage) -> PageRecords {
        self.extract_html(&page.body)
    }
}
