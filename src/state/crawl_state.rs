/// Crawl state definitions
///
/// The crawl is a two-state machine: it keeps fetching listing pages while
/// they show track records and stops on the first empty page or once the page
/// limit is passed.
use std::fmt;

/// Why a crawl reached the `Done` state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoneReason {
    /// A non-empty id set was loaded from the cache; nothing was fetched
    Cached,

    /// A listing page contained no track records
    EmptyPage,

    /// The next page index exceeded the configured maximum
    PageLimit,
}

/// Current state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Page `page_index` is the next one to fetch
    Crawling { page_index: u32 },

    /// Crawl finished successfully
    Done(DoneReason),
}

impl CrawlState {
    /// Initial state of a fresh crawl
    pub fn start(max_pages: u32) -> Self {
        Self::Crawling { page_index: 1 }.check_limit(max_pages)
    }

    /// Returns the state following a fetched page
    ///
    /// `page_was_empty` is whether the page just fetched had no track
    /// records. Calling this on `Done` returns `Done` unchanged.
    pub fn advance(self, page_was_empty: bool, max_pages: u32) -> Self {
        match self {
            Self::Crawling { .. } if page_was_empty => Self::Done(DoneReason::EmptyPage),
            Self::Crawling { page_index } => match page_index.checked_add(1) {
                Some(next) => Self::Crawling { page_index: next }.check_limit(max_pages),
                None => Self::Done(DoneReason::PageLimit),
            },
            done @ Self::Done(_) => done,
        }
    }

    fn check_limit(self, max_pages: u32) -> Self {
        match self {
            Self::Crawling { page_index } if page_index > max_pages => {
                Self::Done(DoneReason::PageLimit)
            }
            other => other,
        }
    }

    /// Returns true once the crawl has terminated
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Page to fetch next, if still crawling
    pub fn page_index(&self) -> Option<u32> {
        match self {
            Self::Crawling { page_index } => Some(*page_index),
            Self::Done(_) => None,
        }
    }
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cached => "loaded from cache",
            Self::EmptyPage => "reached an empty page",
            Self::PageLimit => "reached the page limit",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crawling { page_index } => write!(f, "crawling page {}", page_index),
            Self::Done(reason) => write!(f, "done ({})", reason),
        }
    }
}
