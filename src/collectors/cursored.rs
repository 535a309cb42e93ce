use super::Collector;
use crate::aggregator::{Aggregated, Aggregators};
use crate::error::{Result, StreamError};
use crate::stream::{Stream, StreamIter, Upstream};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Paging parameters for [`CursoredCollector`].
///
/// `offset` is where the page starts in the full result set. The collector
/// does not skip anything itself: the stream it receives is expected to start
/// at `offset` already (for instance a query issued with that offset). `limit`
/// caps the page size; `None` means a single page with everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Position of the first entry of this page.
    #[serde(default)]
    pub offset: usize,
    /// Maximum entries on this page.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Page {
    /// Page starting at `offset` with at most `limit` entries.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }
}

#[derive(Default)]
struct CursorState {
    exhausted: Cell<bool>,
    has_more: Cell<bool>,
    aggregated: RefCell<Aggregated>,
}

/// One page of a stream.
///
/// Iterating the collector (once) yields at most `limit` entries. One extra
/// entry is pulled to learn whether another page exists; it is not yielded
/// and does not show up in [`aggregated`](Collector::aggregated).
///
/// # Example
/// ```
/// use datastream::collectors::{CursoredCollector, Page};
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let page = Stream::from_values(vec![10, 11, 12, 13])
///     .skip(1)
///     .collect(CursoredCollector::paged(Page::new(1, 2)))?;
///
/// assert_eq!(page.previous(), Some(0));
/// assert!(page.has_more().is_err());
///
/// let values: Vec<_> = page.iter()?.map(|e| e.map(|(_, v)| v)).collect::<datastream::Result<_>>()?;
/// assert_eq!(values, vec![11, 12]);
/// assert!(page.has_more()?);
/// assert_eq!(page.next()?, Some(3));
/// # Ok(())
/// # }
/// ```
pub struct CursoredCollector<'a, K, V> {
    source: RefCell<Option<Stream<'a, K, V>>>,
    stage: Upstream,
    aggregators: Aggregators<'a>,
    page: Page,
    state: Rc<CursorState>,
}

impl<'a, K: 'a, V: 'a> CursoredCollector<'a, K, V> {
    /// Single page holding the whole stream.
    ///
    /// # Errors
    /// Never fails; fallible for use as a [`Stream::collect`] factory.
    pub fn new(source: Stream<'a, K, V>) -> Result<Self> {
        Ok(Self::with_page(source, Page::default()))
    }

    /// Factory for [`Stream::collect`] with the given paging.
    pub fn paged(page: Page) -> impl FnOnce(Stream<'a, K, V>) -> Result<Self> {
        move |source| Ok(Self::with_page(source, page))
    }

    /// Wrap `source` with the given paging.
    #[must_use]
    pub fn with_page(source: Stream<'a, K, V>, page: Page) -> Self {
        Self {
            stage: source.upstream(),
            aggregators: source.aggregators().clone(),
            source: RefCell::new(Some(source)),
            page,
            state: Rc::default(),
        }
    }

    /// Paging parameters.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Start iterating the page.
    ///
    /// # Errors
    /// [`StreamError::Logic`] if the page was already iterated.
    pub fn iter(&self) -> Result<Cursor<'a, K, V>> {
        let mut source = self
            .source
            .borrow_mut()
            .take()
            .ok_or_else(|| StreamError::logic("Stream is already iterated."))?;
        Ok(Cursor {
            inner: source.iter()?,
            limit: self.page.limit,
            yielded: 0,
            aggregators: self.aggregators.clone(),
            state: Rc::clone(&self.state),
            done: false,
        })
    }

    /// Offset of the previous page; `None` on the first page.
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        if self.page.offset == 0 {
            return None;
        }
        Some(
            self.page
                .limit
                .map_or(0, |limit| self.page.offset.saturating_sub(limit)),
        )
    }

    /// Offset of the next page; `None` when this is the last one.
    ///
    /// # Errors
    /// [`StreamError::Logic`] until the page was fully iterated.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<Option<usize>> {
        if !self.has_more()? {
            return Ok(None);
        }
        Ok(self.page.limit.map(|limit| self.page.offset + limit))
    }

    /// Whether entries remain past this page.
    ///
    /// # Errors
    /// [`StreamError::Logic`] until the page was fully iterated.
    pub fn has_more(&self) -> Result<bool> {
        if !self.state.exhausted.get() {
            return Err(StreamError::logic("Collector must be fully iterated first."));
        }
        Ok(self.state.has_more.get())
    }
}

impl<'a, K: 'a, V: 'a> Collector for CursoredCollector<'a, K, V> {
    type Value<'c>
        = Result<Cursor<'a, K, V>>
    where
        Self: 'c;

    fn value(&self) -> Result<Cursor<'a, K, V>> {
        self.iter()
    }

    fn aggregated(&self) -> Result<Aggregated> {
        if !self.is_closed() {
            return Err(StreamError::logic("Collector must be iterated first."));
        }
        Ok(self.state.aggregated.borrow().clone())
    }

    fn is_closed(&self) -> bool {
        self.stage.is_closed()
    }
}

/// Iterator over one page, returned by [`CursoredCollector::iter`].
pub struct Cursor<'a, K, V> {
    inner: StreamIter<'a, K, V>,
    limit: Option<usize>,
    yielded: usize,
    aggregators: Aggregators<'a>,
    state: Rc<CursorState>,
    done: bool,
}

impl<K, V> Cursor<'_, K, V> {
    fn finish(&mut self, has_more: bool) {
        self.done = true;
        self.state.has_more.set(has_more);
        self.state.exhausted.set(true);
    }
}

impl<K, V> Iterator for Cursor<'_, K, V> {
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(Ok(_)) if self.limit.is_some_and(|limit| self.yielded >= limit) => {
                self.finish(true);
                None
            }
            Some(Ok(entry)) => {
                self.yielded += 1;
                if !self.aggregators.is_empty() {
                    *self.state.aggregated.borrow_mut() = self.aggregators.snapshot();
                }
                Some(Ok(entry))
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            None => {
                self.finish(false);
                None
            }
        }
    }
}
