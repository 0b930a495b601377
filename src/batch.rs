//! Pagination over result listings.
//!
//! A [`Batch`] is one page of a larger result sequence together with the
//! metadata templates need to render pagination controls: the current
//! page number, the quick-navigation page range, and query strings for
//! jumping to neighbouring pages. Construction never fails: a zero page
//! size means a single page holding everything, negative offsets clamp
//! to the first page, and offsets past the end clamp to the last page.
//!
//! Listings backed by a lazily-counted result proxy (a catalog query
//! that materializes only the rows near the current page) use
//! [`Batch::from_window`] and pass the reported total separately.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Default width of the quick-navigation page range
pub const DEFAULT_PAGERANGE: usize = 7;

/// Default query parameter carrying the batch offset
pub const DEFAULT_START_PARAM: &str = "b_start";

/// Tuning knobs for batch construction.
///
/// `size` and `start` are the only values most callers set; the rest
/// mirror the classic batching semantics: `orphan` folds a short final
/// page into its predecessor, `overlap` repeats trailing items at the
/// top of the next page, and `quantum_leaps` adds long-jump page lists
/// for very large listings.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    size: usize,
    start: i64,
    orphan: usize,
    overlap: usize,
    pagerange: usize,
    quantum_leaps: bool,
    start_param: String,
}

impl BatchBuilder {
    /// Start building a batch with the given page size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            start: 0,
            orphan: 0,
            overlap: 0,
            pagerange: DEFAULT_PAGERANGE,
            quantum_leaps: false,
            start_param: DEFAULT_START_PARAM.to_string(),
        }
    }

    /// Offset of the first item of the requested page. Negative values
    /// clamp to zero, values past the end clamp to the last page.
    pub fn start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Fold a trailing page of at most `orphan` items into the page
    /// before it.
    pub fn orphan(mut self, orphan: usize) -> Self {
        self.orphan = orphan;
        self
    }

    /// Number of items shared between consecutive pages.
    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Width of the quick-navigation page range (default 7).
    pub fn pagerange(mut self, pagerange: usize) -> Self {
        self.pagerange = pagerange.max(1);
        self
    }

    /// Enable long-jump page lists outside the page range.
    pub fn quantum_leaps(mut self, enabled: bool) -> Self {
        self.quantum_leaps = enabled;
        self
    }

    /// Query parameter name carrying the offset (default `b_start`).
    pub fn start_param(mut self, name: impl Into<String>) -> Self {
        self.start_param = name.into();
        self
    }

    /// Build over a fully materialized sequence.
    pub fn build<'a, T>(self, sequence: &'a [T]) -> Batch<'a, T> {
        let total = sequence.len();
        self.build_window(sequence, 0, total)
    }

    /// Build over a window of a lazily-counted sequence.
    ///
    /// `window` holds the materialized items starting at absolute index
    /// `window_offset`; `total` is the full sequence length as reported
    /// by the result proxy.
    pub fn build_window<'a, T>(
        self,
        window: &'a [T],
        window_offset: usize,
        total: usize,
    ) -> Batch<'a, T> {
        Batch::initialize(self, window, window_offset, total)
    }
}

/// One page of a sequence plus navigation metadata.
#[derive(Debug, Clone)]
pub struct Batch<'a, T> {
    window: &'a [T],
    window_offset: usize,
    sequence_length: usize,
    options: BatchBuilder,

    pagesize: usize,
    step: usize,
    pagenumber: usize,
    numpages: usize,
    first: usize,
    page_end: usize,
    pagerangestart: usize,
    pagerangeend: usize,
    leapback: Vec<usize>,
    leapforward: Vec<usize>,
}

impl<'a, T> Batch<'a, T> {
    /// Batch over a full sequence with default options.
    pub fn new(sequence: &'a [T], size: usize, start: i64) -> Self {
        BatchBuilder::new(size).start(start).build(sequence)
    }

    /// Batch over a lazily-counted window with default options.
    pub fn from_window(
        window: &'a [T],
        window_offset: usize,
        total: usize,
        size: usize,
        start: i64,
    ) -> Self {
        BatchBuilder::new(size)
            .start(start)
            .build_window(window, window_offset, total)
    }

    fn initialize(
        options: BatchBuilder,
        window: &'a [T],
        window_offset: usize,
        total: usize,
    ) -> Self {
        let pagesize = if options.size == 0 {
            total.max(1)
        } else {
            options.size
        };
        let overlap = options.overlap.min(pagesize - 1);
        let step = pagesize - overlap;

        let countable = total.saturating_sub(options.orphan);
        let numpages = countable.div_ceil(step).max(1);

        let start = options.start.max(0) as usize;
        let pagenumber = (start / step + 1).min(numpages);

        let first = (pagenumber - 1) * step;
        let page_end = if pagenumber == numpages {
            total
        } else {
            (first + pagesize).min(total)
        };

        let (pagerangestart, pagerangeend) =
            calculate_pagerange(pagenumber, numpages, options.pagerange);

        let (leapback, leapforward) = if options.quantum_leaps {
            calculate_leaps(pagerangestart, pagerangeend, numpages)
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            window,
            window_offset,
            sequence_length: total,
            options,
            pagesize,
            step,
            pagenumber,
            numpages,
            first,
            page_end,
            pagerangestart,
            pagerangeend,
            leapback,
            leapforward,
        }
    }

    /// Items of the current page, as far as the window covers them.
    pub fn items(&self) -> &'a [T] {
        let lo = self
            .first
            .saturating_sub(self.window_offset)
            .min(self.window.len());
        let hi = self
            .page_end
            .saturating_sub(self.window_offset)
            .min(self.window.len());
        &self.window[lo.min(hi)..hi]
    }

    /// Iterate over the current page.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items().iter()
    }

    /// Number of items on the current page.
    pub fn length(&self) -> usize {
        self.page_end - self.first
    }

    /// True when the current page holds no items.
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Length of the whole sequence.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Effective page size.
    pub fn pagesize(&self) -> usize {
        self.pagesize
    }

    /// 1-based number of the current page.
    pub fn pagenumber(&self) -> usize {
        self.pagenumber
    }

    /// Total number of pages. An empty sequence still has one page.
    pub fn numpages(&self) -> usize {
        self.numpages
    }

    /// Absolute offset of the first item of the current page.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Pages of the quick-navigation range around the current page.
    pub fn navlist(&self) -> std::ops::RangeInclusive<usize> {
        self.pagerangestart..=self.pagerangeend
    }

    /// Pages of the range strictly before the current page.
    pub fn previous_pages(&self) -> std::ops::Range<usize> {
        self.pagerangestart..self.pagenumber
    }

    /// Pages of the range strictly after the current page.
    pub fn next_pages(&self) -> std::ops::RangeInclusive<usize> {
        self.pagenumber + 1..=self.pagerangeend
    }

    /// Long-jump targets before the page range, ascending. Empty unless
    /// quantum leaps are enabled.
    pub fn leapback(&self) -> &[usize] {
        &self.leapback
    }

    /// Long-jump targets after the page range, ascending.
    pub fn leapforward(&self) -> &[usize] {
        &self.leapforward
    }

    /// The preceding page, if any.
    pub fn previous(&self) -> Option<Batch<'a, T>> {
        if self.pagenumber <= 1 {
            return None;
        }
        Some(self.at_offset(self.first as i64 - self.step as i64))
    }

    /// The following page, if any.
    pub fn next(&self) -> Option<Batch<'a, T>> {
        if self.pagenumber >= self.numpages {
            return None;
        }
        Some(self.at_offset((self.first + self.step) as i64))
    }

    fn at_offset(&self, start: i64) -> Batch<'a, T> {
        let options = self.options.clone().start(start);
        Batch::initialize(options, self.window, self.window_offset, self.sequence_length)
    }

    /// Offset of the first item of the given page, suitable for the
    /// start parameter of a link.
    pub fn page_offset(&self, pagenumber: usize) -> usize {
        (pagenumber * self.step).saturating_sub(self.pagesize)
    }

    /// Render the query string for a page.
    ///
    /// The caller's query parameters are preserved; only the batch
    /// offset parameter is replaced (or added). Keys are serialized in
    /// sorted order so the output is deterministic. With `page` unset,
    /// links point at the current page.
    pub fn pageurl(&self, params: &BTreeMap<String, String>, page: Option<usize>) -> String {
        let page = page.unwrap_or(self.pagenumber);
        let offset = self.page_offset(page);

        let mut merged: BTreeMap<&str, String> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        merged.insert(&self.options.start_param, offset.to_string());

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &merged {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// `(page, query string)` pairs for the quick-navigation range.
    ///
    /// The iterator is lazy and restartable; it maps over the page
    /// lists computed at construction time.
    pub fn navurls<'b>(
        &'b self,
        params: &'b BTreeMap<String, String>,
    ) -> impl Iterator<Item = (usize, String)> + 'b {
        self.navlist().map(move |p| (p, self.pageurl(params, Some(p))))
    }

    /// `(page, query string)` pairs for pages before the current one.
    pub fn prevurls<'b>(
        &'b self,
        params: &'b BTreeMap<String, String>,
    ) -> impl Iterator<Item = (usize, String)> + 'b {
        self.previous_pages()
            .map(move |p| (p, self.pageurl(params, Some(p))))
    }

    /// `(page, query string)` pairs for pages after the current one.
    pub fn nexturls<'b>(
        &'b self,
        params: &'b BTreeMap<String, String>,
    ) -> impl Iterator<Item = (usize, String)> + 'b {
        self.next_pages()
            .map(move |p| (p, self.pageurl(params, Some(p))))
    }
}

impl<'a, 'b, T> IntoIterator for &'b Batch<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items().iter()
    }
}

fn calculate_pagerange(pagenumber: usize, numpages: usize, pagerange: usize) -> (usize, usize) {
    let end = pagenumber + pagerange / 2;
    let start = (end as i64 - pagerange as i64 + 1).max(1) as usize;
    let end = (start + pagerange - 1).min(numpages);
    (start, end)
}

// Jump targets sit at multiples of roughly sqrt(numpages) outside the
// page range, capped at three per side.
fn calculate_leaps(
    pagerangestart: usize,
    pagerangeend: usize,
    numpages: usize,
) -> (Vec<usize>, Vec<usize>) {
    let gap = ((numpages as f64).sqrt().round() as usize).max(2);

    let mut leapback = Vec::new();
    let mut page = pagerangestart as i64 - gap as i64;
    while page >= 1 && leapback.len() < 3 {
        leapback.push(page as usize);
        page -= gap as i64;
    }
    leapback.reverse();

    let mut leapforward = Vec::new();
    let mut page = pagerangeend + gap;
    while page <= numpages && leapforward.len() < 3 {
        leapforward.push(page);
        page += gap;
    }

    (leapback, leapforward)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_plain_sequence_page() {
        let seq = sequence(100);
        let batch = Batch::new(&seq, 10, 10);
        assert_eq!(batch.items(), &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
        assert_eq!(batch.pagenumber(), 2);
        assert_eq!(batch.numpages(), 10);
    }

    #[test]
    fn test_lazy_window() {
        // Items 80..89 materialized out of a reported total of 95.
        let window: Vec<usize> = (80..90).collect();
        let batch = Batch::from_window(&window, 80, 95, 10, 80);

        assert_eq!(batch.items(), &[80, 81, 82, 83, 84, 85, 86, 87, 88, 89]);
        assert_eq!(batch.numpages(), 10);
        assert_eq!(batch.pagenumber(), 9);
        assert_eq!(batch.navlist().collect::<Vec<_>>(), vec![6, 7, 8, 9, 10]);
        assert_eq!(batch.previous_pages().collect::<Vec<_>>(), vec![6, 7, 8]);
        assert_eq!(batch.next_pages().collect::<Vec<_>>(), vec![10]);
        assert!(batch.leapback().is_empty());

        assert_eq!(batch.previous().unwrap().length(), 10);
        assert_eq!(batch.next().unwrap().length(), 5);

        let params = BTreeMap::new();
        assert_eq!(batch.pageurl(&params, None), "b_start=80");
        assert_eq!(
            batch.prevurls(&params).collect::<Vec<_>>(),
            vec![
                (6, "b_start=50".to_string()),
                (7, "b_start=60".to_string()),
                (8, "b_start=70".to_string()),
            ]
        );
        assert_eq!(
            batch.nexturls(&params).collect::<Vec<_>>(),
            vec![(10, "b_start=90".to_string())]
        );
    }

    #[test]
    fn test_pageurl_preserves_other_params() {
        let seq = sequence(30);
        let batch = Batch::new(&seq, 10, 0);
        let mut params = BTreeMap::new();
        params.insert("sort_on".to_string(), "date".to_string());
        params.insert("q".to_string(), "tree house".to_string());

        assert_eq!(
            batch.pageurl(&params, Some(2)),
            "b_start=10&q=tree+house&sort_on=date"
        );
        // The offset parameter is replaced, not duplicated.
        params.insert("b_start".to_string(), "999".to_string());
        assert_eq!(
            batch.pageurl(&params, Some(3)),
            "b_start=20&q=tree+house&sort_on=date"
        );
    }

    #[test]
    fn test_urls_are_restartable() {
        let seq = sequence(100);
        let batch = Batch::new(&seq, 10, 50);
        let params = BTreeMap::new();
        let once: Vec<_> = batch.navurls(&params).collect();
        let twice: Vec<_> = batch.navurls(&params).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_sequence_is_single_empty_page() {
        let seq: Vec<usize> = Vec::new();
        let batch = Batch::new(&seq, 10, 0);
        assert_eq!(batch.numpages(), 1);
        assert_eq!(batch.pagenumber(), 1);
        assert!(batch.is_empty());
        assert!(batch.items().is_empty());
        assert!(batch.previous().is_none());
        assert!(batch.next().is_none());
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let seq = sequence(25);

        // Zero page size: everything on one page.
        let batch = Batch::new(&seq, 0, 0);
        assert_eq!(batch.numpages(), 1);
        assert_eq!(batch.length(), 25);

        // Negative offset clamps to the first page.
        let batch = Batch::new(&seq, 10, -30);
        assert_eq!(batch.pagenumber(), 1);
        assert_eq!(batch.items()[0], 0);

        // Offset past the end clamps to the last page.
        let batch = Batch::new(&seq, 10, 400);
        assert_eq!(batch.pagenumber(), 3);
        assert_eq!(batch.items(), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_orphan_folds_short_last_page() {
        let seq = sequence(103);
        let batch = BatchBuilder::new(10).orphan(3).start(100).build(&seq);
        assert_eq!(batch.numpages(), 10);
        assert_eq!(batch.pagenumber(), 10);
        assert_eq!(batch.length(), 13);

        // One above the threshold keeps its own page.
        let seq = sequence(104);
        let batch = BatchBuilder::new(10).orphan(3).start(100).build(&seq);
        assert_eq!(batch.numpages(), 11);
        assert_eq!(batch.length(), 4);
    }

    #[test]
    fn test_overlap_repeats_items() {
        let seq = sequence(20);
        let first = BatchBuilder::new(10).overlap(2).build(&seq);
        let second = first.next().unwrap();
        assert_eq!(&first.items()[8..], &second.items()[..2]);
        assert_eq!(second.first(), 8);
        // Offsets advance by pagesize - overlap.
        let params = BTreeMap::new();
        assert_eq!(second.pageurl(&params, None), "b_start=6");
    }

    #[test]
    fn test_quantum_leaps() {
        let seq = sequence(1000);
        let batch = BatchBuilder::new(10)
            .start(490)
            .quantum_leaps(true)
            .build(&seq);
        assert_eq!(batch.numpages(), 100);
        assert_eq!(batch.pagenumber(), 50);
        assert_eq!(batch.navlist().collect::<Vec<_>>(), (47..=53).collect::<Vec<_>>());
        assert_eq!(batch.leapback(), &[17, 27, 37]);
        assert_eq!(batch.leapforward(), &[63, 73, 83]);
    }

    #[test]
    fn test_custom_start_param() {
        let seq = sequence(40);
        let batch = BatchBuilder::new(10)
            .start(20)
            .start_param("page_start")
            .build(&seq);
        let params = BTreeMap::new();
        assert_eq!(batch.pageurl(&params, None), "page_start=20");
    }

    #[test]
    fn test_page_numbers_monotonic_in_offset() {
        let seq = sequence(100);
        let mut last = 0;
        for start in (0..120).step_by(7) {
            let batch = Batch::new(&seq, 10, start);
            assert!(batch.pagenumber() >= last);
            last = batch.pagenumber();
            assert!(batch.length() <= batch.pagesize());
        }
    }
}
