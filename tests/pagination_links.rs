//! Pagination behavior as page templates exercise it: walking a
//! listing page by page and rendering the navigation links.

use std::collections::BTreeMap;

use quill_base::batch::{Batch, BatchBuilder};

#[test]
fn walking_a_listing_covers_every_item_exactly_once() {
    let items: Vec<usize> = (0..95).collect();
    let mut seen = Vec::new();

    let mut batch = Batch::new(&items, 10, 0);
    loop {
        seen.extend_from_slice(batch.items());
        match batch.next() {
            Some(next) => batch = next,
            None => break,
        }
    }

    assert_eq!(seen, items);
}

#[test]
fn navigation_links_stay_inside_the_page_range() {
    let items: Vec<usize> = (0..300).collect();
    let mut params = BTreeMap::new();
    params.insert("sort_on".to_string(), "modified".to_string());

    let batch = Batch::new(&items, 10, 150);
    let current = batch.pagenumber();

    for (page, url) in batch.prevurls(&params) {
        assert!(page < current);
        assert!(url.contains("sort_on=modified"));
    }
    for (page, url) in batch.nexturls(&params) {
        assert!(page > current);
        assert!(url.contains("b_start="));
    }

    let nav: Vec<usize> = batch.navurls(&params).map(|(page, _)| page).collect();
    assert_eq!(nav, batch.navlist().collect::<Vec<_>>());
    assert!(nav.contains(&current));
}

#[test]
fn link_offsets_land_on_the_pages_they_promise() {
    let items: Vec<usize> = (0..83).collect();
    let params = BTreeMap::new();

    let batch = BatchBuilder::new(10).start(40).build(&items);
    for (page, url) in batch.navurls(&params) {
        let offset: i64 = url
            .strip_prefix("b_start=")
            .expect("offset parameter first")
            .parse()
            .unwrap();
        let landed = Batch::new(&items, 10, offset);
        assert_eq!(landed.pagenumber(), page);
    }
}

#[test]
fn lazily_counted_listings_match_fully_materialized_ones() {
    let full: Vec<usize> = (0..95).collect();
    let window: Vec<usize> = (40..50).collect();

    let materialized = Batch::new(&full, 10, 40);
    let lazy = Batch::from_window(&window, 40, 95, 10, 40);

    assert_eq!(materialized.items(), lazy.items());
    assert_eq!(materialized.pagenumber(), lazy.pagenumber());
    assert_eq!(materialized.numpages(), lazy.numpages());
    assert_eq!(
        materialized.navlist().collect::<Vec<_>>(),
        lazy.navlist().collect::<Vec<_>>()
    );
}
