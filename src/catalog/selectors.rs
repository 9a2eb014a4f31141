//! CSS selectors for each catalog site.
//!
//! One module per site. Update the matching module when a site changes
//! its markup, and refresh the fixture in `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// books.toscrape.com browse pages.
pub mod books_to_scrape {
    use super::*;

    /// Product card.
    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("article.product_pod").unwrap());

    /// Title link; the full title is in its `title` attribute.
    pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 a").unwrap());

    pub static TITLE_ATTR: &str = "title";

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".price_color").unwrap());
}

/// openlibrary.org search results.
pub mod open_library {
    use super::*;

    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".searchResultItem").unwrap());

    /// First link with text; the cover image link comes before it.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".bookauthor").unwrap());
}

/// gutenberg.org ebook search results.
pub mod gutenberg {
    use super::*;

    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.booklink").unwrap());

    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.title").unwrap());

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.subtitle").unwrap());
}

/// betterworldbooks.com search results.
pub mod better_world_books {
    use super::*;

    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.book-item").unwrap());

    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".book-title").unwrap());

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".book-author").unwrap());

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".item-price").unwrap());
}

/// abebooks.com search results.
pub mod abebooks {
    use super::*;

    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".cf.result").unwrap());

    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());

    pub static AUTHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".author").unwrap());

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".item-price").unwrap());
}

/// Selectors for detecting bot challenges served instead of results.
pub mod errors {
    use super::*;

    /// CAPTCHA or JavaScript challenge form.
    pub static CHALLENGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "#challenge-form, \
             #challenge-running, \
             form[action*='captcha'], \
             iframe[src*='captcha']",
        )
        .unwrap()
    });
}
