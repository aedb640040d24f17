use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Result, ScraperError};
use crate::types::Listing;

/// How many specification fragments make it into the description.
const MAX_SPEC_FRAGMENTS: usize = 12;

/// Separator between the lower and upper bound of a price range.
const RANGE_SEPARATOR: &str = " – ";

fn selector(css: &str) -> Selector {
    // Selectors are compile-time constants; a parse failure is a programming
    // error, not an input condition.
    Selector::parse(css).unwrap()
}

/// Number of pages the category spans, read from the pagination control of
/// any page. A page without a pagination control is a single-page category.
pub fn page_count(document: &Html) -> Result<u32> {
    let pagination = match document.select(&selector("div.pagination__pages")).next() {
        Some(pagination) => pagination,
        None => return Ok(1),
    };

    let last_page = pagination
        .select(&selector("a.page"))
        .last()
        .ok_or_else(|| ScraperError::Parse("pagination control has no page links".into()))?;

    element_text(&last_page)
        .trim()
        .parse::<u32>()
        .map_err(|e| ScraperError::Parse(format!("page number in pagination: {e}")))
}

/// All listings on one category page, in document order. When `allow` is
/// given, only listings whose model is in the set are yielded.
pub fn extract_listings(
    document: &Html,
    allow: Option<&HashSet<String>>,
) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();

    for row in document.select(&selector(".list-item--row")) {
        let listing = parse_listing(&row)?;
        if let Some(allowed) = allow {
            if !allowed.contains(&listing.model) {
                debug!(model = %listing.model, "Skipping listing outside the model filter");
                continue;
            }
        }
        listings.push(listing);
    }

    Ok(listings)
}

fn parse_listing(row: &ElementRef) -> Result<Listing> {
    let model = row
        .select(&selector(".text-md"))
        .next()
        .map(|el| element_text(&el).trim().to_string())
        .ok_or_else(|| ScraperError::MissingField("model".into()))?;

    let description = row
        .select(&selector(".list-item__specifications-text"))
        .next()
        .map(|el| join_specifications(&element_text(&el)))
        .ok_or_else(|| ScraperError::MissingField("description".into()))?;

    let (min_price, max_price) = row
        .select(&selector(".m_b-5 > .text-sm"))
        .next()
        .map(|el| split_price_range(&element_text(&el)))
        .unwrap_or((None, None));

    let avr_price = row
        .select(&selector(".price__value"))
        .next()
        .and_then(|el| parse_price(&element_text(&el)));

    Ok(Listing {
        model,
        description,
        min_price,
        avr_price,
        max_price,
    })
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>()
}

/// Bullet-separated specification fragments become a single
/// slash-separated line; only the first few fragments are kept.
fn join_specifications(raw: &str) -> String {
    raw.split('•')
        .take(MAX_SPEC_FRAGMENTS)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" / ")
}

/// A range must split into exactly two parts on the en-dash separator;
/// anything else leaves both bounds absent.
fn split_price_range(raw: &str) -> (Option<u64>, Option<u64>) {
    let parts: Vec<&str> = raw.trim().split(RANGE_SEPARATOR).collect();
    if parts.len() != 2 {
        return (None, None);
    }
    (parse_price(parts[0]), parse_price(parts[1]))
}

/// Digit-filters price text into an integer: thousands separators,
/// non-breaking spaces and currency suffixes are discarded. Text with no
/// digits at all yields no price.
pub fn parse_price(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(listings: &str, pagination: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><div class=\"catalog\">{listings}</div>{pagination}</body></html>"
        ))
    }

    fn listing_html(model: &str, specs: &str, range: &str, avr: &str) -> String {
        format!(
            "<div class=\"list-item--row\">\
               <a class=\"text-md\">{model}</a>\
               <p class=\"list-item__specifications-text\">{specs}</p>\
               <div class=\"m_b-5\"><span class=\"text-sm\">{range}</span></div>\
               <div class=\"price__value\">{avr}</div>\
             </div>"
        )
    }

    const PAGINATION: &str = "<div class=\"pagination__pages\">\
        <a class=\"page\">1</a><a class=\"page\">2</a><a class=\"page\">25</a></div>";

    #[test]
    fn digit_filtering_survives_nbsp_and_currency_suffix() {
        assert_eq!(parse_price("45\u{a0}999\u{a0}грн"), Some(45999));
        assert_eq!(parse_price("45 999 грн"), Some(45999));
        assert_eq!(parse_price("грн"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn range_splits_on_en_dash_into_two_bounds() {
        assert_eq!(
            split_price_range("30000 – 40000"),
            (Some(30000), Some(40000))
        );
        assert_eq!(
            split_price_range("30 000 грн – 40 000 грн"),
            (Some(30000), Some(40000))
        );
    }

    #[test]
    fn malformed_range_leaves_both_bounds_absent() {
        assert_eq!(split_price_range("40000"), (None, None));
        assert_eq!(split_price_range("30000 – 35000 – 40000"), (None, None));
    }

    #[test]
    fn specifications_are_trimmed_joined_and_capped() {
        assert_eq!(
            join_specifications(" 15.6\" • 8 GB • SSD 512 GB "),
            "15.6\" / 8 GB / SSD 512 GB"
        );

        let many = (0..20).map(|i| format!("s{i}")).collect::<Vec<_>>().join(" • ");
        let joined = join_specifications(&many);
        assert_eq!(joined.split(" / ").count(), MAX_SPEC_FRAGMENTS);
    }

    #[test]
    fn parses_a_full_listing_row() {
        let html = page(
            &listing_html(
                " Lenovo IdeaPad 3 ",
                "15.6\" • 8 GB • SSD 512 GB",
                "30 000 – 40 000",
                "35 999 грн",
            ),
            "",
        );

        let listings = extract_listings(&html, None).unwrap();
        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.model, "Lenovo IdeaPad 3");
        assert_eq!(listing.description, "15.6\" / 8 GB / SSD 512 GB");
        assert_eq!(listing.min_price, Some(30000));
        assert_eq!(listing.avr_price, Some(35999));
        assert_eq!(listing.max_price, Some(40000));
    }

    #[test]
    fn listing_without_prices_keeps_absent_markers() {
        let html = page(
            "<div class=\"list-item--row\">\
               <a class=\"text-md\">Acer Aspire 5</a>\
               <p class=\"list-item__specifications-text\">14\" • 16 GB</p>\
             </div>",
            "",
        );

        let listings = extract_listings(&html, None).unwrap();
        assert_eq!(listings[0].min_price, None);
        assert_eq!(listings[0].avr_price, None);
        assert_eq!(listings[0].max_price, None);
    }

    #[test]
    fn listing_without_model_is_a_missing_field_error() {
        let html = page(
            "<div class=\"list-item--row\">\
               <p class=\"list-item__specifications-text\">14\"</p>\
             </div>",
            "",
        );

        let err = extract_listings(&html, None).unwrap_err();
        assert!(matches!(err, ScraperError::MissingField(field) if field == "model"));
    }

    #[test]
    fn allow_set_restricts_yielded_models() {
        let html = page(
            &format!(
                "{}{}",
                listing_html("HP Pavilion 15", "15.6\"", "", "29 999 грн"),
                listing_html("Asus VivoBook 17", "17.3\"", "", "31 999 грн"),
            ),
            "",
        );

        let allow: HashSet<String> = ["Asus VivoBook 17".to_string()].into();
        let listings = extract_listings(&html, Some(&allow)).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].model, "Asus VivoBook 17");
    }

    #[test]
    fn page_count_reads_the_last_pagination_link() {
        let html = page("", PAGINATION);
        assert_eq!(page_count(&html).unwrap(), 25);
    }

    #[test]
    fn page_count_defaults_to_one_without_pagination() {
        let html = page("", "");
        assert_eq!(page_count(&html).unwrap(), 1);
    }
}
