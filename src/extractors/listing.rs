//! Detail extraction from a single listing page

use scraper::Html;

use super::fields::wrap_price;
use super::query::{select_all, select_one, text};
use crate::error::Result;
use crate::layout::CompiledLayout;

/// Raw detail blocks of a listing page, the wrapped price last.
///
/// Fails if the details region or the price element is absent.
pub fn extract_details(html: &str, layout: &CompiledLayout) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let details_area = select_one(root, &layout.details, "listing page")?;
    let mut details: Vec<String> = select_all(details_area, &layout.detail_item)
        .map(text)
        .collect();

    let price = text(select_one(root, &layout.price, "listing page")?);
    details.push(wrap_price(&price, &layout.source.price_marker));

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use crate::layout::SiteLayout;

    const LISTING: &str = r#"
    <html>
    <body>
        <header><strong class="css-srd1q3 eu6swcv17">489 000 zł</strong></header>
        <div class="css-1d9dws4 egzohkh2">
            <div class="css-18h1kfv ev4i3ak3">Powierzchnia<div>48 m²</div></div>
            <div class="css-18h1kfv ev4i3ak3">Liczba pokoi<div>2</div></div>
            <div class="css-18h1kfv ev4i3ak3">Piętro<div>3/4</div></div>
        </div>
        <div class="css-18h1kfv ev4i3ak3">Outside the details region</div>
    </body>
    </html>
    "#;

    fn layout() -> CompiledLayout {
        SiteLayout::default().compile().unwrap()
    }

    #[test]
    fn test_extract_details() {
        let details = extract_details(LISTING, &layout()).unwrap();
        assert_eq!(
            details,
            vec![
                "Powierzchnia48 m²",
                "Liczba pokoi2",
                "Piętro3/4",
                "489 000 zł Cena",
            ]
        );
    }

    #[test]
    fn test_custom_price_marker() {
        let layout = SiteLayout {
            price_marker: " Price".to_string(),
            ..SiteLayout::default()
        }
        .compile()
        .unwrap();

        let details = extract_details(LISTING, &layout).unwrap();
        assert_eq!(details.last().map(String::as_str), Some("489 000 zł Price"));
    }

    #[test]
    fn test_empty_details_region_still_has_price() {
        let html = r#"
        <div class="css-1d9dws4 egzohkh2"></div>
        <strong class="css-srd1q3 eu6swcv17">1 zł</strong>
        "#;

        let details = extract_details(html, &layout()).unwrap();
        assert_eq!(details, vec!["1 zł Cena"]);
    }

    #[test]
    fn test_missing_details_region() {
        let html = r#"<strong class="css-srd1q3 eu6swcv17">1 zł</strong>"#;

        let err = extract_details(html, &layout()).unwrap_err();
        assert!(matches!(
            err,
            CrawlError::MissingElement { selector, .. } if selector == "div.css-1d9dws4.egzohkh2"
        ));
    }

    #[test]
    fn test_missing_price() {
        let html = r#"
        <div class="css-1d9dws4 egzohkh2">
            <div class="css-18h1kfv ev4i3ak3">Powierzchnia48 m²</div>
        </div>
        "#;

        let err = extract_details(html, &layout()).unwrap_err();
        assert!(matches!(
            err,
            CrawlError::MissingElement { selector, .. } if selector == "strong.css-srd1q3.eu6swcv17"
        ));
    }
}
