//! Name, rating and price block.

use vitrine_commerce::catalog::MAX_STARS;
use vitrine_commerce::Product;

use super::escape_html;

/// Number of interest-free installments advertised.
pub const INSTALLMENTS: u32 = 12;

/// Render the product details section.
pub fn render_details(product: &Product) -> String {
    let filled = product.filled_stars();
    let stars: String = (0..MAX_STARS)
        .map(|i| {
            if i < filled {
                r#"<span class="star filled">&#9733;</span>"#
            } else {
                r#"<span class="star">&#9733;</span>"#
            }
        })
        .collect();

    let old_price = match &product.old_price {
        Some(old) => format!(r#"<span class="price-original">{}</span>"#, old.display()),
        None => String::new(),
    };

    format!(
        r#"<section class="product-details" data-section="details">
    <h1 class="product-name">{name}</h1>
    <div class="product-rating">
        {stars}
        <span class="rating-value">{rating}</span>
        <span class="rating-count">({reviews} avaliações)</span>
    </div>
    <div class="price-main">
        <span class="price-current">{price}</span>
        {old_price}
    </div>
    <p class="installments">Em até {parts}x de {installment} sem juros</p>
</section>"#,
        name = escape_html(&product.name),
        stars = stars,
        rating = product.rating,
        reviews = product.reviews,
        price = product.price.display(),
        old_price = old_price,
        parts = INSTALLMENTS,
        installment = product.installment(INSTALLMENTS).display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_product;

    #[test]
    fn test_details() {
        let html = render_details(&sample_product());
        assert!(html.contains("Tênis Nike Air Max Plus Drift"));
        assert!(html.contains(r#"<span class="price-current">R$ 899,90</span>"#));
        assert!(html.contains(r#"<span class="price-original">R$ 1.299,90</span>"#));
        assert!(html.contains("Em até 12x de R$ 74,99 sem juros"));
        assert!(html.contains("(238 avaliações)"));
        assert!(html.contains(r#"<span class="rating-value">4.5</span>"#));
        assert_eq!(html.matches("star filled").count(), 4);
    }

    #[test]
    fn test_no_old_price() {
        let mut product = sample_product();
        product.old_price = None;
        assert!(!render_details(&product).contains("price-original"));
    }
}
