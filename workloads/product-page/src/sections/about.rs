//! Description and feature list.

use vitrine_commerce::Product;

use super::escape_html;

/// Render the "Sobre o produto" section.
pub fn render_about(product: &Product) -> String {
    let features: String = product
        .features
        .iter()
        .map(|feature| format!("<li>{}</li>", escape_html(feature)))
        .collect();

    format!(
        r#"<section class="product-about" data-section="about">
    <h2>Sobre o produto</h2>
    <p>{description}</p>
    <h3>Características principais</h3>
    <ul class="features">{features}</ul>
</section>"#,
        description = escape_html(&product.description),
        features = features,
    )
}
