//! Section renderers for the product page.

mod about;
mod details;
mod gallery;
mod purchase;
mod shipping;
mod variants;

pub use about::*;
pub use details::*;
pub use gallery::*;
pub use purchase::*;
pub use shipping::*;
pub use variants::*;

use vitrine_commerce::Product;

use crate::shipping::ShippingState;
use crate::state::SelectionState;

/// Minimal page styles.
pub const PAGE_STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f9fafb; color: #111827; }
.site-header { display: flex; justify-content: space-between; padding: 12px 16px; background: #fff; }
.site-header h1 { color: #2563eb; font-size: 1.25rem; margin: 0; }
.cart-badge { background: #ef4444; color: #fff; border-radius: 9999px; padding: 0 6px; font-size: 0.75rem; }
.pdp-container { max-width: 1280px; margin: 0 auto; padding: 16px; display: grid; gap: 24px; }
.gallery-main img { width: 100%; border-radius: 12px; }
.thumbnail.selected, .size-option.selected, .color-option.selected { outline: 2px solid #3b82f6; }
.dot.active { background: #2563eb; width: 32px; }
.price-current { font-size: 2rem; font-weight: 700; }
.price-original { text-decoration: line-through; color: #6b7280; }
.discount-badge { background: #ef4444; color: #fff; padding: 2px 8px; border-radius: 6px; }
.star.filled { color: #facc15; }
.shipping-error { color: #dc2626; }
.shipping-address { background: #f0fdf4; padding: 12px; border-radius: 8px; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.gallery-overlay { position: fixed; inset: 0; background: #000; display: flex; align-items: center; }
"#;

/// Render the whole page document.
pub fn render_page(
    product: &Product,
    selection: &SelectionState,
    shipping: &ShippingState,
    gallery_open: bool,
) -> String {
    let overlay = if gallery_open {
        render_gallery_overlay(product, selection)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | ShopMax</title>
    <style>{styles}</style>
</head>
<body>
    <header class="site-header">
        <h1>ShopMax</h1>
        <input type="text" placeholder="Buscar produtos..." class="search-input">
        <div class="cart" data-section="cart">Carrinho <span class="cart-badge">{cart_count}</span></div>
    </header>
    <main class="pdp-container">
        {gallery}
        <div class="product-info">
            {details}
            {variants}
            {shipping}
            {purchase}
        </div>
        {about}
    </main>
    {overlay}
</body>
</html>"#,
        title = escape_html(&product.name),
        styles = PAGE_STYLES,
        cart_count = selection.quantity(),
        gallery = render_gallery(product, selection),
        details = render_details(product),
        variants = render_variants(product, selection),
        shipping = render_shipping(shipping),
        purchase = render_purchase(selection),
        about = render_about(product),
        overlay = overlay,
    )
}

/// Escape text for HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// ` disabled` when `disabled` is set, for splicing into a tag.
pub(crate) fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}
