//! Image gallery and its full-screen overlay.

use vitrine_commerce::Product;

use super::{disabled_attr, escape_html};
use crate::state::SelectionState;

/// Render the main image, arrows, thumbnails and dots.
pub fn render_gallery(product: &Product, selection: &SelectionState) -> String {
    let index = selection.image_index();
    let main_image = main_image(product, index);

    let discount = product.discount_percent();
    let discount_badge = if discount > 0 {
        format!(r#"<span class="discount-badge">-{}%</span>"#, discount)
    } else {
        String::new()
    };

    let favorite_class = if selection.is_favorite() {
        "favorite-button active"
    } else {
        "favorite-button"
    };

    let thumbnails: String = product
        .images
        .iter()
        .enumerate()
        .map(|(i, url)| {
            format!(
                r#"<button class="thumbnail{selected}" data-action="select-image" data-index="{i}"><img src="{url}" alt="{alt} {n}"></button>"#,
                selected = if i == index { " selected" } else { "" },
                i = i,
                url = escape_html(url),
                alt = escape_html(&product.name),
                n = i + 1,
            )
        })
        .collect();

    let dots: String = (0..product.image_count())
        .map(|i| {
            format!(
                r#"<button class="dot{}" data-action="select-image" data-index="{}"></button>"#,
                if i == index { " active" } else { "" },
                i
            )
        })
        .collect();

    format!(
        r#"<section class="product-gallery" data-section="gallery">
    <div class="gallery-main" data-action="open-gallery">
        {main_image}
        {discount_badge}
    </div>
    <button class="gallery-prev" data-action="previous-image"{prev_disabled}>&lsaquo;</button>
    <button class="gallery-next" data-action="next-image"{next_disabled}>&rsaquo;</button>
    <button class="{favorite_class}" data-action="toggle-favorite">&hearts;</button>
    <button class="share-button" data-action="share">Compartilhar</button>
    <div class="gallery-thumbnails">{thumbnails}</div>
    <div class="gallery-dots">{dots}</div>
</section>"#,
        main_image = main_image,
        discount_badge = discount_badge,
        prev_disabled = disabled_attr(index == 0),
        next_disabled = disabled_attr(index + 1 >= product.image_count()),
        favorite_class = favorite_class,
        thumbnails = thumbnails,
        dots = dots,
    )
}

/// Render the full-screen overlay for the current image.
pub fn render_gallery_overlay(product: &Product, selection: &SelectionState) -> String {
    format!(
        r#"<div class="gallery-overlay" data-section="gallery-overlay">
    <button class="overlay-close" data-action="close-gallery">&times;</button>
    <div class="overlay-image">{main_image}</div>
    <div class="overlay-nav">
        <button data-action="previous-image">&lsaquo;</button>
        <button data-action="next-image">&rsaquo;</button>
    </div>
</div>"#,
        main_image = main_image(product, selection.image_index()),
    )
}

fn main_image(product: &Product, index: usize) -> String {
    match product.image(index) {
        Some(url) => format!(
            r#"<img src="{}" alt="{}" class="product-image-main">"#,
            escape_html(url),
            escape_html(&product.name)
        ),
        None => r#"<div class="product-image-placeholder">Sem imagem</div>"#.to_string(),
    }
}
