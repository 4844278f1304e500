//! Color, size and quantity pickers.

use vitrine_commerce::Product;

use super::{disabled_attr, escape_html};
use crate::state::SelectionState;

/// Render the variant pickers and quantity stepper.
pub fn render_variants(product: &Product, selection: &SelectionState) -> String {
    let colors: String = product
        .colors
        .iter()
        .map(|color| {
            let mut class = String::from("color-option");
            if selection.color() == Some(color.name.as_str()) {
                class.push_str(" selected");
            }
            if color.needs_outline() {
                class.push_str(" outlined");
            }
            format!(
                r#"<button class="{class}" data-action="select-color" data-value="{name}" title="{name}" style="background-color: {hex}"></button>"#,
                class = class,
                name = escape_html(&color.name),
                hex = escape_html(&color.hex),
            )
        })
        .collect();

    let sizes: String = product
        .sizes
        .iter()
        .map(|size| {
            format!(
                r#"<button class="size-option{selected}" data-action="select-size" data-value="{size}">{size}</button>"#,
                selected = if selection.size() == Some(size.as_str()) {
                    " selected"
                } else {
                    ""
                },
                size = escape_html(size),
            )
        })
        .collect();

    format!(
        r#"<section class="product-variants" data-section="variants">
    <div class="variant-group">
        <h3>Cor: <span class="variant-selected">{selected_color}</span></h3>
        <div class="color-options">{colors}</div>
    </div>
    <div class="variant-group">
        <h3>Tamanho</h3>
        <div class="size-options">{sizes}</div>
    </div>
    <div class="quantity">
        <h3>Quantidade</h3>
        <button data-action="decrement-quantity"{minus_disabled}>-</button>
        <span class="quantity-value">{quantity}</span>
        <button data-action="increment-quantity">+</button>
    </div>
</section>"#,
        selected_color = escape_html(selection.color().unwrap_or("Selecione")),
        colors = colors,
        sizes = sizes,
        minus_disabled = disabled_attr(selection.quantity() <= 1),
        quantity = selection.quantity(),
    )
}
