//! Purchase buttons and trust badges.

use super::disabled_attr;
use crate::state::SelectionState;

/// Render the purchase actions; both stay disabled until size and color are chosen.
pub fn render_purchase(selection: &SelectionState) -> String {
    let disabled = disabled_attr(!selection.can_purchase());
    format!(
        r#"<section class="product-purchase" data-section="purchase">
    <button class="buy-now" data-action="buy-now"{disabled}>Comprar agora</button>
    <button class="add-to-cart" data-action="add-to-cart"{disabled}>Adicionar ao carrinho</button>
    <div class="trust-badges">
        <p>Entrega<br>rápida</p>
        <p>Compra<br>segura</p>
        <p>Parcelamento<br>sem juros</p>
    </div>
</section>"#,
        disabled = disabled,
    )
}
