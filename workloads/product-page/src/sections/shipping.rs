//! CEP input and shipping estimates.

use vitrine_commerce::standard_options;

use super::{disabled_attr, escape_html};
use crate::shipping::ShippingState;

/// Render the shipping calculator.
pub fn render_shipping(shipping: &ShippingState) -> String {
    let error = match shipping.error() {
        Some(err) => format!(
            r#"<p class="shipping-error">{}</p>"#,
            escape_html(&err.to_string())
        ),
        None => String::new(),
    };

    let address = match shipping.address() {
        Some(address) => {
            let estimates: String = standard_options()
                .iter()
                .map(|option| {
                    format!(
                        r#"<p class="shipping-option"><span class="shipping-name">{}:</span> {}</p>"#,
                        escape_html(&option.name),
                        escape_html(&option.estimate())
                    )
                })
                .collect();
            format!(
                r#"<div class="shipping-address">
        <p>Endereço encontrado:</p>
        <p>{street}<br>{city}<br>CEP: {cep}</p>
        <div class="shipping-options">{estimates}</div>
    </div>"#,
                street = escape_html(&address.street_line()),
                city = escape_html(&address.city_line()),
                cep = escape_html(&address.postal_code),
                estimates = estimates,
            )
        }
        None => String::new(),
    };

    format!(
        r#"<section class="product-shipping" data-section="shipping">
    <h3>Calcular frete e prazo</h3>
    <div class="shipping-form">
        <input type="text" name="cep" value="{cep}" placeholder="00000-000" maxlength="9">
        <button data-action="search-cep"{disabled}>{label}</button>
    </div>
    {error}
    {address}
</section>"#,
        cep = escape_html(shipping.postal_code()),
        disabled = disabled_attr(shipping.is_loading()),
        label = shipping.action_label(),
        error = error,
        address = address,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_commerce::Address;

    #[test]
    fn test_empty_form() {
        let html = render_shipping(&ShippingState::new());
        assert!(html.contains(r#"value="""#));
        assert!(html.contains(r#"<button data-action="search-cep">Calcular</button>"#));
        assert!(!html.contains("shipping-error"));
        assert!(!html.contains("Endereço encontrado"));
    }

    #[test]
    fn test_error_message() {
        let mut shipping = ShippingState::new();
        shipping.edit_postal_code("1234567");
        let _ = shipping.begin_lookup();
        let html = render_shipping(&shipping);
        assert!(html.contains(r#"<p class="shipping-error">CEP deve conter 8 dígitos</p>"#));
    }

    #[test]
    fn test_loading_disables_button() {
        let mut shipping = ShippingState::new();
        shipping.edit_postal_code("01310100");
        shipping.begin_lookup().unwrap();
        let html = render_shipping(&shipping);
        assert!(html.contains(r#"<button data-action="search-cep" disabled>Buscando...</button>"#));
    }

    #[test]
    fn test_address_and_estimates() {
        let address = Address::new("Avenida Paulista", "Bela Vista", "São Paulo", "SP", "01310-100");
        let shipping = ShippingState::restore("01310-100", Some(address));
        let html = render_shipping(&shipping);
        assert!(html.contains(r#"value="01310-100""#));
        assert!(html.contains("Avenida Paulista, Bela Vista"));
        assert!(html.contains("São Paulo - SP"));
        assert!(html.contains("CEP: 01310-100"));
        assert!(html.contains("Frete Grátis:</span> Chegará entre 5 a 7 dias úteis"));
        assert!(html.contains("Expresso:</span> R$ 19,90 - 2 dias úteis"));
    }
}
