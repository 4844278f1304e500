//! Built-in catalog entry.

use vitrine_commerce::{ColorOption, Money, Product};

const SAMPLE_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800",
    "https://images.unsplash.com/photo-1539185441755-769473a23570?w=800",
    "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=800",
    "https://images.unsplash.com/photo-1606107557195-0e29a4b5b4aa?w=800",
];

/// The sneaker the page ships with.
pub fn sample_product() -> Product {
    Product {
        id: "1".to_string(),
        name: "Tênis Nike Air Max Plus Drift".to_string(),
        price: Money::brl(89990),
        old_price: Some(Money::brl(129990)),
        rating: 4.5,
        reviews: 238,
        images: SAMPLE_IMAGES.iter().map(|url| url.to_string()).collect(),
        sizes: (38..=44).map(|size: u32| size.to_string()).collect(),
        colors: vec![
            ColorOption::new("Vermelho", "#EF4444"),
            ColorOption::new("Preto", "#000000"),
            ColorOption::new("Branco", "#FFFFFF"),
            ColorOption::new("Azul", "#3B82F6"),
        ],
        description: "O Nike Air Max Plus Drift combina o estilo icônico dos anos 90 com \
                      tecnologia moderna. Apresenta unidade Air Max visível no calcanhar e \
                      antepé para amortecimento excepcional."
            .to_string(),
        features: vec![
            "Cabedal em mesh respirável".to_string(),
            "Unidade Air Max dupla".to_string(),
            "Solado em borracha para tração".to_string(),
            "Design inspirado nos anos 90".to_string(),
        ],
    }
}
