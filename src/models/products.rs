use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Deserialize, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
    pub category: String,
    pub material: String,
    pub image_url: String,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    pub url: String,
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price_in_cents: i64,
    category: &str,
    material: &str,
    image_url: &str,
    is_new: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_in_cents,
        category: category.to_string(),
        material: material.to_string(),
        image_url: image_url.to_string(),
        is_new,
    }
}

/// Catalog loaded into an empty products table on first boot.
pub fn default_catalog() -> Vec<Product> {
    vec![
        product(
            "1",
            "Dragão Articulado Crystal",
            "Dragão totalmente flexível impresso em uma única peça. Acabamento brilhante e design intrincado.",
            4590,
            "Brinquedos",
            "PLA",
            "https://picsum.photos/400/400?random=1",
            true,
        ),
        product(
            "2",
            "Suporte Headphone Voronoi",
            "Suporte para fones de ouvido com padrão celular orgânico. Leve, resistente e esteticamente moderno.",
            8900,
            "Acessórios Tech",
            "PETG",
            "https://picsum.photos/400/400?random=2",
            false,
        ),
        product(
            "3",
            "Vaso Geométrico Low Poly",
            "Vaso decorativo ideal para suculentas. Design minimalista facetado.",
            3550,
            "Decoração",
            "PLA",
            "https://picsum.photos/400/400?random=3",
            false,
        ),
        product(
            "4",
            "Organizador de Cabos Hex",
            "Sistema modular hexagonal para organização de cabos em mesas de escritório.",
            2200,
            "Organização",
            "PLA",
            "https://picsum.photos/400/400?random=4",
            false,
        ),
        product(
            "5",
            "Lâmpada Litofania Personalizável",
            "Lâmpada que revela uma imagem detalhada quando acesa. Impressão de altíssima resolução.",
            12000,
            "Decoração",
            "Resina",
            "https://picsum.photos/400/400?random=5",
            true,
        ),
        product(
            "6",
            "Keycap Mecânica Artisan",
            "Tecla personalizada para teclados mecânicos (Switch MX). Pintada à mão.",
            5500,
            "Acessórios Tech",
            "Resina",
            "https://picsum.photos/400/400?random=6",
            false,
        ),
        product(
            "7",
            "Suporte Celular Polvo",
            "Suporte divertido em formato de tentáculos para smartphones e pequenos tablets.",
            2990,
            "Acessórios Tech",
            "TPU",
            "https://picsum.photos/400/400?random=7",
            false,
        ),
        product(
            "8",
            "Engrenagens Pedagógicas",
            "Kit de engrenagens funcionais para ensino de física e mecânica básica.",
            6500,
            "Educacional",
            "PETG",
            "https://picsum.photos/400/400?random=8",
            false,
        ),
    ]
}
