//! Meal types and the product catalogue.

use rand::Rng;
use rand::seq::SliceRandom;

use stayfit::models::{MealKind, ProductCategory};

use super::random_measure;

/// Well-known foods with per-100g macros: name, category, kcal, protein, fat, carbs.
const GLOBAL_FOODS: &[(&str, ProductCategory, f64, f64, f64, f64)] = &[
    ("Chicken Breast", ProductCategory::Meat, 165.0, 31.0, 3.6, 0.0),
    ("Brown Rice", ProductCategory::Grains, 370.0, 7.9, 2.9, 77.2),
    ("Broccoli", ProductCategory::Vegetables, 34.0, 2.8, 0.4, 7.0),
    ("Salmon", ProductCategory::Fish, 208.0, 20.0, 13.0, 0.0),
    ("Greek Yogurt", ProductCategory::Dairy, 59.0, 10.0, 0.4, 3.6),
    ("Apple", ProductCategory::Fruits, 52.0, 0.3, 0.2, 14.0),
    ("Banana", ProductCategory::Fruits, 89.0, 1.1, 0.3, 23.0),
    ("Eggs", ProductCategory::Other, 155.0, 13.0, 11.0, 1.1),
    ("Oatmeal", ProductCategory::Grains, 389.0, 16.9, 6.9, 66.3),
    ("Almonds", ProductCategory::Snacks, 579.0, 21.2, 49.9, 21.6),
];

/// Generated product ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProduct {
    pub name: String,
    pub category: ProductCategory,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    pub carbs_per_100g: f64,
    /// Owner of a custom product; global products have none.
    pub created_by: Option<i32>,
}

impl GeneratedProduct {
    pub fn is_global(&self) -> bool {
        self.created_by.is_none()
    }
}

/// Generates meal types and products.
pub struct CatalogGenerator {
    custom_products: usize,
}

impl CatalogGenerator {
    pub fn new(custom_products: usize) -> Self {
        Self { custom_products }
    }

    /// The canonical meal types, in display order.
    pub fn meal_types(&self) -> &'static [MealKind] {
        &MealKind::ALL
    }

    /// The fixed catalogue of global foods.
    pub fn global_products(&self) -> Vec<GeneratedProduct> {
        GLOBAL_FOODS
            .iter()
            .map(
                |&(name, category, calories, protein, fat, carbs)| GeneratedProduct {
                    name: name.to_string(),
                    category,
                    calories_per_100g: calories,
                    protein_per_100g: protein,
                    fat_per_100g: fat,
                    carbs_per_100g: carbs,
                    created_by: None,
                },
            )
            .collect()
    }

    /// User-created products with random macros, each owned by one of
    /// `user_ids`. Without users there is nobody to own them.
    pub fn custom_products(&self, user_ids: &[i32], rng: &mut impl Rng) -> Vec<GeneratedProduct> {
        if user_ids.is_empty() {
            return Vec::new();
        }

        (1..=self.custom_products)
            .map(|n| GeneratedProduct {
                name: format!("Custom Product {n}"),
                category: ProductCategory::ALL[rng.gen_range(0..ProductCategory::ALL.len())],
                calories_per_100g: random_measure(rng, 20.0, 600.0),
                protein_per_100g: random_measure(rng, 0.0, 50.0),
                fat_per_100g: random_measure(rng, 0.0, 40.0),
                carbs_per_100g: random_measure(rng, 0.0, 80.0),
                created_by: user_ids.choose(rng).copied(),
            })
            .collect()
    }

    /// Global catalogue followed by custom products.
    pub fn products(&self, user_ids: &[i32], rng: &mut impl Rng) -> Vec<GeneratedProduct> {
        let mut products = self.global_products();
        products.extend(self.custom_products(user_ids, rng));
        products
    }
}
