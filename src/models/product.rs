use serde::{Deserialize, Serialize};

/// A sellable product as served by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: f64,
    /// Aggregate rating out of five
    pub rating: u8,
    /// URL of the product image
    pub image: String,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            cost,
            rating: 0,
            image: String::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[allow(dead_code)]
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(5);
        self
    }
}

/// Finds the first catalog record with the given identifier.
pub fn find_product<'a>(catalog: &'a [CatalogItem], product_id: &str) -> Option<&'a CatalogItem> {
    catalog.iter().find(|product| product.id == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_product() {
        let json = r#"{
            "name": "Tan Leatherette Weekender Duffle",
            "category": "Fashion",
            "cost": 150,
            "rating": 4,
            "image": "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/ff071a1c.png",
            "_id": "PmInA797xJhMIPti"
        }"#;

        let product: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "PmInA797xJhMIPti");
        assert_eq!(product.category, "Fashion");
        assert_eq!(product.cost, 150.0);
        assert_eq!(product.rating, 4);
    }

    #[test]
    fn test_find_product_returns_first_match() {
        let catalog = vec![
            CatalogItem::new("a", "First", 10.0),
            CatalogItem::new("a", "Duplicate", 99.0),
            CatalogItem::new("b", "Other", 20.0),
        ];

        assert_eq!(find_product(&catalog, "a").unwrap().name, "First");
        assert!(find_product(&catalog, "missing").is_none());
    }

    #[test]
    fn test_rating_is_capped_at_five() {
        let product = CatalogItem::new("a", "Lamp", 12.5).with_rating(9);
        assert_eq!(product.rating, 5);
    }
}
