use serde::Serialize;

#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Beverage,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Beverage => "BEVERAGE",
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub price: u32,
    pub stock_quantity: u32,
    pub category: Category,
}

impl ProductRequest {
    pub fn new<S: Into<String>>(
        name: S,
        price: u32,
        stock_quantity: u32,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            stock_quantity,
            category,
        }
    }
}
