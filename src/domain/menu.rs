//! Catalog reference data: menu items, categories, and ingredient pricing.
//!
//! Everything in this module is immutable once constructed. Orders snapshot
//! the fields they need at add time, so later catalog edits never reach back
//! into existing orders.

use std::fmt;

/// Pizza size. Also selects the price column for ingredient add-ons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Mini,
    Small,
    Medium,
    Large,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Size::Mini => "mini",
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        };
        f.write_str(s)
    }
}

/// Whether a catalog entry is a configurable pizza or a plain product
/// (drink, side) that takes no ingredient customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    Pizza,
    Product,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
}

/// An ingredient that can be attached to a pizza line item.
///
/// `category` is the ingredient-category *name*; the size-dependent add-on
/// price lives in the matching [`IngredientCategory`] table.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Per-size price table for one ingredient category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePrices {
    pub mini: f64,
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl SizePrices {
    pub fn for_size(&self, size: Size) -> f64 {
        match size {
            Size::Mini => self.mini,
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientCategory {
    pub id: String,
    pub name: String,
    pub prices: SizePrices,
}

/// One catalog entry as shown on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: String,
    /// Short display number printed on kitchen tickets ("#1 Margherita").
    pub number: String,
    pub name: String,
    /// Id of the owning [`MenuCategory`].
    pub category: String,
    /// Base unit price before ingredient surcharges.
    pub price: f64,
    pub kind: MenuItemKind,
    /// Default size when the waiter does not pick one explicitly.
    pub size: Option<Size>,
    /// Ingredients included by default; copied into new line items.
    pub ingredients: Vec<Ingredient>,
}

impl MenuItem {
    /// Only pizzas take ingredient customization; plain products do not.
    pub fn accepts_ingredients(&self) -> bool {
        self.kind == MenuItemKind::Pizza
    }
}

/// The full read-only catalog handed to the menu service at construction.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    pub items: Vec<MenuItem>,
    pub categories: Vec<MenuCategory>,
    pub ingredients: Vec<Ingredient>,
    pub ingredient_categories: Vec<IngredientCategory>,
}

impl MenuCatalog {
    /// Looks up the add-on price for an ingredient at the given size.
    ///
    /// Returns 0.0 when the ingredient's category has no price table, so an
    /// unpriced ingredient can still be attached for free.
    pub fn surcharge(&self, ingredient: &Ingredient, size: Size) -> f64 {
        self.ingredient_categories
            .iter()
            .find(|c| c.name == ingredient.category)
            .map(|c| c.prices.for_size(size))
            .unwrap_or(0.0)
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Small seed catalog used by the demo binary.
    pub fn sample() -> Self {
        let tomato_sauce = Ingredient {
            id: "i1".into(),
            name: "Tomato sauce".into(),
            category: "Sauces".into(),
        };
        let mozzarella = Ingredient {
            id: "i2".into(),
            name: "Mozzarella".into(),
            category: "Cheeses".into(),
        };
        let basil = Ingredient {
            id: "i3".into(),
            name: "Basil".into(),
            category: "Extras".into(),
        };
        let pepperoni = Ingredient {
            id: "i4".into(),
            name: "Pepperoni".into(),
            category: "Meats".into(),
        };
        let mushrooms = Ingredient {
            id: "i5".into(),
            name: "Mushrooms".into(),
            category: "Vegetables".into(),
        };

        Self {
            items: vec![
                MenuItem {
                    id: "m1".into(),
                    number: "1".into(),
                    name: "Margherita".into(),
                    category: "c1".into(),
                    price: 29.99,
                    kind: MenuItemKind::Pizza,
                    size: Some(Size::Medium),
                    ingredients: vec![
                        tomato_sauce.clone(),
                        mozzarella.clone(),
                        basil.clone(),
                    ],
                },
                MenuItem {
                    id: "m2".into(),
                    number: "2".into(),
                    name: "Pepperoni".into(),
                    category: "c1".into(),
                    price: 34.99,
                    kind: MenuItemKind::Pizza,
                    size: Some(Size::Medium),
                    ingredients: vec![
                        tomato_sauce.clone(),
                        mozzarella.clone(),
                        pepperoni.clone(),
                    ],
                },
                MenuItem {
                    id: "m3".into(),
                    number: "7".into(),
                    name: "Cola".into(),
                    category: "c4".into(),
                    price: 6.50,
                    kind: MenuItemKind::Product,
                    size: None,
                    ingredients: Vec::new(),
                },
            ],
            categories: vec![
                MenuCategory { id: "c1".into(), name: "Classic".into() },
                MenuCategory { id: "c2".into(), name: "Vegetarian".into() },
                MenuCategory { id: "c3".into(), name: "Sides".into() },
                MenuCategory { id: "c4".into(), name: "Drinks".into() },
            ],
            ingredients: vec![pepperoni, mushrooms, mozzarella],
            ingredient_categories: vec![
                IngredientCategory {
                    id: "ic1".into(),
                    name: "Meats".into(),
                    prices: SizePrices { mini: 2.99, small: 3.99, medium: 4.99, large: 5.99 },
                },
                IngredientCategory {
                    id: "ic2".into(),
                    name: "Vegetables".into(),
                    prices: SizePrices { mini: 1.99, small: 2.99, medium: 3.99, large: 4.99 },
                },
                IngredientCategory {
                    id: "ic3".into(),
                    name: "Cheeses".into(),
                    prices: SizePrices { mini: 2.49, small: 3.49, medium: 4.49, large: 5.49 },
                },
            ],
        }
    }
}
