use serde::Serialize;

/// Grocery aisle for shopping list organization. Variant order is the
/// order the aisles are walked, which drives shopping list sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Aisle {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Frozen,
    Bakery,
    Other,
}

impl Aisle {
    pub fn as_str(&self) -> &str {
        match self {
            Aisle::Produce => "Produce",
            Aisle::Dairy => "Dairy",
            Aisle::Meat => "Meat",
            Aisle::Pantry => "Pantry",
            Aisle::Frozen => "Frozen",
            Aisle::Bakery => "Bakery",
            Aisle::Other => "Other",
        }
    }
}

impl std::fmt::Display for Aisle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an ingredient name to a grocery aisle using predefined keyword
/// tables. Names not covered by any table land in `Aisle::Other`.
pub fn categorize(ingredient_name: &str) -> Aisle {
    let normalized = ingredient_name.trim().to_lowercase();

    if is_produce(&normalized) {
        return Aisle::Produce;
    }
    if is_dairy(&normalized) {
        return Aisle::Dairy;
    }
    if is_meat(&normalized) {
        return Aisle::Meat;
    }
    if is_pantry(&normalized) {
        return Aisle::Pantry;
    }
    if is_frozen(&normalized) {
        return Aisle::Frozen;
    }
    if is_bakery(&normalized) {
        return Aisle::Bakery;
    }

    Aisle::Other
}

fn is_produce(name: &str) -> bool {
    matches!(
        name,
        // Vegetables
        "tomato" | "tomatoes"
            | "onion" | "onions"
            | "garlic"
            | "lettuce"
            | "carrot" | "carrots"
            | "celery"
            | "bell pepper" | "bell peppers"
            | "cucumber" | "cucumbers"
            | "zucchini"
            | "broccoli"
            | "cauliflower"
            | "spinach"
            | "kale"
            | "cabbage"
            | "potato" | "potatoes"
            | "sweet potato" | "sweet potatoes"
            | "mushroom" | "mushrooms"
            | "green beans"
            | "peas"
            | "corn"
            | "avocado" | "avocados"
            | "eggplant"
            | "ginger"
            | "vegetables"
            | "herbs"
            | "cilantro"
            | "parsley"
            | "basil"
            | "mint"
            | "thyme"
            | "rosemary"
            // Fruits
            | "apple" | "apples"
            | "banana" | "bananas"
            | "orange" | "oranges"
            | "lemon" | "lemons"
            | "lime" | "limes"
            | "strawberry" | "strawberries"
            | "blueberry" | "blueberries"
            | "grape" | "grapes"
            | "mango" | "mangoes"
            | "pineapple"
            | "fruits"
            | "olives"
    )
}

fn is_dairy(name: &str) -> bool {
    matches!(
        name,
        "milk"
            | "cream"
            | "heavy cream"
            | "sour cream"
            | "butter"
            | "cheese"
            | "cheddar cheese"
            | "mozzarella cheese"
            | "parmesan cheese"
            | "feta cheese"
            | "cream cheese"
            | "yogurt"
            | "greek yogurt"
            | "egg" | "eggs"
    )
}

fn is_meat(name: &str) -> bool {
    matches!(
        name,
        // Poultry
        "chicken"
            | "chicken breast" | "chicken breasts"
            | "chicken thigh" | "chicken thighs"
            | "turkey"
            | "duck"
            // Red meat
            | "beef"
            | "ground beef"
            | "steak"
            | "pork"
            | "bacon"
            | "ham"
            | "sausage"
            | "lamb"
            | "meat"
            // Seafood
            | "fish"
            | "salmon"
            | "tuna"
            | "cod"
            | "shrimp"
            | "prawns"
            | "crab"
    )
}

fn is_pantry(name: &str) -> bool {
    matches!(
        name,
        // Grains, pasta, legumes
        "flour"
            | "rice"
            | "pasta"
            | "noodles"
            | "quinoa"
            | "oats"
            | "cereal"
            | "beans"
            | "lentils"
            | "chickpeas"
            | "grains"
            // Baking and sweets
            | "sugar"
            | "brown sugar"
            | "honey"
            | "chocolate"
            | "vanilla"
            | "baking powder"
            | "baking soda"
            // Oils, condiments, seasonings
            | "oil"
            | "olive oil"
            | "vegetable oil"
            | "vinegar"
            | "soy sauce"
            | "dressing"
            | "dips"
            | "salt"
            | "pepper"
            | "spices"
            | "broth"
            | "stock"
            // Snacks and drinks kept on shelves
            | "nuts"
            | "crackers"
            | "tea"
            | "coffee"
    )
}

fn is_frozen(name: &str) -> bool {
    matches!(
        name,
        "frozen peas" | "frozen corn" | "frozen berries" | "frozen spinach" | "ice cream"
    )
}

fn is_bakery(name: &str) -> bool {
    matches!(
        name,
        "bread" | "toast" | "baguette" | "rolls" | "buns" | "tortillas" | "pita"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_produce() {
        assert_eq!(categorize("tomatoes"), Aisle::Produce);
        assert_eq!(categorize("Spinach"), Aisle::Produce);
        assert_eq!(categorize("  bell peppers  "), Aisle::Produce);
    }

    #[test]
    fn test_categorize_dairy_and_meat() {
        assert_eq!(categorize("milk"), Aisle::Dairy);
        assert_eq!(categorize("eggs"), Aisle::Dairy);
        assert_eq!(categorize("chicken"), Aisle::Meat);
        assert_eq!(categorize("fish"), Aisle::Meat);
    }

    #[test]
    fn test_categorize_pantry() {
        assert_eq!(categorize("salt"), Aisle::Pantry);
        assert_eq!(categorize("olive oil"), Aisle::Pantry);
        assert_eq!(categorize("rice"), Aisle::Pantry);
    }

    #[test]
    fn test_categorize_unknown_falls_back_to_other() {
        assert_eq!(categorize("dragonfruit syrup"), Aisle::Other);
        assert_eq!(categorize(""), Aisle::Other);
    }

    #[test]
    fn test_aisle_order_follows_store_walk() {
        assert!(Aisle::Produce < Aisle::Dairy);
        assert!(Aisle::Dairy < Aisle::Meat);
        assert!(Aisle::Bakery < Aisle::Other);
    }

    #[test]
    fn test_aisle_display() {
        assert_eq!(Aisle::Produce.to_string(), "Produce");
        assert_eq!(Aisle::Other.as_str(), "Other");
    }
}
