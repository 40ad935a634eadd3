use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten consumption categories, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Beef,
    Pork,
    Chicken,
    Fish,
    Butter,
    Dairy,
    Car,
    PublicTransport,
    Plane,
    Appliances,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Grams,
    Kilometers,
    Uses,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Kilometers => "km",
            Unit::Uses => "uses",
        }
    }
}

impl Category {
    pub const COUNT: usize = 10;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Beef,
        Category::Pork,
        Category::Chicken,
        Category::Fish,
        Category::Butter,
        Category::Dairy,
        Category::Car,
        Category::PublicTransport,
        Category::Plane,
        Category::Appliances,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in error reports and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::Beef => "beef",
            Category::Pork => "pork",
            Category::Chicken => "chicken",
            Category::Fish => "fish",
            Category::Butter => "butter",
            Category::Dairy => "dairy",
            Category::Car => "car",
            Category::PublicTransport => "public_transport",
            Category::Plane => "plane",
            Category::Appliances => "appliances",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Beef => "Beef",
            Category::Pork => "Pork",
            Category::Chicken => "Chicken",
            Category::Fish => "Fish",
            Category::Butter => "Butter",
            Category::Dairy => "Other dairy",
            Category::Car => "Car",
            Category::PublicTransport => "Public transport",
            Category::Plane => "Plane",
            Category::Appliances => "Appliance use",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Category::Beef
            | Category::Pork
            | Category::Chicken
            | Category::Fish
            | Category::Butter
            | Category::Dairy => Unit::Grams,
            Category::Car | Category::PublicTransport | Category::Plane => Unit::Kilometers,
            Category::Appliances => Unit::Uses,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw text as typed by the user, one entry per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: [String; Category::COUNT],
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field pre-filled with the same text.
    pub fn filled(value: &str) -> Self {
        Self {
            fields: std::array::from_fn(|_| value.to_string()),
        }
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) -> &mut Self {
        self.fields[category.index()] = value.into();
        self
    }

    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        self.set(category, value);
        self
    }

    pub fn get(&self, category: Category) -> &str {
        &self.fields[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.fields[c.index()].as_str()))
    }
}

/// Validated quantities for one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionInput {
    quantities: [u32; Category::COUNT],
}

impl ConsumptionInput {
    pub fn new(quantities: [u32; Category::COUNT]) -> Self {
        Self { quantities }
    }

    pub fn with(mut self, category: Category, quantity: u32) -> Self {
        self.quantities[category.index()] = quantity;
        self
    }

    pub fn get(&self, category: Category) -> u32 {
        self.quantities[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Grams of CO2 per unit of each category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    factors: [f64; Category::COUNT],
}

impl EmissionFactors {
    pub const STANDARD: EmissionFactors = EmissionFactors {
        factors: [16.88, 6.92, 2.79, 5.14, 12.11, 5.89, 171.0, 67.0, 365.0, 750.0],
    };

    pub fn factor(&self, category: Category) -> f64 {
        self.factors[category.index()]
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Computed footprint in grams of CO2. Never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootprintResult(pub f64);

impl FootprintResult {
    pub fn grams(&self) -> f64 {
        self.0
    }
}

/// One inbound message from the average topic, still undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPayload {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundPayload {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}
