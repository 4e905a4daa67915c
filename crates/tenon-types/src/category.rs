use serde::{Deserialize, Serialize};

/// Stock lumber category. Each category carries a fixed actual cross
/// section in millimetres; the piece length is the only free dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "1x2")]
    OneByTwo,
    #[serde(rename = "1x3")]
    OneByThree,
    #[serde(rename = "1x4")]
    OneByFour,
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "2x3")]
    TwoByThree,
    #[serde(rename = "2x4")]
    TwoByFour,
    #[serde(rename = "2x6")]
    TwoBySix,
    #[serde(rename = "4x4")]
    FourByFour,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::OneByTwo,
        Category::OneByThree,
        Category::OneByFour,
        Category::TwoByTwo,
        Category::TwoByThree,
        Category::TwoByFour,
        Category::TwoBySix,
        Category::FourByFour,
    ];

    /// Parse a nominal size name. Static mapping, no reflection.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1x2" => Some(Category::OneByTwo),
            "1x3" => Some(Category::OneByThree),
            "1x4" => Some(Category::OneByFour),
            "2x2" => Some(Category::TwoByTwo),
            "2x3" => Some(Category::TwoByThree),
            "2x4" => Some(Category::TwoByFour),
            "2x6" => Some(Category::TwoBySix),
            "4x4" => Some(Category::FourByFour),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::OneByTwo => "1x2",
            Category::OneByThree => "1x3",
            Category::OneByFour => "1x4",
            Category::TwoByTwo => "2x2",
            Category::TwoByThree => "2x3",
            Category::TwoByFour => "2x4",
            Category::TwoBySix => "2x6",
            Category::FourByFour => "4x4",
        }
    }

    /// Actual cross section as (width, height) in mm. Width is the larger
    /// dimension and spans local X; height spans local Y.
    pub fn cross_section(&self) -> (f64, f64) {
        match self {
            Category::OneByTwo => (38.0, 19.0),
            Category::OneByThree => (64.0, 19.0),
            Category::OneByFour => (89.0, 19.0),
            Category::TwoByTwo => (38.0, 38.0),
            Category::TwoByThree => (64.0, 38.0),
            Category::TwoByFour => (89.0, 38.0),
            Category::TwoBySix => (140.0, 38.0),
            Category::FourByFour => (89.0, 89.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.cross_section().0
    }

    pub fn height(&self) -> f64 {
        self.cross_section().1
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
