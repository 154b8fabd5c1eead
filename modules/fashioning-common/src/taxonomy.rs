//! Keyword tables backing classification. Matching is case-insensitive
//! substring, so every keyword here is lower-case.

use crate::types::{Category, Region};

impl Category {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Luxury => &[
                "luxury", "couture", "haute", "premium", "exclusive", "designer", "high-end",
            ],
            Category::Streetwear => &[
                "streetwear", "urban", "casual", "street", "sneakers", "hoodie", "oversized",
            ],
            Category::Sustainable => &[
                "sustainable", "eco-friendly", "organic", "recycled", "ethical", "green",
            ],
            Category::Vintage => &[
                "vintage", "retro", "classic", "heritage", "throwback", "nostalgic",
            ],
            Category::Minimalist => &[
                "minimalist", "minimal", "clean", "simple", "understated", "essential",
            ],
            Category::Maximalist => &[
                "maximalist", "bold", "dramatic", "statement", "extravagant", "ornate",
            ],
            Category::Athleisure => &[
                "athleisure", "athletic", "sporty", "activewear", "performance", "gym",
            ],
            Category::Formal => &[
                "formal", "business", "professional", "suit", "tailored", "corporate",
            ],
            Category::Casual => &[
                "casual", "everyday", "comfortable", "relaxed", "easy", "laid-back",
            ],
            Category::AvantGarde => &[
                "avant-garde", "experimental", "innovative", "cutting-edge", "artistic",
                "conceptual",
            ],
        }
    }
}

impl Region {
    /// Global has no keywords; it is the fallback when nothing else matches.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Region::Global => &[],
            Region::NorthAmerica => &[
                "new york", "nyfw", "lafw", "canada", "american", "us", "united states",
            ],
            Region::Europe => &[
                "paris", "pfw", "milan", "mfw", "london", "lfw", "european", "french", "italian",
                "british",
            ],
            Region::AsiaPacific => &[
                "tokyo", "tfw", "seoul", "sfw", "shanghai", "asian", "japanese", "korean",
                "chinese",
            ],
            Region::LatinAmerica => &[
                "sao paulo", "spfw", "mexico", "brazil", "latin", "south american",
            ],
            Region::MiddleEast => &["dubai", "abudhabi", "middle east", "arabic", "gulf"],
            Region::Africa => &["lagos", "africa", "african", "nigerian", "south african"],
        }
    }
}
