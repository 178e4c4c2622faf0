// Copyright (c) Fluxbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword categorizer for free-text transaction titles.

pub const DEFAULT_CATEGORY: &str = "General";

/// Ordered (category, keywords) table. Order matters: the first category
/// with a matching keyword wins.
pub static CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Housing & Rent",
        &["rent", "mortgage", "housing", "apartment", "realty"],
    ),
    (
        "Food & Dining",
        &[
            "restaurant",
            "cafe",
            "mcdonald",
            "starbucks",
            "ubereats",
            "doordash",
            "grocery",
            "supermarket",
            "walmart",
            "whole foods",
            "safeway",
            "kroger",
            "dining",
            "food",
            "bakery",
        ],
    ),
    (
        "Transport",
        &[
            "uber",
            "lyft",
            "gas",
            "shell",
            "chevron",
            "parking",
            "metro",
            "train",
            "bus",
            "airline",
            "delta",
            "united",
            "flight",
            "travel",
            "car rental",
            "automotive",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "target", "ebay", "best buy", "apple", "clothing", "fashion", "boots",
            "nike", "adidas", "mall", "shopping",
        ],
    ),
    (
        "Utilities",
        &[
            "electric", "water", "gas bill", "internet", "comcast", "verizon", "at&t",
            "utilities", "trash",
        ],
    ),
    (
        "Health",
        &[
            "pharmacy",
            "cvs",
            "walgreens",
            "doctor",
            "hospital",
            "medical",
            "dental",
            "gym",
            "fitness",
            "insurance",
        ],
    ),
    (
        "Entertainment",
        &[
            "netflix",
            "spotify",
            "hulu",
            "disney+",
            "cinema",
            "theater",
            "gaming",
            "steam",
            "playstation",
            "xbox",
            "concert",
            "ticket",
        ],
    ),
    (
        "Subscriptions",
        &["adobe", "figma", "github", "zoom", "subscription", "membership"],
    ),
    (
        "Work & Business",
        &["software", "hardware", "office", "staples", "freelance", "business"],
    ),
    (
        "Income",
        &[
            "salary", "paycheck", "bonus", "dividend", "transfer", "interest", "refund",
        ],
    ),
    (
        "Debt & Loans",
        &[
            "loan",
            "credit card payment",
            "interest",
            "capital one",
            "chase",
            "amex",
            "bank of america",
        ],
    ),
];

/// Map a title to a category label: case-insensitive substring containment,
/// first match wins, "General" when nothing matches. Pure and total.
pub fn auto_categorize(title: &str) -> &'static str {
    let normalized = title.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| normalized.contains(k)) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}
