//! The built-in laws of boolean algebra.
//!
//! Within a phase, lower tiers hold the stronger laws: a tier is only consulted when every tier
//! below it produced nothing.

use super::{Phase, Traversal};

/// A law as written in the rule pattern notation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Law {
    pub lhs: &'static str,
    pub rhs: &'static str,
    pub description: &'static str,
    pub tier: u32,
    pub traversal: Traversal,
    pub phase: Phase,
    pub allow_multiple: bool,
}

/// Shorthand for a law with the most common settings: a POST law, tried at the outermost node
/// first, that stops its tier when it applies.
const fn post(lhs: &'static str, rhs: &'static str, description: &'static str, tier: u32) -> Law {
    Law {
        lhs,
        rhs,
        description,
        tier,
        traversal: Traversal::OutsideIn,
        phase: Phase::Post,
        allow_multiple: false,
    }
}

pub(crate) const LAWS: &[Law] = &[
    // expansion
    Law {
        lhs: "!(ItemA + [ItemsB])",
        rhs: "!ItemA . [!ItemsB]",
        description: "De Morgan's law",
        tier: 0,
        traversal: Traversal::OutsideIn,
        phase: Phase::Pre,
        allow_multiple: false,
    },
    Law {
        lhs: "!(ItemA . [ItemsB])",
        rhs: "!ItemA + [!ItemsB]",
        description: "De Morgan's law",
        tier: 0,
        traversal: Traversal::OutsideIn,
        phase: Phase::Pre,
        allow_multiple: false,
    },
    Law {
        lhs: "ItemA . (ItemB + [ItemsC]) . [ItemsD]",
        rhs: "(ItemA . ItemB + [ItemA . ItemsC]) . [ItemsD]",
        description: "Distributive law",
        tier: 1,
        traversal: Traversal::InsideOut,
        phase: Phase::Pre,
        allow_multiple: false,
    },

    // annulment, complement, constants
    post("1 + [ItemsA]", "1", "Annulment law", 0),
    post("0 . [ItemsA]", "0", "Annulment law", 0),
    post("ItemA + !ItemA + [ItemsB]", "1", "Complement law", 0),
    post("ItemA . !ItemA . [ItemsB]", "0", "Complement law", 0),
    post("!0", "1", "Negation of a constant", 0),
    post("!1", "0", "Negation of a constant", 0),
    post("!!ItemA", "ItemA", "Double negation law", 0),

    // identity, idempotence
    post("0 + ItemA + [ItemsB]", "ItemA + [ItemsB]", "Identity law", 1),
    post("1 . ItemA . [ItemsB]", "ItemA . [ItemsB]", "Identity law", 1),
    post("ItemA + ItemA + [ItemsB]", "ItemA + [ItemsB]", "Idempotent law", 1),
    post("ItemA . ItemA . [ItemsB]", "ItemA . [ItemsB]", "Idempotent law", 1),

    // absorption, redundancy
    post("ItemA + ItemA . ItemB . [ItemsC] + [ItemsD]", "ItemA + [ItemsD]", "Absorption law", 2),
    post("ItemA . (ItemA + ItemB + [ItemsC]) . [ItemsD]", "ItemA . [ItemsD]", "Absorption law", 2),
    post(
        "ItemA + !ItemA . ItemB . [ItemsC] + [ItemsD]",
        "ItemA + ItemB . [ItemsC] + [ItemsD]",
        "Redundancy law",
        2,
    ),
    post(
        "!ItemA + ItemA . ItemB . [ItemsC] + [ItemsD]",
        "!ItemA + ItemB . [ItemsC] + [ItemsD]",
        "Redundancy law",
        2,
    ),
    post(
        "ItemA . (!ItemA + ItemB + [ItemsC]) . [ItemsD]",
        "ItemA . (ItemB + [ItemsC]) . [ItemsD]",
        "Redundancy law",
        2,
    ),
    post(
        "!ItemA . (ItemA + ItemB + [ItemsC]) . [ItemsD]",
        "!ItemA . (ItemB + [ItemsC]) . [ItemsD]",
        "Redundancy law",
        2,
    ),

    // factoring, contraction
    Law {
        allow_multiple: true,
        ..post(
            "ItemA . ItemB . [ItemsE] + ItemA . ItemC . [ItemsF] + [ItemsG]",
            "ItemA . (ItemB . [ItemsE] + ItemC . [ItemsF]) + [ItemsG]",
            "Distributive law",
            3,
        )
    },
    Law {
        allow_multiple: true,
        ..post(
            "(ItemA + ItemB + [ItemsE]) . (ItemA + ItemC + [ItemsF]) . [ItemsG]",
            "(ItemA + (ItemB + [ItemsE]) . (ItemC + [ItemsF])) . [ItemsG]",
            "Distributive law",
            3,
        )
    },
    post("!ItemA . [!ItemsB]", "!(ItemA + [ItemsB])", "De Morgan's law", 3),
    post("!ItemA + [!ItemsB]", "!(ItemA . [ItemsB])", "De Morgan's law", 3),
];
