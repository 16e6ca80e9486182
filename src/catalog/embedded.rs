//! Embedded default puzzle
//!
//! A Finnish Christmas puzzle, ordered from the easiest group to the hardest.

use crate::core::GroupColor;

/// `(category, words, color)` for each group
pub const DEFAULT_PUZZLE: &[(&str, [&str; 4], &str)] = &[
    (
        "JOULUELOKUVIA",
        ["LUMIUKKO", "PETTERI PUNAKUONO", "SAITURIN JOULU", "JOULUTARINA"],
        GroupColor::YELLOW,
    ),
    (
        "JOULUPUKIN POROJA",
        ["PYRY", "KIPINÄ", "SIPSU", "MASKOTTI"],
        GroupColor::GREEN,
    ),
    (
        "KUUSENKORISTEITA",
        ["KYNTTILÄ", "TÄHTI", "PALLO", "KÖYNNÖS"],
        GroupColor::BLUE,
    ),
    (
        "JOULUSANOJA, JOIDEN ENSIMMÄINEN KIRJAIN ON VAIHDETTU",
        ["MONTTU", "MORO", "KOULU", "LUKKI"],
        GroupColor::PURPLE,
    ),
];
