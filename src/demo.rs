use crate::{Element, QuestionBank};

const DEMO_ELEMENTS: &[(&str, &str, &str)] = &[
    ("氫", "Hydrogen", "H"),
    ("氦", "Helium", "He"),
    ("鋰", "Lithium", "Li"),
    ("鈹", "Beryllium", "Be"),
    ("硼", "Boron", "B"),
    ("碳", "Carbon", "C"),
    ("氮", "Nitrogen", "N"),
    ("氧", "Oxygen", "O"),
    ("氟", "Fluorine", "F"),
    ("氖", "Neon", "Ne"),
    ("鈉", "Sodium", "Na"),
    ("鎂", "Magnesium", "Mg"),
    ("鋁", "Aluminium", "Al"),
    ("矽", "Silicon", "Si"),
    ("磷", "Phosphorus", "P"),
    ("硫", "Sulfur", "S"),
    ("氯", "Chlorine", "Cl"),
    ("氬", "Argon", "Ar"),
    ("鉀", "Potassium", "K"),
    ("鈣", "Calcium", "Ca"),
];

/// The first twenty elements with their Traditional Chinese names.
pub fn demo_elements() -> Vec<Element> {
    DEMO_ELEMENTS
        .iter()
        .filter_map(|(name, english, symbol)| Element::new(name, english, symbol).ok())
        .collect()
}

pub fn demo_bank() -> QuestionBank {
    QuestionBank::new(demo_elements())
}
