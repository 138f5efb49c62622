//! Slot legality rules. Pure functions over a single candidate slot; nothing
//! here touches storage. Sector-dependent bounds and letter pairings are
//! lookup tables keyed by `Sector` rather than conditional chains.

use crate::domain::model::{BoxKey, ErrorCode, FieldError, Sector, StoreKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Even,
    Odd,
}

impl Parity {
    fn of(n: u16) -> Self {
        if n % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    fn inverted(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

/// Highest legal box number for the sector.
fn box_number_cap(sector: Sector) -> u16 {
    match sector {
        Sector::Blue | Sector::Orange | Sector::Red | Sector::Green => 120,
        Sector::Yellow | Sector::White => 128,
    }
}

/// Parity required on street A. Street P requires the opposite.
fn street_a_parity(sector: Sector) -> Parity {
    match sector {
        Sector::Blue | Sector::Green | Sector::Yellow => Parity::Even,
        Sector::Orange | Sector::Red | Sector::White => Parity::Odd,
    }
}

/// Box-number range and letter pairing of the store area inside each sector.
/// Letters G..J always overlap within the range; the even/odd letters overlap
/// only for numbers of the matching parity.
struct StoreArea {
    min: u16,
    max: u16,
    even_letter: char,
    odd_letter: char,
}

fn store_area(sector: Sector) -> StoreArea {
    match sector {
        Sector::Blue | Sector::Green => StoreArea {
            min: 33,
            max: 56,
            even_letter: 'F',
            odd_letter: 'K',
        },
        Sector::Red | Sector::Orange => StoreArea {
            min: 33,
            max: 56,
            even_letter: 'K',
            odd_letter: 'F',
        },
        Sector::White => StoreArea {
            min: 73,
            max: 96,
            even_letter: 'K',
            odd_letter: 'F',
        },
        Sector::Yellow => StoreArea {
            min: 73,
            max: 96,
            even_letter: 'F',
            odd_letter: 'K',
        },
    }
}

/// Highest legal store number for the sector/block pair. `None` means only
/// the schema-wide cap of 19 applies.
fn store_number_cap(sector: Sector, block: u8) -> Option<u8> {
    match (sector, block) {
        (Sector::Blue | Sector::Orange | Sector::Red | Sector::Green, b) if b < 8 => Some(15),
        (Sector::Blue | Sector::Orange, 8) => Some(14),
        (Sector::Red | Sector::Green, 8) => Some(6),
        (Sector::Yellow | Sector::White, b) if b <= 4 => Some(18),
        _ => None,
    }
}

fn in_food_court(key: &BoxKey) -> bool {
    let n = key.box_number;
    match key.sector {
        Sector::Blue | Sector::Red | Sector::Orange | Sector::Green => match key.street_letter {
            'A'..='D' => n > 88,
            'E' => {
                let half = match key.sector {
                    Sector::Blue | Sector::Green => Parity::Odd,
                    _ => Parity::Even,
                };
                n > 89 && Parity::of(n) == half
            }
            _ => false,
        },
        Sector::Yellow | Sector::White => match key.street_letter {
            'A'..='D' => n > 8 && n < 41,
            'E' => {
                let half = match key.sector {
                    Sector::White => Parity::Even,
                    _ => Parity::Odd,
                };
                n > 9 && n < 41 && Parity::of(n) == half
            }
            _ => false,
        },
    }
}

fn in_store_area(key: &BoxKey) -> bool {
    let area = store_area(key.sector);
    if key.box_number < area.min || key.box_number > area.max {
        return false;
    }
    match key.street_letter {
        'G' | 'H' | 'I' | 'J' => true,
        l if l == area.even_letter => Parity::of(key.box_number) == Parity::Even,
        l if l == area.odd_letter => Parity::of(key.box_number) == Parity::Odd,
        _ => false,
    }
}

fn box_path(index: usize) -> String {
    format!("sellingLocations.boxes.{}", index)
}

/// All rule violations for one box slot. Shape failures (letter or number out
/// of schema range) suppress the layout rules for that slot, since parity and
/// overlap are meaningless off the grid.
pub fn validate_box(index: usize, key: &BoxKey) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !('A'..='P').contains(&key.street_letter) {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some("street_letter"),
            format!("street letter '{}' must be between A and P", key.street_letter),
        ));
    }
    if key.box_number < 1 {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some("box_number"),
            "box number must be at least 1",
        ));
    }
    let cap = box_number_cap(key.sector);
    if key.box_number > cap {
        errors.push(FieldError::new(
            ErrorCode::TooBig,
            Some("box_number"),
            format!("box number must be at most {} in the {} sector", cap, key.sector),
        ));
    }
    if !errors.is_empty() {
        return errors;
    }

    if key.street_letter == 'A' || key.street_letter == 'P' {
        let required = if key.street_letter == 'A' {
            street_a_parity(key.sector)
        } else {
            street_a_parity(key.sector).inverted()
        };
        if Parity::of(key.box_number) != required {
            errors.push(FieldError::new(
                ErrorCode::Invalid,
                Some("box_number"),
                format!(
                    "street {} in the {} sector only takes {} box numbers",
                    key.street_letter,
                    key.sector,
                    required.label()
                ),
            ));
        }
    }

    if in_food_court(key) {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some(box_path(index).as_str()),
            format!(
                "box ({}, {}, {}) falls inside the food court area",
                key.sector, key.street_letter, key.box_number
            ),
        ));
    }

    if in_store_area(key) {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some(box_path(index).as_str()),
            format!(
                "box ({}, {}, {}) falls inside the store area",
                key.sector, key.street_letter, key.box_number
            ),
        ));
    }

    errors
}

/// Every violation across the whole list. Box validation aggregates; it never
/// stops at the first bad slot.
pub fn validate_boxes(boxes: &[BoxKey]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (index, key) in boxes.iter().enumerate() {
        errors.extend(validate_box(index, key));
    }
    errors
}

pub fn validate_store(key: &StoreKey) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if key.block_number < 1 {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some("block_number"),
            "block number must be at least 1",
        ));
    }
    if key.block_number > 9 {
        errors.push(FieldError::new(
            ErrorCode::TooBig,
            Some("block_number"),
            "block number must be at most 9",
        ));
    }
    if key.store_number < 1 {
        errors.push(FieldError::new(
            ErrorCode::Invalid,
            Some("store_number"),
            "store number must be at least 1",
        ));
    }
    if key.store_number > 19 {
        errors.push(FieldError::new(
            ErrorCode::TooBig,
            Some("store_number"),
            "store number must be at most 19",
        ));
    }
    if !errors.is_empty() {
        return errors;
    }

    if let Some(cap) = store_number_cap(key.sector, key.block_number) {
        if key.store_number > cap {
            errors.push(FieldError::new(
                ErrorCode::TooBig,
                Some("store_number"),
                format!(
                    "store number must be at most {} for block {} in the {} sector",
                    cap, key.block_number, key.sector
                ),
            ));
        }
    }

    errors
}

/// Store validation returns as soon as any error has accumulated: the first
/// failing store ends the scan for the whole list.
pub fn validate_stores(stores: &[StoreKey]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for key in stores {
        errors.extend(validate_store(key));
        if !errors.is_empty() {
            return errors;
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SECTORS: [Sector; 6] = [
        Sector::Blue,
        Sector::Orange,
        Sector::Red,
        Sector::Green,
        Sector::Yellow,
        Sector::White,
    ];

    fn boxkey(sector: Sector, street_letter: char, box_number: u16) -> BoxKey {
        BoxKey {
            sector,
            street_letter,
            box_number,
        }
    }

    fn storekey(sector: Sector, block_number: u8, store_number: u8) -> StoreKey {
        StoreKey {
            sector,
            block_number,
            store_number,
        }
    }

    #[test]
    fn test_wrong_parity_yields_exactly_one_invalid_on_box_number() {
        for sector in ALL_SECTORS {
            for letter in ['A', 'P'] {
                let required = if letter == 'A' {
                    street_a_parity(sector)
                } else {
                    street_a_parity(sector).inverted()
                };
                // Pick a number of the wrong parity, outside every overlap zone.
                let wrong = match required {
                    Parity::Even => 61,
                    Parity::Odd => 62,
                };
                let errors = validate_box(0, &boxkey(sector, letter, wrong));
                assert_eq!(errors.len(), 1, "{} {} {}", sector, letter, wrong);
                assert_eq!(errors[0].code, ErrorCode::Invalid);
                assert_eq!(errors[0].field.as_deref(), Some("box_number"));
            }
        }
    }

    #[test]
    fn test_right_parity_is_accepted() {
        for sector in ALL_SECTORS {
            for letter in ['A', 'P'] {
                let required = if letter == 'A' {
                    street_a_parity(sector)
                } else {
                    street_a_parity(sector).inverted()
                };
                let right = match required {
                    Parity::Even => 62,
                    Parity::Odd => 61,
                };
                assert!(
                    validate_box(0, &boxkey(sector, letter, right)).is_empty(),
                    "{} {} {}",
                    sector,
                    letter,
                    right
                );
            }
        }
    }

    #[test]
    fn test_street_p_inverts_street_a_parity() {
        // Blue street A takes even numbers, so blue street P takes odd.
        assert!(validate_box(0, &boxkey(Sector::Blue, 'A', 62)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Blue, 'A', 61)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Blue, 'P', 61)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Blue, 'P', 62)).is_empty());
    }

    #[test]
    fn test_food_court_primary_sectors() {
        // Letters A-D, numbers above 88.
        let errors = validate_box(0, &boxkey(Sector::Blue, 'B', 110));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::Invalid);
        assert!(errors[0].message.contains("food court"));

        assert!(validate_box(0, &boxkey(Sector::Blue, 'B', 88)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Red, 'D', 89)).is_empty());
    }

    #[test]
    fn test_food_court_street_e_parity_half() {
        // Blue/green own the odd half above 89, orange/red the even half.
        assert!(!validate_box(0, &boxkey(Sector::Blue, 'E', 91)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Blue, 'E', 90)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Orange, 'E', 90)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Orange, 'E', 91)).is_empty());
    }

    #[test]
    fn test_food_court_yellow_white_bounds_are_literal() {
        // Letters A-D: inside iff number > 8 and < 41.
        assert!(validate_box(0, &boxkey(Sector::Yellow, 'B', 8)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Yellow, 'B', 9)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Yellow, 'B', 40)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Yellow, 'B', 41)).is_empty());

        // Letter E: number > 9 and < 41, white takes the even half, yellow the odd.
        assert!(!validate_box(0, &boxkey(Sector::White, 'E', 10)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::White, 'E', 11)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Yellow, 'E', 11)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Yellow, 'E', 10)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::White, 'E', 42)).is_empty());
    }

    #[test]
    fn test_store_area_middle_letters_always_overlap_in_range() {
        for letter in ['G', 'H', 'I', 'J'] {
            assert!(!validate_box(0, &boxkey(Sector::Blue, letter, 40)).is_empty());
            assert!(validate_box(0, &boxkey(Sector::Blue, letter, 32)).is_empty());
            assert!(validate_box(0, &boxkey(Sector::Blue, letter, 57)).is_empty());
        }
    }

    #[test]
    fn test_store_area_paired_letters_overlap_by_parity() {
        // Blue: F is the even street, K the odd one, range 33..=56.
        assert!(!validate_box(0, &boxkey(Sector::Blue, 'F', 34)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Blue, 'F', 33)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Blue, 'K', 33)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Blue, 'K', 34)).is_empty());

        // Red inverts the pairing.
        assert!(!validate_box(0, &boxkey(Sector::Red, 'K', 34)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Red, 'K', 33)).is_empty());

        // White uses 73..=96 with K even, F odd; yellow the opposite.
        assert!(!validate_box(0, &boxkey(Sector::White, 'K', 74)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::White, 'F', 73)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Yellow, 'F', 74)).is_empty());
        assert!(validate_box(0, &boxkey(Sector::Yellow, 'F', 73)).is_empty());
    }

    #[test]
    fn test_box_number_caps_by_sector() {
        let errors = validate_box(0, &boxkey(Sector::Blue, 'C', 121));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::TooBig);

        assert!(validate_box(0, &boxkey(Sector::Yellow, 'C', 121)).is_empty());
        assert!(!validate_box(0, &boxkey(Sector::Yellow, 'C', 129)).is_empty());
    }

    #[test]
    fn test_bad_street_letter() {
        let errors = validate_box(0, &boxkey(Sector::Blue, 'Q', 10));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::Invalid);
        assert_eq!(errors[0].field.as_deref(), Some("street_letter"));
    }

    #[test]
    fn test_box_list_aggregates_all_errors() {
        let boxes = vec![
            boxkey(Sector::Blue, 'A', 61),  // wrong parity
            boxkey(Sector::Blue, 'B', 110), // food court
            boxkey(Sector::Blue, 'G', 40),  // store area
        ];
        assert_eq!(validate_boxes(&boxes).len(), 3);
    }

    #[test]
    fn test_store_number_caps() {
        // (blue, block 8, store 15) is one past the cap.
        let errors = validate_store(&storekey(Sector::Blue, 8, 15));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::TooBig);
        assert_eq!(errors[0].field.as_deref(), Some("store_number"));
        assert!(errors[0].message.contains("14 for block 8"));

        assert!(validate_store(&storekey(Sector::Blue, 8, 14)).is_empty());
        assert!(!validate_store(&storekey(Sector::Red, 8, 7)).is_empty());
        assert!(validate_store(&storekey(Sector::Red, 8, 6)).is_empty());
        assert!(!validate_store(&storekey(Sector::Green, 7, 16)).is_empty());
        assert!(validate_store(&storekey(Sector::Green, 7, 15)).is_empty());
        assert!(!validate_store(&storekey(Sector::White, 4, 19)).is_empty());
        assert!(validate_store(&storekey(Sector::White, 4, 18)).is_empty());
        // Yellow/white blocks above 4 only carry the schema cap.
        assert!(validate_store(&storekey(Sector::Yellow, 5, 19)).is_empty());
    }

    #[test]
    fn test_store_schema_bounds() {
        assert!(!validate_store(&storekey(Sector::Blue, 0, 5)).is_empty());
        assert!(!validate_store(&storekey(Sector::Blue, 10, 5)).is_empty());
        assert!(!validate_store(&storekey(Sector::Blue, 2, 0)).is_empty());
        assert!(!validate_store(&storekey(Sector::Blue, 2, 20)).is_empty());
    }

    #[test]
    fn test_store_list_stops_at_first_failing_slot() {
        let stores = vec![
            storekey(Sector::Blue, 8, 15),
            storekey(Sector::Red, 8, 19),
        ];
        // Both slots are illegal, but only the first one is reported.
        let errors = validate_stores(&stores);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("14 for block 8"));
    }
}
