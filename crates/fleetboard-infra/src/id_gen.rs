//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use fleetboard_domain::IdGenerator;

/// Live ID generator that produces random UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetboard_domain::DispatchBoard;

    #[test]
    fn test_imported_stops_get_distinct_ids() {
        let mut board = DispatchBoard::new(UuidIdGenerator::new());
        let stops = board.import_stops("0451;Supermercado Silva\n0451;Supermercado Silva\n8821;Padaria");
        assert_eq!(stops.len(), 3);
        assert_ne!(stops[0].id, stops[1].id);
        assert_ne!(stops[1].id, stops[2].id);
        assert!(stops.iter().all(|s| Uuid::parse_str(&s.id).is_ok()));
        assert_eq!(board.state().validate(), Ok(()));
    }
}
