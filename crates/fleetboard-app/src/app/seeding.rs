//! Apply a parsed seed to a board
//!
//! Everything goes through the board's public operations, so seeds obey
//! the same rules as interactive edits: a crew member listed on two fleets
//! is rejected exactly like a second assignment would be.

use tracing::info;

use fleetboard_domain::service::StopRow;
use fleetboard_domain::{ContainerId, DispatchBoard, IdGenerator, Slot};
use fleetboard_infra::seed_loader::BoardSeed;
use fleetboard_types::{Error, Result};

/// Register the seed's members, fleets and stops in that order.
///
/// Crew names resolve to the first member with that name; stop fleets
/// resolve through the board's fleet naming, so `"113"` finds `"Frota - 113"`.
pub fn apply_seed<G: IdGenerator>(board: &mut DispatchBoard<G>, seed: &BoardSeed) -> Result<()> {
    for member in &seed.members {
        let role = member.role().ok_or_else(|| {
            Error::Seed(format!(
                "Unknown role \"{}\" for member \"{}\"",
                member.role, member.name
            ))
        })?;
        board.add_member(&member.name, role)?;
    }

    for entry in &seed.fleets {
        let fleet = board.add_fleet(&entry.number, entry.route_details.as_deref())?;
        let crew = [
            (Slot::Driver, &entry.driver),
            (Slot::Helper, &entry.helper),
            (Slot::Operator, &entry.operator),
        ];
        for (slot, name) in crew {
            let Some(name) = name else { continue };
            let member_id = board
                .members()
                .find_by_name(name)
                .map(|m| m.id.clone())
                .ok_or_else(|| {
                    Error::Seed(format!(
                        "{}: unknown crew member \"{}\"",
                        fleet.number, name
                    ))
                })?;
            board.assign_slot(&fleet.id, slot, &member_id)?;
        }
    }

    for stop in &seed.stops {
        let target = match &stop.fleet {
            Some(number) => Some(resolve_fleet(board, number)?),
            None => None,
        };
        let imported = board.import_rows(vec![StopRow {
            client_code: stop.client_code.clone(),
            client_name: stop.client_name.clone(),
            zip_code: stop.zip_code.clone(),
        }]);
        if let (Some(fleet_id), Some(created)) = (target, imported.first()) {
            board.move_stop(&created.id, &ContainerId::Backlog, &ContainerId::fleet(fleet_id));
        }
    }

    info!(
        members = board.members().len(),
        fleets = board.fleets().len(),
        stops = board.state().total_stops(),
        "seed applied"
    );
    Ok(())
}

fn resolve_fleet<G: IdGenerator>(board: &DispatchBoard<G>, number: &str) -> Result<String> {
    let label = board.naming().format(number).unwrap_or_default();
    board
        .fleets()
        .find_by_number(&label)
        .map(|f| f.id.clone())
        .ok_or_else(|| Error::Seed(format!("Stop references unknown fleet \"{}\"", number)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::demo_seed;
    use fleetboard_domain::SequentialIds;
    use fleetboard_types::BoardError;

    fn board() -> DispatchBoard<SequentialIds> {
        DispatchBoard::new(SequentialIds::new("t"))
    }

    #[test]
    fn test_demo_seed_builds_demo_board() {
        let mut board = board();
        apply_seed(&mut board, &demo_seed().unwrap()).unwrap();

        assert_eq!(board.members().len(), 6);
        assert_eq!(board.backlog().len(), 2);

        let f113 = board.fleets().find_by_number("Frota - 113").unwrap();
        assert_eq!(f113.route_details.as_deref(), Some("Zona Sul - Rota prioritária"));
        assert_eq!(f113.stops.len(), 2);
        assert_eq!(f113.stops.as_slice()[0].client_code, "0451");
        let driver = board.members().get(f113.driver_id.as_deref().unwrap()).unwrap();
        assert_eq!(driver.name, "Jose de Arimateia");
        assert!(f113.operator_id.is_none());

        let f173 = board.fleets().find_by_number("frota - 173").unwrap();
        assert!(f173.helper_id.is_none());
        assert!(f173.operator_id.is_some());
        assert!(f173.stops.is_empty());
    }

    #[test]
    fn test_unknown_crew_name() {
        let seed = BoardSeed::load_from_str(
            "[[fleets]]\nnumber = \"9\"\ndriver = \"Ninguém\"\n",
        )
        .unwrap();
        let err = apply_seed(&mut board(), &seed).unwrap_err();
        assert!(matches!(err, Error::Seed(ref m) if m.contains("Ninguém")));
    }

    #[test]
    fn test_crew_on_two_fleets_rejected() {
        let seed = BoardSeed::load_from_str(
            r#"
[[members]]
name = "Ana"
role = "Motorista"

[[fleets]]
number = "1"
driver = "Ana"

[[fleets]]
number = "2"
driver = "Ana"
"#,
        )
        .unwrap();
        let err = apply_seed(&mut board(), &seed).unwrap_err();
        assert!(matches!(
            err,
            Error::Board(BoardError::MemberUnavailable { .. })
        ));
    }

    #[test]
    fn test_stop_for_unknown_fleet() {
        let seed = BoardSeed::load_from_str(
            "[[stops]]\nclient_code = \"1\"\nclient_name = \"A\"\nfleet = \"404\"\n",
        )
        .unwrap();
        assert!(matches!(apply_seed(&mut board(), &seed), Err(Error::Seed(_))));
    }

    #[test]
    fn test_duplicate_fleet_in_seed() {
        let seed = BoardSeed::load_from_str(
            "[[fleets]]\nnumber = \"5\"\n[[fleets]]\nnumber = \"Frota - 5\"\n",
        )
        .unwrap();
        let err = apply_seed(&mut board(), &seed).unwrap_err();
        assert!(matches!(err, Error::Board(BoardError::DuplicateFleetNumber(_))));
    }
}
