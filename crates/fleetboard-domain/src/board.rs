//! Dispatch board: the assignment engine
//!
//! `DispatchBoard` owns the roster, the fleets and the backlog and is the
//! only way to mutate them. Every operation takes `&mut self` and finishes
//! before returning, so no caller can observe a half-applied change: a stop
//! is always in exactly one container, and removals cascade in the same
//! call that removes.
//!
//! Rejections (`BoardError`) leave the state untouched. Stale references
//! (a stop or container that vanished between drag start and drop) and
//! removals of unknown ids are silent no-ops.

use tracing::{debug, info};

use fleetboard_types::BoardError;

use crate::model::{
    BoardState, ContainerId, DeliveryStop, Fleet, FleetNaming, Member, MemberRole, Slot, StopList,
};
use crate::ports::IdGenerator;
use crate::registry::{FleetRegistry, Roster};
use crate::service::eligibility::{member_status, slot_candidates, MemberStatus, SlotCandidate};
use crate::service::stop_import::{parse_stop_rows, StopRow};

/// What a `move_stop` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Source and target are the same container
    SameContainer,
    /// Source container missing or not holding the stop
    StaleSource,
    /// Target container missing
    StaleTarget,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        self == MoveOutcome::Moved
    }
}

pub struct DispatchBoard<G: IdGenerator> {
    state: BoardState,
    ids: G,
    naming: FleetNaming,
}

impl<G: IdGenerator> DispatchBoard<G> {
    /// Empty board
    pub fn new(ids: G) -> Self {
        Self {
            state: BoardState::default(),
            ids,
            naming: FleetNaming::default(),
        }
    }

    /// Board over an existing state (e.g. a loaded snapshot).
    /// The state must pass [`BoardState::validate`].
    pub fn with_state(state: BoardState, ids: G) -> Result<Self, BoardError> {
        state.validate()?;
        let mut board = Self::new(ids);
        board.state = state;
        Ok(board)
    }

    pub fn with_naming(mut self, naming: FleetNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn naming(&self) -> &FleetNaming {
        &self.naming
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }

    pub fn members(&self) -> &Roster {
        &self.state.members
    }

    pub fn fleets(&self) -> &FleetRegistry {
        &self.state.fleets
    }

    pub fn backlog(&self) -> &StopList {
        &self.state.backlog
    }

    pub fn fleets_for_display(&self) -> Vec<&Fleet> {
        self.state.fleets.sorted_for_display()
    }

    // ----- roster -----

    /// Register a member. Duplicate names are allowed.
    pub fn add_member(&mut self, name: &str, role: MemberRole) -> Result<Member, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::Validation("Member name"));
        }
        let member = Member {
            id: self.ids.generate_id(),
            name: name.to_string(),
            role,
        };
        self.state.members.push(member.clone());
        info!(member_id = %member.id, name = %member.name, role = %member.role, "member added");
        Ok(member)
    }

    /// Remove a member and clear every slot referencing it.
    /// Unknown ids are ignored.
    pub fn remove_member(&mut self, id: &str) -> Option<Member> {
        let Some(removed) = self.state.members.remove(id) else {
            debug!(member_id = id, "remove_member: unknown id, ignored");
            return None;
        };
        let cleared = self.state.fleets.release_member(id);
        info!(member_id = id, slots_cleared = cleared, "member removed");
        Some(removed)
    }

    // ----- backlog -----

    /// Parse pasted rows and append the accepted stops to the backlog
    pub fn import_stops(&mut self, raw_text: &str) -> Vec<DeliveryStop> {
        self.import_rows(parse_stop_rows(raw_text))
    }

    /// Register already-parsed rows into the backlog. Rows with neither a
    /// code nor a name are skipped; fields are trimmed.
    pub fn import_rows(&mut self, rows: Vec<StopRow>) -> Vec<DeliveryStop> {
        let mut imported = Vec::with_capacity(rows.len());
        for row in rows {
            let row = StopRow {
                client_code: row.client_code.trim().to_string(),
                client_name: row.client_name.trim().to_string(),
                zip_code: row.zip_code.trim().to_string(),
            };
            if row.client_code.is_empty() && row.client_name.is_empty() {
                continue;
            }
            imported.push(row.into_stop(self.ids.generate_id()));
        }
        self.state.backlog.extend(imported.iter().cloned());
        info!(count = imported.len(), "stops imported into backlog");
        imported
    }

    // ----- stops -----

    /// Move a stop from one container to the end of another.
    ///
    /// Both containers are checked before anything is touched, so a stale
    /// target can never swallow the stop.
    pub fn move_stop(&mut self, stop_id: &str, source: &ContainerId, target: &ContainerId) -> MoveOutcome {
        if source == target {
            return MoveOutcome::SameContainer;
        }
        if !self.state.container_exists(target) {
            debug!(stop_id, target = %target, "move_stop: target no longer exists");
            return MoveOutcome::StaleTarget;
        }
        let stop = match self.state.container_mut(source).and_then(|list| list.take(stop_id)) {
            Some(stop) => stop,
            None => {
                debug!(stop_id, source = %source, "move_stop: stop not in source");
                return MoveOutcome::StaleSource;
            }
        };
        match self.state.container_mut(target) {
            Some(list) => list.push(stop),
            // checked above; restore rather than drop
            None => self.state.backlog.push(stop),
        }
        debug!(stop_id, source = %source, target = %target, "stop moved");
        MoveOutcome::Moved
    }

    /// Send a stop from a fleet back to the backlog
    pub fn return_stop(&mut self, stop_id: &str, fleet_id: &str) -> MoveOutcome {
        self.move_stop(stop_id, &ContainerId::fleet(fleet_id), &ContainerId::Backlog)
    }

    // ----- fleets -----

    /// Create a fleet with a unique label.
    ///
    /// Labels not starting with the naming prefix are formatted as
    /// `"<prefix> - <number>"`. Uniqueness ignores case.
    pub fn add_fleet(&mut self, number: &str, route_details: Option<&str>) -> Result<Fleet, BoardError> {
        let formatted = self
            .naming
            .format(number)
            .ok_or(BoardError::Validation("Fleet number"))?;
        if self.state.fleets.find_by_number(&formatted).is_some() {
            return Err(BoardError::DuplicateFleetNumber(formatted));
        }
        let mut fleet = Fleet::new(self.ids.generate_id(), formatted);
        fleet.route_details = normalize_details(route_details);
        self.state.fleets.push(fleet.clone());
        info!(fleet_id = %fleet.id, number = %fleet.number, "fleet added");
        Ok(fleet)
    }

    /// Remove a fleet, appending its stops to the backlog in order.
    /// The returned record has an empty stop list. Unknown ids are ignored.
    pub fn remove_fleet(&mut self, id: &str) -> Option<Fleet> {
        let Some(mut fleet) = self.state.fleets.remove(id) else {
            debug!(fleet_id = id, "remove_fleet: unknown id, ignored");
            return None;
        };
        let returned = fleet.stops.drain_all();
        let count = returned.len();
        self.state.backlog.extend(returned);
        info!(fleet_id = id, number = %fleet.number, stops_returned = count, "fleet removed");
        Some(fleet)
    }

    /// Replace a stored fleet wholesale.
    ///
    /// No eligibility checks run here; callers editing slots should prefer
    /// [`DispatchBoard::assign_slot`]. Returns false for unknown ids.
    pub fn update_fleet(&mut self, fleet: Fleet) -> bool {
        let id = fleet.id.clone();
        let replaced = self.state.fleets.replace(fleet);
        if !replaced {
            debug!(fleet_id = %id, "update_fleet: unknown id, ignored");
        }
        replaced
    }

    /// Edit route notes; blank clears them
    pub fn set_route_details(&mut self, fleet_id: &str, details: &str) -> bool {
        match self.state.fleets.get_mut(fleet_id) {
            Some(fleet) => {
                fleet.route_details = normalize_details(Some(details));
                true
            }
            None => false,
        }
    }

    /// Put a member into a slot, enforcing role category and the
    /// one-member-one-slot rule.
    pub fn assign_slot(&mut self, fleet_id: &str, slot: Slot, member_id: &str) -> Result<(), BoardError> {
        let fleet = self
            .state
            .fleets
            .get(fleet_id)
            .ok_or_else(|| BoardError::UnknownFleet(fleet_id.to_string()))?;
        let member = self
            .state
            .members
            .get(member_id)
            .ok_or_else(|| BoardError::UnknownMember(member_id.to_string()))?;

        if member.category() != slot.category() {
            return Err(BoardError::RoleMismatch {
                member: member.name.clone(),
                role: member.role.label().to_string(),
                slot: slot.to_string(),
            });
        }
        let status = member_status(&self.state.fleets, member, slot, fleet_id, fleet.slot(slot));
        if !status.available {
            return Err(BoardError::MemberUnavailable {
                member: member.name.clone(),
                reason: status.reason,
            });
        }

        if let Some(fleet) = self.state.fleets.get_mut(fleet_id) {
            fleet.set_slot(slot, Some(member_id.to_string()));
        }
        info!(fleet_id, %slot, member_id, "slot assigned");
        Ok(())
    }

    /// Empty a slot, returning the previous occupant
    pub fn clear_slot(&mut self, fleet_id: &str, slot: Slot) -> Option<String> {
        let fleet = self.state.fleets.get_mut(fleet_id)?;
        let previous = fleet.slot(slot).map(str::to_string);
        fleet.set_slot(slot, None);
        if previous.is_some() {
            info!(fleet_id, %slot, "slot cleared");
        }
        previous
    }

    /// Create a member and seat it in an empty slot in one step.
    ///
    /// `role` defaults to the slot category's default role. On any error
    /// nothing is created.
    pub fn add_member_to_slot(
        &mut self,
        fleet_id: &str,
        slot: Slot,
        name: &str,
        role: Option<MemberRole>,
    ) -> Result<Member, BoardError> {
        let role = role.unwrap_or_else(|| slot.category().default_role());
        let fleet = self
            .state
            .fleets
            .get(fleet_id)
            .ok_or_else(|| BoardError::UnknownFleet(fleet_id.to_string()))?;
        if fleet.slot(slot).is_some() {
            return Err(BoardError::SlotOccupied {
                fleet: fleet.number.clone(),
                slot: slot.to_string(),
            });
        }
        if role.category() != slot.category() {
            return Err(BoardError::RoleMismatch {
                member: name.trim().to_string(),
                role: role.label().to_string(),
                slot: slot.to_string(),
            });
        }
        let member = self.add_member(name, role)?;
        if let Some(fleet) = self.state.fleets.get_mut(fleet_id) {
            fleet.set_slot(slot, Some(member.id.clone()));
        }
        info!(fleet_id, %slot, member_id = %member.id, "member created into slot");
        Ok(member)
    }

    // ----- queries -----

    /// Eligibility of a registered member for a slot of a fleet
    pub fn member_status(&self, member_id: &str, fleet_id: &str, slot: Slot) -> Option<MemberStatus> {
        let member = self.state.members.get(member_id)?;
        let current = self.state.fleets.get(fleet_id).and_then(|f| f.slot(slot));
        Some(member_status(&self.state.fleets, member, slot, fleet_id, current))
    }

    pub fn slot_candidates(&self, fleet_id: &str, slot: Slot) -> Vec<SlotCandidate<'_>> {
        slot_candidates(&self.state, fleet_id, slot)
    }
}

fn normalize_details(details: Option<&str>) -> Option<String> {
    details
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SequentialIds;

    fn board() -> DispatchBoard<SequentialIds> {
        DispatchBoard::new(SequentialIds::new("t"))
    }

    #[test]
    fn test_add_member_trims_and_rejects_blank() {
        let mut board = board();
        let m = board.add_member("  Elison Souza ", MemberRole::AuxiliarDistribuicao).unwrap();
        assert_eq!(m.name, "Elison Souza");
        assert_eq!(m.id, "t-1");
        assert_eq!(
            board.add_member("   ", MemberRole::Motorista),
            Err(BoardError::Validation("Member name"))
        );
        assert_eq!(board.members().len(), 1);
    }

    #[test]
    fn test_duplicate_member_names_allowed() {
        let mut board = board();
        board.add_member("José", MemberRole::Motorista).unwrap();
        board.add_member("José", MemberRole::Motorista).unwrap();
        assert_eq!(board.members().len(), 2);
    }

    #[test]
    fn test_remove_member_unknown_is_noop() {
        let mut board = board();
        board.add_member("A", MemberRole::Motorista).unwrap();
        let before = board.state().clone();
        assert!(board.remove_member("zz").is_none());
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_add_fleet_formats_and_rejects_duplicates() {
        let mut board = board();
        let fleet = board.add_fleet("113", None).unwrap();
        assert_eq!(fleet.number, "Frota - 113");
        assert!(fleet.stops.is_empty());
        assert!(!fleet.has_crew());

        let before = board.state().clone();
        assert_eq!(
            board.add_fleet("Frota - 113", None),
            Err(BoardError::DuplicateFleetNumber("Frota - 113".to_string()))
        );
        assert_eq!(
            board.add_fleet("FROTA - 113", Some("x")),
            Err(BoardError::DuplicateFleetNumber("FROTA - 113".to_string()))
        );
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_add_fleet_rejects_blank() {
        let mut board = board();
        assert_eq!(board.add_fleet("  ", None), Err(BoardError::Validation("Fleet number")));
        assert!(board.fleets().is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let mut board = board().with_naming(FleetNaming::with_prefix("Truck"));
        assert_eq!(board.add_fleet("7", None).unwrap().number, "Truck - 7");
        assert_eq!(board.add_fleet("truck 8", None).unwrap().number, "truck 8");
    }

    #[test]
    fn test_route_details() {
        let mut board = board();
        let fleet = board.add_fleet("1", Some("  Zona Sul ")).unwrap();
        assert_eq!(fleet.route_details.as_deref(), Some("Zona Sul"));
        assert!(board.set_route_details(&fleet.id, "Carga Granel"));
        assert_eq!(
            board.fleets().get(&fleet.id).unwrap().route_details.as_deref(),
            Some("Carga Granel")
        );
        assert!(board.set_route_details(&fleet.id, "  "));
        assert!(board.fleets().get(&fleet.id).unwrap().route_details.is_none());
        assert!(!board.set_route_details("ghost", "x"));
    }

    #[test]
    fn test_update_fleet_replaces_only_matching() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let b = board.add_fleet("2", None).unwrap();
        let mut edited = a.clone();
        edited.route_details = Some("nova rota".to_string());
        assert!(board.update_fleet(edited.clone()));
        assert_eq!(board.fleets().get(&a.id), Some(&edited));
        assert_eq!(board.fleets().get(&b.id), Some(&b));
        assert!(!board.update_fleet(Fleet::new("ghost", "Frota - 9")));
    }

    #[test]
    fn test_assign_slot_checks_category() {
        let mut board = board();
        let fleet = board.add_fleet("1", None).unwrap();
        let helper = board.add_member("Maria", MemberRole::AuxiliarDistribuicao).unwrap();
        let err = board.assign_slot(&fleet.id, Slot::Driver, &helper.id).unwrap_err();
        assert!(matches!(err, BoardError::RoleMismatch { .. }));
        assert!(board.fleets().get(&fleet.id).unwrap().driver_id.is_none());
    }

    #[test]
    fn test_assign_slot_unknown_references() {
        let mut board = board();
        let fleet = board.add_fleet("1", None).unwrap();
        let m = board.add_member("Carlos", MemberRole::MotoristaI).unwrap();
        assert_eq!(
            board.assign_slot("ghost", Slot::Driver, &m.id),
            Err(BoardError::UnknownFleet("ghost".to_string()))
        );
        assert_eq!(
            board.assign_slot(&fleet.id, Slot::Driver, "ghost"),
            Err(BoardError::UnknownMember("ghost".to_string()))
        );
    }

    #[test]
    fn test_assign_slot_rejects_second_fleet() {
        let mut board = board();
        let a = board.add_fleet("113", None).unwrap();
        let b = board.add_fleet("173", None).unwrap();
        let m = board.add_member("Jose", MemberRole::Motorista).unwrap();
        board.assign_slot(&a.id, Slot::Driver, &m.id).unwrap();
        // re-selecting the current occupant is fine
        board.assign_slot(&a.id, Slot::Driver, &m.id).unwrap();

        let before = board.state().clone();
        let err = board.assign_slot(&b.id, Slot::Driver, &m.id).unwrap_err();
        assert_eq!(
            err,
            BoardError::MemberUnavailable {
                member: "Jose".to_string(),
                reason: "(Em Frota - 113)".to_string(),
            }
        );
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_clear_slot() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let m = board.add_member("Jose", MemberRole::Motorista).unwrap();
        board.assign_slot(&a.id, Slot::Driver, &m.id).unwrap();
        assert_eq!(board.clear_slot(&a.id, Slot::Driver), Some(m.id.clone()));
        assert_eq!(board.clear_slot(&a.id, Slot::Driver), None);
        assert_eq!(board.clear_slot("ghost", Slot::Driver), None);
    }

    #[test]
    fn test_add_member_to_slot_defaults_role() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let m = board.add_member_to_slot(&a.id, Slot::Operator, "José Estancely", None).unwrap();
        assert_eq!(m.role, MemberRole::OperadorGranel);
        assert_eq!(board.fleets().get(&a.id).unwrap().operator_id.as_deref(), Some(m.id.as_str()));
    }

    #[test]
    fn test_add_member_to_slot_is_all_or_nothing() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let before = board.state().clone();

        let err = board
            .add_member_to_slot(&a.id, Slot::Driver, "Maria", Some(MemberRole::AuxiliarDistribuicao))
            .unwrap_err();
        assert!(matches!(err, BoardError::RoleMismatch { .. }));
        assert!(board.add_member_to_slot("ghost", Slot::Driver, "Maria", None).is_err());
        assert!(board.add_member_to_slot(&a.id, Slot::Driver, " ", None).is_err());
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_add_member_to_slot_rejects_occupied_slot() {
        let mut board = board();
        let a = board.add_fleet("113", None).unwrap();
        let jose = board.add_member("Jose", MemberRole::Motorista).unwrap();
        board.assign_slot(&a.id, Slot::Driver, &jose.id).unwrap();
        let before = board.state().clone();

        let err = board.add_member_to_slot(&a.id, Slot::Driver, "Carlos", None).unwrap_err();
        assert_eq!(
            err,
            BoardError::SlotOccupied {
                fleet: "Frota - 113".to_string(),
                slot: "driver".to_string(),
            }
        );
        assert_eq!(board.state(), &before);
        // other slots of the same fleet are still open
        assert!(board.add_member_to_slot(&a.id, Slot::Helper, "Carlos", None).is_ok());
    }

    #[test]
    fn test_with_state_rejects_inconsistent_state() {
        let mut fleet = Fleet::new("f1", "Frota - 1");
        fleet.stops.push(DeliveryStop {
            id: "s1".to_string(),
            client_code: "1".to_string(),
            client_name: "A".to_string(),
            zip_code: String::new(),
        });
        let mut state = BoardState {
            fleets: crate::registry::FleetRegistry::from(vec![fleet.clone()]),
            ..BoardState::default()
        };
        let board = DispatchBoard::with_state(state.clone(), SequentialIds::new("t")).unwrap();
        assert_eq!(board.state().total_stops(), 1);

        state.backlog.push(fleet.stops.as_slice()[0].clone());
        assert!(matches!(
            DispatchBoard::with_state(state, SequentialIds::new("t")),
            Err(BoardError::InvalidState(_))
        ));
    }

    #[test]
    fn test_move_stop_to_stale_target_keeps_stop() {
        let mut board = board();
        let stops = board.import_stops("1;A");
        let outcome = board.move_stop(&stops[0].id, &ContainerId::Backlog, &ContainerId::fleet("ghost"));
        assert_eq!(outcome, MoveOutcome::StaleTarget);
        assert_eq!(board.backlog().len(), 1);
    }

    #[test]
    fn test_move_stop_from_stale_source() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let before = board.state().clone();
        assert_eq!(
            board.move_stop("nope", &ContainerId::Backlog, &ContainerId::fleet(&a.id)),
            MoveOutcome::StaleSource
        );
        assert_eq!(
            board.move_stop("nope", &ContainerId::fleet("ghost"), &ContainerId::Backlog),
            MoveOutcome::StaleSource
        );
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_return_stop() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let stops = board.import_stops("1;A\n2;B");
        let to_fleet = ContainerId::fleet(&a.id);
        board.move_stop(&stops[0].id, &ContainerId::Backlog, &to_fleet);
        assert!(board.return_stop(&stops[0].id, &a.id).moved());
        assert_eq!(board.backlog().ids(), vec![stops[1].id.clone(), stops[0].id.clone()]);
    }

    #[test]
    fn test_member_status_query() {
        let mut board = board();
        let a = board.add_fleet("1", None).unwrap();
        let b = board.add_fleet("2", None).unwrap();
        let m = board.add_member("Jose", MemberRole::Motorista).unwrap();
        board.assign_slot(&a.id, Slot::Driver, &m.id).unwrap();
        assert!(!board.member_status(&m.id, &b.id, Slot::Driver).unwrap().available);
        assert!(board.member_status(&m.id, &a.id, Slot::Driver).unwrap().available);
        assert!(board.member_status("ghost", &a.id, Slot::Driver).is_none());
        assert_eq!(board.slot_candidates(&b.id, Slot::Driver).len(), 1);
    }
}
