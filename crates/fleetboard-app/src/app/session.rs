//! Scripted board sessions
//!
//! A session script is a plain text file with one command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! member add "Ana Lima" Motorista
//! fleet add 210 "Zona Norte"
//! assign 210 driver "Ana Lima"
//! import stops.txt
//! move 0451 unassigned 210
//! ```
//!
//! Fleets may be referenced by id or by number, members by id or name,
//! and stops by id or client code (looked up in the source container).
//! `unassigned` (or `backlog`) names the backlog.
//!
//! Board rejections and malformed lines abort the script. References that
//! no longer resolve are logged and skipped, the same way a drop onto a
//! vanished column does nothing.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use fleetboard_domain::{
    ContainerId, DispatchBoard, IdGenerator, MemberRole, MoveOutcome, SequentialIds, Slot,
};
use fleetboard_infra::text_source::read_rows_file;
use fleetboard_infra::UuidIdGenerator;
use fleetboard_types::{Error, Result};

use crate::config::Config;

/// Board whose id generator is picked at runtime
pub type SessionBoard = DispatchBoard<Box<dyn IdGenerator>>;

/// Counters for a finished script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub applied: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Applied,
    Skipped(String),
}

type StepResult = std::result::Result<Step, String>;

pub struct Session {
    board: SessionBoard,
    base_dir: PathBuf,
}

impl Session {
    pub fn new(board: SessionBoard) -> Self {
        Self {
            board,
            base_dir: PathBuf::from("."),
        }
    }

    /// Empty board using the configured naming and id scheme
    pub fn from_config(config: &Config, sequential_ids: bool) -> Self {
        let ids: Box<dyn IdGenerator> = if sequential_ids || config.sequential_ids {
            Box::new(SequentialIds::default())
        } else {
            Box::new(UuidIdGenerator::new())
        };
        Self::new(DispatchBoard::new(ids).with_naming(config.naming()))
    }

    /// Directory that relative `import` paths resolve against
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn board(&self) -> &SessionBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut SessionBoard {
        &mut self.board
    }

    pub fn into_board(self) -> SessionBoard {
        self.board
    }

    /// Run a script file; its directory becomes the base for imports
    pub fn run_script_file(&mut self, path: &Path) -> Result<SessionSummary> {
        let script = read_rows_file(path)?;
        if let Some(parent) = path.parent() {
            self.base_dir = parent.to_path_buf();
        }
        self.run_script(&script)
    }

    /// Run every line, stopping at the first failing one
    pub fn run_script(&mut self, script: &str) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        for (idx, raw) in script.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self.execute(trimmed) {
                Ok(Step::Applied) => {
                    debug!(line, command = trimmed, "applied");
                    summary.applied += 1;
                }
                Ok(Step::Skipped(reason)) => {
                    warn!(line, command = trimmed, %reason, "skipped");
                    summary.skipped += 1;
                }
                Err(message) => return Err(Error::Script { line, message }),
            }
        }
        info!(applied = summary.applied, skipped = summary.skipped, "script finished");
        Ok(summary)
    }

    fn execute(&mut self, line: &str) -> StepResult {
        let words = shell_words::split(line).map_err(|e| e.to_string())?;
        let args: Vec<&str> = words.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["member", "add", name, role] => {
                let role = parse_role(role)?;
                self.board.add_member(name, role).map_err(|e| e.to_string())?;
                Ok(Step::Applied)
            }
            ["member", "rm", member] => match self.resolve_member(member) {
                Some(id) => {
                    self.board.remove_member(&id);
                    Ok(Step::Applied)
                }
                None => Ok(Step::Skipped(format!("no member \"{}\"", member))),
            },
            ["fleet", "add", number, route @ ..] => {
                let route = route.join(" ");
                let details = (!route.is_empty()).then_some(route.as_str());
                self.board.add_fleet(number, details).map_err(|e| e.to_string())?;
                Ok(Step::Applied)
            }
            ["fleet", "rm", fleet] => match self.resolve_fleet(fleet) {
                Some(id) => {
                    self.board.remove_fleet(&id);
                    Ok(Step::Applied)
                }
                None => Ok(Step::Skipped(format!("no fleet \"{}\"", fleet))),
            },
            ["fleet", "route", fleet, details @ ..] => match self.resolve_fleet(fleet) {
                Some(id) => {
                    self.board.set_route_details(&id, &details.join(" "));
                    Ok(Step::Applied)
                }
                None => Ok(Step::Skipped(format!("no fleet \"{}\"", fleet))),
            },
            ["assign", fleet, slot, member] => {
                let slot = parse_slot(slot)?;
                let fleet_id = self.resolve_fleet(fleet).unwrap_or_else(|| fleet.to_string());
                let member_id = self.resolve_member(member).unwrap_or_else(|| member.to_string());
                self.board
                    .assign_slot(&fleet_id, slot, &member_id)
                    .map_err(|e| e.to_string())?;
                Ok(Step::Applied)
            }
            ["unassign", fleet, slot] => {
                let slot = parse_slot(slot)?;
                match self.resolve_fleet(fleet) {
                    Some(id) => {
                        self.board.clear_slot(&id, slot);
                        Ok(Step::Applied)
                    }
                    None => Ok(Step::Skipped(format!("no fleet \"{}\"", fleet))),
                }
            }
            ["quick-add", fleet, slot, name, rest @ ..] if rest.len() <= 1 => {
                let slot = parse_slot(slot)?;
                let role = rest.first().map(|r| parse_role(r)).transpose()?;
                let fleet_id = self.resolve_fleet(fleet).unwrap_or_else(|| fleet.to_string());
                self.board
                    .add_member_to_slot(&fleet_id, slot, name, role)
                    .map_err(|e| e.to_string())?;
                Ok(Step::Applied)
            }
            ["move", stop, from, to] => {
                let (Some(source), Some(target)) = (self.resolve_container(from), self.resolve_container(to))
                else {
                    return Ok(Step::Skipped(format!("no container \"{}\" or \"{}\"", from, to)));
                };
                Ok(self.move_resolved(stop, &source, &target))
            }
            ["return", stop, fleet] => {
                let Some(source) = self.resolve_fleet(fleet).map(ContainerId::fleet) else {
                    return Ok(Step::Skipped(format!("no fleet \"{}\"", fleet)));
                };
                Ok(self.move_resolved(stop, &source, &ContainerId::Backlog))
            }
            ["import", file] => {
                let path = self.base_dir.join(file);
                let text = read_rows_file(&path).map_err(|e| e.to_string())?;
                let imported = self.board.import_stops(&text);
                info!(file = %path.display(), count = imported.len(), "stops imported");
                Ok(Step::Applied)
            }
            ["paste", rows @ ..] if !rows.is_empty() => {
                self.board.import_stops(&rows.join("\n"));
                Ok(Step::Applied)
            }
            [command, ..] => Err(format!("unknown or malformed command \"{}\"", command)),
            [] => Ok(Step::Skipped("empty line".to_string())),
        }
    }

    fn move_resolved(&mut self, stop: &str, source: &ContainerId, target: &ContainerId) -> Step {
        let Some(stop_id) = self.resolve_stop(stop, source) else {
            return Step::Skipped(format!("no stop \"{}\" in {}", stop, source));
        };
        match self.board.move_stop(&stop_id, source, target) {
            MoveOutcome::Moved => Step::Applied,
            outcome => Step::Skipped(format!("move of \"{}\": {:?}", stop, outcome)),
        }
    }

    fn resolve_fleet(&self, reference: &str) -> Option<String> {
        let fleets = self.board.fleets();
        if fleets.contains(reference) {
            return Some(reference.to_string());
        }
        let label = self.board.naming().format(reference)?;
        fleets.find_by_number(&label).map(|f| f.id.clone())
    }

    fn resolve_member(&self, reference: &str) -> Option<String> {
        let members = self.board.members();
        if members.contains(reference) {
            return Some(reference.to_string());
        }
        members.find_by_name(reference).map(|m| m.id.clone())
    }

    fn resolve_container(&self, reference: &str) -> Option<ContainerId> {
        match reference.trim().to_lowercase().as_str() {
            "unassigned" | "backlog" => Some(ContainerId::Backlog),
            _ => self.resolve_fleet(reference).map(ContainerId::fleet),
        }
    }

    fn resolve_stop(&self, reference: &str, container: &ContainerId) -> Option<String> {
        let list = self.board.state().container(container)?;
        if list.contains(reference) {
            return Some(reference.to_string());
        }
        list.iter()
            .find(|s| s.client_code == reference)
            .map(|s| s.id.clone())
    }
}

fn parse_slot(input: &str) -> std::result::Result<Slot, String> {
    Slot::parse(input).ok_or_else(|| format!("unknown slot \"{}\"", input))
}

fn parse_role(input: &str) -> std::result::Result<MemberRole, String> {
    MemberRole::parse(input).ok_or_else(|| format!("unknown role \"{}\"", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(DispatchBoard::new(Box::new(SequentialIds::new("t"))))
    }

    const SCRIPT: &str = r#"
# crew
member add "Ana Lima" Motorista
member add "Bruno Reis" "Auxiliar de Distribuição"
fleet add 210 Zona Norte
assign 210 driver "Ana Lima"
assign "Frota - 210" helper "Bruno Reis"

paste "0451;Supermercado Silva;01310-100" "8821;Padaria Estrela"
move 0451 unassigned 210
"#;

    #[test]
    fn test_script_builds_board() {
        let mut session = session();
        let summary = session.run_script(SCRIPT).unwrap();
        assert_eq!(summary, SessionSummary { applied: 7, skipped: 0 });

        let board = session.board();
        let fleet = board.fleets().find_by_number("Frota - 210").unwrap();
        assert_eq!(fleet.route_details.as_deref(), Some("Zona Norte"));
        assert!(fleet.driver_id.is_some());
        assert!(fleet.helper_id.is_some());
        assert_eq!(fleet.stops.len(), 1);
        assert_eq!(board.backlog().len(), 1);
        assert_eq!(board.backlog().as_slice()[0].client_code, "8821");
    }

    #[test]
    fn test_stale_references_are_skipped() {
        let mut session = session();
        let script = "fleet add 1\nmove 9999 unassigned 1\nfleet rm 77\nreturn 0451 404\nmember rm ghost\n";
        let summary = session.run_script(script).unwrap();
        assert_eq!(summary, SessionSummary { applied: 1, skipped: 4 });
    }

    #[test]
    fn test_rejection_aborts_with_line_number() {
        let mut session = session();
        let script = "fleet add 113\n\n# again\nfleet add \"frota - 113\"\nfleet add 114\n";
        let err = session.run_script(script).unwrap_err();
        match err {
            Error::Script { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("already exists"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.board().fleets().len(), 1);
    }

    #[test]
    fn test_cross_fleet_assignment_rejected() {
        let mut session = session();
        let script = "member add Ana Motorista\nfleet add 1\nfleet add 2\nassign 1 driver Ana\nassign 2 driver Ana\n";
        let err = session.run_script(script).unwrap_err();
        assert!(matches!(err, Error::Script { line: 5, ref message } if message.contains("(Em Frota - 1)")));
    }

    #[test]
    fn test_quick_add_and_unassign() {
        let mut session = session();
        session
            .run_script("fleet add 7\nquick-add 7 operator \"Rui Costa\"\nunassign 7 operator\n")
            .unwrap();
        let board = session.board();
        assert_eq!(board.members().len(), 1);
        assert_eq!(board.members().as_slice()[0].role, MemberRole::OperadorGranel);
        assert!(board.fleets().find_by_number("Frota - 7").unwrap().operator_id.is_none());
    }

    #[test]
    fn test_quick_add_into_taken_slot_fails() {
        let mut session = session();
        let err = session
            .run_script("fleet add 7\nquick-add 7 driver Jose\nquick-add 7 driver Carlos\n")
            .unwrap_err();
        assert!(matches!(err, Error::Script { line: 3, ref message } if message.contains("already taken")));
        assert_eq!(session.board().members().len(), 1);
    }

    #[test]
    fn test_fleet_removal_returns_stops() {
        let mut session = session();
        session
            .run_script("fleet add 3\npaste \"1;A\" \"2;B\"\nmove 1 backlog 3\nmove 2 backlog 3\nreturn 1 3\nfleet rm 3\n")
            .unwrap();
        let codes: Vec<_> = session.board().backlog().iter().map(|s| s.client_code.clone()).collect();
        assert_eq!(codes, vec!["1", "2"]);
        assert!(session.board().fleets().is_empty());
    }

    #[test]
    fn test_unknown_command_and_bad_quoting() {
        assert!(matches!(
            session().run_script("teleport 1 2"),
            Err(Error::Script { line: 1, .. })
        ));
        assert!(matches!(
            session().run_script("member add \"Ana Motorista"),
            Err(Error::Script { line: 1, .. })
        ));
        assert!(matches!(
            session().run_script("member add Ana Gerente"),
            Err(Error::Script { ref message, .. }) if message.contains("Gerente")
        ));
    }

    #[test]
    fn test_import_relative_to_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rows.txt"), "9901\tMercado do João\t04550-000\n").unwrap();
        let script = dir.path().join("day.fleet");
        std::fs::write(&script, "import rows.txt\n").unwrap();

        let mut session = session();
        session.run_script_file(&script).unwrap();
        assert_eq!(session.board().backlog().len(), 1);
        assert_eq!(session.board().backlog().as_slice()[0].zip_code, "04550-000");
    }

    #[test]
    fn test_sequential_ids_from_config() {
        let session = Session::from_config(&Config::default(), true);
        let mut board = session.into_board();
        let member = board.add_member("Ana", MemberRole::Motorista).unwrap();
        assert_eq!(member.id, "id-1");
    }
}
