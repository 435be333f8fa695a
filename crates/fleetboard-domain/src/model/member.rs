//! Personnel type definitions

use serde::{Deserialize, Serialize};

/// Coarse role classification used to match members to fleet slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleCategory {
    Driver,
    Helper,
    Operator,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 3] = [RoleCategory::Driver, RoleCategory::Helper, RoleCategory::Operator];

    /// Fine-grained roles belonging to this category
    pub fn roles(self) -> Vec<MemberRole> {
        MemberRole::ALL
            .into_iter()
            .filter(|role| role.category() == self)
            .collect()
    }

    /// Role preselected when a member is created straight into a slot
    pub fn default_role(self) -> MemberRole {
        match self {
            RoleCategory::Driver => MemberRole::Motorista,
            RoleCategory::Helper => MemberRole::AuxiliarDistribuicao,
            RoleCategory::Operator => MemberRole::OperadorGranel,
        }
    }

    /// Short label used in eligibility reasons (Portuguese)
    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::Driver => "Motorista",
            RoleCategory::Helper => "Auxiliar",
            RoleCategory::Operator => "Operador",
        }
    }
}

/// Member role as registered by the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberRole {
    /// Motorista
    Motorista,
    /// Motorista I
    MotoristaI,
    /// Motorista Granel (bulk driver)
    MotoristaGranel,
    /// Auxiliar de Distribuição (distribution helper)
    AuxiliarDistribuicao,
    /// Operador Granel (bulk operator)
    OperadorGranel,
}

impl MemberRole {
    pub const ALL: [MemberRole; 5] = [
        MemberRole::Motorista,
        MemberRole::MotoristaI,
        MemberRole::MotoristaGranel,
        MemberRole::AuxiliarDistribuicao,
        MemberRole::OperadorGranel,
    ];

    /// Fixed role → category mapping
    pub fn category(self) -> RoleCategory {
        match self {
            MemberRole::Motorista | MemberRole::MotoristaI | MemberRole::MotoristaGranel => {
                RoleCategory::Driver
            }
            MemberRole::AuxiliarDistribuicao => RoleCategory::Helper,
            MemberRole::OperadorGranel => RoleCategory::Operator,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            MemberRole::Motorista => "Motorista",
            MemberRole::MotoristaI => "Motorista I",
            MemberRole::MotoristaGranel => "Motorista Granel",
            MemberRole::AuxiliarDistribuicao => "Auxiliar de Distribuição",
            MemberRole::OperadorGranel => "Operador Granel",
        }
    }

    /// Parse from a display label or variant name, ignoring case,
    /// surrounding whitespace and `_`/`-` separators.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = normalize_role(input);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|role| {
            normalize_role(role.label()) == wanted || normalize_role(&format!("{:?}", role)) == wanted
        })
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_role(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Registered team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: MemberRole,
}

impl Member {
    pub fn category(&self) -> RoleCategory {
        self.role.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_maps_to_one_category() {
        assert_eq!(MemberRole::Motorista.category(), RoleCategory::Driver);
        assert_eq!(MemberRole::MotoristaI.category(), RoleCategory::Driver);
        assert_eq!(MemberRole::MotoristaGranel.category(), RoleCategory::Driver);
        assert_eq!(MemberRole::AuxiliarDistribuicao.category(), RoleCategory::Helper);
        assert_eq!(MemberRole::OperadorGranel.category(), RoleCategory::Operator);
    }

    #[test]
    fn test_roles_by_category() {
        assert_eq!(
            RoleCategory::Driver.roles(),
            vec![MemberRole::Motorista, MemberRole::MotoristaI, MemberRole::MotoristaGranel]
        );
        assert_eq!(RoleCategory::Helper.roles(), vec![MemberRole::AuxiliarDistribuicao]);
        assert_eq!(RoleCategory::Operator.roles(), vec![MemberRole::OperadorGranel]);
    }

    #[test]
    fn test_default_role_belongs_to_category() {
        for category in RoleCategory::ALL {
            assert_eq!(category.default_role().category(), category);
        }
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(MemberRole::parse("Motorista I"), Some(MemberRole::MotoristaI));
        assert_eq!(MemberRole::parse("motorista granel"), Some(MemberRole::MotoristaGranel));
        assert_eq!(MemberRole::parse("operador_granel"), Some(MemberRole::OperadorGranel));
        assert_eq!(
            MemberRole::parse("Auxiliar de Distribuição"),
            Some(MemberRole::AuxiliarDistribuicao)
        );
        assert_eq!(MemberRole::parse("AuxiliarDistribuicao"), Some(MemberRole::AuxiliarDistribuicao));
        assert_eq!(MemberRole::parse("Motorista"), Some(MemberRole::Motorista));
        assert_eq!(MemberRole::parse(""), None);
        assert_eq!(MemberRole::parse("Gerente"), None);
    }
}
